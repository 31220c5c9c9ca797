//! Content storage service boundary.
//!
//! The portal never touches resume bytes beyond handing them to an object
//! store together with an [`UploadDirective`](crate::ingestion::UploadDirective)
//! describing how the store should treat them. Production uses S3 (MinIO
//! locally); tests use the in-memory implementation.

pub mod s3;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::ingestion::UploadDirective;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Delete failed: {0}")]
    Delete(String),
}

/// The stored object as the storage service reports it back: a stable
/// identifier and a fetch URL, taken verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub public_id: String,
    pub url: String,
}

/// Opaque object store for resume files.
///
/// Upload failures must leave no partial reference for the caller to persist;
/// deletion is best-effort and its failures are non-fatal per the replacement
/// semantics in [`crate::ingestion`].
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn upload(
        &self,
        directive: &UploadDirective,
        file_name: &str,
        data: Bytes,
    ) -> Result<StoredObject, StorageError>;

    async fn delete(&self, public_id: &str) -> Result<(), StorageError>;
}
