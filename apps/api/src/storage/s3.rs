use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use crate::ingestion::{ResourceKind, UploadDirective};
use crate::storage::{ObjectStorage, StorageError, StoredObject};

const RESUME_PREFIX: &str = "resumes";

/// S3-backed content storage. The directive's target format and page
/// selection are attached as object metadata for the store-side conversion
/// pipeline; this service never transforms file bytes itself.
pub struct S3Storage {
    client: S3Client,
    bucket: String,
    endpoint: String,
}

impl S3Storage {
    pub fn new(client: S3Client, bucket: String, endpoint: String) -> Self {
        Self {
            client,
            bucket,
            endpoint,
        }
    }

    /// Object key for a new upload. The stored extension follows the
    /// directive's target format when a conversion is requested, otherwise
    /// the file's own extension.
    fn object_key(directive: &UploadDirective, file_name: &str) -> String {
        let extension = directive
            .target_format
            .clone()
            .or_else(|| {
                file_name
                    .rsplit_once('.')
                    .map(|(_, ext)| ext.to_lowercase())
            })
            .unwrap_or_else(|| "bin".to_string());
        format!("{RESUME_PREFIX}/{}.{extension}", Uuid::new_v4())
    }
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn upload(
        &self,
        directive: &UploadDirective,
        file_name: &str,
        data: Bytes,
    ) -> Result<StoredObject, StorageError> {
        let key = Self::object_key(directive, file_name);

        let mut request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(data))
            .metadata("resource-kind", directive.resource_kind.as_str());
        if let Some(format) = &directive.target_format {
            request = request.metadata("target-format", format.clone());
        }
        if let Some(page) = directive.page {
            request = request.metadata("page", page.to_string());
        }
        if directive.resource_kind == ResourceKind::RawDocument {
            request = request.content_type("application/octet-stream");
        }

        request
            .send()
            .await
            .map_err(|e| StorageError::Upload(e.to_string()))?;

        info!("Uploaded resume to s3://{}/{}", self.bucket, key);

        Ok(StoredObject {
            url: format!("{}/{}/{}", self.endpoint, self.bucket, key),
            public_id: key,
        })
    }

    async fn delete(&self, public_id: &str) -> Result<(), StorageError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(public_id)
            .send()
            .await
            .map_err(|e| StorageError::Delete(e.to_string()))?;
        Ok(())
    }
}
