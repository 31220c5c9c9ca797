//! In-memory content storage used by tests. Records every upload and delete
//! so assertions can check ordering and cleanup behavior, and can be told to
//! fail uploads or deletes.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;

use crate::ingestion::UploadDirective;
use crate::storage::{ObjectStorage, StorageError, StoredObject};

#[derive(Debug, Clone)]
pub struct StoredUpload {
    pub directive: UploadDirective,
    pub file_name: String,
    pub len: usize,
}

#[derive(Default)]
pub struct MemoryStorage {
    objects: Mutex<HashMap<String, StoredUpload>>,
    deletes: Mutex<Vec<String>>,
    fail_uploads: AtomicBool,
    fail_deletes: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_uploads(&self) {
        self.fail_uploads.store(true, Ordering::SeqCst);
    }

    pub fn fail_deletes(&self) {
        self.fail_deletes.store(true, Ordering::SeqCst);
    }

    pub fn contains(&self, public_id: &str) -> bool {
        self.objects.lock().unwrap().contains_key(public_id)
    }

    pub fn stored(&self, public_id: &str) -> Option<StoredUpload> {
        self.objects.lock().unwrap().get(public_id).cloned()
    }

    pub fn upload_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    /// Delete requests received, in order, including ones told to fail.
    pub fn delete_requests(&self) -> Vec<String> {
        self.deletes.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStorage for MemoryStorage {
    async fn upload(
        &self,
        directive: &UploadDirective,
        file_name: &str,
        data: Bytes,
    ) -> Result<StoredObject, StorageError> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(StorageError::Upload("simulated upload failure".into()));
        }

        let public_id = format!("resumes/{}", uuid::Uuid::new_v4());
        self.objects.lock().unwrap().insert(
            public_id.clone(),
            StoredUpload {
                directive: directive.clone(),
                file_name: file_name.to_string(),
                len: data.len(),
            },
        );

        Ok(StoredObject {
            url: format!("memory://{public_id}"),
            public_id,
        })
    }

    async fn delete(&self, public_id: &str) -> Result<(), StorageError> {
        self.deletes.lock().unwrap().push(public_id.to_string());
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(StorageError::Delete("simulated delete failure".into()));
        }
        self.objects.lock().unwrap().remove(public_id);
        Ok(())
    }
}
