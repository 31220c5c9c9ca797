//! Resume ingestion router.
//!
//! Classification is a pure function from a declared file name to an
//! [`UploadDirective`]; it never inspects file bytes. The effectful part is
//! a single upload call against the content storage service, plus the
//! delete-after-upload replacement used by profile updates.

use bytes::Bytes;
use thiserror::Error;
use tracing::warn;

use crate::errors::AppError;
use crate::models::application::ResumeReference;
use crate::storage::ObjectStorage;

/// How the storage service should treat the object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Image,
    RawDocument,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Image => "image",
            ResourceKind::RawDocument => "raw",
        }
    }
}

/// The resolved handling plan for one uploaded file, derived purely from its
/// declared extension. Exactly one resource kind per directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadDirective {
    pub resource_kind: ResourceKind,
    pub target_format: Option<String>,
    pub page: Option<u32>,
}

/// The file's extension is not one the portal accepts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported file format: {extension}")]
pub struct ClassificationError {
    pub extension: String,
}

impl From<ClassificationError> for AppError {
    fn from(err: ClassificationError) -> Self {
        AppError::UnsupportedFormat(err.extension)
    }
}

/// Derives the upload directive for a file from its declared name,
/// case-insensitive on the extension.
///
/// PDFs are deliberately converted: the first page is rendered as a JPEG
/// still rather than stored as-is, so employers always get an inline
/// preview. Word documents are stored untouched.
pub fn classify(file_name: &str) -> Result<UploadDirective, ClassificationError> {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .unwrap_or(file_name)
        .to_lowercase();

    match extension.as_str() {
        "jpg" | "jpeg" | "png" => Ok(UploadDirective {
            resource_kind: ResourceKind::Image,
            target_format: Some(extension),
            page: None,
        }),
        "pdf" => Ok(UploadDirective {
            resource_kind: ResourceKind::Image,
            target_format: Some("jpg".to_string()),
            page: Some(1),
        }),
        "doc" | "docx" => Ok(UploadDirective {
            resource_kind: ResourceKind::RawDocument,
            target_format: None,
            page: None,
        }),
        _ => Err(ClassificationError { extension }),
    }
}

/// Classifies and uploads a resume file, returning the storage service's
/// identifier and URL verbatim. No retry; a failed upload leaves nothing for
/// the caller to persist.
pub async fn ingest(
    storage: &dyn ObjectStorage,
    file_name: &str,
    data: Bytes,
) -> Result<ResumeReference, AppError> {
    let directive = classify(file_name)?;
    let stored = storage
        .upload(&directive, file_name, data)
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;
    Ok(ResumeReference {
        public_id: stored.public_id,
        url: stored.url,
    })
}

/// Replaces a stored resume with a freshly uploaded one.
///
/// The old object is deleted only after the new upload succeeds, so a failed
/// upload never leaves the profile without a resume. A failed deletion of the
/// superseded object is logged and swallowed; the new reference is already
/// authoritative and the orphan is bounded.
pub async fn replace(
    storage: &dyn ObjectStorage,
    current: Option<&ResumeReference>,
    file_name: &str,
    data: Bytes,
) -> Result<ResumeReference, AppError> {
    let fresh = ingest(storage, file_name, data).await?;

    if let Some(old) = current {
        if let Err(e) = storage.delete(&old.public_id).await {
            warn!(
                public_id = %old.public_id,
                "Failed to delete superseded resume: {e}"
            );
        }
    }

    Ok(fresh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryStorage;

    #[test]
    fn classify_plain_images_pass_through_their_format() {
        for ext in ["jpg", "jpeg", "png"] {
            let directive = classify(&format!("resume.{ext}")).unwrap();
            assert_eq!(directive.resource_kind, ResourceKind::Image);
            assert_eq!(directive.target_format.as_deref(), Some(ext));
            assert_eq!(directive.page, None);
        }
    }

    #[test]
    fn classify_pdf_renders_first_page_as_jpg() {
        let directive = classify("resume.pdf").unwrap();
        assert_eq!(directive.resource_kind, ResourceKind::Image);
        assert_eq!(directive.target_format.as_deref(), Some("jpg"));
        assert_eq!(directive.page, Some(1));
    }

    #[test]
    fn classify_word_documents_are_stored_raw() {
        for name in ["resume.doc", "resume.docx"] {
            let directive = classify(name).unwrap();
            assert_eq!(directive.resource_kind, ResourceKind::RawDocument);
            assert_eq!(directive.target_format, None);
            assert_eq!(directive.page, None);
        }
    }

    #[test]
    fn classify_is_case_insensitive() {
        let directive = classify("Resume.PDF").unwrap();
        assert_eq!(directive.page, Some(1));
        assert_eq!(
            classify("photo.JPEG").unwrap().target_format.as_deref(),
            Some("jpeg")
        );
    }

    #[test]
    fn classify_rejects_unknown_extensions_by_name() {
        let err = classify("resume.bmp").unwrap_err();
        assert_eq!(err.extension, "bmp");
        assert_eq!(err.to_string(), "Unsupported file format: bmp");

        let err = classify("resume").unwrap_err();
        assert_eq!(err.extension, "resume");
    }

    #[tokio::test]
    async fn ingest_returns_service_reference_verbatim() {
        let storage = MemoryStorage::new();
        let reference = ingest(&storage, "resume.pdf", Bytes::from_static(b"pdf"))
            .await
            .unwrap();
        assert!(storage.contains(&reference.public_id));
        assert_eq!(reference.url, format!("memory://{}", reference.public_id));

        let stored = storage.stored(&reference.public_id).unwrap();
        assert_eq!(stored.directive, classify("resume.pdf").unwrap());
        assert_eq!(stored.file_name, "resume.pdf");
        assert_eq!(stored.len, 3);
    }

    #[tokio::test]
    async fn ingest_rejects_unsupported_file_before_touching_storage() {
        let storage = MemoryStorage::new();
        let err = ingest(&storage, "resume.bmp", Bytes::from_static(b"x"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnsupportedFormat(ext) if ext == "bmp"));
        assert_eq!(storage.upload_count(), 0);
    }

    #[tokio::test]
    async fn replace_deletes_old_object_only_after_upload_succeeds() {
        let storage = MemoryStorage::new();
        let old = ingest(&storage, "old.pdf", Bytes::from_static(b"old"))
            .await
            .unwrap();

        let fresh = replace(&storage, Some(&old), "new.docx", Bytes::from_static(b"new"))
            .await
            .unwrap();

        assert_ne!(fresh.public_id, old.public_id);
        assert!(!storage.contains(&old.public_id));
        assert_eq!(storage.delete_requests(), vec![old.public_id]);
    }

    #[tokio::test]
    async fn replace_keeps_old_object_when_upload_fails() {
        let storage = MemoryStorage::new();
        let old = ingest(&storage, "old.pdf", Bytes::from_static(b"old"))
            .await
            .unwrap();

        storage.fail_uploads();
        let err = replace(&storage, Some(&old), "new.pdf", Bytes::from_static(b"new"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Storage(_)));
        assert!(storage.contains(&old.public_id));
        assert!(storage.delete_requests().is_empty());
    }

    #[tokio::test]
    async fn replace_swallows_failed_cleanup_of_old_object() {
        let storage = MemoryStorage::new();
        let old = ingest(&storage, "old.pdf", Bytes::from_static(b"old"))
            .await
            .unwrap();

        storage.fail_deletes();
        let fresh = replace(&storage, Some(&old), "new.pdf", Bytes::from_static(b"new"))
            .await
            .unwrap();

        // New reference is authoritative; the orphaned object is accepted.
        assert!(storage.contains(&fresh.public_id));
        assert_eq!(storage.delete_requests(), vec![old.public_id]);
    }
}
