//! Multipart form parsing for the submission and profile-update endpoints.
//! Drains the stream within the request scope; the resume file, if present,
//! arrives under the `resume` field.

use std::collections::HashMap;

use axum::extract::Multipart;
use bytes::Bytes;

use crate::errors::AppError;

const MAX_RESUME_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug)]
pub struct ResumeFile {
    pub file_name: String,
    pub data: Bytes,
}

/// Parsed multipart fields: at most one resume file plus text fields by name.
#[derive(Debug, Default)]
pub struct FormFields {
    file: Option<ResumeFile>,
    text: HashMap<String, String>,
}

impl FormFields {
    pub async fn parse(multipart: &mut Multipart) -> Result<Self, AppError> {
        let mut form = FormFields::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to parse multipart form: {e}")))?
        {
            let name = field.name().unwrap_or("").to_string();

            if name == "resume" {
                let file_name = field
                    .file_name()
                    .map(|s| s.to_string())
                    .ok_or_else(|| {
                        AppError::Validation("Resume file name is missing.".to_string())
                    })?;
                let data = field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read resume file: {e}"))
                })?;
                if data.len() > MAX_RESUME_BYTES {
                    return Err(AppError::Validation(
                        "Resume file exceeds the 5 MB limit.".to_string(),
                    ));
                }
                form.file = Some(ResumeFile { file_name, data });
            } else {
                let value = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read field '{name}': {e}"))
                })?;
                form.text.insert(name, value);
            }
        }

        Ok(form)
    }

    pub fn take_file(&mut self) -> Option<ResumeFile> {
        self.file.take()
    }

    /// Text field value, or empty if absent; presence checks belong to the
    /// submission validation rules.
    pub fn text(&self, name: &str) -> String {
        self.text.get(name).cloned().unwrap_or_default()
    }

    pub fn optional_text(&self, name: &str) -> Option<String> {
        self.text.get(name).filter(|v| !v.is_empty()).cloned()
    }
}
