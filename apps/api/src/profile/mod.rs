//! Profile flow: contact-field updates and resume replacement. This is the
//! consumer of the ingestion router's delete-after-upload semantics — a
//! seeker is never left without a resume because a replacement upload failed.

pub mod handlers;
pub mod store;

use bytes::Bytes;
use uuid::Uuid;

use crate::errors::AppError;
use crate::ingestion;
use crate::models::user::UserProfile;
use crate::profile::store::{ProfileStore, ProfileUpdate};
use crate::storage::ObjectStorage;

#[derive(Debug, Clone)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub cover_letter: Option<String>,
    pub resume_file: Option<(String, Bytes)>,
}

/// Updates the actor's profile. When a resume file is attached, the new
/// object is uploaded first and the superseded one deleted afterwards
/// (best-effort); without a file the stored reference is left untouched.
pub async fn update_profile(
    profiles: &dyn ProfileStore,
    storage: &dyn ObjectStorage,
    actor: &UserProfile,
    form: ProfileForm,
) -> Result<UserProfile, AppError> {
    let contact_complete = [&form.name, &form.email, &form.phone, &form.address]
        .iter()
        .all(|field| !field.trim().is_empty());
    if !contact_complete {
        return Err(AppError::Validation("All fields are required.".to_string()));
    }

    let resume = match form.resume_file {
        Some((file_name, data)) => {
            Some(ingestion::replace(storage, actor.resume.as_ref(), &file_name, data).await?)
        }
        None => None,
    };

    let updated = profiles
        .update(
            actor.id,
            ProfileUpdate {
                name: form.name,
                email: form.email,
                phone: form.phone,
                address: form.address,
                cover_letter: form.cover_letter,
                resume,
            },
        )
        .await?
        .ok_or_else(|| AppError::NotFound("User not found.".to_string()))?;

    Ok(updated)
}

/// Fetches a profile by id, for the GET endpoint.
pub async fn get_profile(
    profiles: &dyn ProfileStore,
    id: Uuid,
) -> Result<UserProfile, AppError> {
    profiles
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found.".to_string()))
}
