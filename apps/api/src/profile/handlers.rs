use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::user::UserProfile;
use crate::multipart::FormFields;
use crate::profile::{self, ProfileForm};
use crate::state::AppState;

#[derive(Serialize)]
pub struct ProfileResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub user: UserProfile,
}

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
) -> Result<Json<ProfileResponse>, AppError> {
    let user = profile::get_profile(state.profiles.as_ref(), actor.id).await?;
    Ok(Json(ProfileResponse {
        success: true,
        message: None,
        user,
    }))
}

/// PUT /api/v1/profile
pub async fn handle_update_profile(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    mut multipart: Multipart,
) -> Result<Json<ProfileResponse>, AppError> {
    let mut form = FormFields::parse(&mut multipart).await?;
    let profile_form = ProfileForm {
        name: form.text("name"),
        email: form.text("email"),
        phone: form.text("phone"),
        address: form.text("address"),
        cover_letter: form.optional_text("coverLetter"),
        resume_file: form.take_file().map(|f| (f.file_name, f.data)),
    };

    let user = profile::update_profile(
        state.profiles.as_ref(),
        state.storage.as_ref(),
        &actor,
        profile_form,
    )
    .await?;

    Ok(Json(ProfileResponse {
        success: true,
        message: Some("Profile updated.".to_string()),
        user,
    }))
}
