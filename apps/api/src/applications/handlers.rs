use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::applications::manager::{self, ResumeUpload, SubmissionFields};
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::application::ApplicationRecord;
use crate::models::user::Role;
use crate::multipart::FormFields;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ApplicationResponse {
    pub success: bool,
    pub message: String,
    pub application: ApplicationRecord,
}

#[derive(Serialize)]
pub struct ApplicationListResponse {
    pub success: bool,
    pub applications: Vec<ApplicationRecord>,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

/// POST /api/v1/jobs/:job_id/applications
pub async fn handle_submit(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    AuthUser(actor): AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApplicationResponse>), AppError> {
    if actor.role != Role::JobSeeker {
        return Err(AppError::Forbidden);
    }

    let mut form = FormFields::parse(&mut multipart).await?;
    let fields = SubmissionFields {
        name: form.text("name"),
        email: form.text("email"),
        phone: form.text("phone"),
        address: form.text("address"),
        cover_letter: form.text("coverLetter"),
    };
    let file = form.take_file().map(|f| ResumeUpload {
        file_name: f.file_name,
        data: f.data,
    });

    let application = manager::submit(
        state.applications.as_ref(),
        state.jobs.as_ref(),
        state.storage.as_ref(),
        job_id,
        &actor,
        fields,
        file,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApplicationResponse {
            success: true,
            message: "Application submitted.".to_string(),
            application,
        }),
    ))
}

/// GET /api/v1/applications/employer
pub async fn handle_employer_list(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
) -> Result<Json<ApplicationListResponse>, AppError> {
    if actor.role != Role::Employer {
        return Err(AppError::Forbidden);
    }
    let applications =
        manager::list_for_employer(state.applications.as_ref(), actor.id).await?;
    Ok(Json(ApplicationListResponse {
        success: true,
        applications,
    }))
}

/// GET /api/v1/applications/jobseeker
pub async fn handle_job_seeker_list(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
) -> Result<Json<ApplicationListResponse>, AppError> {
    if actor.role != Role::JobSeeker {
        return Err(AppError::Forbidden);
    }
    let applications =
        manager::list_for_job_seeker(state.applications.as_ref(), actor.id).await?;
    Ok(Json(ApplicationListResponse {
        success: true,
        applications,
    }))
}

/// DELETE /api/v1/applications/:id
///
/// 200 whether the delete was soft (one side) or hard (both sides agreed);
/// 404 once the record is gone.
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AuthUser(actor): AuthUser,
) -> Result<Json<MessageResponse>, AppError> {
    manager::delete(state.applications.as_ref(), id, actor.role).await?;
    Ok(Json(MessageResponse {
        success: true,
        message: "Application Deleted.".to_string(),
    }))
}
