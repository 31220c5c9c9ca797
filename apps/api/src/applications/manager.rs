//! Application lifecycle: submission with duplicate prevention and resume
//! resolution, per-party listing, and the two-party soft/hard-delete state
//! machine.

use bytes::Bytes;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::applications::store::{ApplicationStore, ALREADY_APPLIED};
use crate::errors::AppError;
use crate::ingestion;
use crate::jobs::JobStore;
use crate::models::application::{
    ApplicationRecord, DeletedBy, EmployerInfo, JobInfo, JobSeekerInfo,
};
use crate::models::user::{Role, UserProfile};
use crate::storage::ObjectStorage;

/// The five free-text fields every application must carry.
#[derive(Debug, Clone)]
pub struct SubmissionFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub cover_letter: String,
}

impl SubmissionFields {
    fn validate(&self) -> Result<(), AppError> {
        let all_present = [
            &self.name,
            &self.email,
            &self.phone,
            &self.address,
            &self.cover_letter,
        ]
        .iter()
        .all(|field| !field.trim().is_empty());

        if all_present {
            Ok(())
        } else {
            Err(AppError::Validation("All fields are required.".to_string()))
        }
    }
}

/// A resume file attached to the submission.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: String,
    pub data: Bytes,
}

/// Creates an application by `seeker` for `job_id`.
///
/// The job title and owning employer are captured at this moment and never
/// refreshed. If no file is attached, the seeker's stored profile resume is
/// copied into the record. The store's unique index backs the duplicate
/// check, so a race between two submissions cannot both commit.
pub async fn submit(
    applications: &dyn ApplicationStore,
    jobs: &dyn JobStore,
    storage: &dyn ObjectStorage,
    job_id: Uuid,
    seeker: &UserProfile,
    fields: SubmissionFields,
    file: Option<ResumeUpload>,
) -> Result<ApplicationRecord, AppError> {
    fields.validate()?;

    let job = jobs
        .find_by_id(job_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found.".to_string()))?;

    if applications
        .find_by_job_and_seeker(job_id, seeker.id)
        .await?
        .is_some()
    {
        return Err(AppError::Duplicate(ALREADY_APPLIED.to_string()));
    }

    let resume = match file {
        Some(upload) => ingestion::ingest(storage, &upload.file_name, upload.data).await?,
        None => seeker
            .resume
            .clone()
            .ok_or_else(|| AppError::MissingResume("Please upload your resume.".to_string()))?,
    };

    let record = ApplicationRecord {
        id: Uuid::new_v4(),
        job_seeker_info: JobSeekerInfo {
            id: seeker.id,
            name: fields.name,
            email: fields.email,
            phone: fields.phone,
            address: fields.address,
            cover_letter: fields.cover_letter,
            role: Role::JobSeeker,
            resume,
        },
        employer_info: EmployerInfo {
            id: job.posted_by,
            role: Role::Employer,
        },
        job_info: JobInfo {
            job_id,
            job_title: job.title,
        },
        deleted_by: DeletedBy::default(),
        created_at: Utc::now(),
    };

    applications.insert(&record).await?;
    info!(application_id = %record.id, job_id = %job_id, "Application submitted");
    Ok(record)
}

pub async fn list_for_employer(
    applications: &dyn ApplicationStore,
    employer_id: Uuid,
) -> Result<Vec<ApplicationRecord>, AppError> {
    applications.list_for_employer(employer_id).await
}

pub async fn list_for_job_seeker(
    applications: &dyn ApplicationStore,
    seeker_id: Uuid,
) -> Result<Vec<ApplicationRecord>, AppError> {
    applications.list_for_job_seeker(seeker_id).await
}

/// Soft-deletes the application from `role`'s side; once both parties have
/// deleted, the record is hard-deleted in the same logical operation.
///
/// The flag flip is one atomic store call returning the post-update state,
/// so of two concurrent deletes from opposite sides exactly one observes
/// `{true, true}` and performs the removal. Repeating a delete with the same
/// role is a no-op success.
pub async fn delete(
    applications: &dyn ApplicationStore,
    id: Uuid,
    role: Role,
) -> Result<(), AppError> {
    let flags = applications
        .mark_deleted(id, role)
        .await?
        .ok_or_else(|| AppError::NotFound("Application not found.".to_string()))?;

    if flags.both() {
        applications.remove(id).await?;
        info!(application_id = %id, "Application hard-deleted after both parties agreed");
    }

    Ok(())
}
