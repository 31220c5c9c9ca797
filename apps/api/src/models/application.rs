use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::user::Role;

/// A pointer to a resume file held by the content storage service. Immutable
/// once created; a profile update replaces it wholesale and deletes the old
/// stored object, it is never partially mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeReference {
    pub public_id: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSeekerInfo {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub cover_letter: String,
    pub role: Role,
    pub resume: ResumeReference,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerInfo {
    pub id: Uuid,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobInfo {
    pub job_id: Uuid,
    /// Title snapshot taken at application time; never re-synced if the job
    /// posting changes later.
    pub job_title: String,
}

/// Which parties have soft-deleted the application. `{true, true}` is a
/// transient state that triggers hard deletion in the same logical operation;
/// no code path may observe it persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedBy {
    pub job_seeker: bool,
    pub employer: bool,
}

impl DeletedBy {
    pub fn both(&self) -> bool {
        self.job_seeker && self.employer
    }
}

/// One job seeker's application to one job. At most one record exists per
/// (job, seeker) pair; the store's unique index enforces this under
/// concurrent submissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub id: Uuid,
    pub job_seeker_info: JobSeekerInfo,
    pub employer_info: EmployerInfo,
    pub job_info: JobInfo,
    pub deleted_by: DeletedBy,
    pub created_at: DateTime<Utc>,
}

/// Flat row shape backing `applications` in Postgres.
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationRow {
    pub id: Uuid,
    pub job_seeker_id: Uuid,
    pub job_seeker_name: String,
    pub job_seeker_email: String,
    pub job_seeker_phone: String,
    pub job_seeker_address: String,
    pub cover_letter: String,
    pub resume_public_id: String,
    pub resume_url: String,
    pub employer_id: Uuid,
    pub job_id: Uuid,
    pub job_title: String,
    pub deleted_by_job_seeker: bool,
    pub deleted_by_employer: bool,
    pub created_at: DateTime<Utc>,
}

impl From<ApplicationRow> for ApplicationRecord {
    fn from(row: ApplicationRow) -> Self {
        ApplicationRecord {
            id: row.id,
            job_seeker_info: JobSeekerInfo {
                id: row.job_seeker_id,
                name: row.job_seeker_name,
                email: row.job_seeker_email,
                phone: row.job_seeker_phone,
                address: row.job_seeker_address,
                cover_letter: row.cover_letter,
                role: Role::JobSeeker,
                resume: ResumeReference {
                    public_id: row.resume_public_id,
                    url: row.resume_url,
                },
            },
            employer_info: EmployerInfo {
                id: row.employer_id,
                role: Role::Employer,
            },
            job_info: JobInfo {
                job_id: row.job_id,
                job_title: row.job_title,
            },
            deleted_by: DeletedBy {
                job_seeker: row.deleted_by_job_seeker,
                employer: row.deleted_by_employer,
            },
            created_at: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_with_stable_field_names() {
        let record = ApplicationRecord {
            id: Uuid::new_v4(),
            job_seeker_info: JobSeekerInfo {
                id: Uuid::new_v4(),
                name: "A".into(),
                email: "a@x.com".into(),
                phone: "123".into(),
                address: "Y".into(),
                cover_letter: "Z".into(),
                role: Role::JobSeeker,
                resume: ResumeReference {
                    public_id: "resumes/abc.pdf".into(),
                    url: "https://cdn.example/resumes/abc.pdf".into(),
                },
            },
            employer_info: EmployerInfo {
                id: Uuid::new_v4(),
                role: Role::Employer,
            },
            job_info: JobInfo {
                job_id: Uuid::new_v4(),
                job_title: "Backend Engineer".into(),
            },
            deleted_by: DeletedBy::default(),
            created_at: Utc::now(),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("jobSeekerInfo").is_some());
        assert!(value.get("employerInfo").is_some());
        assert!(value.get("jobInfo").is_some());
        assert_eq!(value["deletedBy"]["jobSeeker"], false);
        assert_eq!(value["deletedBy"]["employer"], false);
        assert_eq!(value["jobSeekerInfo"]["coverLetter"], "Z");
        // Resume reference keeps its storage-facing snake_case names.
        assert_eq!(value["jobSeekerInfo"]["resume"]["public_id"], "resumes/abc.pdf");
        assert_eq!(value["jobInfo"]["jobTitle"], "Backend Engineer");
        assert!(value.get("createdAt").is_some());
    }
}
