//! Persistence for application records.
//!
//! Two invariants live down here rather than in the manager, because only the
//! store can enforce them under concurrency:
//!   - the unique (job_id, job_seeker_id) index backs duplicate prevention,
//!     so two racing submissions cannot both commit;
//!   - `mark_deleted` flips one party's flag and reports the post-update
//!     state of both flags in a single atomic step, so two racing deletes
//!     cannot leave a `{true, true}` row behind.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::{ApplicationRecord, ApplicationRow, DeletedBy};
use crate::models::user::Role;

pub const ALREADY_APPLIED: &str = "You have already applied for this job.";

#[async_trait]
pub trait ApplicationStore: Send + Sync {
    /// Persists a new record. A second active record for the same
    /// (job, seeker) pair fails with [`AppError::Duplicate`].
    async fn insert(&self, record: &ApplicationRecord) -> Result<(), AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ApplicationRecord>, AppError>;

    async fn find_by_job_and_seeker(
        &self,
        job_id: Uuid,
        seeker_id: Uuid,
    ) -> Result<Option<ApplicationRecord>, AppError>;

    async fn list_for_employer(
        &self,
        employer_id: Uuid,
    ) -> Result<Vec<ApplicationRecord>, AppError>;

    async fn list_for_job_seeker(
        &self,
        seeker_id: Uuid,
    ) -> Result<Vec<ApplicationRecord>, AppError>;

    /// Atomically sets the deletion flag belonging to `role` and returns the
    /// post-update state of both flags, or `None` if the record is absent.
    async fn mark_deleted(&self, id: Uuid, role: Role) -> Result<Option<DeletedBy>, AppError>;

    /// Hard-deletes the record. Idempotent.
    async fn remove(&self, id: Uuid) -> Result<(), AppError>;
}

pub struct PgApplicationStore {
    pool: PgPool,
}

impl PgApplicationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_COLUMNS: &str = "id, job_seeker_id, job_seeker_name, job_seeker_email, \
     job_seeker_phone, job_seeker_address, cover_letter, resume_public_id, resume_url, \
     employer_id, job_id, job_title, deleted_by_job_seeker, deleted_by_employer, created_at";

#[async_trait]
impl ApplicationStore for PgApplicationStore {
    async fn insert(&self, record: &ApplicationRecord) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO applications
                (id, job_seeker_id, job_seeker_name, job_seeker_email, job_seeker_phone,
                 job_seeker_address, cover_letter, resume_public_id, resume_url,
                 employer_id, job_id, job_title,
                 deleted_by_job_seeker, deleted_by_employer, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(record.id)
        .bind(record.job_seeker_info.id)
        .bind(&record.job_seeker_info.name)
        .bind(&record.job_seeker_info.email)
        .bind(&record.job_seeker_info.phone)
        .bind(&record.job_seeker_info.address)
        .bind(&record.job_seeker_info.cover_letter)
        .bind(&record.job_seeker_info.resume.public_id)
        .bind(&record.job_seeker_info.resume.url)
        .bind(record.employer_info.id)
        .bind(record.job_info.job_id)
        .bind(&record.job_info.job_title)
        .bind(record.deleted_by.job_seeker)
        .bind(record.deleted_by.employer)
        .bind(record.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(AppError::Duplicate(ALREADY_APPLIED.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ApplicationRecord>, AppError> {
        let row: Option<ApplicationRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM applications WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(ApplicationRecord::from))
    }

    async fn find_by_job_and_seeker(
        &self,
        job_id: Uuid,
        seeker_id: Uuid,
    ) -> Result<Option<ApplicationRecord>, AppError> {
        let row: Option<ApplicationRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM applications WHERE job_id = $1 AND job_seeker_id = $2"
        ))
        .bind(job_id)
        .bind(seeker_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(ApplicationRecord::from))
    }

    async fn list_for_employer(
        &self,
        employer_id: Uuid,
    ) -> Result<Vec<ApplicationRecord>, AppError> {
        let rows: Vec<ApplicationRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM applications \
             WHERE employer_id = $1 AND deleted_by_employer = FALSE"
        ))
        .bind(employer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(ApplicationRecord::from).collect())
    }

    async fn list_for_job_seeker(
        &self,
        seeker_id: Uuid,
    ) -> Result<Vec<ApplicationRecord>, AppError> {
        let rows: Vec<ApplicationRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM applications \
             WHERE job_seeker_id = $1 AND deleted_by_job_seeker = FALSE"
        ))
        .bind(seeker_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(ApplicationRecord::from).collect())
    }

    async fn mark_deleted(&self, id: Uuid, role: Role) -> Result<Option<DeletedBy>, AppError> {
        let flag = match role {
            Role::JobSeeker => "deleted_by_job_seeker",
            Role::Employer => "deleted_by_employer",
        };
        // Single UPDATE ... RETURNING: the row lock serializes concurrent
        // flips, so exactly one caller observes the both-true state.
        let flags: Option<(bool, bool)> = sqlx::query_as(&format!(
            "UPDATE applications SET {flag} = TRUE WHERE id = $1 \
             RETURNING deleted_by_job_seeker, deleted_by_employer"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(flags.map(|(job_seeker, employer)| DeletedBy {
            job_seeker,
            employer,
        }))
    }

    async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
pub mod memory {
    //! In-memory store for tests, mirroring the Postgres store's atomicity:
    //! flag flips happen under the map lock.

    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct MemoryApplicationStore {
        records: Mutex<HashMap<Uuid, ApplicationRecord>>,
    }

    impl MemoryApplicationStore {
        pub fn new() -> Self {
            Self::default()
        }
    }

    #[async_trait]
    impl ApplicationStore for MemoryApplicationStore {
        async fn insert(&self, record: &ApplicationRecord) -> Result<(), AppError> {
            let mut records = self.records.lock().unwrap();
            let duplicate = records.values().any(|r| {
                r.job_info.job_id == record.job_info.job_id
                    && r.job_seeker_info.id == record.job_seeker_info.id
            });
            if duplicate {
                return Err(AppError::Duplicate(ALREADY_APPLIED.to_string()));
            }
            records.insert(record.id, record.clone());
            Ok(())
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<ApplicationRecord>, AppError> {
            Ok(self.records.lock().unwrap().get(&id).cloned())
        }

        async fn find_by_job_and_seeker(
            &self,
            job_id: Uuid,
            seeker_id: Uuid,
        ) -> Result<Option<ApplicationRecord>, AppError> {
            Ok(self
                .records
                .lock()
                .unwrap()
                .values()
                .find(|r| r.job_info.job_id == job_id && r.job_seeker_info.id == seeker_id)
                .cloned())
        }

        async fn list_for_employer(
            &self,
            employer_id: Uuid,
        ) -> Result<Vec<ApplicationRecord>, AppError> {
            Ok(self
                .records
                .lock()
                .unwrap()
                .values()
                .filter(|r| r.employer_info.id == employer_id && !r.deleted_by.employer)
                .cloned()
                .collect())
        }

        async fn list_for_job_seeker(
            &self,
            seeker_id: Uuid,
        ) -> Result<Vec<ApplicationRecord>, AppError> {
            Ok(self
                .records
                .lock()
                .unwrap()
                .values()
                .filter(|r| r.job_seeker_info.id == seeker_id && !r.deleted_by.job_seeker)
                .cloned()
                .collect())
        }

        async fn mark_deleted(&self, id: Uuid, role: Role) -> Result<Option<DeletedBy>, AppError> {
            let mut records = self.records.lock().unwrap();
            Ok(records.get_mut(&id).map(|record| {
                match role {
                    Role::JobSeeker => record.deleted_by.job_seeker = true,
                    Role::Employer => record.deleted_by.employer = true,
                }
                record.deleted_by
            }))
        }

        async fn remove(&self, id: Uuid) -> Result<(), AppError> {
            self.records.lock().unwrap().remove(&id);
            Ok(())
        }
    }
}
