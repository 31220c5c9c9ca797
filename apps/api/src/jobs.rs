//! Read-only view of job postings. Posting CRUD belongs to the jobs service;
//! the application flow only needs to resolve a job id to its title and
//! owning employer.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::Job;

#[async_trait]
pub trait JobStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Job>, AppError>;
}

pub struct PgJobStore {
    pool: PgPool,
}

impl PgJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Job>, AppError> {
        let job: Option<Job> =
            sqlx::query_as("SELECT id, title, posted_by, created_at FROM jobs WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(job)
    }
}
