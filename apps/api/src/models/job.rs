use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A job posting, as far as the application flow needs it: the title snapshot
/// and the employer who owns it. Posting CRUD lives in another service.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub posted_by: Uuid,
    pub created_at: DateTime<Utc>,
}
