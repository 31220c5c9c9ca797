use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::ResumeReference;
use crate::models::user::{UserProfile, UserRow};

/// Contact fields written on every profile update; the resume reference is
/// written only when a new file was ingested.
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub cover_letter: Option<String>,
    pub resume: Option<ResumeReference>,
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserProfile>, AppError>;

    /// Applies the update and returns the resulting profile, or `None` if the
    /// user does not exist.
    async fn update(
        &self,
        id: Uuid,
        update: ProfileUpdate,
    ) -> Result<Option<UserProfile>, AppError>;
}

pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const USER_COLUMNS: &str = "id, name, email, phone, address, role, cover_letter, \
     resume_public_id, resume_url, created_at";

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserProfile>, AppError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.and_then(UserRow::into_profile))
    }

    async fn update(
        &self,
        id: Uuid,
        update: ProfileUpdate,
    ) -> Result<Option<UserProfile>, AppError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            r#"
            UPDATE users SET
                name = $2,
                email = $3,
                phone = $4,
                address = $5,
                cover_letter = $6,
                resume_public_id = COALESCE($7, resume_public_id),
                resume_url = COALESCE($8, resume_url)
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&update.name)
        .bind(&update.email)
        .bind(&update.phone)
        .bind(&update.address)
        .bind(&update.cover_letter)
        .bind(update.resume.as_ref().map(|r| r.public_id.clone()))
        .bind(update.resume.as_ref().map(|r| r.url.clone()))
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.and_then(UserRow::into_profile))
    }
}
