use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::application::ResumeReference;

/// The two actor kinds the portal knows about. Modeled as a closed enum so an
/// unrecognized role is rejected when the identity headers are parsed, rather
/// than silently ignored deeper in the delete flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Job Seeker")]
    JobSeeker,
    #[serde(rename = "Employer")]
    Employer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::JobSeeker => write!(f, "Job Seeker"),
            Role::Employer => write!(f, "Employer"),
        }
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Job Seeker" => Ok(Role::JobSeeker),
            "Employer" => Ok(Role::Employer),
            _ => Err(()),
        }
    }
}

/// A user's profile as the auth/profile service persists it. Holds at most
/// one current resume reference; the application flow consults it but only
/// the profile-update flow replaces it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub role: Role,
    pub cover_letter: Option<String>,
    pub resume: Option<ResumeReference>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub role: String,
    pub cover_letter: Option<String>,
    pub resume_public_id: Option<String>,
    pub resume_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    /// Rows with a role outside the closed set are treated as absent; the
    /// check constraint on `users.role` makes that unreachable in practice.
    pub fn into_profile(self) -> Option<UserProfile> {
        let role = self.role.parse::<Role>().ok()?;
        let resume = match (self.resume_public_id, self.resume_url) {
            (Some(public_id), Some(url)) => Some(ResumeReference { public_id, url }),
            _ => None,
        };
        Some(UserProfile {
            id: self.id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            role,
            cover_letter: self.cover_letter,
            resume,
            created_at: self.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_display_and_from_str() {
        for role in [Role::JobSeeker, Role::Employer] {
            assert_eq!(role.to_string().parse::<Role>(), Ok(role));
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!("Admin".parse::<Role>().is_err());
        assert!("job seeker".parse::<Role>().is_err());
    }

    #[test]
    fn role_serializes_with_space() {
        assert_eq!(
            serde_json::to_string(&Role::JobSeeker).unwrap(),
            r#""Job Seeker""#
        );
    }
}
