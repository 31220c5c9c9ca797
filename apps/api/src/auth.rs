//! Identity contract with the upstream auth gateway.
//!
//! Session issuance and password handling live elsewhere; by the time a
//! request reaches this service the gateway has attached `x-user-id` and
//! `x-user-role` headers. The extractor resolves the full profile row so
//! handlers get the actor's contact fields and stored resume reference.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::{Role, UserProfile};
use crate::state::AppState;

const USER_ID_HEADER: &str = "x-user-id";
const USER_ROLE_HEADER: &str = "x-user-role";

/// The authenticated actor's profile, as the gateway and profile store agree
/// on it. A role header that does not match the stored role is rejected.
#[derive(Debug, Clone)]
pub struct AuthUser(pub UserProfile);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let id = header_value(parts, USER_ID_HEADER)
            .and_then(|v| Uuid::parse_str(v).ok())
            .ok_or(AppError::Unauthorized)?;
        let role = header_value(parts, USER_ROLE_HEADER)
            .and_then(|v| v.parse::<Role>().ok())
            .ok_or(AppError::Unauthorized)?;

        let profile = state
            .profiles
            .find_by_id(id)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if profile.role != role {
            return Err(AppError::Unauthorized);
        }

        Ok(AuthUser(profile))
    }
}

fn header_value<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts.headers.get(name).and_then(|v| v.to_str().ok())
}
