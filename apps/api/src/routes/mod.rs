pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::applications::handlers as application_handlers;
use crate::profile::handlers as profile_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Application lifecycle
        .route(
            "/api/v1/jobs/:job_id/applications",
            post(application_handlers::handle_submit),
        )
        .route(
            "/api/v1/applications/employer",
            get(application_handlers::handle_employer_list),
        )
        .route(
            "/api/v1/applications/jobseeker",
            get(application_handlers::handle_job_seeker_list),
        )
        .route(
            "/api/v1/applications/:id",
            delete(application_handlers::handle_delete),
        )
        // Profile (resume replacement lives here)
        .route(
            "/api/v1/profile",
            get(profile_handlers::handle_get_profile)
                .put(profile_handlers::handle_update_profile),
        )
        .with_state(state)
}
