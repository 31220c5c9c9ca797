use std::sync::Arc;

use crate::applications::store::ApplicationStore;
use crate::config::Config;
use crate::jobs::JobStore;
use crate::profile::store::ProfileStore;
use crate::storage::ObjectStorage;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub applications: Arc<dyn ApplicationStore>,
    pub jobs: Arc<dyn JobStore>,
    pub profiles: Arc<dyn ProfileStore>,
    pub storage: Arc<dyn ObjectStorage>,
    pub config: Config,
}
