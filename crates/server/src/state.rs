use std::sync::Arc;

use reelgate_metadata::provider::UpstreamSource;

use crate::diagnostics::{Configured, HealthProbe};

/// Shared application state passed to all handlers. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<dyn UpstreamSource>,
    pub probe: Arc<dyn HealthProbe>,
    pub configured: Configured,
}
