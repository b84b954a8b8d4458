use crate::assessment::AssessmentService;
use crate::session::store::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub service: AssessmentService,
    /// Live quiz sessions, swept when idle.
    pub sessions: SessionStore,
}
