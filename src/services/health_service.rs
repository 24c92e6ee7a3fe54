use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Respond with the current health payload, logging degraded operation.
pub fn health_status(state: &SharedState) -> HealthResponse {
    if state.hints_enabled() {
        HealthResponse::ok()
    } else {
        warn!("embedding backend not configured (degraded mode)");
        HealthResponse::degraded()
    }
}
