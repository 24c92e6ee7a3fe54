use serde::Serialize;
use utoipa::ToSchema;

/// Simple health response returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status ("ok" or "degraded").
    pub status: String,
    /// Whether hint ranking is currently available.
    pub hints_enabled: bool,
}

impl HealthResponse {
    /// Create a health response indicating the system is fully operational.
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            hints_enabled: true,
        }
    }

    /// Create a health response indicating hint ranking is unavailable.
    pub fn degraded() -> Self {
        Self {
            status: "degraded".to_string(),
            hints_enabled: false,
        }
    }
}
