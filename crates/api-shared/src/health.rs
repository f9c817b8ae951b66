use crate::models::Health;

/// Liveness check shared by every front end.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    pub fn new() -> Self {
        Self
    }

    /// The service is healthy whenever it can answer.
    pub fn check_health() -> Health {
        Health {
            status: "ok".into(),
        }
    }
}
