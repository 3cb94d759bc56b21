use portfolio_core_health_contracts::HealthStatus;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiHealthStatus {
    pub http: bool,
    /// `null` if email delivery is disabled
    pub email: Option<bool>,
}

impl From<HealthStatus> for ApiHealthStatus {
    fn from(HealthStatus { email }: HealthStatus) -> Self {
        Self { http: true, email }
    }
}
