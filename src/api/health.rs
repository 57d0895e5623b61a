use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

impl ApiClient {
    /// Probes the backend. Unlike verification and news there is no offline
    /// answer here, so connectivity failures are returned as errors.
    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        let url = self.endpoint("/api/health");
        let response = self
            .http()
            .get(&url)
            .send()
            .await
            .map_err(|err| ApiError::from_reqwest(&url, err))?;
        self.read_json(&url, response).await
    }
}
