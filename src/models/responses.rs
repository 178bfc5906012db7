use serde::{Deserialize, Serialize};

/// Health state of the service or of the upstream API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Healthy,
    Unhealthy,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthState,
    pub timestamp: String,
    pub service: String,
    pub version: String,
    pub external_api: ExternalApiStatus,
}

/// Reachability of the Ergast API as seen by the last probe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalApiStatus {
    pub ergast_f1_api: HealthState,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

/// Root endpoint response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
    pub docs: String,
    pub health: String,
}

/// One row of the route table served at `/docs`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteDoc {
    pub path: String,
    pub upstream: Option<String>,
    pub parameters: Vec<String>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}
