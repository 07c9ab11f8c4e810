use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// reachability of the upstream site, the only dependency the edge has
#[derive(Debug, Clone, Serialize)]
pub struct UpstreamHealth {
    pub status: HealthStatus,
    pub response_time_ms: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceHealthDetails {
    pub upstream: UpstreamHealth,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub timestamp: DateTime<Utc>,
    pub uptime_seconds: u64,
    pub version: String,
    pub environment: String,
    pub services: ServiceHealthDetails,
}
