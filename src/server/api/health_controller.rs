use axum::Extension;
use axum::Json;
use axum::http::StatusCode;
use chrono::Utc;
use std::time::Instant;
use tracing::error;

use crate::server::dtos::health_dto::{
    HealthResponse, HealthStatus, ServiceHealthDetails, UpstreamHealth,
};
use crate::server::services::edge_services::EdgeServices;
use crate::server::{get_app_version, get_uptime_seconds};

/// health endpoint - the only dependency worth checking is whether the
/// upstream site answers at all
pub async fn health_endpoint(
    Extension(services): Extension<EdgeServices>,
) -> (StatusCode, Json<HealthResponse>) {
    let upstream_health = check_upstream_health(&services).await;

    let overall_status = upstream_health.status;

    let response = HealthResponse {
        status: overall_status,
        timestamp: Utc::now(),
        uptime_seconds: get_uptime_seconds(),
        version: get_app_version().to_string(),
        environment: format!("{:?}", services.config.cargo_env).to_lowercase(),
        services: ServiceHealthDetails {
            upstream: upstream_health,
        },
    };

    let http_status = match overall_status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (http_status, Json(response))
}

async fn check_upstream_health(services: &EdgeServices) -> UpstreamHealth {
    let start = Instant::now();

    match services.fetch.get(&services.config.main_url, None, false).await {
        Ok(page) => {
            let response_time_ms = start.elapsed().as_secs_f64() * 1000.0;
            // a non-success status still means the site is up, just grumpy
            let status = if (200..300).contains(&page.status) {
                HealthStatus::Healthy
            } else {
                HealthStatus::Degraded
            };
            UpstreamHealth {
                status,
                response_time_ms,
            }
        }
        Err(e) => {
            error!("upstream health check failed: {}", e);
            UpstreamHealth {
                status: HealthStatus::Unhealthy,
                response_time_ms: 0.0,
            }
        }
    }
}
