pub mod api;
pub mod dtos;
pub mod error;
pub mod services;
pub mod utils;

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use axum::http::HeaderValue;
use axum::routing::get;
use axum::{Extension, Router, ServiceExt, extract::Request};
use metrics_exporter_prometheus::PrometheusBuilder;
use once_cell::sync::Lazy;
use tower::Layer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::normalize_path::NormalizePathLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::AppConfig;
use crate::server::api::{CatalogController, LinksController, health_controller};
use crate::server::services::edge_services::EdgeServices;

static START_TIME: Lazy<Instant> = Lazy::new(Instant::now);

pub fn get_app_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub fn get_uptime_seconds() -> u64 {
    START_TIME.elapsed().as_secs()
}

pub struct EdgeApplicationServer;

impl EdgeApplicationServer {
    pub async fn serve(config: Arc<AppConfig>) -> anyhow::Result<()> {
        // pin the uptime clock to server start, not to whenever health is
        // first asked
        Lazy::force(&START_TIME);

        let port = config.port;
        let services = EdgeServices::new(config.clone());

        // prometheus endpoint, scraping it is optional
        let metrics_handle = PrometheusBuilder::new()
            .install_recorder()
            .context("could not install the prometheus recorder")?;

        let cors = match config.cors_origin.as_str() {
            "*" => CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
            origins => {
                let list: Vec<HeaderValue> = origins
                    .split(',')
                    .filter_map(|origin| origin.trim().parse().ok())
                    .collect();
                CorsLayer::new()
                    .allow_origin(AllowOrigin::list(list))
                    .allow_methods(Any)
                    .allow_headers(Any)
            }
        };

        let router = Router::new()
            .nest("/api/v1/catalog", CatalogController::app())
            .nest("/api/v1/links", LinksController::app())
            .route("/api/v1/health", get(health_controller::health_endpoint))
            .route("/metrics", get(move || async move { metrics_handle.render() }))
            .layer(TraceLayer::new_for_http())
            .layer(Extension(services))
            .layer(cors);

        // trailing slashes show up a lot when clients paste site urls around
        let app = NormalizePathLayer::trim_trailing_slash().layer(router);

        let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
            .await
            .context("could not bind the edge port")?;

        info!("edge server listening on port {}", port);

        axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
            .await
            .context("edge server crashed")?;

        Ok(())
    }
}
