use axum::{Extension, Json, Router, extract::Query, routing::get};
use serde::Deserialize;
use tracing::info;

use crate::server::api::catalog_controller::validate_title_url;
use crate::server::dtos::links_dto::ResolvedLinks;
use crate::server::error::AppResult;
use crate::server::services::edge_services::EdgeServices;

#[derive(Deserialize)]
struct LinksQuery {
    url: String,
}

/// link resolution surface: one title page url in, every playable stream
/// and subtitle track the pipeline could pull out of it back
pub struct LinksController;

impl LinksController {
    pub fn app() -> Router {
        Router::new().route("/", get(Self::links))
    }

    async fn links(
        Extension(services): Extension<EdgeServices>,
        Query(params): Query<LinksQuery>,
    ) -> AppResult<Json<ResolvedLinks>> {
        let url = validate_title_url(&params.url)?;

        let resolved = services.cehennemi.resolve_links(&url).await?;
        info!(
            "resolved {} streams and {} subtitles for {}",
            resolved.streams.len(),
            resolved.subtitles.len(),
            url
        );

        Ok(Json(resolved))
    }
}
