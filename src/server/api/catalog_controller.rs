use axum::{
    Extension, Json, Router,
    extract::Query,
    routing::get,
};
use serde::Deserialize;
use tracing::debug;

use crate::server::dtos::catalog_dto::{CatalogItem, CatalogSection, TitleDetail};
use crate::server::error::{AppResult, Error};
use crate::server::services::cehennemi_services::CATALOG_SECTIONS;
use crate::server::services::edge_services::EdgeServices;

#[derive(Deserialize)]
struct CatalogQuery {
    section: String,
    #[serde(default = "default_page")]
    page: u32,
}

fn default_page() -> u32 {
    1
}

#[derive(Deserialize)]
struct SearchQuery {
    q: String,
}

#[derive(Deserialize)]
struct TitleQuery {
    url: String,
}

/// catalog surface: curated sections, paginated listings, search and the
/// full detail record for one title page
pub struct CatalogController;

impl CatalogController {
    pub fn app() -> Router {
        Router::new()
            .route("/", get(Self::catalog))
            .route("/sections", get(Self::sections))
            .route("/search", get(Self::search))
            .route("/title", get(Self::title))
    }

    async fn sections() -> Json<Vec<CatalogSection>> {
        let sections = CATALOG_SECTIONS
            .iter()
            .map(|&(slug, name)| CatalogSection { slug, name })
            .collect();

        Json(sections)
    }

    async fn catalog(
        Extension(services): Extension<EdgeServices>,
        Query(params): Query<CatalogQuery>,
    ) -> AppResult<Json<Vec<CatalogItem>>> {
        if params.page == 0 {
            return Err(Error::BadRequest("pages start at 1".to_string()));
        }
        validate_section(&params.section)?;

        debug!("listing section {} page {}", params.section, params.page);

        let items = services
            .cehennemi
            .main_page(&params.section, params.page)
            .await?;

        Ok(Json(items))
    }

    async fn search(
        Extension(services): Extension<EdgeServices>,
        Query(params): Query<SearchQuery>,
    ) -> AppResult<Json<Vec<CatalogItem>>> {
        let query = params.q.trim();
        if query.is_empty() {
            return Err(Error::BadRequest("empty search query".to_string()));
        }

        let items = services.cehennemi.search(query).await?;

        Ok(Json(items))
    }

    async fn title(
        Extension(services): Extension<EdgeServices>,
        Query(params): Query<TitleQuery>,
    ) -> AppResult<Json<TitleDetail>> {
        let url = validate_title_url(&params.url)?;

        let detail = services.cehennemi.title(&url).await?;

        Ok(Json(detail))
    }
}

/// sections are a fixed curated table, anything else never goes upstream
pub fn validate_section(section: &str) -> AppResult<()> {
    if CATALOG_SECTIONS.iter().any(|&(slug, _)| slug == section) {
        Ok(())
    } else {
        Err(Error::BadRequest(format!("unknown section: {}", section)))
    }
}

/// same scheme gate the rest of the api uses for pasted urls
pub fn validate_title_url(url: &str) -> AppResult<String> {
    let url = url.trim();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(Error::BadRequest("Invalid URL format".to_string()));
    }

    Ok(url.to_string())
}
