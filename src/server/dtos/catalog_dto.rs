use serde::{Deserialize, Serialize};

/// one poster card on a listing, search or recommendation strip
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    pub title: String,
    pub url: String,
    pub poster: Option<String>,
}

/// a curated main-page section the upstream site paginates
#[derive(Debug, Clone, Serialize)]
pub struct CatalogSection {
    pub slug: &'static str,
    pub name: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleKind {
    Movie,
    Series,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub name: String,
    pub photo: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Episode {
    pub name: String,
    pub url: String,
    pub season: u32,
    pub episode: Option<u32>,
}

/// the full detail record for one title page
///
/// rating stays the raw display string from the page ("7.8"), the catalog
/// client decides how to render it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleDetail {
    pub title: String,
    pub url: String,
    pub kind: TitleKind,
    pub poster: Option<String>,
    pub year: Option<u32>,
    pub plot: Option<String>,
    pub rating: Option<String>,
    pub tags: Vec<String>,
    pub actors: Vec<Actor>,
    pub trailer: Option<String>,
    pub recommendations: Vec<CatalogItem>,
    pub episodes: Vec<Episode>,
}
