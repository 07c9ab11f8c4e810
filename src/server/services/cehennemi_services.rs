// everything that understands the upstream site's markup lives here: the
// catalog/search/detail scraping and the link resolution pipeline
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use mockall::automock;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use serde::Deserialize;
use tracing::{debug, error, info, warn};

use crate::server::dtos::catalog_dto::{Actor, CatalogItem, Episode, TitleDetail, TitleKind};
use crate::server::dtos::links_dto::{ResolvedLinks, StreamLink, StreamQuality, SubtitleTrack};
use crate::server::error::{AppResult, Error};
use crate::server::services::extractor_services::DynEmbedExtractor;
use crate::server::services::fetch_services::{DynFetchService, FetchedPage};
use crate::server::utils::decode_utils::decode_packed_url;
use crate::server::utils::scrape_utils::{fix_url, host_of};

pub const SITE_NAME: &str = "HDFilmCehennemi";

/// promotional junk the site appends to some source labels
const PROMO_TAG: &str = "(HDrip Xbet)";

/// the rapidrame iframe is a redirector, not a player - the real player sits
/// on the site's own path keyed by the id in the query string
const VENDOR_REDIRECT_MARKER: &str = "rapidrame";
const VENDOR_REDIRECT_QUERY: &str = "?rapidrame_id=";
const LOCAL_PLAYER_PATH: &str = "/rplayer/";

const PLAYLIST_MARKER: &str = ".m3u8";

/// embed hosts the generic extractor capability understands. Entries are
/// disjoint so the match order carries no meaning
const KNOWN_EMBED_HOSTS: &[&str] = &["vidmoly", "mixdrop", "closeload", "sibnet", "okru"];

/// the catalog endpoint answers out-of-range pages with an error document
/// instead of an http status
const PAGE_NOT_FOUND_MARKER: &str = "Sayfa Bulunamadı";

/// curated sections the upstream paginates under /load/page/<n>/<slug>/
pub const CATALOG_SECTIONS: &[(&str, &str)] = &[
    ("home", "Yeni Eklenen Filmler"),
    ("categories/nette-ilk-filmler", "Nette İlk Filmler"),
    ("home-series", "Yeni Eklenen Diziler"),
    ("categories/tavsiye-filmler-izle2", "Tavsiye Filmler"),
    ("imdb7", "IMDB 7+ Filmler"),
    ("mostCommented", "En Çok Yorumlananlar"),
    ("mostLiked", "En Çok Beğenilenler"),
    ("genres/aile-filmleri-izleyin-6", "Aile Filmleri"),
    ("genres/aksiyon-filmleri-izleyin-5", "Aksiyon Filmleri"),
    ("genres/animasyon-filmlerini-izleyin-5", "Animasyon Filmleri"),
    ("genres/belgesel-filmlerini-izle-1", "Belgesel Filmleri"),
    ("genres/bilim-kurgu-filmlerini-izleyin-3", "Bilim Kurgu Filmleri"),
    ("genres/komedi-filmlerini-izleyin-1", "Komedi Filmleri"),
    ("genres/korku-filmlerini-izle-4", "Korku Filmleri"),
    ("genres/romantik-filmleri-izle-2", "Romantik Filmleri"),
];

static PACKED_CALL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"dc_hello\("([^"]+)"\)"#).expect("static regex should parse"));
static EPISODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\. ?Bölüm").expect("static regex should parse"));
static SEASON_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\. ?Sezon").expect("static regex should parse"));

/// one alternative-source control found on a title page, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTuple {
    pub label: String,
    pub lang: String,
    pub video_id: String,
}

/// where an embed target should be dispatched after classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbedHost {
    /// a third-party provider, goes to the extractor capability
    Known(String),
    /// anything else is assumed to be the site's own packed player
    Local(String),
}

// the catalog endpoints answer with json-wrapped html fragments
#[derive(Debug, Clone, Deserialize)]
struct PageFragment {
    html: String,
}

#[derive(Debug, Clone, Deserialize)]
struct SearchResults {
    #[serde(default)]
    results: Vec<String>,
}

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector should parse")
}

/// every language tab grouping, then every alternative-link control inside
/// it. Controls without a video id are dead and skipped silently
pub fn list_sources(page_html: &str) -> Vec<SourceTuple> {
    let document = Html::parse_document(page_html);
    let group_selector = selector("div.alternative-links");
    let button_selector = selector("button.alternative-link");

    let mut tuples = Vec::new();
    for group in document.select(&group_selector) {
        let lang = group
            .value()
            .attr("data-lang")
            .unwrap_or("")
            .trim()
            .to_uppercase();

        for button in group.select(&button_selector) {
            let video_id = button
                .value()
                .attr("data-video")
                .unwrap_or("")
                .trim()
                .to_string();
            if video_id.is_empty() {
                continue;
            }

            let label = button
                .text()
                .collect::<String>()
                .replace(PROMO_TAG, "")
                .trim()
                .to_string();

            tuples.push(SourceTuple {
                label,
                lang: lang.clone(),
                video_id,
            });
        }
    }

    tuples
}

/// subtitle tracks straight off the title page markup, document order,
/// entries with an unresolvable src are dropped
pub fn list_subtitles(page_html: &str, base_url: &str) -> Vec<SubtitleTrack> {
    let document = Html::parse_document(page_html);
    let track_selector = selector("track[srclang]");

    document
        .select(&track_selector)
        .filter_map(|track| {
            let src = track.value().attr("src")?;
            let url = fix_url(base_url, src)?;
            let lang = track
                .value()
                .attr("srclang")
                .unwrap_or("")
                .trim()
                .to_uppercase();
            Some(SubtitleTrack { url, lang })
        })
        .collect()
}

/// the per-id endpoint answers with markup whose first iframe carries the
/// embed target in data-src. The eager src attribute is a placeholder and
/// must not be read
pub fn find_embed_target(video_html: &str) -> Option<String> {
    let document = Html::parse_document(video_html);
    let iframe_selector = selector("iframe");

    document
        .select(&iframe_selector)
        .next()
        .and_then(|iframe| iframe.value().attr("data-src"))
        .map(|target| target.trim().to_string())
        .filter(|target| !target.is_empty())
}

/// rewrite the vendor redirector onto the site's own player path, then check
/// the host against the allow-list of extractor-capable providers
pub fn classify_embed(target: &str, main_url: &str) -> EmbedHost {
    let target = if host_of(target).is_some_and(|host| host.contains(VENDOR_REDIRECT_MARKER)) {
        match target.split_once(VENDOR_REDIRECT_QUERY) {
            Some((_, id)) => format!(
                "{}{}{}",
                main_url.trim_end_matches('/'),
                LOCAL_PLAYER_PATH,
                id
            ),
            None => target.to_string(),
        }
    } else {
        target.to_string()
    };

    let host = host_of(&target).unwrap_or_default();
    if KNOWN_EMBED_HOSTS.iter().any(|known| host.contains(known)) {
        EmbedHost::Known(target)
    } else {
        EmbedHost::Local(target)
    }
}

/// scan inline script bodies for the packed player call and hand back its
/// quoted argument
pub fn find_packed_payload(player_html: &str) -> Option<String> {
    let document = Html::parse_document(player_html);
    let script_selector = selector("script");

    for script in document.select(&script_selector) {
        let body = script.text().collect::<String>();
        if let Some(caps) = PACKED_CALL_RE.captures(&body) {
            return Some(caps[1].to_string());
        }
    }

    None
}

/// main page fragments are json carrying a html blob of anchor cards
pub fn parse_catalog_fragment(body: &str, base_url: &str) -> AppResult<Vec<CatalogItem>> {
    if body.contains(PAGE_NOT_FOUND_MARKER) {
        // paged past the end, empty is the answer
        return Ok(Vec::new());
    }

    let fragment: PageFragment = serde_json::from_str(body).map_err(|e| {
        error!("failed to parse catalog fragment: {}", e);
        Error::Upstream(format!("failed to parse catalog fragment: {}", e))
    })?;

    let document = Html::parse_fragment(&fragment.html);
    let anchor_selector = selector("a");
    let img_selector = selector("img");

    let mut items = Vec::new();
    for anchor in document.select(&anchor_selector) {
        let Some(url) = anchor
            .value()
            .attr("href")
            .and_then(|href| fix_url(base_url, href))
        else {
            continue;
        };

        let title = anchor.value().attr("title").unwrap_or("").trim().to_string();
        let poster = anchor
            .select(&img_selector)
            .next()
            .and_then(|img| img.value().attr("data-src"))
            .and_then(|src| fix_url(base_url, src));

        items.push(CatalogItem { title, url, poster });
    }

    Ok(items)
}

/// search answers with a list of standalone html card fragments
pub fn parse_search_results(body: &str, base_url: &str) -> AppResult<Vec<CatalogItem>> {
    let response: SearchResults = serde_json::from_str(body).map_err(|e| {
        error!("failed to parse search response: {}", e);
        Error::Upstream(format!("failed to parse search response: {}", e))
    })?;

    let title_selector = selector("h4.title");
    let anchor_selector = selector("a");
    let img_selector = selector("img");

    let items = response
        .results
        .iter()
        .filter_map(|card| {
            let document = Html::parse_fragment(card);

            let title = document
                .select(&title_selector)
                .next()?
                .text()
                .collect::<String>()
                .trim()
                .to_string();
            let url = document
                .select(&anchor_selector)
                .next()?
                .value()
                .attr("href")
                .and_then(|href| fix_url(base_url, href))?;
            let poster = document
                .select(&img_selector)
                .next()
                .and_then(|img| img.value().attr("src").or_else(|| img.value().attr("data-src")))
                .and_then(|src| fix_url(base_url, src));

            Some(CatalogItem { title, url, poster })
        })
        .collect();

    Ok(items)
}

/// full detail scrape of one title page. The field extraction is defensive
/// throughout, the site's markup shifts often and a missing field is never
/// worth failing the whole record over - only a missing heading is, that
/// means we weren't served a title page at all
pub fn parse_title_detail(page_html: &str, url: &str, base_url: &str) -> AppResult<TitleDetail> {
    let document = Html::parse_document(page_html);

    let title = document
        .select(&selector("h1.section-title"))
        .next()
        .map(|h1| h1.text().collect::<String>())
        .map(|text| {
            text.split(" izle")
                .next()
                .unwrap_or(&text)
                .trim()
                .to_string()
        })
        .filter(|title| !title.is_empty())
        .ok_or_else(|| Error::NotFound("no title heading on page".to_string()))?;

    let poster = document
        .select(&selector("aside.post-info-poster img.lazyload"))
        .last()
        .and_then(|img| img.value().attr("data-src"))
        .and_then(|src| fix_url(base_url, src));

    let tags = document
        .select(&selector("div.post-info-genres a"))
        .map(|a| a.text().collect::<String>().trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect();

    let year = document
        .select(&selector("div.post-info-year-country a"))
        .next()
        .map(|a| a.text().collect::<String>())
        .and_then(|text| text.trim().parse::<u32>().ok());

    let kind = if document.select(&selector("div.seasons")).next().is_some() {
        TitleKind::Series
    } else {
        TitleKind::Movie
    };

    let plot = document
        .select(&selector("article.post-info-content > p"))
        .next()
        .map(|p| p.text().collect::<String>().trim().to_string())
        .filter(|plot| !plot.is_empty());

    let rating = document
        .select(&selector("div.post-info-imdb-rating span"))
        .next()
        .map(|span| span.text().collect::<String>())
        .map(|text| text.split('(').next().unwrap_or(&text).trim().to_string())
        .filter(|rating| !rating.is_empty());

    let actors = document
        .select(&selector("div.post-info-cast a"))
        .filter_map(|a| {
            let name = a
                .select(&selector("strong"))
                .next()?
                .text()
                .collect::<String>()
                .trim()
                .to_string();
            let photo = a
                .select(&selector("img"))
                .next()
                .and_then(|img| img.value().attr("data-src"))
                .and_then(|src| fix_url(base_url, src));
            Some(Actor { name, photo })
        })
        .collect();

    let trailer = document
        .select(&selector("div.post-info-trailer button"))
        .next()
        .and_then(|button| button.value().attr("data-modal"))
        .and_then(|modal| modal.split_once("trailer/").map(|(_, id)| id.to_string()))
        .filter(|id| !id.is_empty())
        .map(|id| format!("https://www.youtube.com/watch?v={}", id));

    let recommendations = document
        .select(&selector("div.section-slider-container div.slider-slide"))
        .filter_map(|slide| {
            let anchor = slide.select(&selector("a")).next()?;
            let title = anchor.value().attr("title")?.trim().to_string();
            let url = anchor
                .value()
                .attr("href")
                .and_then(|href| fix_url(base_url, href))?;
            let poster = slide
                .select(&selector("img"))
                .next()
                .and_then(|img| {
                    img.value()
                        .attr("data-src")
                        .or_else(|| img.value().attr("src"))
                })
                .and_then(|src| fix_url(base_url, src));
            Some(CatalogItem { title, url, poster })
        })
        .collect();

    let episodes = if kind == TitleKind::Series {
        document
            .select(&selector("div.seasons-tab-content a"))
            .filter_map(|a| {
                let name = a
                    .select(&selector("h4"))
                    .next()?
                    .text()
                    .collect::<String>()
                    .trim()
                    .to_string();
                let url = a
                    .value()
                    .attr("href")
                    .and_then(|href| fix_url(base_url, href))?;
                let episode = EPISODE_RE
                    .captures(&name)
                    .and_then(|caps| caps[1].parse::<u32>().ok());
                let season = SEASON_RE
                    .captures(&name)
                    .and_then(|caps| caps[1].parse::<u32>().ok())
                    .unwrap_or(1);
                Some(Episode {
                    name,
                    url,
                    season,
                    episode,
                })
            })
            .collect()
    } else {
        Vec::new()
    };

    Ok(TitleDetail {
        title,
        url: url.to_string(),
        kind,
        poster,
        year,
        plot,
        rating,
        tags,
        actors,
        trailer,
        recommendations,
        episodes,
    })
}

fn ensure_success(page: &FetchedPage, what: &str) -> AppResult<()> {
    if (200..300).contains(&page.status) {
        Ok(())
    } else {
        Err(Error::Upstream(format!(
            "{} returned status {}",
            what, page.status
        )))
    }
}

pub type DynCehennemiService = Arc<dyn CehennemiServiceTrait + Send + Sync>;

#[automock]
#[async_trait]
pub trait CehennemiServiceTrait {
    async fn main_page(&self, section: &str, page: u32) -> AppResult<Vec<CatalogItem>>;
    async fn search(&self, query: &str) -> AppResult<Vec<CatalogItem>>;
    async fn title(&self, url: &str) -> AppResult<TitleDetail>;
    async fn resolve_links(&self, url: &str) -> AppResult<ResolvedLinks>;
}

pub struct CehennemiService {
    fetch: DynFetchService,
    extractor: DynEmbedExtractor,
    main_url: String,
}

impl CehennemiService {
    pub fn new(fetch: DynFetchService, extractor: DynEmbedExtractor, main_url: String) -> Self {
        Self {
            fetch,
            extractor,
            main_url: main_url.trim_end_matches('/').to_string(),
        }
    }

    /// one source tuple end to end: per-id endpoint, iframe target, host
    /// classification, dispatch. Every failure in here is scoped to this
    /// tuple, the orchestrator decides what to do with it
    async fn resolve_source(&self, tuple: &SourceTuple, title_url: &str) -> AppResult<ResolvedLinks> {
        let video_url = format!("{}/video/{}/", self.main_url, tuple.video_id);
        let page = self.fetch.get(&video_url, Some(title_url), true).await?;
        ensure_success(&page, "video endpoint")?;

        let embed_target = find_embed_target(&page.body).ok_or(Error::NoEmbedFound)?;
        let embed_target =
            fix_url(&self.main_url, &embed_target).ok_or(Error::NoEmbedFound)?;

        match classify_embed(&embed_target, &self.main_url) {
            EmbedHost::Known(embed_url) => {
                debug!(
                    "dispatching '{}' to the embed extractor: {}",
                    tuple.label, embed_url
                );
                self.extractor.extract(&embed_url, title_url).await
            }
            EmbedHost::Local(player_url) => {
                let player = self.fetch.get(&player_url, Some(&self.main_url), false).await?;
                ensure_success(&player, "player page")?;

                // some sources legitimately carry nothing playable, the
                // orchestrator swallows this at the source boundary
                let payload =
                    find_packed_payload(&player.body).ok_or(Error::NoDecodableLink)?;

                let playback_url = decode_packed_url(&payload)?;
                let source = if tuple.label.is_empty() {
                    SITE_NAME.to_string()
                } else {
                    format!("{} {}", SITE_NAME, tuple.label)
                };

                Ok(ResolvedLinks {
                    streams: vec![StreamLink {
                        source,
                        is_playlist: playback_url.contains(PLAYLIST_MARKER),
                        url: playback_url,
                        referer: format!("{}/", self.main_url),
                        quality: StreamQuality::Unknown,
                        headers: HashMap::new(),
                    }],
                    subtitles: Vec::new(),
                })
            }
        }
    }
}

#[async_trait]
impl CehennemiServiceTrait for CehennemiService {
    async fn main_page(&self, section: &str, page: u32) -> AppResult<Vec<CatalogItem>> {
        let url = format!(
            "{}/load/page/{}/{}/",
            self.main_url,
            page,
            section.trim_matches('/')
        );

        let response = self.fetch.get(&url, Some(&self.main_url), true).await?;
        ensure_success(&response, "catalog endpoint")?;

        parse_catalog_fragment(&response.body, &self.main_url)
    }

    async fn search(&self, query: &str) -> AppResult<Vec<CatalogItem>> {
        let url = format!("{}/search?q={}", self.main_url, urlencoding::encode(query));

        let response = self.fetch.get(&url, Some(&self.main_url), true).await?;
        ensure_success(&response, "search endpoint")?;

        parse_search_results(&response.body, &self.main_url)
    }

    async fn title(&self, url: &str) -> AppResult<TitleDetail> {
        let page = self.fetch.get(url, None, false).await?;
        if page.status == 404 {
            return Err(Error::NotFound(format!("title page not found: {}", url)));
        }
        ensure_success(&page, "title page")?;

        parse_title_detail(&page.body, url, &self.main_url)
    }

    async fn resolve_links(&self, url: &str) -> AppResult<ResolvedLinks> {
        info!("resolving links for {}", url);

        // the only fatal fetch of the whole pipeline
        let page = self.fetch.get(url, None, false).await?;
        ensure_success(&page, "title page")?;

        let subtitles = list_subtitles(&page.body, &self.main_url);
        let tuples = list_sources(&page.body);
        info!(
            "found {} alternative sources and {} subtitle tracks",
            tuples.len(),
            subtitles.len()
        );

        // fan out per source, join_all hands results back in input order so
        // the listing order survives aggregation
        let resolutions = join_all(
            tuples
                .iter()
                .map(|tuple| self.resolve_source(tuple, url)),
        )
        .await;

        let mut resolved = ResolvedLinks {
            streams: Vec::new(),
            subtitles,
        };

        for (tuple, result) in tuples.iter().zip(resolutions) {
            match result {
                Ok(media) => {
                    resolved.streams.extend(media.streams);
                    resolved.subtitles.extend(media.subtitles);
                }
                Err(e) => {
                    // one dead source never takes down its siblings
                    warn!("source '{}' ({}) failed: {}", tuple.label, tuple.video_id, e);
                    metrics::counter!("cehennemi_source_failures_total").increment(1);
                }
            }
        }

        metrics::counter!("cehennemi_links_resolved_total")
            .increment(resolved.streams.len() as u64);

        Ok(resolved)
    }
}
