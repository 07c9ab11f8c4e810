use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::server::dtos::links_dto::ResolvedLinks;
use crate::server::error::AppResult;

pub type DynEmbedExtractor = Arc<dyn EmbedExtractorTrait + Send + Sync>;

/// external capability: given an embed url on one of the well known
/// third-party hosts, produce zero or more playable links and subtitle
/// tracks. A failure here is scoped to the one source that dispatched it
#[automock]
#[async_trait]
pub trait EmbedExtractorTrait {
    async fn extract(&self, url: &str, referer: &str) -> AppResult<ResolvedLinks>;
}

/// default when no extractor stack is wired in, known hosts just yield
/// nothing instead of erroring
pub struct NoopEmbedExtractor;

#[async_trait]
impl EmbedExtractorTrait for NoopEmbedExtractor {
    async fn extract(&self, url: &str, _referer: &str) -> AppResult<ResolvedLinks> {
        info!("no embed extractor registered, skipping known host {}", url);
        Ok(ResolvedLinks::default())
    }
}
