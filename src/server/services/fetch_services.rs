use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use reqwest::header;
use tracing::{error, info};

use crate::server::error::{AppResult, Error};
use crate::server::services::solver_services::DynChallengeSolver;

pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:137.0) Gecko/20100101 Firefox/137.0";

/// marker string the anti-bot interstitial always carries
const CHALLENGE_MARKER: &str = "Just a moment";

/// what a fetch hands back, body already read
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
    pub final_url: String,
}

pub type DynFetchService = Arc<dyn FetchServiceTrait + Send + Sync>;

#[automock]
#[async_trait]
pub trait FetchServiceTrait {
    /// GET towards the upstream. xhr toggles the fetch marker header the
    /// site requires on its json fragment endpoints
    async fn get<'a>(
        &self,
        url: &str,
        referer: Option<&'a str>,
        xhr: bool,
    ) -> AppResult<FetchedPage>;
}

pub fn is_challenge_page(body: &str) -> bool {
    body.contains(CHALLENGE_MARKER)
}

/// fetch layer that transparently swaps an interstitial response for the
/// solver's response. The caller never sees the challenge, only the clean
/// page or the solver's failure
pub struct ChallengeBypassFetchService {
    http_client: reqwest::Client,
    solver: DynChallengeSolver,
}

impl ChallengeBypassFetchService {
    pub fn new(solver: DynChallengeSolver, timeout_secs: u64) -> Self {
        // i like to make it look like a real browser but it's really not needed
        let http_client = reqwest::Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            http_client,
            solver,
        }
    }
}

#[async_trait]
impl FetchServiceTrait for ChallengeBypassFetchService {
    async fn get<'a>(
        &self,
        url: &str,
        referer: Option<&'a str>,
        xhr: bool,
    ) -> AppResult<FetchedPage> {
        let mut request_builder = self
            .http_client
            .get(url)
            .header(header::ACCEPT, "*/*")
            .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.9");

        if let Some(referer) = referer {
            request_builder = request_builder.header(header::REFERER, referer);
        }

        if xhr {
            request_builder = request_builder.header("X-Requested-With", "fetch");
        }

        let response = request_builder.send().await.map_err(|e| {
            error!("request to {} failed: {}", url, e);
            Error::Upstream(format!("request failed: {}", e))
        })?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();

        let body = response.text().await.map_err(|e| {
            error!("failed to read body from {}: {}", url, e);
            Error::Upstream(format!("failed to read response body: {}", e))
        })?;

        if is_challenge_page(&body) {
            info!("interstitial detected on {}, handing off to the solver", url);
            // whatever the solver returns replaces this response one to one,
            // its failure propagates as the fetch failure
            return self.solver.solve(url, referer, xhr).await;
        }

        Ok(FetchedPage {
            status,
            body,
            final_url,
        })
    }
}
