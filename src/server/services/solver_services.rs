use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::server::error::{AppResult, Error};
use crate::server::services::fetch_services::FetchedPage;

pub type DynChallengeSolver = Arc<dyn ChallengeSolverTrait + Send + Sync>;

/// external capability: given a request that came back as an anti-bot
/// interstitial, produce the equivalent unblocked response. Solving the
/// challenge itself is out of scope here, deployments plug in whatever
/// headless/relay setup they run. The full request shape is handed over,
/// xhr included, so the solver can replay it exactly - the fragment
/// endpoints answer with html instead of json without the fetch marker
#[async_trait]
pub trait ChallengeSolverTrait {
    async fn solve(&self, url: &str, referer: Option<&str>, xhr: bool) -> AppResult<FetchedPage>;
}

/// default when nothing is plugged in - sources behind the interstitial
/// degrade per source instead of crashing the wiring
pub struct NoopChallengeSolver;

#[async_trait]
impl ChallengeSolverTrait for NoopChallengeSolver {
    async fn solve(&self, url: &str, _referer: Option<&str>, _xhr: bool) -> AppResult<FetchedPage> {
        warn!("no challenge solver configured, giving up on {}", url);
        Err(Error::ChallengeBypass(
            "no challenge solver configured".to_string(),
        ))
    }
}
