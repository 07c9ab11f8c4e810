use std::sync::Arc;

use tracing::info;

use crate::config::AppConfig;
use crate::server::services::cehennemi_services::CehennemiService;
use crate::server::services::extractor_services::NoopEmbedExtractor;
use crate::server::services::fetch_services::ChallengeBypassFetchService;
use crate::server::services::solver_services::NoopChallengeSolver;

use super::{
    cehennemi_services::DynCehennemiService, extractor_services::DynEmbedExtractor,
    fetch_services::DynFetchService, solver_services::DynChallengeSolver,
};

/// edge services with no storage dependencies - every request goes straight
/// back to the upstream site through the challenge-bypass fetch layer
#[derive(Clone)]
pub struct EdgeServices {
    pub fetch: DynFetchService,
    pub extractor: DynEmbedExtractor,
    pub cehennemi: DynCehennemiService,
    pub config: Arc<AppConfig>,
}

impl EdgeServices {
    pub fn new(config: Arc<AppConfig>) -> Self {
        info!("starting edge services (no storage)...");

        // both capabilities ship as no-ops, deployments swap in their own
        // solver/extractor stack here
        let solver = Arc::new(NoopChallengeSolver) as DynChallengeSolver;
        let extractor = Arc::new(NoopEmbedExtractor) as DynEmbedExtractor;

        let fetch = Arc::new(ChallengeBypassFetchService::new(
            solver,
            config.request_timeout_secs,
        )) as DynFetchService;

        info!("fetch layer ok, starting the provider service...");

        let cehennemi = Arc::new(CehennemiService::new(
            fetch.clone(),
            extractor.clone(),
            config.main_url.clone(),
        )) as DynCehennemiService;

        Self {
            fetch,
            extractor,
            cehennemi,
            config,
        }
    }
}
