use hearth_dns_application::ports::QueryLogStore;
use hearth_dns_application::services::mine_patterns;
use hearth_dns_domain::DomainError;
use hearth_dns_infrastructure::dns::PrefetchPlanner;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

const DEFAULT_INTERVAL_SECS: u64 = 3600;

/// Periodically mines the query log for co-occurrence patterns, persists
/// them, and publishes the fresh prefetch map.
pub struct PatternLearningJob {
    store: Arc<dyn QueryLogStore>,
    planner: Arc<PrefetchPlanner>,
    look_back: Duration,
    interval_secs: u64,
    cancel: CancellationToken,
}

impl PatternLearningJob {
    pub fn new(
        store: Arc<dyn QueryLogStore>,
        planner: Arc<PrefetchPlanner>,
        look_back: Duration,
    ) -> Self {
        Self {
            store,
            planner,
            look_back,
            interval_secs: DEFAULT_INTERVAL_SECS,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub async fn execute(&self) -> Result<usize, DomainError> {
        let observations = self.store.fetch_pattern_observations(self.look_back).await?;
        let patterns = mine_patterns(&observations);
        self.store.replace_patterns(&patterns).await?;
        self.planner.publish(&patterns);
        Ok(patterns.len())
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            interval_secs = self.interval_secs,
            look_back_secs = self.look_back.as_secs(),
            "Starting pattern learning job"
        );

        let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
        interval.tick().await;

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    info!("Pattern learning job stopped");
                    return;
                }
                _ = interval.tick() => {
                    match self.execute().await {
                        Ok(count) => info!(patterns = count, "Query patterns updated"),
                        Err(e) => error!(error = %e, "Pattern learning failed"),
                    }
                }
            }
        }
    }
}
