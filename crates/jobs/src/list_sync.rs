use hearth_dns_infrastructure::sources::SourceSyncer;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Periodically refetches list sources and republishes the policy index.
pub struct ListSyncJob {
    syncer: Arc<SourceSyncer>,
    interval_secs: u64,
    cancel: CancellationToken,
}

impl ListSyncJob {
    pub fn new(syncer: Arc<SourceSyncer>, interval_secs: u64) -> Self {
        Self {
            syncer,
            interval_secs,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(interval_secs = self.interval_secs, "Starting list sync job");

        let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
        // The boot sequence already ran the initial sync.
        interval.tick().await;

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    info!("List sync job stopped");
                    return;
                }
                _ = interval.tick() => {
                    if let Err(e) = self.syncer.sync().await {
                        error!(error = %e, "List sync failed");
                    }
                }
            }
        }
    }
}
