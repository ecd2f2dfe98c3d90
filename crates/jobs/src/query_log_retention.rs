use hearth_dns_application::ports::QueryLogStore;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

const DEFAULT_INTERVAL_SECS: u64 = 86_400;

/// Deletes query observations past the configured retention, once a day.
pub struct QueryLogRetentionJob {
    store: Arc<dyn QueryLogStore>,
    retention: Duration,
    interval_secs: u64,
    cancel: CancellationToken,
}

impl QueryLogRetentionJob {
    pub fn new(store: Arc<dyn QueryLogStore>, retention: Duration) -> Self {
        Self {
            store,
            retention,
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

    pub async fn start(self: Arc<Self>) {
        info!(
            retention_secs = self.retention.as_secs(),
            "Starting query log retention job"
        );

        let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
        interval.tick().await;

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    info!("Query log retention job stopped");
                    return;
                }
                _ = interval.tick() => {
                    match self.store.delete_older_than(self.retention).await {
                        Ok(deleted) => info!(deleted, "Query log retention completed"),
                        Err(e) => error!(error = %e, "Query log retention failed"),
                    }
                }
            }
        }
    }
}
