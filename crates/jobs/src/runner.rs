use crate::{ListSyncJob, PatternLearningJob, QueryLogRetentionJob};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub trait SpawnableJob: Send + 'static {
    fn with_cancellation(self, token: CancellationToken) -> Self;
    fn start_job(self: Arc<Self>) -> tokio::task::JoinHandle<()>;
}

macro_rules! impl_spawnable_job {
    ($t:ty) => {
        impl SpawnableJob for $t {
            fn with_cancellation(self, token: CancellationToken) -> Self {
                self.with_cancellation(token)
            }

            fn start_job(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
                tokio::spawn(async move { self.start().await })
            }
        }
    };
}

impl_spawnable_job!(ListSyncJob);
impl_spawnable_job!(PatternLearningJob);
impl_spawnable_job!(QueryLogRetentionJob);

fn spawn_job<J: SpawnableJob>(job: Option<J>, shutdown: &Option<CancellationToken>) {
    if let Some(job) = job {
        let job = match shutdown {
            Some(token) => job.with_cancellation(token.clone()),
            None => job,
        };
        Arc::new(job).start_job();
    }
}

/// Starts the configured background jobs, each on its own task, all wired
/// to one shutdown token.
pub struct JobRunner {
    list_sync: Option<ListSyncJob>,
    pattern_learning: Option<PatternLearningJob>,
    query_log_retention: Option<QueryLogRetentionJob>,
    shutdown: Option<CancellationToken>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self {
            list_sync: None,
            pattern_learning: None,
            query_log_retention: None,
            shutdown: None,
        }
    }

    pub fn with_list_sync(mut self, job: ListSyncJob) -> Self {
        self.list_sync = Some(job);
        self
    }

    pub fn with_pattern_learning(mut self, job: PatternLearningJob) -> Self {
        self.pattern_learning = Some(job);
        self
    }

    pub fn with_query_log_retention(mut self, job: QueryLogRetentionJob) -> Self {
        self.query_log_retention = Some(job);
        self
    }

    pub fn with_shutdown_token(mut self, token: CancellationToken) -> Self {
        self.shutdown = Some(token);
        self
    }

    pub async fn start(self) {
        info!("Starting background job runner");

        spawn_job(self.list_sync, &self.shutdown);
        spawn_job(self.pattern_learning, &self.shutdown);
        spawn_job(self.query_log_retention, &self.shutdown);

        info!("All background jobs started");
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}
