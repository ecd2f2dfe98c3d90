use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hearth_dns_domain::{DomainError, QueryLog, QueryPattern, RecordType};
use std::time::Duration;

/// One row the pattern learner considers: a successful, non-blocked query
/// of a known record type.
#[derive(Debug, Clone)]
pub struct PatternObservation {
    pub hostname: String,
    pub domain: String,
    pub query_type: RecordType,
    pub timestamp: DateTime<Utc>,
}

/// Persistence for query observations and the patterns mined from them.
#[async_trait]
pub trait QueryLogStore: Send + Sync {
    /// Commit a batch of observations in a single transaction. On error the
    /// whole batch is rolled back and the caller keeps it for a retry.
    async fn insert_batch(&self, records: &[QueryLog]) -> Result<(), DomainError>;

    /// Successful, non-blocked, known-type queries within the look-back
    /// window, ordered by timestamp ascending.
    async fn fetch_pattern_observations(
        &self,
        look_back: Duration,
    ) -> Result<Vec<PatternObservation>, DomainError>;

    /// Atomically replace the persisted pattern set.
    async fn replace_patterns(&self, patterns: &[QueryPattern]) -> Result<(), DomainError>;

    async fn load_patterns(&self) -> Result<Vec<QueryPattern>, DomainError>;

    /// Delete observations older than `retention`. Returns the number of
    /// rows removed.
    async fn delete_older_than(&self, retention: Duration) -> Result<u64, DomainError>;
}
