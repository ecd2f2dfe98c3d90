use async_trait::async_trait;
use hearth_dns_application::ports::{PatternObservation, QueryLogStore};
use hearth_dns_domain::{DomainError, QueryLog, QueryPattern};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// In-memory stand-in for the SQLite store.
#[derive(Default)]
pub struct MockQueryLogStore {
    pub observations: Mutex<Vec<PatternObservation>>,
    pub patterns: Mutex<Vec<QueryPattern>>,
    pub inserted: Mutex<Vec<QueryLog>>,
    pub delete_calls: AtomicUsize,
    pub fail_deletes: bool,
}

impl MockQueryLogStore {
    pub fn with_observations(observations: Vec<PatternObservation>) -> Self {
        Self {
            observations: Mutex::new(observations),
            ..Self::default()
        }
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QueryLogStore for MockQueryLogStore {
    async fn insert_batch(&self, records: &[QueryLog]) -> Result<(), DomainError> {
        self.inserted.lock().unwrap().extend_from_slice(records);
        Ok(())
    }

    async fn fetch_pattern_observations(
        &self,
        _look_back: Duration,
    ) -> Result<Vec<PatternObservation>, DomainError> {
        Ok(self.observations.lock().unwrap().clone())
    }

    async fn replace_patterns(&self, patterns: &[QueryPattern]) -> Result<(), DomainError> {
        *self.patterns.lock().unwrap() = patterns.to_vec();
        Ok(())
    }

    async fn load_patterns(&self) -> Result<Vec<QueryPattern>, DomainError> {
        Ok(self.patterns.lock().unwrap().clone())
    }

    async fn delete_older_than(&self, _retention: Duration) -> Result<u64, DomainError> {
        if self.fail_deletes {
            return Err(DomainError::DatabaseError("mock failure".to_string()));
        }
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        Ok(3)
    }
}
