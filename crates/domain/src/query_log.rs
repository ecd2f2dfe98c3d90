use crate::dns_record::RecordType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One observed query, as emitted by the UDP handler and persisted by the
/// query log sink.
#[derive(Debug, Clone, Serialize)]
pub struct QueryLog {
    pub hostname: String,
    pub ip: String,
    pub domain: String,
    pub query_type: RecordType,
    pub cached: bool,
    pub blocked: bool,
    pub block_reason: Option<String>,
    pub upstream: Option<String>,
    pub response_code: String,
    pub response_time_ms: u64,
    pub prefetched: bool,
    pub timestamp: DateTime<Utc>,
}

/// A learned prefetch association: querying `domain` predicts the related
/// domains in `prefetch` will be queried within a few seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPattern {
    pub domain: String,
    pub occurrences: u32,
    pub prefetch: HashMap<String, Vec<RecordType>>,
}

/// Point-in-time response cache statistics.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub ratio: f64,
    pub evicted: u64,
    pub size: usize,
    pub capacity: usize,
}
