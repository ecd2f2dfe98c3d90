use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Maximum number of cached responses.
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    #[serde(default)]
    pub serve_stale: ServeStaleConfig,

    #[serde(default)]
    pub query_patterns: QueryPatternsConfig,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            serve_stale: ServeStaleConfig::default(),
            query_patterns: QueryPatternsConfig::default(),
        }
    }
}

/// How long expired entries stay servable, and the TTL stamped on answers
/// served from a stale entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServeStaleConfig {
    /// Seconds past the authoritative TTL an entry remains servable.
    #[serde(rename = "for", default = "default_serve_stale_for")]
    pub for_secs: u64,

    /// TTL (seconds) stamped on records served from a stale entry.
    #[serde(rename = "with_ttl", default = "default_serve_stale_with_ttl")]
    pub with_ttl_secs: u64,
}

impl Default for ServeStaleConfig {
    fn default() -> Self {
        Self {
            for_secs: default_serve_stale_for(),
            with_ttl_secs: default_serve_stale_with_ttl(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryPatternsConfig {
    /// Mine the query log for co-occurring domains and prefetch them.
    #[serde(default)]
    pub follow: bool,

    /// Days of query history the learner considers. Clamped to >= 1.
    #[serde(rename = "look_back", default = "default_look_back_days")]
    pub look_back_days: u32,
}

impl Default for QueryPatternsConfig {
    fn default() -> Self {
        Self {
            follow: false,
            look_back_days: default_look_back_days(),
        }
    }
}

fn default_capacity() -> usize {
    100_000
}

fn default_serve_stale_for() -> u64 {
    300
}

fn default_serve_stale_with_ttl() -> u64 {
    15
}

fn default_look_back_days() -> u32 {
    14
}
