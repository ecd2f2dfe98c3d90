use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryLogConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Record client addresses and hostnames. When off, records carry `-`.
    #[serde(default = "default_true")]
    pub log_clients: bool,

    /// Days query records are kept before the retention job deletes them.
    #[serde(rename = "retention", default = "default_retention_days")]
    pub retention_days: u32,
}

impl Default for QueryLogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_clients: true,
            retention_days: default_retention_days(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_retention_days() -> u32 {
    90
}
