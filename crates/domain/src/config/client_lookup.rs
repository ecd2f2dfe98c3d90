use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How client IPs are turned into friendly names for the query log.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientLookupConfig {
    /// Resolver used for reverse lookups of client addresses.
    #[serde(default = "default_lookup_upstream")]
    pub upstream: String,

    /// Static IP → name overrides, consulted before any lookup.
    #[serde(default)]
    pub clients: HashMap<String, String>,
}

impl Default for ClientLookupConfig {
    fn default() -> Self {
        Self {
            upstream: default_lookup_upstream(),
            clients: HashMap::new(),
        }
    }
}

fn default_lookup_upstream() -> String {
    "1.1.1.1".to_string()
}
