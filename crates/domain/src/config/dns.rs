use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    /// Upstream resolvers queries are forwarded to. Plain hosts; port 53 is
    /// assumed.
    #[serde(default = "default_upstreams")]
    pub upstreams: Vec<String>,
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            upstreams: default_upstreams(),
        }
    }
}

fn default_upstreams() -> Vec<String> {
    vec!["1.1.1.1".to_string(), "8.8.8.8".to_string()]
}
