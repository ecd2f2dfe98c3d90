use crate::dns::upstream::{exchange, Upstream};
use async_trait::async_trait;
use dashmap::DashMap;
use hearth_dns_application::ports::HostnameResolver;
use hearth_dns_domain::{ClientLookupConfig, DomainError};
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{Name, RData, RecordType};
use rustc_hash::FxBuildHasher;
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Resolved names are reused for this long before being looked up again.
const NAME_TTL: Duration = Duration::from_secs(30 * 60);

struct CachedName {
    name: String,
    resolved_at: Instant,
}

/// Resolves a client IP to a friendly name for the query log: static
/// config map, then local hostname for loopback, then reverse DNS via the
/// lookup upstream, falling back to the bare IP string.
pub struct ClientNameResolver {
    static_clients: HashMap<IpAddr, String>,
    lookup_upstream: Arc<Upstream>,
    cache: DashMap<IpAddr, CachedName, FxBuildHasher>,
}

impl ClientNameResolver {
    pub fn new(config: &ClientLookupConfig) -> Result<Self, DomainError> {
        let mut static_clients = HashMap::new();
        for (ip, name) in &config.clients {
            match ip.parse::<IpAddr>() {
                Ok(ip) => {
                    static_clients.insert(ip, name.clone());
                }
                Err(_) => warn!(ip = %ip, "Ignoring invalid client_lookup address"),
            }
        }

        Ok(Self {
            static_clients,
            lookup_upstream: Arc::new(Upstream::new(&config.upstream)?),
            cache: DashMap::with_hasher(FxBuildHasher),
        })
    }

    fn reverse_name(ip: &IpAddr) -> String {
        match ip {
            IpAddr::V4(v4) => {
                let octets = v4.octets();
                format!(
                    "{}.{}.{}.{}.in-addr.arpa",
                    octets[3], octets[2], octets[1], octets[0]
                )
            }
            IpAddr::V6(v6) => {
                let mut nibbles = Vec::with_capacity(32);
                for byte in v6.octets().iter().rev() {
                    nibbles.push(format!("{:x}", byte & 0x0f));
                    nibbles.push(format!("{:x}", (byte >> 4) & 0x0f));
                }
                format!("{}.ip6.arpa", nibbles.join("."))
            }
        }
    }

    async fn reverse_lookup(&self, ip: IpAddr) -> Option<String> {
        let name = Name::from_utf8(format!("{}.", Self::reverse_name(&ip))).ok()?;

        let mut query = Message::new();
        query.set_id(rand::random());
        query.set_message_type(MessageType::Query);
        query.set_op_code(OpCode::Query);
        query.set_recursion_desired(true);
        query.add_query(Query::query(name, RecordType::PTR));

        let response = match exchange(&self.lookup_upstream, &query).await {
            Ok(response) => response,
            Err(e) => {
                debug!(ip = %ip, error = %e, "Reverse lookup failed");
                return None;
            }
        };

        for record in response.answers() {
            if let Some(RData::PTR(ptr)) = record.data() {
                let target = ptr.to_utf8();
                let first_label = target.trim_end_matches('.').split('.').next()?;
                if !first_label.is_empty() {
                    return Some(first_label.to_string());
                }
            }
        }

        None
    }
}

#[async_trait]
impl HostnameResolver for ClientNameResolver {
    async fn resolve(&self, ip: IpAddr) -> String {
        if let Some(cached) = self.cache.get(&ip) {
            if cached.resolved_at.elapsed() < NAME_TTL {
                return cached.name.clone();
            }
        }

        let name = if let Some(name) = self.static_clients.get(&ip) {
            name.clone()
        } else if ip.is_loopback() {
            hostname::get()
                .ok()
                .and_then(|h| h.into_string().ok())
                .unwrap_or_else(|| ip.to_string())
        } else {
            self.reverse_lookup(ip)
                .await
                .unwrap_or_else(|| ip.to_string())
        };

        self.cache.insert(
            ip,
            CachedName {
                name: name.clone(),
                resolved_at: Instant::now(),
            },
        );

        name
    }
}
