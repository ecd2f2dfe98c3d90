use hearth_dns_domain::DomainError;
use std::net::SocketAddr;
use std::sync::RwLock;
use std::time::Instant;

/// One upstream resolver and the instant it last failed. Weight is derived
/// from that instant on every read, never stored.
pub struct Upstream {
    address: String,
    socket_addr: SocketAddr,
    last_failure: RwLock<Option<Instant>>,
}

impl Upstream {
    /// `address` is an IP, optionally with a port; port 53 is assumed.
    pub fn new(address: &str) -> Result<Self, DomainError> {
        let socket_addr: SocketAddr = if let Ok(addr) = address.parse() {
            addr
        } else {
            format!("{address}:53")
                .parse()
                .map_err(|_| DomainError::ConfigError(format!("invalid upstream: {address}")))?
        };

        Ok(Self {
            address: address.to_string(),
            socket_addr,
            last_failure: RwLock::new(None),
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn socket_addr(&self) -> SocketAddr {
        self.socket_addr
    }

    /// 100 with no recorded failure, 0 at the failure instant, recovering
    /// smoothly towards 100 as the failure ages.
    pub fn weight(&self) -> u32 {
        let last_failure = *self.last_failure.read().unwrap_or_else(|e| e.into_inner());
        match last_failure {
            None => 100,
            Some(at) => decayed_weight(at.elapsed().as_secs_f64() / 60.0),
        }
    }

    pub fn record_failure(&self) {
        *self
            .last_failure
            .write()
            .unwrap_or_else(|e| e.into_inner()) = Some(Instant::now());
    }
}

/// Exponential recovery curve: `round(100 · (1 − e^(−m/2)))` for `m`
/// minutes since the last failure.
pub fn decayed_weight(minutes_since_failure: f64) -> u32 {
    (100.0 * (1.0 - (-minutes_since_failure / 2.0).exp())).round() as u32
}
