use super::exchange::{exchange, ExchangeResult};
use super::server::Upstream;
use hearth_dns_domain::DomainError;
use hickory_proto::op::Message;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

const MAX_ATTEMPTS: u32 = 3;

/// The configured upstreams and the failure-aware routing over them.
pub struct UpstreamPool {
    upstreams: Vec<Arc<Upstream>>,
}

impl UpstreamPool {
    pub fn new(addresses: &[String]) -> Result<Self, DomainError> {
        if addresses.is_empty() {
            return Err(DomainError::NoUpstreams);
        }
        let upstreams = addresses
            .iter()
            .map(|addr| Upstream::new(addr).map(Arc::new))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { upstreams })
    }

    /// Weighted-random pick over per-call weights: a CDF walk over a
    /// uniform roll. Weights shift with time, so nothing is precomputed.
    pub fn select(&self) -> Arc<Upstream> {
        let weights: Vec<u64> = self.upstreams.iter().map(|u| u64::from(u.weight())).collect();
        let total: u64 = weights.iter().sum();

        let mut rng = rand::thread_rng();
        if total == 0 {
            // Everything just failed; pick uniformly and let backoff do its job.
            let index = rng.gen_range(0..self.upstreams.len());
            return Arc::clone(&self.upstreams[index]);
        }

        let mut roll = rng.gen_range(0..total);
        for (upstream, weight) in self.upstreams.iter().zip(weights) {
            if roll < weight {
                return Arc::clone(upstream);
            }
            roll -= weight;
        }
        Arc::clone(self.upstreams.last().expect("pool is never empty"))
    }

    /// Forward `query`, retrying with exponential backoff. Each failed
    /// attempt records the failure on the chosen upstream so the next
    /// selection avoids it.
    pub async fn forward(&self, query: &Message) -> Result<ExchangeResult, DomainError> {
        let mut last_error = DomainError::AllUpstreamsUnreachable;

        for attempt in 0..MAX_ATTEMPTS {
            let upstream = self.select();
            debug!(upstream = %upstream.address(), attempt, "Forwarding query");

            match exchange(&upstream, query).await {
                Ok(message) => {
                    return Ok(ExchangeResult {
                        message,
                        upstream: upstream.address().to_string(),
                    });
                }
                Err(e) => {
                    warn!(upstream = %upstream.address(), error = %e, attempt, "Upstream exchange failed");
                    upstream.record_failure();
                    last_error = e;
                    if attempt + 1 < MAX_ATTEMPTS {
                        tokio::time::sleep(Duration::from_secs(1 << attempt)).await;
                    }
                }
            }
        }

        Err(last_error)
    }

    pub fn upstreams(&self) -> &[Arc<Upstream>] {
        &self.upstreams
    }
}
