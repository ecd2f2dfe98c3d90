use async_trait::async_trait;
use std::net::IpAddr;

/// Turns a client address into a friendly name for the query log. Always
/// answers; the IP string is the fallback of last resort.
#[async_trait]
pub trait HostnameResolver: Send + Sync {
    async fn resolve(&self, ip: IpAddr) -> String;
}
