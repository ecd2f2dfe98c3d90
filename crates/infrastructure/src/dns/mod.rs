pub mod block_response;
pub mod cache;
pub mod filter;
pub mod pipeline;
pub mod prefetch;
pub mod record_type;
pub mod server;
pub mod upstream;

pub use cache::{CacheKey, DnsCache};
pub use filter::{DomainTrie, PolicyIndex, RuleMatch};
pub use pipeline::{Resolution, Resolver};
pub use prefetch::PrefetchPlanner;
pub use server::UdpServer;
pub use upstream::{Upstream, UpstreamPool};
