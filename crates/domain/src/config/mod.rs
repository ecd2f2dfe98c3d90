mod cache;
mod client_lookup;
mod dns;
mod errors;
mod groups;
mod logging;
mod querylog;
mod root;
mod schedules;
mod server;
mod sources;
mod system;

pub use cache::{CacheConfig, QueryPatternsConfig, ServeStaleConfig};
pub use client_lookup::ClientLookupConfig;
pub use dns::DnsConfig;
pub use errors::ConfigError;
pub use groups::GroupConfig;
pub use logging::LoggingConfig;
pub use querylog::QueryLogConfig;
pub use root::{CliOverrides, Config};
pub use schedules::{ScheduleConfig, SchedulePeriod, ScheduleWindow};
pub use server::ServerConfig;
pub use sources::{SourceFormat, SourceListConfig, SourcesConfig};
pub use system::SystemConfig;
