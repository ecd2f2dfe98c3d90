pub mod category;
pub mod config;
pub mod dns_record;
pub mod errors;
pub mod policy;
pub mod query_filters;
pub mod query_log;
pub mod rule;

pub use category::{Action, Category};
pub use config::{
    CacheConfig, ClientLookupConfig, CliOverrides, Config, ConfigError, DnsConfig, GroupConfig,
    LoggingConfig, QueryLogConfig, QueryPatternsConfig, ScheduleConfig, SchedulePeriod,
    ScheduleWindow, ServeStaleConfig, ServerConfig, SourceFormat, SourceListConfig, SourcesConfig,
    SystemConfig,
};
pub use dns_record::RecordType;
pub use errors::DomainError;
pub use query_filters::PrivateIpFilter;
pub use query_log::{CacheStats, QueryLog, QueryPattern};
pub use rule::Rule;
