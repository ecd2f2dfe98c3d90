mod hostname_resolver;
mod query_log_store;

pub use hostname_resolver::HostnameResolver;
pub use query_log_store::{PatternObservation, QueryLogStore};
