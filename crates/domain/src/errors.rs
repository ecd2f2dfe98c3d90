use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid DNS message: {0}")]
    InvalidDnsMessage(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Query timeout")]
    QueryTimeout,

    #[error("Transport timeout contacting {server}")]
    TransportTimeout { server: String },

    #[error("No upstream servers configured")]
    NoUpstreams,

    #[error("All upstream servers are unreachable")]
    AllUpstreamsUnreachable,

    #[error("List source fetch error: {0}")]
    SourceFetchError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
