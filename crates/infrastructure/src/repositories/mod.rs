mod query_log_store;

pub use query_log_store::SqliteQueryLogStore;
