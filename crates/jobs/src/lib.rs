pub mod list_sync;
pub mod pattern_learning;
pub mod query_log_retention;
pub mod runner;

pub use list_sync::ListSyncJob;
pub use pattern_learning::PatternLearningJob;
pub use query_log_retention::QueryLogRetentionJob;
pub use runner::JobRunner;
