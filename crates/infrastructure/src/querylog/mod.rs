mod broadcast;
mod sink;

pub use broadcast::QueryBroadcaster;
pub use sink::{QueryLogSink, CHANNEL_CAPACITY};
