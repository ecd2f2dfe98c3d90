mod exchange;
mod pool;
mod server;

pub use exchange::{exchange, ExchangeResult, EXCHANGE_TIMEOUT};
pub use pool::UpstreamPool;
pub use server::{decayed_weight, Upstream};
