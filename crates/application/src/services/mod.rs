mod pattern_miner;

pub use pattern_miner::{mine_patterns, MIN_OCCURRENCES, PAIR_WINDOW_SECS, PREFETCH_RATIO};
