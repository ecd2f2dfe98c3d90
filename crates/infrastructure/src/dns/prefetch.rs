use arc_swap::ArcSwap;
use compact_str::{format_compact, CompactString};
use dashmap::DashSet;
use hearth_dns_domain::{QueryPattern, RecordType};
use rustc_hash::FxBuildHasher;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

type PatternMap = HashMap<CompactString, Vec<(CompactString, RecordType)>, FxBuildHasher>;

/// The published prefetch map plus the sentinel set that caps concurrent
/// prefetches at one per `(domain, qtype)`.
///
/// The learner replaces the map wholesale via atomic swap; readers see
/// either the old or the new map in full.
pub struct PrefetchPlanner {
    patterns: ArcSwap<PatternMap>,
    in_flight: DashSet<CompactString, FxBuildHasher>,
    enabled: bool,
}

impl PrefetchPlanner {
    pub fn new(enabled: bool) -> Self {
        Self {
            patterns: ArcSwap::from_pointee(PatternMap::default()),
            in_flight: DashSet::with_hasher(FxBuildHasher),
            enabled,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn publish(&self, patterns: &[QueryPattern]) {
        let mut map = PatternMap::default();
        for pattern in patterns {
            let related: Vec<(CompactString, RecordType)> = pattern
                .prefetch
                .iter()
                .flat_map(|(domain, record_types)| {
                    record_types
                        .iter()
                        .map(|&rt| (CompactString::from(domain.as_str()), rt))
                })
                .collect();
            if !related.is_empty() {
                map.insert(CompactString::from(pattern.domain.as_str()), related);
            }
        }

        info!(domains = map.len(), "Publishing prefetch patterns");
        self.patterns.store(Arc::new(map));
    }

    /// The `(domain, qtype)` pairs worth resolving after a query for
    /// `domain`. Empty when learning is disabled or nothing was mined.
    pub fn related(&self, domain: &str) -> Vec<(CompactString, RecordType)> {
        if !self.enabled {
            return Vec::new();
        }
        self.patterns
            .load()
            .get(domain)
            .cloned()
            .unwrap_or_default()
    }

    /// Claim the sentinel for `(domain, qtype)`. `None` means a prefetch is
    /// already in flight and this one should be dropped.
    pub fn try_begin(
        self: &Arc<Self>,
        domain: &str,
        record_type: RecordType,
    ) -> Option<PrefetchGuard> {
        let key = format_compact!("{domain}-{}", record_type.as_str());
        if !self.in_flight.insert(key.clone()) {
            debug!(domain = %domain, record_type = %record_type, "Prefetch already in flight");
            return None;
        }
        Some(PrefetchGuard {
            planner: Arc::clone(self),
            key,
        })
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.load().len()
    }
}

/// Releases the sentinel when the prefetch task finishes, however it ends.
pub struct PrefetchGuard {
    planner: Arc<PrefetchPlanner>,
    key: CompactString,
}

impl Drop for PrefetchGuard {
    fn drop(&mut self) {
        self.planner.in_flight.remove(&self.key);
    }
}
