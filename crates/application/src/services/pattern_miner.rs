//! Mines the query log for domains that are reliably queried together.
//!
//! A "lead" query predicts a related domain when that domain shows up within
//! [`PAIR_WINDOW`] of the lead, from the same client, often enough to clear
//! both the absolute and the relative thresholds below.

use crate::ports::PatternObservation;
use chrono::Duration;
use hearth_dns_domain::{QueryPattern, RecordType};
use std::collections::HashMap;

/// How far after a lead query a related query may land, in seconds.
pub const PAIR_WINDOW_SECS: i64 = 5;

/// Leads whose strongest related domain was seen fewer times are discarded.
pub const MIN_OCCURRENCES: u32 = 5;

/// A related domain must co-occur at least this fraction of the strongest
/// related domain's count to be worth prefetching.
pub const PREFETCH_RATIO: f64 = 0.8;

#[derive(Default)]
struct RelatedStats {
    count: u32,
    record_types: Vec<RecordType>,
}

/// Derive prefetch patterns from observations ordered by timestamp.
pub fn mine_patterns(observations: &[PatternObservation]) -> Vec<QueryPattern> {
    let bins = bin_observations(observations);

    let mut patterns: Vec<QueryPattern> = bins
        .into_iter()
        .filter_map(|(domain, related)| build_pattern(domain, related))
        .collect();

    patterns.sort_by(|a, b| {
        b.occurrences
            .cmp(&a.occurrences)
            .then_with(|| a.domain.cmp(&b.domain))
    });
    patterns
}

/// For every lead query, count the domains each client asked for within the
/// pair window right after it.
fn bin_observations(
    observations: &[PatternObservation],
) -> HashMap<String, HashMap<String, RelatedStats>> {
    let mut bins: HashMap<String, HashMap<String, RelatedStats>> = HashMap::new();

    for (i, lead) in observations.iter().enumerate() {
        let window_end = lead.timestamp + Duration::seconds(PAIR_WINDOW_SECS);
        let related = bins.entry(lead.domain.clone()).or_default();

        for follow in &observations[i..] {
            if follow.timestamp > window_end {
                break;
            }
            if follow.hostname != lead.hostname || follow.domain == lead.domain {
                continue;
            }

            let stats = related.entry(follow.domain.clone()).or_default();
            stats.count += 1;
            stats.record_types.push(follow.query_type);
        }
    }

    bins
}

fn build_pattern(domain: String, related: HashMap<String, RelatedStats>) -> Option<QueryPattern> {
    let max_count = related.values().map(|s| s.count).max().unwrap_or(0);
    if max_count < MIN_OCCURRENCES {
        return None;
    }

    let mut prefetch: HashMap<String, Vec<RecordType>> = HashMap::new();
    for (related_domain, stats) in related {
        if f64::from(stats.count) / f64::from(max_count) < PREFETCH_RATIO {
            continue;
        }
        let mut record_types = stats.record_types;
        record_types.sort();
        record_types.dedup();
        prefetch.insert(related_domain, record_types);
    }

    Some(QueryPattern {
        domain,
        occurrences: max_count,
        prefetch,
    })
}
