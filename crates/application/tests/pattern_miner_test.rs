use chrono::{Duration, TimeZone, Utc};
use hearth_dns_application::ports::PatternObservation;
use hearth_dns_application::services::mine_patterns;
use hearth_dns_domain::RecordType;

fn observation(
    hostname: &str,
    domain: &str,
    query_type: RecordType,
    offset_secs: i64,
) -> PatternObservation {
    PatternObservation {
        hostname: hostname.to_string(),
        domain: domain.to_string(),
        query_type,
        timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(offset_secs),
    }
}

/// Ten a.com → b.com pairs within the window, each pair a minute apart so
/// leads never see each other's follow-ups.
fn paired_observations(count: i64) -> Vec<PatternObservation> {
    let mut observations = Vec::new();
    for i in 0..count {
        observations.push(observation("laptop", "a.com", RecordType::A, i * 60));
        observations.push(observation("laptop", "b.com", RecordType::A, i * 60 + 2));
    }
    observations
}

#[test]
fn test_mines_cooccurring_domains() {
    let patterns = mine_patterns(&paired_observations(10));

    let pattern = patterns
        .iter()
        .find(|p| p.domain == "a.com")
        .expect("a.com pattern");
    assert_eq!(pattern.occurrences, 10);
    assert_eq!(pattern.prefetch.len(), 1);
    assert_eq!(pattern.prefetch["b.com"], vec![RecordType::A]);

    // b.com is never followed by anything within the window.
    assert!(!patterns.iter().any(|p| p.domain == "b.com"));
}

#[test]
fn test_below_occurrence_threshold_is_discarded() {
    let patterns = mine_patterns(&paired_observations(4));
    assert!(patterns.is_empty());
}

#[test]
fn test_weak_relations_are_cut_by_ratio() {
    let mut observations = Vec::new();
    for i in 0..10 {
        observations.push(observation("laptop", "a.com", RecordType::A, i * 60));
        observations.push(observation("laptop", "b.com", RecordType::A, i * 60 + 1));
        // c.com only follows 7 of the 10 leads: 0.7 < 0.8.
        if i < 7 {
            observations.push(observation("laptop", "c.com", RecordType::A, i * 60 + 2));
        }
    }

    let patterns = mine_patterns(&observations);
    let pattern = patterns.iter().find(|p| p.domain == "a.com").unwrap();
    assert!(pattern.prefetch.contains_key("b.com"));
    assert!(!pattern.prefetch.contains_key("c.com"));
}

#[test]
fn test_other_hosts_do_not_contribute() {
    let mut observations = Vec::new();
    for i in 0..10 {
        observations.push(observation("laptop", "a.com", RecordType::A, i * 60));
        observations.push(observation("phone", "b.com", RecordType::A, i * 60 + 2));
    }

    assert!(mine_patterns(&observations).is_empty());
}

#[test]
fn test_pairs_outside_the_window_do_not_count() {
    let mut observations = Vec::new();
    for i in 0..10 {
        observations.push(observation("laptop", "a.com", RecordType::A, i * 60));
        observations.push(observation("laptop", "b.com", RecordType::A, i * 60 + 30));
    }

    assert!(mine_patterns(&observations).is_empty());
}

#[test]
fn test_record_types_are_deduplicated_and_sorted() {
    let mut observations = Vec::new();
    for i in 0..6 {
        observations.push(observation("laptop", "a.com", RecordType::A, i * 60));
        observations.push(observation("laptop", "b.com", RecordType::AAAA, i * 60 + 1));
        observations.push(observation("laptop", "b.com", RecordType::A, i * 60 + 2));
    }

    let patterns = mine_patterns(&observations);
    let pattern = patterns.iter().find(|p| p.domain == "a.com").unwrap();
    assert_eq!(
        pattern.prefetch["b.com"],
        vec![RecordType::A, RecordType::AAAA]
    );
}

#[test]
fn test_patterns_sorted_by_occurrences() {
    let mut observations = paired_observations(6);
    let base = 100_000;
    for i in 0..9 {
        observations.push(observation("phone", "x.com", RecordType::A, base + i * 60));
        observations.push(observation("phone", "y.com", RecordType::A, base + i * 60 + 2));
    }

    let patterns = mine_patterns(&observations);
    assert_eq!(patterns[0].domain, "x.com");
    assert_eq!(patterns[0].occurrences, 9);
    assert_eq!(patterns[1].domain, "a.com");
    assert_eq!(patterns[1].occurrences, 6);
}
