use hearth_dns_domain::{QueryPattern, RecordType};
use hearth_dns_infrastructure::dns::PrefetchPlanner;
use std::collections::HashMap;
use std::sync::Arc;

fn pattern(domain: &str, related: &[(&str, &[RecordType])]) -> QueryPattern {
    let prefetch: HashMap<String, Vec<RecordType>> = related
        .iter()
        .map(|(d, types)| (d.to_string(), types.to_vec()))
        .collect();
    QueryPattern {
        domain: domain.to_string(),
        occurrences: 10,
        prefetch,
    }
}

#[test]
fn test_published_patterns_are_visible() {
    let planner = PrefetchPlanner::new(true);
    planner.publish(&[pattern("a.com", &[("b.com", &[RecordType::A, RecordType::AAAA])])]);

    let related = planner.related("a.com");
    assert_eq!(related.len(), 2);
    assert!(related
        .iter()
        .any(|(d, t)| d.as_str() == "b.com" && *t == RecordType::A));
    assert!(related
        .iter()
        .any(|(d, t)| d.as_str() == "b.com" && *t == RecordType::AAAA));

    assert!(planner.related("unknown.com").is_empty());
}

#[test]
fn test_publish_replaces_the_whole_map() {
    let planner = PrefetchPlanner::new(true);
    planner.publish(&[pattern("a.com", &[("b.com", &[RecordType::A])])]);
    planner.publish(&[pattern("x.com", &[("y.com", &[RecordType::A])])]);

    assert!(planner.related("a.com").is_empty());
    assert!(!planner.related("x.com").is_empty());
    assert_eq!(planner.pattern_count(), 1);
}

#[test]
fn test_disabled_planner_returns_nothing() {
    let planner = PrefetchPlanner::new(false);
    planner.publish(&[pattern("a.com", &[("b.com", &[RecordType::A])])]);

    assert!(!planner.enabled());
    assert!(planner.related("a.com").is_empty());
}

#[test]
fn test_sentinel_allows_one_prefetch_per_key() {
    let planner = Arc::new(PrefetchPlanner::new(true));

    let guard = planner.try_begin("b.com", RecordType::A);
    assert!(guard.is_some());

    // Same (domain, qtype) is claimed; a different qtype is not.
    assert!(planner.try_begin("b.com", RecordType::A).is_none());
    assert!(planner.try_begin("b.com", RecordType::AAAA).is_some());

    drop(guard);
    assert!(planner.try_begin("b.com", RecordType::A).is_some());
}
