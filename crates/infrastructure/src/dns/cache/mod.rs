mod entry;
mod key;

pub use entry::{authoritative_ttl, CachedResponse};
pub use key::CacheKey;

use dashmap::DashMap;
use hearth_dns_domain::CacheStats;
use hickory_proto::op::Message;
use rustc_hash::FxBuildHasher;
use smallvec::SmallVec;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// How many entries an eviction pass samples before picking a victim.
const EVICTION_SAMPLE: usize = 16;

#[derive(Debug, Clone)]
pub struct DnsCacheConfig {
    pub capacity: usize,
    /// Seconds past the authoritative TTL an entry remains servable.
    pub serve_stale_for_secs: u64,
    /// TTL stamped on expired records served from a stale entry.
    pub serve_stale_with_ttl_secs: u64,
}

struct CacheSlot {
    response: CachedResponse,
    expires_at: Instant,
    hits: AtomicU64,
}

/// What a cache hit hands the pipeline: a servable copy of the response
/// plus the flags the hit branch decides on.
pub struct CachedLookup {
    pub message: Message,
    pub stale: bool,
    /// True exactly once per entry, at its fresh→stale transition. The
    /// caller owning this flag schedules the one background refresh.
    pub refresh_due: bool,
    pub prefetched: bool,
}

/// Bounded response cache with per-entry absolute expiry.
///
/// Entries expire at `max(authoritative TTL, serve_stale.for)` after
/// insertion; between the authoritative TTL and expiry they are served
/// stale. When full, a sampled least-frequently-used pass (hit count aged
/// by entry age) picks the victim.
pub struct DnsCache {
    entries: DashMap<CacheKey, Arc<CacheSlot>, FxBuildHasher>,
    capacity: usize,
    serve_stale_for: Duration,
    serve_stale_with_ttl: u32,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl DnsCache {
    pub fn new(config: DnsCacheConfig) -> Self {
        Self {
            entries: DashMap::with_hasher(FxBuildHasher),
            capacity: config.capacity,
            serve_stale_for: Duration::from_secs(config.serve_stale_for_secs),
            serve_stale_with_ttl: config.serve_stale_with_ttl_secs as u32,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    /// Look up `key` and, on a hit, return a copy carrying `id` with TTLs
    /// decremented by the time since insertion. Entries past their expiry
    /// are removed and count as misses.
    pub fn get(&self, key: &CacheKey, id: u16) -> Option<CachedLookup> {
        let slot = {
            let entry = match self.entries.get(key) {
                Some(entry) => entry,
                None => {
                    self.misses.fetch_add(1, Ordering::Relaxed);
                    return None;
                }
            };
            Arc::clone(entry.value())
        };

        if Instant::now() >= slot.expires_at {
            self.entries.remove(key);
            self.misses.fetch_add(1, Ordering::Relaxed);
            return None;
        }

        self.hits.fetch_add(1, Ordering::Relaxed);
        slot.hits.fetch_add(1, Ordering::Relaxed);

        let stale = slot.response.is_stale();
        let refresh_due = stale && slot.response.mark_stale_once();

        Some(CachedLookup {
            message: slot.response.serve(id, self.serve_stale_with_ttl),
            stale,
            refresh_due,
            prefetched: slot.response.prefetched(),
        })
    }

    /// Insert a response whose smallest non-zero record TTL is
    /// `authoritative_ttl`.
    pub fn insert(&self, key: CacheKey, message: Message, authoritative_ttl: u32, prefetched: bool) {
        if self.capacity == 0 {
            return;
        }
        while self.entries.len() >= self.capacity {
            self.evict_one();
        }

        let lifetime = Duration::from_secs(authoritative_ttl as u64).max(self.serve_stale_for);
        let slot = CacheSlot {
            response: CachedResponse::new(message, authoritative_ttl, prefetched),
            expires_at: Instant::now() + lifetime,
            hits: AtomicU64::new(0),
        };
        self.entries.insert(key, Arc::new(slot));
    }

    /// Sampled LFU with aging: among a small sample, expired entries go
    /// first, otherwise the entry with the lowest hit rate over its
    /// lifetime is removed.
    fn evict_one(&self) {
        let now = Instant::now();
        let mut expired: SmallVec<[CacheKey; 4]> = SmallVec::new();
        let mut victim: Option<(CacheKey, f64)> = None;

        for entry in self.entries.iter().take(EVICTION_SAMPLE) {
            if now >= entry.expires_at {
                expired.push(entry.key().clone());
                continue;
            }
            let age = entry.response.elapsed_secs().max(1);
            let score = entry.hits.load(Ordering::Relaxed) as f64 / age as f64;
            if victim.as_ref().map_or(true, |(_, lowest)| score < *lowest) {
                victim = Some((entry.key().clone(), score));
            }
        }

        let mut removed = false;
        for key in expired {
            removed |= self.entries.remove(&key).is_some();
            self.evictions.fetch_add(1, Ordering::Relaxed);
        }

        if !removed {
            if let Some((key, _)) = victim {
                if self.entries.remove(&key).is_some() {
                    self.evictions.fetch_add(1, Ordering::Relaxed);
                    debug!(key = %key.as_str(), "Evicted cache entry");
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let ratio = if total == 0 {
            0.0
        } else {
            (10_000.0 * hits as f64 / total as f64).round() / 10_000.0
        };
        CacheStats {
            hits,
            misses,
            ratio,
            evicted: self.evictions.load(Ordering::Relaxed),
            size: self.entries.len(),
            capacity: self.capacity,
        }
    }
}
