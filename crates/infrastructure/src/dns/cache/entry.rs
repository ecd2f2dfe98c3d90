use hickory_proto::op::Message;
use hickory_proto::rr::Record;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// A cached DNS response. The stored message is never mutated; served
/// copies get their TTLs computed from the insertion instant, so concurrent
/// readers need no coordination.
pub struct CachedResponse {
    message: Message,
    inserted_at: Instant,
    /// Smallest non-zero TTL across all record sections at insert time.
    authoritative_ttl: u32,
    prefetched: bool,
    stale_observed: AtomicBool,
}

impl CachedResponse {
    pub fn new(message: Message, authoritative_ttl: u32, prefetched: bool) -> Self {
        Self {
            message,
            inserted_at: Instant::now(),
            authoritative_ttl,
            prefetched,
            stale_observed: AtomicBool::new(false),
        }
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.inserted_at.elapsed().as_secs()
    }

    /// The entry is stale once its shortest-lived record has run out.
    pub fn is_stale(&self) -> bool {
        self.elapsed_secs() >= u64::from(self.authoritative_ttl)
    }

    /// Returns true exactly once, at the fresh→stale transition, so that
    /// exactly one background refresh is scheduled per staleness epoch.
    pub fn mark_stale_once(&self) -> bool {
        self.stale_observed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn prefetched(&self) -> bool {
        self.prefetched
    }

    /// A servable copy: transaction id replaced, every record's TTL
    /// decremented by the elapsed time, expired records clamped to
    /// `stale_ttl`. Zero-TTL records pass through untouched.
    pub fn serve(&self, id: u16, stale_ttl: u32) -> Message {
        let elapsed = u32::try_from(self.elapsed_secs()).unwrap_or(u32::MAX);

        let mut message = self.message.clone();
        message.set_id(id);

        let answers = adjust_ttls(message.take_answers(), elapsed, stale_ttl);
        message.insert_answers(answers);
        let name_servers = adjust_ttls(message.take_name_servers(), elapsed, stale_ttl);
        message.insert_name_servers(name_servers);
        let additionals = adjust_ttls(message.take_additionals(), elapsed, stale_ttl);
        message.insert_additionals(additionals);

        message
    }
}

fn adjust_ttls(records: Vec<Record>, elapsed: u32, stale_ttl: u32) -> Vec<Record> {
    records
        .into_iter()
        .map(|mut record| {
            let ttl = record.ttl();
            if ttl > 0 {
                if ttl > elapsed {
                    record.set_ttl(ttl - elapsed);
                } else {
                    record.set_ttl(stale_ttl);
                }
            }
            record
        })
        .collect()
}

/// The minimum non-zero TTL across every section of `message`, or `None`
/// when no record carries a TTL (such responses are not cacheable).
pub fn authoritative_ttl(message: &Message) -> Option<u32> {
    message
        .answers()
        .iter()
        .chain(message.name_servers())
        .chain(message.additionals())
        .map(Record::ttl)
        .filter(|&ttl| ttl > 0)
        .min()
}
