use hearth_dns_domain::QueryLog;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;
use tokio::sync::RwLock;

/// Buffered records per live subscriber. Subscribers that fall further
/// behind miss events rather than slow the sink down.
const SUBSCRIBER_BUFFER: usize = 10;

/// Fans freshly observed query records out to live subscribers.
pub struct QueryBroadcaster {
    subscribers: RwLock<Vec<(u64, mpsc::Sender<QueryLog>)>>,
    next_id: AtomicU64,
}

impl QueryBroadcaster {
    pub fn new() -> Self {
        Self {
            subscribers: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    pub async fn subscribe(&self) -> (u64, mpsc::Receiver<QueryLog>) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (sender, receiver) = mpsc::channel(SUBSCRIBER_BUFFER);
        self.subscribers.write().await.push((id, sender));
        (id, receiver)
    }

    pub async fn unsubscribe(&self, id: u64) {
        self.subscribers
            .write()
            .await
            .retain(|(subscriber_id, _)| *subscriber_id != id);
    }

    /// Best-effort delivery: a full subscriber channel skips this event.
    pub async fn broadcast(&self, record: &QueryLog) {
        for (_, sender) in self.subscribers.read().await.iter() {
            let _ = sender.try_send(record.clone());
        }
    }

    pub async fn subscriber_count(&self) -> usize {
        self.subscribers.read().await.len()
    }
}

impl Default for QueryBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}
