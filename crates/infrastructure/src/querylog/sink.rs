use super::broadcast::QueryBroadcaster;
use hearth_dns_application::ports::QueryLogStore;
use hearth_dns_domain::QueryLog;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Bound on unprocessed records between the handlers and the consumer.
pub const CHANNEL_CAPACITY: usize = 1_000;

/// How often the pending buffer is committed to the backing store.
const FLUSH_INTERVAL: Duration = Duration::from_secs(300);

/// The query log sink: handlers submit records without blocking; a single
/// consumer fans them out to subscribers and batch-commits them on a timer
/// and at shutdown. A failed commit keeps the batch for the next tick.
pub struct QueryLogSink {
    sender: mpsc::Sender<QueryLog>,
    broadcaster: Arc<QueryBroadcaster>,
    consumer: Mutex<Option<JoinHandle<()>>>,
    shutdown: CancellationToken,
}

impl QueryLogSink {
    pub fn start(store: Arc<dyn QueryLogStore>) -> Arc<Self> {
        Self::start_with_interval(store, FLUSH_INTERVAL)
    }

    pub fn start_with_interval(store: Arc<dyn QueryLogStore>, interval: Duration) -> Arc<Self> {
        let (sender, receiver) = mpsc::channel(CHANNEL_CAPACITY);
        let broadcaster = Arc::new(QueryBroadcaster::new());
        let shutdown = CancellationToken::new();

        let consumer = tokio::spawn(consume_loop(
            receiver,
            store,
            Arc::clone(&broadcaster),
            shutdown.clone(),
            interval,
        ));

        Arc::new(Self {
            sender,
            broadcaster,
            consumer: Mutex::new(Some(consumer)),
            shutdown,
        })
    }

    /// Non-blocking submit. A full channel drops the record; the resolver
    /// never waits on its own bookkeeping.
    pub fn submit(&self, record: QueryLog) {
        if self.sender.try_send(record).is_err() {
            warn!("Query log channel full, dropping record");
        }
    }

    pub fn broadcaster(&self) -> &Arc<QueryBroadcaster> {
        &self.broadcaster
    }

    pub async fn subscribe(&self) -> (u64, mpsc::Receiver<QueryLog>) {
        self.broadcaster.subscribe().await
    }

    pub async fn unsubscribe(&self, id: u64) {
        self.broadcaster.unsubscribe(id).await
    }

    /// Stop the consumer, draining queued records into one final flush.
    pub async fn shutdown(&self) {
        self.shutdown.cancel();
        if let Some(handle) = self.consumer.lock().await.take() {
            let _ = handle.await;
        }
    }
}

async fn consume_loop(
    mut receiver: mpsc::Receiver<QueryLog>,
    store: Arc<dyn QueryLogStore>,
    broadcaster: Arc<QueryBroadcaster>,
    shutdown: CancellationToken,
    interval: Duration,
) {
    let mut pending: Vec<QueryLog> = Vec::new();
    let mut ticker = tokio::time::interval(interval);
    // The first tick fires immediately; skip it so the first flush waits a
    // full interval.
    ticker.tick().await;

    loop {
        tokio::select! {
            maybe_record = receiver.recv() => match maybe_record {
                Some(record) => {
                    broadcaster.broadcast(&record).await;
                    pending.push(record);
                }
                None => break,
            },
            _ = ticker.tick() => flush(store.as_ref(), &mut pending).await,
            _ = shutdown.cancelled() => break,
        }
    }

    while let Ok(record) = receiver.try_recv() {
        broadcaster.broadcast(&record).await;
        pending.push(record);
    }
    flush(store.as_ref(), &mut pending).await;

    info!("Query log sink stopped");
}

async fn flush(store: &dyn QueryLogStore, pending: &mut Vec<QueryLog>) {
    if pending.is_empty() {
        return;
    }

    match store.insert_batch(pending).await {
        Ok(()) => {
            debug!(count = pending.len(), "Flushed query log batch");
            pending.clear();
        }
        Err(e) => {
            // Batch retained; retried on the next tick.
            warn!(error = %e, count = pending.len(), "Query log flush failed");
        }
    }
}
