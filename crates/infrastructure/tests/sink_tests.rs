use chrono::Utc;
use hearth_dns_domain::{QueryLog, RecordType};
use hearth_dns_infrastructure::database::apply_schema;
use hearth_dns_infrastructure::querylog::QueryLogSink;
use hearth_dns_infrastructure::repositories::SqliteQueryLogStore;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;
use std::time::Duration;

async fn memory_store() -> (Arc<SqliteQueryLogStore>, SqlitePool) {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    apply_schema(&pool).await.expect("schema");
    (Arc::new(SqliteQueryLogStore::new(pool.clone())), pool)
}

fn record(domain: &str) -> QueryLog {
    QueryLog {
        hostname: "laptop".to_string(),
        ip: "192.168.1.10".to_string(),
        domain: domain.to_string(),
        query_type: RecordType::A,
        cached: false,
        blocked: false,
        block_reason: None,
        upstream: Some("1.1.1.1".to_string()),
        response_code: "NOERROR".to_string(),
        response_time_ms: 3,
        prefetched: false,
        timestamp: Utc::now(),
    }
}

async fn count_rows(pool: &SqlitePool) -> i64 {
    sqlx::query("SELECT COUNT(*) AS n FROM queries")
        .fetch_one(pool)
        .await
        .unwrap()
        .get("n")
}

#[tokio::test]
async fn test_subscribers_see_records_live() {
    let (store, _pool) = memory_store().await;
    let sink = QueryLogSink::start(store);

    let (id, mut receiver) = sink.subscribe().await;
    sink.submit(record("example.com"));

    let received = tokio::time::timeout(Duration::from_secs(2), receiver.recv())
        .await
        .expect("record within deadline")
        .expect("channel open");
    assert_eq!(received.domain, "example.com");

    sink.unsubscribe(id).await;
    sink.shutdown().await;
}

#[tokio::test]
async fn test_periodic_flush_commits_batch() {
    let (store, pool) = memory_store().await;
    let sink =
        QueryLogSink::start_with_interval(store, Duration::from_millis(100));

    sink.submit(record("one.example.com"));
    sink.submit(record("two.example.com"));

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(count_rows(&pool).await, 2);

    sink.shutdown().await;
}

#[tokio::test]
async fn test_shutdown_drains_pending_records() {
    let (store, pool) = memory_store().await;
    // Long interval: nothing flushes until shutdown.
    let sink = QueryLogSink::start_with_interval(
        store,
        Duration::from_secs(300),
    );

    for i in 0..25 {
        sink.submit(record(&format!("host{i}.example.com")));
    }
    sink.shutdown().await;

    assert_eq!(count_rows(&pool).await, 25);
}

#[tokio::test]
async fn test_slow_subscriber_does_not_block_the_sink() {
    let (store, pool) = memory_store().await;
    let sink = QueryLogSink::start_with_interval(
        store,
        Duration::from_secs(300),
    );

    // Subscribe but never read; the per-subscriber buffer fills up.
    let (_id, _receiver) = sink.subscribe().await;

    for i in 0..100 {
        sink.submit(record(&format!("host{i}.example.com")));
    }
    sink.shutdown().await;

    // Every record still reached the store.
    assert_eq!(count_rows(&pool).await, 100);
}
