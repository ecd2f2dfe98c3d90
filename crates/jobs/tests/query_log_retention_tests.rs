mod helpers;

use helpers::mock_store::MockQueryLogStore;
use hearth_dns_application::ports::QueryLogStore;
use hearth_dns_jobs::{JobRunner, QueryLogRetentionJob};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn test_retention_runs_on_interval() {
    let store = Arc::new(MockQueryLogStore::default());
    let job = QueryLogRetentionJob::new(Arc::clone(&store) as Arc<dyn QueryLogStore>, Duration::from_secs(86_400))
        .with_interval(1);

    let token = CancellationToken::new();
    let job = job.with_cancellation(token.clone());
    tokio::spawn(Arc::new(job).start());

    tokio::time::sleep(Duration::from_millis(2500)).await;
    let runs = store.delete_calls();
    assert!(runs >= 1, "expected at least one retention run, got {runs}");

    token.cancel();
    tokio::time::sleep(Duration::from_millis(200)).await;
    let after_cancel = store.delete_calls();
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(
        store.delete_calls(),
        after_cancel,
        "job kept running after cancellation"
    );
}

#[tokio::test]
async fn test_store_errors_do_not_stop_the_job() {
    let store = Arc::new(MockQueryLogStore {
        fail_deletes: true,
        ..MockQueryLogStore::default()
    });
    let job = QueryLogRetentionJob::new(Arc::clone(&store) as Arc<dyn QueryLogStore>, Duration::from_secs(86_400))
        .with_interval(1);

    let token = CancellationToken::new();
    let job = job.with_cancellation(token.clone());
    let handle = tokio::spawn(Arc::new(job).start());

    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert!(!handle.is_finished(), "job must survive store errors");
    token.cancel();
}

#[tokio::test]
async fn test_runner_wires_shutdown_token() {
    let store = Arc::new(MockQueryLogStore::default());
    let token = CancellationToken::new();

    let runner = JobRunner::new()
        .with_query_log_retention(
            QueryLogRetentionJob::new(Arc::clone(&store) as Arc<dyn QueryLogStore>, Duration::from_secs(86_400))
                .with_interval(1),
        )
        .with_shutdown_token(token.clone());
    runner.start().await;

    tokio::time::sleep(Duration::from_millis(1200)).await;
    token.cancel();
    tokio::time::sleep(Duration::from_millis(200)).await;

    let runs_at_cancel = store.delete_calls();
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(store.delete_calls(), runs_at_cancel);
}
