use hearth_dns_application::ports::{HostnameResolver, QueryLogStore};
use hearth_dns_domain::Config;
use hearth_dns_infrastructure::dns::cache::{DnsCache, DnsCacheConfig};
use hearth_dns_infrastructure::dns::{PolicyIndex, PrefetchPlanner, Resolver, UpstreamPool};
use hearth_dns_infrastructure::querylog::QueryLogSink;
use hearth_dns_infrastructure::repositories::SqliteQueryLogStore;
use hearth_dns_infrastructure::sources::SourceSyncer;
use hearth_dns_infrastructure::system::ClientNameResolver;
use hearth_dns_jobs::{JobRunner, ListSyncJob, PatternLearningJob, QueryLogRetentionJob};
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Everything the resolver needs, assembled once at boot.
pub struct AppContext {
    pub config: Arc<Config>,
    pub store: Arc<SqliteQueryLogStore>,
    pub index: Arc<PolicyIndex>,
    pub planner: Arc<PrefetchPlanner>,
    pub resolver: Arc<Resolver>,
    pub sink: Arc<QueryLogSink>,
    pub syncer: Arc<SourceSyncer>,
    pub hostnames: Arc<dyn HostnameResolver>,
}

impl AppContext {
    pub fn build(config: Config, pool: SqlitePool) -> anyhow::Result<Self> {
        let config = Arc::new(config);

        let store = Arc::new(SqliteQueryLogStore::new(pool));
        let index = Arc::new(PolicyIndex::empty());
        let syncer = Arc::new(SourceSyncer::new(Arc::clone(&config), Arc::clone(&index))?);

        let cache = Arc::new(DnsCache::new(DnsCacheConfig {
            capacity: config.cache.capacity,
            serve_stale_for_secs: config.cache.serve_stale.for_secs,
            serve_stale_with_ttl_secs: config.cache.serve_stale.with_ttl_secs,
        }));

        let upstreams = Arc::new(UpstreamPool::new(&config.dns.upstreams)?);
        let planner = Arc::new(PrefetchPlanner::new(config.cache.query_patterns.follow));

        let resolver = Arc::new(Resolver::new(
            Arc::clone(&config),
            Arc::clone(&index),
            cache,
            upstreams,
            Arc::clone(&planner),
        ));

        let sink = QueryLogSink::start(Arc::clone(&store) as Arc<dyn QueryLogStore>);
        let hostnames: Arc<dyn HostnameResolver> =
            Arc::new(ClientNameResolver::new(&config.client_lookup)?);

        Ok(Self {
            config,
            store,
            index,
            planner,
            resolver,
            sink,
            syncer,
            hostnames,
        })
    }
}

pub async fn start_jobs(ctx: &AppContext, shutdown: CancellationToken) {
    let store: Arc<dyn QueryLogStore> = Arc::clone(&ctx.store) as Arc<dyn QueryLogStore>;

    let mut runner = JobRunner::new()
        .with_list_sync(ListSyncJob::new(
            Arc::clone(&ctx.syncer),
            ctx.config.sources.update_interval_hours * 3600,
        ))
        .with_query_log_retention(QueryLogRetentionJob::new(
            Arc::clone(&store),
            Duration::from_secs(u64::from(ctx.config.querylog.retention_days) * 86_400),
        ))
        .with_shutdown_token(shutdown);

    if ctx.config.cache.query_patterns.follow {
        runner = runner.with_pattern_learning(PatternLearningJob::new(
            store,
            Arc::clone(&ctx.planner),
            Duration::from_secs(u64::from(ctx.config.cache.query_patterns.look_back_days) * 86_400),
        ));
    }

    runner.start().await;
}
