use clap::Parser;
use hearth_dns_application::ports::QueryLogStore;
use hearth_dns_domain::CliOverrides;
use hearth_dns_infrastructure::dns::UdpServer;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

mod bootstrap;
mod di;

#[derive(Parser)]
#[command(name = "hearth-dns")]
#[command(version)]
#[command(about = "Hearth DNS - filtering DNS forwarder for the home network")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Data directory (query log database, cached lists)
    #[arg(long)]
    data_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind.clone(),
        data_dir: cli.data_dir.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), overrides)?;
    bootstrap::init_logging(&config);

    info!("Starting Hearth DNS v{}", env!("CARGO_PKG_VERSION"));

    config.validate()?;

    std::fs::create_dir_all(&config.system.data_dir)?;
    let database_url = format!("sqlite:{}/querylog.db", config.system.data_dir);
    let pool = bootstrap::init_database(&database_url).await?;

    let ctx = di::AppContext::build(config, pool.clone())?;

    // First sync before serving; a failure here means an empty index until
    // the sync job's next run.
    if let Err(e) = ctx.syncer.sync().await {
        warn!(error = %e, "Initial list sync failed, starting with an empty policy index");
    }

    if ctx.planner.enabled() {
        match ctx.store.load_patterns().await {
            Ok(patterns) => ctx.planner.publish(&patterns),
            Err(e) => warn!(error = %e, "Failed to load persisted query patterns"),
        }
    }

    let shutdown = CancellationToken::new();
    di::start_jobs(&ctx, shutdown.clone()).await;

    let server = Arc::new(UdpServer::new(
        Arc::clone(&ctx.config),
        Arc::clone(&ctx.resolver),
        Arc::clone(&ctx.sink),
        ctx.hostnames.clone(),
    ));
    let server_handle = tokio::spawn(server.run(shutdown.clone()));

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");

    // Tear down in reverse: stop intake, drain the log sink, close storage.
    shutdown.cancel();
    match server_handle.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => warn!(error = %e, "DNS server exited with error"),
        Err(e) => warn!(error = %e, "DNS server task panicked"),
    }
    ctx.sink.shutdown().await;
    ctx.resolver.cache().clear();
    pool.close().await;

    info!("Server shutdown complete");
    Ok(())
}
