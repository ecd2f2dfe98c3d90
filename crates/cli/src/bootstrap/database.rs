use hearth_dns_infrastructure::database::create_pool;
use sqlx::SqlitePool;
use tracing::info;

pub async fn init_database(database_url: &str) -> anyhow::Result<SqlitePool> {
    info!(url = %database_url, "Opening query log database");
    let pool = create_pool(database_url).await?;
    Ok(pool)
}
