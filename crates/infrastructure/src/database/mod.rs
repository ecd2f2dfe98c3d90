use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS queries (
    id INTEGER PRIMARY KEY,
    hostname TEXT NOT NULL,
    ip TEXT NOT NULL,
    domain TEXT NOT NULL,
    query_type TEXT NOT NULL,
    cached INTEGER NOT NULL,
    blocked INTEGER NOT NULL,
    block_reason TEXT NULL,
    upstream TEXT NULL,
    response_code TEXT NOT NULL,
    response_time_ms INTEGER NOT NULL,
    prefetched INTEGER NOT NULL,
    timestamp TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_queries_timestamp ON queries(timestamp);

CREATE TABLE IF NOT EXISTS query_patterns (
    domain TEXT NOT NULL,
    occurrences INTEGER NOT NULL,
    prefetch TEXT NOT NULL
);
"#;

pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    apply_schema(&pool).await?;

    Ok(pool)
}

pub async fn apply_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    Ok(())
}
