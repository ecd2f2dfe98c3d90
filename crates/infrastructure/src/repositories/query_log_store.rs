use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use hearth_dns_application::ports::{PatternObservation, QueryLogStore};
use hearth_dns_domain::{DomainError, QueryLog, QueryPattern, RecordType};
use sqlx::{Row, SqlitePool};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

const COLS_PER_ROW: usize = 12;
// SQLite allows at most 999 bound parameters per statement.
const ROWS_PER_CHUNK: usize = 999 / COLS_PER_ROW;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// SQLite-backed store for query observations and mined prefetch patterns.
pub struct SqliteQueryLogStore {
    pool: SqlitePool,
}

impl SqliteQueryLogStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn db_err(e: sqlx::Error) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f")
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// `datetime('now', ?)` offset reaching `duration` into the past, at minute
/// granularity.
fn minutes_offset(duration: Duration) -> String {
    format!("-{} minutes", duration.as_secs() / 60)
}

fn build_multi_insert_sql(rows: usize) -> String {
    debug_assert!(rows > 0 && rows <= ROWS_PER_CHUNK);
    const HEADER: &str = "INSERT INTO queries \
        (hostname, ip, domain, query_type, cached, blocked, block_reason, \
         upstream, response_code, response_time_ms, prefetched, timestamp) \
        VALUES ";
    const PLACEHOLDER: &str = "(?,?,?,?,?,?,?,?,?,?,?,?)";
    let mut sql = String::with_capacity(HEADER.len() + rows * (PLACEHOLDER.len() + 1));
    sql.push_str(HEADER);
    for i in 0..rows {
        if i > 0 {
            sql.push(',');
        }
        sql.push_str(PLACEHOLDER);
    }
    sql
}

#[async_trait]
impl QueryLogStore for SqliteQueryLogStore {
    async fn insert_batch(&self, records: &[QueryLog]) -> Result<(), DomainError> {
        if records.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await.map_err(db_err)?;

        for chunk in records.chunks(ROWS_PER_CHUNK) {
            let sql = build_multi_insert_sql(chunk.len());
            let mut query = sqlx::query(&sql);
            for record in chunk {
                query = query
                    .bind(&record.hostname)
                    .bind(&record.ip)
                    .bind(&record.domain)
                    .bind(record.query_type.as_str())
                    .bind(record.cached)
                    .bind(record.blocked)
                    .bind(record.block_reason.as_deref())
                    .bind(record.upstream.as_deref())
                    .bind(&record.response_code)
                    .bind(record.response_time_ms as i64)
                    .bind(record.prefetched)
                    .bind(format_timestamp(&record.timestamp));
            }
            // A failed chunk drops the transaction, rolling the batch back.
            query.execute(&mut *tx).await.map_err(db_err)?;
        }

        tx.commit().await.map_err(db_err)?;
        debug!(count = records.len(), "Committed query log batch");
        Ok(())
    }

    async fn fetch_pattern_observations(
        &self,
        look_back: Duration,
    ) -> Result<Vec<PatternObservation>, DomainError> {
        let rows = sqlx::query(
            "SELECT hostname, domain, query_type, timestamp \
             FROM queries \
             WHERE blocked = 0 \
               AND response_code = 'NOERROR' \
               AND query_type != 'UNKNOWN' \
               AND timestamp >= datetime('now', ?) \
             ORDER BY timestamp ASC",
        )
        .bind(minutes_offset(look_back))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        let observations = rows
            .iter()
            .filter_map(|row| {
                let timestamp = parse_timestamp(&row.get::<String, _>("timestamp"))?;
                Some(PatternObservation {
                    hostname: row.get("hostname"),
                    domain: row.get("domain"),
                    query_type: RecordType::parse(&row.get::<String, _>("query_type")),
                    timestamp,
                })
            })
            .collect();

        Ok(observations)
    }

    async fn replace_patterns(&self, patterns: &[QueryPattern]) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        sqlx::query("DELETE FROM query_patterns")
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;

        for pattern in patterns {
            let prefetch = serde_json::to_string(&pattern.prefetch)
                .map_err(|e| DomainError::DatabaseError(e.to_string()))?;
            sqlx::query("INSERT INTO query_patterns (domain, occurrences, prefetch) VALUES (?, ?, ?)")
                .bind(&pattern.domain)
                .bind(pattern.occurrences as i64)
                .bind(prefetch)
                .execute(&mut *tx)
                .await
                .map_err(db_err)?;
        }

        tx.commit().await.map_err(db_err)
    }

    async fn load_patterns(&self) -> Result<Vec<QueryPattern>, DomainError> {
        let rows = sqlx::query("SELECT domain, occurrences, prefetch FROM query_patterns")
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        let mut patterns = Vec::with_capacity(rows.len());
        for row in &rows {
            let prefetch: HashMap<String, Vec<RecordType>> =
                serde_json::from_str(&row.get::<String, _>("prefetch"))
                    .map_err(|e| DomainError::DatabaseError(e.to_string()))?;
            patterns.push(QueryPattern {
                domain: row.get("domain"),
                occurrences: row.get::<i64, _>("occurrences") as u32,
                prefetch,
            });
        }

        Ok(patterns)
    }

    async fn delete_older_than(&self, retention: Duration) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM queries WHERE timestamp < datetime('now', ?)")
            .bind(minutes_offset(retention))
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected())
    }
}
