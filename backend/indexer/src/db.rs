//! Database layer — migrations, queries, and cursor management.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::errors::Result;
use crate::events::{EventKind, EventRecord, LedgerEvent};

/// Establish a SQLite connection pool and run pending migrations.
pub async fn init_pool(database_url: &str) -> Result<SqlitePool> {
    let url = if database_url.starts_with("sqlite:") {
        database_url.to_string()
    } else {
        format!("sqlite:{database_url}")
    };

    // Make sure the file is created if it doesn't exist yet.
    let options = SqliteConnectOptions::from_str(&url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Database migrations applied successfully");
    Ok(pool)
}

// ─────────────────────────────────────────────────────────
// Cursor helpers
// ─────────────────────────────────────────────────────────

/// Where the indexer stopped: ledger, pagination cursor and the highest
/// mint id stored so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, sqlx::FromRow)]
pub struct ResumePoint {
    pub last_ledger: i64,
    pub last_cursor: Option<String>,
    pub last_mint_id: i64,
}

/// Read the persisted resume point. A missing cursor row reads as the default
/// (ledger 0, no cursor, no mints).
pub async fn load_resume_point(pool: &SqlitePool) -> Result<ResumePoint> {
    let row = sqlx::query_as::<_, ResumePoint>(
        "SELECT last_ledger, last_cursor, last_mint_id FROM indexer_cursor WHERE id = 1",
    )
    .fetch_optional(pool)
    .await?;
    Ok(row.unwrap_or_default())
}

/// Persist the resume point so restarts are deterministic.
pub async fn save_resume_point(pool: &SqlitePool, point: &ResumePoint) -> Result<()> {
    sqlx::query(
        "UPDATE indexer_cursor SET last_ledger = ?1, last_cursor = ?2, last_mint_id = ?3 WHERE id = 1",
    )
    .bind(point.last_ledger)
    .bind(&point.last_cursor)
    .bind(point.last_mint_id)
    .execute(pool)
    .await?;
    Ok(())
}

// ─────────────────────────────────────────────────────────
// Event writes
// ─────────────────────────────────────────────────────────

/// Persist a batch of decoded events.  Events whose RPC `event_id` is
/// already stored are silently ignored to make the indexer idempotent.
pub async fn insert_events(pool: &SqlitePool, events: &[LedgerEvent]) -> Result<usize> {
    let mut count = 0usize;
    for ev in events {
        let rows_affected = sqlx::query(
            r#"
            INSERT OR IGNORE INTO events
                (event_id, event_type, project_id, mint_id, actor, target, amount,
                 ledger, timestamp, contract_id, tx_hash)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&ev.event_id)
        .bind(&ev.event_type)
        .bind(&ev.project_id)
        .bind(ev.mint_id)
        .bind(&ev.actor)
        .bind(&ev.target)
        .bind(&ev.amount)
        .bind(ev.ledger)
        .bind(ev.timestamp)
        .bind(&ev.contract_id)
        .bind(&ev.tx_hash)
        .execute(pool)
        .await?
        .rows_affected();

        count += rows_affected as usize;
    }
    Ok(count)
}

// ─────────────────────────────────────────────────────────
// Event reads
// ─────────────────────────────────────────────────────────

const EVENT_COLUMNS: &str = "id, event_id, event_type, project_id, mint_id, actor, target, \
     amount, ledger, timestamp, contract_id, tx_hash, created_at";

/// Fetch all events for a given project, ordered by ledger ascending.
pub async fn get_events_for_project(
    pool: &SqlitePool,
    project_id: &str,
) -> Result<Vec<EventRecord>> {
    let sql = format!(
        "SELECT {EVENT_COLUMNS} FROM events WHERE project_id = ?1 ORDER BY ledger ASC, id ASC"
    );
    let rows = sqlx::query_as::<_, EventRecord>(&sql)
        .bind(project_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Fetch all events, ordered by ledger ascending.
pub async fn get_all_events(pool: &SqlitePool) -> Result<Vec<EventRecord>> {
    let sql = format!("SELECT {EVENT_COLUMNS} FROM events ORDER BY ledger ASC, id ASC");
    let rows = sqlx::query_as::<_, EventRecord>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Fetch every mint event, ordered by mint id.
pub async fn get_mints(pool: &SqlitePool) -> Result<Vec<EventRecord>> {
    let sql = format!(
        "SELECT {EVENT_COLUMNS} FROM events WHERE event_type = ?1 ORDER BY mint_id ASC"
    );
    let rows = sqlx::query_as::<_, EventRecord>(&sql)
        .bind(EventKind::CreditsMinted.as_str())
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Fetch the mint event carrying `mint_id`, if it has been indexed.
pub async fn get_mint(pool: &SqlitePool, mint_id: i64) -> Result<Option<EventRecord>> {
    let sql = format!(
        "SELECT {EVENT_COLUMNS} FROM events WHERE event_type = ?1 AND mint_id = ?2 LIMIT 1"
    );
    let row = sqlx::query_as::<_, EventRecord>(&sql)
        .bind(EventKind::CreditsMinted.as_str())
        .bind(mint_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}
