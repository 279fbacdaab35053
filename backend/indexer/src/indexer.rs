//! Background task that follows the ledger's event stream.
//!
//! Besides the RPC ledger/cursor position, the indexer tracks the mint
//! journal's high-water mark. The contract assigns mint ids 1, 2, 3, ... with
//! no holes, so any jump in the ids we receive means events were missed
//! (pruned by the RPC's retention window, or skipped by a bad cursor). Gaps are
//! logged; the mark always moves to the highest id seen so a gap is reported
//! once.

use std::ops::RangeInclusive;
use std::time::Duration;

use reqwest::Client;
use sqlx::SqlitePool;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::db::{self, ResumePoint};
use crate::errors::Result;
use crate::events::{EventKind, LedgerEvent};
use crate::rpc;

/// Highest mint id observed, and the gap detection built on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MintWatermark {
    last: i64,
}

impl MintWatermark {
    pub fn new(last: i64) -> Self {
        Self { last }
    }

    pub fn last(&self) -> i64 {
        self.last
    }

    /// Advance past `ids` and return the id ranges that were skipped.
    ///
    /// Ids at or below the mark are replays of already-indexed mints and are
    /// ignored.
    pub fn observe<I>(&mut self, ids: I) -> Vec<RangeInclusive<i64>>
    where
        I: IntoIterator<Item = i64>,
    {
        let mut fresh: Vec<i64> = ids.into_iter().filter(|&id| id > self.last).collect();
        fresh.sort_unstable();
        fresh.dedup();

        let mut gaps = Vec::new();
        for id in fresh {
            if id > self.last + 1 {
                gaps.push(self.last + 1..=id - 1);
            }
            self.last = id;
        }
        gaps
    }
}

pub struct Indexer {
    pool: SqlitePool,
    config: Config,
    client: Client,
    ledger: u32,
    cursor: Option<String>,
    mints: MintWatermark,
}

/// What a single poll did, for logging.
#[derive(Debug, Default)]
struct PollSummary {
    fetched: usize,
    stored: usize,
    mints: usize,
}

impl Indexer {
    /// Load the persisted resume point. A database failure here is reported
    /// instead of silently restarting from `START_LEDGER`.
    pub async fn resume(pool: SqlitePool, config: Config, client: Client) -> Result<Self> {
        let point = db::load_resume_point(&pool).await?;

        let ledger = if point.last_ledger > 0 {
            point.last_ledger as u32
        } else {
            config.start_ledger
        };

        info!(
            contract = %config.contract_id,
            ledger,
            last_mint_id = point.last_mint_id,
            "Indexer resuming"
        );

        Ok(Self {
            pool,
            config,
            client,
            ledger,
            cursor: point.last_cursor,
            mints: MintWatermark::new(point.last_mint_id),
        })
    }

    pub fn ledger(&self) -> u32 {
        self.ledger
    }

    pub fn last_mint_id(&self) -> i64 {
        self.mints.last()
    }

    /// Poll forever. Failed polls are logged and retried on the next tick;
    /// the in-memory position only moves once it has been persisted.
    pub async fn run(mut self) {
        loop {
            match self.poll_once().await {
                Ok(summary) if summary.fetched > 0 => info!(
                    "Polled {} raw events → {} new records stored ({} mints, journal at #{})",
                    summary.fetched,
                    summary.stored,
                    summary.mints,
                    self.mints.last()
                ),
                Ok(_) => {}
                Err(e) => error!("Indexer poll error: {e}"),
            }

            tokio::time::sleep(Duration::from_secs(self.config.poll_interval_secs)).await;
        }
    }

    async fn poll_once(&mut self) -> Result<PollSummary> {
        let (raw_events, next_cursor, latest_ledger) = rpc::fetch_events(
            &self.client,
            &self.config.rpc_url,
            &self.config.contract_id,
            self.ledger,
            self.cursor.as_deref(),
            self.config.events_per_page,
        )
        .await?;

        let decoded = rpc::decode_events(&raw_events, &self.config.contract_id);
        let stored = db::insert_events(&self.pool, &decoded).await?;

        let mut mints = self.mints;
        let mint_ids = mint_ids(&decoded);
        let minted = mint_ids.len();
        for gap in mints.observe(mint_ids) {
            warn!(
                from = gap.start(),
                to = gap.end(),
                "Mint journal gap: events for these mint ids were never indexed"
            );
        }

        // Stay on the same start ledger while paginating with a cursor,
        // otherwise move up to the latest ledger the RPC reported.
        let next_ledger = latest_ledger
            .map(|l| (l as u32).max(self.ledger))
            .unwrap_or(self.ledger);

        db::save_resume_point(
            &self.pool,
            &ResumePoint {
                last_ledger: next_ledger as i64,
                last_cursor: next_cursor.clone(),
                last_mint_id: mints.last(),
            },
        )
        .await?;

        self.ledger = next_ledger;
        self.cursor = next_cursor;
        self.mints = mints;

        Ok(PollSummary {
            fetched: raw_events.len(),
            stored,
            mints: minted,
        })
    }
}

fn mint_ids(events: &[LedgerEvent]) -> Vec<i64> {
    events
        .iter()
        .filter(|e| e.event_type == EventKind::CreditsMinted.as_str())
        .filter_map(|e| e.mint_id)
        .collect()
}
