//! Canonical event types emitted by the credit ledger contract.
//!
//! These mirror the Soroban contract events defined in
//! `contracts/credit_ledger/src/events.rs`.

use serde::{Deserialize, Serialize};

/// All recognised event kinds from the credit ledger contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// The contract was initialised with its first admin (`init` topic).
    Initialized,
    /// Credits were issued (`minted` topic).
    CreditsMinted,
    /// A minter cached a verification result (`verified` topic).
    VerificationCached,
    /// An admin set a project cap (`cap_set` topic).
    CapUpdated,
    /// A minter was authorized (`mntr_add` topic).
    MinterAdded,
    /// A minter was revoked (`mntr_del` topic).
    MinterRemoved,
    /// The admin role changed hands (`admin_set` topic).
    AdminTransferred,
    /// Minting was halted (`paused` topic).
    LedgerPaused,
    /// Minting was resumed (`unpaused` topic).
    LedgerUnpaused,
    /// An event from this contract that we don't recognise yet.
    Unknown,
}

impl EventKind {
    /// Parse the leading topic symbol string produced by Soroban into an [`EventKind`].
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "init" => Self::Initialized,
            "minted" => Self::CreditsMinted,
            "verified" => Self::VerificationCached,
            "cap_set" => Self::CapUpdated,
            "mntr_add" => Self::MinterAdded,
            "mntr_del" => Self::MinterRemoved,
            "admin_set" => Self::AdminTransferred,
            "paused" => Self::LedgerPaused,
            "unpaused" => Self::LedgerUnpaused,
            _ => Self::Unknown,
        }
    }

    /// Return a short identifier string suitable for storage in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initialized => "initialized",
            Self::CreditsMinted => "credits_minted",
            Self::VerificationCached => "verification_cached",
            Self::CapUpdated => "cap_updated",
            Self::MinterAdded => "minter_added",
            Self::MinterRemoved => "minter_removed",
            Self::AdminTransferred => "admin_transferred",
            Self::LedgerPaused => "ledger_paused",
            Self::LedgerUnpaused => "ledger_unpaused",
            Self::Unknown => "unknown",
        }
    }

    /// Events whose second topic is a project id rather than an address.
    pub fn is_project_scoped(&self) -> bool {
        matches!(
            self,
            Self::CreditsMinted | Self::VerificationCached | Self::CapUpdated
        )
    }
}

/// A fully decoded ledger event, ready to be stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEvent {
    /// RPC-assigned event id; the idempotency key on insert.
    pub event_id: String,
    pub event_type: String,
    pub project_id: Option<String>,
    pub mint_id: Option<i64>,
    /// Identity that performed the action (minter, admin).
    pub actor: Option<String>,
    /// Identity acted upon (recipient, minter, new admin).
    pub target: Option<String>,
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
}

/// A raw event record as stored in / read from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_id: String,
    pub event_type: String,
    pub project_id: Option<String>,
    pub mint_id: Option<i64>,
    pub actor: Option<String>,
    pub target: Option<String>,
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}
