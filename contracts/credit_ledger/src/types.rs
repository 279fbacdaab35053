//! # Types
//!
//! Shared data structures used across all modules of the credit ledger.
//!
//! ## Design decisions
//!
//! ### Immutable journal entries
//!
//! A [`MintRecord`] is written exactly once, by the journal, at the end of a
//! successful mint. Nothing in the contract ever loads a record with the
//! intent of writing it back.
//!
//! ### Batch results as values
//!
//! The host rolls back every write of an invocation that returns `Err`. A
//! batch that stops halfway must keep the mints that went through before the
//! rejected entry, so the rejection travels back inside [`BatchOutcome`]
//! instead of as a contract error.

use soroban_sdk::{contracttype, Address, BytesN, String};

/// One entry of the issuance journal.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MintRecord {
    /// Sequential identifier, starting at 1.
    pub mint_id: u64,
    pub project_id: u64,
    pub amount: i128,
    pub recipient: Address,
    /// Free-form description supplied by the minter (bounded length).
    pub metadata: String,
    /// Ledger timestamp at which the mint was committed.
    pub timestamp: u64,
    /// Minter that authorized the issuance.
    pub issuer: Address,
}

/// Cached outcome of an off-chain verification for one piece of evidence.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VerificationEntry {
    pub verified: bool,
    /// Opaque payload returned by the verification oracle.
    pub data: String,
    pub timestamp: u64,
    /// Minter that submitted this result.
    pub minter: Address,
}

/// A single mint request, as submitted inside a batch.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MintRequest {
    pub project_id: u64,
    pub amount: i128,
    pub recipient: Address,
    pub metadata: String,
    pub evidence_hash: BytesN<32>,
}

/// Where a batch stopped.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BatchHalt {
    /// Zero-based position of the rejected entry.
    pub index: u32,
    /// Code of the [`crate::Error`] the entry was rejected with.
    pub code: u32,
}

/// Result of [`crate::CreditLedger::batch_mint`].
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BatchOutcome {
    /// Every entry was minted; carries the number of entries.
    Completed(u32),
    /// An entry was rejected. Entries before it stay committed, entries
    /// after it were never attempted.
    Halted(BatchHalt),
}
