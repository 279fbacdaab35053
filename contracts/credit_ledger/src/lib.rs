//! # Credit Ledger Contract
//!
//! A capped, authorization-gated issuance ledger. It mints fungible credit
//! units against projects, subject to per-project caps, a cached external
//! verification gate and a global circuit breaker, and keeps an immutable,
//! sequentially numbered journal of every issuance.
//!
//! | Phase          | Entry Point(s)                                            |
//! |----------------|-----------------------------------------------------------|
//! | Bootstrap      | [`CreditLedger::init`]                                    |
//! | Role admin     | `add_minter`, `remove_minter`, `transfer_admin`           |
//! | Circuit breaker| `pause`, `unpause`                                        |
//! | Quotas         | `set_project_cap`                                         |
//! | Verification   | `cache_verification`                                      |
//! | Issuance       | [`CreditLedger::mint_credits`], [`CreditLedger::batch_mint`] |
//! | Queries        | `get_total_minted`, `get_project_minted`, `get_effective_cap`, `get_mint_record`, ... |
//!
//! ## Architecture
//!
//! Authorization lives in [`access`], storage layout in [`storage`], and the
//! issuance gates in [`mint`]. This file holds the public entry points only.
//!
//! Token balances, project metadata and the verification oracle are owned by
//! other contracts; this one records issuance and nothing else.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, Address, BytesN, Env, String, Vec};

mod access;
pub mod events;
mod journal;
mod mint;
mod quota;
mod storage;
mod types;
mod verification;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_batch;
#[cfg(test)]
mod test_events;

pub use mint::{MAX_BATCH_SIZE, MAX_METADATA_LEN};
pub use quota::DEFAULT_PROJECT_CAP;
pub use types::{BatchHalt, BatchOutcome, MintRecord, MintRequest, VerificationEntry};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    Unauthorized       = 1,
    Paused             = 2,
    InvalidAmount      = 3,
    InvalidRecipient   = 4,
    InvalidMetadata    = 5,
    VerificationFailed = 6,
    CapExceeded        = 7,
    AlreadyActive      = 8,
    AlreadyInitialized = 9,
    BatchTooLarge      = 10,
}

impl Error {
    /// Map a code carried by [`BatchHalt`] back to its error.
    pub fn from_code(code: u32) -> Option<Self> {
        let err = match code {
            1 => Self::Unauthorized,
            2 => Self::Paused,
            3 => Self::InvalidAmount,
            4 => Self::InvalidRecipient,
            5 => Self::InvalidMetadata,
            6 => Self::VerificationFailed,
            7 => Self::CapExceeded,
            8 => Self::AlreadyActive,
            9 => Self::AlreadyInitialized,
            10 => Self::BatchTooLarge,
            _ => return None,
        };
        Some(err)
    }
}

#[contract]
pub struct CreditLedger;

#[contractimpl]
impl CreditLedger {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Initialise the contract and set the first admin.
    ///
    /// Must be called exactly once immediately after deployment.
    /// Subsequent calls fail with `Error::AlreadyInitialized`.
    pub fn init(env: Env, admin: Address) -> Result<(), Error> {
        admin.require_auth();
        access::init_admin(&env, &admin)
    }

    // ─────────────────────────────────────────────────────────
    // Role management
    // ─────────────────────────────────────────────────────────

    /// Authorize `minter` to cache verifications and mint.
    ///
    /// - `caller` must be the admin.
    /// - Fails with `AlreadyActive` if `minter` is already authorized.
    pub fn add_minter(env: Env, caller: Address, minter: Address) -> Result<bool, Error> {
        caller.require_auth();
        access::add_minter(&env, &caller, &minter)?;
        Ok(true)
    }

    /// Revoke `minter`. Succeeds even if it was not active.
    pub fn remove_minter(env: Env, caller: Address, minter: Address) -> Result<bool, Error> {
        caller.require_auth();
        access::remove_minter(&env, &caller, &minter)?;
        Ok(true)
    }

    /// Hand the admin role to `new_admin`. The caller loses it immediately.
    pub fn transfer_admin(env: Env, caller: Address, new_admin: Address) -> Result<bool, Error> {
        caller.require_auth();
        access::transfer_admin(&env, &caller, &new_admin)?;
        Ok(true)
    }

    pub fn get_admin(env: Env) -> Option<Address> {
        storage::get_admin(&env)
    }

    pub fn is_admin(env: Env, address: Address) -> bool {
        access::is_admin(&env, &address)
    }

    pub fn is_minter(env: Env, address: Address) -> bool {
        access::is_minter(&env, &address)
    }

    // ─────────────────────────────────────────────────────────
    // Emergency control
    // ─────────────────────────────────────────────────────────

    /// Halt all minting. Administration and reads stay available.
    pub fn pause(env: Env, caller: Address) -> Result<bool, Error> {
        caller.require_auth();
        access::set_paused(&env, &caller, true)?;
        Ok(true)
    }

    pub fn unpause(env: Env, caller: Address) -> Result<bool, Error> {
        caller.require_auth();
        access::set_paused(&env, &caller, false)?;
        Ok(true)
    }

    pub fn is_paused(env: Env) -> bool {
        storage::is_paused(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Quotas
    // ─────────────────────────────────────────────────────────

    /// Set the cap for `project_id`.
    ///
    /// No check against what was already minted: a cap below current usage
    /// blocks further minting for the project until it is raised.
    pub fn set_project_cap(
        env: Env,
        caller: Address,
        project_id: u64,
        cap: i128,
    ) -> Result<bool, Error> {
        caller.require_auth();
        quota::set_cap(&env, &caller, project_id, cap)?;
        Ok(true)
    }

    pub fn get_effective_cap(env: Env, project_id: u64) -> i128 {
        quota::effective_cap(&env, project_id)
    }

    pub fn get_project_minted(env: Env, project_id: u64) -> i128 {
        quota::minted(&env, project_id)
    }

    // ─────────────────────────────────────────────────────────
    // Verification cache
    // ─────────────────────────────────────────────────────────

    /// Record the oracle's verdict for `(project_id, evidence_hash)`.
    ///
    /// `caller` must be an active minter. Any previous entry for the key is
    /// replaced.
    pub fn cache_verification(
        env: Env,
        caller: Address,
        project_id: u64,
        evidence_hash: BytesN<32>,
        data: String,
        verified: bool,
    ) -> Result<bool, Error> {
        caller.require_auth();
        verification::cache(&env, &caller, project_id, &evidence_hash, data, verified)?;
        Ok(true)
    }

    pub fn get_verification_status(env: Env, project_id: u64, evidence_hash: BytesN<32>) -> bool {
        verification::is_verified(&env, project_id, &evidence_hash)
    }

    pub fn get_verification(
        env: Env,
        project_id: u64,
        evidence_hash: BytesN<32>,
    ) -> Option<VerificationEntry> {
        storage::get_verification(&env, project_id, &evidence_hash)
    }

    // ─────────────────────────────────────────────────────────
    // Issuance
    // ─────────────────────────────────────────────────────────

    /// Mint `amount` credits for `project_id` to `recipient`.
    ///
    /// The new record is readable through `get_mint_record(get_mint_count())`.
    /// See [`mint`] for the order in which the gates are checked.
    pub fn mint_credits(
        env: Env,
        caller: Address,
        project_id: u64,
        amount: i128,
        recipient: Address,
        metadata: String,
        evidence_hash: BytesN<32>,
    ) -> Result<bool, Error> {
        // The breaker is the first gate, ahead of signature checks. `mint`
        // checks it again for the batch path; the repeat is one instance read.
        access::require_not_paused(&env)?;
        caller.require_auth();
        mint::mint(
            &env,
            &caller,
            project_id,
            amount,
            &recipient,
            &metadata,
            &evidence_hash,
        )?;
        Ok(true)
    }

    /// Mint up to [`MAX_BATCH_SIZE`] requests in order with the same caller.
    ///
    /// Returns `Completed(n)` when every entry minted. On the first rejected
    /// entry returns `Halted` with its index and error code; the entries
    /// before it stay minted and the ones after it are skipped.
    pub fn batch_mint(
        env: Env,
        caller: Address,
        entries: Vec<MintRequest>,
    ) -> Result<BatchOutcome, Error> {
        caller.require_auth();
        mint::batch(&env, &caller, &entries)
    }

    // ─────────────────────────────────────────────────────────
    // Journal queries
    // ─────────────────────────────────────────────────────────

    pub fn get_mint_record(env: Env, mint_id: u64) -> Option<MintRecord> {
        journal::get(&env, mint_id)
    }

    pub fn get_total_minted(env: Env) -> i128 {
        journal::total_minted(&env)
    }

    /// Last assigned mint id; `0` before the first mint.
    pub fn get_mint_count(env: Env) -> u64 {
        journal::mint_count(&env)
    }
}
