//! # Storage
//!
//! Provides typed helpers over Soroban's two storage tiers used by the ledger:
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key           | Type      | Description                              |
//! |---------------|-----------|------------------------------------------|
//! | `Admin`       | `Address` | Current administrator                    |
//! | `Paused`      | `bool`    | Circuit breaker flag                     |
//! | `MintCounter` | `u64`     | Last assigned mint id                    |
//! | `TotalMinted` | `i128`    | Sum of every recorded mint amount        |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                          | Type                | Description                    |
//! |------------------------------|---------------------|--------------------------------|
//! | `Minter(addr)`               | `bool`              | Minter active flag             |
//! | `ProjectCap(id)`             | `i128`              | Explicit per-project cap       |
//! | `ProjectMinted(id)`          | `i128`              | Cumulative minted per project  |
//! | `Verification(id, hash)`     | `VerificationEntry` | Cached verification result     |
//! | `Mint(mint_id)`              | `MintRecord`        | Immutable journal entry        |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.
//! Only keys that exist are bumped; absent keys fall back to their defaults.

use soroban_sdk::{contracttype, Address, BytesN, Env};

use crate::types::{MintRecord, VerificationEntry};

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

/// All contract storage keys.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Current administrator (Instance).
    Admin,
    /// Circuit breaker flag (Instance).
    Paused,
    /// Last assigned mint id (Instance).
    MintCounter,
    /// Running grand total across all projects (Instance).
    TotalMinted,
    /// Minter active flag keyed by address (Persistent).
    Minter(Address),
    /// Explicit cap keyed by project id (Persistent).
    ProjectCap(u64),
    /// Cumulative minted amount keyed by project id (Persistent).
    ProjectMinted(u64),
    /// Verification result keyed by (project id, evidence hash) (Persistent).
    Verification(u64, BytesN<32>),
    /// Journal entry keyed by mint id (Persistent).
    Mint(u64),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

/// Extend instance storage TTL if it falls below the threshold.
fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn get_admin(env: &Env) -> Option<Address> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::Admin)
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
    bump_instance(env);
}

pub fn is_paused(env: &Env) -> bool {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Paused)
        .unwrap_or(false)
}

pub fn set_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&DataKey::Paused, &paused);
    bump_instance(env);
}

/// Last assigned mint id, `0` before the first mint.
pub fn get_mint_counter(env: &Env) -> u64 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::MintCounter)
        .unwrap_or(0)
}

pub fn get_total_minted(env: &Env) -> i128 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::TotalMinted)
        .unwrap_or(0)
}

/// Store the counter and the grand total together; both move on every mint.
pub fn set_counters(env: &Env, mint_counter: u64, total_minted: i128) {
    env.storage()
        .instance()
        .set(&DataKey::MintCounter, &mint_counter);
    env.storage()
        .instance()
        .set(&DataKey::TotalMinted, &total_minted);
    bump_instance(env);
}

// ── Persistent Storage Helpers ───────────────────────────────────────

/// Extend the TTL for a persistent storage key.
fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Read a persistent entry, bumping its TTL only when it exists.
fn read_persistent<V>(env: &Env, key: &DataKey) -> Option<V>
where
    V: soroban_sdk::TryFromVal<Env, soroban_sdk::Val>,
{
    let value: Option<V> = env.storage().persistent().get(key);
    if value.is_some() {
        bump_persistent(env, key);
    }
    value
}

fn write_persistent<V>(env: &Env, key: &DataKey, value: &V)
where
    V: soroban_sdk::IntoVal<Env, soroban_sdk::Val>,
{
    env.storage().persistent().set(key, value);
    bump_persistent(env, key);
}

/// An address with no entry is an inactive minter.
pub fn is_minter(env: &Env, address: &Address) -> bool {
    read_persistent(env, &DataKey::Minter(address.clone())).unwrap_or(false)
}

pub fn set_minter(env: &Env, address: &Address, active: bool) {
    write_persistent(env, &DataKey::Minter(address.clone()), &active);
}

/// Explicit cap for `project_id`, if an admin ever set one.
pub fn get_project_cap(env: &Env, project_id: u64) -> Option<i128> {
    read_persistent(env, &DataKey::ProjectCap(project_id))
}

pub fn set_project_cap(env: &Env, project_id: u64, cap: i128) {
    write_persistent(env, &DataKey::ProjectCap(project_id), &cap);
}

pub fn get_project_minted(env: &Env, project_id: u64) -> i128 {
    read_persistent(env, &DataKey::ProjectMinted(project_id)).unwrap_or(0)
}

pub fn set_project_minted(env: &Env, project_id: u64, minted: i128) {
    write_persistent(env, &DataKey::ProjectMinted(project_id), &minted);
}

pub fn get_verification(
    env: &Env,
    project_id: u64,
    evidence_hash: &BytesN<32>,
) -> Option<VerificationEntry> {
    read_persistent(env, &DataKey::Verification(project_id, evidence_hash.clone()))
}

pub fn set_verification(
    env: &Env,
    project_id: u64,
    evidence_hash: &BytesN<32>,
    entry: &VerificationEntry,
) {
    write_persistent(
        env,
        &DataKey::Verification(project_id, evidence_hash.clone()),
        entry,
    );
}

pub fn get_mint_record(env: &Env, mint_id: u64) -> Option<MintRecord> {
    read_persistent(env, &DataKey::Mint(mint_id))
}

/// Write a journal entry. Callers guarantee `record.mint_id` is fresh.
pub fn save_mint_record(env: &Env, record: &MintRecord) {
    write_persistent(env, &DataKey::Mint(record.mint_id), record);
}
