//! # Mint journal
//!
//! Append-only record of every successful mint. Ids start at 1 and grow by one
//! per append; `TotalMinted` always equals the sum of the recorded amounts.

use soroban_sdk::{Address, Env, String};

use crate::storage;
use crate::types::MintRecord;

/// Assign the next mint id, store the record and advance the counters.
///
/// Only called once every upstream check has passed, so it cannot fail.
pub fn append(
    env: &Env,
    project_id: u64,
    amount: i128,
    recipient: Address,
    metadata: String,
    issuer: Address,
) -> MintRecord {
    let mint_id = storage::get_mint_counter(env) + 1;
    // Bounded by the sum of project caps, each of which already fit in i128.
    let total = storage::get_total_minted(env).saturating_add(amount);

    let record = MintRecord {
        mint_id,
        project_id,
        amount,
        recipient,
        metadata,
        timestamp: env.ledger().timestamp(),
        issuer,
    };

    storage::save_mint_record(env, &record);
    storage::set_counters(env, mint_id, total);
    record
}

pub fn get(env: &Env, mint_id: u64) -> Option<MintRecord> {
    storage::get_mint_record(env, mint_id)
}

pub fn total_minted(env: &Env) -> i128 {
    storage::get_total_minted(env)
}

pub fn mint_count(env: &Env) -> u64 {
    storage::get_mint_counter(env)
}
