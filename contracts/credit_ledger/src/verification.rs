//! # Verification cache
//!
//! Results of the off-chain verification oracle, keyed by
//! `(project_id, evidence_hash)`. Minters submit them ahead of minting so the
//! mint path never talks to the oracle.
//!
//! Entries are overwritten unconditionally. A minter can flip an earlier
//! `true` to `false` (or the reverse) for any project, including one whose
//! evidence already backed a mint; minters are trusted with this.

use soroban_sdk::{Address, BytesN, Env, String};

use crate::types::VerificationEntry;
use crate::{access, events, storage, Error};

pub fn cache(
    env: &Env,
    caller: &Address,
    project_id: u64,
    evidence_hash: &BytesN<32>,
    data: String,
    verified: bool,
) -> Result<(), Error> {
    access::require_minter(env, caller)?;

    let entry = VerificationEntry {
        verified,
        data,
        timestamp: env.ledger().timestamp(),
        minter: caller.clone(),
    };
    storage::set_verification(env, project_id, evidence_hash, &entry);

    events::emit_verification_cached(
        env,
        project_id,
        evidence_hash.clone(),
        verified,
        caller.clone(),
    );
    Ok(())
}

/// `false` when nothing has been cached for the key.
pub fn is_verified(env: &Env, project_id: u64, evidence_hash: &BytesN<32>) -> bool {
    storage::get_verification(env, project_id, evidence_hash)
        .map(|entry| entry.verified)
        .unwrap_or(false)
}
