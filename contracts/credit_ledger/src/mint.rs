//! # Mint pipeline
//!
//! A mint request passes through a fixed sequence of gates. The first gate
//! that rejects decides the error returned:
//!
//! 1. circuit breaker        → `Paused`
//! 2. minter role            → `Unauthorized`
//! 3. amount > 0             → `InvalidAmount`
//! 4. recipient ≠ caller     → `InvalidRecipient`
//! 5. metadata length        → `InvalidMetadata`
//! 6. cached verification    → `VerificationFailed`
//! 7. quota reserve          → `CapExceeded`
//! 8. journal append
//!
//! Gates 1–6 are read-only. Gate 7 writes only when it passes and gate 8
//! cannot fail, so a rejected request leaves no trace.
//!
//! A batch runs each entry through the same pipeline with the same caller and
//! stops at the first rejection. Each entry is atomic on its own; entries
//! committed before the rejected one are kept.

use soroban_sdk::{Address, BytesN, Env, String, Vec};

use crate::types::{BatchHalt, BatchOutcome, MintRecord, MintRequest};
use crate::{access, events, journal, quota, verification, Error};

/// Longest metadata accepted on a mint, in bytes.
pub const MAX_METADATA_LEN: u32 = 500;

/// Most entries accepted by one batch.
pub const MAX_BATCH_SIZE: u32 = 5;

/// Run one request through every gate and commit it.
///
/// `caller` must already have passed `require_auth` for this invocation.
pub fn mint(
    env: &Env,
    caller: &Address,
    project_id: u64,
    amount: i128,
    recipient: &Address,
    metadata: &String,
    evidence_hash: &BytesN<32>,
) -> Result<MintRecord, Error> {
    // `mint_credits` has already checked this; batch entries rely on it here.
    access::require_not_paused(env)?;
    access::require_minter(env, caller)?;

    if amount <= 0 {
        return Err(Error::InvalidAmount);
    }
    if recipient == caller {
        return Err(Error::InvalidRecipient);
    }
    if metadata.len() > MAX_METADATA_LEN {
        return Err(Error::InvalidMetadata);
    }
    if !verification::is_verified(env, project_id, evidence_hash) {
        return Err(Error::VerificationFailed);
    }

    quota::reserve(env, project_id, amount)?;

    let record = journal::append(
        env,
        project_id,
        amount,
        recipient.clone(),
        metadata.clone(),
        caller.clone(),
    );

    events::emit_credits_minted(
        env,
        record.mint_id,
        project_id,
        recipient.clone(),
        amount,
        caller.clone(),
    );
    Ok(record)
}

/// Mint every entry in order, halting at the first rejection.
pub fn batch(
    env: &Env,
    caller: &Address,
    entries: &Vec<MintRequest>,
) -> Result<BatchOutcome, Error> {
    if entries.len() > MAX_BATCH_SIZE {
        return Err(Error::BatchTooLarge);
    }

    let mut minted: u32 = 0;
    for (index, entry) in entries.iter().enumerate() {
        let result = mint(
            env,
            caller,
            entry.project_id,
            entry.amount,
            &entry.recipient,
            &entry.metadata,
            &entry.evidence_hash,
        );
        if let Err(err) = result {
            return Ok(BatchOutcome::Halted(BatchHalt {
                index: index as u32,
                code: err as u32,
            }));
        }
        minted += 1;
    }

    Ok(BatchOutcome::Completed(minted))
}
