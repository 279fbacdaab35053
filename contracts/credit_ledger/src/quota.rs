//! # Quota ledger
//!
//! Per-project caps and cumulative minted totals.
//!
//! A project without an explicit cap uses [`DEFAULT_PROJECT_CAP`]. An admin may
//! set a cap below what was already minted; the project is then blocked until
//! the cap is raised again. Minted totals only ever grow. A negative cap is
//! stored as 0, which blocks the project the same way.

use soroban_sdk::{Address, Env};

use crate::{access, events, storage, Error};

/// Cap applied to projects that were never given one explicitly.
pub const DEFAULT_PROJECT_CAP: i128 = 1_000_000;

pub fn effective_cap(env: &Env, project_id: u64) -> i128 {
    storage::get_project_cap(env, project_id).unwrap_or(DEFAULT_PROJECT_CAP)
}

pub fn minted(env: &Env, project_id: u64) -> i128 {
    storage::get_project_minted(env, project_id)
}

pub fn set_cap(env: &Env, caller: &Address, project_id: u64, cap: i128) -> Result<(), Error> {
    access::require_admin(env, caller)?;
    let cap = cap.max(0);
    storage::set_project_cap(env, project_id, cap);
    events::emit_cap_updated(env, project_id, cap, caller.clone());
    Ok(())
}

/// Check `amount` against the remaining headroom and commit it in one step.
///
/// Nothing is written when the check fails.
pub fn reserve(env: &Env, project_id: u64, amount: i128) -> Result<(), Error> {
    let current = minted(env, project_id);
    let next = current.checked_add(amount).ok_or(Error::CapExceeded)?;
    if next > effective_cap(env, project_id) {
        return Err(Error::CapExceeded);
    }
    storage::set_project_minted(env, project_id, next);
    Ok(())
}
