//! # Access control and circuit breaker
//!
//! Two roles exist:
//!
//! | Role   | Holders      | May                                                    |
//! |--------|--------------|--------------------------------------------------------|
//! | Admin  | exactly one  | manage minters, set caps, pause/unpause, hand over admin |
//! | Minter | any number   | cache verifications, mint                              |
//!
//! The admin is not implicitly a minter. Removing a minter keeps its entry
//! with the flag cleared, so it can be re-added later.
//!
//! The pause flag is only consulted by the mint pipeline; every function in
//! this module keeps working while the ledger is paused.

use soroban_sdk::{Address, Env};

use crate::{events, storage, Error};

pub fn is_admin(env: &Env, address: &Address) -> bool {
    storage::get_admin(env).is_some_and(|admin| admin == *address)
}

pub fn is_minter(env: &Env, address: &Address) -> bool {
    storage::is_minter(env, address)
}

pub fn require_admin(env: &Env, caller: &Address) -> Result<(), Error> {
    if !is_admin(env, caller) {
        return Err(Error::Unauthorized);
    }
    Ok(())
}

pub fn require_minter(env: &Env, caller: &Address) -> Result<(), Error> {
    if !is_minter(env, caller) {
        return Err(Error::Unauthorized);
    }
    Ok(())
}

pub fn require_not_paused(env: &Env) -> Result<(), Error> {
    if storage::is_paused(env) {
        return Err(Error::Paused);
    }
    Ok(())
}

/// Record the first admin. Fails once an admin exists.
pub fn init_admin(env: &Env, admin: &Address) -> Result<(), Error> {
    if storage::get_admin(env).is_some() {
        return Err(Error::AlreadyInitialized);
    }
    storage::set_admin(env, admin);
    events::emit_initialized(env, admin.clone());
    Ok(())
}

pub fn add_minter(env: &Env, caller: &Address, minter: &Address) -> Result<(), Error> {
    require_admin(env, caller)?;
    if storage::is_minter(env, minter) {
        return Err(Error::AlreadyActive);
    }
    storage::set_minter(env, minter, true);
    events::emit_minter_added(env, minter.clone(), caller.clone());
    Ok(())
}

/// Idempotent: removing an inactive or unknown minter succeeds.
pub fn remove_minter(env: &Env, caller: &Address, minter: &Address) -> Result<(), Error> {
    require_admin(env, caller)?;
    storage::set_minter(env, minter, false);
    events::emit_minter_removed(env, minter.clone(), caller.clone());
    Ok(())
}

/// Hand the admin role to `new_admin`. Transferring to oneself is a no-op success.
pub fn transfer_admin(env: &Env, caller: &Address, new_admin: &Address) -> Result<(), Error> {
    require_admin(env, caller)?;
    storage::set_admin(env, new_admin);
    events::emit_admin_transferred(env, new_admin.clone(), caller.clone());
    Ok(())
}

pub fn set_paused(env: &Env, caller: &Address, paused: bool) -> Result<(), Error> {
    require_admin(env, caller)?;
    storage::set_paused(env, paused);
    if paused {
        events::emit_paused(env, caller.clone());
    } else {
        events::emit_unpaused(env, caller.clone());
    }
    Ok(())
}
