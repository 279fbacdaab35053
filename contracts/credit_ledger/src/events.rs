//! # Events
//!
//! Every successful state change publishes exactly one event after its write.
//! The off-chain indexer (`backend/indexer`) keys on the leading topic symbol,
//! so the symbols below are part of the contract's public interface.
//!
//! | Topic       | Second topic | Data                  |
//! |-------------|--------------|-----------------------|
//! | `init`      | —            | admin `Address`       |
//! | `minted`    | project id   | [`CreditsMinted`]     |
//! | `verified`  | project id   | [`VerificationCached`]|
//! | `cap_set`   | project id   | [`CapUpdated`]        |
//! | `mntr_add`  | minter       | admin `Address`       |
//! | `mntr_del`  | minter       | admin `Address`       |
//! | `admin_set` | new admin    | previous admin        |
//! | `paused`    | —            | admin `Address`       |
//! | `unpaused`  | —            | admin `Address`       |

use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CreditsMinted {
    pub mint_id: u64,
    pub project_id: u64,
    pub recipient: Address,
    pub amount: i128,
    pub issuer: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VerificationCached {
    pub project_id: u64,
    pub evidence_hash: BytesN<32>,
    pub verified: bool,
    pub minter: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CapUpdated {
    pub project_id: u64,
    pub cap: i128,
    pub admin: Address,
}

pub fn emit_initialized(env: &Env, admin: Address) {
    env.events().publish((symbol_short!("init"),), admin);
}

pub fn emit_credits_minted(
    env: &Env,
    mint_id: u64,
    project_id: u64,
    recipient: Address,
    amount: i128,
    issuer: Address,
) {
    let topics = (symbol_short!("minted"), project_id);
    let data = CreditsMinted {
        mint_id,
        project_id,
        recipient,
        amount,
        issuer,
    };
    env.events().publish(topics, data);
}

pub fn emit_verification_cached(
    env: &Env,
    project_id: u64,
    evidence_hash: BytesN<32>,
    verified: bool,
    minter: Address,
) {
    let topics = (symbol_short!("verified"), project_id);
    let data = VerificationCached {
        project_id,
        evidence_hash,
        verified,
        minter,
    };
    env.events().publish(topics, data);
}

pub fn emit_cap_updated(env: &Env, project_id: u64, cap: i128, admin: Address) {
    let topics = (symbol_short!("cap_set"), project_id);
    let data = CapUpdated {
        project_id,
        cap,
        admin,
    };
    env.events().publish(topics, data);
}

pub fn emit_minter_added(env: &Env, minter: Address, admin: Address) {
    env.events()
        .publish((symbol_short!("mntr_add"), minter), admin);
}

pub fn emit_minter_removed(env: &Env, minter: Address, admin: Address) {
    env.events()
        .publish((symbol_short!("mntr_del"), minter), admin);
}

pub fn emit_admin_transferred(env: &Env, new_admin: Address, previous_admin: Address) {
    env.events()
        .publish((symbol_short!("admin_set"), new_admin), previous_admin);
}

pub fn emit_paused(env: &Env, admin: Address) {
    env.events().publish((symbol_short!("paused"),), admin);
}

pub fn emit_unpaused(env: &Env, admin: Address) {
    env.events().publish((symbol_short!("unpaused"),), admin);
}
