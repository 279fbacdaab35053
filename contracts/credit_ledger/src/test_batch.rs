extern crate std;

use soroban_sdk::{testutils::Address as _, vec, Address, BytesN, Env, String, Vec};

use crate::invariants::{assert_all_journal_invariants, assert_within_cap};
use crate::{
    BatchHalt, BatchOutcome, CreditLedger, CreditLedgerClient, Error, MintRequest, MAX_BATCH_SIZE,
};

fn setup() -> (Env, CreditLedgerClient<'static>, Address, Address) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(CreditLedger, ());
    let client = CreditLedgerClient::new(&env, &contract_id);
    let admin = Address::generate(&env);
    let minter = Address::generate(&env);
    client.init(&admin);
    client.add_minter(&admin, &minter);
    (env, client, admin, minter)
}

fn evidence(env: &Env) -> BytesN<32> {
    BytesN::from_array(env, &[0xabu8; 32])
}

fn request(env: &Env, project_id: u64, amount: i128, recipient: &Address) -> MintRequest {
    MintRequest {
        project_id,
        amount,
        recipient: recipient.clone(),
        metadata: String::from_str(env, "batch"),
        evidence_hash: evidence(env),
    }
}

fn halted(index: u32, err: Error) -> BatchOutcome {
    BatchOutcome::Halted(BatchHalt {
        index,
        code: err as u32,
    })
}

#[test]
fn test_batch_mints_every_entry() {
    let (env, client, _admin, minter) = setup();
    let alice = Address::generate(&env);
    let bob = Address::generate(&env);
    client.cache_verification(&minter, &1, &evidence(&env), &String::from_str(&env, "ok"), &true);
    client.cache_verification(&minter, &2, &evidence(&env), &String::from_str(&env, "ok"), &true);

    let entries = vec![
        &env,
        request(&env, 1, 100, &alice),
        request(&env, 2, 200, &bob),
        request(&env, 1, 300, &bob),
    ];

    assert_eq!(client.batch_mint(&minter, &entries), BatchOutcome::Completed(3));
    assert_eq!(client.get_mint_count(), 3);
    assert_eq!(client.get_project_minted(&1), 400);
    assert_eq!(client.get_project_minted(&2), 200);
    assert_eq!(client.get_total_minted(), 600);

    // Entries are applied in submission order.
    assert_eq!(client.get_mint_record(&1).unwrap().recipient, alice);
    assert_eq!(client.get_mint_record(&2).unwrap().project_id, 2);
    assert_eq!(client.get_mint_record(&3).unwrap().amount, 300);
    assert_all_journal_invariants(&client);
}

#[test]
fn test_empty_batch_completes_with_zero() {
    let (env, client, _admin, minter) = setup();
    let entries: Vec<MintRequest> = Vec::new(&env);
    assert_eq!(client.batch_mint(&minter, &entries), BatchOutcome::Completed(0));
    assert_eq!(client.get_mint_count(), 0);
}

#[test]
fn test_batch_keeps_entries_before_rejection() {
    let (env, client, _admin, minter) = setup();
    let user = Address::generate(&env);
    client.cache_verification(&minter, &1, &evidence(&env), &String::from_str(&env, "ok"), &true);

    let entries = vec![
        &env,
        request(&env, 1, 10, &user),
        request(&env, 1, 20, &user),
        request(&env, 1, 30, &user),
        // Self-mint.
        request(&env, 1, 40, &minter),
    ];

    assert_eq!(
        client.batch_mint(&minter, &entries),
        halted(3, Error::InvalidRecipient)
    );
    assert_eq!(client.get_mint_count(), 3);
    assert_eq!(client.get_project_minted(&1), 60);
    assert_eq!(client.get_total_minted(), 60);
    for id in 1..=3u64 {
        assert_eq!(client.get_mint_record(&id).unwrap().amount, id as i128 * 10);
    }
    assert_eq!(client.get_mint_record(&4), None);
    assert_all_journal_invariants(&client);
}

#[test]
fn test_batch_skips_entries_after_rejection() {
    let (env, client, _admin, minter) = setup();
    let user = Address::generate(&env);
    client.cache_verification(&minter, &1, &evidence(&env), &String::from_str(&env, "ok"), &true);

    let entries = vec![
        &env,
        request(&env, 1, 10, &user),
        // Project 2 has no verification for this hash.
        request(&env, 2, 10, &user),
        request(&env, 1, 10, &user),
    ];

    assert_eq!(
        client.batch_mint(&minter, &entries),
        halted(1, Error::VerificationFailed)
    );
    assert_eq!(client.get_mint_count(), 1);
    assert_eq!(client.get_project_minted(&1), 10);
    assert_eq!(client.get_project_minted(&2), 0);
}

#[test]
fn test_batch_cap_applies_cumulatively() {
    let (env, client, admin, minter) = setup();
    let user = Address::generate(&env);
    client.cache_verification(&minter, &1, &evidence(&env), &String::from_str(&env, "ok"), &true);
    client.set_project_cap(&admin, &1, &250);

    let entries = vec![
        &env,
        request(&env, 1, 100, &user),
        request(&env, 1, 100, &user),
        request(&env, 1, 100, &user),
    ];

    assert_eq!(
        client.batch_mint(&minter, &entries),
        halted(2, Error::CapExceeded)
    );
    assert_eq!(client.get_project_minted(&1), 200);
    assert_within_cap(&client, 1);
}

#[test]
fn test_batch_reports_verification_before_cap() {
    let (env, client, admin, minter) = setup();
    let user = Address::generate(&env);
    client.cache_verification(&minter, &1, &evidence(&env), &String::from_str(&env, "ok"), &true);
    client.set_project_cap(&admin, &2, &50);

    // Project 2 has no cached verification and 60 overshoots its cap.
    let entries = vec![
        &env,
        request(&env, 1, 10, &user),
        request(&env, 2, 60, &user),
    ];

    assert_eq!(
        client.batch_mint(&minter, &entries),
        halted(1, Error::VerificationFailed)
    );
    assert_eq!(client.get_project_minted(&1), 10);
    assert_eq!(client.get_project_minted(&2), 0);
    assert_all_journal_invariants(&client);
}

#[test]
fn test_batch_from_non_minter_halts_at_first_entry() {
    let (env, client, admin, _minter) = setup();
    let user = Address::generate(&env);
    let entries = vec![&env, request(&env, 1, 10, &user)];

    let outcome = client.batch_mint(&admin, &entries);
    assert_eq!(outcome, halted(0, Error::Unauthorized));
    assert_eq!(client.get_mint_count(), 0);
}

#[test]
fn test_batch_while_paused_halts_at_first_entry() {
    let (env, client, admin, minter) = setup();
    let user = Address::generate(&env);
    client.cache_verification(&minter, &1, &evidence(&env), &String::from_str(&env, "ok"), &true);
    client.pause(&admin);

    let entries = vec![&env, request(&env, 1, 10, &user), request(&env, 1, 10, &user)];
    match client.batch_mint(&minter, &entries) {
        BatchOutcome::Halted(halt) => {
            assert_eq!(halt.index, 0);
            assert_eq!(Error::from_code(halt.code), Some(Error::Paused));
        }
        other => panic!("expected a halted batch, got {:?}", other),
    }
    assert_eq!(client.get_mint_count(), 0);
}

#[test]
fn test_oversized_batch_rejected() {
    let (env, client, _admin, minter) = setup();
    let user = Address::generate(&env);
    client.cache_verification(&minter, &1, &evidence(&env), &String::from_str(&env, "ok"), &true);

    let mut entries = Vec::new(&env);
    for _ in 0..=MAX_BATCH_SIZE {
        entries.push_back(request(&env, 1, 1, &user));
    }

    assert_eq!(
        client.try_batch_mint(&minter, &entries),
        Err(Ok(Error::BatchTooLarge))
    );
    assert_eq!(client.get_mint_count(), 0);

    entries.pop_back();
    assert_eq!(
        client.batch_mint(&minter, &entries),
        BatchOutcome::Completed(MAX_BATCH_SIZE)
    );
}
