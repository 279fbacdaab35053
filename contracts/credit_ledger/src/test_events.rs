extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    vec, Address, BytesN, Env, IntoVal, String, TryIntoVal,
};

use crate::events::{CapUpdated, CreditsMinted, VerificationCached};
use crate::{CreditLedger, CreditLedgerClient};

fn setup_with_minter() -> (Env, CreditLedgerClient<'static>, Address, Address) {
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

#[test]
fn test_credits_minted_event() {
    let (env, client, _admin, minter) = setup_with_minter();
    let recipient = Address::generate(&env);
    let hash = BytesN::from_array(&env, &[0xabu8; 32]);
    client.cache_verification(&minter, &7, &hash, &String::from_str(&env, "ok"), &true);

    client.mint_credits(&minter, &7, &1_500, &recipient, &String::from_str(&env, "m"), &hash);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("minted"), project_id)
    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("minted").into_val(&env),
        7u64.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: CreditsMinted = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        CreditsMinted {
            mint_id: 1,
            project_id: 7,
            recipient: recipient.clone(),
            amount: 1_500,
            issuer: minter.clone(),
        }
    );
}

#[test]
fn test_verification_cached_event() {
    let (env, client, _admin, minter) = setup_with_minter();
    let hash = BytesN::from_array(&env, &[0x01u8; 32]);

    client.cache_verification(&minter, &3, &hash, &String::from_str(&env, "no"), &false);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![
        &env,
        symbol_short!("verified").into_val(&env),
        3u64.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: VerificationCached = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        VerificationCached {
            project_id: 3,
            evidence_hash: hash.clone(),
            verified: false,
            minter: minter.clone(),
        }
    );
}

#[test]
fn test_cap_updated_event() {
    let (env, client, admin, _minter) = setup_with_minter();

    client.set_project_cap(&admin, &9, &42_000);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![
        &env,
        symbol_short!("cap_set").into_val(&env),
        9u64.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: CapUpdated = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        CapUpdated {
            project_id: 9,
            cap: 42_000,
            admin: admin.clone(),
        }
    );
}

#[test]
fn test_minter_added_event() {
    let (env, client, admin, _minter) = setup_with_minter();
    let second = Address::generate(&env);

    client.add_minter(&admin, &second);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![
        &env,
        symbol_short!("mntr_add").into_val(&env),
        second.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let by: Address = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(by, admin);
}

#[test]
fn test_minter_removed_event() {
    let (env, client, admin, minter) = setup_with_minter();

    client.remove_minter(&admin, &minter);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![
        &env,
        symbol_short!("mntr_del").into_val(&env),
        minter.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);
}

#[test]
fn test_admin_transferred_event() {
    let (env, client, admin, _minter) = setup_with_minter();
    let next = Address::generate(&env);

    client.transfer_admin(&admin, &next);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![
        &env,
        symbol_short!("admin_set").into_val(&env),
        next.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let previous: Address = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(previous, admin);
}

#[test]
fn test_pause_events() {
    let (env, client, admin, _minter) = setup_with_minter();

    client.pause(&admin);
    let last_event = env.events().all().last().expect("No events found");
    assert_eq!(
        last_event.1,
        vec![&env, symbol_short!("paused").into_val(&env)]
    );

    client.unpause(&admin);
    let last_event = env.events().all().last().expect("No events found");
    assert_eq!(
        last_event.1,
        vec![&env, symbol_short!("unpaused").into_val(&env)]
    );
    let by: Address = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(by, admin);
}
