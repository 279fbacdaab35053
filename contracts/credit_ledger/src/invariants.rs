#![allow(dead_code)]

extern crate std;

use crate::{CreditLedgerClient, MintRecord};

/// A project's minted total never exceeds its effective cap, unless an admin
/// lowered the cap below it afterwards (which only blocks further mints).
pub fn assert_within_cap(client: &CreditLedgerClient, project_id: u64) {
    let minted = client.get_project_minted(&project_id);
    let cap = client.get_effective_cap(&project_id);
    assert!(
        minted <= cap,
        "cap breached: project {} minted {} with cap {}",
        project_id,
        minted,
        cap
    );
}

/// Minted totals only grow.
pub fn assert_minted_monotonic(before: i128, after: i128) {
    assert!(
        after >= before,
        "project minted total decreased from {} to {}",
        before,
        after
    );
}

/// Load every journal entry from 1 to the current counter.
///
/// Panics if any id in that range is missing.
pub fn load_journal(client: &CreditLedgerClient) -> std::vec::Vec<MintRecord> {
    let count = client.get_mint_count();
    (1..=count)
        .map(|id| {
            client
                .get_mint_record(&id)
                .unwrap_or_else(|| panic!("journal gap: mint {} missing (counter {})", id, count))
        })
        .collect()
}

/// The grand total equals the sum of the amounts in the journal.
pub fn assert_total_matches_journal(client: &CreditLedgerClient) {
    let journal = load_journal(client);
    let sum: i128 = journal.iter().map(|r| r.amount).sum();
    let total = client.get_total_minted();
    assert_eq!(
        total, sum,
        "total minted {} does not match journal sum {}",
        total, sum
    );
}

/// Mint ids are exactly 1, 2, 3, ... and nothing exists past the counter.
pub fn assert_sequential_ids(client: &CreditLedgerClient) {
    let journal = load_journal(client);
    for (i, record) in journal.iter().enumerate() {
        assert_eq!(
            record.mint_id,
            i as u64 + 1,
            "expected mint id {}, got {}",
            i + 1,
            record.mint_id
        );
    }
    let next = client.get_mint_count() + 1;
    assert!(
        client.get_mint_record(&next).is_none(),
        "record {} exists past the counter",
        next
    );
}

/// No record was issued to the minter that signed it.
pub fn assert_no_self_mint(client: &CreditLedgerClient) {
    for record in load_journal(client) {
        assert_ne!(
            record.recipient, record.issuer,
            "mint {} was issued to its own minter",
            record.mint_id
        );
    }
}

/// Run all journal-wide invariants.
pub fn assert_all_journal_invariants(client: &CreditLedgerClient) {
    assert_total_matches_journal(client);
    assert_sequential_ids(client);
    assert_no_self_mint(client);
}
