//! Integration tests for loanchain-vault
//!
//! These tests verify the save/load cycle against a real directory.

use chrono::{NaiveDate, TimeZone, Utc};
use loanchain_domain::traits::DealVault;
use loanchain_domain::{
    Agreement, AgreementId, Covenant, CovenantStatus, Deal, DealRecord, Participant,
    ParticipantRole,
};
use loanchain_vault::DirectoryVault;

fn record(borrower: &str, saved_millis: i64) -> DealRecord {
    let agreement = Agreement {
        id: AgreementId::new(),
        name: format!("{} - Credit Agreement", borrower),
        borrower: borrower.to_string(),
        facility_amount: 50_000_000,
        interest_type: "SOFR + 350bps".to_string(),
        maturity_date: NaiveDate::from_ymd_opt(2030, 12, 31).unwrap(),
        upload_date: Utc.timestamp_millis_opt(saved_millis).unwrap(),
        parsed: true,
    };
    DealRecord {
        deal: Deal {
            agreement,
            covenants: vec![Covenant::financial(
                "c1",
                "Leverage Ratio",
                4.0,
                3.8,
                CovenantStatus::Healthy,
            )],
            participants: vec![Participant {
                id: "p1".to_string(),
                name: "Lead Arranger".to_string(),
                role: ParticipantRole::Agent,
                exposure: 10_000_000,
            }],
            flowchart: None,
        },
        saved_at: Utc.timestamp_millis_opt(saved_millis).unwrap(),
    }
}

#[test]
fn test_save_creates_directory_and_file() {
    let dir = tempfile::tempdir().unwrap();
    let vault = DirectoryVault::new(dir.path().join("deals"));

    let key = vault.save(&record("Acme", 1_767_225_600_000)).unwrap();

    assert_eq!(key, "deal-1767225600000.json");
    assert!(dir.path().join("deals").join(&key).is_file());
}

#[test]
fn test_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let vault = DirectoryVault::new(dir.path());

    let saved = record("Acme", 1_000);
    vault.save(&saved).unwrap();
    vault.save(&record("Orion", 2_000)).unwrap();

    let mut loaded = vault.load_all().unwrap();
    loaded.sort_by_key(|r| r.saved_at);

    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0], saved);
    assert_eq!(loaded[1].deal.agreement.borrower, "Orion");
}

#[test]
fn test_same_millisecond_does_not_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let vault = DirectoryVault::new(dir.path());

    let first = vault.save(&record("First", 5_000)).unwrap();
    let second = vault.save(&record("Second", 5_000)).unwrap();

    assert_ne!(first, second);
    assert_eq!(second, "deal-5000-1.json");
    assert_eq!(vault.load_all().unwrap().len(), 2);
}

#[test]
fn test_load_by_key() {
    let dir = tempfile::tempdir().unwrap();
    let vault = DirectoryVault::new(dir.path());

    let key = vault.save(&record("Acme", 7_000)).unwrap();
    let loaded = vault.load(&key).unwrap();
    assert_eq!(loaded.deal.agreement.borrower, "Acme");
}

#[test]
fn test_unparseable_files_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let vault = DirectoryVault::new(dir.path());

    vault.save(&record("Acme", 1_000)).unwrap();
    std::fs::write(dir.path().join("deal-broken.json"), "{ not json").unwrap();
    std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let loaded = vault.load_all().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].deal.agreement.borrower, "Acme");
}

#[test]
fn test_saved_json_uses_camel_case() {
    let dir = tempfile::tempdir().unwrap();
    let vault = DirectoryVault::new(dir.path());

    let key = vault.save(&record("Acme", 1_000)).unwrap();
    let json = std::fs::read_to_string(dir.path().join(key)).unwrap();

    assert!(json.contains("\"savedAt\""));
    assert!(json.contains("\"facilityAmount\": 50000000"));
    assert!(json.contains("\"currentValue\""));
}
