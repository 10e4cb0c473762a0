mod common;

use std::fs;

use common::sample_transaction;
use receipt_ledger::{
    errors::LedgerError,
    ledger::{Item, Ledger},
    storage::{JsonStorage, StorageBackend},
};
use serde_json::Value;
use tempfile::tempdir;

#[test]
fn saved_document_uses_ledger_keys() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(temp.path().join("ledger.json"));
    storage
        .save(&Ledger::new(vec![sample_transaction("Lunch", 1_700_000_000)]))
        .unwrap();

    let json: Value = serde_json::from_str(&fs::read_to_string(storage.path()).unwrap()).unwrap();
    let transaction = &json["transactions"][0];
    assert_eq!(transaction["description"], "Lunch");
    assert_eq!(transaction["payment method"], "Cash");
    assert_eq!(transaction["receipt"], "N/A");
    assert_eq!(transaction["address"]["postal code"], "N/A");
    assert_eq!(transaction["timestamp"]["timestamp"], 1_700_000_000);
    assert_eq!(transaction["timestamp"]["timezone"], "UTC");
    assert_eq!(transaction["items"][0]["tags"][0], "misc");
    assert!(transaction.get("total").is_none());
}

#[test]
fn save_then_load_returns_same_ledger() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(temp.path().join("ledger.json"));
    let ledger = Ledger::new(vec![
        sample_transaction("b", 20),
        sample_transaction("a", 10),
    ]);
    storage.save(&ledger).unwrap();
    assert_eq!(storage.load().unwrap(), ledger);
    assert!(!temp.path().join("ledger.json.tmp").exists());
}

#[test]
fn stored_total_is_ignored_on_load() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("ledger.json");
    fs::write(
        &path,
        r#"{"transactions": [{
            "address": {"city": "Ottawa", "country": "Canada", "name": "Store",
                        "postal code": "K1A", "province": "ON", "street": "1 Main"},
            "description": "Tools",
            "items": [{"name": "Saw", "price": -20.0, "quantity": 1, "tags": []},
                      {"name": "Refund", "price": 5.0, "quantity": 1, "tags": ["r"]}],
            "payment method": "Debit",
            "receipt": "0.pdf",
            "timestamp": {"timestamp": 1682874309, "timezone": "America/Toronto"},
            "total": 999
        }]}"#,
    )
    .unwrap();
    let ledger = JsonStorage::new(&path).load().unwrap();
    let transaction = &ledger.transactions()[0];
    assert_eq!(transaction.total(), -15.0);
    assert_eq!(transaction.timestamp().hour(), 13);
    assert_eq!(transaction.receipt().to_string(), "0.pdf");
}

#[test]
fn missing_key_is_a_parse_error() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("ledger.json");
    fs::write(&path, r#"{"transactions": [{"description": "Half"}]}"#).unwrap();
    assert!(matches!(
        JsonStorage::new(&path).load(),
        Err(LedgerError::Serde(_))
    ));
}

#[test]
fn ledger_stays_sorted_through_adds_and_removes() {
    let mut ledger = Ledger::default();
    let mut seed: i64 = 17;
    for step in 0..60 {
        seed = (seed * 1_103_515_245 + 12_345) % 2_147_483_648;
        if step % 4 == 3 {
            ledger.remove_transaction((seed as usize) % (ledger.len() + 2));
        } else {
            ledger.add_transaction(sample_transaction(&format!("t{step}"), seed));
        }
        let stamps: Vec<i64> = ledger
            .transactions()
            .iter()
            .map(|transaction| transaction.timestamp().timestamp())
            .collect();
        assert!(stamps.windows(2).all(|pair| pair[0] <= pair[1]));
    }
}

#[test]
fn out_of_range_remove_is_a_no_op() {
    let mut ledger = Ledger::new(vec![sample_transaction("only", 5)]);
    assert!(ledger.remove_transaction(3).is_none());
    assert_eq!(ledger.len(), 1);
}

#[test]
fn total_follows_item_replacement() {
    let mut transaction = sample_transaction("groceries", 5);
    let items = vec![
        Item::new("Milk", -4.5, 2, Vec::new()).unwrap(),
        Item::new("Coupon", 1.25, 1, Vec::new()).unwrap(),
        Item::new("Bread", -3.0, 1, Vec::new()).unwrap(),
    ];
    transaction.set_items(items.clone());
    let expected: f64 = items.iter().map(Item::price).sum();
    assert_eq!(transaction.total(), expected);
}
