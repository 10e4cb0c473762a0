#![allow(dead_code)]

use std::fs;

use chrono_tz::Tz;
use receipt_ledger::{
    cli::ui::script::ScriptedInteraction,
    ledger::{Address, Item, Receipt, Timestamp, Transaction},
    storage::ReceiptStore,
};
use tempfile::TempDir;

/// A one-item online purchase at `seconds` past the epoch.
pub fn sample_transaction(description: &str, seconds: i64) -> Transaction {
    Transaction::new(
        description,
        vec![Item::new("Thing", -2.5, 1, vec!["misc".into()]).expect("valid item")],
        Address::online("www.shop.com"),
        Timestamp::new(seconds, Tz::UTC).expect("valid timestamp"),
        "Cash",
        Receipt::NotAttached,
    )
}

/// Receipts directory and search directory inside one temporary folder.
pub fn receipt_env() -> (TempDir, ReceiptStore) {
    let temp = TempDir::new().expect("create temp dir");
    let receipts = temp.path().join("receipts");
    let scans = temp.path().join("scans");
    fs::create_dir_all(&receipts).expect("create receipts dir");
    fs::create_dir_all(&scans).expect("create scans dir");
    let store = ReceiptStore::new(receipts, scans);
    (temp, store)
}

/// Concatenates groups of scripted answers.
pub fn script(parts: &[&[&str]]) -> ScriptedInteraction {
    ScriptedInteraction::new(parts.iter().flat_map(|part| part.iter().copied()))
}
