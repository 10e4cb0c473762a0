use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::keys::FieldKey;
use super::transaction::Transaction;

/// All recorded transactions, kept in ascending order of their instant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "LedgerRecord")]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

#[derive(Deserialize)]
struct LedgerRecord {
    transactions: Vec<Transaction>,
}

impl From<LedgerRecord> for Ledger {
    fn from(record: LedgerRecord) -> Self {
        Ledger::new(record.transactions)
    }
}

impl Ledger {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        let mut ledger = Self { transactions };
        ledger.sort();
        ledger
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, index: usize) -> Option<&Transaction> {
        self.transactions.get(index)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Most recent transaction by instant.
    pub fn latest(&self) -> Option<&Transaction> {
        self.transactions.last()
    }

    pub fn add_transaction(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
        self.sort();
    }

    pub fn set_transactions(&mut self, transactions: Vec<Transaction>) {
        self.transactions = transactions;
        self.sort();
    }

    /// Removes the transaction at `index`; out-of-range indices leave the
    /// ledger untouched.
    pub fn remove_transaction(&mut self, index: usize) -> Option<Transaction> {
        if index < self.transactions.len() {
            Some(self.transactions.remove(index))
        } else {
            None
        }
    }

    /// Swaps the entry at `index` for `transaction`, re-sorting afterwards.
    pub fn replace_transaction(&mut self, index: usize, transaction: Transaction) -> Option<Transaction> {
        let previous = self.remove_transaction(index)?;
        self.add_transaction(transaction);
        Some(previous)
    }

    /// Every distinct value recorded for `key`, most recent first.
    pub fn history(&self, key: FieldKey) -> Vec<String> {
        let mut seen = HashSet::new();
        self.transactions
            .iter()
            .rev()
            .flat_map(|transaction| transaction.field_values(key))
            .filter(|value| seen.insert(value.clone()))
            .collect()
    }

    fn sort(&mut self) {
        self.transactions
            .sort_by_key(|transaction| transaction.timestamp().timestamp());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::keys::{AddressKey, TransactionKey};
    use crate::ledger::{Address, Item, Receipt, Timestamp};
    use chrono_tz::Tz;

    fn transaction(description: &str, seconds: i64) -> Transaction {
        Transaction::new(
            description,
            vec![Item::new("thing", -1.0, 1, Vec::new()).unwrap()],
            Address::online(format!("{description}.com")),
            Timestamp::new(seconds, Tz::UTC).unwrap(),
            "Cash",
            Receipt::NotAttached,
        )
    }

    fn descriptions(ledger: &Ledger) -> Vec<&str> {
        ledger.transactions().iter().map(|t| t.description()).collect()
    }

    #[test]
    fn bulk_replace_sorts() {
        let mut ledger = Ledger::default();
        ledger.set_transactions(vec![transaction("late", 30), transaction("early", 1)]);
        assert_eq!(descriptions(&ledger), ["early", "late"]);
    }

    #[test]
    fn construction_and_add_keep_order() {
        let mut ledger = Ledger::new(vec![transaction("b", 20), transaction("a", 10)]);
        assert_eq!(descriptions(&ledger), ["a", "b"]);
        ledger.add_transaction(transaction("middle", 15));
        assert_eq!(descriptions(&ledger), ["a", "middle", "b"]);
        assert_eq!(ledger.latest().unwrap().description(), "b");
    }

    #[test]
    fn out_of_range_removal_is_noop() {
        let mut ledger = Ledger::new(vec![transaction("a", 1)]);
        assert!(ledger.remove_transaction(3).is_none());
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.remove_transaction(0).unwrap().description(), "a");
        assert!(ledger.is_empty());
    }

    #[test]
    fn replace_resorts() {
        let mut ledger = Ledger::new(vec![transaction("a", 1), transaction("b", 2)]);
        ledger.replace_transaction(0, transaction("late", 99)).unwrap();
        assert_eq!(descriptions(&ledger), ["b", "late"]);
        assert!(ledger.replace_transaction(5, transaction("x", 0)).is_none());
    }

    #[test]
    fn history_is_recent_first_without_duplicates() {
        let ledger = Ledger::new(vec![
            transaction("a", 1),
            transaction("b", 2),
            transaction("a", 3),
        ]);
        assert_eq!(
            ledger.history(TransactionKey::Description.into()),
            ["a", "b"]
        );
        assert_eq!(ledger.history(AddressKey::Street.into()), ["N/A"]);
    }
}
