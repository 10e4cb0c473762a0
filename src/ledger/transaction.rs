use std::fmt;

use serde::{Deserialize, Serialize};

use super::address::Address;
use super::item::{quoted_list, Item};
use super::keys::{FieldKey, TransactionKey};
use super::receipt::Receipt;
use super::timestamp::Timestamp;

/// A recorded purchase. `total` is derived from the items and never read
/// back from disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "TransactionRecord", into = "TransactionRecord")]
pub struct Transaction {
    address: Address,
    description: String,
    items: Vec<Item>,
    payment_method: String,
    receipt: Receipt,
    timestamp: Timestamp,
    total: f64,
}

#[derive(Serialize, Deserialize)]
struct TransactionRecord {
    address: Address,
    description: String,
    items: Vec<Item>,
    #[serde(rename = "payment method")]
    payment_method: String,
    receipt: Receipt,
    timestamp: Timestamp,
}

impl From<TransactionRecord> for Transaction {
    fn from(record: TransactionRecord) -> Self {
        Transaction::new(
            record.description,
            record.items,
            record.address,
            record.timestamp,
            record.payment_method,
            record.receipt,
        )
    }
}

impl From<Transaction> for TransactionRecord {
    fn from(value: Transaction) -> Self {
        Self {
            address: value.address,
            description: value.description,
            items: value.items,
            payment_method: value.payment_method,
            receipt: value.receipt,
            timestamp: value.timestamp,
        }
    }
}

impl Transaction {
    /// Arguments follow the order in which the wizard asks for them.
    pub fn new(
        description: impl Into<String>,
        items: Vec<Item>,
        address: Address,
        timestamp: Timestamp,
        payment_method: impl Into<String>,
        receipt: Receipt,
    ) -> Self {
        let total = sum_prices(&items);
        Self {
            address,
            description: description.into(),
            items,
            payment_method: payment_method.into(),
            receipt,
            timestamp,
            total,
        }
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn payment_method(&self) -> &str {
        &self.payment_method
    }

    pub fn receipt(&self) -> &Receipt {
        &self.receipt
    }

    pub fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn set_address(&mut self, address: Address) {
        self.address = address;
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_items(&mut self, items: Vec<Item>) {
        self.total = sum_prices(&items);
        self.items = items;
    }

    pub fn set_payment_method(&mut self, payment_method: impl Into<String>) {
        self.payment_method = payment_method.into();
    }

    pub fn set_receipt(&mut self, receipt: Receipt) {
        self.receipt = receipt;
    }

    pub fn set_timestamp(&mut self, timestamp: Timestamp) {
        self.timestamp = timestamp;
    }

    /// Text values this transaction contributes to the history of `key`.
    /// Item keys yield one entry per item (one per tag for tags).
    pub fn field_values(&self, key: FieldKey) -> Vec<String> {
        match key {
            FieldKey::Address(key) => vec![self.address.get(key).to_string()],
            FieldKey::Item(key) => self
                .items
                .iter()
                .flat_map(|item| item.field_values(key))
                .collect(),
            FieldKey::Timestamp(key) => vec![self.timestamp.get(key)],
            FieldKey::Transaction(key) => match key {
                TransactionKey::Address => vec![self.address.formatted()],
                TransactionKey::Description => vec![self.description.clone()],
                TransactionKey::Items => self.items.iter().map(Item::formatted).collect(),
                TransactionKey::PaymentMethod => vec![self.payment_method.clone()],
                TransactionKey::Receipt => vec![self.receipt.to_string()],
                TransactionKey::Timestamp => vec![self.timestamp.formatted()],
            },
            FieldKey::Transactions => vec![self.formatted()],
        }
    }

    pub fn formatted(&self) -> String {
        let names: Vec<&str> = self.items.iter().map(Item::name).collect();
        format!(
            "{}, {}, {}, {}",
            self.timestamp.formatted(),
            self.description,
            quoted_list(&names),
            self.address.name()
        )
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

fn sum_prices(items: &[Item]) -> f64 {
    items.iter().map(Item::price).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::keys::{AddressKey, ItemKey};
    use chrono_tz::Tz;
    use insta::assert_snapshot;

    fn sample() -> Transaction {
        Transaction::new(
            "Groceries",
            vec![
                Item::new("Milk", -3.5, 1, vec!["dairy".into()]).unwrap(),
                Item::new("Bread", -2.25, 2, vec!["bakery".into(), "fresh".into()]).unwrap(),
            ],
            Address::new("Market", "1 Main St", "Toronto", "ON", "M5V 1A1", "Canada"),
            Timestamp::new(0, Tz::UTC).unwrap(),
            "Debit",
            Receipt::NotAttached,
        )
    }

    #[test]
    fn total_tracks_items() {
        let mut transaction = sample();
        assert_eq!(transaction.total(), -5.75);
        transaction.set_items(vec![Item::new("Refund", 10.0, 1, Vec::new()).unwrap()]);
        assert_eq!(transaction.total(), 10.0);
        transaction.set_items(Vec::new());
        assert_eq!(transaction.total(), 0.0);
    }

    #[test]
    fn field_values_flatten_items() {
        let transaction = sample();
        assert_eq!(
            transaction.field_values(ItemKey::Tags.into()),
            ["dairy", "bakery", "fresh"]
        );
        assert_eq!(transaction.field_values(AddressKey::City.into()), ["Toronto"]);
        assert_eq!(
            transaction.field_values(TransactionKey::Receipt.into()),
            ["N/A"]
        );
    }

    #[test]
    fn formatted_lists_item_names() {
        assert_snapshot!(
            sample().formatted(),
            @"Thu Jan  1 00:00:00 1970 UTC, Groceries, ['Milk', 'Bread'], Market"
        );
    }

    #[test]
    fn json_omits_total_and_uses_spaced_keys() {
        let value = serde_json::to_value(sample()).unwrap();
        assert!(value.get("total").is_none());
        assert_eq!(value["payment method"], "Debit");
        assert_eq!(value["receipt"], "N/A");
        let back: Transaction = serde_json::from_value(value).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn missing_key_is_fatal() {
        let mut value = serde_json::to_value(sample()).unwrap();
        value.as_object_mut().unwrap().remove("payment method");
        assert!(serde_json::from_value::<Transaction>(value).is_err());
    }
}
