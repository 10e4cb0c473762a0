use std::fmt;

use serde::{Deserialize, Serialize};

use super::keys::ItemKey;
use crate::errors::LedgerError;

/// A single purchased (or refunded) good. Negative prices are losses,
/// positive prices are gains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ItemRecord")]
pub struct Item {
    name: String,
    price: f64,
    quantity: u32,
    tags: Vec<String>,
}

#[derive(Deserialize)]
struct ItemRecord {
    name: String,
    price: f64,
    quantity: u32,
    tags: Vec<String>,
}

impl TryFrom<ItemRecord> for Item {
    type Error = LedgerError;

    fn try_from(record: ItemRecord) -> Result<Self, Self::Error> {
        Item::new(record.name, record.price, record.quantity, record.tags)
    }
}

impl Item {
    pub fn new(
        name: impl Into<String>,
        price: f64,
        quantity: u32,
        tags: Vec<String>,
    ) -> Result<Self, LedgerError> {
        if !price.is_finite() || price == 0.0 {
            return Err(LedgerError::InvalidItem(format!(
                "price must be a non-zero number, got {price}"
            )));
        }
        if quantity == 0 {
            return Err(LedgerError::InvalidItem(
                "quantity must be at least 1".into(),
            ));
        }
        Ok(Self {
            name: name.into(),
            price,
            quantity,
            tags,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn add_tag(&mut self, tag: impl Into<String>) {
        self.tags.push(tag.into());
    }

    /// Removes the first occurrence of `tag`; does nothing when absent.
    pub fn remove_tag(&mut self, tag: &str) {
        if let Some(index) = self.tags.iter().position(|existing| existing == tag) {
            self.tags.remove(index);
        }
    }

    pub fn clear_tags(&mut self) {
        self.tags.clear();
    }

    /// Text values of a field, as offered by list/search. Tags yield one
    /// entry per tag.
    pub fn field_values(&self, key: ItemKey) -> Vec<String> {
        match key {
            ItemKey::Name => vec![self.name.clone()],
            ItemKey::Price => vec![format_price(self.price)],
            ItemKey::Quantity => vec![self.quantity.to_string()],
            ItemKey::Tags => self.tags.clone(),
        }
    }

    pub fn formatted(&self) -> String {
        format!(
            "{}, {}, x{}, Tags: {}",
            self.name,
            format_price(self.price),
            self.quantity,
            quoted_list(&self.tags)
        )
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

/// Formats a signed amount as `$12.50` or `-$12.50`.
pub fn format_price(price: f64) -> String {
    if price < 0.0 {
        format!("-${:.2}", price.abs())
    } else {
        format!("${:.2}", price)
    }
}

/// `['a', 'b']`, or `[]` when empty.
pub(crate) fn quoted_list<S: AsRef<str>>(values: &[S]) -> String {
    let quoted: Vec<String> = values
        .iter()
        .map(|value| format!("'{}'", value.as_ref()))
        .collect();
    format!("[{}]", quoted.join(", "))
}
