//! Field identifiers shared by the record model, the JSON layout, and the
//! wizard prompts. The string form of each key is the JSON key and the label
//! shown in prompts ("Enter the postal code").

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressKey {
    Name,
    Street,
    City,
    Province,
    PostalCode,
    Country,
}

impl AddressKey {
    /// Order in which an address is built.
    pub const STEPS: [AddressKey; 6] = [
        AddressKey::Name,
        AddressKey::Street,
        AddressKey::City,
        AddressKey::Province,
        AddressKey::PostalCode,
        AddressKey::Country,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AddressKey::Name => "name",
            AddressKey::Street => "street",
            AddressKey::City => "city",
            AddressKey::Province => "province",
            AddressKey::PostalCode => "postal code",
            AddressKey::Country => "country",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKey {
    Name,
    Price,
    Quantity,
    Tags,
}

impl ItemKey {
    pub const STEPS: [ItemKey; 4] = [ItemKey::Name, ItemKey::Price, ItemKey::Quantity, ItemKey::Tags];

    pub fn as_str(self) -> &'static str {
        match self {
            ItemKey::Name => "name",
            ItemKey::Price => "price",
            ItemKey::Quantity => "quantity",
            ItemKey::Tags => "tags",
        }
    }
}

/// Timestamp keys. `Timestamp` and `Timezone` are the persisted keys; the
/// calendar keys only exist while a timestamp is being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimestampKey {
    Timestamp,
    Timezone,
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl TimestampKey {
    pub const STEPS: [TimestampKey; 7] = [
        TimestampKey::Year,
        TimestampKey::Month,
        TimestampKey::Day,
        TimestampKey::Hour,
        TimestampKey::Minute,
        TimestampKey::Second,
        TimestampKey::Timezone,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TimestampKey::Timestamp => "timestamp",
            TimestampKey::Timezone => "timezone",
            TimestampKey::Year => "year",
            TimestampKey::Month => "month",
            TimestampKey::Day => "day",
            TimestampKey::Hour => "hour",
            TimestampKey::Minute => "minute",
            TimestampKey::Second => "second",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKey {
    Address,
    Description,
    Items,
    PaymentMethod,
    Receipt,
    Timestamp,
}

impl TransactionKey {
    /// Order in which a transaction is built.
    pub const STEPS: [TransactionKey; 6] = [
        TransactionKey::Description,
        TransactionKey::Items,
        TransactionKey::Address,
        TransactionKey::Timestamp,
        TransactionKey::PaymentMethod,
        TransactionKey::Receipt,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKey::Address => "address",
            TransactionKey::Description => "description",
            TransactionKey::Items => "items",
            TransactionKey::PaymentMethod => "payment method",
            TransactionKey::Receipt => "receipt",
            TransactionKey::Timestamp => "timestamp",
        }
    }
}

/// Any field a prompt can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    Address(AddressKey),
    Item(ItemKey),
    Timestamp(TimestampKey),
    Transaction(TransactionKey),
    Transactions,
}

impl FieldKey {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKey::Address(key) => key.as_str(),
            FieldKey::Item(key) => key.as_str(),
            FieldKey::Timestamp(key) => key.as_str(),
            FieldKey::Transaction(key) => key.as_str(),
            FieldKey::Transactions => "transactions",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<AddressKey> for FieldKey {
    fn from(key: AddressKey) -> Self {
        FieldKey::Address(key)
    }
}

impl From<ItemKey> for FieldKey {
    fn from(key: ItemKey) -> Self {
        FieldKey::Item(key)
    }
}

impl From<TimestampKey> for FieldKey {
    fn from(key: TimestampKey) -> Self {
        FieldKey::Timestamp(key)
    }
}

impl From<TransactionKey> for FieldKey {
    fn from(key: TransactionKey) -> Self {
        FieldKey::Transaction(key)
    }
}
