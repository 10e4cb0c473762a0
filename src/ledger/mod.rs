//! Record model: addresses, items, timestamps, transactions and the ledger
//! that orders them.

pub mod address;
pub mod item;
pub mod keys;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod receipt;
pub mod timestamp;
pub mod transaction;

pub use address::{Address, NOT_APPLICABLE};
pub use item::{format_price, Item};
pub use keys::{AddressKey, FieldKey, ItemKey, TimestampKey, TransactionKey};
pub use ledger::Ledger;
pub use receipt::Receipt;
pub use timestamp::Timestamp;
pub use transaction::Transaction;
