pub mod json_backend;
pub mod receipts;

use crate::{errors::LedgerError, ledger::Ledger};

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Abstraction over where the ledger document lives.
pub trait StorageBackend {
    fn load(&self) -> Result<Ledger>;
    fn save(&self, ledger: &Ledger) -> Result<()>;
}

pub use json_backend::JsonStorage;
pub use receipts::{ReceiptStore, MAX_RESULTS, RECEIPT_EXTENSIONS};
