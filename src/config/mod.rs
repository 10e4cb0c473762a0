//! Startup configuration resolved from the command line.

use std::path::{Path, PathBuf};

use crate::errors::LedgerError;
use crate::ledger::Ledger;
use crate::storage::{JsonStorage, ReceiptStore, StorageBackend, MAX_RESULTS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub ledger_file: PathBuf,
    pub receipts_dir: PathBuf,
    pub search_dir: PathBuf,
    pub new_file: bool,
    pub max_results: usize,
}

impl AppConfig {
    /// Receipts are searched for under the home directory unless
    /// `search_dir` is given.
    pub fn new(
        ledger_file: impl Into<PathBuf>,
        receipts_dir: impl Into<PathBuf>,
        search_dir: Option<PathBuf>,
        new_file: bool,
    ) -> Self {
        Self {
            ledger_file: ledger_file.into(),
            receipts_dir: receipts_dir.into(),
            search_dir: search_dir.unwrap_or_else(default_search_dir),
            new_file,
            max_results: MAX_RESULTS,
        }
    }

    pub fn storage(&self) -> JsonStorage {
        JsonStorage::new(&self.ledger_file)
    }

    pub fn receipt_store(&self) -> ReceiptStore {
        ReceiptStore::new(&self.receipts_dir, &self.search_dir).with_max_results(self.max_results)
    }

    /// Checks the paths and returns the ledger to work on. A new ledger file
    /// is created empty; otherwise the existing file is loaded.
    pub fn prepare(&self) -> Result<Ledger, LedgerError> {
        let storage = self.storage();
        let ledger = if self.new_file {
            if self.ledger_file.exists() {
                return Err(LedgerError::FileExists(self.ledger_file.clone()));
            }
            require_dir(&self.receipts_dir)?;
            require_dir(&self.search_dir)?;
            storage.create()?
        } else {
            if !self.ledger_file.is_file() {
                return Err(LedgerError::FileNotFound(self.ledger_file.clone()));
            }
            require_dir(&self.receipts_dir)?;
            require_dir(&self.search_dir)?;
            storage.load()?
        };
        tracing::debug!(
            ledger = %self.ledger_file.display(),
            receipts = %self.receipts_dir.display(),
            search = %self.search_dir.display(),
            "configuration ready"
        );
        Ok(ledger)
    }
}

fn default_search_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn require_dir(path: &Path) -> Result<(), LedgerError> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(LedgerError::DirectoryNotFound(path.to_path_buf()))
    }
}
