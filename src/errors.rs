use std::path::PathBuf;

use thiserror::Error;

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Unknown timezone: {0}")]
    InvalidTimezone(String),
    #[error("Timestamp out of range: {0}")]
    InvalidTimestamp(i64),
    #[error("Invalid calendar date: {0}")]
    InvalidDate(String),
    #[error("Invalid item: {0}")]
    InvalidItem(String),
    #[error("File \"{}\" already exists.", .0.display())]
    FileExists(PathBuf),
    #[error("File \"{}\" does not exist.", .0.display())]
    FileNotFound(PathBuf),
    #[error("Directory \"{}\" does not exist.", .0.display())]
    DirectoryNotFound(PathBuf),
}
