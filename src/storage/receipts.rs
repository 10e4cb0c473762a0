//! Receipt files: discovery of candidates to attach, and the integer-named
//! copies kept beside the ledger.

use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use crate::{errors::LedgerError, ledger::Receipt};

use super::Result;

/// File extensions accepted as receipts.
pub const RECEIPT_EXTENSIONS: [&str; 3] = ["jpg", "pdf", "png"];

/// Upper bound on candidates returned by a scan.
pub const MAX_RESULTS: usize = 1000;

#[derive(Debug, Clone)]
pub struct ReceiptStore {
    receipts_dir: PathBuf,
    search_dir: PathBuf,
    max_results: usize,
}

impl ReceiptStore {
    pub fn new(receipts_dir: impl Into<PathBuf>, search_dir: impl Into<PathBuf>) -> Self {
        Self {
            receipts_dir: receipts_dir.into(),
            search_dir: search_dir.into(),
            max_results: MAX_RESULTS,
        }
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn receipts_dir(&self) -> &Path {
        &self.receipts_dir
    }

    pub fn search_dir(&self) -> &Path {
        &self.search_dir
    }

    /// Receipt-like files under the search directory, sorted, at most
    /// `max_results` of them.
    pub fn candidates(&self) -> Vec<String> {
        let mut found = Vec::new();
        let mut pending = vec![self.search_dir.clone()];
        while let Some(dir) = pending.pop() {
            let entries = match fs::read_dir(&dir) {
                Ok(entries) => entries,
                Err(err) => {
                    tracing::debug!(dir = %dir.display(), error = %err, "skipping unreadable directory");
                    continue;
                }
            };
            let mut paths: Vec<PathBuf> = entries
                .filter_map(|entry| entry.ok().map(|entry| entry.path()))
                .collect();
            paths.sort();
            // Reversed so the stack visits subdirectories in sorted order.
            for path in paths.into_iter().rev() {
                let Ok(metadata) = fs::symlink_metadata(&path) else {
                    continue;
                };
                if metadata.is_dir() {
                    pending.push(path);
                } else if has_receipt_extension(&path) && path.is_file() {
                    found.push(path);
                    if found.len() >= self.max_results {
                        tracing::debug!(limit = self.max_results, "receipt scan truncated");
                        pending.clear();
                        break;
                    }
                }
            }
        }
        found.sort();
        found
            .into_iter()
            .map(|path| path.display().to_string())
            .collect()
    }

    /// First free integer name in the receipts directory, keeping
    /// `extension`. Gaps left by deleted receipts are reused.
    pub fn next_name(&self, extension: &str) -> Result<PathBuf> {
        let mut taken = BTreeSet::new();
        for entry in fs::read_dir(&self.receipts_dir)? {
            let path = entry?.path();
            if let Some(number) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| stem.parse::<u64>().ok())
            {
                taken.insert(number);
            }
        }
        let next = (0..).find(|n| !taken.contains(n)).unwrap_or_default();
        let mut name = PathBuf::from(next.to_string());
        if !extension.is_empty() {
            name.set_extension(extension);
        }
        Ok(name)
    }

    /// Copies the chosen source file into the receipts directory and returns
    /// the stored reference. Nothing happens for an unattached receipt.
    pub fn commit(&self, source: &Receipt) -> Result<Receipt> {
        let Some(path) = source.path() else {
            return Ok(Receipt::NotAttached);
        };
        if !path.is_file() {
            return Err(LedgerError::FileNotFound(path.to_path_buf()));
        }
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        let name = self.next_name(extension)?;
        let destination = self.receipts_dir.join(&name);
        fs::copy(path, &destination)?;
        tracing::info!(
            source = %path.display(),
            destination = %destination.display(),
            "receipt copied"
        );
        Ok(Receipt::File(name))
    }

    /// Deletes a stored receipt. Returns `false` when the file was already
    /// gone.
    pub fn remove(&self, receipt: &Receipt) -> Result<bool> {
        let Some(path) = self.stored_path(receipt) else {
            return Ok(false);
        };
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "receipt removed");
                Ok(true)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "receipt file missing");
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Location of a stored receipt inside the receipts directory.
    pub fn stored_path(&self, receipt: &Receipt) -> Option<PathBuf> {
        receipt.path().map(|name| self.receipts_dir.join(name))
    }

    /// True when `source` already is the stored file behind `receipt`.
    pub fn is_stored_as(&self, source: &Receipt, receipt: &Receipt) -> bool {
        match (source.path(), self.stored_path(receipt)) {
            (Some(source), Some(stored)) => match (source.canonicalize(), stored.canonicalize()) {
                (Ok(left), Ok(right)) => left == right,
                _ => false,
            },
            (None, None) => true,
            _ => false,
        }
    }
}

pub fn has_receipt_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            RECEIPT_EXTENSIONS
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}
