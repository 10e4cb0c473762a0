use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::{errors::LedgerError, ledger::Ledger};

use super::{Result, StorageBackend};

const TMP_SUFFIX: &str = "tmp";
const INDENT: &[u8] = b"    ";

/// Ledger persisted as a single JSON document, rewritten in full on save.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes an empty ledger; refuses to clobber an existing file.
    pub fn create(&self) -> Result<Ledger> {
        if self.path.exists() {
            return Err(LedgerError::FileExists(self.path.clone()));
        }
        let ledger = Ledger::default();
        self.save(&ledger)?;
        Ok(ledger)
    }
}

impl StorageBackend for JsonStorage {
    fn load(&self) -> Result<Ledger> {
        if !self.path.is_file() {
            return Err(LedgerError::FileNotFound(self.path.clone()));
        }
        let ledger = load_ledger_from_path(&self.path)?;
        tracing::debug!(
            path = %self.path.display(),
            transactions = ledger.len(),
            "ledger loaded"
        );
        Ok(ledger)
    }

    fn save(&self, ledger: &Ledger) -> Result<()> {
        save_ledger_to_path(ledger, &self.path)?;
        tracing::debug!(
            path = %self.path.display(),
            transactions = ledger.len(),
            "ledger saved"
        );
        Ok(())
    }
}

pub fn save_ledger_to_path(ledger: &Ledger, path: &Path) -> Result<()> {
    let json = to_pretty_json(ledger)?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub fn load_ledger_from_path(path: &Path) -> Result<Ledger> {
    let data = fs::read_to_string(path)?;
    let ledger: Ledger = serde_json::from_str(&data)?;
    Ok(ledger)
}

/// Four-space indented JSON with a trailing newline; non-ASCII text is
/// written as-is.
fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut serializer)?;
    buffer.push(b'\n');
    String::from_utf8(buffer)
        .map_err(|err| LedgerError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, err)))
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
