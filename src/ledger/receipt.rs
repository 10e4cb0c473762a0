use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::address::NOT_APPLICABLE;

/// Receipt reference stored on a transaction: either a file name relative
/// to the receipts directory, or nothing (persisted as `"N/A"`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Receipt {
    #[default]
    NotAttached,
    File(PathBuf),
}

impl Receipt {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Receipt::NotAttached => None,
            Receipt::File(path) => Some(path),
        }
    }

    pub fn is_attached(&self) -> bool {
        matches!(self, Receipt::File(_))
    }
}

impl From<String> for Receipt {
    fn from(value: String) -> Self {
        if value == NOT_APPLICABLE {
            Receipt::NotAttached
        } else {
            Receipt::File(PathBuf::from(value))
        }
    }
}

impl From<&str> for Receipt {
    fn from(value: &str) -> Self {
        Receipt::from(value.to_string())
    }
}

impl From<Receipt> for String {
    fn from(value: Receipt) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Receipt::NotAttached => f.write_str(NOT_APPLICABLE),
            Receipt::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_maps_to_not_attached() {
        assert_eq!(Receipt::from("N/A"), Receipt::NotAttached);
        assert_eq!(Receipt::from("3.pdf"), Receipt::File(PathBuf::from("3.pdf")));
        assert_eq!(Receipt::NotAttached.to_string(), "N/A");
        assert!(Receipt::NotAttached.path().is_none());
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&Receipt::File("0.jpg".into())).unwrap();
        assert_eq!(json, "\"0.jpg\"");
        let back: Receipt = serde_json::from_str("\"N/A\"").unwrap();
        assert!(!back.is_attached());
    }
}
