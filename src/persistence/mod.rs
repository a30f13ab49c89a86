//! Key-value persistence
//!
//! Mirrors browser LocalStorage: string keys mapped to JSON strings.
//! - `FileStorage`: one `<key>.json` file per key inside a data directory
//! - `MemoryStorage`: in-process map for tests and throwaway sessions
//!
//! Callers treat every failure as non-fatal and fall back to defaults.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Storage failures
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored value is not valid json: {0}")]
    Json(#[from] serde_json::Error),
}

/// A string key-value store
pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Read and decode a JSON value
pub fn load_json<T: DeserializeOwned>(
    storage: &dyn Storage,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match storage.get_item(key)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Encode and write a JSON value
pub fn save_json<T: Serialize>(
    storage: &mut dyn Storage,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(value)?;
    storage.set_item(key, &json)
}

/// Keys become file names, so keep them to a safe alphabet
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let ok = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if ok {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        n: u32,
    }

    #[test]
    fn test_json_helpers() {
        let mut storage = MemoryStorage::new();
        assert!(load_json::<Sample>(&storage, "sample").unwrap().is_none());
        save_json(&mut storage, "sample", &Sample { n: 3 }).unwrap();
        assert_eq!(
            load_json::<Sample>(&storage, "sample").unwrap(),
            Some(Sample { n: 3 })
        );
    }

    #[test]
    fn test_corrupt_json_is_error() {
        let mut storage = MemoryStorage::new();
        storage.set_item("sample", "{not json").unwrap();
        assert!(matches!(
            load_json::<Sample>(&storage, "sample"),
            Err(StorageError::Json(_))
        ));
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key("arrow_log_hit-1").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("../etc").is_err());
        assert!(validate_key("a b").is_err());
    }
}
