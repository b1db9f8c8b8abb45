//! Durable key-value storage
//!
//! Favorites survive restarts by being written, as a JSON array of ids,
//! under a single key. [`FileStorage`] keeps one file per key in a data
//! directory; [`MemoryStorage`] keeps values in memory for tests.

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use crate::error::StorageError;

/// String key to string value storage
pub trait KeyValueStorage {
    /// Read the value stored under `key`, `None` if absent
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// One file per key under a directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding `key`
    ///
    /// ASCII letters, digits and `-` are kept; every other byte, `_`
    /// included, becomes `_xx` in lowercase hex. Distinct keys therefore
    /// never share a file and no key can leave the directory.
    fn path_for(&self, key: &str) -> PathBuf {
        let mut file_name = String::with_capacity(key.len());
        for byte in key.bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' {
                file_name.push(char::from(byte));
            } else {
                file_name.push_str(&format!("_{:02x}", byte));
            }
        }
        self.dir.join(format!("{}.json", file_name))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        // Write to a sibling file and rename so readers never see a partial value.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// In-memory storage, optionally failing writes
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RefCell<HashMap<String, String>>,
    fail_writes: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with one raw value
    pub fn with_value(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        storage
    }

    /// Storage whose writes always fail
    pub fn read_only() -> Self {
        Self {
            values: RefCell::new(HashMap::new()),
            fail_writes: true,
        }
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "storage is read-only",
            )));
        }
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Parse a persisted favorites list
pub fn decode_favorites(key: &str, raw: &str) -> Result<BTreeSet<String>, StorageError> {
    let ids: Vec<String> = serde_json::from_str(raw).map_err(|e| StorageError::Malformed {
        key: key.to_string(),
        message: e.to_string(),
    })?;
    Ok(ids.into_iter().collect())
}

/// Serialize favorites as a JSON array, in set order
pub fn encode_favorites(favorites: &BTreeSet<String>) -> Result<String, StorageError> {
    let ids: Vec<&String> = favorites.iter().collect();
    Ok(serde_json::to_string(&ids)?)
}

/// Read favorites at startup
///
/// Never fails: a missing key yields an empty set, and unreadable or
/// malformed values are logged and treated as empty.
pub fn load_favorites(storage: &dyn KeyValueStorage, key: &str) -> BTreeSet<String> {
    match storage.get(key) {
        Ok(Some(raw)) => match decode_favorites(key, &raw) {
            Ok(favorites) => {
                tracing::debug!("Loaded {} favorites", favorites.len());
                favorites
            }
            Err(e) => {
                tracing::warn!("Ignoring stored favorites: {}", e);
                BTreeSet::new()
            }
        },
        Ok(None) => BTreeSet::new(),
        Err(e) => {
            tracing::warn!("Failed to read favorites: {}", e);
            BTreeSet::new()
        }
    }
}

/// Persist favorites under `key`
pub fn save_favorites(
    storage: &dyn KeyValueStorage,
    key: &str,
    favorites: &BTreeSet<String>,
) -> Result<(), StorageError> {
    let encoded = encode_favorites(favorites)?;
    storage.set(key, &encoded)
}
