//! Key-value persistence backends
//!
//! The economy ledger persists through this trait; any string-keyed store
//! satisfies it. `MemStore` backs native builds and tests, `LocalStore`
//! wraps LocalStorage on the web target.

use std::collections::HashMap;

use thiserror::Error;

/// Persisted currency balance (stringified integer)
pub const KEY_CURRENCY: &str = "currency";
/// Persisted owned-unlock ids (JSON array of strings)
pub const KEY_OWNED: &str = "ownedUnlocks";
/// Persisted equipped unlock id (plain string)
pub const KEY_EQUIPPED: &str = "equippedUnlock";

/// Why a store operation failed. Never fatal - callers log and carry on
/// with in-memory state.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend unavailable")]
    Unavailable,
    #[error("write rejected: {0}")]
    WriteFailed(String),
}

/// String-keyed persistent store
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store for native builds and tests
#[derive(Debug, Clone, Default)]
pub struct MemStore {
    map: HashMap<String, String>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// LocalStorage-backed store (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl KvStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage().and_then(|s| s.get_item(key).ok()).flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage = Self::storage().ok_or(StoreError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| StoreError::WriteFailed(format!("{e:?}")))
    }
}
