//! `localStorage`-backed [`KeyValueStore`].

use wasm_bindgen::JsValue;
use web_sys::Storage;

use crate::error::StorageError;
use crate::store::KeyValueStore;

/// Handle to `window.localStorage`. Holds `None` when the browser denies
/// access, in which case every operation reports [`StorageError::Unavailable`].
#[derive(Debug, Clone)]
pub struct LocalStore {
    storage: Option<Storage>,
}

impl LocalStore {
    pub fn open() -> Self {
        let storage = match web_sys::window().map(|w| w.local_storage()) {
            Some(Ok(storage)) => storage,
            Some(Err(e)) => {
                log::warn!("localStorage unavailable: {e:?}");
                None
            }
            None => None,
        };
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage, StorageError> {
        self.storage.as_ref().ok_or(StorageError::Unavailable)
    }
}

fn rejected(op: &'static str, key: &str, err: &JsValue) -> StorageError {
    StorageError::Rejected { op, key: key.to_owned(), reason: err.as_string().unwrap_or_else(|| format!("{err:?}")) }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?.get_item(key).map_err(|e| rejected("get", key, &e))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?.set_item(key, value).map_err(|e| rejected("set", key, &e))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.storage()?.remove_item(key).map_err(|e| rejected("remove", key, &e))
    }
}
