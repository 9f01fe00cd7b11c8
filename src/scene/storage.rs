use tracing::warn;
use wasm_bindgen::JsValue;
use web_sys::{Storage, window};

use crate::error::{FinderError, FinderResult};
use crate::high_scores::{KeyValueStore, MemoryStore};

/// `window.localStorage`, or an in-memory map when the browser refuses access
/// (private mode, sandboxed iframes).
pub struct LocalStore {
    storage: Option<Storage>,
    fallback: MemoryStore,
}

impl LocalStore {
    pub fn from_window() -> Self {
        let storage = window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            warn!("localStorage unavailable, high scores will not persist");
        }
        Self {
            storage,
            fallback: MemoryStore::new(),
        }
    }

    pub fn is_persistent(&self) -> bool {
        self.storage.is_some()
    }
}

fn storage_err(err: JsValue) -> FinderError {
    FinderError::Storage(format!("{err:?}"))
}

impl KeyValueStore for LocalStore {
    fn get_item(&self, key: &str) -> FinderResult<Option<String>> {
        match &self.storage {
            Some(storage) => storage.get_item(key).map_err(storage_err),
            None => self.fallback.get_item(key),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> FinderResult<()> {
        match &self.storage {
            Some(storage) => storage.set_item(key, value).map_err(storage_err),
            None => self.fallback.set_item(key, value),
        }
    }
}
