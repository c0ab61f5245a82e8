use web_sys::Storage;

use crate::volume::{MemoryPreMuteStore, PreMuteStore};

/// Pre-mute value kept in the browser local storage.
///
/// Falls back to memory when storage is disabled by the user, so the
/// value still survives for the lifetime of the page.
pub struct LocalPreMuteStore {
    key: String,
    storage: Option<Storage>,
    fallback: MemoryPreMuteStore,
}

impl LocalPreMuteStore {
    pub fn new(key: &str) -> Self {
        let storage = web_sys::window().and_then(|window| window.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("local storage unavailable, pre-mute volume kept in memory");
        }
        LocalPreMuteStore {
            key: key.into(),
            storage,
            fallback: MemoryPreMuteStore::new(),
        }
    }
}

impl PreMuteStore for LocalPreMuteStore {
    fn get(&self) -> Option<String> {
        match &self.storage {
            Some(storage) => storage.get_item(&self.key).ok().flatten(),
            None => self.fallback.get(),
        }
    }

    fn set(&self, value: &str) {
        if let Some(storage) = &self.storage {
            if storage.set_item(&self.key, value).is_ok() {
                return;
            }
            log::debug!("could not write {} to local storage", self.key);
        }
        self.fallback.set(value);
    }
}
