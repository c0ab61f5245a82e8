//! Volume state shared by the click sounds and the mute toggle

use std::cell::{Cell, RefCell};

use anyhow::Result;

use crate::protocol::{clamp_volume, parse_volume, Volume, DEFAULT_VOLUME, MAX_VOLUME};

/// Remote source of truth for the volume setting.
#[allow(async_fn_in_trait)]
pub trait VolumeBackend {
    async fn fetch_volume(&self) -> Result<Volume>;
    /// Stores `volume` and returns the value the backend kept.
    async fn store_volume(&self, volume: Volume) -> Result<Volume>;
}

/// Local key-value slot for the last non-zero volume.
pub trait PreMuteStore {
    fn get(&self) -> Option<String>;
    fn set(&self, value: &str);
}

/// Something reflecting the current volume to the user.
pub trait VolumeIndicator {
    fn show(&self, volume: Volume);
}

pub struct NoIndicator;

impl VolumeIndicator for NoIndicator {
    fn show(&self, _volume: Volume) {}
}

/// In memory store, used when local storage is unavailable.
#[derive(Default, Debug)]
pub struct MemoryPreMuteStore {
    value: RefCell<Option<String>>,
}

impl MemoryPreMuteStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreMuteStore for MemoryPreMuteStore {
    fn get(&self) -> Option<String> {
        self.value.borrow().clone()
    }

    fn set(&self, value: &str) {
        *self.value.borrow_mut() = Some(value.into());
    }
}

/// Owns the current volume, loads it once and keeps the backend and the
/// pre-mute store in sync.
///
/// State lives in `Cell`s so the async operations only need `&self`
/// and the manager can be shared through an `Rc` by event handlers.
pub struct VolumeManager<B, S> {
    backend: B,
    store: S,
    indicator: Box<dyn VolumeIndicator>,
    volume: Cell<Volume>,
    loaded: Cell<bool>,
}

impl<B: VolumeBackend, S: PreMuteStore> VolumeManager<B, S> {
    pub fn new(backend: B, store: S) -> Self {
        VolumeManager {
            backend,
            store,
            indicator: Box::new(NoIndicator),
            volume: Cell::new(DEFAULT_VOLUME),
            loaded: Cell::new(false),
        }
    }

    pub fn with_indicator<I: VolumeIndicator + 'static>(mut self, indicator: I) -> Self {
        self.indicator = Box::new(indicator);
        self
    }

    pub fn volume(&self) -> Volume {
        self.volume.get()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.get()
    }

    pub fn is_muted(&self) -> bool {
        self.volume.get() == 0
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Last non-zero volume kept locally, if any valid one exists.
    pub fn pre_mute_volume(&self) -> Option<Volume> {
        self.store
            .get()
            .and_then(|value| parse_volume(&value))
            .filter(|volume| *volume > 0)
    }

    /// Loads the volume from the backend, once it succeeded.
    ///
    /// A failure gives the default volume (100) for now and leaves the
    /// manager unloaded, so the next call fetches again.
    pub async fn load(&self) -> Volume {
        if self.loaded.get() {
            return self.volume.get();
        }

        let fetched = self.backend.fetch_volume().await;

        // A concurrent load or save finished first
        if self.loaded.get() {
            return self.volume.get();
        }

        let volume = match fetched {
            Ok(volume) => {
                let volume = volume.min(MAX_VOLUME);
                self.loaded.set(true);
                if volume > 0 {
                    self.remember(volume);
                } else if self.pre_mute_volume().is_none() {
                    self.remember(DEFAULT_VOLUME);
                }
                log::debug!("sound volume loaded: {}", volume);
                volume
            }
            Err(err) => {
                log::warn!("could not load sound volume, using default: {:#}", err);
                DEFAULT_VOLUME
            }
        };
        self.volume.set(volume);
        self.indicator.show(volume);
        volume
    }

    /// Sends the clamped volume to the backend and adopts it on success.
    pub async fn save(&self, volume: i64) -> bool {
        let volume = clamp_volume(volume);
        match self.backend.store_volume(volume).await {
            Ok(stored) => {
                let stored = stored.min(MAX_VOLUME);
                self.volume.set(stored);
                self.loaded.set(true);
                if stored > 0 {
                    self.remember(stored);
                }
                self.indicator.show(stored);
                true
            }
            Err(err) => {
                log::warn!("could not save sound volume {}: {:#}", volume, err);
                false
            }
        }
    }

    /// Mutes when sound is on, restores the pre-mute volume otherwise.
    pub async fn toggle_mute(&self) -> bool {
        let current = self.load().await;
        if current > 0 {
            self.remember(current);
            self.save(0).await
        } else {
            let restored = self.pre_mute_volume().unwrap_or(DEFAULT_VOLUME);
            self.save(restored.into()).await
        }
    }

    fn remember(&self, volume: Volume) {
        self.store.set(&volume.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use futures::executor::block_on;
    use std::rc::Rc;

    /// Backend keeping its value in memory and recording every store.
    #[derive(Default)]
    struct FakeBackend {
        volume: Cell<Option<Volume>>,
        fail_store: Cell<bool>,
        fetches: Cell<usize>,
        stored: RefCell<Vec<Volume>>,
    }

    impl FakeBackend {
        fn with_volume(volume: Volume) -> Self {
            let backend = FakeBackend::default();
            backend.volume.set(Some(volume));
            backend
        }

        fn unreachable() -> Self {
            FakeBackend::default()
        }
    }

    impl VolumeBackend for FakeBackend {
        async fn fetch_volume(&self) -> Result<Volume> {
            self.fetches.set(self.fetches.get() + 1);
            self.volume.get().ok_or_else(|| anyhow!("connection refused"))
        }

        async fn store_volume(&self, volume: Volume) -> Result<Volume> {
            self.stored.borrow_mut().push(volume);
            if self.fail_store.get() {
                return Err(anyhow!("503 Service Unavailable"));
            }
            self.volume.set(Some(volume));
            Ok(volume)
        }
    }

    #[derive(Clone, Default)]
    struct RecordingIndicator(Rc<RefCell<Vec<Volume>>>);

    impl VolumeIndicator for RecordingIndicator {
        fn show(&self, volume: Volume) {
            self.0.borrow_mut().push(volume);
        }
    }

    fn manager(backend: FakeBackend) -> VolumeManager<FakeBackend, MemoryPreMuteStore> {
        VolumeManager::new(backend, MemoryPreMuteStore::new())
    }

    #[test]
    fn test_load_from_backend() {
        let manager = manager(FakeBackend::with_volume(40));
        assert!(!manager.is_loaded());
        assert_eq!(block_on(manager.load()), 40);
        assert_eq!(manager.volume(), 40);
        assert_eq!(manager.store().get(), Some("40".into()));
    }

    #[test]
    fn test_load_only_once() {
        let manager = manager(FakeBackend::with_volume(40));
        block_on(manager.load());
        manager.backend.volume.set(Some(10));
        assert_eq!(block_on(manager.load()), 40);
        assert_eq!(manager.backend.fetches.get(), 1);
    }

    #[test]
    fn test_load_failure_defaults_to_full_volume() {
        let manager = manager(FakeBackend::unreachable());
        assert_eq!(block_on(manager.load()), 100);
        assert_eq!(manager.volume(), 100);
        assert!(!manager.is_loaded());
        assert_eq!(manager.store().get(), None);
    }

    #[test]
    fn test_load_failure_keeps_pre_mute_value() {
        let manager = manager(FakeBackend::unreachable());
        manager.store().set("40");
        assert_eq!(block_on(manager.load()), 100);
        assert_eq!(manager.store().get(), Some("40".into()));
    }

    #[test]
    fn test_load_retries_after_failure() {
        let manager = manager(FakeBackend::unreachable());
        manager.store().set("40");
        assert_eq!(block_on(manager.load()), 100);

        manager.backend.volume.set(Some(0));
        assert_eq!(block_on(manager.load()), 0);
        assert!(manager.is_loaded());
        assert_eq!(manager.backend.fetches.get(), 2);
        assert_eq!(manager.store().get(), Some("40".into()));

        // loaded now, no more fetches
        block_on(manager.load());
        assert_eq!(manager.backend.fetches.get(), 2);
    }

    #[test]
    fn test_load_muted_seeds_pre_mute_value() {
        let manager = manager(FakeBackend::with_volume(0));
        assert_eq!(block_on(manager.load()), 0);
        assert!(manager.is_muted());
        assert_eq!(manager.store().get(), Some("100".into()));
    }

    #[test]
    fn test_load_muted_keeps_existing_pre_mute_value() {
        let manager = manager(FakeBackend::with_volume(0));
        manager.store().set("35");
        block_on(manager.load());
        assert_eq!(manager.store().get(), Some("35".into()));

        let manager = self::manager(FakeBackend::with_volume(0));
        manager.store().set("garbage");
        block_on(manager.load());
        assert_eq!(manager.store().get(), Some("100".into()));
    }

    #[test]
    fn test_save() {
        let manager = manager(FakeBackend::with_volume(40));
        block_on(manager.load());

        assert!(block_on(manager.save(250)));
        assert_eq!(manager.volume(), 100);
        assert_eq!(manager.store().get(), Some("100".into()));

        assert!(block_on(manager.save(-5)));
        assert_eq!(manager.volume(), 0);
        // muting never overwrites the pre-mute value
        assert_eq!(manager.store().get(), Some("100".into()));

        assert!(block_on(manager.save(65)));
        assert_eq!(manager.store().get(), Some("65".into()));
        assert_eq!(*manager.backend.stored.borrow(), vec![100, 0, 65]);
    }

    #[test]
    fn test_save_failure_keeps_state() {
        let manager = manager(FakeBackend::with_volume(40));
        block_on(manager.load());
        manager.backend.fail_store.set(true);
        assert!(!block_on(manager.save(70)));
        assert_eq!(manager.volume(), 40);
        assert_eq!(manager.store().get(), Some("40".into()));
    }

    #[test]
    fn test_toggle_mute() {
        let manager = manager(FakeBackend::with_volume(40));
        block_on(manager.load());

        assert!(block_on(manager.toggle_mute()));
        assert_eq!(manager.volume(), 0);
        assert_eq!(*manager.backend.stored.borrow(), vec![0]);
        assert_eq!(manager.store().get(), Some("40".into()));

        assert!(block_on(manager.toggle_mute()));
        assert_eq!(manager.volume(), 40);
        assert_eq!(*manager.backend.stored.borrow(), vec![0, 40]);
    }

    #[test]
    fn test_unmute_from_stored_value() {
        let manager = manager(FakeBackend::with_volume(0));
        manager.store().set("40");
        block_on(manager.load());
        assert!(block_on(manager.toggle_mute()));
        assert_eq!(*manager.backend.stored.borrow(), vec![40]);
        assert_eq!(manager.volume(), 40);
    }

    #[test]
    fn test_unmute_without_valid_stored_value() {
        for stored in &["0", "", "abc"] {
            let manager = manager(FakeBackend::with_volume(20));
            block_on(manager.load());
            block_on(manager.save(0));
            manager.store().set(stored);
            assert!(block_on(manager.toggle_mute()));
            assert_eq!(manager.volume(), 100);
        }
    }

    #[test]
    fn test_toggle_loads_first() {
        let manager = manager(FakeBackend::with_volume(25));
        assert!(block_on(manager.toggle_mute()));
        assert_eq!(manager.backend.fetches.get(), 1);
        assert_eq!(*manager.backend.stored.borrow(), vec![0]);
        assert_eq!(manager.pre_mute_volume(), Some(25));
    }

    #[test]
    fn test_indicator_follows_volume() {
        let indicator = RecordingIndicator::default();
        let manager = manager(FakeBackend::with_volume(40)).with_indicator(indicator.clone());
        block_on(manager.load());
        block_on(manager.toggle_mute());
        block_on(manager.toggle_mute());
        assert_eq!(*indicator.0.borrow(), vec![40, 0, 40]);
    }
}
