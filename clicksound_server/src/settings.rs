use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

use crate::protocol::{clamp_volume_number, ProtocolError, ProtocolErrorKind, Volume, DEFAULT_VOLUME, MAX_VOLUME};

/// On disk layout of the settings file.
#[derive(Serialize, Deserialize, Debug, Clone)]
struct SoundSettings {
    volume: serde_json::Number,
}

/// The volume setting, persisted to a JSON file when a path is given.
#[derive(Debug)]
pub struct VolumeStore {
    path: Option<PathBuf>,
    volume: RwLock<Volume>,
}

impl VolumeStore {
    pub fn in_memory(volume: Volume) -> Self {
        VolumeStore {
            path: None,
            volume: RwLock::new(volume.min(MAX_VOLUME)),
        }
    }

    /// Reads the settings file, defaulting to full volume when it is
    /// missing or unreadable.
    pub async fn open(path: PathBuf) -> Self {
        let volume = match tokio::fs::read(&path).await {
            Ok(content) => match serde_json::from_slice::<SoundSettings>(&content) {
                Ok(settings) => clamp_volume_number(&settings.volume),
                Err(err) => {
                    log::warn!("invalid settings file {}: {}", path.display(), err);
                    DEFAULT_VOLUME
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!("no settings file at {}, starting at full volume", path.display());
                DEFAULT_VOLUME
            }
            Err(err) => {
                log::warn!("could not read settings file {}: {}", path.display(), err);
                DEFAULT_VOLUME
            }
        };
        VolumeStore {
            path: Some(path),
            volume: RwLock::new(volume),
        }
    }

    pub async fn get(&self) -> Volume {
        *self.volume.read().await
    }

    /// Persists then adopts `volume`; memory is untouched if writing fails.
    pub async fn set(&self, volume: Volume) -> Result<Volume, ProtocolError> {
        let volume = volume.min(MAX_VOLUME);
        let mut current = self.volume.write().await;
        if let Some(path) = &self.path {
            persist(path, volume).await.map_err(|err| {
                log::error!("could not write settings file {}: {}", path.display(), err);
                ProtocolError::new(ProtocolErrorKind::InternalError, "could not save volume")
            })?;
        }
        *current = volume;
        log::info!("sound volume set to {}", volume);
        Ok(volume)
    }
}

async fn persist(path: &Path, volume: Volume) -> std::io::Result<()> {
    let settings = SoundSettings { volume: volume.into() };
    let content = serde_json::to_vec_pretty(&settings)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    tokio::fs::write(&tmp, content).await?;
    tokio::fs::rename(&tmp, path).await
}
