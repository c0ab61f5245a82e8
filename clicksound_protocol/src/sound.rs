//! Sound names and audio assets

use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

/// Sound played for a class of clicked element.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum ButtonSound {
    /// Plain `<button>`
    Click,
    /// `.btn` and `.btn-icon`
    Primary,
    /// `.btn-ghost`
    Ghost,
    /// Checkboxes and switches
    Toggle,
}

impl ButtonSound {
    /// Logical name, also the asset file stem.
    pub fn name(self) -> &'static str {
        match self {
            ButtonSound::Click => "button_click",
            ButtonSound::Primary => "button_click_primary",
            ButtonSound::Ghost => "button_click_ghost",
            ButtonSound::Toggle => "button_toggle",
        }
    }
}

impl std::fmt::Display for ButtonSound {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Container formats, in the order they are tried.
#[derive(PartialEq, Eq, Clone, Copy, Debug, EnumIter)]
pub enum AudioFormat {
    Mp3,
    Wav,
    Ogg,
}

impl AudioFormat {
    pub fn extension(self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Wav => "wav",
            AudioFormat::Ogg => "ogg",
        }
    }
}

/// Url of a sound asset, `<base>/<name>.<ext>`.
pub fn sound_url(base: &str, name: &str, format: AudioFormat) -> String {
    format!("{}/{}.{}", base.trim_end_matches('/'), name, format.extension())
}
