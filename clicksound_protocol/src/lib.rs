mod message;
mod sound;
mod volume;

pub use crate::message::*;
pub use crate::sound::*;
pub use crate::volume::*;

/// Endpoint reading and writing the sound volume setting.
pub const VOLUME_ENDPOINT: &str = "/api/sound/volume";

/// Local storage key holding the last non-zero volume.
pub const PRE_MUTE_KEY: &str = "turtcd_prev_volume";

/// Url prefix of the sound assets.
pub const SOUND_BASE_URL: &str = "/static/sound";
