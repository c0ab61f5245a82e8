use crate::protocol::{PRE_MUTE_KEY, SOUND_BASE_URL, VOLUME_ENDPOINT};

/// Where the client finds its backend, assets and local state.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub volume_endpoint: String,
    pub pre_mute_key: String,
    pub sound_base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            volume_endpoint: VOLUME_ENDPOINT.into(),
            pre_mute_key: PRE_MUTE_KEY.into(),
            sound_base_url: SOUND_BASE_URL.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.volume_endpoint, "/api/sound/volume");
        assert_eq!(config.pre_mute_key, "turtcd_prev_volume");
        assert_eq!(config.sound_base_url, "/static/sound");
    }
}
