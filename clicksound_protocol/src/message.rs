use serde::{Deserialize, Serialize};

use crate::volume::{clamp_volume_number, Volume};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Body of every `/api/sound/volume` response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct VolumeResponse {
    pub status: ResponseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<serde_json::Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl VolumeResponse {
    pub fn success(volume: Volume) -> Self {
        VolumeResponse {
            status: ResponseStatus::Success,
            volume: Some(volume.into()),
            message: None,
        }
    }

    pub fn error(error: &ProtocolError) -> Self {
        VolumeResponse {
            status: ResponseStatus::Error,
            volume: None,
            message: Some(error.message().into()),
        }
    }

    /// The clamped volume, only for successful responses carrying one.
    pub fn volume(&self) -> Option<Volume> {
        match self.status {
            ResponseStatus::Success => self.volume.as_ref().map(clamp_volume_number),
            ResponseStatus::Error => None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SetVolumeCommand {
    pub volume: serde_json::Number,
}

impl SetVolumeCommand {
    pub fn new(volume: Volume) -> Self {
        SetVolumeCommand { volume: volume.into() }
    }

    pub fn volume(&self) -> Volume {
        clamp_volume_number(&self.volume)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ProtocolErrorKind {
    /// Client sent in some garbage
    BadInput,
    /// Something wasn't found
    NotFound,
    /// Storage or other server side failure
    InternalError,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ProtocolError {
    kind: ProtocolErrorKind,
    message: String,
}

impl ProtocolError {
    pub fn new<S: Into<String>>(kind: ProtocolErrorKind, s: S) -> ProtocolError {
        ProtocolError {
            kind,
            message: s.into(),
        }
    }

    pub fn kind(&self) -> ProtocolErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ProtocolError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_response() {
        let res: VolumeResponse = serde_json::from_str(r#"{"status":"success","volume":40}"#).unwrap();
        assert_eq!(res.volume(), Some(40));

        let res: VolumeResponse = serde_json::from_str(r#"{"status":"success","volume":140.5}"#).unwrap();
        assert_eq!(res.volume(), Some(100));

        let res: VolumeResponse = serde_json::from_str(r#"{"status":"success"}"#).unwrap();
        assert_eq!(res.volume(), None);

        let res: VolumeResponse = serde_json::from_str(r#"{"status":"error","volume":40}"#).unwrap();
        assert_eq!(res.volume(), None);

        assert!(serde_json::from_str::<VolumeResponse>(r#"{"status":"maybe"}"#).is_err());
    }

    #[test]
    fn test_wire_format() {
        assert_eq!(
            serde_json::to_string(&VolumeResponse::success(30)).unwrap(),
            r#"{"status":"success","volume":30}"#
        );
        let err = ProtocolError::new(ProtocolErrorKind::BadInput, "no volume");
        assert_eq!(
            serde_json::to_string(&VolumeResponse::error(&err)).unwrap(),
            r#"{"status":"error","message":"no volume"}"#
        );
        assert_eq!(
            serde_json::to_string(&SetVolumeCommand::new(0)).unwrap(),
            r#"{"volume":0}"#
        );
    }

    #[test]
    fn test_set_volume_command() {
        let cmd: SetVolumeCommand = serde_json::from_str(r#"{"volume":-20}"#).unwrap();
        assert_eq!(cmd.volume(), 0);
        assert!(serde_json::from_str::<SetVolumeCommand>(r#"{"volume":"40"}"#).is_err());
    }
}
