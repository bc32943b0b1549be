use serde::{Deserialize, Serialize};

/// A single entry of a playlist as the MixQ server reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub album: String,
    /// Length in whole seconds.
    #[serde(default)]
    pub duration: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerState {
    Playing,
    Paused,
    #[default]
    #[serde(other)]
    Stopped,
}

/// Player status from `GET /current_track`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentTrack {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub album: String,
    pub duration: u64,
    pub state: PlayerState,
    pub elapsed: f64,
    pub remaining: f64,
}

impl CurrentTrack {
    /// True when the player reports a track loaded, playing or paused.
    pub fn has_track(&self) -> bool {
        !self.id.is_empty()
    }
}

/// Transport actions accepted by `POST /control`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlAction {
    #[serde(rename = "playpause")]
    PlayPause,
    #[serde(rename = "next track")]
    NextTrack,
    #[serde(rename = "previous track")]
    PreviousTrack,
}

impl ControlAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlAction::PlayPause => "playpause",
            ControlAction::NextTrack => "next track",
            ControlAction::PreviousTrack => "previous track",
        }
    }
}
