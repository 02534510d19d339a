use crate::model::tv_state::TvState;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VolumeDirection {
    Up,
    Down,
}

/// A discrete control command sent from a remote to the TV endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", content = "data", rename_all = "camelCase")]
pub enum RemoteCommand {
    GoToMeeting {
        meeting_name: String,
    },
    HangUp {
        skip_feedback: bool,
    },
    SetAudioMute {
        mute: bool,
    },
    SetVideoMute {
        mute: bool,
    },
    SetScreensharing {
        on: bool,
    },
    SetTileView {
        tile_view: bool,
    },
    AdjustVolume {
        direction: VolumeDirection,
    },
    SendTouchTones {
        tones: String,
    },
    SubmitFeedback {
        score: u8,
        message: String,
    },
}

/// A status update pushed from the TV endpoint to its paired remotes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "update", content = "data", rename_all = "camelCase")]
pub enum StatusMessage {
    JoinCodeChanged { join_code: String },
    TvStateChanged { state: TvState },
}
