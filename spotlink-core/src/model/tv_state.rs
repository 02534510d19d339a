use serde::{Deserialize, Serialize};

/// The confirmed in-meeting state of a TV endpoint, as last reported over
/// the signaling tier. Remotes layer optimistic values on top of this.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TvState {
    pub audio_muted: bool,
    pub video_muted: bool,
    pub screensharing: bool,
    pub tile_view: bool,
    pub in_meeting: Option<String>,
}
