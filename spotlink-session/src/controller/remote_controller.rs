use crate::command::CommandChannel;
use crate::controller::TvStateStore;
use crate::error::CommandError;
use crate::peer::PeerLink;
use crate::signaling::SignalingConnection;
use crate::tracker::RequestStateTracker;
use crate::transport::{LinkEvent, SignalingEvent};
use spotlink_core::{
    RemoteAddress, RemoteCommand, RequestKind, StatusMessage, TvState, VolumeDirection,
};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

struct ControllerInner {
    channel: CommandChannel,
    tracker: RequestStateTracker,
    tv_state: TvStateStore,
    remote: Mutex<Option<RemoteAddress>>,
}

/// The remote-side command surface: typed command methods with optimistic
/// request tracking, plus state reads resolving the optimistic value over
/// the last confirmed TV state.
///
/// Commands issued while no transport can carry them are dropped without
/// creating a tracker entry.
#[derive(Clone)]
pub struct RemoteController {
    inner: Arc<ControllerInner>,
}

impl RemoteController {
    pub fn new(signaling: SignalingConnection, link: PeerLink) -> Self {
        let tv_state = TvStateStore::new();

        let mut signaling_rx = signaling.subscribe();
        let mut link_rx = link.subscribe();

        let store = tv_state.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    event = signaling_rx.recv() => match event {
                        Some(SignalingEvent::StatusReceived(status)) => {
                            apply_status(&store, status);
                        }
                        Some(_) => {}
                        None => break,
                    },

                    event = link_rx.recv() => match event {
                        Some(LinkEvent::StatusReceived { status, .. }) => {
                            apply_status(&store, status);
                        }
                        Some(_) => {}
                        None => break,
                    },
                }
            }
        });

        Self {
            inner: Arc::new(ControllerInner {
                channel: CommandChannel::new(signaling, link),
                tracker: RequestStateTracker::new(),
                tv_state,
                remote: Mutex::new(None),
            }),
        }
    }

    /// Sets the TV address commands are sent to, as learned from the
    /// signaling session.
    pub fn set_remote(&self, remote: RemoteAddress) {
        *self.inner.remote.lock().unwrap() = Some(remote);
    }

    pub fn clear_remote(&self) {
        self.inner.remote.lock().unwrap().take();
    }

    pub fn tracker(&self) -> RequestStateTracker {
        self.inner.tracker.clone()
    }

    pub fn tv_state(&self) -> TvState {
        self.inner.tv_state.snapshot()
    }

    pub async fn set_audio_mute(&self, mute: bool) -> Result<(), CommandError> {
        self.send_tracked(
            RequestKind::AudioMute,
            Some(mute),
            RemoteCommand::SetAudioMute { mute },
        )
        .await
    }

    pub async fn set_video_mute(&self, mute: bool) -> Result<(), CommandError> {
        self.send_tracked(
            RequestKind::VideoMute,
            Some(mute),
            RemoteCommand::SetVideoMute { mute },
        )
        .await
    }

    pub async fn set_tile_view(&self, tile_view: bool) -> Result<(), CommandError> {
        self.send_tracked(
            RequestKind::TileView,
            Some(tile_view),
            RemoteCommand::SetTileView { tile_view },
        )
        .await
    }

    pub async fn set_screensharing(&self, on: bool) -> Result<(), CommandError> {
        self.send_tracked(
            RequestKind::Screenshare,
            Some(on),
            RemoteCommand::SetScreensharing { on },
        )
        .await
    }

    pub async fn hang_up(&self, skip_feedback: bool) -> Result<(), CommandError> {
        self.send_tracked(
            RequestKind::HangUp,
            None,
            RemoteCommand::HangUp { skip_feedback },
        )
        .await
    }

    pub async fn adjust_volume(&self, direction: VolumeDirection) -> Result<(), CommandError> {
        self.send_tracked(
            RequestKind::Volume,
            None,
            RemoteCommand::AdjustVolume { direction },
        )
        .await
    }

    pub async fn send_touch_tones(&self, tones: String) -> Result<(), CommandError> {
        self.send_tracked(
            RequestKind::TouchTones,
            None,
            RemoteCommand::SendTouchTones { tones },
        )
        .await
    }

    pub async fn submit_feedback(&self, score: u8, message: String) -> Result<(), CommandError> {
        self.send_tracked(
            RequestKind::Feedback,
            None,
            RemoteCommand::SubmitFeedback { score, message },
        )
        .await
    }

    pub async fn go_to_meeting(&self, meeting_name: String) -> Result<(), CommandError> {
        self.send_tracked(
            RequestKind::JoinMeeting,
            None,
            RemoteCommand::GoToMeeting { meeting_name },
        )
        .await
    }

    /// Current audio mute as the UI should render it: the optimistic value
    /// of a pending request, or the confirmed state otherwise.
    pub fn audio_muted(&self) -> bool {
        self.resolve(RequestKind::AudioMute, |s| s.audio_muted)
    }

    pub fn video_muted(&self) -> bool {
        self.resolve(RequestKind::VideoMute, |s| s.video_muted)
    }

    pub fn tile_view(&self) -> bool {
        self.resolve(RequestKind::TileView, |s| s.tile_view)
    }

    pub fn screensharing(&self) -> bool {
        self.resolve(RequestKind::Screenshare, |s| s.screensharing)
    }

    fn resolve(&self, kind: RequestKind, confirmed: impl Fn(&TvState) -> bool) -> bool {
        self.inner
            .tracker
            .optimistic_value(kind)
            .unwrap_or_else(|| confirmed(&self.inner.tv_state.snapshot()))
    }

    async fn send_tracked(
        &self,
        kind: RequestKind,
        expected: Option<bool>,
        command: RemoteCommand,
    ) -> Result<(), CommandError> {
        let remote = self.inner.remote.lock().unwrap().clone();
        let Some(remote) = remote else {
            warn!("Dropping {:?}, no TV address known", kind);
            return Err(CommandError::TransportUnavailable);
        };

        // Commands that cannot be carried right now are dropped before any
        // optimistic state is recorded.
        if !self.inner.channel.is_available(&remote) {
            warn!("Dropping {:?}, no transport available", kind);
            return Err(CommandError::TransportUnavailable);
        }

        let channel = self.inner.channel.clone();
        self.inner
            .tracker
            .track(kind, expected, async move {
                channel.send(&remote, &command).await
            })
            .await
    }
}

fn apply_status(store: &TvStateStore, status: StatusMessage) {
    match status {
        StatusMessage::TvStateChanged { state } => store.apply(state),
        StatusMessage::JoinCodeChanged { .. } => {
            debug!("Join code update received");
        }
    }
}
