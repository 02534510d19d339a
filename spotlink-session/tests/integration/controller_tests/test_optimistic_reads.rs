use spotlink_core::{RequestKind, RequestState, StatusMessage, TvState};
use spotlink_session::{RemoteController, SignalingEvent};

use crate::integration::{create_test_session, init_tracing};
use crate::utils::{settle, tv_address};

// While a mute request is pending the UI reads the expected value; once
// it settles the confirmed TV state is authoritative again.
#[tokio::test(start_paused = true)]
async fn pending_request_overrides_the_confirmed_state() {
    init_tracing();

    let session = create_test_session();
    let controller = RemoteController::new(session.signaling.clone(), session.link.clone());
    let remote = tv_address();

    controller.set_remote(remote);
    session.set_signaling_connected(true).await;

    assert!(!controller.audio_muted());

    session.signaling_backend.set_stall_commands(true);

    let in_flight = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.set_audio_mute(true).await })
    };
    settle().await;

    // Optimistic value while the command is in flight.
    assert!(controller.audio_muted());
    assert_eq!(
        controller.tracker().state_of(RequestKind::AudioMute),
        Some(RequestState::Pending)
    );

    session.signaling_backend.release_commands();
    in_flight.await.unwrap().expect("command resolves");

    // Confirmed state takes over after the ack; the TV has not reported
    // the change yet.
    assert!(!controller.audio_muted());

    session
        .signaling
        .event_sink()
        .send(SignalingEvent::StatusReceived(StatusMessage::TvStateChanged {
            state: TvState {
                audio_muted: true,
                ..TvState::default()
            },
        }))
        .unwrap();
    settle().await;

    assert!(controller.audio_muted());
}

// A rejected command leaves the confirmed state untouched.
#[tokio::test(start_paused = true)]
async fn rejected_request_falls_back_to_the_confirmed_state() {
    init_tracing();

    let session = create_test_session();
    let controller = RemoteController::new(session.signaling.clone(), session.link.clone());
    let remote = tv_address();

    controller.set_remote(remote);
    session.set_signaling_connected(true).await;
    session.signaling_backend.set_reject_commands(true);

    let result = controller.set_tile_view(true).await;

    assert!(result.is_err());
    assert_eq!(
        controller.tracker().state_of(RequestKind::TileView),
        Some(RequestState::Error)
    );
    assert!(!controller.tile_view());
}
