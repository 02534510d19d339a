use spotlink_session::SignalingEvent;
use tokio::sync::mpsc::error::TryRecvError;

use crate::integration::{create_test_session, init_tracing};
use crate::utils::settle;

fn connected_changes(
    rx: &mut tokio::sync::mpsc::UnboundedReceiver<SignalingEvent>,
) -> Vec<bool> {
    let mut seen = Vec::new();

    loop {
        match rx.try_recv() {
            Ok(SignalingEvent::ConnectedStateChanged(connected)) => seen.push(connected),
            Ok(_) => continue,
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => return seen,
        }
    }
}

// Repeated identical transitions from the transport collapse into one
// emission per actual change.
#[tokio::test(start_paused = true)]
async fn duplicate_transitions_emit_once() {
    init_tracing();

    let session = create_test_session();
    let mut events = session.signaling.subscribe();

    let sink = session.signaling.event_sink();
    for connected in [true, true, false, false, true] {
        sink.send(SignalingEvent::ConnectedStateChanged(connected)).unwrap();
    }
    settle().await;

    assert_eq!(connected_changes(&mut events), vec![true, false, true]);
    assert!(session.signaling.is_connected());
}

// The initial disconnected report is not a transition.
#[tokio::test(start_paused = true)]
async fn initial_disconnected_report_is_silent() {
    init_tracing();

    let session = create_test_session();
    let mut events = session.signaling.subscribe();

    session
        .signaling
        .event_sink()
        .send(SignalingEvent::ConnectedStateChanged(false))
        .unwrap();
    settle().await;

    assert_eq!(connected_changes(&mut events), Vec::<bool>::new());
    assert!(!session.signaling.is_connected());
}
