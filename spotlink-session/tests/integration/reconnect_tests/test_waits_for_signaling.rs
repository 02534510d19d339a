use spotlink_session::config::RETRY_DELAY;

use crate::integration::{create_test_session, init_tracing};
use crate::utils::{settle, tv_address};

// Activating while signaling is down must not start anything, no matter
// how much time passes; the one start happens when signaling comes back.
#[tokio::test(start_paused = true)]
async fn waits_for_signaling_and_starts_exactly_once() {
    init_tracing();

    let session = create_test_session();
    let remote = tv_address();

    session.set_signaling_connected(false).await;

    session.supervisor.activate(remote.clone());
    settle().await;

    assert_eq!(session.peer_backend.start_count(), 0);

    tokio::time::advance(3 * RETRY_DELAY).await;
    settle().await;

    assert_eq!(session.peer_backend.start_count(), 0);

    session.set_signaling_connected(true).await;

    assert_eq!(session.peer_backend.start_calls(), vec![remote]);
}
