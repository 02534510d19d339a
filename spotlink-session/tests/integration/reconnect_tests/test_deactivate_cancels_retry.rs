use spotlink_session::config::RETRY_DELAY;

use crate::integration::{create_test_session, init_tracing};
use crate::utils::{settle, tv_address};

#[tokio::test(start_paused = true)]
async fn deactivating_before_signaling_returns_prevents_the_start() {
    init_tracing();

    let session = create_test_session();
    let remote = tv_address();

    session.set_signaling_connected(false).await;
    session.supervisor.activate(remote);
    settle().await;

    assert_eq!(session.peer_backend.start_count(), 0);

    session.supervisor.deactivate();
    settle().await;

    session.set_signaling_connected(true).await;
    tokio::time::advance(RETRY_DELAY).await;
    settle().await;

    assert_eq!(session.peer_backend.start_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn deactivating_cancels_a_scheduled_retry() {
    init_tracing();

    let session = create_test_session();
    let remote = tv_address();

    session.set_signaling_connected(true).await;
    session.supervisor.activate(remote.clone());
    settle().await;

    session.raise_data_channel(&remote).await;
    session.drop_data_channel(&remote).await;

    session.supervisor.deactivate();
    settle().await;

    tokio::time::advance(RETRY_DELAY).await;
    settle().await;

    assert_eq!(session.peer_backend.start_count(), 1);
}

// Deactivation only suppresses restarts. A healthy channel is left alone,
// and so is one that outlives a signaling drop.
#[tokio::test(start_paused = true)]
async fn deactivating_never_closes_a_healthy_channel() {
    init_tracing();

    let session = create_test_session();
    let remote = tv_address();

    session.set_signaling_connected(true).await;
    session.peer_backend.set_link(&remote, true);

    session.supervisor.activate(remote.clone());
    settle().await;

    assert_eq!(session.peer_backend.start_count(), 0);

    session.supervisor.deactivate();
    settle().await;

    tokio::time::advance(RETRY_DELAY).await;
    settle().await;

    assert_eq!(session.peer_backend.close_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn signaling_loss_never_closes_a_healthy_channel() {
    init_tracing();

    let session = create_test_session();
    let remote = tv_address();

    session.set_signaling_connected(true).await;
    session.peer_backend.set_link(&remote, true);

    session.supervisor.activate(remote);
    settle().await;

    session.set_signaling_connected(false).await;

    tokio::time::advance(RETRY_DELAY).await;
    settle().await;

    assert_eq!(session.peer_backend.close_count(), 0);
}
