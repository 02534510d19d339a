use crate::integration::{create_test_session, init_tracing};
use crate::utils::{settle, tv_address};

#[tokio::test(start_paused = true)]
async fn activating_with_signaling_connected_starts_the_link_once() {
    init_tracing();

    let session = create_test_session();
    let remote = tv_address();

    session.set_signaling_connected(true).await;

    session.supervisor.activate(remote.clone());
    settle().await;

    assert_eq!(session.peer_backend.start_calls(), vec![remote]);
}

#[tokio::test(start_paused = true)]
async fn activating_with_a_healthy_channel_does_nothing() {
    init_tracing();

    let session = create_test_session();
    let remote = tv_address();

    session.set_signaling_connected(true).await;
    session.peer_backend.set_link(&remote, true);

    session.supervisor.activate(remote);
    settle().await;

    assert_eq!(session.peer_backend.start_count(), 0);
    assert_eq!(session.peer_backend.close_count(), 0);
}
