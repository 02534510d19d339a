use std::time::Duration;

use spotlink_session::config::RETRY_DELAY;

use crate::integration::{create_test_session, init_tracing};
use crate::utils::{settle, tv_address};

// After the data channel drops, the restart happens once the fixed retry
// delay has elapsed, and not before.
#[tokio::test(start_paused = true)]
async fn restarts_the_link_after_the_retry_delay() {
    init_tracing();

    let session = create_test_session();
    let remote = tv_address();

    session.set_signaling_connected(true).await;
    session.supervisor.activate(remote.clone());
    settle().await;

    assert_eq!(session.peer_backend.start_count(), 1);

    session.raise_data_channel(&remote).await;
    session.drop_data_channel(&remote).await;

    tokio::time::advance(RETRY_DELAY - Duration::from_millis(10)).await;
    settle().await;

    assert_eq!(session.peer_backend.start_count(), 1);

    tokio::time::advance(Duration::from_millis(20)).await;
    settle().await;

    assert_eq!(session.peer_backend.start_count(), 2);
    assert_eq!(session.peer_backend.start_calls()[1], remote);
}
