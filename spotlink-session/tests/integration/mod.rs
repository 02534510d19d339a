pub mod controller_tests;

use std::sync::Arc;
use tracing::Level;

use spotlink_core::RemoteAddress;
use spotlink_session::{
    PeerEvent, PeerLink, ReconnectSupervisor, SessionConfig, SignalingConnection, SignalingEvent,
};

use crate::utils::{MockPeerSignaling, MockSignalingBackend, settle};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub struct TestSession {
    pub signaling: SignalingConnection,
    pub link: PeerLink,
    pub supervisor: ReconnectSupervisor,
    pub signaling_backend: Arc<MockSignalingBackend>,
    pub peer_backend: Arc<MockPeerSignaling>,
}

pub fn create_test_session() -> TestSession {
    let signaling_backend = Arc::new(MockSignalingBackend::new());
    let peer_backend = Arc::new(MockPeerSignaling::new());

    let signaling = SignalingConnection::new(signaling_backend.clone());
    let link = PeerLink::new(peer_backend.clone());
    let supervisor =
        ReconnectSupervisor::spawn(signaling.clone(), link.clone(), &SessionConfig::default());

    TestSession {
        signaling,
        link,
        supervisor,
        signaling_backend,
        peer_backend,
    }
}

impl TestSession {
    pub async fn set_signaling_connected(&self, connected: bool) {
        self.signaling_backend.set_connected(connected);
        self.signaling
            .event_sink()
            .send(SignalingEvent::ConnectedStateChanged(connected))
            .expect("signaling event sink closed");
        settle().await;
    }

    /// The data channel comes up for the address.
    pub async fn raise_data_channel(&self, remote: &RemoteAddress) {
        self.peer_backend.set_link(remote, true);
        self.link
            .event_sink()
            .send(PeerEvent::DataChannelReadyUpdate {
                remote: remote.clone(),
                ready: true,
            })
            .expect("peer event sink closed");
        settle().await;
    }

    /// The data channel drops; the connection object stays behind stale.
    pub async fn drop_data_channel(&self, remote: &RemoteAddress) {
        self.peer_backend.set_link(remote, false);
        self.link
            .event_sink()
            .send(PeerEvent::DataChannelReadyUpdate {
                remote: remote.clone(),
                ready: false,
            })
            .expect("peer event sink closed");
        settle().await;
    }
}
