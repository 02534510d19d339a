use crate::error::CommandError;
use crate::transport::{SignalingBackend, SignalingEvent};
use spotlink_core::{RemoteAddress, RemoteCommand, SessionCredentials, StatusMessage};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

struct ConnectionInner {
    backend: Arc<dyn SignalingBackend>,
    state: Mutex<ConnectionState>,
    credentials: Mutex<Option<SessionCredentials>>,
    listeners: Mutex<Vec<mpsc::UnboundedSender<SignalingEvent>>>,
}

/// Long-lived connection to the discovery/signaling backend.
///
/// Tracks the connected state from the backend's own I/O events and fans
/// them out to subscribers, emitting a connected-state change exactly once
/// per actual transition.
#[derive(Clone)]
pub struct SignalingConnection {
    inner: Arc<ConnectionInner>,
    event_tx: mpsc::UnboundedSender<SignalingEvent>,
}

impl SignalingConnection {
    pub fn new(backend: Arc<dyn SignalingBackend>) -> Self {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();

        let inner = Arc::new(ConnectionInner {
            backend,
            state: Mutex::new(ConnectionState::Disconnected),
            credentials: Mutex::new(None),
            listeners: Mutex::new(Vec::new()),
        });

        let pump = Arc::clone(&inner);
        tokio::spawn(async move {
            while let Some(event) = event_rx.recv().await {
                pump.handle_event(event);
            }
        });

        Self { inner, event_tx }
    }

    /// The channel the backend delivers its raw events into.
    pub fn event_sink(&self) -> mpsc::UnboundedSender<SignalingEvent> {
        self.event_tx.clone()
    }

    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<SignalingEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.inner.listeners.lock().unwrap().push(tx);
        rx
    }

    pub fn state(&self) -> ConnectionState {
        *self.inner.state.lock().unwrap()
    }

    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    pub fn credentials(&self) -> Option<SessionCredentials> {
        self.inner.credentials.lock().unwrap().clone()
    }

    /// Starts a connection attempt. Failures settle into the Disconnected
    /// state; the transport retries on its own and reports the eventual
    /// transition through the event sink.
    pub async fn connect(&self, credentials: SessionCredentials) {
        if self.inner.backend.is_connected() {
            debug!("Signaling already connected, keeping existing session");
            return;
        }

        info!("Connecting to signaling room '{}'", credentials.room_name);

        *self.inner.credentials.lock().unwrap() = Some(credentials.clone());
        *self.inner.state.lock().unwrap() = ConnectionState::Connecting;

        if let Err(e) = self.inner.backend.connect(credentials).await {
            warn!("Signaling connect attempt failed: {:#}", e);
            *self.inner.state.lock().unwrap() = ConnectionState::Disconnected;
        }
    }

    pub async fn disconnect(&self) {
        self.inner.credentials.lock().unwrap().take();
        self.inner.backend.disconnect().await;

        // Settle locally even if the transport never reports the drop.
        self.inner
            .handle_event(SignalingEvent::ConnectedStateChanged(false));
    }

    pub async fn send_command(
        &self,
        to: &RemoteAddress,
        command: &RemoteCommand,
    ) -> Result<(), CommandError> {
        debug!("Sending command to {} over signaling", to);

        self.inner
            .backend
            .send_command(to, command)
            .await
            .map_err(|e| CommandError::Rejected(format!("{e:#}")))
    }

    pub async fn broadcast_status(&self, status: &StatusMessage) -> anyhow::Result<()> {
        self.inner.backend.broadcast_status(status).await
    }

    pub async fn set_lock(&self, lock: &str) -> anyhow::Result<()> {
        self.inner.backend.set_lock(lock).await
    }
}

impl ConnectionInner {
    fn handle_event(&self, event: SignalingEvent) {
        match event {
            SignalingEvent::ConnectedStateChanged(connected) => {
                let changed = {
                    let mut state = self.state.lock().unwrap();
                    let was_connected = *state == ConnectionState::Connected;
                    *state = if connected {
                        ConnectionState::Connected
                    } else {
                        ConnectionState::Disconnected
                    };
                    was_connected != connected
                };

                if changed {
                    info!(
                        "Signaling {}",
                        if connected { "connected" } else { "disconnected" }
                    );
                    self.fan_out(SignalingEvent::ConnectedStateChanged(connected));
                }
            }
            other => self.fan_out(other),
        }
    }

    fn fan_out(&self, event: SignalingEvent) {
        self.listeners
            .lock()
            .unwrap()
            .retain(|tx| tx.send(event.clone()).is_ok());
    }
}
