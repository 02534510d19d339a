use crate::error::CommandError;
use crate::transport::{LinkEvent, PeerEvent, PeerSignaling};
use bytes::Bytes;
use dashmap::DashMap;
use spotlink_core::{LinkFrame, RemoteAddress, RemoteCommand, RequestId, StatusMessage};
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// Lifecycle of the data channel toward one remote address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Idle,
    Starting,
    Ready,
    Closed,
}

struct PendingAck {
    remote: RemoteAddress,
    tx: oneshot::Sender<Result<(), CommandError>>,
}

struct LinkInner {
    backend: Arc<dyn PeerSignaling>,
    states: DashMap<RemoteAddress, LinkState>,
    pending: DashMap<RequestId, PendingAck>,
    listeners: Mutex<Vec<mpsc::UnboundedSender<LinkEvent>>>,
}

/// Direct data channel toward paired remote addresses, negotiated through
/// the signaling backend. Handles command/ack correlation on top of the
/// raw channel and fans out readiness transitions.
#[derive(Clone)]
pub struct PeerLink {
    inner: Arc<LinkInner>,
    event_tx: mpsc::UnboundedSender<PeerEvent>,
}

impl PeerLink {
    pub fn new(backend: Arc<dyn PeerSignaling>) -> Self {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();

        let inner = Arc::new(LinkInner {
            backend,
            states: DashMap::new(),
            pending: DashMap::new(),
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
    pub fn event_sink(&self) -> mpsc::UnboundedSender<PeerEvent> {
        self.event_tx.clone()
    }

    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<LinkEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.inner.listeners.lock().unwrap().push(tx);
        rx
    }

    pub fn state(&self, remote: &RemoteAddress) -> LinkState {
        self.inner
            .states
            .get(remote)
            .map(|s| *s)
            .unwrap_or(LinkState::Idle)
    }

    pub fn is_active(&self, remote: &RemoteAddress) -> bool {
        self.inner.backend.is_data_channel_active(remote)
    }

    pub fn has_connection(&self, remote: &RemoteAddress) -> bool {
        self.inner.backend.has_connection(remote)
    }

    /// Begins data channel negotiation toward the remote. Failures are
    /// swallowed here; the supervisor's retry policy owns recovery.
    pub async fn start(&self, remote: RemoteAddress) {
        self.inner
            .states
            .insert(remote.clone(), LinkState::Starting);

        if let Err(e) = self.inner.backend.start(&remote).await {
            warn!("Failed to start link to {}: {:#}", remote, e);
            self.inner.states.insert(remote, LinkState::Closed);
        }
    }

    pub async fn close(&self, remote: &RemoteAddress) {
        self.inner.backend.close_connection(remote).await;
        self.inner.states.remove(remote);
        self.inner.fail_pending(remote, "connection closed");
    }

    /// Sends a command over the data channel and waits for the
    /// counterpart's ack frame.
    pub async fn send_command(
        &self,
        remote: &RemoteAddress,
        command: &RemoteCommand,
    ) -> Result<(), CommandError> {
        if !self.is_active(remote) {
            return Err(CommandError::TransportUnavailable);
        }

        let request_id = RequestId::new();
        let (tx, rx) = oneshot::channel();

        self.inner.pending.insert(
            request_id,
            PendingAck {
                remote: remote.clone(),
                tx,
            },
        );

        debug!("Sending command over the data channel to {}", remote);

        let frame = LinkFrame::Command {
            request_id,
            command: command.clone(),
        };

        if let Err(e) = self.send_frame(remote, &frame).await {
            self.inner.pending.remove(&request_id);
            return Err(CommandError::Rejected(format!("{e:#}")));
        }

        match rx.await {
            Ok(result) => result,
            Err(_) => Err(CommandError::Rejected("link dropped before ack".into())),
        }
    }

    pub async fn send_status(
        &self,
        remote: &RemoteAddress,
        status: &StatusMessage,
    ) -> Result<(), CommandError> {
        let frame = LinkFrame::Status {
            message: status.clone(),
        };

        self.send_frame(remote, &frame)
            .await
            .map_err(|e| CommandError::Rejected(format!("{e:#}")))
    }

    /// Acknowledges a command received over the data channel (TV side).
    pub async fn acknowledge(
        &self,
        remote: &RemoteAddress,
        request_id: RequestId,
    ) -> Result<(), CommandError> {
        self.send_frame(remote, &LinkFrame::Ack { request_id })
            .await
            .map_err(|e| CommandError::Rejected(format!("{e:#}")))
    }

    async fn send_frame(&self, remote: &RemoteAddress, frame: &LinkFrame) -> anyhow::Result<()> {
        let data = serde_json::to_vec(frame)?;
        self.inner.backend.send_message(remote, Bytes::from(data)).await
    }
}

impl LinkInner {
    fn handle_event(&self, event: PeerEvent) {
        match event {
            PeerEvent::DataChannelReadyUpdate { remote, ready } => {
                info!(
                    "Data channel for {} is {}",
                    remote,
                    if ready { "ready" } else { "down" }
                );

                self.states.insert(
                    remote.clone(),
                    if ready { LinkState::Ready } else { LinkState::Closed },
                );

                if !ready {
                    self.fail_pending(&remote, "data channel closed");
                }

                self.fan_out(LinkEvent::ReadyUpdate { remote, ready });
            }

            PeerEvent::MessageReceived { remote, data } => {
                match serde_json::from_slice::<LinkFrame>(&data) {
                    Ok(LinkFrame::Ack { request_id }) => match self.pending.remove(&request_id) {
                        Some((_, ack)) => {
                            let _ = ack.tx.send(Ok(()));
                        }
                        None => warn!("No in-flight request for ack {}", request_id),
                    },
                    Ok(LinkFrame::Command {
                        request_id,
                        command,
                    }) => {
                        self.fan_out(LinkEvent::CommandReceived {
                            remote,
                            request_id,
                            command,
                        });
                    }
                    Ok(LinkFrame::Status { message }) => {
                        self.fan_out(LinkEvent::StatusReceived {
                            remote,
                            status: message,
                        });
                    }
                    Err(e) => warn!("Failed to parse link frame from {}: {}", remote, e),
                }
            }
        }
    }

    fn fail_pending(&self, remote: &RemoteAddress, reason: &str) {
        let stale: Vec<RequestId> = self
            .pending
            .iter()
            .filter(|entry| entry.value().remote == *remote)
            .map(|entry| *entry.key())
            .collect();

        if stale.is_empty() {
            return;
        }

        debug!("Rejecting {} in-flight requests for {}", stale.len(), remote);

        for request_id in stale {
            if let Some((_, ack)) = self.pending.remove(&request_id) {
                let _ = ack.tx.send(Err(CommandError::Rejected(reason.to_string())));
            }
        }
    }

    fn fan_out(&self, event: LinkEvent) {
        self.listeners
            .lock()
            .unwrap()
            .retain(|tx| tx.send(event.clone()).is_ok());
    }
}
