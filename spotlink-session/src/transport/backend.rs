use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use spotlink_core::{RemoteAddress, RemoteCommand, SessionCredentials, StatusMessage};

/// The external signaling transport. Implementations own their wire
/// framing and internal retry policy; this layer only consumes the
/// connected/disconnected transitions they report through the event sink
/// handed over at wiring time.
#[async_trait]
pub trait SignalingBackend: Send + Sync {
    async fn connect(&self, credentials: SessionCredentials) -> Result<()>;

    async fn disconnect(&self);

    fn is_connected(&self) -> bool;

    /// Sends a command to a specific counterpart and waits for its
    /// transport-level acknowledgment.
    async fn send_command(&self, to: &RemoteAddress, command: &RemoteCommand) -> Result<()>;

    /// Broadcasts a status update to every device in the session room.
    async fn broadcast_status(&self, status: &StatusMessage) -> Result<()>;

    /// Replaces the room lock, invalidating previously issued join codes.
    async fn set_lock(&self, lock: &str) -> Result<()>;
}

/// The external peer-connection machinery negotiating direct data
/// channels through the signaling backend.
#[async_trait]
pub trait PeerSignaling: Send + Sync {
    async fn start(&self, remote: &RemoteAddress) -> Result<()>;

    async fn close_connection(&self, remote: &RemoteAddress);

    /// Whether any peer connection object exists for the address,
    /// regardless of data channel health.
    fn has_connection(&self, remote: &RemoteAddress) -> bool;

    fn is_data_channel_active(&self, remote: &RemoteAddress) -> bool;

    /// Sends an opaque payload over the established data channel.
    async fn send_message(&self, remote: &RemoteAddress, data: Bytes) -> Result<()>;
}
