use crate::error::CommandError;
use crate::peer::PeerLink;
use crate::signaling::SignalingConnection;
use spotlink_core::{RemoteAddress, RemoteCommand};
use tracing::{debug, warn};

/// Sends remote-control commands over the best currently-ready transport:
/// the direct data channel when it is up, the signaling tier otherwise.
/// The choice is re-evaluated on every send.
#[derive(Clone)]
pub struct CommandChannel {
    signaling: SignalingConnection,
    link: PeerLink,
}

impl CommandChannel {
    pub fn new(signaling: SignalingConnection, link: PeerLink) -> Self {
        Self { signaling, link }
    }

    pub fn signaling(&self) -> &SignalingConnection {
        &self.signaling
    }

    pub fn link(&self) -> &PeerLink {
        &self.link
    }

    /// Whether a command toward the remote could currently be carried at
    /// all.
    pub fn is_available(&self, to: &RemoteAddress) -> bool {
        self.link.is_active(to) || self.signaling.is_connected()
    }

    /// Delivery is not guaranteed: with both transports down the command
    /// is dropped and `TransportUnavailable` returned.
    pub async fn send(
        &self,
        to: &RemoteAddress,
        command: &RemoteCommand,
    ) -> Result<(), CommandError> {
        if self.link.is_active(to) {
            return self.link.send_command(to, command).await;
        }

        if self.signaling.is_connected() {
            debug!("Data channel not ready, falling back to signaling");
            return self.signaling.send_command(to, command).await;
        }

        warn!("Dropping command for {}, no transport available", to);
        Err(CommandError::TransportUnavailable)
    }
}
