use crate::config::SessionConfig;
use crate::peer::PeerLink;
use crate::reconnect::SupervisorCommand;
use crate::signaling::SignalingConnection;
use crate::transport::{LinkEvent, SignalingEvent};
use spotlink_core::RemoteAddress;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info};

/// Handle to the supervisor task that keeps a data channel alive toward
/// the activated remote address.
///
/// Retries run on a fixed delay with no attempt cap; they are suspended
/// while the signaling connection is down and resume exactly once when it
/// comes back. The task exits when the handle is dropped.
pub struct ReconnectSupervisor {
    cmd_tx: mpsc::UnboundedSender<SupervisorCommand>,
}

impl ReconnectSupervisor {
    pub fn spawn(signaling: SignalingConnection, link: PeerLink, config: &SessionConfig) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();

        let task = SupervisorTask {
            signaling_rx: signaling.subscribe(),
            link_rx: link.subscribe(),
            signaling,
            link,
            cmd_rx,
            active: None,
            retry: None,
            retry_delay: config.retry_delay,
        };

        tokio::spawn(task.run());

        Self { cmd_tx }
    }

    pub fn activate(&self, remote: RemoteAddress) {
        let _ = self.cmd_tx.send(SupervisorCommand::Activate { remote });
    }

    pub fn deactivate(&self) {
        let _ = self.cmd_tx.send(SupervisorCommand::Deactivate);
    }
}

struct SupervisorTask {
    signaling: SignalingConnection,
    link: PeerLink,
    cmd_rx: mpsc::UnboundedReceiver<SupervisorCommand>,
    signaling_rx: mpsc::UnboundedReceiver<SignalingEvent>,
    link_rx: mpsc::UnboundedReceiver<LinkEvent>,
    /// The remote address being supervised, if any.
    active: Option<RemoteAddress>,
    /// The single scheduled restart, tagged with the address it was
    /// scheduled for so a stale retry never starts a superseded link.
    retry: Option<(Instant, RemoteAddress)>,
    retry_delay: Duration,
}

impl SupervisorTask {
    async fn run(mut self) {
        info!("Reconnect supervisor started");

        loop {
            let retry_at = self.retry.as_ref().map(|(at, _)| *at);

            tokio::select! {
                cmd = self.cmd_rx.recv() => {
                    match cmd {
                        Some(c) => self.handle_command(c).await,
                        None => break,
                    }
                }

                Some(event) = self.signaling_rx.recv() => {
                    self.handle_signaling_event(event).await;
                }

                Some(event) = self.link_rx.recv() => {
                    self.handle_link_event(event).await;
                }

                _ = sleep_until(retry_at.unwrap_or_else(Instant::now)), if retry_at.is_some() => {
                    self.handle_retry_elapsed().await;
                }
            }
        }

        info!("Reconnect supervisor stopped");
    }

    async fn handle_command(&mut self, cmd: SupervisorCommand) {
        match cmd {
            SupervisorCommand::Activate { remote } => {
                debug!("Supervising link to {}", remote);
                self.active = Some(remote);

                if self.ensure_link_started().await {
                    self.cancel_retry();
                }
            }

            SupervisorCommand::Deactivate => {
                debug!("Link supervision deactivated");
                self.active = None;
                self.cancel_retry();
            }
        }
    }

    async fn handle_signaling_event(&mut self, event: SignalingEvent) {
        let SignalingEvent::ConnectedStateChanged(connected) = event else {
            return;
        };

        if self.active.is_none() {
            return;
        }

        if connected {
            // Resume path: a single immediate attempt replaces whatever
            // retry was scheduled before signaling went down.
            self.ensure_link_started().await;
            self.cancel_retry();
        } else {
            self.cancel_retry();
        }
    }

    async fn handle_link_event(&mut self, event: LinkEvent) {
        let LinkEvent::ReadyUpdate { remote, ready } = event else {
            return;
        };

        if self.active.as_ref() != Some(&remote) {
            return;
        }

        if ready {
            self.cancel_retry();
            return;
        }

        if !self.signaling.is_connected() {
            // Retries stay suspended until signaling comes back.
            return;
        }

        self.cancel_retry();

        info!("Will retry link to {} in {:?}", remote, self.retry_delay);
        self.retry = Some((Instant::now() + self.retry_delay, remote));
    }

    async fn handle_retry_elapsed(&mut self) {
        let Some((_, remote)) = self.retry.take() else {
            return;
        };

        if self.active.as_ref() != Some(&remote) {
            debug!("Skipping stale link retry for {}", remote);
            return;
        }

        self.ensure_link_started().await;
    }

    /// Starts a new link if there isn't a healthy one. Returns whether a
    /// start was issued.
    async fn ensure_link_started(&mut self) -> bool {
        let Some(remote) = self.active.clone() else {
            return false;
        };

        if !self.signaling.is_connected() {
            return false;
        }

        if self.link.is_active(&remote) {
            return false;
        }

        if self.link.has_connection(&remote) {
            // A connection object without an active channel is stale and
            // must be torn down before a fresh start.
            self.link.close(&remote).await;
        }

        info!("Starting link to {}", remote);
        self.link.start(remote).await;

        true
    }

    fn cancel_retry(&mut self) {
        if let Some((_, remote)) = self.retry.take() {
            debug!("Canceling scheduled link retry for {}", remote);
        }
    }
}
