use thiserror::Error;

/// Failures surfaced to callers sending remote-control commands.
///
/// Channel and signaling losses are not represented here; those are
/// recovered transparently by the reconnection policy.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    /// Neither the data channel nor the signaling tier can carry the
    /// command right now. The command is dropped.
    #[error("no transport is currently available")]
    TransportUnavailable,

    /// The command was sent but rejected, or the transport failed while it
    /// was in flight.
    #[error("command rejected: {0}")]
    Rejected(String),
}
