use bytes::Bytes;
use spotlink_core::{RemoteAddress, RemoteCommand, RequestId, StatusMessage};

/// Events reported by the signaling backend, fanned out by
/// `SignalingConnection` after connected-state deduplication.
#[derive(Debug, Clone)]
pub enum SignalingEvent {
    ConnectedStateChanged(bool),
    StatusReceived(StatusMessage),
    CommandReceived {
        from: RemoteAddress,
        command: RemoteCommand,
    },
}

/// Raw events reported by the peer-connection backend.
#[derive(Debug, Clone)]
pub enum PeerEvent {
    DataChannelReadyUpdate { remote: RemoteAddress, ready: bool },
    MessageReceived { remote: RemoteAddress, data: Bytes },
}

/// Events fanned out by `PeerLink` after frame decoding and ack
/// correlation.
#[derive(Debug, Clone)]
pub enum LinkEvent {
    ReadyUpdate {
        remote: RemoteAddress,
        ready: bool,
    },
    CommandReceived {
        remote: RemoteAddress,
        request_id: RequestId,
        command: RemoteCommand,
    },
    StatusReceived {
        remote: RemoteAddress,
        status: StatusMessage,
    },
}
