use crate::model::command::{RemoteCommand, StatusMessage};
use crate::model::request::RequestId;
use serde::{Deserialize, Serialize};

/// Framing for messages exchanged over an established peer data channel.
///
/// Commands carry a request id so the TV side can acknowledge them
/// individually; the sender resolves its in-flight request on the matching
/// `Ack`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", content = "d")]
pub enum LinkFrame {
    Command {
        request_id: RequestId,
        command: RemoteCommand,
    },
    Ack {
        request_id: RequestId,
    },
    Status {
        message: StatusMessage,
    },
}
