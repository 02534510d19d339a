use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// A short-lived join code a remote exchanges for connection credentials.
///
/// The room name is stable for the lifetime of the owning session; the lock
/// rotates on a fixed interval.
#[derive(Debug, Clone)]
pub struct PairingCode {
    pub room_name: String,
    pub lock: String,
    pub issued_at: Instant,
    pub rotates_every: Duration,
}

impl PairingCode {
    /// The code a user types on a remote: room name followed by the lock.
    pub fn join_code(&self) -> String {
        format!("{}{}", self.room_name, self.lock)
    }
}

/// Credentials used to join the signaling room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionCredentials {
    pub room_name: String,
    pub lock: String,
}
