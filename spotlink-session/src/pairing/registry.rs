use crate::config::SessionConfig;
use crate::signaling::SignalingConnection;
use rand::Rng;
use spotlink_core::{PairingCode, StatusMessage};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{info, warn};

struct LockEntry {
    lock: String,
    issued_at: Instant,
}

struct RegistryInner {
    signaling: SignalingConnection,
    room_name: String,
    current: Mutex<LockEntry>,
    rotates_every: Duration,
    lock_length: usize,
}

/// Issues and rotates the short-lived join codes remotes exchange for
/// connection credentials. The room name is fixed for the session; the
/// lock rotates on a fixed interval and each new code is pushed to the
/// signaling backend and broadcast to paired devices.
#[derive(Clone)]
pub struct PairingRegistry {
    inner: Arc<RegistryInner>,
}

impl PairingRegistry {
    pub fn new(signaling: SignalingConnection, config: &SessionConfig) -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                signaling,
                room_name: generate_code(config.lock_length),
                current: Mutex::new(LockEntry {
                    lock: generate_code(config.lock_length),
                    issued_at: Instant::now(),
                }),
                rotates_every: config.join_code_refresh,
                lock_length: config.lock_length,
            }),
        }
    }

    pub fn room_name(&self) -> &str {
        &self.inner.room_name
    }

    pub fn issue(&self) -> PairingCode {
        let current = self.inner.current.lock().unwrap();

        PairingCode {
            room_name: self.inner.room_name.clone(),
            lock: current.lock.clone(),
            issued_at: current.issued_at,
            rotates_every: self.inner.rotates_every,
        }
    }

    /// Replaces the lock, invalidating previously issued codes, and
    /// announces the new join code.
    pub async fn rotate(&self) -> PairingCode {
        let lock = generate_code(self.inner.lock_length);

        {
            let mut current = self.inner.current.lock().unwrap();
            current.lock = lock.clone();
            current.issued_at = Instant::now();
        }

        if let Err(e) = self.inner.signaling.set_lock(&lock).await {
            warn!("Failed to push new lock to signaling: {:#}", e);
        }

        let code = self.issue();

        info!("Join code rotated for room '{}'", self.inner.room_name);

        let status = StatusMessage::JoinCodeChanged {
            join_code: code.join_code(),
        };
        if let Err(e) = self.inner.signaling.broadcast_status(&status).await {
            warn!("Failed to broadcast new join code: {:#}", e);
        }

        code
    }

    /// Spawns the rotation loop. Abort the returned handle on session
    /// teardown to stop rotating.
    pub fn spawn_rotation(&self) -> JoinHandle<()> {
        let registry = self.clone();

        tokio::spawn(async move {
            loop {
                tokio::time::sleep(registry.inner.rotates_every).await;
                registry.rotate().await;
            }
        })
    }
}

fn generate_code(length: usize) -> String {
    const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}
