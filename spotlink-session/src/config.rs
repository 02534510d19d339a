use std::time::Duration;

/// The delay between a data channel dropping and the next restart attempt.
pub const RETRY_DELAY: Duration = Duration::from_secs(30);

/// How often the join-code lock rotates while the session is alive.
pub const JOIN_CODE_REFRESH_RATE: Duration = Duration::from_secs(60 * 60);

/// Length of the generated room name and lock strings.
pub const PAIRING_CODE_LENGTH: usize = 3;

#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub retry_delay: Duration,
    pub join_code_refresh: Duration,
    pub lock_length: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            retry_delay: RETRY_DELAY,
            join_code_refresh: JOIN_CODE_REFRESH_RATE,
            lock_length: PAIRING_CODE_LENGTH,
        }
    }
}
