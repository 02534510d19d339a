pub mod command;
pub mod config;
pub mod controller;
pub mod error;
pub mod pairing;
pub mod peer;
pub mod reconnect;
pub mod signaling;
pub mod tracker;
pub mod transport;

pub use command::CommandChannel;
pub use config::SessionConfig;
pub use controller::{RemoteController, TvStateStore};
pub use error::CommandError;
pub use pairing::PairingRegistry;
pub use peer::{LinkState, PeerLink};
pub use reconnect::{ReconnectSupervisor, SupervisorCommand};
pub use signaling::{ConnectionState, SignalingConnection};
pub use tracker::{RequestStateTracker, RequestUpdate};
pub use transport::{LinkEvent, PeerEvent, PeerSignaling, SignalingBackend, SignalingEvent};
