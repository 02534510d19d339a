mod connection;

pub use connection::{ConnectionState, SignalingConnection};
