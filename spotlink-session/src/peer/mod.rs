mod link;

pub use link::{LinkState, PeerLink};
