mod request_tracker;

pub use request_tracker::{RequestStateTracker, RequestUpdate};
