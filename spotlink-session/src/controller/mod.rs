mod remote_controller;
mod tv_state_store;

pub use remote_controller::RemoteController;
pub use tv_state_store::TvStateStore;
