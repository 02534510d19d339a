mod address;
mod command;
mod frame;
mod pairing;
mod request;
mod tv_state;

pub use address::RemoteAddress;
pub use command::{RemoteCommand, StatusMessage, VolumeDirection};
pub use frame::LinkFrame;
pub use pairing::{PairingCode, SessionCredentials};
pub use request::{RequestId, RequestKind, RequestState};
pub use tv_state::TvState;
