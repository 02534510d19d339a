mod registry;

pub use registry::PairingRegistry;
