use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque signaling identity of a counterpart device, e.g. `"room@server/resource"`.
#[derive(Debug, Serialize, Deserialize, Clone, Hash, Eq, PartialEq)]
pub struct RemoteAddress(pub String);

impl From<&str> for RemoteAddress {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for RemoteAddress {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for RemoteAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
