use spotlink_core::TvState;
use std::sync::{Arc, RwLock};

/// The last confirmed TV state, as reported over whichever transport
/// delivered it. Optimistic values are layered on top by the controller.
#[derive(Clone, Default)]
pub struct TvStateStore {
    inner: Arc<RwLock<TvState>>,
}

impl TvStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&self, state: TvState) {
        *self.inner.write().unwrap() = state;
    }

    pub fn snapshot(&self) -> TvState {
        self.inner.read().unwrap().clone()
    }
}
