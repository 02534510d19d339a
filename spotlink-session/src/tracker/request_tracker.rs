use crate::error::CommandError;
use dashmap::DashMap;
use spotlink_core::{RequestKind, RequestState};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// A state change of a tracked request, dispatched to UI subscribers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequestUpdate {
    pub kind: RequestKind,
    pub state: RequestState,
    pub expected: Option<bool>,
}

struct RequestRecord {
    seq: u64,
    state: RequestState,
    expected: Option<bool>,
}

struct TrackerInner {
    requests: DashMap<RequestKind, RequestRecord>,
    next_seq: AtomicU64,
    listeners: Mutex<Vec<mpsc::UnboundedSender<RequestUpdate>>>,
}

/// Wraps outgoing commands with PENDING/DONE/ERROR bookkeeping and exposes
/// an optimistic value for immediate UI reflection.
///
/// Per request kind, only the most recently issued request is observable:
/// a completion arriving for a superseded request neither changes state
/// nor dispatches an update.
#[derive(Clone)]
pub struct RequestStateTracker {
    inner: Arc<TrackerInner>,
}

impl RequestStateTracker {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(TrackerInner {
                requests: DashMap::new(),
                next_seq: AtomicU64::new(0),
                listeners: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<RequestUpdate> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.inner.listeners.lock().unwrap().push(tx);
        rx
    }

    pub fn state_of(&self, kind: RequestKind) -> Option<RequestState> {
        self.inner.requests.get(&kind).map(|r| r.state)
    }

    /// The expected value of the live request, if it is still pending.
    /// `None` means the confirmed value is authoritative.
    pub fn optimistic_value(&self, kind: RequestKind) -> Option<bool> {
        self.inner.requests.get(&kind).and_then(|r| {
            if r.state == RequestState::Pending {
                r.expected
            } else {
                None
            }
        })
    }

    /// Dispatches PENDING immediately, runs the operation, then settles
    /// into DONE or ERROR. Errors propagate to the caller. No timeout is
    /// imposed here; callers needing bounded waits wrap the operation.
    pub async fn track<T, F>(
        &self,
        kind: RequestKind,
        expected: Option<bool>,
        operation: F,
    ) -> Result<T, CommandError>
    where
        F: Future<Output = Result<T, CommandError>>,
    {
        let seq = self.inner.next_seq.fetch_add(1, Ordering::Relaxed);

        debug!("Tracking request {:?} (expected {:?})", kind, expected);

        self.inner.requests.insert(
            kind,
            RequestRecord {
                seq,
                state: RequestState::Pending,
                expected,
            },
        );
        self.dispatch(kind, RequestState::Pending, expected);

        match operation.await {
            Ok(value) => {
                self.settle(kind, seq, RequestState::Done, expected);
                Ok(value)
            }
            Err(e) => {
                warn!("Request {:?} failed: {}", kind, e);
                self.settle(kind, seq, RequestState::Error, expected);
                Err(e)
            }
        }
    }

    fn settle(&self, kind: RequestKind, seq: u64, state: RequestState, expected: Option<bool>) {
        let live = {
            match self.inner.requests.get_mut(&kind) {
                Some(mut record) if record.seq == seq => {
                    record.state = state;
                    true
                }
                // A newer request for this kind has been issued since.
                _ => false,
            }
        };

        if live {
            self.dispatch(kind, state, expected);
        } else {
            debug!("Dropping completion of superseded request {:?}", kind);
        }
    }

    fn dispatch(&self, kind: RequestKind, state: RequestState, expected: Option<bool>) {
        let update = RequestUpdate {
            kind,
            state,
            expected,
        };

        self.inner
            .listeners
            .lock()
            .unwrap()
            .retain(|tx| tx.send(update).is_ok());
    }
}

impl Default for RequestStateTracker {
    fn default() -> Self {
        Self::new()
    }
}
