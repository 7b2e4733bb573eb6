//! Tree-shaped cooperative cancellation.
//!
//! Every running instance owns a [`CancelToken`] derived from its parent's
//! token (or from the engine's shutdown token at the top level). Cancelling a
//! token cancels its whole subtree and wakes anything sleeping on it.

use std::sync::{Arc, Weak};

use embassy_time::Duration;
use parking_lot::{Condvar, Mutex};

use crate::error::{StripError, StripResult};

#[derive(Clone, Default)]
pub struct CancelToken {
    inner: Arc<Node>,
}

#[derive(Default)]
struct Node {
    state: Mutex<NodeState>,
    wake: Condvar,
}

#[derive(Default)]
struct NodeState {
    cancelled: bool,
    children: Vec<Weak<Node>>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token that is cancelled whenever `self` is.
    ///
    /// A child of an already cancelled token starts out cancelled.
    #[must_use]
    pub fn child(&self) -> Self {
        let child = Arc::new(Node::default());
        let mut state = self.inner.state.lock();
        if state.cancelled {
            child.state.lock().cancelled = true;
        } else {
            state.children.retain(|node| node.strong_count() > 0);
            state.children.push(Arc::downgrade(&child));
        }
        Self { inner: child }
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.state.lock().cancelled
    }

    /// Cancel this token and every token derived from it
    pub fn cancel(&self) {
        let children = {
            let mut state = self.inner.state.lock();
            if state.cancelled {
                return;
            }
            state.cancelled = true;
            core::mem::take(&mut state.children)
        };
        self.inner.wake.notify_all();

        for node in children.iter().filter_map(Weak::upgrade) {
            Self { inner: node }.cancel();
        }
    }

    /// Fail with [`StripError::Cancelled`] if cancellation was requested
    pub fn checkpoint(&self) -> StripResult<()> {
        if self.is_cancelled() {
            Err(StripError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Block for `duration` unless cancelled first.
    ///
    /// Returns [`StripError::Cancelled`] as soon as the token is cancelled,
    /// including when it already was on entry.
    pub fn sleep(&self, duration: Duration) -> StripResult<()> {
        let deadline =
            std::time::Instant::now() + std::time::Duration::from_micros(duration.as_micros());
        let mut state = self.inner.state.lock();
        while !state.cancelled {
            if self.inner.wake.wait_until(&mut state, deadline).timed_out() {
                break;
            }
        }
        if state.cancelled {
            Err(StripError::Cancelled)
        } else {
            Ok(())
        }
    }
}

impl core::fmt::Debug for CancelToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CancelToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
