use std::sync::Arc;

use embassy_time::{Duration, Instant};
use parking_lot::{Condvar, Mutex};

use crate::animation::AnimationParams;
use crate::engine::CancelToken;
use crate::error::{StripError, StripResult};

/// Lifecycle of one animation instance.
///
/// `Created -> Running -> {Completed | Cancelled | Failed}`; terminal states
/// are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationState {
    Created,
    Running,
    Completed,
    Cancelled,
    Failed,
}

impl AnimationState {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::Failed)
    }
}

/// Shared handle to a running animation instance.
///
/// Clones refer to the same instance; equality is instance identity.
#[derive(Clone)]
pub struct AnimationHandle {
    inner: Arc<Instance>,
}

struct Instance {
    id: String,
    params: AnimationParams,
    token: CancelToken,
    started_at: Instant,
    status: Mutex<Status>,
    finished: Condvar,
}

struct Status {
    state: AnimationState,
    error: Option<StripError>,
}

impl AnimationHandle {
    pub(crate) fn new(id: String, params: AnimationParams, token: CancelToken) -> Self {
        Self {
            inner: Arc::new(Instance {
                id,
                params,
                token,
                started_at: Instant::now(),
                status: Mutex::new(Status {
                    state: AnimationState::Created,
                    error: None,
                }),
                finished: Condvar::new(),
            }),
        }
    }

    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// Parameters the instance was requested with
    pub fn params(&self) -> &AnimationParams {
        &self.inner.params
    }

    /// Name of the animation being run
    pub fn animation(&self) -> &str {
        &self.inner.params.animation
    }

    pub fn started_at(&self) -> Instant {
        self.inner.started_at
    }

    pub fn state(&self) -> AnimationState {
        self.inner.status.lock().state
    }

    pub fn is_terminal(&self) -> bool {
        self.state().is_terminal()
    }

    /// Failure reported by a `Failed` instance
    pub fn error(&self) -> Option<StripError> {
        self.inner.status.lock().error.clone()
    }

    /// Request cancellation of this instance and all of its children.
    ///
    /// Cancellation is cooperative: the instance stops at its next loop
    /// boundary or delay.
    pub fn cancel(&self) {
        self.inner.token.cancel();
    }

    pub(crate) fn token(&self) -> &CancelToken {
        &self.inner.token
    }

    /// `Created -> Running`; false if the instance already left `Created`
    pub(crate) fn start(&self) -> bool {
        let mut status = self.inner.status.lock();
        if status.state != AnimationState::Created {
            return false;
        }
        status.state = AnimationState::Running;
        true
    }

    /// Move to the terminal state matching `outcome` and wake joiners.
    ///
    /// Has no effect on an instance that is already terminal.
    pub(crate) fn finish(&self, outcome: StripResult<()>) -> AnimationState {
        let mut status = self.inner.status.lock();
        if status.state.is_terminal() {
            return status.state;
        }
        status.state = match outcome {
            Ok(()) => AnimationState::Completed,
            Err(StripError::Cancelled) => AnimationState::Cancelled,
            Err(error) => {
                status.error = Some(error);
                AnimationState::Failed
            }
        };
        self.inner.finished.notify_all();
        status.state
    }

    /// Block until the instance reaches a terminal state
    pub fn join(&self) -> StripResult<()> {
        let mut status = self.inner.status.lock();
        while !status.state.is_terminal() {
            self.inner.finished.wait(&mut status);
        }
        Self::outcome(&status)
    }

    /// Like [`AnimationHandle::join`], giving up after `timeout`
    pub fn join_timeout(&self, timeout: Duration) -> Option<StripResult<()>> {
        let deadline =
            std::time::Instant::now() + std::time::Duration::from_micros(timeout.as_micros());
        let mut status = self.inner.status.lock();
        while !status.state.is_terminal() {
            if self
                .inner
                .finished
                .wait_until(&mut status, deadline)
                .timed_out()
            {
                break;
            }
        }
        status.state.is_terminal().then(|| Self::outcome(&status))
    }

    fn outcome(status: &Status) -> StripResult<()> {
        match status.state {
            AnimationState::Cancelled => Err(StripError::Cancelled),
            AnimationState::Failed => Err(status
                .error
                .clone()
                .unwrap_or_else(|| StripError::animation("failed without an error"))),
            _ => Ok(()),
        }
    }

    pub fn same_instance(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for AnimationHandle {
    fn eq(&self, other: &Self) -> bool {
        self.same_instance(other)
    }
}

impl Eq for AnimationHandle {}

impl core::fmt::Debug for AnimationHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AnimationHandle")
            .field("id", &self.inner.id)
            .field("animation", &self.inner.params.animation)
            .field("state", &self.state())
            .finish()
    }
}
