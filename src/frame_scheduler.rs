//! Frame scheduling and timing utilities.
//!
//! The scheduler copies the strip's displayed colors into a render sink at a
//! fixed cadence. [`FrameScheduler::tick`] does a single frame and leaves the
//! waiting to the caller; [`FrameScheduler::run`] owns the loop and returns
//! when the engine shuts down.

use std::sync::Arc;

use embassy_time::{Duration, Instant};

use crate::RenderSink;
use crate::config::DEFAULT_FRAME_DURATION;
use crate::engine::Engine;
use crate::strip::Strip;

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Paces snapshots of a strip into a [`RenderSink`].
///
/// If the caller falls more than two frames behind, the schedule restarts
/// from the current time instead of bursting to catch up.
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = FrameScheduler::for_engine(&engine, sink);
///
/// loop {
///     let result = scheduler.tick(Instant::now());
///     std::thread::sleep(result.sleep_duration.into());
/// }
/// ```
pub struct FrameScheduler<S: RenderSink> {
    sink: S,
    strip: Arc<Strip>,
    next_frame: Instant,
    frame_duration: Duration,
}

impl<S: RenderSink> FrameScheduler<S> {
    /// Create a new frame scheduler.
    ///
    /// Uses `DEFAULT_FRAME_DURATION` (90 FPS) for frame timing.
    pub fn new(strip: Arc<Strip>, sink: S) -> Self {
        Self::with_frame_duration(strip, sink, DEFAULT_FRAME_DURATION)
    }

    /// Create a new frame scheduler with custom frame duration.
    pub fn with_frame_duration(strip: Arc<Strip>, sink: S, frame_duration: Duration) -> Self {
        Self {
            sink,
            strip,
            next_frame: Instant::from_millis(0),
            frame_duration,
        }
    }

    /// Scheduler for the engine's strip at the configured frame rate
    pub fn for_engine(engine: &Engine, sink: S) -> Self {
        Self::with_frame_duration(
            Arc::clone(engine.strip()),
            sink,
            engine.config().frame_duration,
        )
    }

    /// Present one frame and return timing information.
    ///
    /// The caller is responsible for waiting until `next_deadline` before
    /// calling `tick` again.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        let max_drift = self.frame_duration * 2;
        if now > self.next_frame + max_drift {
            self.next_frame = now;
        }

        let frame = self.strip.snapshot();
        self.sink.present(&frame);

        self.next_frame += self.frame_duration;

        let sleep_duration = if self.next_frame > now {
            self.next_frame - now
        } else {
            Duration::from_millis(0)
        };

        FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
        }
    }

    /// Present frames until `engine` shuts down
    pub fn run(&mut self, engine: &Engine) {
        let shutdown = engine.shutdown_token();
        tracing::debug!(
            frame_ms = self.frame_duration.as_millis(),
            "frame scheduler running"
        );
        while !shutdown.is_cancelled() {
            let result = self.tick(Instant::now());
            if shutdown.sleep(result.sleep_duration).is_err() {
                break;
            }
        }
        tracing::debug!("frame scheduler stopped");
    }

    /// Get a reference to the render sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Get a mutable reference to the render sink
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the scheduler and hand back its sink
    pub fn into_sink(self) -> S {
        self.sink
    }
}
