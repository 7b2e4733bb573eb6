use std::sync::Arc;

use embassy_time::Duration;
use parking_lot::Mutex;

use crate::animation::AnimationParams;
use crate::color::Rgb;
use crate::engine::{AnimationHandle, AnimationState, Engine, PreparedRun};
use crate::error::{StripError, StripResult};
use crate::section::Section;

/// What an animation body sees of the engine while it runs.
///
/// Delays, fades and nested runs all go through the context so that they
/// observe the instance's cancellation.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    engine: Engine,
    instance: AnimationHandle,
}

impl ExecutionContext {
    pub(crate) fn new(engine: Engine, instance: AnimationHandle) -> Self {
        Self { engine, instance }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Handle of the running instance
    pub fn instance(&self) -> &AnimationHandle {
        &self.instance
    }

    pub fn id(&self) -> &str {
        self.instance.id()
    }

    pub fn is_cancelled(&self) -> bool {
        self.instance.token().is_cancelled()
    }

    /// Fail with [`StripError::Cancelled`] if the instance was cancelled
    pub fn checkpoint(&self) -> StripResult<()> {
        self.instance.token().checkpoint()
    }

    /// Wait between movements; wakes early with `Cancelled`
    pub fn delay(&self, duration: Duration) -> StripResult<()> {
        self.instance.token().sleep(duration)
    }

    /// Run a nested animation to completion on the current thread.
    ///
    /// The child is cancelled along with this instance. A child cancelled on
    /// its own is not an error for the parent.
    pub fn run_sequential(&self, params: AnimationParams, section: &Section) -> StripResult<()> {
        let definition = self.engine.catalog().get(&params.animation)?.clone();
        let run = self.engine.prepare(definition, params, section, Some(self))?;
        let child = run.handle.clone();

        match self.engine.execute(run) {
            AnimationState::Failed => Err(child_failure(&child)),
            AnimationState::Cancelled if self.is_cancelled() => Err(StripError::Cancelled),
            _ => Ok(()),
        }
    }

    /// Run every `(params, section)` pair concurrently and wait for all of
    /// them.
    ///
    /// Every child is validated before any starts. A failing child does not
    /// stop its siblings; once all are terminal the first failure in the
    /// order given is reported as [`StripError::ChildFailure`].
    ///
    /// Children the pool has not started by the time the inline child
    /// finishes are run on the calling thread, so the join completes even
    /// when every other worker is busy.
    pub fn run_parallel_and_join(&self, runs: Vec<(AnimationParams, Section)>) -> StripResult<()> {
        let mut prepared = Vec::with_capacity(runs.len());
        for (params, section) in runs {
            let run = self
                .engine
                .catalog()
                .get(&params.animation)
                .cloned()
                .and_then(|definition| self.engine.prepare(definition, params, &section, Some(self)));
            match run {
                Ok(run) => prepared.push(run),
                Err(error) => {
                    for run in &prepared {
                        self.engine.abandon(run);
                    }
                    return Err(error);
                }
            }
        }

        let children: Vec<AnimationHandle> = prepared.iter().map(|run| run.handle.clone()).collect();

        // the last child runs here instead of occupying another worker
        let mut runs = prepared.into_iter();
        let inline = runs.next_back();
        let pending: Vec<PendingRun> = runs
            .map(|run| {
                let pending = PendingRun::new(run);
                let queued = pending.clone();
                let engine = self.engine.clone();
                self.engine.pool().spawn(move || {
                    if let Some(run) = queued.claim() {
                        engine.execute(run);
                    }
                });
                pending
            })
            .collect();
        if let Some(run) = inline {
            self.engine.execute(run);
        }

        // never block on a child no worker has picked up yet
        for pending in &pending {
            if let Some(run) = pending.claim() {
                self.engine.execute(run);
            }
        }

        let mut first_failure = None;
        for child in &children {
            let outcome = child.join();
            if first_failure.is_none() && outcome.is_err_and(|error| !error.is_cancelled()) {
                first_failure = Some(child_failure(child));
            }
        }

        match first_failure {
            Some(error) => Err(error),
            None => self.checkpoint(),
        }
    }

    /// Show `color` on a pixel now and let it fade back to its resting color
    /// in the background.
    ///
    /// Returns as soon as the color is set. The fade is not part of this
    /// instance: it outlives cancellation and only stops early at engine
    /// shutdown.
    pub fn set_and_fade_pixel(
        &self,
        section: &Section,
        logical: usize,
        color: Rgb,
        amount_of_overlay: u8,
        step_delay: Duration,
    ) -> StripResult<()> {
        let pixel = section.physical_index(logical)?;
        self.engine
            .set_and_fade(pixel, color, amount_of_overlay, step_delay)
    }

    /// [`ExecutionContext::set_and_fade_pixel`] with the engine's fade timings
    pub fn set_pixel_fade_color(&self, section: &Section, logical: usize, color: Rgb) -> StripResult<()> {
        let fade = self.engine.config().fade;
        self.set_and_fade_pixel(section, logical, color, fade.amount_of_overlay, fade.step_delay)
    }
}

fn child_failure(child: &AnimationHandle) -> StripError {
    StripError::ChildFailure {
        id: child.id().to_owned(),
        source: Box::new(
            child
                .error()
                .unwrap_or_else(|| StripError::animation("child failed without an error")),
        ),
    }
}

/// A queued child that runs on whichever thread claims it first
#[derive(Clone)]
struct PendingRun(Arc<Mutex<Option<PreparedRun>>>);

impl PendingRun {
    fn new(run: PreparedRun) -> Self {
        Self(Arc::new(Mutex::new(Some(run))))
    }

    fn claim(&self) -> Option<PreparedRun> {
        self.0.lock().take()
    }
}
