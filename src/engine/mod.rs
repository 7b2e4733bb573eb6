//! Animation execution engine
//!
//! The engine owns the strip, the catalog, the registry of running instances
//! and the worker pool they all share. Every instance goes through the same
//! path: validate, register, run the body `run_count` times (or until
//! cancelled), then settle into a terminal state and deregister.
//!
//! Nested runs reuse that path with the parent's cancellation token as the
//! root of their own, so cancelling an instance reaches every descendant.

mod cancel;
mod context;
mod handle;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

pub use cancel::CancelToken;
pub use context::ExecutionContext;
pub use handle::{AnimationHandle, AnimationState};

use embassy_time::Duration;

use crate::animation::{AnimationCatalog, AnimationDefinition, AnimationParams, PreparedParams};
use crate::color::{Rgb, fade_step};
use crate::config::StripConfig;
use crate::error::{StripError, StripResult};
use crate::registry::AnimationRegistry;
use crate::section::Section;
use crate::strip::Strip;

/// Upper bound on overlay steps of a single fade, after which the pixel is
/// reverted outright.
const MAX_FADE_STEPS: usize = 40;

/// Shared handle to the engine; clones drive the same strip.
#[derive(Clone)]
pub struct Engine {
    inner: Arc<EngineInner>,
}

struct EngineInner {
    config: StripConfig,
    strip: Arc<Strip>,
    catalog: AnimationCatalog,
    registry: AnimationRegistry,
    pool: rayon::ThreadPool,
    fade_pool: rayon::ThreadPool,
    shutdown: CancelToken,
    next_id: AtomicU64,
    active_fades: AtomicUsize,
}

impl Engine {
    pub fn new(config: StripConfig, catalog: AnimationCatalog) -> StripResult<Self> {
        config.validate()?;
        let pool = build_thread_pool(config.thread_count, "strip-worker")?;
        let fade_pool = build_thread_pool(config.thread_count, "strip-fade")?;
        let strip = Arc::new(Strip::with_layout(config.num_leds, config.layout.clone()));

        tracing::info!(
            num_leds = config.num_leds,
            threads = config.thread_count,
            animations = catalog.len(),
            "animation engine started"
        );

        Ok(Self {
            inner: Arc::new(EngineInner {
                config,
                strip,
                catalog,
                registry: AnimationRegistry::new(),
                pool,
                fade_pool,
                shutdown: CancelToken::new(),
                next_id: AtomicU64::new(0),
                active_fades: AtomicUsize::new(0),
            }),
        })
    }

    /// Engine with every built-in animation registered
    pub fn with_predefined(config: StripConfig) -> StripResult<Self> {
        Self::new(config, AnimationCatalog::predefined())
    }

    pub fn config(&self) -> &StripConfig {
        &self.inner.config
    }

    pub fn strip(&self) -> &Arc<Strip> {
        &self.inner.strip
    }

    /// Section covering the whole strip
    pub fn whole_strip(&self) -> Section {
        Section::whole(Arc::clone(&self.inner.strip))
    }

    pub fn catalog(&self) -> &AnimationCatalog {
        &self.inner.catalog
    }

    pub fn registry(&self) -> &AnimationRegistry {
        &self.inner.registry
    }

    /// Fades scheduled but not yet finished
    pub fn active_fades(&self) -> usize {
        self.inner.active_fades.load(Ordering::Acquire)
    }

    pub fn is_shut_down(&self) -> bool {
        self.inner.shutdown.is_cancelled()
    }

    /// Token cancelled when the engine shuts down
    pub fn shutdown_token(&self) -> &CancelToken {
        &self.inner.shutdown
    }

    /// Start the animation named by `params.animation` on `section`.
    ///
    /// Validation and registration happen before this returns, so a bad
    /// request fails here without touching any pixel. The body runs on the
    /// worker pool.
    #[tracing::instrument(skip_all, fields(animation = %params.animation, id = ?params.id))]
    pub fn start(&self, params: AnimationParams, section: &Section) -> StripResult<AnimationHandle> {
        let definition = self.inner.catalog.get(&params.animation)?.clone();
        self.run(definition, params, section, None)
    }

    /// Run `definition` directly, bypassing catalog lookup.
    ///
    /// With a parent context the instance becomes that parent's child for
    /// cancellation; otherwise it hangs off the engine's shutdown token.
    pub fn run(
        &self,
        definition: AnimationDefinition,
        params: AnimationParams,
        section: &Section,
        parent: Option<&ExecutionContext>,
    ) -> StripResult<AnimationHandle> {
        let run = self.prepare(definition, params, section, parent)?;
        let handle = run.handle.clone();
        let engine = self.clone();
        self.inner.pool.spawn(move || {
            engine.execute(run);
        });
        Ok(handle)
    }

    /// Cancel everything and refuse further work.
    ///
    /// Running instances and pending fades observe the cancellation at their
    /// next checkpoint; a cancelled fade still reverts its pixel.
    pub fn shutdown(&self) {
        if self.inner.shutdown.is_cancelled() {
            return;
        }
        self.inner.shutdown.cancel();
        let cancelled = self.inner.registry.remove_all();
        tracing::info!(cancelled = cancelled.len(), "animation engine shut down");
    }

    pub(crate) fn prepare(
        &self,
        definition: AnimationDefinition,
        params: AnimationParams,
        section: &Section,
        parent: Option<&ExecutionContext>,
    ) -> StripResult<PreparedRun> {
        let parent_token = parent.map_or(&self.inner.shutdown, |ctx| ctx.instance().token());
        if parent_token.is_cancelled() {
            return Err(StripError::Cancelled);
        }

        let id = params.id.clone().unwrap_or_else(|| self.next_id());
        let prepared = definition.prepare(params.clone(), section, id.clone())?;
        let handle = AnimationHandle::new(id.clone(), params, parent_token.child());
        self.inner.registry.register(id, handle.clone())?;

        tracing::debug!(
            id = handle.id(),
            animation = definition.name(),
            run_count = prepared.run_count(),
            "animation registered"
        );

        Ok(PreparedRun {
            definition,
            params: prepared,
            section: section.clone(),
            handle,
        })
    }

    /// Drive one prepared instance to a terminal state on the current thread
    pub(crate) fn execute(&self, run: PreparedRun) -> AnimationState {
        let PreparedRun {
            definition,
            params,
            section,
            handle,
        } = run;

        if !handle.start() {
            self.inner.registry.remove_instance(&handle);
            return handle.state();
        }

        let ctx = ExecutionContext::new(self.clone(), handle.clone());
        let outcome = Self::run_loop(&definition, &section, &params, &ctx);
        let state = handle.finish(outcome);
        self.inner.registry.remove_instance(&handle);

        match state {
            AnimationState::Completed => {
                tracing::debug!(id = handle.id(), animation = definition.name(), "animation completed");
            }
            AnimationState::Cancelled => {
                tracing::info!(id = handle.id(), animation = definition.name(), "animation cancelled");
            }
            AnimationState::Failed => {
                if let Some(error) = handle.error() {
                    tracing::warn!(
                        id = handle.id(),
                        animation = definition.name(),
                        %error,
                        "animation failed"
                    );
                }
            }
            AnimationState::Created | AnimationState::Running => {}
        }
        state
    }

    fn run_loop(
        definition: &AnimationDefinition,
        section: &Section,
        params: &PreparedParams,
        ctx: &ExecutionContext,
    ) -> StripResult<()> {
        let run_count = params.run_count();
        let mut completed: i32 = 0;
        loop {
            if run_count >= 0 && completed >= run_count {
                return Ok(());
            }
            ctx.checkpoint()?;
            definition.invoke(section, params, ctx)?;
            completed = completed.saturating_add(1);
        }
    }

    /// Undo a prepared run that will never execute
    pub(crate) fn abandon(&self, run: &PreparedRun) {
        run.handle.finish(Err(StripError::Cancelled));
        self.inner.registry.remove_instance(&run.handle);
    }

    /// Set `pixel` and schedule its fade back to the prolonged color.
    ///
    /// Fades sleep between steps, so they get their own pool and never hold
    /// a worker that animations are waiting for.
    pub(crate) fn set_and_fade(
        &self,
        pixel: usize,
        color: Rgb,
        amount_of_overlay: u8,
        step_delay: Duration,
    ) -> StripResult<()> {
        self.inner.strip.set_actual(pixel, color)?;

        let token = self.inner.shutdown.child();
        let engine = self.clone();
        self.inner.active_fades.fetch_add(1, Ordering::AcqRel);
        self.inner.fade_pool.spawn(move || {
            engine.fade_pixel(pixel, amount_of_overlay, step_delay, &token);
            engine.inner.active_fades.fetch_sub(1, Ordering::AcqRel);
        });
        Ok(())
    }

    fn fade_pixel(
        &self,
        pixel: usize,
        amount_of_overlay: u8,
        step_delay: Duration,
        token: &CancelToken,
    ) {
        let strip = &self.inner.strip;
        for _ in 0..MAX_FADE_STEPS {
            if token.sleep(step_delay).is_err() {
                break;
            }
            let settled = strip.with_pixel(pixel, |state| {
                state.actual = fade_step(state.actual, state.prolonged, amount_of_overlay);
                state.actual == state.prolonged
            });
            if settled.unwrap_or(true) {
                break;
            }
        }
        if let Err(error) = strip.revert(pixel) {
            tracing::warn!(pixel, %error, "fade could not revert pixel");
        }
    }

    fn next_id(&self) -> String {
        let n = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        format!("animation-{n}")
    }

    pub(crate) fn pool(&self) -> &rayon::ThreadPool {
        &self.inner.pool
    }
}

impl core::fmt::Debug for Engine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Engine")
            .field("num_leds", &self.inner.config.num_leds)
            .field("registry", &self.inner.registry)
            .field("shut_down", &self.is_shut_down())
            .finish_non_exhaustive()
    }
}

/// A validated, registered instance waiting for a thread
pub(crate) struct PreparedRun {
    definition: AnimationDefinition,
    params: PreparedParams,
    section: Section,
    pub(crate) handle: AnimationHandle,
}

fn build_thread_pool(threads: usize, name: &'static str) -> StripResult<rayon::ThreadPool> {
    if threads == 0 {
        return Err(StripError::config("thread_count must be >= 1"));
    }

    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(move |i| format!("{name}-{i}"))
        .build()
        .map_err(|e| StripError::Pool(format!("failed to build rayon thread pool: {e}")))
}
