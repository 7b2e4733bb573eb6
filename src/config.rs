use embassy_time::Duration;

use crate::error::{StripError, StripResult};
use crate::geometry::StripLayout;

/// Default render cadence (90 FPS).
pub const DEFAULT_FPS: u32 = 90;

/// Default frame duration based on target FPS.
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(1000 / DEFAULT_FPS as u64);

/// Default number of worker threads shared by all running animations.
pub const DEFAULT_THREAD_COUNT: usize = 100;

/// Timing of the fire-and-forget fades that pixels use to decay back to
/// their resting color
#[derive(Debug, Clone, Copy)]
pub struct FadeTimings {
    /// Blend weight of the resting color applied at each step (0-255)
    pub amount_of_overlay: u8,
    /// Delay between fade steps
    pub step_delay: Duration,
}

impl Default for FadeTimings {
    fn default() -> Self {
        Self {
            amount_of_overlay: 25,
            step_delay: Duration::from_millis(30),
        }
    }
}

/// Configuration for a strip and its animation engine
#[derive(Debug, Clone)]
pub struct StripConfig {
    pub num_leds: usize,
    pub thread_count: usize,
    pub frame_duration: Duration,
    pub fade: FadeTimings,
    pub layout: StripLayout,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            num_leds: 0,
            thread_count: DEFAULT_THREAD_COUNT,
            frame_duration: DEFAULT_FRAME_DURATION,
            fade: FadeTimings::default(),
            layout: StripLayout::Linear,
        }
    }
}

impl StripConfig {
    pub fn new(num_leds: usize) -> Self {
        Self {
            num_leds,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_thread_count(mut self, thread_count: usize) -> Self {
        self.thread_count = thread_count;
        self
    }

    #[must_use]
    pub fn with_frame_duration(mut self, frame_duration: Duration) -> Self {
        self.frame_duration = frame_duration;
        self
    }

    #[must_use]
    pub fn with_fade(mut self, fade: FadeTimings) -> Self {
        self.fade = fade;
        self
    }

    #[must_use]
    pub fn with_layout(mut self, layout: StripLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn validate(&self) -> StripResult<()> {
        if self.thread_count == 0 {
            return Err(StripError::config("thread_count must be >= 1"));
        }
        if let Some(len) = self.layout.explicit_len()
            && len != self.num_leds
        {
            return Err(StripError::config(format!(
                "layout describes {len} pixels but the strip has {}",
                self.num_leds
            )));
        }
        Ok(())
    }
}
