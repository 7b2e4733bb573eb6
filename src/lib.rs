pub mod animation;
pub mod color;
pub mod config;
pub mod engine;
pub mod error;
pub mod frame_scheduler;
pub mod geometry;
pub mod math8;
pub mod registry;
pub mod section;
pub mod sink;
pub mod strip;

pub use animation::{
    AnimationCatalog, AnimationDefinition, AnimationInfo, AnimationParams, Direction,
    ParameterSpec, PreparedParams,
};
pub use color::{ColorGradient, ExpandedGradient, Rgb};
pub use config::{FadeTimings, StripConfig};
pub use engine::{AnimationHandle, AnimationState, CancelToken, Engine, ExecutionContext};
pub use error::{StripError, StripResult, ValidationError};
pub use frame_scheduler::{FrameResult, FrameScheduler};
pub use geometry::{Dimensionality, Location, LocationTable, PixelLocation, StripLayout};
pub use registry::AnimationRegistry;
pub use section::Section;
pub use sink::EmulatedSink;
pub use strip::{PixelColor, Strip};

pub use embassy_time::{Duration, Instant};

/// Destination of rendered frames
///
/// Implement this trait to push strip snapshots to hardware or an emulator.
/// The frame scheduler is generic over this trait.
pub trait RenderSink {
    /// Present one full-strip frame of displayed colors
    fn present(&mut self, colors: &[Rgb]);
}
