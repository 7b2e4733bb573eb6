//! Built-in animations
//!
//! Each animation is a plain [`AnimationDefinition`]; bodies only use the
//! public [`Section`](crate::section::Section) and
//! [`ExecutionContext`](crate::engine::ExecutionContext) surface, so custom
//! animations registered by callers are first-class peers of these.

mod bounce;
mod color;
mod pixel_run;
mod stack;
mod stack_overflow;
mod wipe;

use crate::animation::AnimationDefinition;

pub const ANIMATION_NAME_COLOR: &str = "Color";
pub const ANIMATION_NAME_PIXEL_RUN: &str = "Pixel Run";
pub const ANIMATION_NAME_BOUNCE: &str = "Bounce";
pub const ANIMATION_NAME_STACK: &str = "Stack";
pub const ANIMATION_NAME_STACK_OVERFLOW: &str = "Stack Overflow";
pub const ANIMATION_NAME_WIPE: &str = "Wipe";

/// Integer parameter shared by the moving animations, in milliseconds
pub const PARAM_INTER_MOVEMENT_DELAY: &str = "interMovementDelay";

pub use bounce::bounce;
pub use color::color;
pub use pixel_run::pixel_run;
pub use stack::stack;
pub use stack_overflow::stack_overflow;
pub use wipe::{PARAM_MOVEMENT_PER_ITERATION, PARAM_X_ROTATION, PARAM_Z_ROTATION, wipe};

/// Every built-in animation
pub fn all() -> Vec<AnimationDefinition> {
    vec![
        color(),
        pixel_run(),
        bounce(),
        stack(),
        stack_overflow(),
        wipe(),
    ]
}
