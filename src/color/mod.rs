mod gradient;
mod utils;

use smart_leds::RGB8;

pub use gradient::{ColorGradient, ExpandedGradient};
pub use utils::{BLACK, blend_colors, fade_step, rgb_from_u32, rgb_to_u32};

pub type Rgb = RGB8;
