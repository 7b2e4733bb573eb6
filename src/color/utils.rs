use crate::{
    color::Rgb,
    math8::{approach8, blend8},
};

pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Blend two RGB colors
///
/// # Arguments
/// * `a` - First color
/// * `b` - Second color
/// * `amount_of_b` - Blend factor (0 = all a, 255 = all b)
#[inline]
pub fn blend_colors(a: Rgb, b: Rgb, amount_of_b: u8) -> Rgb {
    Rgb {
        r: blend8(a.r, b.r, amount_of_b),
        g: blend8(a.g, b.g, amount_of_b),
        b: blend8(a.b, b.b, amount_of_b),
    }
}

/// One overlay step of a fade from `current` toward `target`.
///
/// Same rule as [`blend_colors`], but every channel that still differs moves
/// by at least one unit so repeated steps always converge.
#[inline]
pub fn fade_step(current: Rgb, target: Rgb, amount_of_overlay: u8) -> Rgb {
    Rgb {
        r: approach8(current.r, target.r, amount_of_overlay),
        g: approach8(current.g, target.g, amount_of_overlay),
        b: approach8(current.b, target.b, amount_of_overlay),
    }
}

/// Create an RGB color from a u32 value (0xRRGGBB format)
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Pack an RGB color into a u32 value (0xRRGGBB format)
pub const fn rgb_to_u32(color: Rgb) -> u32 {
    ((color.r as u32) << 16) | ((color.g as u32) << 8) | color.b as u32
}
