//! Sparse key-color gradients and their dense per-pixel expansion.
//!
//! A [`ColorGradient`] is the list of key colors an animation was given.
//! Before an animation runs, every gradient is expanded to the length of the
//! target section, producing an [`ExpandedGradient`] with one color per pixel.
//! Expansion is a pure function of the key colors and the target length.

use core::fmt;
use core::hash::{Hash, Hasher};

use crate::color::{BLACK, Rgb, rgb_from_u32, rgb_to_u32};

/// Ordered list of key colors.
///
/// An empty gradient is treated as all black.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ColorGradient {
    colors: Vec<Rgb>,
}

impl ColorGradient {
    pub fn new(colors: impl Into<Vec<Rgb>>) -> Self {
        Self {
            colors: colors.into(),
        }
    }

    /// Build a gradient from `0xRRGGBB` values
    pub fn from_hex(colors: &[u32]) -> Self {
        Self {
            colors: colors.iter().copied().map(rgb_from_u32).collect(),
        }
    }

    /// Single-color gradient
    pub fn solid(color: Rgb) -> Self {
        Self {
            colors: vec![color],
        }
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Spread the key colors over `length` positions.
    ///
    /// Position `p` takes key color `floor(p * k / length)` where `k` is the
    /// number of key colors, so when `length` is not a multiple of `k` the
    /// earlier keys cover one extra slot.
    pub fn expand(&self, length: usize) -> ExpandedGradient {
        let colors = if self.colors.is_empty() {
            vec![BLACK; length]
        } else {
            let keys = self.colors.len();
            (0..length)
                .map(|p| self.colors[p * keys / length])
                .collect()
        };

        ExpandedGradient {
            original: self.clone(),
            colors,
        }
    }
}

impl From<Rgb> for ColorGradient {
    fn from(color: Rgb) -> Self {
        Self::solid(color)
    }
}

impl From<u32> for ColorGradient {
    fn from(color: u32) -> Self {
        Self::solid(rgb_from_u32(color))
    }
}

impl From<&[u32]> for ColorGradient {
    fn from(colors: &[u32]) -> Self {
        Self::from_hex(colors)
    }
}

/// Dense gradient with exactly one color per position.
///
/// Two expanded gradients are equal when their expanded contents are equal
/// (which implies equal length); the originating gradient is not compared.
#[derive(Debug, Clone, Default)]
pub struct ExpandedGradient {
    original: ColorGradient,
    colors: Vec<Rgb>,
}

impl ExpandedGradient {
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// The gradient this one was expanded from
    pub fn original(&self) -> &ColorGradient {
        &self.original
    }

    /// Color at `index`, or black past the end
    pub fn get(&self, index: usize) -> Rgb {
        self.color_at(index).unwrap_or(BLACK)
    }

    pub fn color_at(&self, index: usize) -> Option<Rgb> {
        self.colors.get(index).copied()
    }

    pub fn contains(&self, color: Rgb) -> bool {
        self.colors.contains(&color)
    }

    pub fn iter(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.colors.iter().copied()
    }

    /// Circularly shift the content toward higher indices.
    ///
    /// The element at position `p` of the result is the element at
    /// `(p - offset) mod len` of `self`. Negative offsets shift the other way.
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    #[must_use]
    pub fn rotate(&self, offset: isize) -> Self {
        let mut colors = self.colors.clone();
        if !colors.is_empty() {
            let shift = offset.rem_euclid(colors.len() as isize) as usize;
            colors.rotate_right(shift);
        }
        Self {
            original: self.original.clone(),
            colors,
        }
    }

    /// Re-expand the originating gradient to a new length.
    #[must_use]
    pub fn prepare(&self, length: usize) -> Self {
        if length == self.len() {
            return self.clone();
        }
        self.original.expand(length)
    }
}

impl PartialEq for ExpandedGradient {
    fn eq(&self, other: &Self) -> bool {
        self.colors == other.colors
    }
}

impl Eq for ExpandedGradient {}

impl Hash for ExpandedGradient {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.colors.hash(state);
    }
}

impl fmt::Display for ExpandedGradient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, color) in self.colors.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{:x}", rgb_to_u32(*color))?;
        }
        f.write_str("]")
    }
}
