//! Pixel color store
//!
//! The strip owns every pixel's dual color state: the `prolonged` resting
//! color and the `actual` color currently displayed. Each pixel sits behind
//! its own lock, held only for the duration of a single read or write, so
//! animations writing disjoint pixels never contend and rendering never
//! stalls writers for longer than one pixel.

use parking_lot::Mutex;

use crate::color::{ExpandedGradient, Rgb, rgb_to_u32};
use crate::error::{StripError, StripResult};
use crate::geometry::{Dimensionality, Location, StripLayout};

/// Color state of a single pixel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PixelColor {
    /// Resting color, restored after transient effects
    pub prolonged: Rgb,
    /// Color currently displayed
    pub actual: Rgb,
}

pub struct Strip {
    pixels: Box<[Mutex<PixelColor>]>,
    layout: StripLayout,
}

impl Strip {
    /// Create a black strip of `num_leds` pixels laid out linearly
    pub fn new(num_leds: usize) -> Self {
        Self::with_layout(num_leds, StripLayout::Linear)
    }

    pub fn with_layout(num_leds: usize, layout: StripLayout) -> Self {
        Self {
            pixels: (0..num_leds)
                .map(|_| Mutex::new(PixelColor::default()))
                .collect(),
            layout,
        }
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn layout(&self) -> &StripLayout {
        &self.layout
    }

    pub fn dimensionality(&self) -> Dimensionality {
        self.layout.dimensionality()
    }

    /// Base coordinate of a physical pixel
    pub fn location(&self, pixel: usize) -> StripResult<Location> {
        self.slot(pixel)?;
        Ok(self.layout.location(pixel))
    }

    fn slot(&self, pixel: usize) -> StripResult<&Mutex<PixelColor>> {
        self.pixels.get(pixel).ok_or(StripError::OutOfRange {
            pixel,
            len: self.pixels.len(),
        })
    }

    /// Run `operation` while holding the pixel's lock.
    ///
    /// The lock is released when `operation` returns; never block inside it.
    pub fn with_pixel<R>(
        &self,
        pixel: usize,
        operation: impl FnOnce(&mut PixelColor) -> R,
    ) -> StripResult<R> {
        let slot = self.slot(pixel)?;
        let mut state = slot.lock();
        Ok(operation(&mut state))
    }

    /// Set the resting color and display it immediately.
    ///
    /// Any transient override on the pixel is replaced.
    pub fn set_prolonged(&self, pixel: usize, color: Rgb) -> StripResult<()> {
        self.with_pixel(pixel, |state| {
            state.prolonged = color;
            state.actual = color;
        })
    }

    /// Display a transient color without touching the resting color
    pub fn set_actual(&self, pixel: usize, color: Rgb) -> StripResult<()> {
        self.with_pixel(pixel, |state| state.actual = color)
    }

    pub fn get(&self, pixel: usize) -> StripResult<PixelColor> {
        self.with_pixel(pixel, |state| *state)
    }

    /// Restore the displayed color to the resting color
    pub fn revert(&self, pixel: usize) -> StripResult<()> {
        self.with_pixel(pixel, |state| state.actual = state.prolonged)
    }

    /// Displayed color, or `None` for an invalid index
    pub fn actual_or_none(&self, pixel: usize) -> Option<Rgb> {
        self.get(pixel).ok().map(|state| state.actual)
    }

    /// Displayed color as lower-case hex
    pub fn pixel_hex(&self, pixel: usize) -> StripResult<String> {
        self.get(pixel)
            .map(|state| format!("{:x}", rgb_to_u32(state.actual)))
    }

    /// Copy of every displayed color, for the render sink.
    ///
    /// Pixels are locked one at a time, so concurrent writers may land
    /// between reads; the frame is eventually consistent.
    pub fn snapshot(&self) -> Vec<Rgb> {
        self.pixels.iter().map(|slot| slot.lock().actual).collect()
    }

    /// Copy of every resting color
    pub fn prolonged_snapshot(&self) -> Vec<Rgb> {
        self.pixels.iter().map(|slot| slot.lock().prolonged).collect()
    }

    pub fn set_pixels_actual(&self, pixels: &[usize], color: Rgb) -> StripResult<()> {
        pixels.iter().try_for_each(|&pixel| self.set_actual(pixel, color))
    }

    pub fn set_pixels_prolonged(&self, pixels: &[usize], color: Rgb) -> StripResult<()> {
        pixels
            .iter()
            .try_for_each(|&pixel| self.set_prolonged(pixel, color))
    }

    pub fn revert_pixels(&self, pixels: &[usize]) -> StripResult<()> {
        pixels.iter().try_for_each(|&pixel| self.revert(pixel))
    }

    /// Set every pixel's resting color from a gradient expanded to the strip.
    ///
    /// Pixels past the end of a shorter gradient are set to black.
    pub fn set_strip_prolonged(&self, colors: &ExpandedGradient) {
        for (pixel, slot) in self.pixels.iter().enumerate() {
            let color = colors.get(pixel);
            let mut state = slot.lock();
            state.prolonged = color;
            state.actual = color;
        }
    }

    /// Like [`Strip::set_strip_prolonged`] with the gradient rotated so that
    /// pixel `offset` receives the gradient's first color.
    pub fn set_strip_prolonged_with_offset(&self, colors: &ExpandedGradient, offset: isize) {
        self.set_strip_prolonged(&colors.prepare(self.len()).rotate(offset));
    }
}

impl core::fmt::Debug for Strip {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Strip")
            .field("len", &self.len())
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}
