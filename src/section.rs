//! Addressing views over a strip
//!
//! A [`Section`] is an ordered list of physical pixel indices plus a shared
//! reference to the strip. It owns no pixel state: every color call is
//! translated from a logical index to a physical one and forwarded to the
//! [`Strip`]. Sections are cheap to clone and safe to share across threads;
//! overlapping sections are allowed and only serialized per pixel.

use core::ops::Range;
use std::sync::Arc;

use crate::color::{ExpandedGradient, Rgb};
use crate::error::{StripError, StripResult};
use crate::geometry::{Dimensionality, LocationTable, PixelLocation};
use crate::strip::{PixelColor, Strip};

#[derive(Clone)]
pub struct Section {
    strip: Arc<Strip>,
    indices: Arc<[usize]>,
}

impl Section {
    /// Section covering the whole strip in physical order
    pub fn whole(strip: Arc<Strip>) -> Self {
        let indices = (0..strip.len()).collect();
        Self { strip, indices }
    }

    /// Section over an arbitrary list of physical indices
    pub fn from_indices(strip: Arc<Strip>, indices: impl Into<Vec<usize>>) -> StripResult<Self> {
        let indices = indices.into();
        if let Some(&pixel) = indices.iter().find(|&&pixel| pixel >= strip.len()) {
            return Err(StripError::OutOfRange {
                pixel,
                len: strip.len(),
            });
        }
        Ok(Self {
            strip,
            indices: indices.into(),
        })
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn strip(&self) -> &Arc<Strip> {
        &self.strip
    }

    pub fn dimensionality(&self) -> Dimensionality {
        self.strip.dimensionality()
    }

    /// Physical indices in logical order
    pub fn physical_indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn physical_index(&self, logical: usize) -> StripResult<usize> {
        self.indices.get(logical).copied().ok_or(StripError::Index {
            index: logical,
            len: self.indices.len(),
        })
    }

    /// Logical indices `0..len`, restartable by cloning
    pub fn iter(&self) -> Range<usize> {
        0..self.indices.len()
    }

    /// View over logical indices `from..=to`.
    ///
    /// When `from > to` the view runs backwards, so logical index 0 of the
    /// result is `from`. `from == to` selects a single pixel.
    pub fn sub_section(&self, from: usize, to: usize) -> StripResult<Self> {
        let len = self.indices.len();
        for index in [from, to] {
            if index >= len {
                return Err(StripError::Index { index, len });
            }
        }

        let indices: Arc<[usize]> = if from <= to {
            self.indices[from..=to].into()
        } else {
            self.indices[to..=from].iter().rev().copied().collect()
        };

        Ok(Self {
            strip: Arc::clone(&self.strip),
            indices,
        })
    }

    pub fn set_actual(&self, logical: usize, color: Rgb) -> StripResult<()> {
        self.strip.set_actual(self.physical_index(logical)?, color)
    }

    pub fn set_prolonged(&self, logical: usize, color: Rgb) -> StripResult<()> {
        self.strip.set_prolonged(self.physical_index(logical)?, color)
    }

    pub fn get(&self, logical: usize) -> StripResult<PixelColor> {
        self.strip.get(self.physical_index(logical)?)
    }

    pub fn revert(&self, logical: usize) -> StripResult<()> {
        self.strip.revert(self.physical_index(logical)?)
    }

    /// Set each pixel's resting color from the gradient position with the
    /// same logical index. Positions past the gradient's end are black.
    pub fn set_prolonged_colors(&self, colors: &ExpandedGradient) -> StripResult<()> {
        self.indices
            .iter()
            .enumerate()
            .try_for_each(|(logical, &pixel)| self.strip.set_prolonged(pixel, colors.get(logical)))
    }

    /// Set every pixel's resting color to one color
    pub fn fill_prolonged(&self, color: Rgb) -> StripResult<()> {
        self.strip.set_pixels_prolonged(&self.indices, color)
    }

    pub fn revert_all(&self) -> StripResult<()> {
        self.strip.revert_pixels(&self.indices)
    }

    /// Displayed colors of this section in logical order
    pub fn snapshot(&self) -> StripResult<Vec<Rgb>> {
        self.indices
            .iter()
            .map(|&pixel| self.strip.get(pixel).map(|state| state.actual))
            .collect()
    }

    /// Coordinates of this section's pixels after rotating about Z then X.
    ///
    /// Table entries carry physical indices.
    pub fn location_table(&self, rotation_z: f64, rotation_x: f64) -> LocationTable {
        let layout = self.strip.layout();
        LocationTable::transform(
            self.indices.iter().map(|&index| PixelLocation {
                index,
                location: layout.location(index),
            }),
            rotation_z,
            rotation_x,
        )
    }
}

impl core::fmt::Debug for Section {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Section")
            .field("indices", &self.indices)
            .finish_non_exhaustive()
    }
}
