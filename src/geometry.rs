//! Pixel coordinates and the rotated location tables used by spatial animations.
//!
//! Every pixel has a base coordinate given by the strip's [`StripLayout`].
//! A [`LocationTable`] holds those coordinates after rotating the coordinate
//! system about the Z axis and then the X axis. Sweeping a plane along the
//! transformed Z axis partitions the pixels into ordered buckets.

use std::sync::Arc;

use crate::error::{StripError, StripResult};

/// Offsets and angles below this are treated as zero when deciding which
/// dimensions a layout spans
const SPAN_TOLERANCE: f64 = 1e-9;

/// Upper bound on the number of buckets a single sweep may produce
pub const MAX_SWEEP_BUCKETS: usize = 1 << 16;

/// How many spatial dimensions an animation needs, or a strip provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimensionality {
    OneDimensional,
    TwoDimensional,
    ThreeDimensional,
    AnyDimensional,
}

impl Dimensionality {
    /// Whether an animation declaring `self` can run on a section that is `section`.
    ///
    /// One-dimensional animations only use logical indices, so they run
    /// anywhere. Two- and three-dimensional ones need at least that many
    /// dimensions of real coordinates.
    pub const fn supports(self, section: Self) -> bool {
        match self {
            Self::OneDimensional | Self::AnyDimensional => true,
            Self::TwoDimensional => matches!(
                section,
                Self::TwoDimensional | Self::ThreeDimensional | Self::AnyDimensional
            ),
            Self::ThreeDimensional => {
                matches!(section, Self::ThreeDimensional | Self::AnyDimensional)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Location {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Location {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    fn minus(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Unit vector in the same direction, or `None` for a (near) zero vector
    fn normalized(self) -> Option<Self> {
        let norm = libm::sqrt(self.dot(self));
        (norm.is_finite() && norm > SPAN_TOLERANCE)
            .then(|| Self::new(self.x / norm, self.y / norm, self.z / norm))
    }

    /// Rotate about the Z axis by `angle` radians
    #[must_use]
    pub fn rotated_z(self, angle: f64) -> Self {
        let (sin, cos) = (libm::sin(angle), libm::cos(angle));
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
            z: self.z,
        }
    }

    /// Rotate about the X axis by `angle` radians
    #[must_use]
    pub fn rotated_x(self, angle: f64) -> Self {
        let (sin, cos) = (libm::sin(angle), libm::cos(angle));
        Self {
            x: self.x,
            y: self.y * cos - self.z * sin,
            z: self.y * sin + self.z * cos,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelLocation {
    /// Physical pixel index
    pub index: usize,
    pub location: Location,
}

/// Physical arrangement of the strip's pixels.
#[derive(Debug, Clone, Default)]
pub enum StripLayout {
    /// Pixel `i` sits at `(0, 0, i)`, so an unrotated sweep follows the strip.
    #[default]
    Linear,
    /// Explicit coordinates, one per pixel.
    Custom(Arc<[Location]>),
}

impl StripLayout {
    pub fn custom(locations: impl Into<Arc<[Location]>>) -> Self {
        Self::Custom(locations.into())
    }

    /// Number of pixels the layout describes, if it is explicit
    pub fn explicit_len(&self) -> Option<usize> {
        match self {
            Self::Linear => None,
            Self::Custom(locations) => Some(locations.len()),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn location(&self, index: usize) -> Location {
        match self {
            Self::Custom(locations) => locations
                .get(index)
                .copied()
                .unwrap_or(Location::new(0.0, 0.0, index as f64)),
            Self::Linear => Location::new(0.0, 0.0, index as f64),
        }
    }

    /// Dimensionality of the space the pixels actually span.
    ///
    /// Decided by the rank of the offsets from the first pixel, not by how
    /// many axes vary: a straight strip laid diagonally is still
    /// one-dimensional, and a flat panel at an angle is two-dimensional.
    pub fn dimensionality(&self) -> Dimensionality {
        let Self::Custom(locations) = self else {
            return Dimensionality::OneDimensional;
        };
        let Some(&first) = locations.first() else {
            return Dimensionality::OneDimensional;
        };

        let offsets: Vec<Location> = locations
            .iter()
            .filter_map(|&l| l.minus(first).normalized())
            .collect();

        let Some(&line) = offsets.first() else {
            return Dimensionality::OneDimensional;
        };
        let Some(normal) = offsets
            .iter()
            .find_map(|&offset| line.cross(offset).normalized())
        else {
            return Dimensionality::OneDimensional;
        };
        if offsets
            .iter()
            .any(|&offset| normal.dot(offset).abs() > SPAN_TOLERANCE)
        {
            Dimensionality::ThreeDimensional
        } else {
            Dimensionality::TwoDimensional
        }
    }
}

/// Pixel coordinates after a rotation of the coordinate system.
#[derive(Debug, Clone, Default)]
pub struct LocationTable {
    locations: Vec<PixelLocation>,
    z_min: f64,
    z_max: f64,
}

impl LocationTable {
    /// Rotate every pixel about Z by `rotation_z`, then about X by `rotation_x`.
    pub fn transform(
        pixels: impl IntoIterator<Item = PixelLocation>,
        rotation_z: f64,
        rotation_x: f64,
    ) -> Self {
        let locations: Vec<PixelLocation> = pixels
            .into_iter()
            .map(|pixel| PixelLocation {
                index: pixel.index,
                location: pixel.location.rotated_z(rotation_z).rotated_x(rotation_x),
            })
            .collect();

        let (z_min, z_max) = locations
            .iter()
            .map(|p| p.location.z)
            .filter(|z| z.is_finite())
            .fold(None, |acc: Option<(f64, f64)>, z| match acc {
                None => Some((z, z)),
                Some((lo, hi)) => Some((lo.min(z), hi.max(z))),
            })
            .unwrap_or((0.0, 0.0));

        Self {
            locations,
            z_min,
            z_max,
        }
    }

    pub fn locations(&self) -> &[PixelLocation] {
        &self.locations
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn z_min(&self) -> f64 {
        self.z_min
    }

    pub fn z_max(&self) -> f64 {
        self.z_max
    }

    /// Partition pixels by sweeping a plane along Z in increments of `step`.
    ///
    /// The threshold starts at `z_min` and advances by `step` before each
    /// bucket is filled; a bucket takes every pixel at or below the threshold
    /// that no earlier bucket took. The sweep stops once the threshold reaches
    /// `z_max`. Buckets may be empty and list physical indices ascending.
    ///
    /// A step that would produce more than [`MAX_SWEEP_BUCKETS`] buckets is
    /// a geometry error.
    pub fn sweep_buckets(&self, step: f64) -> StripResult<Vec<Vec<usize>>> {
        if !step.is_finite() || step <= 0.0 {
            return Err(StripError::geometry(format!(
                "sweep step must be a positive number, got {step}"
            )));
        }
        if self.locations.is_empty() {
            return Ok(Vec::new());
        }
        #[allow(clippy::cast_precision_loss)]
        let bucket_limit = MAX_SWEEP_BUCKETS as f64;
        if (self.z_max - self.z_min) / step > bucket_limit {
            return Err(StripError::geometry(format!(
                "sweep step {step} over a depth of {} needs more than {MAX_SWEEP_BUCKETS} buckets",
                self.z_max - self.z_min
            )));
        }

        let mut order: Vec<&PixelLocation> = self
            .locations
            .iter()
            .filter(|p| p.location.z.is_finite())
            .collect();
        order.sort_by(|a, b| {
            a.location
                .z
                .total_cmp(&b.location.z)
                .then(a.index.cmp(&b.index))
        });

        let mut buckets = Vec::new();
        let mut threshold = self.z_min;
        let mut next = 0;
        loop {
            // a step below the float resolution would never reach z_max
            let advanced = threshold + step;
            threshold = if advanced > threshold {
                advanced
            } else {
                self.z_max
            };
            let mut bucket = Vec::new();
            while let Some(pixel) = order.get(next) {
                if pixel.location.z > threshold {
                    break;
                }
                bucket.push(pixel.index);
                next += 1;
            }
            bucket.sort_unstable();
            buckets.push(bucket);

            if threshold >= self.z_max {
                break;
            }
        }

        Ok(buckets)
    }
}
