//! Property-based invariant tests.
//!
//! Verifies:
//! 1. Expansion yields exactly `length` colors drawn from the key colors,
//!    starting with the first key.
//! 2. Rotating by `k` then by `-k` restores the expanded gradient.
//! 3. Rotating by `k` and by `k + len` agree.
//! 4. After any sequence of transient writes, `revert` restores the resting color.
//! 5. A sweep assigns every pixel to exactly one bucket, in nondecreasing z.

use std::sync::Arc;

use animated_strip::color::{ColorGradient, Rgb, rgb_from_u32};
use animated_strip::geometry::{Location, StripLayout};
use animated_strip::{Section, Strip};
use proptest::prelude::*;

fn arb_color() -> impl Strategy<Value = Rgb> {
    (0u32..=0xFF_FFFF).prop_map(rgb_from_u32)
}

fn arb_gradient() -> impl Strategy<Value = ColorGradient> {
    prop::collection::vec(arb_color(), 1..8).prop_map(ColorGradient::new)
}

proptest! {
    #[test]
    fn expand_uses_key_colors(gradient in arb_gradient(), length in 1usize..200) {
        let expanded = gradient.expand(length);
        prop_assert_eq!(expanded.len(), length);
        prop_assert_eq!(expanded.get(0), gradient.colors()[0]);
        for color in expanded.iter() {
            prop_assert!(gradient.colors().contains(&color));
        }
    }

    #[test]
    fn rotate_is_invertible(gradient in arb_gradient(), length in 1usize..100, k in -500isize..500) {
        let expanded = gradient.expand(length);
        prop_assert_eq!(expanded.rotate(k).rotate(-k), expanded);
    }

    #[test]
    fn rotate_wraps(gradient in arb_gradient(), length in 1usize..100, k in -500isize..500) {
        let expanded = gradient.expand(length);
        #[allow(clippy::cast_possible_wrap)]
        let len = length as isize;
        prop_assert_eq!(expanded.rotate(k), expanded.rotate(k + len));
    }

    #[test]
    fn revert_restores_prolonged(
        resting in arb_color(),
        writes in prop::collection::vec(arb_color(), 0..16),
        pixel in 0usize..8,
    ) {
        let strip = Strip::new(8);
        strip.set_prolonged(pixel, resting).unwrap();
        for color in writes {
            strip.set_actual(pixel, color).unwrap();
        }
        strip.revert(pixel).unwrap();
        let state = strip.get(pixel).unwrap();
        prop_assert_eq!(state.actual, state.prolonged);
        prop_assert_eq!(state.actual, resting);
    }

    #[test]
    fn sweep_partitions_pixels(
        points in prop::collection::vec((-50.0f64..50.0, -50.0f64..50.0, -50.0f64..50.0), 1..40),
        rotation_z in -3.2f64..3.2,
        rotation_x in -3.2f64..3.2,
        step in 0.5f64..20.0,
    ) {
        let locations: Vec<Location> = points
            .iter()
            .map(|&(x, y, z)| Location::new(x, y, z))
            .collect();
        let len = locations.len();
        let strip = Arc::new(Strip::with_layout(len, StripLayout::custom(locations)));
        let table = Section::whole(strip).location_table(rotation_z, rotation_x);
        let buckets = table.sweep_buckets(step).unwrap();

        let mut seen: Vec<usize> = buckets.iter().flatten().copied().collect();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..len).collect::<Vec<_>>());

        let z = |index: usize| table.locations()[index].location.z;
        for pair in buckets.windows(2) {
            if let (Some(hi), Some(lo)) = (
                pair[0].iter().map(|&i| z(i)).reduce(f64::max),
                pair[1].iter().map(|&i| z(i)).reduce(f64::min),
            ) {
                prop_assert!(hi <= lo);
            }
        }
    }
}
