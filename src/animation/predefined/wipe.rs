use std::collections::HashMap;

use crate::animation::predefined::{ANIMATION_NAME_WIPE, PARAM_INTER_MOVEMENT_DELAY};
use crate::animation::{AnimationDefinition, AnimationInfo};

pub const PARAM_MOVEMENT_PER_ITERATION: &str = "movementPerIteration";
pub const PARAM_Z_ROTATION: &str = "zRotation";
pub const PARAM_X_ROTATION: &str = "xRotation";

/// A plane sweeping along the (rotated) Z axis, painting `colors[0]`
pub fn wipe() -> AnimationDefinition {
    let info = AnimationInfo::new(ANIMATION_NAME_WIPE, "WIP")
        .with_description(
            "A plane sweeps through the section along its Z axis, setting every pixel it \
             passes to `colors[0]`. Rotations reorient the sweep.",
        )
        .with_minimum_colors(1)
        .with_dimensionality(crate::geometry::Dimensionality::AnyDimensional)
        .with_int_param(
            PARAM_INTER_MOVEMENT_DELAY,
            "Delay between movements in the animation",
            Some(30),
        )
        .with_double_param(
            PARAM_MOVEMENT_PER_ITERATION,
            "How far the plane moves during each iteration",
            Some(10.0),
        )
        .with_double_param(PARAM_Z_ROTATION, "Rotation around the Z axis (radians)", Some(0.0))
        .with_double_param(PARAM_X_ROTATION, "Rotation around the X axis (radians)", Some(0.0));

    AnimationDefinition::new(info, |section, params, ctx| {
        let color = params.color(0)?;
        let delay = params.delay_param(PARAM_INTER_MOVEMENT_DELAY)?;
        let step = params.double_param(PARAM_MOVEMENT_PER_ITERATION)?;
        let table = section.location_table(
            params.double_param(PARAM_Z_ROTATION)?,
            params.double_param(PARAM_X_ROTATION)?,
        );

        // buckets hold physical indices; gradients are laid out logically
        let logical: HashMap<usize, usize> = section
            .physical_indices()
            .iter()
            .enumerate()
            .map(|(logical, &physical)| (physical, logical))
            .collect();

        for bucket in table.sweep_buckets(step)? {
            for pixel in bucket {
                let shade = logical.get(&pixel).map_or(color.get(0), |&l| color.get(l));
                section.strip().set_prolonged(pixel, shade)?;
            }
            ctx.delay(delay)?;
        }
        Ok(())
    })
}
