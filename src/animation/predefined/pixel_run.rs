use crate::animation::predefined::{ANIMATION_NAME_PIXEL_RUN, PARAM_INTER_MOVEMENT_DELAY};
use crate::animation::{AnimationDefinition, AnimationInfo, Direction};

/// A single pixel set from `colors[0]` runs across the section
pub fn pixel_run() -> AnimationDefinition {
    let info = AnimationInfo::new(ANIMATION_NAME_PIXEL_RUN, "PXR")
        .with_description(
            "A pixel colored from `colors[0]` runs from one end of the section to the other.",
        )
        .with_minimum_colors(1)
        .directional()
        .with_int_param(
            PARAM_INTER_MOVEMENT_DELAY,
            "Delay between movements of the pixel",
            Some(50),
        );

    AnimationDefinition::new(info, |section, params, ctx| {
        let color = params.color(0)?;
        let delay = params.delay_param(PARAM_INTER_MOVEMENT_DELAY)?;
        let len = section.len();

        for step in 0..len {
            let pixel = match params.direction() {
                Direction::Forward => step,
                Direction::Backward => len - step - 1,
            };
            section.set_actual(pixel, color.get(pixel))?;
            let waited = ctx.delay(delay);
            section.revert(pixel)?;
            waited?;
        }
        Ok(())
    })
}
