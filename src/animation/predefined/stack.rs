use crate::animation::predefined::{ANIMATION_NAME_STACK, PARAM_INTER_MOVEMENT_DELAY};
use crate::animation::{AnimationDefinition, AnimationInfo, Direction};

/// Pixels run to the far end of the section and stay there, one on top of
/// the other
pub fn stack() -> AnimationDefinition {
    let info = AnimationInfo::new(ANIMATION_NAME_STACK, "STK")
        .with_description(
            "Pixels colored from `colors[0]` run to the far end of the section and \
             stack up until the section is full.",
        )
        .with_minimum_colors(1)
        .directional()
        .with_int_param(
            PARAM_INTER_MOVEMENT_DELAY,
            "Delay between movements of a running pixel",
            Some(10),
        );

    AnimationDefinition::new(info, |section, params, ctx| {
        let color = params.color(0)?;
        let delay = params.delay_param(PARAM_INTER_MOVEMENT_DELAY)?;
        let len = section.len();
        let logical = |step: usize| match params.direction() {
            Direction::Forward => step,
            Direction::Backward => len - step - 1,
        };

        for top in (0..len).rev() {
            for step in 0..top {
                let pixel = logical(step);
                section.set_actual(pixel, color.get(pixel))?;
                let waited = ctx.delay(delay);
                section.revert(pixel)?;
                waited?;
            }
            let pixel = logical(top);
            section.set_prolonged(pixel, color.get(pixel))?;
        }
        Ok(())
    })
}
