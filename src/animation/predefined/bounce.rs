use crate::animation::predefined::{
    ANIMATION_NAME_BOUNCE, ANIMATION_NAME_PIXEL_RUN, PARAM_INTER_MOVEMENT_DELAY,
};
use crate::animation::{AnimationDefinition, AnimationInfo, Direction};

/// A pixel bouncing between the ends of a shrinking window.
///
/// Each bounce leaves a fading pixel behind at the end it reached, and the
/// window closes in by one pixel on that side.
pub fn bounce() -> AnimationDefinition {
    let info = AnimationInfo::new(ANIMATION_NAME_BOUNCE, "BNC")
        .with_description(
            "A pixel bounces back and forth; pixels at the end of each bounce fade back \
             to their prolonged color after being set from `colors[0]`.",
        )
        .with_minimum_colors(1)
        .with_run_count_default(-1)
        .with_int_param(
            PARAM_INTER_MOVEMENT_DELAY,
            "Delay between movements in the pixel run animations",
            None,
        );

    AnimationDefinition::new(info, |section, params, ctx| {
        let color = params.color(0)?;
        let len = section.len();
        let run = params.source().derived().animation(ANIMATION_NAME_PIXEL_RUN);

        for i in 0..len / 2 {
            ctx.run_sequential(
                run.clone().direction(Direction::Forward),
                &section.sub_section(i, len - i - 1)?,
            )?;
            ctx.set_pixel_fade_color(section, len - i - 1, color.get(len - i - 1))?;

            ctx.run_sequential(
                run.clone().direction(Direction::Backward),
                &section.sub_section(i, len - i - 2)?,
            )?;
            ctx.set_pixel_fade_color(section, i, color.get(i))?;
        }
        if len % 2 == 1 {
            ctx.set_pixel_fade_color(section, len / 2, color.get(len / 2))?;
        }
        Ok(())
    })
}
