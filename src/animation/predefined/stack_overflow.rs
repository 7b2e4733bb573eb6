use crate::animation::predefined::{
    ANIMATION_NAME_STACK, ANIMATION_NAME_STACK_OVERFLOW, PARAM_INTER_MOVEMENT_DELAY,
};
use crate::animation::{AnimationDefinition, AnimationInfo, AnimationParams, Direction};

/// Two stacks racing in from opposite ends of the section
pub fn stack_overflow() -> AnimationDefinition {
    let info = AnimationInfo::new(ANIMATION_NAME_STACK_OVERFLOW, "STO")
        .with_description(
            "Two Stack animations start from opposite ends of the section, meet in the \
             middle and overflow each other's half.",
        )
        .with_minimum_colors(2)
        .with_run_count_default(-1)
        .with_int_param(
            PARAM_INTER_MOVEMENT_DELAY,
            "Delay between movements in the animation",
            Some(10),
        );

    AnimationDefinition::new(info, |section, params, ctx| {
        let delay = params.int_param(PARAM_INTER_MOVEMENT_DELAY)?;
        let base =
            AnimationParams::new(ANIMATION_NAME_STACK).int_param(PARAM_INTER_MOVEMENT_DELAY, delay);

        let forward = base
            .clone()
            .add_color(params.color(0)?.original().clone())
            .direction(Direction::Forward);
        let backward = base
            .add_color(params.color(1)?.original().clone())
            .direction(Direction::Backward);

        ctx.run_parallel_and_join(vec![(forward, section.clone()), (backward, section.clone())])
    })
}
