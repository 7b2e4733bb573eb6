use crate::animation::predefined::ANIMATION_NAME_COLOR;
use crate::animation::{AnimationDefinition, AnimationInfo};

/// Sets every pixel of the section to `colors[0]`
pub fn color() -> AnimationDefinition {
    let info = AnimationInfo::new(ANIMATION_NAME_COLOR, "COL")
        .with_description("Set every pixel of the section to `colors[0]`.")
        .with_minimum_colors(1);

    AnimationDefinition::new(info, |section, params, _ctx| {
        section.set_prolonged_colors(params.color(0)?)
    })
}
