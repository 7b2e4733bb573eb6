use std::collections::HashMap;

use embassy_time::Duration;

use crate::animation::{AnimationInfo, ParameterSpec};
use crate::color::{BLACK, ColorGradient, ExpandedGradient};
use crate::error::{StripError, StripResult, ValidationError};
use crate::section::Section;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    /// Parse `'F'`/`'B'` (either case)
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'F' | 'f' => Some(Self::Forward),
            'B' | 'b' => Some(Self::Backward),
            _ => None,
        }
    }

    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

/// A request to run one animation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimationParams {
    /// Name or abbreviation of the animation to run
    pub animation: String,
    pub colors: Vec<ColorGradient>,
    pub int_params: HashMap<String, i64>,
    pub double_params: HashMap<String, f64>,
    pub string_params: HashMap<String, String>,
    pub bool_params: HashMap<String, bool>,
    pub direction: Direction,
    /// Explicit run count; `-1` loops until cancelled, `0` or `None` uses
    /// the animation's default
    pub run_count: Option<i32>,
    /// Overrides the animation's default between looping and a single run
    pub continuous: Option<bool>,
    /// Caller-chosen instance id; generated when absent
    pub id: Option<String>,
}

impl AnimationParams {
    pub fn new(animation: impl Into<String>) -> Self {
        Self {
            animation: animation.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn animation(mut self, animation: impl Into<String>) -> Self {
        self.animation = animation.into();
        self
    }

    /// Set the gradient at `index`, padding earlier slots with black
    #[must_use]
    pub fn color(mut self, index: usize, color: impl Into<ColorGradient>) -> Self {
        if self.colors.len() <= index {
            self.colors.resize(index + 1, ColorGradient::solid(BLACK));
        }
        self.colors[index] = color.into();
        self
    }

    #[must_use]
    pub fn add_color(mut self, color: impl Into<ColorGradient>) -> Self {
        self.colors.push(color.into());
        self
    }

    #[must_use]
    pub fn add_colors<C: Into<ColorGradient>>(mut self, colors: impl IntoIterator<Item = C>) -> Self {
        self.colors.extend(colors.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn int_param(mut self, name: impl Into<String>, value: i64) -> Self {
        self.int_params.insert(name.into(), value);
        self
    }

    #[must_use]
    pub fn double_param(mut self, name: impl Into<String>, value: f64) -> Self {
        self.double_params.insert(name.into(), value);
        self
    }

    #[must_use]
    pub fn string_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.string_params.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn bool_param(mut self, name: impl Into<String>, value: bool) -> Self {
        self.bool_params.insert(name.into(), value);
        self
    }

    #[must_use]
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Set the direction from `'F'` or `'B'`
    pub fn direction_char(self, direction: char) -> StripResult<Self> {
        let direction = Direction::from_char(direction)
            .ok_or(ValidationError::InvalidDirection(direction))?;
        Ok(self.direction(direction))
    }

    #[must_use]
    pub fn run_count(mut self, run_count: i32) -> Self {
        self.run_count = Some(run_count);
        self
    }

    #[must_use]
    pub fn continuous(mut self, continuous: bool) -> Self {
        self.continuous = Some(continuous);
        self
    }

    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Copy for a nested run: same colors and parameters, but no identity
    /// and no looping inherited from the parent.
    #[must_use]
    pub fn derived(&self) -> Self {
        Self {
            run_count: None,
            continuous: None,
            id: None,
            ..self.clone()
        }
    }
}

/// Parameters validated against an animation's schema, with defaults filled
/// in and colors expanded to the target section.
#[derive(Debug, Clone)]
pub struct PreparedParams {
    id: String,
    source: AnimationParams,
    colors: Vec<ExpandedGradient>,
    int_params: HashMap<String, i64>,
    double_params: HashMap<String, f64>,
    string_params: HashMap<String, String>,
    bool_params: HashMap<String, bool>,
    run_count: i32,
}

impl PreparedParams {
    pub(crate) fn new(
        info: &AnimationInfo,
        params: AnimationParams,
        section: &Section,
        id: String,
    ) -> StripResult<Self> {
        if !info.unlimited_colors && params.colors.len() < info.minimum_colors {
            return Err(ValidationError::InsufficientColors {
                animation: info.name.clone(),
                required: info.minimum_colors,
                provided: params.colors.len(),
            }
            .into());
        }

        let run_count = resolve_run_count(info, &params)?;
        let int_params = with_defaults(&info.name, &info.int_params, &params.int_params)?;
        let double_params = with_defaults(&info.name, &info.double_params, &params.double_params)?;
        let string_params = with_defaults(&info.name, &info.string_params, &params.string_params)?;
        let bool_params = with_defaults(&info.name, &info.bool_params, &params.bool_params)?;

        if !info.dimensionality.supports(section.dimensionality()) {
            return Err(ValidationError::DimensionalityMismatch {
                animation: info.name.clone(),
                required: info.dimensionality,
                section: section.dimensionality(),
            }
            .into());
        }

        let colors = params
            .colors
            .iter()
            .map(|gradient| gradient.expand(section.len()))
            .collect();

        Ok(Self {
            id,
            source: params,
            colors,
            int_params,
            double_params,
            string_params,
            bool_params,
            run_count,
        })
    }

    /// Id of the running instance
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The request these parameters were prepared from
    pub fn source(&self) -> &AnimationParams {
        &self.source
    }

    pub fn direction(&self) -> Direction {
        self.source.direction
    }

    /// Resolved run count; `-1` loops until cancelled
    pub fn run_count(&self) -> i32 {
        self.run_count
    }

    pub fn is_continuous(&self) -> bool {
        self.run_count == -1
    }

    pub fn colors(&self) -> &[ExpandedGradient] {
        &self.colors
    }

    pub fn color(&self, index: usize) -> StripResult<&ExpandedGradient> {
        self.colors.get(index).ok_or_else(|| {
            ValidationError::InsufficientColors {
                animation: self.source.animation.clone(),
                required: index + 1,
                provided: self.colors.len(),
            }
            .into()
        })
    }

    pub fn int_param(&self, name: &str) -> StripResult<i64> {
        self.int_params
            .get(name)
            .copied()
            .ok_or_else(|| self.missing(name))
    }

    pub fn double_param(&self, name: &str) -> StripResult<f64> {
        self.double_params
            .get(name)
            .copied()
            .ok_or_else(|| self.missing(name))
    }

    pub fn string_param(&self, name: &str) -> StripResult<&str> {
        self.string_params
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| self.missing(name))
    }

    pub fn bool_param(&self, name: &str) -> StripResult<bool> {
        self.bool_params
            .get(name)
            .copied()
            .ok_or_else(|| self.missing(name))
    }

    /// Integer parameter read as milliseconds; negative values clamp to zero
    pub fn delay_param(&self, name: &str) -> StripResult<Duration> {
        let millis = self.int_param(name)?;
        Ok(Duration::from_millis(u64::try_from(millis).unwrap_or(0)))
    }

    fn missing(&self, key: &str) -> StripError {
        ValidationError::MissingParameter {
            animation: self.source.animation.clone(),
            key: key.to_owned(),
        }
        .into()
    }
}

fn resolve_run_count(info: &AnimationInfo, params: &AnimationParams) -> StripResult<i32> {
    let run_count = match (params.run_count, params.continuous) {
        (Some(count), _) if count != 0 => count,
        (_, Some(true)) => -1,
        (_, Some(false)) if info.run_count_default == -1 => 1,
        _ => info.run_count_default,
    };
    if run_count == 0 || run_count < -1 {
        return Err(ValidationError::InvalidRunCount(run_count).into());
    }
    Ok(run_count)
}

fn with_defaults<T: Clone>(
    animation: &str,
    specs: &[ParameterSpec<T>],
    given: &HashMap<String, T>,
) -> StripResult<HashMap<String, T>> {
    let mut merged = given.clone();
    for spec in specs {
        if merged.contains_key(&spec.name) {
            continue;
        }
        let Some(default) = spec.default.clone() else {
            return Err(ValidationError::MissingParameter {
                animation: animation.to_owned(),
                key: spec.name.clone(),
            }
            .into());
        };
        merged.insert(spec.name.clone(), default);
    }
    Ok(merged)
}
