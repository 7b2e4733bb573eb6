//! Animation definitions
//!
//! An animation is a record of metadata, a parameter schema and a body
//! function. Bodies receive the target [`Section`], the validated
//! [`PreparedParams`] and the [`ExecutionContext`] through which they delay,
//! fade pixels and run nested animations.

mod catalog;
mod params;
pub mod predefined;

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

pub use catalog::AnimationCatalog;
pub use params::{AnimationParams, Direction, PreparedParams};

use crate::engine::ExecutionContext;
use crate::error::{StripError, StripResult};
use crate::geometry::Dimensionality;
use crate::section::Section;

/// Animation body
pub type AnimationBody =
    Arc<dyn Fn(&Section, &PreparedParams, &ExecutionContext) -> StripResult<()> + Send + Sync>;

/// A named parameter declared by an animation.
///
/// Parameters without a default are required.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec<T> {
    pub name: String,
    pub description: String,
    pub default: Option<T>,
}

impl<T> ParameterSpec<T> {
    pub fn new(name: impl Into<String>, description: impl Into<String>, default: Option<T>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            default,
        }
    }
}

/// Metadata and parameter schema of an animation
#[derive(Debug, Clone)]
pub struct AnimationInfo {
    pub name: String,
    pub abbreviation: String,
    pub description: String,
    pub minimum_colors: usize,
    pub unlimited_colors: bool,
    pub dimensionality: Dimensionality,
    pub directional: bool,
    /// `-1` runs until cancelled
    pub run_count_default: i32,
    pub int_params: Vec<ParameterSpec<i64>>,
    pub double_params: Vec<ParameterSpec<f64>>,
    pub string_params: Vec<ParameterSpec<String>>,
    pub bool_params: Vec<ParameterSpec<bool>>,
}

impl AnimationInfo {
    pub fn new(name: impl Into<String>, abbreviation: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            abbreviation: abbreviation.into(),
            description: String::new(),
            minimum_colors: 0,
            unlimited_colors: false,
            dimensionality: Dimensionality::OneDimensional,
            directional: false,
            run_count_default: 1,
            int_params: Vec::new(),
            double_params: Vec::new(),
            string_params: Vec::new(),
            bool_params: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_minimum_colors(mut self, minimum_colors: usize) -> Self {
        self.minimum_colors = minimum_colors;
        self
    }

    #[must_use]
    pub fn with_unlimited_colors(mut self) -> Self {
        self.unlimited_colors = true;
        self
    }

    #[must_use]
    pub fn with_dimensionality(mut self, dimensionality: Dimensionality) -> Self {
        self.dimensionality = dimensionality;
        self
    }

    #[must_use]
    pub fn directional(mut self) -> Self {
        self.directional = true;
        self
    }

    #[must_use]
    pub fn with_run_count_default(mut self, run_count: i32) -> Self {
        self.run_count_default = run_count;
        self
    }

    #[must_use]
    pub fn with_int_param(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        default: Option<i64>,
    ) -> Self {
        self.int_params
            .push(ParameterSpec::new(name, description, default));
        self
    }

    #[must_use]
    pub fn with_double_param(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        default: Option<f64>,
    ) -> Self {
        self.double_params
            .push(ParameterSpec::new(name, description, default));
        self
    }

    #[must_use]
    pub fn with_string_param(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        default: Option<String>,
    ) -> Self {
        self.string_params
            .push(ParameterSpec::new(name, description, default));
        self
    }

    #[must_use]
    pub fn with_bool_param(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        default: Option<bool>,
    ) -> Self {
        self.bool_params
            .push(ParameterSpec::new(name, description, default));
        self
    }
}

/// Animation metadata plus the body that runs it
#[derive(Clone)]
pub struct AnimationDefinition {
    info: Arc<AnimationInfo>,
    body: AnimationBody,
}

impl AnimationDefinition {
    pub fn new<F>(info: AnimationInfo, body: F) -> Self
    where
        F: Fn(&Section, &PreparedParams, &ExecutionContext) -> StripResult<()>
            + Send
            + Sync
            + 'static,
    {
        Self {
            info: Arc::new(info),
            body: Arc::new(body),
        }
    }

    pub fn info(&self) -> &AnimationInfo {
        &self.info
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// Validate `params` for a run on `section` under instance `id`
    pub fn prepare(
        &self,
        params: AnimationParams,
        section: &Section,
        id: String,
    ) -> StripResult<PreparedParams> {
        PreparedParams::new(&self.info, params, section, id)
    }

    /// Run one iteration of the body.
    ///
    /// A panic inside the body is caught and reported as an
    /// [`StripError::Animation`] so it only fails the offending instance.
    pub(crate) fn invoke(
        &self,
        section: &Section,
        params: &PreparedParams,
        ctx: &ExecutionContext,
    ) -> StripResult<()> {
        catch_unwind(AssertUnwindSafe(|| (self.body)(section, params, ctx))).unwrap_or_else(
            |payload| {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_owned())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic payload".to_owned());
                tracing::warn!(animation = %self.info.name, %message, "animation body panicked");
                Err(StripError::animation(format!("panicked: {message}")))
            },
        )
    }
}

impl core::fmt::Debug for AnimationDefinition {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AnimationDefinition")
            .field("info", &self.info)
            .finish_non_exhaustive()
    }
}
