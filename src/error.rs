//! Error taxonomy shared by every layer of the engine.

pub type StripResult<T> = Result<T, StripError>;

/// Parameter validation failures, reported before any pixel is touched.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("`{animation}` needs at least {required} colors, got {provided}")]
    InsufficientColors {
        animation: String,
        required: usize,
        provided: usize,
    },

    #[error("`{animation}` is missing required parameter `{key}`")]
    MissingParameter { animation: String, key: String },

    #[error("`{animation}` is {required:?} but the section is {section:?}")]
    DimensionalityMismatch {
        animation: String,
        required: crate::geometry::Dimensionality,
        section: crate::geometry::Dimensionality,
    },

    #[error("run count {0} is invalid (use -1 for continuous or a positive count)")]
    InvalidRunCount(i32),

    #[error("direction must be 'F' or 'B', got {0:?}")]
    InvalidDirection(char),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum StripError {
    #[error("pixel {pixel} is out of range for a strip of {len} pixels")]
    OutOfRange { pixel: usize, len: usize },

    #[error("index {index} is out of bounds for a section of {len} pixels")]
    Index { index: usize, len: usize },

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("animation id `{0}` is already running")]
    DuplicateId(String),

    #[error("unknown animation `{0}`")]
    UnknownAnimation(String),

    #[error("child animation `{id}` failed: {source}")]
    ChildFailure {
        id: String,
        #[source]
        source: Box<StripError>,
    },

    #[error("animation was cancelled")]
    Cancelled,

    #[error("animation error: {0}")]
    Animation(String),

    #[error("geometry error: {0}")]
    Geometry(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("worker pool error: {0}")]
    Pool(String),
}

impl StripError {
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the error is the cooperative cancellation signal.
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
