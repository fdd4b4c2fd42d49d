//! Error handling for the blend shape player
//!
//! Every failure is a local precondition violation. Callers get the error
//! back synchronously; nothing here is retried or swallowed.

/// Main error type for the blend shape player
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BlendShapeError {
    // Setup Errors
    #[error("Shape count {shape_count} exceeds configured cap of {cap}")]
    CapacityExceeded { shape_count: usize, cap: usize },

    #[error("Dimension mismatch for {buffer}: expected {expected}, found {found}")]
    DimensionMismatch {
        buffer: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Invalid source data for shape {shape}: {reason}")]
    InvalidSourceData { shape: String, reason: String },

    // Access Errors
    #[error("Shape index {index} out of range for {len} shapes")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Weight {value} for shape {index} is not finite")]
    InvalidWeight { index: usize, value: f32 },

    // State Errors
    #[error("{operation} called before initialize")]
    UseBeforeInitialize { operation: &'static str },

    #[error("{operation} called after teardown")]
    UseAfterTeardown { operation: &'static str },

    #[error("Accumulator is already initialized")]
    AlreadyInitialized,

    // Configuration Errors
    #[error("Invalid config: {field} = {value} ({reason})")]
    InvalidConfig {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Config parse error: {0}")]
    ConfigParse(String),

    #[error("IO error for {path}: {error}")]
    Io { path: String, error: String },

    // Threading Errors
    #[error("Worker pool error: {0}")]
    ThreadPool(String),
}

/// Type alias for Results in the blend shape player
pub type BlendShapeResult<T> = Result<T, BlendShapeError>;

impl From<rayon::ThreadPoolBuildError> for BlendShapeError {
    fn from(error: rayon::ThreadPoolBuildError) -> Self {
        BlendShapeError::ThreadPool(error.to_string())
    }
}

#[cfg(feature = "toml-config")]
impl From<toml::de::Error> for BlendShapeError {
    fn from(error: toml::de::Error) -> Self {
        BlendShapeError::ConfigParse(error.to_string())
    }
}
