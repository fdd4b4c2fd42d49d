//! Accumulator configuration
//!
//! Plain serde data plus validation. Loading from TOML is available with the
//! `toml-config` feature (on by default).

use crate::constants::{DEFAULT_CHUNK_SIZE, DEFAULT_WEIGHT_SCALE, MAX_CHUNK_SIZE};
use crate::error::{BlendShapeError, BlendShapeResult};
use serde::{Deserialize, Serialize};

/// How an active shape contributes to a vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Full delta when `weight > threshold`, nothing otherwise
    #[default]
    Threshold,
    /// `delta * weight / weight_scale`, thresholds ignored
    Weighted,
}

/// Main accumulator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccumulatorConfig {
    /// Vertices per dispatch chunk
    pub chunk_size: usize,

    /// Dedicated worker threads (0 = rayon global pool)
    pub worker_threads: usize,

    /// Run chunks on the worker pool; false runs them on the caller's thread
    pub parallel: bool,

    /// Optional cap on shape count, for hosts with a bounded property table
    pub max_shapes: Option<usize>,

    /// Contribution rule for active shapes
    pub blend_mode: BlendMode,

    /// Weight treated as full strength in `BlendMode::Weighted`
    pub weight_scale: f32,
}

impl Default for AccumulatorConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            worker_threads: 0,
            parallel: true,
            max_shapes: None,
            blend_mode: BlendMode::Threshold,
            weight_scale: DEFAULT_WEIGHT_SCALE,
        }
    }
}

impl AccumulatorConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> BlendShapeResult<()> {
        if self.chunk_size == 0 {
            return Err(invalid("chunk_size", self.chunk_size, "cannot be 0"));
        }

        if self.chunk_size > MAX_CHUNK_SIZE {
            return Err(invalid(
                "chunk_size",
                self.chunk_size,
                &format!("exceeds maximum of {}", MAX_CHUNK_SIZE),
            ));
        }

        if self.max_shapes == Some(0) {
            return Err(invalid("max_shapes", 0, "cap must allow at least one shape"));
        }

        if self.blend_mode == BlendMode::Weighted
            && !(self.weight_scale.is_finite() && self.weight_scale > 0.0)
        {
            return Err(invalid(
                "weight_scale",
                self.weight_scale,
                "must be finite and positive in weighted mode",
            ));
        }

        log::debug!(
            "[AccumulatorConfig] Validated: chunk_size={}, worker_threads={}, parallel={}, max_shapes={:?}, blend_mode={:?}",
            self.chunk_size,
            self.worker_threads,
            self.parallel,
            self.max_shapes,
            self.blend_mode
        );
        Ok(())
    }
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> BlendShapeError {
    BlendShapeError::InvalidConfig {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Parse and validate a TOML config document
#[cfg(feature = "toml-config")]
pub fn parse_config(source: &str) -> BlendShapeResult<AccumulatorConfig> {
    let config: AccumulatorConfig = toml::from_str(source)?;
    config.validate()?;
    Ok(config)
}

/// Load and validate a TOML config file
#[cfg(feature = "toml-config")]
pub fn load_config(path: impl AsRef<std::path::Path>) -> BlendShapeResult<AccumulatorConfig> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|e| BlendShapeError::Io {
        path: path.display().to_string(),
        error: e.to_string(),
    })?;

    log::info!("[load_config] Loading accumulator config from {}", path.display());
    parse_config(&source)
}
