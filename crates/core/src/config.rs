use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Scale the double-tap toggle zooms to when at rest.
pub const TOGGLE_SCALE: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },
    #[error("min_scale must be > 0, got {0}")]
    NonPositiveMinScale(f64),
    #[error("max_scale ({max}) is smaller than min_scale ({min})")]
    InvertedScaleRange { min: f64, max: f64 },
    #[error("initial_scale {initial} is outside [{min}, {max}]")]
    InitialScaleOutOfRange { initial: f64, min: f64, max: f64 },
    #[error("double-tap target scale 1.0 is outside [{min}, {max}]")]
    ToggleScaleOutOfRange { min: f64, max: f64 },
    #[error("pan_limit must be >= 0, got {0}")]
    InvalidPanLimit(f64),
    #[error("{field} must be >= 0, got {value}")]
    NegativeThreshold { field: &'static str, value: f64 },
    #[error("double_tap_window_ms must be > 0, got {0}")]
    InvalidTapWindow(f64),
}

/// Construction-time settings of a [`ViewportController`](crate::ViewportController).
///
/// Missing fields fall back to [`ViewportConfig::default`] when deserialized,
/// so `{"initial_scale": 0.8}` is a valid config document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Rest scale: where the surface starts and where double tap returns to.
    pub initial_scale: f64,
    /// Pan bound per unit of scale: `|x|, |y| <= pan_limit * scale`.
    pub pan_limit: f64,
    /// Single-finger pan is only active above `initial_scale + pan_threshold`.
    pub pan_threshold: f64,
    /// Double tap resets to rest above `initial_scale + toggle_threshold`,
    /// otherwise zooms to [`TOGGLE_SCALE`].
    pub toggle_threshold: f64,
    /// Maximum gap between two single-finger starts to count as a double tap.
    pub double_tap_window_ms: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.5,
            max_scale: 4.0,
            initial_scale: 0.6,
            pan_limit: 200.0,
            pan_threshold: 0.05,
            toggle_threshold: 0.1,
            double_tap_window_ms: 300.0,
        }
    }
}

impl ViewportConfig {
    /// Reject configurations that would make the published invariants
    /// unsatisfiable. Out-of-range values are never silently clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("min_scale", self.min_scale),
            ("max_scale", self.max_scale),
            ("initial_scale", self.initial_scale),
            ("pan_limit", self.pan_limit),
            ("pan_threshold", self.pan_threshold),
            ("toggle_threshold", self.toggle_threshold),
            ("double_tap_window_ms", self.double_tap_window_ms),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }

        let (min, max) = (self.min_scale, self.max_scale);
        if min <= 0.0 {
            return Err(ConfigError::NonPositiveMinScale(min));
        }
        if max < min {
            return Err(ConfigError::InvertedScaleRange { min, max });
        }
        if !(min..=max).contains(&self.initial_scale) {
            return Err(ConfigError::InitialScaleOutOfRange {
                initial: self.initial_scale,
                min,
                max,
            });
        }
        if !(min..=max).contains(&TOGGLE_SCALE) {
            return Err(ConfigError::ToggleScaleOutOfRange { min, max });
        }
        if self.pan_limit < 0.0 {
            return Err(ConfigError::InvalidPanLimit(self.pan_limit));
        }
        for (field, value) in [
            ("pan_threshold", self.pan_threshold),
            ("toggle_threshold", self.toggle_threshold),
        ] {
            if value < 0.0 {
                return Err(ConfigError::NegativeThreshold { field, value });
            }
        }
        if self.double_tap_window_ms <= 0.0 {
            return Err(ConfigError::InvalidTapWindow(self.double_tap_window_ms));
        }
        Ok(())
    }

    /// Parse a (possibly partial) JSON config and validate it.
    pub fn from_json(data: &str) -> Result<Self, ConfigParseError> {
        let config: Self = serde_json::from_str(data)?;
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Error)]
pub enum ConfigParseError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] ConfigError),
}
