//! Auto-capture configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors.
///
/// Invalid values are rejected when the config is set, never silently
/// clamped; clamping would drift behavior without telling anyone.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} out of range: {value} (expected {min}..={max})")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("stability_frames must be at least 1, got {0}")]
    StabilityTooLow(u32),
}

/// Auto-capture configuration. Mutable at runtime; changes take effect on
/// the next evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AutoCaptureConfig {
    /// Master switch for automatic triggering
    pub enabled: bool,
    /// Every detected face must smile, vs. at least one
    pub require_all_smiling: bool,
    /// Minimum happy probability to count as smiling
    pub smile_threshold: f32,
    /// Minimum detector confidence for a face to be trusted
    pub confidence_threshold: f32,
    /// Consecutive qualifying frames required before firing
    pub stability_frames: u32,
}

impl Default for AutoCaptureConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            require_all_smiling: true,
            smile_threshold: 0.7,
            confidence_threshold: 0.5,
            stability_frames: 3,
        }
    }
}

impl AutoCaptureConfig {
    fn check_unit(field: &'static str, value: f32) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&value) || value.is_nan() {
            Err(ConfigError::OutOfRange {
                field,
                value,
                min: 0.0,
                max: 1.0,
            })
        } else {
            Ok(())
        }
    }

    /// Validate all fields. Called whenever a config is installed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::check_unit("smile_threshold", self.smile_threshold)?;
        Self::check_unit("confidence_threshold", self.confidence_threshold)?;
        if self.stability_frames < 1 {
            return Err(ConfigError::StabilityTooLow(self.stability_frames));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(AutoCaptureConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_threshold_above_one() {
        let config = AutoCaptureConfig {
            smile_threshold: 1.5,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::OutOfRange {
                field: "smile_threshold",
                value: 1.5,
                min: 0.0,
                max: 1.0,
            })
        );
    }

    #[test]
    fn rejects_negative_confidence() {
        let config = AutoCaptureConfig {
            confidence_threshold: -0.1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_stability_frames() {
        let config = AutoCaptureConfig {
            stability_frames: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::StabilityTooLow(0)));
    }

    #[test]
    fn boundary_thresholds_are_valid() {
        let config = AutoCaptureConfig {
            smile_threshold: 0.0,
            confidence_threshold: 1.0,
            stability_frames: 1,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
