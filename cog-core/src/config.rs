//! Calculator configuration.

use serde::{Deserialize, Serialize};

use crate::error::{CogError, CogResult};

/// Total signed volume at or below this magnitude is treated as zero.
pub const DEFAULT_VOLUME_EPSILON: f64 = 1e-8;

/// Triangle count from which the calculator folds in parallel.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 65_536;

/// Settings for [`VolumeCentroidCalculator`](crate::VolumeCentroidCalculator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Volume magnitude below which no center is derived.
    pub volume_epsilon: f64,
    /// Meshes with at least this many triangles are reduced with rayon.
    pub parallel_threshold: usize,
    /// Return [`CogError::DegenerateMesh`] instead of a zero center.
    pub reject_degenerate: bool,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            volume_epsilon: DEFAULT_VOLUME_EPSILON,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            reject_degenerate: false,
        }
    }
}

impl CalculatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_volume_epsilon(mut self, epsilon: f64) -> Self {
        self.volume_epsilon = epsilon;
        self
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn with_reject_degenerate(mut self, reject: bool) -> Self {
        self.reject_degenerate = reject;
        self
    }

    pub fn validate(&self) -> CogResult<()> {
        if !self.volume_epsilon.is_finite() || self.volume_epsilon < 0.0 {
            return Err(CogError::invalid_config(format!(
                "volume_epsilon must be a finite non-negative number, got {}",
                self.volume_epsilon
            )));
        }
        if self.parallel_threshold == 0 {
            return Err(CogError::invalid_config(
                "parallel_threshold must be at least 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CalculatorConfig::default();
        assert_eq!(config.volume_epsilon, 1e-8);
        assert!(!config.reject_degenerate);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_epsilon() {
        assert!(CalculatorConfig::new()
            .with_volume_epsilon(-1.0)
            .validate()
            .is_err());
        assert!(CalculatorConfig::new()
            .with_volume_epsilon(f64::NAN)
            .validate()
            .is_err());
        assert!(CalculatorConfig::new()
            .with_parallel_threshold(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: CalculatorConfig =
            serde_json::from_str(r#"{ "reject_degenerate": true }"#).unwrap();
        assert!(config.reject_degenerate);
        assert_eq!(config.volume_epsilon, DEFAULT_VOLUME_EPSILON);
        assert_eq!(config.parallel_threshold, DEFAULT_PARALLEL_THRESHOLD);
    }
}
