//! Error types for centroid computation.

use thiserror::Error;

/// Result type alias for centroid operations.
pub type CogResult<T> = Result<T, CogError>;

/// Errors raised by the calculator and the flat-buffer constructors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CogError {
    /// Input coordinates cannot describe a triangle soup.
    #[error("invalid mesh data: {issue}")]
    InvalidMeshData { issue: MeshDataIssue },

    /// Total signed volume fell within the configured epsilon.
    ///
    /// Only returned when the calculator is configured to reject degenerate
    /// meshes; otherwise the center is reported as the origin.
    #[error("degenerate mesh: total signed volume {signed_volume:e} is within epsilon {epsilon:e}")]
    DegenerateMesh { signed_volume: f64, epsilon: f64 },

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

/// What exactly is wrong with a flat coordinate buffer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshDataIssue {
    #[error("coordinate count {len} is not a multiple of 9")]
    LengthNotMultipleOfNine { len: usize },

    #[error("coordinate {index} (triangle {triangle}) is not finite: {value}")]
    NonFiniteCoordinate {
        index: usize,
        triangle: usize,
        value: f64,
    },

    /// Coordinates were finite but the accumulated sums overflowed.
    #[error("accumulated volume or centroid is not finite (signed volume {signed_volume})")]
    NonFiniteResult { signed_volume: f64 },
}

impl CogError {
    pub fn length_not_multiple_of_nine(len: usize) -> Self {
        CogError::InvalidMeshData {
            issue: MeshDataIssue::LengthNotMultipleOfNine { len },
        }
    }

    pub fn non_finite_coordinate(index: usize, value: f64) -> Self {
        CogError::InvalidMeshData {
            issue: MeshDataIssue::NonFiniteCoordinate {
                index,
                triangle: index / 9,
                value,
            },
        }
    }

    pub fn non_finite_result(signed_volume: f64) -> Self {
        CogError::InvalidMeshData {
            issue: MeshDataIssue::NonFiniteResult { signed_volume },
        }
    }

    pub fn invalid_config(reason: impl Into<String>) -> Self {
        CogError::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// True for errors caused by the caller's input rather than configuration.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, CogError::InvalidMeshData { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_finite_reports_triangle() {
        let err = CogError::non_finite_coordinate(20, f64::NAN);
        match err {
            CogError::InvalidMeshData {
                issue: MeshDataIssue::NonFiniteCoordinate { index, triangle, .. },
            } => {
                assert_eq!(index, 20);
                assert_eq!(triangle, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_display() {
        let err = CogError::length_not_multiple_of_nine(10);
        assert_eq!(
            err.to_string(),
            "invalid mesh data: coordinate count 10 is not a multiple of 9"
        );
        assert!(err.is_invalid_input());
        assert!(!CogError::invalid_config("x").is_invalid_input());
    }
}
