//! Command-line front end for the COG calculator.
//!
//! Reads a flat coordinate list (9 values per triangle), computes the enclosed
//! volume and center of mass, and reports them as text or JSON.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use cog_core::{vector, CalculatorConfig, Mesh, Transform, Vec3, VolumeCentroidCalculator};
use tracing::info;

pub mod input;
pub mod report;

pub use input::{parse_coordinates, InputSource};
pub use report::{OutputFormat, Report};

/// Everything one invocation needs, decoupled from clap.
#[derive(Debug, Clone)]
pub struct CentroidJob {
    pub source: MeshSource,
    pub offset: Option<Vec3>,
    pub config: CalculatorConfig,
}

/// Where the triangles come from.
#[derive(Debug, Clone)]
pub enum MeshSource {
    Coordinates(InputSource),
    /// Axis-aligned demo cube of the given side length.
    Cube(f64),
}

/// Load a calculator configuration from a JSON file.
pub fn load_config(path: &Path) -> Result<CalculatorConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {:?}", path))?;
    let config: CalculatorConfig = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse config file {:?}", path))?;
    Ok(config)
}

/// Build the mesh, compute its centroid and assemble the report.
pub fn run_job(job: &CentroidJob) -> Result<Report> {
    let calculator = VolumeCentroidCalculator::new(job.config.clone())
        .context("Invalid calculator configuration")?;

    let mesh = match &job.source {
        MeshSource::Cube(size) => {
            if !size.is_finite() {
                bail!("Cube size must be finite, got {}", size);
            }
            Mesh::cube(*size)
        }
        MeshSource::Coordinates(source) => {
            let text = source.read_to_string()?;
            let coords = parse_coordinates(&text)
                .with_context(|| format!("Failed to decode coordinates from {}", source))?;
            Mesh::from_flat(&coords)
                .with_context(|| format!("Invalid mesh data in {}", source))?
        }
    };

    let mesh = match job.offset {
        Some(offset) if !vector::is_finite(&offset) => {
            bail!("Offset must be finite, got {:?}", offset);
        }
        Some(offset) => mesh.transformed(&Transform::translation_matrix(offset)),
        None => mesh,
    };

    info!(triangles = mesh.len(), "Loaded triangle soup");

    let result = calculator.compute(&mesh)?;
    Ok(Report::new(&result, &mesh))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_job_with_offset() {
        let job = CentroidJob {
            source: MeshSource::Cube(1.0),
            offset: Some(Vec3::new(2.0, 0.0, 0.0)),
            config: CalculatorConfig::default(),
        };
        let report = run_job(&job).unwrap();
        assert!((report.total_volume - 1.0).abs() < 1e-6);
        assert!((report.center[0] - 2.0).abs() < 1e-6);
        assert_eq!(report.triangle_count, 12);
    }

    #[test]
    fn test_non_finite_job_inputs_fail() {
        let nan_offset = CentroidJob {
            source: MeshSource::Cube(1.0),
            offset: Some(Vec3::new(f64::NAN, 0.0, 0.0)),
            config: CalculatorConfig::default(),
        };
        assert!(run_job(&nan_offset).is_err());

        let infinite_cube = CentroidJob {
            source: MeshSource::Cube(f64::INFINITY),
            offset: None,
            config: CalculatorConfig::default(),
        };
        assert!(run_job(&infinite_cube).is_err());

        // Finite input whose volume overflows is caught by the calculator.
        let huge_cube = CentroidJob {
            source: MeshSource::Cube(1e120),
            offset: None,
            config: CalculatorConfig::default(),
        };
        let err = run_job(&huge_cube).unwrap_err();
        assert!(err
            .downcast_ref::<cog_core::CogError>()
            .is_some_and(|e| e.is_invalid_input()));
    }

    #[test]
    fn test_strict_job_fails_on_empty_file() {
        let path = std::env::temp_dir().join(format!("cog-cli-empty-{}.json", std::process::id()));
        fs::write(&path, "[]").unwrap();

        let job = CentroidJob {
            source: MeshSource::Coordinates(InputSource::File(path.clone())),
            offset: None,
            config: CalculatorConfig::default().with_reject_degenerate(true),
        };
        let err = run_job(&job).unwrap_err();
        assert!(err.downcast_ref::<cog_core::CogError>().is_some());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_config() {
        let path = std::env::temp_dir().join(format!("cog-cli-config-{}.json", std::process::id()));
        fs::write(&path, r#"{ "volume_epsilon": 1e-6 }"#).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.volume_epsilon, 1e-6);
        assert!(!config.reject_degenerate);

        fs::remove_file(&path).unwrap();
    }
}
