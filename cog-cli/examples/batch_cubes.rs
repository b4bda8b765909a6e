//! Example: compute several meshes at once
//!
//! Usage: cargo run -p cog-cli --example batch_cubes -- [count]

use std::env;

use anyhow::{Context, Result};
use cog_core::{CalculatorConfig, Mesh, Transform, Vec3, VolumeCentroidCalculator};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let count: usize = match env::args().nth(1) {
        Some(arg) => arg.parse().context("count must be a positive integer")?,
        None => 4,
    };

    // Cube i has side i + 1 and sits at x = 10 * i
    let meshes: Vec<Mesh> = (0..count)
        .map(|i| {
            let offset = Transform::translation_matrix(Vec3::new(10.0 * i as f64, 0.0, 0.0));
            Mesh::cube(i as f64 + 1.0).transformed(&offset)
        })
        .collect();

    let calculator = VolumeCentroidCalculator::new(CalculatorConfig::default())?;
    for (i, result) in calculator.compute_many(&meshes).into_iter().enumerate() {
        let result = result?;
        println!(
            "cube {}: volume {:.3}, center ({:.3}, {:.3}, {:.3})",
            i, result.total_volume, result.center.x, result.center.y, result.center.z
        );
    }

    Ok(())
}
