//! COG Web - WASM bindings for browser viewers.
//!
//! A viewer hands over its vertex position buffer (a `Float32Array`, 9 floats
//! per triangle, non-indexed) and gets back the center of mass, the enclosed
//! volume, and the largest bounding-box dimension for sizing markers.

use cog_core::{CogResult, Mesh, VolumeCentroidCalculator};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterOfMass {
    x: f64,
    y: f64,
    z: f64,
    volume: f64,
    max_dimension: f64,
}

#[wasm_bindgen]
impl CenterOfMass {
    #[wasm_bindgen(getter)]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> f64 {
        self.y
    }

    #[wasm_bindgen(getter)]
    pub fn z(&self) -> f64 {
        self.z
    }

    #[wasm_bindgen(getter)]
    pub fn volume(&self) -> f64 {
        self.volume
    }

    #[wasm_bindgen(getter, js_name = maxDimension)]
    pub fn max_dimension(&self) -> f64 {
        self.max_dimension
    }
}

/// Compute the center of mass of a non-indexed position buffer.
///
/// Throws when the buffer length is not a multiple of 9 or holds NaN/Infinity.
#[wasm_bindgen(js_name = calculateCenter)]
pub fn calculate_center(positions: &[f32]) -> Result<CenterOfMass, JsError> {
    Ok(center_of_mass(positions)?)
}

fn center_of_mass(positions: &[f32]) -> CogResult<CenterOfMass> {
    let mesh = Mesh::from_flat_f32(positions)?;
    let result = VolumeCentroidCalculator::default().compute(&mesh)?;
    let max_dimension = mesh.bounds().map_or(0.0, |b| b.max_dimension());

    Ok(CenterOfMass {
        x: result.center.x,
        y: result.center.y,
        z: result.center.z,
        volume: result.total_volume,
        max_dimension,
    })
}
