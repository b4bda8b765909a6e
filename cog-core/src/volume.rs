//! Enclosed volume and volumetric centroid of a closed triangle soup.
//!
//! Every facet forms a tetrahedron with the coordinate origin. Summing the
//! signed tetrahedron volumes over a closed, consistently oriented surface
//! gives the enclosed volume, wherever the origin sits relative to the mesh.
//! Weighting each facet's `(p1 + p2 + p3) / 4` by its signed volume and
//! dividing by the total gives the centroid.
//!
//! Open or inconsistently wound input is a caller contract violation: the
//! result is finite but not geometrically meaningful.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::config::{CalculatorConfig, DEFAULT_VOLUME_EPSILON};
use crate::error::{CogError, CogResult};
use crate::geometry::{Mesh, Triangle};
use crate::vector::{is_finite, Vec3};

/// Signed volume of the tetrahedron with apex at the origin and base
/// `(p1, p2, p3)`: one sixth of the determinant of the three positions.
pub fn signed_tetrahedron_volume(p1: &Vec3, p2: &Vec3, p3: &Vec3) -> f64 {
    let v321 = p3.x * p2.y * p1.z;
    let v231 = p2.x * p3.y * p1.z;
    let v312 = p3.x * p1.y * p2.z;
    let v132 = p1.x * p3.y * p2.z;
    let v213 = p2.x * p1.y * p3.z;
    let v123 = p1.x * p2.y * p3.z;
    (1.0 / 6.0) * (-v321 + v231 + v312 - v132 - v213 + v123)
}

/// Volume and centroid of a triangle soup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CentroidResult {
    /// Volume-weighted centroid; the origin when the volume is negligible.
    pub center: Vec3,
    /// Absolute enclosed volume.
    pub total_volume: f64,
    /// Raw sum of signed tetrahedron volumes. Negative for inward winding.
    pub signed_volume: f64,
    pub triangle_count: usize,
    /// Threshold that decided whether a center was derived.
    pub volume_epsilon: f64,
}

impl CentroidResult {
    /// True when the volume was too small (or not a number) to derive a
    /// center from.
    pub fn is_degenerate(&self) -> bool {
        !(self.signed_volume.abs() > self.volume_epsilon)
    }

    /// True when the facets are wound inward throughout.
    pub fn is_inside_out(&self) -> bool {
        !self.is_degenerate() && self.signed_volume < 0.0
    }
}

/// Partial sums over a subset of triangles.
///
/// Accumulators combine by addition, so any partition of the soup can be
/// reduced independently and merged.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MassAccumulator {
    pub signed_volume: f64,
    pub weighted_centroid_sum: Vec3,
    pub triangle_count: usize,
}

impl MassAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_triangle(&mut self, triangle: &Triangle) {
        let signed_volume = triangle.signed_volume();
        let centroid = triangle.vertex_sum() * (1.0 / 4.0);

        self.signed_volume += signed_volume;
        self.weighted_centroid_sum += centroid * signed_volume;
        self.triangle_count += 1;
    }

    pub fn combine(self, other: Self) -> Self {
        Self {
            signed_volume: self.signed_volume + other.signed_volume,
            weighted_centroid_sum: self.weighted_centroid_sum + other.weighted_centroid_sum,
            triangle_count: self.triangle_count + other.triangle_count,
        }
    }

    /// Divide out the volume, leaving the center at the origin when
    /// `|signed_volume| <= epsilon`.
    ///
    /// Fails when the sums overflowed or picked up NaN, which happens with
    /// coordinates near `f64::MAX` or triangles that bypassed validation.
    pub fn finish(self, epsilon: f64) -> CogResult<CentroidResult> {
        if !self.signed_volume.is_finite() || !is_finite(&self.weighted_centroid_sum) {
            return Err(CogError::non_finite_result(self.signed_volume));
        }

        let center = if self.signed_volume.abs() > epsilon {
            self.weighted_centroid_sum / self.signed_volume
        } else {
            Vec3::zeros()
        };
        if !is_finite(&center) {
            return Err(CogError::non_finite_result(self.signed_volume));
        }

        Ok(CentroidResult {
            center,
            total_volume: self.signed_volume.abs(),
            signed_volume: self.signed_volume,
            triangle_count: self.triangle_count,
            volume_epsilon: epsilon,
        })
    }
}

impl<'a> Extend<&'a Triangle> for MassAccumulator {
    fn extend<I: IntoIterator<Item = &'a Triangle>>(&mut self, iter: I) {
        for triangle in iter {
            self.add_triangle(triangle);
        }
    }
}

fn accumulate(mesh: &Mesh) -> MassAccumulator {
    let mut acc = MassAccumulator::new();
    acc.extend(&mesh.triangles);
    acc
}

fn accumulate_par(mesh: &Mesh) -> MassAccumulator {
    mesh.triangles
        .par_iter()
        .fold(MassAccumulator::new, |mut acc, triangle| {
            acc.add_triangle(triangle);
            acc
        })
        .reduce(MassAccumulator::new, MassAccumulator::combine)
}

/// Compute volume and centroid sequentially with the default epsilon.
#[instrument(skip_all, fields(triangles = mesh.len()))]
pub fn compute_centroid(mesh: &Mesh) -> CogResult<CentroidResult> {
    accumulate(mesh).finish(DEFAULT_VOLUME_EPSILON)
}

/// Same as [`compute_centroid`], reducing triangle chunks on the rayon pool.
///
/// Summation order differs from the sequential path, so results agree only
/// up to floating-point rounding.
#[instrument(skip_all, fields(triangles = mesh.len()))]
pub fn compute_centroid_par(mesh: &Mesh) -> CogResult<CentroidResult> {
    accumulate_par(mesh).finish(DEFAULT_VOLUME_EPSILON)
}

/// Validate a flat coordinate buffer and compute its volume and centroid.
#[instrument(skip_all, fields(coords = coords.len()))]
pub fn compute_centroid_flat(coords: &[f64]) -> CogResult<CentroidResult> {
    let mesh = Mesh::from_flat(coords)?;
    compute_centroid(&mesh)
}

/// Configured calculator.
///
/// Holds no per-call state and can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct VolumeCentroidCalculator {
    config: CalculatorConfig,
}

impl VolumeCentroidCalculator {
    pub fn new(config: CalculatorConfig) -> CogResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Compute volume and centroid of `mesh`.
    ///
    /// Fails when the sums are not finite, or when `reject_degenerate` is
    /// set and the volume is within the epsilon.
    #[instrument(skip_all, fields(triangles = mesh.len()))]
    pub fn compute(&self, mesh: &Mesh) -> CogResult<CentroidResult> {
        let acc = if mesh.len() >= self.config.parallel_threshold {
            debug!(threshold = self.config.parallel_threshold, "Reducing in parallel");
            accumulate_par(mesh)
        } else {
            accumulate(mesh)
        };

        let result = acc.finish(self.config.volume_epsilon).map_err(|e| {
            warn!(error = %e, "Accumulated sums are not finite");
            e
        })?;

        if result.is_degenerate() {
            if self.config.reject_degenerate {
                return Err(CogError::DegenerateMesh {
                    signed_volume: result.signed_volume,
                    epsilon: self.config.volume_epsilon,
                });
            }
            if !mesh.is_empty() {
                warn!(
                    signed_volume = result.signed_volume,
                    epsilon = self.config.volume_epsilon,
                    "Volume is negligible, mesh may be open or degenerate; center left at origin"
                );
            }
        } else if result.is_inside_out() {
            warn!(
                signed_volume = result.signed_volume,
                "Negative signed volume, facets appear to be wound inward"
            );
        }

        debug!(
            volume = result.total_volume,
            center_x = result.center.x,
            center_y = result.center.y,
            center_z = result.center.z,
            "Computed centroid"
        );

        Ok(result)
    }

    /// Validate a flat coordinate buffer, then [`compute`](Self::compute).
    pub fn compute_flat(&self, coords: &[f64]) -> CogResult<CentroidResult> {
        let mesh = Mesh::from_flat(coords)?;
        self.compute(&mesh)
    }

    /// Compute every mesh independently, in parallel across meshes.
    #[instrument(skip_all, fields(meshes = meshes.len()))]
    pub fn compute_many(&self, meshes: &[Mesh]) -> Vec<CogResult<CentroidResult>> {
        meshes.par_iter().map(|mesh| self.compute(mesh)).collect()
    }
}
