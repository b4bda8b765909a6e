//! COG Core Library - volume and center of mass of closed triangle meshes
//!
//! Stateless computation over a triangle soup: no indexing, no topology.
//! Callers hand in triangles (or a flat `x1,y1,z1,...` buffer, 9 values per
//! triangle) and get back the enclosed volume and the volumetric centroid.
//!
//! Enable `tracing` output with a subscriber in the host application; the
//! calculator logs a warning for negligible or inward-wound volume.

pub mod config;
pub mod error;
pub mod geometry;
pub mod transform;
pub mod vector;
pub mod volume;

// Re-export commonly used types
pub use config::CalculatorConfig;
pub use error::{CogError, CogResult, MeshDataIssue};
pub use geometry::{Aabb, Mesh, Triangle};
pub use transform::{EulerAngles, Transform};
pub use vector::Vec3;
pub use volume::{
    compute_centroid, compute_centroid_flat, compute_centroid_par, signed_tetrahedron_volume,
    CentroidResult, MassAccumulator, VolumeCentroidCalculator,
};
