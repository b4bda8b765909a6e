//! Affine transforms for moving meshes around object space
use nalgebra::{Matrix4, Vector3};

use crate::vector::Vec3;

/// Euler angles around the three axes (in radians)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EulerAngles {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl EulerAngles {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::default()
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Create a rotation matrix from Euler angles
    pub fn rotation_matrix(angles: &EulerAngles) -> Matrix4<f64> {
        let rx = Matrix4::new_rotation(Vector3::new(angles.x, 0.0, 0.0));
        let ry = Matrix4::new_rotation(Vector3::new(0.0, angles.y, 0.0));
        let rz = Matrix4::new_rotation(Vector3::new(0.0, 0.0, angles.z));

        // Apply rotations in order: Z, Y, X
        rz * ry * rx
    }

    /// Create a translation matrix
    pub fn translation_matrix(offset: Vec3) -> Matrix4<f64> {
        Matrix4::new_translation(&offset)
    }

    /// Create a uniform scale matrix
    pub fn uniform_scale_matrix(factor: f64) -> Matrix4<f64> {
        Matrix4::new_scaling(factor)
    }

    /// Create a scale matrix
    pub fn scale_matrix(sx: f64, sy: f64, sz: f64) -> Matrix4<f64> {
        Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz))
    }

    /// Compose transforms; the first one in the slice is applied first
    pub fn chain(transforms: &[Matrix4<f64>]) -> Matrix4<f64> {
        transforms
            .iter()
            .fold(Matrix4::identity(), |acc, next| next * acc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Mesh;
    use nalgebra::Point3;
    use crate::volume::compute_centroid;

    #[test]
    fn test_identity_rotation() {
        let matrix = Transform::rotation_matrix(&EulerAngles::zero());
        assert!((matrix - Matrix4::identity()).norm() < 1e-12);
    }

    #[test]
    fn test_chain_order() {
        // Scale then translate: the offset is not scaled.
        let m = Transform::chain(&[
            Transform::uniform_scale_matrix(2.0),
            Transform::translation_matrix(Vec3::new(1.0, 0.0, 0.0)),
        ]);
        let p = m.transform_point(&Point3::new(1.0, 1.0, 1.0));
        assert!((p - Point3::new(3.0, 2.0, 2.0)).norm() < 1e-12);
    }

    #[test]
    fn test_rotation_moves_center_with_mesh() {
        let shifted = Mesh::cube(1.0).transformed(&Transform::translation_matrix(Vec3::new(
            1.0, 2.0, 3.0,
        )));
        let rotation = Transform::rotation_matrix(&EulerAngles::new(0.3, -1.1, 2.0));
        let rotated = shifted.transformed(&rotation);

        let before = compute_centroid(&shifted).unwrap();
        let after = compute_centroid(&rotated).unwrap();
        let expected = rotation.transform_point(&Point3::from(before.center)).coords;

        assert!((after.total_volume - before.total_volume).abs() < 1e-9);
        assert!((after.center - expected).norm() < 1e-9);
    }

    #[test]
    fn test_mirror_keeps_volume() {
        let mesh = Mesh::cube(2.0)
            .transformed(&Transform::translation_matrix(Vec3::new(0.0, 3.0, 0.0)));
        let mirrored = mesh.transformed(&Transform::scale_matrix(-1.0, 1.0, 1.0));

        let result = compute_centroid(&mirrored).unwrap();
        assert!(result.signed_volume < 0.0);
        assert!((result.total_volume - 8.0).abs() < 1e-9);
        assert!((result.center - Vec3::new(0.0, 3.0, 0.0)).norm() < 1e-9);
    }
}
