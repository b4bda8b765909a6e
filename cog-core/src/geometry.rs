//! Triangle soup primitives
use nalgebra::{Matrix4, Point3};

use crate::error::{CogError, CogResult};
use crate::vector::Vec3;
use crate::volume::signed_tetrahedron_volume;

/// Number of coordinates describing one triangle in a flat buffer.
pub const COORDS_PER_TRIANGLE: usize = 9;

/// A directed facet; the right-hand rule over the vertex order gives the
/// outward side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Vec3; 3],
}

impl Triangle {
    pub fn new(p1: Vec3, p2: Vec3, p3: Vec3) -> Self {
        Self {
            vertices: [p1, p2, p3],
        }
    }

    /// Build from nine coordinates `x1,y1,z1,x2,y2,z2,x3,y3,z3`.
    pub fn from_coords(c: [f64; 9]) -> Self {
        Self::new(
            Vec3::new(c[0], c[1], c[2]),
            Vec3::new(c[3], c[4], c[5]),
            Vec3::new(c[6], c[7], c[8]),
        )
    }

    /// Signed volume of the tetrahedron spanned by this facet and the origin.
    pub fn signed_volume(&self) -> f64 {
        let [p1, p2, p3] = &self.vertices;
        signed_tetrahedron_volume(p1, p2, p3)
    }

    pub fn vertex_sum(&self) -> Vec3 {
        self.vertices[0] + self.vertices[1] + self.vertices[2]
    }

    /// Same facet with the opposite winding.
    pub fn reversed(&self) -> Self {
        let [p1, p2, p3] = self.vertices;
        Self::new(p1, p3, p2)
    }

    /// Unnormalized face normal (length is twice the area).
    pub fn scaled_normal(&self) -> Vec3 {
        let edge1 = self.vertices[1] - self.vertices[0];
        let edge2 = self.vertices[2] - self.vertices[0];
        edge1.cross(&edge2)
    }

    /// Unit face normal, `None` for zero-area triangles.
    pub fn normal(&self) -> Option<Vec3> {
        let n = self.scaled_normal();
        let len = n.norm();
        if len > 0.0 {
            Some(n / len)
        } else {
            None
        }
    }

    pub fn area(&self) -> f64 {
        self.scaled_normal().norm() * 0.5
    }

    pub fn is_degenerate(&self, epsilon: f64) -> bool {
        self.area() <= epsilon
    }

    pub fn transformed(&self, matrix: &Matrix4<f64>) -> Self {
        let [p1, p2, p3] = self.vertices;
        let apply = |p: Vec3| matrix.transform_point(&Point3::from(p)).coords;
        Self::new(apply(p1), apply(p2), apply(p3))
    }
}

/// Axis-aligned bounds of a triangle soup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) / 2.0
    }

    /// Largest side length; viewers size markers and camera distance from it.
    pub fn max_dimension(&self) -> f64 {
        let size = self.size();
        size.x.max(size.y).max(size.z)
    }
}

/// An ordered sequence of triangles with no shared-vertex indexing.
///
/// The calculator assumes the triangles form a closed, consistently oriented
/// surface. Nothing here checks that.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Build a soup from a flat buffer, 9 coordinates per triangle.
    ///
    /// Rejects buffers whose length is not a multiple of 9 and buffers holding
    /// NaN or infinite values.
    pub fn from_flat(coords: &[f64]) -> CogResult<Self> {
        check_flat_len(coords.len())?;
        if let Some((index, &value)) = coords.iter().enumerate().find(|(_, c)| !c.is_finite()) {
            return Err(CogError::non_finite_coordinate(index, value));
        }

        let mut mesh = Self::with_capacity(coords.len() / COORDS_PER_TRIANGLE);
        for chunk in coords.chunks_exact(COORDS_PER_TRIANGLE) {
            let mut c = [0.0; COORDS_PER_TRIANGLE];
            c.copy_from_slice(chunk);
            mesh.add_triangle(Triangle::from_coords(c));
        }
        Ok(mesh)
    }

    /// Same as [`Mesh::from_flat`] for single-precision position buffers,
    /// widened to f64 before any arithmetic.
    pub fn from_flat_f32(coords: &[f32]) -> CogResult<Self> {
        check_flat_len(coords.len())?;
        if let Some((index, &value)) = coords.iter().enumerate().find(|(_, c)| !c.is_finite()) {
            return Err(CogError::non_finite_coordinate(index, f64::from(value)));
        }

        let mut mesh = Self::with_capacity(coords.len() / COORDS_PER_TRIANGLE);
        for chunk in coords.chunks_exact(COORDS_PER_TRIANGLE) {
            let mut c = [0.0; COORDS_PER_TRIANGLE];
            for (dst, src) in c.iter_mut().zip(chunk) {
                *dst = f64::from(*src);
            }
            mesh.add_triangle(Triangle::from_coords(c));
        }
        Ok(mesh)
    }

    /// Flatten back to `x1,y1,z1,x2,...` order.
    pub fn to_flat(&self) -> Vec<f64> {
        self.triangles
            .iter()
            .flat_map(|t| t.vertices.iter().flat_map(|v| v.iter().copied()))
            .collect()
    }

    /// Every triangle with its winding flipped.
    pub fn reversed(&self) -> Self {
        Self {
            triangles: self.triangles.iter().map(Triangle::reversed).collect(),
        }
    }

    /// Apply an affine transform to every vertex.
    ///
    /// A transform with negative determinant mirrors the soup and flips its
    /// orientation; the signed volume changes sign accordingly.
    pub fn transformed(&self, matrix: &Matrix4<f64>) -> Self {
        Self {
            triangles: self.triangles.iter().map(|t| t.transformed(matrix)).collect(),
        }
    }

    /// Bounds over all vertices, `None` for an empty soup.
    pub fn bounds(&self) -> Option<Aabb> {
        let mut vertices = self.triangles.iter().flat_map(|t| t.vertices.iter());
        let first = *vertices.next()?;
        let (min, max) = vertices.fold((first, first), |(min, max), v| (min.inf(v), max.sup(v)));
        Some(Aabb { min, max })
    }

    /// Axis-aligned cube centered at the origin, outward oriented.
    pub fn cube(size: f64) -> Self {
        let h = size / 2.0;
        let v = Vec3::new;
        let mut mesh = Self::with_capacity(12);

        // Front face
        mesh.add_triangle(Triangle::new(v(-h, -h, h), v(h, -h, h), v(h, h, h)));
        mesh.add_triangle(Triangle::new(v(-h, -h, h), v(h, h, h), v(-h, h, h)));

        // Back face
        mesh.add_triangle(Triangle::new(v(-h, -h, -h), v(-h, h, -h), v(h, h, -h)));
        mesh.add_triangle(Triangle::new(v(-h, -h, -h), v(h, h, -h), v(h, -h, -h)));

        // Top face
        mesh.add_triangle(Triangle::new(v(-h, h, -h), v(-h, h, h), v(h, h, h)));
        mesh.add_triangle(Triangle::new(v(-h, h, -h), v(h, h, h), v(h, h, -h)));

        // Bottom face
        mesh.add_triangle(Triangle::new(v(-h, -h, -h), v(h, -h, -h), v(h, -h, h)));
        mesh.add_triangle(Triangle::new(v(-h, -h, -h), v(h, -h, h), v(-h, -h, h)));

        // Right face
        mesh.add_triangle(Triangle::new(v(h, -h, -h), v(h, h, -h), v(h, h, h)));
        mesh.add_triangle(Triangle::new(v(h, -h, -h), v(h, h, h), v(h, -h, h)));

        // Left face
        mesh.add_triangle(Triangle::new(v(-h, -h, -h), v(-h, -h, h), v(-h, h, h)));
        mesh.add_triangle(Triangle::new(v(-h, -h, -h), v(-h, h, h), v(-h, h, -h)));

        mesh
    }
}

impl FromIterator<Triangle> for Mesh {
    fn from_iter<I: IntoIterator<Item = Triangle>>(iter: I) -> Self {
        Self {
            triangles: iter.into_iter().collect(),
        }
    }
}

fn check_flat_len(len: usize) -> CogResult<()> {
    if len % COORDS_PER_TRIANGLE != 0 {
        return Err(CogError::length_not_multiple_of_nine(len));
    }
    Ok(())
}
