/// Geometry primitives for cube unit meshes
use nalgebra::{Point3, Vector3};

use crate::color::{Face, FaceColors, Rgba};

/// A 3D vertex with position and normal
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32, nx: f32, ny: f32, nz: f32) -> Self {
        Self {
            position: Point3::new(x, y, z),
            normal: Vector3::new(nx, ny, nz),
        }
    }
}

/// A colored triangle belonging to one face of a cube
#[derive(Debug, Clone)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
    pub face: Face,
    pub color: Rgba,
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex, face: Face, color: Rgba) -> Self {
        Self {
            vertices: [v0, v1, v2],
            face,
            color,
        }
    }

    /// Calculate the face normal from the triangle's vertices
    pub fn calculate_normal(&self) -> Vector3<f32> {
        let v0 = self.vertices[0].position;
        let v1 = self.vertices[1].position;
        let v2 = self.vertices[2].position;

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        edge1.cross(&edge2).normalize()
    }

    /// Centroid of the three vertices
    pub fn centroid(&self) -> Point3<f32> {
        let sum = self.vertices[0].position.coords
            + self.vertices[1].position.coords
            + self.vertices[2].position.coords;
        Point3::from(sum / 3.0)
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Build an axis-aligned cube centered on the origin with one color per
    /// face baked into its triangles.
    ///
    /// Every face is wound counter-clockwise when seen from outside, so the
    /// geometric normal of each triangle points away from the cube.
    pub fn cube(size: f32, colors: &FaceColors) -> Self {
        let h = size / 2.0;
        let mut mesh = Self::with_capacity(12);

        for face in Face::MESH_ORDER {
            let color = colors.get(face);
            let (n, quad) = match face {
                Face::Top => (
                    [0.0, 1.0, 0.0],
                    [[-h, h, -h], [-h, h, h], [h, h, h], [h, h, -h]],
                ),
                Face::Bottom => (
                    [0.0, -1.0, 0.0],
                    [[-h, -h, -h], [h, -h, -h], [h, -h, h], [-h, -h, h]],
                ),
                Face::Front => (
                    [0.0, 0.0, 1.0],
                    [[-h, -h, h], [h, -h, h], [h, h, h], [-h, h, h]],
                ),
                Face::Back => (
                    [0.0, 0.0, -1.0],
                    [[-h, -h, -h], [-h, h, -h], [h, h, -h], [h, -h, -h]],
                ),
                Face::Left => (
                    [-1.0, 0.0, 0.0],
                    [[-h, -h, -h], [-h, -h, h], [-h, h, h], [-h, h, -h]],
                ),
                Face::Right => (
                    [1.0, 0.0, 0.0],
                    [[h, -h, -h], [h, h, -h], [h, h, h], [h, -h, h]],
                ),
            };

            let v = |i: usize| {
                let [x, y, z] = quad[i];
                Vertex::new(x, y, z, n[0], n[1], n[2])
            };
            mesh.add_triangle(Triangle::new(v(0), v(1), v(2), face, color));
            mesh.add_triangle(Triangle::new(v(0), v(2), v(3), face, color));
        }

        mesh
    }
}
