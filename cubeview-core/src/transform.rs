/// 3D transformation matrices
///
/// All matrices use nalgebra's column-vector convention: in `a * b` the
/// transform `b` is applied to a point first.
use nalgebra::{Matrix4, Unit, Vector3};

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Create a rotation of `angle` radians around `axis`
    pub fn axis_rotation(axis: &Unit<Vector3<f32>>, angle: f32) -> Matrix4<f32> {
        Matrix4::from_axis_angle(axis, angle)
    }

    /// Create a translation matrix
    pub fn translation_matrix(x: f32, y: f32, z: f32) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// Create a uniform scale matrix
    pub fn scale_matrix(s: f32) -> Matrix4<f32> {
        Matrix4::new_scaling(s)
    }

    /// Static placement of a cube unit: scale in local space, then move the
    /// scaled unit to `grid * spacing`.
    pub fn placement(grid: [i8; 3], unit_scale: f32, spacing: f32) -> Matrix4<f32> {
        let [x, y, z] = grid.map(|c| f32::from(c) * spacing);
        Self::translation_matrix(x, y, z) * Self::scale_matrix(unit_scale)
    }

    /// Create a model-view-projection matrix
    pub fn mvp_matrix(
        model: &Matrix4<f32>,
        view: &Matrix4<f32>,
        projection: &Matrix4<f32>,
    ) -> Matrix4<f32> {
        projection * view * model
    }
}
