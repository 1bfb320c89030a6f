/// Orbiting camera around the assembly
use nalgebra::{Matrix4, Point3, Vector2, Vector3};
use tracing::debug;

use crate::config::CameraConfig;

/// Where the camera is, what it looks at and which way is up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewParameters {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
}

impl ViewParameters {
    /// Right-handed look-at view matrix
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.eye, &self.target, &self.up)
    }
}

/// Spherical camera: two orbit angles and a distance around a target that
/// can be panned across the ground plane.
///
/// Eye, target and up are derived from these fields on every query and
/// never stored.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    zy_angle: f32,
    zx_angle: f32,
    distance: f32,
    /// Pan offset in the world XZ plane, stored as (x, z)
    planar_offset: Vector2<f32>,
    angle_step: f32,
    distance_step: f32,
    min_distance: f32,
}

impl OrbitCamera {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            zy_angle: config.zy_angle,
            zx_angle: config.zx_angle,
            distance: config.distance.max(config.min_distance),
            planar_offset: Vector2::zeros(),
            angle_step: config.angle_step,
            distance_step: config.distance_step,
            min_distance: config.min_distance,
        }
    }

    pub fn zy_angle(&self) -> f32 {
        self.zy_angle
    }

    pub fn zx_angle(&self) -> f32 {
        self.zx_angle
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn planar_offset(&self) -> Vector2<f32> {
        self.planar_offset
    }

    pub fn increase_zy_angle(&mut self) {
        self.zy_angle += self.angle_step;
    }

    pub fn decrease_zy_angle(&mut self) {
        self.zy_angle -= self.angle_step;
    }

    pub fn increase_zx_angle(&mut self) {
        self.zx_angle += self.angle_step;
    }

    pub fn decrease_zx_angle(&mut self) {
        self.zx_angle -= self.angle_step;
    }

    pub fn increase_distance(&mut self) {
        self.distance += self.distance_step;
    }

    /// Moves closer, never below the configured minimum distance.
    pub fn decrease_distance(&mut self) {
        let wanted = self.distance - self.distance_step;
        if wanted < self.min_distance {
            debug!(wanted, min = self.min_distance, "camera distance clamped");
        }
        self.distance = wanted.max(self.min_distance);
    }

    /// Pan along the viewing direction projected onto the ground plane.
    pub fn move_forward(&mut self, amount: f32) {
        self.planar_offset += self.forward() * amount;
    }

    /// Pan sideways, perpendicular to [`OrbitCamera::move_forward`].
    pub fn move_right(&mut self, amount: f32) {
        self.planar_offset += self.right() * amount;
    }

    /// Heading from the eye towards the target in the XZ plane, as (x, z)
    fn forward(&self) -> Vector2<f32> {
        let (sin, cos) = self.zy_angle.sin_cos();
        Vector2::new(-sin, -cos)
    }

    /// `forward` turned a quarter clockwise seen from above, as (x, z)
    fn right(&self) -> Vector2<f32> {
        let (sin, cos) = self.zy_angle.sin_cos();
        Vector2::new(cos, -sin)
    }

    /// Eye position relative to the target
    fn orbit_position(&self) -> Vector3<f32> {
        let (sin_zy, cos_zy) = self.zy_angle.sin_cos();
        let (sin_zx, cos_zx) = self.zx_angle.sin_cos();
        Vector3::new(
            self.distance * cos_zx * sin_zy,
            self.distance * sin_zx,
            self.distance * cos_zx * cos_zy,
        )
    }

    pub fn view_parameters(&self) -> ViewParameters {
        let target = Point3::new(self.planar_offset.x, 0.0, self.planar_offset.y);
        ViewParameters {
            eye: target + self.orbit_position(),
            target,
            up: Vector3::y(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> OrbitCamera {
        OrbitCamera::new(&CameraConfig::default())
    }

    #[test]
    fn test_view_parameters_are_pure() {
        let cam = camera();
        assert_eq!(cam.view_parameters(), cam.view_parameters());
    }

    #[test]
    fn test_eye_distance_matches_orbit() {
        let cam = camera();
        let view = cam.view_parameters();
        assert!(((view.eye - view.target).norm() - cam.distance()).abs() < 1e-5);
        assert_eq!(view.up, Vector3::y());
    }

    #[test]
    fn test_zero_angles_look_down_negative_z() {
        let config = CameraConfig {
            zy_angle: 0.0,
            zx_angle: 0.0,
            distance: 2.0,
            ..CameraConfig::default()
        };
        let view = OrbitCamera::new(&config).view_parameters();
        assert!((view.eye - Point3::new(0.0, 0.0, 2.0)).norm() < 1e-6);
        assert_eq!(view.target, Point3::origin());
    }

    #[test]
    fn test_angle_round_trips() {
        let mut cam = camera();
        let (zy, zx) = (cam.zy_angle(), cam.zx_angle());
        cam.increase_zy_angle();
        assert!((cam.zy_angle() - zy).abs() > 1e-3);
        cam.decrease_zy_angle();
        cam.decrease_zx_angle();
        cam.increase_zx_angle();
        assert!((cam.zy_angle() - zy).abs() < 1e-6);
        assert!((cam.zx_angle() - zx).abs() < 1e-6);
    }

    #[test]
    fn test_distance_is_clamped() {
        let mut cam = camera();
        for _ in 0..100 {
            cam.decrease_distance();
        }
        assert!((cam.distance() - CameraConfig::default().min_distance).abs() < 1e-6);
        cam.increase_distance();
        assert!(cam.distance() > CameraConfig::default().min_distance);
    }

    #[test]
    fn test_pan_moves_eye_and_target_together() {
        let mut cam = camera();
        let before = cam.view_parameters();
        cam.move_forward(0.5);
        cam.move_right(-0.25);
        let after = cam.view_parameters();
        let shift = after.target - before.target;
        assert!(((after.eye - before.eye) - shift).norm() < 1e-6);
        assert_eq!(shift.y, 0.0);
        let offset = cam.planar_offset();
        assert!((offset.x - shift.x).abs() < 1e-6 && (offset.y - shift.z).abs() < 1e-6);
        assert!((shift.norm() - (0.5f32.powi(2) + 0.25f32.powi(2)).sqrt()).abs() < 1e-5);
    }

    #[test]
    fn test_forward_heads_towards_target() {
        let mut cam = camera();
        let before = cam.view_parameters();
        cam.move_forward(0.1);
        let after = cam.view_parameters();
        let to_target = before.target - before.eye;
        let moved = after.target - before.target;
        assert!(to_target.dot(&moved) > 0.0);

        let mut cam = camera();
        cam.move_right(0.1);
        let moved = cam.view_parameters().target - before.target;
        assert!(to_target.dot(&moved).abs() < 1e-5);
        // Right of the view direction with y up
        assert!(to_target.cross(&moved).y < 0.0);
    }
}
