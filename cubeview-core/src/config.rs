/// Tunable constants of the scene, loadable from TOML
use std::f32::consts::{FRAC_PI_2, PI};

use serde::Deserialize;

use crate::error::ConfigError;

/// Size and spacing of the cube units
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Uniform scale applied to each unit mesh
    pub unit_scale: f32,
    /// Distance between the centers of neighbouring units
    pub spacing: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            unit_scale: 0.3,
            spacing: 0.33,
        }
    }
}

/// Initial orbit state, step sizes and projection of the camera
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub zy_angle: f32,
    pub zx_angle: f32,
    pub distance: f32,
    pub angle_step: f32,
    pub distance_step: f32,
    pub min_distance: f32,
    pub pan_step: f32,
    /// Vertical field of view in radians
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            zy_angle: PI / 6.0,
            zx_angle: PI / 8.0,
            distance: 1.5,
            angle_step: PI / 36.0, // 5 degrees
            distance_step: 0.1,
            min_distance: 0.2,
            pan_step: 0.1,
            fov: FRAC_PI_2,
            near: 0.1,
            far: 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Radians per second; the default turns a layer 90 degrees in one second
    pub angular_speed: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            angular_speed: FRAC_PI_2,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub layout: LayoutConfig,
    pub camera: CameraConfig,
    pub animation: AnimationConfig,
}

impl SceneConfig {
    /// Reject values that would make the scene degenerate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("layout.unit_scale", self.layout.unit_scale),
            ("layout.spacing", self.layout.spacing),
            ("camera.angle_step", self.camera.angle_step),
            ("camera.distance_step", self.camera.distance_step),
            ("camera.min_distance", self.camera.min_distance),
            ("camera.pan_step", self.camera.pan_step),
            ("camera.fov", self.camera.fov),
            ("camera.near", self.camera.near),
            ("animation.angular_speed", self.animation.angular_speed),
        ];
        for (field, value) in positive {
            // NaN fails this check too
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        if !(self.camera.distance >= self.camera.min_distance) {
            return Err(ConfigError::DistanceBelowMinimum {
                distance: self.camera.distance,
                min_distance: self.camera.min_distance,
            });
        }

        if !(self.camera.near < self.camera.far) {
            return Err(ConfigError::InvertedClipPlanes {
                near: self.camera.near,
                far: self.camera.far,
            });
        }

        Ok(())
    }
}
