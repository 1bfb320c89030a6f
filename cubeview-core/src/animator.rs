/// Animated quarter turn of a single layer of the assembly
use std::f32::consts::FRAC_PI_2;
use std::fmt;
use std::str::FromStr;

use nalgebra::{Matrix4, Unit, Vector3};
use tracing::debug;

use crate::assembly::GridPosition;
use crate::error::ParseDirectionError;
use crate::transform::Transform;

/// Total angle of one rotation gesture
pub const QUARTER_TURN: f32 = FRAC_PI_2;

/// Accumulated angles this close to a quarter turn count as finished, so
/// that subdividing a frame never leaves a sliver of rotation pending.
const FINISH_TOLERANCE: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationDirection {
    Forward,
    Backward,
}

impl RotationDirection {
    fn signed(self, angle: f32) -> f32 {
        match self {
            RotationDirection::Forward => angle,
            RotationDirection::Backward => -angle,
        }
    }
}

impl FromStr for RotationDirection {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forward" | "fwd" | "cw" => Ok(RotationDirection::Forward),
            "backward" | "back" | "ccw" => Ok(RotationDirection::Backward),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

impl fmt::Display for RotationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RotationDirection::Forward => f.write_str("forward"),
            RotationDirection::Backward => f.write_str("backward"),
        }
    }
}

/// Coordinate axis of the unit grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn unit_vector(self) -> Unit<Vector3<f32>> {
        match self {
            Axis::X => Vector3::x_axis(),
            Axis::Y => Vector3::y_axis(),
            Axis::Z => Vector3::z_axis(),
        }
    }

    fn component(self, grid: GridPosition) -> i8 {
        match self {
            Axis::X => grid.x,
            Axis::Y => grid.y,
            Axis::Z => grid.z,
        }
    }
}

/// Selects the units sharing one coordinate value along an axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layer {
    pub axis: Axis,
    pub coordinate: i8,
}

impl Layer {
    /// The top layer, `y == 1`
    pub const TOP: Layer = Layer {
        axis: Axis::Y,
        coordinate: 1,
    };

    pub fn contains(&self, grid: GridPosition) -> bool {
        self.axis.component(grid) == self.coordinate
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimatorState {
    Idle,
    Rotating {
        direction: RotationDirection,
        /// Unsigned angle turned so far in this gesture, in `[0, π/2]`
        accumulated: f32,
    },
}

/// State machine for one in-flight layer rotation.
///
/// The rotation applied to the layer lives in a matrix that keeps
/// accumulating across gestures; after a forward gesture the layer stays
/// turned by a quarter.
#[derive(Debug, Clone)]
pub struct LayerRotationAnimator {
    state: AnimatorState,
    layer: Layer,
    axis: Unit<Vector3<f32>>,
    angular_speed: f32,
    rotation: Matrix4<f32>,
}

impl LayerRotationAnimator {
    pub fn new(layer: Layer, axis: Unit<Vector3<f32>>, angular_speed: f32) -> Self {
        Self {
            state: AnimatorState::Idle,
            layer,
            axis,
            angular_speed,
            rotation: Matrix4::identity(),
        }
    }

    /// Turns the top layer around the vertical axis through the center.
    pub fn top_layer(angular_speed: f32) -> Self {
        Self::new(Layer::TOP, Axis::Y.unit_vector(), angular_speed)
    }

    pub fn state(&self) -> AnimatorState {
        self.state
    }

    pub fn is_rotating(&self) -> bool {
        matches!(self.state, AnimatorState::Rotating { .. })
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    /// Rotation accumulated so far, to be applied to units of the layer
    pub fn rotation(&self) -> &Matrix4<f32> {
        &self.rotation
    }

    /// Begin a quarter turn. Ignored while a turn is already running.
    pub fn start(&mut self, direction: RotationDirection) -> bool {
        if let AnimatorState::Rotating { direction: current, .. } = self.state {
            debug!(requested = %direction, %current, "rotation already running, request ignored");
            return false;
        }

        self.state = AnimatorState::Rotating {
            direction,
            accumulated: 0.0,
        };
        debug!(%direction, "layer rotation started");
        true
    }

    /// Advance the running turn by `dt` seconds and return the signed angle
    /// applied this tick. Returns `None` while idle.
    pub fn tick(&mut self, dt: f32) -> Option<f32> {
        let AnimatorState::Rotating {
            direction,
            accumulated,
        } = self.state
        else {
            return None;
        };

        // NaN counts as no time passing; an infinite dt finishes the turn
        let mut delta = self.angular_speed * dt.max(0.0);
        let remaining = QUARTER_TURN - accumulated;

        if delta >= remaining - FINISH_TOLERANCE {
            // Only turn what is left of the quarter
            delta = remaining;
            self.state = AnimatorState::Idle;
            debug!(%direction, "layer rotation finished");
        } else {
            self.state = AnimatorState::Rotating {
                direction,
                accumulated: accumulated + delta,
            };
        }

        let applied = direction.signed(delta);
        self.rotation = Transform::axis_rotation(&self.axis, applied) * self.rotation;
        Some(applied)
    }

    /// Final model transform for a unit with the given static placement.
    ///
    /// The placement is applied first and the layer rotation turns the placed
    /// unit around the assembly center.
    pub fn unit_transform(&self, grid: GridPosition, placement: &Matrix4<f32>) -> Matrix4<f32> {
        if self.layer.contains(grid) {
            self.rotation * placement
        } else {
            *placement
        }
    }
}
