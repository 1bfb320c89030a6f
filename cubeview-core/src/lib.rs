/// cubeview core library - cube assembly model, layer animation and orbit camera
///
/// This library holds everything with state and behavior: the 27 cube units,
/// the quarter-turn animation of the top layer and the orbiting camera. It
/// draws nothing itself; renderers plug in through `RenderBackend`.

pub mod animator;
pub mod assembly;
pub mod backend;
pub mod camera;
pub mod color;
pub mod command;
pub mod config;
pub mod error;
pub mod geometry;
pub mod projection;
pub mod scene;
pub mod transform;

// Re-export commonly used types
pub use animator::{AnimatorState, Axis, Layer, LayerRotationAnimator, RotationDirection};
pub use assembly::{CubeAssembly, CubeUnit, GridPosition, UNIT_COUNT};
pub use backend::{DrawCall, RenderBackend};
pub use camera::{OrbitCamera, ViewParameters};
pub use color::{Face, FaceColors, Rgba};
pub use command::Command;
pub use config::{AnimationConfig, CameraConfig, LayoutConfig, SceneConfig};
pub use error::{ConfigError, ParseDirectionError};
pub use geometry::{Mesh, Triangle, Vertex};
pub use projection::Projection;
pub use scene::Scene;
pub use transform::Transform;
