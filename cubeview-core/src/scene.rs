/// Application state and per-frame composition
use tracing::trace;

use crate::animator::LayerRotationAnimator;
use crate::assembly::CubeAssembly;
use crate::backend::{DrawCall, RenderBackend};
use crate::camera::{OrbitCamera, ViewParameters};
use crate::command::Command;
use crate::config::SceneConfig;
use crate::error::ConfigError;

/// Everything that changes while the program runs: the assembly, the layer
/// animation and the camera. Owned by the frame loop and passed by reference
/// to input handling and drawing.
#[derive(Debug)]
pub struct Scene<M> {
    assembly: CubeAssembly<M>,
    animator: LayerRotationAnimator,
    camera: OrbitCamera,
    pan_step: f32,
}

impl<M> Scene<M> {
    /// Validate `config` and build the assembly against `backend`.
    pub fn new<B>(config: &SceneConfig, backend: &mut B) -> Result<Self, ConfigError>
    where
        B: RenderBackend<Mesh = M>,
    {
        config.validate()?;

        Ok(Self {
            assembly: CubeAssembly::build(config.layout, backend),
            animator: LayerRotationAnimator::top_layer(config.animation.angular_speed),
            camera: OrbitCamera::new(&config.camera),
            pan_step: config.camera.pan_step,
        })
    }

    pub fn assembly(&self) -> &CubeAssembly<M> {
        &self.assembly
    }

    pub fn animator(&self) -> &LayerRotationAnimator {
        &self.animator
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    /// Apply one discrete command. Takes effect on the next frame.
    pub fn handle_command(&mut self, command: Command) {
        trace!(?command, "command");
        match command {
            Command::OrbitLeft => self.camera.decrease_zy_angle(),
            Command::OrbitRight => self.camera.increase_zy_angle(),
            Command::OrbitDown => self.camera.decrease_zx_angle(),
            Command::OrbitUp => self.camera.increase_zx_angle(),
            Command::ZoomIn => self.camera.decrease_distance(),
            Command::ZoomOut => self.camera.increase_distance(),
            Command::PanForward => self.camera.move_forward(self.pan_step),
            Command::PanBackward => self.camera.move_forward(-self.pan_step),
            Command::PanRight => self.camera.move_right(self.pan_step),
            Command::PanLeft => self.camera.move_right(-self.pan_step),
            Command::Rotate(direction) => {
                self.animator.start(direction);
            }
        }
    }

    /// Compose one frame: advance the animation by `dt` seconds, then hand the
    /// view and every unit's final transform to `backend`, in assembly order.
    ///
    /// The animation advances before anything is drawn, so the drawn state is
    /// always the one after this frame's time step.
    pub fn frame<B>(&mut self, dt: f32, backend: &mut B) -> ViewParameters
    where
        B: RenderBackend<Mesh = M>,
    {
        self.animator.tick(dt);

        let view = self.camera.view_parameters();
        backend.begin_frame(&view);

        for unit in self.assembly.units() {
            let placement = self.assembly.placement(unit.grid());
            backend.submit_draw(DrawCall {
                grid: unit.grid(),
                transform: self.animator.unit_transform(unit.grid(), &placement),
                mesh: unit.mesh(),
                colors: unit.colors(),
            });
        }

        view
    }

    /// Tear down the scene, releasing every mesh exactly once.
    pub fn release<B>(self, backend: &mut B)
    where
        B: RenderBackend<Mesh = M>,
    {
        self.assembly.release(backend);
    }
}
