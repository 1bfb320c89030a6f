/// Contract between the scene and whatever actually draws it
use nalgebra::Matrix4;

use crate::assembly::GridPosition;
use crate::camera::ViewParameters;
use crate::color::FaceColors;

/// One unit to draw this frame
#[derive(Debug)]
pub struct DrawCall<'a, M> {
    pub grid: GridPosition,
    /// Final model transform of the unit
    pub transform: Matrix4<f32>,
    pub mesh: &'a M,
    pub colors: &'a FaceColors,
}

/// Mesh lifecycle and per-frame drawing supplied by a renderer.
///
/// Mesh handles are opaque to the core. Each handle returned by
/// [`RenderBackend::create_mesh`] is handed back to
/// [`RenderBackend::release_mesh`] exactly once.
pub trait RenderBackend {
    type Mesh;

    fn create_mesh(&mut self, colors: &FaceColors) -> Self::Mesh;

    fn release_mesh(&mut self, mesh: Self::Mesh);

    /// Called once per frame before any draw is submitted.
    fn begin_frame(&mut self, view: &ViewParameters);

    fn submit_draw(&mut self, call: DrawCall<'_, Self::Mesh>);
}
