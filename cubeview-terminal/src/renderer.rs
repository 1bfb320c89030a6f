/// ASCII rasterizer for terminal rendering
use crossterm::{
    cursor::MoveTo,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use cubeview_core::{
    CameraConfig, DrawCall, FaceColors, Mesh, Projection, RenderBackend, Rgba, Transform,
    Triangle, ViewParameters,
};
use nalgebra::{Matrix4, Point3};
use std::io::Write;
use tracing::trace;

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &['.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f32 = 2.0;

/// Light that never reaches a face still leaves it this bright
const AMBIENT: f32 = 0.3;

/// Edge length of the unit mesh before placement scaling
const UNIT_MESH_SIZE: f32 = 1.0;

/// Window background, as in the desktop build
const CLEAR_COLOR: Rgba = Rgba::WHITE;

/// Handle to a mesh stored in the renderer. Deliberately not `Clone`: the
/// owner hands it back to [`AsciiRenderer::release_mesh`] exactly once.
#[derive(Debug, PartialEq, Eq)]
pub struct MeshId(usize);

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    character: char,
    color: Rgba,
}

/// Per-frame camera data captured in `begin_frame`
#[derive(Debug, Clone, Copy)]
struct FrameView {
    view: Matrix4<f32>,
    projection: Matrix4<f32>,
    eye: Point3<f32>,
}

/// ASCII renderer that converts colored cube meshes to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    cell_buffer: Vec<Option<Cell>>,
    meshes: Vec<Option<Mesh>>,
    projection: Projection,
    frame: Option<FrameView>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize, camera: &CameraConfig) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            cell_buffer: vec![None; size],
            meshes: Vec::new(),
            projection: Projection::new(camera, Self::aspect(width, height)),
            frame: None,
        }
    }

    fn aspect(width: usize, height: usize) -> f32 {
        width.max(1) as f32 / (height.max(1) as f32 * CELL_ASPECT)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of meshes currently alive
    pub fn mesh_count(&self) -> usize {
        self.meshes.iter().filter(|m| m.is_some()).count()
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        let size = width * height;
        self.width = width;
        self.height = height;
        self.depth_buffer = vec![f32::INFINITY; size];
        self.cell_buffer = vec![None; size];
        self.projection.set_aspect(Self::aspect(width, height));
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.cell_buffer.fill(None);
    }

    /// Character and color drawn at a cell, if anything covers it
    pub fn cell(&self, x: usize, y: usize) -> Option<(char, Rgba)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cell_buffer[y * self.width + x].map(|c| (c.character, c.color))
    }

    /// Number of cells covered by geometry this frame
    pub fn covered_cells(&self) -> usize {
        self.cell_buffer.iter().filter(|c| c.is_some()).count()
    }

    fn render_triangle(&mut self, triangle: &Triangle, model: &Matrix4<f32>, frame: &FrameView) {
        // Back-face culling in world space
        let normal = model.transform_vector(&triangle.calculate_normal()).normalize();
        let centroid = model.transform_point(&triangle.centroid());
        let to_eye = frame.eye - centroid;
        let facing = normal.dot(&to_eye.normalize());
        if !(facing > 0.0) {
            return;
        }

        // Project vertices to screen space
        let mvp = Transform::mvp_matrix(model, &frame.view, &frame.projection);
        let mut screen_coords = [(0.0, 0.0, 0.0); 3];
        for (slot, vertex) in screen_coords.iter_mut().zip(&triangle.vertices) {
            match Projection::project_to_screen(
                &vertex.position,
                &mvp,
                self.width as u32,
                self.height as u32,
            ) {
                Some(coords) => *slot = coords,
                None => return, // Triangle is clipped
            }
        }

        // Headlight shading: faces turned towards the eye are brightest
        let intensity = AMBIENT + (1.0 - AMBIENT) * facing;
        let char_index = (intensity * (LUMINOSITY_RAMP.len() - 1) as f32) as usize;
        let cell = Cell {
            character: LUMINOSITY_RAMP[char_index.min(LUMINOSITY_RAMP.len() - 1)],
            color: triangle.color.shaded(intensity),
        };

        self.rasterize_triangle(&screen_coords, cell);
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32, f32); 3], cell: Cell) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let (v0, v1, v2) = (coords[0], coords[1], coords[2]);

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                let Some((w0, w1, w2)) =
                    barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py))
                else {
                    continue;
                };
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                // Interpolate depth
                let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;

                let idx = y as usize * self.width + x as usize;
                if depth < self.depth_buffer[idx] {
                    self.depth_buffer[idx] = depth;
                    self.cell_buffer[idx] = Some(cell);
                }
            }
        }
    }

    /// Write the framebuffer to `writer`, starting at terminal row `top`.
    pub fn draw<W: Write>(&self, writer: &mut W, top: u16) -> std::io::Result<()> {
        let background = to_terminal(CLEAR_COLOR);
        let mut current: Option<(Color, Color)> = None;

        for y in 0..self.height {
            writer.queue(MoveTo(0, top + y as u16))?;
            for x in 0..self.width {
                let (character, fg, bg) = match self.cell_buffer[y * self.width + x] {
                    Some(cell) => (
                        cell.character,
                        to_terminal(cell.color),
                        to_terminal(cell.color.shaded(0.6)),
                    ),
                    None => (' ', background, background),
                };

                // Only emit color changes
                if current != Some((fg, bg)) {
                    writer.queue(SetForegroundColor(fg))?;
                    writer.queue(SetBackgroundColor(bg))?;
                    current = Some((fg, bg));
                }
                writer.queue(Print(character))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl RenderBackend for AsciiRenderer {
    type Mesh = MeshId;

    fn create_mesh(&mut self, colors: &FaceColors) -> MeshId {
        let mesh = Mesh::cube(UNIT_MESH_SIZE, colors);
        let slot = match self.meshes.iter().position(Option::is_none) {
            Some(free) => {
                self.meshes[free] = Some(mesh);
                free
            }
            None => {
                self.meshes.push(Some(mesh));
                self.meshes.len() - 1
            }
        };
        trace!(slot, "mesh created");
        MeshId(slot)
    }

    fn release_mesh(&mut self, mesh: MeshId) {
        if let Some(slot) = self.meshes.get_mut(mesh.0) {
            *slot = None;
            trace!(slot = mesh.0, "mesh released");
        }
    }

    fn begin_frame(&mut self, view: &ViewParameters) {
        self.clear();
        self.frame = Some(FrameView {
            view: view.view_matrix(),
            projection: self.projection.matrix(),
            eye: view.eye,
        });
    }

    fn submit_draw(&mut self, call: DrawCall<'_, MeshId>) {
        let Some(frame) = self.frame else {
            return;
        };
        // Take the mesh out while drawing so the buffers can be borrowed mutably
        let Some(mesh) = self.meshes.get_mut(call.mesh.0).and_then(Option::take) else {
            return;
        };
        for triangle in &mesh.triangles {
            self.render_triangle(triangle, &call.transform, &frame);
        }
        self.meshes[call.mesh.0] = Some(mesh);
    }
}

fn to_terminal(color: Rgba) -> Color {
    let (r, g, b) = color.to_rgb8();
    Color::Rgb { r, g, b }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
