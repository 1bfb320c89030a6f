/// Drives a whole `Scene` against a recording backend.
use cubeview_core::{
    Command, DrawCall, FaceColors, GridPosition, OrbitCamera, RenderBackend, RotationDirection,
    Scene, SceneConfig, ViewParameters, UNIT_COUNT,
};
use nalgebra::{Matrix4, Point3};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MeshId(usize);

#[derive(Default)]
struct RecordingBackend {
    created: Vec<FaceColors>,
    released: Vec<MeshId>,
    views: Vec<ViewParameters>,
    draws: Vec<(GridPosition, Matrix4<f32>, MeshId, FaceColors)>,
}

impl RecordingBackend {
    fn last_frame(&self) -> &[(GridPosition, Matrix4<f32>, MeshId, FaceColors)] {
        &self.draws[self.draws.len() - UNIT_COUNT..]
    }
}

impl RenderBackend for RecordingBackend {
    type Mesh = MeshId;

    fn create_mesh(&mut self, colors: &FaceColors) -> MeshId {
        self.created.push(*colors);
        MeshId(self.created.len() - 1)
    }

    fn release_mesh(&mut self, mesh: MeshId) {
        self.released.push(mesh);
    }

    fn begin_frame(&mut self, view: &ViewParameters) {
        self.views.push(*view);
    }

    fn submit_draw(&mut self, call: DrawCall<'_, MeshId>) {
        self.draws.push((call.grid, call.transform, *call.mesh, *call.colors));
    }
}

fn new_scene() -> (Scene<MeshId>, RecordingBackend) {
    let mut backend = RecordingBackend::default();
    let scene = Scene::new(&SceneConfig::default(), &mut backend).expect("default config");
    (scene, backend)
}

#[test]
fn first_frame_without_input_draws_static_layout() {
    let (mut scene, mut backend) = new_scene();
    let view = scene.frame(0.0, &mut backend);

    assert_eq!(backend.draws.len(), UNIT_COUNT);
    for (grid, transform, _, _) in &backend.draws {
        let placement = scene.assembly().placement(*grid);
        assert_eq!(*transform, placement);
    }

    let default_view = OrbitCamera::new(&SceneConfig::default().camera).view_parameters();
    assert_eq!(view, default_view);
    assert_eq!(backend.views, vec![default_view]);
}

#[test]
fn draws_follow_assembly_order_with_owned_meshes() {
    let (mut scene, mut backend) = new_scene();
    scene.frame(0.016, &mut backend);

    let order: Vec<_> = backend.draws.iter().map(|d| d.0).collect();
    assert_eq!(order, GridPosition::all().collect::<Vec<_>>());
    for (i, (_, _, mesh, colors)) in backend.draws.iter().enumerate() {
        assert_eq!(*mesh, MeshId(i));
        assert_eq!(*colors, backend.created[i]);
    }
}

#[test]
fn only_top_layer_turns_during_rotation() {
    let (mut scene, mut backend) = new_scene();
    scene.handle_command(Command::Rotate(RotationDirection::Forward));

    for _ in 0..5 {
        scene.frame(0.1, &mut backend);
        let moved = backend
            .last_frame()
            .iter()
            .filter(|(grid, transform, _, _)| *transform != scene.assembly().placement(*grid))
            .map(|(grid, _, _, _)| *grid)
            .collect::<Vec<_>>();
        assert_eq!(moved.len(), 9);
        assert!(moved.iter().all(|grid| grid.y == 1));
    }
}

fn assert_lower_layers_in_place(scene: &Scene<MeshId>, backend: &RecordingBackend) {
    for (grid, transform, _, _) in backend.last_frame() {
        if grid.y != 1 {
            assert_eq!(*transform, scene.assembly().placement(*grid), "{grid:?}");
        }
    }
}

#[test]
fn lower_layers_stay_put_after_finished_gestures() {
    let (mut scene, mut backend) = new_scene();

    scene.handle_command(Command::Rotate(RotationDirection::Forward));
    for _ in 0..12 {
        scene.frame(0.1, &mut backend);
    }
    assert!(!scene.animator().is_rotating());
    assert_lower_layers_in_place(&scene, &backend);

    scene.handle_command(Command::Rotate(RotationDirection::Forward));
    scene.frame(1.0, &mut backend);
    scene.handle_command(Command::Rotate(RotationDirection::Backward));
    for _ in 0..3 {
        scene.frame(0.4, &mut backend);
    }
    assert!(!scene.animator().is_rotating());
    assert_lower_layers_in_place(&scene, &backend);

    // Forward, forward, backward leaves the top layer one quarter turned
    let (_, transform, _, _) = backend
        .last_frame()
        .iter()
        .find(|d| d.0 == GridPosition::new(1, 1, 1))
        .copied()
        .unwrap();
    let spacing = SceneConfig::default().layout.spacing;
    let center = transform.transform_point(&Point3::origin());
    assert!((center - Point3::new(spacing, spacing, -spacing)).norm() < 1e-5, "{center}");
}

#[test]
fn one_second_turns_top_layer_a_quarter() {
    let (mut scene, mut backend) = new_scene();
    scene.handle_command(Command::Rotate(RotationDirection::Forward));
    for _ in 0..4 {
        scene.frame(0.25, &mut backend);
    }
    assert!(!scene.animator().is_rotating());

    // Front-right top corner ends up where the back-right top corner was.
    let spacing = SceneConfig::default().layout.spacing;
    let (_, transform, _, _) = backend
        .last_frame()
        .iter()
        .find(|d| d.0 == GridPosition::new(1, 1, 1))
        .copied()
        .unwrap();
    let center = transform.transform_point(&Point3::origin());
    let expected = Point3::new(spacing, spacing, -spacing);
    assert!((center - expected).norm() < 1e-5, "{center}");
}

#[test]
fn rotation_requests_while_turning_are_ignored() {
    let (mut scene, mut backend) = new_scene();
    scene.handle_command(Command::Rotate(RotationDirection::Forward));
    scene.frame(0.5, &mut backend);
    let halfway = scene.animator().state();

    scene.handle_command(Command::Rotate(RotationDirection::Backward));
    assert_eq!(scene.animator().state(), halfway);

    scene.frame(0.5, &mut backend);
    assert!(!scene.animator().is_rotating());
}

#[test]
fn camera_commands_change_next_view() {
    let (mut scene, mut backend) = new_scene();
    let before = scene.frame(0.0, &mut backend);

    scene.handle_command(Command::OrbitRight);
    scene.handle_command(Command::ZoomOut);
    let after = scene.frame(0.0, &mut backend);
    assert_ne!(before, after);
    assert!((after.eye - after.target).norm() > (before.eye - before.target).norm());

    scene.handle_command(Command::OrbitLeft);
    scene.handle_command(Command::ZoomIn);
    let restored = scene.frame(0.0, &mut backend);
    assert!((restored.eye - before.eye).norm() < 1e-5);

    scene.handle_command(Command::PanForward);
    scene.handle_command(Command::PanBackward);
    scene.handle_command(Command::PanRight);
    scene.handle_command(Command::PanLeft);
    let panned = scene.frame(0.0, &mut backend);
    assert!((panned.target - before.target).norm() < 1e-5);
}

#[test]
fn release_returns_every_mesh_once() {
    let (mut scene, mut backend) = new_scene();
    scene.frame(0.016, &mut backend);
    scene.release(&mut backend);

    let mut released: Vec<_> = backend.released.iter().map(|m| m.0).collect();
    released.sort_unstable();
    assert_eq!(released, (0..UNIT_COUNT).collect::<Vec<_>>());
}

#[test]
fn invalid_config_is_rejected() {
    let mut backend = RecordingBackend::default();
    let mut config = SceneConfig::default();
    config.camera.min_distance = -1.0;
    assert!(Scene::new(&config, &mut backend).is_err());
    assert!(backend.created.is_empty());
}
