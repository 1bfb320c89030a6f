/// The 3x3x3 arrangement of cube units
use nalgebra::Matrix4;
use tracing::debug;

use crate::backend::RenderBackend;
use crate::color::FaceColors;
use crate::config::LayoutConfig;
use crate::transform::Transform;

/// Number of units in the assembly
pub const UNIT_COUNT: usize = 27;

/// Integer coordinate of a unit, each component in {-1, 0, 1}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPosition {
    pub x: i8,
    pub y: i8,
    pub z: i8,
}

impl GridPosition {
    pub fn new(x: i8, y: i8, z: i8) -> Self {
        debug_assert!(
            [x, y, z].iter().all(|c| (-1..=1).contains(c)),
            "grid coordinate out of range: ({x}, {y}, {z})"
        );
        Self { x, y, z }
    }

    /// All 27 positions, ascending in x, then y, then z (z innermost).
    pub fn all() -> impl Iterator<Item = GridPosition> {
        (-1..=1).flat_map(|x| {
            (-1..=1).flat_map(move |y| (-1..=1).map(move |z| GridPosition::new(x, y, z)))
        })
    }

    pub fn to_array(self) -> [i8; 3] {
        [self.x, self.y, self.z]
    }
}

/// One sub-cube: fixed position, fixed colors and the mesh drawn for it
#[derive(Debug)]
pub struct CubeUnit<M> {
    grid: GridPosition,
    colors: FaceColors,
    mesh: M,
}

impl<M> CubeUnit<M> {
    pub fn grid(&self) -> GridPosition {
        self.grid
    }

    pub fn colors(&self) -> &FaceColors {
        &self.colors
    }

    pub fn mesh(&self) -> &M {
        &self.mesh
    }
}

/// The full cube assembly. Owns every unit and, through them, every mesh
/// handle.
#[derive(Debug)]
pub struct CubeAssembly<M> {
    units: Vec<CubeUnit<M>>,
    layout: LayoutConfig,
}

impl<M> CubeAssembly<M> {
    /// Create all 27 units, acquiring one mesh per unit from `backend`.
    pub fn build<B>(layout: LayoutConfig, backend: &mut B) -> Self
    where
        B: RenderBackend<Mesh = M>,
    {
        let units: Vec<_> = GridPosition::all()
            .map(|grid| {
                let colors = FaceColors::for_grid_position(grid.x, grid.y, grid.z);
                let mesh = backend.create_mesh(&colors);
                CubeUnit { grid, colors, mesh }
            })
            .collect();
        debug!(units = units.len(), ?layout, "cube assembly built");

        Self { units, layout }
    }

    /// Units in draw order
    pub fn units(&self) -> &[CubeUnit<M>] {
        &self.units
    }

    /// Static placement transform of a unit in the unrotated assembly
    pub fn placement(&self, grid: GridPosition) -> Matrix4<f32> {
        Transform::placement(grid.to_array(), self.layout.unit_scale, self.layout.spacing)
    }

    /// Tear the assembly down, handing every mesh back to `backend`.
    pub fn release<B>(self, backend: &mut B)
    where
        B: RenderBackend<Mesh = M>,
    {
        let count = self.units.len();
        for unit in self.units {
            backend.release_mesh(unit.mesh);
        }
        debug!(units = count, "cube assembly released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::DrawCall;
    use crate::camera::ViewParameters;
    use crate::color::Rgba;
    use std::collections::HashSet;

    /// Hands out sequential ids and remembers which were released.
    #[derive(Default)]
    struct CountingBackend {
        next: usize,
        released: Vec<usize>,
    }

    impl RenderBackend for CountingBackend {
        type Mesh = usize;

        fn create_mesh(&mut self, _colors: &FaceColors) -> usize {
            self.next += 1;
            self.next - 1
        }

        fn release_mesh(&mut self, mesh: usize) {
            self.released.push(mesh);
        }

        fn begin_frame(&mut self, _view: &ViewParameters) {}

        fn submit_draw(&mut self, _call: DrawCall<'_, usize>) {}
    }

    #[test]
    fn test_grid_order_is_z_innermost() {
        let all: Vec<_> = GridPosition::all().collect();
        assert_eq!(all.len(), UNIT_COUNT);
        assert_eq!(all[0], GridPosition::new(-1, -1, -1));
        assert_eq!(all[1], GridPosition::new(-1, -1, 0));
        assert_eq!(all[3], GridPosition::new(-1, 0, -1));
        assert_eq!(all[9], GridPosition::new(0, -1, -1));
        assert_eq!(all[26], GridPosition::new(1, 1, 1));
        let unique: HashSet<_> = all.iter().collect();
        assert_eq!(unique.len(), UNIT_COUNT);
    }

    #[test]
    fn test_colors_follow_extreme_axes() {
        let mut backend = CountingBackend::default();
        let assembly = CubeAssembly::build(LayoutConfig::default(), &mut backend);
        for unit in assembly.units() {
            let GridPosition { x, y, z } = unit.grid();
            let c = unit.colors();
            let expect = |outward: bool, color: Rgba| if outward { color } else { Rgba::BLACK };
            assert_eq!(c.top, expect(y == 1, Rgba::WHITE));
            assert_eq!(c.bottom, expect(y == -1, Rgba::YELLOW));
            assert_eq!(c.front, expect(z == 1, Rgba::RED));
            assert_eq!(c.back, expect(z == -1, Rgba::ORANGE));
            assert_eq!(c.left, expect(x == -1, Rgba::BLUE));
            assert_eq!(c.right, expect(x == 1, Rgba::GREEN));
        }
    }

    #[test]
    fn test_each_unit_owns_its_own_mesh() {
        let mut backend = CountingBackend::default();
        let assembly = CubeAssembly::build(LayoutConfig::default(), &mut backend);
        let meshes: Vec<_> = assembly.units().iter().map(|u| *u.mesh()).collect();
        assert_eq!(meshes, (0..UNIT_COUNT).collect::<Vec<_>>());

        assembly.release(&mut backend);
        backend.released.sort_unstable();
        assert_eq!(backend.released, (0..UNIT_COUNT).collect::<Vec<_>>());
    }

    #[test]
    fn test_placement_of_center_unit_is_pure_scale() {
        let mut backend = CountingBackend::default();
        let layout = LayoutConfig {
            unit_scale: 0.5,
            spacing: 1.0,
        };
        let assembly = CubeAssembly::build(layout, &mut backend);
        let placement = assembly.placement(GridPosition::new(0, 0, 0));
        assert!((placement - Matrix4::new_scaling(0.5)).norm() < 1e-6);

        let corner = assembly.placement(GridPosition::new(1, 1, -1));
        let offset = nalgebra::Vector3::new(corner[(0, 3)], corner[(1, 3)], corner[(2, 3)]);
        assert!((offset - nalgebra::Vector3::new(1.0, 1.0, -1.0)).norm() < 1e-6);
    }
}
