/// Linear RGBA color with components in 0.0 – 1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const YELLOW: Self = Self::rgb(1.0, 1.0, 0.0);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const ORANGE: Self = Self::rgb(1.0, 0.5, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    /// Internal faces that are never visible from outside the assembly.
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Scale the color channels by `intensity`, leaving alpha untouched.
    pub fn shaded(self, intensity: f32) -> Self {
        let k = intensity.clamp(0.0, 1.0);
        Self {
            r: self.r * k,
            g: self.g * k,
            b: self.b * k,
            a: self.a,
        }
    }

    /// Convert to 8-bit channels (alpha dropped).
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (channel(self.r), channel(self.g), channel(self.b))
    }
}

/// One of the six faces of an axis-aligned cube
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Top,
    Bottom,
    Front,
    Back,
    Left,
    Right,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Top,
        Face::Bottom,
        Face::Front,
        Face::Back,
        Face::Left,
        Face::Right,
    ];

    /// Order in which faces are laid out when colors are baked into a mesh.
    pub const MESH_ORDER: [Face; 6] = [
        Face::Top,
        Face::Front,
        Face::Left,
        Face::Bottom,
        Face::Back,
        Face::Right,
    ];
}

/// Colors of the six faces of one cube unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceColors {
    pub top: Rgba,
    pub bottom: Rgba,
    pub front: Rgba,
    pub back: Rgba,
    pub left: Rgba,
    pub right: Rgba,
}

impl FaceColors {
    /// Standard six-color scheme: a face gets its canonical color only when
    /// the unit sits on the matching extreme of that axis, black otherwise.
    pub fn for_grid_position(x: i8, y: i8, z: i8) -> Self {
        let pick = |outward: bool, color: Rgba| if outward { color } else { Rgba::BLACK };
        Self {
            top: pick(y == 1, Rgba::WHITE),
            bottom: pick(y == -1, Rgba::YELLOW),
            front: pick(z == 1, Rgba::RED),
            back: pick(z == -1, Rgba::ORANGE),
            left: pick(x == -1, Rgba::BLUE),
            right: pick(x == 1, Rgba::GREEN),
        }
    }

    pub fn get(&self, face: Face) -> Rgba {
        match face {
            Face::Top => self.top,
            Face::Bottom => self.bottom,
            Face::Front => self.front,
            Face::Back => self.back,
            Face::Left => self.left,
            Face::Right => self.right,
        }
    }

    /// Number of faces carrying a non-black sticker.
    pub fn visible_count(&self) -> usize {
        Face::ALL
            .iter()
            .filter(|&&face| self.get(face) != Rgba::BLACK)
            .count()
    }
}
