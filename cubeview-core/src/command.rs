/// Discrete user commands understood by the scene
use crate::animator::RotationDirection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    OrbitLeft,
    OrbitRight,
    OrbitDown,
    OrbitUp,
    ZoomIn,
    ZoomOut,
    PanForward,
    PanBackward,
    PanRight,
    PanLeft,
    Rotate(RotationDirection),
}

impl Command {
    pub const ALL: [Command; 12] = [
        Command::OrbitLeft,
        Command::OrbitRight,
        Command::OrbitDown,
        Command::OrbitUp,
        Command::ZoomIn,
        Command::ZoomOut,
        Command::PanForward,
        Command::PanBackward,
        Command::PanRight,
        Command::PanLeft,
        Command::Rotate(RotationDirection::Forward),
        Command::Rotate(RotationDirection::Backward),
    ];

    /// Short human-readable label for help screens
    pub fn label(self) -> &'static str {
        match self {
            Command::OrbitLeft => "orbit left",
            Command::OrbitRight => "orbit right",
            Command::OrbitDown => "orbit down",
            Command::OrbitUp => "orbit up",
            Command::ZoomIn => "zoom in",
            Command::ZoomOut => "zoom out",
            Command::PanForward => "pan forward",
            Command::PanBackward => "pan backward",
            Command::PanRight => "pan right",
            Command::PanLeft => "pan left",
            Command::Rotate(RotationDirection::Forward) => "turn top layer",
            Command::Rotate(RotationDirection::Backward) => "turn top layer back",
        }
    }
}
