/// Error types for the places where outside input enters the core
use thiserror::Error;

/// A scene configuration value that would produce a degenerate scene
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be strictly positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("camera distance {distance} is below the minimum {min_distance}")]
    DistanceBelowMinimum { distance: f32, min_distance: f32 },
    #[error("near plane {near} must be closer than far plane {far}")]
    InvertedClipPlanes { near: f32, far: f32 },
}

/// A rotation direction that is neither forward nor backward
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown rotation direction `{0}` (expected `forward` or `backward`)")]
pub struct ParseDirectionError(pub String);
