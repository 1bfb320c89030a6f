/// Command line and configuration file handling
use std::{fs, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use cubeview_core::{AnimationConfig, CameraConfig, LayoutConfig, RotationDirection, SceneConfig};
use serde::Deserialize;
use tracing::info;

const DEFAULT_FPS: u32 = 30;

#[derive(Parser, Debug)]
#[command(name = "cubeview", version, about = "Terminal viewer for a 3x3x3 cube puzzle")]
pub struct Cli {
    /// TOML file with [layout], [camera], [animation] and [terminal] sections
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Target frames per second
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: Option<u32>,
    /// Write logs to this file (nothing is logged otherwise)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
    /// Log filter, e.g. `debug` or `cubeview_core=trace`
    #[arg(long, default_value = "info")]
    pub log_level: String,
    /// Initial camera distance
    #[arg(long)]
    pub distance: Option<f32>,
    /// Start turning the top layer right away (`forward` or `backward`)
    #[arg(long)]
    pub spin: Option<RotationDirection>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    pub fps: u32,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self { fps: DEFAULT_FPS }
    }
}

/// Layout of the TOML configuration file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    layout: LayoutConfig,
    camera: CameraConfig,
    animation: AnimationConfig,
    terminal: TerminalConfig,
}

/// Fully resolved settings: defaults, then the config file, then flags
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub scene: SceneConfig,
    pub terminal: TerminalConfig,
    pub spin: Option<RotationDirection>,
}

pub fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let file = match &cli.config {
        Some(path) => {
            info!(path = %path.display(), "loading config file");
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file '{}'", path.display()))?;
            toml::from_str::<FileConfig>(&raw)
                .with_context(|| format!("failed to parse config file '{}'", path.display()))?
        }
        None => FileConfig::default(),
    };

    let mut settings = Settings {
        scene: SceneConfig {
            layout: file.layout,
            camera: file.camera,
            animation: file.animation,
        },
        terminal: file.terminal,
        spin: cli.spin,
    };

    if let Some(fps) = cli.fps {
        settings.terminal.fps = fps;
    }
    if let Some(distance) = cli.distance {
        settings.scene.camera.distance = distance;
    }

    settings
        .scene
        .validate()
        .context("invalid scene configuration")?;
    if settings.terminal.fps == 0 {
        anyhow::bail!("terminal.fps must be at least 1");
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        env,
        time::{SystemTime, UNIX_EPOCH},
    };

    fn temp_config(contents: &str) -> PathBuf {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let path = env::temp_dir().join(format!("cubeview_test_{suffix}.toml"));
        fs::write(&path, contents).expect("write temp config");
        path
    }

    #[test]
    fn test_defaults_without_flags() {
        let cli = Cli::try_parse_from(["cubeview"]).unwrap();
        let settings = load_settings(&cli).unwrap();
        assert_eq!(settings.scene, SceneConfig::default());
        assert_eq!(settings.terminal.fps, DEFAULT_FPS);
        assert_eq!(settings.spin, None);
    }

    #[test]
    fn test_flags_override_file() {
        let path = temp_config(
            r#"
            [camera]
            distance = 4.0
            zy_angle = 0.0

            [terminal]
            fps = 20
            "#,
        );
        let cli = Cli::try_parse_from([
            "cubeview",
            "--config",
            path.to_str().unwrap(),
            "--distance",
            "2.5",
            "--spin",
            "backward",
        ])
        .unwrap();
        let settings = load_settings(&cli).unwrap();
        fs::remove_file(&path).expect("cleanup");

        assert_eq!(settings.scene.camera.distance, 2.5);
        assert_eq!(settings.scene.camera.zy_angle, 0.0);
        assert_eq!(settings.terminal.fps, 20);
        assert_eq!(settings.spin, Some(RotationDirection::Backward));
    }

    #[test]
    fn test_invalid_spin_is_rejected_by_parser() {
        let result = Cli::try_parse_from(["cubeview", "--spin", "sideways"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_degenerate_distance_is_rejected() {
        let cli = Cli::try_parse_from(["cubeview", "--distance", "0"]).unwrap();
        let err = load_settings(&cli).unwrap_err();
        assert!(format!("{err:#}").contains("camera distance"));
    }

    #[test]
    fn test_missing_config_file_has_context() {
        let cli = Cli::try_parse_from(["cubeview", "--config", "/nonexistent/cubeview.toml"]).unwrap();
        let err = load_settings(&cli).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
