/// cubeview - a 3x3x3 cube puzzle in the terminal
///
/// Controls:
///   - Arrow keys: orbit the camera
///   - W/S: zoom out / in
///   - A/Q, D/R: pan forward / backward, right / left
///   - Space / Backspace: turn the top layer forward / backward
///   - Esc or Ctrl-C: quit
use std::{fs::File, path::Path, sync::Mutex};

use anyhow::Context;
use clap::Parser;
use cubeview_terminal::{load_settings, Cli, TerminalApp};
use tracing_subscriber::EnvFilter;

fn init_logging(path: &Path, level: &str) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file '{}'", path.display()))?;
    let filter = EnvFilter::try_new(level)
        .with_context(|| format!("invalid log level '{level}'"))?;

    // The terminal belongs to the renderer, so logs only ever go to the file
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        init_logging(path, &cli.log_level)?;
    }

    let settings = load_settings(&cli)?;
    tracing::info!(?settings, "starting cubeview");

    TerminalApp::new(&settings)?.run()
}
