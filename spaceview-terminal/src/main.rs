//! Spaceview Terminal Viewer
//!
//! Usage:
//!   spaceview-terminal [--config viewer.json] [--mesh model.bin] [--steps 10]
//!                      [--delay-ms 200] [--log-file viewer.log]
//!   spaceview-terminal --headless [--script wwdd] [--cols 80] [--rows 24]
//!
//! Controls:
//!   W/S: forward/back   A/D: left/right   E/C: up/down
//!   Arrow keys: pitch and yaw   ,/.: roll   R: reset   Q/ESC: quit
//!
//! Without `--mesh` a unit cube is shown.

use std::fs::File;
use std::io::{self, stdout};
use std::sync::Mutex;

use anyhow::Context;
use spaceview_core::MeshAsset;
use spaceview_terminal::{parse_args, RunMode, TerminalApp, ViewerConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_logging(config: &ViewerConfig, mode: &RunMode) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into());
    match (&config.log_file, mode) {
        (Some(path), _) => {
            let file = File::create(path)
                .with_context(|| format!("create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        // stderr is safe to use when nothing owns the terminal
        (None, RunMode::Headless { .. }) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
        (None, RunMode::Interactive) => {}
    }
    Ok(())
}

fn load_mesh(config: &ViewerConfig) -> anyhow::Result<MeshAsset> {
    match &config.mesh {
        Some(path) => {
            MeshAsset::load(path).with_context(|| format!("load mesh {}", path.display()))
        }
        None => Ok(MeshAsset::cube(1.0)),
    }
}

fn main() -> anyhow::Result<()> {
    let options = parse_args(std::env::args().skip(1))?;
    init_logging(&options.config, &options.mode)?;

    let mesh = load_mesh(&options.config)?;
    info!(
        vertices = mesh.vertices().len(),
        faces = mesh.faces().len(),
        "mesh ready"
    );

    match options.mode {
        RunMode::Headless { script, cols, rows } => {
            let mut app = TerminalApp::with_grid(&mesh, options.config, cols, rows)?;
            app.run_script(&script, &mut stdout().lock())?;
        }
        RunMode::Interactive => {
            let mut app = TerminalApp::new(&mesh, options.config)?;
            app.run()?;
        }
    }
    Ok(())
}
