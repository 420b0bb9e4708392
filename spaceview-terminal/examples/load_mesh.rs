/// Example: Load a mesh asset and view it in the terminal
///
/// Usage: cargo run --example load_mesh -- path/to/mesh.bin

use anyhow::Context;
use spaceview_core::{MeshAsset, MeshError};
use spaceview_terminal::{TerminalApp, ViewerConfig};
use std::env;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let mesh = match args.get(1) {
        Some(path) => match MeshAsset::load(path) {
            Ok(mesh) => mesh,
            Err(MeshError::AssetNotFound { path }) => {
                eprintln!("No mesh at {}, using default cube...", path.display());
                MeshAsset::cube(1.0)
            }
            Err(err) => return Err(err).with_context(|| format!("load {path}")),
        },
        None => {
            eprintln!("Usage: {} <mesh-file>", args[0]);
            eprintln!("\nNo mesh file provided, using default cube...");
            MeshAsset::cube(1.0)
        }
    };

    println!("Loaded {} triangles", mesh.faces().len());
    println!("Starting terminal viewer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(&mesh, ViewerConfig::default())?;
    app.run()
}
