/// Example: Write a cube mesh asset
///
/// Usage: cargo run --example write_cube -- [path] [size]

use anyhow::Context;
use spaceview_core::MeshAsset;
use std::env;

fn main() -> anyhow::Result<()> {
    let mut args = env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "cube.bin".to_string());
    let size = match args.next() {
        Some(size) => size.parse().context("size must be a number")?,
        None => 1.0,
    };

    let cube = MeshAsset::cube(size);
    cube.save(&path).with_context(|| format!("write {path}"))?;
    println!(
        "Wrote {} vertices and {} faces to {}",
        cube.vertices().len(),
        cube.faces().len(),
        path
    );
    Ok(())
}
