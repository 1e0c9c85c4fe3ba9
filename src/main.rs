use anyhow::{Context, Result};
use d3d11_descriptors::manifest::Manifest;

fn main() -> Result<()> {
    env_logger::init();

    let path = std::env::args_os()
        .nth(1)
        .context("usage: d3d11-inspect <manifest.ini>")?;

    let manifest = Manifest::load(&path)?;
    let resolved = manifest.resolve()?;

    for (name, view) in &resolved.views {
        println!("{name}: {view}");
    }

    for (name, viewport) in &resolved.viewports {
        println!(
            "{name}: viewport ({}, {}) {}x{} depth {}..{}",
            viewport.top_left_x,
            viewport.top_left_y,
            viewport.width,
            viewport.height,
            viewport.min_depth,
            viewport.max_depth
        );
    }

    Ok(())
}
