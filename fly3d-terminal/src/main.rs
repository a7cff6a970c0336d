/// fly3d terminal viewer
///
/// Loads OBJ meshes from the asset directory and renders them as ASCII with a
/// walking camera and a free-fly camera (Space toggles between them).
///
/// Logging goes to stderr and is controlled by `RUST_LOG`; redirect stderr
/// to a file to keep it off the rendered screen.
use anyhow::{Context, Result};
use fly3d_terminal::{build_scene, config::USAGE, ViewerApp, ViewerConfig};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        println!("{USAGE}");
        return Ok(());
    }
    let config = ViewerConfig::from_args(args)?;

    println!("fly3d - loading meshes from {}...", config.asset_dir.display());
    let objects = build_scene(&config);
    let triangles: usize = objects.iter().map(|o| o.buffer.triangle_count()).sum();
    log::info!("scene ready: {} objects, {} triangles", objects.len(), triangles);

    let mut app = ViewerApp::new(objects, &config).context("failed to query terminal size")?;
    app.run().context("terminal viewer failed")?;

    println!("Thank you for using fly3d!");
    Ok(())
}
