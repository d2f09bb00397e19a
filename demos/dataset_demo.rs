//! Loads a lattice from a JSON dataset and shows it.
//!
//! Without an argument, writes a sample dataset (a posterized, warm-shifted
//! 12³ cube) to the temp directory first.
//!
//! Usage: `cargo run --example dataset_demo -- [dataset.json]`

use std::path::PathBuf;

use colorcube_rs::*;

fn sample_dataset() -> Result<PathBuf> {
    let n = 12;
    let lattice = Lattice::identity(n)?;

    // Warm shift with four posterization levels.
    let colors: Vec<[f32; 3]> = lattice
        .colors()
        .iter()
        .map(|c| {
            let posterize = |v: f32| (v * 3.0).round() / 3.0;
            [
                posterize((c.r * 1.2).min(1.0)),
                posterize(c.g),
                posterize(c.b * 0.8),
            ]
        })
        .collect();

    let document = serde_json::json!({
        "cubesize": n,
        "redValues": lattice.red(),
        "greenValues": lattice.green(),
        "blueValues": lattice.blue(),
        "inputColors": colors,
    });

    let path = std::env::temp_dir().join("colorcube_sample_dataset.json");
    std::fs::write(&path, document.to_string())?;
    log::info!("wrote sample dataset to {}", path.display());
    Ok(path)
}

fn main() -> Result<()> {
    env_logger::init();

    let dataset = match std::env::args().nth(1) {
        Some(path) => PathBuf::from(path),
        None => sample_dataset()?,
    };

    show(Options {
        dataset: Some(dataset),
        title: "colorcube dataset".to_string(),
        ..Options::default()
    })
}
