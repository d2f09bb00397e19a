//! Renders the identity cube to a PNG without opening a window.
//!
//! Usage: `cargo run --example headless_demo -- [output.png]`

use colorcube_rs::*;

fn main() -> Result<()> {
    env_logger::init();

    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "colorcube.png".to_string());

    let options = Options {
        cube_size: 16,
        background_color: Vec3::splat(0.1),
        ..Options::default()
    };
    render_to_file(&options, &output, 800, 800)?;
    println!("wrote {output}");
    Ok(())
}
