//! Shows the identity color cube.
//!
//! Usage: `cargo run --example color_cube_demo -- [cube_size] [options.json]`
//!
//! Left-drag orbits, right-drag (or shift+left-drag) pans, the wheel zooms,
//! F12 saves a screenshot and Escape closes the window.

use colorcube_rs::*;

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let cube_size = args.next().map(|arg| arg.parse::<u32>());
    let mut options = match args.next() {
        Some(path) => Options::from_json_file(path)?,
        None => Options::default(),
    };

    match cube_size {
        Some(Ok(n)) => options.cube_size = n,
        Some(Err(e)) => {
            return Err(ColorCubeError::InvalidOption {
                name: "cube_size",
                reason: e.to_string(),
            })
        }
        None => {}
    }

    show(options)
}
