//! Headless rendering API for colorcube-rs.
//!
//! Renders the scene described by [`Options`] to an image buffer or file
//! without opening a window. Useful for integration tests and batch
//! rendering.

use std::path::Path;

use pollster::FutureExt;

use colorcube_core::{Options, Result};
use colorcube_render::{save_image, RenderEngine};

use crate::scene::Scene;
use crate::session::Session;

/// Renders the scene described by `options` to a file.
///
/// The format follows the extension (`.png`, `.jpg`, `.jpeg`).
///
/// # Example
/// ```no_run
/// use colorcube_rs::*;
///
/// let options = Options { cube_size: 8, ..Options::default() };
/// render_to_file(&options, "cube.png", 600, 600).unwrap();
/// ```
pub fn render_to_file(
    options: &Options,
    path: impl AsRef<Path>,
    width: u32,
    height: u32,
) -> Result<()> {
    let data = render_to_image(options, width, height)?;
    save_image(path, data, width, height)?;
    Ok(())
}

/// Renders the scene described by `options` to raw RGBA pixels.
///
/// The returned buffer has `width * height * 4` bytes, rows from top to
/// bottom.
///
/// # Example
/// ```no_run
/// use colorcube_rs::*;
///
/// let pixels = render_to_image(&Options::default(), 320, 240).unwrap();
/// assert_eq!(pixels.len(), 320 * 240 * 4);
/// ```
pub fn render_to_image(options: &Options, width: u32, height: u32) -> Result<Vec<u8>> {
    let scene = Scene::from_options(options)?;
    render_scene_to_image(&scene, width, height)
}

/// Renders an already assembled scene to raw RGBA pixels.
pub fn render_scene_to_image(scene: &Scene, width: u32, height: u32) -> Result<Vec<u8>> {
    let engine = RenderEngine::new_headless(width, height).block_on()?;
    let session = Session::new(engine, scene)?;
    session.capture()
}
