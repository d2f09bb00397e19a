//! colorcube-rs: an interactive 3D view of an RGB color lattice.
//!
//! Every sample of an N×N×N lattice of colors is drawn as a small
//! flat-shaded cube, placed at its own RGB coordinates and painted in its
//! own color. The lattice is either the identity cube (every color of an
//! N-step RGB grid) or a JSON dataset mapping grid positions to colors.
//!
//! # Quick Start
//!
//! ```no_run
//! use colorcube_rs::*;
//!
//! fn main() -> Result<()> {
//!     let options = Options {
//!         cube_size: 16,
//!         ..Options::default()
//!     };
//!     show(options)
//! }
//! ```
//!
//! # Architecture
//!
//! Data flows one way:
//!
//! - [`Lattice`] - the samples, from [`Lattice::identity`] or a [`Dataset`]
//! - [`CubeMesh`] - one batched mesh, 12 triangles per sample
//! - [`Scene`] - mesh plus light, material and initial camera
//! - [`Session`] - the scene uploaded to a [`RenderEngine`], with
//!   [`OrbitControls`]
//! - [`FrameLoop`] - draws one frame per [`FrameLoop::tick`]

mod app;
pub mod frame_loop;
pub mod headless;
pub mod scene;
pub mod session;

// Re-export core types
pub use colorcube_core::{
    normalize_field_name, sample_index_of_triangle, CameraConfig, ColorCubeError, ColorSample,
    CubeMesh, CubeMeshBuilder, Dataset, DatasetField, ErrorKind, HemisphereLight, Lattice,
    LatticeSource, Options, Result, Sample, Mat4, UVec3, Vec3, DEFAULT_CUBE_SIZE,
    TRIANGLES_PER_CUBE,
};

// Re-export render types
pub use colorcube_render::{
    Camera, OrbitControls, PointerButton, RenderEngine, RenderError, ScreenshotError,
};

pub use frame_loop::{FrameLoop, FrameStatus, FrameTarget, StopHandle};
pub use headless::{render_scene_to_image, render_to_file, render_to_image};
pub use scene::{MeshMaterial, Scene};
pub use session::Session;

/// Builds the scene described by `options`.
///
/// Fails before anything is rendered if the options are invalid or the
/// dataset is malformed.
pub fn build_scene(options: &Options) -> Result<Scene> {
    Scene::from_options(options)
}

/// Shows the viewer window for `options`.
///
/// This function blocks until the window is closed. Errors are logged and
/// returned; the lattice and mesh are built before the window opens, so a
/// bad dataset never reaches the screen.
pub fn show(options: Options) -> Result<()> {
    let _ = env_logger::try_init();

    let result = build_scene(&options).and_then(|scene| app::run(options, scene));
    if let Err(error) = &result {
        log::error!("colorcube viewer failed: {error}");
    }
    result
}
