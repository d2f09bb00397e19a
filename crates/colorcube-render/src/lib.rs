//! Rendering backend for colorcube-rs.
//!
//! This crate provides the wgpu-based rendering engine, including:
//! - GPU resource management for the batched cube mesh
//! - The flat-shaded hemisphere-lit WGSL shader
//! - Camera and orbit controls
//! - Frame capture and image export

pub mod buffer;
pub mod camera;
pub mod controls;
pub mod cube_mesh_render;
pub mod engine;
pub mod error;
pub mod screenshot;

pub use camera::{Camera, MIN_DISTANCE};
pub use controls::{OrbitControls, PointerButton};
pub use cube_mesh_render::{CubeMeshRenderData, MeshUniforms};
pub use engine::{CameraUniforms, RenderEngine, DEPTH_FORMAT, HEADLESS_FORMAT};
pub use error::{RenderError, RenderResult};
pub use screenshot::{next_screenshot_path, save_image, to_image, RgbaImage, ScreenshotError};
