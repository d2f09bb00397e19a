//! Core data model for colorcube-rs.
//!
//! This crate holds everything that does not touch the GPU:
//! - [`Lattice`]: the N³ grid of color samples, synthesized or loaded
//! - [`Dataset`]: JSON ingestion with field-name normalization
//! - [`CubeMeshBuilder`] / [`CubeMesh`]: one batched, flat-shaded mesh with a
//!   small cube per sample
//! - [`Options`]: viewer configuration
//! - [`ColorCubeError`]: the error taxonomy shared by all crates

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Channel names r/g/b are conventional
#![allow(clippy::many_single_char_names)]

pub mod dataset;
pub mod error;
pub mod lattice;
pub mod mesh;
pub mod options;

pub use dataset::{normalize_field_name, Dataset, DatasetField, LatticeSource};
pub use error::{ColorCubeError, ErrorKind, Result};
pub use lattice::{ColorSample, Lattice, Sample, DEFAULT_CUBE_SIZE};
pub use mesh::{
    default_point_size, sample_index_of_triangle, Corner, CubeMesh, CubeMeshBuilder,
    CubeTemplate, Triangle, TRIANGLES_PER_CUBE,
};
pub use options::{CameraConfig, HemisphereLight, Options};

// Re-export glam types for convenience
pub use glam::{Mat4, UVec3, Vec3};
