//! Configuration options for the color cube viewer.

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::dataset::LatticeSource;
use crate::error::{ColorCubeError, Result};
use crate::lattice::DEFAULT_CUBE_SIZE;

/// Viewer configuration.
///
/// Every field has a default, so a JSON options file only needs the fields
/// it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Side length of the identity lattice (ignored when `dataset` is set).
    pub cube_size: u32,

    /// Cube edge length; `None` uses a quarter of one lattice cell.
    pub point_size: Option<f32>,

    /// Dataset file to load instead of the identity lattice.
    pub dataset: Option<PathBuf>,

    /// Window width in logical pixels.
    pub window_width: u32,

    /// Window height in logical pixels.
    pub window_height: u32,

    /// Window title.
    pub title: String,

    /// Clear color behind the lattice.
    pub background_color: Vec3,

    /// Initial camera.
    pub camera: CameraConfig,

    /// Scene light.
    pub light: HemisphereLight,

    /// Maximum frames per second (0 = paced by vsync only).
    pub max_fps: u32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            cube_size: DEFAULT_CUBE_SIZE,
            point_size: None,
            dataset: None,
            window_width: 600,
            window_height: 600,
            title: "colorcube".to_string(),
            background_color: Vec3::ZERO,
            camera: CameraConfig::default(),
            light: HemisphereLight::default(),
            max_fps: 0,
        }
    }
}

impl Options {
    /// Parses options from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Loads options from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Checks that the options describe a drawable scene.
    pub fn validate(&self) -> Result<()> {
        if self.cube_size < 1 {
            return Err(ColorCubeError::InvalidCubeSize(i64::from(self.cube_size)));
        }
        if let Some(size) = self.point_size {
            if !size.is_finite() || size <= 0.0 {
                return Err(ColorCubeError::InvalidPointSize(size));
            }
        }
        if self.window_width == 0 || self.window_height == 0 {
            return Err(ColorCubeError::InvalidOption {
                name: "window size",
                reason: format!("{}x{} has no area", self.window_width, self.window_height),
            });
        }
        self.camera.validate()
    }

    /// Where the lattice should come from.
    #[must_use]
    pub fn lattice_source(&self) -> LatticeSource {
        match &self.dataset {
            Some(path) => LatticeSource::Dataset(path.clone()),
            None => LatticeSource::Identity {
                cube_size: self.cube_size,
            },
        }
    }
}

/// Initial perspective camera.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
    /// Camera position.
    pub position: Vec3,
    /// Point the camera orbits around.
    pub target: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            near: 0.1,
            far: 10_000.0,
            position: Vec3::splat(2.0),
            target: Vec3::splat(0.5),
        }
    }
}

impl CameraConfig {
    /// Checks clip planes, field of view and placement.
    pub fn validate(&self) -> Result<()> {
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ColorCubeError::InvalidOption {
                name: "camera.fov_degrees",
                reason: format!("{} is outside (0, 180)", self.fov_degrees),
            });
        }
        if !(self.near > 0.0 && self.far > self.near) {
            return Err(ColorCubeError::InvalidOption {
                name: "camera.near/far",
                reason: format!("need 0 < near < far, got {} and {}", self.near, self.far),
            });
        }
        if self.position.distance_squared(self.target) <= f32::EPSILON {
            return Err(ColorCubeError::InvalidOption {
                name: "camera.position",
                reason: "camera sits on its target".to_string(),
            });
        }
        Ok(())
    }
}

/// A light blending a sky color from above with a ground color from below.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HemisphereLight {
    /// Color received by surfaces facing `up`.
    pub sky_color: Vec3,
    /// Color received by surfaces facing away from `up`.
    pub ground_color: Vec3,
    /// Overall intensity.
    pub intensity: f32,
    /// Direction of the sky.
    pub up: Vec3,
}

impl Default for HemisphereLight {
    fn default() -> Self {
        Self {
            sky_color: Vec3::ONE,
            ground_color: Vec3::ONE,
            intensity: 1.0,
            up: Vec3::Y,
        }
    }
}

impl HemisphereLight {
    /// Irradiance received by a surface with normal `normal`.
    #[must_use]
    pub fn irradiance(&self, normal: Vec3) -> Vec3 {
        let weight = 0.5 * normal.dot(self.up.normalize_or_zero()) + 0.5;
        self.ground_color.lerp(self.sky_color, weight) * self.intensity
    }
}
