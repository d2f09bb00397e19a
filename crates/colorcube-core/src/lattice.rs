//! The N³ lattice of color samples.
//!
//! A [`Lattice`] stores one [`ColorSample`] per grid point of a cube of side
//! `cube_size`, together with the sample's spatial position split into three
//! parallel channel sequences. Every sequence is addressed by the same linear
//! index `i = r * cube_size² + g * cube_size + b`.

use glam::{UVec3, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{ColorCubeError, Result};

/// Side length of the lattice when none is given.
pub const DEFAULT_CUBE_SIZE: u32 = 32;

/// A normalized RGB color, each channel in `[0.0, 1.0]`.
#[repr(C)]
#[derive(
    Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, bytemuck::Pod, bytemuck::Zeroable,
)]
pub struct ColorSample {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
}

impl ColorSample {
    /// Creates a color from already normalized channels.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Normalizes integer grid channels of a lattice with side `cube_size`.
    ///
    /// Channel `0` maps to `0.0` and channel `cube_size - 1` maps to `1.0`.
    /// A single-sample lattice has only channel `0`, which maps to `0.0`.
    #[must_use]
    pub fn from_grid(r: u32, g: u32, b: u32, cube_size: u32) -> Self {
        Self::new(
            normalize_channel(r, cube_size),
            normalize_channel(g, cube_size),
            normalize_channel(b, cube_size),
        )
    }

    /// Returns the channels as a vector.
    #[must_use]
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.r, self.g, self.b)
    }

    /// Returns the channels as an array.
    #[must_use]
    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Packs the color into `0xRRGGBB`, rounding and clamping each channel.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_hex(self) -> u32 {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (byte(self.r) << 16) | (byte(self.g) << 8) | byte(self.b)
    }

    /// Returns true if every channel lies in `[0.0, 1.0]`.
    #[must_use]
    pub fn is_normalized(self) -> bool {
        [self.r, self.g, self.b].into_iter().all(is_unit)
    }
}

impl From<Vec3> for ColorSample {
    fn from(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<ColorSample> for Vec3 {
    fn from(c: ColorSample) -> Self {
        c.to_vec3()
    }
}

#[allow(clippy::cast_precision_loss)]
fn normalize_channel(value: u32, cube_size: u32) -> f32 {
    if cube_size <= 1 {
        return 0.0;
    }
    value as f32 / (cube_size - 1) as f32
}

fn is_unit(v: f32) -> bool {
    (0.0..=1.0).contains(&v)
}

/// Number of samples in a lattice of side `cube_size`, if addressable.
#[must_use]
pub fn sample_count(cube_size: u32) -> Option<usize> {
    let n = usize::try_from(cube_size).ok()?;
    n.checked_mul(n)?.checked_mul(n)
}

/// One lattice entry, as yielded by [`Lattice::samples`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Linear index into the lattice sequences.
    pub index: usize,
    /// Spatial position (red, green, blue channel values).
    pub position: Vec3,
    /// Display color.
    pub color: ColorSample,
}

/// A cube of `cube_size³` color samples stored as parallel sequences.
///
/// Built once, then read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    cube_size: u32,
    red: Vec<f32>,
    green: Vec<f32>,
    blue: Vec<f32>,
    colors: Vec<ColorSample>,
}

impl Lattice {
    /// Synthesizes the identity lattice, where every sample's color equals
    /// its normalized grid coordinate.
    ///
    /// Samples are generated with `r` outermost and `b` innermost so the
    /// sequence order matches [`Lattice::index_of`].
    pub fn identity(cube_size: u32) -> Result<Self> {
        if cube_size < 1 {
            return Err(ColorCubeError::InvalidCubeSize(i64::from(cube_size)));
        }
        let count = sample_count(cube_size).ok_or(ColorCubeError::GeometryTooLarge(cube_size))?;

        let mut red = Vec::with_capacity(count);
        let mut green = Vec::with_capacity(count);
        let mut blue = Vec::with_capacity(count);
        let mut colors = Vec::with_capacity(count);

        for r in 0..cube_size {
            for g in 0..cube_size {
                for b in 0..cube_size {
                    let color = ColorSample::from_grid(r, g, b, cube_size);
                    red.push(color.r);
                    green.push(color.g);
                    blue.push(color.b);
                    colors.push(color);
                }
            }
        }

        log::debug!("identity lattice built: cube size {cube_size}, {count} samples");

        Ok(Self {
            cube_size,
            red,
            green,
            blue,
            colors,
        })
    }

    /// Builds a lattice from externally supplied sequences.
    ///
    /// Every sequence must hold exactly `cube_size³` entries and every value
    /// must lie in `[0.0, 1.0]`. Out-of-range values are rejected, not
    /// clamped.
    pub fn from_channels(
        cube_size: u32,
        red: Vec<f32>,
        green: Vec<f32>,
        blue: Vec<f32>,
        colors: Vec<ColorSample>,
    ) -> Result<Self> {
        if cube_size < 1 {
            return Err(ColorCubeError::InvalidCubeSize(i64::from(cube_size)));
        }
        let expected = sample_count(cube_size).ok_or(ColorCubeError::GeometryTooLarge(cube_size))?;

        for (field, actual) in [
            ("red", red.len()),
            ("green", green.len()),
            ("blue", blue.len()),
            ("colors", colors.len()),
        ] {
            if actual != expected {
                return Err(ColorCubeError::MalformedLattice {
                    field,
                    expected,
                    actual,
                });
            }
        }

        for (field, values) in [("red", &red), ("green", &green), ("blue", &blue)] {
            if let Some(i) = values.iter().position(|v| !is_unit(*v)) {
                return Err(ColorCubeError::MalformedDataset(format!(
                    "'{field}' entry {i} is {}, expected a value in [0, 1]",
                    values[i]
                )));
            }
        }
        if let Some(i) = colors.iter().position(|c| !c.is_normalized()) {
            let c = colors[i];
            return Err(ColorCubeError::MalformedDataset(format!(
                "'colors' entry {i} is ({}, {}, {}), expected channels in [0, 1]",
                c.r, c.g, c.b
            )));
        }

        Ok(Self {
            cube_size,
            red,
            green,
            blue,
            colors,
        })
    }

    /// Side length of the cube.
    #[must_use]
    pub fn cube_size(&self) -> u32 {
        self.cube_size
    }

    /// Number of samples (`cube_size³`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false for a constructed lattice; provided for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Linear index of grid point `(r, g, b)`.
    ///
    /// Returns `None` if any coordinate lies outside the cube.
    #[must_use]
    pub fn index_of(&self, r: u32, g: u32, b: u32) -> Option<usize> {
        let n = self.cube_size;
        if r >= n || g >= n || b >= n {
            return None;
        }
        let n = n as usize;
        Some(r as usize * n * n + g as usize * n + b as usize)
    }

    /// Grid coordinates of the sample at linear index `index`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn grid_coords(&self, index: usize) -> Option<UVec3> {
        if index >= self.len() {
            return None;
        }
        let n = self.cube_size as usize;
        let r = index / (n * n);
        let g = (index / n) % n;
        let b = index % n;
        // All three are below cube_size, which is a u32.
        Some(UVec3::new(r as u32, g as u32, b as u32))
    }

    /// Spatial position of sample `index`.
    #[must_use]
    pub fn position(&self, index: usize) -> Option<Vec3> {
        Some(Vec3::new(
            *self.red.get(index)?,
            *self.green.get(index)?,
            *self.blue.get(index)?,
        ))
    }

    /// Display color of sample `index`.
    #[must_use]
    pub fn color(&self, index: usize) -> Option<ColorSample> {
        self.colors.get(index).copied()
    }

    /// Red channel sequence.
    #[must_use]
    pub fn red(&self) -> &[f32] {
        &self.red
    }

    /// Green channel sequence.
    #[must_use]
    pub fn green(&self) -> &[f32] {
        &self.green
    }

    /// Blue channel sequence.
    #[must_use]
    pub fn blue(&self) -> &[f32] {
        &self.blue
    }

    /// Per-sample colors.
    #[must_use]
    pub fn colors(&self) -> &[ColorSample] {
        &self.colors
    }

    /// Iterates over all samples in index order.
    pub fn samples(&self) -> impl ExactSizeIterator<Item = Sample> + '_ {
        self.colors.iter().enumerate().map(|(index, &color)| Sample {
            index,
            position: Vec3::new(self.red[index], self.green[index], self.blue[index]),
            color,
        })
    }

    /// Axis-aligned bounding box of the sample positions.
    #[must_use]
    pub fn bounding_box(&self) -> (Vec3, Vec3) {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for sample in self.samples() {
            min = min.min(sample.position);
            max = max.max(sample.position);
        }
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_identity_sample_count() {
        for n in 1..=6 {
            let lattice = Lattice::identity(n).unwrap();
            let expected = (n * n * n) as usize;
            assert_eq!(lattice.len(), expected);
            assert_eq!(lattice.red().len(), expected);
            assert_eq!(lattice.green().len(), expected);
            assert_eq!(lattice.blue().len(), expected);
            assert_eq!(lattice.colors().len(), expected);
        }
    }

    #[test]
    fn test_identity_corners() {
        let lattice = Lattice::identity(DEFAULT_CUBE_SIZE).unwrap();
        let n = DEFAULT_CUBE_SIZE - 1;

        let origin = lattice.index_of(0, 0, 0).unwrap();
        assert_eq!(origin, 0);
        assert_eq!(lattice.color(origin).unwrap(), ColorSample::new(0.0, 0.0, 0.0));

        let far = lattice.index_of(n, n, n).unwrap();
        assert_eq!(far, lattice.len() - 1);
        assert_eq!(lattice.color(far).unwrap(), ColorSample::new(1.0, 1.0, 1.0));
        assert_eq!(lattice.position(far).unwrap(), Vec3::ONE);
    }

    #[test]
    fn test_single_sample_lattice() {
        let lattice = Lattice::identity(1).unwrap();
        assert_eq!(lattice.len(), 1);
        assert_eq!(lattice.color(0).unwrap(), ColorSample::new(0.0, 0.0, 0.0));
        assert_eq!(lattice.position(0).unwrap(), Vec3::ZERO);
    }

    #[test]
    fn test_zero_cube_size_rejected() {
        let err = Lattice::identity(0).unwrap_err();
        assert!(matches!(err, ColorCubeError::InvalidCubeSize(0)));
    }

    #[test]
    fn test_channel_order() {
        // b is the innermost loop, so index 1 advances blue only.
        let lattice = Lattice::identity(3).unwrap();
        assert_eq!(lattice.color(1).unwrap(), ColorSample::new(0.0, 0.0, 0.5));
        assert_eq!(lattice.color(3).unwrap(), ColorSample::new(0.0, 0.5, 0.0));
        assert_eq!(lattice.color(9).unwrap(), ColorSample::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn test_index_out_of_range() {
        let lattice = Lattice::identity(4).unwrap();
        assert_eq!(lattice.index_of(4, 0, 0), None);
        assert_eq!(lattice.index_of(0, 0, 4), None);
        assert_eq!(lattice.grid_coords(64), None);
        assert_eq!(lattice.position(64), None);
        assert_eq!(lattice.color(64), None);
    }

    #[test]
    fn test_from_channels_length_mismatch() {
        let lattice = Lattice::identity(4).unwrap();
        let err = Lattice::from_channels(
            4,
            lattice.red()[..60].to_vec(),
            lattice.green().to_vec(),
            lattice.blue().to_vec(),
            lattice.colors().to_vec(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ColorCubeError::MalformedLattice {
                field: "red",
                expected: 64,
                actual: 60
            }
        ));
    }

    #[test]
    fn test_from_channels_rejects_out_of_range_color() {
        let err = Lattice::from_channels(
            1,
            vec![0.0],
            vec![0.0],
            vec![0.0],
            vec![ColorSample::new(1.5, -0.2, 0.0)],
        )
        .unwrap_err();
        assert!(matches!(err, ColorCubeError::MalformedDataset(_)));
        assert_eq!(err.kind(), crate::error::ErrorKind::MalformedLattice);
    }

    #[test]
    fn test_from_channels_rejects_out_of_range_position() {
        let err = Lattice::from_channels(
            1,
            vec![0.0],
            vec![1.01],
            vec![0.0],
            vec![ColorSample::default()],
        )
        .unwrap_err();
        assert!(err.to_string().contains("'green' entry 0"));
    }

    #[test]
    fn test_from_channels_accepts_unit_bounds() {
        let lattice = Lattice::from_channels(
            1,
            vec![1.0],
            vec![0.0],
            vec![1.0],
            vec![ColorSample::new(0.0, 1.0, 0.0)],
        )
        .unwrap();
        assert!(lattice.color(0).unwrap().is_normalized());
    }

    #[test]
    fn test_from_channels_rejects_nan() {
        let err = Lattice::from_channels(
            1,
            vec![f32::NAN],
            vec![0.0],
            vec![0.0],
            vec![ColorSample::default()],
        )
        .unwrap_err();
        assert!(matches!(err, ColorCubeError::MalformedDataset(_)));
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(ColorSample::new(1.0, 0.0, 0.0).to_hex(), 0xff_00_00);
        assert_eq!(ColorSample::new(0.0, 1.0, 1.0).to_hex(), 0x00_ff_ff);
        assert_eq!(ColorSample::new(2.0, -1.0, 0.5).to_hex(), 0xff_00_80);
    }

    #[test]
    fn test_bounding_box() {
        let lattice = Lattice::identity(5).unwrap();
        assert_eq!(lattice.bounding_box(), (Vec3::ZERO, Vec3::ONE));
    }

    proptest! {
        #[test]
        fn prop_index_matches_formula(n in 1u32..12, coords in any::<(u32, u32, u32)>()) {
            let (r, g, b) = (coords.0 % n, coords.1 % n, coords.2 % n);
            let lattice = Lattice::identity(n).unwrap();
            let index = lattice.index_of(r, g, b).unwrap();
            prop_assert_eq!(index, (r * n * n + g * n + b) as usize);
            prop_assert_eq!(lattice.grid_coords(index).unwrap(), UVec3::new(r, g, b));
            prop_assert_eq!(lattice.color(index).unwrap(), ColorSample::from_grid(r, g, b, n));
        }

        #[test]
        fn prop_grid_coords_round_trip(n in 1u32..10, seed in 0usize..1000) {
            let lattice = Lattice::identity(n).unwrap();
            let index = seed % lattice.len();
            let c = lattice.grid_coords(index).unwrap();
            prop_assert_eq!(lattice.index_of(c.x, c.y, c.z), Some(index));
        }

        #[test]
        fn prop_position_equals_color(n in 1u32..10, seed in 0usize..1000) {
            let lattice = Lattice::identity(n).unwrap();
            let index = seed % lattice.len();
            prop_assert_eq!(lattice.position(index).unwrap(), lattice.color(index).unwrap().to_vec3());
        }
    }
}
