//! Batched cube mesh generation.
//!
//! Every lattice sample becomes one small axis-aligned cube. Rather than one
//! drawable per sample, all cubes are flattened into a single set of
//! position, normal and color buffers so the whole lattice is drawn with one
//! call. Triangles are emitted in lattice order, 12 per sample, so triangle
//! `t` always belongs to sample `t / 12`.

use std::ops::Range;

use glam::Vec3;

use crate::error::{ColorCubeError, Result};
use crate::lattice::{ColorSample, Lattice};

use self::Corner::{
    LeftBottomBack as LBB, LeftBottomFront as LBF, LeftTopBack as LTB, LeftTopFront as LTF,
    RightBottomBack as RBB, RightBottomFront as RBF, RightTopBack as RTB, RightTopFront as RTF,
};

/// Triangles emitted for each lattice sample (2 per face, 6 faces).
pub const TRIANGLES_PER_CUBE: usize = 12;

/// Vertices per triangle.
pub const VERTICES_PER_TRIANGLE: usize = 3;

/// Floats per vertex attribute (x, y, z or r, g, b).
pub const COMPONENTS: usize = 3;

/// Floats occupied by one triangle in each buffer.
pub const FLOATS_PER_TRIANGLE: usize = VERTICES_PER_TRIANGLE * COMPONENTS;

/// Fraction of a lattice cell spanned by one cube edge.
pub const DEFAULT_POINT_FRACTION: f32 = 0.25;

/// Default cube edge length for a lattice of side `cube_size`: a quarter of
/// one lattice cell.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn default_point_size(cube_size: u32) -> f32 {
    (1.0 / cube_size.max(1) as f32) * DEFAULT_POINT_FRACTION
}

/// Number of floats each buffer must hold for a lattice of side `cube_size`.
#[must_use]
pub fn buffer_len(cube_size: u32) -> Option<usize> {
    crate::lattice::sample_count(cube_size)?
        .checked_mul(TRIANGLES_PER_CUBE)?
        .checked_mul(FLOATS_PER_TRIANGLE)
}

/// Index of the lattice sample that emitted triangle `triangle`.
#[must_use]
pub const fn sample_index_of_triangle(triangle: usize) -> usize {
    triangle / TRIANGLES_PER_CUBE
}

/// The eight corners of the cube template.
///
/// `Left`/`Right` run along +X, `Bottom`/`Top` along +Y, `Back`/`Front`
/// along +Z. `LeftBottomBack` sits at the template origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum Corner {
    LeftBottomBack = 0,
    RightBottomBack = 1,
    RightTopBack = 2,
    LeftTopBack = 3,
    LeftBottomFront = 4,
    RightBottomFront = 5,
    RightTopFront = 6,
    LeftTopFront = 7,
}

impl Corner {
    /// Unit offset of this corner; scale by the point size to place it.
    #[must_use]
    pub fn unit_offset(self) -> Vec3 {
        match self {
            Corner::LeftBottomBack => Vec3::new(0.0, 0.0, 0.0),
            Corner::RightBottomBack => Vec3::new(1.0, 0.0, 0.0),
            Corner::RightTopBack => Vec3::new(1.0, 1.0, 0.0),
            Corner::LeftTopBack => Vec3::new(0.0, 1.0, 0.0),
            Corner::LeftBottomFront => Vec3::new(0.0, 0.0, 1.0),
            Corner::RightBottomFront => Vec3::new(1.0, 0.0, 1.0),
            Corner::RightTopFront => Vec3::new(1.0, 1.0, 1.0),
            Corner::LeftTopFront => Vec3::new(0.0, 1.0, 1.0),
        }
    }
}

/// Triangle fan over the template corners, two triangles per face.
///
/// Each triangle is counter-clockwise seen from outside the cube, so
/// `(C - B) x (A - B)` points away from the cube.
#[rustfmt::skip]
pub const CUBE_TRIANGLES: [[Corner; 3]; TRIANGLES_PER_CUBE] = [
    // back (-Z)
    [LBB, LTB, RTB], [LBB, RTB, RBB],
    // front (+Z)
    [LBF, RBF, RTF], [LBF, RTF, LTF],
    // bottom (-Y)
    [LBB, RBB, RBF], [LBB, RBF, LBF],
    // top (+Y)
    [LTB, LTF, RTF], [LTB, RTF, RTB],
    // left (-X)
    [LBB, LBF, LTF], [LBB, LTF, LTB],
    // right (+X)
    [RBB, RTB, RTF], [RBB, RTF, RBF],
];

/// The eight corners of one cube of edge `point_size`, indexed by [`Corner`],
/// and the face normal of each triangle in [`CUBE_TRIANGLES`].
///
/// Normals are taken from the unit cube, independent of point size and
/// placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeTemplate {
    corners: [Vec3; 8],
    normals: [Vec3; TRIANGLES_PER_CUBE],
    point_size: f32,
}

impl CubeTemplate {
    /// Builds the template for cubes of edge `point_size`.
    #[must_use]
    pub fn new(point_size: f32) -> Self {
        let all = [LBB, RBB, RTB, LTB, LBF, RBF, RTF, LTF];
        Self {
            corners: all.map(|c| c.unit_offset() * point_size),
            normals: CUBE_TRIANGLES
                .map(|[a, b, c]| face_normal(a.unit_offset(), b.unit_offset(), c.unit_offset())),
            point_size,
        }
    }

    /// Outward normal of triangle `local` (0..12) of the cube.
    #[must_use]
    pub fn normal(&self, local: usize) -> Vec3 {
        self.normals[local]
    }

    /// Offset of `corner` from the cube origin.
    #[must_use]
    pub fn corner(&self, corner: Corner) -> Vec3 {
        self.corners[corner as usize]
    }

    /// Edge length.
    #[must_use]
    pub fn point_size(&self) -> f32 {
        self.point_size
    }
}

/// Flat face normal of triangle `(a, b, c)`: `normalize((c - b) x (a - b))`.
#[must_use]
pub fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (c - b).cross(a - b).normalize_or_zero()
}

/// One triangle read back from a [`CubeMesh`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Vertex positions.
    pub positions: [Vec3; 3],
    /// Vertex normals.
    pub normals: [Vec3; 3],
    /// Vertex colors.
    pub colors: [Vec3; 3],
}

impl Triangle {
    /// Centroid of the three positions.
    #[must_use]
    pub fn centroid(&self) -> Vec3 {
        (self.positions[0] + self.positions[1] + self.positions[2]) / 3.0
    }
}

/// A batched, flat-shaded mesh of one cube per lattice sample.
///
/// Triangle `t` occupies floats `[t * 9, t * 9 + 9)` of every buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct CubeMesh {
    positions: Vec<f32>,
    normals: Vec<f32>,
    colors: Vec<f32>,
    cube_size: u32,
    point_size: f32,
}

impl CubeMesh {
    /// Wraps existing buffers, checking them against the layout of a
    /// lattice of side `cube_size`.
    pub fn from_buffers(
        cube_size: u32,
        point_size: f32,
        positions: Vec<f32>,
        normals: Vec<f32>,
        colors: Vec<f32>,
    ) -> Result<Self> {
        if cube_size < 1 {
            return Err(ColorCubeError::InvalidCubeSize(i64::from(cube_size)));
        }
        let expected = buffer_len(cube_size).ok_or(ColorCubeError::GeometryTooLarge(cube_size))?;
        for (buffer, actual) in [
            ("positions", positions.len()),
            ("normals", normals.len()),
            ("colors", colors.len()),
        ] {
            if actual != expected {
                return Err(ColorCubeError::BufferOverflow {
                    buffer,
                    expected,
                    actual,
                });
            }
        }
        Ok(Self {
            positions,
            normals,
            colors,
            cube_size,
            point_size,
        })
    }

    /// Side length of the source lattice.
    #[must_use]
    pub fn cube_size(&self) -> u32 {
        self.cube_size
    }

    /// Edge length of each cube.
    #[must_use]
    pub fn point_size(&self) -> f32 {
        self.point_size
    }

    /// Number of lattice samples represented.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.triangle_count() / TRIANGLES_PER_CUBE
    }

    /// Number of triangles (`samples * 12`).
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / FLOATS_PER_TRIANGLE
    }

    /// Number of vertices (`triangles * 3`).
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.triangle_count() * VERTICES_PER_TRIANGLE
    }

    /// Flat vertex positions.
    #[must_use]
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Flat vertex normals.
    #[must_use]
    pub fn normals(&self) -> &[f32] {
        &self.normals
    }

    /// Flat vertex colors.
    #[must_use]
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    /// Reads triangle `t` back out of the buffers.
    #[must_use]
    pub fn triangle(&self, t: usize) -> Option<Triangle> {
        if t >= self.triangle_count() {
            return None;
        }
        let start = t * FLOATS_PER_TRIANGLE;
        let read = |buffer: &[f32]| -> [Vec3; 3] {
            let s = &buffer[start..start + FLOATS_PER_TRIANGLE];
            [
                Vec3::from_slice(&s[0..3]),
                Vec3::from_slice(&s[3..6]),
                Vec3::from_slice(&s[6..9]),
            ]
        };
        Some(Triangle {
            positions: read(&self.positions),
            normals: read(&self.normals),
            colors: read(&self.colors),
        })
    }

    /// Range of triangle indices emitted for lattice sample `sample`.
    #[must_use]
    pub fn triangles_of_sample(&self, sample: usize) -> Range<usize> {
        let start = sample * TRIANGLES_PER_CUBE;
        start..start + TRIANGLES_PER_CUBE
    }

    /// Axis-aligned bounding box of all vertices.
    #[must_use]
    pub fn bounding_box(&self) -> (Vec3, Vec3) {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for p in self.positions.chunks_exact(COMPONENTS) {
            let p = Vec3::from_slice(p);
            min = min.min(p);
            max = max.max(p);
        }
        (min, max)
    }
}

/// Builds a [`CubeMesh`] from a [`Lattice`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CubeMeshBuilder {
    point_size: Option<f32>,
}

impl CubeMeshBuilder {
    /// Creates a builder using the default point size.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the cube edge length.
    #[must_use]
    pub fn point_size(mut self, point_size: f32) -> Self {
        self.point_size = Some(point_size);
        self
    }

    /// Overrides the cube edge length if `point_size` is set.
    #[must_use]
    pub fn maybe_point_size(mut self, point_size: Option<f32>) -> Self {
        if point_size.is_some() {
            self.point_size = point_size;
        }
        self
    }

    /// Emits 12 flat-shaded triangles per lattice sample.
    pub fn build(&self, lattice: &Lattice) -> Result<CubeMesh> {
        let cube_size = lattice.cube_size();
        if cube_size < 1 {
            return Err(ColorCubeError::InvalidCubeSize(i64::from(cube_size)));
        }
        let point_size = self
            .point_size
            .unwrap_or_else(|| default_point_size(cube_size));
        if !point_size.is_finite() || point_size <= 0.0 {
            return Err(ColorCubeError::InvalidPointSize(point_size));
        }
        let expected = buffer_len(cube_size).ok_or(ColorCubeError::GeometryTooLarge(cube_size))?;

        let template = CubeTemplate::new(point_size);
        let mut positions = Vec::with_capacity(expected);
        let mut normals = Vec::with_capacity(expected);
        let mut colors = Vec::with_capacity(expected);

        for sample in lattice.samples() {
            emit_cube(
                &template,
                sample.position,
                sample.color,
                &mut positions,
                &mut normals,
                &mut colors,
            );
        }

        let mesh = CubeMesh::from_buffers(cube_size, point_size, positions, normals, colors)?;
        log::info!(
            "cube mesh built: {} samples, {} triangles, point size {point_size}",
            mesh.sample_count(),
            mesh.triangle_count()
        );
        Ok(mesh)
    }
}

fn emit_cube(
    template: &CubeTemplate,
    origin: Vec3,
    color: ColorSample,
    positions: &mut Vec<f32>,
    normals: &mut Vec<f32>,
    colors: &mut Vec<f32>,
) {
    let rgb = color.to_array();
    for (local, [ca, cb, cc]) in CUBE_TRIANGLES.into_iter().enumerate() {
        let a = origin + template.corner(ca);
        let b = origin + template.corner(cb);
        let c = origin + template.corner(cc);
        let n = template.normal(local).to_array();

        for v in [a, b, c] {
            positions.extend_from_slice(&v.to_array());
            normals.extend_from_slice(&n);
            colors.extend_from_slice(&rgb);
        }
    }
}
