//! Error types for colorcube-rs.

use thiserror::Error;

/// Broad category of a [`ColorCubeError`].
///
/// Every category is fatal for the current session: scene construction is
/// aborted before the render loop starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid configuration (cube size, point size, viewer options).
    Config,
    /// Input dataset shape does not describe a lattice.
    MalformedLattice,
    /// Geometry buffer size does not match the prescribed layout.
    Allocation,
    /// GPU or window failure.
    Render,
    /// Reading input failed.
    Io,
}

/// The main error type for colorcube-rs operations.
#[derive(Error, Debug)]
pub enum ColorCubeError {
    /// Cube size below one.
    #[error("invalid cube size {0}: must be at least 1")]
    InvalidCubeSize(i64),

    /// Point size that cannot produce a visible cube.
    #[error("invalid point size {0}: must be finite and positive")]
    InvalidPointSize(f32),

    /// Viewer options rejected by validation.
    #[error("invalid option '{name}': {reason}")]
    InvalidOption { name: &'static str, reason: String },

    /// A lattice sequence disagrees with `cube_size³`.
    #[error("malformed lattice: '{field}' has {actual} entries, expected {expected}")]
    MalformedLattice {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Dataset is structurally unusable (missing or duplicate fields, bad values).
    #[error("malformed dataset: {0}")]
    MalformedDataset(String),

    /// Geometry buffer does not match the triangle/vertex count formula.
    #[error("geometry buffer '{buffer}' holds {actual} floats, expected {expected}")]
    BufferOverflow {
        buffer: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Required buffer size does not fit in memory addressing.
    #[error("cube size {0} needs more geometry than can be addressed")]
    GeometryTooLarge(u32),

    /// Rendering error.
    #[error("render error: {0}")]
    RenderError(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl ColorCubeError {
    /// Returns the category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidCubeSize(_) | Self::InvalidPointSize(_) | Self::InvalidOption { .. } => {
                ErrorKind::Config
            }
            Self::MalformedLattice { .. } | Self::MalformedDataset(_) | Self::JsonError(_) => {
                ErrorKind::MalformedLattice
            }
            Self::BufferOverflow { .. } | Self::GeometryTooLarge(_) => ErrorKind::Allocation,
            Self::RenderError(_) => ErrorKind::Render,
            Self::IoError(_) => ErrorKind::Io,
        }
    }
}

/// A specialized Result type for colorcube-rs operations.
pub type Result<T> = std::result::Result<T, ColorCubeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(ColorCubeError::InvalidCubeSize(0).kind(), ErrorKind::Config);
        assert_eq!(
            ColorCubeError::MalformedLattice {
                field: "red",
                expected: 64,
                actual: 60
            }
            .kind(),
            ErrorKind::MalformedLattice
        );
        assert_eq!(
            ColorCubeError::BufferOverflow {
                buffer: "positions",
                expected: 1,
                actual: 2
            }
            .kind(),
            ErrorKind::Allocation
        );
    }

    #[test]
    fn test_error_messages() {
        let err = ColorCubeError::MalformedLattice {
            field: "green",
            expected: 64,
            actual: 60,
        };
        assert_eq!(
            err.to_string(),
            "malformed lattice: 'green' has 60 entries, expected 64"
        );
        assert_eq!(
            ColorCubeError::InvalidCubeSize(-3).to_string(),
            "invalid cube size -3: must be at least 1"
        );
    }
}
