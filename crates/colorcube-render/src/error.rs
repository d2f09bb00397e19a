//! Rendering error types.

use thiserror::Error;

use colorcube_core::ColorCubeError;

/// Errors that can occur during rendering operations.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Failed to create wgpu adapter.
    #[error("failed to create graphics adapter")]
    AdapterCreationFailed,

    /// Failed to create wgpu device.
    #[error("failed to create graphics device: {0}")]
    DeviceCreationFailed(#[from] wgpu::RequestDeviceError),

    /// Failed to create surface.
    #[error("failed to create surface: {0}")]
    SurfaceCreationFailed(#[from] wgpu::CreateSurfaceError),

    /// The surface reports no usable texture format.
    #[error("surface configuration failed")]
    SurfaceConfigurationFailed,

    /// Mesh does not fit in one storage buffer binding.
    #[error("buffer creation failed: {0}")]
    BufferCreationFailed(String),

    /// Surface lost.
    #[error("surface lost")]
    SurfaceLost,

    /// Surface outdated.
    #[error("surface outdated")]
    SurfaceOutdated,

    /// Out of memory.
    #[error("out of memory")]
    OutOfMemory,

    /// Timeout waiting for GPU.
    #[error("timeout waiting for GPU")]
    Timeout,

    /// Any other surface acquisition failure.
    #[error("surface error: {0}")]
    Surface(String),
}

impl RenderError {
    /// Whether the frame can simply be skipped and retried next refresh.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            RenderError::SurfaceLost | RenderError::SurfaceOutdated | RenderError::Timeout
        )
    }
}

impl From<wgpu::SurfaceError> for RenderError {
    fn from(error: wgpu::SurfaceError) -> Self {
        match error {
            wgpu::SurfaceError::Lost => RenderError::SurfaceLost,
            wgpu::SurfaceError::Outdated => RenderError::SurfaceOutdated,
            wgpu::SurfaceError::Timeout => RenderError::Timeout,
            wgpu::SurfaceError::OutOfMemory => RenderError::OutOfMemory,
            other => RenderError::Surface(other.to_string()),
        }
    }
}

impl From<RenderError> for ColorCubeError {
    fn from(error: RenderError) -> Self {
        ColorCubeError::RenderError(error.to_string())
    }
}

/// A specialized Result type for rendering operations.
pub type RenderResult<T> = std::result::Result<T, RenderError>;
