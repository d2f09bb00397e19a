//! Saving captured frames.

use std::path::{Path, PathBuf};

use image::{ImageBuffer, Rgba};

/// An RGBA8 image, top row first.
pub type RgbaImage = ImageBuffer<Rgba<u8>, Vec<u8>>;

/// Wraps captured RGBA pixels in an image buffer.
pub fn to_image(data: Vec<u8>, width: u32, height: u32) -> Result<RgbaImage, ScreenshotError> {
    ImageBuffer::from_raw(width, height, data).ok_or(ScreenshotError::InvalidImageData)
}

/// Saves RGBA pixel data to an image file.
///
/// The format follows the extension: `.png`, or `.jpg`/`.jpeg` (alpha
/// dropped).
pub fn save_image(
    path: impl AsRef<Path>,
    data: Vec<u8>,
    width: u32,
    height: u32,
) -> Result<(), ScreenshotError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let img = to_image(data, width, height)?;

    match extension.as_str() {
        "png" => img.save_with_format(path, image::ImageFormat::Png)?,
        "jpg" | "jpeg" => {
            let rgb_img = image::DynamicImage::ImageRgba8(img).to_rgb8();
            rgb_img.save_with_format(path, image::ImageFormat::Jpeg)?;
        }
        _ => return Err(ScreenshotError::UnsupportedFormat(extension)),
    }

    log::info!("saved screenshot {}", path.display());
    Ok(())
}

/// Returns `dir/screenshot_NNNN.png` for the first `NNNN` not already taken,
/// starting at `start`.
#[must_use]
pub fn next_screenshot_path(dir: &Path, start: u32) -> (PathBuf, u32) {
    let mut index = start;
    loop {
        let path = dir.join(format!("screenshot_{index:04}.png"));
        if !path.exists() || index == u32::MAX {
            return (path, index);
        }
        index += 1;
    }
}

/// Error type for screenshot operations.
#[derive(Debug, thiserror::Error)]
pub enum ScreenshotError {
    #[error("Failed to save image: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid image data")]
    InvalidImageData,

    #[error("GPU buffer mapping failed")]
    BufferMapFailed,
}

impl From<ScreenshotError> for colorcube_core::ColorCubeError {
    fn from(error: ScreenshotError) -> Self {
        match error {
            ScreenshotError::IoError(error) => Self::IoError(error),
            other => Self::RenderError(other.to_string()),
        }
    }
}
