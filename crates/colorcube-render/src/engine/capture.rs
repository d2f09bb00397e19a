use super::RenderEngine;
use crate::buffer::{create_readback_buffer, padded_bytes_per_row, BYTES_PER_PIXEL};
use crate::cube_mesh_render::CubeMeshRenderData;
use crate::screenshot::ScreenshotError;

impl RenderEngine {
    /// Renders `mesh` into a fresh texture at the current size and reads it
    /// back.
    ///
    /// Returns tightly packed RGBA8 rows, top row first.
    pub fn capture_frame(&self, mesh: &CubeMeshRenderData) -> Result<Vec<u8>, ScreenshotError> {
        self.update_camera_uniforms();

        let (texture, view) = Self::create_color_target(
            &self.device,
            self.surface_config.format,
            self.width,
            self.height,
        );
        let buffer = create_readback_buffer(
            &self.device,
            self.width,
            self.height,
            Some("screenshot buffer"),
        );
        let bytes_per_row = padded_bytes_per_row(self.width);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("screenshot encoder"),
            });

        self.encode_scene(&mut encoder, &view, mesh);

        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(bytes_per_row),
                    rows_per_image: Some(self.height),
                },
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );

        self.queue.submit(std::iter::once(encoder.finish()));

        let buffer_slice = buffer.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            // Receiver outlives the poll below.
            let _ = tx.send(result);
        });
        let _ = self.device.poll(wgpu::PollType::wait_indefinitely());
        rx.recv()
            .map_err(|_| ScreenshotError::BufferMapFailed)?
            .map_err(|_| ScreenshotError::BufferMapFailed)?;

        // Copy data, removing row padding
        let data = buffer_slice.get_mapped_range();
        let row_bytes = (self.width * BYTES_PER_PIXEL) as usize;
        let mut pixels = Vec::with_capacity(row_bytes * self.height as usize);
        for row in 0..self.height as usize {
            let start = row * bytes_per_row as usize;
            pixels.extend_from_slice(&data[start..start + row_bytes]);
        }
        drop(data);
        buffer.unmap();

        if is_bgra(self.surface_config.format) {
            for pixel in pixels.chunks_exact_mut(BYTES_PER_PIXEL as usize) {
                pixel.swap(0, 2);
            }
        }

        Ok(pixels)
    }
}

fn is_bgra(format: wgpu::TextureFormat) -> bool {
    matches!(
        format,
        wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Bgra8UnormSrgb
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bgra_detection() {
        assert!(is_bgra(wgpu::TextureFormat::Bgra8Unorm));
        assert!(!is_bgra(wgpu::TextureFormat::Rgba8Unorm));
    }
}
