//! Cube mesh GPU rendering resources.

use colorcube_core::{CubeMesh, HemisphereLight};

use crate::buffer::{create_storage_buffer, create_uniform_buffer};
use crate::error::{RenderError, RenderResult};

/// Uniforms for cube mesh rendering.
/// Note: Layout must match WGSL `MeshUniforms` exactly (80 bytes).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[allow(clippy::pub_underscore_fields)]
pub struct MeshUniforms {
    /// Hemisphere sky color (rgb) and intensity (w).
    pub sky_color: [f32; 4],
    /// Hemisphere ground color (rgb).
    pub ground_color: [f32; 4],
    /// Sky direction (xyz, normalized).
    pub light_up: [f32; 4],
    /// Color used when vertex colors are off.
    pub base_color: [f32; 4],
    /// Shade back faces with a flipped normal: 0 = off, 1 = on.
    pub double_sided: u32,
    /// Use per-vertex colors: 0 = off, 1 = on.
    pub vertex_colors: u32,
    pub _pad: [u32; 2],
}

impl Default for MeshUniforms {
    fn default() -> Self {
        Self::new(&HemisphereLight::default(), true, true)
    }
}

impl MeshUniforms {
    /// Packs a hemisphere light and material flags.
    #[must_use]
    pub fn new(light: &HemisphereLight, double_sided: bool, vertex_colors: bool) -> Self {
        let up = light.up.normalize_or(glam::Vec3::Y);
        Self {
            sky_color: light.sky_color.extend(light.intensity).to_array(),
            ground_color: light.ground_color.extend(1.0).to_array(),
            light_up: up.extend(0.0).to_array(),
            base_color: [0.5, 0.5, 0.5, 1.0],
            double_sided: u32::from(double_sided),
            vertex_colors: u32::from(vertex_colors),
            _pad: [0; 2],
        }
    }
}

/// GPU resources for rendering a batched cube mesh.
///
/// Each buffer is a flat `array<f32>` read by the shader at
/// `vertex_index * 3`; the draw is non-indexed.
pub struct CubeMeshRenderData {
    /// Position buffer (storage).
    pub position_buffer: wgpu::Buffer,
    /// Normal buffer (storage).
    pub normal_buffer: wgpu::Buffer,
    /// Color buffer (storage).
    pub color_buffer: wgpu::Buffer,
    /// Uniform buffer for light and material settings.
    pub uniform_buffer: wgpu::Buffer,
    /// Bind group for this mesh.
    pub bind_group: wgpu::BindGroup,
    /// Number of vertices to draw.
    pub num_vertices: u32,
}

impl CubeMeshRenderData {
    /// Uploads `mesh` to the GPU.
    ///
    /// Fails if a buffer exceeds the device's storage binding limit or the
    /// vertex count does not fit a draw call.
    pub fn new(
        device: &wgpu::Device,
        bind_group_layout: &wgpu::BindGroupLayout,
        camera_buffer: &wgpu::Buffer,
        mesh: &CubeMesh,
        uniforms: &MeshUniforms,
    ) -> RenderResult<Self> {
        let num_vertices = u32::try_from(mesh.vertex_count()).map_err(|_| {
            RenderError::BufferCreationFailed(format!(
                "{} vertices exceed a single draw",
                mesh.vertex_count()
            ))
        })?;

        let buffer_bytes = std::mem::size_of_val(mesh.positions()) as u64;
        let max_binding = u64::from(device.limits().max_storage_buffer_binding_size);
        if buffer_bytes > max_binding {
            return Err(RenderError::BufferCreationFailed(format!(
                "mesh buffers need {buffer_bytes} bytes, device allows {max_binding}"
            )));
        }

        let position_buffer =
            create_storage_buffer(device, mesh.positions(), Some("cube mesh positions"));
        let normal_buffer =
            create_storage_buffer(device, mesh.normals(), Some("cube mesh normals"));
        let color_buffer = create_storage_buffer(device, mesh.colors(), Some("cube mesh colors"));
        let uniform_buffer = create_uniform_buffer(device, uniforms, Some("cube mesh uniforms"));

        // Bindings:
        // 0: camera uniforms (uniform)
        // 1: mesh uniforms (uniform)
        // 2: positions (storage)
        // 3: normals (storage)
        // 4: colors (storage)
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("cube mesh bind group"),
            layout: bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: position_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: normal_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 4,
                    resource: color_buffer.as_entire_binding(),
                },
            ],
        });

        log::debug!(
            "uploaded cube mesh: {num_vertices} vertices, {buffer_bytes} bytes per buffer"
        );

        Ok(Self {
            position_buffer,
            normal_buffer,
            color_buffer,
            uniform_buffer,
            bind_group,
            num_vertices,
        })
    }

    /// Records the draw into an open render pass.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>, pipeline: &wgpu::RenderPipeline) {
        pass.set_pipeline(pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.draw(0..self.num_vertices, 0..1);
    }
}
