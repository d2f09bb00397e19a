//! The main rendering engine.

mod capture;
mod pipelines;
mod rendering;
mod textures;

use std::sync::Arc;

use glam::Vec3;
use wgpu::util::DeviceExt;

use crate::camera::Camera;
use crate::error::{RenderError, RenderResult};

/// Format used for headless targets. Unorm so lattice colors are written
/// unchanged.
pub const HEADLESS_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Depth buffer format.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24PlusStencil8;

/// Camera uniforms for GPU.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
#[allow(clippy::pub_underscore_fields)]
pub struct CameraUniforms {
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 3],
    pub _padding: f32,
}

impl Default for CameraUniforms {
    fn default() -> Self {
        Self::from_camera(&Camera::default())
    }
}

impl CameraUniforms {
    /// Packs the matrices of `camera`.
    #[must_use]
    pub fn from_camera(camera: &Camera) -> Self {
        let view = camera.view_matrix();
        let proj = camera.projection_matrix();
        Self {
            view: view.to_cols_array_2d(),
            proj: proj.to_cols_array_2d(),
            view_proj: (proj * view).to_cols_array_2d(),
            camera_pos: camera.position.to_array(),
            _padding: 0.0,
        }
    }
}

/// The main rendering engine backed by wgpu.
pub struct RenderEngine {
    /// The wgpu instance.
    pub instance: wgpu::Instance,
    /// The wgpu adapter.
    pub adapter: wgpu::Adapter,
    /// The wgpu device.
    pub device: wgpu::Device,
    /// The wgpu queue.
    pub queue: wgpu::Queue,
    /// The render surface (None for headless).
    pub surface: Option<wgpu::Surface<'static>>,
    /// Surface configuration. Headless engines keep one too, for the
    /// target format and size.
    pub surface_config: wgpu::SurfaceConfiguration,
    /// Depth texture.
    pub depth_texture: wgpu::Texture,
    /// Depth texture view.
    pub depth_view: wgpu::TextureView,
    /// Offscreen color target (headless only).
    offscreen: Option<(wgpu::Texture, wgpu::TextureView)>,
    /// Main camera.
    pub camera: Camera,
    /// Clear color.
    pub background_color: Vec3,
    /// Current viewport width.
    pub width: u32,
    /// Current viewport height.
    pub height: u32,
    /// Camera uniform buffer.
    camera_buffer: wgpu::Buffer,
    /// Cube mesh render pipeline.
    cube_mesh_pipeline: wgpu::RenderPipeline,
    /// Cube mesh bind group layout.
    cube_mesh_bind_group_layout: wgpu::BindGroupLayout,
}

impl RenderEngine {
    /// Creates an engine drawing into `window`.
    pub async fn new_windowed(window: Arc<winit::window::Window>) -> RenderResult<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..wgpu::InstanceDescriptor::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|_| RenderError::AdapterCreationFailed)?;

        let (device, queue) = Self::request_device(&adapter, "colorcube device").await?;

        let size = window.inner_size();
        let width = size.width.max(1);
        let height = size.height.max(1);

        let surface_caps = surface.get_capabilities(&adapter);
        // Non-sRGB so per-sample colors reach the screen as given.
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(RenderError::SurfaceConfigurationFailed)?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        Ok(Self::from_parts(
            instance,
            adapter,
            device,
            queue,
            Some(surface),
            surface_config,
        ))
    }

    /// Creates an engine rendering into an offscreen texture.
    pub async fn new_headless(width: u32, height: u32) -> RenderResult<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..wgpu::InstanceDescriptor::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .map_err(|_| RenderError::AdapterCreationFailed)?;

        let (device, queue) =
            Self::request_device(&adapter, "colorcube device (headless)").await?;

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            format: HEADLESS_FORMAT,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        Ok(Self::from_parts(
            instance,
            adapter,
            device,
            queue,
            None,
            surface_config,
        ))
    }

    async fn request_device(
        adapter: &wgpu::Adapter,
        label: &str,
    ) -> RenderResult<(wgpu::Device, wgpu::Queue)> {
        let adapter_limits = adapter.limits();
        let required_limits = wgpu::Limits {
            max_storage_buffer_binding_size: adapter_limits.max_storage_buffer_binding_size,
            max_buffer_size: adapter_limits.max_buffer_size,
            ..wgpu::Limits::default()
        };

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some(label),
                required_features: wgpu::Features::empty(),
                required_limits,
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::default(),
                experimental_features: wgpu::ExperimentalFeatures::default(),
            })
            .await?;
        Ok((device, queue))
    }

    #[allow(clippy::cast_precision_loss)]
    fn from_parts(
        instance: wgpu::Instance,
        adapter: wgpu::Adapter,
        device: wgpu::Device,
        queue: wgpu::Queue,
        surface: Option<wgpu::Surface<'static>>,
        surface_config: wgpu::SurfaceConfiguration,
    ) -> Self {
        let width = surface_config.width;
        let height = surface_config.height;

        log::info!(
            "render engine on {} ({:?}), {}x{} {:?}",
            adapter.get_info().name,
            adapter.get_info().backend,
            width,
            height,
            surface_config.format,
        );

        let (depth_texture, depth_view) = Self::create_depth_texture(&device, width, height);
        let offscreen = surface.is_none().then(|| {
            Self::create_color_target(&device, surface_config.format, width, height)
        });

        let camera = Camera::new(width as f32 / height as f32);

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("camera uniforms"),
            contents: bytemuck::cast_slice(&[CameraUniforms::from_camera(&camera)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let (cube_mesh_pipeline, cube_mesh_bind_group_layout) =
            Self::create_cube_mesh_pipeline(&device, surface_config.format);

        Self {
            instance,
            adapter,
            device,
            queue,
            surface,
            surface_config,
            depth_texture,
            depth_view,
            offscreen,
            camera,
            background_color: Vec3::ZERO,
            width,
            height,
            camera_buffer,
            cube_mesh_pipeline,
            cube_mesh_bind_group_layout,
        }
    }

    /// Resizes the render target.
    #[allow(clippy::cast_precision_loss)]
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.width = width;
        self.height = height;
        self.surface_config.width = width;
        self.surface_config.height = height;

        if let Some(ref surface) = self.surface {
            surface.configure(&self.device, &self.surface_config);
        } else {
            self.offscreen = Some(Self::create_color_target(
                &self.device,
                self.surface_config.format,
                width,
                height,
            ));
        }

        let (depth_texture, depth_view) = Self::create_depth_texture(&self.device, width, height);
        self.depth_texture = depth_texture;
        self.depth_view = depth_view;

        self.camera.set_aspect_ratio(width as f32 / height as f32);
    }

    /// Reconfigures the surface at its current size.
    pub fn reconfigure_surface(&mut self) {
        log::debug!("reconfiguring surface at {}x{}", self.width, self.height);
        self.resize(self.width, self.height);
    }

    /// Updates camera uniforms.
    pub fn update_camera_uniforms(&self) {
        let uniforms = CameraUniforms::from_camera(&self.camera);
        self.queue
            .write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[uniforms]));
    }

    /// Gets the camera buffer.
    pub fn camera_buffer(&self) -> &wgpu::Buffer {
        &self.camera_buffer
    }

    /// Returns the viewport dimensions.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_uniforms_size() {
        assert_eq!(std::mem::size_of::<CameraUniforms>(), 208);
        assert_eq!(std::mem::size_of::<CameraUniforms>() % 16, 0);
    }

    #[test]
    fn test_camera_uniforms_from_camera() {
        let camera = Camera::new(1.0);
        let uniforms = CameraUniforms::from_camera(&camera);
        assert_eq!(uniforms.camera_pos, [2.0, 2.0, 2.0]);
        assert_eq!(
            uniforms.view_proj,
            camera.view_projection_matrix().to_cols_array_2d()
        );
    }
}
