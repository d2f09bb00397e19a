use super::RenderEngine;
use crate::cube_mesh_render::CubeMeshRenderData;
use crate::error::{RenderError, RenderResult};

impl RenderEngine {
    /// Records a cleared pass drawing `mesh` into `view`.
    pub fn encode_scene(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        mesh: &CubeMeshRenderData,
    ) {
        let clear = wgpu::Color {
            r: f64::from(self.background_color.x),
            g: f64::from(self.background_color.y),
            b: f64::from(self.background_color.z),
            a: 1.0,
        };

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("cube mesh pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            ..Default::default()
        });

        mesh.draw(&mut render_pass, &self.cube_mesh_pipeline);
    }

    /// Draws one frame of `mesh` to the surface, or to the offscreen target
    /// when headless.
    ///
    /// A lost or outdated surface is reconfigured and the error returned so
    /// the caller can skip the frame.
    pub fn render_frame(&mut self, mesh: &CubeMeshRenderData) -> RenderResult<()> {
        self.update_camera_uniforms();

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render encoder"),
            });

        let Some(surface) = self.surface.as_ref() else {
            let (_, view) = self
                .offscreen
                .as_ref()
                .ok_or(RenderError::SurfaceConfigurationFailed)?;
            self.encode_scene(&mut encoder, view, mesh);
            self.queue.submit(std::iter::once(encoder.finish()));
            return Ok(());
        };

        let output = match surface.get_current_texture() {
            Ok(output) => output,
            Err(error @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                self.reconfigure_surface();
                return Err(error.into());
            }
            Err(error) => return Err(error.into()),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.encode_scene(&mut encoder, &view, mesh);

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}
