//! The viewer session: everything a running viewer owns.

use std::path::{Path, PathBuf};

use colorcube_core::Result;
use colorcube_render::{
    next_screenshot_path, save_image, Camera, CubeMeshRenderData, OrbitControls, RenderEngine,
    RenderResult,
};

use crate::frame_loop::FrameTarget;
use crate::scene::Scene;

/// A live viewer: render engine, uploaded scene, camera and controls.
///
/// The scene's mesh, light and material are fixed once uploaded. Passed by
/// `&mut` to whatever drives frames.
pub struct Session {
    engine: RenderEngine,
    mesh: CubeMeshRenderData,
    controls: OrbitControls,
    next_screenshot: u32,
}

impl Session {
    /// Uploads `scene` to `engine` and places the camera.
    #[allow(clippy::cast_precision_loss)]
    pub fn new(mut engine: RenderEngine, scene: &Scene) -> Result<Self> {
        let (width, height) = engine.dimensions();
        engine.camera = Camera::from_config(&scene.camera, width as f32 / height as f32);
        engine.background_color = scene.background_color;
        engine.update_camera_uniforms();

        let mesh = CubeMeshRenderData::new(
            &engine.device,
            engine.cube_mesh_bind_group_layout(),
            engine.camera_buffer(),
            &scene.mesh,
            &scene.mesh_uniforms(),
        )?;

        log::info!(
            "session ready: {} cubes, {} triangles",
            scene.mesh.sample_count(),
            scene.mesh.triangle_count()
        );

        Ok(Self {
            engine,
            mesh,
            controls: OrbitControls::new(width, height),
            next_screenshot: 0,
        })
    }

    /// Mutable access to the orbit controls, for feeding input.
    pub fn controls_mut(&mut self) -> &mut OrbitControls {
        &mut self.controls
    }

    /// Follows a surface resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.engine.resize(width, height);
        self.controls.set_viewport(width, height);
    }

    /// Renders the current view offscreen and returns RGBA pixels.
    pub fn capture(&self) -> Result<Vec<u8>> {
        Ok(self.engine.capture_frame(&self.mesh)?)
    }

    /// Saves the current view as the next free `screenshot_NNNN.png` in `dir`.
    pub fn save_screenshot(&mut self, dir: &Path) -> Result<PathBuf> {
        let (path, index) = next_screenshot_path(dir, self.next_screenshot);
        self.next_screenshot = index.saturating_add(1);
        let (width, height) = self.engine.dimensions();
        save_image(&path, self.capture()?, width, height)?;
        Ok(path)
    }
}

impl FrameTarget for Session {
    fn advance_controls(&mut self) -> bool {
        self.controls.update(&mut self.engine.camera)
    }

    fn draw(&mut self) -> RenderResult<()> {
        self.engine.render_frame(&self.mesh)
    }
}
