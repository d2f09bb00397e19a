//! Application window and event loop management.

mod input;

use std::path::PathBuf;
use std::sync::Arc;

use winit::event_loop::EventLoop;
use winit::window::Window;

use colorcube_core::{ColorCubeError, Options, Result};

use crate::frame_loop::FrameLoop;
use crate::scene::Scene;
use crate::session::Session;

/// The colorcube application state.
pub struct App {
    options: Options,
    /// Scene waiting for the window; moved into the session on resume.
    pending_scene: Option<Scene>,
    window: Option<Arc<Window>>,
    session: Option<Session>,
    frame_loop: FrameLoop,
    screenshot_dir: PathBuf,
    error: Option<ColorCubeError>,
}

impl App {
    /// Creates an application that will show `scene`.
    pub fn new(options: Options, scene: Scene) -> Self {
        Self {
            frame_loop: FrameLoop::new(options.max_fps),
            options,
            pending_scene: Some(scene),
            window: None,
            session: None,
            screenshot_dir: PathBuf::from("."),
            error: None,
        }
    }

    fn fail(&mut self, error: ColorCubeError) {
        self.error = Some(error);
        self.frame_loop.stop_handle().stop();
    }

    fn take_screenshot(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.save_screenshot(&self.screenshot_dir) {
            Ok(path) => log::info!("screenshot written to {}", path.display()),
            Err(error) => log::error!("screenshot failed: {error}"),
        }
    }
}

/// Opens the viewer window and blocks until it is closed.
pub fn run(options: Options, scene: Scene) -> Result<()> {
    let event_loop = EventLoop::new()
        .map_err(|e| ColorCubeError::RenderError(format!("failed to create event loop: {e}")))?;
    let mut app = App::new(options, scene);

    event_loop
        .run_app(&mut app)
        .map_err(|e| ColorCubeError::RenderError(format!("event loop error: {e}")))?;

    match app.error.take() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}
