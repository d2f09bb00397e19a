use std::sync::Arc;

use pollster::FutureExt;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseScrollDelta, StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use colorcube_core::ColorCubeError;
use colorcube_render::{PointerButton, RenderEngine};

use super::App;
use crate::frame_loop::FrameStatus;
use crate::session::Session;

impl App {
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        match self.frame_loop.tick(session) {
            Ok(FrameStatus::Rendered | FrameStatus::Skipped) => {
                event_loop.set_control_flow(ControlFlow::Wait);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            Ok(FrameStatus::Throttled { until }) => {
                event_loop.set_control_flow(ControlFlow::WaitUntil(until));
            }
            Ok(FrameStatus::Suspended) => event_loop.set_control_flow(ControlFlow::Wait),
            Ok(FrameStatus::Stopped) => {}
            Err(error) => self.fail(error.into()),
        }
    }
}

impl ApplicationHandler for App {
    fn new_events(&mut self, _event_loop: &ActiveEventLoop, cause: StartCause) {
        if let StartCause::ResumeTimeReached { .. } = cause {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let Some(scene) = self.pending_scene.take() else {
            return;
        };

        let window_attributes = Window::default_attributes()
            .with_title(self.options.title.clone())
            .with_inner_size(LogicalSize::new(
                self.options.window_width,
                self.options.window_height,
            ));

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .expect("failed to create window"),
        );

        let session = RenderEngine::new_windowed(window.clone())
            .block_on()
            .map_err(ColorCubeError::from)
            .and_then(|engine| Session::new(engine, &scene));

        match session {
            Ok(session) => {
                self.session = Some(session);
                window.request_redraw();
                self.window = Some(window);
            }
            Err(error) => {
                self.fail(error);
                event_loop.exit();
            }
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.frame_loop.stop_handle().stop();
            }
            WindowEvent::Resized(size) => {
                let minimized = size.width == 0 || size.height == 0;
                let was_suspended = self.frame_loop.is_suspended();
                self.frame_loop.set_suspended(minimized);
                if minimized {
                    log::debug!("window minimized, pausing redraws");
                } else if let Some(session) = &mut self.session {
                    session.resize(size.width, size.height);
                    if was_suspended {
                        if let Some(window) = &self.window {
                            window.request_redraw();
                        }
                    }
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(session) = &mut self.session {
                    session
                        .controls_mut()
                        .pointer_moved(position.x as f32, position.y as f32);
                }
            }
            WindowEvent::CursorLeft { .. } => {
                if let Some(session) = &mut self.session {
                    session.controls_mut().pointer_left();
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let (Some(session), Some(button)) =
                    (&mut self.session, PointerButton::from_winit(button))
                else {
                    return;
                };
                match state {
                    ElementState::Pressed => session.controls_mut().pointer_down(button),
                    ElementState::Released => session.controls_mut().pointer_up(button),
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                if let Some(session) = &mut self.session {
                    let lines = match delta {
                        MouseScrollDelta::LineDelta(_, y) => y,
                        MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.1,
                    };
                    session.controls_mut().wheel(lines);
                }
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                if let Some(session) = &mut self.session {
                    session.controls_mut().set_shift(modifiers.state().shift_key());
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                match event.physical_key {
                    PhysicalKey::Code(KeyCode::Escape) => self.frame_loop.stop_handle().stop(),
                    PhysicalKey::Code(KeyCode::F12) => {
                        log::info!("Screenshot requested (F12)");
                        self.take_screenshot();
                    }
                    _ => {}
                }
            }
            _ => {}
        }

        if self.frame_loop.is_stopped() {
            event_loop.exit();
        }
    }
}
