//! The per-refresh unit of work.
//!
//! The host (a winit event loop, a headless driver, a test) calls
//! [`FrameLoop::tick`] once per display refresh. Each tick advances the
//! camera controls and draws exactly one frame, unless the loop was stopped
//! or the frame rate cap says to wait.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use colorcube_render::RenderResult;

/// Something the frame loop can drive.
pub trait FrameTarget {
    /// Applies accumulated input to the camera. Returns true if it moved.
    fn advance_controls(&mut self) -> bool;

    /// Draws the current scene from the current camera.
    fn draw(&mut self) -> RenderResult<()>;
}

/// Outcome of one [`FrameLoop::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// A frame was drawn.
    Rendered,
    /// The surface was not ready; it has been reconfigured and the frame
    /// dropped.
    Skipped,
    /// Too early for the next frame under the frame rate cap.
    Throttled {
        /// When the next frame is due.
        until: Instant,
    },
    /// The output has zero area (a minimized window); nothing was drawn
    /// and no redraw should be requested until it is resized.
    Suspended,
    /// The loop was stopped; nothing was drawn.
    Stopped,
}

/// Cancels a [`FrameLoop`] from anywhere, including other threads.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    /// Stops the loop. Every later tick returns [`FrameStatus::Stopped`].
    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether [`stop`](Self::stop) has been called.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Drives a [`FrameTarget`] one frame at a time.
#[derive(Debug)]
pub struct FrameLoop {
    stop: StopHandle,
    min_frame_time: Option<Duration>,
    last_frame: Option<Instant>,
    suspended: bool,
    frames_rendered: u64,
    frames_skipped: u64,
}

impl FrameLoop {
    /// Creates a loop capped at `max_fps` frames per second (0 = uncapped).
    #[must_use]
    pub fn new(max_fps: u32) -> Self {
        Self {
            stop: StopHandle::default(),
            min_frame_time: (max_fps > 0)
                .then(|| Duration::from_secs_f64(1.0 / f64::from(max_fps))),
            last_frame: None,
            suspended: false,
            frames_rendered: 0,
            frames_skipped: 0,
        }
    }

    /// A handle that stops this loop.
    #[must_use]
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Whether the loop has been stopped.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stop.is_stopped()
    }

    /// Pauses drawing while the output has no area, or resumes it.
    pub fn set_suspended(&mut self, suspended: bool) {
        self.suspended = suspended;
    }

    /// Whether drawing is paused.
    #[must_use]
    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Frames drawn so far.
    #[must_use]
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Frames dropped because the surface was not ready.
    #[must_use]
    pub fn frames_skipped(&self) -> u64 {
        self.frames_skipped
    }

    /// Renders one frame into `target`.
    ///
    /// Transient surface errors skip the frame. Any other render error is
    /// returned and stops the loop.
    pub fn tick<T: FrameTarget>(&mut self, target: &mut T) -> RenderResult<FrameStatus> {
        self.tick_at(target, Instant::now())
    }

    fn tick_at<T: FrameTarget>(&mut self, target: &mut T, now: Instant) -> RenderResult<FrameStatus> {
        if self.is_stopped() {
            return Ok(FrameStatus::Stopped);
        }
        if self.suspended {
            return Ok(FrameStatus::Suspended);
        }

        if let (Some(min), Some(last)) = (self.min_frame_time, self.last_frame) {
            let due = last + min;
            if now < due {
                return Ok(FrameStatus::Throttled { until: due });
            }
        }

        target.advance_controls();

        match target.draw() {
            Ok(()) => {
                self.last_frame = Some(now);
                self.frames_rendered += 1;
                Ok(FrameStatus::Rendered)
            }
            Err(error) if error.is_transient() => {
                log::warn!("skipping frame: {error}");
                self.frames_skipped += 1;
                Ok(FrameStatus::Skipped)
            }
            Err(error) => {
                self.stop.stop();
                Err(error)
            }
        }
    }
}
