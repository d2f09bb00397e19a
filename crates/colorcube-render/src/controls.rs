//! Orbit controls driven by pointer input.
//!
//! Input events only accumulate deltas; [`OrbitControls::update`] applies
//! them to a [`Camera`] once per frame.

use glam::Vec2;

use crate::camera::Camera;

/// Pointer buttons the controls react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Left button: rotate (pan with shift held).
    Primary,
    /// Middle button: dolly.
    Middle,
    /// Right button: pan.
    Secondary,
}

impl PointerButton {
    /// Maps a winit mouse button, ignoring buttons without a binding.
    #[must_use]
    pub fn from_winit(button: winit::event::MouseButton) -> Option<Self> {
        match button {
            winit::event::MouseButton::Left => Some(Self::Primary),
            winit::event::MouseButton::Middle => Some(Self::Middle),
            winit::event::MouseButton::Right => Some(Self::Secondary),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragMode {
    Rotate,
    Pan,
    Dolly,
}

/// Accumulates pointer input and turns it into camera motion.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    /// Whether input is applied at all.
    pub enabled: bool,
    /// Radians of rotation per pixel dragged.
    pub rotate_speed: f32,
    /// Multiplier on the world distance under one dragged pixel.
    pub pan_speed: f32,
    /// Fraction of the target distance moved per wheel line.
    pub zoom_speed: f32,
    viewport: Vec2,
    cursor: Option<Vec2>,
    drag: Option<DragMode>,
    shift: bool,
    rotate_delta: Vec2,
    pan_delta: Vec2,
    dolly_delta: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            enabled: true,
            rotate_speed: 0.01,
            pan_speed: 1.0,
            zoom_speed: 0.1,
            viewport: Vec2::ONE,
            cursor: None,
            drag: None,
            shift: false,
            rotate_delta: Vec2::ZERO,
            pan_delta: Vec2::ZERO,
            dolly_delta: 0.0,
        }
    }
}

impl OrbitControls {
    /// Creates controls for a viewport of the given size in pixels.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(width: u32, height: u32) -> Self {
        let mut controls = Self::default();
        controls.set_viewport(width, height);
        controls
    }

    /// Updates the viewport size used to scale panning.
    #[allow(clippy::cast_precision_loss)]
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = Vec2::new(width.max(1) as f32, height.max(1) as f32);
    }

    /// Records whether shift is held.
    pub fn set_shift(&mut self, shift: bool) {
        self.shift = shift;
    }

    /// Starts a drag.
    pub fn pointer_down(&mut self, button: PointerButton) {
        self.drag = Some(match button {
            PointerButton::Primary if self.shift => DragMode::Pan,
            PointerButton::Primary => DragMode::Rotate,
            PointerButton::Middle => DragMode::Dolly,
            PointerButton::Secondary => DragMode::Pan,
        });
    }

    /// Ends the drag started by `button`.
    pub fn pointer_up(&mut self, button: PointerButton) {
        let ends = matches!(
            (button, self.drag),
            (PointerButton::Primary, Some(DragMode::Rotate | DragMode::Pan))
                | (PointerButton::Middle, Some(DragMode::Dolly))
                | (PointerButton::Secondary, Some(DragMode::Pan))
        );
        if ends {
            self.drag = None;
        }
    }

    /// Records a cursor position in pixels.
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        let position = Vec2::new(x, y);
        let delta = self.cursor.map_or(Vec2::ZERO, |last| position - last);
        self.cursor = Some(position);

        match self.drag {
            Some(DragMode::Rotate) => self.rotate_delta += delta,
            Some(DragMode::Pan) => self.pan_delta += delta,
            Some(DragMode::Dolly) => self.dolly_delta -= delta.y * 0.1,
            None => {}
        }
    }

    /// The pointer left the surface.
    pub fn pointer_left(&mut self) {
        self.cursor = None;
    }

    /// Records wheel motion in lines; positive scrolls toward the target.
    pub fn wheel(&mut self, lines: f32) {
        self.dolly_delta += lines;
    }

    /// Whether input is waiting to be applied.
    #[must_use]
    pub fn has_pending_input(&self) -> bool {
        self.rotate_delta != Vec2::ZERO || self.pan_delta != Vec2::ZERO || self.dolly_delta != 0.0
    }

    /// Applies accumulated input to `camera`. Returns true if it moved.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        if !self.enabled || !self.has_pending_input() {
            self.clear_pending();
            return false;
        }

        if self.rotate_delta != Vec2::ZERO {
            let delta = self.rotate_delta * self.rotate_speed;
            camera.orbit(delta.x, delta.y);
        }

        if self.pan_delta != Vec2::ZERO {
            // World size of one pixel at the target's depth.
            let world_per_pixel =
                2.0 * camera.distance() * (camera.fov * 0.5).tan() / self.viewport.y;
            let delta = self.pan_delta * world_per_pixel * self.pan_speed;
            camera.pan(-delta.x, delta.y);
        }

        if self.dolly_delta != 0.0 {
            camera.zoom(self.dolly_delta * self.zoom_speed * camera.distance());
        }

        self.clear_pending();
        true
    }

    fn clear_pending(&mut self) {
        self.rotate_delta = Vec2::ZERO;
        self.pan_delta = Vec2::ZERO;
        self.dolly_delta = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn drag(controls: &mut OrbitControls, button: PointerButton, from: Vec2, to: Vec2) {
        controls.pointer_moved(from.x, from.y);
        controls.pointer_down(button);
        controls.pointer_moved(to.x, to.y);
        controls.pointer_up(button);
    }

    #[test]
    fn test_no_input_no_motion() {
        let mut controls = OrbitControls::new(600, 600);
        let mut camera = Camera::new(1.0);
        controls.pointer_moved(10.0, 10.0);
        controls.pointer_moved(50.0, 80.0);
        assert!(!controls.update(&mut camera));
        assert_eq!(camera.position, Vec3::splat(2.0));
    }

    #[test]
    fn test_rotate_keeps_distance() {
        let mut controls = OrbitControls::new(600, 600);
        let mut camera = Camera::new(1.0);
        let distance = camera.distance();
        drag(&mut controls, PointerButton::Primary, Vec2::ZERO, Vec2::new(40.0, -25.0));
        assert!(controls.update(&mut camera));
        assert!((camera.distance() - distance).abs() < 1e-4);
        assert_ne!(camera.position, Vec3::splat(2.0));
        assert!(!controls.has_pending_input());
    }

    #[test]
    fn test_shift_drag_pans() {
        let mut controls = OrbitControls::new(600, 600);
        let mut camera = Camera::new(1.0);
        controls.set_shift(true);
        drag(&mut controls, PointerButton::Primary, Vec2::ZERO, Vec2::new(30.0, 0.0));
        controls.update(&mut camera);
        assert_ne!(camera.target, Vec3::splat(0.5));
    }

    #[test]
    fn test_right_drag_pans() {
        let mut controls = OrbitControls::new(600, 600);
        let mut camera = Camera::new(1.0);
        let offset = camera.position - camera.target;
        drag(&mut controls, PointerButton::Secondary, Vec2::ZERO, Vec2::new(0.0, 60.0));
        controls.update(&mut camera);
        assert!(((camera.position - camera.target) - offset).length() < 1e-5);
        assert_ne!(camera.target, Vec3::splat(0.5));
    }

    #[test]
    fn test_wheel_zooms_in_without_passing_target() {
        let mut controls = OrbitControls::new(600, 600);
        let mut camera = Camera::new(1.0);
        let initial = camera.distance();
        controls.wheel(1.0);
        controls.update(&mut camera);
        assert!(camera.distance() < initial);

        for _ in 0..200 {
            controls.wheel(50.0);
            controls.update(&mut camera);
        }
        assert!(camera.distance() >= crate::camera::MIN_DISTANCE - 1e-5);
        assert!((camera.position - camera.target).dot(Vec3::ONE) > 0.0);
    }

    #[test]
    fn test_disabled_controls_drop_input() {
        let mut controls = OrbitControls::new(600, 600);
        let mut camera = Camera::new(1.0);
        controls.enabled = false;
        controls.wheel(3.0);
        assert!(!controls.update(&mut camera));
        controls.enabled = true;
        assert!(!controls.update(&mut camera));
    }

    #[test]
    fn test_pointer_buttons_from_winit() {
        use winit::event::MouseButton;
        assert_eq!(PointerButton::from_winit(MouseButton::Left), Some(PointerButton::Primary));
        assert_eq!(PointerButton::from_winit(MouseButton::Middle), Some(PointerButton::Middle));
        assert_eq!(PointerButton::from_winit(MouseButton::Right), Some(PointerButton::Secondary));
        assert_eq!(PointerButton::from_winit(MouseButton::Back), None);
    }
}
