//! Camera and view management.

use glam::{Mat4, Vec3};

use colorcube_core::CameraConfig;

/// Smallest camera-to-target distance reachable by zooming.
pub const MIN_DISTANCE: f32 = 0.1;

/// Margin keeping the polar angle away from the poles, in radians.
const POLE_MARGIN: f32 = 0.01;

/// A perspective camera orbiting a target point.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space.
    pub position: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Up vector.
    pub up: Vec3,
    /// Field of view in radians.
    pub fov: f32,
    /// Aspect ratio (width / height).
    pub aspect_ratio: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
}

impl Camera {
    /// Creates a new camera with default settings.
    #[must_use]
    pub fn new(aspect_ratio: f32) -> Self {
        Self::from_config(&CameraConfig::default(), aspect_ratio)
    }

    /// Creates a camera from its configuration.
    #[must_use]
    pub fn from_config(config: &CameraConfig, aspect_ratio: f32) -> Self {
        Self {
            position: config.position,
            target: config.target,
            up: Vec3::Y,
            fov: config.fov_degrees.to_radians(),
            aspect_ratio,
            near: config.near,
            far: config.far,
        }
    }

    /// Sets the aspect ratio.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }

    /// Returns the view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Returns the projection matrix.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect_ratio, self.near, self.far)
    }

    /// Returns the combined view-projection matrix.
    #[must_use]
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Returns the camera's forward direction.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize()
    }

    /// Returns the camera's right direction.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.forward().cross(self.up).normalize()
    }

    /// Returns the camera's screen-space up direction.
    #[must_use]
    pub fn screen_up(&self) -> Vec3 {
        self.right().cross(self.forward()).normalize()
    }

    /// Distance from the camera to its target.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }

    /// Orbits the camera around the target.
    ///
    /// `delta_x` turns around the up axis, `delta_y` tilts toward the poles;
    /// both in radians. The distance to the target is preserved.
    pub fn orbit(&mut self, delta_x: f32, delta_y: f32) {
        let offset = self.position - self.target;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return;
        }
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        theta -= delta_x;
        phi = (phi - delta_y).clamp(POLE_MARGIN, std::f32::consts::PI - POLE_MARGIN);

        self.position = self.target
            + Vec3::new(
                radius * phi.sin() * theta.sin(),
                radius * phi.cos(),
                radius * phi.sin() * theta.cos(),
            );
    }

    /// Pans the camera and its target together.
    pub fn pan(&mut self, delta_x: f32, delta_y: f32) {
        let offset = self.right() * delta_x + self.screen_up() * delta_y;
        self.position += offset;
        self.target += offset;
    }

    /// Moves toward (positive `delta`) or away from the target, never closer
    /// than [`MIN_DISTANCE`].
    pub fn zoom(&mut self, delta: f32) {
        let direction = self.forward();
        let new_distance = (self.distance() - delta).max(MIN_DISTANCE);
        self.position = self.target - direction * new_distance;
    }

    /// Places the camera so the given bounding box fills the view.
    pub fn look_at_box(&mut self, min: Vec3, max: Vec3) {
        let center = (min + max) * 0.5;
        let radius = ((max - min).length() * 0.5).max(MIN_DISTANCE);
        let distance = radius / (self.fov * 0.5).sin();
        let direction = (self.position - self.target).normalize_or(Vec3::Z);

        self.target = center;
        self.position = center + direction * distance;
    }

    /// Sets the field of view in radians.
    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov.clamp(0.1, std::f32::consts::PI - 0.1);
    }

    /// Returns FOV in degrees.
    #[must_use]
    pub fn fov_degrees(&self) -> f32 {
        self.fov.to_degrees()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(1.0)
    }
}
