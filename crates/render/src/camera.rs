use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use thicket_input::{CursorTracker, MovementInput};

/// Camera tuning. Angles are in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Field of view. Also the width of the cone `is_in_field_of_view`
    /// accepts.
    pub fov: f32,
    /// Far plane, and the radius everything else culls against.
    pub render_distance: f32,
    /// Ground speed in units per second.
    pub speed: f32,
    /// Degrees of rotation per pixel of cursor travel.
    pub sensitivity: f32,
    pub eye_height: f32,
    pub near: f32,
    pub screen_width: u32,
    pub screen_height: u32,
    pub initial_yaw: f32,
    pub initial_pitch: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 55.0,
            render_distance: 70.0,
            speed: 7.0,
            sensitivity: 0.05,
            eye_height: 3.0,
            near: 0.1,
            screen_width: 1600,
            screen_height: 900,
            initial_yaw: 0.0,
            initial_pitch: -32.0,
        }
    }
}

const PITCH_LIMIT: f32 = 89.0;

/// First-person camera pinned to a flat ground at eye height.
///
/// Movement uses a horizontal copy of the look direction so looking up or
/// down never changes ground speed.
#[derive(Debug, Clone)]
pub struct Camera {
    config: CameraConfig,
    position: Vec3,
    front: Vec3,
    horizontal_front: Vec3,
    yaw: f32,
    pitch: f32,
    cursor: CursorTracker,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}

impl Camera {
    pub fn new(config: CameraConfig) -> Self {
        let mut camera = Self {
            position: Vec3::new(0.0, config.eye_height, 0.0),
            front: Vec3::X,
            horizontal_front: Vec3::X,
            yaw: config.initial_yaw,
            pitch: config.initial_pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            cursor: CursorTracker::new(),
            config,
        };
        camera.recompute_front();
        camera
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Place the camera on the ground plane; y is forced to eye height.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = Vec3::new(position.x, self.config.eye_height, position.z);
    }

    /// Unit look direction.
    pub fn front(&self) -> Vec3 {
        self.front
    }

    /// Look direction projected onto the ground plane, unit length.
    pub fn horizontal_front(&self) -> Vec3 {
        self.horizontal_front
    }

    pub fn right(&self) -> Vec3 {
        self.horizontal_front.cross(Vec3::Y).normalize()
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn render_distance(&self) -> f32 {
        self.config.render_distance
    }

    pub fn aspect(&self) -> f32 {
        self.config.screen_width as f32 / self.config.screen_height.max(1) as f32
    }

    pub fn set_screen_size(&mut self, width: u32, height: u32) {
        self.config.screen_width = width;
        self.config.screen_height = height;
        tracing::debug!(width, height, aspect = self.aspect(), "camera viewport resized");
    }

    /// Walk along the horizontal front and right vectors.
    pub fn apply_movement_input(&mut self, keys: MovementInput, dt: f32) {
        let mut velocity = self.config.speed * dt;
        if keys.sprint {
            velocity *= 2.0;
        }

        let right = self.right();
        if keys.forward {
            self.position += self.horizontal_front * velocity;
        }
        if keys.backward {
            self.position -= self.horizontal_front * velocity;
        }
        if keys.left {
            self.position -= right * velocity;
        }
        if keys.right {
            self.position += right * velocity;
        }

        self.position.y = self.config.eye_height;
    }

    /// Rotate by raw pointer deltas. Positive `dy` looks up.
    pub fn apply_look_input(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.config.sensitivity;
        self.pitch = (self.pitch + dy * self.config.sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.recompute_front();
    }

    /// Feed an absolute cursor position. The first sample only seeds the
    /// tracker.
    pub fn track_cursor(&mut self, position: Vec2) {
        let delta = self.cursor.delta(position);
        if delta != Vec2::ZERO {
            // Window y grows downward; pitch grows upward.
            self.apply_look_input(delta.x, -delta.y);
        }
    }

    /// Forget the cursor reference, e.g. after the window regains focus.
    pub fn reset_cursor(&mut self) {
        self.cursor.reset();
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.config.fov.to_radians(),
            self.aspect(),
            self.config.near,
            self.config.render_distance,
        )
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Signed horizontal angle in degrees between the look direction and the
    /// direction toward `target`, in (-180, 180].
    pub fn angle_to_target(&self, target: Vec3) -> f32 {
        let to_target = target - self.position;
        if to_target.x.abs() <= f32::EPSILON && to_target.z.abs() <= f32::EPSILON {
            return 0.0;
        }
        let front_angle = self.front.z.atan2(self.front.x);
        let target_angle = to_target.z.atan2(to_target.x);
        wrap_degrees((front_angle - target_angle).to_degrees())
    }

    pub fn half_fov(&self) -> f32 {
        self.config.fov * 0.5
    }

    /// True when `target` is within half the fov of the view direction on the
    /// ground plane, or closer than `tolerance` so large neighbours are never
    /// culled away.
    pub fn is_in_field_of_view(&self, target: Vec3, tolerance: f32) -> bool {
        self.angle_to_target(target).abs() < self.half_fov()
            || self.position.distance(target) < tolerance
    }

    pub fn is_within_render_distance(&self, target: Vec3, tolerance: f32) -> bool {
        self.position.distance(target) < self.config.render_distance + tolerance
    }

    fn recompute_front(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        let direction = Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos());
        self.front = direction.normalize();
        self.horizontal_front = Vec3::new(direction.x, 0.0, direction.z).normalize();
    }
}

fn wrap_degrees(mut angle: f32) -> f32 {
    while angle <= -180.0 {
        angle += 360.0;
    }
    while angle > 180.0 {
        angle -= 360.0;
    }
    angle
}
