//! Orbit camera and pinhole ray generation.

use bsp_trace::Ray;
use macroquad::prelude::*;
use nalgebra::{Point3, Vector3};

/// Simple orbit camera for scene navigation.
pub struct OrbitCamera {
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub target: Point3<f32>,
    /// Vertical field of view in radians.
    pub fov: f32,
    /// Multiplier for scroll wheel zoom
    pub zoom_speed: f32,
    /// Minimum distance from target
    pub min_distance: f32,
    /// Maximum distance from target
    pub max_distance: f32,
}

impl OrbitCamera {
    /// Creates a new orbit camera with the given configuration.
    pub fn new(distance: f32, yaw: f32, pitch: f32) -> Self {
        Self {
            distance,
            yaw,
            pitch,
            target: Point3::origin(),
            fov: std::f32::consts::FRAC_PI_3,
            zoom_speed: 5.0,
            min_distance: 10.0,
            max_distance: 200.0,
        }
    }

    /// Sets the zoom configuration (speed and distance limits).
    pub fn with_zoom(mut self, speed: f32, min: f32, max: f32) -> Self {
        self.zoom_speed = speed;
        self.min_distance = min;
        self.max_distance = max;
        self
    }

    /// Sets the camera target point.
    pub fn with_target(mut self, target: Point3<f32>) -> Self {
        self.target = target;
        self
    }

    /// Updates camera state from user input (mouse drag, scroll, arrow keys).
    ///
    /// Returns `true` if the pose changed, so callers can skip re-tracing
    /// a still frame.
    pub fn update(&mut self) -> bool {
        let before = (self.yaw, self.pitch, self.distance);

        // Mouse drag for rotation
        if is_mouse_button_down(MouseButton::Left) {
            let delta = mouse_delta_position();
            self.yaw -= delta.x * 2.0;
            self.pitch -= delta.y * 2.0;
        }

        // Clamp pitch to avoid gimbal lock
        self.pitch = self.pitch.clamp(-1.5, 1.5);

        // Mouse wheel for zoom
        let scroll = mouse_wheel().1;
        self.distance -= scroll * self.zoom_speed;
        self.distance = self.distance.clamp(self.min_distance, self.max_distance);

        // Arrow keys for rotation
        if is_key_down(KeyCode::Left) {
            self.yaw += 0.02;
        }
        if is_key_down(KeyCode::Right) {
            self.yaw -= 0.02;
        }
        if is_key_down(KeyCode::Up) {
            self.pitch += 0.02;
        }
        if is_key_down(KeyCode::Down) {
            self.pitch -= 0.02;
        }
        self.pitch = self.pitch.clamp(-1.5, 1.5);

        (self.yaw, self.pitch, self.distance) != before
    }

    /// Returns the camera's world position.
    pub fn position(&self) -> Point3<f32> {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vector3::new(x, y, z)
    }

    /// Builds the pinhole view for the current pose.
    pub fn view(&self, aspect: f32) -> ViewBasis {
        ViewBasis::new(self.position(), self.target, self.fov, aspect)
    }
}

/// Pinhole view frozen from a camera pose: an eye point plus the image
/// plane basis, turning pixel coordinates into rays.
pub struct ViewBasis {
    eye: Point3<f32>,
    forward: Vector3<f32>,
    right: Vector3<f32>,
    up: Vector3<f32>,
    half_width: f32,
    half_height: f32,
}

impl ViewBasis {
    /// Builds the basis for an eye looking at `target`. `fov` is the
    /// vertical field of view in radians.
    pub fn new(eye: Point3<f32>, target: Point3<f32>, fov: f32, aspect: f32) -> Self {
        let forward = (target - eye).normalize();
        let right = forward.cross(&Vector3::y()).normalize();
        let up = right.cross(&forward);
        let half_height = (fov * 0.5).tan();
        Self {
            eye,
            forward,
            right,
            up,
            half_width: half_height * aspect,
            half_height,
        }
    }

    /// Returns the ray through normalized screen coordinates: `(0, 0)` is
    /// the top left corner of the image, `(1, 1)` the bottom right.
    pub fn ray_at(&self, u: f32, v: f32) -> Ray {
        let direction = self.forward
            + self.right * ((2.0 * u - 1.0) * self.half_width)
            + self.up * ((1.0 - 2.0 * v) * self.half_height);
        Ray::new(self.eye, direction)
    }

    /// Projects a world point back onto the screen, the inverse of
    /// [`ViewBasis::ray_at`]. Returns `None` for points at or behind the
    /// eye plane.
    pub fn project(&self, point: Point3<f32>, width: f32, height: f32) -> Option<Vec2> {
        let offset = point - self.eye;
        let depth = offset.dot(&self.forward);
        if depth <= 1e-4 {
            return None;
        }

        let u = 0.5 * (offset.dot(&self.right) / (depth * self.half_width) + 1.0);
        let v = 0.5 * (1.0 - offset.dot(&self.up) / (depth * self.half_height));
        Some(vec2(u * width, v * height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_ray_points_at_target() {
        let eye = Point3::new(0.0, 0.0, 10.0);
        let view = ViewBasis::new(eye, Point3::origin(), std::f32::consts::FRAC_PI_3, 1.0);

        let ray = view.ray_at(0.5, 0.5);
        assert_eq!(ray.origin, eye);
        assert!((ray.direction.normalize() - Vector3::new(0.0, 0.0, -1.0)).norm() < 1e-5);
    }

    #[test]
    fn corner_rays_are_symmetric() {
        let view = ViewBasis::new(
            Point3::new(0.0, 0.0, 10.0),
            Point3::origin(),
            std::f32::consts::FRAC_PI_3,
            1.0,
        );

        let top_left = view.ray_at(0.0, 0.0).direction;
        let bottom_right = view.ray_at(1.0, 1.0).direction;
        assert!((top_left.x + bottom_right.x).abs() < 1e-5);
        assert!((top_left.y + bottom_right.y).abs() < 1e-5);
        assert!((top_left.z - bottom_right.z).abs() < 1e-5);
    }

    #[test]
    fn orbit_position_respects_distance() {
        let camera = OrbitCamera::new(50.0, 0.3, 0.4);
        let offset = camera.position() - camera.target;
        assert!((offset.norm() - 50.0).abs() < 1e-3);
    }

    #[test]
    fn project_inverts_ray_at() {
        let view = ViewBasis::new(
            Point3::new(2.0, 3.0, 10.0),
            Point3::new(0.0, 1.0, 0.0),
            std::f32::consts::FRAC_PI_3,
            1.5,
        );

        let ray = view.ray_at(0.3, 0.7);
        let screen = view.project(ray.at(5.0), 320.0, 240.0).unwrap();
        assert!((screen.x - 0.3 * 320.0).abs() < 1e-2);
        assert!((screen.y - 0.7 * 240.0).abs() < 1e-2);
    }

    #[test]
    fn project_rejects_points_behind_eye() {
        let view = ViewBasis::new(
            Point3::new(0.0, 0.0, 10.0),
            Point3::origin(),
            std::f32::consts::FRAC_PI_3,
            1.0,
        );
        assert!(view.project(Point3::new(0.0, 0.0, 20.0), 320.0, 240.0).is_none());
    }
}
