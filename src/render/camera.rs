use glam::{Mat4, Vec3};

const START_DISTANCE: f32 = 20.0;
const START_HEIGHT: f32 = 12.0;
const MIN_DISTANCE: f32 = 18.0;
const MAX_DISTANCE: f32 = 30.0;
const DISTANCE_PER_SEGMENT: f32 = 0.4;
/// Yaw of the camera around the head, chosen so the arrow keys match the view
const YAW_DEGREES: f32 = 135.0;
const FOVY_DEGREES: f32 = 45.0;
/// Fraction of the remaining gap closed each frame
const SMOOTHING: f32 = 0.05;

const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 200.0;

/// A perspective camera snapshot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera3D {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fovy: f32,
}

impl Camera3D {
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fovy.to_radians(), aspect, NEAR_PLANE, FAR_PLANE)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection(aspect) * self.view()
    }
}

/// Chase camera that trails the snake's head and pulls back as it grows
#[derive(Debug, Clone)]
pub struct CameraController {
    camera: Camera3D,
    distance: f32,
}

impl CameraController {
    pub fn new() -> Self {
        Self {
            camera: Camera3D {
                position: Vec3::new(START_DISTANCE, START_HEIGHT, START_DISTANCE),
                target: Vec3::ZERO,
                up: Vec3::Y,
                fovy: FOVY_DEGREES,
            },
            distance: START_DISTANCE,
        }
    }

    /// Ease toward the follow position for a head at `head` with
    /// `extra_len` segments grown so far. Called once per frame.
    pub fn update(&mut self, head: Vec3, extra_len: usize) {
        let desired = (MIN_DISTANCE + DISTANCE_PER_SEGMENT * extra_len as f32).min(MAX_DISTANCE);
        self.distance = self.distance * (1.0 - SMOOTHING) + desired * SMOOTHING;

        self.camera.target = head;

        let yaw = YAW_DEGREES.to_radians();
        let goal = Vec3::new(
            head.x + self.distance * yaw.cos(),
            self.distance * 0.6,
            head.z + self.distance * yaw.sin(),
        );
        self.camera.position = self.camera.position.lerp(goal, SMOOTHING);
    }

    pub fn camera(&self) -> Camera3D {
        self.camera
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new()
    }
}
