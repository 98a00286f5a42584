use glam::{Mat4, Vec3, Vec4};

use super::camera::Camera3D;

/// Anything closer to the eye than this (in clip-space w) is not drawn
const MIN_DEPTH: f32 = 0.1;

/// A world point mapped onto the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
    /// Distance along the view axis; larger is farther away
    pub depth: f32,
}

/// Maps world space onto canvas space.
///
/// Canvas space spans `[-aspect, aspect]` horizontally and `[-1, 1]`
/// vertically, so one unit is the same physical length on both axes.
#[derive(Debug, Clone)]
pub struct Projector {
    view_projection: Mat4,
    aspect: f32,
    /// `1 / tan(fovy / 2)`, the projection's vertical scale
    focal: f32,
}

impl Projector {
    pub fn new(camera: &Camera3D, aspect: f32) -> Self {
        let aspect = if aspect.is_finite() && aspect > 0.0 {
            aspect
        } else {
            1.0
        };
        Self {
            view_projection: camera.view_projection(aspect),
            aspect,
            focal: 1.0 / (camera.fovy.to_radians() * 0.5).tan(),
        }
    }

    pub fn x_bounds(&self) -> [f64; 2] {
        [-self.aspect as f64, self.aspect as f64]
    }

    pub fn y_bounds(&self) -> [f64; 2] {
        [-1.0, 1.0]
    }

    fn clip(&self, point: Vec3) -> Vec4 {
        self.view_projection * point.extend(1.0)
    }

    fn to_screen(&self, clip: Vec4) -> ScreenPoint {
        ScreenPoint {
            x: (clip.x / clip.w * self.aspect) as f64,
            y: (clip.y / clip.w) as f64,
            depth: clip.w,
        }
    }

    /// Project a point, or `None` if it is behind the camera
    pub fn project(&self, point: Vec3) -> Option<ScreenPoint> {
        let clip = self.clip(point);
        (clip.w > MIN_DEPTH).then(|| self.to_screen(clip))
    }

    /// Project a segment, trimming the part behind the camera
    pub fn project_line(&self, a: Vec3, b: Vec3) -> Option<(ScreenPoint, ScreenPoint)> {
        let mut ca = self.clip(a);
        let mut cb = self.clip(b);

        match (ca.w > MIN_DEPTH, cb.w > MIN_DEPTH) {
            (false, false) => return None,
            (true, false) => {
                let t = (MIN_DEPTH - ca.w) / (cb.w - ca.w);
                cb = ca.lerp(cb, t);
            }
            (false, true) => {
                let t = (MIN_DEPTH - cb.w) / (ca.w - cb.w);
                ca = cb.lerp(ca, t);
            }
            (true, true) => {}
        }

        Some((self.to_screen(ca), self.to_screen(cb)))
    }

    /// On-canvas radius of a sphere of `radius` world units seen at `point`
    pub fn radius(&self, radius: f32, point: &ScreenPoint) -> f64 {
        (radius * self.focal / point.depth) as f64
    }
}
