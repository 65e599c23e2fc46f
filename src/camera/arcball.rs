use glam::{Mat4, Vec2, Vec3};

/// Below this, `|a × b| / (|a| |b|)` is treated as parallel.
const PARALLEL_EPSILON: f32 = 1e-6;

/// Virtual trackball turning 2D pointer motion into a 3D rotation.
///
/// Pointer positions are projected onto a sphere of `radius` centered in
/// the tracked extent: the offset from the center becomes `x, y` directly
/// and `z` is lifted onto the sphere (zero outside it). Dragging from the
/// anchor to the current point rotates by the angle between the two
/// sphere vectors about their common normal.
#[derive(Debug, Clone)]
pub struct ArcBall {
    center: Vec2,
    radius: f32,
    start_point: Vec2,
    start_vector: Vec3,
    transform: Mat4,
}

impl ArcBall {
    /// Trackball covering a `width` x `height` area.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        let mut arcball = Self {
            center: Vec2::ZERO,
            radius: 1.0,
            start_point: Vec2::ZERO,
            start_vector: Vec3::Z,
            transform: Mat4::IDENTITY,
        };
        arcball.initialize(width, height);
        arcball
    }

    /// Re-center on a `width` x `height` area and drop any rotation.
    pub fn initialize(&mut self, width: f32, height: f32) {
        self.center = Vec2::new(width, height) * 0.5;
        self.radius = width.min(height) * 0.5;
        self.start_point = self.center;
        self.start_vector = self.sphere_vector(self.center);
        self.transform = Mat4::IDENTITY;
    }

    /// Project a pointer position onto the trackball sphere.
    #[must_use]
    pub fn sphere_vector(&self, point: Vec2) -> Vec3 {
        let offset = point - self.center;
        let lift = self.radius * self.radius - offset.length_squared();
        Vec3::new(offset.x, offset.y, lift.max(0.0).sqrt())
    }

    /// Anchor a drag at `point`.
    pub fn mouse_down(&mut self, point: Vec2) {
        self.start_point = point;
        self.start_vector = self.sphere_vector(point);
    }

    /// Recompute the transform as the rotation carrying the anchor vector
    /// onto the vector under `point`.
    pub fn mouse_move(&mut self, point: Vec2) {
        let current = self.sphere_vector(point);
        self.transform = rotation_between(self.start_vector, current);
    }

    /// Rotation produced by the most recent drag.
    #[must_use]
    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    /// Pointer position of the current anchor.
    #[must_use]
    pub fn start_point(&self) -> Vec2 {
        self.start_point
    }

    /// Trackball sphere radius.
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.radius
    }
}

/// Rotation taking the direction of `from` onto the direction of `to`.
///
/// Zero-length inputs and parallel vectors give the identity; exactly
/// opposite vectors give a half turn about an arbitrary axis
/// perpendicular to `from`.
#[must_use]
pub fn rotation_between(from: Vec3, to: Vec3) -> Mat4 {
    let lengths = from.length() * to.length();
    if !lengths.is_finite() || lengths <= f32::EPSILON {
        return Mat4::IDENTITY;
    }

    let cos_angle = (from.dot(to) / lengths).clamp(-1.0, 1.0);
    let axis = from.cross(to);

    if axis.length() / lengths < PARALLEL_EPSILON {
        if cos_angle > 0.0 {
            return Mat4::IDENTITY;
        }
        let perpendicular = from.normalize().any_orthonormal_vector();
        return Mat4::from_axis_angle(perpendicular, std::f32::consts::PI);
    }

    Mat4::from_axis_angle(axis.normalize(), cos_angle.acos())
}
