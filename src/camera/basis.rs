use std::f32::consts::FRAC_PI_2;

use glam::Vec3;

use crate::control::ControlState;

/// Which half of a stereo pair is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Eye {
    /// Eye 0: camera shifted by `-parallax` along x.
    Left,
    /// Eye 1: camera shifted by `+parallax` along x.
    Right,
}

impl Eye {
    /// Both eyes in dispatch order.
    pub const BOTH: [Eye; 2] = [Eye::Left, Eye::Right];

    /// Dispatch index (0 or 1).
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }

    /// Sign applied to the parallax offset for this eye.
    #[must_use]
    pub fn parallax_sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

/// Screen-space basis derived from camera and focus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    /// `focus - camera`.
    pub view: Vec3,
    /// Perpendicular to `view`, same length.
    pub top: Vec3,
    /// Perpendicular to both, scaled to `top`'s length.
    pub side: Vec3,
}

impl CameraBasis {
    /// Derive the basis for a camera looking at `focus`.
    ///
    /// `top` is `view` with its polar angle advanced by a quarter turn.
    /// When `camera == focus` every vector is zero.
    #[must_use]
    pub fn derive(camera: Vec3, focus: Vec3) -> Self {
        let view = focus - camera;
        let mut spherical = to_spherical(view);
        spherical.z += FRAC_PI_2;
        let top = to_rectangular(spherical);
        let side = view.cross(top).normalize_or_zero() * top.length();
        Self { view, top, side }
    }
}

/// Rectangular to `(radius, azimuth, polar)`.
///
/// `atan2(0, 0)` is 0, so the zero vector maps to the zero triple.
#[must_use]
pub fn to_spherical(v: Vec3) -> Vec3 {
    Vec3::new(
        v.length(),
        v.y.atan2(v.x),
        v.x.hypot(v.y).atan2(v.z),
    )
}

/// `(radius, azimuth, polar)` back to rectangular.
#[must_use]
pub fn to_rectangular(s: Vec3) -> Vec3 {
    let ring = s.x * s.z.sin();
    Vec3::new(ring * s.y.cos(), ring * s.y.sin(), s.x * s.z.cos())
}

/// Camera position used for `eye`; `None` is mono and applies no offset.
#[must_use]
pub fn eye_camera(camera: Vec3, parallax: f32, eye: Option<Eye>) -> Vec3 {
    match eye {
        Some(eye) => camera + Vec3::X * (eye.parallax_sign() * parallax),
        None => camera,
    }
}

/// Per-dispatch copy of `control` with the eye offset applied, the basis
/// recomputed and the light normalized.
///
/// The parallax shift happens before the basis is derived since the
/// basis depends on the camera position.
#[must_use]
pub fn eye_snapshot(control: &ControlState, eye: Option<Eye>) -> ControlState {
    let mut snapshot = *control;
    let camera = eye_camera(control.camera(), control.parallax, eye);
    let basis = CameraBasis::derive(camera, control.focus());

    snapshot.camera = camera.to_array();
    snapshot.view_vector = basis.view.to_array();
    snapshot.top_vector = basis.top.to_array();
    snapshot.side_vector = basis.side.to_array();
    snapshot.light = Vec3::from_array(control.light)
        .normalize_or_zero()
        .to_array();
    snapshot
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn random_point(rng: &mut StdRng) -> Vec3 {
        Vec3::new(
            rng.random_range(-10.0..10.0),
            rng.random_range(-10.0..10.0),
            rng.random_range(-10.0..10.0),
        )
    }

    #[test]
    fn basis_is_orthogonal() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let camera = random_point(&mut rng);
            let focus = random_point(&mut rng);
            if camera.distance(focus) < 1e-3 {
                continue;
            }
            let basis = CameraBasis::derive(camera, focus);
            let len = basis.view.length();
            assert!(basis.top.dot(basis.view).abs() / (len * len) < 1e-4);
            assert!(basis.side.dot(basis.view).abs() / (len * len) < 1e-4);
            assert!(basis.side.dot(basis.top).abs() / (len * len) < 1e-4);
            assert!((basis.top.length() - len).abs() / len < 1e-4);
            assert!((basis.side.length() - len).abs() / len < 1e-4);
        }
    }

    #[test]
    fn coincident_camera_and_focus_stay_finite() {
        let p = Vec3::new(0.4, 10.8, 2.5);
        let basis = CameraBasis::derive(p, p);
        assert_eq!(basis.view, Vec3::ZERO);
        assert_eq!(basis.top, Vec3::ZERO);
        assert_eq!(basis.side, Vec3::ZERO);

        let mut control = ControlState::new();
        control.focus = control.camera;
        control.light = [0.0; 3];
        let snapshot = eye_snapshot(&control, Some(Eye::Left));
        for v in snapshot
            .view_vector
            .iter()
            .chain(&snapshot.top_vector)
            .chain(&snapshot.side_vector)
            .chain(&snapshot.light)
        {
            assert!(v.is_finite());
        }
    }

    #[test]
    fn spherical_round_trip() {
        let v = Vec3::new(1.5, -2.0, 0.75);
        let back = to_rectangular(to_spherical(v));
        assert!(back.abs_diff_eq(v, 1e-5));
    }

    #[test]
    fn parallax_offsets_per_eye() {
        let mut control = ControlState::new();
        control.parallax = 0.004;
        let x = control.camera[0];

        let left = eye_snapshot(&control, Some(Eye::Left));
        let right = eye_snapshot(&control, Some(Eye::Right));
        let mono = eye_snapshot(&control, None);

        assert_eq!(left.camera[0], x - 0.004);
        assert_eq!(right.camera[0], x + 0.004);
        assert_eq!(mono.camera, control.camera);
        assert_eq!(left.camera[1], control.camera[1]);
    }

    #[test]
    fn snapshot_derives_basis_and_unit_light() {
        let control = ControlState::new();
        let snapshot = eye_snapshot(&control, None);
        let view = Vec3::from_array(snapshot.view_vector);
        assert!(view.abs_diff_eq(control.focus() - control.camera(), 1e-6));
        assert!((Vec3::from_array(snapshot.light).length() - 1.0).abs() < 1e-6);
        // The source record is left untouched.
        assert_eq!(control.view_vector, [0.0; 3]);
    }
}
