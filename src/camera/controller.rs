use glam::{Vec2, Vec3, Vec4};

use super::arcball::ArcBall;
use crate::control::ControlState;
use crate::input::Modifiers;
use crate::options::InteractionOptions;

/// Length of the forward probe rotated by the arcball.
const ROTATE_PROBE: f32 = 0.1;

/// Steers camera and focus from drag deltas.
///
/// Rotation always drags the arcball from a fixed anchor, so the delta is
/// an absolute offset rather than an accumulated one. Panning moves camera
/// and focus together along a direction rotated by the arcball's current
/// transform.
#[derive(Debug, Clone)]
pub struct InteractionController {
    arcball: ArcBall,
    options: InteractionOptions,
}

impl InteractionController {
    /// Controller with a freshly initialized arcball.
    #[must_use]
    pub fn new(options: &InteractionOptions) -> Self {
        let extent = options.arcball_extent;
        let mut options = options.clone();
        options.sanitize();
        Self {
            arcball: ArcBall::new(extent, extent),
            options,
        }
    }

    /// Re-initialize the arcball to its configured square extent.
    pub fn reset(&mut self) {
        let extent = self.options.arcball_extent;
        self.arcball.initialize(extent, extent);
    }

    /// Replace the steering parameters; takes effect on the next drag.
    pub fn set_options(&mut self, options: &InteractionOptions) {
        self.options = options.clone();
        self.options.sanitize();
    }

    /// The arcball driving rotation and pan directions.
    #[must_use]
    pub fn arcball(&self) -> &ArcBall {
        &self.arcball
    }

    /// Rotate the view direction by a drag of `(dx, dy)`.
    ///
    /// The arcball is dragged from the anchor to `anchor + (dx, dy)` and
    /// a short probe along +y is rotated by the result. The probe's x/y
    /// replace the focus x/y, then the camera position is added, which
    /// leaves focus.z offset by camera.z on every call.
    pub fn rotate(&mut self, control: &mut ControlState, dx: f32, dy: f32) {
        let anchor = Vec2::splat(self.options.arcball_anchor);
        self.arcball.mouse_down(anchor);
        self.arcball.mouse_move(anchor + Vec2::new(dx, dy));

        let probe = Vec4::new(0.0, ROTATE_PROBE, 0.0, 0.0);
        let rotated = self.arcball.transform() * probe;

        let mut focus = control.focus();
        focus.x = rotated.x;
        focus.y = rotated.y;
        focus += control.camera();
        control.focus = focus.to_array();
    }

    /// Translate camera and focus together by a drag of `(dx, dy)`.
    ///
    /// Without shift, `dx` moves along x; with shift it moves along y
    /// (inverted and doubled). `dy` always moves along z. The option
    /// modifier switches to the coarse step.
    pub fn pan(
        &self,
        control: &mut ControlState,
        dx: f32,
        dy: f32,
        modifiers: Modifiers,
    ) {
        let step = if modifiers.option {
            self.options.pan_step_coarse
        } else {
            self.options.pan_step
        };

        if modifiers.shift {
            self.pan_along(control, Vec3::new(0.0, step, 0.0), -dx * 2.0);
        } else {
            self.pan_along(control, Vec3::new(step, 0.0, 0.0), dx);
        }
        self.pan_along(control, Vec3::new(0.0, 0.0, step), dy);
    }

    fn pan_along(&self, control: &mut ControlState, direction: Vec3, amount: f32) {
        let rotated = self.arcball.transform() * direction.extend(0.0);
        let diff = rotated.truncate() * amount / self.options.pan_divisor;
        control.camera = (control.camera() - diff).to_array();
        control.focus = (control.focus() - diff).to_array();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (InteractionController, ControlState) {
        let mut controller =
            InteractionController::new(&InteractionOptions::default());
        controller.reset();
        (controller, ControlState::new())
    }

    #[test]
    fn rotate_without_motion_sets_probe_focus() {
        let (mut controller, mut control) = setup();
        let camera = control.camera();
        let old_focus = control.focus();

        controller.rotate(&mut control, 0.0, 0.0);

        let focus = control.focus();
        assert!((focus.x - camera.x).abs() < 1e-6);
        assert!((focus.y - (camera.y + 0.1)).abs() < 1e-6);
        assert!((focus.z - (old_focus.z + camera.z)).abs() < 1e-5);
        assert_eq!(control.camera(), camera);
    }

    #[test]
    fn rotate_turns_the_probe() {
        let (mut controller, mut control) = setup();
        let camera = control.camera();
        controller.rotate(&mut control, 10.0, 0.0);
        let focus = control.focus();
        // A sideways drag swings the probe off the pure +y direction.
        assert!((focus.x - camera.x).abs() > 1e-4);
        assert!(focus.is_finite());
    }

    #[test]
    fn pan_moves_camera_and_focus_together() {
        let (controller, mut control) = setup();
        let camera = control.camera();
        let focus = control.focus();

        controller.pan(&mut control, 300.0, 0.0, Modifiers::default());

        assert!(control.camera().abs_diff_eq(camera - Vec3::X * 5.0, 1e-5));
        assert!(control.focus().abs_diff_eq(focus - Vec3::X * 5.0, 1e-5));
    }

    #[test]
    fn pan_with_option_uses_coarse_step() {
        let (controller, mut control) = setup();
        let camera = control.camera();
        let mods = Modifiers {
            shift: false,
            option: true,
        };
        controller.pan(&mut control, 0.0, 30.0, mods);
        assert!(control.camera().abs_diff_eq(camera - Vec3::Z * 5.0, 1e-5));
    }

    #[test]
    fn pan_with_shift_moves_vertically() {
        let (controller, mut control) = setup();
        let camera = control.camera();
        let mods = Modifiers {
            shift: true,
            option: false,
        };
        controller.pan(&mut control, 150.0, 0.0, mods);
        // -dx * 2 = -300, so the camera moves +5 along y.
        assert!(control.camera().abs_diff_eq(camera + Vec3::Y * 5.0, 1e-5));
    }

    #[test]
    fn pan_preserves_view_vector() {
        let (mut controller, mut control) = setup();
        controller.rotate(&mut control, 4.0, -3.0);
        let view = control.focus() - control.camera();
        controller.pan(&mut control, 12.0, -7.0, Modifiers::default());
        let after = control.focus() - control.camera();
        assert!(after.abs_diff_eq(view, 1e-4));
    }
}
