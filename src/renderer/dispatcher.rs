//! Per-frame kernel dispatch with a re-entrancy latch.
//!
//! A frame is one dispatch in mono or two in stereo (left eye, then right
//! eye). Each dispatch gets its own snapshot of the control record with
//! the eye's camera offset and a freshly derived basis, and each is
//! waited on before the next one starts. A render request that arrives
//! while a frame is in flight (including from inside the per-eye
//! callback) is dropped rather than queued.

use std::cell::Cell;

use super::grid::{DispatchGrid, WorkgroupSize};
use crate::camera::{eye_snapshot, Eye};
use crate::control::ControlState;
use crate::error::GasketError;

/// GPU side of a frame: owns the output images, the coloring texture and
/// the parameter buffer.
pub trait ComputeBackend {
    /// Group shape the kernel was compiled with.
    fn workgroup_size(&self) -> WorkgroupSize;

    /// (Re)allocate both eye images at the given size.
    fn resize_targets(&mut self, width: u32, height: u32);

    /// Largest width or height the device accepts for the coloring
    /// texture.
    fn max_texture_dimension(&self) -> u32;

    /// Replace the coloring texture. Callers check the image against
    /// [`Self::max_texture_dimension`] first.
    fn set_coloring_image(&mut self, image: &image::RgbaImage);

    /// Upload `params`, run the kernel over `grid` into `eye`'s image and
    /// block until the GPU reports completion.
    ///
    /// # Errors
    ///
    /// Returns [`GasketError::Dispatch`] if waiting on the submission
    /// fails.
    fn dispatch_eye(
        &self,
        eye: Eye,
        params: &ControlState,
        grid: DispatchGrid,
    ) -> Result<(), GasketError>;
}

/// Result of a render request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Every eye was dispatched and completed.
    Rendered {
        /// Whether both eyes were rendered.
        stereo: bool,
    },
    /// A frame was already in flight; this request was dropped.
    Skipped,
    /// No resolution has been set yet.
    Unconfigured,
}

/// Clears the busy latch when the frame ends, including on early return.
struct BusyGuard<'a>(&'a Cell<bool>);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            None
        } else {
            Some(Self(flag))
        }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Encodes and submits one frame's worth of kernel launches.
pub struct RenderDispatcher<B> {
    backend: B,
    busy: Cell<bool>,
    workgroup: WorkgroupSize,
    grid: Option<DispatchGrid>,
    resolution: (u32, u32),
}

impl<B: ComputeBackend> RenderDispatcher<B> {
    /// Wrap a backend; no frames render until [`Self::set_resolution`].
    pub fn new(backend: B) -> Self {
        let workgroup = backend.workgroup_size();
        log::debug!(
            "kernel workgroup {}x{} ({} threads)",
            workgroup.width,
            workgroup.height,
            workgroup.threads()
        );
        Self {
            backend,
            busy: Cell::new(false),
            workgroup,
            grid: None,
            resolution: (0, 0),
        }
    }

    /// Resize the eye images and recompute the dispatch grid.
    pub fn set_resolution(&mut self, width: u32, height: u32) {
        if self.resolution == (width, height) && self.grid.is_some() {
            return;
        }
        self.resolution = (width, height);
        self.backend.resize_targets(width, height);
        let grid = self.workgroup.grid_for(width, height);
        log::debug!(
            "resolution {width}x{height}, grid {}x{}x{}",
            grid.x,
            grid.y,
            grid.z
        );
        self.grid = Some(grid);
    }

    /// Current per-eye image size.
    #[must_use]
    pub fn resolution(&self) -> (u32, u32) {
        self.resolution
    }

    /// Grid used for each eye, once a resolution is set.
    #[must_use]
    pub fn grid(&self) -> Option<DispatchGrid> {
        self.grid
    }

    /// Whether a frame is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    /// Replace the coloring texture.
    ///
    /// # Errors
    ///
    /// Returns [`GasketError::TextureLoad`] if the image is empty or
    /// larger than the device allows; the current texture is kept.
    pub fn set_coloring_image(
        &mut self,
        image: &image::RgbaImage,
    ) -> Result<(), GasketError> {
        let (width, height) = image.dimensions();
        let limit = self.backend.max_texture_dimension();
        if width == 0 || height == 0 || width > limit || height > limit {
            return Err(GasketError::TextureLoad(format!(
                "{width}x{height} texture is outside the device limit of \
                 {limit}x{limit}"
            )));
        }
        self.backend.set_coloring_image(image);
        Ok(())
    }

    /// The GPU backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Render one frame from `control`.
    ///
    /// `on_eye` runs after each eye's dispatch has completed, which is the
    /// point its image may be handed to the presenter.
    ///
    /// # Errors
    ///
    /// Propagates the backend's dispatch failure; the latch is released
    /// either way.
    pub fn render_frame(
        &self,
        control: &ControlState,
        stereo: bool,
        mut on_eye: impl FnMut(Eye),
    ) -> Result<FrameOutcome, GasketError> {
        let Some(_guard) = BusyGuard::acquire(&self.busy) else {
            log::trace!("frame in flight, dropping render request");
            return Ok(FrameOutcome::Skipped);
        };
        let Some(grid) = self.grid else {
            return Ok(FrameOutcome::Unconfigured);
        };

        if stereo {
            for eye in Eye::BOTH {
                let params = eye_snapshot(control, Some(eye));
                self.backend.dispatch_eye(eye, &params, grid)?;
                on_eye(eye);
            }
        } else {
            let params = eye_snapshot(control, None);
            self.backend.dispatch_eye(Eye::Left, &params, grid)?;
            on_eye(Eye::Left);
        }

        Ok(FrameOutcome::Rendered { stereo })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::RefCell;

    use super::*;

    /// Records every call instead of touching a GPU.
    #[derive(Default)]
    pub(crate) struct MockBackend {
        pub(crate) dispatches: RefCell<Vec<(Eye, ControlState, DispatchGrid)>>,
        pub(crate) targets: Vec<(u32, u32)>,
        pub(crate) coloring: Option<(u32, u32)>,
        pub(crate) texture_limit: Option<u32>,
        pub(crate) fail: bool,
        pub(crate) fail_eye: Option<Eye>,
    }

    impl ComputeBackend for MockBackend {
        fn workgroup_size(&self) -> WorkgroupSize {
            WorkgroupSize::new(32, 256)
        }

        fn resize_targets(&mut self, width: u32, height: u32) {
            self.targets.push((width, height));
        }

        fn max_texture_dimension(&self) -> u32 {
            self.texture_limit.unwrap_or(8192)
        }

        fn set_coloring_image(&mut self, image: &image::RgbaImage) {
            self.coloring = Some(image.dimensions());
        }

        fn dispatch_eye(
            &self,
            eye: Eye,
            params: &ControlState,
            grid: DispatchGrid,
        ) -> Result<(), GasketError> {
            if self.fail || self.fail_eye == Some(eye) {
                return Err(GasketError::Dispatch("device lost".into()));
            }
            self.dispatches.borrow_mut().push((eye, *params, grid));
            Ok(())
        }
    }

    fn dispatcher() -> RenderDispatcher<MockBackend> {
        let mut d = RenderDispatcher::new(MockBackend::default());
        d.set_resolution(800, 601);
        d
    }

    #[test]
    fn unconfigured_dispatcher_renders_nothing() {
        let d = RenderDispatcher::new(MockBackend::default());
        let outcome = d.render_frame(&ControlState::new(), false, |_| {});
        assert_eq!(outcome.unwrap(), FrameOutcome::Unconfigured);
        assert!(d.backend().dispatches.borrow().is_empty());
        assert!(!d.is_busy());
    }

    #[test]
    fn resolution_sets_grid_and_targets() {
        let d = dispatcher();
        assert_eq!(d.grid(), Some(DispatchGrid { x: 26, y: 76, z: 1 }));
        assert_eq!(d.backend().targets, vec![(800, 601)]);
    }

    #[test]
    fn repeated_resolution_does_not_reallocate() {
        let mut d = dispatcher();
        d.set_resolution(800, 601);
        assert_eq!(d.backend().targets.len(), 1);
        d.set_resolution(640, 480);
        assert_eq!(d.backend().targets.len(), 2);
    }

    #[test]
    fn mono_frame_dispatches_once_without_parallax() {
        let d = dispatcher();
        let mut control = ControlState::new();
        control.parallax = 0.004;
        let mut eyes = Vec::new();

        let outcome = d.render_frame(&control, false, |eye| eyes.push(eye));

        assert_eq!(outcome.unwrap(), FrameOutcome::Rendered { stereo: false });
        assert_eq!(eyes, vec![Eye::Left]);
        let dispatches = d.backend().dispatches.borrow();
        assert_eq!(dispatches.len(), 1);
        assert_eq!(dispatches[0].1.camera, control.camera);
    }

    #[test]
    fn stereo_frame_dispatches_both_eyes_in_order() {
        let d = dispatcher();
        let mut control = ControlState::new();
        control.parallax = 0.004;
        let x = control.camera[0];

        let outcome = d.render_frame(&control, true, |_| {});

        assert_eq!(outcome.unwrap(), FrameOutcome::Rendered { stereo: true });
        let dispatches = d.backend().dispatches.borrow();
        assert_eq!(dispatches.len(), 2);
        assert_eq!(dispatches[0].0, Eye::Left);
        assert_eq!(dispatches[1].0, Eye::Right);
        assert_eq!(dispatches[0].1.camera[0], x - 0.004);
        assert_eq!(dispatches[1].1.camera[0], x + 0.004);
        // Each eye gets a basis derived from its own camera.
        assert_ne!(dispatches[0].1.view_vector, dispatches[1].1.view_vector);
        assert_eq!(dispatches[0].2, DispatchGrid { x: 26, y: 76, z: 1 });
    }

    #[test]
    fn coloring_image_is_checked_against_device_limit() {
        let mut d = RenderDispatcher::new(MockBackend {
            texture_limit: Some(16),
            ..MockBackend::default()
        });

        let wide = image::RgbaImage::new(17, 4);
        assert!(matches!(
            d.set_coloring_image(&wide),
            Err(GasketError::TextureLoad(_))
        ));
        let empty = image::RgbaImage::new(0, 4);
        assert!(d.set_coloring_image(&empty).is_err());
        assert_eq!(d.backend().coloring, None);

        d.set_coloring_image(&image::RgbaImage::new(16, 16)).unwrap();
        assert_eq!(d.backend().coloring, Some((16, 16)));
    }

    #[test]
    fn reentrant_request_is_skipped() {
        let d = dispatcher();
        let control = ControlState::new();
        let mut inner = None;

        let outer = d.render_frame(&control, false, |_| {
            assert!(d.is_busy());
            inner = Some(d.render_frame(&control, false, |_| {}).unwrap());
        });

        assert_eq!(outer.unwrap(), FrameOutcome::Rendered { stereo: false });
        assert_eq!(inner, Some(FrameOutcome::Skipped));
        assert_eq!(d.backend().dispatches.borrow().len(), 1);
        assert!(!d.is_busy());
    }

    #[test]
    fn failed_dispatch_releases_latch() {
        let mut d = RenderDispatcher::new(MockBackend {
            fail: true,
            ..MockBackend::default()
        });
        d.set_resolution(64, 64);
        let err = d.render_frame(&ControlState::new(), true, |_| {});
        assert!(matches!(err, Err(GasketError::Dispatch(_))));
        assert!(!d.is_busy());
    }
}
