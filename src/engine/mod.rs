//! The interactive session: owns the control record and everything that
//! mutates it.
//!
//! Hosts drive a [`Session`] from three directions: window events go to
//! [`Session::handle_input`] and [`Session::window_resized`], panel
//! buttons and keys go through [`SessionHandler`], and a periodic timer
//! calls [`Session::tick`]. After any of these the host checks
//! [`Session::take_ready_eyes`] (or [`Session::take_frame_ready`]) to know
//! which views to present, and drains [`Session::drain_ui_requests`] for
//! work only it can do.

mod assets;
/// Command vocabulary and UI requests.
pub mod command;
mod handler;
/// Viewport placement and resize settling.
pub mod layout;

use rand::rngs::StdRng;
use rand::SeedableRng;

pub use self::command::{DragMode, UiRequest, WidgetCommand};
pub use self::handler::SessionHandler;
use self::layout::{ResizeDebounce, ViewportLayout};
use crate::camera::{Eye, InteractionController};
use crate::control::{AutoChange, ControlState, FloatParam, TripletParam};
use crate::input::{InputEvent, InputProcessor};
use crate::options::Options;
use crate::renderer::{ComputeBackend, RenderDispatcher};

/// Interactive explorer state around one control record.
pub struct Session<B> {
    control: ControlState,
    controller: InteractionController,
    dispatcher: RenderDispatcher<B>,
    input: InputProcessor,
    options: Options,
    auto_change: AutoChange,
    rng: StdRng,
    stereo: bool,
    drag_mode: DragMode,
    panel_visible: bool,
    window: (u32, u32),
    layout: ViewportLayout,
    resize: ResizeDebounce,
    coloring_prompt: bool,
    texture_loaded: bool,
    ready_eyes: [bool; 2],
    requests: Vec<UiRequest>,
}

impl<B: ComputeBackend> Session<B> {
    /// Session in the start-up state. Nothing renders until the first
    /// layout, which [`Self::window_appeared`] schedules.
    pub fn new(backend: B, options: Options) -> Self {
        let [min_w, min_h] = options.session.min_window;
        let panel_visible = options.session.panel_visible;
        let layout = ViewportLayout::compute(
            (min_w, min_h),
            if panel_visible {
                options.session.panel_width
            } else {
                0
            },
            false,
        );
        Self {
            control: ControlState::new(),
            controller: InteractionController::new(&options.interaction),
            dispatcher: RenderDispatcher::new(backend),
            input: InputProcessor::new(),
            auto_change: AutoChange::default(),
            rng: StdRng::from_os_rng(),
            stereo: false,
            drag_mode: DragMode::Move,
            panel_visible,
            window: (min_w, min_h),
            layout,
            resize: ResizeDebounce::new(options.session.resize_settle_ticks),
            coloring_prompt: false,
            texture_loaded: false,
            ready_eyes: [false; 2],
            requests: Vec::new(),
            options,
        }
    }

    /// Reseed the shading walk so its sequence is reproducible.
    pub fn seed_rng(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// The window is up: record its size, reset, and lay out on the next
    /// tick.
    pub fn window_appeared(&mut self, width: u32, height: u32) {
        self.window = (width, height);
        self.reset();
        self.resize.arm(1);
    }

    /// The window changed size; lay out once resizing settles.
    pub fn window_resized(&mut self, width: u32, height: u32) {
        if self.window == (width, height) {
            return;
        }
        self.window = (width, height);
        self.resize.restart();
    }

    /// Feed a pointer or modifier event.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        self.input.handle_event(event)
    }

    /// Release any held drag (focus loss).
    pub fn release_pointer(&mut self) {
        self.input.release();
    }

    /// One timer period: apply the held drag, surface a pending coloring
    /// prompt, step the shading walk, re-render if anything changed, and
    /// run a settled layout.
    pub fn tick(&mut self) {
        let mut refresh = self.apply_held_drag();

        if self.coloring_prompt {
            self.coloring_prompt = false;
            self.requests.push(UiRequest::ConfirmNeutralizeColoring);
        }

        if self
            .auto_change
            .step(&mut self.control.lighting, &mut self.rng)
        {
            self.requests.push(UiRequest::RefreshPanel);
            refresh = true;
        }

        if refresh && !self.dispatcher.is_busy() {
            self.update_image();
        }

        if self.resize.tick() {
            self.layout_views();
        }
    }

    /// General reset: parameters back to the current style's defaults,
    /// shading walk off, arcball re-initialized, drags back to panning.
    pub fn reset(&mut self) {
        self.control.reset();
        self.auto_change.set_enabled(false);
        self.controller.reset();
        self.drag_mode = DragMode::Move;
        self.requests.push(UiRequest::RebuildPanel);
    }

    /// Recompute viewports for the window, panel and stereo state, resize
    /// the eye images to match, and re-render.
    pub fn layout_views(&mut self) {
        let panel = if self.panel_visible {
            self.options.session.panel_width
        } else {
            0
        };
        self.layout = ViewportLayout::compute(self.window, panel, self.stereo);
        let (width, height) = self.layout.resolution();
        self.control.set_resolution(width, height);
        self.dispatcher.set_resolution(width, height);
        self.update_image();
    }

    /// Render a frame from the current record. A request made while a
    /// frame is in flight is dropped.
    ///
    /// Each eye is marked ready as soon as its dispatch completes, so a
    /// stereo frame that fails on the right eye still leaves the left
    /// one presentable.
    pub fn update_image(&mut self) {
        let ready = &mut self.ready_eyes;
        let outcome =
            self.dispatcher
                .render_frame(&self.control, self.stereo, |eye| {
                    log::trace!("{eye:?} eye complete");
                    ready[eye.index()] = true;
                });
        if let Err(e) = outcome {
            log::error!("frame failed: {e}");
        }
    }

    /// Eyes whose image finished since the last call, in dispatch order.
    pub fn take_ready_eyes(&mut self) -> Vec<Eye> {
        let ready = std::mem::take(&mut self.ready_eyes);
        Eye::BOTH
            .into_iter()
            .filter(|eye| ready[eye.index()])
            .collect()
    }

    /// Whether any eye finished since the last call.
    pub fn take_frame_ready(&mut self) -> bool {
        !self.take_ready_eyes().is_empty()
    }

    /// Requests queued for the UI layer since the last drain.
    pub fn drain_ui_requests(&mut self) -> Vec<UiRequest> {
        std::mem::take(&mut self.requests)
    }

    /// Set a scalar from the panel, clamped to its range, and re-render.
    pub fn set_float(&mut self, param: FloatParam, value: f32) {
        self.control.set_float(param, value);
        self.update_image();
    }

    /// Set a triplet from the panel, clamped per component, and re-render.
    pub fn set_triplet(&mut self, param: TripletParam, value: [f32; 3]) {
        self.control.set_triplet(param, value);
        self.update_image();
    }

    /// Whether the panel should draw `command`'s row highlighted.
    #[must_use]
    pub fn highlighted(&self, command: WidgetCommand) -> bool {
        match command {
            WidgetCommand::AutoChg => self.auto_change.enabled(),
            WidgetCommand::Stereo => self.stereo,
            WidgetCommand::Texture => self.control.texture_enabled(),
            WidgetCommand::Move => self.drag_mode == DragMode::Move,
            WidgetCommand::Rotate => self.drag_mode == DragMode::Rotate,
            _ => false,
        }
    }

    /// The live control record.
    #[must_use]
    pub fn control(&self) -> &ControlState {
        &self.control
    }

    /// Mutable access for panel widgets bound directly to fields; call
    /// [`Self::update_image`] afterwards.
    pub fn control_mut(&mut self) -> &mut ControlState {
        &mut self.control
    }

    /// Whether stereo is on.
    #[must_use]
    pub fn stereo(&self) -> bool {
        self.stereo
    }

    /// What drags currently steer.
    #[must_use]
    pub fn drag_mode(&self) -> DragMode {
        self.drag_mode
    }

    /// Whether the shading walk is running.
    #[must_use]
    pub fn auto_change_enabled(&self) -> bool {
        self.auto_change.enabled()
    }

    /// Whether the parameter panel is shown.
    #[must_use]
    pub fn panel_visible(&self) -> bool {
        self.panel_visible
    }

    /// Current viewport placement.
    #[must_use]
    pub fn layout(&self) -> &ViewportLayout {
        &self.layout
    }

    /// Session options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The frame dispatcher.
    #[must_use]
    pub fn dispatcher(&self) -> &RenderDispatcher<B> {
        &self.dispatcher
    }

    fn apply_held_drag(&mut self) -> bool {
        let Some(offset) = self.input.drag_offset() else {
            return false;
        };
        if offset == glam::Vec2::ZERO {
            return false;
        }
        let delta = offset * self.options.interaction.drag_scale;
        self.steer(delta.x, delta.y);
        true
    }

    fn steer(&mut self, dx: f32, dy: f32) {
        match self.drag_mode {
            DragMode::Move => self.controller.pan(
                &mut self.control,
                dx,
                dy,
                self.input.modifiers(),
            ),
            DragMode::Rotate => self.controller.rotate(&mut self.control, dx, dy),
        }
    }
}
