//! Standalone explorer window backed by winit.
//!
//! The viewer hosts a [`Session`] over the wgpu backend. It has no widget
//! panel of its own: the panel area stays dark, keys drive the session
//! through the bindings, and UI requests that would open dialogs are
//! answered from the paths given on the builder.
//!
//! ```no_run
//! # use gasket::Viewer;
//! Viewer::builder()
//!     .with_texture("assets/textures/marble.png")
//!     .with_stereo(true)
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use web_time::Instant;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::{
    engine::{Session, SessionHandler, UiRequest, WidgetCommand},
    error::GasketError,
    gpu::render_context::RenderContext,
    options::Options,
    renderer::{Presenter, WgpuBackend},
    util::tick::TickTimer,
    InputEvent, MouseButton,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    texture: Option<PathBuf>,
    control: Option<PathBuf>,
    stereo: bool,
    title: String,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            options: None,
            texture: None,
            control: None,
            stereo: false,
            title: "Apollonian Gasket".into(),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Image used for texture coloring. Loaded at start-up and again
    /// whenever the session asks for a texture.
    #[must_use]
    pub fn with_texture(mut self, path: impl Into<PathBuf>) -> Self {
        self.texture = Some(path.into());
        self
    }

    /// Control record file. Loaded at start-up if it exists, and written
    /// by the save/load command.
    #[must_use]
    pub fn with_control(mut self, path: impl Into<PathBuf>) -> Self {
        self.control = Some(path.into());
        self
    }

    /// Start in side-by-side stereo.
    #[must_use]
    pub fn with_stereo(mut self, stereo: bool) -> Self {
        self.stereo = stereo;
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options.unwrap_or_default(),
            texture: self.texture,
            control: self.control,
            stereo: self.stereo,
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window running one explorer session.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    texture: Option<PathBuf>,
    control: Option<PathBuf>,
    stereo: bool,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`GasketError::Viewer`] if the event loop fails, or the
    /// start-up error if the GPU or kernel could not be initialized.
    pub fn run(self) -> Result<(), GasketError> {
        let event_loop =
            EventLoop::new().map_err(|e| GasketError::Viewer(e.to_string()))?;
        let timer = TickTimer::from_millis(self.options.session.tick_interval_ms);
        event_loop.set_control_flow(ControlFlow::WaitUntil(timer.deadline()));

        let mut app = ViewerApp {
            window: None,
            state: None,
            timer,
            config: self,
            error: None,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| GasketError::Viewer(e.to_string()))?;
        app.error.map_or(Ok(()), Err)
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// GPU-side state created once the window exists.
struct ViewerState {
    context: RenderContext,
    presenter: Presenter,
    session: Session<WgpuBackend>,
}

struct ViewerApp {
    window: Option<Arc<Window>>,
    state: Option<ViewerState>,
    timer: TickTimer,
    config: Viewer,
    error: Option<GasketError>,
}

impl ViewerApp {
    fn create_state(
        &self,
        window: &Arc<Window>,
    ) -> Result<ViewerState, GasketError> {
        let inner = window.inner_size();
        let size = (inner.width.max(1), inner.height.max(1));
        let context =
            pollster::block_on(RenderContext::new(window.clone(), size))?;
        let backend = pollster::block_on(WgpuBackend::new(
            context.device.clone(),
            context.queue.clone(),
        ))?;
        let presenter = Presenter::new(&context)?;
        let mut session = Session::new(backend, self.config.options.clone());

        session.window_appeared(size.0, size.1);
        // The texture goes first so a restored record keeps its own
        // placement and shading.
        if let Some(path) = self.config.texture.as_deref() {
            if let Err(e) = session.load_texture(path) {
                log::error!("texture {}: {e}", path.display());
            }
        }
        if let Some(path) = self.config.control.as_deref() {
            if path.exists() {
                session.load_control(path)?;
            }
        }
        if self.config.stereo {
            session.on_command(WidgetCommand::Stereo);
        }

        Ok(ViewerState {
            context,
            presenter,
            session,
        })
    }

    fn present(&mut self) {
        let Some(state) = &mut self.state else {
            return;
        };
        match state.presenter.present(
            &state.context,
            state.session.dispatcher().backend(),
            state.session.layout(),
        ) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                let (width, height) = state.context.size();
                state.context.resize(width, height);
            }
            Err(e) => log::error!("present error: {e:?}"),
        }
    }

    /// Present finished eyes and answer queued UI requests.
    ///
    /// A surface presents once per frame, so ready eyes go out together.
    /// An eye that did not finish keeps its previous image.
    fn after_session_work(&mut self, event_loop: &ActiveEventLoop) {
        let Some(state) = &mut self.state else {
            return;
        };
        let ready = state.session.take_ready_eyes();
        let requests = state.session.drain_ui_requests();
        for request in requests {
            self.answer(event_loop, request);
        }
        if !ready.is_empty() {
            log::trace!("presenting {ready:?}");
            self.present();
        }
    }

    fn answer(&mut self, event_loop: &ActiveEventLoop, request: UiRequest) {
        let Some(state) = &mut self.state else {
            return;
        };
        let session = &mut state.session;
        match request {
            UiRequest::Quit => event_loop.exit(),
            UiRequest::PickTexture => match self.config.texture.as_deref() {
                Some(path) => {
                    if let Err(e) = session.load_texture(path) {
                        log::error!("texture {}: {e}", path.display());
                    }
                }
                None => log::warn!("no texture configured; pass --texture"),
            },
            UiRequest::ConfirmNeutralizeColoring => {
                log::info!(
                    "texture loaded; resetting tint and saturation so it \
                     shows true color"
                );
                session.answer_coloring_prompt(true);
            }
            UiRequest::ShowSaveLoad => match self.config.control.as_deref() {
                Some(path) => match session.save_control(path) {
                    Ok(()) => {
                        log::info!("saved control record {}", path.display());
                    }
                    Err(e) => log::error!("save {}: {e}", path.display()),
                },
                None => log::warn!("no control file configured; pass --control"),
            },
            UiRequest::ShowHelp => log_help(session.options()),
            UiRequest::RebuildPanel
            | UiRequest::RefreshPanel
            | UiRequest::Relayout => log::debug!("{request:?}"),
        }
    }
}

fn log_help(options: &Options) {
    let mut keys: Vec<_> = options
        .keybindings
        .bindings
        .iter()
        .map(|(action, key)| format!("{key:>8}  {action:?}"))
        .collect();
    keys.sort();
    log::info!(
        "drag with the left button to steer; shift pans vertically, \
         option/alt pans coarsely\n{}",
        keys.join("\n")
    );
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let [min_w, min_h] = self.config.options.session.min_window;
        let min_size = winit::dpi::PhysicalSize::new(min_w, min_h);
        let mut attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_min_inner_size(min_size);
        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            let logical_w = (f64::from(mon_size.width) / scale * 0.75) as u32;
            let logical_h = (f64::from(mon_size.height) / scale * 0.75) as u32;
            attrs = attrs.with_inner_size(winit::dpi::LogicalSize::new(
                logical_w, logical_h,
            ));
        }

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                self.error = Some(GasketError::Viewer(e.to_string()));
                event_loop.exit();
                return;
            }
        };

        match self.create_state(&window) {
            Ok(state) => self.state = Some(state),
            Err(e) => {
                log::error!("Failed to initialize session: {e}");
                self.error = Some(e);
                event_loop.exit();
                return;
            }
        }

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        let Some(state) = &mut self.state else {
            return;
        };

        match event {
            WindowEvent::Resized(size) => {
                let (width, height) = (size.width.max(1), size.height.max(1));
                state.context.resize(width, height);
                state.session.window_resized(width, height);
            }

            WindowEvent::RedrawRequested => {
                self.present();
                return;
            }

            WindowEvent::Focused(false) => state.session.release_pointer(),

            WindowEvent::MouseInput {
                button,
                state: button_state,
                ..
            } => {
                let _ = state.session.handle_input(InputEvent::MouseButton {
                    button: MouseButton::from(button),
                    pressed: button_state == ElementState::Pressed,
                });
            }

            WindowEvent::CursorMoved { position, .. } => {
                let _ = state.session.handle_input(InputEvent::CursorMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                let _ = state
                    .session
                    .handle_input(InputEvent::ModifiersChanged(
                        modifiers.state().into(),
                    ));
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let key = format!("{code:?}");
                if !state.session.on_key(&key) {
                    log::trace!("unbound key {key}");
                }
            }

            _ => return,
        }

        self.after_session_work(event_loop);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.timer.due(Instant::now()) {
            if let Some(state) = &mut self.state {
                state.session.tick();
            }
            self.after_session_work(event_loop);
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.timer.deadline()));
    }
}
