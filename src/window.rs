//! Window creation and the event loop driving the game.

use std::sync::Arc;

use miette::{IntoDiagnostic, Result, WrapErr};
use web_time::Instant;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::KeyCode,
    window::{Window, WindowAttributes, WindowId},
};

use crate::{
    canvas::Canvas, config::Config, game::Game, graphics::state::MainRenderState, input::Input,
    timer::FramePacer,
};

/// Open a window and play until it's closed or 'Escape' is pressed.
///
/// # Arguments
///
/// * `config` - Configuration for the window and the game, can be used to set the buffer size, the window title and other things.
///
/// # Errors
///
/// - When the configuration can't be played, see [`Config::validate`].
/// - When the event loop or the window could not be created.
/// - If no GPU could be found or accessed.
/// - When the GPU fails while presenting a frame.
///
/// # Example
///
/// ```no_run
/// use snake::Config;
///
/// # fn try_main() -> miette::Result<()> {
/// snake::run(Config::default().with_title("My Snake"))?;
/// # Ok(())
/// # }
/// ```
pub fn run(config: Config) -> Result<()> {
    config.validate().wrap_err("Invalid game configuration")?;

    let event_loop = EventLoop::new()
        .into_diagnostic()
        .wrap_err("Error creating event loop")?;

    let mut state = State::new(config);

    event_loop
        .run_app(&mut state)
        .into_diagnostic()
        .wrap_err("Error running event loop")?;

    // Errors that happened inside the event loop can only be returned after it stopped
    match state.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Everything tied to the lifetime of the window.
struct Runtime {
    /// GPU state drawing on the window.
    ///
    /// Declared before the window so the surface is destroyed first.
    graphics: MainRenderState<'static>,
    /// Window handle, shared with the GPU surface.
    window: Arc<Window>,
}

/// State of setting up a window that can still be uninitialized.
///
/// All optional fields are tied to the window creation flow of winit.
struct State {
    /// Window and GPU.
    ///
    /// `None` if the window still needs to be initialized.
    runtime: Option<Runtime>,
    /// Snake, food and timing.
    game: Game,
    /// Keyboard state.
    input: Input,
    /// Shapes drawn this frame, reused every frame.
    canvas: Canvas,
    /// User supplied configuration.
    config: Config,
    /// Time of the previous frame for calculating the frame time.
    last_time: Instant,
    /// Schedules the redraws.
    frame_pacer: FramePacer,
    /// Error that stopped the event loop.
    error: Option<miette::Report>,
}

impl State {
    /// Setup the game, the window is created when the event loop resumes.
    fn new(config: Config) -> Self {
        let now = Instant::now();

        let canvas = Canvas::new(glam::Vec2::new(config.buffer_width, config.buffer_height));
        let frame_pacer = FramePacer::new(config.target_frames_per_second, now);
        let game = Game::new(config.clone());

        Self {
            runtime: None,
            game,
            input: Input::new(),
            canvas,
            config,
            last_time: now,
            frame_pacer,
            error: None,
        }
    }

    /// Create the window and attach the GPU to it.
    fn create_runtime(&self, event_loop: &ActiveEventLoop) -> Result<Runtime> {
        // Define the properties of the window
        let window_attributes = WindowAttributes::default()
            .with_title(&self.config.title)
            // Apply scaling for the requested size
            .with_inner_size(LogicalSize::new(
                self.config.buffer_width * self.config.scaling,
                self.config.buffer_height * self.config.scaling,
            ))
            .with_resizable(true);

        // Spawn a new window using the event loop
        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .into_diagnostic()
                .wrap_err("Error creating window")?,
        );

        log::info!("Opened window '{}'", self.config.title);

        // The surface uses physical pixels
        let PhysicalSize { width, height } = window.inner_size();

        // Because pollster returns the value we can set it immediately
        let graphics = pollster::block_on(MainRenderState::new(
            &self.config,
            Arc::clone(&window),
            width,
            height,
        ))?;

        Ok(Runtime { graphics, window })
    }

    /// Stop the event loop with an error.
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: miette::Report) {
        log::error!("Stopping: {err}");

        self.error = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for State {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // Setup the window
        if self.runtime.is_some() {
            return;
        }

        match self.create_runtime(event_loop) {
            Ok(runtime) => {
                // Don't count the setup as a frame
                self.last_time = Instant::now();

                self.runtime = Some(runtime);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Do nothing if the window is not set up yet
        let Some(runtime) = &mut self.runtime else {
            return;
        };

        // Handle the window events
        match event {
            // Handle the update and render loop
            WindowEvent::RedrawRequested => {
                let current_time = Instant::now();
                let frame_time = (current_time - self.last_time).as_secs_f32();
                self.last_time = current_time;
                self.frame_pacer.frame_drawn(current_time);

                let events = self.game.update(&self.input, frame_time);
                if events.ate {
                    log::trace!("Food eaten, snake is {} long", self.game.snake().len());
                }

                // 'Escape' closes the window just like the close button
                let exit = self.input.key_pressed(KeyCode::Escape);

                // Update the input so pressed and released events can be handled
                self.input.update();

                if exit {
                    log::info!("Escape pressed, exiting");

                    event_loop.exit();
                    return;
                }

                // Only call render loop when the window is not minimized
                if runtime.window.is_minimized().unwrap_or(false) {
                    return;
                }

                self.game.render(&mut self.canvas);

                let result = runtime.graphics.render(&self.canvas);
                if let Err(err) = result {
                    self.fail(event_loop, err);
                }

                profiling::finish_frame!();
            }
            // Resize the render surface
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                runtime.graphics.resize(width, height);

                // On MacOS the window needs to be redrawn manually after resizing
                #[cfg(target_os = "macos")]
                runtime.window.request_redraw();
            }
            // Close the window if requested
            WindowEvent::CloseRequested => {
                log::info!("Window close requested, exiting");

                // Tell winit that we want to exit
                event_loop.exit();
            }
            // Handle other window events with the input manager
            WindowEvent::KeyboardInput { .. } => self.input.handle_event(&event),
            // Ignore the rest of the events
            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(runtime) = &self.runtime else {
            return;
        };

        // Request a redraw when the frame is due, otherwise sleep until it is
        if self.frame_pacer.is_due(Instant::now()) {
            runtime.window.request_redraw();
        }

        event_loop.set_control_flow(ControlFlow::WaitUntil(self.frame_pacer.next_frame()));
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // Destroy the GPU state and the window
        self.runtime = None;
    }
}
