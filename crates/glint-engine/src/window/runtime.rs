use std::path::Path;
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::Instant;

use anyhow::{Context, Result};
use ouroboros::self_referencing;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::canvas::Color;
use crate::config::{Config, ConfigParts, FrameHandler};
use crate::coords::{CoordinateMapper, PixelSize};
use crate::device::{Gpu, GpuInit, SurfaceErrorAction};
use crate::image::FileDecoder;
use crate::input::platform::{PlatformInput, Translated};
use crate::input::EventDispatcher;
use crate::render::FramePainter;
use crate::text::{open_font, FontHandle};
use crate::time::{FrameScheduler, SystemClock};

/// Name of the thread [`Runtime::start_detached`] runs on.
pub const RENDER_THREAD_NAME: &str = "glint-render";

/// Entry point: opens the window and drives frames until it is closed.
///
/// Closing the window exits the process.
pub struct Runtime;

impl Runtime {
    /// Validates `config` and runs the event loop on the calling thread.
    ///
    /// Returns early with an error if the configuration is invalid, the text
    /// font cannot be opened, or the platform or GPU cannot be initialized.
    pub fn run(config: Config) -> Result<()> {
        Self::run_with(config, GpuInit::default())
    }

    pub fn run_with(config: Config, gpu_init: GpuInit) -> Result<()> {
        let state = AppState::new(config, gpu_init)?;
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        state.run(event_loop)
    }

    /// Runs on a new thread named [`RENDER_THREAD_NAME`].
    ///
    /// `build` is called on that thread, so handlers and image resources
    /// captured by the config never cross threads. Returns once the render
    /// thread has validated the config, opened the text font and created its
    /// event loop; a failure in any of those is returned here. Fails on
    /// platforms whose event loop must live on the main thread.
    pub fn start_detached<B>(build: B) -> Result<DetachedRuntime>
    where
        B: FnOnce() -> Config + Send + 'static,
    {
        ensure_any_thread_supported()?;

        let (ready_tx, ready_rx) = mpsc::channel::<Result<()>>();
        let handle = std::thread::Builder::new()
            .name(RENDER_THREAD_NAME.to_string())
            .spawn(move || {
                let setup = AppState::new(build(), GpuInit::default())
                    .and_then(|state| Ok((state, any_thread_event_loop()?)));

                match setup {
                    Ok((state, event_loop)) => {
                        // The receiver only goes away if start_detached itself unwound.
                        let _ = ready_tx.send(Ok(()));
                        state.run(event_loop)
                    }
                    Err(e) => {
                        let _ = ready_tx.send(Err(e));
                        Ok(())
                    }
                }
            })
            .context("failed to spawn render thread")?;

        let runtime = DetachedRuntime { handle };
        match ready_rx.recv() {
            Ok(Ok(())) => {
                log::debug!("render thread started");
                Ok(runtime)
            }
            Ok(Err(e)) => {
                runtime.join()?;
                Err(e)
            }
            Err(_) => {
                runtime.join()?;
                anyhow::bail!("render thread exited before startup completed")
            }
        }
    }
}

/// Handle to a runtime started with [`Runtime::start_detached`].
#[derive(Debug)]
pub struct DetachedRuntime {
    handle: JoinHandle<Result<()>>,
}

impl DetachedRuntime {
    /// Waits for the render thread. A panic on that thread is resumed here.
    pub fn join(self) -> Result<()> {
        match self.handle.join() {
            Ok(result) => result,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

#[cfg(any(
    target_os = "macos",
    target_os = "ios",
    target_os = "android",
    target_arch = "wasm32"
))]
fn ensure_any_thread_supported() -> Result<()> {
    anyhow::bail!("this platform requires the event loop on the main thread; use Runtime::run")
}

#[cfg(not(any(
    target_os = "macos",
    target_os = "ios",
    target_os = "android",
    target_arch = "wasm32"
)))]
fn ensure_any_thread_supported() -> Result<()> {
    Ok(())
}

#[cfg(all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android"))))]
fn any_thread_event_loop() -> Result<EventLoop<()>> {
    use winit::platform::wayland::EventLoopBuilderExtWayland;
    use winit::platform::x11::EventLoopBuilderExtX11;

    let mut builder = EventLoop::builder();
    EventLoopBuilderExtX11::with_any_thread(&mut builder, true);
    EventLoopBuilderExtWayland::with_any_thread(&mut builder, true);
    builder
        .build()
        .context("failed to create winit EventLoop on render thread")
}

#[cfg(windows)]
fn any_thread_event_loop() -> Result<EventLoop<()>> {
    use winit::platform::windows::EventLoopBuilderExtWindows;

    EventLoop::builder()
        .with_any_thread(true)
        .build()
        .context("failed to create winit EventLoop on render thread")
}

#[cfg(not(any(
    windows,
    all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android")))
)))]
fn any_thread_event_loop() -> Result<EventLoop<()>> {
    anyhow::bail!("this platform requires the event loop on the main thread; use Runtime::run")
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState {
    frame_handler: FrameHandler,
    dispatcher: EventDispatcher,
    title: String,
    clear_color: Color,
    fixed_face: Option<FontHandle>,
    gpu_init: GpuInit,

    scheduler: FrameScheduler,
    mapper: CoordinateMapper,
    input: PlatformInput,
    decoder: FileDecoder,

    entry: Option<WindowEntry>,
    painter: Option<FramePainter>,
    error: Option<anyhow::Error>,
}

impl AppState {
    fn new(config: Config, gpu_init: GpuInit) -> Result<Self> {
        if let Err(e) = config.validate() {
            log::error!("invalid configuration: {e}");
            return Err(e).context("invalid configuration");
        }

        let ConfigParts {
            frame_handler,
            dispatcher,
            title,
            size,
            fps,
            min_frame_delay,
            text_font,
            clear_color,
        } = config.into_parts();

        let scheduler = FrameScheduler::new(fps)?.with_min_delay(min_frame_delay);
        let fixed_face = text_font.as_deref().map(open_text_font).transpose()?;

        Ok(Self {
            frame_handler,
            dispatcher,
            title,
            clear_color,
            fixed_face,
            gpu_init,
            scheduler,
            mapper: CoordinateMapper::new(size),
            input: PlatformInput::default(),
            decoder: FileDecoder,
            entry: None,
            painter: None,
            error: None,
        })
    }

    fn run(mut self, event_loop: EventLoop<()>) -> Result<()> {
        event_loop
            .run_app(&mut self)
            .context("winit event loop terminated with error")?;

        match self.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.error = Some(err);
        event_loop.exit();
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(PhysicalSize::<u32>::from(self.mapper.size()));

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        let entry = WindowEntryTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed for window")?;

        let size = entry.with_gpu(|gpu| gpu.size());
        self.mapper.resize(size);

        let face = self.fixed_face.take();
        let clear_color = self.clear_color;
        self.painter = Some(entry.with_gpu(|gpu| FramePainter::new(gpu, face, clear_color)));
        self.entry = Some(entry);

        log::info!("window '{}' created ({}x{})", self.title, size.width, size.height);
        Ok(())
    }

    fn resize(&mut self, size: PixelSize) {
        self.mapper.resize(size);
        if let Some(entry) = self.entry.as_mut() {
            entry.with_gpu_mut(|gpu| gpu.resize(size));
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Self {
            frame_handler,
            scheduler,
            mapper,
            decoder,
            entry: Some(entry),
            painter: Some(painter),
            ..
        } = self
        else {
            return;
        };

        let mut outcome = Ok(());
        scheduler.run_frame(&SystemClock, || {
            outcome = entry.with(|fields| {
                painter.paint(fields.gpu, fields.window, mapper, &*decoder, frame_handler)
            });
        });

        let Err(err) = outcome else { return };
        let action = entry.with_gpu_mut(|gpu| gpu.handle_surface_error(err));
        if action == SurfaceErrorAction::Fatal {
            let textures = painter.texture_count();
            self.fail(
                event_loop,
                anyhow::anyhow!("GPU surface out of memory ({textures} textures uploaded)"),
            );
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        if let Err(e) = self.create_window(event_loop) {
            self.fail(event_loop, e);
            return;
        }

        let now = Instant::now();
        self.scheduler.arm(now);
        event_loop.set_control_flow(ControlFlow::WaitUntil(now));
        log::debug!("frame scheduler armed at {:?} per frame", self.scheduler.period());
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(entry) = self.entry.as_ref() else {
            return;
        };

        if self.scheduler.is_due(Instant::now()) {
            self.scheduler.mark_requested();
            entry.with_window(|w| w.request_redraw());
            event_loop.set_control_flow(ControlFlow::Wait);
        } else if let Some(deadline) = self.scheduler.deadline() {
            event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match self.input.translate(&event) {
            Some(Translated::Input(raw)) => self.dispatcher.dispatch(raw, &self.mapper),
            Some(Translated::Motion(cursor)) => self.dispatcher.dispatch_motion(cursor, &self.mapper),
            None => {}
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!(
                    "window closed after {} frames; exiting",
                    self.scheduler.frames()
                );
                std::process::exit(0);
            }

            WindowEvent::Resized(size) => self.resize(size.into()),

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(size) = self.entry.as_ref().map(|e| e.with_window(|w| w.inner_size())) {
                    self.resize(size.into());
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}

fn open_text_font(path: &Path) -> Result<FontHandle> {
    open_font(path).with_context(|| format!("failed to open text font {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detached_start_reports_invalid_config() {
        let result = Runtime::start_detached(|| Config::new(|_| {}).fps(0.0));
        assert!(result.is_err());
    }

    #[test]
    fn detached_start_reports_missing_font() {
        let result = Runtime::start_detached(|| {
            Config::new(|_| {}).text_font("/nonexistent/glint/font.ttf")
        });
        assert!(result.is_err());
    }

    #[cfg(not(any(
        target_os = "macos",
        target_os = "ios",
        target_os = "android",
        target_arch = "wasm32"
    )))]
    #[test]
    fn detached_config_error_keeps_its_cause() {
        let err = Runtime::start_detached(|| Config::new(|_| {}).fps(0.0)).unwrap_err();
        assert_eq!(
            err.downcast_ref::<crate::config::ConfigError>(),
            Some(&crate::config::ConfigError::NonPositiveFps(0.0))
        );
    }
}
