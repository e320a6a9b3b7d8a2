use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::canvas::{Canvas, Color};
use crate::coords::{PixelSize, Position};
use crate::input::{
    EventDispatcher, Key, KeyState, Modifiers, MouseButton, MouseButtonState,
};

use super::ConfigError;

pub const DEFAULT_TITLE: &str = "glint";
pub const DEFAULT_SIZE: PixelSize = PixelSize::new(800, 600);
pub const DEFAULT_FPS: f64 = 60.0;

/// Per-frame callback. Receives the frame's drawing surface.
pub type FrameHandler = Box<dyn FnMut(&mut Canvas<'_>)>;

/// Engine configuration.
///
/// ```rust,ignore
/// let logo = load_image("logo.png");
/// let config = Config::new(move |canvas| canvas.draw_image(&logo))
///     .title("demo")
///     .size(800, 600)
///     .fps(30.0)
///     .on_key(|key, state, _mods| log::info!("{key} {state:?}"));
/// Runtime::run(config)?;
/// ```
pub struct Config {
    frame_handler: FrameHandler,
    dispatcher: EventDispatcher,
    title: String,
    size: PixelSize,
    fps: f64,
    min_frame_delay: Duration,
    text_font: Option<PathBuf>,
    clear_color: Color,
}

/// Config split into the pieces the runtime owns separately.
pub(crate) struct ConfigParts {
    pub frame_handler: FrameHandler,
    pub dispatcher: EventDispatcher,
    pub title: String,
    pub size: PixelSize,
    pub fps: f64,
    pub min_frame_delay: Duration,
    pub text_font: Option<PathBuf>,
    pub clear_color: Color,
}

impl Config {
    /// Creates a configuration with `frame_handler` and defaults for everything else.
    pub fn new<F>(frame_handler: F) -> Self
    where
        F: FnMut(&mut Canvas<'_>) + 'static,
    {
        Self {
            frame_handler: Box::new(frame_handler),
            dispatcher: EventDispatcher::new(),
            title: DEFAULT_TITLE.to_string(),
            size: DEFAULT_SIZE,
            fps: DEFAULT_FPS,
            min_frame_delay: Duration::ZERO,
            text_font: None,
            clear_color: Color::BLACK,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Initial window size in physical pixels.
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.size = PixelSize::new(width, height);
        self
    }

    /// Target frames per second.
    pub fn fps(mut self, fps: f64) -> Self {
        self.fps = fps;
        self
    }

    /// Lower bound on the delay between frames.
    ///
    /// By default an overrunning frame is followed immediately by the next
    /// one, which keeps the loop self-correcting but can starve other event
    /// loop work under sustained overload. A non-zero floor trades frame rate
    /// for responsiveness in that case.
    pub fn min_frame_delay(mut self, delay: Duration) -> Self {
        self.min_frame_delay = delay;
        self
    }

    /// Font file used by [`Canvas::draw_text`]. Opened once at startup.
    pub fn text_font(mut self, path: impl Into<PathBuf>) -> Self {
        self.text_font = Some(path.into());
        self
    }

    /// Background colour each frame is cleared to.
    pub fn clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    /// Handler for keyboard input.
    pub fn on_key<F>(mut self, handler: F) -> Self
    where
        F: FnMut(Key, KeyState, Modifiers) + 'static,
    {
        self.dispatcher.set_key_handler(handler);
        self
    }

    /// Handler for mouse button input. Positions are in logical space.
    pub fn on_mouse_button<F>(mut self, handler: F) -> Self
    where
        F: FnMut(MouseButton, MouseButtonState, Position) + 'static,
    {
        self.dispatcher.set_mouse_button_handler(handler);
        self
    }

    /// Handler for pointer motion. Positions are in logical space.
    pub fn on_motion<F>(mut self, handler: F) -> Self
    where
        F: FnMut(Position) + 'static,
    {
        self.dispatcher.set_motion_handler(handler);
        self
    }

    pub fn window_title(&self) -> &str {
        &self.title
    }

    pub fn window_size(&self) -> PixelSize {
        self.size
    }

    pub fn target_fps(&self) -> f64 {
        self.fps
    }

    /// Checks the preconditions the frame loop relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps.is_nan() || self.fps.is_infinite() {
            return Err(ConfigError::NonFiniteFps(self.fps));
        }
        if self.fps <= 0.0 {
            return Err(ConfigError::NonPositiveFps(self.fps));
        }
        if Duration::try_from_secs_f64(1.0 / self.fps).is_err() {
            return Err(ConfigError::FpsTooLow(self.fps));
        }
        if self.size.width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if self.size.height == 0 {
            return Err(ConfigError::ZeroHeight);
        }
        Ok(())
    }

    pub(crate) fn into_parts(self) -> ConfigParts {
        ConfigParts {
            frame_handler: self.frame_handler,
            dispatcher: self.dispatcher,
            title: self.title,
            size: self.size,
            fps: self.fps,
            min_frame_delay: self.min_frame_delay,
            text_font: self.text_font,
            clear_color: self.clear_color,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("title", &self.title)
            .field("size", &self.size)
            .field("fps", &self.fps)
            .field("min_frame_delay", &self.min_frame_delay)
            .field("text_font", &self.text_font)
            .field("dispatcher", &self.dispatcher)
            .finish_non_exhaustive()
    }
}
