//! Glint engine crate.
//!
//! A minimal real-time rendering harness: a window, a self-correcting
//! fixed-rate draw loop, input routed to caller handlers in a normalized
//! coordinate space, and lazily loaded image textures.
//!
//! ```no_run
//! use glint_engine::config::Config;
//! use glint_engine::image::load_image;
//! use glint_engine::window::Runtime;
//!
//! let background = load_image("background.png");
//! let config = Config::new(move |canvas| canvas.draw_image(&background))
//!     .title("demo")
//!     .size(800, 600)
//!     .fps(30.0);
//! Runtime::run(config).unwrap();
//! ```

pub mod canvas;
pub mod config;
pub mod coords;
pub mod device;
pub mod image;
pub mod input;
pub mod logging;
pub mod render;
pub mod text;
pub mod time;
pub mod window;

mod scene;

#[cfg(test)]
mod testing;
