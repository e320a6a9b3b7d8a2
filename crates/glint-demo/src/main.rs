use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Result;
use clap::Parser;

use glint_engine::canvas::Color;
use glint_engine::config::Config;
use glint_engine::coords::{Position, LOGICAL_WIDTH};
use glint_engine::image::load_image;
use glint_engine::logging::{init_logging, LoggingConfig};
use glint_engine::text::{open_font, SCALED_TEXT_EM};
use glint_engine::window::Runtime;

/// Input lines kept on screen.
const EVENT_LINES: usize = 12;

/// Drawn right-aligned at the top when a font is given.
const TITLE: &str = "glint";

#[derive(Debug, Parser)]
#[command(name = "glint-demo", about = "Draws an image and echoes input events")]
struct Args {
    /// Image drawn over the whole window.
    image: Option<PathBuf>,

    /// Font used for the event log and the title.
    font: Option<PathBuf>,

    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    /// Run the event loop on a separate render thread.
    #[arg(long)]
    detached: bool,

    /// Debug logging for the engine.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(if args.verbose {
        LoggingConfig::verbose()
    } else {
        LoggingConfig::default()
    });

    if args.detached {
        let runtime = Runtime::start_detached(move || build_config(args))?;
        log::info!("render thread running");
        return runtime.join();
    }

    Runtime::run(build_config(args))
}

fn build_config(args: Args) -> Config {
    let events = Rc::new(RefCell::new(VecDeque::<String>::new()));
    let push = {
        let events = Rc::clone(&events);
        move |line: String| {
            let mut events = events.borrow_mut();
            if events.len() == EVENT_LINES {
                events.pop_front();
            }
            events.push_back(line);
        }
    };

    let image = args.image.map(load_image);
    let title_font = args.font.as_deref().and_then(|path| match open_font(path) {
        Ok(font) => Some(font),
        Err(e) => {
            log::warn!("{e}; title is not drawn");
            None
        }
    });

    let mut config = Config::new(move |canvas| {
        if let Some(image) = &image {
            canvas.draw_image(image);
        }
        if let Some(font) = &title_font {
            canvas.set_text_color(Color::from_rgb8(255, 200, 64));
            let width = font.measure(TITLE, SCALED_TEXT_EM);
            canvas.draw_scaled_text(font, TITLE, Position::new(LOGICAL_WIDTH - 0.05 - width, 0.9));
        }
        canvas.set_text_color(Color::WHITE);
        canvas.draw_text(Position::new(0.05, 0.78), events.borrow().iter());
    })
    .title("glint demo")
    .size(800, 600)
    .fps(args.fps)
    .clear_color(Color::from_rgb8(16, 16, 24));

    if let Some(font) = args.font {
        config = config.text_font(font);
    }

    let on_key = push.clone();
    let on_button = push;
    config
        .on_key(move |key, state, modifiers| {
            log::info!("key {key} {state:?} {modifiers:?}");
            on_key(format!("key {key} {state:?}"));
        })
        .on_mouse_button(move |button, state, at| {
            log::info!("mouse {button:?} {state:?} at ({:.3}, {:.3})", at.x, at.y);
            on_button(format!("mouse {button:?} {state:?} ({:.2}, {:.2})", at.x, at.y));
        })
        .on_motion(|at| log::trace!("motion ({:.3}, {:.3})", at.x, at.y))
}
