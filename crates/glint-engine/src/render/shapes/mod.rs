//! Renderers for the two kinds of draw command.

mod atlas;
mod common;

pub mod image;
pub mod text;
