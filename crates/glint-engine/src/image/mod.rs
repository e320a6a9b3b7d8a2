//! Lazily loaded images.
//!
//! [`load_image`] only records a path. The first
//! [`Canvas::draw_image`](crate::canvas::Canvas::draw_image) decodes the file,
//! uploads it as a GPU texture and caches the handle in the resource; later
//! draws reuse the handle.

mod bitmap;
mod decoder;
mod error;
mod resource;

pub use bitmap::Bitmap;
pub use decoder::{FileDecoder, ImageDecoder};
pub use error::ImageError;
pub use resource::{load_image, ImageResource};
