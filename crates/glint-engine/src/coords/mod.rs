//! Coordinate types shared by input dispatch and drawing.
//!
//! Two spaces exist:
//! - pixel space: physical window pixels, origin top-left, +Y down
//! - logical space: a fixed `LOGICAL_WIDTH x LOGICAL_HEIGHT` plane, origin
//!   bottom-left, +Y up, independent of the window size
//!
//! `CoordinateMapper` is the only way to go from one to the other.

mod mapper;
mod position;
mod size;

pub use mapper::{CoordinateMapper, LOGICAL_HEIGHT, LOGICAL_WIDTH};
pub use position::Position;
pub use size::PixelSize;
