//! Recorded draw stream for one frame.
//!
//! Canvas operations become [`DrawCmd`]s in issue order; renderers replay
//! them in the same order.

mod cmd;
mod list;

pub(crate) use cmd::DrawCmd;
pub(crate) use list::{Batch, BatchKind, DrawList};
