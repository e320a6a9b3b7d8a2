//! Frame pacing.
//!
//! [`FrameScheduler`] measures each paint and derives the delay before the
//! next one from the target period. Time is read through [`Clock`] so the
//! pacing logic runs unchanged against simulated time in tests.

mod clock;
mod frame_scheduler;

pub use clock::{Clock, SystemClock};
pub use frame_scheduler::{FrameScheduler, SchedulerState};
