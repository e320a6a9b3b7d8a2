use std::time::{Duration, Instant};

use crate::config::ConfigError;

use super::Clock;

/// Overrun count between two "falling behind" debug messages.
const OVERRUN_LOG_INTERVAL: u64 = 120;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SchedulerState {
    /// Next frame is armed for `deadline`.
    Waiting,
    /// A redraw has been requested or is executing.
    Painting,
}

/// Self-correcting fixed-rate frame scheduler.
///
/// Each iteration records the time around the paint. When the paint took
/// less than the period `P = 1 / fps`, the next frame is armed after the
/// remainder of the budget; otherwise it is armed immediately. Fast frames
/// therefore wait, slow frames shrink or remove the wait.
///
/// Immediate re-arming under sustained overload keeps the loop busy and can
/// starve other event loop work. [`with_min_delay`](Self::with_min_delay)
/// sets a floor for the delay; it defaults to zero.
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    period: Duration,
    min_delay: Duration,
    state: SchedulerState,
    deadline: Option<Instant>,
    frames: u64,
    overruns: u64,
}

impl FrameScheduler {
    /// Creates a scheduler targeting `fps` frames per second.
    pub fn new(fps: f64) -> Result<Self, ConfigError> {
        if !fps.is_finite() {
            return Err(ConfigError::NonFiniteFps(fps));
        }
        if fps <= 0.0 {
            return Err(ConfigError::NonPositiveFps(fps));
        }

        let period =
            Duration::try_from_secs_f64(1.0 / fps).map_err(|_| ConfigError::FpsTooLow(fps))?;

        Ok(Self {
            period,
            min_delay: Duration::ZERO,
            state: SchedulerState::Waiting,
            deadline: None,
            frames: 0,
            overruns: 0,
        })
    }

    /// Sets a lower bound on the delay between frames.
    pub fn with_min_delay(mut self, min_delay: Duration) -> Self {
        self.min_delay = min_delay;
        self
    }

    /// Target frame period.
    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }

    #[inline]
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Instant the next frame is due. `None` until [`arm`](Self::arm).
    #[inline]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Frames painted so far.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Frames that used up their whole budget.
    #[inline]
    pub fn overruns(&self) -> u64 {
        self.overruns
    }

    /// Arms the first frame for `now`.
    pub fn arm(&mut self, now: Instant) {
        self.state = SchedulerState::Waiting;
        self.deadline = Some(now);
    }

    /// True when waiting and the deadline has passed.
    pub fn is_due(&self, now: Instant) -> bool {
        self.state == SchedulerState::Waiting && self.deadline.is_some_and(|d| now >= d)
    }

    /// Marks a redraw as requested from the host event loop.
    ///
    /// Keeps the loop from requesting a second redraw while one is in flight.
    pub fn mark_requested(&mut self) {
        self.state = SchedulerState::Painting;
    }

    /// Delay before the next frame after a paint that took `elapsed`.
    pub fn next_delay(&self, elapsed: Duration) -> Duration {
        let delay = if elapsed < self.period {
            self.period - elapsed
        } else {
            Duration::ZERO
        };
        delay.max(self.min_delay)
    }

    /// Runs one iteration: times `paint`, then arms the next frame.
    ///
    /// Returns the delay chosen for the next frame.
    pub fn run_frame<C, F>(&mut self, clock: &C, paint: F) -> Duration
    where
        C: Clock + ?Sized,
        F: FnOnce(),
    {
        self.state = SchedulerState::Painting;

        let t1 = clock.now();
        paint();
        let t2 = clock.now();

        let elapsed = t2.saturating_duration_since(t1);
        let delay = self.next_delay(elapsed);

        if elapsed >= self.period {
            self.overruns += 1;
            if self.overruns % OVERRUN_LOG_INTERVAL == 1 {
                log::debug!(
                    "frame {} took {:?} (budget {:?}); rescheduling without delay",
                    self.frames,
                    elapsed,
                    self.period,
                );
            }
        }

        self.frames += 1;
        self.deadline = Some(t2 + delay);
        self.state = SchedulerState::Waiting;

        delay
    }
}
