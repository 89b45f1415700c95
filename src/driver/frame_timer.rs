use std::time::{Duration, Instant};

use super::Ticker;

/// Caps the loop at the session's current tick rate.
///
/// Time already spent on input, update and render counts against the
/// budget, so the wait only covers whatever is left.
pub struct FrameTimer {
    last_frame: Instant,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
        }
    }

    /// Length of one tick at `speed` ticks per second
    pub fn frame_budget(speed: f64) -> Duration {
        if speed.is_finite() && speed > 0.0 {
            Duration::from_secs_f64(1.0 / speed)
        } else {
            Duration::ZERO
        }
    }

    /// How long to block given the time already spent this frame
    pub fn remaining(speed: f64, spent: Duration) -> Duration {
        Self::frame_budget(speed)
            .checked_sub(spent)
            .unwrap_or(Duration::ZERO)
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl Ticker for FrameTimer {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn wait_for_next_frame(&mut self, speed: f64) {
        let remaining = Self::remaining(speed, self.last_frame.elapsed());
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
        self.last_frame = Instant::now();
    }
}
