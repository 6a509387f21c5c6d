//! Wall-clock time adapter.
//!
//! Implements [`Clock`] with `std::thread::sleep`, cut into short slices
//! so a stop request is noticed within one slice instead of at the end of
//! a multi-second settle or drop wait.

use std::thread;
use std::time::{Duration, Instant};

use crate::app::ports::Clock;
use crate::lifecycle::StopSignal;

/// Longest uninterrupted sleep.
const SLICE: Duration = Duration::from_millis(50);

pub struct SystemClock {
    stop: StopSignal,
}

impl SystemClock {
    pub fn new(stop: StopSignal) -> Self {
        Self { stop }
    }
}

impl Clock for SystemClock {
    fn sleep(&mut self, duration: Duration) {
        let deadline = Instant::now() + duration;
        loop {
            if self.stop.is_raised() {
                return;
            }
            let now = Instant::now();
            if now >= deadline {
                return;
            }
            thread::sleep((deadline - now).min(SLICE));
        }
    }
}
