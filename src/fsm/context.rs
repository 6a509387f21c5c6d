//! Shared mutable context threaded through every FSM handler.
//!
//! `SortContext` owns the station hardware, the classifier, the clock and
//! the event sink, plus the per-cycle scratch state.  State handlers read
//! and write it; nothing else touches the hardware while the FSM runs.

use core::time::Duration;

use log::warn;

use crate::app::events::AppEvent;
use crate::app::ports::{Classifier, Clock, EventSink, Hardware};
use crate::classify::Category;
use crate::config::SystemConfig;
use crate::control::{ActuatorTarget, Axis};
use crate::error::{Error, Result};
use crate::lifecycle::StopSignal;

/// What the current cycle has learned so far.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleState {
    pub category: Category,
    pub confidence: f32,
    /// Set once the recenter step has completed.
    pub sorted: bool,
}

/// The shared context passed to every state handler function.
pub struct SortContext<H, K, E> {
    pub hw: H,
    pub classifier: Box<dyn Classifier>,
    pub clock: K,
    pub sink: E,
    pub stop: StopSignal,
    pub config: SystemConfig,

    /// `None` between cycles.
    pub cycle: Option<CycleState>,
    /// Items routed to a bin since startup.
    pub cycles_completed: u64,
}

impl<H: Hardware, K: Clock, E: EventSink> SortContext<H, K, E> {
    pub fn new(
        config: SystemConfig,
        hw: H,
        classifier: Box<dyn Classifier>,
        clock: K,
        sink: E,
        stop: StopSignal,
    ) -> Self {
        Self {
            hw,
            classifier,
            clock,
            sink,
            stop,
            config,
            cycle: None,
            cycles_completed: 0,
        }
    }

    pub fn emit(&mut self, event: AppEvent) {
        self.sink.emit(&event);
    }

    /// Block for `ms`, then report whether a stop arrived meanwhile.
    pub fn wait_ms(&mut self, ms: u64) -> Result<()> {
        if self.stop.is_raised() {
            return Err(Error::Interrupted);
        }
        self.clock.sleep(Duration::from_millis(ms));
        if self.stop.is_raised() {
            return Err(Error::Interrupted);
        }
        Ok(())
    }

    /// The move primitive: clamp, command, hold for the servo travel time,
    /// then zero the drive on that axis.
    ///
    /// The stop is issued even when the hold is cut short by a stop
    /// request or the position command fails.
    pub fn move_axis(&mut self, axis: Axis, requested: f32) -> Result<()> {
        let target = ActuatorTarget::new(axis, requested, &self.config.servo_range);

        if let Err(e) = self.hw.set_position(target.axis(), target.position()) {
            if let Err(stop_err) = self.hw.stop(target.axis()) {
                warn!("{stop_err} after failed move: {e}");
            }
            return Err(e.into());
        }

        let held = self.wait_ms(self.config.timing.servo_move_ms);
        self.hw.stop(target.axis())?;
        held
    }
}
