//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the presence sensor and both servo drivers, exposing them through
//! [`SensorPort`] and [`ActuatorPort`].  Generic over the `embedded-hal`
//! pin types so the same adapter serves the Pi build and host tests.

use embedded_hal::digital::InputPin;
use embedded_hal::pwm::SetDutyCycle;
use log::warn;

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::control::Axis;
use crate::drivers::servo::ServoDriver;
use crate::error::ActuatorError;
use crate::sensors::PresenceSensor;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<I, P> {
    sensor: PresenceSensor<I>,
    horizontal: ServoDriver<P>,
    vertical: ServoDriver<P>,
}

impl<I: InputPin, P: SetDutyCycle> HardwareAdapter<I, P> {
    pub fn new(sensor: PresenceSensor<I>, horizontal: ServoDriver<P>, vertical: ServoDriver<P>) -> Self {
        Self {
            sensor,
            horizontal,
            vertical,
        }
    }

    fn servo(&mut self, axis: Axis) -> &mut ServoDriver<P> {
        match axis {
            Axis::Horizontal => &mut self.horizontal,
            Axis::Vertical => &mut self.vertical,
        }
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<I: InputPin, P: SetDutyCycle> SensorPort for HardwareAdapter<I, P> {
    /// A failed read counts as "nothing there"; the next poll retries.
    fn read_presence(&mut self) -> bool {
        match self.sensor.read() {
            Ok(present) => present,
            Err(e) => {
                warn!("presence sensor: {e}");
                false
            }
        }
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<I: InputPin, P: SetDutyCycle> ActuatorPort for HardwareAdapter<I, P> {
    fn set_position(&mut self, axis: Axis, position: f32) -> Result<(), ActuatorError> {
        self.servo(axis).set_position(position)
    }

    fn stop(&mut self, axis: Axis) -> Result<(), ActuatorError> {
        self.servo(axis).stop()
    }

    fn release(&mut self) {
        for axis in Axis::ALL {
            if let Err(e) = self.servo(axis).stop() {
                warn!("release: {e}");
            }
        }
    }
}
