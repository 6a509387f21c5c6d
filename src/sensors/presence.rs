//! IR obstacle sensor on a single digital input.
//!
//! The common FC-51 style modules pull their output LOW when something
//! reflects the beam.  [`PresenceSensor`] hides that polarity so the rest
//! of the system only sees "item present".
//!
//! Generic over any `embedded_hal::digital::InputPin`; the Pi build
//! plugs in an rppal pin, tests plug in a scripted mock.

use embedded_hal::digital::InputPin;

use crate::error::SensorError;

pub struct PresenceSensor<I> {
    pin: I,
    active_low: bool,
    last: bool,
}

impl<I: InputPin> PresenceSensor<I> {
    pub fn new(pin: I, active_low: bool) -> Self {
        Self {
            pin,
            active_low,
            last: false,
        }
    }

    /// Sample the pin once.  `true` means an item is in front of the sensor.
    pub fn read(&mut self) -> Result<bool, SensorError> {
        let level_low = self
            .pin
            .is_low()
            .map_err(|_| SensorError::GpioReadFailed)?;
        self.last = level_low == self.active_low;
        Ok(self.last)
    }

    /// Result of the most recent successful read.
    pub fn last(&self) -> bool {
        self.last
    }
}
