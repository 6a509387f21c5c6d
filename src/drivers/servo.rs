//! Hobby servo driver (SG90 class) on a 50 Hz PWM line.
//!
//! Positions are expressed as duty-cycle percent of the 20 ms frame, the
//! way servo datasheets quote them: 2.5 % ≈ 0°, 7.5 % ≈ 90°, 12.5 % ≈ 180°.
//! A duty of zero removes the drive so the servo stops hunting and buzzing.
//!
//! Generic over any `embedded_hal::pwm::SetDutyCycle`.

use embedded_hal::pwm::SetDutyCycle;

use crate::control::Axis;
use crate::error::ActuatorError;

/// Resolution used when converting percent to a duty fraction.
const DUTY_DENOMINATOR: u16 = 10_000;

/// Current drive state of one servo line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ServoState {
    Idle,
    Holding(f32),
}

pub struct ServoDriver<P> {
    axis: Axis,
    pwm: P,
    state: ServoState,
}

impl<P: SetDutyCycle> ServoDriver<P> {
    pub fn new(axis: Axis, pwm: P) -> Self {
        Self {
            axis,
            pwm,
            state: ServoState::Idle,
        }
    }

    /// Drive to `percent` duty.  Callers clamp to the safe range first.
    pub fn set_position(&mut self, percent: f32) -> Result<(), ActuatorError> {
        let num = (percent.clamp(0.0, 100.0) * 100.0).round() as u16;
        self.pwm
            .set_duty_cycle_fraction(num, DUTY_DENOMINATOR)
            .map_err(|_| ActuatorError::PwmWriteFailed(self.axis))?;
        self.state = ServoState::Holding(percent);
        Ok(())
    }

    /// Zero the duty cycle.
    pub fn stop(&mut self) -> Result<(), ActuatorError> {
        self.pwm
            .set_duty_cycle_fully_off()
            .map_err(|_| ActuatorError::StopFailed(self.axis))?;
        self.state = ServoState::Idle;
        Ok(())
    }

    pub fn state(&self) -> ServoState {
        self.state
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }
}
