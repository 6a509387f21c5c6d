//! Raspberry Pi bindings (rppal).
//!
//! Wraps rppal pins in the `embedded-hal` traits the generic drivers
//! consume.  Servo lines use rppal's software PWM on ordinary GPIO, so any
//! pin number works; the timing jitter is acceptable for hobby servos.

use core::convert::Infallible;

use embedded_hal::{digital, pwm};
use log::info;
use rppal::gpio::{Gpio, InputPin, OutputPin};

use crate::adapters::hardware::HardwareAdapter;
use crate::config::SystemConfig;
use crate::control::Axis;
use crate::drivers::servo::ServoDriver;
use crate::error::Error;
use crate::sensors::PresenceSensor;

/// Station hardware as built on a Pi.
pub type RpiHardware = HardwareAdapter<RpiInput, RpiServoPin>;

// ---------------------------------------------------------------------------
// Digital input
// ---------------------------------------------------------------------------

pub struct RpiInput(InputPin);

impl digital::ErrorType for RpiInput {
    type Error = Infallible;
}

impl digital::InputPin for RpiInput {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.0.is_high())
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(self.0.is_low())
    }
}

// ---------------------------------------------------------------------------
// Software PWM output
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct RpiPwmError(rppal::gpio::Error);

impl pwm::Error for RpiPwmError {
    fn kind(&self) -> pwm::ErrorKind {
        pwm::ErrorKind::Other
    }
}

pub struct RpiServoPin {
    pin: OutputPin,
    frequency_hz: f64,
}

impl RpiServoPin {
    const MAX_DUTY: u16 = 10_000;
}

impl pwm::ErrorType for RpiServoPin {
    type Error = RpiPwmError;
}

impl pwm::SetDutyCycle for RpiServoPin {
    fn max_duty_cycle(&self) -> u16 {
        Self::MAX_DUTY
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), RpiPwmError> {
        if duty == 0 {
            self.pin.clear_pwm().map_err(RpiPwmError)?;
            self.pin.set_low();
            return Ok(());
        }
        let fraction = f64::from(duty.min(Self::MAX_DUTY)) / f64::from(Self::MAX_DUTY);
        self.pin
            .set_pwm_frequency(self.frequency_hz, fraction)
            .map_err(RpiPwmError)
    }
}

// ---------------------------------------------------------------------------
// Bring-up
// ---------------------------------------------------------------------------

/// Claim the sensor and both servo pins.  Servo lines start low (no drive).
pub fn init_hardware(config: &SystemConfig) -> Result<RpiHardware, Error> {
    let pins = &config.pins;
    let gpio = Gpio::new().map_err(|e| Error::Init(format!("GPIO: {e}")))?;

    let claim = |n: u8| {
        gpio.get(n)
            .map_err(|e| Error::Init(format!("GPIO{n}: {e}")))
    };

    let sensor = RpiInput(claim(pins.ir_sensor)?.into_input_pullup());
    let horizontal = RpiServoPin {
        pin: claim(pins.servo_horizontal)?.into_output_low(),
        frequency_hz: pins.pwm_frequency_hz,
    };
    let vertical = RpiServoPin {
        pin: claim(pins.servo_vertical)?.into_output_low(),
        frequency_hz: pins.pwm_frequency_hz,
    };

    info!(
        "GPIO ready: sensor GPIO{}, horizontal GPIO{}, vertical GPIO{}",
        pins.ir_sensor, pins.servo_horizontal, pins.servo_vertical
    );

    Ok(HardwareAdapter::new(
        PresenceSensor::new(sensor, pins.sensor_active_low),
        ServoDriver::new(Axis::Horizontal, horizontal),
        ServoDriver::new(Axis::Vertical, vertical),
    ))
}
