//! Actuator drivers and board bring-up.

#[cfg(feature = "rpi")]
pub mod rpi;
pub mod servo;
