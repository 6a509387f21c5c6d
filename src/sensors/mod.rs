//! Sensor drivers.
//!
//! The station has a single input: the IR presence sensor in front of
//! the tray.

pub mod presence;

pub use presence::PresenceSensor;
