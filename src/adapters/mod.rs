//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to                  |
//! |----------------|--------------------|------------------------------|
//! | `hardware`     | SensorPort         | IR sensor (digital input)    |
//! |                | ActuatorPort       | Two servo PWM lines          |
//! | `log_sink`     | EventSink          | Console log output           |
//! | `clock`        | Clock              | `std::thread::sleep`         |
//!
//! The classifier adapters live under [`crate::classify`].

pub mod clock;
pub mod hardware;
pub mod log_sink;
