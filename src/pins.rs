//! GPIO pin assignments (BCM numbering) for the sorting station.
//!
//! Single source of truth for the default wiring.  The values flow into
//! [`PinConfig::default`](crate::config::PinConfig) and can be overridden
//! from the config file when a unit is wired differently.

// ---------------------------------------------------------------------------
// Presence sensor (IR obstacle module)
// ---------------------------------------------------------------------------

/// Digital input from the IR obstacle sensor.
/// LOW = object in front of the sensor, HIGH = clear.
pub const IR_SENSOR_GPIO: u8 = 17;

// ---------------------------------------------------------------------------
// Servos (50 Hz hobby servos, software PWM)
// ---------------------------------------------------------------------------

/// Horizontal servo — selects the bin (left / centre / right).
pub const SERVO_HORIZONTAL_GPIO: u8 = 18;
/// Vertical servo — tips the tray to drop the item.
pub const SERVO_VERTICAL_GPIO: u8 = 13;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// Standard hobby-servo frame rate.
pub const SERVO_PWM_FREQ_HZ: f64 = 50.0;
