//! Actuator targets and the servo travel envelope.
//!
//! Every position handed to a driver is built through
//! [`ActuatorTarget::new`], which clamps against the configured
//! [`ServoRange`].  There is no other constructor, so an unclamped
//! position cannot reach the hardware.

use core::fmt;

use serde::{Deserialize, Serialize};

/// The two independent single-axis actuators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Bin selector.
    Horizontal,
    /// Drop mechanism.
    Vertical,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => write!(f, "horizontal"),
            Self::Vertical => write!(f, "vertical"),
        }
    }
}

/// Safe travel envelope, expressed as PWM duty-cycle percent of a 50 Hz
/// servo frame (2.5 % ≈ 0.5 ms pulse, 12.5 % ≈ 2.5 ms pulse).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ServoRange {
    pub min: f32,
    pub max: f32,
}

impl Default for ServoRange {
    fn default() -> Self {
        Self {
            min: 2.5,
            max: 12.5,
        }
    }
}

impl ServoRange {
    /// Clamp `position` into `[min, max]`.  NaN maps to the midpoint.
    pub fn clamp(&self, position: f32) -> f32 {
        if position.is_nan() {
            return (self.min + self.max) / 2.0;
        }
        position.clamp(self.min, self.max)
    }

    pub fn contains(&self, position: f32) -> bool {
        position >= self.min && position <= self.max
    }
}

/// A clamped position command for one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActuatorTarget {
    axis: Axis,
    position: f32,
}

impl ActuatorTarget {
    pub fn new(axis: Axis, requested: f32, range: &ServoRange) -> Self {
        let position = range.clamp(requested);
        if position != requested {
            log::warn!(
                "{} target {:.2}% outside [{:.1}, {:.1}], clamped to {:.2}%",
                axis,
                requested,
                range.min,
                range.max,
                position
            );
        }
        Self { axis, position }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn position(&self) -> f32 {
        self.position
    }
}
