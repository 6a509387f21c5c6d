//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ SortSequencer (domain)
//! ```
//!
//! Driven adapters (sensor, servos, classifier, clock, event sink) implement
//! these traits.  The [`SortSequencer`](super::service::SortSequencer)
//! consumes them via generics (or a boxed [`Classifier`], whose variant is
//! chosen once at startup), so the domain core never touches hardware
//! directly.

use core::time::Duration;

use image::RgbImage;

use crate::classify::preprocess::InputTensor;
use crate::classify::{Classification, ClassifierMode};
use crate::control::Axis;
use crate::error::{ActuatorError, ClassifierError};

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain polls this for item presence.
pub trait SensorPort {
    /// `true` when an item is in front of the sensor.  Implementations
    /// normalise the electrical level; callers never see active-low.
    fn read_presence(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command the two servos.
pub trait ActuatorPort {
    /// Drive `axis` to `position` (duty-cycle percent, already clamped).
    fn set_position(&mut self, axis: Axis, position: f32) -> Result<(), ActuatorError>;

    /// Remove drive from `axis` (zero duty) so the servo stops hunting.
    fn stop(&mut self, axis: Axis) -> Result<(), ActuatorError>;

    /// Stop both axes and release the drive lines.  Must tolerate being
    /// called more than once.
    fn release(&mut self);
}

/// Both halves of the station hardware, as the sequencer needs them.
pub trait Hardware: SensorPort + ActuatorPort {}

impl<T: SensorPort + ActuatorPort> Hardware for T {}

// ───────────────────────────────────────────────────────────────
// Classification ports
// ───────────────────────────────────────────────────────────────

/// Single-shot classification of whatever is in front of the camera.
pub trait Classifier {
    fn classify(&mut self) -> Result<Classification, ClassifierError>;

    fn mode(&self) -> ClassifierMode;
}

/// Still image source for the live classifier.
pub trait Camera {
    fn capture(&mut self) -> Result<RgbImage, ClassifierError>;
}

/// Opaque model: preprocessed tensor in, one score per class out.
pub trait InferenceModel {
    fn infer(&mut self, input: &InputTensor) -> Result<Vec<f32>, ClassifierError>;
}

impl<M: InferenceModel + ?Sized> InferenceModel for Box<M> {
    fn infer(&mut self, input: &InputTensor) -> Result<Vec<f32>, ClassifierError> {
        (**self).infer(input)
    }
}

// ───────────────────────────────────────────────────────────────
// Time port
// ───────────────────────────────────────────────────────────────

/// Blocking delays.  All settle and drop timing goes through here so the
/// sequence can be driven in tests without real time passing.
pub trait Clock {
    /// Block for `duration`.  May return early once a stop is requested.
    fn sleep(&mut self, duration: Duration);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → console)
// ───────────────────────────────────────────────────────────────

/// The domain emits [`AppEvent`](super::events::AppEvent)s through this
/// port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
