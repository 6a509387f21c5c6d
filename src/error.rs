//! Unified error types for the sorting controller.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! control loop's error handling uniform.  Recoverable conditions (missing
//! label file, model load failure, out-of-range class index) never reach
//! this type; they are absorbed where they occur and logged.

use core::fmt;
use std::path::PathBuf;

use crate::control::Axis;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the controller funnels into this type.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// An actuator command failed.
    Actuator(ActuatorError),
    /// Image capture or inference failed.
    Classifier(ClassifierError),
    /// Hardware resources could not be acquired.
    Init(String),
    /// Configuration is invalid or could not be loaded.
    Config(String),
    /// The operator requested a stop.  Not a fault: the loop unwinds
    /// through the shutdown path.
    Interrupted,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Actuator(e) => write!(f, "actuator: {e}"),
            Self::Classifier(e) => write!(f, "classifier: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Interrupted => write!(f, "interrupted by operator"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// GPIO read returned an error.
    GpioReadFailed,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GpioReadFailed => write!(f, "GPIO read failed"),
        }
    }
}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// PWM duty-cycle write failed.
    PwmWriteFailed(Axis),
    /// The stop (zero duty) signal could not be applied.
    StopFailed(Axis),
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PwmWriteFailed(axis) => write!(f, "{axis} PWM write failed"),
            Self::StopFailed(axis) => write!(f, "{axis} stop signal failed"),
        }
    }
}

impl From<ActuatorError> for Error {
    fn from(e: ActuatorError) -> Self {
        Self::Actuator(e)
    }
}

// ---------------------------------------------------------------------------
// Classifier errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifierError {
    /// No model file at the configured path.
    ModelNotFound(PathBuf),
    /// The model file exists but could not be loaded.
    ModelLoad(String),
    /// The binary was built without an inference backend.
    BackendUnavailable,
    /// The still-capture tool failed or could not be started.
    Capture(String),
    /// The captured image could not be decoded.
    Decode(String),
    /// Running the model failed.
    Inference(String),
    /// The model produced no scores.
    EmptyOutput,
}

impl fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ModelNotFound(path) => write!(f, "model not found at {}", path.display()),
            Self::ModelLoad(msg) => write!(f, "model load failed: {msg}"),
            Self::BackendUnavailable => write!(f, "built without an inference backend"),
            Self::Capture(msg) => write!(f, "capture failed: {msg}"),
            Self::Decode(msg) => write!(f, "image decode failed: {msg}"),
            Self::Inference(msg) => write!(f, "inference failed: {msg}"),
            Self::EmptyOutput => write!(f, "model returned no scores"),
        }
    }
}

impl std::error::Error for ClassifierError {}

impl From<ClassifierError> for Error {
    fn from(e: ClassifierError) -> Self {
        Self::Classifier(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
