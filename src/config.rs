//! System configuration parameters
//!
//! All tunable parameters for the sorting station.  Defaults match the
//! reference build (SG90-class servos on a Raspberry Pi, IR obstacle sensor).
//! A JSON file may override any subset of fields; missing fields keep their
//! defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::classify::Category;
use crate::control::ServoRange;
use crate::error::{Error, Result};
use crate::pins;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    pub pins: PinConfig,
    /// Safe servo travel; every command is clamped into this range.
    pub servo_range: ServoRange,
    /// Horizontal target per category.
    pub bins: BinPositions,
    /// Named vertical positions.
    pub vertical: VerticalPositions,
    /// Horizontal resting position between cycles.
    pub neutral_position: f32,
    /// Category used when a label is unknown or a class index is out of range.
    pub default_category: Category,
    pub timing: TimingConfig,
    pub classifier: ClassifierConfig,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            pins: PinConfig::default(),
            servo_range: ServoRange::default(),
            bins: BinPositions::default(),
            vertical: VerticalPositions::default(),
            // The organic slot doubles as centre.
            neutral_position: 7.5,
            default_category: Category::Organic,
            timing: TimingConfig::default(),
            classifier: ClassifierConfig::default(),
        }
    }
}

/// GPIO wiring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinConfig {
    pub ir_sensor: u8,
    pub servo_horizontal: u8,
    pub servo_vertical: u8,
    /// The IR module pulls its output low when an object is present.
    pub sensor_active_low: bool,
    pub pwm_frequency_hz: f64,
}

impl Default for PinConfig {
    fn default() -> Self {
        Self {
            ir_sensor: pins::IR_SENSOR_GPIO,
            servo_horizontal: pins::SERVO_HORIZONTAL_GPIO,
            servo_vertical: pins::SERVO_VERTICAL_GPIO,
            sensor_active_low: true,
            pwm_frequency_hz: pins::SERVO_PWM_FREQ_HZ,
        }
    }
}

/// Horizontal duty-cycle target for each bin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinPositions {
    pub hazardous: f32,
    pub organic: f32,
    pub recyclable: f32,
}

impl Default for BinPositions {
    fn default() -> Self {
        Self {
            hazardous: 5.0,   // left
            organic: 7.5,     // centre
            recyclable: 10.0, // right
        }
    }
}

impl BinPositions {
    pub fn position(&self, category: Category) -> f32 {
        match category {
            Category::Hazardous => self.hazardous,
            Category::Organic => self.organic,
            Category::Recyclable => self.recyclable,
        }
    }
}

/// Vertical duty-cycle targets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerticalPositions {
    pub up: f32,
    pub down: f32,
}

impl Default for VerticalPositions {
    fn default() -> Self {
        Self {
            up: 7.5,
            down: 12.0,
        }
    }
}

/// Delays of the sort cycle, in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Idle polling cadence, also the hold-off after a completed sort.
    pub poll_interval_ms: u64,
    /// Time for the operator to position the item before capture.
    pub settle_delay_ms: u64,
    /// Hold after every position command before the stop signal.
    pub servo_move_ms: u64,
    /// Extra wait after the bin selector has moved.
    pub bin_buffer_ms: u64,
    /// Wait after the drop for the item to clear the tray.
    pub drop_wait_ms: u64,
    /// Wait after retracting the tray before recentring.
    pub retract_buffer_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
            settle_delay_ms: 3000,
            servo_move_ms: 800,
            bin_buffer_ms: 1000,
            drop_wait_ms: 2000,
            retract_buffer_ms: 1000,
        }
    }
}

/// Classifier resources and still-capture settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub model_path: PathBuf,
    pub labels_path: PathBuf,
    /// Square model input resolution.
    pub input_size: u32,
    /// Confidence reported by demo mode.
    pub fallback_confidence: f32,
    /// Still-capture tool (libcamera apps).
    pub camera_command: String,
    pub capture_width: u32,
    pub capture_height: u32,
    /// Exposure / white-balance settling before the shot.
    pub camera_warmup_ms: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("waste_model.tflite"),
            labels_path: PathBuf::from("class_indices.txt"),
            input_size: 128,
            fallback_confidence: 0.95,
            camera_command: "rpicam-still".into(),
            // Native 4:3 binned mode of the OV5647.
            capture_width: 1296,
            capture_height: 972,
            camera_warmup_ms: 2000,
        }
    }
}

impl SystemConfig {
    /// Parse a JSON document.  Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::Config(format!("invalid JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }

    /// Reject values that would drive the hardware outside its envelope
    /// or stall the loop.
    pub fn validate(&self) -> Result<()> {
        let range = &self.servo_range;
        if !(range.min < range.max) {
            return Err(Error::Config("servo_range.min must be below servo_range.max".into()));
        }
        let named = [
            ("bins.hazardous", self.bins.hazardous),
            ("bins.organic", self.bins.organic),
            ("bins.recyclable", self.bins.recyclable),
            ("vertical.up", self.vertical.up),
            ("vertical.down", self.vertical.down),
            ("neutral_position", self.neutral_position),
        ];
        for (name, value) in named {
            if !range.contains(value) {
                return Err(Error::Config(format!(
                    "{name}={value} outside servo range [{}, {}]",
                    range.min, range.max
                )));
            }
        }
        if self.timing.poll_interval_ms == 0 {
            return Err(Error::Config("timing.poll_interval_ms must be non-zero".into()));
        }
        let p = &self.pins;
        if p.ir_sensor == p.servo_horizontal
            || p.ir_sensor == p.servo_vertical
            || p.servo_horizontal == p.servo_vertical
        {
            return Err(Error::Config("pin assignments must be distinct".into()));
        }
        if !(p.pwm_frequency_hz > 0.0) {
            return Err(Error::Config("pins.pwm_frequency_hz must be positive".into()));
        }
        if self.classifier.input_size == 0 {
            return Err(Error::Config("classifier.input_size must be non-zero".into()));
        }
        if !(0.0..=1.0).contains(&self.classifier.fallback_confidence) {
            return Err(Error::Config("classifier.fallback_confidence must be in [0, 1]".into()));
        }
        Ok(())
    }
}
