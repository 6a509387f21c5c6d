//! Waste classification — categories, label set, and the two classifier modes.
//!
//! ```text
//!                      load_classifier()
//!                            │
//!           model loads? ────┼──── no ──▶ FallbackClassifier (round-robin)
//!                            │
//!                           yes
//!                            ▼
//!    LiveClassifier:  Camera ─▶ preprocess ─▶ InferenceModel ─▶ argmax ─▶ LabelSet
//! ```
//!
//! The mode is chosen once at startup and never changes for the lifetime
//! of the process.

pub mod camera;
pub mod fallback;
pub mod labels;
pub mod live;
pub mod preprocess;
#[cfg(feature = "tract")]
pub mod tract_model;

use core::fmt;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::app::ports::{Classifier, InferenceModel};
use crate::config::SystemConfig;
use crate::error::ClassifierError;

use camera::StillCamera;
use fallback::FallbackClassifier;
use labels::LabelSet;
use live::LiveClassifier;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// The fixed, ordered set of waste classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Hazardous,
    Organic,
    Recyclable,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Hazardous, Category::Organic, Category::Recyclable];

    pub fn name(self) -> &'static str {
        match self {
            Self::Hazardous => "hazardous",
            Self::Organic => "organic",
            Self::Recyclable => "recyclable",
        }
    }

    /// Resolve a raw label to a category.
    ///
    /// Accepts the compound `"<index>:<name>"` form written by some training
    /// scripts; only the part after the first `:` is the name.  Matching is
    /// case-insensitive and ignores surrounding whitespace.
    pub fn from_label(label: &str) -> Option<Self> {
        let name = match label.split_once(':') {
            Some((_, suffix)) => suffix,
            None => label,
        }
        .trim();
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Classification result
// ---------------------------------------------------------------------------

/// One classification, valid for a single detection cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub category: Category,
    /// Always within [0, 1].
    pub confidence: f32,
    /// Model output index (live) or round-robin slot (demo).
    pub index: Option<usize>,
}

impl Classification {
    pub fn new(category: Category, confidence: f32, index: Option<usize>) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        Self {
            category,
            confidence,
            index,
        }
    }

    pub fn confidence_percent(&self) -> f32 {
        self.confidence * 100.0
    }
}

/// Which classifier variant is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierMode {
    Live,
    Demo,
}

impl fmt::Display for ClassifierMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Live => write!(f, "live"),
            Self::Demo => write!(f, "demo"),
        }
    }
}

// ---------------------------------------------------------------------------
// Mode selection
// ---------------------------------------------------------------------------

/// Build the classifier for this process.
///
/// Never fails: any problem loading the model downgrades to
/// [`FallbackClassifier`] with a logged diagnostic.
pub fn load_classifier(config: &SystemConfig, labels: LabelSet) -> Box<dyn Classifier> {
    let cc = &config.classifier;
    match load_model(config) {
        Ok(model) => {
            info!("AI model loaded from {}", cc.model_path.display());
            let camera = StillCamera::from_config(cc);
            Box::new(LiveClassifier::new(
                camera,
                model,
                labels,
                cc.input_size,
                config.default_category,
            ))
        }
        Err(e) => {
            warn!("Model unavailable: {e}");
            warn!("Running in DEMO MODE - will cycle through all waste types");
            Box::new(FallbackClassifier::new(
                &labels,
                config.default_category,
                cc.fallback_confidence,
            ))
        }
    }
}

fn load_model(config: &SystemConfig) -> Result<Box<dyn InferenceModel>, ClassifierError> {
    let path = &config.classifier.model_path;
    if !path.is_file() {
        return Err(ClassifierError::ModelNotFound(path.clone()));
    }
    open_backend(config)
}

#[cfg(feature = "tract")]
fn open_backend(config: &SystemConfig) -> Result<Box<dyn InferenceModel>, ClassifierError> {
    let model = tract_model::TractModel::load(
        &config.classifier.model_path,
        config.classifier.input_size,
    )?;
    Ok(Box::new(model))
}

#[cfg(not(feature = "tract"))]
fn open_backend(_config: &SystemConfig) -> Result<Box<dyn InferenceModel>, ClassifierError> {
    Err(ClassifierError::BackendUnavailable)
}
