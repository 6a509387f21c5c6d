//! Demo-mode classifier used when no model could be loaded.
//!
//! Cycles through the label set in order, one category per call, so the
//! whole sense-classify-actuate loop can be exercised on a bench without
//! a camera or model.

use log::debug;

use crate::app::ports::Classifier;
use crate::error::ClassifierError;

use super::labels::LabelSet;
use super::{Category, Classification, ClassifierMode};

pub struct FallbackClassifier {
    cycle: Vec<Category>,
    next: usize,
    confidence: f32,
}

impl FallbackClassifier {
    /// `default` stands in for labels that name no known category.
    pub fn new(labels: &LabelSet, default: Category, confidence: f32) -> Self {
        let mut cycle: Vec<Category> = labels.categories(default).collect();
        if cycle.is_empty() {
            cycle.extend(Category::ALL);
        }
        Self {
            cycle,
            next: 0,
            confidence,
        }
    }

    /// Number of calls made so far.
    pub fn calls(&self) -> usize {
        self.next
    }
}

impl Classifier for FallbackClassifier {
    fn classify(&mut self) -> Result<Classification, ClassifierError> {
        let slot = self.next % self.cycle.len();
        self.next = self.next.wrapping_add(1);
        let category = self.cycle[slot];
        debug!("DEMO MODE: slot {} -> {}", slot, category);
        Ok(Classification::new(category, self.confidence, Some(slot)))
    }

    fn mode(&self) -> ClassifierMode {
        ClassifierMode::Demo
    }
}
