//! Ordered class label set, loaded once at startup.
//!
//! The file lists one label per line in model output order.  Blank lines
//! are ignored; every other line keeps its slot so that label `i` is
//! always model output `i`.  A missing, unreadable, or empty file is not fatal: the
//! three built-in categories are substituted and a warning is logged.

use std::fs;
use std::path::Path;

use heapless::String;
use log::{info, warn};

use super::Category;

/// Maximum byte length of a single label; longer lines are truncated.
pub const MAX_LABEL_LEN: usize = 32;

pub type Label = String<MAX_LABEL_LEN>;

/// Where the active label set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSource {
    File,
    Default,
}

/// Non-empty, index-addressable list of class labels.
#[derive(Debug, Clone)]
pub struct LabelSet {
    labels: Vec<Label>,
    source: LabelSource,
}

impl LabelSet {
    /// The built-in set: hazardous, organic, recyclable.
    pub fn defaults() -> Self {
        let mut labels = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            let mut label = Label::new();
            // Category names are far shorter than MAX_LABEL_LEN.
            let _ = label.push_str(category.name());
            labels.push(label);
        }
        Self {
            labels,
            source: LabelSource::Default,
        }
    }

    /// Parse label-file text.  Returns `None` when no usable label remains.
    pub fn parse(text: &str) -> Option<Self> {
        let labels: Vec<Label> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(truncated)
            .collect();
        if labels.is_empty() {
            return None;
        }
        Some(Self {
            labels,
            source: LabelSource::File,
        })
    }

    /// Load from `path`, substituting [`LabelSet::defaults`] on any failure.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => match Self::parse(&text) {
                Some(set) => {
                    info!("Labels loaded: {:?}", set.labels);
                    set
                }
                None => {
                    warn!("Labels file {} has no labels, using defaults", path.display());
                    Self::defaults()
                }
            },
            Err(e) => {
                warn!(
                    "Labels file not found at {} ({}), using defaults",
                    path.display(),
                    e
                );
                Self::defaults()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Never true: a `LabelSet` is non-empty by construction.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(Label::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(Label::as_str)
    }

    pub fn source(&self) -> LabelSource {
        self.source
    }

    /// Category for a model output index.
    ///
    /// Out-of-range indices and labels naming no known category resolve
    /// to `default`.
    pub fn category_at(&self, index: usize, default: Category) -> Category {
        let Some(label) = self.get(index) else {
            warn!(
                "Class index {} outside label set of {}, using '{}'",
                index,
                self.len(),
                default
            );
            return default;
        };
        Category::from_label(label).unwrap_or_else(|| {
            warn!("Label '{}' is not a known category, using '{}'", label, default);
            default
        })
    }

    /// Categories in label order, unknown labels mapped to `default`.
    pub fn categories(&self, default: Category) -> impl Iterator<Item = Category> + '_ {
        self.iter()
            .map(move |label| Category::from_label(label).unwrap_or(default))
    }
}

/// Copy `line` into a label, cutting at the last char boundary that fits.
fn truncated(line: &str) -> Label {
    let mut label = Label::new();
    for ch in line.chars() {
        if label.push(ch).is_err() {
            warn!("Label '{}' longer than {} bytes, truncated", line, MAX_LABEL_LEN);
            break;
        }
    }
    label
}
