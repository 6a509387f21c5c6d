//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by turning application events into the
//! operator-facing console lines.  State changes go to `debug`; everything
//! the operator watches for goes to `info`.

use log::{debug, info, warn};

use crate::app::events::{AppEvent, SortStep};
use crate::app::ports::EventSink;
use crate::classify::ClassifierMode;

/// Adapter that logs every [`AppEvent`] to the console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { mode } => match mode {
                ClassifierMode::Live => info!("Classifier: live model"),
                ClassifierMode::Demo => {
                    info!("Classifier: DEMO MODE - cycling through all waste types");
                }
            },
            AppEvent::SelfTestComplete => info!("Servo self-test complete"),
            AppEvent::Ready => info!("Ready for next item..."),
            AppEvent::StateChanged { from, to } => debug!("STATE | {from} -> {to}"),
            AppEvent::ItemDetected => info!("WASTE DETECTED!"),
            AppEvent::Analyzing => info!("Analyzing waste..."),
            AppEvent::Classified(c) => info!(
                "CLASSIFICATION: {} ({:.1}% confidence)",
                c.category.name().to_uppercase(),
                c.confidence_percent()
            ),
            AppEvent::Step(SortStep::MoveToBin { category, position }) => {
                info!("Moving to {category} bin (duty: {position:.1}%)");
            }
            AppEvent::Step(SortStep::Drop) => info!("Dropping item..."),
            AppEvent::Step(SortStep::Retract) => info!("Resetting dropper..."),
            AppEvent::Step(SortStep::Recenter) => info!("Returning to center..."),
            AppEvent::Sorted { category } => {
                info!("{} waste sorted successfully!", capitalised(category.name()));
                info!("Ready for next item...");
            }
            AppEvent::CycleAborted(e) => {
                warn!("Classification failed ({e}); item not sorted");
                info!("Ready for next item...");
            }
            AppEvent::ShutdownRequested => info!("Shutting down..."),
        }
    }
}

fn capitalised(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
