//! Outbound application events.
//!
//! The [`SortSequencer`](super::service::SortSequencer) emits these through
//! the [`EventSink`](super::ports::EventSink) port, one per phase of the
//! cycle.  They are informational; nothing parses them.

use crate::classify::{Category, Classification, ClassifierMode};
use crate::error::ClassifierError;
use crate::fsm::StateId;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The sequencer is starting (before the self-test).
    Started { mode: ClassifierMode },

    /// Self-test moves finished; the operator can confirm the servos moved.
    SelfTestComplete,

    /// Polling for items.
    Ready,

    /// The FSM transitioned between states.
    StateChanged { from: StateId, to: StateId },

    /// The presence sensor fired.
    ItemDetected,

    /// Capture and classification under way.
    Analyzing,

    /// Classification result for this cycle.
    Classified(Classification),

    /// One step of the physical sort sequence is starting.
    Step(SortStep),

    /// The item was routed to its bin.
    Sorted { category: Category },

    /// Classification failed; the cycle ended without actuation.
    CycleAborted(ClassifierError),

    /// A stop was requested; cleanup follows.
    ShutdownRequested,
}

/// The four ordered steps of the sort sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortStep {
    MoveToBin { category: Category, position: f32 },
    Drop,
    Retract,
    Recenter,
}
