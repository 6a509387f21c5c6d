//! Mock adapters for integration tests.
//!
//! Every mock records into shared `Rc<RefCell<..>>` logs so a test can
//! inspect the history after the hardware has moved into the sequencer
//! (and from there into the shutdown guard).

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use wastesort::app::events::AppEvent;
use wastesort::app::ports::{ActuatorPort, Classifier, Clock, EventSink, SensorPort};
use wastesort::app::service::SortSequencer;
use wastesort::classify::fallback::FallbackClassifier;
use wastesort::classify::labels::LabelSet;
use wastesort::classify::{Category, Classification, ClassifierMode};
use wastesort::config::SystemConfig;
use wastesort::control::Axis;
use wastesort::error::{ActuatorError, ClassifierError};
use wastesort::lifecycle::{ShutdownGuard, StopSignal};

pub type Shared<T> = Rc<RefCell<Vec<T>>>;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActuatorCall {
    Set { axis: Axis, position: f32 },
    Stop(Axis),
    Release,
}

// ── MockHardware ──────────────────────────────────────────────

/// Scripted presence readings plus a log of every actuator call.
///
/// When the presence script runs out the mock raises `stop_when_done`
/// (if set) and reports "nothing there" from then on.
pub struct MockHardware {
    pub calls: Shared<ActuatorCall>,
    presence: VecDeque<bool>,
    stop_when_done: Option<StopSignal>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new(presence: &[bool]) -> Self {
        Self {
            calls: Rc::default(),
            presence: presence.iter().copied().collect(),
            stop_when_done: None,
        }
    }

    pub fn stop_when_done(mut self, stop: StopSignal) -> Self {
        self.stop_when_done = Some(stop);
        self
    }
}

impl SensorPort for MockHardware {
    fn read_presence(&mut self) -> bool {
        match self.presence.pop_front() {
            Some(present) => present,
            None => {
                if let Some(stop) = &self.stop_when_done {
                    stop.raise();
                }
                false
            }
        }
    }
}

impl ActuatorPort for MockHardware {
    fn set_position(&mut self, axis: Axis, position: f32) -> Result<(), ActuatorError> {
        self.calls
            .borrow_mut()
            .push(ActuatorCall::Set { axis, position });
        Ok(())
    }

    fn stop(&mut self, axis: Axis) -> Result<(), ActuatorError> {
        self.calls.borrow_mut().push(ActuatorCall::Stop(axis));
        Ok(())
    }

    fn release(&mut self) {
        self.calls.borrow_mut().push(ActuatorCall::Release);
    }
}

// ── MockClock ─────────────────────────────────────────────────

/// Records requested sleeps; no real time passes.  Optionally raises the
/// stop signal during the N-th sleep (1-based).
pub struct MockClock {
    pub sleeps: Shared<Duration>,
    stop: StopSignal,
    raise_on: Option<usize>,
}

#[allow(dead_code)]
impl MockClock {
    pub fn new(stop: StopSignal) -> Self {
        Self {
            sleeps: Rc::default(),
            stop,
            raise_on: None,
        }
    }

    pub fn raise_on_sleep(mut self, n: usize) -> Self {
        self.raise_on = Some(n);
        self
    }
}

impl Clock for MockClock {
    fn sleep(&mut self, duration: Duration) {
        let mut sleeps = self.sleeps.borrow_mut();
        sleeps.push(duration);
        if self.raise_on == Some(sleeps.len()) {
            self.stop.raise();
        }
    }
}

// ── Event sink ────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Shared<AppEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

// ── Scripted classifier ───────────────────────────────────────

/// Returns queued results in order; a shared counter tracks calls.
pub struct ScriptedClassifier {
    results: VecDeque<Result<Classification, ClassifierError>>,
    pub calls: Rc<RefCell<usize>>,
}

#[allow(dead_code)]
impl ScriptedClassifier {
    pub fn new(results: Vec<Result<Classification, ClassifierError>>) -> Self {
        Self {
            results: results.into(),
            calls: Rc::default(),
        }
    }

    pub fn always(category: Category, confidence: f32) -> Self {
        Self::new(vec![Ok(Classification::new(category, confidence, Some(0))); 16])
    }
}

impl Classifier for ScriptedClassifier {
    fn classify(&mut self) -> Result<Classification, ClassifierError> {
        *self.calls.borrow_mut() += 1;
        self.results
            .pop_front()
            .unwrap_or(Err(ClassifierError::EmptyOutput))
    }

    fn mode(&self) -> ClassifierMode {
        ClassifierMode::Live
    }
}

// ── Harness ───────────────────────────────────────────────────

pub type TestSequencer = SortSequencer<ShutdownGuard<MockHardware>, MockClock, RecordingSink>;

/// Handles onto everything the mocks record.
pub struct Probes {
    pub calls: Shared<ActuatorCall>,
    pub sleeps: Shared<Duration>,
    pub events: Shared<AppEvent>,
    pub stop: StopSignal,
}

#[allow(dead_code)]
impl Probes {
    pub fn calls(&self) -> Vec<ActuatorCall> {
        self.calls.borrow().clone()
    }

    pub fn sleeps_ms(&self) -> Vec<u64> {
        self.sleeps
            .borrow()
            .iter()
            .map(|d| d.as_millis() as u64)
            .collect()
    }

    pub fn events(&self) -> Vec<AppEvent> {
        self.events.borrow().clone()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
        self.sleeps.borrow_mut().clear();
        self.events.borrow_mut().clear();
    }
}

/// Build a sequencer over mocks.  The stop signal is raised once the
/// presence script is exhausted, or during sleep `raise_on` if given.
pub fn build(
    presence: &[bool],
    classifier: Box<dyn Classifier>,
    raise_on: Option<usize>,
) -> (TestSequencer, Probes) {
    build_with_config(SystemConfig::default(), presence, classifier, raise_on)
}

pub fn build_with_config(
    config: SystemConfig,
    presence: &[bool],
    classifier: Box<dyn Classifier>,
    raise_on: Option<usize>,
) -> (TestSequencer, Probes) {
    let stop = StopSignal::new();
    let hw = MockHardware::new(presence).stop_when_done(stop.clone());
    let mut clock = MockClock::new(stop.clone());
    if let Some(n) = raise_on {
        clock = clock.raise_on_sleep(n);
    }
    let sink = RecordingSink::default();

    let probes = Probes {
        calls: hw.calls.clone(),
        sleeps: clock.sleeps.clone(),
        events: sink.events.clone(),
        stop: stop.clone(),
    };

    let sequencer = SortSequencer::new(
        config,
        ShutdownGuard::new(hw),
        classifier,
        clock,
        sink,
        stop,
    );
    (sequencer, probes)
}

#[allow(dead_code)]
pub fn demo_classifier() -> Box<dyn Classifier> {
    Box::new(FallbackClassifier::new(
        &LabelSet::defaults(),
        Category::Organic,
        0.95,
    ))
}
