//! Application service — the hexagonal core.
//!
//! [`SortSequencer`] owns the FSM and the shared context (hardware,
//! classifier, clock, sink).  All I/O flows through port traits, so the
//! whole cycle runs against mock adapters in tests.
//!
//! ```text
//!  SensorPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                 │     SortSequencer      │
//! ActuatorPort ◀──│  FSM · self-test       │ ◀── Classifier
//!                 └────────────────────────┘
//! ```

use log::info;

use crate::classify::ClassifierMode;
use crate::config::SystemConfig;
use crate::control::Axis;
use crate::error::{Error, Result};
use crate::fsm::context::SortContext;
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};
use crate::lifecycle::StopSignal;

use super::events::AppEvent;
use super::ports::{Classifier, Clock, EventSink, Hardware};

// ───────────────────────────────────────────────────────────────
// SortSequencer
// ───────────────────────────────────────────────────────────────

/// Drives the detect → classify → sort cycle until a stop is requested.
pub struct SortSequencer<H, K, E> {
    fsm: Fsm<SortContext<H, K, E>>,
    ctx: SortContext<H, K, E>,
    started: bool,
}

impl<H: Hardware, K: Clock, E: EventSink> SortSequencer<H, K, E> {
    /// Construct the sequencer.  Does **not** move anything; call
    /// [`start`](Self::start) next.
    pub fn new(
        config: SystemConfig,
        hw: H,
        classifier: Box<dyn Classifier>,
        clock: K,
        sink: E,
        stop: StopSignal,
    ) -> Self {
        let ctx = SortContext::new(config, hw, classifier, clock, sink, stop);
        let fsm = Fsm::new(build_state_table(), StateId::Idle);
        Self {
            fsm,
            ctx,
            started: false,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Announce the mode, run the servo self-test, and enter Idle.
    ///
    /// The self-test drives the horizontal axis to neutral and the
    /// vertical axis up, each through the normal move primitive.
    pub fn start(&mut self) -> Result<()> {
        if self.ctx.stop.is_raised() {
            return Err(Error::Interrupted);
        }
        let mode = self.ctx.classifier.mode();
        self.ctx.emit(AppEvent::Started { mode });

        let neutral = self.ctx.config.neutral_position;
        let up = self.ctx.config.vertical.up;
        info!("Self-test: centring servos");
        self.ctx.move_axis(Axis::Horizontal, neutral)?;
        self.ctx.move_axis(Axis::Vertical, up)?;
        self.ctx.emit(AppEvent::SelfTestComplete);

        self.fsm.start(&mut self.ctx);
        self.started = true;
        self.ctx.emit(AppEvent::Ready);
        Ok(())
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Advance the cycle by one FSM step.
    ///
    /// Returns [`Error::Interrupted`] once a stop has been requested; the
    /// FSM stays in whatever state it was in.
    pub fn tick(&mut self) -> Result<()> {
        if self.ctx.stop.is_raised() {
            return Err(Error::Interrupted);
        }
        if let Some((from, to)) = self.fsm.tick(&mut self.ctx)? {
            self.ctx.emit(AppEvent::StateChanged { from, to });
        }
        Ok(())
    }

    /// Start if needed, then tick until a stop is requested.  A stop,
    /// including one during the self-test, is a clean exit; any other
    /// error propagates.
    pub fn run(&mut self) -> Result<()> {
        match self.drive() {
            Err(Error::Interrupted) => {
                info!(
                    "Stopping in {} after {} sorted item(s)",
                    self.fsm.current_state(),
                    self.ctx.cycles_completed
                );
                self.ctx.emit(AppEvent::ShutdownRequested);
                Ok(())
            }
            other => other,
        }
    }

    fn drive(&mut self) -> Result<()> {
        if !self.started {
            self.start()?;
        }
        loop {
            self.tick()?;
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    pub fn cycles_completed(&self) -> u64 {
        self.ctx.cycles_completed
    }

    pub fn classifier_mode(&self) -> ClassifierMode {
        self.ctx.classifier.mode()
    }

    pub fn hardware(&self) -> &H {
        &self.ctx.hw
    }

    pub fn hardware_mut(&mut self) -> &mut H {
        &mut self.ctx.hw
    }

    pub fn sink(&self) -> &E {
        &self.ctx.sink
    }

    /// Give the hardware back, e.g. to shut it down explicitly.
    pub fn into_hardware(self) -> H {
        self.ctx.hw
    }
}
