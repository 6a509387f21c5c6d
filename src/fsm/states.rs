//! Concrete state handler functions and table builder.
//!
//! Each state is defined by plain `fn` pointers, monomorphised over the
//! hardware, clock and sink types.  One item flows through the table per
//! cycle:
//!
//! ```text
//!  IDLE ──[presence]──▶ DETECTED ──[settle]──▶ CAPTURING
//!    ▲                                            │
//!    │                          [classified]  [classifier error]
//!    │                                ▼           │
//!    │                           CLASSIFIED       │
//!    │                                │           │
//!    │                                ▼           │
//!    │                            SORTING         │
//!    │                 bin → drop → retract → centre
//!    │                                │           │
//!    │                                ▼           ▼
//!    └─────────[poll interval]───── RESETTING ◀───┘
//! ```
//!
//! Any blocking wait that observes a stop request returns
//! [`Error::Interrupted`](crate::error::Error::Interrupted), which unwinds
//! out of the FSM to the sequencer.

use log::{info, warn};

use super::context::{CycleState, SortContext};
use super::{StateDescriptor, StateId};
use crate::app::events::{AppEvent, SortStep};
use crate::app::ports::{Clock, EventSink, Hardware};
use crate::control::Axis;
use crate::error::Result;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the state table.  Called once at startup.
pub fn build_state_table<H, K, E>() -> [StateDescriptor<SortContext<H, K, E>>; StateId::COUNT]
where
    H: Hardware,
    K: Clock,
    E: EventSink,
{
    [
        StateDescriptor {
            id: StateId::Idle,
            name: "Idle",
            on_enter: Some(idle_enter),
            on_exit: None,
            on_update: idle_update,
        },
        StateDescriptor {
            id: StateId::Detected,
            name: "Detected",
            on_enter: Some(detected_enter),
            on_exit: None,
            on_update: detected_update,
        },
        StateDescriptor {
            id: StateId::Capturing,
            name: "Capturing",
            on_enter: Some(capturing_enter),
            on_exit: None,
            on_update: capturing_update,
        },
        StateDescriptor {
            id: StateId::Classified,
            name: "Classified",
            on_enter: Some(classified_enter),
            on_exit: None,
            on_update: classified_update,
        },
        StateDescriptor {
            id: StateId::Sorting,
            name: "Sorting",
            on_enter: None,
            on_exit: None,
            on_update: sorting_update,
        },
        StateDescriptor {
            id: StateId::Resetting,
            name: "Resetting",
            on_enter: Some(resetting_enter),
            on_exit: None,
            on_update: resetting_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE — polling the presence sensor
// ═══════════════════════════════════════════════════════════════════════════

fn idle_enter<H: Hardware, K: Clock, E: EventSink>(ctx: &mut SortContext<H, K, E>) {
    ctx.cycle = None;
}

fn idle_update<H: Hardware, K: Clock, E: EventSink>(
    ctx: &mut SortContext<H, K, E>,
) -> Result<Option<StateId>> {
    if ctx.hw.read_presence() {
        return Ok(Some(StateId::Detected));
    }
    let poll = ctx.config.timing.poll_interval_ms;
    ctx.wait_ms(poll)?;
    Ok(None)
}

// ═══════════════════════════════════════════════════════════════════════════
//  DETECTED — give the operator time to let go of the item
// ═══════════════════════════════════════════════════════════════════════════

fn detected_enter<H: Hardware, K: Clock, E: EventSink>(ctx: &mut SortContext<H, K, E>) {
    info!(
        "DETECTED: settling for {} ms",
        ctx.config.timing.settle_delay_ms
    );
    ctx.emit(AppEvent::ItemDetected);
}

fn detected_update<H: Hardware, K: Clock, E: EventSink>(
    ctx: &mut SortContext<H, K, E>,
) -> Result<Option<StateId>> {
    let settle = ctx.config.timing.settle_delay_ms;
    ctx.wait_ms(settle)?;
    Ok(Some(StateId::Capturing))
}

// ═══════════════════════════════════════════════════════════════════════════
//  CAPTURING — one classification per cycle
// ═══════════════════════════════════════════════════════════════════════════

fn capturing_enter<H: Hardware, K: Clock, E: EventSink>(ctx: &mut SortContext<H, K, E>) {
    ctx.emit(AppEvent::Analyzing);
}

fn capturing_update<H: Hardware, K: Clock, E: EventSink>(
    ctx: &mut SortContext<H, K, E>,
) -> Result<Option<StateId>> {
    match ctx.classifier.classify() {
        Ok(result) => {
            ctx.cycle = Some(CycleState {
                category: result.category,
                confidence: result.confidence,
                sorted: false,
            });
            ctx.emit(AppEvent::Classified(result));
            Ok(Some(StateId::Classified))
        }
        Err(e) => {
            warn!("CAPTURING: classification failed, item left in place: {e}");
            ctx.emit(AppEvent::CycleAborted(e));
            Ok(Some(StateId::Resetting))
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  CLASSIFIED — category fixed for the rest of the cycle
// ═══════════════════════════════════════════════════════════════════════════

fn classified_enter<H: Hardware, K: Clock, E: EventSink>(ctx: &mut SortContext<H, K, E>) {
    if let Some(cycle) = ctx.cycle {
        info!(
            "CLASSIFIED: {} ({:.1}%)",
            cycle.category,
            cycle.confidence * 100.0
        );
    }
}

fn classified_update<H: Hardware, K: Clock, E: EventSink>(
    _ctx: &mut SortContext<H, K, E>,
) -> Result<Option<StateId>> {
    Ok(Some(StateId::Sorting))
}

// ═══════════════════════════════════════════════════════════════════════════
//  SORTING — the four physical steps, strictly in order
// ═══════════════════════════════════════════════════════════════════════════

fn sorting_update<H: Hardware, K: Clock, E: EventSink>(
    ctx: &mut SortContext<H, K, E>,
) -> Result<Option<StateId>> {
    let Some(cycle) = ctx.cycle else {
        warn!("SORTING: entered without a classification");
        return Ok(Some(StateId::Resetting));
    };

    let timing = ctx.config.timing.clone();
    let bin = ctx.config.bins.position(cycle.category);
    let vertical = ctx.config.vertical;
    let neutral = ctx.config.neutral_position;

    ctx.emit(AppEvent::Step(SortStep::MoveToBin {
        category: cycle.category,
        position: bin,
    }));
    ctx.move_axis(Axis::Horizontal, bin)?;
    ctx.wait_ms(timing.bin_buffer_ms)?;

    ctx.emit(AppEvent::Step(SortStep::Drop));
    ctx.move_axis(Axis::Vertical, vertical.down)?;
    ctx.wait_ms(timing.drop_wait_ms)?;

    ctx.emit(AppEvent::Step(SortStep::Retract));
    ctx.move_axis(Axis::Vertical, vertical.up)?;
    ctx.wait_ms(timing.retract_buffer_ms)?;

    ctx.emit(AppEvent::Step(SortStep::Recenter));
    ctx.move_axis(Axis::Horizontal, neutral)?;

    if let Some(cycle) = ctx.cycle.as_mut() {
        cycle.sorted = true;
    }
    Ok(Some(StateId::Resetting))
}

// ═══════════════════════════════════════════════════════════════════════════
//  RESETTING — close out the cycle, hold off before polling again
// ═══════════════════════════════════════════════════════════════════════════

fn resetting_enter<H: Hardware, K: Clock, E: EventSink>(ctx: &mut SortContext<H, K, E>) {
    if let Some(cycle) = ctx.cycle.take() {
        if cycle.sorted {
            ctx.cycles_completed += 1;
            ctx.emit(AppEvent::Sorted {
                category: cycle.category,
            });
        }
    }
}

fn resetting_update<H: Hardware, K: Clock, E: EventSink>(
    ctx: &mut SortContext<H, K, E>,
) -> Result<Option<StateId>> {
    let poll = ctx.config.timing.poll_interval_ms;
    ctx.wait_ms(poll)?;
    Ok(Some(StateId::Idle))
}
