//! Function-pointer finite state machine engine.
//!
//! Classic embedded FSM pattern ported to Rust:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  StateTable                                                 │
//! │  ┌────────────┬───────────┬──────────┬────────────────────┐ │
//! │  │ StateId    │ on_enter  │ on_exit  │ on_update          │ │
//! │  ├────────────┼───────────┼──────────┼────────────────────┤ │
//! │  │ Idle       │ fn(ctx)   │ -        │ fn(ctx)->Result<>  │ │
//! │  │ Detected   │ fn(ctx)   │ -        │ fn(ctx)->Result<>  │ │
//! │  │ Capturing  │ fn(ctx)   │ -        │ fn(ctx)->Result<>  │ │
//! │  │ Classified │ fn(ctx)   │ -        │ fn(ctx)->Result<>  │ │
//! │  │ Sorting    │ -         │ -        │ fn(ctx)->Result<>  │ │
//! │  │ Resetting  │ fn(ctx)   │ -        │ fn(ctx)->Result<>  │ │
//! │  └────────────┴───────────┴──────────┴────────────────────┘ │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each tick the engine calls `on_update` for the **current** state.
//! If it returns `Ok(Some(next_id))`, the engine runs `on_exit` for the
//! current state, then `on_enter` for the next, and updates the current
//! pointer.  An `Err` leaves the FSM where it is and propagates.
//!
//! The engine is generic over its context type; the sort cycle's context
//! and handlers live in [`context`] and [`states`].

pub mod context;
pub mod states;

use core::fmt;

use log::info;

use crate::error::Result;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Enumeration of all states of the sort cycle.
/// Must stay in sync with the state table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    Idle = 0,
    Detected = 1,
    Capturing = 2,
    Classified = 3,
    Sorting = 4,
    Resetting = 5,
}

impl StateId {
    /// Total number of states — used to size the table array.
    pub const COUNT: usize = 6;

    /// Convert an index back to `StateId`.  Panics on out-of-range in
    /// debug builds; returns `Idle` in release.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Idle,
            1 => Self::Detected,
            2 => Self::Capturing,
            3 => Self::Classified,
            4 => Self::Sorting,
            5 => Self::Resetting,
            _ => {
                debug_assert!(false, "invalid state index: {idx}");
                Self::Idle
            }
        }
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "IDLE",
            Self::Detected => "DETECTED",
            Self::Capturing => "CAPTURING",
            Self::Classified => "CLASSIFIED",
            Self::Sorting => "SORTING",
            Self::Resetting => "RESETTING",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
/// These run exactly once on each state transition.
pub type StateActionFn<C> = fn(&mut C);

/// Signature for the per-tick update handler.
/// Returns `Ok(Some(next))` to trigger a transition, or `Ok(None)` to stay.
pub type StateUpdateFn<C> = fn(&mut C) -> Result<Option<StateId>>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single FSM state.
pub struct StateDescriptor<C> {
    pub id: StateId,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn<C>>,
    pub on_exit: Option<StateActionFn<C>>,
    pub on_update: StateUpdateFn<C>,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The finite state machine engine.
///
/// Owns the state table; the context is threaded through every handler
/// call by the owner.
pub struct Fsm<C> {
    /// Fixed-size table indexed by `StateId as usize`.
    table: [StateDescriptor<C>; StateId::COUNT],
    /// Index of the currently active state.
    current: usize,
}

impl<C> Fsm<C> {
    /// Construct a new FSM with the given state table, starting in `initial`.
    pub fn new(table: [StateDescriptor<C>; StateId::COUNT], initial: StateId) -> Self {
        debug_assert!(
            table.iter().enumerate().all(|(i, d)| d.id as usize == i),
            "state table out of order"
        );
        Self {
            table,
            current: initial as usize,
        }
    }

    /// Run the initial `on_enter` for the starting state.
    /// Call once after construction, before the first `tick()`.
    pub fn start(&mut self, ctx: &mut C) {
        info!("FSM starting in state: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Advance the FSM by one tick.
    ///
    /// 1. Call `on_update` for the current state.
    /// 2. If it returns `Some(next)`, execute the transition:
    ///    `on_exit(current)` → update pointer → `on_enter(next)`.
    /// 3. Return the transition taken, if any.
    pub fn tick(&mut self, ctx: &mut C) -> Result<Option<(StateId, StateId)>> {
        let from = self.current_state();

        let next = (self.table[self.current].on_update)(ctx)?;

        match next {
            Some(to) if to != from => {
                self.transition(to, ctx);
                Ok(Some((from, to)))
            }
            _ => Ok(None),
        }
    }

    /// The current state's identity.
    pub fn current_state(&self) -> StateId {
        StateId::from_index(self.current)
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next_id: StateId, ctx: &mut C) {
        let next_idx = next_id as usize;

        info!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        self.current = next_idx;

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}
