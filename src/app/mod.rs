//! Application core — the sort cycle, with all I/O behind ports.
//!
//! This module contains the business rules for the sorting station:
//! the sense-classify-actuate sequence and its timing.  All interaction
//! with hardware happens through **port traits** defined in [`ports`],
//! keeping this layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
