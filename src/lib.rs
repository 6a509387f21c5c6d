//! Waste sorting station controller library.
//!
//! Exposes the sequencing core, the classifier, and the hardware adapters
//! for the binary and for integration testing.  Raspberry Pi bindings are
//! compiled only with the `rpi` feature; TFLite inference only with
//! `tract`.

#![deny(unused_must_use)]

pub mod app;
pub mod classify;
pub mod config;
pub mod fsm;
pub mod lifecycle;

pub mod error;
pub mod pins;

pub mod adapters;
pub mod control;
pub mod drivers;
pub mod sensors;

pub use error::{Error, Result};
