//! Integration test driver for the `tests/integration/` submodules.
//!
//! Each `mod` below maps to a file that exercises the sort cycle against
//! mock adapters.  All tests run on the host with no GPIO, camera, or
//! model required.

mod classifier_mode_tests;
mod mock_hw;
mod sequencer_tests;
