//! Process lifecycle: stop requests, guaranteed actuator release, banner.
//!
//! ```text
//!   Ctrl+C ──▶ StopSignal::raise ──▶ waits return Interrupted
//!                                          │
//!                                          ▼
//!                          ShutdownGuard::shutdown (exactly once)
//!                              stop H, stop V, release lines
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{info, warn};

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::classify::ClassifierMode;
use crate::config::SystemConfig;
use crate::control::Axis;
use crate::error::{ActuatorError, Error, Result};

// ---------------------------------------------------------------------------
// Stop signal
// ---------------------------------------------------------------------------

/// Cloneable flag raised by the interrupt handler and polled by every wait.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Route SIGINT/SIGTERM to this signal.  Can only be installed once
    /// per process.
    pub fn install_handler(&self) -> Result<()> {
        let flag = self.clone();
        ctrlc::set_handler(move || {
            if !flag.is_raised() {
                warn!("Interrupt received, stopping after current step");
            }
            flag.raise();
        })
        .map_err(|e| Error::Init(format!("signal handler: {e}")))
    }
}

// ---------------------------------------------------------------------------
// Shutdown guard
// ---------------------------------------------------------------------------

/// Owns the station hardware and releases it exactly once: on an explicit
/// [`shutdown`](Self::shutdown), or on drop if that never happened.
pub struct ShutdownGuard<H: ActuatorPort> {
    inner: H,
    released: bool,
}

impl<H: ActuatorPort> ShutdownGuard<H> {
    pub fn new(inner: H) -> Self {
        Self {
            inner,
            released: false,
        }
    }

    /// Stop both axes and release the drive lines.  Later calls are no-ops.
    pub fn shutdown(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        info!("Cleaning up GPIO...");
        for axis in Axis::ALL {
            if let Err(e) = self.inner.stop(axis) {
                warn!("cleanup: {e}");
            }
        }
        self.inner.release();
        info!("Cleanup complete");
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }
}

impl<H: ActuatorPort> Drop for ShutdownGuard<H> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl<H: ActuatorPort + SensorPort> SensorPort for ShutdownGuard<H> {
    fn read_presence(&mut self) -> bool {
        self.inner.read_presence()
    }
}

impl<H: ActuatorPort> ActuatorPort for ShutdownGuard<H> {
    fn set_position(&mut self, axis: Axis, position: f32) -> core::result::Result<(), ActuatorError> {
        self.inner.set_position(axis, position)
    }

    fn stop(&mut self, axis: Axis) -> core::result::Result<(), ActuatorError> {
        self.inner.stop(axis)
    }

    fn release(&mut self) {
        self.shutdown();
    }
}

// ---------------------------------------------------------------------------
// Banner
// ---------------------------------------------------------------------------

/// Startup banner with the active mode and the bin layout.
pub fn log_banner(config: &SystemConfig, mode: ClassifierMode) {
    info!("========================================");
    info!("  Waste sorter v{}", env!("CARGO_PKG_VERSION"));
    info!("  Mode: {mode}");
    info!("========================================");
    info!(
        "Bins: hazardous={:.1}%  organic={:.1}%  recyclable={:.1}%",
        config.bins.hazardous, config.bins.organic, config.bins.recyclable
    );
    info!(
        "Sensor GPIO{}  servos GPIO{}/GPIO{} @ {} Hz",
        config.pins.ir_sensor,
        config.pins.servo_horizontal,
        config.pins.servo_vertical,
        config.pins.pwm_frequency_hz
    );
}
