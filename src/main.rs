//! Waste sorter — main entry point.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter    Classifier        SystemClock  LogEventSink│
//! │  (Sensor+Actuator)  (live | demo)     (Clock)      (EventSink) │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            SortSequencer (pure logic)                  │    │
//! │  │  FSM · self-test · move primitive                      │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  ShutdownGuard (stop both axes, release lines, exactly once)   │
//! └────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};

use wastesort::adapters::clock::SystemClock;
use wastesort::adapters::log_sink::LogEventSink;
use wastesort::app::ports::Classifier;
use wastesort::app::service::SortSequencer;
use wastesort::classify::labels::LabelSet;
use wastesort::classify::load_classifier;
use wastesort::config::SystemConfig;
use wastesort::drivers::rpi;
use wastesort::lifecycle::{ShutdownGuard, StopSignal, log_banner};

#[derive(Parser)]
#[command(name = "wastesort")]
#[command(about = "Sort items into hazardous, organic and recyclable bins", long_about = None)]
struct Cli {
    /// JSON configuration file; missing fields keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// TFLite model (default: next to the executable)
    #[arg(long)]
    model: Option<PathBuf>,

    /// Class label file, one label per line (default: next to the executable)
    #[arg(long)]
    labels: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wastesort=info".into()),
        )
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => SystemConfig::load_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SystemConfig::default(),
    };

    let base = install_dir();
    config.classifier.model_path = cli
        .model
        .unwrap_or_else(|| resolve(&base, &config.classifier.model_path));
    config.classifier.labels_path = cli
        .labels
        .unwrap_or_else(|| resolve(&base, &config.classifier.labels_path));

    let stop = StopSignal::new();
    stop.install_handler().context("installing interrupt handler")?;

    let labels = LabelSet::load(&config.classifier.labels_path);
    let classifier = load_classifier(&config, labels);
    log_banner(&config, classifier.mode());

    let hardware = rpi::init_hardware(&config).context("initialising GPIO")?;
    let guard = ShutdownGuard::new(hardware);

    let mut sequencer = SortSequencer::new(
        config,
        guard,
        classifier,
        SystemClock::new(stop.clone()),
        LogEventSink::new(),
        stop,
    );
    info!("Press Ctrl+C to exit");

    let outcome = sequencer.run();

    // Releases the servos on every exit path, including errors above.
    sequencer.into_hardware().shutdown();

    outcome.context("sort loop failed")
}

/// Directory holding the executable; resource defaults are relative to it.
fn install_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
