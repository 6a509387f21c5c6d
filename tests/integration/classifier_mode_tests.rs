//! Classifier selection at startup, end to end through the sequencer.

use std::fs;

use super::mock_hw::{ActuatorCall, build_with_config};

use wastesort::app::ports::Classifier;
use wastesort::classify::labels::{LabelSet, LabelSource};
use wastesort::classify::{ClassifierMode, load_classifier};
use wastesort::config::SystemConfig;
use wastesort::control::Axis;

fn horizontal_targets(calls: &[ActuatorCall]) -> Vec<f32> {
    calls
        .iter()
        .filter_map(|c| match c {
            ActuatorCall::Set {
                axis: Axis::Horizontal,
                position,
            } => Some(*position),
            _ => None,
        })
        .collect()
}

#[test]
fn missing_model_runs_demo_rotation_from_label_file() {
    let dir = tempfile::tempdir().unwrap();
    let labels_path = dir.path().join("class_indices.txt");
    fs::write(&labels_path, "0:recyclable\n1:hazardous\n").unwrap();

    let mut config = SystemConfig::default();
    config.classifier.model_path = dir.path().join("absent.tflite");
    config.classifier.labels_path = labels_path.clone();

    let labels = LabelSet::load(&labels_path);
    assert_eq!(labels.source(), LabelSource::File);
    let classifier = load_classifier(&config, labels);
    assert_eq!(classifier.mode(), ClassifierMode::Demo);

    let (mut seq, probes) = build_with_config(config, &[true, true, true], classifier, None);
    seq.run().unwrap();
    assert_eq!(seq.cycles_completed(), 3);

    // Self-test centre, then (bin, centre) per item.
    assert_eq!(
        horizontal_targets(&probes.calls()),
        [7.5, 10.0, 7.5, 5.0, 7.5, 10.0, 7.5]
    );
}

#[test]
fn unreadable_label_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let labels = LabelSet::load(&dir.path().join("nope.txt"));
    assert_eq!(labels.source(), LabelSource::Default);
    assert_eq!(labels.len(), 3);

    let mut config = SystemConfig::default();
    config.classifier.model_path = dir.path().join("nope.tflite");
    let classifier = load_classifier(&config, labels);

    let (mut seq, probes) = build_with_config(config, &[true, true, true], classifier, None);
    seq.run().unwrap();
    assert_eq!(
        horizontal_targets(&probes.calls()),
        [7.5, 5.0, 7.5, 7.5, 7.5, 10.0, 7.5]
    );
}
