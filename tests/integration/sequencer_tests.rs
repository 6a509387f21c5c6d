//! Integration tests for the SortSequencer → FSM → actuators pipeline.
//!
//! Drives full detection cycles against the mock adapters and checks the
//! exact actuator command stream, the timing requests, and the events.

use super::mock_hw::{ActuatorCall, ScriptedClassifier, build, build_with_config, demo_classifier};

use wastesort::app::events::{AppEvent, SortStep};
use wastesort::classify::{Category, Classification, ClassifierMode};
use wastesort::config::SystemConfig;
use wastesort::control::Axis;
use wastesort::fsm::StateId;

use ActuatorCall::{Release, Set, Stop};
use Axis::{Horizontal as H, Vertical as V};

fn set(axis: Axis, position: f32) -> ActuatorCall {
    Set { axis, position }
}

const SELF_TEST: [ActuatorCall; 4] = [
    Set { axis: H, position: 7.5 },
    Stop(H),
    Set { axis: V, position: 7.5 },
    Stop(V),
];

fn sort_calls(bin: f32) -> Vec<ActuatorCall> {
    vec![
        set(H, bin),
        Stop(H),
        set(V, 12.0),
        Stop(V),
        set(V, 7.5),
        Stop(V),
        set(H, 7.5),
        Stop(H),
    ]
}

fn without_state_changes(events: Vec<AppEvent>) -> Vec<AppEvent> {
    events
        .into_iter()
        .filter(|e| !matches!(e, AppEvent::StateChanged { .. }))
        .collect()
}

// ── Lifecycle ─────────────────────────────────────────────────

#[test]
fn start_runs_self_test_and_enters_idle() {
    let (mut seq, probes) = build(&[], demo_classifier(), None);

    seq.start().unwrap();

    assert_eq!(seq.state(), StateId::Idle);
    assert_eq!(probes.calls(), SELF_TEST);
    assert_eq!(probes.sleeps_ms(), [800, 800]);
    assert_eq!(
        probes.events(),
        [
            AppEvent::Started {
                mode: ClassifierMode::Demo
            },
            AppEvent::SelfTestComplete,
            AppEvent::Ready,
        ]
    );
}

#[test]
fn idle_polls_until_presence() {
    let (mut seq, probes) = build(&[false, false, true], demo_classifier(), None);
    seq.start().unwrap();
    probes.clear();

    seq.tick().unwrap();
    seq.tick().unwrap();
    assert_eq!(seq.state(), StateId::Idle);
    assert_eq!(probes.sleeps_ms(), [100, 100]);

    seq.tick().unwrap();
    assert_eq!(seq.state(), StateId::Detected);
    assert!(probes.calls().is_empty(), "no actuation while polling");
}

#[test]
fn one_cycle_visits_every_state_in_order() {
    let (mut seq, _probes) = build(&[true], demo_classifier(), None);
    seq.start().unwrap();

    let mut visited = vec![seq.state()];
    for _ in 0..6 {
        seq.tick().unwrap();
        visited.push(seq.state());
    }

    assert_eq!(
        visited,
        [
            StateId::Idle,
            StateId::Detected,
            StateId::Capturing,
            StateId::Classified,
            StateId::Sorting,
            StateId::Resetting,
            StateId::Idle,
        ]
    );
    assert_eq!(seq.cycles_completed(), 1);
}

// ── Scenario: demo mode, one item ─────────────────────────────

#[test]
fn demo_item_is_sorted_into_first_bin_then_cleanup_runs_once() {
    let (mut seq, probes) = build(&[true], demo_classifier(), None);

    seq.run().unwrap();
    assert_eq!(seq.cycles_completed(), 1);

    let mut expected: Vec<ActuatorCall> = SELF_TEST.to_vec();
    expected.extend(sort_calls(5.0));
    assert_eq!(probes.calls(), expected);

    seq.into_hardware().shutdown();
    expected.extend([Stop(H), Stop(V), Release]);
    assert_eq!(probes.calls(), expected, "guard drop must not clean up again");
}

#[test]
fn sort_sleeps_follow_the_timing_table() {
    let (mut seq, probes) = build(&[true], demo_classifier(), None);
    seq.run().unwrap();

    assert_eq!(
        probes.sleeps_ms(),
        [
            800, 800, // self-test
            3000, // settle
            800, 1000, // bin move + buffer
            800, 2000, // drop + wait
            800, 1000, // retract + buffer
            800,  // recenter
            100,  // hold-off
        ]
    );
}

#[test]
fn demo_events_describe_the_cycle() {
    let (mut seq, probes) = build(&[true], demo_classifier(), None);
    seq.run().unwrap();

    assert_eq!(
        without_state_changes(probes.events()),
        [
            AppEvent::Started {
                mode: ClassifierMode::Demo
            },
            AppEvent::SelfTestComplete,
            AppEvent::Ready,
            AppEvent::ItemDetected,
            AppEvent::Analyzing,
            AppEvent::Classified(Classification::new(Category::Hazardous, 0.95, Some(0))),
            AppEvent::Step(SortStep::MoveToBin {
                category: Category::Hazardous,
                position: 5.0
            }),
            AppEvent::Step(SortStep::Drop),
            AppEvent::Step(SortStep::Retract),
            AppEvent::Step(SortStep::Recenter),
            AppEvent::Sorted {
                category: Category::Hazardous
            },
            AppEvent::ShutdownRequested,
        ]
    );
}

#[test]
fn consecutive_demo_items_rotate_bins() {
    let (mut seq, probes) = build(&[true, true, true], demo_classifier(), None);
    seq.run().unwrap();
    assert_eq!(seq.cycles_completed(), 3);

    let mut expected: Vec<ActuatorCall> = SELF_TEST.to_vec();
    expected.extend(sort_calls(5.0));
    expected.extend(sort_calls(7.5));
    expected.extend(sort_calls(10.0));
    assert_eq!(probes.calls(), expected);
}

#[test]
fn live_recyclable_goes_right() {
    let classifier = ScriptedClassifier::always(Category::Recyclable, 0.42);
    let (mut seq, probes) = build(&[true], Box::new(classifier), None);
    seq.run().unwrap();

    assert_eq!(seq.classifier_mode(), ClassifierMode::Live);
    assert_eq!(&probes.calls()[4..], sort_calls(10.0).as_slice());
}

#[test]
fn low_confidence_still_routes() {
    let classifier = ScriptedClassifier::always(Category::Organic, 0.01);
    let (mut seq, _probes) = build(&[true], Box::new(classifier), None);
    seq.run().unwrap();
    assert_eq!(seq.cycles_completed(), 1);
}

// ── Scenario: classifier failure ──────────────────────────────

#[test]
fn classifier_error_aborts_cycle_without_actuation() {
    use wastesort::error::ClassifierError;

    let classifier = ScriptedClassifier::new(vec![
        Err(ClassifierError::Capture("camera busy".into())),
        Ok(Classification::new(Category::Organic, 0.8, Some(1))),
    ]);
    let calls = classifier.calls.clone();
    let (mut seq, probes) = build(&[true, false, true], Box::new(classifier), None);

    seq.run().unwrap();

    assert_eq!(*calls.borrow(), 2, "one classification per detection");
    assert_eq!(seq.cycles_completed(), 1);

    let mut expected: Vec<ActuatorCall> = SELF_TEST.to_vec();
    expected.extend(sort_calls(7.5));
    assert_eq!(probes.calls(), expected, "failed cycle commands nothing");

    let events = probes.events();
    let aborted = events
        .iter()
        .position(|e| matches!(e, AppEvent::CycleAborted(_)))
        .expect("abort event");
    assert!(
        !events[..aborted]
            .iter()
            .any(|e| matches!(e, AppEvent::Step(_))),
        "no sort step before the abort"
    );
}

// ── Scenario: interrupt mid-sequence ──────────────────────────

#[test]
fn interrupt_during_drop_wait_cleans_up_exactly_once() {
    // Sleep 7 is the post-drop wait (see `sort_sleeps_follow_the_timing_table`).
    let (mut seq, probes) = build(&[true], demo_classifier(), Some(7));

    seq.run().unwrap();
    assert_eq!(seq.cycles_completed(), 0);
    assert_eq!(seq.state(), StateId::Sorting);
    assert_eq!(
        probes.events().last(),
        Some(&AppEvent::ShutdownRequested)
    );

    let mut guard = seq.into_hardware();
    guard.shutdown();
    drop(guard);

    let mut expected: Vec<ActuatorCall> = SELF_TEST.to_vec();
    expected.extend([set(H, 5.0), Stop(H), set(V, 12.0), Stop(V)]);
    expected.extend([Stop(H), Stop(V), Release]);
    assert_eq!(probes.calls(), expected);
    assert_eq!(probes.sleeps_ms().len(), 7, "no further waits after the stop");
}

#[test]
fn interrupt_during_servo_hold_still_zeroes_that_axis() {
    // Sleep 6 is the hold after the drop command.
    let (mut seq, probes) = build(&[true], demo_classifier(), Some(6));
    seq.run().unwrap();

    let calls = probes.calls();
    assert_eq!(calls.last(), Some(&Stop(V)));
    assert_eq!(calls[calls.len() - 2], set(V, 12.0));
}

#[test]
fn interrupt_during_self_test_is_a_clean_exit() {
    let (mut seq, probes) = build(&[true], demo_classifier(), Some(1));
    seq.run().unwrap();

    assert_eq!(probes.calls(), [set(H, 7.5), Stop(H)]);
    assert!(!probes.events().contains(&AppEvent::Ready));
}

#[test]
fn dropping_the_guard_cleans_up() {
    let (mut seq, probes) = build(&[], demo_classifier(), None);
    seq.run().unwrap();
    drop(seq);

    let calls = probes.calls();
    assert_eq!(&calls[calls.len() - 3..], [Stop(H), Stop(V), Release]);
}

// ── Configuration flows through ───────────────────────────────

#[test]
fn out_of_range_targets_are_clamped_before_reaching_hardware() {
    let mut config = SystemConfig::default();
    config.vertical.down = 20.0;
    config.bins.hazardous = 1.0;
    let (mut seq, probes) = build_with_config(config, &[true], demo_classifier(), None);
    seq.run().unwrap();

    let calls = probes.calls();
    assert!(calls.contains(&set(H, 2.5)));
    assert!(calls.contains(&set(V, 12.5)));
    for call in calls {
        if let Set { position, .. } = call {
            assert!((2.5..=12.5).contains(&position));
        }
    }
}

#[test]
fn stop_raised_before_run_moves_nothing() {
    let (mut seq, probes) = build(&[true], demo_classifier(), None);
    probes.stop.raise();
    seq.run().unwrap();

    assert!(probes.calls().is_empty());
    assert_eq!(probes.events(), [AppEvent::ShutdownRequested]);
    assert_eq!(seq.cycles_completed(), 0);
}
