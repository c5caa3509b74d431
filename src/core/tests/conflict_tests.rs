use std::sync::Arc;

use crate::core::{
    conflict::ConflictDetector,
    types::{Trigger, TriggerMode},
};

/// Helper to create test triggers
fn test_trigger(binding: &str, payload: &str) -> Arc<Trigger> {
    Arc::new(Trigger {
        binding: binding.to_string(),
        payload: payload.to_string(),
        mode: TriggerMode::Normal,
        signal: None,
    })
}

#[test]
fn test_no_conflicts_when_empty() {
    let detector = ConflictDetector::new();
    assert!(detector.find_conflicts().is_empty());
    assert_eq!(detector.total_triggers(), 0);
}

#[test]
fn test_no_conflicts_with_unique_bindings() {
    let mut detector = ConflictDetector::new();

    detector.add_trigger(test_trigger("super+KEY_a", "firefox"));
    detector.add_trigger(test_trigger("super+KEY_b", "kitty"));

    assert!(detector.find_conflicts().is_empty());
    assert_eq!(detector.total_triggers(), 2);
}

#[test]
fn test_detects_conflict() {
    let mut detector = ConflictDetector::new();

    detector.add_trigger(test_trigger("super+KEY_a", "firefox"));
    detector.add_trigger(test_trigger("super+KEY_a", "chrome"));
    detector.add_trigger(test_trigger("super+KEY_b", "kitty"));

    let conflicts = detector.find_conflicts();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].binding, "super+KEY_a");
    assert_eq!(conflicts[0].conflicting_triggers.len(), 2);
    assert_eq!(conflicts[0].conflicting_triggers[0].payload, "firefox");

    assert!(detector.has_conflict("super+KEY_a"));
    assert!(!detector.has_conflict("super+KEY_b"));
    assert!(!detector.has_conflict("super+KEY_c"));
}

#[test]
fn test_conflicts_sorted_by_binding() {
    let detector: ConflictDetector = [
        test_trigger("super+KEY_z", "a"),
        test_trigger("super+KEY_z", "b"),
        test_trigger("super+KEY_a", "c"),
        test_trigger("super+KEY_a", "d"),
    ]
    .into_iter()
    .collect();

    let bindings: Vec<_> = detector
        .find_conflicts()
        .into_iter()
        .map(|c| c.binding)
        .collect();
    assert_eq!(bindings, vec!["super+KEY_a", "super+KEY_z"]);
}

#[test]
fn test_binding_text_is_compared_verbatim() {
    let mut detector = ConflictDetector::new();

    detector.add_trigger(test_trigger("super+KEY_a", "firefox"));
    detector.add_trigger(test_trigger("KEY_a+super", "chrome"));

    assert!(detector.find_conflicts().is_empty());
}
