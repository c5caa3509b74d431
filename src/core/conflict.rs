//! Binding conflict detection
//!
//! Several triggers may be registered on the same activator binding. The
//! compositor accepts that, but only one of them is usually intended, so
//! these are reported for the user to resolve.
//!
//! Binding specs are opaque here: two triggers conflict only when their
//! binding text is identical.

use std::collections::HashMap;
use std::sync::Arc;

use crate::core::types::Trigger;

/// Groups triggers by binding using a HashMap index.
///
/// A conflict exists when any binding maps to more than one trigger.
pub struct ConflictDetector {
    /// Maps binding spec to every trigger registered on it, in insertion order.
    triggers: HashMap<String, Vec<Arc<Trigger>>>,
}

/// Triggers sharing one binding.
#[derive(Clone, Debug, PartialEq)]
pub struct Conflict {
    pub binding: String,

    /// All triggers on this binding (always 2 or more)
    pub conflicting_triggers: Vec<Arc<Trigger>>,
}

impl ConflictDetector {
    pub fn new() -> Self {
        Self {
            triggers: HashMap::new(),
        }
    }

    pub fn add_trigger(&mut self, trigger: Arc<Trigger>) {
        self.triggers
            .entry(trigger.binding.clone())
            .or_default()
            .push(trigger);
    }

    /// Finds all bindings with 2 or more triggers, sorted by binding.
    pub fn find_conflicts(&self) -> Vec<Conflict> {
        let mut conflicts: Vec<Conflict> = self
            .triggers
            .iter()
            .filter(|(_, triggers)| triggers.len() > 1)
            .map(|(binding, triggers)| Conflict {
                binding: binding.clone(),
                conflicting_triggers: triggers.clone(),
            })
            .collect();

        conflicts.sort_by(|a, b| a.binding.cmp(&b.binding));
        conflicts
    }

    pub fn has_conflict(&self, binding: &str) -> bool {
        self.triggers
            .get(binding)
            .map(|triggers| triggers.len() > 1)
            .unwrap_or(false)
    }

    /// Returns the total number of triggers tracked.
    pub fn total_triggers(&self) -> usize {
        self.triggers.values().map(|v| v.len()).sum()
    }
}

impl Default for ConflictDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<Arc<Trigger>> for ConflictDetector {
    fn from_iter<I: IntoIterator<Item = Arc<Trigger>>>(triggers: I) -> Self {
        let mut detector = Self::new();
        for trigger in triggers {
            detector.add_trigger(trigger);
        }
        detector
    }
}
