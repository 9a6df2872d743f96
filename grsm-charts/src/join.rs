//! Keyed reconciliation between two renders of the same panel.

use serde::Serialize;
use std::collections::HashSet;

/// What changed between two keyed mark lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JoinPatch {
    /// Keys new in this render, in render order.
    pub entered: Vec<String>,
    /// Keys present in both renders, in render order.
    pub updated: Vec<String>,
    /// Keys that disappeared, in their previous order.
    pub exited: Vec<String>,
}

impl JoinPatch {
    pub fn is_empty(&self) -> bool {
        self.entered.is_empty() && self.exited.is_empty()
    }
}

/// Diff `previous` against `next` by key. Duplicate keys are counted once.
pub fn reconcile<'a, P, N>(previous: P, next: N) -> JoinPatch
where
    P: IntoIterator<Item = &'a str>,
    N: IntoIterator<Item = &'a str>,
{
    let previous: Vec<&str> = previous.into_iter().collect();
    let before: HashSet<&str> = previous.iter().copied().collect();
    let mut seen = HashSet::new();
    let mut patch = JoinPatch::default();
    for key in next {
        if !seen.insert(key) {
            continue;
        }
        if before.contains(key) {
            patch.updated.push(key.to_string());
        } else {
            patch.entered.push(key.to_string());
        }
    }
    let mut gone = HashSet::new();
    for key in previous {
        if !seen.contains(key) && gone.insert(key) {
            patch.exited.push(key.to_string());
        }
    }
    patch
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_enter_update_exit() {
        let patch = reconcile(["Elk", "Bear", "Trout"], ["Bear", "Salamander", "Elk"]);
        assert_eq!(patch.entered, vec!["Salamander"]);
        assert_eq!(patch.updated, vec!["Bear", "Elk"]);
        assert_eq!(patch.exited, vec!["Trout"]);
    }

    #[test]
    fn identical_keys_only_update() {
        let patch = reconcile(["a", "b"], ["a", "b"]);
        assert!(patch.is_empty());
        assert_eq!(patch.updated.len(), 2);
        let first = reconcile([], ["a"]);
        assert_eq!(first.entered, vec!["a"]);
    }
}
