//! Measurement outcome tallies.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Number of times each basis-state label was sampled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counts(FxHashMap<String, u64>);

impl Counts {
    /// Create an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` observations of `label`.
    pub fn insert(&mut self, label: impl Into<String>, count: u64) {
        *self.0.entry(label.into()).or_insert(0) += count;
    }

    /// Observations of `label`, zero if never seen.
    pub fn get(&self, label: &str) -> u64 {
        self.0.get(label).copied().unwrap_or(0)
    }

    /// Sum over all labels.
    pub fn total_shots(&self) -> u64 {
        self.0.values().sum()
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries by descending count, ties broken by label.
    pub fn sorted(&self) -> Vec<(&String, &u64)> {
        let mut entries: Vec<_> = self.0.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// Iterate over `(label, count)` in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a Counts {
    type Item = (&'a String, &'a u64);
    type IntoIter = std::collections::hash_map::Iter<'a, String, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_accumulates() {
        let mut counts = Counts::new();
        counts.insert("01", 3);
        counts.insert("01", 2);
        counts.insert("10", 1);
        assert_eq!(counts.get("01"), 5);
        assert_eq!(counts.get("11"), 0);
        assert_eq!(counts.total_shots(), 6);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_sorted() {
        let mut counts = Counts::new();
        counts.insert("00", 10);
        counts.insert("11", 30);
        counts.insert("01", 10);

        let sorted = counts.sorted();
        let labels: Vec<_> = sorted.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["11", "00", "01"]);
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let mut counts = Counts::new();
        counts.insert("1", 4);
        let json = serde_json::to_string(&counts).unwrap();
        assert_eq!(json, r#"{"1":4}"#);
    }
}
