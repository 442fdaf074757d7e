// Label counts for one aggregation pass.

use std::collections::HashMap;

use serde::Serialize;

/// One chart row: a label, its count, and its share of the total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TallyEntry {
    pub name: String,
    pub value: usize,
    /// Percent of the tally total, rounded to two decimals.
    pub percentage: f64,
}

/// Counts per label, remembering the order labels were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTally {
    counts: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl FrequencyTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `label`.
    pub fn record(&mut self, label: impl Into<String>) {
        self.record_n(label, 1);
    }

    pub fn record_n(&mut self, label: impl Into<String>, n: usize) {
        let label = label.into();
        match self.index.get(&label) {
            Some(&slot) => self.counts[slot].1 += n,
            None => {
                self.index.insert(label.clone(), self.counts.len());
                self.counts.push((label, n));
            }
        }
    }

    pub fn get(&self, label: &str) -> usize {
        self.index.get(label).map_or(0, |&slot| self.counts[slot].1)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Labels in first-seen order with their counts.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(label, n)| (label.as_str(), *n))
    }

    /// Chart rows sorted by count, highest first. Equal counts keep
    /// first-seen order.
    pub fn entries(&self) -> Vec<TallyEntry> {
        let total = self.total();
        let mut entries: Vec<TallyEntry> = self
            .counts
            .iter()
            .map(|(name, value)| TallyEntry {
                name: name.clone(),
                value: *value,
                percentage: percentage(*value, total),
            })
            .collect();
        entries.sort_by(|a, b| b.value.cmp(&a.value));
        entries
    }
}

impl<S: Into<String>> FromIterator<S> for FrequencyTally {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tally = Self::new();
        for label in iter {
            tally.record(label);
        }
        tally
    }
}

fn percentage(value: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (value as f64 / total as f64 * 10_000.0).round() / 100.0
}
