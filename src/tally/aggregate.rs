// Single-pass aggregation of a sheet column into label counts.
//
// Missing values are dropped before any matching runs, so placeholders like
// `#REF!` never reach the classifier or the resolver.

use serde::Serialize;
use tracing::info;

use super::frequency::FrequencyTally;
use crate::classify::CategoryClassifier;
use crate::resolve::{EntityResolver, Resolution};
use crate::sheet::{ColumnRef, Row};

/// Institution counts, with pass-through values also counted on their own.
#[derive(Debug, Clone, Default)]
pub struct InstitutionTally {
    /// Every value: canonical names for matches, raw input otherwise.
    pub all: FrequencyTally,
    /// Only the values no catalog entry accepted.
    pub unresolved: FrequencyTally,
}

impl InstitutionTally {
    pub fn matched_count(&self) -> usize {
        self.all.total() - self.unresolved.total()
    }
}

/// Summary of an aggregation pass, for logs and JSON reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PassStats {
    pub rows: usize,
    pub counted: usize,
    pub skipped: usize,
}

/// Classify every value in `column` and count the resulting labels.
pub fn tally_fields(
    rows: &[Row],
    column: &ColumnRef,
    classifier: &CategoryClassifier,
) -> FrequencyTally {
    let mut tally = FrequencyTally::new();
    for value in column.values(rows) {
        if let Some(classification) = classifier.classify(value) {
            tally.record(classification.label);
        }
    }

    info!(
        labels = tally.len(),
        counted = tally.total(),
        "Tallied field categories"
    );
    tally
}

/// Resolve every value in `column` and count the resulting names.
pub fn tally_institutions(
    rows: &[Row],
    column: &ColumnRef,
    resolver: &EntityResolver,
) -> InstitutionTally {
    let mut tally = InstitutionTally::default();
    for value in column.values(rows) {
        match resolver.resolve(value) {
            Resolution::Matched(event) => tally.all.record(event.canonical),
            Resolution::Unresolved { original, .. } => {
                tally.unresolved.record(original.as_str());
                tally.all.record(original);
            }
        }
    }

    info!(
        labels = tally.all.len(),
        counted = tally.all.total(),
        unresolved = tally.unresolved.total(),
        "Tallied institutions"
    );
    tally
}

/// Row counts for `column`: data rows below the header, how many carried a
/// usable value, and how many were blank or placeholders.
pub fn pass_stats(rows: &[Row], column: &ColumnRef) -> PassStats {
    let data_rows = rows.len().saturating_sub(column.header_row + 1);
    let counted = column.values(rows).count();
    PassStats {
        rows: data_rows,
        counted,
        skipped: data_rows - counted,
    }
}
