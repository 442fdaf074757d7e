// Fuzzy entity resolver for institution names.
//
// Institution names are short proper nouns, where one differing word would
// sink a term-overlap score but only costs a few edits. The resolver cleans
// the input, scores it against every catalog key (canonical name and each
// alias), and accepts the best key only when its score is at or below the
// threshold. Anything else passes
// through as `Unresolved`, so callers can count "no match" separately from
// "already canonical".

use anyhow::Result;
use serde::Serialize;
use tracing::debug;

use super::metric::{FuzzyMetric, KeyDistance, SubstringMetric};
use crate::catalog::AliasCatalog;
use crate::text::clean_text;

/// Distances at or below this are accepted as matches.
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// A successful match, as reported to observers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchEvent {
    /// The raw input, exactly as given.
    pub original: String,
    /// The catalog key (canonical name or alias) that matched best.
    pub matched_alias: String,
    /// Canonical name of the matched entry.
    pub canonical: String,
    /// Distance of the match, 0 = perfect.
    pub score: f64,
}

/// Outcome of resolving one name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Resolution {
    Matched(MatchEvent),
    /// No key was close enough. `original` is the input verbatim.
    Unresolved { original: String, cleaned: String },
}

impl Resolution {
    /// The canonical name when matched, otherwise the original input.
    pub fn label(&self) -> &str {
        match self {
            Resolution::Matched(event) => &event.canonical,
            Resolution::Unresolved { original, .. } => original,
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, Resolution::Matched(_))
    }

    pub fn score(&self) -> Option<f64> {
        match self {
            Resolution::Matched(event) => Some(event.score),
            Resolution::Unresolved { .. } => None,
        }
    }

    pub fn into_label(self) -> String {
        match self {
            Resolution::Matched(event) => event.canonical,
            Resolution::Unresolved { original, .. } => original,
        }
    }
}

/// Diagnostic hook called once per successful match. Has no effect on the
/// returned resolution.
pub trait MatchObserver {
    fn on_match(&self, event: &MatchEvent);
}

impl<F> MatchObserver for F
where
    F: Fn(&MatchEvent),
{
    fn on_match(&self, event: &MatchEvent) {
        self(event)
    }
}

/// Logs every match at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl MatchObserver for TracingObserver {
    fn on_match(&self, event: &MatchEvent) {
        debug!(
            original = %event.original,
            matched_alias = %event.matched_alias,
            canonical = %event.canonical,
            score = event.score,
            "Resolved institution name"
        );
    }
}

#[derive(Debug, Clone)]
struct CatalogKey {
    text: String,
    cleaned: String,
    tokens: usize,
}

#[derive(Debug, Clone)]
struct IndexedEntry {
    canonical: String,
    /// Canonical name first, then aliases in catalog order
    keys: Vec<CatalogKey>,
}

/// The best-scoring catalog key for an input, whether or not it passes the
/// threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<'a> {
    pub canonical: &'a str,
    pub key: &'a str,
    pub score: f64,
}

/// Immutable resolver over one institution catalog.
#[derive(Debug)]
pub struct EntityResolver {
    entries: Vec<IndexedEntry>,
    metric: Box<dyn FuzzyMetric>,
    threshold: f64,
}

impl EntityResolver {
    /// Resolver with the substring metric and the default threshold.
    pub fn new(catalog: &AliasCatalog) -> Self {
        Self::build(catalog, Box::new(SubstringMetric::default()), DEFAULT_THRESHOLD)
    }

    /// Resolver with an explicit metric and threshold. The threshold must lie
    /// in [0, 1].
    pub fn with_metric(
        catalog: &AliasCatalog,
        metric: Box<dyn FuzzyMetric>,
        threshold: f64,
    ) -> Result<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            anyhow::bail!("Fuzzy threshold must be between 0 and 1, got {threshold}");
        }
        Ok(Self::build(catalog, metric, threshold))
    }

    fn build(catalog: &AliasCatalog, metric: Box<dyn FuzzyMetric>, threshold: f64) -> Self {
        let entries: Vec<IndexedEntry> = catalog
            .iter()
            .map(|entry| IndexedEntry {
                canonical: entry.canonical.clone(),
                keys: std::iter::once(&entry.canonical)
                    .chain(entry.aliases.iter())
                    .map(|text| {
                        let cleaned = clean_name(text);
                        CatalogKey {
                            text: text.clone(),
                            tokens: cleaned.split_whitespace().count(),
                            cleaned,
                        }
                    })
                    .filter(|key| !key.cleaned.is_empty())
                    .collect(),
            })
            .collect();

        debug!(
            entries = entries.len(),
            keys = entries.iter().map(|e| e.keys.len()).sum::<usize>(),
            threshold,
            "Indexed institution catalog"
        );

        Self {
            entries,
            metric,
            threshold,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Best catalog entry for an already-cleaned name, whether or not it
    /// passes the threshold.
    ///
    /// Each entry is represented by its best key under the metric's
    /// `key_score`. Ties go to the earliest entry, and within an entry to the
    /// canonical name before its aliases.
    pub fn best_candidate(&self, cleaned: &str) -> Option<Candidate<'_>> {
        let mut best: Option<Candidate<'_>> = None;
        for entry in &self.entries {
            for key in &entry.keys {
                let score = self.metric.key_score(KeyDistance {
                    distance: self.metric.distance(cleaned, &key.cleaned),
                    tokens: key.tokens,
                });
                if best.as_ref().map_or(true, |b| score < b.score) {
                    best = Some(Candidate {
                        canonical: &entry.canonical,
                        key: &key.text,
                        score,
                    });
                }
            }
        }
        best
    }

    /// Resolve `name` against the catalog.
    pub fn resolve(&self, name: &str) -> Resolution {
        self.resolve_inner(name, None)
    }

    /// Resolve `name`, notifying `observer` if a match is accepted.
    pub fn resolve_with(&self, name: &str, observer: &dyn MatchObserver) -> Resolution {
        self.resolve_inner(name, Some(observer))
    }

    /// Canonical name, or the input unchanged when nothing matched.
    pub fn resolve_name(&self, name: &str) -> String {
        self.resolve(name).into_label()
    }

    fn resolve_inner(&self, name: &str, observer: Option<&dyn MatchObserver>) -> Resolution {
        let cleaned = clean_name(name);
        let candidate = if cleaned.is_empty() {
            None
        } else {
            self.best_candidate(&cleaned)
        };

        match candidate {
            Some(candidate) if candidate.score <= self.threshold => {
                let event = MatchEvent {
                    original: name.to_string(),
                    matched_alias: candidate.key.to_string(),
                    canonical: candidate.canonical.to_string(),
                    score: candidate.score,
                };
                if let Some(observer) = observer {
                    observer.on_match(&event);
                }
                Resolution::Matched(event)
            }
            other => {
                debug!(
                    name,
                    best_score = ?other.map(|c| c.score),
                    "Institution name left unresolved"
                );
                Resolution::Unresolved {
                    original: name.to_string(),
                    cleaned,
                }
            }
        }
    }
}

/// Lowercase, drop punctuation, and collapse runs of whitespace.
///
/// Goes through `clean_text`, so accented letters fold to their base letter
/// ("Université" becomes "universite") instead of being dropped, and a
/// removed "(UNDIP)" leaves no double space behind. Catalog keys get the same
/// treatment, so both sides of a comparison agree.
pub fn clean_name(name: &str) -> String {
    clean_text(name.trim())
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::AliasEntry;
    use std::cell::RefCell;

    fn catalog() -> AliasCatalog {
        AliasCatalog::from_entries(vec![
            AliasEntry::new("Universitas Diponegoro", ["universitas diponegoro", "undip"]),
            AliasEntry::new("Universitas Negeri Semarang", ["unnes"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_clean_name() {
        assert_eq!(clean_name("  Univ. Diponegoro  (UNDIP) "), "univ diponegoro undip");
        assert_eq!(clean_name("!!!"), "");
    }

    #[test]
    fn test_clean_name_folds_accents() {
        assert_eq!(clean_name("Université Paris-Saclay"), "universite parissaclay");
        assert_eq!(clean_name("Institut Teknologi\tBandung"), "institut teknologi bandung");
    }

    #[test]
    fn test_shared_prefix_with_different_city_is_rejected() {
        let catalog = AliasCatalog::from_entries(vec![AliasEntry::new(
            "Universitas Negeri Semarang",
            ["unnes"],
        )])
        .unwrap();
        let resolver = EntityResolver::new(&catalog);

        // Four edits over 26 characters, lifted above the threshold by the
        // three-word key's norm
        let candidate = resolver.best_candidate("universitas negeri jakarta").unwrap();
        assert_eq!(candidate.key, "Universitas Negeri Semarang");
        assert!(candidate.score > DEFAULT_THRESHOLD, "got {}", candidate.score);
        assert!(!resolver.resolve("Universitas Negeri Jakarta").is_matched());
    }

    #[test]
    fn test_exact_alias() {
        let resolver = EntityResolver::new(&catalog());
        let resolution = resolver.resolve("UNDIP");
        assert!(resolution.is_matched());
        assert_eq!(resolution.label(), "Universitas Diponegoro");
        assert_eq!(resolution.score(), Some(0.0));
    }

    #[test]
    fn test_typo_within_threshold() {
        let resolver = EntityResolver::new(&catalog());
        assert_eq!(
            resolver.resolve_name("Universitas Dipenogoro"),
            "Universitas Diponegoro"
        );
    }

    #[test]
    fn test_unmatched_passes_through_verbatim() {
        let resolver = EntityResolver::new(&catalog());
        let resolution = resolver.resolve("Institut Teknologi Bandung");
        assert_eq!(
            resolution,
            Resolution::Unresolved {
                original: "Institut Teknologi Bandung".to_string(),
                cleaned: "institut teknologi bandung".to_string(),
            }
        );
        assert_eq!(resolution.label(), "Institut Teknologi Bandung");
    }

    #[test]
    fn test_empty_and_punctuation_only() {
        let resolver = EntityResolver::new(&catalog());
        assert!(!resolver.resolve("").is_matched());
        assert!(!resolver.resolve("--").is_matched());
    }

    #[test]
    fn test_observer_sees_matches_only() {
        let resolver = EntityResolver::new(&catalog());
        let seen = RefCell::new(Vec::new());
        let observer = |event: &MatchEvent| seen.borrow_mut().push(event.clone());

        resolver.resolve_with("unnes", &observer);
        resolver.resolve_with("Institut Teknologi Bandung", &observer);

        let seen = seen.into_inner();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].original, "unnes");
        assert_eq!(seen[0].matched_alias, "unnes");
        assert_eq!(seen[0].canonical, "Universitas Negeri Semarang");
    }

    #[test]
    fn test_threshold_validation() {
        assert!(EntityResolver::with_metric(&catalog(), Box::new(SubstringMetric::default()), 1.5).is_err());
        assert!(EntityResolver::with_metric(&catalog(), Box::new(SubstringMetric::default()), f64::NAN).is_err());
    }

    #[test]
    fn test_zero_threshold_requires_exact() {
        let resolver =
            EntityResolver::with_metric(&catalog(), Box::new(SubstringMetric::default()), 0.0).unwrap();
        assert!(resolver.resolve("undip").is_matched());
        assert!(!resolver.resolve("undipp").is_matched());
    }

    #[test]
    fn test_empty_catalog_passes_everything_through() {
        let resolver = EntityResolver::new(&AliasCatalog::default());
        assert_eq!(resolver.resolve_name("Undip"), "Undip");
    }
}
