// Fuzzy string metrics for institution-name matching.
//
// Every metric reports a distance in [0, 1] where 0 is a perfect match, so
// the resolver can apply one acceptance threshold regardless of metric.

use std::fmt::Debug;
use std::str::FromStr;

/// Distance of one catalog key from the input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyDistance {
    pub distance: f64,
    /// Whitespace-separated tokens in the cleaned key.
    pub tokens: usize,
}

/// A bounded string distance. `pattern` is the cleaned input, `text` a
/// cleaned catalog key.
pub trait FuzzyMetric: Debug + Send + Sync {
    fn distance(&self, pattern: &str, text: &str) -> f64;

    /// Score of one key, in [0, 1]. The resolver keeps each entry's lowest.
    /// Defaults to the distance itself.
    fn key_score(&self, key: KeyDistance) -> f64 {
        key.distance
    }
}

/// Field-length norm of a key: 1 / sqrt(tokens), rounded to three places.
pub fn field_norm(tokens: usize) -> f64 {
    let norm = 1.0 / (tokens.max(1) as f64).sqrt();
    (norm * 1000.0).round() / 1000.0
}

/// Floor for any inexact hit, so only an identical key scores 0.
pub const MIN_INEXACT_DISTANCE: f64 = 0.001;

/// Default distance from where a match is expected (the start of the key)
/// at which the location penalty reaches 1.0.
pub const DEFAULT_LOCATION_DISTANCE: usize = 100;

/// Best approximate occurrence of the pattern anywhere in the text.
///
/// Finds the alignment of the whole pattern against any substring of the
/// text with the fewest edits (semi-global edit distance), then scores it as
///
///   errors / pattern length + start offset / location distance
///
/// clamped to 1.0 and floored at `MIN_INEXACT_DISTANCE` unless the key is
/// identical to the pattern. An occurrence further in pays a small location
/// penalty.
///
/// A key's score is its distance raised to the key's `field_norm`, so the
/// same edits cost more in a long name than in a short one. Names that share
/// boilerplate ("Universitas Negeri", "SMK Negeri") but differ in the city or
/// number stay apart.
#[derive(Debug, Clone, Copy)]
pub struct SubstringMetric {
    pub location_distance: usize,
}

impl Default for SubstringMetric {
    fn default() -> Self {
        Self {
            location_distance: DEFAULT_LOCATION_DISTANCE,
        }
    }
}

impl SubstringMetric {
    fn location_penalty(&self, start: usize) -> f64 {
        if start == 0 {
            0.0
        } else if self.location_distance == 0 {
            1.0
        } else {
            start as f64 / self.location_distance as f64
        }
    }
}

impl FuzzyMetric for SubstringMetric {
    fn distance(&self, pattern: &str, text: &str) -> f64 {
        let pattern: Vec<char> = pattern.chars().collect();
        let text: Vec<char> = text.chars().collect();
        if pattern.is_empty() || text.is_empty() {
            return 1.0;
        }
        if pattern == text {
            return 0.0;
        }

        // Each cell holds the cheapest score of aligning pattern[..i] so that
        // it ends at text[..j]. Row 0 charges only the location penalty, so
        // the match may begin anywhere; every edit after that costs 1/len.
        let edit = 1.0 / pattern.len() as f64;
        let mut prev: Vec<f64> = (0..=text.len()).map(|j| self.location_penalty(j)).collect();
        let mut cur = vec![0.0; text.len() + 1];

        for (i, pc) in pattern.iter().enumerate() {
            cur[0] = (i + 1) as f64 * edit;
            for (j, tc) in text.iter().enumerate() {
                let diagonal = prev[j] + if pc == tc { 0.0 } else { edit };
                let skip_pattern = prev[j + 1] + edit;
                let skip_text = cur[j] + edit;
                cur[j + 1] = diagonal.min(skip_pattern).min(skip_text);
            }
            std::mem::swap(&mut prev, &mut cur);
        }

        prev.into_iter()
            .fold(1.0, f64::min)
            .max(MIN_INEXACT_DISTANCE)
    }

    fn key_score(&self, key: KeyDistance) -> f64 {
        key.distance.powf(field_norm(key.tokens)).clamp(0.0, 1.0)
    }
}

/// Whole-string normalized Levenshtein distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct LevenshteinMetric;

impl FuzzyMetric for LevenshteinMetric {
    fn distance(&self, pattern: &str, text: &str) -> f64 {
        (1.0 - strsim::normalized_levenshtein(pattern, text)).clamp(0.0, 1.0)
    }
}

/// Jaro-Winkler distance; favors shared prefixes.
#[derive(Debug, Clone, Copy, Default)]
pub struct JaroWinklerMetric;

impl FuzzyMetric for JaroWinklerMetric {
    fn distance(&self, pattern: &str, text: &str) -> f64 {
        (1.0 - strsim::jaro_winkler(pattern, text)).clamp(0.0, 1.0)
    }
}

/// Metric selector used by configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MetricKind {
    #[default]
    Substring,
    Levenshtein,
    JaroWinkler,
}

impl MetricKind {
    pub fn build(self) -> Box<dyn FuzzyMetric> {
        match self {
            MetricKind::Substring => Box::new(SubstringMetric::default()),
            MetricKind::Levenshtein => Box::new(LevenshteinMetric),
            MetricKind::JaroWinkler => Box::new(JaroWinklerMetric),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Substring => "substring",
            MetricKind::Levenshtein => "levenshtein",
            MetricKind::JaroWinkler => "jaro-winkler",
        }
    }
}

impl FromStr for MetricKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "substring" => Ok(MetricKind::Substring),
            "levenshtein" => Ok(MetricKind::Levenshtein),
            "jaro-winkler" | "jaro_winkler" | "jarowinkler" => Ok(MetricKind::JaroWinkler),
            other => anyhow::bail!(
                "Unknown fuzzy metric {other:?} (expected substring, levenshtein, or jaro-winkler)"
            ),
        }
    }
}
