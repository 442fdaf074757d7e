// Institution-name canonicalization by approximate string matching.
//
// Independent of the TF-IDF path: proper nouns are compared by edit distance,
// not by term overlap.

pub mod metric;
pub mod resolver;

pub use metric::{
    field_norm, FuzzyMetric, JaroWinklerMetric, KeyDistance, LevenshteinMetric, MetricKind,
    SubstringMetric,
};
pub use resolver::{
    clean_name, Candidate, EntityResolver, MatchEvent, MatchObserver, Resolution, TracingObserver,
    DEFAULT_THRESHOLD,
};
