// Corpus statistics and TF-IDF vectorization.
//
// Weights use raw term counts and smoothed IDF:
//
//   idf(t) = ln((1 + N) / (1 + df(t))) + 1
//
// where N is the corpus size. The +1 terms keep the ratio finite for an
// empty corpus and keep every present term's weight at or above its raw
// count, even when the term occurs in every document.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tracing::debug;

use crate::text::Normalizer;

/// What to vectorize: a registered corpus document or ad-hoc text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentRef<'a> {
    /// Position in the corpus the engine was built from.
    Corpus(usize),
    /// Out-of-corpus text, tokenized on the fly.
    Text(&'a str),
}

impl From<usize> for DocumentRef<'_> {
    fn from(index: usize) -> Self {
        DocumentRef::Corpus(index)
    }
}

impl<'a> From<&'a str> for DocumentRef<'a> {
    fn from(text: &'a str) -> Self {
        DocumentRef::Text(text)
    }
}

/// Sparse term -> weight map.
///
/// Ordered by term so that any arithmetic folded over it happens in the same
/// order every time. Vectors are only comparable when they came from the same
/// engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TermVector {
    weights: BTreeMap<String, f64>,
}

impl TermVector {
    /// Weight of `term`, 0.0 if absent.
    pub fn get(&self, term: &str) -> f64 {
        self.weights.get(term).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(t, w)| (t.as_str(), *w))
    }

    /// Terms present in the map, including zero-weight ones.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.weights.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Euclidean norm.
    pub fn magnitude(&self) -> f64 {
        self.weights.values().map(|w| w * w).sum::<f64>().sqrt()
    }

    /// True when every weight is zero (or there are no entries).
    pub fn is_zero(&self) -> bool {
        self.weights.values().all(|w| *w == 0.0)
    }
}

impl FromIterator<(String, f64)> for TermVector {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            weights: iter.into_iter().collect(),
        }
    }
}

/// TF-IDF engine over a corpus fixed at construction time.
#[derive(Debug, Clone)]
pub struct TfIdfEngine {
    normalizer: Normalizer,
    /// Per-document term counts, indexed by corpus position
    term_counts: Vec<HashMap<String, u32>>,
    /// Number of documents containing each term
    document_frequency: HashMap<String, u32>,
    /// The term universe with its precomputed IDF
    idf: BTreeMap<String, f64>,
}

impl TfIdfEngine {
    /// Index `documents` with the default normalizer.
    pub fn new<I>(documents: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Self::with_normalizer(documents, Normalizer::default())
    }

    /// Index `documents`, tokenizing with `normalizer`. The same normalizer
    /// is used for query text later.
    pub fn with_normalizer<I>(documents: I, normalizer: Normalizer) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut term_counts = Vec::new();
        let mut document_frequency: HashMap<String, u32> = HashMap::new();

        for doc in documents {
            let counts = count_terms(&normalizer.terms(doc.as_ref()));
            for term in counts.keys() {
                *document_frequency.entry(term.clone()).or_insert(0) += 1;
            }
            term_counts.push(counts);
        }

        let doc_count = term_counts.len();
        let idf = document_frequency
            .iter()
            .map(|(term, df)| (term.clone(), smoothed_idf(doc_count, *df)))
            .collect::<BTreeMap<_, _>>();

        debug!(
            documents = doc_count,
            terms = idf.len(),
            "Indexed TF-IDF corpus"
        );

        Self {
            normalizer,
            term_counts,
            document_frequency,
            idf,
        }
    }

    /// Number of documents in the corpus.
    pub fn doc_count(&self) -> usize {
        self.term_counts.len()
    }

    /// Size of the term universe.
    pub fn vocabulary_size(&self) -> usize {
        self.idf.len()
    }

    /// The term universe, in term order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.idf.keys().map(String::as_str)
    }

    pub fn document_frequency(&self, term: &str) -> u32 {
        self.document_frequency.get(term).copied().unwrap_or(0)
    }

    /// Smoothed IDF of `term` against this corpus. Terms outside the
    /// universe are treated as having document frequency 0.
    pub fn idf(&self, term: &str) -> f64 {
        match self.idf.get(term) {
            Some(idf) => *idf,
            None => smoothed_idf(self.doc_count(), 0),
        }
    }

    /// Tokenize with the engine's normalizer.
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Produce a TF-IDF vector covering the full term universe.
    ///
    /// Terms of ad-hoc text that are not in the universe carry no weight.
    /// A corpus position past the end yields the all-zero vector.
    pub fn vectorize<'a>(&self, input: impl Into<DocumentRef<'a>>) -> TermVector {
        match input.into() {
            DocumentRef::Corpus(index) => match self.term_counts.get(index) {
                Some(counts) => self.weigh(counts),
                None => self.weigh(&HashMap::new()),
            },
            DocumentRef::Text(text) => {
                let counts = count_terms(&self.normalizer.terms(text));
                self.weigh(&counts)
            }
        }
    }

    fn weigh(&self, counts: &HashMap<String, u32>) -> TermVector {
        self.idf
            .iter()
            .map(|(term, idf)| {
                let tf = counts.get(term).copied().unwrap_or(0) as f64;
                (term.clone(), tf * idf)
            })
            .collect()
    }
}

fn count_terms(terms: &[String]) -> HashMap<String, u32> {
    let mut counts = HashMap::new();
    for term in terms {
        *counts.entry(term.clone()).or_insert(0) += 1;
    }
    counts
}

fn smoothed_idf(doc_count: usize, document_frequency: u32) -> f64 {
    ((1.0 + doc_count as f64) / (1.0 + document_frequency as f64)).ln() + 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> TfIdfEngine {
        TfIdfEngine::new(["desain grafis", "desain multimedia", "software developer"])
    }

    #[test]
    fn test_universe_is_corpus_union() {
        let engine = engine();
        let terms: Vec<&str> = engine.terms().collect();
        assert_eq!(
            terms,
            vec!["desain", "developer", "grafis", "multimedia", "software"]
        );
        assert_eq!(engine.doc_count(), 3);
    }

    #[test]
    fn test_document_frequency() {
        let engine = engine();
        assert_eq!(engine.document_frequency("desain"), 2);
        assert_eq!(engine.document_frequency("grafis"), 1);
        assert_eq!(engine.document_frequency("absent"), 0);
    }

    #[test]
    fn test_smoothed_idf_values() {
        let engine = engine();
        // ln(4/3) + 1
        assert!((engine.idf("desain") - ((4.0f64 / 3.0).ln() + 1.0)).abs() < 1e-12);
        // ln(4/2) + 1
        assert!((engine.idf("grafis") - (2.0f64.ln() + 1.0)).abs() < 1e-12);
        // ln(4/1) + 1 for an unseen term
        assert!((engine.idf("absent") - (4.0f64.ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_corpus_vector_covers_universe() {
        let engine = engine();
        let vec = engine.vectorize(DocumentRef::Corpus(0));
        assert_eq!(vec.len(), engine.vocabulary_size());
        assert!(vec.get("desain") > 0.0);
        assert!(vec.get("grafis") > 0.0);
        assert_eq!(vec.get("software"), 0.0);
    }

    #[test]
    fn test_term_frequency_multiplies_weight() {
        let engine = engine();
        let once = engine.vectorize("grafis");
        let twice = engine.vectorize("grafis grafis");
        assert!((twice.get("grafis") - 2.0 * once.get("grafis")).abs() < 1e-12);
    }

    #[test]
    fn test_query_terms_outside_universe_ignored() {
        let engine = engine();
        let vec = engine.vectorize("kuliner");
        assert_eq!(vec.get("kuliner"), 0.0);
        assert!(vec.is_zero());
    }

    #[test]
    fn test_query_does_not_mutate_statistics() {
        let engine = engine();
        let _ = engine.vectorize("desain desain kuliner");
        assert_eq!(engine.document_frequency("desain"), 2);
        assert_eq!(engine.vocabulary_size(), 5);
    }

    #[test]
    fn test_out_of_range_corpus_index_is_zero_vector() {
        let engine = engine();
        let vec = engine.vectorize(DocumentRef::Corpus(99));
        assert_eq!(vec.len(), engine.vocabulary_size());
        assert!(vec.is_zero());
    }

    #[test]
    fn test_empty_corpus() {
        let engine = TfIdfEngine::new(Vec::<String>::new());
        assert_eq!(engine.doc_count(), 0);
        assert!(engine.vectorize("anything").is_empty());
        assert!((engine.idf("x") - 1.0).abs() < 1e-12);
    }
}
