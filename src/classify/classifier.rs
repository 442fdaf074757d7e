// TF-IDF category classifier.
//
// Each catalog entry becomes one synthetic document (its aliases followed by
// its canonical label), so the corpus size equals the catalog size. An
// incoming value is vectorized as out-of-corpus text and compared against
// every entry by cosine similarity; the best entry wins. There is no minimum
// similarity: a value with no term overlap at all is still assigned, and the
// tie-break policy decides where it lands.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::catalog::AliasCatalog;
use crate::text::Normalizer;
use crate::tfidf::{cosine_similarity, DocumentRef, TermVector, TfIdfEngine};

/// How to choose between entries tied at the best similarity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TieBreak {
    /// Earliest entry in catalog order.
    #[default]
    FirstInCatalog,
    /// The named entry wins whenever nothing overlaps (best score 0) or it is
    /// among the tied entries. Otherwise falls back to catalog order.
    PreferDefault(String),
}

/// Construction options for [`CategoryClassifier`].
#[derive(Debug, Clone, Default)]
pub struct ClassifierOptions {
    pub tie_break: TieBreak,
    pub normalizer: Normalizer,
}

/// The outcome of classifying one value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    /// Canonical label of the chosen entry.
    pub label: String,
    /// Catalog position of the chosen entry.
    pub index: usize,
    /// Cosine similarity of the value to the chosen entry.
    pub score: f64,
    /// More than one entry shared the best score.
    pub tied: bool,
}

/// Read-only classifier built once per catalog.
#[derive(Debug, Clone)]
pub struct CategoryClassifier {
    catalog: AliasCatalog,
    engine: TfIdfEngine,
    entry_vectors: Vec<TermVector>,
    default_index: Option<usize>,
}

impl CategoryClassifier {
    /// Classifier with catalog-order tie-breaking and the default normalizer.
    pub fn new(catalog: AliasCatalog) -> Self {
        Self::build(catalog, Normalizer::default(), None)
    }

    /// Classifier with explicit options. Fails if `PreferDefault` names a
    /// label that is not in the catalog.
    pub fn with_options(catalog: AliasCatalog, options: ClassifierOptions) -> Result<Self> {
        let default_index = match &options.tie_break {
            TieBreak::FirstInCatalog => None,
            TieBreak::PreferDefault(label) => match catalog.position(label) {
                Some(index) => Some(index),
                None => anyhow::bail!("Default category {label:?} is not in the field catalog"),
            },
        };
        Ok(Self::build(catalog, options.normalizer, default_index))
    }

    fn build(catalog: AliasCatalog, normalizer: Normalizer, default_index: Option<usize>) -> Self {
        let documents: Vec<String> = catalog.iter().map(|e| e.document_text()).collect();
        let engine = TfIdfEngine::with_normalizer(&documents, normalizer);
        let entry_vectors = (0..engine.doc_count())
            .map(|i| engine.vectorize(DocumentRef::Corpus(i)))
            .collect();

        info!(
            entries = catalog.len(),
            terms = engine.vocabulary_size(),
            default = ?default_index.and_then(|i| catalog.get(i)).map(|e| &e.canonical),
            "Built category classifier"
        );

        Self {
            catalog,
            engine,
            entry_vectors,
            default_index,
        }
    }

    pub fn catalog(&self) -> &AliasCatalog {
        &self.catalog
    }

    pub fn engine(&self) -> &TfIdfEngine {
        &self.engine
    }

    /// Similarity of `raw` to every catalog entry, in catalog order.
    pub fn scores(&self, raw: &str) -> Vec<f64> {
        let query = self.engine.vectorize(DocumentRef::Text(raw));
        self.entry_vectors
            .iter()
            .map(|entry| cosine_similarity(&query, entry))
            .collect()
    }

    /// Assign `raw` to the best-matching catalog entry.
    ///
    /// Returns `None` only when the catalog is empty.
    pub fn classify(&self, raw: &str) -> Option<Classification> {
        let scores = self.scores(raw);
        let best = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let first_best = scores.iter().position(|s| *s == best)?;
        let tied = scores.iter().filter(|s| **s == best).count() > 1;

        let index = match self.default_index {
            Some(default) if best <= 0.0 || scores[default] == best => default,
            _ => first_best,
        };

        let entry = self.catalog.get(index)?;
        debug!(
            value = raw,
            label = %entry.canonical,
            score = scores[index],
            tied,
            "Classified field value"
        );

        Some(Classification {
            label: entry.canonical.clone(),
            index,
            score: scores[index],
            tied,
        })
    }

    /// Canonical label for `raw`, if the catalog is non-empty.
    pub fn label(&self, raw: &str) -> Option<&str> {
        let classification = self.classify(raw)?;
        self.catalog
            .get(classification.index)
            .map(|e| e.canonical.as_str())
    }
}
