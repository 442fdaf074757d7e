// Tokenizer pipeline: lowercase, NFKD, strip punctuation, split, stem,
// drop stopwords.

use std::sync::Arc;

use unicode_normalization::UnicodeNormalization;

use super::stemmer::{AffixStemmer, Stemmer};

/// Closed set of Indonesian function words dropped from every token stream.
pub const STOPWORDS: &[&str] = &[
    "yang", "dan", "untuk", "dengan", "pada", "dari", "oleh", "karena", "sebagai", "juga", "di",
    "ke", "ini", "itu", "adalah", "atau", "akan", "dalam",
];

/// Turns free text into terms.
///
/// Cloning is cheap; the stemmer is shared.
#[derive(Debug, Clone)]
pub struct Normalizer {
    stemmer: Arc<dyn Stemmer>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::with_stemmer(AffixStemmer::default())
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a normalizer around a different stemming strategy.
    pub fn with_stemmer(stemmer: impl Stemmer + 'static) -> Self {
        Self {
            stemmer: Arc::new(stemmer),
        }
    }

    /// Tokenize `text` into an ordered list of terms.
    ///
    /// Empty input, or input made only of punctuation and stopwords, yields
    /// an empty list.
    pub fn terms(&self, text: &str) -> Vec<String> {
        let cleaned = clean_text(text);
        cleaned
            .split_whitespace()
            .filter(|raw| !is_stopword(raw))
            .map(|raw| self.stemmer.stem(raw))
            .filter(|stem| !stem.is_empty() && !is_stopword(stem))
            .collect()
    }
}

/// Tokenize with the default Indonesian stemmer.
pub fn tokenize(text: &str) -> Vec<String> {
    Normalizer::default().terms(text)
}

fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}

/// Lowercase, decompose, and keep only ASCII word characters and whitespace.
///
/// Decomposition splits accented letters into base letter plus combining
/// mark; the mark is not a word character, so it is dropped here.
pub fn clean_text(text: &str) -> String {
    text.to_lowercase()
        .nfkd()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect()
}
