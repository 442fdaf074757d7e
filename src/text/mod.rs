// Text normalization: the shared front end of the TF-IDF classifier.
//
// Raw spreadsheet text goes in, an ordered list of terms comes out. The
// stemmer is a trait so the lossy default can be swapped without touching
// the TF-IDF engine.

pub mod normalizer;
pub mod stemmer;

pub use normalizer::{clean_text, tokenize, Normalizer, STOPWORDS};
pub use stemmer::{AffixStemmer, IdentityStemmer, Stemmer};
