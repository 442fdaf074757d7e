// TF-IDF vectorization and cosine similarity over a fixed corpus.
//
// The engine indexes its corpus once at construction. After that it is
// read-only: query text is vectorized against the frozen statistics and
// never feeds back into them.

pub mod engine;
pub mod similarity;

pub use engine::{DocumentRef, TermVector, TfIdfEngine};
pub use similarity::cosine_similarity;
