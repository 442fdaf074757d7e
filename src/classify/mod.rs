// Category classification: map a free-text field description onto one
// label from a fixed catalog using TF-IDF cosine similarity.

pub mod classifier;

pub use classifier::{CategoryClassifier, Classification, ClassifierOptions, TieBreak};
