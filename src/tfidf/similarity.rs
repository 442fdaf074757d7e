// Cosine similarity between two term vectors.
//
// Similarity to an all-zero vector is defined as 0.0 rather than NaN, so an
// all-stopword query simply matches nothing.

use std::collections::BTreeSet;

use super::engine::TermVector;

/// Cosine similarity over the union of both vectors' terms.
///
/// Returns 0.0 when either magnitude is zero. With non-negative weights the
/// result lies in [0, 1]; the return value is clamped to [-1, 1] to absorb
/// rounding.
pub fn cosine_similarity(a: &TermVector, b: &TermVector) -> f64 {
    let terms: BTreeSet<&str> = a.terms().chain(b.terms()).collect();

    let mut dot = 0.0;
    let mut mag_a = 0.0;
    let mut mag_b = 0.0;

    for term in terms {
        let wa = a.get(term);
        let wb = b.get(term);
        dot += wa * wb;
        mag_a += wa * wa;
        mag_b += wb * wb;
    }

    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }

    (dot / (mag_a.sqrt() * mag_b.sqrt())).clamp(-1.0, 1.0)
}
