// Stemmer trait and the default affix-stripping stemmer.
//
// The default is a heuristic tuned for Indonesian field descriptions. It
// removes at most one common prefix and then at most one common suffix, with
// no backtracking and no dictionary lookup. It will under-stem and mis-stem
// plenty of real words; that is acceptable because both sides of every
// comparison go through the same lossy step.

use std::fmt::Debug;

/// Reduces a single lowercase token to its stem.
///
/// Implementations must be deterministic: the TF-IDF engine relies on the
/// same token always producing the same term.
pub trait Stemmer: Debug + Send + Sync {
    fn stem(&self, word: &str) -> String;
}

/// Prefixes removed by the default stemmer.
pub const DEFAULT_PREFIXES: &[&str] = &["di", "ke", "se", "me", "be", "ter"];

/// Suffixes removed by the default stemmer.
pub const DEFAULT_SUFFIXES: &[&str] = &["kan", "an", "i"];

/// Strips one prefix and one suffix from a fixed list.
///
/// When several affixes apply, the longest wins (`ter` before `te`-anything,
/// `kan` before `an`).
#[derive(Debug, Clone)]
pub struct AffixStemmer {
    prefixes: Vec<String>,
    suffixes: Vec<String>,
}

impl AffixStemmer {
    pub fn new<P, S>(prefixes: P, suffixes: S) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        let mut prefixes: Vec<String> = prefixes.into_iter().map(Into::into).collect();
        let mut suffixes: Vec<String> = suffixes.into_iter().map(Into::into).collect();
        // Longest first; stable sort keeps declaration order among equals
        prefixes.sort_by(|a, b| b.len().cmp(&a.len()));
        suffixes.sort_by(|a, b| b.len().cmp(&a.len()));
        Self { prefixes, suffixes }
    }
}

impl Default for AffixStemmer {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIXES.iter().copied(), DEFAULT_SUFFIXES.iter().copied())
    }
}

impl Stemmer for AffixStemmer {
    fn stem(&self, word: &str) -> String {
        let mut rest = word;

        if let Some(stripped) = self
            .prefixes
            .iter()
            .find_map(|p| rest.strip_prefix(p.as_str()))
        {
            rest = stripped;
        }

        if let Some(stripped) = self
            .suffixes
            .iter()
            .find_map(|s| rest.strip_suffix(s.as_str()))
        {
            rest = stripped;
        }

        rest.to_string()
    }
}

/// Leaves tokens untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityStemmer;

impl Stemmer for IdentityStemmer {
    fn stem(&self, word: &str) -> String {
        word.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_and_suffix() {
        let stemmer = AffixStemmer::default();
        assert_eq!(stemmer.stem("pengembangan"), "pengembang");
        assert_eq!(stemmer.stem("diberikan"), "beri");
        assert_eq!(stemmer.stem("terapan"), "ap");
    }

    #[test]
    fn test_at_most_one_of_each() {
        let stemmer = AffixStemmer::default();
        // "dike..." loses only "di"
        assert_eq!(stemmer.stem("dikenal"), "kenal");
        // "...ani" loses only "i"
        assert_eq!(stemmer.stem("tani"), "tan");
    }

    #[test]
    fn test_longest_suffix_wins() {
        let stemmer = AffixStemmer::default();
        assert_eq!(stemmer.stem("bacakan"), "baca");
    }

    #[test]
    fn test_whole_word_affix_becomes_empty() {
        let stemmer = AffixStemmer::default();
        assert_eq!(stemmer.stem("di"), "");
        assert_eq!(stemmer.stem("kan"), "");
    }

    #[test]
    fn test_custom_affixes() {
        let stemmer = AffixStemmer::new(["un"], ["ing", "s"]);
        assert_eq!(stemmer.stem("undoing"), "do");
        assert_eq!(stemmer.stem("cats"), "cat");
    }

    #[test]
    fn test_identity() {
        assert_eq!(IdentityStemmer.stem("diberikan"), "diberikan");
    }
}
