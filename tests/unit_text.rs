// Unit tests for the text normalizer.
//
// Tests the public tokenizer contract: pipeline order, stopword removal,
// empty input, and swapping the stemming strategy.

use rekap::text::{clean_text, tokenize, AffixStemmer, Normalizer, Stemmer, STOPWORDS};

// ============================================================
// Pipeline
// ============================================================

#[test]
fn tokenize_lowercases_and_strips_punctuation() {
    assert_eq!(
        tokenize("SOFTWARE-Developer, (Web)!"),
        vec!["softwaredeveloper", "web"]
    );
}

#[test]
fn tokenize_strips_diacritics_after_decomposition() {
    assert_eq!(tokenize("Résumé"), vec!["resume"]);
}

#[test]
fn tokenize_applies_one_prefix_and_one_suffix() {
    assert_eq!(tokenize("dikembangkan"), vec!["kembang"]);
    assert_eq!(tokenize("pemrograman"), vec!["pemrogram"]);
}

#[test]
fn tokenize_is_restartable() {
    let text = "Pengembangan aplikasi berbasis web";
    assert_eq!(tokenize(text), tokenize(text));
}

#[test]
fn tokenize_keeps_digits() {
    assert_eq!(tokenize("SMK 7"), vec!["smk", "7"]);
}

// ============================================================
// Stopwords
// ============================================================

#[test]
fn stopword_set_has_eighteen_words() {
    assert_eq!(STOPWORDS.len(), 18);
}

#[test]
fn stopwords_and_punctuation_only_yields_nothing() {
    assert!(tokenize("yang, dan... untuk!! dengan -- di ke? ini itu").is_empty());
}

#[test]
fn every_stopword_is_removed_alone() {
    for word in STOPWORDS {
        assert!(tokenize(word).is_empty(), "{word} survived");
    }
}

#[test]
fn empty_input_yields_nothing() {
    assert!(tokenize("").is_empty());
    assert!(tokenize("!!! ???").is_empty());
}

// ============================================================
// Pluggable stemmer
// ============================================================

#[derive(Debug)]
struct FirstFour;

impl Stemmer for FirstFour {
    fn stem(&self, word: &str) -> String {
        word.chars().take(4).collect()
    }
}

#[test]
fn custom_stemmer_replaces_default() {
    let normalizer = Normalizer::with_stemmer(FirstFour);
    assert_eq!(normalizer.terms("Informatika Informasi"), vec!["info", "info"]);
}

#[test]
fn custom_affix_lists() {
    let normalizer = Normalizer::with_stemmer(AffixStemmer::new(["pe"], ["an"]));
    assert_eq!(normalizer.terms("pengembangan"), vec!["ngembang"]);
}

#[test]
fn clean_text_keeps_word_characters_only() {
    assert_eq!(clean_text("Prog. Studi/Jurusan: T.I."), "prog studijurusan ti");
}
