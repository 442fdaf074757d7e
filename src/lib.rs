// Rekap: free-text category normalization for internship intake sheets
//
// This is the library root. Text normalization and TF-IDF feed the field
// classifier; the fuzzy resolver canonicalizes institution names; sheet,
// tally and report turn raw rows into chart data.

pub mod catalog;
pub mod classify;
pub mod config;
pub mod output;
pub mod report;
pub mod resolve;
pub mod sheet;
pub mod tally;
pub mod text;
pub mod tfidf;
