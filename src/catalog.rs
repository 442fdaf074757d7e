// Alias catalogs: canonical labels plus the free-text aliases that map to them.
//
// Two catalogs ship with the binary, one of internship field categories and
// one of institution names. Either can be replaced by a JSON file at runtime.
// Catalogs are validated once at load and are read-only afterwards.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};

const DEFAULT_FIELDS_JSON: &str = include_str!("../data/internship_fields.json");
const DEFAULT_INSTITUTIONS_JSON: &str = include_str!("../data/institutions.json");

/// One canonical label and the aliases that should resolve to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasEntry {
    pub canonical: String,
    /// Accepts either a single string or a list in JSON.
    #[serde(default, deserialize_with = "one_or_many")]
    pub aliases: Vec<String>,
}

impl AliasEntry {
    pub fn new<S: Into<String>>(canonical: impl Into<String>, aliases: impl IntoIterator<Item = S>) -> Self {
        Self {
            canonical: canonical.into(),
            aliases: aliases.into_iter().map(Into::into).collect(),
        }
    }

    /// Aliases followed by the canonical label, lowercased, as one document.
    pub fn document_text(&self) -> String {
        let mut parts: Vec<&str> = self.aliases.iter().map(String::as_str).collect();
        parts.push(&self.canonical);
        parts.join(" ").to_lowercase()
    }
}

fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(alias) => vec![alias],
        OneOrMany::Many(aliases) => aliases,
    })
}

/// An ordered, validated list of alias entries.
///
/// Order matters: the classifier breaks ties by catalog position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AliasCatalog {
    entries: Vec<AliasEntry>,
}

impl AliasCatalog {
    /// Build a catalog, rejecting blank or duplicate canonical labels.
    pub fn from_entries(entries: Vec<AliasEntry>) -> Result<Self> {
        let mut seen = HashSet::new();
        for (i, entry) in entries.iter().enumerate() {
            if entry.canonical.trim().is_empty() {
                anyhow::bail!("Catalog entry {i} has an empty canonical label");
            }
            if !seen.insert(entry.canonical.as_str()) {
                anyhow::bail!(
                    "Catalog has a duplicate canonical label: {:?}",
                    entry.canonical
                );
            }
        }
        Ok(Self { entries })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: Vec<AliasEntry> =
            serde_json::from_str(json).context("Catalog is not a JSON list of alias entries")?;
        Self::from_entries(entries)
    }

    /// Read a catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog {}", path.display()))?;
        Self::from_json_str(&json).with_context(|| format!("Invalid catalog {}", path.display()))
    }

    /// Built-in internship field categories. The first entry is the catch-all.
    pub fn default_fields() -> Result<Self> {
        Self::from_json_str(DEFAULT_FIELDS_JSON).context("Built-in field catalog is invalid")
    }

    /// Built-in institution names.
    pub fn default_institutions() -> Result<Self> {
        Self::from_json_str(DEFAULT_INSTITUTIONS_JSON)
            .context("Built-in institution catalog is invalid")
    }

    pub fn entries(&self) -> &[AliasEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&AliasEntry> {
        self.entries.get(index)
    }

    /// Position of the entry with this canonical label.
    pub fn position(&self, canonical: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.canonical == canonical)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AliasEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_accept_string_or_list() {
        let catalog = AliasCatalog::from_json_str(
            r#"[
                {"canonical": "Desain", "aliases": "desain grafis multimedia"},
                {"canonical": "Hukum", "aliases": ["ilmu hukum", "legal"]},
                {"canonical": "Lainnya"}
            ]"#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.entries()[0].aliases, vec!["desain grafis multimedia"]);
        assert_eq!(catalog.entries()[1].aliases, vec!["ilmu hukum", "legal"]);
        assert!(catalog.entries()[2].aliases.is_empty());
    }

    #[test]
    fn test_document_text() {
        let entry = AliasEntry::new("Teknologi Informasi", ["Teknik Informatika", "software"]);
        assert_eq!(
            entry.document_text(),
            "teknik informatika software teknologi informasi"
        );
    }

    #[test]
    fn test_rejects_duplicate_canonical() {
        let entries = vec![
            AliasEntry::new("Desain", ["grafis"]),
            AliasEntry::new("Desain", ["multimedia"]),
        ];
        assert!(AliasCatalog::from_entries(entries).is_err());
    }

    #[test]
    fn test_rejects_blank_canonical() {
        let entries = vec![AliasEntry::new("  ", ["grafis"])];
        assert!(AliasCatalog::from_entries(entries).is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(AliasCatalog::from_json_str("{\"canonical\": 1}").is_err());
    }

    #[test]
    fn test_builtin_catalogs_load() {
        let fields = AliasCatalog::default_fields().unwrap();
        let institutions = AliasCatalog::default_institutions().unwrap();
        assert!(!fields.is_empty());
        assert!(!institutions.is_empty());
        assert_eq!(fields.position("Lainnya"), Some(0));
    }
}
