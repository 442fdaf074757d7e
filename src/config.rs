use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::catalog::AliasCatalog;
use crate::classify::{CategoryClassifier, ClassifierOptions, TieBreak};
use crate::resolve::{EntityResolver, MetricKind, DEFAULT_THRESHOLD};

/// Header of the intake-date column in the source sheets.
pub const DEFAULT_DATE_COLUMN: &str = "Tanggal Masuk";

/// Header of the institution column in the source sheets.
pub const DEFAULT_INSTITUTION_COLUMN: &str = "Asal Sekolah / Universitas";

/// Headers that may hold the internship field description, most preferred
/// first. Older sheets put it under the phone-number header.
pub const DEFAULT_FIELD_COLUMNS: &[&str] = &["Keterangan", "Program Studi/Jurusan", "NO.TLPN"];

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded at startup via dotenvy. Every setting has a
/// default, so an empty environment is a valid configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Field catalog JSON (REKAP_FIELD_CATALOG). Built-in catalog when unset.
    pub field_catalog_path: Option<PathBuf>,
    /// Institution catalog JSON (REKAP_INSTITUTION_CATALOG). Built-in when unset.
    pub institution_catalog_path: Option<PathBuf>,
    /// Maximum accepted fuzzy distance, 0 to 1 (REKAP_FUZZY_THRESHOLD)
    pub fuzzy_threshold: f64,
    /// Fuzzy metric for institution names (REKAP_FUZZY_METRIC)
    pub fuzzy_metric: MetricKind,
    /// Catch-all field category that wins ties (REKAP_DEFAULT_FIELD).
    /// Catalog order decides ties when unset.
    pub default_field: Option<String>,
    pub date_column: String,
    pub institution_column: String,
    pub field_columns: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            field_catalog_path: None,
            institution_catalog_path: None,
            fuzzy_threshold: DEFAULT_THRESHOLD,
            fuzzy_metric: MetricKind::default(),
            default_field: None,
            date_column: DEFAULT_DATE_COLUMN.to_string(),
            institution_column: DEFAULT_INSTITUTION_COLUMN.to_string(),
            field_columns: DEFAULT_FIELD_COLUMNS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let fuzzy_threshold = match get("REKAP_FUZZY_THRESHOLD") {
            Some(raw) => raw
                .parse::<f64>()
                .with_context(|| format!("REKAP_FUZZY_THRESHOLD is not a number: {raw:?}"))?,
            None => defaults.fuzzy_threshold,
        };

        let fuzzy_metric = match get("REKAP_FUZZY_METRIC") {
            Some(raw) => raw
                .parse::<MetricKind>()
                .context("Invalid REKAP_FUZZY_METRIC")?,
            None => defaults.fuzzy_metric,
        };

        let field_columns = match get("REKAP_FIELD_COLUMNS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
            None => defaults.field_columns,
        };

        let config = Self {
            field_catalog_path: get("REKAP_FIELD_CATALOG").map(PathBuf::from),
            institution_catalog_path: get("REKAP_INSTITUTION_CATALOG").map(PathBuf::from),
            fuzzy_threshold,
            fuzzy_metric,
            default_field: get("REKAP_DEFAULT_FIELD"),
            date_column: get("REKAP_DATE_COLUMN").unwrap_or(defaults.date_column),
            institution_column: get("REKAP_INSTITUTION_COLUMN")
                .unwrap_or(defaults.institution_column),
            field_columns,
        };
        config.require_valid_threshold()?;
        Ok(config)
    }

    /// Check that the fuzzy threshold lies in [0, 1].
    pub fn require_valid_threshold(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.fuzzy_threshold) {
            anyhow::bail!(
                "REKAP_FUZZY_THRESHOLD must be between 0 and 1, got {}",
                self.fuzzy_threshold
            );
        }
        Ok(())
    }

    /// Check that at least one field column header is configured.
    /// Call this before any pass over the field column.
    pub fn require_field_columns(&self) -> Result<()> {
        if self.field_columns.is_empty() {
            anyhow::bail!(
                "REKAP_FIELD_COLUMNS is empty. Set it to a comma-separated list of headers,\n\
                 e.g. REKAP_FIELD_COLUMNS=Keterangan,Program Studi/Jurusan"
            );
        }
        Ok(())
    }

    /// The configured field catalog, or the built-in one.
    pub fn field_catalog(&self) -> Result<AliasCatalog> {
        match &self.field_catalog_path {
            Some(path) => AliasCatalog::load(path),
            None => AliasCatalog::default_fields(),
        }
    }

    /// The configured institution catalog, or the built-in one.
    pub fn institution_catalog(&self) -> Result<AliasCatalog> {
        match &self.institution_catalog_path {
            Some(path) => AliasCatalog::load(path),
            None => AliasCatalog::default_institutions(),
        }
    }

    pub fn tie_break(&self) -> TieBreak {
        match &self.default_field {
            Some(label) => TieBreak::PreferDefault(label.clone()),
            None => TieBreak::FirstInCatalog,
        }
    }

    pub fn build_classifier(&self) -> Result<CategoryClassifier> {
        let options = ClassifierOptions {
            tie_break: self.tie_break(),
            ..Default::default()
        };
        CategoryClassifier::with_options(self.field_catalog()?, options)
    }

    pub fn build_resolver(&self) -> Result<EntityResolver> {
        EntityResolver::with_metric(
            &self.institution_catalog()?,
            self.fuzzy_metric.build(),
            self.fuzzy_threshold,
        )
    }

    /// Field column candidates as string slices, for column lookup.
    pub fn field_column_candidates(&self) -> Vec<&str> {
        self.field_columns.iter().map(String::as_str).collect()
    }
}
