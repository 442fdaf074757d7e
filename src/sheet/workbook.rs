// Workbook loading: the row matrices handed over by the spreadsheet backend.
//
// The dashboard receives either a single sheet as a bare matrix or several
// sheets keyed by name. Cells arrive as JSON values; anything that isn't a
// string is stringified so the rest of the crate only sees text.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

use super::Row;

/// Name given to a sheet loaded from a bare matrix.
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// One named sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Row>,
}

/// A set of sheets, in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawWorkbook {
    Single(Vec<Vec<Value>>),
    Named(BTreeMap<String, Vec<Vec<Value>>>),
}

impl Workbook {
    pub fn from_sheets(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    /// Parse a workbook from JSON: either `[[...], ...]` or
    /// `{"Sheet name": [[...], ...], ...}`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawWorkbook = serde_json::from_str(json)
            .context("Expected a row matrix or an object of sheet name -> row matrix")?;

        let sheets = match raw {
            RawWorkbook::Single(rows) => vec![Sheet {
                name: DEFAULT_SHEET_NAME.to_string(),
                rows: to_rows(rows),
            }],
            RawWorkbook::Named(named) => named
                .into_iter()
                .map(|(name, rows)| Sheet {
                    name,
                    rows: to_rows(rows),
                })
                .collect(),
        };

        Ok(Self { sheets })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read workbook {}", path.display()))?;
        Self::from_json_str(&json).with_context(|| format!("Invalid workbook {}", path.display()))
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

fn to_rows(raw: Vec<Vec<Value>>) -> Vec<Row> {
    raw.into_iter()
        .map(|row| row.into_iter().map(cell_text).collect())
        .collect()
}

fn cell_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
