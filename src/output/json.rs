// JSON export of chart rows for the dashboard's chart components.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::report::SheetReport;

/// Reports for every sheet of one workbook.
#[derive(Debug, Serialize)]
pub struct WorkbookReport<'a> {
    pub source: &'a str,
    pub sheets: &'a [SheetReport],
}

/// Pretty-printed JSON for a set of sheet reports.
pub fn render(source: &str, sheets: &[SheetReport]) -> Result<String> {
    serde_json::to_string_pretty(&WorkbookReport { source, sheets })
        .context("Failed to serialize report")
}
