// Row-source helpers: workbook loading, header and column lookup, missing
// value detection and intake-date parsing.

pub mod dates;
pub mod rows;
pub mod workbook;

/// One spreadsheet row, cells already stringified.
pub type Row = Vec<String>;

pub use dates::{month_from_name, parse_intake_date};
pub use rows::{find_column, find_header_index, is_missing, ColumnRef, MISSING_MARKERS};
pub use workbook::{Sheet, Workbook, DEFAULT_SHEET_NAME};
