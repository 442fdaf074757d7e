// Header and column lookup over a raw row matrix, plus the missing-value check.
//
// Spreadsheet exports often carry title rows above the real header, so the
// header row is found by content rather than assumed to be row 0.

use serde::Serialize;

use super::Row;

/// Placeholder values that mean "no data" in the source sheets. Compared
/// case-insensitively after trimming.
pub const MISSING_MARKERS: &[&str] = &["#REF!", "#VALUE!", "-", "N/A"];

/// True for blank cells and sheet placeholders such as `#REF!` or `n/a`.
pub fn is_missing(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty()
        || MISSING_MARKERS
            .iter()
            .any(|marker| trimmed.eq_ignore_ascii_case(marker))
}

/// Index of the first row that contains every label in `required`.
pub fn find_header_index(rows: &[Row], required: &[&str]) -> Option<usize> {
    rows.iter().position(|row| {
        required
            .iter()
            .all(|label| row.iter().any(|cell| cell == label))
    })
}

/// Index of the first candidate label present in `header`.
///
/// Candidates are tried in order, so earlier ones take priority regardless
/// of where they sit in the row.
pub fn find_column<S: AsRef<str>>(header: &[S], candidates: &[&str]) -> Option<usize> {
    candidates
        .iter()
        .find_map(|label| header.iter().position(|cell| cell.as_ref() == *label))
}

/// A located column: which row is the header and which cell holds the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnRef {
    pub header_row: usize,
    pub column: usize,
}

impl ColumnRef {
    /// Locate a column whose header row is identified by `header_labels`,
    /// using the first of `candidates` present in that row.
    pub fn locate(rows: &[Row], header_labels: &[&str], candidates: &[&str]) -> Option<Self> {
        let header_row = find_header_index(rows, header_labels)?;
        let column = find_column(rows[header_row].as_slice(), candidates)?;
        Some(Self { header_row, column })
    }

    /// Cell values below the header, trimmed, with missing values removed.
    /// Rows too short to reach the column are skipped.
    pub fn values<'a>(&self, rows: &'a [Row]) -> impl Iterator<Item = &'a str> + 'a {
        let column = self.column;
        rows.iter()
            .skip(self.header_row + 1)
            .filter_map(move |row| row.get(column))
            .map(|cell| cell.trim())
            .filter(|value| !is_missing(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<Row> {
        [
            vec!["Rekap Peserta Magang"],
            vec!["No", "Nama", "Tanggal Masuk", "Keterangan", "Asal Sekolah / Universitas"],
            vec!["1", "Ani", "01/15/2024", "Desain grafis", "Undip"],
            vec!["2", "Budi", "#REF!", "n/a", " unnes "],
            vec!["3", "Citra"],
        ]
        .into_iter()
        .map(|row| row.into_iter().map(String::from).collect())
        .collect()
    }

    #[test]
    fn test_is_missing() {
        assert!(is_missing(""));
        assert!(is_missing("   "));
        assert!(is_missing("#REF!"));
        assert!(is_missing("#ref!"));
        assert!(is_missing("#Value!"));
        assert!(is_missing(" - "));
        assert!(is_missing("n/a"));
        assert!(!is_missing("Undip"));
        assert!(!is_missing("--"));
    }

    #[test]
    fn test_find_header_skips_title_rows() {
        assert_eq!(find_header_index(&rows(), &["Tanggal Masuk"]), Some(1));
        assert_eq!(find_header_index(&rows(), &["Tanggal Masuk", "Nama"]), Some(1));
        assert_eq!(find_header_index(&rows(), &["Email"]), None);
    }

    #[test]
    fn test_find_column_respects_candidate_order() {
        let header = ["No", "Program Studi/Jurusan", "Keterangan"];
        assert_eq!(find_column(&header, &["Keterangan", "Program Studi/Jurusan"]), Some(2));
        assert_eq!(find_column(&header, &["Email", "Program Studi/Jurusan"]), Some(1));
        assert_eq!(find_column(&header, &["Email"]), None);
    }

    #[test]
    fn test_column_values_skip_missing_and_short_rows() {
        let rows = rows();
        let column = ColumnRef::locate(&rows, &["Tanggal Masuk"], &["Asal Sekolah / Universitas"])
            .unwrap();
        let values: Vec<&str> = column.values(&rows).collect();
        assert_eq!(values, vec!["Undip", "unnes"]);

        let field = ColumnRef::locate(&rows, &["Tanggal Masuk"], &["Keterangan"]).unwrap();
        let values: Vec<&str> = field.values(&rows).collect();
        assert_eq!(values, vec!["Desain grafis"]);
    }

    #[test]
    fn test_locate_missing_column() {
        assert!(ColumnRef::locate(&rows(), &["Tanggal Masuk"], &["Email"]).is_none());
        assert!(ColumnRef::locate(&rows(), &["Email"], &["Nama"]).is_none());
    }
}
