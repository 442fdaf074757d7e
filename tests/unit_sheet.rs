// Unit tests for the row-source helpers and the intake calendar.
//
// Header location, missing-value sentinels, workbook loading from disk, and
// date grouping.

use std::fs;

use rekap::sheet::{
    find_column, find_header_index, is_missing, parse_intake_date, ColumnRef, Row, Workbook,
};
use rekap::tally::IntakeCalendar;

fn rows(raw: &[&[&str]]) -> Vec<Row> {
    raw.iter()
        .map(|row| row.iter().map(|c| c.to_string()).collect())
        .collect()
}

// ============================================================
// Sentinels
// ============================================================

#[test]
fn sentinels_and_lowercase_variants_are_missing() {
    for raw in ["#REF!", "#VALUE!", "-", "N/A", "#ref!", "#value!", "n/a", " N/a ", ""] {
        assert!(is_missing(raw), "{raw:?} not treated as missing");
    }
}

#[test]
fn real_values_are_not_missing() {
    for raw in ["Undip", "NA", "#REF", "0", "- Desain"] {
        assert!(!is_missing(raw), "{raw:?} treated as missing");
    }
}

#[test]
fn column_values_exclude_sentinels() {
    let rows = rows(&[
        &["Keterangan"],
        &["#REF!"],
        &["desain"],
        &["#value!"],
        &["-"],
        &["n/a"],
        &[""],
        &["  hukum  "],
    ]);
    let column = ColumnRef::locate(&rows, &["Keterangan"], &["Keterangan"]).unwrap();
    let values: Vec<&str> = column.values(&rows).collect();
    assert_eq!(values, vec!["desain", "hukum"]);
}

// ============================================================
// Header and column lookup
// ============================================================

#[test]
fn header_requires_every_label() {
    let rows = rows(&[
        &["Laporan", "Tanggal Masuk"],
        &["No", "Nama", "Tanggal Masuk", "Keterangan"],
    ]);
    assert_eq!(find_header_index(&rows, &["Tanggal Masuk"]), Some(0));
    assert_eq!(find_header_index(&rows, &["Tanggal Masuk", "Keterangan"]), Some(1));
    assert_eq!(find_header_index(&rows, &[]), Some(0));
    assert_eq!(find_header_index(&[], &["Nama"]), None);
}

#[test]
fn header_labels_match_exactly() {
    let rows = rows(&[&["tanggal masuk", "Tanggal Masuk "]]);
    assert_eq!(find_header_index(&rows, &["Tanggal Masuk"]), None);
}

#[test]
fn column_candidates_in_priority_order() {
    let header = vec!["NO.TLPN".to_string(), "Program Studi/Jurusan".to_string()];
    assert_eq!(
        find_column(&header, &["Keterangan", "Program Studi/Jurusan", "NO.TLPN"]),
        Some(1)
    );
}

// ============================================================
// Workbook
// ============================================================

#[test]
fn workbook_loads_from_file() {
    let dir = std::env::temp_dir().join(format!("rekap-sheet-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("workbook.json");
    fs::write(
        &path,
        r#"{"Magang 2024": [["No", "Tanggal Masuk"], [1, "2024-01-15"], [2, null]]}"#,
    )
    .unwrap();

    let workbook = Workbook::load(&path).unwrap();
    let sheet = workbook.sheet("Magang 2024").unwrap();
    assert_eq!(sheet.rows.len(), 3);
    assert_eq!(sheet.rows[1], vec!["1", "2024-01-15"]);
    assert_eq!(sheet.rows[2], vec!["2", ""]);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn workbook_missing_file_is_an_error() {
    let err = Workbook::load(std::path::Path::new("/nonexistent/rekap.json")).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/rekap.json"));
}

// ============================================================
// Dates and calendar
// ============================================================

#[test]
fn intake_dates_in_mixed_formats() {
    let expected = chrono::NaiveDate::from_ymd_opt(2024, 3, 4);
    for raw in ["2024-03-04", "03/04/2024", "04-03-2024", "4 Maret 2024", "Mar 4, 2024"] {
        assert_eq!(parse_intake_date(raw), expected, "{raw}");
    }
}

#[test]
fn calendar_groups_by_month_and_year() {
    let calendar = IntakeCalendar::from_values([
        "2024-01-10",
        "2024-01-20",
        "12 Agustus 2024",
        "2023-12-01",
        "tidak tahu",
    ]);

    let monthly: Vec<(String, usize)> = calendar
        .by_month(2024)
        .into_iter()
        .map(|p| (p.label, p.value))
        .collect();
    assert_eq!(
        monthly,
        vec![("Jan 2024".to_string(), 2), ("Agu 2024".to_string(), 1)]
    );

    let yearly: Vec<(String, usize)> = calendar
        .by_year(2024)
        .into_iter()
        .map(|p| (p.label, p.value))
        .collect();
    assert_eq!(yearly, vec![("2023".to_string(), 1), ("2024".to_string(), 3)]);
    assert_eq!(calendar.unparsed(), 1);
}
