// Lenient parsing for the intake-date column.
//
// Dates are typed by hand into the sheet, so one column mixes ISO dates,
// US-style slashes, day-first dashes and month names in two languages.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Month names accepted in free-text dates, English and Indonesian, full and
/// abbreviated. Matched case-insensitively.
const MONTH_NAMES: &[(&str, u32)] = &[
    ("january", 1),
    ("januari", 1),
    ("jan", 1),
    ("february", 2),
    ("februari", 2),
    ("pebruari", 2),
    ("feb", 2),
    ("march", 3),
    ("maret", 3),
    ("mar", 3),
    ("april", 4),
    ("apr", 4),
    ("may", 5),
    ("mei", 5),
    ("june", 6),
    ("juni", 6),
    ("jun", 6),
    ("july", 7),
    ("juli", 7),
    ("jul", 7),
    ("august", 8),
    ("agustus", 8),
    ("aug", 8),
    ("agu", 8),
    ("ags", 8),
    ("september", 9),
    ("sept", 9),
    ("sep", 9),
    ("october", 10),
    ("oktober", 10),
    ("oct", 10),
    ("okt", 10),
    ("november", 11),
    ("nopember", 11),
    ("nov", 11),
    ("december", 12),
    ("desember", 12),
    ("dec", 12),
    ("des", 12),
];

/// Month number for an English or Indonesian month name.
pub fn month_from_name(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    MONTH_NAMES
        .iter()
        .find(|(candidate, _)| *candidate == lower)
        .map(|(_, month)| *month)
}

/// English abbreviations understood by chrono's `%b`.
const ENGLISH_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Parse a hand-typed intake date.
///
/// RFC 3339 and ISO timestamps (`2024-01-15T08:00:00Z`) are tried first on
/// the raw value. Otherwise characters other than ASCII letters, digits, `/`,
/// `-` and spaces are treated as spaces and these shapes are accepted, tried
/// in this order:
///
/// - `2024-01-15`, `2024/01/15`
/// - `01/15/2024` (month first), then `15/01/2024` (day first)
/// - `15-01-2024` (day first)
/// - `15 Januari 2024`, `15-Jan-2024`, `January 15 2024`
///
/// A leading weekday and anything after the date (a time, "pukul 08.00") are
/// ignored. Two-digit years follow chrono's `%y`. Anything else yields `None`.
pub fn parse_intake_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Some(date) = parse_timestamp(raw) {
        return Some(date);
    }

    let cleaned: String = raw
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '/' || c == '-' {
                c
            } else {
                ' '
            }
        })
        .collect();
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.is_empty() {
        return None;
    }

    if cleaned.chars().any(|c| c.is_ascii_alphabetic()) {
        parse_named_month(&cleaned)
    } else {
        parse_numeric(&cleaned)
    }
}

fn parse_timestamp(raw: &str) -> Option<NaiveDate> {
    const FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.date_naive());
    }
    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|timestamp| timestamp.date())
}

fn parse_numeric(cleaned: &str) -> Option<NaiveDate> {
    // A trailing time component ("15/01/2024 0830") is ignored
    let date_part = cleaned.split(' ').next()?;
    let is_separator = |c: char| c == '/' || c == '-';
    let slash = date_part.contains('/');
    let year_first = date_part.find(is_separator) == Some(4);
    let short_year = date_part.rsplit(is_separator).next().map_or(true, |y| y.len() <= 2);

    let formats: &[&str] = match (year_first, slash, short_year) {
        (true, true, _) => &["%Y/%m/%d"],
        (true, false, _) => &["%Y-%m-%d"],
        (false, true, false) => &["%m/%d/%Y", "%d/%m/%Y"],
        (false, true, true) => &["%m/%d/%y", "%d/%m/%y"],
        (false, false, false) => &["%d-%m-%Y"],
        (false, false, true) => &["%d-%m-%y"],
    };
    formats
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(date_part, format).ok())
}

fn parse_named_month(cleaned: &str) -> Option<NaiveDate> {
    let mut tokens: Vec<&str> = cleaned
        .split(|c: char| c == ' ' || c == '/' || c == '-')
        .filter(|t| !t.is_empty())
        .collect();

    // Leading weekday ("Senin, 15 Januari 2024")
    if tokens.len() > 3
        && tokens[0].chars().all(|c| c.is_ascii_alphabetic())
        && month_from_name(tokens[0]).is_none()
    {
        tokens.remove(0);
    }
    if tokens.len() < 3 {
        return None;
    }

    let (day, month, year) = match (month_from_name(tokens[0]), month_from_name(tokens[1])) {
        (None, Some(month)) => (tokens[0], month, tokens[2]),
        (Some(month), None) => (tokens[1], month, tokens[2]),
        _ => return None,
    };
    if !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let month = ENGLISH_MONTHS.get(usize::try_from(month).ok()?.checked_sub(1)?)?;
    let format = if year.len() <= 2 { "%d %b %y" } else { "%d %b %Y" };
    NaiveDate::parse_from_str(&format!("{day} {month} {year}"), format).ok()
}
