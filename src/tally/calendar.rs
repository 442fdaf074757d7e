// Intake dates grouped by month and by year.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::sheet::parse_intake_date;

/// Indonesian short month names, January first.
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

/// Count for one calendar period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodCount {
    pub label: String,
    pub value: usize,
}

/// Parsed intake dates from one sheet column.
#[derive(Debug, Clone, Default)]
pub struct IntakeCalendar {
    dates: Vec<NaiveDate>,
    unparsed: usize,
}

impl IntakeCalendar {
    /// Parse every value; values that aren't dates are counted, not kept.
    pub fn from_values<'a>(values: impl IntoIterator<Item = &'a str>) -> Self {
        let mut calendar = Self::default();
        for value in values {
            match parse_intake_date(value) {
                Some(date) => calendar.dates.push(date),
                None => calendar.unparsed += 1,
            }
        }
        calendar
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Values that could not be read as a date.
    pub fn unparsed(&self) -> usize {
        self.unparsed
    }

    /// Distinct years present, ascending.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.dates.iter().map(|d| d.year()).collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    /// Monthly counts within `year`, labelled like `Mei 2024`, in calendar
    /// order. Months with no intake are omitted.
    pub fn by_month(&self, year: i32) -> Vec<PeriodCount> {
        let mut counts = [0usize; 12];
        for date in self.dates.iter().filter(|d| d.year() == year) {
            counts[date.month0() as usize] += 1;
        }

        counts
            .iter()
            .enumerate()
            .filter(|(_, n)| **n > 0)
            .map(|(month, n)| PeriodCount {
                label: format!("{} {year}", MONTH_LABELS[month]),
                value: *n,
            })
            .collect()
    }

    /// Yearly counts for years up to and including `up_to`, ascending.
    pub fn by_year(&self, up_to: i32) -> Vec<PeriodCount> {
        let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
        for date in self.dates.iter().filter(|d| d.year() <= up_to) {
            *counts.entry(date.year()).or_default() += 1;
        }

        counts
            .into_iter()
            .map(|(year, n)| PeriodCount {
                label: year.to_string(),
                value: n,
            })
            .collect()
    }
}
