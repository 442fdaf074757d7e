// Sheet report pipeline: locate columns -> aggregate -> chart rows.
//
// For one sheet this:
// 1. Finds the header row by the intake-date label and locates the field,
//    institution and date columns
// 2. Classifies the field column and resolves the institution column
// 3. Groups the intake dates by month (for one year) and by year
//
// A missing column only drops its section; the rest of the report still
// runs, matching how the dashboard renders whichever charts it can.

use serde::Serialize;
use tracing::{info, warn};

use crate::classify::CategoryClassifier;
use crate::config::Config;
use crate::resolve::EntityResolver;
use crate::sheet::{ColumnRef, Row, Sheet};
use crate::tally::{
    pass_stats, tally_fields, tally_institutions, IntakeCalendar, PassStats, PeriodCount,
    TallyEntry,
};

#[derive(Debug, Clone, Serialize)]
pub struct FieldSection {
    pub column: String,
    pub stats: PassStats,
    pub entries: Vec<TallyEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InstitutionSection {
    pub column: String,
    pub stats: PassStats,
    pub entries: Vec<TallyEntry>,
    /// Values no catalog entry accepted, counted on their own.
    pub unresolved: Vec<TallyEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IntakeSection {
    pub column: String,
    pub unparsed: usize,
    pub years: Vec<i32>,
    /// Year shown in `monthly`, if any dates were parsed.
    pub year: Option<i32>,
    pub monthly: Vec<PeriodCount>,
    pub yearly: Vec<PeriodCount>,
}

/// Everything the dashboard charts for one sheet.
#[derive(Debug, Clone, Serialize)]
pub struct SheetReport {
    pub sheet: String,
    pub fields: Option<FieldSection>,
    pub institutions: Option<InstitutionSection>,
    pub intake: Option<IntakeSection>,
}

/// Period selection for the intake calendar.
#[derive(Debug, Clone, Copy)]
pub struct ReportPeriod {
    /// Year for the monthly chart. Latest year up to `up_to` when unset.
    pub year: Option<i32>,
    /// Last year included in the yearly chart, normally the current year.
    pub up_to: i32,
}

/// Build the report for one sheet.
pub fn build_sheet_report(
    sheet: &Sheet,
    config: &Config,
    classifier: &CategoryClassifier,
    resolver: &EntityResolver,
    period: ReportPeriod,
) -> SheetReport {
    let rows = &sheet.rows;

    let fields = locate_field_column(rows, config).map(|column| FieldSection {
        column: header_label(rows, &column),
        stats: pass_stats(rows, &column),
        entries: tally_fields(rows, &column, classifier).entries(),
    });
    if fields.is_none() {
        warn!(sheet = %sheet.name, candidates = ?config.field_columns, "No field column found");
    }

    let institution_label = config.institution_column.as_str();
    let institutions = ColumnRef::locate(rows, &[institution_label], &[institution_label]).map(
        |column| {
            let tally = tally_institutions(rows, &column, resolver);
            InstitutionSection {
                column: institution_label.to_string(),
                stats: pass_stats(rows, &column),
                entries: tally.all.entries(),
                unresolved: tally.unresolved.entries(),
            }
        },
    );
    if institutions.is_none() {
        warn!(sheet = %sheet.name, column = institution_label, "No institution column found");
    }

    let date_label = config.date_column.as_str();
    let intake = ColumnRef::locate(rows, &[date_label], &[date_label]).map(|column| {
        let calendar = IntakeCalendar::from_values(column.values(rows));
        let years = calendar.years();
        let year = period
            .year
            .or_else(|| years.iter().rev().find(|y| **y <= period.up_to).copied())
            .or_else(|| years.first().copied());
        IntakeSection {
            column: date_label.to_string(),
            unparsed: calendar.unparsed(),
            monthly: year.map(|y| calendar.by_month(y)).unwrap_or_default(),
            yearly: calendar.by_year(period.up_to),
            years,
            year,
        }
    });
    if intake.is_none() {
        warn!(sheet = %sheet.name, column = date_label, "No intake date column found");
    }

    info!(
        sheet = %sheet.name,
        rows = rows.len(),
        fields = fields.is_some(),
        institutions = institutions.is_some(),
        intake = intake.is_some(),
        "Built sheet report"
    );

    SheetReport {
        sheet: sheet.name.clone(),
        fields,
        institutions,
        intake,
    }
}

/// The field column sits in the intake-date header row when there is one.
/// Otherwise any row holding one of the candidate headers is used, trying
/// candidates in order.
fn locate_field_column(rows: &[Row], config: &Config) -> Option<ColumnRef> {
    let candidates = config.field_column_candidates();
    ColumnRef::locate(rows, &[config.date_column.as_str()], &candidates).or_else(|| {
        candidates
            .iter()
            .find_map(|label| ColumnRef::locate(rows, &[*label], &[*label]))
    })
}

fn header_label(rows: &[Row], column: &ColumnRef) -> String {
    rows.get(column.header_row)
        .and_then(|row| row.get(column.column))
        .cloned()
        .unwrap_or_default()
}
