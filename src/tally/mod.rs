// Aggregation: label counts, the field and institution passes, and the
// intake calendar.

pub mod aggregate;
pub mod calendar;
pub mod frequency;

pub use aggregate::{pass_stats, tally_fields, tally_institutions, InstitutionTally, PassStats};
pub use calendar::{IntakeCalendar, PeriodCount, MONTH_LABELS};
pub use frequency::{FrequencyTally, TallyEntry};
