// Colored terminal output for tallies, classifications and resolutions.
//
// main.rs display paths delegate here; nothing in this module computes.

use colored::Colorize;

use super::{bar, truncate_chars};
use crate::catalog::AliasCatalog;
use crate::classify::Classification;
use crate::report::{FieldSection, InstitutionSection, IntakeSection, SheetReport};
use crate::resolve::{Candidate, Resolution};
use crate::tally::{PeriodCount, TallyEntry};

const BAR_WIDTH: usize = 20;
const LABEL_WIDTH: usize = 36;

/// Display a full sheet report.
pub fn display_report(report: &SheetReport) {
    println!(
        "\n{}",
        format!("=== Rekap: {} ===", report.sheet).bold()
    );

    match &report.fields {
        Some(section) => display_field_section(section),
        None => println!("\n  {}", "No field column in this sheet".dimmed()),
    }
    match &report.institutions {
        Some(section) => display_institution_section(section),
        None => println!("\n  {}", "No institution column in this sheet".dimmed()),
    }
    match &report.intake {
        Some(section) => display_intake_section(section),
        None => println!("\n  {}", "No intake date column in this sheet".dimmed()),
    }
    println!();
}

fn display_field_section(section: &FieldSection) {
    println!(
        "\n{} {}",
        "Bidang magang".bold(),
        format!(
            "({}: {} counted, {} skipped)",
            section.column, section.stats.counted, section.stats.skipped
        )
        .dimmed()
    );
    display_tally(&section.entries);
}

fn display_institution_section(section: &InstitutionSection) {
    println!(
        "\n{} {}",
        "Asal sekolah / universitas".bold(),
        format!(
            "({} counted, {} skipped)",
            section.stats.counted, section.stats.skipped
        )
        .dimmed()
    );
    display_tally(&section.entries);

    if !section.unresolved.is_empty() {
        let count: usize = section.unresolved.iter().map(|e| e.value).sum();
        println!(
            "\n  {} {} values matched no catalog entry:",
            "~".yellow(),
            count
        );
        for entry in &section.unresolved {
            println!(
                "      {:>3}x  {}",
                entry.value,
                truncate_chars(&entry.name, 60).dimmed()
            );
        }
    }
}

fn display_intake_section(section: &IntakeSection) {
    println!("\n{}", "Tanggal masuk".bold());
    if let Some(year) = section.year {
        println!("  {}", format!("Per bulan, {year}").underline());
        display_periods(&section.monthly);
    }
    println!("  {}", "Per tahun".underline());
    display_periods(&section.yearly);
    if section.unparsed > 0 {
        println!(
            "  {} {} values could not be read as dates",
            "!".bright_red(),
            section.unparsed
        );
    }
}

/// Display chart rows as ranked bars.
pub fn display_tally(entries: &[TallyEntry]) {
    if entries.is_empty() {
        println!("  {}", "(no values)".dimmed());
        return;
    }

    for (i, entry) in entries.iter().enumerate() {
        let share = entry.percentage / 100.0;
        let bar = bar(share, BAR_WIDTH);
        let colored_bar = if share >= 0.25 {
            bar.bright_green()
        } else if share >= 0.10 {
            bar.bright_yellow()
        } else {
            bar.bright_blue()
        };

        println!(
            "  {:>2}. {:<width$} {} {:>4}  {:>6.2}%",
            i + 1,
            truncate_chars(&entry.name, LABEL_WIDTH),
            colored_bar,
            entry.value,
            entry.percentage,
            width = LABEL_WIDTH + 3,
        );
    }
}

fn display_periods(periods: &[PeriodCount]) {
    let max = periods.iter().map(|p| p.value).max().unwrap_or(0);
    if max == 0 {
        println!("    {}", "(no dates)".dimmed());
        return;
    }
    for period in periods {
        println!(
            "    {:<10} {} {}",
            period.label,
            bar(period.value as f64 / max as f64, BAR_WIDTH).cyan(),
            period.value
        );
    }
}

/// Display one classification with the per-entry similarity scores.
pub fn display_classification(
    raw: &str,
    terms: &[String],
    classification: &Classification,
    catalog: &AliasCatalog,
    scores: &[f64],
) {
    println!("\n  {} {}", "Input:".dimmed(), raw);
    println!("  {} {}", "Terms:".dimmed(), terms.join(" "));
    let label = if classification.score > 0.0 {
        classification.label.green().bold()
    } else {
        classification.label.yellow().bold()
    };
    println!(
        "  {} {}  (similarity {:.3}{})",
        "Category:".dimmed(),
        label,
        classification.score,
        if classification.tied { ", tie" } else { "" }
    );

    let mut ranked: Vec<(usize, f64)> = scores.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    for (index, score) in ranked.into_iter().filter(|(_, s)| *s > 0.0) {
        let name = catalog.get(index).map_or("?", |e| e.canonical.as_str());
        println!(
            "      {:<width$} {} {:.3}",
            name,
            bar(score, BAR_WIDTH).dimmed(),
            score,
            width = LABEL_WIDTH
        );
    }
}

/// Display one resolution, with the nearest key when it was rejected.
pub fn display_resolution(resolution: &Resolution, nearest: Option<&Candidate<'_>>, threshold: f64) {
    match resolution {
        Resolution::Matched(event) => {
            println!(
                "  {} {} {} {}  {}",
                "=".green(),
                event.original,
                "->".dimmed(),
                event.canonical.green().bold(),
                format!("(via {:?}, distance {:.3})", event.matched_alias, event.score).dimmed()
            );
        }
        Resolution::Unresolved { original, cleaned } => {
            println!(
                "  {} {} {}",
                "~".yellow(),
                original,
                "(unresolved, passed through)".yellow()
            );
            if let Some(nearest) = nearest {
                println!(
                    "      {}",
                    format!(
                        "cleaned {:?}; nearest {:?} ({}) at {:.3} > {:.2}",
                        cleaned, nearest.key, nearest.canonical, nearest.score, threshold
                    )
                    .dimmed()
                );
            }
        }
    }
}

/// Display a catalog's entries and aliases.
pub fn display_catalog(title: &str, catalog: &AliasCatalog) {
    println!(
        "\n{}",
        format!("=== {title} ({} entries) ===", catalog.len()).bold()
    );
    for (i, entry) in catalog.iter().enumerate() {
        println!("  {:>2}. {}", i + 1, entry.canonical.bold());
        if !entry.aliases.is_empty() {
            let aliases = truncate_chars(&entry.aliases.join(", "), 100);
            println!("      {}", aliases.dimmed());
        }
    }
}
