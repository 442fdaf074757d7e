use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing::info;

use rekap::config::Config;
use rekap::output::{self, terminal};
use rekap::report::{build_sheet_report, ReportPeriod};
use rekap::resolve::{clean_name, TracingObserver};
use rekap::sheet::Workbook;
use rekap::text::Normalizer;

/// Rekap: normalize free-text internship intake data into chart categories.
///
/// Classifies internship field descriptions against a category catalog and
/// canonicalizes institution names, then tallies them per sheet.
#[derive(Parser)]
#[command(name = "rekap", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the terms a text normalizes to
    Tokenize {
        /// Text to tokenize, joined by spaces (reads stdin lines when omitted)
        text: Vec<String>,
    },

    /// Classify field descriptions into categories
    Classify {
        /// Values to classify (reads stdin lines when omitted)
        values: Vec<String>,

        /// Print JSON instead of the terminal view
        #[arg(long)]
        json: bool,
    },

    /// Resolve institution names against the catalog
    Resolve {
        /// Names to resolve (reads stdin lines when omitted)
        names: Vec<String>,

        /// Log each accepted match and show the nearest key for rejects
        #[arg(long)]
        explain: bool,

        /// Print JSON instead of the terminal view
        #[arg(long)]
        json: bool,
    },

    /// Build chart data from a workbook JSON export
    Report {
        /// Workbook file: a row matrix, or an object of sheet name -> row matrix
        file: PathBuf,

        /// Only report this sheet
        #[arg(long)]
        sheet: Option<String>,

        /// Year for the monthly intake chart (default: latest year in the data)
        #[arg(long)]
        year: Option<i32>,

        /// Print JSON chart rows instead of the terminal view
        #[arg(long)]
        json: bool,
    },

    /// List a catalog's entries
    Catalog {
        #[arg(value_enum, default_value = "fields")]
        kind: CatalogKind,

        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum CatalogKind {
    Fields,
    Institutions,
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("rekap=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Tokenize { text } => {
            let normalizer = Normalizer::default();
            let lines = if text.is_empty() {
                inputs(text)?
            } else {
                vec![text.join(" ")]
            };
            for line in lines {
                let terms = normalizer.terms(&line);
                if terms.is_empty() {
                    println!("{}", "(no terms)".dimmed());
                } else {
                    println!("{}", terms.join(" "));
                }
            }
        }

        Commands::Classify { values, json } => {
            let config = Config::load()?;
            let classifier = config.build_classifier()?;
            let normalizer = classifier.engine().normalizer();
            let mut results = Vec::new();

            for value in inputs(values)? {
                let Some(classification) = classifier.classify(&value) else {
                    anyhow::bail!("The field catalog is empty; nothing to classify against.");
                };
                if json {
                    results.push(serde_json::json!({
                        "value": value,
                        "classification": classification,
                    }));
                } else {
                    terminal::display_classification(
                        &value,
                        &normalizer.terms(&value),
                        &classification,
                        classifier.catalog(),
                        &classifier.scores(&value),
                    );
                }
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            }
        }

        Commands::Resolve {
            names,
            explain,
            json,
        } => {
            let config = Config::load()?;
            let resolver = config.build_resolver()?;
            let mut results = Vec::new();

            for name in inputs(names)? {
                let resolution = if explain {
                    resolver.resolve_with(&name, &TracingObserver)
                } else {
                    resolver.resolve(&name)
                };

                if json {
                    results.push(resolution);
                    continue;
                }
                let nearest = if explain && !resolution.is_matched() {
                    resolver.best_candidate(&clean_name(&name))
                } else {
                    None
                };
                terminal::display_resolution(&resolution, nearest.as_ref(), resolver.threshold());
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            }
        }

        Commands::Report {
            file,
            sheet,
            year,
            json,
        } => {
            let config = Config::load()?;
            config.require_field_columns()?;
            let workbook = Workbook::load(&file)?;
            let classifier = config.build_classifier()?;
            let resolver = config.build_resolver()?;
            let period = ReportPeriod {
                year,
                up_to: chrono::Local::now().year(),
            };

            let sheets: Vec<_> = match &sheet {
                Some(name) => vec![workbook
                    .sheet(name)
                    .with_context(|| format!("No sheet named {name:?} in {}", file.display()))?],
                None => workbook.sheets().iter().collect(),
            };
            info!(file = %file.display(), sheets = sheets.len(), "Building report");

            let reports: Vec<_> = sheets
                .into_iter()
                .map(|s| build_sheet_report(s, &config, &classifier, &resolver, period))
                .collect();

            if json {
                println!(
                    "{}",
                    output::json::render(&file.display().to_string(), &reports)?
                );
            } else {
                if reports.is_empty() {
                    println!("No sheets in {}", file.display());
                }
                for report in &reports {
                    terminal::display_report(report);
                }
            }
        }

        Commands::Catalog { kind, json } => {
            let config = Config::load()?;
            let (title, catalog) = match kind {
                CatalogKind::Fields => ("Field categories", config.field_catalog()?),
                CatalogKind::Institutions => ("Institutions", config.institution_catalog()?),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&catalog)?);
            } else {
                terminal::display_catalog(title, &catalog);
            }
        }
    }

    Ok(())
}

/// Command-line values, or non-blank stdin lines when none were given.
fn inputs(args: Vec<String>) -> Result<Vec<String>> {
    if !args.is_empty() {
        return Ok(args);
    }
    let mut lines = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read stdin")?;
        if !line.trim().is_empty() {
            lines.push(line);
        }
    }
    Ok(lines)
}
