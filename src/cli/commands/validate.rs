//! `maintwatch validate` command - check removal files against the canonical schema

use console::style;
use miette::Result;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::commands::utils::{load_config, output_format, print_json};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::loader;
use crate::schema::{Normalizer, ValidationIssue};

#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// Removal event CSV files, or directories of yearly CSV exports
    #[arg(required = true, value_name = "EVENTS")]
    pub events: Vec<PathBuf>,

    /// Component master CSV used to fill in missing component codes
    #[arg(long, short = 'r', value_name = "CSV")]
    pub reference: Option<PathBuf>,

    /// Strict mode - row issues and unmapped components fail the run
    #[arg(long)]
    pub strict: bool,

    /// Show summary only, don't show individual issues
    #[arg(long)]
    pub summary: bool,
}

/// Outcome for one input table
#[derive(Debug, Serialize)]
struct TableReport {
    source: String,
    rows: usize,
    valid: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    schema_error: Option<String>,
    unmapped_components: usize,
    issues: Vec<ValidationIssue>,
}

/// Validation statistics
#[derive(Debug, Default, Serialize)]
struct ValidationStats {
    tables_checked: usize,
    tables_failed: usize,
    rows_checked: usize,
    rows_rejected: usize,
    total_issues: usize,
    unmapped_components: usize,
}

pub fn run(args: ValidateArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global)?;
    let format = output_format(global, &config);

    let tables = loader::load_tables(&args.events)?;
    let references = match args.reference.as_ref().or(config.reference.as_ref()) {
        Some(path) => loader::load_references(path)?,
        None => Vec::new(),
    };
    let normalizer = Normalizer::new()
        .with_references(&references)
        .with_date_formats(config.date_formats());

    let mut stats = ValidationStats::default();
    let mut reports = Vec::new();

    for table in &tables {
        stats.tables_checked += 1;
        stats.rows_checked += table.len();

        let report = match normalizer.normalize(table) {
            Ok(batch) => {
                stats.rows_rejected += batch.rejected_rows();
                stats.total_issues += batch.issues.len();
                stats.unmapped_components += batch.unmapped_components;
                TableReport {
                    source: table.source.clone(),
                    rows: batch.rows_read,
                    valid: batch.events.len(),
                    schema_error: None,
                    unmapped_components: batch.unmapped_components,
                    issues: batch.issues,
                }
            }
            Err(e) => {
                stats.tables_failed += 1;
                stats.rows_rejected += table.len();
                TableReport {
                    source: table.source.clone(),
                    rows: table.len(),
                    valid: 0,
                    schema_error: Some(e.to_string()),
                    unmapped_components: 0,
                    issues: Vec::new(),
                }
            }
        };
        reports.push(report);
    }

    if format == OutputFormat::Json {
        print_json(&serde_json::json!({
            "tables": reports,
            "stats": stats,
        }))?;
    } else {
        print_reports(&reports, &stats, &args, global);
    }

    let strict_failure = args.strict
        && (stats.total_issues > 0 || (!references.is_empty() && stats.unmapped_components > 0));
    if stats.tables_failed > 0 {
        return Err(miette::miette!(
            "{} table(s) failed schema validation",
            stats.tables_failed
        ));
    }
    if strict_failure {
        return Err(miette::miette!(
            "Validation failed in strict mode: {} issue(s), {} unmapped component row(s)",
            stats.total_issues,
            stats.unmapped_components
        ));
    }
    Ok(())
}

fn print_reports(
    reports: &[TableReport],
    stats: &ValidationStats,
    args: &ValidateArgs,
    global: &GlobalOpts,
) {
    if !global.quiet {
        println!(
            "{} Validating {} table(s)...\n",
            style("→").blue(),
            reports.len()
        );
    }

    for report in reports {
        if let Some(ref err) = report.schema_error {
            println!("{} {}", style("✗").red(), err);
            continue;
        }

        if report.issues.is_empty() {
            if !global.quiet {
                println!(
                    "{} {} - {} row(s)",
                    style("✓").green(),
                    report.source,
                    report.rows
                );
            }
        } else {
            println!(
                "{} {} - {} of {} row(s) valid, {} issue(s)",
                style("!").yellow(),
                report.source,
                report.valid,
                report.rows,
                report.issues.len()
            );
            if !args.summary {
                for issue in &report.issues {
                    println!("    {}", issue);
                }
            }
        }
        if report.unmapped_components > 0 && !global.quiet {
            println!(
                "    {} {} row(s) without a component code",
                style("·").dim(),
                report.unmapped_components
            );
        }
    }

    if global.quiet {
        return;
    }
    println!();
    println!("{}", style("─".repeat(50)).dim());
    println!(
        "Tables: {} checked, {} failed schema",
        style(stats.tables_checked).cyan(),
        stats.tables_failed
    );
    println!(
        "Rows:   {} checked, {} rejected, {} issue(s)",
        style(stats.rows_checked).cyan(),
        stats.rows_rejected,
        stats.total_issues
    );

    if stats.tables_failed == 0 && stats.total_issues == 0 {
        println!("\n{} All rows valid", style("✓").green().bold());
    }
}
