//! Shared utilities for CLI commands

use clap::ValueEnum;
use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

use crate::cli::table::{ColumnDef, TableConfig, TableFormatter};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{loader, Config, EventFilter, Pipeline, PipelineOutput, PipelineParams};
use crate::entities::ComponentReference;
use crate::schema::RawTable;

/// Removal event inputs shared by the analysis commands
#[derive(clap::Args, Debug, Clone)]
pub struct InputArgs {
    /// Removal event CSV files, or directories of yearly CSV exports
    #[arg(required = true, value_name = "EVENTS")]
    pub events: Vec<PathBuf>,

    /// Component master CSV used to fill in missing component codes
    #[arg(long, short = 'r', value_name = "CSV")]
    pub reference: Option<PathBuf>,

    /// Only include these aircraft registrations (repeatable)
    #[arg(long, value_name = "REG")]
    pub aircraft: Vec<String>,

    /// Only include these ATA chapters, sub-chapters included (repeatable)
    #[arg(long, value_name = "CHAPTER")]
    pub ata: Vec<String>,
}

/// Raw tables and component master read from disk
pub struct LoadedInput {
    pub tables: Vec<RawTable>,
    pub references: Vec<ComponentReference>,
}

impl InputArgs {
    pub fn filter(&self) -> EventFilter {
        EventFilter {
            aircraft: self.aircraft.clone(),
            ata: self.ata.clone(),
        }
    }

    /// Read event tables and the component master (flag wins over config)
    pub fn load(&self, config: &Config) -> Result<LoadedInput> {
        let tables = loader::load_tables(&self.events)?;

        let references = match self.reference.as_ref().or(config.reference.as_ref()) {
            Some(path) => loader::load_references(path)?,
            None => Vec::new(),
        };

        debug!(
            tables = tables.len(),
            references = references.len(),
            "loaded inputs"
        );
        Ok(LoadedInput { tables, references })
    }
}

/// Load layered configuration honouring `--config`
pub fn load_config(global: &GlobalOpts) -> Result<Config> {
    Config::load(global.config.as_deref()).into_diagnostic()
}

/// Resolve `auto` against the configured default format
pub fn output_format(global: &GlobalOpts, config: &Config) -> OutputFormat {
    if global.format != OutputFormat::Auto {
        return global.format;
    }
    config
        .default_format
        .as_deref()
        .and_then(|f| OutputFormat::from_str(f, true).ok())
        .unwrap_or(OutputFormat::Auto)
}

/// Load inputs and run the reliability pipeline
pub fn run_pipeline(
    input: &InputArgs,
    config: &Config,
    params: &PipelineParams,
) -> Result<PipelineOutput> {
    let loaded = input.load(config)?;
    let output = Pipeline::new()
        .with_date_formats(config.date_formats())
        .run(&loaded.tables, &loaded.references, params)?;
    Ok(output)
}

/// Tell the user (on stderr) that some rows did not take part
pub fn report_skipped_rows(output: &PipelineOutput, global: &GlobalOpts) {
    if global.quiet || output.issues.is_empty() {
        return;
    }
    let summary = output.summary();
    eprintln!(
        "{} {} of {} row(s) skipped with validation issues. Run {} for details.",
        style("!").yellow(),
        summary.rejected_rows,
        output.rows_read,
        style("maintwatch validate").cyan()
    );
}

/// Explain an empty result. For CSV and Markdown a header-only table goes
/// to stdout and the notice to stderr, so the output stays parseable.
pub fn notice_empty(
    reason: &str,
    columns: &[ColumnDef],
    format: OutputFormat,
    global: &GlobalOpts,
) {
    let notice = format!("{} {}", style("!").yellow(), reason);
    match format {
        OutputFormat::Csv | OutputFormat::Md => {
            TableFormatter::new(columns, "row")
                .with_config(TableConfig::for_pipe())
                .output(&[], format);
            if !global.quiet {
                eprintln!("{}", notice);
            }
        }
        _ => {
            if !global.quiet {
                println!("{}", notice);
            }
        }
    }
}

/// Pretty-print a serializable value as JSON
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).into_diagnostic()?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global(format: OutputFormat) -> GlobalOpts {
        GlobalOpts {
            format,
            quiet: false,
            verbose: false,
            config: None,
        }
    }

    #[test]
    fn test_output_format_prefers_flag() {
        let config = Config {
            default_format: Some("md".to_string()),
            ..Default::default()
        };
        assert_eq!(output_format(&global(OutputFormat::Csv), &config), OutputFormat::Csv);
        assert_eq!(output_format(&global(OutputFormat::Auto), &config), OutputFormat::Md);
    }

    #[test]
    fn test_output_format_ignores_unknown_config_value() {
        let config = Config {
            default_format: Some("yaml".to_string()),
            ..Default::default()
        };
        assert_eq!(output_format(&global(OutputFormat::Auto), &config), OutputFormat::Auto);
    }

    #[test]
    fn test_filter_from_args() {
        let input = InputArgs {
            events: vec![PathBuf::from("a.csv")],
            reference: None,
            aircraft: vec!["9N-AHA".to_string()],
            ata: vec![],
        };
        let filter = input.filter();
        assert_eq!(filter.aircraft, vec!["9N-AHA"]);
        assert!(filter.ata.is_empty());
    }
}
