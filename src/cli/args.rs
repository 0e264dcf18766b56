//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    completions::CompletionsArgs, forecast::ForecastArgs, mtbf::MtbfCommands,
    normalize::NormalizeArgs, report::ReportArgs, summary::SummaryArgs, template::TemplateArgs,
    validate::ValidateArgs,
};

#[derive(Parser)]
#[command(name = "maintwatch")]
#[command(author, version, about = "Component removal reliability (MTBF) toolkit")]
#[command(long_about = "Computes mean time between failures per component and per ATA chapter from aircraft component removal logs, and forecasts expected failures over a fleet-hours horizon.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (debug logging)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Config file (default: ./maintwatch.yaml)
    #[arg(long, global = true, env = "MAINTWATCH_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// MTBF tables by component or ATA chapter
    #[command(subcommand)]
    Mtbf(MtbfCommands),

    /// Expected failures over a fleet-hours horizon
    Forecast(ForecastArgs),

    /// Check removal files against the canonical schema
    Validate(ValidateArgs),

    /// Write removal files as one canonical CSV
    Normalize(NormalizeArgs),

    /// Dashboard figures for a removal log
    Summary(SummaryArgs),

    /// Markdown reliability report
    Report(ReportArgs),

    /// Print a CSV template for removal events or the component master
    Template(TemplateArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned table on terminals
    #[default]
    Auto,
    /// Tab-aligned text (for reading and grepping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_mtbf_with_filters() {
        let cli = Cli::try_parse_from([
            "maintwatch",
            "-f",
            "csv",
            "mtbf",
            "ata",
            "a.csv",
            "b.csv",
            "--aircraft",
            "9N-AHA",
            "--aircraft",
            "9N-AHB",
            "--top",
            "5",
        ])
        .unwrap();
        assert_eq!(cli.global.format, OutputFormat::Csv);
        match cli.command {
            Commands::Mtbf(MtbfCommands::Ata(args)) => {
                assert_eq!(args.input.events.len(), 2);
                assert_eq!(args.input.aircraft, vec!["9N-AHA", "9N-AHB"]);
                assert_eq!(args.top, Some(5));
            }
            _ => panic!("expected mtbf ata"),
        }
    }

    #[test]
    fn test_events_are_required() {
        assert!(Cli::try_parse_from(["maintwatch", "forecast"]).is_err());
    }

    #[test]
    fn test_negative_horizon_parses_for_forecast_and_report() {
        for command in ["forecast", "report"] {
            let cli = Cli::try_parse_from(["maintwatch", command, "a.csv", "-H", "-5"]).unwrap();
            let horizon = match cli.command {
                Commands::Forecast(args) => args.horizon,
                Commands::Report(args) => args.horizon,
                _ => panic!("expected {}", command),
            };
            assert_eq!(horizon, Some(-5.0));
        }
    }
}
