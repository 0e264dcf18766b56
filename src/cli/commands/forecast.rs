//! `maintwatch forecast` command - expected failures over a horizon

use console::style;
use miette::Result;
use serde::Serialize;

use crate::cli::commands::utils::{
    load_config, notice_empty, output_format, print_json, report_skipped_rows, run_pipeline,
    InputArgs,
};
use crate::cli::helpers::{format_expected, format_hours};
use crate::cli::table::{CellValue, ColumnDef, TableConfig, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::forecast::total_expected;
use crate::core::reliability::round_to;
use crate::core::{ForecastRecord, Grouping, PipelineParams};

#[derive(clap::Args, Debug)]
pub struct ForecastArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Fleet flight hours to project over (default: config or 1000)
    #[arg(long = "horizon", short = 'H', allow_negative_numbers = true)]
    pub horizon: Option<f64>,

    /// Forecast per component or per ATA chapter
    #[arg(long, default_value = "component")]
    pub by: Grouping,

    /// Show only the first N rows
    #[arg(long, short = 'n')]
    pub top: Option<usize>,
}

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("key", "KEY", 16),
    ColumnDef::new("name", "NAME", 28),
    ColumnDef::new("mtbf_fh", "MTBF (FH)", 12),
    ColumnDef::new("expected", "EXPECTED", 10),
];

#[derive(Serialize)]
struct ForecastView<'a> {
    horizon_fh: f64,
    basis: Grouping,
    total_expected: f64,
    records: Vec<RecordView<'a>>,
}

#[derive(Serialize)]
struct RecordView<'a> {
    key: String,
    name: &'a str,
    mtbf_fh: f64,
    expected_failures: f64,
}

pub fn run(args: ForecastArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global)?;
    let horizon = args.horizon.unwrap_or_else(|| config.horizon());

    let params = PipelineParams {
        fleet_hours_horizon: horizon,
        forecast_basis: args.by,
        top_n: args.top.or(config.top),
        order: config.order(),
        filter: args.input.filter(),
    };
    let output = run_pipeline(&args.input, &config, &params)?;
    report_skipped_rows(&output, global);

    let format = output_format(global, &config);
    if format == OutputFormat::Json {
        return print_json(&ForecastView {
            horizon_fh: horizon,
            basis: args.by,
            total_expected: total_expected(&output.forecast),
            records: output.forecast.iter().map(record_view).collect(),
        });
    }

    if !horizon.is_finite() || horizon <= 0.0 {
        if !global.quiet {
            eprintln!(
                "{} Horizon must be greater than zero (got {})",
                style("!").yellow(),
                horizon
            );
        }
        return Ok(());
    }
    if output.forecast.is_empty() {
        let reason = output
            .table(args.by)
            .insufficient_data()
            .map(|r| r.to_string())
            .unwrap_or_else(|| "Nothing to forecast".to_string());
        notice_empty(&reason, COLUMNS, format, global);
        return Ok(());
    }

    let rows: Vec<TableRow> = output
        .forecast
        .iter()
        .enumerate()
        .map(|(i, f)| {
            TableRow::new(i + 1)
                .cell("key", CellValue::Key(f.key.to_string()))
                .cell("name", CellValue::Text(f.label.clone()))
                .cell("mtbf_fh", CellValue::Hours(f.mtbf_fh))
                .cell("expected", CellValue::Expected(f.expected_failures))
        })
        .collect();

    let noun = match args.by {
        Grouping::Component => "component",
        Grouping::Ata => "ATA chapter",
    };
    let config = if global.quiet {
        TableConfig::for_pipe()
    } else {
        TableConfig::default()
    };
    TableFormatter::new(COLUMNS, noun)
        .with_summary_suffix(format!(
            ", {} failure(s) expected over {} FH",
            format_expected(total_expected(&output.forecast)),
            format_hours(horizon)
        ))
        .with_config(config)
        .output(&rows, format);
    Ok(())
}

fn record_view(f: &ForecastRecord) -> RecordView<'_> {
    RecordView {
        key: f.key.to_string(),
        name: &f.label,
        mtbf_fh: round_to(f.mtbf_fh, 1),
        expected_failures: f.expected_failures,
    }
}
