//! `maintwatch mtbf` command - reliability tables

use clap::Subcommand;
use miette::Result;
use serde::Serialize;

use crate::cli::commands::utils::{
    load_config, notice_empty, output_format, print_json, report_skipped_rows, run_pipeline,
    InputArgs,
};
use crate::cli::table::{CellValue, ColumnDef, TableConfig, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::reliability::{round_to, DeltaDiagnostics};
use crate::core::{Grouping, InsufficientData, PipelineParams, ReliabilityTable, SortOrder};

#[derive(Subcommand, Debug)]
pub enum MtbfCommands {
    /// MTBF per component (code, or name when no code is known)
    #[command(alias = "cmp")]
    Component(MtbfArgs),

    /// MTBF per ATA chapter
    Ata(MtbfArgs),
}

#[derive(clap::Args, Debug)]
pub struct MtbfArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Show only the first N rows
    #[arg(long, short = 'n')]
    pub top: Option<usize>,

    /// Most reliable first (default: least reliable first)
    #[arg(long)]
    pub best_first: bool,
}

const COMPONENT_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("key", "COMPONENT", 16),
    ColumnDef::new("name", "NAME", 28),
    ColumnDef::new("mtbf_fh", "MTBF (FH)", 12),
    ColumnDef::new("mtbf_fc", "MTBF (FC)", 12),
    ColumnDef::new("intervals", "INTERVALS", 9),
];

const ATA_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("key", "ATA", 10),
    ColumnDef::new("mtbf_fh", "MTBF (FH)", 12),
    ColumnDef::new("mtbf_fc", "MTBF (FC)", 12),
    ColumnDef::new("intervals", "INTERVALS", 9),
];

/// JSON view of a reliability record, rounded for presentation
#[derive(Serialize)]
struct RecordView<'a> {
    key: String,
    name: &'a str,
    mtbf_fh: f64,
    mtbf_fc: Option<f64>,
    failure_count: usize,
}

#[derive(Serialize)]
struct TableView<'a> {
    grouping: Grouping,
    records: Vec<RecordView<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    insufficient_data: Option<InsufficientData>,
    diagnostics: DeltaDiagnostics,
}

pub fn run(cmd: MtbfCommands, global: &GlobalOpts) -> Result<()> {
    let (grouping, args) = match cmd {
        MtbfCommands::Component(args) => (Grouping::Component, args),
        MtbfCommands::Ata(args) => (Grouping::Ata, args),
    };

    let config = load_config(global)?;
    let order = if args.best_first {
        SortOrder::BestFirst
    } else {
        config.order()
    };
    let params = PipelineParams {
        fleet_hours_horizon: config.horizon(),
        forecast_basis: grouping,
        top_n: args.top.or(config.top),
        order,
        filter: args.input.filter(),
    };

    let output = run_pipeline(&args.input, &config, &params)?;
    report_skipped_rows(&output, global);

    let format = output_format(global, &config);
    print_table(output.table(grouping), order, format, global)
}

/// Render one reliability table in the requested format
pub fn print_table(
    table: &ReliabilityTable,
    order: SortOrder,
    format: OutputFormat,
    global: &GlobalOpts,
) -> Result<()> {
    if format == OutputFormat::Json {
        let view = TableView {
            grouping: table.grouping,
            records: table
                .records
                .iter()
                .map(|r| RecordView {
                    key: r.key.to_string(),
                    name: &r.label,
                    mtbf_fh: round_to(r.mtbf_fh, 1),
                    mtbf_fc: r.mtbf_fc.map(|fc| round_to(fc, 1)),
                    failure_count: r.failure_count,
                })
                .collect(),
            insufficient_data: table.insufficient_data(),
            diagnostics: table.diagnostics,
        };
        return print_json(&view);
    }

    let columns = match table.grouping {
        Grouping::Component => COMPONENT_COLUMNS,
        Grouping::Ata => ATA_COLUMNS,
    };

    if let Some(reason) = table.insufficient_data() {
        notice_empty(&reason.to_string(), columns, format, global);
        return Ok(());
    }
    let rows = table_rows(table);
    let (noun, direction) = match (table.grouping, order) {
        (Grouping::Component, SortOrder::WorstFirst) => ("component", "least reliable first"),
        (Grouping::Component, SortOrder::BestFirst) => ("component", "most reliable first"),
        (Grouping::Ata, SortOrder::WorstFirst) => ("ATA chapter", "least reliable first"),
        (Grouping::Ata, SortOrder::BestFirst) => ("ATA chapter", "most reliable first"),
    };

    let config = if global.quiet {
        TableConfig::for_pipe()
    } else {
        TableConfig::default()
    };
    let mut suffix = format!(", {}", direction);
    if table.diagnostics.dropped_non_increasing > 0 {
        suffix.push_str(&format!(
            " ({} non-increasing FH interval(s) ignored)",
            table.diagnostics.dropped_non_increasing
        ));
    }
    TableFormatter::new(columns, noun)
        .with_summary_suffix(suffix)
        .with_config(config)
        .output(&rows, format);
    Ok(())
}

fn table_rows(table: &ReliabilityTable) -> Vec<TableRow> {
    table
        .records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            TableRow::new(i + 1)
                .cell("key", CellValue::Key(r.key.to_string()))
                .cell("name", CellValue::Text(r.label.clone()))
                .cell("mtbf_fh", CellValue::Hours(r.mtbf_fh))
                .cell("mtbf_fc", CellValue::Cycles(r.mtbf_fc))
                .cell("intervals", CellValue::Number(r.failure_count as i64))
        })
        .collect()
}
