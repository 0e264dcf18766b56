//! `maintwatch report` command - Markdown reliability report

use chrono::Local;
use miette::Result;
use std::path::PathBuf;
use tabled::{builder::Builder, settings::Style};

use crate::cli::commands::utils::{load_config, run_pipeline, InputArgs};
use crate::cli::helpers::{format_expected, format_hours, truncate_str, write_output};
use crate::cli::GlobalOpts;
use crate::core::forecast::total_expected;
use crate::core::{Grouping, PipelineOutput, PipelineParams, ReliabilityTable};

#[derive(clap::Args, Debug)]
pub struct ReportArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output to file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Forecast horizon in fleet flight hours (default: config or 1000)
    #[arg(long = "horizon", short = 'H', allow_negative_numbers = true)]
    pub horizon: Option<f64>,

    /// Rows per table (default: all)
    #[arg(long, short = 'n')]
    pub top: Option<usize>,

    /// Base the forecast on ATA chapters instead of components
    #[arg(long, default_value = "component")]
    pub by: Grouping,
}

/// Validation issues listed in full before the report only counts them
const MAX_LISTED_ISSUES: usize = 20;

pub fn run(args: ReportArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global)?;
    let params = PipelineParams {
        fleet_hours_horizon: args.horizon.unwrap_or_else(|| config.horizon()),
        forecast_basis: args.by,
        top_n: args.top.or(config.top),
        order: config.order(),
        filter: args.input.filter(),
    };
    let output = run_pipeline(&args.input, &config, &params)?;

    let content = render(&output, &Local::now().format("%Y-%m-%d").to_string());
    write_output(&content, args.output.as_deref())
}

/// Render the full Markdown report
pub fn render(output: &PipelineOutput, generated: &str) -> String {
    let summary = output.summary();
    let mut out = String::new();

    out.push_str("# Component Reliability Report\n\n");
    out.push_str(&format!("_Generated {}_\n\n", generated));

    out.push_str("## Summary\n\n");
    out.push_str(&format!("- **Total Records:** {}\n", summary.total_records));
    out.push_str(&format!(
        "- **Unscheduled Failures:** {}\n",
        summary.unscheduled_failures
    ));
    out.push_str(&format!(
        "- **Distinct Components:** {}\n",
        summary.distinct_components
    ));
    out.push_str(&format!("- **Aircraft:** {}\n", summary.distinct_aircraft));
    out.push_str(&format!(
        "- **Units With Repeat Failures:** {}\n",
        summary.repeat_failure_units
    ));

    out.push_str("\n## MTBF by Component\n\n");
    out.push_str(&mtbf_section(&output.by_component, true));

    out.push_str("\n## MTBF by ATA Chapter\n\n");
    out.push_str(&mtbf_section(&output.by_ata, false));

    out.push_str(&format!(
        "\n## Forecast ({} FH)\n\n",
        format_hours(output.horizon_fh)
    ));
    if output.forecast.is_empty() {
        out.push_str("No forecast available.\n");
    } else {
        let mut builder = Builder::default();
        builder.push_record(["Key", "Name", "MTBF (FH)", "Expected Failures"]);
        for f in &output.forecast {
            builder.push_record([
                f.key.to_string(),
                truncate_str(&f.label, 30),
                format_hours(f.mtbf_fh),
                format_expected(f.expected_failures),
            ]);
        }
        out.push_str(&builder.build().with(Style::markdown()).to_string());
        out.push_str(&format!(
            "\n\n**Total expected failures:** {}\n",
            format_expected(total_expected(&output.forecast))
        ));
    }

    out.push_str("\n## Data Quality\n\n");
    out.push_str(&format!("- **Rows Read:** {}\n", summary.rows_read));
    out.push_str(&format!(
        "- **Rows Rejected:** {} ({} issue(s))\n",
        summary.rejected_rows,
        output.issues.len()
    ));
    out.push_str(&format!(
        "- **Non-increasing FH Intervals Ignored:** {}\n",
        summary.dropped_non_increasing
    ));
    out.push_str(&format!(
        "- **Rows Without Component Code:** {}\n",
        summary.unmapped_components
    ));
    if output.filtered_out > 0 {
        out.push_str(&format!(
            "- **Rows Outside Filter:** {}\n",
            output.filtered_out
        ));
    }
    if !output.issues.is_empty() {
        out.push('\n');
        for issue in output.issues.iter().take(MAX_LISTED_ISSUES) {
            out.push_str(&format!("- `{}`\n", issue));
        }
        if output.issues.len() > MAX_LISTED_ISSUES {
            out.push_str(&format!(
                "- ... and {} more\n",
                output.issues.len() - MAX_LISTED_ISSUES
            ));
        }
    }

    out
}

fn mtbf_section(table: &ReliabilityTable, with_name: bool) -> String {
    if let Some(reason) = table.insufficient_data() {
        return format!("{}.\n", reason);
    }

    let mut builder = Builder::default();
    if with_name {
        builder.push_record(["Component", "Name", "MTBF (FH)", "MTBF (FC)", "Intervals"]);
    } else {
        builder.push_record(["ATA", "MTBF (FH)", "MTBF (FC)", "Intervals"]);
    }

    for r in &table.records {
        let fc = r.mtbf_fc.map_or("-".to_string(), format_hours);
        let mut row = vec![r.key.to_string()];
        if with_name {
            row.push(truncate_str(&r.label, 30));
        }
        row.extend([format_hours(r.mtbf_fh), fc, r.failure_count.to_string()]);
        builder.push_record(row);
    }

    let mut section = builder.build().with(Style::markdown()).to_string();
    section.push('\n');
    section
}
