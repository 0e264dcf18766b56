//! `maintwatch summary` command - dashboard figures

use console::style;
use miette::Result;

use crate::cli::commands::utils::{
    load_config, output_format, print_json, run_pipeline, InputArgs,
};
use crate::cli::helpers::format_hours;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{PipelineParams, Summary};

#[derive(clap::Args, Debug)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

pub fn run(args: SummaryArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global)?;
    let params = PipelineParams {
        fleet_hours_horizon: config.horizon(),
        filter: args.input.filter(),
        ..Default::default()
    };
    let output = run_pipeline(&args.input, &config, &params)?;
    let summary = output.summary();

    match output_format(global, &config) {
        OutputFormat::Json => print_json(&serde_json::json!({
            "summary": summary,
            "worst_component": output.by_component.records.first().map(|r| &r.label),
            "worst_ata": output.by_ata.records.first().map(|r| r.key.to_string()),
        })),
        OutputFormat::Csv => {
            println!("metric,value");
            for (key, _, value) in metrics(&summary) {
                println!("{},{}", key, value);
            }
            Ok(())
        }
        OutputFormat::Md => {
            println!("| Metric | Value |");
            println!("|---|---|");
            for (_, label, value) in metrics(&summary) {
                println!("| {} | {} |", label, value);
            }
            Ok(())
        }
        OutputFormat::Auto | OutputFormat::Tsv => {
            println!("{}", style("Removal Log Summary").bold().underlined());
            println!();
            for (_, label, value) in metrics(&summary) {
                println!("  {:<28} {}", label, style(value).cyan());
            }

            if let Some(worst) = output.by_component.records.first() {
                println!();
                println!(
                    "  {:<28} {} ({} FH)",
                    "Least reliable component",
                    style(&worst.label).yellow(),
                    format_hours(worst.mtbf_fh)
                );
            }
            if let Some(worst) = output.by_ata.records.first() {
                println!(
                    "  {:<28} ATA {} ({} FH)",
                    "Least reliable chapter",
                    style(&worst.key).yellow(),
                    format_hours(worst.mtbf_fh)
                );
            }
            Ok(())
        }
    }
}

/// (machine key, display label, value) for every headline figure
fn metrics(s: &Summary) -> Vec<(&'static str, &'static str, usize)> {
    vec![
        ("rows_read", "Rows read", s.rows_read),
        ("total_records", "Total records", s.total_records),
        ("rejected_rows", "Rejected rows", s.rejected_rows),
        ("unscheduled_failures", "Unscheduled failures", s.unscheduled_failures),
        ("distinct_components", "Distinct components", s.distinct_components),
        ("distinct_aircraft", "Distinct aircraft", s.distinct_aircraft),
        ("repeat_failure_units", "Units with repeat failures", s.repeat_failure_units),
        ("dropped_non_increasing", "Non-increasing FH intervals", s.dropped_non_increasing),
        ("unmapped_components", "Rows without component code", s.unmapped_components),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_cover_every_figure() {
        let summary = Summary {
            rows_read: 9,
            total_records: 8,
            rejected_rows: 1,
            unscheduled_failures: 5,
            distinct_components: 3,
            distinct_aircraft: 2,
            repeat_failure_units: 2,
            dropped_non_increasing: 1,
            unmapped_components: 4,
        };
        let values: Vec<usize> = metrics(&summary).into_iter().map(|(_, _, v)| v).collect();
        assert_eq!(values, vec![9, 8, 1, 5, 3, 2, 2, 1, 4]);
    }
}
