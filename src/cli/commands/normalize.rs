//! `maintwatch normalize` command - one canonical CSV from all data vintages

use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use crate::cli::commands::utils::{load_config, InputArgs};
use crate::cli::GlobalOpts;
use crate::core::loader;
use crate::schema::Normalizer;

#[derive(clap::Args, Debug)]
pub struct NormalizeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output file (default: stdout)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(args: NormalizeArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global)?;
    let loaded = args.input.load(&config)?;

    let batch = Normalizer::new()
        .with_references(&loaded.references)
        .with_date_formats(config.date_formats())
        .normalize_all(&loaded.tables)?;

    let filter = args.input.filter();
    let events: Vec<_> = batch
        .events
        .iter()
        .filter(|e| filter.matches(e))
        .cloned()
        .collect();

    match &args.output {
        Some(path) => {
            let file = File::create(path).into_diagnostic()?;
            loader::write_events(&events, BufWriter::new(file))?;
        }
        None => loader::write_events(&events, io::stdout().lock())?,
    }

    // Status goes to stderr so stdout stays a clean CSV
    if !global.quiet {
        eprintln!(
            "{} Wrote {} canonical row(s) from {} table(s){}",
            style("✓").green(),
            events.len(),
            loaded.tables.len(),
            args.output
                .as_ref()
                .map(|p| format!(" to {}", p.display()))
                .unwrap_or_default()
        );
        if !batch.issues.is_empty() {
            eprintln!(
                "{} {} row(s) skipped with validation issues",
                style("!").yellow(),
                batch.rejected_rows()
            );
        }
        if !loaded.references.is_empty() && batch.unmapped_components > 0 {
            eprintln!(
                "{} {} row(s) could not be mapped to the component master",
                style("!").yellow(),
                batch.unmapped_components
            );
        }
    }
    Ok(())
}
