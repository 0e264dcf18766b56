//! `maintwatch template` command - CSV templates for data entry

use console::style;
use miette::Result;

use crate::schema::canonical_headers;

#[derive(clap::Args, Debug)]
pub struct TemplateArgs {
    /// Print the component master template instead of the removal event one
    #[arg(long)]
    pub reference: bool,
}

/// Example removal row, in canonical column order
const EVENT_EXAMPLE: &[&str] = &[
    "9N-AHA",
    "BRK-01",
    "Brake Unit",
    "2-1577-3",
    "SN-100",
    "32",
    "Landing Gear",
    "high",
    "2024-01-10",
    "1000.0",
    "800",
    "",
    "Unscheduled Failure",
    "KTM",
    "Worn beyond limits",
];

const REFERENCE_HEADERS: &[&str] = &[
    "component_code",
    "component_name",
    "ata_chapter",
    "category",
    "criticality",
];

const REFERENCE_EXAMPLE: &[&str] = &["BRK-01", "Brake Unit", "32", "Landing Gear", "high"];

pub fn run(args: TemplateArgs) -> Result<()> {
    let (headers, example) = if args.reference {
        (REFERENCE_HEADERS.to_vec(), REFERENCE_EXAMPLE)
    } else {
        (canonical_headers(), EVENT_EXAMPLE)
    };

    // Output to stdout (can be redirected to file)
    println!("{}", headers.join(","));
    println!("{}", example.join(","));

    // Usage hint on stderr so it doesn't interfere with redirected output
    eprintln!();
    eprintln!(
        "{} Template generated. Redirect to file: maintwatch template{} > {}.csv",
        style("→").blue(),
        if args.reference { " --reference" } else { "" },
        if args.reference { "components" } else { "removals" }
    );
    Ok(())
}
