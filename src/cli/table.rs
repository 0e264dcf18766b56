//! Table formatting for reliability listings
//!
//! Rows are built from typed cells so each output format can render the same
//! value its own way: aligned and coloured for terminals, RFC 4180 for CSV,
//! escaped pipes for Markdown.

use console::style;

use crate::cli::helpers::{escape_csv, format_expected, format_hours, truncate_str};
use crate::cli::OutputFormat;

/// Configuration for table output
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Show summary line after table (e.g., "5 component(s) ranked")
    pub show_summary: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self { show_summary: true }
    }
}

impl TableConfig {
    /// Config for piping (no summary)
    pub fn for_pipe() -> Self {
        Self {
            show_summary: false,
        }
    }
}

/// A typed cell value with semantic meaning for formatting
#[derive(Debug, Clone)]
pub enum CellValue {
    /// Group key (component code/name or ATA chapter, cyan)
    Key(String),
    /// Plain text, truncated to the column width
    Text(String),
    /// Flight hours, 1 decimal
    Hours(f64),
    /// Optional flight cycles average, 1 decimal ("-" if absent)
    Cycles(Option<f64>),
    /// Expected failures, 2 decimals, coloured by magnitude
    Expected(f64),
    Number(i64),
    Empty,
}

impl CellValue {
    /// Format for TSV output (with colors if terminal)
    pub fn format_tsv(&self, width: usize) -> String {
        match self {
            CellValue::Key(key) => {
                format!(
                    "{:<width$}",
                    style(truncate_str(key, width)).cyan(),
                    width = width
                )
            }
            CellValue::Text(s) => {
                format!("{:<width$}", truncate_str(s, width), width = width)
            }
            CellValue::Hours(fh) => format!("{:>width$}", format_hours(*fh), width = width),
            CellValue::Cycles(Some(fc)) => format!("{:>width$}", format_hours(*fc), width = width),
            CellValue::Cycles(None) => format!("{:>width$}", style("-").dim(), width = width),
            CellValue::Expected(n) => {
                let s = format_expected(*n);
                let styled = if *n >= 2.0 {
                    style(s).red().bold()
                } else if *n >= 1.0 {
                    style(s).yellow()
                } else {
                    style(s).green()
                };
                format!("{:>width$}", styled, width = width)
            }
            CellValue::Number(n) => format!("{:>width$}", n, width = width),
            CellValue::Empty => format!("{:<width$}", "-", width = width),
        }
    }

    /// Format for CSV output (RFC 4180, no colors)
    pub fn format_csv(&self) -> String {
        match self {
            CellValue::Key(s) | CellValue::Text(s) => escape_csv(s),
            CellValue::Cycles(None) | CellValue::Empty => String::new(),
            _ => self.raw(),
        }
    }

    /// Format for Markdown output (no colors, escaped pipes)
    pub fn format_md(&self) -> String {
        let raw = match self {
            CellValue::Cycles(None) | CellValue::Empty => "-".to_string(),
            _ => self.raw(),
        };
        raw.replace('|', "\\|")
    }

    /// Raw string value (no padding, no colour)
    pub fn raw(&self) -> String {
        match self {
            CellValue::Key(s) | CellValue::Text(s) => s.clone(),
            CellValue::Hours(fh) => format_hours(*fh),
            CellValue::Cycles(fc) => fc.map(format_hours).unwrap_or_default(),
            CellValue::Expected(n) => format_expected(*n),
            CellValue::Number(n) => n.to_string(),
            CellValue::Empty => String::new(),
        }
    }

    /// Display width of this cell's content (for dynamic column sizing)
    pub fn display_width(&self) -> usize {
        match self {
            CellValue::Cycles(None) | CellValue::Empty => 1,
            _ => self.raw().chars().count(),
        }
    }
}

/// Column definition with header label and maximum width
#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub key: &'static str,
    pub header: &'static str,
    pub width: usize,
}

impl ColumnDef {
    pub const fn new(key: &'static str, header: &'static str, width: usize) -> Self {
        Self { key, header, width }
    }
}

/// A ranked row of cell values
pub struct TableRow {
    pub rank: usize,
    pub cells: Vec<(&'static str, CellValue)>,
}

impl TableRow {
    pub fn new(rank: usize) -> Self {
        Self {
            rank,
            cells: Vec::new(),
        }
    }

    pub fn cell(mut self, key: &'static str, value: CellValue) -> Self {
        self.cells.push((key, value));
        self
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }
}

/// Table formatter that renders rows in the CLI output formats
pub struct TableFormatter<'a> {
    columns: &'a [ColumnDef],
    noun: &'static str,
    summary_suffix: String,
    config: TableConfig,
}

impl<'a> TableFormatter<'a> {
    pub fn new(columns: &'a [ColumnDef], noun: &'static str) -> Self {
        Self {
            columns,
            noun,
            summary_suffix: String::new(),
            config: TableConfig::default(),
        }
    }

    /// Text appended to the summary line (e.g. ", worst first")
    pub fn with_summary_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.summary_suffix = suffix.into();
        self
    }

    pub fn with_config(mut self, config: TableConfig) -> Self {
        self.config = config;
        self
    }

    /// Print rows in the specified format
    pub fn output(&self, rows: &[TableRow], format: OutputFormat) {
        print!("{}", self.render(rows, format));
    }

    /// Render rows in the specified format. JSON is rendered by callers from
    /// their serde types and falls back to TSV here.
    pub fn render(&self, rows: &[TableRow], format: OutputFormat) -> String {
        match format {
            OutputFormat::Csv => self.render_csv(rows),
            OutputFormat::Md => self.render_md(rows),
            _ => self.render_tsv(rows),
        }
    }

    /// Dynamic column widths: content-sized, capped at the column maximum
    fn calculate_widths(&self, rows: &[TableRow]) -> Vec<usize> {
        let rank_width = rows
            .iter()
            .map(|r| r.rank.to_string().len())
            .max()
            .unwrap_or(1)
            .max(1);

        let mut widths = vec![rank_width];
        for col in self.columns {
            let max_content = rows
                .iter()
                .filter_map(|r| r.get(col.key))
                .map(|v| v.display_width())
                .max()
                .unwrap_or(0);
            widths.push(col.header.len().max(max_content).min(col.width.max(col.header.len())));
        }
        widths
    }

    fn render_tsv(&self, rows: &[TableRow]) -> String {
        let widths = self.calculate_widths(rows);
        let mut out = String::new();

        let mut header_parts = vec![format!("{:<width$}", style("#").bold().dim(), width = widths[0])];
        for (col, w) in self.columns.iter().zip(&widths[1..]) {
            header_parts.push(format!("{:<width$}", style(col.header).bold(), width = w));
        }
        out.push_str(header_parts.join(" ").trim_end());
        out.push('\n');

        let total_width: usize = widths.iter().sum::<usize>() + widths.len() - 1;
        out.push_str(&"-".repeat(total_width));
        out.push('\n');

        for row in rows {
            let mut parts = vec![format!("{:<width$}", style(row.rank).dim(), width = widths[0])];
            for (col, w) in self.columns.iter().zip(&widths[1..]) {
                match row.get(col.key) {
                    Some(value) => parts.push(value.format_tsv(*w)),
                    None => parts.push(CellValue::Empty.format_tsv(*w)),
                }
            }
            out.push_str(parts.join(" ").trim_end());
            out.push('\n');
        }

        if self.config.show_summary {
            out.push('\n');
            out.push_str(&format!(
                "{} {}(s){}\n",
                style(rows.len()).cyan(),
                self.noun,
                self.summary_suffix
            ));
        }
        out
    }

    fn render_csv(&self, rows: &[TableRow]) -> String {
        let mut out = String::new();
        let mut headers = vec!["rank"];
        headers.extend(self.columns.iter().map(|c| c.key));
        out.push_str(&headers.join(","));
        out.push('\n');

        for row in rows {
            let mut values = vec![row.rank.to_string()];
            for col in self.columns {
                values.push(row.get(col.key).map(CellValue::format_csv).unwrap_or_default());
            }
            out.push_str(&values.join(","));
            out.push('\n');
        }
        out
    }

    fn render_md(&self, rows: &[TableRow]) -> String {
        let mut out = String::new();
        let mut headers = vec!["#"];
        headers.extend(self.columns.iter().map(|c| c.header));
        out.push_str(&format!("| {} |\n", headers.join(" | ")));
        out.push_str(&format!(
            "|{}|\n",
            headers.iter().map(|_| "---").collect::<Vec<_>>().join("|")
        ));

        for row in rows {
            let mut values = vec![row.rank.to_string()];
            for col in self.columns {
                values.push(
                    row.get(col.key)
                        .map(CellValue::format_md)
                        .unwrap_or_else(|| "-".to_string()),
                );
            }
            out.push_str(&format!("| {} |\n", values.join(" | ")));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMNS: &[ColumnDef] = &[
        ColumnDef::new("component", "COMPONENT", 20),
        ColumnDef::new("mtbf_fh", "MTBF FH", 10),
        ColumnDef::new("mtbf_fc", "MTBF FC", 10),
    ];

    fn rows() -> Vec<TableRow> {
        vec![
            TableRow::new(1)
                .cell("component", CellValue::Key("Brake Unit, LH".to_string()))
                .cell("mtbf_fh", CellValue::Hours(950.04))
                .cell("mtbf_fc", CellValue::Cycles(None)),
            TableRow::new(2)
                .cell("component", CellValue::Key("Pump|A".to_string()))
                .cell("mtbf_fh", CellValue::Hours(1200.0))
                .cell("mtbf_fc", CellValue::Cycles(Some(640.26))),
        ]
    }

    #[test]
    fn test_render_csv() {
        let out = TableFormatter::new(COLUMNS, "component").render(&rows(), OutputFormat::Csv);
        assert_eq!(
            out,
            "rank,component,mtbf_fh,mtbf_fc\n1,\"Brake Unit, LH\",950.0,\n2,Pump|A,1200.0,640.3\n"
        );
    }

    #[test]
    fn test_render_md_escapes_pipes() {
        let out = TableFormatter::new(COLUMNS, "component").render(&rows(), OutputFormat::Md);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "| # | COMPONENT | MTBF FH | MTBF FC |");
        assert_eq!(lines[1], "|---|---|---|---|");
        assert_eq!(lines[2], "| 1 | Brake Unit, LH | 950.0 | - |");
        assert_eq!(lines[3], "| 2 | Pump\\|A | 1200.0 | 640.3 |");
    }

    #[test]
    fn test_render_tsv_summary() {
        console::set_colors_enabled(false);
        let out = TableFormatter::new(COLUMNS, "component")
            .with_summary_suffix(", worst first")
            .render(&rows(), OutputFormat::Tsv);
        assert!(out.contains("COMPONENT"));
        assert!(out.contains("950.0"));
        assert!(out.ends_with("2 component(s), worst first\n"));

        let piped = TableFormatter::new(COLUMNS, "component")
            .with_config(TableConfig::for_pipe())
            .render(&rows(), OutputFormat::Tsv);
        assert!(!piped.contains("component(s)"));
    }

    #[test]
    fn test_cell_raw_values() {
        assert_eq!(CellValue::Expected(2.0).raw(), "2.00");
        assert_eq!(CellValue::Hours(333.36).raw(), "333.4");
        assert_eq!(CellValue::Hours(800.25).raw(), "800.2");
        assert_eq!(CellValue::Cycles(Some(800.75)).raw(), "800.8");
        assert_eq!(CellValue::Expected(0.125).raw(), "0.12");
        assert_eq!(CellValue::Number(7).format_csv(), "7");
    }
}
