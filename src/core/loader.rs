//! CSV event store adapter
//!
//! Reads removal-event files (or directories of yearly exports) into
//! [`RawTable`]s and the component master into [`ComponentReference`]s. This
//! is the only place the library touches the filesystem.

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use miette::Diagnostic;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

use crate::entities::{ComponentReference, RemovalEvent};
use crate::schema::table::normalize_header;
use crate::schema::{canonical_headers, canonical_record, RawTable};

#[derive(Debug, Error, Diagnostic)]
pub enum LoadError {
    #[error("input not found: {}", .path.display())]
    #[diagnostic(code(maintwatch::load::not_found))]
    NotFound { path: PathBuf },

    #[error("no CSV files under {}", .path.display())]
    #[diagnostic(
        code(maintwatch::load::empty_dir),
        help("Event directories are scanned for *.csv files")
    )]
    NoCsvFiles { path: PathBuf },

    #[error("failed to read {}", .path.display())]
    #[diagnostic(code(maintwatch::load::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {source_name}")]
    #[diagnostic(code(maintwatch::load::csv))]
    Csv {
        source_name: String,
        #[source]
        source: csv::Error,
    },
}

/// Expand inputs into CSV files. Directories are walked recursively for
/// `*.csv` files in path order; plain files are taken as given.
pub fn collect_inputs(paths: &[PathBuf]) -> Result<Vec<PathBuf>, LoadError> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(path)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .filter(|e| {
                    e.path()
                        .extension()
                        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
                })
                .map(|e| e.into_path())
                .collect();
            if found.is_empty() {
                return Err(LoadError::NoCsvFiles { path: path.clone() });
            }
            found.sort();
            files.extend(found);
        } else if path.is_file() {
            files.push(path.clone());
        } else {
            return Err(LoadError::NotFound { path: path.clone() });
        }
    }

    Ok(files)
}

/// Read every input (files or directories) as its own raw table
pub fn load_tables(paths: &[PathBuf]) -> Result<Vec<RawTable>, LoadError> {
    collect_inputs(paths)?
        .iter()
        .map(|path| read_table(path))
        .collect()
}

/// Read one CSV file into a raw table
pub fn read_table(path: &Path) -> Result<RawTable, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_table_from(path.display().to_string(), BufReader::new(file))
}

/// Read CSV from any reader; `source` names the table in diagnostics
pub fn read_table_from<R: Read>(source: String, reader: R) -> Result<RawTable, LoadError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let csv_err = |e: csv::Error| LoadError::Csv {
        source_name: source.clone(),
        source: e,
    };

    let headers: Vec<String> = rdr.headers().map_err(csv_err)?.iter().map(String::from).collect();
    let mut table = RawTable::new(source.clone(), headers);
    for record in rdr.records() {
        let record = record.map_err(csv_err)?;
        table.push_row(record.iter());
    }

    debug!(source = %table.source, rows = table.len(), "read removal table");
    Ok(table)
}

/// Load the component master. Headers are matched like event headers
/// (`Component Code` reads as `component_code`).
pub fn load_references(path: &Path) -> Result<Vec<ComponentReference>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_references_from(path.display().to_string(), BufReader::new(file))
}

pub fn read_references_from<R: Read>(
    source: String,
    reader: R,
) -> Result<Vec<ComponentReference>, LoadError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let csv_err = |e: csv::Error| LoadError::Csv {
        source_name: source.clone(),
        source: e,
    };

    let headers: StringRecord = rdr
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(normalize_header)
        .collect();
    rdr.set_headers(headers);

    let references = rdr
        .deserialize::<ComponentReference>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(csv_err)?;

    debug!(source = %source, references = references.len(), "read component master");
    Ok(references)
}

/// Write canonical events as CSV in canonical column order
pub fn write_events<W: Write>(events: &[RemovalEvent], writer: W) -> Result<(), LoadError> {
    let csv_err = |e: csv::Error| LoadError::Csv {
        source_name: "output".to_string(),
        source: e,
    };

    let mut wtr = WriterBuilder::new().from_writer(writer);
    wtr.write_record(canonical_headers()).map_err(csv_err)?;
    for event in events {
        wtr.write_record(canonical_record(event)).map_err(csv_err)?;
    }
    wtr.flush().map_err(|source| LoadError::Io {
        path: PathBuf::from("output"),
        source,
    })
}
