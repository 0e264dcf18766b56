//! Per-record field validation with issue collection
//!
//! Validation never aborts a batch: each failed check becomes a
//! [`ValidationIssue`] and the offending row is left out of aggregation.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::fmt;

use crate::entities::RowRef;

/// Date formats accepted without any configuration
pub const DEFAULT_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Timestamp formats written by spreadsheet tools; only the date part is kept
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// A validation issue attached to one source row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub row: RowRef,
    pub field: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl ValidationIssue {
    pub fn new(row: RowRef, field: &str, message: impl Into<String>) -> Self {
        Self {
            row,
            field: field.to_string(),
            message: message.into(),
            value: None,
        }
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = Some(value.to_string());
        self
    }

    pub fn required(row: RowRef, field: &str) -> Self {
        Self::new(row, field, format!("{} is required", field))
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(v) => write!(f, "{} [{}] {} (got '{}')", self.row, self.field, self.message, v),
            None => write!(f, "{} [{}] {}", self.row, self.field, self.message),
        }
    }
}

/// ATA chapter: digits with optional hyphens, at least one digit ("32", "32-40")
pub fn validate_ata_chapter(ata: &str) -> Result<(), String> {
    let ata = ata.trim();
    let well_formed = ata.chars().all(|c| c.is_ascii_digit() || c == '-')
        && ata.chars().any(|c| c.is_ascii_digit());
    if well_formed {
        Ok(())
    } else {
        Err("ATA chapter format is invalid".to_string())
    }
}

/// Aircraft flight hours: finite and greater than zero
pub fn parse_flight_hours(value: &str) -> Result<f64, String> {
    let fh: f64 = value
        .trim()
        .parse()
        .map_err(|_| "Aircraft FH is not a number".to_string())?;
    if !fh.is_finite() || fh <= 0.0 {
        return Err("Aircraft FH must be greater than zero".to_string());
    }
    Ok(fh)
}

/// Aircraft flight cycles: a whole number, zero or greater.
///
/// Accepts `1200.0` since spreadsheet exports often write integers as floats.
pub fn parse_flight_cycles(value: &str) -> Result<u32, String> {
    let value = value.trim();
    if let Ok(fc) = value.parse::<u32>() {
        return Ok(fc);
    }

    let fc: f64 = value
        .parse()
        .map_err(|_| "Aircraft FC is not a number".to_string())?;
    if fc < 0.0 {
        return Err("Aircraft FC must be zero or greater".to_string());
    }
    if !fc.is_finite() || fc.fract() != 0.0 || fc > u32::MAX as f64 {
        return Err("Aircraft FC must be a whole number".to_string());
    }
    Ok(fc as u32)
}

/// Parse a removal date with the default formats plus any configured extras
pub fn parse_removal_date(value: &str, extra_formats: &[String]) -> Result<NaiveDate, String> {
    let value = value.trim();

    let date_formats = DEFAULT_DATE_FORMATS
        .iter()
        .copied()
        .chain(extra_formats.iter().map(String::as_str));
    for fmt in date_formats {
        if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
            return Ok(date);
        }
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Ok(dt.date());
        }
    }

    Err("Removal date is not a recognised date".to_string())
}
