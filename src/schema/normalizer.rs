//! Schema normalizer - reconciles historical data vintages into canonical events
//!
//! Column names drifted over the life of the removal log (`aircraft_fh` vs
//! `aircraft_fh_at_removal`, `component` vs `component_name`, ...). The
//! normalizer resolves every known alias to one [`CanonicalField`], drops
//! anything it does not recognise, validates each row, enriches rows that
//! lack a component code from the component master, and settles component
//! identity and the failure flag once so the engine never has to.

use miette::Diagnostic;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, warn};

use crate::entities::component::name_key;
use crate::entities::removal::is_placeholder_code;
use crate::entities::{
    is_unscheduled_failure, ComponentIdentity, ComponentReference, RemovalEvent, RemovalReason,
    RowRef,
};
use crate::schema::table::{normalize_header, RawTable};
use crate::schema::validator::{
    parse_flight_cycles, parse_flight_hours, parse_removal_date, validate_ata_chapter,
    ValidationIssue,
};

/// Fields of the canonical removal event table, in output order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalField {
    AircraftReg,
    ComponentCode,
    ComponentName,
    PartNumber,
    SerialNumber,
    AtaChapter,
    Category,
    Criticality,
    RemovalDate,
    AircraftFh,
    AircraftFc,
    RemovalType,
    RemovalReason,
    Station,
    Remarks,
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 15] = [
        CanonicalField::AircraftReg,
        CanonicalField::ComponentCode,
        CanonicalField::ComponentName,
        CanonicalField::PartNumber,
        CanonicalField::SerialNumber,
        CanonicalField::AtaChapter,
        CanonicalField::Category,
        CanonicalField::Criticality,
        CanonicalField::RemovalDate,
        CanonicalField::AircraftFh,
        CanonicalField::AircraftFc,
        CanonicalField::RemovalType,
        CanonicalField::RemovalReason,
        CanonicalField::Station,
        CanonicalField::Remarks,
    ];

    /// Columns a table must carry for its rows to be usable at all
    pub const REQUIRED: [CanonicalField; 7] = [
        CanonicalField::AircraftReg,
        CanonicalField::SerialNumber,
        CanonicalField::AtaChapter,
        CanonicalField::RemovalDate,
        CanonicalField::AircraftFh,
        CanonicalField::AircraftFc,
        CanonicalField::RemovalReason,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CanonicalField::AircraftReg => "aircraft_reg",
            CanonicalField::ComponentCode => "component_code",
            CanonicalField::ComponentName => "component_name",
            CanonicalField::PartNumber => "part_number",
            CanonicalField::SerialNumber => "serial_number",
            CanonicalField::AtaChapter => "ata_chapter",
            CanonicalField::Category => "category",
            CanonicalField::Criticality => "criticality",
            CanonicalField::RemovalDate => "removal_date",
            CanonicalField::AircraftFh => "aircraft_fh",
            CanonicalField::AircraftFc => "aircraft_fc",
            CanonicalField::RemovalType => "removal_type",
            CanonicalField::RemovalReason => "removal_reason",
            CanonicalField::Station => "station",
            CanonicalField::Remarks => "remarks",
        }
    }

    /// Accepted header names, most preferred first (already normalized)
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            CanonicalField::AircraftReg => &[
                "aircraft_reg",
                "aircraft_registration",
                "registration",
                "tail_number",
                "aircraft",
            ],
            CanonicalField::ComponentCode => &["component_code", "code"],
            CanonicalField::ComponentName => &["component_name", "component"],
            CanonicalField::PartNumber => &["part_number", "pn", "p/n"],
            CanonicalField::SerialNumber => &["serial_number", "sn", "s/n", "serial"],
            CanonicalField::AtaChapter => &["ata_chapter", "ata"],
            CanonicalField::Category => &["category", "component_type"],
            CanonicalField::Criticality => &["criticality"],
            CanonicalField::RemovalDate => &["removal_date", "date_removed", "date"],
            CanonicalField::AircraftFh => &[
                "aircraft_fh",
                "aircraft_fh_at_removal",
                "flight_hours",
                "fh",
            ],
            CanonicalField::AircraftFc => &[
                "aircraft_fc",
                "aircraft_fc_at_removal",
                "flight_cycles",
                "fc",
            ],
            CanonicalField::RemovalType => &["removal_type"],
            CanonicalField::RemovalReason => &["removal_reason", "reason"],
            CanonicalField::Station => &["station"],
            CanonicalField::Remarks => &["remarks", "notes"],
        }
    }
}

impl std::fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Table-level schema failure: the dataset cannot be processed at all
#[derive(Debug, Error, Diagnostic)]
pub enum SchemaError {
    #[error("{table}: missing required column(s): {}", .missing.join(", "))]
    #[diagnostic(
        code(maintwatch::schema::missing_columns),
        help("Run `maintwatch template` to see the expected header")
    )]
    MissingColumns { table: String, missing: Vec<String> },

    #[error("{table}: no header row")]
    #[diagnostic(code(maintwatch::schema::no_header))]
    NoHeader { table: String },
}

/// Resolved column positions for one raw table
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    index: HashMap<CanonicalField, usize>,
}

impl ColumnMap {
    /// Resolve every canonical field against the table's headers
    pub fn resolve(table: &RawTable) -> Result<Self, SchemaError> {
        if table.headers.iter().all(|h| normalize_header(h).is_empty()) {
            return Err(SchemaError::NoHeader {
                table: table.source.clone(),
            });
        }

        let headers = table.header_map();
        let mut index = HashMap::new();
        for field in CanonicalField::ALL {
            if let Some(&i) = field.aliases().iter().find_map(|a| headers.get(*a)) {
                index.insert(field, i);
            }
        }

        let map = Self { index };
        let missing: Vec<String> = CanonicalField::REQUIRED
            .iter()
            .filter(|f| !map.satisfies(**f))
            .map(|f| f.name().to_string())
            .collect();

        if !missing.is_empty() {
            return Err(SchemaError::MissingColumns {
                table: table.source.clone(),
                missing,
            });
        }
        Ok(map)
    }

    pub fn contains(&self, field: CanonicalField) -> bool {
        self.index.contains_key(&field)
    }

    /// Older vintages classify removals with `removal_type` only
    fn satisfies(&self, field: CanonicalField) -> bool {
        match field {
            CanonicalField::RemovalReason => {
                self.contains(CanonicalField::RemovalReason)
                    || self.contains(CanonicalField::RemovalType)
            }
            other => self.contains(other),
        }
    }

    /// Trimmed, non-empty cell value for a field
    pub fn get<'r>(&self, record: &'r [String], field: CanonicalField) -> Option<&'r str> {
        self.index
            .get(&field)
            .and_then(|&i| record.get(i))
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }
}

/// Result of normalizing one or more raw tables
#[derive(Debug, Clone, Default)]
pub struct NormalizedBatch {
    pub events: Vec<RemovalEvent>,
    pub issues: Vec<ValidationIssue>,
    pub rows_read: usize,
    /// Rows with no usable code that the component master could not match
    pub unmapped_components: usize,
}

impl NormalizedBatch {
    /// Number of rows excluded because of validation issues
    pub fn rejected_rows(&self) -> usize {
        self.rows_read - self.events.len()
    }

    fn extend(&mut self, other: NormalizedBatch) {
        self.events.extend(other.events);
        self.issues.extend(other.issues);
        self.rows_read += other.rows_read;
        self.unmapped_components += other.unmapped_components;
    }
}

/// Component master lookup by normalized name, optionally narrowed by ATA
#[derive(Debug, Clone, Default)]
struct ReferenceIndex {
    by_name_ata: HashMap<(String, String), ComponentReference>,
    by_name: HashMap<String, ComponentReference>,
}

impl ReferenceIndex {
    fn build(references: &[ComponentReference]) -> Self {
        let mut index = Self::default();
        for reference in references {
            if is_placeholder_code(&reference.component_code) {
                continue;
            }
            let key = reference.name_key();
            index
                .by_name_ata
                .entry((key.clone(), reference.ata_chapter.trim().to_string()))
                .or_insert_with(|| reference.clone());
            index.by_name.entry(key).or_insert_with(|| reference.clone());
        }
        index
    }

    fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    fn lookup(&self, name: &str, ata: &str) -> Option<&ComponentReference> {
        let key = name_key(name);
        self.by_name_ata
            .get(&(key.clone(), ata.trim().to_string()))
            .or_else(|| self.by_name.get(&key))
    }
}

/// Converts raw tables into canonical [`RemovalEvent`]s
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    references: ReferenceIndex,
    date_formats: Vec<String>,
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enrich code-less rows from the component master
    pub fn with_references(mut self, references: &[ComponentReference]) -> Self {
        self.references = ReferenceIndex::build(references);
        self
    }

    /// Extra `chrono` date formats tried after the built-in ones
    pub fn with_date_formats(mut self, formats: Vec<String>) -> Self {
        self.date_formats = formats;
        self
    }

    /// Normalize several tables (one per data vintage) into one batch.
    ///
    /// A schema error in any table halts the whole batch.
    pub fn normalize_all(&self, tables: &[RawTable]) -> Result<NormalizedBatch, SchemaError> {
        let mut batch = NormalizedBatch::default();
        for table in tables {
            batch.extend(self.normalize(table)?);
        }
        Ok(batch)
    }

    /// Normalize one table
    pub fn normalize(&self, table: &RawTable) -> Result<NormalizedBatch, SchemaError> {
        let columns = ColumnMap::resolve(table)?;
        let mut batch = NormalizedBatch {
            rows_read: table.rows.len(),
            ..Default::default()
        };

        for (idx, record) in table.rows.iter().enumerate() {
            let row = RowRef {
                source: table.source.clone(),
                line: idx + 2,
            };
            if let Some((event, unmapped)) = self.normalize_row(&columns, record, row, &mut batch.issues) {
                if unmapped {
                    batch.unmapped_components += 1;
                }
                batch.events.push(event);
            }
        }

        if batch.unmapped_components > 0 && !self.references.is_empty() {
            warn!(
                table = %table.source,
                unmapped = batch.unmapped_components,
                "rows could not be mapped to the component master"
            );
        }
        debug!(
            table = %table.source,
            rows = batch.rows_read,
            valid = batch.events.len(),
            issues = batch.issues.len(),
            "normalized removal events"
        );

        Ok(batch)
    }

    /// Validate and convert one row. Returns the event and whether it stayed
    /// without a component code, or `None` when the row has issues.
    fn normalize_row(
        &self,
        columns: &ColumnMap,
        record: &[String],
        row: RowRef,
        issues: &mut Vec<ValidationIssue>,
    ) -> Option<(RemovalEvent, bool)> {
        let issues_before = issues.len();
        let get = |field: CanonicalField| columns.get(record, field);

        let mut required = |field: CanonicalField| {
            let value = get(field);
            if value.is_none() {
                issues.push(ValidationIssue::required(row.clone(), field.name()));
            }
            value
        };

        let aircraft_reg = required(CanonicalField::AircraftReg);
        let serial_number = required(CanonicalField::SerialNumber);
        let ata_chapter = required(CanonicalField::AtaChapter);
        let removal_date = required(CanonicalField::RemovalDate);
        let aircraft_fh = required(CanonicalField::AircraftFh);
        let aircraft_fc = required(CanonicalField::AircraftFc);

        let removal_type = get(CanonicalField::RemovalType).unwrap_or_default();
        let reason_text = get(CanonicalField::RemovalReason);
        if reason_text.is_none() && removal_type.is_empty() {
            issues.push(ValidationIssue::required(
                row.clone(),
                CanonicalField::RemovalReason.name(),
            ));
        }

        let raw_code = get(CanonicalField::ComponentCode).filter(|c| !is_placeholder_code(c));
        let component_name = get(CanonicalField::ComponentName).unwrap_or_default();
        if raw_code.is_none() && component_name.is_empty() {
            issues.push(ValidationIssue::new(
                row.clone(),
                CanonicalField::ComponentName.name(),
                "component_code or component_name is required",
            ));
        }

        if let Some(ata) = ata_chapter {
            if let Err(msg) = validate_ata_chapter(ata) {
                issues.push(ValidationIssue::new(row.clone(), "ata_chapter", msg).with_value(ata));
            }
        }
        let fh = aircraft_fh.and_then(|v| match parse_flight_hours(v) {
            Ok(fh) => Some(fh),
            Err(msg) => {
                issues.push(ValidationIssue::new(row.clone(), "aircraft_fh", msg).with_value(v));
                None
            }
        });
        let fc = aircraft_fc.and_then(|v| match parse_flight_cycles(v) {
            Ok(fc) => Some(fc),
            Err(msg) => {
                issues.push(ValidationIssue::new(row.clone(), "aircraft_fc", msg).with_value(v));
                None
            }
        });
        let date = removal_date.and_then(|v| match parse_removal_date(v, &self.date_formats) {
            Ok(d) => Some(d),
            Err(msg) => {
                issues.push(ValidationIssue::new(row.clone(), "removal_date", msg).with_value(v));
                None
            }
        });

        if issues.len() > issues_before {
            return None;
        }

        // Every required value is present once no issue was recorded
        let (aircraft_reg, serial_number, ata_chapter) = (aircraft_reg?, serial_number?, ata_chapter?);
        let (removal_date, aircraft_fh, aircraft_fc) = (date?, fh?, fc?);

        let mut component_code = raw_code.map(str::to_string);
        let mut category = get(CanonicalField::Category).unwrap_or_default().to_string();
        let mut criticality = get(CanonicalField::Criticality).unwrap_or_default().to_string();

        let mut unmapped = false;
        if component_code.is_none() {
            match self.references.lookup(component_name, ata_chapter) {
                Some(reference) => {
                    component_code = Some(reference.component_code.trim().to_string());
                    if category.is_empty() {
                        category = reference.category.clone();
                    }
                    if criticality.is_empty() {
                        criticality = reference.criticality.clone();
                    }
                }
                None => unmapped = true,
            }
        }

        let removal_reason = RemovalReason::parse(reason_text.unwrap_or_default());
        let identity = ComponentIdentity::resolve(component_code.as_deref(), component_name);
        let unscheduled = is_unscheduled_failure(&removal_reason, removal_type);

        let event = RemovalEvent {
            aircraft_reg: aircraft_reg.to_string(),
            component_code,
            component_name: component_name.to_string(),
            part_number: get(CanonicalField::PartNumber).unwrap_or_default().to_string(),
            serial_number: serial_number.to_string(),
            ata_chapter: ata_chapter.to_string(),
            category,
            criticality,
            removal_date,
            aircraft_fh,
            aircraft_fc,
            removal_type: removal_type.to_string(),
            removal_reason,
            station: get(CanonicalField::Station).unwrap_or_default().to_string(),
            remarks: get(CanonicalField::Remarks).unwrap_or_default().to_string(),
            identity,
            unscheduled,
            row,
        };
        Some((event, unmapped))
    }
}

/// Canonical header row, in canonical column order
pub fn canonical_headers() -> Vec<&'static str> {
    CanonicalField::ALL.iter().map(|f| f.name()).collect()
}

/// Render a canonical event back into canonical column order
pub fn canonical_record(event: &RemovalEvent) -> Vec<String> {
    CanonicalField::ALL
        .iter()
        .map(|field| match field {
            CanonicalField::AircraftReg => event.aircraft_reg.clone(),
            CanonicalField::ComponentCode => event.component_code.clone().unwrap_or_default(),
            CanonicalField::ComponentName => event.component_name.clone(),
            CanonicalField::PartNumber => event.part_number.clone(),
            CanonicalField::SerialNumber => event.serial_number.clone(),
            CanonicalField::AtaChapter => event.ata_chapter.clone(),
            CanonicalField::Category => event.category.clone(),
            CanonicalField::Criticality => event.criticality.clone(),
            CanonicalField::RemovalDate => event.removal_date.format("%Y-%m-%d").to_string(),
            CanonicalField::AircraftFh => event.aircraft_fh.to_string(),
            CanonicalField::AircraftFc => event.aircraft_fc.to_string(),
            CanonicalField::RemovalType => event.removal_type.clone(),
            CanonicalField::RemovalReason => event.removal_reason.label().to_string(),
            CanonicalField::Station => event.station.clone(),
            CanonicalField::Remarks => event.remarks.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn table(headers: &[&str]) -> RawTable {
        RawTable::new("events.csv", headers.iter().map(|h| h.to_string()).collect())
    }

    const CANONICAL: &[&str] = &[
        "aircraft_reg",
        "component_code",
        "component_name",
        "part_number",
        "serial_number",
        "ata_chapter",
        "removal_date",
        "aircraft_fh",
        "aircraft_fc",
        "removal_reason",
    ];

    #[test]
    fn test_canonical_row_normalizes() {
        let t = table(CANONICAL).with_row([
            "9N-AHA",
            "BRK-01",
            "Brake Unit",
            "2-1577",
            "SN-100",
            "32",
            "2024-01-10",
            "1000",
            "800",
            "Unscheduled Failure",
        ]);
        let batch = Normalizer::new().normalize(&t).unwrap();
        assert!(batch.issues.is_empty());
        assert_eq!(batch.events.len(), 1);

        let e = &batch.events[0];
        assert_eq!(e.aircraft_reg, "9N-AHA");
        assert_eq!(e.identity, ComponentIdentity::ByCode("BRK-01".to_string()));
        assert_eq!(e.removal_date, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        assert_eq!(e.aircraft_fh, 1000.0);
        assert_eq!(e.aircraft_fc, 800);
        assert!(e.unscheduled);
        assert_eq!(e.category, "");
        assert_eq!(e.row.line, 2);
    }

    #[test]
    fn test_alias_headers_and_extra_columns() {
        let t = table(&[
            "Aircraft Reg",
            "Component",
            "S/N",
            "ATA",
            "Date",
            "Aircraft FH At Removal",
            "Aircraft-FC-At-Removal",
            "Removal Type",
            "technician_id",
        ])
        .with_row([
            "9N-AHB",
            "Starter Generator",
            "SG-7",
            "24-30",
            "2023-05-01",
            "4200.5",
            "3100",
            "Unscheduled",
            "T-42",
        ]);
        let batch = Normalizer::new().normalize(&t).unwrap();
        assert!(batch.issues.is_empty(), "{:?}", batch.issues);
        let e = &batch.events[0];
        assert_eq!(e.serial_number, "SG-7");
        assert_eq!(e.ata_chapter, "24-30");
        assert_eq!(e.aircraft_fh, 4200.5);
        assert_eq!(e.identity, ComponentIdentity::ByName("Starter Generator".to_string()));
        assert_eq!(e.removal_reason, RemovalReason::Other(String::new()));
        assert!(e.unscheduled);
        assert_eq!(batch.unmapped_components, 1);
    }

    #[test]
    fn test_missing_columns_is_schema_error() {
        let t = table(&["aircraft_reg", "component_name", "removal_date"]);
        let err = Normalizer::new().normalize(&t).unwrap_err();
        match err {
            SchemaError::MissingColumns { missing, .. } => {
                assert_eq!(
                    missing,
                    vec![
                        "serial_number",
                        "ata_chapter",
                        "aircraft_fh",
                        "aircraft_fc",
                        "removal_reason"
                    ]
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_header_is_schema_error() {
        let t = table(&["", " "]);
        assert!(matches!(
            Normalizer::new().normalize(&t),
            Err(SchemaError::NoHeader { .. })
        ));
    }

    #[test]
    fn test_invalid_rows_are_reported_not_fatal() {
        let t = table(CANONICAL)
            .with_row([
                "9N-AHA", "", "Brake Unit", "", "SN-1", "ATA32", "2024-01-10", "0", "-3",
                "Unscheduled Failure",
            ])
            .with_row([
                "", "", "", "", "SN-2", "32", "not a date", "100", "10", "",
            ])
            .with_row([
                "9N-AHA", "", "Brake Unit", "", "SN-3", "32", "2024-01-10", "150", "12",
                "Life Limit",
            ]);
        let batch = Normalizer::new().normalize(&t).unwrap();

        assert_eq!(batch.rows_read, 3);
        assert_eq!(batch.events.len(), 1);
        assert_eq!(batch.rejected_rows(), 2);
        assert_eq!(batch.events[0].serial_number, "SN-3");
        assert!(!batch.events[0].unscheduled);

        let fields: Vec<(usize, &str)> = batch
            .issues
            .iter()
            .map(|i| (i.row.line, i.field.as_str()))
            .collect();
        assert_eq!(
            fields,
            vec![
                (2, "ata_chapter"),
                (2, "aircraft_fh"),
                (2, "aircraft_fc"),
                (3, "aircraft_reg"),
                (3, "removal_reason"),
                (3, "component_name"),
                (3, "removal_date"),
            ]
        );
    }

    #[test]
    fn test_reference_enrichment() {
        let references = vec![
            ComponentReference {
                component_code: "BRK-01".into(),
                component_name: "Brake Unit".into(),
                ata_chapter: "32".into(),
                category: "Landing Gear".into(),
                criticality: "high".into(),
            },
            ComponentReference {
                component_code: "BRK-99".into(),
                component_name: "brake unit".into(),
                ata_chapter: "99".into(),
                category: "Other".into(),
                criticality: "low".into(),
            },
        ];
        let t = table(CANONICAL)
            .with_row([
                "9N-AHA", "N/A", " brake UNIT ", "", "SN-1", "32", "2024-01-10", "100", "10",
                "Unscheduled Failure",
            ])
            .with_row([
                "9N-AHA", "", "Brake Unit", "", "SN-2", "21", "2024-01-10", "100", "10",
                "Unscheduled Failure",
            ])
            .with_row([
                "9N-AHA", "", "Fuel Pump", "", "SN-3", "28", "2024-01-10", "100", "10",
                "Unscheduled Failure",
            ]);
        let batch = Normalizer::new()
            .with_references(&references)
            .normalize(&t)
            .unwrap();

        assert_eq!(batch.events[0].identity, ComponentIdentity::ByCode("BRK-01".into()));
        assert_eq!(batch.events[0].category, "Landing Gear");
        assert_eq!(batch.events[0].criticality, "high");
        // No ATA match: falls back to the first reference with that name
        assert_eq!(batch.events[1].component_code.as_deref(), Some("BRK-01"));
        assert_eq!(batch.events[2].identity, ComponentIdentity::ByName("Fuel Pump".into()));
        assert_eq!(batch.unmapped_components, 1);
    }

    #[test]
    fn test_normalize_all_concatenates_vintages() {
        let old = table(&[
            "aircraft_reg", "component", "serial_number", "ata_chapter", "removal_date",
            "aircraft_fh", "aircraft_fc", "removal_type",
        ])
        .with_row(["9N-AHA", "Brake Unit", "SN-1", "32", "2022-01-01", "100", "80", "Unscheduled"]);
        let new = table(CANONICAL).with_row([
            "9N-AHA", "", "Brake Unit", "", "SN-1", "32", "2023-01-01", "900", "700",
            "Unscheduled Failure",
        ]);

        let batch = Normalizer::new().normalize_all(&[old, new]).unwrap();
        assert_eq!(batch.events.len(), 2);
        assert_eq!(batch.rows_read, 2);
        assert!(batch.events.iter().all(|e| e.unscheduled));
        assert_eq!(batch.events[0].identity, batch.events[1].identity);
    }

    #[test]
    fn test_canonical_record_order() {
        let t = table(CANONICAL).with_row([
            "9N-AHA", "BRK-01", "Brake Unit", "2-1577", "SN-100", "32", "2024-01-10", "1000.5",
            "800", "unscheduled failure",
        ]);
        let batch = Normalizer::new().normalize(&t).unwrap();
        let record = canonical_record(&batch.events[0]);
        assert_eq!(record.len(), canonical_headers().len());
        assert_eq!(record[0], "9N-AHA");
        assert_eq!(record[8], "2024-01-10");
        assert_eq!(record[9], "1000.5");
        assert_eq!(record[12], "Unscheduled Failure");
    }
}
