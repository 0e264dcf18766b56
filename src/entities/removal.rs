//! Removal event entity - one physical removal of a component from an aircraft

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a component came off the aircraft
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalReason {
    UnscheduledFailure,
    ScheduledReplacement,
    LifeLimit,
    InspectionFinding,
    SbOrModification,
    /// Free text that matches none of the known reasons
    Other(String),
}

impl RemovalReason {
    /// Human-readable label as it appears in source data
    pub fn label(&self) -> &str {
        match self {
            RemovalReason::UnscheduledFailure => "Unscheduled Failure",
            RemovalReason::ScheduledReplacement => "Scheduled Replacement",
            RemovalReason::LifeLimit => "Life Limit",
            RemovalReason::InspectionFinding => "Inspection Finding",
            RemovalReason::SbOrModification => "SB or Modification",
            RemovalReason::Other(text) => text,
        }
    }

    /// Parse a reason from source text. Never fails: unknown text becomes `Other`.
    ///
    /// Matching ignores case and treats spaces, hyphens and underscores alike,
    /// so `Unscheduled Failure` and `unscheduled_failure` are the same reason.
    pub fn parse(text: &str) -> Self {
        let key: String = text
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == '-' || c == ' ' { '_' } else { c })
            .collect();

        match key.as_str() {
            "unscheduled_failure" => RemovalReason::UnscheduledFailure,
            "scheduled_replacement" => RemovalReason::ScheduledReplacement,
            "life_limit" => RemovalReason::LifeLimit,
            "inspection_finding" => RemovalReason::InspectionFinding,
            "sb_or_modification" | "sb/modification" | "sb_or_mod" => {
                RemovalReason::SbOrModification
            }
            _ => RemovalReason::Other(text.trim().to_string()),
        }
    }

    pub fn is_unscheduled_failure(&self) -> bool {
        matches!(self, RemovalReason::UnscheduledFailure)
    }
}

impl fmt::Display for RemovalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Component identity, resolved once at normalization time.
///
/// Newer data carries a component code; older vintages only name the part.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "by", content = "value", rename_all = "snake_case")]
pub enum ComponentIdentity {
    ByCode(String),
    ByName(String),
}

impl ComponentIdentity {
    /// Resolve identity from a (possibly placeholder) code and a name
    pub fn resolve(code: Option<&str>, name: &str) -> Self {
        match code.map(str::trim).filter(|c| !is_placeholder_code(c)) {
            Some(code) => ComponentIdentity::ByCode(code.to_string()),
            None => ComponentIdentity::ByName(name.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ComponentIdentity::ByCode(code) => code,
            ComponentIdentity::ByName(name) => name,
        }
    }
}

impl fmt::Display for ComponentIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// True for empty codes and the placeholders spreadsheets leave behind
pub fn is_placeholder_code(code: &str) -> bool {
    matches!(
        code.trim().to_lowercase().as_str(),
        "" | "n/a" | "na" | "nan" | "none" | "null" | "-"
    )
}

/// Where a canonical record came from (file and 1-based line incl. header)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRef {
    pub source: String,
    pub line: usize,
}

impl fmt::Display for RowRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source, self.line)
    }
}

/// A canonical removal event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemovalEvent {
    pub aircraft_reg: String,

    /// Component code; `None` when absent or a placeholder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_code: Option<String>,

    pub component_name: String,
    pub part_number: String,

    /// Identifies the physical unit together with identity and aircraft
    pub serial_number: String,

    pub ata_chapter: String,
    pub category: String,
    pub criticality: String,
    pub removal_date: NaiveDate,

    /// Aircraft flight hours at removal
    pub aircraft_fh: f64,

    /// Aircraft flight cycles at removal
    pub aircraft_fc: u32,

    /// Legacy free-text classification (e.g. "Unscheduled")
    pub removal_type: String,

    pub removal_reason: RemovalReason,
    pub station: String,
    pub remarks: String,

    pub identity: ComponentIdentity,

    /// Canonical failure flag, see [`is_unscheduled_failure`]
    pub unscheduled: bool,

    pub row: RowRef,
}

/// The single failure predicate used everywhere downstream.
///
/// A removal counts as a failure when its reason is Unscheduled Failure or
/// its legacy removal type reads "Unscheduled".
pub fn is_unscheduled_failure(reason: &RemovalReason, removal_type: &str) -> bool {
    reason.is_unscheduled_failure() || removal_type.trim().eq_ignore_ascii_case("unscheduled")
}
