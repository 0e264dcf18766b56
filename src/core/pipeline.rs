//! Pipeline - normalize, filter, compute MTBF and forecast in one call

use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info};

use crate::core::forecast::{forecast, ForecastRecord};
use crate::core::reliability::{self, Grouping, ReliabilityTable, SortOrder};
use crate::entities::{ComponentReference, RemovalEvent};
use crate::schema::{Normalizer, RawTable, SchemaError, ValidationIssue};

/// Default forecast horizon in fleet flight hours
pub const DEFAULT_HORIZON_FH: f64 = 1000.0;

/// Restricts which canonical events reach the engine
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    /// Aircraft registrations (case-insensitive); empty means all
    pub aircraft: Vec<String>,
    /// ATA chapters; `32` also matches sub-chapters such as `32-40`
    pub ata: Vec<String>,
}

impl EventFilter {
    pub fn is_empty(&self) -> bool {
        self.aircraft.is_empty() && self.ata.is_empty()
    }

    pub fn matches(&self, event: &RemovalEvent) -> bool {
        let aircraft_ok = self.aircraft.is_empty()
            || self
                .aircraft
                .iter()
                .any(|reg| reg.trim().eq_ignore_ascii_case(&event.aircraft_reg));

        let ata_ok = self.ata.is_empty()
            || self.ata.iter().any(|chapter| {
                let chapter = chapter.trim();
                event.ata_chapter == chapter
                    || event
                        .ata_chapter
                        .strip_prefix(chapter)
                        .is_some_and(|rest| rest.starts_with('-'))
            });

        aircraft_ok && ata_ok
    }
}

/// Parameters of one pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineParams {
    pub fleet_hours_horizon: f64,
    /// Which reliability table feeds the forecast
    pub forecast_basis: Grouping,
    /// Display truncation of the returned tables; never changes values
    pub top_n: Option<usize>,
    pub order: SortOrder,
    pub filter: EventFilter,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            fleet_hours_horizon: DEFAULT_HORIZON_FH,
            forecast_basis: Grouping::Component,
            top_n: None,
            order: SortOrder::WorstFirst,
            filter: EventFilter::default(),
        }
    }
}

/// Everything a pipeline run produces
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    /// Valid canonical events that passed the filter
    pub events: Vec<RemovalEvent>,
    pub issues: Vec<ValidationIssue>,
    pub rows_read: usize,
    pub unmapped_components: usize,
    /// Valid events excluded by the filter
    pub filtered_out: usize,
    pub by_component: ReliabilityTable,
    pub by_ata: ReliabilityTable,
    pub forecast: Vec<ForecastRecord>,
    pub horizon_fh: f64,
}

/// Dashboard headline figures
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub rows_read: usize,
    pub total_records: usize,
    pub rejected_rows: usize,
    pub unscheduled_failures: usize,
    pub distinct_components: usize,
    pub distinct_aircraft: usize,
    /// Physical units with two or more failure removals
    pub repeat_failure_units: usize,
    pub dropped_non_increasing: usize,
    pub unmapped_components: usize,
}

impl PipelineOutput {
    /// Table for a grouping
    pub fn table(&self, grouping: Grouping) -> &ReliabilityTable {
        match grouping {
            Grouping::Component => &self.by_component,
            Grouping::Ata => &self.by_ata,
        }
    }

    pub fn summary(&self) -> Summary {
        let distinct_components: HashSet<_> = self.events.iter().map(|e| &e.identity).collect();
        let distinct_aircraft: HashSet<_> = self.events.iter().map(|e| &e.aircraft_reg).collect();
        let diagnostics = self.by_component.diagnostics;

        Summary {
            rows_read: self.rows_read,
            total_records: self.events.len(),
            rejected_rows: self.issues_rows(),
            unscheduled_failures: diagnostics.failure_events,
            distinct_components: distinct_components.len(),
            distinct_aircraft: distinct_aircraft.len(),
            repeat_failure_units: diagnostics.units - diagnostics.single_removal_units,
            dropped_non_increasing: diagnostics.dropped_non_increasing,
            unmapped_components: self.unmapped_components,
        }
    }

    /// Rows that produced at least one validation issue
    fn issues_rows(&self) -> usize {
        self.issues
            .iter()
            .map(|i| (&i.row.source, i.row.line))
            .collect::<HashSet<_>>()
            .len()
    }
}

/// Chains normalizer, reliability engine and forecast
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    date_formats: Vec<String>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extra removal date formats passed to the normalizer
    pub fn with_date_formats(mut self, formats: Vec<String>) -> Self {
        self.date_formats = formats;
        self
    }

    /// Run the full computation.
    ///
    /// A schema error in any raw table aborts the run. Row-level issues are
    /// returned in the output alongside the computed tables.
    pub fn run(
        &self,
        raw_events: &[RawTable],
        references: &[ComponentReference],
        params: &PipelineParams,
    ) -> Result<PipelineOutput, SchemaError> {
        let batch = Normalizer::new()
            .with_references(references)
            .with_date_formats(self.date_formats.clone())
            .normalize_all(raw_events)?;

        let valid = batch.events.len();
        let events: Vec<RemovalEvent> = if params.filter.is_empty() {
            batch.events
        } else {
            batch
                .events
                .into_iter()
                .filter(|e| params.filter.matches(e))
                .collect()
        };
        let filtered_out = valid - events.len();
        if filtered_out > 0 {
            debug!(filtered_out, remaining = events.len(), "applied event filter");
        }

        let mut by_component = reliability::mtbf_by_component(&events);
        let mut by_ata = reliability::mtbf_by_ata(&events);

        // Forecast from the full table, before any display truncation
        let basis = match params.forecast_basis {
            Grouping::Component => &by_component,
            Grouping::Ata => &by_ata,
        };
        let mut projected = forecast(&basis.records, params.fleet_hours_horizon);

        for table in [&mut by_component, &mut by_ata] {
            table.sort(params.order);
            if let Some(n) = params.top_n {
                table.truncate(n);
            }
        }
        if let Some(n) = params.top_n {
            projected.truncate(n);
        }

        info!(
            rows = batch.rows_read,
            events = events.len(),
            issues = batch.issues.len(),
            components = by_component.len(),
            chapters = by_ata.len(),
            "reliability pipeline complete"
        );

        Ok(PipelineOutput {
            events,
            issues: batch.issues,
            rows_read: batch.rows_read,
            unmapped_components: batch.unmapped_components,
            filtered_out,
            by_component,
            by_ata,
            forecast: projected,
            horizon_fh: params.fleet_hours_horizon,
        })
    }
}
