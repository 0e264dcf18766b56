//! Spares forecast - expected failures over a fleet-hours horizon

use serde::Serialize;

use crate::core::reliability::{round_to, GroupKey, ReliabilityRecord};

/// Expected failures for one reliability group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastRecord {
    pub key: GroupKey,
    pub label: String,
    pub mtbf_fh: f64,
    pub horizon_fh: f64,
    /// `horizon / mtbf`, rounded to 2 decimals
    pub expected_failures: f64,
}

/// Project expected failures for every record over `horizon_fh` fleet hours.
///
/// Returns an empty list for a non-positive or non-finite horizon. Records
/// with a non-positive MTBF are skipped. Sorted by expected failures, highest
/// first, ties by key.
pub fn forecast(records: &[ReliabilityRecord], horizon_fh: f64) -> Vec<ForecastRecord> {
    if !horizon_fh.is_finite() || horizon_fh <= 0.0 {
        return Vec::new();
    }

    let mut out: Vec<ForecastRecord> = records
        .iter()
        .filter(|r| r.mtbf_fh.is_finite() && r.mtbf_fh > 0.0)
        .map(|r| ForecastRecord {
            key: r.key.clone(),
            label: r.label.clone(),
            mtbf_fh: r.mtbf_fh,
            horizon_fh,
            expected_failures: round_to(horizon_fh / r.mtbf_fh, 2),
        })
        .collect();

    out.sort_by(|a, b| {
        b.expected_failures
            .total_cmp(&a.expected_failures)
            .then_with(|| a.key.cmp(&b.key))
    });
    out
}

/// Sum of expected failures, the spares total for the horizon
pub fn total_expected(forecast: &[ForecastRecord]) -> f64 {
    round_to(forecast.iter().map(|f| f.expected_failures).sum(), 2)
}
