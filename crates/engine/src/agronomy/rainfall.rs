//! Rainfall summary statistics

use serde::Serialize;

/// Reduced precipitation statistics over the analysis period, in mm
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RainfallSummary {
    pub total: f64,
    pub average: f64,
    pub maximum: f64,
}

impl RainfallSummary {
    /// Summarize a daily precipitation series. Empty series → all zeros.
    pub fn from_series(series: &[f64]) -> Self {
        if series.is_empty() {
            return Self {
                total: 0.0,
                average: 0.0,
                maximum: 0.0,
            };
        }
        let total: f64 = series.iter().sum();
        Self {
            total,
            average: total / series.len() as f64,
            maximum: series.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
        }
    }
}
