//! Textual analysis report

use std::fmt::Write;

use agrizone_core::RegionStats;
use chrono::Local;
use serde::Serialize;

use crate::zoning::ZoningResult;

/// Request parameters echoed into the report header
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisMetadata {
    pub latitude: f64,
    pub longitude: f64,
    /// Field radius in metres
    pub buffer_size: f64,
    pub start_date: String,
    pub end_date: String,
    pub clustering_method: String,
}

/// Generate the full field analysis report
pub fn generate_report(
    stats: &RegionStats,
    zoning: &ZoningResult,
    recommendations: &[String],
    metadata: &AnalysisMetadata,
) -> String {
    let mut report = String::new();

    let _ = write!(
        report,
        "\
Field Analysis Report
=====================
Date Generated: {}

Location Information:
- Latitude: {:.6}
- Longitude: {:.6}
- Field Radius: {} meters

Analysis Parameters:
- Analysis Period: {} to {}
- Clustering Method: {}

NDVI Statistics:
- Mean NDVI: {}
- Standard Deviation: {}
- Minimum NDVI: {}
- Maximum NDVI: {}

Management Zones:
- Number of Zones: {}
- Clustering Method: {}

Recommendations:
",
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        metadata.latitude,
        metadata.longitude,
        metadata.buffer_size,
        metadata.start_date,
        metadata.end_date,
        metadata.clustering_method,
        stats.mean,
        stats.std_dev,
        stats.min,
        stats.max,
        zoning.zone_count,
        zoning.method,
    );

    for (i, rec) in recommendations.iter().enumerate() {
        let _ = writeln!(report, "{}. {}", i + 1, rec);
    }

    report.push_str(
        "
Management Guidelines:
1. Ground-truth the zones with field visits
2. Take soil samples from each management zone
3. Develop variable rate prescription maps for inputs
4. Monitor changes in NDVI over time to assess management effectiveness
5. Adjust irrigation scheduling based on rainfall patterns

Note: This analysis is based on remote sensing data and should be verified with field observations.
",
    );

    report
}
