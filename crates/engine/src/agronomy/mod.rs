//! Agronomic context and reporting
//!
//! Crop lookup tables, rainfall summaries, recommendation generation and
//! the textual analysis report.

pub mod crop;
pub mod rainfall;
pub mod recommend;
pub mod report;

pub use crop::Crop;
pub use rainfall::RainfallSummary;
pub use recommend::{generate_recommendations, VARIABLE_RATE_MIN_ZONES};
pub use report::{generate_report, AnalysisMetadata};
