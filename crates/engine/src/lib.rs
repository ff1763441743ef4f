//! # AgriZone Engine
//!
//! Management-zone engine for vegetation-index imagery.
//!
//! ## Modules
//!
//! - **cluster**: clustering primitives on scalar samples (k-means,
//!   DBSCAN, mean-shift, GMM)
//! - **zoning**: the decision engine — sample extraction, strategy
//!   selection with deterministic fallback, pixel-level zone labeling,
//!   zone descriptions
//! - **agronomy**: crop tables, recommendations, report generation

pub mod agronomy;
pub mod cluster;
pub mod zoning;

pub(crate) mod maybe_rayon;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::agronomy::{
        generate_recommendations, generate_report, AnalysisMetadata, Crop, RainfallSummary,
    };
    pub use crate::zoning::{
        perform_clustering, zone_descriptions, ClusterMethod, ClusterParams, Zoning, ZoningResult,
        FALLBACK_ZONES, SAMPLE_SCALE,
    };
    pub use agrizone_core::prelude::*;
}
