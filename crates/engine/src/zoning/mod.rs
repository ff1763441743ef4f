//! Zoning engine
//!
//! Extract → discover → validate → label: the pipeline that turns an
//! NDVI raster and a field geometry into a pixel-level management-zone
//! map with metadata.

pub mod descriptions;
pub mod labeler;
pub mod sampler;
pub mod selector;

pub use descriptions::zone_descriptions;
pub use labeler::label;
pub use sampler::{extract, SAMPLE_SCALE};
pub use selector::{
    perform_clustering, ClusterMethod, ClusterParams, Zoning, ZoningResult, FALLBACK_ZONES,
};
