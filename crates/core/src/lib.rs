//! # AgriZone Core
//!
//! Core types and interfaces for the AgriZone field-segmentation engine.
//!
//! This crate provides:
//! - `Raster<T>`: generic georeferenced raster grid
//! - `GeoTransform`: affine transformation for georeferencing
//! - `FieldGeometry`: point + radius field region
//! - Provider traits decoupling the engine from the imagery source
//! - Native GeoTIFF I/O

pub mod error;
pub mod geometry;
pub mod io;
pub mod provider;
pub mod raster;

pub use error::{Error, Result};
pub use geometry::FieldGeometry;
pub use provider::{GridProvider, ImageryProvider, PixelPartitioner, RegionStats, SampleRecord};
pub use raster::{GeoTransform, Raster, RasterElement};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::geometry::FieldGeometry;
    pub use crate::provider::{
        GridProvider, ImageryProvider, PixelPartitioner, RegionStats, SampleRecord,
    };
    pub use crate::raster::{GeoTransform, Raster, RasterElement};
}
