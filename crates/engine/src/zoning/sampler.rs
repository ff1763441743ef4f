//! Sample extraction
//!
//! Turns a raster + geometry into the finite ordered sequence of scalar
//! index readings the discovery algorithms run on. Pure filtering; a
//! provider failure propagates to the caller.

use agrizone_core::{FieldGeometry, ImageryProvider, Raster, Result};

/// Sampling resolution used throughout the zoning pipeline
/// (10 geographic units, the native Sentinel-2 NDVI resolution).
pub const SAMPLE_SCALE: f64 = 10.0;

/// Extract the valid scalar readings inside the geometry.
///
/// Null/missing readings are dropped. The result may be empty;
/// callers must handle that case.
pub fn extract<P: ImageryProvider>(
    provider: &P,
    raster: &Raster<f64>,
    geometry: &FieldGeometry,
    scale: f64,
) -> Result<Vec<f64>> {
    let records = provider.sample(raster, geometry, scale)?;
    Ok(records
        .into_iter()
        .filter_map(|r| r.value)
        .filter(|v| v.is_finite())
        .collect())
}
