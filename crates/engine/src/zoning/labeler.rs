//! Zone labeling
//!
//! Produces the pixel-level zone map. Whatever discovery algorithm chose
//! the zone count, the final raster partition always comes from the
//! k-means partitioning primitive, because that is the only primitive
//! with a whole-raster apply operation. Cluster quality is validated by
//! the selector, not here.

use agrizone_core::{Error, FieldGeometry, ImageryProvider, PixelPartitioner, Raster, Result};

use crate::cluster::KmeansPartitioner;
use crate::zoning::sampler::{self, SAMPLE_SCALE};

/// Label every pixel of the raster with a zone id in `[0, zone_count-1]`.
///
/// Trains the partitioner on the sample extracted from the geometry at
/// the fixed pipeline scale, then applies it to the full raster.
/// Nodata pixels get −1.
pub fn label<P: ImageryProvider>(
    provider: &P,
    raster: &Raster<f64>,
    geometry: &FieldGeometry,
    zone_count: usize,
) -> Result<Raster<i32>> {
    if zone_count < 1 {
        return Err(Error::InvalidParameter {
            name: "zone_count",
            value: zone_count.to_string(),
            reason: "must be >= 1".into(),
        });
    }

    let samples = sampler::extract(provider, raster, geometry, SAMPLE_SCALE)?;
    if samples.is_empty() {
        return Err(Error::EmptySample);
    }

    let partitioner = KmeansPartitioner::default();
    let model = partitioner.train(&samples, zone_count)?;
    partitioner.apply(raster, &model)
}
