//! Imagery provider interfaces
//!
//! The zoning engine never touches pixels directly; it goes through the
//! traits in this module. In production these would be backed by a remote
//! imagery service. [`GridProvider`] is the in-memory implementation used
//! by the CLI and the test suite: it samples a raster that has already
//! been loaded (e.g. a median NDVI composite read from GeoTIFF).

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::FieldGeometry;
use crate::raster::Raster;

/// One raw sampled point. `value` is `None` where the reading was
/// nodata/undefined for the target band.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleRecord {
    pub x: f64,
    pub y: f64,
    pub value: Option<f64>,
}

/// Reduced statistics over a region, rounded to 3 decimals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionStats {
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// Source of per-pixel vegetation-index readings.
///
/// `scale` is a spatial resolution in geographic units (10 for the usual
/// Sentinel-2 10 m sampling). Each provider call is treated as blocking
/// and fallible; errors propagate to the caller unless a fallback path
/// explicitly catches them.
pub trait ImageryProvider {
    /// Sample the raster at the given geometry and resolution.
    ///
    /// Returns one record per queried point, including records whose
    /// reading is missing. May return an empty vector.
    fn sample(
        &self,
        raster: &Raster<f64>,
        geometry: &FieldGeometry,
        scale: f64,
    ) -> Result<Vec<SampleRecord>>;

    /// Reduce the raster over the geometry to mean/stdDev/min/max
    fn reduce(
        &self,
        raster: &Raster<f64>,
        geometry: &FieldGeometry,
        scale: f64,
    ) -> Result<RegionStats>;
}

/// Partitioning primitive that supports whole-raster application.
///
/// Only one such primitive exists (a k-means-style partitioner); it is
/// called uniformly for visualization regardless of which discovery
/// algorithm chose the zone count.
pub trait PixelPartitioner {
    /// Trained partition function
    type Model;

    /// Train a `k`-way partition on scalar samples
    fn train(&self, samples: &[f64], k: usize) -> Result<Self::Model>;

    /// Apply a trained partition to every pixel of the raster.
    ///
    /// Output values are zone labels in `[0, k-1]`; nodata pixels get −1.
    fn apply(&self, raster: &Raster<f64>, model: &Self::Model) -> Result<Raster<i32>>;
}

/// In-memory provider over a raster grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridProvider;

impl GridProvider {
    pub fn new() -> Self {
        Self
    }

    /// Pixel stride corresponding to a sampling scale
    fn stride(raster: &Raster<f64>, scale: f64) -> usize {
        let cell = raster.cell_size();
        if cell <= 0.0 {
            return 1;
        }
        ((scale / cell).round() as usize).max(1)
    }
}

impl ImageryProvider for GridProvider {
    fn sample(
        &self,
        raster: &Raster<f64>,
        geometry: &FieldGeometry,
        scale: f64,
    ) -> Result<Vec<SampleRecord>> {
        let step = Self::stride(raster, scale);
        let (rows, cols) = raster.shape();

        let mut records = Vec::new();
        for row in (0..rows).step_by(step) {
            for col in (0..cols).step_by(step) {
                let (x, y) = raster.pixel_to_geo(col, row);
                if !geometry.contains(x, y) {
                    continue;
                }
                let v = unsafe { raster.get_unchecked(row, col) };
                let value = if raster.is_nodata(v) || !v.is_finite() {
                    None
                } else {
                    Some(v)
                };
                records.push(SampleRecord { x, y, value });
            }
        }

        Ok(records)
    }

    fn reduce(
        &self,
        raster: &Raster<f64>,
        geometry: &FieldGeometry,
        scale: f64,
    ) -> Result<RegionStats> {
        let values: Vec<f64> = self
            .sample(raster, geometry, scale)?
            .into_iter()
            .filter_map(|r| r.value)
            .collect();

        if values.is_empty() {
            return Err(Error::EmptySample);
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        Ok(RegionStats {
            mean: round3(mean),
            std_dev: round3(variance.sqrt()),
            min: round3(min),
            max: round3(max),
        })
    }
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}
