//! K-means clustering on scalar samples
//!
//! One-dimensional k-means over index readings. The trained model doubles
//! as the workspace's only [`PixelPartitioner`]: whatever discovery
//! algorithm chose the zone count, the pixel-level zone map always comes
//! from a k-means partition applied to the whole raster.

use agrizone_core::raster::Raster;
use agrizone_core::{Error, PixelPartitioner, Result};
use ndarray::Array2;

use crate::maybe_rayon::*;

/// Parameters for K-means clustering
#[derive(Debug, Clone)]
pub struct KmeansParams {
    /// Maximum iterations (default: 100)
    pub max_iterations: usize,
    /// Convergence threshold — stop when centroids move less than this (default: 1e-4)
    pub convergence: f64,
}

impl Default for KmeansParams {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            convergence: 1e-4,
        }
    }
}

/// A trained k-means partition over scalar values.
///
/// Centroids are sorted ascending, so label 0 is always the
/// lowest-value (lowest vigor) cluster.
#[derive(Debug, Clone)]
pub struct KmeansModel {
    centroids: Vec<f64>,
}

impl KmeansModel {
    /// Number of clusters
    pub fn k(&self) -> usize {
        self.centroids.len()
    }

    /// Cluster centroids, ascending
    pub fn centroids(&self) -> &[f64] {
        &self.centroids
    }

    /// Label of the nearest centroid
    pub fn predict(&self, value: f64) -> usize {
        let mut best_dist = f64::INFINITY;
        let mut best_k = 0;
        for (k, &centroid) in self.centroids.iter().enumerate() {
            let dist = (value - centroid).abs();
            if dist < best_dist {
                best_dist = dist;
                best_k = k;
            }
        }
        best_k
    }
}

/// Fit a k-way k-means partition on scalar samples.
///
/// Initialization is deterministic: centroids are seeded at evenly spaced
/// quantiles of the sample distribution, then refined by Lloyd iterations.
pub fn fit(samples: &[f64], k: usize, params: &KmeansParams) -> Result<KmeansModel> {
    if k < 1 {
        return Err(Error::InvalidParameter {
            name: "k",
            value: k.to_string(),
            reason: "must be >= 1".into(),
        });
    }
    if samples.len() < k {
        return Err(Error::Algorithm(format!(
            "Not enough samples ({}) for {} clusters",
            samples.len(),
            k
        )));
    }

    let mut centroids = initialize_centroids(samples, k);
    let mut labels = vec![0usize; samples.len()];

    for _iter in 0..params.max_iterations {
        // Assignment step
        for (i, &val) in samples.iter().enumerate() {
            let mut best_dist = f64::INFINITY;
            let mut best_k = 0;
            for (c, &centroid) in centroids.iter().enumerate() {
                let dist = (val - centroid).abs();
                if dist < best_dist {
                    best_dist = dist;
                    best_k = c;
                }
            }
            labels[i] = best_k;
        }

        // Update step
        let mut sums = vec![0.0; k];
        let mut counts = vec![0usize; k];
        for (i, &val) in samples.iter().enumerate() {
            sums[labels[i]] += val;
            counts[labels[i]] += 1;
        }

        let mut max_shift = 0.0_f64;
        for c in 0..k {
            if counts[c] > 0 {
                let new_centroid = sums[c] / counts[c] as f64;
                max_shift = max_shift.max((new_centroid - centroids[c]).abs());
                centroids[c] = new_centroid;
            }
            // Empty clusters keep their centroid
        }

        if max_shift < params.convergence {
            break;
        }
    }

    centroids.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    Ok(KmeansModel { centroids })
}

/// Initialize centroids by evenly spaced quantiles (deterministic)
fn initialize_centroids(samples: &[f64], k: usize) -> Vec<f64> {
    let mut sorted: Vec<f64> = samples.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len();
    (0..k)
        .map(|i| {
            let idx = (i * n / k) + n / (2 * k);
            sorted[idx.min(n - 1)]
        })
        .collect()
}

/// The k-means partitioning primitive.
///
/// Training runs [`fit`]; application labels every finite pixel with its
/// nearest-centroid cluster. Nodata pixels get the sentinel −1.
#[derive(Debug, Clone, Default)]
pub struct KmeansPartitioner {
    pub params: KmeansParams,
}

impl PixelPartitioner for KmeansPartitioner {
    type Model = KmeansModel;

    fn train(&self, samples: &[f64], k: usize) -> Result<KmeansModel> {
        fit(samples, k, &self.params)
    }

    fn apply(&self, raster: &Raster<f64>, model: &KmeansModel) -> Result<Raster<i32>> {
        let (rows, cols) = raster.shape();

        let data: Vec<i32> = (0..rows)
            .into_par_iter()
            .flat_map(|row| {
                let mut row_data = vec![-1i32; cols];
                for col in 0..cols {
                    let v = unsafe { raster.get_unchecked(row, col) };
                    if raster.is_nodata(v) || !v.is_finite() {
                        continue;
                    }
                    row_data[col] = model.predict(v) as i32;
                }
                row_data
            })
            .collect();

        let mut output = raster.with_same_meta::<i32>();
        output.set_nodata(Some(-1));
        *output.data_mut() = Array2::from_shape_vec((rows, cols), data)
            .map_err(|e| Error::Other(e.to_string()))?;

        Ok(output)
    }
}
