//! DBSCAN density clustering on scalar samples
//!
//! Classic DBSCAN specialized to one-dimensional data: after sorting,
//! every eps-neighborhood is a contiguous range, so region queries are
//! two binary searches instead of a pairwise distance scan.

use agrizone_core::{Error, Result};

/// Sentinel label for noise points
pub const NOISE: i32 = -1;

/// Parameters for DBSCAN
#[derive(Debug, Clone)]
pub struct DbscanParams {
    /// Neighborhood radius
    pub eps: f64,
    /// Minimum points (including the query point) for a core point
    pub min_samples: usize,
}

impl Default for DbscanParams {
    fn default() -> Self {
        Self {
            eps: 0.05,
            min_samples: 5,
        }
    }
}

/// Run DBSCAN and return one label per sample.
///
/// Labels are consecutive non-negative integers in discovery order;
/// noise points get [`NOISE`] (−1).
pub fn fit_predict(samples: &[f64], params: &DbscanParams) -> Result<Vec<i32>> {
    if params.eps <= 0.0 {
        return Err(Error::InvalidParameter {
            name: "eps",
            value: params.eps.to_string(),
            reason: "must be positive".into(),
        });
    }
    if params.min_samples < 1 {
        return Err(Error::InvalidParameter {
            name: "min_samples",
            value: params.min_samples.to_string(),
            reason: "must be >= 1".into(),
        });
    }

    let n = samples.len();
    let mut labels = vec![NOISE; n];
    if n == 0 {
        return Ok(labels);
    }

    // Sort once; neighborhoods become index ranges in `order`.
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        samples[a]
            .partial_cmp(&samples[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let sorted: Vec<f64> = order.iter().map(|&i| samples[i]).collect();

    // Positions in `sorted` (inclusive..exclusive) within eps of sorted[pos]
    let neighbors = |pos: usize| -> (usize, usize) {
        let v = sorted[pos];
        let lo = sorted.partition_point(|&x| x < v - params.eps);
        let hi = sorted.partition_point(|&x| x <= v + params.eps);
        (lo, hi)
    };

    let mut visited = vec![false; n];
    let mut cluster = 0i32;

    for pos in 0..n {
        if visited[pos] {
            continue;
        }
        visited[pos] = true;

        let (lo, hi) = neighbors(pos);
        if hi - lo < params.min_samples {
            continue; // Noise (may later be absorbed as a border point)
        }

        labels[order[pos]] = cluster;
        let mut queue: Vec<usize> = (lo..hi).filter(|&p| p != pos).collect();

        while let Some(p) = queue.pop() {
            if labels[order[p]] == NOISE {
                labels[order[p]] = cluster; // Border or core point
            }
            if visited[p] {
                continue;
            }
            visited[p] = true;

            let (plo, phi) = neighbors(p);
            if phi - plo >= params.min_samples {
                queue.extend(plo..phi);
            }
        }

        cluster += 1;
    }

    Ok(labels)
}

/// Number of clusters discovered, excluding the noise label
pub fn distinct_clusters(labels: &[i32]) -> usize {
    let mut ids: Vec<i32> = labels.iter().copied().filter(|&l| l != NOISE).collect();
    ids.sort_unstable();
    ids.dedup();
    ids.len()
}

/// Number of noise points
pub fn noise_count(labels: &[i32]) -> usize {
    labels.iter().filter(|&&l| l == NOISE).count()
}
