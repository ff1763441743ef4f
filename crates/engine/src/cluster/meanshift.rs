//! Mean-shift clustering on scalar samples
//!
//! Bin-seeded mean-shift with a flat kernel: seeds start at the occupied
//! bandwidth-wide bins, each seed climbs to the mean of the samples within
//! one bandwidth until it stops moving, then modes closer than one
//! bandwidth are merged. Every sample is assigned to its nearest mode —
//! mean-shift produces no noise label.

use agrizone_core::{Error, Result};

/// Parameters for mean-shift
#[derive(Debug, Clone)]
pub struct MeanShiftParams {
    /// Kernel width
    pub bandwidth: f64,
    /// Maximum mode-seeking iterations per seed (default: 300)
    pub max_iterations: usize,
}

impl Default for MeanShiftParams {
    fn default() -> Self {
        Self {
            bandwidth: 0.1,
            max_iterations: 300,
        }
    }
}

/// Run mean-shift and return one label per sample.
///
/// Labels are indices into the discovered modes, ordered by ascending
/// mode value.
pub fn fit_predict(samples: &[f64], params: &MeanShiftParams) -> Result<Vec<i32>> {
    if params.bandwidth <= 0.0 {
        return Err(Error::InvalidParameter {
            name: "bandwidth",
            value: params.bandwidth.to_string(),
            reason: "must be positive".into(),
        });
    }
    if samples.is_empty() {
        return Err(Error::Algorithm("Mean-shift requires samples".into()));
    }

    let bw = params.bandwidth;

    let mut sorted: Vec<f64> = samples.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    // Bin seeding: one seed per occupied bandwidth-wide bin
    let mut seeds: Vec<f64> = Vec::new();
    for &v in &sorted {
        let bin = (v / bw).floor() * bw + bw / 2.0;
        if seeds.last().map_or(true, |&s| (s - bin).abs() > bw * 1e-9) {
            seeds.push(bin);
        }
    }

    // Mode seeking: shift each seed to the mean of samples within bandwidth
    let stop_thresh = bw * 1e-3;
    let mut modes: Vec<f64> = Vec::new();
    for &seed in &seeds {
        let mut m = seed;
        for _iter in 0..params.max_iterations {
            let lo = sorted.partition_point(|&x| x < m - bw);
            let hi = sorted.partition_point(|&x| x <= m + bw);
            if lo == hi {
                break; // Empty window, seed dies
            }
            let mean = sorted[lo..hi].iter().sum::<f64>() / (hi - lo) as f64;
            let shift = (mean - m).abs();
            m = mean;
            if shift < stop_thresh {
                modes.push(m);
                break;
            }
        }
    }

    if modes.is_empty() {
        return Err(Error::Algorithm("Mean-shift found no modes".into()));
    }

    // Merge modes closer than one bandwidth
    modes.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mut merged: Vec<f64> = vec![modes[0]];
    for &m in &modes[1..] {
        if (m - merged.last().unwrap()).abs() > bw {
            merged.push(m);
        }
    }

    // Assign every sample to its nearest mode
    let labels = samples
        .iter()
        .map(|&v| {
            let mut best = 0usize;
            let mut best_dist = f64::INFINITY;
            for (i, &m) in merged.iter().enumerate() {
                let d = (v - m).abs();
                if d < best_dist {
                    best_dist = d;
                    best = i;
                }
            }
            best as i32
        })
        .collect();

    Ok(labels)
}

/// Number of distinct labels produced
pub fn distinct_clusters(labels: &[i32]) -> usize {
    let mut ids: Vec<i32> = labels.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_separated_groups() {
        let mut samples = Vec::new();
        for i in 0..30 {
            samples.push(0.2 + i as f64 * 0.001);
            samples.push(0.8 + i as f64 * 0.001);
        }
        let labels = fit_predict(
            &samples,
            &MeanShiftParams {
                bandwidth: 0.1,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(distinct_clusters(&labels), 2);
        // Modes are value-ordered: low group gets label 0
        assert_eq!(labels[0], 0);
        assert_eq!(labels[1], 1);
    }

    #[test]
    fn test_wide_bandwidth_collapses_to_one() {
        let samples: Vec<f64> = (0..40).map(|i| 0.3 + i as f64 * 0.005).collect();
        let labels = fit_predict(
            &samples,
            &MeanShiftParams {
                bandwidth: 1.0,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(distinct_clusters(&labels), 1);
    }

    #[test]
    fn test_invalid_bandwidth() {
        assert!(fit_predict(
            &[0.5],
            &MeanShiftParams {
                bandwidth: -1.0,
                ..Default::default()
            }
        )
        .is_err());
    }

    #[test]
    fn test_empty_samples() {
        assert!(fit_predict(&[], &MeanShiftParams::default()).is_err());
    }
}
