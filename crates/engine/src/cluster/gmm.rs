//! Gaussian mixture model on scalar samples
//!
//! One-dimensional mixture fit by expectation-maximization. Initialization
//! is deterministic (quantile-spaced means), matching the fixed-seed
//! behavior the zoning engine expects from a mixture fit.

use agrizone_core::{Error, Result};

/// Parameters for GMM fitting
#[derive(Debug, Clone)]
pub struct GmmParams {
    /// Maximum EM iterations (default: 100)
    pub max_iterations: usize,
    /// Log-likelihood convergence tolerance (default: 1e-6)
    pub tol: f64,
}

impl Default for GmmParams {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tol: 1e-6,
        }
    }
}

/// A fitted 1-D Gaussian mixture
#[derive(Debug, Clone)]
pub struct GmmModel {
    pub means: Vec<f64>,
    pub variances: Vec<f64>,
    pub weights: Vec<f64>,
}

impl GmmModel {
    /// Number of components
    pub fn n_components(&self) -> usize {
        self.means.len()
    }

    /// Hard assignment: component with maximum responsibility
    pub fn predict(&self, value: f64) -> usize {
        let mut best = 0;
        let mut best_p = f64::NEG_INFINITY;
        for c in 0..self.means.len() {
            let p = self.weights[c].ln() + log_gaussian(value, self.means[c], self.variances[c]);
            if p > best_p {
                best_p = p;
                best = c;
            }
        }
        best
    }
}

// Variances are floored so a component collapsing onto identical
// samples keeps the densities finite.
const VARIANCE_FLOOR: f64 = 1e-6;

fn log_gaussian(x: f64, mean: f64, variance: f64) -> f64 {
    let d = x - mean;
    -0.5 * (d * d / variance + variance.ln() + (2.0 * std::f64::consts::PI).ln())
}

/// Fit a Gaussian mixture by EM
pub fn fit(samples: &[f64], n_components: usize, params: &GmmParams) -> Result<GmmModel> {
    if n_components < 1 {
        return Err(Error::InvalidParameter {
            name: "n_components",
            value: n_components.to_string(),
            reason: "must be >= 1".into(),
        });
    }
    if samples.len() < n_components {
        return Err(Error::Algorithm(format!(
            "Not enough samples ({}) for {} mixture components",
            samples.len(),
            n_components
        )));
    }

    let n = samples.len();
    let k = n_components;

    // Deterministic init: quantile-spaced means, global variance, uniform weights
    let mut sorted: Vec<f64> = samples.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let global_mean = sorted.iter().sum::<f64>() / n as f64;
    let global_var = (sorted.iter().map(|v| (v - global_mean).powi(2)).sum::<f64>() / n as f64)
        .max(VARIANCE_FLOOR);

    let mut means: Vec<f64> = (0..k)
        .map(|i| sorted[((i * n / k) + n / (2 * k)).min(n - 1)])
        .collect();
    let mut variances = vec![global_var; k];
    let mut weights = vec![1.0 / k as f64; k];

    let mut responsibilities = vec![0.0; n * k];
    let mut prev_ll = f64::NEG_INFINITY;

    for _iter in 0..params.max_iterations {
        // E step
        let mut ll = 0.0;
        for (i, &x) in samples.iter().enumerate() {
            let mut row_max = f64::NEG_INFINITY;
            let logs: Vec<f64> = (0..k)
                .map(|c| {
                    let lp = weights[c].ln() + log_gaussian(x, means[c], variances[c]);
                    row_max = row_max.max(lp);
                    lp
                })
                .collect();
            // log-sum-exp for numerical stability
            let sum: f64 = logs.iter().map(|&lp| (lp - row_max).exp()).sum();
            let log_norm = row_max + sum.ln();
            ll += log_norm;
            for c in 0..k {
                responsibilities[i * k + c] = (logs[c] - log_norm).exp();
            }
        }

        // M step
        for c in 0..k {
            let resp_sum: f64 = (0..n).map(|i| responsibilities[i * k + c]).sum();
            if resp_sum <= 0.0 {
                continue; // Degenerate component, keep previous parameters
            }
            let mean = (0..n)
                .map(|i| responsibilities[i * k + c] * samples[i])
                .sum::<f64>()
                / resp_sum;
            let var = (0..n)
                .map(|i| responsibilities[i * k + c] * (samples[i] - mean).powi(2))
                .sum::<f64>()
                / resp_sum;
            means[c] = mean;
            variances[c] = var.max(VARIANCE_FLOOR);
            weights[c] = resp_sum / n as f64;
        }

        if (ll - prev_ll).abs() < params.tol {
            break;
        }
        prev_ll = ll;
    }

    Ok(GmmModel {
        means,
        variances,
        weights,
    })
}

/// Fit and return hard assignments
pub fn fit_predict(samples: &[f64], n_components: usize, params: &GmmParams) -> Result<Vec<i32>> {
    let model = fit(samples, n_components, params)?;
    Ok(samples.iter().map(|&v| model.predict(v) as i32).collect())
}
