//! Clustering strategy selection
//!
//! The zoning decision engine: runs the requested discovery algorithm on
//! the extracted samples, validates the cluster count, and normalizes
//! degenerate outcomes to a 3-zone k-means zoning. Downstream rendering
//! needs at least two visually distinct zones to be useful, so a
//! homogeneous field never surfaces as a "zero zones" result — that is a
//! policy default, not a numerical necessity.

use std::time::{Duration, Instant};

use agrizone_core::{Error, FieldGeometry, ImageryProvider, Raster, Result};
use serde::Serialize;
use tracing::debug;

use crate::cluster::{dbscan, gmm, meanshift};
use crate::zoning::descriptions::zone_descriptions;
use crate::zoning::labeler;
use crate::zoning::sampler::{self, SAMPLE_SCALE};

/// Zone count every degenerate outcome is normalized to
pub const FALLBACK_ZONES: usize = 3;

/// Minimum sample count for mean-shift mode seeking
const MEANSHIFT_MIN_SAMPLES: usize = 10;

/// Method-specific parameters, as collected by the presentation layer
#[derive(Debug, Clone, Default)]
pub struct ClusterParams {
    /// Zone count for K-Means / component count for GMM
    pub num_zones: Option<usize>,
    /// DBSCAN neighborhood radius
    pub eps_value: Option<f64>,
    /// DBSCAN density threshold
    pub min_samples: Option<usize>,
    /// Mean-shift kernel width
    pub bandwidth: Option<f64>,
}

/// A validated clustering method with its parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClusterMethod {
    KMeans { num_zones: usize },
    Dbscan { eps: f64, min_samples: usize },
    MeanShift { bandwidth: f64 },
    Gmm { num_components: usize },
}

impl ClusterMethod {
    /// Parse a method name + parameter bag into a validated method.
    ///
    /// Unknown names and missing or non-positive parameters fail fast;
    /// nothing downstream re-validates configuration.
    pub fn from_name(name: &str, params: &ClusterParams) -> Result<Self> {
        let normalized: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "kmeans" => Ok(Self::KMeans {
                num_zones: require_positive_usize("num_zones", params.num_zones)?,
            }),
            "dbscan" => Ok(Self::Dbscan {
                eps: require_positive_f64("eps_value", params.eps_value)?,
                min_samples: require_positive_usize("min_samples", params.min_samples)?,
            }),
            "meanshift" => Ok(Self::MeanShift {
                bandwidth: require_positive_f64("bandwidth", params.bandwidth)?,
            }),
            "gmm" => Ok(Self::Gmm {
                num_components: require_positive_usize("num_zones", params.num_zones)?,
            }),
            _ => Err(Error::UnsupportedMethod(name.to_string())),
        }
    }

    /// Display label for reports and results
    pub fn label(&self) -> &'static str {
        match self {
            Self::KMeans { .. } => "K-Means",
            Self::Dbscan { .. } => "DBSCAN",
            Self::MeanShift { .. } => "Mean Shift",
            Self::Gmm { .. } => "GMM",
        }
    }
}

fn require_positive_usize(name: &'static str, value: Option<usize>) -> Result<usize> {
    match value {
        Some(v) if v >= 1 => Ok(v),
        Some(v) => Err(Error::InvalidParameter {
            name,
            value: v.to_string(),
            reason: "must be >= 1".into(),
        }),
        None => Err(Error::InvalidParameter {
            name,
            value: "missing".into(),
            reason: "required for this method".into(),
        }),
    }
}

fn require_positive_f64(name: &'static str, value: Option<f64>) -> Result<f64> {
    match value {
        Some(v) if v > 0.0 && v.is_finite() => Ok(v),
        Some(v) => Err(Error::InvalidParameter {
            name,
            value: v.to_string(),
            reason: "must be positive".into(),
        }),
        None => Err(Error::InvalidParameter {
            name,
            value: "missing".into(),
            reason: "required for this method".into(),
        }),
    }
}

/// Zoning metadata produced by the selector
#[derive(Debug, Clone, Serialize)]
pub struct ZoningResult {
    /// Number of zones in the labeled raster
    pub zone_count: usize,
    /// Method that produced the zoning ("K-Means" after a fallback)
    pub method: String,
    /// One description per zone, lowest → highest vigor
    pub descriptions: Vec<String>,
    /// DBSCAN diagnostic: samples labeled as noise
    #[serde(skip_serializing_if = "Option::is_none")]
    pub noise_points: Option<usize>,
    /// Whether the requested method degenerated and was replaced
    pub fallback: bool,
}

impl ZoningResult {
    fn new(method: &ClusterMethod, zone_count: usize) -> Self {
        Self {
            zone_count,
            method: method.label().to_string(),
            descriptions: zone_descriptions(zone_count),
            noise_points: None,
            fallback: false,
        }
    }
}

/// A complete zoning: pixel-level zone map plus metadata and timing
#[derive(Debug, Clone)]
pub struct Zoning {
    /// Labeled raster, values in `[0, zone_count-1]`, −1 for nodata
    pub zones: Raster<i32>,
    /// Zoning metadata
    pub info: ZoningResult,
    /// Wall-clock time for the whole selection + labeling sequence
    pub elapsed: Duration,
}

impl Zoning {
    /// Elapsed processing time in seconds
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Run the requested clustering method and produce the final zoning.
///
/// Either a full zoning is produced or an error is raised; there is no
/// partial-result mode. Degenerate discovery outcomes (too few samples,
/// a single cluster) are normalized to [`FALLBACK_ZONES`]-zone K-Means.
pub fn perform_clustering<P: ImageryProvider>(
    provider: &P,
    raster: &Raster<f64>,
    geometry: &FieldGeometry,
    method: ClusterMethod,
) -> Result<Zoning> {
    let start = Instant::now();

    let (zones, info) = match method {
        ClusterMethod::KMeans { num_zones } => kmeans_zoning(provider, raster, geometry, num_zones)?,
        ClusterMethod::Dbscan { eps, min_samples } => {
            dbscan_zoning(provider, raster, geometry, eps, min_samples)?
        }
        ClusterMethod::MeanShift { bandwidth } => {
            meanshift_zoning(provider, raster, geometry, bandwidth)?
        }
        ClusterMethod::Gmm { num_components } => {
            gmm_zoning(provider, raster, geometry, num_components)?
        }
    };

    Ok(Zoning {
        zones,
        info,
        elapsed: start.elapsed(),
    })
}

/// K-Means: the zone count is taken as given, no fallback path
fn kmeans_zoning<P: ImageryProvider>(
    provider: &P,
    raster: &Raster<f64>,
    geometry: &FieldGeometry,
    num_zones: usize,
) -> Result<(Raster<i32>, ZoningResult)> {
    let zones = labeler::label(provider, raster, geometry, num_zones)?;
    let info = ZoningResult::new(&ClusterMethod::KMeans { num_zones }, num_zones);
    Ok((zones, info))
}

/// The normalized degenerate outcome: 3-zone K-Means, flagged as fallback
fn fallback_zoning<P: ImageryProvider>(
    provider: &P,
    raster: &Raster<f64>,
    geometry: &FieldGeometry,
    reason: &str,
) -> Result<(Raster<i32>, ZoningResult)> {
    debug!(reason, zones = FALLBACK_ZONES, "falling back to K-Means");
    let (zones, mut info) = kmeans_zoning(provider, raster, geometry, FALLBACK_ZONES)?;
    info.fallback = true;
    Ok((zones, info))
}

fn dbscan_zoning<P: ImageryProvider>(
    provider: &P,
    raster: &Raster<f64>,
    geometry: &FieldGeometry,
    eps: f64,
    min_samples: usize,
) -> Result<(Raster<i32>, ZoningResult)> {
    let samples = sampler::extract(provider, raster, geometry, SAMPLE_SCALE)?;

    if samples.len() < min_samples {
        return fallback_zoning(provider, raster, geometry, "too few samples for DBSCAN");
    }

    let labels = dbscan::fit_predict(&samples, &dbscan::DbscanParams { eps, min_samples })?;
    let num_clusters = dbscan::distinct_clusters(&labels);

    if num_clusters <= 1 {
        return fallback_zoning(provider, raster, geometry, "DBSCAN found <= 1 cluster");
    }

    let zones = labeler::label(provider, raster, geometry, num_clusters)?;
    let mut info = ZoningResult::new(
        &ClusterMethod::Dbscan { eps, min_samples },
        num_clusters,
    );
    info.noise_points = Some(dbscan::noise_count(&labels));
    Ok((zones, info))
}

/// Mean-shift is numerically sensitive to the bandwidth choice, so any
/// error in this whole path is converted into the k-means fallback.
fn meanshift_zoning<P: ImageryProvider>(
    provider: &P,
    raster: &Raster<f64>,
    geometry: &FieldGeometry,
    bandwidth: f64,
) -> Result<(Raster<i32>, ZoningResult)> {
    match try_meanshift(provider, raster, geometry, bandwidth) {
        Ok(result) => Ok(result),
        Err(e) => fallback_zoning(provider, raster, geometry, &format!("mean-shift failed: {e}")),
    }
}

fn try_meanshift<P: ImageryProvider>(
    provider: &P,
    raster: &Raster<f64>,
    geometry: &FieldGeometry,
    bandwidth: f64,
) -> Result<(Raster<i32>, ZoningResult)> {
    let samples = sampler::extract(provider, raster, geometry, SAMPLE_SCALE)?;

    if samples.len() < MEANSHIFT_MIN_SAMPLES {
        return fallback_zoning(provider, raster, geometry, "too few samples for mean-shift");
    }

    let params = meanshift::MeanShiftParams {
        bandwidth,
        ..Default::default()
    };
    let labels = meanshift::fit_predict(&samples, &params)?;
    let mut num_clusters = meanshift::distinct_clusters(&labels);

    if num_clusters <= 1 {
        // One retry at half bandwidth before giving up
        debug!(bandwidth, "single mode found, retrying at half bandwidth");
        let retry = meanshift::MeanShiftParams {
            bandwidth: bandwidth / 2.0,
            ..Default::default()
        };
        let labels = meanshift::fit_predict(&samples, &retry)?;
        num_clusters = meanshift::distinct_clusters(&labels);

        if num_clusters <= 1 {
            return fallback_zoning(provider, raster, geometry, "mean-shift degenerate at both bandwidths");
        }
    }

    let zones = labeler::label(provider, raster, geometry, num_clusters)?;
    let info = ZoningResult::new(&ClusterMethod::MeanShift { bandwidth }, num_clusters);
    Ok((zones, info))
}

/// GMM: the mixture is fitted and its assignment discarded — the pixel
/// partition always comes from the k-means primitive with the requested
/// component count. Preserved as-is: GMM zoning is visually identical to
/// K-Means zoning for the same zone count.
fn gmm_zoning<P: ImageryProvider>(
    provider: &P,
    raster: &Raster<f64>,
    geometry: &FieldGeometry,
    num_components: usize,
) -> Result<(Raster<i32>, ZoningResult)> {
    let samples = sampler::extract(provider, raster, geometry, SAMPLE_SCALE)?;
    let _assignment = gmm::fit_predict(&samples, num_components, &gmm::GmmParams::default())?;

    let zones = labeler::label(provider, raster, geometry, num_components)?;
    let info = ZoningResult::new(&ClusterMethod::Gmm { num_components }, num_components);
    Ok((zones, info))
}

#[cfg(test)]
mod tests {
    use super::*;
    use agrizone_core::{GeoTransform, GridProvider};

    fn two_band_raster() -> Raster<f64> {
        // Sharp NDVI split: stressed top half, vigorous bottom half
        let mut r = Raster::new(40, 40);
        r.set_transform(GeoTransform::new(0.0, 400.0, 10.0, -10.0));
        r.set_nodata(Some(f64::NAN));
        for row in 0..40 {
            let v = if row < 20 { 0.2 } else { 0.75 };
            for col in 0..40 {
                r.set(row, col, v).unwrap();
            }
        }
        r
    }

    fn uniform_raster() -> Raster<f64> {
        let mut r = Raster::filled(40, 40, 0.5);
        r.set_transform(GeoTransform::new(0.0, 400.0, 10.0, -10.0));
        r.set_nodata(Some(f64::NAN));
        r
    }

    fn field() -> FieldGeometry {
        FieldGeometry::from_xy(200.0, 200.0, 180.0)
    }

    #[test]
    fn test_from_name_rejects_unknown_method() {
        let err = ClusterMethod::from_name("Agglomerative", &ClusterParams::default());
        assert!(matches!(err, Err(Error::UnsupportedMethod(_))));
    }

    #[test]
    fn test_from_name_accepts_original_spellings() {
        let params = ClusterParams {
            num_zones: Some(3),
            eps_value: Some(0.05),
            min_samples: Some(5),
            bandwidth: Some(0.1),
        };
        assert_eq!(
            ClusterMethod::from_name("K-Means", &params).unwrap().label(),
            "K-Means"
        );
        assert_eq!(
            ClusterMethod::from_name("Mean Shift", &params).unwrap().label(),
            "Mean Shift"
        );
        assert_eq!(
            ClusterMethod::from_name("DBSCAN", &params).unwrap().label(),
            "DBSCAN"
        );
        assert_eq!(
            ClusterMethod::from_name("GMM", &params).unwrap().label(),
            "GMM"
        );
    }

    #[test]
    fn test_from_name_requires_parameters() {
        assert!(ClusterMethod::from_name("K-Means", &ClusterParams::default()).is_err());
        assert!(ClusterMethod::from_name(
            "DBSCAN",
            &ClusterParams {
                eps_value: Some(-0.1),
                min_samples: Some(5),
                ..Default::default()
            }
        )
        .is_err());
    }

    #[test]
    fn test_kmeans_direct() {
        let raster = two_band_raster();
        let provider = GridProvider::new();
        let zoning = perform_clustering(
            &provider,
            &raster,
            &field(),
            ClusterMethod::KMeans { num_zones: 4 },
        )
        .unwrap();

        assert_eq!(zoning.info.zone_count, 4);
        assert_eq!(zoning.info.method, "K-Means");
        assert_eq!(zoning.info.descriptions.len(), 4);
        assert!(!zoning.info.fallback);
        assert!(zoning.elapsed_seconds() >= 0.0);
    }

    #[test]
    fn test_dbscan_discovers_two_zones() {
        let raster = two_band_raster();
        let provider = GridProvider::new();
        let zoning = perform_clustering(
            &provider,
            &raster,
            &field(),
            ClusterMethod::Dbscan {
                eps: 0.05,
                min_samples: 5,
            },
        )
        .unwrap();

        assert_eq!(zoning.info.method, "DBSCAN");
        assert_eq!(zoning.info.zone_count, 2);
        assert_eq!(zoning.info.noise_points, Some(0));
        assert!(!zoning.info.fallback);
    }

    #[test]
    fn test_dbscan_min_samples_exceeds_sample_count() {
        let raster = two_band_raster();
        let provider = GridProvider::new();
        let zoning = perform_clustering(
            &provider,
            &raster,
            &field(),
            ClusterMethod::Dbscan {
                eps: 0.05,
                min_samples: 1_000_000,
            },
        )
        .unwrap();

        // Policy default: degenerate outcomes normalize to 3-zone K-Means
        assert_eq!(zoning.info.method, "K-Means");
        assert_eq!(zoning.info.zone_count, FALLBACK_ZONES);
        assert!(zoning.info.fallback);
    }

    #[test]
    fn test_dbscan_single_cluster_falls_back() {
        let raster = uniform_raster();
        let provider = GridProvider::new();
        let zoning = perform_clustering(
            &provider,
            &raster,
            &field(),
            ClusterMethod::Dbscan {
                eps: 0.2,
                min_samples: 5,
            },
        )
        .unwrap();

        assert_eq!(zoning.info.method, "K-Means");
        assert_eq!(zoning.info.zone_count, FALLBACK_ZONES);
        assert!(zoning.info.fallback);
    }

    #[test]
    fn test_meanshift_finds_two_modes() {
        let raster = two_band_raster();
        let provider = GridProvider::new();
        let zoning = perform_clustering(
            &provider,
            &raster,
            &field(),
            ClusterMethod::MeanShift { bandwidth: 0.1 },
        )
        .unwrap();

        assert_eq!(zoning.info.method, "Mean Shift");
        assert_eq!(zoning.info.zone_count, 2);
    }

    #[test]
    fn test_meanshift_retry_then_fallback_on_uniform_field() {
        let raster = uniform_raster();
        let provider = GridProvider::new();
        let zoning = perform_clustering(
            &provider,
            &raster,
            &field(),
            ClusterMethod::MeanShift { bandwidth: 2.0 },
        )
        .unwrap();

        // Single mode at full and half bandwidth: normalized to K-Means(3)
        assert_eq!(zoning.info.method, "K-Means");
        assert_eq!(zoning.info.zone_count, FALLBACK_ZONES);
        assert!(zoning.info.fallback);
    }

    #[test]
    fn test_meanshift_split_survives_retry() {
        // At 0.5 the two NDVI bands merge into one mode; at the halved
        // 0.25 they separate again, so the retry rescues the method.
        let raster = two_band_raster();
        let provider = GridProvider::new();
        let zoning = perform_clustering(
            &provider,
            &raster,
            &field(),
            ClusterMethod::MeanShift { bandwidth: 0.5 },
        )
        .unwrap();

        assert_eq!(zoning.info.method, "Mean Shift");
        assert_eq!(zoning.info.zone_count, 2);
        assert!(!zoning.info.fallback);
    }

    #[test]
    fn test_meanshift_catch_all_converts_errors() {
        // A bandwidth that bypassed parsing and reaches the primitive as
        // invalid raises inside the mean-shift path; the blanket catch-all
        // turns it into the k-means fallback instead of surfacing it.
        let raster = two_band_raster();
        let provider = GridProvider::new();
        let zoning = perform_clustering(
            &provider,
            &raster,
            &field(),
            ClusterMethod::MeanShift { bandwidth: -1.0 },
        )
        .unwrap();
        assert_eq!(zoning.info.method, "K-Means");
        assert_eq!(zoning.info.zone_count, FALLBACK_ZONES);
        assert!(zoning.info.fallback);
    }

    #[test]
    fn test_gmm_labels_with_requested_component_count() {
        let raster = two_band_raster();
        let provider = GridProvider::new();
        let zoning = perform_clustering(
            &provider,
            &raster,
            &field(),
            ClusterMethod::Gmm { num_components: 3 },
        )
        .unwrap();

        assert_eq!(zoning.info.method, "GMM");
        assert_eq!(zoning.info.zone_count, 3);
        assert!(!zoning.info.fallback);
    }

    #[test]
    fn test_gmm_zoning_identical_to_kmeans() {
        // The mixture assignment is discarded, so the pixel map must be
        // exactly the K-Means zoning for the same count.
        let raster = two_band_raster();
        let provider = GridProvider::new();
        let g = perform_clustering(
            &provider,
            &raster,
            &field(),
            ClusterMethod::Gmm { num_components: 2 },
        )
        .unwrap();
        let k = perform_clustering(
            &provider,
            &raster,
            &field(),
            ClusterMethod::KMeans { num_zones: 2 },
        )
        .unwrap();

        assert_eq!(g.zones.data(), k.zones.data());
    }

    #[test]
    fn test_descriptions_length_invariant() {
        let raster = two_band_raster();
        let provider = GridProvider::new();
        for method in [
            ClusterMethod::KMeans { num_zones: 5 },
            ClusterMethod::Gmm { num_components: 2 },
        ] {
            let zoning = perform_clustering(&provider, &raster, &field(), method).unwrap();
            assert_eq!(zoning.info.descriptions.len(), zoning.info.zone_count);
        }
    }
}
