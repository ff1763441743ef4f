//! Clustering primitives for scalar index samples
//!
//! Discovery algorithms used by the zoning engine:
//! - **K-means**: deterministic quantile-seeded partition, also the
//!   pixel-wide partitioning primitive
//! - **DBSCAN**: density clustering with a noise label
//! - **Mean-shift**: bin-seeded mode seeking
//! - **GMM**: Gaussian mixture fit by EM

pub mod dbscan;
pub mod gmm;
pub mod kmeans;
pub mod meanshift;

pub use dbscan::{DbscanParams, NOISE};
pub use gmm::{GmmModel, GmmParams};
pub use kmeans::{KmeansModel, KmeansParams, KmeansPartitioner};
pub use meanshift::MeanShiftParams;
