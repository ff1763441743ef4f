//! I/O for reading and writing rasters

mod native;

pub use native::{read_geotiff, write_geotiff};
