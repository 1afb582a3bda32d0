//! File format adapters
//!
//! Persistence for the core containers; currently the tab-delimited
//! location-list format with transparent gzip/bzip2 compression.

pub mod loci;

pub use loci::{detect_compression, load, read_locations, save, CompressionFormat};
