//! Dataset construction and year filtering.

pub mod dataset;

pub use dataset::Dataset;
