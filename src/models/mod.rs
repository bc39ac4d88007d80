pub mod config;
pub mod geometry;

pub use config::{CompactionConfig, RunConfig};
pub use geometry::{candidate_geometries, geometry_for_depth, Geometry};
