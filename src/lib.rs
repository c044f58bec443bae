//! Outbreak-zone detection for tree blight surveys
//!
//! Concerning trees (dead, withering or pest-damaged) of one survey year are
//! grouped into zones by proximity, either with density clustering or by
//! merging per-tree discs, and each zone gets a smooth outline polygon.
pub mod cluster;
pub mod error;
pub mod export;
pub mod geometry;
pub mod loader;
pub mod tree;

#[cfg(test)]
mod export_test;
#[cfg(test)]
mod tree_test;

pub use cluster::{
    Algorithm, Cluster, ClusterParams, cluster_by_circle_union, cluster_by_density, cluster_trees,
};
pub use error::{LoadError, ParamError};
pub use geometry::cluster_polygon;
pub use tree::{Condition, TreeObservation, YearStats, yearly_stats};
