//! Outbreak-zone clustering on (lat, lon) of concerning trees
//!
//! Two strategies live behind [`Algorithm`]: density clustering (DBSCAN plus a
//! stitching pass, K-D tree backed) and circle-union clustering. Every entry
//! point is a pure function of its inputs; clusters borrow the observations.
pub mod circle;
pub mod dbscan;
pub mod distance;
pub mod kdtree;
pub mod model;
pub mod params;
pub mod point;


pub use circle::{Circle, cluster_by_circle_union};
pub use dbscan::{MIN_POINTS, cluster_by_density};
pub use distance::{
    DEGREE_RAD, EARTH_R, METERS_PER_DEGREE, degree_distance, haversine_meters, meters_to_degrees,
};
pub use model::{Cluster, Severity};
pub use params::{Algorithm, ClusterParams};
pub use point::{Bounds, Point, PointList};

use crate::tree::TreeObservation;

/// Runs the algorithm selected in `params`
///
/// Parameters are used as given apart from the clamping each algorithm applies;
/// call [`ClusterParams::validate`] first to reject non-finite input.
pub fn cluster_trees<'a>(trees: &'a [TreeObservation], params: &ClusterParams) -> Vec<Cluster<'a>> {
    match params.algorithm {
        Algorithm::Density => cluster_by_density(trees, params.radius_meters),
        Algorithm::CircleUnion => {
            cluster_by_circle_union(trees, params.radius_meters, params.overlap_threshold)
        }
    }
}
