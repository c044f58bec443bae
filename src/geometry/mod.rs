//! Outline construction for rendering and export of clusters
pub mod concave;
pub mod hull;
pub mod smooth;

#[cfg(test)]
mod hull_test;

pub use concave::{CONCAVITY, concave_hull};
pub use hull::{convex_hull, cross_product, point_to_segment_distance};
pub use smooth::{catmull_rom_closed, circle_approximation, smooth_polygon};

use crate::cluster::{Cluster, PointList};
use smooth::{CIRCLE_STEPS, SMALL_CLUSTER_RADIUS_METERS};

/// Clusters with at least this many members get a concave outline
const CONCAVE_MIN_MEMBERS: usize = 6;

/// Builds the outline ring of a cluster
///
/// * fewer than 3 members: 12-point circle around the centroid
/// * 3 to 5 members: smoothed convex hull
/// * 6 or more: smoothed concave hull
///
/// Members whose hull collapses (all collinear) fall back to the circle. The
/// ring is open: the first point is not repeated at the end.
pub fn cluster_polygon(cluster: &Cluster) -> PointList {
    let points: PointList = cluster.member_points().collect();
    let circle =
        || circle_approximation(cluster.center(), SMALL_CLUSTER_RADIUS_METERS, CIRCLE_STEPS);

    if points.len() < 3 {
        return circle();
    }

    let hull = if points.len() < CONCAVE_MIN_MEMBERS {
        convex_hull(&points)
    } else {
        concave_hull(&points, CONCAVITY)
    };

    if hull.len() < 3 {
        return circle();
    }
    smooth_polygon(&hull)
}
