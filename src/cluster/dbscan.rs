use super::distance::meters_to_degrees;
use super::kdtree::KdTree;
use super::model::Cluster;
use super::params::clamp_radius;
use super::point::{Point, PointList, centroid_and_bounds};
use crate::tree::{TreeObservation, concerning};
use bitvec::prelude::*;
use std::collections::VecDeque;

/// Minimum number of other points inside the radius for a point to be a core point
pub const MIN_POINTS: usize = 3;

/// Clusters whose centroids are closer than this many radii are stitched
const STITCH_CENTER_FACTOR: f64 = 0.8;

/// Clusters with any member pair closer than this many radii are stitched
const STITCH_MEMBER_FACTOR: f64 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unvisited,
    Noise,
    Assigned,
}

// DBSCAN with a FIFO expansion queue:
//
// for each unvisited point P
//    N = neighbours of P (other points within eps)
//    if |N| < MinPts
//       mark P as NOISE
//    else
//       queue = [P]
//       while queue not empty
//          Q = pop front, assign Q to the cluster
//          N' = neighbours of Q
//          if |N'| >= MinPts
//             push every neighbour that was never queued (noise included)
//
// A noise point reached from a core point becomes a border member of that
// cluster; it is never expanded because it is not a core point.

/// Clusters incoming points using DBSCAN algorithm
///
/// # Arguments
///
/// * `points` - List of points to cluster
/// * `eps` - Clustering radius in degrees
/// * `min_points` - Minimum number of other points in the eps-neighbourhood
///
/// # Returns
///
/// A tuple `(clusters, noise)` where:
/// - `clusters` lists point indices per cluster, in the order they were reached
/// - `noise` lists indices of points that belong to no cluster
pub fn db_scan(points: &[Point], eps: f64, min_points: usize) -> (Vec<Vec<usize>>, Vec<usize>) {
    let tree = KdTree::new(points);
    let mut state = vec![Visit::Unvisited; points.len()];
    let mut queued = bitvec![0; points.len()];
    let mut clusters = Vec::new();
    let mut queue = VecDeque::new();

    for i in 0..points.len() {
        if state[i] != Visit::Unvisited {
            continue;
        }

        if tree.neighbors(i, eps).len() < min_points {
            state[i] = Visit::Noise;
            continue;
        }

        let mut members = Vec::new();
        queued.set(i, true);
        queue.push_back(i);

        while let Some(k) = queue.pop_front() {
            state[k] = Visit::Assigned;
            members.push(k);

            let neighbors = tree.neighbors(k, eps);
            if neighbors.len() >= min_points {
                for j in neighbors {
                    if !queued[j] {
                        queued.set(j, true);
                        queue.push_back(j);
                    }
                }
            }
        }

        clusters.push(members);
    }

    let noise = state
        .iter()
        .enumerate()
        .filter(|&(_, s)| *s == Visit::Noise)
        .map(|(i, _)| i)
        .collect();

    (clusters, noise)
}

/// Merges clusters that sit next to each other into continuous regions
///
/// Two clusters connect when their centroids are within `0.8 * eps` or any
/// pair of their members is within `1.2 * eps`. Connected clusters merge
/// transitively.
pub fn stitch_clusters(points: &[Point], clusters: Vec<Vec<usize>>, eps: f64) -> Vec<Vec<usize>> {
    let centers: Vec<Point> = clusters
        .iter()
        .map(|c| centroid_and_bounds(c.iter().map(|&i| points[i])).0)
        .collect();

    let should_connect = |a: usize, b: usize| -> bool {
        if centers[a].dist(&centers[b]) <= STITCH_CENTER_FACTOR * eps {
            return true;
        }
        let reach = STITCH_MEMBER_FACTOR * eps;
        clusters[a].iter().any(|&i| {
            clusters[b]
                .iter()
                .any(|&j| points[i].dist(&points[j]) <= reach)
        })
    };

    let mut merged = bitvec![0; clusters.len()];
    let mut regions = Vec::new();
    let mut queue = VecDeque::new();

    for start in 0..clusters.len() {
        if merged[start] {
            continue;
        }
        merged.set(start, true);
        queue.push_back(start);

        let mut region = Vec::new();
        while let Some(current) = queue.pop_front() {
            region.extend_from_slice(&clusters[current]);
            for other in 0..clusters.len() {
                if !merged[other] && should_connect(current, other) {
                    log::trace!("stitching cluster {} into cluster {}", other, start);
                    merged.set(other, true);
                    queue.push_back(other);
                }
            }
        }
        regions.push(region);
    }

    regions
}

/// Clusters concerning trees by density, then stitches adjacent clusters
///
/// The radius is clamped to at least 1 m and converted to degrees with the
/// `1° ≈ 111,320 m` approximation, so east-west reach shrinks away from the
/// equator. Trees that never reach a dense neighbourhood are left out entirely.
pub fn cluster_by_density(trees: &[TreeObservation], radius_meters: f64) -> Vec<Cluster<'_>> {
    let radius = clamp_radius(radius_meters);
    let candidates = concerning(trees);
    if candidates.len() < MIN_POINTS {
        return Vec::new();
    }

    let points: PointList = candidates.iter().map(|t| t.point()).collect();
    let eps = meters_to_degrees(radius);

    let (clusters, noise) = db_scan(&points, eps, MIN_POINTS);
    let raw = clusters.len();
    let regions = stitch_clusters(&points, clusters, eps);

    log::debug!(
        "density: {} points, {} raw clusters stitched into {}, {} noise (radius={:.1} m)",
        points.len(),
        raw,
        regions.len(),
        noise.len(),
        radius
    );

    regions
        .into_iter()
        .enumerate()
        .map(|(seq, region)| Cluster::new(seq, region.iter().map(|&i| candidates[i]).collect()))
        .collect()
}
