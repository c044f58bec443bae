//! Circle-union clustering.
//!
//! Every concerning tree seeds a disc of the configured radius. Two discs
//! connect when they overlap by at least the configured fraction of the smaller
//! radius, and connected discs merge transitively into one zone.

use super::distance::point_distance_meters;
use super::model::Cluster;
use super::params::{clamp_overlap, clamp_radius};
use super::point::Point;
use crate::tree::TreeObservation;
use bitvec::prelude::*;
use std::collections::VecDeque;

/// A disc on the ground, radius in meters
#[derive(Debug, Clone, PartialEq)]
pub struct Circle<'a> {
    pub center: Point,
    pub radius: f64,
    pub members: Vec<&'a TreeObservation>,
}

impl<'a> Circle<'a> {
    /// Disc centred on a single tree
    pub fn seed(tree: &'a TreeObservation, radius: f64) -> Self {
        Circle {
            center: tree.point(),
            radius,
            members: vec![tree],
        }
    }

    /// Checks if two discs overlap enough to merge
    ///
    /// The centres must be no further apart than
    /// `max_r + min_r * (1 - overlap_threshold)`. At a threshold of 0 any
    /// touching discs connect; at 1 one centre must lie inside the other disc.
    pub fn connects(&self, other: &Circle, overlap_threshold: f64) -> bool {
        let distance = point_distance_meters(&self.center, &other.center);
        let min_r = self.radius.min(other.radius);
        let max_r = self.radius.max(other.radius);
        distance <= max_r + min_r * (1.0 - overlap_threshold)
    }
}

/// Single disc enclosing every disc of a group
///
/// The centre is the mean of the disc centres; the radius reaches the far edge
/// of the furthest disc. Members are concatenated in group order.
pub fn bounding_circle<'a>(circles: &[Circle<'a>]) -> Circle<'a> {
    let n = circles.len().max(1) as f64;
    let lat = circles.iter().map(|c| c.center.lat()).sum::<f64>() / n;
    let lng = circles.iter().map(|c| c.center.lng()).sum::<f64>() / n;
    let center = Point::from_lat_lng(lat, lng);

    let radius = circles
        .iter()
        .map(|c| point_distance_meters(&c.center, &center) + c.radius)
        .fold(0.0, f64::max);

    let members = circles
        .iter()
        .flat_map(|c| c.members.iter().copied())
        .collect();

    Circle {
        center,
        radius,
        members,
    }
}

/// Groups circles into connected components
///
/// Components come out in order of their first circle, and each component
/// lists circles in breadth-first order from that circle.
pub fn connected_groups(circles: &[Circle], overlap_threshold: f64) -> Vec<Vec<usize>> {
    let mut processed = bitvec![0; circles.len()];
    let mut groups = Vec::new();
    let mut queue = VecDeque::new();

    for start in 0..circles.len() {
        if processed[start] {
            continue;
        }
        processed.set(start, true);

        let mut group = vec![start];
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            for other in 0..circles.len() {
                if processed[other] {
                    continue;
                }
                if circles[current].connects(&circles[other], overlap_threshold) {
                    processed.set(other, true);
                    group.push(other);
                    queue.push_back(other);
                }
            }
        }

        groups.push(group);
    }

    groups
}

/// Clusters concerning trees by merging overlapping discs
///
/// # Arguments
///
/// * `trees` - Observations to cluster; trees that are not concerning are ignored
/// * `radius_meters` - Disc radius, clamped to at least 1 m
/// * `overlap_threshold` - Fraction of the smaller radius that must overlap,
///   clamped to `[0, 1]`
pub fn cluster_by_circle_union<'a>(
    trees: &'a [TreeObservation],
    radius_meters: f64,
    overlap_threshold: f64,
) -> Vec<Cluster<'a>> {
    let radius = clamp_radius(radius_meters);
    let overlap_threshold = clamp_overlap(overlap_threshold);

    let circles: Vec<Circle<'a>> = trees
        .iter()
        .filter(|t| t.is_concerning())
        .map(|t| Circle::seed(t, radius))
        .collect();

    if circles.is_empty() {
        return Vec::new();
    }

    let groups = connected_groups(&circles, overlap_threshold);
    log::debug!(
        "circle union: {} circles merged into {} groups (radius={:.1} m, overlap={:.2})",
        circles.len(),
        groups.len(),
        radius,
        overlap_threshold
    );

    groups
        .into_iter()
        .enumerate()
        .map(|(seq, group)| {
            let group_circles: Vec<Circle<'a>> =
                group.iter().map(|&i| circles[i].clone()).collect();
            let members = group_circles
                .iter()
                .flat_map(|c| c.members.iter().copied())
                .collect();
            let bounding = (group_circles.len() > 1).then(|| bounding_circle(&group_circles));

            Cluster::new(seq, members).with_circles(group_circles, bounding)
        })
        .collect()
}
