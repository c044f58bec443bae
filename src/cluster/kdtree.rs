//! 2-D K-D tree over degree-space coordinates.
//!
//! Points are separated from nodes. Nodes hold only indices into the borrowed
//! point slice, so the tree never copies coordinates.

use super::point::Point;

/// KD-Tree implementation for radius queries in degree space
pub struct KdTree<'a> {
    points: &'a [Point],
    root: Option<Box<KdTreeNode>>,
}

/// A node in the K-D tree
struct KdTreeNode {
    /// Index of the point associated with this node
    point_id: usize,
    /// Splitting dimension: 0 for longitude, 1 for latitude
    split: usize,
    left: Option<Box<KdTreeNode>>,
    right: Option<Box<KdTreeNode>>,
}

impl<'a> KdTree<'a> {
    /// Builds a balanced tree by recursive median split
    pub fn new(points: &'a [Point]) -> Self {
        let mut ids: Vec<usize> = (0..points.len()).collect();
        let root = build_tree(points, &mut ids, 0);
        KdTree { points, root }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Finds all points within `radius` (inclusive) of `pt`
    ///
    /// The result is sorted by point index so callers iterate in a stable order.
    pub fn in_range(&self, pt: &Point, radius: f64) -> Vec<usize> {
        let mut found = Vec::new();
        if radius < 0.0 {
            return found;
        }
        self.in_range_recursive(self.root.as_deref(), pt, radius, &mut found);
        found.sort_unstable();
        found
    }

    /// Indices of every other point within `radius` of point `idx`
    pub fn neighbors(&self, idx: usize, radius: f64) -> Vec<usize> {
        let mut found = self.in_range(&self.points[idx], radius);
        found.retain(|&j| j != idx);
        found
    }

    fn in_range_recursive(
        &self,
        node: Option<&KdTreeNode>,
        pt: &Point,
        r: f64,
        found: &mut Vec<usize>,
    ) {
        let Some(node) = node else {
            return;
        };

        let pivot = &self.points[node.point_id];
        if pivot.sq_dist(pt) <= r * r {
            found.push(node.point_id);
        }

        // Left holds values <= pivot and right holds values >= pivot on the
        // split axis, so ties may sit on either side.
        let diff = pt.0[node.split] - pivot.0[node.split];
        if diff <= r {
            self.in_range_recursive(node.left.as_deref(), pt, r, found);
        }
        if -diff <= r {
            self.in_range_recursive(node.right.as_deref(), pt, r, found);
        }
    }
}

fn build_tree(points: &[Point], ids: &mut [usize], depth: usize) -> Option<Box<KdTreeNode>> {
    if ids.is_empty() {
        return None;
    }

    let split = depth % 2;
    ids.sort_by(|&a, &b| {
        points[a].0[split]
            .total_cmp(&points[b].0[split])
            .then(a.cmp(&b))
    });

    let m = ids.len() / 2;
    let point_id = ids[m];
    let (left, rest) = ids.split_at_mut(m);
    let right = &mut rest[1..];

    Some(Box::new(KdTreeNode {
        point_id,
        split,
        left: build_tree(points, left, depth + 1),
        right: build_tree(points, right, depth + 1),
    }))
}

/// Simple O(N) way to find points in neighbourhood
///
/// This is equivalent to `KdTree::new(points).in_range(p, radius)`.
pub fn region_query(points: &[Point], p: &Point, radius: f64) -> Vec<usize> {
    points
        .iter()
        .enumerate()
        .filter(|(_, point)| point.sq_dist(p) <= radius * radius)
        .map(|(i, _)| i)
        .collect()
}
