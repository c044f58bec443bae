//! Planar hull primitives in (longitude, latitude) degree space.

use crate::cluster::Point;

/// 2D cross product of OA x OB
///
/// Positive for a counter-clockwise turn O -> A -> B, negative for clockwise,
/// zero when the three points are collinear.
pub fn cross_product(o: &Point, a: &Point, b: &Point) -> f64 {
    (a.0[0] - o.0[0]) * (b.0[1] - o.0[1]) - (a.0[1] - o.0[1]) * (b.0[0] - o.0[0])
}

/// Distance from `p` to the segment `a`-`b`, in degrees
///
/// The projection is clamped to the segment, so points beyond either end
/// measure to the nearest endpoint.
pub fn point_to_segment_distance(p: &Point, a: &Point, b: &Point) -> f64 {
    let dx = b.0[0] - a.0[0];
    let dy = b.0[1] - a.0[1];
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return p.dist(a);
    }

    let t = (((p.0[0] - a.0[0]) * dx + (p.0[1] - a.0[1]) * dy) / len_sq).clamp(0.0, 1.0);
    let proj = Point([a.0[0] + t * dx, a.0[1] + t * dy]);
    p.dist(&proj)
}

/// Graham scan, returning indices of hull vertices in counter-clockwise order
///
/// Fewer than 3 points come back unchanged. Collinear boundary points are
/// dropped, so a fully collinear input yields just its two extremes.
pub fn convex_hull_indices(points: &[Point]) -> Vec<usize> {
    if points.len() < 3 {
        return (0..points.len()).collect();
    }

    // bottom-most, then left-most
    let start = (0..points.len())
        .min_by(|&a, &b| {
            points[a].0[1]
                .total_cmp(&points[b].0[1])
                .then(points[a].0[0].total_cmp(&points[b].0[0]))
        })
        .unwrap_or(0);
    let origin = points[start];

    let angle = |i: usize| (points[i].0[1] - origin.0[1]).atan2(points[i].0[0] - origin.0[0]);

    let mut rest: Vec<usize> = (0..points.len()).filter(|&i| i != start).collect();
    rest.sort_by(|&a, &b| {
        angle(a)
            .total_cmp(&angle(b))
            .then(points[a].sq_dist(&origin).total_cmp(&points[b].sq_dist(&origin)))
            .then(a.cmp(&b))
    });

    let mut hull = vec![start, rest[0]];
    for &i in &rest[1..] {
        while hull.len() > 1
            && cross_product(
                &points[hull[hull.len() - 2]],
                &points[hull[hull.len() - 1]],
                &points[i],
            ) <= 0.0
        {
            hull.pop();
        }
        hull.push(i);
    }

    hull
}

/// Convex hull vertices in counter-clockwise order
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
    convex_hull_indices(points)
        .into_iter()
        .map(|i| points[i])
        .collect()
}
