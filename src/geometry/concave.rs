use super::hull::{convex_hull_indices, point_to_segment_distance};
use crate::cluster::Point;
use bitvec::prelude::*;

/// Concavity used for zone outlines. Smaller values pull the outline in tighter.
pub const CONCAVITY: f64 = 2.0;

const MAX_ITERATIONS: usize = 3;

/// Approximates a concave hull by refining the convex hull edge by edge
///
/// Each pass walks the hull edges and, for every edge, inserts the nearest
/// unused point whose distance to the edge is below `edge_len / concavity`
/// and which lies within `2 * edge_len` of both endpoints. Stops after three
/// passes or when a pass inserts nothing. This is a heuristic: the outline
/// is usually, not always, free of self-intersections.
pub fn concave_hull(points: &[Point], concavity: f64) -> Vec<Point> {
    let mut hull = convex_hull_indices(points);
    if hull.len() < 3 || concavity <= 0.0 {
        return hull.into_iter().map(|i| points[i]).collect();
    }

    let mut in_hull = bitvec![0; points.len()];
    for &i in &hull {
        in_hull.set(i, true);
    }

    for _ in 0..MAX_ITERATIONS {
        let mut refined = Vec::with_capacity(hull.len() * 2);
        let mut inserted = 0;

        for e in 0..hull.len() {
            let current = hull[e];
            let next = hull[(e + 1) % hull.len()];
            refined.push(current);

            let (a, b) = (&points[current], &points[next]);
            let edge_len = a.dist(b);
            if edge_len == 0.0 {
                continue;
            }

            let best = (0..points.len())
                .filter(|&i| !in_hull[i])
                .filter_map(|i| {
                    let p = &points[i];
                    let d = point_to_segment_distance(p, a, b);
                    let near = d < edge_len / concavity
                        && p.dist(a) < 2.0 * edge_len
                        && p.dist(b) < 2.0 * edge_len;
                    near.then_some((d, i))
                })
                .min_by(|x, y| x.0.total_cmp(&y.0).then(x.1.cmp(&y.1)));

            if let Some((_, i)) = best {
                in_hull.set(i, true);
                refined.push(i);
                inserted += 1;
            }
        }

        hull = refined;
        if inserted == 0 {
            break;
        }
    }

    hull.into_iter().map(|i| points[i]).collect()
}
