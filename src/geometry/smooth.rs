use crate::cluster::point::centroid_and_bounds;
use crate::cluster::{DEGREE_RAD, Point, meters_to_degrees};
use std::f64::consts::PI;

/// Interpolated samples per polygon segment
pub const SPLINE_SAMPLES: usize = 8;

/// Vertices of the circular stand-in for tiny clusters
pub const CIRCLE_STEPS: usize = 12;

/// How far each outline vertex is pushed away from the zone, in meters
pub const POLYGON_PADDING_METERS: f64 = 3.0;

/// Radius of the circle drawn for clusters too small to have a hull
pub const SMALL_CLUSTER_RADIUS_METERS: f64 = 10.0;

/// Pushes every vertex away from the vertex centroid by `padding` degrees
pub fn pad_outward(points: &[Point], padding: f64) -> Vec<Point> {
    let (center, _) = centroid_and_bounds(points.iter().copied());
    points
        .iter()
        .map(|p| {
            let d = p.dist(&center);
            if d == 0.0 {
                return *p;
            }
            Point([
                p.0[0] + (p.0[0] - center.0[0]) / d * padding,
                p.0[1] + (p.0[1] - center.0[1]) / d * padding,
            ])
        })
        .collect()
}

/// Closed uniform Catmull-Rom spline through `control`
///
/// The control list is treated as cyclic. Each segment contributes `samples`
/// points starting at its first control point, so the result has
/// `control.len() * samples` points and passes through every control point.
pub fn catmull_rom_closed(control: &[Point], samples: usize) -> Vec<Point> {
    let n = control.len();
    if n < 3 || samples == 0 {
        return control.to_vec();
    }

    let mut out = Vec::with_capacity(n * samples);
    for i in 0..n {
        let p0 = &control[(i + n - 1) % n];
        let p1 = &control[i];
        let p2 = &control[(i + 1) % n];
        let p3 = &control[(i + 2) % n];

        for s in 0..samples {
            let t = s as f64 / samples as f64;
            out.push(catmull_rom_point(p0, p1, p2, p3, t));
        }
    }
    out
}

fn catmull_rom_point(p0: &Point, p1: &Point, p2: &Point, p3: &Point, t: f64) -> Point {
    let t2 = t * t;
    let t3 = t2 * t;
    let mut out = Point([0.0, 0.0]);
    for j in 0..2 {
        out.0[j] = 0.5
            * (2.0 * p1.0[j]
                + (p2.0[j] - p0.0[j]) * t
                + (2.0 * p0.0[j] - 5.0 * p1.0[j] + 4.0 * p2.0[j] - p3.0[j]) * t2
                + (3.0 * p1.0[j] - p0.0[j] - 3.0 * p2.0[j] + p3.0[j]) * t3);
    }
    out
}

/// Regular polygon around `center` with a radius in meters
///
/// Longitude offsets are stretched by `1 / cos(latitude)` so the shape stays
/// round on the ground.
pub fn circle_approximation(center: Point, radius_meters: f64, steps: usize) -> Vec<Point> {
    let r = meters_to_degrees(radius_meters);
    let lng_scale = (center.lat() * DEGREE_RAD).cos().abs().max(0.01);

    (0..steps)
        .map(|i| {
            let angle = i as f64 * 2.0 * PI / steps as f64;
            Point::from_lat_lng(
                center.lat() + r * angle.cos(),
                center.lng() + r * angle.sin() / lng_scale,
            )
        })
        .collect()
}

/// Smooth closed outline through a hull
///
/// Fewer than 3 vertices give a small circle around their centroid instead.
pub fn smooth_polygon(points: &[Point]) -> Vec<Point> {
    if points.len() < 3 {
        let (center, _) = centroid_and_bounds(points.iter().copied());
        return circle_approximation(center, SMALL_CLUSTER_RADIUS_METERS, CIRCLE_STEPS);
    }

    let padded = pad_outward(points, meters_to_degrees(POLYGON_PADDING_METERS));
    catmull_rom_closed(&padded, SPLINE_SAMPLES)
}
