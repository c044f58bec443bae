use std::f64::consts::PI;

/// Coefficient to translate from degrees to radians
pub const DEGREE_RAD: f64 = PI / 180.0;

/// Earth radius in meters
pub const EARTH_R: f64 = 6_371_000.0;

/// Approximate length of one degree, used for meter/degree conversions
pub const METERS_PER_DEGREE: f64 = 111_320.0;

use super::point::Point;

/// Great-circle distance between two coordinates using the haversine formula
///
/// # Returns
///
/// Distance in meters
pub fn haversine_meters(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1) * DEGREE_RAD;
    let d_lng = (lng2 - lng1) * DEGREE_RAD;

    let a = (d_lat / 2.0).sin().powi(2)
        + (lat1 * DEGREE_RAD).cos() * (lat2 * DEGREE_RAD).cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_R * c
}

/// Flat Euclidean distance in coordinate-degree space
///
/// This ignores the shrinking of longitude degrees away from the equator, so it
/// is only an approximation of real distance.
pub fn degree_distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = lat2 - lat1;
    let d_lng = lng2 - lng1;
    (d_lat * d_lat + d_lng * d_lng).sqrt()
}

/// Converts meters to degrees with the `1° ≈ 111,320 m` approximation
pub fn meters_to_degrees(meters: f64) -> f64 {
    meters / METERS_PER_DEGREE
}

/// Haversine distance between two points, in meters
pub fn point_distance_meters(p1: &Point, p2: &Point) -> f64 {
    haversine_meters(p1.lat(), p1.lng(), p2.lat(), p2.lng())
}
