/// Point represents a geographic coordinate (longitude, latitude)
///
/// The point is stored as [longitude, latitude] where:
/// - `[0]` is longitude (the x axis for planar geometry)
/// - `[1]` is latitude (the y axis)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point(pub [f64; 2]);

/// PointList is a collection of Points
pub type PointList = Vec<Point>;

impl Point {
    /// Creates a point from a latitude/longitude pair in degrees
    pub fn from_lat_lng(lat: f64, lng: f64) -> Self {
        Point([lng, lat])
    }

    pub fn lat(&self) -> f64 {
        self.0[1]
    }

    pub fn lng(&self) -> f64 {
        self.0[0]
    }

    /// Returns squared planar distance in degree space
    pub fn sq_dist(&self, b: &Point) -> f64 {
        let dx = self.0[0] - b.0[0];
        let dy = self.0[1] - b.0[1];
        dx * dx + dy * dy
    }

    /// Planar distance in degree space
    pub fn dist(&self, b: &Point) -> f64 {
        self.sq_dist(b).sqrt()
    }
}

/// Axis-aligned bounding box in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    /// Sentinel for an empty point set
    pub const EMPTY: Bounds = Bounds {
        min_lat: 0.0,
        max_lat: 0.0,
        min_lng: 0.0,
        max_lng: 0.0,
    };

    /// Checks if the point lies inside (or on the edge of) the box
    pub fn contains(&self, p: &Point) -> bool {
        self.min_lat <= p.lat()
            && p.lat() <= self.max_lat
            && self.min_lng <= p.lng()
            && p.lng() <= self.max_lng
    }
}

/// Calculates center and bounds of a set of points
///
/// Returns `(center, bounds)` where `center` is the arithmetic mean of the
/// points. An empty set yields a zero center and [`Bounds::EMPTY`].
pub fn centroid_and_bounds<I>(points: I) -> (Point, Bounds)
where
    I: IntoIterator<Item = Point>,
{
    let mut min = Point([f64::INFINITY, f64::INFINITY]);
    let mut max = Point([f64::NEG_INFINITY, f64::NEG_INFINITY]);
    let mut center = Point([0.0, 0.0]);
    let mut count = 0usize;

    for pt in points {
        for j in 0..2 {
            center.0[j] += pt.0[j];

            if pt.0[j] < min.0[j] {
                min.0[j] = pt.0[j];
            }
            if pt.0[j] > max.0[j] {
                max.0[j] = pt.0[j];
            }
        }
        count += 1;
    }

    if count == 0 {
        return (Point([0.0, 0.0]), Bounds::EMPTY);
    }

    for j in 0..2 {
        center.0[j] /= count as f64;
    }

    let bounds = Bounds {
        min_lat: min.lat(),
        max_lat: max.lat(),
        min_lng: min.lng(),
        max_lng: max.lng(),
    };

    (center, bounds)
}
