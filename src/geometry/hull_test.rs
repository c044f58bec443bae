#[cfg(test)]
mod tests {
    use crate::cluster::Point;
    use crate::geometry::hull::{convex_hull, cross_product, point_to_segment_distance};
    use quickcheck::quickcheck;

    #[test]
    fn test_cross_product_sign() {
        let o = Point([0.0, 0.0]);
        let a = Point([1.0, 0.0]);
        assert!(cross_product(&o, &a, &Point([1.0, 1.0])) > 0.0);
        assert!(cross_product(&o, &a, &Point([1.0, -1.0])) < 0.0);
        assert_eq!(cross_product(&o, &a, &Point([2.0, 0.0])), 0.0);
    }

    #[test]
    fn test_point_to_segment_distance() {
        let a = Point([-1.0, 0.0]);
        let b = Point([1.0, 0.0]);
        assert_eq!(point_to_segment_distance(&Point([0.0, 1.0]), &a, &b), 1.0);
        // beyond the end, clamped to b
        assert_eq!(point_to_segment_distance(&Point([3.0, 0.0]), &a, &b), 2.0);
        assert_eq!(point_to_segment_distance(&Point([-4.0, 4.0]), &a, &b), 5.0);
        // degenerate segment
        assert_eq!(point_to_segment_distance(&Point([3.0, 4.0]), &a, &a), 32.0_f64.sqrt());
    }

    #[test]
    fn test_square_with_interior_point() {
        let points = vec![
            Point([0.0, 0.0]),
            Point([1.0, 0.0]),
            Point([1.0, 1.0]),
            Point([0.0, 1.0]),
            Point([0.5, 0.5]),
        ];
        let hull = convex_hull(&points);
        assert_eq!(
            hull,
            vec![
                Point([0.0, 0.0]),
                Point([1.0, 0.0]),
                Point([1.0, 1.0]),
                Point([0.0, 1.0]),
            ]
        );
    }

    #[test]
    fn test_degenerate_inputs() {
        let two = vec![Point([3.0, 1.0]), Point([0.0, 0.0])];
        assert_eq!(convex_hull(&two), two);
        assert!(convex_hull(&[]).is_empty());

        let collinear = vec![Point([1.0, 1.0]), Point([0.0, 0.0]), Point([2.0, 2.0])];
        assert_eq!(convex_hull(&collinear), vec![Point([0.0, 0.0]), Point([2.0, 2.0])]);
    }

    #[test]
    fn test_collinear_boundary_points_dropped() {
        let points = vec![
            Point([0.0, 0.0]),
            Point([2.0, 0.0]),
            Point([2.0, 2.0]),
            Point([0.0, 2.0]),
            Point([0.0, 1.0]),
            Point([1.0, 0.0]),
        ];
        assert_eq!(convex_hull(&points).len(), 4);
    }

    quickcheck! {
        fn prop_hull_contains_all_points(coords: Vec<(u8, u8)>) -> bool {
            let points: Vec<Point> = coords
                .iter()
                .map(|&(x, y)| Point([x as f64, y as f64]))
                .collect();
            let hull = convex_hull(&points);
            if hull.len() < 3 {
                return true;
            }
            (0..hull.len()).all(|i| {
                let a = &hull[i];
                let b = &hull[(i + 1) % hull.len()];
                points.iter().all(|p| cross_product(a, b, p) >= 0.0)
            })
        }
    }
}
