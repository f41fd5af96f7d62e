//! 2D overlap predicates for simulation collision tests.
//!
//! All predicates are pure functions over positions and radii so they
//! can be called from any thread and unit tested without fixtures.
//! Distance comparisons are inclusive, so touching shapes overlap;
//! position checks along a segment's span are strict.

use crate::math::{Point2, Vec2};

/// Tests two circles for overlap.
///
/// Compares squared centre distance against the squared radius sum,
/// so boundary contact (distance exactly equal to the radius sum)
/// reports an overlap.
#[must_use]
pub fn circles_overlap(center_a: Point2, radius_a: f32, center_b: Point2, radius_b: f32) -> bool {
    let radius_sum = radius_a + radius_b;
    (center_b - center_a).norm_squared() <= radius_sum * radius_sum
}

/// Tests a circle against a line segment.
///
/// Projects the circle centre onto the segment's supporting line. The
/// overlap holds only when the projection lands strictly inside the
/// segment's span and the centre sits within `radius` of the projected
/// point. A supporting line that passes close to the centre therefore
/// does not count when the segment itself ends short of the circle,
/// and neither does a projection landing exactly on an endpoint.
#[must_use]
pub fn circle_meets_segment(center: Point2, radius: f32, start: Point2, end: Point2) -> bool {
    let span: Vec2 = end - start;
    let length_squared = span.norm_squared();
    if length_squared <= f32::EPSILON {
        // Degenerate segment, fall back to a point test.
        return circles_overlap(center, radius, start, 0.0);
    }

    let t = (center - start).dot(&span) / length_squared;
    if t <= 0.0 || t >= 1.0 {
        return false;
    }

    let projected = start + span * t;
    (center - projected).norm_squared() <= radius * radius
}

/// Tests a convex hull of vertices against a circle.
///
/// `hull_center` and `hull_radius` describe the hull's bounding circle
/// and feed a cheap rejection first: pairs whose centres sit farther
/// apart than three times the combined radius cannot touch and are
/// dismissed without visiting the vertices. Past that gate the hull
/// overlaps the circle when any vertex lies strictly inside it or any
/// edge, the closing edge included, meets it.
///
/// A circle buried entirely inside the hull without reaching a vertex
/// or an edge reports no overlap. For hulls that are not huge relative
/// to their partners that case cannot arise, which is the trade this
/// predicate makes for staying linear in the vertex count.
#[must_use]
pub fn hull_overlaps_circle(
    hull: &[Point2],
    hull_center: Point2,
    hull_radius: f32,
    center: Point2,
    radius: f32,
) -> bool {
    let reject_range = 3.0 * (hull_radius + radius);
    if (center - hull_center).norm_squared() > reject_range * reject_range {
        return false;
    }

    let radius_squared = radius * radius;
    if hull
        .iter()
        .any(|&vertex| (center - vertex).norm_squared() < radius_squared)
    {
        return true;
    }

    hull.iter().enumerate().any(|(i, &start)| {
        let end = hull[(i + 1) % hull.len()];
        circle_meets_segment(center, radius, start, end)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn triangle() -> [Point2; 3] {
        [
            Point2::new(10.0, 0.0),
            Point2::new(-10.0, -8.0),
            Point2::new(-10.0, 8.0),
        ]
    }

    #[test]
    fn test_circles_overlap_when_close() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(3.0, 4.0);
        assert!(circles_overlap(a, 3.0, b, 3.0));
        assert!(!circles_overlap(a, 2.0, b, 2.0));
    }

    #[test]
    fn test_circles_touching_counts_as_overlap() {
        // Centre distance of exactly radius_a + radius_b.
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(5.0, 0.0);
        assert!(circles_overlap(a, 2.0, b, 3.0));
    }

    #[test]
    fn test_circles_overlap_is_symmetric() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let a = Point2::new(rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0));
            let b = Point2::new(rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0));
            let ra = rng.gen_range(0.1..30.0);
            let rb = rng.gen_range(0.1..30.0);
            assert_eq!(
                circles_overlap(a, ra, b, rb),
                circles_overlap(b, rb, a, ra),
                "asymmetric result for a={a:?} ra={ra} b={b:?} rb={rb}",
            );
        }
    }

    #[test]
    fn test_segment_hit_through_perpendicular() {
        let start = Point2::new(-10.0, 5.0);
        let end = Point2::new(10.0, 5.0);
        assert!(circle_meets_segment(Point2::new(0.0, 0.0), 6.0, start, end));
        assert!(!circle_meets_segment(Point2::new(0.0, 0.0), 4.0, start, end));
    }

    #[test]
    fn test_segment_span_short_of_circle_misses() {
        // The supporting line runs straight through the centre, but the
        // segment itself stops well before the circle.
        let start = Point2::new(20.0, 0.0);
        let end = Point2::new(40.0, 0.0);
        assert!(!circle_meets_segment(Point2::new(0.0, 0.0), 5.0, start, end));
    }

    #[test]
    fn test_segment_projection_on_endpoint_misses() {
        let start = Point2::new(3.0, 0.0);
        let end = Point2::new(10.0, 0.0);
        // A centre projecting exactly onto the start endpoint falls
        // outside the open span, nudging it inward counts again.
        assert!(!circle_meets_segment(Point2::new(3.0, 1.0), 2.0, start, end));
        assert!(circle_meets_segment(Point2::new(3.5, 1.0), 2.0, start, end));
    }

    #[test]
    fn test_degenerate_segment_acts_as_point() {
        let point = Point2::new(4.0, 0.0);
        assert!(circle_meets_segment(Point2::new(0.0, 0.0), 5.0, point, point));
        assert!(!circle_meets_segment(Point2::new(0.0, 0.0), 3.0, point, point));
    }

    #[test]
    fn test_hull_vertex_inside_circle_hits() {
        let hull = triangle();
        let center = Point2::new(12.0, 0.0);
        assert!(hull_overlaps_circle(
            &hull,
            Point2::origin(),
            10.0,
            center,
            3.0
        ));
    }

    #[test]
    fn test_hull_edge_crossing_circle_hits() {
        let hull = triangle();
        // Sits against the rear edge between (-10,-8) and (-10,8),
        // away from every vertex.
        let center = Point2::new(-13.0, 0.0);
        assert!(hull_overlaps_circle(
            &hull,
            Point2::origin(),
            10.0,
            center,
            4.0
        ));
    }

    #[test]
    fn test_hull_far_circle_misses() {
        let hull = triangle();
        let center = Point2::new(200.0, 200.0);
        assert!(!hull_overlaps_circle(
            &hull,
            Point2::origin(),
            10.0,
            center,
            5.0
        ));
    }

    #[test]
    fn test_hull_reject_gate_uses_tripled_radius_sum() {
        let hull = triangle();
        // Inside the rejection range but touching nothing.
        let near_miss = Point2::new(0.0, 30.0);
        assert!(!hull_overlaps_circle(
            &hull,
            Point2::origin(),
            10.0,
            near_miss,
            2.0
        ));
        // Beyond the gate entirely.
        let far = Point2::new(0.0, 37.0);
        assert!(!hull_overlaps_circle(&hull, Point2::origin(), 10.0, far, 2.0));
    }
}
