//! Shape-vs-shape intersection tests and separation vectors

pub mod separation;
pub mod shapes;

pub use separation::{
    closest_point_on_segment, segment_intersects_circle, separation_pair, separation_vector,
};
pub use shapes::{Circle, Hexagon, Rect, Shape, adjacency};

use bevy::math::Vec2;

/// Yes/no overlap test between any two shapes.
///
/// Touching boundaries do not count as overlap, matching the separation
/// functions which return zero for just-touching bodies. Circle pairs and
/// AABB pairs are commutative; hexagon-vs-rect and hexagon-vs-hexagon fall
/// back to a bounds test, which is all placement validation needs.
pub fn shapes_overlap(a: &Shape, b: &Shape) -> bool {
    match (a, b) {
        (Shape::Circle(ca), Shape::Circle(cb)) => circles_overlap(ca, cb),
        (Shape::Circle(circle), Shape::Rect(rect))
        | (Shape::Rect(rect), Shape::Circle(circle)) => circle_rect_overlap(circle, rect),
        (Shape::Circle(circle), Shape::Hexagon(hexagon))
        | (Shape::Hexagon(hexagon), Shape::Circle(circle)) => {
            circle_hexagon_overlap(circle, hexagon)
        }
        (Shape::Rect(ra), Shape::Rect(rb)) => {
            aabb_overlap(ra.min(), ra.max(), rb.min(), rb.max())
        }
        _ => {
            let (a_min, a_max) = a.bounds();
            let (b_min, b_max) = b.bounds();
            aabb_overlap(a_min, a_max, b_min, b_max)
        }
    }
}

fn circles_overlap(a: &Circle, b: &Circle) -> bool {
    let sum = a.radius + b.radius;
    (b.center - a.center).length_squared() < sum * sum
}

fn circle_rect_overlap(circle: &Circle, rect: &Rect) -> bool {
    let nearest = rect.clamp_point(circle.center);
    (circle.center - nearest).length_squared() < circle.radius * circle.radius
        || rect.contains_point(circle.center)
}

fn circle_hexagon_overlap(circle: &Circle, hexagon: &Hexagon) -> bool {
    if hexagon.contains_point(circle.center) {
        return true;
    }
    for i in 0..6 {
        let nearest = closest_point_on_segment(
            hexagon.hull[i],
            hexagon.hull[(i + 1) % 6],
            circle.center,
        );
        if (circle.center - nearest).length_squared() < circle.radius * circle.radius {
            return true;
        }
    }
    false
}

fn aabb_overlap(a_min: Vec2, a_max: Vec2, b_min: Vec2, b_max: Vec2) -> bool {
    a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_circle_overlap() {
        let a = Shape::circle(Vec2::ZERO, 1.0);
        let b = Shape::circle(Vec2::new(1.5, 0.0), 1.0);
        let c = Shape::circle(Vec2::new(3.0, 0.0), 1.0);

        assert!(shapes_overlap(&a, &b));
        assert!(!shapes_overlap(&a, &c));
        // Touching at exactly r_a + r_b is not overlap
        let touching = Shape::circle(Vec2::new(2.0, 0.0), 1.0);
        assert!(!shapes_overlap(&a, &touching));
    }

    #[test]
    fn test_circle_rect_overlap_is_commutative() {
        let circle = Shape::circle(Vec2::new(4.5, 1.0), 1.0);
        let rect = Shape::rect(Vec2::ZERO, 4.0, 2.0);

        assert!(shapes_overlap(&circle, &rect));
        assert!(shapes_overlap(&rect, &circle));

        let far = Shape::circle(Vec2::new(8.0, 1.0), 1.0);
        assert!(!shapes_overlap(&far, &rect));
    }

    #[test]
    fn test_circle_inside_rect_overlaps() {
        let circle = Shape::circle(Vec2::new(2.0, 1.0), 0.1);
        let rect = Shape::rect(Vec2::ZERO, 4.0, 2.0);
        assert!(shapes_overlap(&circle, &rect));
    }

    #[test]
    fn test_rect_rect_overlap() {
        let a = Shape::rect(Vec2::ZERO, 4.0, 4.0);
        let b = Shape::rect(Vec2::new(3.0, 3.0), 4.0, 4.0);
        let c = Shape::rect(Vec2::new(5.0, 5.0), 4.0, 4.0);

        assert!(shapes_overlap(&a, &b));
        assert!(shapes_overlap(&b, &a));
        assert!(!shapes_overlap(&a, &c));
        // Shared edge only is not overlap
        let edge = Shape::rect(Vec2::new(4.0, 0.0), 4.0, 4.0);
        assert!(!shapes_overlap(&a, &edge));
    }

    #[test]
    fn test_circle_hexagon_overlap() {
        let hexagon = Shape::hexagon(Vec2::ZERO, 4.0, 4.0);

        assert!(shapes_overlap(&Shape::circle(Vec2::ZERO, 0.5), &hexagon));
        assert!(shapes_overlap(
            &Shape::circle(Vec2::new(2.5, 0.0), 1.0),
            &hexagon
        ));
        assert!(!shapes_overlap(
            &Shape::circle(Vec2::new(4.0, 0.0), 1.0),
            &hexagon
        ));
    }

    #[test]
    fn test_hexagon_rect_falls_back_to_bounds() {
        let hexagon = Shape::hexagon(Vec2::new(2.0, 2.0), 4.0, 4.0);
        let near = Shape::rect(Vec2::new(3.0, 3.0), 2.0, 2.0);
        let far = Shape::rect(Vec2::new(10.0, 10.0), 2.0, 2.0);

        assert!(shapes_overlap(&hexagon, &near));
        assert!(!shapes_overlap(&hexagon, &far));
    }
}
