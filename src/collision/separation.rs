//! Penetration-resolution vectors for moving circles against other bodies

use bevy::math::Vec2;

use super::shapes::{Circle, Hexagon, Rect, Shape, adjacency};

/// Closest point on the segment `a..b` to `point`, projection clamped to the
/// segment. A zero-length segment degenerates to a point test.
pub fn closest_point_on_segment(a: Vec2, b: Vec2, point: Vec2) -> Vec2 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return a;
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Whether the segment `a..b` passes through the circle (boundary inclusive).
pub fn segment_intersects_circle(a: Vec2, b: Vec2, circle: &Circle) -> bool {
    let nearest = closest_point_on_segment(a, b, circle.center);
    (circle.center - nearest).length_squared() <= circle.radius * circle.radius
}

/// Minimal translation to push the moving circle out of `other`, or zero if
/// the two do not overlap.
///
/// `prev_center` is the circle's position at the previous tick. When the
/// center has tunneled fully inside `other` it tells us which edge was
/// crossed most recently; without it the only recourse is a radial push from
/// the centroid. All degenerate geometry resolves to the zero vector, never
/// NaN.
pub fn separation_vector(moving: &Circle, other: &Shape, prev_center: Vec2) -> Vec2 {
    match other {
        Shape::Circle(circle) => separation_from_circle(moving, circle, prev_center),
        Shape::Rect(rect) => separation_from_rect(moving, rect, prev_center),
        Shape::Hexagon(hexagon) => separation_from_hexagon(moving, hexagon, prev_center),
    }
}

/// Separation halves for two dynamic circles: each body receives half the
/// overlap along the axis connecting the centers, in opposite directions.
/// Equal mass for all bodies is a deliberate simplification.
pub fn separation_pair(a: &Circle, b: &Circle) -> (Vec2, Vec2) {
    let delta = b.center - a.center;
    let sum = a.radius + b.radius;
    let dist_sq = delta.length_squared();
    if dist_sq >= sum * sum {
        return (Vec2::ZERO, Vec2::ZERO);
    }
    let dist = dist_sq.sqrt();
    if dist == 0.0 {
        // Coincident centers leave no axis to split along
        return (Vec2::ZERO, Vec2::ZERO);
    }
    let direction = delta / dist;
    let half = (sum - dist) * 0.5;
    (-direction * half, direction * half)
}

fn separation_from_circle(moving: &Circle, other: &Circle, prev_center: Vec2) -> Vec2 {
    let delta = moving.center - other.center;
    let sum = moving.radius + other.radius;
    let dist_sq = delta.length_squared();
    if dist_sq >= sum * sum {
        return Vec2::ZERO;
    }
    if dist_sq > 0.0 {
        let dist = dist_sq.sqrt();
        return delta / dist * (sum - dist);
    }
    // Coincident centers: recover a direction from the previous position
    let direction = (prev_center - other.center).normalize_or_zero();
    direction * sum
}

fn separation_from_rect(moving: &Circle, rect: &Rect, prev_center: Vec2) -> Vec2 {
    let center = moving.center;
    let nearest = rect.clamp_point(center);
    if nearest == center {
        // Center engulfed by the rectangle (fast body tunneled in one tick)
        let escape = escape_through_crossed_edge(prev_center, rect.clamp_point(prev_center), center, moving.radius);
        return escape
            .unwrap_or_else(|| (center - rect.center()).normalize_or_zero() * moving.radius);
    }

    let delta = center - nearest;
    let dist_sq = delta.length_squared();
    if dist_sq >= moving.radius * moving.radius {
        return Vec2::ZERO;
    }

    // A nearest point on a seam shared with a solid neighbor must not push:
    // the tile actually overlapped is responsible for this body.
    if let Some(bit) = contact_side_bit(center, rect) {
        if rect.solid_neighbors & bit != 0 {
            return Vec2::ZERO;
        }
    }

    let dist = dist_sq.sqrt();
    delta / dist * (moving.radius - dist)
}

fn separation_from_hexagon(moving: &Circle, hexagon: &Hexagon, prev_center: Vec2) -> Vec2 {
    let center = moving.center;
    if hexagon.contains_point(center) {
        let escape = if hexagon.contains_point(prev_center) {
            None
        } else {
            let nearest_prev = closest_hull_point(hexagon, prev_center);
            escape_through_crossed_edge(prev_center, nearest_prev, center, moving.radius)
        };
        return escape
            .unwrap_or_else(|| (center - hexagon.center).normalize_or_zero() * moving.radius);
    }

    // Only the 3 edges facing the circle can hold the nearest point
    let mut nearest = Vec2::ZERO;
    let mut nearest_dist_sq = f32::INFINITY;
    for (start, end) in hexagon.facing_edges(center.x) {
        let candidate = closest_point_on_segment(hexagon.hull[start], hexagon.hull[end], center);
        let dist_sq = (center - candidate).length_squared();
        if dist_sq < nearest_dist_sq {
            nearest_dist_sq = dist_sq;
            nearest = candidate;
        }
    }

    if nearest_dist_sq >= moving.radius * moving.radius {
        return Vec2::ZERO;
    }
    let dist = nearest_dist_sq.sqrt();
    if dist == 0.0 {
        return Vec2::ZERO;
    }
    (center - nearest) / dist * (moving.radius - dist)
}

/// Translation that places an engulfed circle just outside the boundary
/// point its previous position crossed. `None` when the previous position
/// gives no usable direction (also engulfed, or exactly on the boundary).
fn escape_through_crossed_edge(
    prev_center: Vec2,
    boundary_near_prev: Vec2,
    center: Vec2,
    radius: f32,
) -> Option<Vec2> {
    if boundary_near_prev == prev_center {
        return None;
    }
    let direction = (prev_center - boundary_near_prev).normalize_or_zero();
    if direction == Vec2::ZERO {
        return None;
    }
    Some(boundary_near_prev + direction * radius - center)
}

/// Which side of the rectangle a clamped exterior point touched, as an
/// adjacency bit. Corners map to the diagonal directions.
fn contact_side_bit(center: Vec2, rect: &Rect) -> Option<u8> {
    let min = rect.min();
    let max = rect.max();
    let dx = if center.x < min.x {
        -1
    } else if center.x > max.x {
        1
    } else {
        0
    };
    let dy = if center.y < min.y {
        -1
    } else if center.y > max.y {
        1
    } else {
        0
    };
    adjacency::from_offset(dx, dy)
}

fn closest_hull_point(hexagon: &Hexagon, point: Vec2) -> Vec2 {
    let mut nearest = hexagon.hull[0];
    let mut nearest_dist_sq = f32::INFINITY;
    for i in 0..6 {
        let candidate =
            closest_point_on_segment(hexagon.hull[i], hexagon.hull[(i + 1) % 6], point);
        let dist_sq = (point - candidate).length_squared();
        if dist_sq < nearest_dist_sq {
            nearest_dist_sq = dist_sq;
            nearest = candidate;
        }
    }
    nearest
}
