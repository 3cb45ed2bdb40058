//! Geometric shape primitives for collision testing and occupancy sampling

use bevy::math::Vec2;

/// Neighbor-direction bits for [`Rect::solid_neighbors`].
///
/// Bit layout runs clockwise from north. World coordinates are +x right,
/// +y down (grid row 0 = top), so north is negative y.
pub mod adjacency {
    pub const NORTH: u8 = 1 << 0;
    pub const NORTH_EAST: u8 = 1 << 1;
    pub const EAST: u8 = 1 << 2;
    pub const SOUTH_EAST: u8 = 1 << 3;
    pub const SOUTH: u8 = 1 << 4;
    pub const SOUTH_WEST: u8 = 1 << 5;
    pub const WEST: u8 = 1 << 6;
    pub const NORTH_WEST: u8 = 1 << 7;

    /// Map a neighbor offset (each component -1, 0 or 1) to its bit.
    /// Returns `None` for the zero offset.
    pub fn from_offset(dx: i32, dy: i32) -> Option<u8> {
        match (dx.signum(), dy.signum()) {
            (0, -1) => Some(NORTH),
            (1, -1) => Some(NORTH_EAST),
            (1, 0) => Some(EAST),
            (1, 1) => Some(SOUTH_EAST),
            (0, 1) => Some(SOUTH),
            (-1, 1) => Some(SOUTH_WEST),
            (-1, 0) => Some(WEST),
            (-1, -1) => Some(NORTH_WEST),
            (0, 0) => None,
            _ => unreachable!(),
        }
    }
}

/// A circle owned by a body with a center transform and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Boundary-inclusive containment test.
    pub fn contains_point(&self, point: Vec2) -> bool {
        (point - self.center).length_squared() <= self.radius * self.radius
    }
}

/// An axis-aligned rectangle anchored at its top-left corner.
///
/// `solid_neighbors` marks which of the 8 surrounding tiles are themselves
/// solid; separation against an edge shared with a solid neighbor is
/// suppressed so units are not shoved by the seam between two touching
/// impassable tiles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub width: f32,
    pub height: f32,
    pub solid_neighbors: u8,
}

impl Rect {
    pub fn new(origin: Vec2, width: f32, height: f32) -> Self {
        Self {
            origin,
            width,
            height,
            solid_neighbors: 0,
        }
    }

    pub fn with_solid_neighbors(mut self, mask: u8) -> Self {
        self.solid_neighbors = mask;
        self
    }

    pub fn min(&self) -> Vec2 {
        self.origin
    }

    pub fn max(&self) -> Vec2 {
        self.origin + Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.origin + Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Boundary-inclusive containment test.
    pub fn contains_point(&self, point: Vec2) -> bool {
        let max = self.max();
        point.x >= self.origin.x && point.x <= max.x && point.y >= self.origin.y && point.y <= max.y
    }

    /// Nearest point of the rectangle (interior included) to `point`.
    pub fn clamp_point(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min(), self.max())
    }
}

/// An axis-aligned hexagon: vertex at top and bottom, never rotated.
///
/// The hull is derived once from the owning body's width/height, so the
/// hexagon may be anisotropic (wider than tall or vice versa).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hexagon {
    pub center: Vec2,
    pub hull: [Vec2; 6],
}

impl Hexagon {
    /// Build the hull clockwise from the top vertex. The two side edges are
    /// vertical; the four slanted edges span a quarter of the height each.
    pub fn new(center: Vec2, width: f32, height: f32) -> Self {
        let hw = width * 0.5;
        let hh = height * 0.5;
        let qh = height * 0.25;
        let hull = [
            center + Vec2::new(0.0, -hh),
            center + Vec2::new(hw, -qh),
            center + Vec2::new(hw, qh),
            center + Vec2::new(0.0, hh),
            center + Vec2::new(-hw, qh),
            center + Vec2::new(-hw, -qh),
        ];
        Self { center, hull }
    }

    /// Convex containment: the point must fall on the same side of every
    /// hull edge. Boundary points count as inside.
    pub fn contains_point(&self, point: Vec2) -> bool {
        let mut sign = 0.0f32;
        for i in 0..6 {
            let a = self.hull[i];
            let b = self.hull[(i + 1) % 6];
            let cross = (b - a).perp_dot(point - a);
            if cross != 0.0 {
                if sign == 0.0 {
                    sign = cross.signum();
                } else if cross.signum() != sign {
                    return false;
                }
            }
        }
        true
    }

    /// Indices into `hull` of the 3 edges facing the given x position.
    /// The hexagon never rotates, so one x comparison against the center
    /// picks the facing side exactly.
    pub fn facing_edges(&self, x: f32) -> [(usize, usize); 3] {
        if x >= self.center.x {
            [(0, 1), (1, 2), (2, 3)]
        } else {
            [(3, 4), (4, 5), (5, 0)]
        }
    }
}

/// Shape of a collidable body, derived from the owning body's transform.
///
/// Recomputed whenever the owner moves: every tick for dynamic bodies, once
/// at placement for static ones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle(Circle),
    Rect(Rect),
    Hexagon(Hexagon),
}

impl Shape {
    pub fn circle(center: Vec2, radius: f32) -> Self {
        Self::Circle(Circle::new(center, radius))
    }

    pub fn rect(origin: Vec2, width: f32, height: f32) -> Self {
        Self::Rect(Rect::new(origin, width, height))
    }

    pub fn hexagon(center: Vec2, width: f32, height: f32) -> Self {
        Self::Hexagon(Hexagon::new(center, width, height))
    }

    /// Check if a world position is inside this shape.
    pub fn contains_point(&self, point: Vec2) -> bool {
        match self {
            Self::Circle(circle) => circle.contains_point(point),
            Self::Rect(rect) => rect.contains_point(point),
            Self::Hexagon(hexagon) => hexagon.contains_point(point),
        }
    }

    /// Axis-aligned bounds for cheap broad-phase rejection.
    pub fn bounds(&self) -> (Vec2, Vec2) {
        match self {
            Self::Circle(circle) => {
                let extent = Vec2::splat(circle.radius);
                (circle.center - extent, circle.center + extent)
            }
            Self::Rect(rect) => (rect.min(), rect.max()),
            Self::Hexagon(hexagon) => {
                let mut min = hexagon.hull[0];
                let mut max = hexagon.hull[0];
                for vertex in &hexagon.hull[1..] {
                    min = min.min(*vertex);
                    max = max.max(*vertex);
                }
                (min, max)
            }
        }
    }

    /// Geometric center used for the last-resort separation fallback.
    pub fn centroid(&self) -> Vec2 {
        match self {
            Self::Circle(circle) => circle.center,
            Self::Rect(rect) => rect.center(),
            Self::Hexagon(hexagon) => hexagon.center,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_contains_point() {
        let circle = Circle::new(Vec2::new(2.0, 2.0), 1.5);

        assert!(circle.contains_point(Vec2::new(2.0, 2.0)));
        assert!(circle.contains_point(Vec2::new(3.0, 2.0)));
        // Exactly on the boundary counts as inside
        assert!(circle.contains_point(Vec2::new(3.5, 2.0)));
        assert!(!circle.contains_point(Vec2::new(4.0, 2.0)));
    }

    #[test]
    fn test_rect_contains_point() {
        let rect = Rect::new(Vec2::new(1.0, 1.0), 4.0, 2.0);

        assert!(rect.contains_point(Vec2::new(3.0, 2.0)));
        assert!(rect.contains_point(Vec2::new(1.0, 1.0))); // corner
        assert!(rect.contains_point(Vec2::new(5.0, 3.0))); // opposite corner
        assert!(!rect.contains_point(Vec2::new(5.1, 2.0)));
        assert!(!rect.contains_point(Vec2::new(3.0, 0.9)));
    }

    #[test]
    fn test_rect_clamp_point() {
        let rect = Rect::new(Vec2::new(0.0, 0.0), 2.0, 2.0);

        assert_eq!(rect.clamp_point(Vec2::new(5.0, 1.0)), Vec2::new(2.0, 1.0));
        assert_eq!(rect.clamp_point(Vec2::new(-1.0, -1.0)), Vec2::ZERO);
        // Interior points are returned unchanged
        assert_eq!(rect.clamp_point(Vec2::new(1.0, 1.5)), Vec2::new(1.0, 1.5));
    }

    #[test]
    fn test_hexagon_hull_layout() {
        let hexagon = Hexagon::new(Vec2::new(10.0, 10.0), 4.0, 8.0);

        // Top and bottom vertices sit on the center's x axis
        assert_eq!(hexagon.hull[0], Vec2::new(10.0, 6.0));
        assert_eq!(hexagon.hull[3], Vec2::new(10.0, 14.0));
        // Side edges are vertical
        assert_eq!(hexagon.hull[1].x, hexagon.hull[2].x);
        assert_eq!(hexagon.hull[4].x, hexagon.hull[5].x);
        assert_eq!(hexagon.hull[1], Vec2::new(12.0, 8.0));
        assert_eq!(hexagon.hull[5], Vec2::new(8.0, 8.0));
    }

    #[test]
    fn test_hexagon_contains_point() {
        let hexagon = Hexagon::new(Vec2::new(0.0, 0.0), 4.0, 4.0);

        assert!(hexagon.contains_point(Vec2::ZERO));
        assert!(hexagon.contains_point(Vec2::new(1.9, 0.0)));
        assert!(!hexagon.contains_point(Vec2::new(2.1, 0.0)));
        // Inside the bounding box but beyond the slanted top-right edge
        assert!(!hexagon.contains_point(Vec2::new(1.9, -1.9)));
        // The top vertex itself is inside
        assert!(hexagon.contains_point(Vec2::new(0.0, -2.0)));
    }

    #[test]
    fn test_hexagon_facing_edges() {
        let hexagon = Hexagon::new(Vec2::new(5.0, 5.0), 2.0, 2.0);

        assert_eq!(hexagon.facing_edges(8.0), [(0, 1), (1, 2), (2, 3)]);
        assert_eq!(hexagon.facing_edges(1.0), [(3, 4), (4, 5), (5, 0)]);
        // A body exactly on the center line resolves against the right side
        assert_eq!(hexagon.facing_edges(5.0), [(0, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn test_adjacency_from_offset() {
        assert_eq!(adjacency::from_offset(0, -1), Some(adjacency::NORTH));
        assert_eq!(adjacency::from_offset(1, 1), Some(adjacency::SOUTH_EAST));
        assert_eq!(adjacency::from_offset(-1, 0), Some(adjacency::WEST));
        assert_eq!(adjacency::from_offset(0, 0), None);
    }

    #[test]
    fn test_shape_bounds() {
        let circle = Shape::circle(Vec2::new(5.0, 5.0), 2.0);
        assert_eq!(circle.bounds(), (Vec2::new(3.0, 3.0), Vec2::new(7.0, 7.0)));

        let rect = Shape::rect(Vec2::new(1.0, 2.0), 3.0, 4.0);
        assert_eq!(rect.bounds(), (Vec2::new(1.0, 2.0), Vec2::new(4.0, 6.0)));

        let hexagon = Shape::hexagon(Vec2::new(0.0, 0.0), 6.0, 4.0);
        assert_eq!(
            hexagon.bounds(),
            (Vec2::new(-3.0, -2.0), Vec2::new(3.0, 2.0))
        );
    }

    #[test]
    fn test_shape_centroid() {
        assert_eq!(
            Shape::rect(Vec2::new(0.0, 0.0), 4.0, 2.0).centroid(),
            Vec2::new(2.0, 1.0)
        );
        assert_eq!(
            Shape::hexagon(Vec2::new(3.0, 3.0), 2.0, 2.0).centroid(),
            Vec2::new(3.0, 3.0)
        );
    }
}
