//! Per-tick separation of moving bodies from static geometry and each other

use bevy::math::Vec2;
use bevy::prelude::{Query, Res, With};

use crate::collision::{Circle, separation_pair, separation_vector};
use crate::components::{CollisionRadius, MobileUnit, Position, PrevPosition};
use crate::pathfinding::occupancy::StaticObstacle;
use crate::resources::{StaticGeometry, WorldBounds};

/// Snapshot of one moving body for the resolution pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DynamicBody {
    pub position: Vec2,
    pub prev_position: Vec2,
    pub radius: f32,
}

impl DynamicBody {
    pub fn new(position: Vec2, prev_position: Vec2, radius: f32) -> Self {
        Self {
            position,
            prev_position,
            radius,
        }
    }

    fn circle(&self) -> Circle {
        Circle::new(self.position, self.radius)
    }
}

/// Resolve every body against static geometry and every other body, then
/// apply the summed translations and clamp into world bounds.
///
/// Both passes read the positions the bodies entered the tick with; nothing
/// is written until all pairs have been evaluated, so the outcome does not
/// depend on body order. Residual overlap is carried to the next tick rather
/// than iterated away, so the solver is eventually consistent.
pub fn resolve_tick(bodies: &mut [DynamicBody], statics: &[StaticObstacle], bounds: &WorldBounds) {
    let mut pushes = vec![Vec2::ZERO; bodies.len()];

    // Static pass
    for (i, body) in bodies.iter().enumerate() {
        let circle = body.circle();
        for obstacle in statics {
            if !near(&circle, obstacle) {
                continue;
            }
            pushes[i] += separation_vector(&circle, &obstacle.shape, body.prev_position);
        }
    }

    // Dynamic pass: each unordered pair once, half the overlap to each side
    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            let (push_i, push_j) = separation_pair(&bodies[i].circle(), &bodies[j].circle());
            pushes[i] += push_i;
            pushes[j] += push_j;
        }
    }

    for (body, push) in bodies.iter_mut().zip(pushes) {
        body.position = bounds.clamp(body.position + push);
    }
}

/// Broad-phase rejection: the obstacle's AABB inflated by the body radius.
fn near(circle: &Circle, obstacle: &StaticObstacle) -> bool {
    let (min, max) = obstacle.shape.bounds();
    circle.center.x >= min.x - circle.radius
        && circle.center.x <= max.x + circle.radius
        && circle.center.y >= min.y - circle.radius
        && circle.center.y <= max.y + circle.radius
}

/// Gather mobile units into the pure resolution pass and write back the
/// corrected positions. Runs after integration, on the integrated positions
/// plus the pre-integration snapshots.
pub fn resolve_collisions(
    statics: Option<Res<StaticGeometry>>,
    bounds: Option<Res<WorldBounds>>,
    mut units: Query<(&mut Position, &PrevPosition, &CollisionRadius), With<MobileUnit>>,
) {
    let Some(bounds) = bounds else {
        return;
    };
    let empty = StaticGeometry::default();
    let statics = statics.as_deref().unwrap_or(&empty);

    let mut bodies: Vec<DynamicBody> = units
        .iter()
        .map(|(position, prev_position, radius)| {
            DynamicBody::new(position.0, prev_position.0, radius.0)
        })
        .collect();

    resolve_tick(&mut bodies, &statics.0, &bounds);

    // Query iteration order is stable within the system run, so the writes
    // line up with the snapshot order.
    for ((mut position, _, _), body) in units.iter_mut().zip(bodies) {
        position.0 = body.position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::Shape;
    use crate::pathfinding::occupancy::ObstacleKind;
    use approx::assert_relative_eq;

    fn open_bounds() -> WorldBounds {
        WorldBounds::new(Vec2::ZERO, Vec2::new(512.0, 512.0))
    }

    fn wall(origin: Vec2, width: f32, height: f32) -> StaticObstacle {
        StaticObstacle::new(Shape::rect(origin, width, height), ObstacleKind::Structure)
    }

    #[test]
    fn test_static_pass_pushes_body_out() {
        let mut bodies = [DynamicBody::new(Vec2::new(9.5, 5.0), Vec2::new(8.5, 5.0), 1.0)];
        let statics = [wall(Vec2::new(10.0, 0.0), 4.0, 10.0)];

        resolve_tick(&mut bodies, &statics, &open_bounds());

        assert_relative_eq!(bodies[0].position.x, 9.0, epsilon = 1e-6);
        assert_relative_eq!(bodies[0].position.y, 5.0, epsilon = 1e-6);
    }

    #[test]
    fn test_resolution_is_idempotent_once_separated() {
        let mut bodies = [DynamicBody::new(Vec2::new(9.5, 5.0), Vec2::new(8.5, 5.0), 1.0)];
        let statics = [wall(Vec2::new(10.0, 0.0), 4.0, 10.0)];
        let bounds = open_bounds();

        resolve_tick(&mut bodies, &statics, &bounds);
        let settled = bodies[0].position;

        for _ in 0..3 {
            bodies[0].prev_position = bodies[0].position;
            resolve_tick(&mut bodies, &statics, &bounds);
            assert_eq!(bodies[0].position, settled);
        }
    }

    #[test]
    fn test_dynamic_pair_splits_symmetrically() {
        let r = 1.0;
        let mut bodies = [
            DynamicBody::new(Vec2::new(10.0, 10.0), Vec2::new(10.0, 10.0), r),
            DynamicBody::new(Vec2::new(11.5, 10.0), Vec2::new(11.5, 10.0), r),
        ];

        resolve_tick(&mut bodies, &[], &open_bounds());

        // Overlap of 0.5 split evenly: each body moves 0.25 apart
        assert_relative_eq!(bodies[0].position.x, 9.75, epsilon = 1e-6);
        assert_relative_eq!(bodies[1].position.x, 11.75, epsilon = 1e-6);
        assert_relative_eq!(
            bodies[1].position.x - bodies[0].position.x,
            2.0 * r,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_touching_pair_is_left_alone() {
        let positions = [Vec2::new(10.0, 10.0), Vec2::new(12.0, 10.0)];
        let mut bodies = [
            DynamicBody::new(positions[0], positions[0], 1.0),
            DynamicBody::new(positions[1], positions[1], 1.0),
        ];

        resolve_tick(&mut bodies, &[], &open_bounds());

        assert_eq!(bodies[0].position, positions[0]);
        assert_eq!(bodies[1].position, positions[1]);
    }

    #[test]
    fn test_resolution_is_order_independent() {
        let statics = [wall(Vec2::new(10.0, 0.0), 4.0, 20.0)];
        let bounds = open_bounds();

        let a = DynamicBody::new(Vec2::new(9.5, 5.0), Vec2::new(8.5, 5.0), 1.0);
        let b = DynamicBody::new(Vec2::new(9.0, 5.5), Vec2::new(8.0, 5.5), 1.0);

        let mut forward = [a, b];
        let mut reversed = [b, a];
        resolve_tick(&mut forward, &statics, &bounds);
        resolve_tick(&mut reversed, &statics, &bounds);

        assert_eq!(forward[0].position, reversed[1].position);
        assert_eq!(forward[1].position, reversed[0].position);
    }

    #[test]
    fn test_positions_clamped_into_world_bounds() {
        let bounds = WorldBounds::new(Vec2::ZERO, Vec2::new(20.0, 20.0));
        // A pair straddling the edge gets pushed, then clamped
        let mut bodies = [
            DynamicBody::new(Vec2::new(0.2, 10.0), Vec2::new(0.2, 10.0), 1.0),
            DynamicBody::new(Vec2::new(-0.2, 10.0), Vec2::new(-0.2, 10.0), 1.0),
        ];

        resolve_tick(&mut bodies, &[], &bounds);

        for body in &bodies {
            assert!(body.position.x >= 0.0 && body.position.x <= 20.0);
            assert!(body.position.y >= 0.0 && body.position.y <= 20.0);
        }
    }

    #[test]
    fn test_far_bodies_are_untouched() {
        let statics = [wall(Vec2::new(100.0, 100.0), 8.0, 8.0)];
        let start = Vec2::new(10.0, 10.0);
        let mut bodies = [DynamicBody::new(start, start, 1.0)];

        resolve_tick(&mut bodies, &statics, &open_bounds());

        assert_eq!(bodies[0].position, start);
    }

    #[test]
    fn test_static_and_dynamic_pushes_accumulate() {
        // Body squeezed between a wall on the east and a body on the west
        let statics = [wall(Vec2::new(10.0, 0.0), 4.0, 20.0)];
        let mut bodies = [
            DynamicBody::new(Vec2::new(9.5, 5.0), Vec2::new(8.5, 5.0), 1.0),
            DynamicBody::new(Vec2::new(8.0, 5.0), Vec2::new(8.0, 5.0), 1.0),
        ];

        resolve_tick(&mut bodies, &statics, &open_bounds());

        // Wall pushes west, neighbor pushes east; both contribute
        let wall_push = -0.5;
        let pair_push = 0.25;
        assert_relative_eq!(bodies[0].position.x, 9.5 + wall_push + pair_push, epsilon = 1e-6);
        assert_relative_eq!(bodies[1].position.x, 8.0 - pair_push, epsilon = 1e-6);
    }
}
