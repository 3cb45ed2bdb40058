use bevy::math::Vec2;
use bevy::prelude::Component;
use derive_more::{Add, AddAssign, Display, From, Mul};

use crate::pathfinding::Path;

/// Marker for bodies the resolution pass may move. Static geometry is not an
/// entity; it lives in [`crate::resources::StaticGeometry`].
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct MobileUnit;

/// World position of a unit's center.
#[derive(Component, Debug, Clone, Copy, PartialEq, Add, AddAssign, From)]
pub struct Position(pub Vec2);

/// Position at the start of the previous integration step. The resolution
/// pass reads it to recover bodies that tunneled through thin geometry.
#[derive(Component, Debug, Clone, Copy, PartialEq, From)]
pub struct PrevPosition(pub Vec2);

/// Current velocity in world units per second.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Add, AddAssign, From)]
pub struct Velocity(pub Vec2);

#[derive(Component, Debug, Clone, Copy, PartialEq, PartialOrd, Mul, Display, From)]
pub struct MoveSpeed(pub f32);

#[derive(Component, Debug, Clone, Copy, PartialEq, PartialOrd, Mul, Display, From)]
pub struct CollisionRadius(pub f32);

impl MoveSpeed {
    pub fn new(value: f32) -> Self {
        Self(value.max(0.0))
    }
    pub const ZERO: MoveSpeed = MoveSpeed(0.0);
}

impl CollisionRadius {
    pub fn new(value: f32) -> Self {
        Self(value.max(0.0))
    }
}

// Custom math operations for Vec2 * MoveSpeed
impl std::ops::Mul<MoveSpeed> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: MoveSpeed) -> Self::Output {
        self * rhs.0
    }
}

/// Per-unit navigation state: the standing move order and the path planned
/// for it. The planner owns `path`; game logic only sets `destination`.
#[derive(Component, Debug, Default, Clone)]
pub struct NavAgent {
    pub destination: Option<Vec2>,
    pub path: Path,
    planned_for: Option<Vec2>,
}

impl NavAgent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a move order; the planner picks it up on the next tick.
    pub fn order_move(&mut self, destination: Vec2) {
        self.destination = Some(destination);
    }

    /// True when the standing order has no matching plan yet. A failed plan
    /// is recorded too; the planner does not retry on its own.
    pub fn needs_replan(&self) -> bool {
        self.destination != self.planned_for
    }

    pub fn set_path(&mut self, path: Path, destination: Vec2) {
        self.path = path;
        self.planned_for = Some(destination);
    }

    /// Record a planning attempt without replacing the current path.
    pub fn mark_planned(&mut self, destination: Vec2) {
        self.planned_for = Some(destination);
    }

    pub fn clear(&mut self) {
        self.destination = None;
        self.planned_for = None;
        self.path = Path::empty();
    }

    pub fn has_path(&self) -> bool {
        self.path.current_waypoint().is_some()
    }

    pub fn current_waypoint(&self) -> Option<Vec2> {
        self.path.current_waypoint()
    }
}
