use bevy::math::Vec2;
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::config::range_types::{MovementSpeed, SlowdownDistance, StoppingDistance, UnitRadius};
use crate::pathfinding::occupancy::StaticObstacle;

/// All static solids of the loaded map: impassable terrain tiles, water and
/// placed structures. Rebuilt alongside the occupancy meshes on layout
/// changes; the resolution pass scans it every tick.
#[derive(Resource, Debug, Default, Clone)]
pub struct StaticGeometry(pub Vec<StaticObstacle>);

/// Playable world extent. Bodies are clamped inside after resolution.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl WorldBounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Bounds covering a world that starts at the top-left origin.
    pub fn from_world_size(size: Vec2) -> Self {
        Self::new(Vec2::ZERO, size)
    }

    pub fn clamp(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min, self.max)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x
            && point.y >= self.min.y && point.y <= self.max.y
    }
}

/// Movement tuning shared by all units.
#[derive(Resource, Debug, Clone, Serialize, Deserialize, Default)]
pub struct MovementSettings {
    pub default_speed: MovementSpeed,
    pub default_radius: UnitRadius,
    pub stopping_distance: StoppingDistance,
    pub slowdown_distance: SlowdownDistance,
}
