pub mod collision;
pub mod components;
pub mod config;
pub mod game_logic;
pub mod pathfinding;
pub mod plugins;
pub mod resources;

// Selective re-exports for external consumers

// Collision engine - game logic needs ad-hoc overlap checks for placement
pub use collision::{
    Circle, Hexagon, Rect, Shape, separation_pair, separation_vector, shapes_overlap,
};

// Errors
pub use game_logic::errors::{SkirmishError, SkirmishResult};

// Resolution pass - embedding loops without the ECS call the pure form
pub use game_logic::resolve::{DynamicBody, resolve_tick};

// Planner surface (crate:: disambiguates from the `pathfinding` dependency)
pub use crate::pathfinding::occupancy::{
    CellState, GridSpec, MeshDensity, MeshSet, ObstacleKind, StaticObstacle,
};
pub use crate::pathfinding::{DensityThresholds, Path, find_path, find_path_on};

// ECS integration
pub use plugins::MovementCorePlugin;
pub use resources::{StaticGeometry, WorldBounds};
