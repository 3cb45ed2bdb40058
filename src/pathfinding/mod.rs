//! Hierarchical grid path planning over the occupancy meshes

use bevy::log::{debug, info, warn};
use bevy::math::Vec2;
use bevy::prelude::{Query, Res};
use pathfinding::prelude::astar;

use crate::components::{CollisionRadius, NavAgent, Position};

pub mod occupancy;

pub use occupancy::{MeshDensity, MeshSet, OccupancyMesh};

/// A single node in an occupancy mesh grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: u32,
    pub y: u32,
}

impl Cell {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Straight-line distance in cells, the A* heuristic.
    pub fn euclidean_distance(&self, other: &Cell) -> f32 {
        let dx = self.x as f32 - other.x as f32;
        let dy = self.y as f32 - other.y as f32;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Travel-distance cutoffs for density selection: short hops need
/// cell-accurate routing, long hauls only the coarse topology.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensityThresholds {
    pub fine_max: f32,
    pub dense_max: f32,
    pub quad_max: f32,
}

impl DensityThresholds {
    pub fn for_tile_size(tile_size: f32) -> Self {
        Self {
            fine_max: tile_size * 3.0,
            dense_max: tile_size * 10.0,
            quad_max: tile_size * 30.0,
        }
    }
}

impl Default for DensityThresholds {
    fn default() -> Self {
        Self::for_tile_size(8.0)
    }
}

/// Pick the mesh tier for a travel distance.
pub fn select_density(distance: f32, thresholds: &DensityThresholds) -> MeshDensity {
    if distance <= thresholds.fine_max {
        MeshDensity::Fine
    } else if distance <= thresholds.dense_max {
        MeshDensity::Dense
    } else if distance <= thresholds.quad_max {
        MeshDensity::Quad
    } else {
        MeshDensity::Base
    }
}

/// An ordered list of world-space waypoints, start first, owned by the
/// requesting unit and advanced as waypoints are reached. An empty path is
/// the planner's only failure signal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    waypoints: Vec<Vec2>,
    next: usize,
}

impl Path {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_waypoints(waypoints: Vec<Vec2>) -> Self {
        Self { waypoints, next: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    pub fn current_index(&self) -> usize {
        self.next
    }

    /// The waypoint currently steered toward, `None` once consumed.
    pub fn current_waypoint(&self) -> Option<Vec2> {
        self.waypoints.get(self.next).copied()
    }

    /// Advance past the current waypoint. Returns true while more remain.
    pub fn advance(&mut self) -> bool {
        self.next += 1;
        self.next < self.waypoints.len()
    }

    pub fn final_destination(&self) -> Option<Vec2> {
        self.waypoints.last().copied()
    }
}

const ORTHOGONAL_COST: u32 = 10;
const DIAGONAL_COST: u32 = 14;

const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Plan a path between two world positions, selecting the mesh tier from the
/// travel distance.
pub fn find_path(meshes: &MeshSet, start: Vec2, destination: Vec2) -> Path {
    let density = select_density(start.distance(destination), &meshes.thresholds);
    find_path_on(meshes.mesh(density), start, destination)
}

/// Plan a path on one specific mesh.
///
/// The start is a live unit's position and is never clamped; the destination
/// is clamped into mesh bounds. A blocked destination cell or an exhausted
/// search both yield an empty path; the caller decides whether to retry at
/// another density or drop the move order.
pub fn find_path_on(mesh: &OccupancyMesh, start: Vec2, destination: Vec2) -> Path {
    let Some(start_cell) = mesh.world_to_cell(start) else {
        warn!("Path request with out-of-bounds start ({}, {})", start.x, start.y);
        return Path::empty();
    };
    let goal_cell = mesh.world_to_cell_clamped(destination);

    debug!(
        "Path request ({:.1}, {:.1}) -> ({:.1}, {:.1}) on {:?}: cells ({}, {}) -> ({}, {})",
        start.x, start.y, destination.x, destination.y, mesh.density,
        start_cell.x, start_cell.y, goal_cell.x, goal_cell.y
    );

    if mesh.is_blocked(goal_cell) {
        debug!("Destination cell ({}, {}) is blocked", goal_cell.x, goal_cell.y);
        return Path::empty();
    }

    let Some((cells, _cost)) = astar(
        &start_cell,
        |cell| successors(mesh, *cell),
        |cell| (cell.euclidean_distance(&goal_cell) * 10.0) as u32,
        |cell| *cell == goal_cell,
    ) else {
        debug!(
            "Search exhausted without reaching ({}, {}) on {:?}",
            goal_cell.x, goal_cell.y, mesh.density
        );
        return Path::empty();
    };

    // Cells arrive already ordered start -> destination; waypoints keep that
    // order so the first entry is the snapped start center.
    Path::from_waypoints(cells.into_iter().map(|cell| mesh.cell_center(cell)).collect())
}

/// Walkable 8-neighborhood of a cell with step costs. A diagonal step is
/// dropped when both flanking orthogonal cells are blocked, so the search
/// never cuts through a solid corner; out-of-bounds counts as blocked.
fn successors(mesh: &OccupancyMesh, cell: Cell) -> Vec<(Cell, u32)> {
    let mut neighbors = Vec::with_capacity(8);
    for (dx, dy) in NEIGHBOR_OFFSETS {
        let Some(neighbor) = offset_cell(cell, dx, dy) else {
            continue;
        };
        if mesh.is_blocked(neighbor) {
            continue;
        }
        let diagonal = dx != 0 && dy != 0;
        if diagonal {
            let flank_a = offset_cell(cell, dx, 0);
            let flank_b = offset_cell(cell, 0, dy);
            let blocked_a = flank_a.is_none_or(|flank| mesh.is_blocked(flank));
            let blocked_b = flank_b.is_none_or(|flank| mesh.is_blocked(flank));
            if blocked_a && blocked_b {
                continue;
            }
        }
        let cost = if diagonal { DIAGONAL_COST } else { ORTHOGONAL_COST };
        neighbors.push((neighbor, cost));
    }
    neighbors
}

fn offset_cell(cell: Cell, dx: i64, dy: i64) -> Option<Cell> {
    let x = i64::from(cell.x) + dx;
    let y = i64::from(cell.y) + dy;
    if x < 0 || y < 0 {
        return None;
    }
    Some(Cell::new(x as u32, y as u32))
}

/// Plan paths for agents whose move order changed since the last plan.
pub fn plan_paths(meshes: Option<Res<MeshSet>>, mut agents: Query<(&Position, &mut NavAgent)>) {
    let Some(meshes) = meshes else {
        return;
    };
    for (position, mut agent) in agents.iter_mut() {
        let Some(destination) = agent.destination else {
            continue;
        };
        if !agent.needs_replan() {
            continue;
        }
        let path = find_path(&meshes, position.0, destination);
        if path.is_empty() {
            warn!(
                "No path from ({:.1}, {:.1}) to ({:.1}, {:.1}); keeping existing path",
                position.0.x, position.0.y, destination.x, destination.y
            );
            // Record the attempt; the planner does not retry across tiers
            agent.mark_planned(destination);
        } else {
            info!(
                "Planned path with {} waypoints to ({:.1}, {:.1})",
                path.len(),
                destination.x,
                destination.y
            );
            agent.set_path(path, destination);
        }
    }
}

/// Consume waypoints a unit has reached within its own collision radius;
/// a finished path clears the move order.
pub fn advance_waypoints(mut agents: Query<(&Position, &CollisionRadius, &mut NavAgent)>) {
    for (position, radius, mut agent) in agents.iter_mut() {
        let Some(waypoint) = agent.path.current_waypoint() else {
            continue;
        };
        if position.0.distance_squared(waypoint) <= radius.0 * radius.0 {
            if !agent.path.advance() {
                debug!("Path completed; clearing destination");
                agent.destination = None;
            }
        }
    }
}
