//! Occupancy meshes: blocked/free grids sampled from static geometry

use bevy::log::info;
use bevy::math::Vec2;
use bevy::prelude::Resource;

use crate::collision::Shape;
use crate::game_logic::errors::{SkirmishError, SkirmishResult};

use super::{Cell, DensityThresholds};

/// What kind of static geometry blocked a cell. Every obstacle handed to the
/// mesh builder is impassable; the kind is recorded so callers can tell
/// terrain from placed structures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    Terrain,
    Water,
    Structure,
}

/// A static solid: terrain tile, water body or placed building.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticObstacle {
    pub shape: Shape,
    pub kind: ObstacleKind,
}

impl StaticObstacle {
    pub fn new(shape: Shape, kind: ObstacleKind) -> Self {
        Self { shape, kind }
    }
}

/// State of one occupancy cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellState {
    #[default]
    Free,
    Blocked(ObstacleKind),
}

impl CellState {
    pub fn is_blocked(self) -> bool {
        matches!(self, Self::Blocked(_))
    }
}

/// Mesh resolution tier. `Fine`..`Base` carry 64/16/4/1 cells per base tile
/// and are what distance selection picks between; `Macro` is coarser than a
/// tile (one cell per 2x2 tiles) and serves long-range downgrades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshDensity {
    Fine,
    Dense,
    Quad,
    Base,
    Macro,
}

impl MeshDensity {
    /// The four tiers the planner selects between, finest first.
    pub const PLANNER_TIERS: [Self; 4] = [Self::Fine, Self::Dense, Self::Quad, Self::Base];

    /// World-space side length of one cell at this tier.
    pub fn cell_size(self, tile_size: f32) -> f32 {
        match self {
            Self::Fine => tile_size / 8.0,
            Self::Dense => tile_size / 4.0,
            Self::Quad => tile_size / 2.0,
            Self::Base => tile_size,
            Self::Macro => tile_size * 2.0,
        }
    }

    /// Number of cells spanning `tiles` base tiles along one axis.
    pub fn cells_across(self, tiles: u32) -> u32 {
        match self {
            Self::Fine => tiles * 8,
            Self::Dense => tiles * 4,
            Self::Quad => tiles * 2,
            Self::Base => tiles,
            Self::Macro => tiles.div_ceil(2),
        }
    }
}

/// Dimensions and tuning for one world's mesh set. Passed explicitly so
/// independent worlds (and parallel tests) never share hidden state.
#[derive(Debug, Clone)]
pub struct GridSpec {
    pub tiles_x: u32,
    pub tiles_y: u32,
    pub tile_size: f32,
    pub thresholds: DensityThresholds,
}

impl GridSpec {
    const MAX_TILES: u32 = 2048;

    pub fn new(tiles_x: u32, tiles_y: u32, tile_size: f32) -> SkirmishResult<Self> {
        if tiles_x == 0 || tiles_y == 0 {
            return Err(SkirmishError::InvalidGridSpec {
                reason: format!("grid must have at least one tile, got {tiles_x}x{tiles_y}"),
            });
        }
        if tiles_x > Self::MAX_TILES || tiles_y > Self::MAX_TILES {
            return Err(SkirmishError::InvalidGridSpec {
                reason: format!(
                    "grid exceeds {max}x{max} tiles: {tiles_x}x{tiles_y}",
                    max = Self::MAX_TILES
                ),
            });
        }
        if !(tile_size > 0.0 && tile_size.is_finite()) {
            return Err(SkirmishError::InvalidGridSpec {
                reason: format!("tile size must be positive and finite, got {tile_size}"),
            });
        }
        Ok(Self {
            tiles_x,
            tiles_y,
            tile_size,
            thresholds: DensityThresholds::for_tile_size(tile_size),
        })
    }

    pub fn with_thresholds(mut self, thresholds: DensityThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// World extent covered by the grid, from the top-left origin.
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(
            self.tiles_x as f32 * self.tile_size,
            self.tiles_y as f32 * self.tile_size,
        )
    }
}

/// One blocked/free grid at a single density tier. Row-major, row 0 at the
/// top of the map; read-only once built.
#[derive(Debug, Clone)]
pub struct OccupancyMesh {
    pub density: MeshDensity,
    pub width: u32,
    pub height: u32,
    pub cell_size: f32,
    cells: Vec<CellState>,
}

impl OccupancyMesh {
    fn build(density: MeshDensity, spec: &GridSpec, obstacles: &[StaticObstacle]) -> Self {
        let width = density.cells_across(spec.tiles_x);
        let height = density.cells_across(spec.tiles_y);
        let cell_size = density.cell_size(spec.tile_size);
        let mut cells = vec![CellState::Free; (width * height) as usize];

        // A cell is blocked iff its center falls inside a solid shape. Runs
        // once per map load or layout change, never per tick.
        for y in 0..height {
            for x in 0..width {
                let center = Vec2::new(
                    (x as f32 + 0.5) * cell_size,
                    (y as f32 + 0.5) * cell_size,
                );
                for obstacle in obstacles {
                    if obstacle.shape.contains_point(center) {
                        cells[(y * width + x) as usize] = CellState::Blocked(obstacle.kind);
                        break;
                    }
                }
            }
        }

        Self {
            density,
            width,
            height,
            cell_size,
            cells,
        }
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    pub fn state(&self, cell: Cell) -> CellState {
        if !self.in_bounds(cell) {
            return CellState::Blocked(ObstacleKind::Terrain);
        }
        self.cells[(cell.y * self.width + cell.x) as usize]
    }

    /// Out-of-bounds cells count as blocked.
    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.state(cell).is_blocked()
    }

    pub fn blocked_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_blocked()).count()
    }

    /// Convert a world position to its cell, `None` when outside the grid.
    pub fn world_to_cell(&self, world: Vec2) -> Option<Cell> {
        let x = (world.x / self.cell_size).floor();
        let y = (world.y / self.cell_size).floor();
        if x >= 0.0 && y >= 0.0 && x < self.width as f32 && y < self.height as f32 {
            Some(Cell::new(x as u32, y as u32))
        } else {
            None
        }
    }

    /// Convert a world position to the nearest in-bounds cell.
    pub fn world_to_cell_clamped(&self, world: Vec2) -> Cell {
        let x = (world.x / self.cell_size).floor() as i64;
        let y = (world.y / self.cell_size).floor() as i64;
        Cell::new(
            x.clamp(0, i64::from(self.width) - 1) as u32,
            y.clamp(0, i64::from(self.height) - 1) as u32,
        )
    }

    /// World-space center of a cell.
    pub fn cell_center(&self, cell: Cell) -> Vec2 {
        Vec2::new(
            (cell.x as f32 + 0.5) * self.cell_size,
            (cell.y as f32 + 0.5) * self.cell_size,
        )
    }
}

/// The full hierarchy of occupancy meshes for one world: the four planner
/// tiers plus the macro mesh, all derived from the same obstacle set.
#[derive(Debug, Clone, Resource)]
pub struct MeshSet {
    pub tile_size: f32,
    pub thresholds: DensityThresholds,
    meshes: [OccupancyMesh; 4],
    macro_mesh: OccupancyMesh,
}

impl MeshSet {
    /// Build every tier from the static obstacle set. Called on map load and
    /// whenever the static layout changes; meshes are read-only afterwards.
    pub fn build(spec: &GridSpec, obstacles: &[StaticObstacle]) -> SkirmishResult<Self> {
        // Re-validate so hand-assembled specs get the same checks
        let spec = GridSpec::new(spec.tiles_x, spec.tiles_y, spec.tile_size)?
            .with_thresholds(spec.thresholds);

        let meshes = MeshDensity::PLANNER_TIERS
            .map(|density| OccupancyMesh::build(density, &spec, obstacles));
        let macro_mesh = OccupancyMesh::build(MeshDensity::Macro, &spec, obstacles);

        for mesh in meshes.iter().chain(std::iter::once(&macro_mesh)) {
            let total = (mesh.width * mesh.height) as usize;
            info!(
                "Occupancy mesh {:?}: {}/{} cells blocked from {} obstacles",
                mesh.density,
                mesh.blocked_count(),
                total,
                obstacles.len()
            );
        }

        Ok(Self {
            tile_size: spec.tile_size,
            thresholds: spec.thresholds,
            meshes,
            macro_mesh,
        })
    }

    pub fn mesh(&self, density: MeshDensity) -> &OccupancyMesh {
        match density {
            MeshDensity::Fine => &self.meshes[0],
            MeshDensity::Dense => &self.meshes[1],
            MeshDensity::Quad => &self.meshes[2],
            MeshDensity::Base => &self.meshes[3],
            MeshDensity::Macro => &self.macro_mesh,
        }
    }

    pub fn macro_mesh(&self) -> &OccupancyMesh {
        &self.macro_mesh
    }

    /// World extent covered by the meshes, from the top-left origin.
    pub fn world_size(&self) -> Vec2 {
        let base = self.mesh(MeshDensity::Base);
        Vec2::new(
            base.width as f32 * base.cell_size,
            base.height as f32 * base.cell_size,
        )
    }
}
