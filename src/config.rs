use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::game_logic::errors::SkirmishResult;
use crate::pathfinding::DensityThresholds;
use crate::pathfinding::occupancy::GridSpec;
use crate::resources::MovementSettings;

pub mod range_types;

use range_types::TileSize;

/// Top-level simulation configuration, loaded from TOML by the embedding
/// game and handed to the core as explicit context.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SimConfig {
    pub world: WorldSettings,
    pub planner: PlannerSettings,
    pub movement: MovementSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSettings {
    pub tiles_x: u32,
    pub tiles_y: u32,
    pub tile_size: TileSize,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            tiles_x: 64,
            tiles_y: 64,
            tile_size: TileSize::default(),
        }
    }
}

/// Density-selection cutoffs in tiles of travel distance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerSettings {
    pub fine_max_tiles: f32,
    pub dense_max_tiles: f32,
    pub quad_max_tiles: f32,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            fine_max_tiles: 3.0,
            dense_max_tiles: 10.0,
            quad_max_tiles: 30.0,
        }
    }
}

impl SimConfig {
    /// Grid spec for the occupancy mesh builder, thresholds converted from
    /// tiles to world units.
    pub fn grid_spec(&self) -> SkirmishResult<GridSpec> {
        let tile_size = self.world.tile_size.get();
        let thresholds = DensityThresholds {
            fine_max: self.planner.fine_max_tiles * tile_size,
            dense_max: self.planner.dense_max_tiles * tile_size,
            quad_max: self.planner.quad_max_tiles * tile_size,
        };
        Ok(GridSpec::new(self.world.tiles_x, self.world.tiles_y, tile_size)?
            .with_thresholds(thresholds))
    }
}

/// Load a config from disk; a missing file yields the defaults.
pub fn load_sim_config<P: AsRef<Path>>(path: P) -> SkirmishResult<SimConfig> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(SimConfig::default());
    }
    let contents = fs::read_to_string(path)?;
    Ok(toml::from_str(&contents)?)
}

pub fn save_sim_config<P: AsRef<Path>>(path: P, config: &SimConfig) -> SkirmishResult<()> {
    let contents = toml::to_string_pretty(config)?;
    if let Some(parent) = path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    Ok(())
}
