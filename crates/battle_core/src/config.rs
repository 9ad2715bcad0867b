//! Per-session battle configuration.
//!
//! All values are static for the lifetime of a battle; there is no runtime
//! reconfiguration. The struct is serde-derived so headless runners can
//! embed it in scenario files.

use serde::{Deserialize, Serialize};

use crate::grid::{MapLayout, Terrain};
use crate::math::{fixed_serde, Fixed};

/// Movement cost charged for entering a tile, by terrain kind.
///
/// The default table keeps the original tuning, including entries for
/// terrains that the default blocked set makes unreachable (Tree, Occupied,
/// Stone). Those entries are latent configuration: they only matter to a
/// search whose blocked set differs from the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainCostTable {
    /// Cost of entering open ground.
    pub land: u32,
    /// Cost of entering tall grass.
    pub grass: u32,
    /// Cost of entering a tree tile.
    pub tree: u32,
    /// Cost of entering an occupied tile.
    pub occupied: u32,
    /// Cost of entering a stone tile.
    pub stone: u32,
    /// Cost of entering an undefined tile.
    pub undefined: u32,
}

impl TerrainCostTable {
    /// Cost of entering a tile of the given terrain kind.
    #[must_use]
    pub const fn cost_of(&self, terrain: Terrain) -> u32 {
        match terrain {
            Terrain::Land => self.land,
            Terrain::Grass => self.grass,
            Terrain::Tree => self.tree,
            Terrain::Occupied => self.occupied,
            Terrain::Stone => self.stone,
            Terrain::Undefined => self.undefined,
        }
    }
}

impl Default for TerrainCostTable {
    fn default() -> Self {
        Self {
            land: 10,
            grass: 15,
            tree: 100,
            occupied: 200,
            stone: 300,
            undefined: 0,
        }
    }
}

/// Configuration for one battle session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleConfig {
    /// Grid width in tiles.
    pub grid_width: i32,
    /// Grid height in tiles.
    pub grid_height: i32,
    /// Display-space layout of the map.
    pub layout: MapLayout,
    /// Per-terrain movement cost table.
    pub costs: TerrainCostTable,
    /// Heuristic scale: estimated cost per remaining Manhattan step.
    pub heuristic_scale: u32,
    /// Base step duration in seconds, divided by the mover's walk speed to
    /// get the per-step animation duration.
    #[serde(with = "fixed_serde")]
    pub step_base_duration: Fixed,
    /// Demo bootstrap: tapping an empty tile while idle spawns a unit
    /// there. Production callers leave this off and use explicit spawning.
    pub bootstrap_spawn: bool,
}

impl Default for BattleConfig {
    /// Default session: 15x9 grid of 64x64 tiles, original cost tuning,
    /// bootstrap spawning disabled.
    fn default() -> Self {
        Self {
            grid_width: 15,
            grid_height: 9,
            layout: MapLayout::default(),
            costs: TerrainCostTable::default(),
            heuristic_scale: 10,
            step_base_duration: Fixed::from_num(4),
            bootstrap_spawn: false,
        }
    }
}
