//! Battle units and their storage.
//!
//! The core owns only the data it needs for pathing and occupancy: hit
//! points, walk speed, facing, and the current cell. Everything visual
//! (sprites, animation state) belongs to the presentation layer.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::grid::Cell;
use crate::math::{fixed_serde, Fixed};
use crate::movement::Direction;

/// Unique identifier for units.
pub type UnitId = u64;

/// A controllable battle participant.
///
/// Invariant: a unit occupies exactly one tile, and after every completed
/// move step the tile's occupant reference and the unit's `cell` agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// Unique identifier.
    pub id: UnitId,
    /// Remaining hit points.
    pub hp: u32,
    /// Walk speed; per-step animation duration is base duration / speed.
    #[serde(with = "fixed_serde")]
    pub walk_speed: Fixed,
    /// Direction the unit is facing.
    pub facing: Direction,
    /// Current grid cell.
    pub cell: Cell,
    /// Draw-order value derived from the row, so units lower on the grid
    /// render in front.
    pub draw_priority: i32,
}

/// Parameters for spawning a new unit.
///
/// An explicit factory input: callers pass everything the unit needs, there
/// is no global unit registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitSpawnParams {
    /// Starting hit points.
    pub hp: u32,
    /// Walk speed. Must be positive.
    pub walk_speed: Fixed,
    /// Initial facing.
    pub facing: Direction,
}

impl Default for UnitSpawnParams {
    fn default() -> Self {
        Self {
            hp: 100,
            walk_speed: Fixed::ONE,
            facing: Direction::Right,
        }
    }
}

/// Storage for all units in a battle.
///
/// Uses a `HashMap` for O(1) lookup by id, with deterministic iteration via
/// sorted ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitStorage {
    units: HashMap<UnitId, Unit>,
    next_id: UnitId,
}

impl UnitStorage {
    /// Create empty unit storage.
    #[must_use]
    pub fn new() -> Self {
        Self {
            units: HashMap::new(),
            next_id: 1,
        }
    }

    /// Insert a new unit at a cell and return its id.
    ///
    /// # Panics
    ///
    /// Panics if the spawn parameters carry a non-positive walk speed.
    pub fn insert(&mut self, cell: Cell, params: UnitSpawnParams, draw_priority: i32) -> UnitId {
        assert!(
            params.walk_speed > Fixed::ZERO,
            "unit walk speed must be positive"
        );
        let id = self.next_id;
        self.next_id += 1;
        let unit = Unit {
            id,
            hp: params.hp,
            walk_speed: params.walk_speed,
            facing: params.facing,
            cell,
            draw_priority,
        };
        let previous = self.units.insert(id, unit);
        debug_assert!(previous.is_none(), "unit id {id} reused");
        id
    }

    /// Get a unit by id.
    #[must_use]
    pub fn get(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    /// Get a mutable reference to a unit by id.
    pub fn get_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.get_mut(&id)
    }

    /// Check if a unit exists.
    #[must_use]
    pub fn contains(&self, id: UnitId) -> bool {
        self.units.contains_key(&id)
    }

    /// Number of live units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Check if storage is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Get sorted unit ids for deterministic iteration.
    #[must_use]
    pub fn sorted_ids(&self) -> Vec<UnitId> {
        let mut ids: Vec<_> = self.units.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Iterate over all units (not in deterministic order).
    pub fn iter(&self) -> impl Iterator<Item = (&UnitId, &Unit)> {
        self.units.iter()
    }
}
