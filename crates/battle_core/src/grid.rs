//! Tile grid storage and display-space conversion.
//!
//! The grid is the single shared mutable resource of the battle core. All
//! access goes through the bounds-checked accessors here; no other module
//! indexes tile storage directly.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{BattleError, Result};
use crate::math::{fixed_serde, Fixed, Vec2Fixed};
use crate::unit::UnitId;

/// Terrain kinds for battle tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Terrain {
    /// Tile content not yet assigned. Never enterable.
    Undefined,
    /// Open ground, the cheapest terrain to cross.
    #[default]
    Land,
    /// Tall grass, slightly slower than open ground.
    Grass,
    /// A tree blocks the tile.
    Tree,
    /// A stone blocks the tile.
    Stone,
    /// A unit is standing on the tile.
    Occupied,
}

impl Terrain {
    /// Returns true if units can never enter a tile of this kind.
    ///
    /// These kinds are seeded into the pathfinder's closed set before the
    /// search starts.
    #[must_use]
    pub const fn blocks_movement(self) -> bool {
        matches!(self, Self::Tree | Self::Stone | Self::Occupied | Self::Undefined)
    }

    /// Canonical single-character form, used by scenario files and debug
    /// renderers.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Undefined => '?',
            Self::Land => '.',
            Self::Grass => ',',
            Self::Tree => 'T',
            Self::Stone => 'S',
            Self::Occupied => 'U',
        }
    }

    /// Parse the canonical single-character form.
    #[must_use]
    pub const fn from_glyph(c: char) -> Option<Self> {
        match c {
            '?' => Some(Self::Undefined),
            '.' => Some(Self::Land),
            ',' => Some(Self::Grass),
            'T' => Some(Self::Tree),
            'S' => Some(Self::Stone),
            'U' => Some(Self::Occupied),
            _ => None,
        }
    }
}

/// A grid cell coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cell {
    /// Column, increasing to the right.
    pub x: i32,
    /// Row, increasing upward.
    pub y: i32,
}

impl Cell {
    /// Create a new cell coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another cell.
    #[must_use]
    pub const fn manhattan_distance(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One tile of the battle map.
///
/// Invariant: `occupant` is `Some` iff `terrain` is [`Terrain::Occupied`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    cell: Cell,
    terrain: Terrain,
    occupant: Option<UnitId>,
}

impl Tile {
    /// The tile's grid coordinates.
    #[must_use]
    pub const fn cell(&self) -> Cell {
        self.cell
    }

    /// The tile's terrain kind.
    #[must_use]
    pub const fn terrain(&self) -> Terrain {
        self.terrain
    }

    /// The unit standing on this tile, if any.
    #[must_use]
    pub const fn occupant(&self) -> Option<UnitId> {
        self.occupant
    }
}

/// Dense tile storage for one battle map.
///
/// Tiles are created once at construction (all [`Terrain::Land`]) and live
/// for the whole battle; only their terrain and occupant change. Storage is
/// column-major (`x * height + y`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Create a new grid with every tile set to [`Terrain::Land`].
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is not positive.
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0, "TileGrid width must be positive");
        assert!(height > 0, "TileGrid height must be positive");

        let mut tiles = Vec::with_capacity((width * height) as usize);
        for x in 0..width {
            for y in 0..height {
                tiles.push(Tile {
                    cell: Cell::new(x, y),
                    terrain: Terrain::Land,
                    occupant: None,
                });
            }
        }
        Self {
            width,
            height,
            tiles,
        }
    }

    /// Grid width in tiles.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Grid height in tiles.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Pure bounds check, no side effects.
    #[must_use]
    pub const fn is_inside(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width && cell.y < self.height
    }

    /// Convert a cell to its storage index. Caller must bounds-check first.
    #[inline]
    fn index(&self, cell: Cell) -> usize {
        (cell.x * self.height + cell.y) as usize
    }

    /// Get the tile at a cell.
    ///
    /// # Errors
    ///
    /// Returns [`BattleError::OutOfBounds`] for coordinates outside the grid.
    pub fn tile_at(&self, cell: Cell) -> Result<&Tile> {
        if !self.is_inside(cell) {
            return Err(BattleError::OutOfBounds {
                x: cell.x,
                y: cell.y,
            });
        }
        let tile = &self.tiles[self.index(cell)];
        debug_assert_eq!(tile.cell, cell, "tile coordinates drifted from grid position");
        Ok(tile)
    }

    /// Overwrite the terrain and occupant of the tile at a cell.
    ///
    /// # Errors
    ///
    /// Returns [`BattleError::OutOfBounds`] for coordinates outside the grid.
    ///
    /// # Panics
    ///
    /// Panics if `occupant` disagrees with `terrain`: an occupant reference
    /// is present iff the terrain is [`Terrain::Occupied`].
    pub fn set_tile_content(
        &mut self,
        cell: Cell,
        terrain: Terrain,
        occupant: Option<UnitId>,
    ) -> Result<()> {
        assert_eq!(
            occupant.is_some(),
            terrain == Terrain::Occupied,
            "occupant reference must agree with Occupied terrain at {cell}"
        );
        if !self.is_inside(cell) {
            return Err(BattleError::OutOfBounds {
                x: cell.x,
                y: cell.y,
            });
        }
        let index = self.index(cell);
        self.tiles[index].terrain = terrain;
        self.tiles[index].occupant = occupant;
        Ok(())
    }
}

impl Default for TileGrid {
    /// Create a default grid (15x9 tiles).
    fn default() -> Self {
        Self::new(15, 9)
    }
}

/// Display-space conversion helpers.
///
/// Pure functions parameterized by tile size and the horizontal offset at
/// which the map is drawn. Conversion truncates toward the tile's
/// lower-left corner, so round-tripping a cell through display space is
/// idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapLayout {
    /// Tile width in display units.
    #[serde(with = "fixed_serde")]
    pub tile_width: Fixed,
    /// Tile height in display units.
    #[serde(with = "fixed_serde")]
    pub tile_height: Fixed,
    /// Horizontal offset of the map's left edge in display space.
    #[serde(with = "fixed_serde")]
    pub offset_x: Fixed,
}

impl MapLayout {
    /// Create a new layout.
    ///
    /// # Panics
    ///
    /// Panics if either tile dimension is not positive.
    #[must_use]
    pub fn new(tile_width: Fixed, tile_height: Fixed, offset_x: Fixed) -> Self {
        assert!(tile_width > Fixed::ZERO, "tile_width must be positive");
        assert!(tile_height > Fixed::ZERO, "tile_height must be positive");
        Self {
            tile_width,
            tile_height,
            offset_x,
        }
    }

    /// Convert a display-space position to the grid cell containing it.
    ///
    /// The result may lie outside the grid; callers check bounds before
    /// touching tile storage.
    #[must_use]
    pub fn display_to_cell(&self, pos: Vec2Fixed) -> Cell {
        Cell::new(
            ((pos.x - self.offset_x) / self.tile_width).floor().to_num(),
            (pos.y / self.tile_height).floor().to_num(),
        )
    }

    /// Convert a grid cell to the display-space position of its lower-left
    /// corner.
    #[must_use]
    pub fn cell_to_display(&self, cell: Cell) -> Vec2Fixed {
        Vec2Fixed::new(
            Fixed::from_num(cell.x) * self.tile_width + self.offset_x,
            Fixed::from_num(cell.y) * self.tile_height,
        )
    }

    /// Display-space center of a cell. Useful for synthesizing tap events.
    #[must_use]
    pub fn cell_center(&self, cell: Cell) -> Vec2Fixed {
        let corner = self.cell_to_display(cell);
        Vec2Fixed::new(
            corner.x + self.tile_width / Fixed::from_num(2),
            corner.y + self.tile_height / Fixed::from_num(2),
        )
    }
}

impl Default for MapLayout {
    /// Default layout: 64x64 tiles, no horizontal offset.
    fn default() -> Self {
        Self::new(Fixed::from_num(64), Fixed::from_num(64), Fixed::ZERO)
    }
}
