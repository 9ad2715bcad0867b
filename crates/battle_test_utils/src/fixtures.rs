//! Test fixtures and helpers.
//!
//! Pre-built grids and battles for consistent testing.

use battle_core::config::BattleConfig;
use battle_core::grid::{Cell, Terrain, TileGrid};
use fixed::types::I32F32;

/// Create a fixed-point number from an integer.
#[must_use]
pub fn fixed(n: i32) -> I32F32 {
    I32F32::from_num(n)
}

/// Create a fixed-point number from a float (for tests only).
///
/// Note: In real simulation code, never use floats.
/// This is only for convenient test setup.
#[must_use]
pub fn fixed_f(n: f64) -> I32F32 {
    I32F32::from_num(n)
}

/// Build a grid from ASCII art rows, top row first.
///
/// Each character is a terrain glyph as defined by
/// [`Terrain::from_glyph`]: `.` land, `,` grass, `T` tree, `S` stone,
/// `?` undefined. Row 0 of the input is the top of the map (highest y).
///
/// # Panics
///
/// Panics on ragged rows, unknown glyphs, or the `U` glyph (units are
/// placed through spawning, not terrain art).
#[must_use]
pub fn grid_from_rows(rows: &[&str]) -> TileGrid {
    assert!(!rows.is_empty(), "grid art needs at least one row");
    let height = rows.len() as i32;
    let width = rows[0].chars().count() as i32;

    let mut grid = TileGrid::new(width, height);
    for (row_index, row) in rows.iter().enumerate() {
        assert_eq!(
            row.chars().count() as i32,
            width,
            "grid art row {row_index} has a different width"
        );
        for (col, glyph) in row.chars().enumerate() {
            let terrain = Terrain::from_glyph(glyph)
                .unwrap_or_else(|| panic!("unknown terrain glyph {glyph:?}"));
            assert_ne!(
                terrain,
                Terrain::Occupied,
                "place units through spawning, not terrain art"
            );
            let cell = Cell::new(col as i32, height - 1 - row_index as i32);
            grid.set_tile_content(cell, terrain, None).unwrap();
        }
    }
    grid
}

/// A default battle configuration with bootstrap spawning enabled, for
/// demo-flow tests.
#[must_use]
pub fn bootstrap_config() -> BattleConfig {
    BattleConfig {
        bootstrap_spawn: true,
        ..BattleConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_art_rows_are_top_first() {
        let grid = grid_from_rows(&[
            "T.",
            ".S",
        ]);
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 2);
        assert_eq!(
            grid.tile_at(Cell::new(0, 1)).unwrap().terrain(),
            Terrain::Tree
        );
        assert_eq!(
            grid.tile_at(Cell::new(1, 0)).unwrap().terrain(),
            Terrain::Stone
        );
        assert_eq!(
            grid.tile_at(Cell::new(0, 0)).unwrap().terrain(),
            Terrain::Land
        );
    }

    #[test]
    #[should_panic(expected = "different width")]
    fn test_ragged_rows_are_rejected() {
        let _ = grid_from_rows(&["...", "...."]);
    }
}
