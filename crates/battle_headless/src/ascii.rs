//! ASCII grid renderer for terminal review.

use battle_core::grid::{Cell, TileGrid};

/// Render the grid as ASCII art, top row first, one terrain glyph per
/// tile. The output matches the scenario terrain format except that
/// occupied tiles show as `U`.
#[must_use]
pub fn render(grid: &TileGrid) -> String {
    let mut out = String::with_capacity((grid.width() as usize + 1) * grid.height() as usize);
    for y in (0..grid.height()).rev() {
        for x in 0..grid.width() {
            let tile = grid
                .tile_at(Cell::new(x, y))
                .unwrap_or_else(|_| unreachable!("render iterates in-bounds cells"));
            out.push(tile.terrain().glyph());
        }
        out.push('\n');
    }
    out
}
