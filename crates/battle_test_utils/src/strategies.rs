//! Property-based testing strategies.

use battle_core::grid::{Cell, Terrain};
use proptest::prelude::*;

/// Strategy producing any terrain kind.
pub fn any_terrain() -> impl Strategy<Value = Terrain> {
    prop_oneof![
        Just(Terrain::Undefined),
        Just(Terrain::Land),
        Just(Terrain::Grass),
        Just(Terrain::Tree),
        Just(Terrain::Stone),
    ]
}

/// Strategy producing a cell inside a grid of the given dimensions.
pub fn cell_within(width: i32, height: i32) -> impl Strategy<Value = Cell> {
    (0..width, 0..height).prop_map(|(x, y)| Cell::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn prop_generated_cells_are_in_bounds(cell in cell_within(15, 9)) {
            prop_assert!(cell.x >= 0 && cell.x < 15);
            prop_assert!(cell.y >= 0 && cell.y < 9);
        }
    }
}
