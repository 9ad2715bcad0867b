//! Determinism assertions.
//!
//! The core promises that identical inputs produce identical outputs.
//! These helpers make that promise cheap to assert in any crate's tests.

use battle_core::config::TerrainCostTable;
use battle_core::grid::{Cell, TileGrid};
use battle_core::pathfinding::{find_path, GridSearchView, Path};

/// Run the same search several times and assert every run returns the same
/// path.
///
/// Returns the path so the caller can make further assertions.
///
/// # Panics
///
/// Panics if the search fails or any run disagrees with the first.
pub fn assert_path_deterministic(
    grid: &TileGrid,
    costs: &TerrainCostTable,
    heuristic_scale: u32,
    start: Cell,
    goal: Cell,
    runs: usize,
) -> Path {
    let view = GridSearchView::new(grid, costs, heuristic_scale);
    let first = find_path(&view, start, goal)
        .unwrap_or_else(|err| panic!("search {start} -> {goal} failed: {err}"));
    for run in 1..runs {
        let next = find_path(&view, start, goal)
            .unwrap_or_else(|err| panic!("search {start} -> {goal} failed on run {run}: {err}"));
        assert_eq!(next, first, "path diverged on run {run}");
    }
    first
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::grid_from_rows;

    #[test]
    fn test_deterministic_search_on_broken_ground() {
        let grid = grid_from_rows(&[
            "......",
            ".TT.S.",
            "......",
            ".S.TT.",
            "......",
        ]);
        let path = assert_path_deterministic(
            &grid,
            &TerrainCostTable::default(),
            10,
            Cell::new(0, 0),
            Cell::new(5, 4),
            20,
        );
        assert_eq!(path.first().unwrap().cell, Cell::new(0, 0));
        assert_eq!(path.last().unwrap().cell, Cell::new(5, 4));
    }
}
