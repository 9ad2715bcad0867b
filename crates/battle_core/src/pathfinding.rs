//! Grid-based pathfinding using the A* algorithm.
//!
//! The search works against the [`PathfindingMap`] capability trait rather
//! than tile storage directly, so it stays decoupled from how the grid is
//! owned. Movement is 4-connected (no diagonals) and the heuristic is
//! Manhattan distance scaled by the minimum step cost, which keeps it
//! admissible and consistent.
//!
//! Ties between equal f-scores break on a coordinate-derived key so that
//! identical inputs always produce identical paths.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use serde::{Deserialize, Serialize};

use crate::config::TerrainCostTable;
use crate::error::{BattleError, Result};
use crate::grid::{Cell, TileGrid};

/// The capabilities A* needs from the component that owns the grid.
///
/// Blocked cells are the search's initial closed set: they are never
/// entered. The start cell is exempt (the mover stands there, so its own
/// occupancy never blocks departure).
pub trait PathfindingMap {
    /// Pure bounds check.
    fn is_inside(&self, cell: Cell) -> bool;

    /// True if the cell can never be entered.
    fn is_blocked(&self, cell: Cell) -> bool;

    /// Cost charged for entering the cell.
    fn entry_cost(&self, cell: Cell) -> u32;

    /// Estimated cost per remaining Manhattan step.
    fn heuristic_scale(&self) -> u32;
}

/// One cell of a computed path, annotated with the accumulated cost of
/// reaching it from the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathNode {
    /// Grid cell.
    pub cell: Cell,
    /// Accumulated cost from the start cell.
    pub cost: u32,
}

/// An ordered sequence of cells from start to goal, both inclusive.
pub type Path = Vec<PathNode>;

/// A node in the A* open set priority queue.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
struct AStarNode {
    cell: Cell,
    /// f_score = g_score + heuristic.
    f_score: u32,
    /// Tie-breaker for determinism: lower coordinates first.
    tie_breaker: u64,
}

impl Ord for AStarNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap, so we reverse the comparison for
        // min-heap behavior.
        match other.f_score.cmp(&self.f_score) {
            Ordering::Equal => other.tie_breaker.cmp(&self.tie_breaker),
            ord => ord,
        }
    }
}

impl PartialOrd for AStarNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Direction offsets for 4-connected movement.
const DIRECTIONS: [(i32, i32); 4] = [
    (1, 0),  // Right
    (0, 1),  // Up
    (-1, 0), // Left
    (0, -1), // Down
];

/// Convert a cell to a tie-breaker value for deterministic ordering.
#[inline]
fn cell_tie_breaker(cell: Cell) -> u64 {
    (u64::from(cell.y as u32) << 32) | u64::from(cell.x as u32)
}

/// Find a path from start to goal.
///
/// Returns the cells from start to goal inclusive, each annotated with its
/// accumulated cost. A search from a cell to itself returns a single-node
/// path. The map is never mutated; the search is bounded by one expansion
/// per cell and runs to completion synchronously.
///
/// # Errors
///
/// - [`BattleError::OutOfBounds`] if start or goal lies outside the map.
/// - [`BattleError::NoPath`] if the goal is unreachable. This is an
///   ordinary reportable outcome, not a fault.
pub fn find_path<M: PathfindingMap>(map: &M, start: Cell, goal: Cell) -> Result<Path> {
    for cell in [start, goal] {
        if !map.is_inside(cell) {
            return Err(BattleError::OutOfBounds {
                x: cell.x,
                y: cell.y,
            });
        }
    }

    if start == goal {
        return Ok(vec![PathNode {
            cell: start,
            cost: 0,
        }]);
    }

    // A blocked goal is unreachable by definition; report it without
    // running the search. (A goal blocked only by the mover itself is the
    // start cell, handled above.)
    if map.is_blocked(goal) {
        tracing::debug!(%start, %goal, "goal cell is blocked");
        return Err(BattleError::NoPath {
            from: start,
            to: goal,
        });
    }

    let scale = map.heuristic_scale();
    let mut open_set: BinaryHeap<AStarNode> = BinaryHeap::new();
    let mut came_from: HashMap<Cell, Cell> = HashMap::new();
    let mut g_score: HashMap<Cell, u32> = HashMap::new();

    g_score.insert(start, 0);
    open_set.push(AStarNode {
        cell: start,
        f_score: scale * start.manhattan_distance(goal),
        tie_breaker: cell_tie_breaker(start),
    });

    while let Some(current) = open_set.pop() {
        if current.cell == goal {
            let path = reconstruct_path(&came_from, &g_score, goal);
            tracing::debug!(
                %start,
                %goal,
                steps = path.len() - 1,
                cost = path.last().map_or(0, |node| node.cost),
                "path found"
            );
            return Ok(path);
        }

        let current_g = g_score.get(&current.cell).copied().unwrap_or(u32::MAX);

        for &(dx, dy) in &DIRECTIONS {
            let neighbor = Cell::new(current.cell.x + dx, current.cell.y + dy);

            if !map.is_inside(neighbor) {
                continue;
            }
            if map.is_blocked(neighbor) {
                continue;
            }

            let tentative_g = current_g + map.entry_cost(neighbor);
            let neighbor_g = g_score.get(&neighbor).copied().unwrap_or(u32::MAX);

            if tentative_g < neighbor_g {
                // This path is better
                came_from.insert(neighbor, current.cell);
                g_score.insert(neighbor, tentative_g);

                open_set.push(AStarNode {
                    cell: neighbor,
                    f_score: tentative_g + scale * neighbor.manhattan_distance(goal),
                    tie_breaker: cell_tie_breaker(neighbor),
                });
            }
        }
    }

    tracing::debug!(%start, %goal, "open set exhausted without reaching goal");
    Err(BattleError::NoPath {
        from: start,
        to: goal,
    })
}

/// Reconstruct the path from the came_from map, attaching accumulated costs.
fn reconstruct_path(
    came_from: &HashMap<Cell, Cell>,
    g_score: &HashMap<Cell, u32>,
    goal: Cell,
) -> Path {
    let mut cells = vec![goal];
    let mut current = goal;
    while let Some(&prev) = came_from.get(&current) {
        cells.push(prev);
        current = prev;
    }
    cells.reverse();

    cells
        .into_iter()
        .map(|cell| PathNode {
            cell,
            cost: g_score.get(&cell).copied().unwrap_or(0),
        })
        .collect()
}

/// Search view over a [`TileGrid`]: the default blocked set (terrains whose
/// [`blocks_movement`](crate::grid::Terrain::blocks_movement) is true) plus
/// per-terrain entry costs from a [`TerrainCostTable`].
#[derive(Debug, Clone, Copy)]
pub struct GridSearchView<'a> {
    grid: &'a TileGrid,
    costs: &'a TerrainCostTable,
    heuristic_scale: u32,
}

impl<'a> GridSearchView<'a> {
    /// Create a search view over a grid.
    #[must_use]
    pub const fn new(grid: &'a TileGrid, costs: &'a TerrainCostTable, heuristic_scale: u32) -> Self {
        Self {
            grid,
            costs,
            heuristic_scale,
        }
    }
}

impl PathfindingMap for GridSearchView<'_> {
    fn is_inside(&self, cell: Cell) -> bool {
        self.grid.is_inside(cell)
    }

    fn is_blocked(&self, cell: Cell) -> bool {
        self.grid
            .tile_at(cell)
            .map_or(true, |tile| tile.terrain().blocks_movement())
    }

    fn entry_cost(&self, cell: Cell) -> u32 {
        self.grid
            .tile_at(cell)
            .map_or(0, |tile| self.costs.cost_of(tile.terrain()))
    }

    fn heuristic_scale(&self) -> u32 {
        self.heuristic_scale
    }
}
