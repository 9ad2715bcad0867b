//! Path-to-step sequencing.
//!
//! A computed path is translated into an ordered list of atomic move steps.
//! The presentation layer animates one step at a time; tile occupancy is
//! mutated only at step boundaries (pre-hook clears the origin tile,
//! post-hook claims the destination tile), so animation and grid state stay
//! causally consistent. The hooks are applied by [`Battle`] strictly in
//! step order through the forward cursor here.
//!
//! [`Battle`]: crate::battle::Battle

use serde::{Deserialize, Serialize};

use crate::grid::Cell;
use crate::math::{fixed_serde, Fixed};
use crate::pathfinding::PathNode;
use crate::unit::UnitId;

/// One of the four cardinal movement directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Toward increasing y.
    Up,
    /// Toward decreasing y.
    Down,
    /// Toward decreasing x.
    Left,
    /// Toward increasing x.
    Right,
}

impl Direction {
    /// Derive the direction of a step between two adjacent cells.
    ///
    /// # Panics
    ///
    /// Panics on any delta that is not a single cardinal step. The
    /// pathfinder only emits 4-connected paths, so anything else means the
    /// pathfinder and sequencer have gone out of sync.
    #[must_use]
    pub fn between(from: Cell, to: Cell) -> Self {
        match (to.x - from.x, to.y - from.y) {
            (0, 1) => Self::Up,
            (0, -1) => Self::Down,
            (-1, 0) => Self::Left,
            (1, 0) => Self::Right,
            (dx, dy) => panic!("non-cardinal step ({dx}, {dy}) from {from} to {to}"),
        }
    }
}

/// One atomic unit of movement, consumed by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveStep {
    /// Cell the step leaves.
    pub from: Cell,
    /// Cell the step enters.
    pub to: Cell,
    /// Movement direction.
    pub direction: Direction,
    /// Animation duration in seconds (base duration / walk speed). Purely
    /// a presentation timing parameter.
    #[serde(with = "fixed_serde")]
    pub duration: Fixed,
}

/// An in-flight move: the step list plus a forward cursor.
///
/// The cursor advances through two synchronization points per step:
/// [`begin_step`](Self::begin_step) before the presentation layer animates,
/// [`complete_step`](Self::complete_step) after. Steps are never skipped or
/// reordered, and there is no mid-path cancellation: once started, the
/// sequence runs to completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveSequence {
    unit: UnitId,
    steps: Vec<MoveStep>,
    cursor: usize,
    in_step: bool,
}

impl MoveSequence {
    /// Build the step list for a path of N cells: N-1 steps, each with the
    /// same per-step duration.
    ///
    /// # Panics
    ///
    /// Panics if the path is empty or `walk_speed` is not positive.
    #[must_use]
    pub fn new(unit: UnitId, path: &[PathNode], base_duration: Fixed, walk_speed: Fixed) -> Self {
        assert!(!path.is_empty(), "a move needs a path");
        assert!(walk_speed > Fixed::ZERO, "walk speed must be positive");

        let duration = base_duration / walk_speed;
        let steps = path
            .windows(2)
            .map(|pair| MoveStep {
                from: pair[0].cell,
                to: pair[1].cell,
                direction: Direction::between(pair[0].cell, pair[1].cell),
                duration,
            })
            .collect();

        Self {
            unit,
            steps,
            cursor: 0,
            in_step: false,
        }
    }

    /// The unit this sequence moves.
    #[must_use]
    pub const fn unit(&self) -> UnitId {
        self.unit
    }

    /// All steps of the sequence in order.
    #[must_use]
    pub fn steps(&self) -> &[MoveStep] {
        &self.steps
    }

    /// The step the cursor currently points at, if any remain.
    #[must_use]
    pub fn current(&self) -> Option<&MoveStep> {
        self.steps.get(self.cursor)
    }

    /// True once every step has completed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cursor >= self.steps.len()
    }

    /// Enter the current step. Returns `None` if the sequence is complete
    /// or the step was already begun.
    pub fn begin_step(&mut self) -> Option<MoveStep> {
        if self.in_step {
            return None;
        }
        let step = self.steps.get(self.cursor).copied()?;
        self.in_step = true;
        Some(step)
    }

    /// Finish the current step and advance the cursor. Returns `None` if no
    /// step was begun.
    pub fn complete_step(&mut self) -> Option<MoveStep> {
        if !self.in_step {
            return None;
        }
        let step = self.steps.get(self.cursor).copied()?;
        self.in_step = false;
        self.cursor += 1;
        Some(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(x: i32, y: i32, cost: u32) -> PathNode {
        PathNode {
            cell: Cell::new(x, y),
            cost,
        }
    }

    #[test]
    fn test_three_cell_path_yields_two_up_steps() {
        let path = [node(0, 0, 0), node(0, 1, 10), node(0, 2, 20)];
        let seq = MoveSequence::new(1, &path, Fixed::from_num(4), Fixed::from_num(2));

        assert_eq!(seq.steps().len(), 2);
        for step in seq.steps() {
            assert_eq!(step.direction, Direction::Up);
            assert_eq!(step.duration, Fixed::from_num(2));
        }
        assert_eq!(seq.steps()[0].from, Cell::new(0, 0));
        assert_eq!(seq.steps()[1].to, Cell::new(0, 2));
    }

    #[test]
    fn test_direction_derivation() {
        let origin = Cell::new(3, 3);
        assert_eq!(Direction::between(origin, Cell::new(3, 4)), Direction::Up);
        assert_eq!(Direction::between(origin, Cell::new(3, 2)), Direction::Down);
        assert_eq!(Direction::between(origin, Cell::new(2, 3)), Direction::Left);
        assert_eq!(Direction::between(origin, Cell::new(4, 3)), Direction::Right);
    }

    #[test]
    #[should_panic(expected = "non-cardinal step")]
    fn test_diagonal_step_is_a_contract_breach() {
        let _ = Direction::between(Cell::new(0, 0), Cell::new(1, 1));
    }

    #[test]
    fn test_cursor_enforces_begin_then_complete() {
        let path = [node(0, 0, 0), node(1, 0, 10), node(2, 0, 20)];
        let mut seq = MoveSequence::new(1, &path, Fixed::from_num(4), Fixed::ONE);

        // Completing before beginning is rejected.
        assert_eq!(seq.complete_step(), None);

        let first = seq.begin_step().unwrap();
        // Beginning twice is rejected.
        assert_eq!(seq.begin_step(), None);
        assert_eq!(seq.complete_step().unwrap(), first);

        let second = seq.begin_step().unwrap();
        assert_eq!(second.from, Cell::new(1, 0));
        assert_eq!(seq.complete_step().unwrap(), second);

        assert!(seq.is_complete());
        assert_eq!(seq.begin_step(), None);
    }

    #[test]
    fn test_single_node_path_has_no_steps() {
        let path = [node(5, 5, 0)];
        let seq = MoveSequence::new(1, &path, Fixed::from_num(4), Fixed::ONE);
        assert!(seq.is_complete());
        assert!(seq.steps().is_empty());
    }
}
