//! Error types for the battle core.

use thiserror::Error;

use crate::battle::Phase;
use crate::grid::Cell;
use crate::unit::UnitId;

/// Result type alias using [`BattleError`].
pub type Result<T> = std::result::Result<T, BattleError>;

/// Top-level error type for all battle core errors.
///
/// Every variant here is a *recoverable* condition reported to the caller.
/// Contract breaches between internal components (a diagonal step from the
/// pathfinder, occupancy out of sync with unit positions) are defects and
/// fail via assertions instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BattleError {
    /// Coordinates outside the grid. Always a caller error; coordinates are
    /// never silently clamped.
    #[error("coordinates ({x}, {y}) are outside the grid")]
    OutOfBounds {
        /// X coordinate of the rejected access.
        x: i32,
        /// Y coordinate of the rejected access.
        y: i32,
    },

    /// No route exists between two cells. A normal, expected outcome of
    /// pathfinding, not a crash condition.
    #[error("no path from {from} to {to}")]
    NoPath {
        /// Search start cell.
        from: Cell,
        /// Search goal cell.
        to: Cell,
    },

    /// A caller-supplied unit id does not resolve to a live unit.
    #[error("unit not found: {0}")]
    UnitNotFound(UnitId),

    /// The tile cannot take a unit (already occupied or blocking terrain).
    #[error("tile ({x}, {y}) cannot take a unit")]
    TileUnavailable {
        /// X coordinate of the tile.
        x: i32,
        /// Y coordinate of the tile.
        y: i32,
    },

    /// An operation was invoked in a phase that does not define it.
    #[error("{action} is not valid in the {phase:?} phase")]
    InvalidTransition {
        /// Phase the battle was in when the operation arrived.
        phase: Phase,
        /// Name of the rejected operation.
        action: &'static str,
    },
}
