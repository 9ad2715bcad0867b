//! # Battle Core
//!
//! Deterministic grid-battle core: tile grid, A* pathfinding, the battle
//! state machine, and the movement sequencer.
//!
//! This crate contains **only** deterministic logic:
//! - No rendering
//! - No IO
//! - No system randomness
//! - No floating-point math (uses fixed-point)
//!
//! The presentation layer feeds tap events in through [`battle::Battle`]
//! and consumes [`battle::BattleEvent`] notifications plus per-step
//! [`movement::MoveStep`] descriptors to drive animation. Step boundaries
//! are the synchronization points: the core mutates tile occupancy at
//! `begin_step` / `complete_step`, never mid-animation.
//!
//! ## Crate Structure
//!
//! - [`grid`] - Tile grid storage and display-space conversion
//! - [`pathfinding`] - A* search over a capability trait
//! - [`battle`] - Battle session state machine
//! - [`movement`] - Path-to-step sequencing
//! - [`config`] - Per-session configuration
//! - [`math`] - Fixed-point math utilities

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod battle;
pub mod config;
pub mod error;
pub mod grid;
pub mod math;
pub mod movement;
pub mod pathfinding;
pub mod unit;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::battle::{Battle, BattleEvent, Phase};
    pub use crate::config::{BattleConfig, TerrainCostTable};
    pub use crate::error::{BattleError, Result};
    pub use crate::grid::{Cell, MapLayout, Terrain, Tile, TileGrid};
    pub use crate::math::{Fixed, Vec2Fixed};
    pub use crate::movement::{Direction, MoveSequence, MoveStep};
    pub use crate::pathfinding::{find_path, GridSearchView, Path, PathNode, PathfindingMap};
    pub use crate::unit::{Unit, UnitId, UnitSpawnParams, UnitStorage};
}
