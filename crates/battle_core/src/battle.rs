//! Battle session state machine.
//!
//! One [`Battle`] owns the tile grid, the units, and the session state for
//! a single battle. Its only ingress is the tap event; its egress is a list
//! of [`BattleEvent`] notifications per call plus the step-driving methods
//! the presentation layer calls as its animations finish.
//!
//! The `Moving` phase is the system's concurrency guard: at most one unit
//! is in transit at a time, and taps are ignored entirely while it is. All
//! execution is single-threaded and event-driven; no locking is involved.

use serde::{Deserialize, Serialize};

use crate::config::BattleConfig;
use crate::error::{BattleError, Result};
use crate::grid::{Cell, Terrain, TileGrid};
use crate::math::Vec2Fixed;
use crate::movement::{MoveSequence, MoveStep};
use crate::pathfinding::{find_path, GridSearchView};
use crate::unit::{Unit, UnitId, UnitSpawnParams, UnitStorage};

/// Phases of the battle session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Nothing selected, waiting for input.
    #[default]
    Idle,
    /// A unit is selected and awaiting a destination.
    UnitSelected,
    /// A unit is in transit. Taps are ignored.
    Moving,
    /// Transient: a move just finished; folds straight back to [`Idle`].
    ///
    /// [`Idle`]: Phase::Idle
    MoveComplete,
}

/// Notifications emitted toward the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleEvent {
    /// A unit appeared on the grid.
    UnitSpawned {
        /// The new unit.
        unit: UnitId,
        /// Where it stands.
        cell: Cell,
    },
    /// A unit became the current selection.
    UnitSelected {
        /// The selected unit.
        unit: UnitId,
        /// The selection origin, i.e. the unit's tile.
        cell: Cell,
    },
    /// A move was accepted; the steps are ready to animate.
    MoveStarted {
        /// The moving unit.
        unit: UnitId,
        /// Every step of the move, in order.
        steps: Vec<MoveStep>,
    },
    /// A step was entered; the presentation layer should animate it and
    /// then call [`Battle::complete_step`].
    StepBegan {
        /// The moving unit.
        unit: UnitId,
        /// The step being animated.
        step: MoveStep,
    },
    /// A tile's terrain or occupant changed.
    OccupancyChanged {
        /// The tile that changed.
        cell: Cell,
        /// Its new terrain kind.
        terrain: Terrain,
        /// Its new occupant, if any.
        occupant: Option<UnitId>,
    },
    /// Pathfinding found no route; the selection is unchanged.
    PathRejected {
        /// Search start cell.
        from: Cell,
        /// Search goal cell.
        to: Cell,
    },
    /// The active move ran to completion.
    MoveCompleted {
        /// The unit that moved.
        unit: UnitId,
        /// Its final cell.
        cell: Cell,
    },
}

/// One battle session: grid, units, and turn-flow state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Battle {
    config: BattleConfig,
    grid: TileGrid,
    units: UnitStorage,
    phase: Phase,
    selected: Option<UnitId>,
    origin: Option<Cell>,
    destination: Option<Cell>,
    active_move: Option<MoveSequence>,
}

impl Battle {
    /// Create a new battle from a session configuration.
    ///
    /// # Panics
    ///
    /// Panics if the configured grid dimensions are not positive.
    #[must_use]
    pub fn new(config: BattleConfig) -> Self {
        Self {
            grid: TileGrid::new(config.grid_width, config.grid_height),
            units: UnitStorage::new(),
            phase: Phase::Idle,
            selected: None,
            origin: None,
            destination: None,
            active_move: None,
            config,
        }
    }

    /// The session configuration.
    #[must_use]
    pub const fn config(&self) -> &BattleConfig {
        &self.config
    }

    /// The tile grid.
    #[must_use]
    pub const fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// All units.
    #[must_use]
    pub const fn units(&self) -> &UnitStorage {
        &self.units
    }

    /// The current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// The current selection: unit and its origin cell, if any.
    #[must_use]
    pub fn selection(&self) -> Option<(UnitId, Cell)> {
        self.selected.zip(self.origin)
    }

    /// Look up a unit by id.
    ///
    /// # Errors
    ///
    /// Returns [`BattleError::UnitNotFound`] for a stale id.
    pub fn unit(&self, id: UnitId) -> Result<&Unit> {
        self.units.get(id).ok_or(BattleError::UnitNotFound(id))
    }

    /// Spawn a unit onto a free, walkable tile.
    ///
    /// This is the explicit factory operation: callers pass every parameter
    /// the unit needs, and the tile becomes [`Terrain::Occupied`].
    ///
    /// # Errors
    ///
    /// - [`BattleError::OutOfBounds`] if the cell is outside the grid.
    /// - [`BattleError::TileUnavailable`] if the tile is occupied or its
    ///   terrain blocks movement.
    pub fn spawn_unit(&mut self, cell: Cell, params: UnitSpawnParams) -> Result<UnitId> {
        let tile = self.grid.tile_at(cell)?;
        if tile.terrain().blocks_movement() {
            return Err(BattleError::TileUnavailable {
                x: cell.x,
                y: cell.y,
            });
        }
        let draw_priority = self.grid.height() - cell.y;
        let unit = self.units.insert(cell, params, draw_priority);
        self.grid.set_tile_content(cell, Terrain::Occupied, Some(unit))?;
        tracing::debug!(unit, %cell, "unit spawned");
        Ok(unit)
    }

    /// Paint terrain onto an unoccupied tile. Setup-time operation for
    /// scenario building.
    ///
    /// # Errors
    ///
    /// - [`BattleError::OutOfBounds`] if the cell is outside the grid.
    /// - [`BattleError::TileUnavailable`] if a unit stands on the tile.
    ///
    /// # Panics
    ///
    /// Panics if asked to paint [`Terrain::Occupied`]; occupancy is managed
    /// through spawning and movement.
    pub fn set_terrain(&mut self, cell: Cell, terrain: Terrain) -> Result<()> {
        assert_ne!(
            terrain,
            Terrain::Occupied,
            "occupancy is managed through spawning and movement"
        );
        let tile = self.grid.tile_at(cell)?;
        if tile.occupant().is_some() {
            return Err(BattleError::TileUnavailable {
                x: cell.x,
                y: cell.y,
            });
        }
        self.grid.set_tile_content(cell, terrain, None)
    }

    /// Handle a tap at display coordinates, the core's single ingress
    /// event.
    ///
    /// Taps are ignored entirely while a unit is in transit, and taps that
    /// convert to a cell outside the grid are ignored without a state
    /// change.
    pub fn handle_tap(&mut self, display: Vec2Fixed) -> Vec<BattleEvent> {
        if self.phase == Phase::Moving {
            return Vec::new();
        }
        self.tap_cell(self.config.layout.display_to_cell(display))
    }

    /// Handle a tap already resolved to a grid cell.
    pub fn tap_cell(&mut self, cell: Cell) -> Vec<BattleEvent> {
        if self.phase == Phase::Moving {
            tracing::debug!(%cell, "tap ignored while moving");
            return Vec::new();
        }
        let Ok(tile) = self.grid.tile_at(cell) else {
            tracing::debug!(%cell, "tap outside the grid");
            return Vec::new();
        };

        if let Some(unit) = tile.occupant() {
            // Re-selecting is always allowed while not moving.
            self.selected = Some(unit);
            self.origin = Some(cell);
            self.destination = None;
            self.set_phase(Phase::UnitSelected);
            return vec![BattleEvent::UnitSelected { unit, cell }];
        }

        match self.phase {
            Phase::Idle if self.config.bootstrap_spawn => self.bootstrap_spawn(cell),
            Phase::UnitSelected => self.start_move(cell),
            _ => Vec::new(),
        }
    }

    /// The step the presentation layer should animate next, if a move is
    /// active.
    #[must_use]
    pub fn current_step(&self) -> Option<&MoveStep> {
        self.active_move.as_ref().and_then(MoveSequence::current)
    }

    /// Enter the next step of the active move.
    ///
    /// Pre-step hook: the tile being left reverts to [`Terrain::Land`].
    /// The returned events carry the occupancy change and the step to
    /// animate; once the animation finishes, call
    /// [`complete_step`](Self::complete_step).
    ///
    /// # Errors
    ///
    /// Returns [`BattleError::InvalidTransition`] outside the `Moving`
    /// phase or when the current step was already begun.
    pub fn begin_step(&mut self) -> Result<Vec<BattleEvent>> {
        if self.phase != Phase::Moving {
            return Err(BattleError::InvalidTransition {
                phase: self.phase,
                action: "begin_step",
            });
        }
        let Some(sequence) = self.active_move.as_mut() else {
            unreachable!("Moving phase without an active move");
        };
        let Some(step) = sequence.begin_step() else {
            return Err(BattleError::InvalidTransition {
                phase: self.phase,
                action: "begin_step",
            });
        };
        let unit = sequence.unit();

        self.grid.set_tile_content(step.from, Terrain::Land, None)?;

        Ok(vec![
            BattleEvent::OccupancyChanged {
                cell: step.from,
                terrain: Terrain::Land,
                occupant: None,
            },
            BattleEvent::StepBegan { unit, step },
        ])
    }

    /// Finish the step whose animation just completed.
    ///
    /// Post-step hook: the entered tile becomes [`Terrain::Occupied`] by
    /// the mover, whose cell, facing, and draw priority are brought up to
    /// date. After the final step the battle folds through
    /// [`Phase::MoveComplete`] back to [`Phase::Idle`] and the selection is
    /// cleared.
    ///
    /// # Errors
    ///
    /// Returns [`BattleError::InvalidTransition`] outside the `Moving`
    /// phase or when no step is in flight.
    pub fn complete_step(&mut self) -> Result<Vec<BattleEvent>> {
        if self.phase != Phase::Moving {
            return Err(BattleError::InvalidTransition {
                phase: self.phase,
                action: "complete_step",
            });
        }
        let Some(sequence) = self.active_move.as_mut() else {
            unreachable!("Moving phase without an active move");
        };
        let Some(step) = sequence.complete_step() else {
            return Err(BattleError::InvalidTransition {
                phase: self.phase,
                action: "complete_step",
            });
        };
        let unit_id = sequence.unit();
        let finished = sequence.is_complete();

        let draw_priority = self.grid.height() - step.to.y;
        let Some(unit) = self.units.get_mut(unit_id) else {
            unreachable!("moving unit {unit_id} vanished");
        };
        unit.cell = step.to;
        unit.facing = step.direction;
        unit.draw_priority = draw_priority;
        self.grid
            .set_tile_content(step.to, Terrain::Occupied, Some(unit_id))?;
        debug_assert_eq!(
            self.grid.tile_at(step.to).map(|tile| tile.occupant()),
            Ok(Some(unit_id)),
            "tile occupant and unit position out of sync after step"
        );

        let mut events = vec![BattleEvent::OccupancyChanged {
            cell: step.to,
            terrain: Terrain::Occupied,
            occupant: Some(unit_id),
        }];

        if finished {
            self.active_move = None;
            self.clear_selection();
            self.set_phase(Phase::MoveComplete);
            self.set_phase(Phase::Idle);
            events.push(BattleEvent::MoveCompleted {
                unit: unit_id,
                cell: step.to,
            });
        }
        Ok(events)
    }

    /// Demo bootstrap: an empty-tile tap while idle spawns a unit there.
    fn bootstrap_spawn(&mut self, cell: Cell) -> Vec<BattleEvent> {
        match self.spawn_unit(cell, UnitSpawnParams::default()) {
            Ok(unit) => vec![
                BattleEvent::UnitSpawned { unit, cell },
                BattleEvent::OccupancyChanged {
                    cell,
                    terrain: Terrain::Occupied,
                    occupant: Some(unit),
                },
            ],
            // Blocking terrain: an expected no-op tap.
            Err(_) => Vec::new(),
        }
    }

    /// Treat a tapped cell as the destination of the selected unit.
    fn start_move(&mut self, destination: Cell) -> Vec<BattleEvent> {
        let Some((unit_id, origin)) = self.selection() else {
            unreachable!("UnitSelected phase without a selection");
        };

        let view = GridSearchView::new(&self.grid, &self.config.costs, self.config.heuristic_scale);
        let path = match find_path(&view, origin, destination) {
            Ok(path) => path,
            Err(BattleError::NoPath { from, to }) => {
                return vec![BattleEvent::PathRejected { from, to }];
            }
            Err(err) => unreachable!("pathfinding endpoints were bounds-checked: {err}"),
        };

        let Some(unit) = self.units.get(unit_id) else {
            unreachable!("selected unit {unit_id} vanished");
        };
        let sequence = MoveSequence::new(
            unit_id,
            &path,
            self.config.step_base_duration,
            unit.walk_speed,
        );

        if sequence.is_complete() {
            // Single-cell path: nothing to animate.
            self.clear_selection();
            self.set_phase(Phase::MoveComplete);
            self.set_phase(Phase::Idle);
            return vec![BattleEvent::MoveCompleted {
                unit: unit_id,
                cell: destination,
            }];
        }

        let steps = sequence.steps().to_vec();
        self.destination = Some(destination);
        self.active_move = Some(sequence);
        self.set_phase(Phase::Moving);
        vec![BattleEvent::MoveStarted {
            unit: unit_id,
            steps,
        }]
    }

    fn clear_selection(&mut self) {
        self.selected = None;
        self.origin = None;
        self.destination = None;
    }

    fn set_phase(&mut self, phase: Phase) {
        tracing::debug!(from = ?self.phase, to = ?phase, "battle phase change");
        self.phase = phase;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Fixed;

    fn battle() -> Battle {
        Battle::new(BattleConfig::default())
    }

    fn bootstrap_battle() -> Battle {
        Battle::new(battle_test_utils::fixtures::bootstrap_config())
    }

    /// Stand in for the presentation layer: animate every step instantly.
    fn drain_moves(battle: &mut Battle) -> Vec<BattleEvent> {
        let mut events = Vec::new();
        while battle.phase() == Phase::Moving {
            events.extend(battle.begin_step().unwrap());
            events.extend(battle.complete_step().unwrap());
        }
        events
    }

    #[test]
    fn test_tap_on_occupied_tile_selects_the_unit() {
        let mut battle = battle();
        let unit = battle
            .spawn_unit(Cell::new(2, 2), UnitSpawnParams::default())
            .unwrap();

        let events = battle.tap_cell(Cell::new(2, 2));

        assert_eq!(battle.phase(), Phase::UnitSelected);
        assert_eq!(battle.selection(), Some((unit, Cell::new(2, 2))));
        assert_eq!(
            events,
            vec![BattleEvent::UnitSelected {
                unit,
                cell: Cell::new(2, 2)
            }]
        );
    }

    #[test]
    fn test_tap_outside_the_grid_is_ignored() {
        let mut battle = battle();
        assert!(battle.tap_cell(Cell::new(-1, 4)).is_empty());
        assert!(battle.tap_cell(Cell::new(15, 4)).is_empty());
        assert_eq!(battle.phase(), Phase::Idle);

        // Display taps left of the map resolve to a negative column.
        let events = battle.handle_tap(Vec2Fixed::new(
            Fixed::from_num(-10),
            Fixed::from_num(10),
        ));
        assert!(events.is_empty());
        assert_eq!(battle.phase(), Phase::Idle);
    }

    #[test]
    fn test_idle_tap_on_empty_tile_does_nothing_without_bootstrap() {
        let mut battle = battle();
        assert!(battle.tap_cell(Cell::new(3, 3)).is_empty());
        assert_eq!(battle.phase(), Phase::Idle);
        assert!(battle.units().is_empty());
    }

    #[test]
    fn test_bootstrap_tap_spawns_a_unit_and_stays_idle() {
        let mut battle = bootstrap_battle();
        let events = battle.tap_cell(Cell::new(3, 3));

        assert_eq!(battle.phase(), Phase::Idle);
        assert_eq!(battle.units().len(), 1);
        let tile = battle.grid().tile_at(Cell::new(3, 3)).unwrap();
        assert_eq!(tile.terrain(), Terrain::Occupied);
        assert!(matches!(events[0], BattleEvent::UnitSpawned { .. }));
    }

    #[test]
    fn test_reselection_switches_units() {
        let mut battle = battle();
        let first = battle
            .spawn_unit(Cell::new(1, 1), UnitSpawnParams::default())
            .unwrap();
        let second = battle
            .spawn_unit(Cell::new(5, 5), UnitSpawnParams::default())
            .unwrap();

        let _ = battle.tap_cell(Cell::new(1, 1));
        assert_eq!(battle.selection(), Some((first, Cell::new(1, 1))));

        let _ = battle.tap_cell(Cell::new(5, 5));
        assert_eq!(battle.selection(), Some((second, Cell::new(5, 5))));
        assert_eq!(battle.phase(), Phase::UnitSelected);
    }

    #[test]
    fn test_unreachable_destination_keeps_the_selection() {
        let mut battle = battle();
        let _ = battle
            .spawn_unit(Cell::new(0, 0), UnitSpawnParams::default())
            .unwrap();
        // Enclose (5, 5) completely.
        for cell in [
            Cell::new(4, 5),
            Cell::new(6, 5),
            Cell::new(5, 4),
            Cell::new(5, 6),
        ] {
            battle.set_terrain(cell, Terrain::Stone).unwrap();
        }

        let _ = battle.tap_cell(Cell::new(0, 0));
        let events = battle.tap_cell(Cell::new(5, 5));

        assert_eq!(battle.phase(), Phase::UnitSelected);
        assert_eq!(
            events,
            vec![BattleEvent::PathRejected {
                from: Cell::new(0, 0),
                to: Cell::new(5, 5)
            }]
        );
    }

    #[test]
    fn test_move_runs_to_completion() {
        let mut battle = battle();
        let unit = battle
            .spawn_unit(
                Cell::new(2, 2),
                UnitSpawnParams {
                    walk_speed: Fixed::from_num(2),
                    ..UnitSpawnParams::default()
                },
            )
            .unwrap();

        let _ = battle.tap_cell(Cell::new(2, 2));
        let events = battle.tap_cell(Cell::new(2, 5));

        assert_eq!(battle.phase(), Phase::Moving);
        let BattleEvent::MoveStarted { steps, .. } = &events[0] else {
            panic!("expected MoveStarted, got {events:?}");
        };
        assert_eq!(steps.len(), 3);
        for step in steps {
            assert_eq!(step.direction, crate::movement::Direction::Up);
            assert_eq!(step.duration, Fixed::from_num(2));
        }

        let events = drain_moves(&mut battle);
        assert_eq!(battle.phase(), Phase::Idle);
        assert_eq!(battle.selection(), None);
        assert!(matches!(
            events.last(),
            Some(BattleEvent::MoveCompleted { cell, .. }) if *cell == Cell::new(2, 5)
        ));

        let origin = battle.grid().tile_at(Cell::new(2, 2)).unwrap();
        assert_eq!(origin.terrain(), Terrain::Land);
        assert_eq!(origin.occupant(), None);
        // Intermediate tiles were released as the unit passed through.
        for y in 3..5 {
            let tile = battle.grid().tile_at(Cell::new(2, y)).unwrap();
            assert_eq!(tile.terrain(), Terrain::Land);
        }
        let goal = battle.grid().tile_at(Cell::new(2, 5)).unwrap();
        assert_eq!(goal.terrain(), Terrain::Occupied);
        assert_eq!(goal.occupant(), Some(unit));

        let moved = battle.unit(unit).unwrap();
        assert_eq!(moved.cell, Cell::new(2, 5));
        assert_eq!(moved.facing, crate::movement::Direction::Up);
        assert_eq!(moved.draw_priority, 9 - 5);
    }

    #[test]
    fn test_taps_are_ignored_while_moving() {
        let mut battle = battle();
        let _ = battle
            .spawn_unit(Cell::new(0, 0), UnitSpawnParams::default())
            .unwrap();
        let other = battle
            .spawn_unit(Cell::new(7, 7), UnitSpawnParams::default())
            .unwrap();

        let _ = battle.tap_cell(Cell::new(0, 0));
        let _ = battle.tap_cell(Cell::new(0, 3));
        assert_eq!(battle.phase(), Phase::Moving);
        let grid_before = battle.grid().clone();

        // Neither an empty tile nor another unit can be tapped mid-move.
        assert!(battle.tap_cell(Cell::new(5, 5)).is_empty());
        assert!(battle.tap_cell(Cell::new(7, 7)).is_empty());
        assert_eq!(battle.phase(), Phase::Moving);
        assert_eq!(battle.grid(), &grid_before);
        assert_ne!(battle.selection().map(|(unit, _)| unit), Some(other));
    }

    #[test]
    fn test_step_protocol_is_enforced() {
        let mut battle = battle();
        assert!(matches!(
            battle.begin_step(),
            Err(BattleError::InvalidTransition { action: "begin_step", .. })
        ));

        let _ = battle
            .spawn_unit(Cell::new(0, 0), UnitSpawnParams::default())
            .unwrap();
        let _ = battle.tap_cell(Cell::new(0, 0));
        assert!(matches!(
            battle.complete_step(),
            Err(BattleError::InvalidTransition { .. })
        ));

        let _ = battle.tap_cell(Cell::new(2, 0));
        let _ = battle.begin_step().unwrap();
        // Beginning the same step twice is a caller error.
        assert!(matches!(
            battle.begin_step(),
            Err(BattleError::InvalidTransition { .. })
        ));
        let _ = battle.complete_step().unwrap();
        // Completing with no step in flight is too.
        assert!(matches!(
            battle.complete_step(),
            Err(BattleError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_spawn_rejects_unavailable_tiles() {
        let mut battle = battle();
        battle.set_terrain(Cell::new(1, 1), Terrain::Stone).unwrap();

        assert!(matches!(
            battle.spawn_unit(Cell::new(1, 1), UnitSpawnParams::default()),
            Err(BattleError::TileUnavailable { x: 1, y: 1 })
        ));
        assert!(matches!(
            battle.spawn_unit(Cell::new(20, 1), UnitSpawnParams::default()),
            Err(BattleError::OutOfBounds { .. })
        ));

        let unit = battle
            .spawn_unit(Cell::new(2, 2), UnitSpawnParams::default())
            .unwrap();
        assert!(matches!(
            battle.spawn_unit(Cell::new(2, 2), UnitSpawnParams::default()),
            Err(BattleError::TileUnavailable { .. })
        ));
        assert!(battle.units().contains(unit));
    }

    #[test]
    fn test_occupancy_events_follow_step_order() {
        let mut battle = battle();
        let unit = battle
            .spawn_unit(Cell::new(0, 0), UnitSpawnParams::default())
            .unwrap();
        let _ = battle.tap_cell(Cell::new(0, 0));
        let _ = battle.tap_cell(Cell::new(2, 0));

        let events = drain_moves(&mut battle);
        let occupancy: Vec<_> = events
            .iter()
            .filter(|event| matches!(event, BattleEvent::OccupancyChanged { .. }))
            .collect();

        // Each step releases its origin, then claims its destination.
        assert_eq!(
            occupancy,
            vec![
                &BattleEvent::OccupancyChanged {
                    cell: Cell::new(0, 0),
                    terrain: Terrain::Land,
                    occupant: None
                },
                &BattleEvent::OccupancyChanged {
                    cell: Cell::new(1, 0),
                    terrain: Terrain::Occupied,
                    occupant: Some(unit)
                },
                &BattleEvent::OccupancyChanged {
                    cell: Cell::new(1, 0),
                    terrain: Terrain::Land,
                    occupant: None
                },
                &BattleEvent::OccupancyChanged {
                    cell: Cell::new(2, 0),
                    terrain: Terrain::Occupied,
                    occupant: Some(unit)
                },
            ]
        );
    }

    #[test]
    fn test_end_to_end_bootstrap_demo() {
        let mut battle = bootstrap_battle();
        let layout = battle.config().layout;

        // Tap an empty tile: a unit spawns there.
        let events = battle.handle_tap(layout.cell_center(Cell::new(2, 2)));
        let BattleEvent::UnitSpawned { unit, .. } = events[0] else {
            panic!("expected UnitSpawned, got {events:?}");
        };

        // Tap it again: it becomes the selection.
        let _ = battle.handle_tap(layout.cell_center(Cell::new(2, 2)));
        assert_eq!(battle.phase(), Phase::UnitSelected);
        assert_eq!(battle.selection(), Some((unit, Cell::new(2, 2))));

        // Tap a reachable land tile: a 4-cell path starts the move.
        let events = battle.handle_tap(layout.cell_center(Cell::new(2, 5)));
        assert_eq!(battle.phase(), Phase::Moving);
        assert!(matches!(
            &events[0],
            BattleEvent::MoveStarted { steps, .. } if steps.len() == 3
        ));

        let _ = drain_moves(&mut battle);
        assert_eq!(battle.phase(), Phase::Idle);
        assert_eq!(
            battle.grid().tile_at(Cell::new(2, 2)).unwrap().terrain(),
            Terrain::Land
        );
        let goal = battle.grid().tile_at(Cell::new(2, 5)).unwrap();
        assert_eq!(goal.terrain(), Terrain::Occupied);
        assert_eq!(goal.occupant(), Some(unit));
    }

    #[test]
    fn test_battle_state_survives_a_serialization_round_trip() {
        let mut battle = battle();
        let _ = battle
            .spawn_unit(Cell::new(2, 2), UnitSpawnParams::default())
            .unwrap();
        let _ = battle.tap_cell(Cell::new(2, 2));
        let _ = battle.tap_cell(Cell::new(5, 2));
        let _ = battle.begin_step().unwrap();

        let bytes = bincode::serialize(&battle).unwrap();
        let restored: Battle = bincode::deserialize(&bytes).unwrap();
        assert_eq!(restored, battle);
    }
}
