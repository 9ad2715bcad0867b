//! Scripted scenario runner.
//!
//! Plays a scenario's tap script against a fresh battle. The runner stands
//! in for the presentation layer: whenever the battle enters the `Moving`
//! phase it drives every step to completion immediately, logging each one
//! instead of animating it.

use battle_core::battle::{Battle, BattleEvent, Phase};
use battle_core::config::BattleConfig;
use battle_core::grid::{Cell, Terrain};
use battle_core::math::Fixed;
use battle_core::unit::UnitSpawnParams;

use crate::ascii;
use crate::scenario::{Scenario, ScenarioError};

/// Outcome summary of a scenario run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Phase the battle ended in.
    pub final_phase: Phase,
    /// Moves that ran to completion.
    pub moves_completed: usize,
    /// Destination taps that found no route.
    pub paths_rejected: usize,
    /// Final grid as ASCII art.
    pub map: String,
}

/// Build a battle matching a validated scenario: terrain painted, units
/// placed, tap script not yet run.
///
/// # Errors
///
/// Returns [`ScenarioError::Invalid`] if the scenario puts terrain or
/// units where the battle refuses them.
pub fn build_battle(scenario: &Scenario) -> Result<Battle, ScenarioError> {
    let config = BattleConfig {
        grid_width: scenario.grid_width(),
        grid_height: scenario.grid_height(),
        bootstrap_spawn: scenario.bootstrap_spawn,
        ..BattleConfig::default()
    };
    let mut battle = Battle::new(config);

    let height = scenario.grid_height();
    for (row_index, row) in scenario.terrain.iter().enumerate() {
        for (col, glyph) in row.chars().enumerate() {
            let Some(terrain) = Terrain::from_glyph(glyph) else {
                unreachable!("scenario glyphs were validated at parse time");
            };
            if terrain == Terrain::Land {
                continue;
            }
            let cell = Cell::new(col as i32, height - 1 - row_index as i32);
            battle
                .set_terrain(cell, terrain)
                .map_err(|err| ScenarioError::Invalid(err.to_string()))?;
        }
    }

    for placement in &scenario.units {
        let cell = Cell::new(placement.cell.0, placement.cell.1);
        let params = UnitSpawnParams {
            hp: placement.hp,
            walk_speed: Fixed::from_num(placement.speed),
            ..UnitSpawnParams::default()
        };
        battle
            .spawn_unit(cell, params)
            .map_err(|err| ScenarioError::Invalid(format!("cannot place unit at {cell}: {err}")))?;
    }

    Ok(battle)
}

/// Play a scenario's tap script to the end and report the outcome.
///
/// # Errors
///
/// Returns [`ScenarioError::Invalid`] if the scenario cannot be built or
/// the step protocol fails mid-run.
pub fn run(scenario: &Scenario) -> Result<RunReport, ScenarioError> {
    let mut battle = build_battle(scenario)?;
    let layout = battle.config().layout;
    let mut moves_completed = 0;
    let mut paths_rejected = 0;

    for &(x, y) in &scenario.taps {
        let cell = Cell::new(x, y);
        tracing::info!(%cell, "tap");
        let events = battle.handle_tap(layout.cell_center(cell));
        tally(&events, &mut moves_completed, &mut paths_rejected);

        while battle.phase() == Phase::Moving {
            let events = battle
                .begin_step()
                .map_err(|err| ScenarioError::Invalid(err.to_string()))?;
            for event in &events {
                if let BattleEvent::StepBegan { unit, step } = event {
                    tracing::info!(
                        unit,
                        from = %step.from,
                        to = %step.to,
                        direction = ?step.direction,
                        "step"
                    );
                }
            }
            let events = battle
                .complete_step()
                .map_err(|err| ScenarioError::Invalid(err.to_string()))?;
            tally(&events, &mut moves_completed, &mut paths_rejected);
        }
    }

    Ok(RunReport {
        final_phase: battle.phase(),
        moves_completed,
        paths_rejected,
        map: ascii::render(battle.grid()),
    })
}

fn tally(events: &[BattleEvent], moves_completed: &mut usize, paths_rejected: &mut usize) {
    for event in events {
        match event {
            BattleEvent::MoveCompleted { unit, cell } => {
                tracing::info!(unit, %cell, "move completed");
                *moves_completed += 1;
            }
            BattleEvent::PathRejected { from, to } => {
                tracing::warn!(%from, %to, "no path");
                *paths_rejected += 1;
            }
            _ => {}
        }
    }
}
