//! Scenario loading and validation.
//!
//! Scenarios define the initial battle state and a scripted tap sequence,
//! stored as RON. Terrain is drawn as ASCII art rows using the glyphs from
//! [`Terrain`], top row first.

use std::path::Path;

use battle_core::grid::Terrain;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for scenario operations.
#[derive(Error, Debug)]
pub enum ScenarioError {
    /// Failed to read the scenario file.
    #[error("Failed to read scenario file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse RON.
    #[error("Failed to parse scenario: {0}")]
    ParseError(#[from] ron::error::SpannedError),
    /// The scenario parsed but is not playable.
    #[error("Invalid scenario: {0}")]
    Invalid(String),
}

/// A unit placed on the grid before the tap script runs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UnitPlacement {
    /// Grid cell the unit starts on.
    pub cell: (i32, i32),
    /// Starting hit points.
    #[serde(default = "default_hp")]
    pub hp: u32,
    /// Walk speed. Converted to fixed-point at the battle boundary.
    #[serde(default = "default_speed")]
    pub speed: f64,
}

fn default_hp() -> u32 {
    100
}

fn default_speed() -> f64 {
    1.0
}

/// A complete scenario configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Terrain rows as ASCII art, top row first.
    pub terrain: Vec<String>,
    /// Units placed before the script runs.
    #[serde(default)]
    pub units: Vec<UnitPlacement>,
    /// Tap script in grid coordinates.
    #[serde(default)]
    pub taps: Vec<(i32, i32)>,
    /// Enable the demo bootstrap: empty-tile taps spawn units.
    #[serde(default)]
    pub bootstrap_spawn: bool,
}

impl Scenario {
    /// Parse and validate a scenario from RON text.
    ///
    /// # Errors
    ///
    /// Returns a [`ScenarioError`] on malformed RON or an unplayable
    /// scenario.
    pub fn parse(text: &str) -> Result<Self, ScenarioError> {
        let scenario: Self = ron::from_str(text)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Load and validate a scenario from a file.
    ///
    /// # Errors
    ///
    /// Returns a [`ScenarioError`] on IO failure, malformed RON, or an
    /// unplayable scenario.
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        Self::parse(&std::fs::read_to_string(path)?)
    }

    /// Grid width implied by the terrain art.
    #[must_use]
    pub fn grid_width(&self) -> i32 {
        self.terrain.first().map_or(0, |row| row.chars().count()) as i32
    }

    /// Grid height implied by the terrain art.
    #[must_use]
    pub fn grid_height(&self) -> i32 {
        self.terrain.len() as i32
    }

    fn validate(&self) -> Result<(), ScenarioError> {
        if self.terrain.is_empty() {
            return Err(ScenarioError::Invalid("terrain art is empty".into()));
        }
        let width = self.grid_width();
        if width == 0 {
            return Err(ScenarioError::Invalid("terrain rows are empty".into()));
        }
        for (index, row) in self.terrain.iter().enumerate() {
            if row.chars().count() as i32 != width {
                return Err(ScenarioError::Invalid(format!(
                    "terrain row {index} has a different width"
                )));
            }
            for glyph in row.chars() {
                match Terrain::from_glyph(glyph) {
                    None => {
                        return Err(ScenarioError::Invalid(format!(
                            "unknown terrain glyph {glyph:?} in row {index}"
                        )));
                    }
                    Some(Terrain::Occupied) => {
                        return Err(ScenarioError::Invalid(format!(
                            "row {index}: units are placed with the units list, not terrain art"
                        )));
                    }
                    Some(_) => {}
                }
            }
        }
        for placement in &self.units {
            if placement.speed <= 0.0 {
                return Err(ScenarioError::Invalid(format!(
                    "unit at {:?} has non-positive speed",
                    placement.cell
                )));
            }
        }
        Ok(())
    }
}
