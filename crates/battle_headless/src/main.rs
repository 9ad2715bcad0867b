//! Grid Tactics - headless scenario runner

use std::path::Path;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use battle_headless::runner;
use battle_headless::scenario::{Scenario, ScenarioError};

/// Built-in demo scenario used by the `demo` subcommand.
const DEMO_SCENARIO: &str = include_str!("../scenarios/demo.ron");

#[derive(Parser)]
#[command(name = "battle-headless")]
#[command(about = "Headless scenario runner for the grid battle core")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario file
    Run {
        /// Path to a RON scenario
        path: String,
    },
    /// Run the built-in demo scenario
    Demo,
}

fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run { path } => Scenario::load(Path::new(&path)).and_then(|s| play(&s)),
        Commands::Demo => Scenario::parse(DEMO_SCENARIO).and_then(|s| play(&s)),
    };

    if let Err(e) = result {
        tracing::error!("scenario failed: {e}");
        std::process::exit(1);
    }
}

fn play(scenario: &Scenario) -> Result<(), ScenarioError> {
    tracing::info!(name = %scenario.name, "running scenario");

    let report = runner::run(scenario)?;
    tracing::info!(
        final_phase = ?report.final_phase,
        moves_completed = report.moves_completed,
        paths_rejected = report.paths_rejected,
        "scenario finished"
    );
    println!("{}", report.map);
    Ok(())
}
