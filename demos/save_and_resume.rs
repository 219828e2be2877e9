//! Save and Resume
//!
//! This example saves the player's position in the state tree and resumes
//! it in a fresh game.
//!
//! Key concepts:
//! - Checkpoints hold the active path and transition history
//! - JSON for readability, bincode for compactness
//! - Restoring navigates, so hooks and observers run as usual
//!
//! Run with: cargo run --example save_and_resume

use statetree::checkpoint::ForestCheckpoint;
use statetree::config::ForestConfig;
use statetree::game::GameStateSystem;
use statetree::StateEvent;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    println!("=== Save and Resume ===\n");

    let mut game = GameStateSystem::initialize(ForestConfig::default())?;
    game.switch_to_state("InsideGame/InsideWorld/Sailing")?;
    game.open_cabin()?;
    game.switch_to_sub_state("ExploringMind")?;
    println!("Playing at: {}", game.current_state_path());

    let checkpoint = game.forest().checkpoint();
    let json = checkpoint.to_json()?;
    let binary = checkpoint.to_binary()?;
    println!("Checkpoint {}", checkpoint.id);
    println!("  JSON:   {} bytes", json.len());
    println!("  binary: {} bytes\n", binary.len());

    let mut resumed = GameStateSystem::initialize(ForestConfig::default())?;
    resumed.subscribe(|event: &StateEvent| {
        if let StateEvent::Entered { path, .. } = event {
            println!("  entered {path}");
        }
    });

    println!("Resuming from binary:");
    let restored = ForestCheckpoint::from_binary(&binary)?;
    resumed.forest_mut().restore(&restored)?;
    println!("Resumed at: {}", resumed.current_state_path());
    println!("Time advances: {}", resumed.game_time_advances());
    println!("History entries: {}", resumed.forest().history().len());

    println!("\n=== Example Complete ===");
    Ok(())
}
