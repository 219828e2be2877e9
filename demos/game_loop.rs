//! Game Loop
//!
//! This example walks the game's state tree the way a frame loop would.
//!
//! Key concepts:
//! - Building the game tree with hooks attached by path
//! - Routing input maps and camera modes through a transition bridge
//! - Ticking only the active leaf
//! - Reading transition errors instead of log lines
//!
//! Run with: cargo run --example game_loop
//! Set RUST_LOG=statetree=debug to see every enter and exit.

use statetree::config::ForestConfig;
use statetree::core::{CameraMode, InputMap};
use statetree::events::{CameraModeSelector, InputMapSelector};
use statetree::game::{game_builder, GameStateSystem, InteractionKind};
use statetree::tree::{HookContext, StateHooks};
use statetree::TransitionBridge;

struct ConsoleInput;

impl InputMapSelector for ConsoleInput {
    fn select_input_map(&mut self, map: InputMap) {
        println!("  [input]  {map}");
    }
}

struct ConsoleCamera;

impl CameraModeSelector for ConsoleCamera {
    fn select_camera_mode(&mut self, mode: CameraMode) {
        println!("  [camera] blend to {mode}");
    }
}

/// Counts frames spent climbing.
struct ClimbTimer {
    frames: u32,
}

impl StateHooks for ClimbTimer {
    fn on_enter(&mut self, _cx: &HookContext<'_>) {
        self.frames = 0;
    }

    fn on_update(&mut self, _cx: &HookContext<'_>) {
        self.frames += 1;
    }

    fn on_exit(&mut self, cx: &HookContext<'_>) {
        println!(
            "  [climb]  {} frames on the wall, next: {}",
            self.frames,
            cx.peer.unwrap_or("nothing")
        );
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    println!("=== Game Loop ===\n");

    let builder = game_builder(ForestConfig::from_env())
        .hooks_at("InsideGame/OutsideWorld/Climbing", ClimbTimer { frames: 0 })
        .observer(TransitionBridge::new(ConsoleInput, ConsoleCamera));
    let mut game = match GameStateSystem::from_builder(builder) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("Failed to start: {e}");
            return;
        }
    };
    println!("Start: {}\n", game.current_state_path());

    println!("Onto the mountain:");
    for step in ["MountainFoot", "Climbing"] {
        let path = format!("InsideGame/OutsideWorld/{step}");
        if let Err(e) = game.switch_to_state(&path) {
            println!("  refused: {e}");
        }
    }
    for _ in 0..3 {
        game.update();
    }
    println!("  time advances: {}", game.game_time_advances());
    game.switch_to_state("InsideGame/OutsideWorld/MountainTop").ok();
    println!("  now at {}\n", game.current_state_path());

    println!("Back on the boat:");
    game.switch_to_state("InsideGame/InsideWorld/Sailing").ok();
    game.start_interaction(InteractionKind::Helm).ok();
    println!("  now at {}", game.current_state_path());
    match game.open_telescope() {
        Ok(_) => println!("  telescope open"),
        Err(e) => println!("  telescope refused: {e}"),
    }
    game.return_to_sailing().ok();
    game.open_telescope().ok();
    println!("  now at {}\n", game.current_state_path());

    println!("Visited:");
    for path in game.forest().history().get_path() {
        println!("  {path}");
    }

    game.shutdown();
    println!("\n=== Example Complete ===");
}
