//! Start screen, game-over summary and session teardown.
//!
//! ## States
//!
//! | State         | Description                                        |
//! |---------------|----------------------------------------------------|
//! | `StartScreen` | Initial state; title and controls, Enter starts    |
//! | `Playing`     | Simulation running; all gameplay systems active    |
//! | `GameOver`    | Simulation halted; summary shown, R restarts       |
//!
//! ## Systems (registered by `MenuPlugin`)
//!
//! | System                     | Schedule                  | Purpose                           |
//! |----------------------------|---------------------------|-----------------------------------|
//! | `setup_start_screen`       | `OnEnter(StartScreen)`    | Spawn title overlay               |
//! | `cleanup_start_screen`     | `OnExit(StartScreen)`     | Despawn title overlay             |
//! | `start_input_system`       | `Update / in StartScreen` | Enter → `Playing`                 |
//! | `setup_game_over`          | `OnEnter(GameOver)`       | Spawn summary card                |
//! | `cleanup_game_over`        | `OnExit(GameOver)`        | Despawn summary card              |
//! | `cleanup_session_entities` | `OnExit(GameOver)`        | Despawn the finished session      |
//! | `restart_input_system`     | `Update / in GameOver`    | R → `StartScreen`                 |
//!
//! `GameState` itself is registered by [`crate::simulation::SimulationPlugin`],
//! which must be added before this plugin.

use crate::config::PlayerConfig;
use bevy::prelude::*;

mod cleanup;
mod common;
mod game_over;
mod start_screen;
mod types;

pub use cleanup::cleanup_session_entities;
pub use types::*;

pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            OnEnter(GameState::StartScreen),
            start_screen::setup_start_screen,
        )
        .add_systems(
            OnExit(GameState::StartScreen),
            start_screen::cleanup_start_screen,
        )
        .add_systems(
            Update,
            start_screen::start_input_system
                .run_if(in_state(GameState::StartScreen))
                .run_if(resource_exists::<PlayerConfig>),
        )
        .add_systems(OnEnter(GameState::GameOver), game_over::setup_game_over)
        .add_systems(
            OnExit(GameState::GameOver),
            (game_over::cleanup_game_over, cleanup_session_entities),
        )
        .add_systems(
            Update,
            game_over::restart_input_system.run_if(in_state(GameState::GameOver)),
        );
    }
}
