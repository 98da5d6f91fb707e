use bevy::prelude::*;

/// Top-level application state machine.
#[derive(States, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    /// Title screen; shown on startup and after a restart.
    #[default]
    StartScreen,
    /// Active session.
    Playing,
    /// Session ended (victory or defeat); summary overlay shown.
    GameOver,
}

/// Root node of the start-screen UI; entire tree is despawned on `OnExit(StartScreen)`.
#[derive(Component)]
pub struct StartScreenRoot;

/// Root node of the summary overlay; despawned on `OnExit(GameOver)`.
#[derive(Component)]
pub struct GameOverRoot;
