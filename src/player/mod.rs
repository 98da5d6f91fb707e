//! Player module: ship entity, input handling, combat, and rendering.
//!
//! ## Sub-module layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`state`] | ECS components (`Player`, `Hull`, `PlayerVitals`, `Loadout`, `Dash`, `ActiveEffects`) and the `PlayerIntent` resource |
//! | [`control`] | Input systems: WASD movement, mouse aim and fire latch, Shift dash |
//! | [`combat`] | Volley construction, firing, and the shared damage path `strike_player` |
//! | [`rendering`] | Ship sprite (triangle fallback), shield ring, dash ring |
//!
//! All public items are re-exported at this level so the rest of the crate
//! can use flat `crate::player::*` imports without knowing the sub-module
//! layout.

pub mod combat;
pub mod control;
pub mod rendering;
pub mod state;

pub use combat::{player_fire_system, strike_player, volley};
pub use control::{keyboard_to_intent_system, player_dash_system, player_move_system};
pub use rendering::{attach_player_sprite_system, player_gizmo_system};
pub use state::{
    ActiveEffects, Dash, HitOutcome, Hull, Loadout, Player, PlayerIntent, PlayerVitals,
    TimedEffect,
};

// ── Ship spawn ─────────────────────────────────────────────────────────────────

use crate::config::PlayerConfig;
use crate::constants::PLAYER_SPAWN_BOTTOM_OFFSET;
use crate::geometry::{Arena, Position};
use crate::session::SessionEntity;
use bevy::prelude::*;

/// Spawn the player's ship centred horizontally near the bottom edge.
pub fn spawn_player(commands: &mut Commands, config: &PlayerConfig, arena: &Arena) -> Entity {
    let at = Vec2::new(
        arena.width * 0.5,
        arena.height - PLAYER_SPAWN_BOTTOM_OFFSET,
    );
    let entity = commands
        .spawn((
            Player,
            Hull::from_config(config),
            PlayerVitals::new(config.lives),
            Loadout::default(),
            Dash::default(),
            ActiveEffects::default(),
            Position(at),
            SessionEntity,
        ))
        .id();
    info!("Player ship spawned at {at} with {} lives", config.lives);
    entity
}
