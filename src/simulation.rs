//! The fixed-step game loop.
//!
//! [`SimulationPlugin`] owns every gameplay system and is safe to run headless:
//! it registers no rendering, audio or input systems.  One `FixedUpdate` tick
//! at 60 Hz runs four chained sets:
//!
//! | Set           | Systems                                                                  |
//! |---------------|--------------------------------------------------------------------------|
//! | `Intake`      | effect expiry, spawner (via [`SpawnerPlugin`]), dash latch, player fire  |
//! | `Advance`     | player, enemies, boss, laser, rocks, power-ups, projectiles, particles   |
//! | `Resolve`     | the six collision rules of [`crate::collision`], in order                |
//! | `Bookkeeping` | shake decay, survival clock, terminal transition                         |
//!
//! Every set runs only in [`GameState::Playing`]; the first three also stop as
//! soon as the session has an outcome, so a decided session never changes
//! score or spawns anything.
//!
//! Effect expiry ticks at the start of a step, so an effect picked up in
//! `Resolve` is first decremented on the following tick and lasts its full
//! duration.

use crate::audio::SoundCue;
use crate::boss::{boss_advance_system, boss_laser_system};
use crate::collision::{
    hostile_projectile_player_system, player_projectile_boss_system,
    player_projectile_enemy_system, powerup_pickup_system, projectile_bounds_system,
    rock_player_collision_system,
};
use crate::config::{GameConfig, PlayerConfig};
use crate::constants::TICK_HZ;
use crate::enemy::{enemy_advance_system, enemy_fire_system};
use crate::geometry::Arena;
use crate::menu::GameState;
use crate::particles::particle_advance_system;
use crate::player::{
    player_dash_system, player_fire_system, player_move_system, spawn_player, PlayerIntent,
};
use crate::powerup::{effect_expiry_system, powerup_advance_system};
use crate::projectile::projectile_advance_system;
use crate::rock::rock_advance_system;
use crate::session::{
    session_undecided, Outcome, ScreenShake, SessionOutcome, SessionStats, SimSet,
};
use crate::spawner::{reset_spawn_timers, spawner_system, SpawnTimers};
use bevy::prelude::*;

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .insert_resource(Time::<Fixed>::from_hz(TICK_HZ))
            .add_message::<SoundCue>()
            .init_resource::<GameConfig>()
            .init_resource::<Arena>()
            .init_resource::<SessionStats>()
            .init_resource::<SessionOutcome>()
            .init_resource::<ScreenShake>()
            .init_resource::<PlayerIntent>()
            .configure_sets(
                FixedUpdate,
                (
                    SimSet::Intake,
                    SimSet::Advance,
                    SimSet::Resolve,
                    SimSet::Bookkeeping,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            )
            .configure_sets(
                FixedUpdate,
                (SimSet::Intake, SimSet::Advance, SimSet::Resolve).run_if(session_undecided),
            )
            .add_systems(
                OnEnter(GameState::Playing),
                (reset_session_system, begin_session_system).chain(),
            )
            .add_systems(
                FixedUpdate,
                (effect_expiry_system, player_dash_system, player_fire_system)
                    .chain()
                    .in_set(SimSet::Intake),
            )
            .add_systems(
                FixedUpdate,
                (
                    player_move_system,
                    enemy_advance_system,
                    enemy_fire_system,
                    boss_advance_system,
                    boss_laser_system,
                    rock_advance_system,
                    powerup_advance_system,
                    projectile_advance_system,
                    particle_advance_system,
                )
                    .chain()
                    .in_set(SimSet::Advance),
            )
            .add_systems(
                FixedUpdate,
                (
                    rock_player_collision_system,
                    projectile_bounds_system,
                    hostile_projectile_player_system,
                    player_projectile_enemy_system,
                    player_projectile_boss_system,
                    powerup_pickup_system,
                )
                    .chain()
                    .in_set(SimSet::Resolve),
            )
            .add_systems(
                FixedUpdate,
                (
                    shake_decay_system,
                    session_clock_system.run_if(session_undecided),
                    conclude_session_system,
                )
                    .chain()
                    .in_set(SimSet::Bookkeeping),
            );
    }
}

/// Timed spawning of enemies, rocks, power-ups and the boss.
///
/// Kept apart from [`SimulationPlugin`] so tests can drive a session with a
/// hand-placed cast.
pub struct SpawnerPlugin;

impl Plugin for SpawnerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SpawnTimers>()
            .add_systems(OnEnter(GameState::Playing), reset_spawn_timers)
            .add_systems(FixedUpdate, spawner_system.in_set(SimSet::Intake));
    }
}

/// Fresh score, counters, outcome, shake and input for a new session.
pub fn reset_session_system(
    mut stats: ResMut<SessionStats>,
    mut outcome: ResMut<SessionOutcome>,
    mut shake: ResMut<ScreenShake>,
    mut intent: ResMut<PlayerIntent>,
) {
    *stats = SessionStats::default();
    *outcome = SessionOutcome::default();
    *shake = ScreenShake::default();
    *intent = PlayerIntent::default();
}

/// Spawn the player ship for a new session.
pub fn begin_session_system(
    mut commands: Commands,
    player_config: Option<Res<PlayerConfig>>,
    arena: Res<Arena>,
) {
    let Some(player_config) = player_config else {
        error!("Session started without a player configuration");
        return;
    };
    spawn_player(&mut commands, &player_config, &arena);
    info!("Session started on a {}x{} arena", arena.width, arena.height);
}

pub fn shake_decay_system(mut shake: ResMut<ScreenShake>) {
    shake.decay();
}

/// Advance the survival clock by one fixed step.
pub fn session_clock_system(time: Res<Time>, mut stats: ResMut<SessionStats>) {
    stats.elapsed += time.delta();
}

/// Leave `Playing` once the session has an outcome.
pub fn conclude_session_system(
    outcome: Res<SessionOutcome>,
    stats: Res<SessionStats>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if !outcome.is_changed() {
        return;
    }
    let Some(result) = outcome.get() else {
        return;
    };
    match result {
        Outcome::Victory => info!(
            "Victory after {}s with score {}",
            stats.survived_secs(),
            stats.score()
        ),
        Outcome::Defeat(cause) => info!(
            "Defeat ({cause:?}) after {}s with score {}",
            stats.survived_secs(),
            stats.score()
        ),
    }
    next_state.set(GameState::GameOver);
}
