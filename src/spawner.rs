//! Timed spawning of enemies, rocks, power-ups and the boss.
//!
//! All timers live in [`SpawnTimers`] and are ticked by [`spawner_system`]
//! inside the fixed-step chain, so nothing spawns once the session has ended
//! or the state has left `Playing`.

use crate::boss::spawn_boss;
use crate::config::GameConfig;
use crate::enemy::spawn_random_enemy;
use crate::geometry::Arena;
use crate::powerup::spawn_random_power_up;
use crate::rock::spawn_random_rock;
use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct SpawnTimers {
    pub enemy: Timer,
    pub rock: Timer,
    pub powerup: Timer,
    /// One-shot boss delay.
    pub boss: Timer,
    pub boss_spawned: bool,
}

impl SpawnTimers {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            enemy: Timer::new(config.enemy_spawn_interval(), TimerMode::Repeating),
            rock: Timer::new(config.rock_spawn_interval(), TimerMode::Repeating),
            powerup: Timer::new(config.powerup_spawn_interval(), TimerMode::Repeating),
            boss: Timer::new(config.boss_spawn_delay(), TimerMode::Once),
            boss_spawned: false,
        }
    }
}

impl Default for SpawnTimers {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

/// Restart every timer from the current [`GameConfig`]; runs on session start.
pub fn reset_spawn_timers(mut commands: Commands, config: Res<GameConfig>) {
    commands.insert_resource(SpawnTimers::from_config(&config));
}

/// Tick the spawn timers and spawn whatever came due this step.
pub fn spawner_system(
    mut commands: Commands,
    time: Res<Time>,
    arena: Res<Arena>,
    mut timers: ResMut<SpawnTimers>,
) {
    let delta = time.delta();

    timers.enemy.tick(delta);
    for _ in 0..timers.enemy.times_finished_this_tick() {
        spawn_random_enemy(&mut commands, &arena);
    }

    timers.rock.tick(delta);
    for _ in 0..timers.rock.times_finished_this_tick() {
        spawn_random_rock(&mut commands, &arena);
    }

    timers.powerup.tick(delta);
    for _ in 0..timers.powerup.times_finished_this_tick() {
        spawn_random_power_up(&mut commands, &arena);
    }

    timers.boss.tick(delta);
    if timers.boss.is_finished() && !timers.boss_spawned {
        timers.boss_spawned = true;
        spawn_boss(&mut commands, &arena);
    }
}
