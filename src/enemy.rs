//! Basic enemy ships: slow descent and random aimed shots.
//!
//! | System                 | Set       | Purpose                                     |
//! |------------------------|-----------|---------------------------------------------|
//! | `enemy_advance_system` | `Advance` | Descend; drop ships below the bottom edge   |
//! | `enemy_fire_system`    | `Advance` | Per-tick chance to fire at the player       |

use crate::config::GameConfig;
use crate::constants::{
    ENEMY_BULLET_SPEED, ENEMY_SLOW_SPEED, ENEMY_SPAWN_Y, ENEMY_SPEED, HOSTILE_BULLET_DAMAGE,
    HOSTILE_BULLET_RADIUS,
};
use crate::geometry::{angle_to, heading, Arena, Position};
use crate::player::{Loadout, Player};
use crate::projectile::{spawn_projectile, Owner, Projectile};
use crate::session::SessionEntity;
use bevy::prelude::*;
use rand::Rng;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Enemy;

pub fn spawn_enemy(commands: &mut Commands, at: Vec2) -> Entity {
    commands.spawn((Enemy, Position(at), SessionEntity)).id()
}

/// Spawner entry point: random x across the arena, just above the top edge.
pub fn spawn_random_enemy(commands: &mut Commands, arena: &Arena) -> Entity {
    let x = rand::thread_rng().gen::<f32>() * arena.width;
    spawn_enemy(commands, Vec2::new(x, ENEMY_SPAWN_Y))
}

/// Descent speed for the current player loadout.
#[inline]
pub fn descent_speed(slowed: bool) -> f32 {
    if slowed {
        ENEMY_SLOW_SPEED
    } else {
        ENEMY_SPEED
    }
}

/// Hostile projectile aimed from `from` at `target`.
pub fn aimed_shot(from: Vec2, target: Vec2) -> Projectile {
    Projectile {
        velocity: heading(angle_to(from, target)) * ENEMY_BULLET_SPEED,
        radius: HOSTILE_BULLET_RADIUS,
        damage: HOSTILE_BULLET_DAMAGE,
        owner: Owner::Hostile,
    }
}

/// Move every enemy down and despawn those past the bottom edge.
pub fn enemy_advance_system(
    mut commands: Commands,
    arena: Res<Arena>,
    players: Query<&Loadout, With<Player>>,
    mut enemies: Query<(Entity, &mut Position), With<Enemy>>,
) {
    let slowed = players.single().is_ok_and(|l| l.enemy_slow);
    let speed = descent_speed(slowed);
    for (entity, mut pos) in enemies.iter_mut() {
        pos.y += speed;
        if pos.y > arena.height {
            commands.entity(entity).despawn();
        }
    }
}

/// Each enemy fires at the player with probability `enemy_fire_chance`.
pub fn enemy_fire_system(
    mut commands: Commands,
    config: Res<GameConfig>,
    players: Query<&Position, With<Player>>,
    enemies: Query<&Position, (With<Enemy>, Without<Player>)>,
) {
    let Ok(target) = players.single() else {
        return;
    };
    if config.enemy_fire_chance <= 0.0 {
        return;
    }
    let mut rng = rand::thread_rng();
    for pos in enemies.iter() {
        if rng.gen_bool(config.enemy_fire_chance) {
            spawn_projectile(&mut commands, pos.0, aimed_shot(pos.0, target.0));
        }
    }
}
