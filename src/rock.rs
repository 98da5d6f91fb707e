//! Falling rocks: indestructible hazards that crush the player on contact.

use crate::constants::{ROCK_MAX_SPEED, ROCK_MIN_SPEED, ROCK_PLAYER_MARGIN, ROCK_SIZE};
use crate::geometry::{Arena, Position, ScreenRect};
use crate::session::SessionEntity;
use bevy::prelude::*;
use rand::Rng;

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Rock {
    /// Fall speed in px/tick, fixed at spawn within `[2, 5)`.
    pub speed: f32,
}

impl Rock {
    #[inline]
    pub fn rect(center: Vec2) -> ScreenRect {
        ScreenRect::from_center(center, Vec2::splat(ROCK_SIZE))
    }

    /// `true` when `player` lies strictly inside the rock grown by the
    /// crush margin.
    pub fn crushes(center: Vec2, player: Vec2) -> bool {
        Self::rect(center)
            .expanded(ROCK_PLAYER_MARGIN)
            .contains_strict(player)
    }
}

pub fn spawn_rock(commands: &mut Commands, center: Vec2, speed: f32) -> Entity {
    commands
        .spawn((Rock { speed }, Position(center), SessionEntity))
        .id()
}

/// Spawner entry point: fully inside horizontally, just above the top edge.
pub fn spawn_random_rock(commands: &mut Commands, arena: &Arena) -> Entity {
    let mut rng = rand::thread_rng();
    let half = ROCK_SIZE * 0.5;
    let left = rng.gen::<f32>() * (arena.width - ROCK_SIZE).max(0.0);
    let speed = rng.gen_range(ROCK_MIN_SPEED..ROCK_MAX_SPEED);
    spawn_rock(commands, Vec2::new(left + half, -half), speed)
}

/// Let rocks fall and drop the ones fully below the bottom edge.
pub fn rock_advance_system(
    mut commands: Commands,
    arena: Res<Arena>,
    mut query: Query<(Entity, &Rock, &mut Position)>,
) {
    for (entity, rock, mut pos) in query.iter_mut() {
        pos.y += rock.speed;
        if Rock::rect(pos.0).min.y > arena.height {
            commands.entity(entity).despawn();
        }
    }
}
