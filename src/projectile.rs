//! Projectiles fired by the player, enemies and the boss.
//!
//! A projectile only moves; every removal (off-screen, hit, pickup) belongs to
//! the collision engine in [`crate::collision`].

use crate::geometry::Position;
use crate::session::SessionEntity;
use bevy::prelude::*;

/// Who fired a projectile; decides which collision rules apply to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    Player,
    Hostile,
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    /// Displacement per tick in screen space.
    pub velocity: Vec2,
    pub radius: f32,
    pub damage: f32,
    pub owner: Owner,
}

impl Projectile {
    #[inline]
    pub fn is_hostile(&self) -> bool {
        self.owner == Owner::Hostile
    }
}

/// Spawn a projectile at `origin`.
pub fn spawn_projectile(commands: &mut Commands, origin: Vec2, projectile: Projectile) -> Entity {
    commands
        .spawn((projectile, Position(origin), SessionEntity))
        .id()
}

/// Move every projectile by its velocity.
pub fn projectile_advance_system(mut query: Query<(&Projectile, &mut Position)>) {
    for (projectile, mut pos) in query.iter_mut() {
        pos.0 += projectile.velocity;
    }
}
