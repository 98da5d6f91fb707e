//! Falling power-ups and the effects they grant.
//!
//! | kind     | effect                         | duration          |
//! |----------|--------------------------------|-------------------|
//! | `Life`   | +1 life                        | permanent         |
//! | `Rapid`  | 80 ms fire interval            | timed, then 300 ms|
//! | `Big`    | bullet radius 12 (damage 15)   | timed, then 5     |
//! | `Spread` | triple shot                    | timed, then off   |
//! | `Shield` | shield refilled to max         | until depleted    |
//!
//! A power-up is collected by shooting it (see [`crate::collision`]).

use crate::constants::{
    PLAYER_BIG_BULLET_RADIUS, PLAYER_BULLET_RADIUS, PLAYER_FIRE_INTERVAL,
    PLAYER_RAPID_FIRE_INTERVAL, POWERUP_FALL_SPEED, POWERUP_SPAWN_Y,
};
use crate::geometry::{Arena, Position};
use crate::player::{ActiveEffects, Loadout, Player, PlayerVitals, TimedEffect};
use crate::session::SessionEntity;
use bevy::prelude::*;
use rand::Rng;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    Life,
    Rapid,
    Big,
    Spread,
    Shield,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 5] = [
        PowerUpKind::Life,
        PowerUpKind::Rapid,
        PowerUpKind::Big,
        PowerUpKind::Spread,
        PowerUpKind::Shield,
    ];

    /// Uniformly random kind.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// The expiring record this kind starts, if any.
    pub fn timed_effect(self) -> Option<TimedEffect> {
        match self {
            PowerUpKind::Rapid => Some(TimedEffect::Rapid),
            PowerUpKind::Big => Some(TimedEffect::Big),
            PowerUpKind::Spread => Some(TimedEffect::Spread),
            PowerUpKind::Life | PowerUpKind::Shield => None,
        }
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerUp {
    pub kind: PowerUpKind,
}

pub fn spawn_power_up(commands: &mut Commands, at: Vec2, kind: PowerUpKind) -> Entity {
    commands
        .spawn((PowerUp { kind }, Position(at), SessionEntity))
        .id()
}

/// Spawner entry point: random kind at a random x just above the top edge.
pub fn spawn_random_power_up(commands: &mut Commands, arena: &Arena) -> Entity {
    let mut rng = rand::thread_rng();
    let x = rng.gen::<f32>() * arena.width;
    spawn_power_up(
        commands,
        Vec2::new(x, POWERUP_SPAWN_Y),
        PowerUpKind::random(&mut rng),
    )
}

// ── Effects ───────────────────────────────────────────────────────────────────

/// Apply `kind` to the player.
pub fn apply_power_up(
    kind: PowerUpKind,
    vitals: &mut PlayerVitals,
    loadout: &mut Loadout,
    effects: &mut ActiveEffects,
    duration: Duration,
) {
    match kind {
        PowerUpKind::Life => vitals.lives += 1,
        PowerUpKind::Shield => vitals.refill_shield(),
        PowerUpKind::Rapid => loadout.fire_interval = PLAYER_RAPID_FIRE_INTERVAL,
        PowerUpKind::Big => loadout.bullet_radius = PLAYER_BIG_BULLET_RADIUS,
        PowerUpKind::Spread => loadout.spread = true,
    }
    if let Some(effect) = kind.timed_effect() {
        effects.grant(effect, duration);
    }
}

/// Restore the base value an expired effect overrode.  Safe to repeat.
pub fn revert_effect(effect: TimedEffect, loadout: &mut Loadout) {
    match effect {
        TimedEffect::Rapid => loadout.fire_interval = PLAYER_FIRE_INTERVAL,
        TimedEffect::Big => loadout.bullet_radius = PLAYER_BULLET_RADIUS,
        TimedEffect::Spread => loadout.spread = false,
    }
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// Let power-ups fall and drop the ones that left the bottom edge.
pub fn powerup_advance_system(
    mut commands: Commands,
    arena: Res<Arena>,
    mut query: Query<(Entity, &mut Position), With<PowerUp>>,
) {
    for (entity, mut pos) in query.iter_mut() {
        pos.y += POWERUP_FALL_SPEED;
        if pos.y > arena.height {
            commands.entity(entity).despawn();
        }
    }
}

/// Tick timed effects by the fixed delta and revert the expired ones.
pub fn effect_expiry_system(
    time: Res<Time>,
    mut query: Query<(&mut ActiveEffects, &mut Loadout), With<Player>>,
) {
    for (mut effects, mut loadout) in query.iter_mut() {
        for effect in effects.tick(time.delta()) {
            revert_effect(effect, &mut loadout);
            debug!("{effect:?} wore off");
        }
    }
}
