//! Player components and resources.
//!
//! All ECS components and Bevy resources that describe player state live here.
//! Systems that mutate this state are in the sibling modules:
//! - [`super::control`]: input, movement and dash
//! - [`super::combat`]: firing and taking damage
//! - [`super::rendering`]: ship sprite and gizmo rings

use crate::config::PlayerConfig;
use crate::constants::{
    DASH_ACTIVE_TICKS, DASH_COOLDOWN_TICKS, PLAYER_BIG_BULLET_DAMAGE, PLAYER_BULLET_DAMAGE,
    PLAYER_BULLET_RADIUS, PLAYER_FIRE_INTERVAL, PLAYER_MAX_SHIELD,
};
use bevy::prelude::*;
use std::time::Duration;

// ── Components ─────────────────────────────────────────────────────────────────

/// Marker component for the player ship entity.
#[derive(Component)]
pub struct Player;

/// Ship dimensions and base speed, copied from [`PlayerConfig`] at spawn.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Hull {
    pub width: f32,
    pub height: f32,
    /// Pixels per tick while a direction is held.
    pub speed: f32,
}

impl Hull {
    pub fn from_config(config: &PlayerConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            speed: config.speed,
        }
    }

    /// Clamp margins: the ship centre stays this far from every edge.
    #[inline]
    pub fn half_extent(&self) -> Vec2 {
        Vec2::new(self.width, self.height) * 0.5
    }
}

/// Result of [`PlayerVitals::take_hit`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitOutcome {
    /// The ship was dashing; nothing changed.
    Immune,
    /// The shield soaked the hit.
    ShieldAbsorbed { shield_left: f32 },
    /// The hull took it; one life gone.
    LifeLost { lives_left: u32 },
}

/// Lives and shield.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct PlayerVitals {
    pub lives: u32,
    pub shield: f32,
    pub max_shield: f32,
}

impl PlayerVitals {
    pub fn new(lives: u32) -> Self {
        Self {
            lives,
            shield: 0.0,
            max_shield: PLAYER_MAX_SHIELD,
        }
    }

    /// Apply one hit of `amount`.
    ///
    /// Dashing ships are immune.  Otherwise a non-empty shield absorbs the hit
    /// (flooring at 0, never spilling over); an empty shield costs a life.
    pub fn take_hit(&mut self, amount: f32, dashing: bool) -> HitOutcome {
        if dashing {
            return HitOutcome::Immune;
        }
        if self.shield > 0.0 {
            self.shield = (self.shield - amount).max(0.0);
            return HitOutcome::ShieldAbsorbed {
                shield_left: self.shield,
            };
        }
        self.lives = self.lives.saturating_sub(1);
        HitOutcome::LifeLost {
            lives_left: self.lives,
        }
    }

    pub fn refill_shield(&mut self) {
        self.shield = self.max_shield;
    }
}

/// Weapon state, modified by timed power-ups.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Loadout {
    pub fire_interval: Duration,
    pub bullet_radius: f32,
    /// Fire two extra shots at ±`PLAYER_SPREAD_ANGLE`.
    pub spread: bool,
    /// Enemies descend at a third of their speed while set.
    pub enemy_slow: bool,
    /// Time since the last shot; saturates instead of overflowing.
    pub since_last_shot: Duration,
}

impl Default for Loadout {
    fn default() -> Self {
        Self {
            fire_interval: PLAYER_FIRE_INTERVAL,
            bullet_radius: PLAYER_BULLET_RADIUS,
            spread: false,
            enemy_slow: false,
            since_last_shot: Duration::MAX,
        }
    }
}

impl Loadout {
    #[inline]
    pub fn can_fire(&self) -> bool {
        self.since_last_shot >= self.fire_interval
    }

    /// Damage carried by a bullet of the current radius.
    #[inline]
    pub fn bullet_damage(&self) -> f32 {
        if self.bullet_radius > PLAYER_BULLET_RADIUS {
            PLAYER_BIG_BULLET_DAMAGE
        } else {
            PLAYER_BULLET_DAMAGE
        }
    }
}

/// Dash timing in ticks.
///
/// A dash may start only when `cooldown` is 0.  Both counters decrement once
/// per tick through [`Dash::tick`].
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Dash {
    pub cooldown: u32,
    /// Active ticks left; the ship is dashing while this is non-zero.
    pub remaining: u32,
}

impl Dash {
    /// Start a dash if the cooldown has elapsed.  Returns whether it started.
    pub fn try_start(&mut self) -> bool {
        if self.cooldown > 0 {
            return false;
        }
        self.remaining = DASH_ACTIVE_TICKS;
        self.cooldown = DASH_COOLDOWN_TICKS;
        true
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    pub fn tick(&mut self) {
        self.cooldown = self.cooldown.saturating_sub(1);
        self.remaining = self.remaining.saturating_sub(1);
    }
}

/// Power-ups that wear off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimedEffect {
    Rapid,
    Big,
    Spread,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EffectTimer {
    effect: TimedEffect,
    remaining: Duration,
}

/// Expiring records for the timed power-ups currently on the ship.
#[derive(Component, Debug, Default, Clone, PartialEq)]
pub struct ActiveEffects {
    timers: Vec<EffectTimer>,
}

impl ActiveEffects {
    /// Start `effect`, or refresh it to the full `duration` if already running.
    pub fn grant(&mut self, effect: TimedEffect, duration: Duration) {
        match self.timers.iter_mut().find(|t| t.effect == effect) {
            Some(timer) => timer.remaining = duration,
            None => self.timers.push(EffectTimer {
                effect,
                remaining: duration,
            }),
        }
    }

    pub fn remaining(&self, effect: TimedEffect) -> Option<Duration> {
        self.timers
            .iter()
            .find(|t| t.effect == effect)
            .map(|t| t.remaining)
    }

    /// Advance all timers by `delta` and drain the ones that ran out.
    pub fn tick(&mut self, delta: Duration) -> Vec<TimedEffect> {
        let mut expired = Vec::new();
        self.timers.retain_mut(|t| {
            t.remaining = t.remaining.saturating_sub(delta);
            if t.remaining.is_zero() {
                expired.push(t.effect);
                false
            } else {
                true
            }
        });
        expired
    }
}

// ── Input abstraction ──────────────────────────────────────────────────────────

/// Aggregated player input, written in `Update` and consumed by the fixed step.
///
/// Held directions mirror the keyboard every frame.  `fire` and `dash` are
/// edge-triggered latches: input systems only ever set them and the fixed
/// step clears them once consumed, so a press between two ticks is never
/// lost.  Tests populate this resource directly to drive the ship.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq)]
pub struct PlayerIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Pointer position in screen space; `None` while the cursor is outside.
    pub aim: Option<Vec2>,
    pub fire: bool,
    pub dash: bool,
}

impl PlayerIntent {
    /// Unit-free direction from the held keys (components in {-1, 0, 1}).
    pub fn direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        dir
    }
}
