//! Per-session global state: score, counters, outcome, screen shake.
//!
//! These resources are reset on `OnEnter(GameState::Playing)` and read by the
//! HUD and the game-over summary.

use bevy::prelude::*;
use std::time::Duration;

// ── Schedule sets ─────────────────────────────────────────────────────────────

/// Ordered phases of one `FixedUpdate` tick.
///
/// Configured as a chain by [`crate::simulation::SimulationPlugin`]; every
/// gameplay system lives in exactly one of these sets.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    /// Spawner timers and player input.
    Intake,
    /// Every entity kind advances once.
    Advance,
    /// Collision rules, in order.
    Resolve,
    /// Effect expiry, shake decay, clock and the terminal transition.
    Bookkeeping,
}

// ── Markers ───────────────────────────────────────────────────────────────────

/// Tags every entity that belongs to a running session so it can be despawned
/// in one sweep when the session is torn down.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct SessionEntity;

// ── Stats ─────────────────────────────────────────────────────────────────────

/// Score and counters shown on the HUD and in the summary.
///
/// `score` only ever grows; use [`SessionStats::award`] to change it.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct SessionStats {
    score: u64,
    /// Survival time, advanced by the fixed step while the session runs.
    pub elapsed: Duration,
    pub enemies_destroyed: u32,
    pub bosses_defeated: u32,
}

impl SessionStats {
    #[inline]
    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn award(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Whole seconds survived, as shown on the summary.
    #[inline]
    pub fn survived_secs(&self) -> u64 {
        self.elapsed.as_secs()
    }
}

// ── Outcome ───────────────────────────────────────────────────────────────────

/// Why a session ended in defeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefeatCause {
    LivesExhausted,
    CrushedByRock,
}

/// Terminal result of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Victory,
    Defeat(DefeatCause),
}

impl Outcome {
    #[inline]
    pub fn is_victory(self) -> bool {
        matches!(self, Outcome::Victory)
    }
}

/// One-way terminal latch.  The first recorded outcome wins; later calls are
/// ignored so a defeat and a victory in the same tick cannot flip-flop.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionOutcome(Option<Outcome>);

impl SessionOutcome {
    /// Record `outcome` unless one is already set.  Returns `true` if this call
    /// decided the session.
    pub fn conclude(&mut self, outcome: Outcome) -> bool {
        if self.0.is_some() {
            return false;
        }
        self.0 = Some(outcome);
        true
    }

    #[inline]
    pub fn get(&self) -> Option<Outcome> {
        self.0
    }

    #[inline]
    pub fn is_decided(&self) -> bool {
        self.0.is_some()
    }
}

/// Run condition: the session has not reached a terminal outcome yet.
pub fn session_undecided(outcome: Res<SessionOutcome>) -> bool {
    !outcome.is_decided()
}

// ── Screen shake ──────────────────────────────────────────────────────────────

/// Remaining camera shake.  Decays by one tick per fixed step.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct ScreenShake {
    pub ticks_left: u32,
    pub strength: f32,
}

impl ScreenShake {
    /// Start (or restart) a shake.  A stronger or longer running shake is kept.
    pub fn start(&mut self, ticks: u32, strength: f32) {
        self.ticks_left = self.ticks_left.max(ticks);
        self.strength = self.strength.max(strength);
    }

    pub fn decay(&mut self) {
        self.ticks_left = self.ticks_left.saturating_sub(1);
        if self.ticks_left == 0 {
            self.strength = 0.0;
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.ticks_left > 0
    }
}
