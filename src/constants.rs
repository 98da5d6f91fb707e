//! Centralised gameplay constants.
//!
//! Every tuneable number lives here so it can be found and changed in one
//! place.  [`crate::config::GameConfig`] mirrors the subset that may be
//! overridden at runtime from `assets/game.toml`; the rest are fixed rules of
//! the game.
//!
//! Distances are logical pixels in screen space (origin top-left, +y down).
//! Per-tick quantities assume the fixed 60 Hz simulation step.

use std::time::Duration;

// ── Arena ─────────────────────────────────────────────────────────────────────

/// Default arena width; replaced by the window width once a window exists.
pub const ARENA_WIDTH: f32 = 1280.0;

/// Default arena height.
pub const ARENA_HEIGHT: f32 = 720.0;

/// Simulation rate of the `FixedUpdate` schedule.
pub const TICK_HZ: f64 = 60.0;

// ── Player ────────────────────────────────────────────────────────────────────

/// Distance from the bottom edge at which the player ship starts.
pub const PLAYER_SPAWN_BOTTOM_OFFSET: f32 = 80.0;

/// Shield capacity; the shield power-up refills to this value.
pub const PLAYER_MAX_SHIELD: f32 = 100.0;

/// Damage carried by an enemy projectile or the boss laser.
pub const PLAYER_HIT_DAMAGE: f32 = 25.0;

/// Base interval between two player shots.
pub const PLAYER_FIRE_INTERVAL: Duration = Duration::from_millis(300);

/// Fire interval while the rapid power-up is active.
pub const PLAYER_RAPID_FIRE_INTERVAL: Duration = Duration::from_millis(80);

/// Base player projectile radius.
pub const PLAYER_BULLET_RADIUS: f32 = 5.0;

/// Player projectile radius while the big power-up is active.
pub const PLAYER_BIG_BULLET_RADIUS: f32 = 12.0;

/// Damage of a normal player projectile.
pub const PLAYER_BULLET_DAMAGE: f32 = 5.0;

/// Damage of a player projectile whose radius exceeds the base radius.
pub const PLAYER_BIG_BULLET_DAMAGE: f32 = 15.0;

/// Speed of player projectiles (px/tick).
pub const PLAYER_BULLET_SPEED: f32 = 12.0;

/// Angular offset of the two extra spread shots (rad).
pub const PLAYER_SPREAD_ANGLE: f32 = 0.3;

/// Movement speed while a dash is active (px/tick).
pub const DASH_SPEED: f32 = 20.0;

/// Length of one dash in ticks.
pub const DASH_ACTIVE_TICKS: u32 = 10;

/// Ticks before another dash may start.
pub const DASH_COOLDOWN_TICKS: u32 = 120;

/// Radius of the shield ring drawn around the ship.
pub const SHIELD_RING_RADIUS: f32 = 30.0;

/// Radius of the dash ring drawn around the ship.
pub const DASH_RING_RADIUS: f32 = 35.0;

// ── Screen shake ──────────────────────────────────────────────────────────────

/// Shake applied when the player loses a life.
pub const HIT_SHAKE_TICKS: u32 = 12;
pub const HIT_SHAKE_STRENGTH: f32 = 12.0;

// ── Projectiles ───────────────────────────────────────────────────────────────

/// Radius of enemy and boss projectiles.
pub const HOSTILE_BULLET_RADIUS: f32 = 5.0;

/// Damage value stored on hostile projectiles.  Player hits always use
/// [`PLAYER_HIT_DAMAGE`]; this only matters for power-up collisions.
pub const HOSTILE_BULLET_DAMAGE: f32 = 5.0;

// ── Enemy ─────────────────────────────────────────────────────────────────────

/// Logical enemy size used for spawn placement.
pub const ENEMY_SIZE: f32 = 20.0;

/// Rendered enemy sprite edge length.
pub const ENEMY_SPRITE_SIZE: f32 = 60.0;

/// Descent speed (px/tick).
pub const ENEMY_SPEED: f32 = 0.6;

/// Descent speed while the enemy-slow flag is set on the player.
pub const ENEMY_SLOW_SPEED: f32 = 0.2;

/// Per-tick probability that an enemy fires.
pub const ENEMY_FIRE_CHANCE: f64 = 0.005;

/// Enemy projectile speed (px/tick).
pub const ENEMY_BULLET_SPEED: f32 = 4.0;

/// Spawn height of new enemies (just above the top edge).
pub const ENEMY_SPAWN_Y: f32 = -20.0;

// ── Boss ──────────────────────────────────────────────────────────────────────

pub const BOSS_WIDTH: f32 = 180.0;
pub const BOSS_HEIGHT: f32 = 100.0;
pub const BOSS_MAX_HEALTH: f32 = 600.0;

/// Vertical position of the boss centre.
pub const BOSS_CENTER_Y: f32 = 120.0;

/// Health ratio below which phase 2 begins.
pub const BOSS_PHASE2_RATIO: f32 = 0.66;

/// Health ratio below which phase 3 begins.
pub const BOSS_PHASE3_RATIO: f32 = 0.33;

pub const BOSS_PHASE1_SPEED: f32 = 2.0;
pub const BOSS_PHASE2_SPEED: f32 = 3.5;
pub const BOSS_PHASE3_SPEED: f32 = 5.0;

pub const BOSS_PHASE1_COOLDOWN: Duration = Duration::from_millis(1000);
pub const BOSS_PHASE2_COOLDOWN: Duration = Duration::from_millis(700);
pub const BOSS_PHASE3_COOLDOWN: Duration = Duration::from_millis(400);

/// Speed of phase-1 projectiles (px/tick).
pub const BOSS_PHASE1_BULLET_SPEED: f32 = 4.0;

/// Speed of phase-2 and phase-3 projectiles (px/tick).
pub const BOSS_FAST_BULLET_SPEED: f32 = 5.0;

/// Number of projectiles in the phase-3 radial burst.
pub const BOSS_RADIAL_SHOTS: u32 = 16;

/// Per-tick probability of starting the laser (phase 2 and 3 only).
pub const BOSS_LASER_CHANCE: f64 = 0.01;

/// Initial laser charge in ticks.
pub const LASER_CHARGE_TICKS: u32 = 60;

/// The beam damages while the remaining charge is at or below this value.
pub const LASER_LIVE_TICKS: u32 = 20;

/// Perpendicular distance from the beam that counts as a hit.
pub const LASER_HIT_DISTANCE: f32 = 20.0;

/// Drawn beam length.
pub const LASER_BEAM_LENGTH: f32 = 2000.0;

/// Score for defeating the boss.
pub const BOSS_KILL_SCORE: u64 = 5000;

/// Extra tolerance added to the projectile radius for boss hits.
pub const BOSS_HIT_TOLERANCE: f32 = 4.0;

// ── Rock ──────────────────────────────────────────────────────────────────────

pub const ROCK_SIZE: f32 = 64.0;
pub const ROCK_MIN_SPEED: f32 = 2.0;
pub const ROCK_MAX_SPEED: f32 = 5.0;

/// Clearance around a rock inside which the player is crushed.
pub const ROCK_PLAYER_MARGIN: f32 = 20.0;

// ── Power-ups ─────────────────────────────────────────────────────────────────

pub const POWERUP_SIZE: f32 = 24.0;
pub const POWERUP_SPRITE_SIZE: f32 = 48.0;
pub const POWERUP_FALL_SPEED: f32 = 1.0;
pub const POWERUP_SPAWN_Y: f32 = -20.0;

/// Lifetime of the rapid, big and spread effects.
pub const POWERUP_DURATION: Duration = Duration::from_secs(10);

// ── Collision thresholds ──────────────────────────────────────────────────────

/// Enemy projectile to player hit distance.
pub const PLAYER_HIT_RADIUS: f32 = 20.0;

/// Player projectile to enemy hit distance.
pub const ENEMY_HIT_RADIUS: f32 = 40.0;

/// Any projectile to power-up pickup distance.
pub const POWERUP_PICKUP_RADIUS: f32 = 20.0;

/// Score for destroying one enemy.
pub const ENEMY_KILL_SCORE: u64 = 100;

// ── Spawner ───────────────────────────────────────────────────────────────────

pub const ENEMY_SPAWN_INTERVAL: Duration = Duration::from_millis(500);
pub const ROCK_SPAWN_INTERVAL: Duration = Duration::from_millis(3000);
pub const POWERUP_SPAWN_INTERVAL: Duration = Duration::from_millis(8000);
pub const BOSS_SPAWN_DELAY: Duration = Duration::from_millis(30_000);

// ── Particles ─────────────────────────────────────────────────────────────────

/// Particle lifetime in ticks; alpha is `life / PARTICLE_LIFE`.
pub const PARTICLE_LIFE: u32 = 30;

/// Particle velocity components are drawn from ±this value (px/tick).
pub const PARTICLE_SPREAD: f32 = 3.0;

pub const PARTICLE_SIZE: f32 = 4.0;

/// Particle count of an enemy explosion.
pub const ENEMY_EXPLOSION_PARTICLES: u32 = 20;

/// Particle count of the boss explosion.
pub const BOSS_EXPLOSION_PARTICLES: u32 = 80;

// ── Starfield ─────────────────────────────────────────────────────────────────

pub const STAR_COUNT: u32 = 80;
pub const STAR_MIN_SIZE: f32 = 0.5;
pub const STAR_MAX_SIZE: f32 = 1.7;
pub const STAR_MIN_SPEED: f32 = 0.5;
pub const STAR_MAX_SPEED: f32 = 2.5;

// ── HUD ───────────────────────────────────────────────────────────────────────

pub const BOSS_BAR_WIDTH: f32 = 300.0;
pub const BOSS_BAR_HEIGHT: f32 = 15.0;
pub const BOSS_BAR_TOP: f32 = 20.0;
