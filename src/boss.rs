//! The boss: a three-phase state machine with a charging laser.
//!
//! ## Phases
//!
//! | Phase | Health ratio | Speed | Cooldown | Pattern                                 |
//! |-------|--------------|-------|----------|-----------------------------------------|
//! | 1     | ≥ 0.66       | 2.0   | 1000 ms  | 3-shot fan from the bottom edge, speed 4|
//! | 2     | ≥ 0.33       | 3.5   | 700 ms   | 7-shot fan from the bottom edge, speed 5|
//! | 3     | < 0.33       | 5.0   | 400 ms   | 16-shot ring from the centre, speed 5   |
//!
//! Phase is never stored; [`Boss::phase`] derives it from health on demand so
//! it can only move forward as health drops.
//!
//! ## Laser
//!
//! From phase 2 on, an idle laser starts with a small per-tick chance, aimed
//! once from the boss centre at the player.  It then counts down 60 ticks:
//! a harmless warning beam above 20, a live beam at 20 and below.  A live beam
//! strikes the player every tick they stay within 20 px of its line, including
//! the extension behind the boss.

use crate::audio::SoundCue;
use crate::config::GameConfig;
use crate::constants::*;
use crate::geometry::{angle_to, distance_to_line, heading, Arena, Position, ScreenRect};
use crate::player::{strike_player, Dash, Player, PlayerVitals};
use crate::projectile::{spawn_projectile, Owner, Projectile};
use crate::session::{ScreenShake, SessionEntity, SessionOutcome};
use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;
use std::time::Duration;

// ── Phase ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BossPhase {
    One,
    Two,
    Three,
}

impl BossPhase {
    pub fn from_health_ratio(ratio: f32) -> Self {
        if ratio < BOSS_PHASE3_RATIO {
            BossPhase::Three
        } else if ratio < BOSS_PHASE2_RATIO {
            BossPhase::Two
        } else {
            BossPhase::One
        }
    }

    pub fn speed(self) -> f32 {
        match self {
            BossPhase::One => BOSS_PHASE1_SPEED,
            BossPhase::Two => BOSS_PHASE2_SPEED,
            BossPhase::Three => BOSS_PHASE3_SPEED,
        }
    }

    pub fn fire_cooldown(self) -> Duration {
        match self {
            BossPhase::One => BOSS_PHASE1_COOLDOWN,
            BossPhase::Two => BOSS_PHASE2_COOLDOWN,
            BossPhase::Three => BOSS_PHASE3_COOLDOWN,
        }
    }

    #[inline]
    pub fn can_fire_laser(self) -> bool {
        self >= BossPhase::Two
    }
}

// ── Laser ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Laser {
    #[default]
    Idle,
    Charging {
        /// Beam direction, fixed when the charge starts.
        angle: f32,
        /// Ticks left; the beam is live at or below `LASER_LIVE_TICKS`.
        charge: u32,
    },
}

impl Laser {
    pub fn start(angle: f32) -> Self {
        Laser::Charging {
            angle,
            charge: LASER_CHARGE_TICKS,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        matches!(self, Laser::Charging { .. })
    }

    /// Count one tick down.  Returns the beam angle when the beam is live on
    /// this tick; the laser goes idle once the charge reaches 0.
    pub fn tick(&mut self) -> Option<f32> {
        let Laser::Charging { angle, charge } = *self else {
            return None;
        };
        let charge = charge.saturating_sub(1);
        *self = if charge == 0 {
            Laser::Idle
        } else {
            Laser::Charging { angle, charge }
        };
        (charge <= LASER_LIVE_TICKS).then_some(angle)
    }

    /// Beam colour phase for rendering: `true` once the beam is live.
    #[inline]
    pub fn is_live(&self) -> bool {
        matches!(self, Laser::Charging { charge, .. } if *charge <= LASER_LIVE_TICKS)
    }
}

// ── Component ─────────────────────────────────────────────────────────────────

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Boss {
    pub health: f32,
    pub max_health: f32,
    /// +1 moving right, -1 moving left.
    pub direction: f32,
    pub since_last_shot: Duration,
    pub laser: Laser,
}

impl Default for Boss {
    fn default() -> Self {
        Self {
            health: BOSS_MAX_HEALTH,
            max_health: BOSS_MAX_HEALTH,
            direction: 1.0,
            since_last_shot: Duration::MAX,
            laser: Laser::Idle,
        }
    }
}

impl Boss {
    #[inline]
    pub fn health_ratio(&self) -> f32 {
        (self.health / self.max_health).clamp(0.0, 1.0)
    }

    #[inline]
    pub fn phase(&self) -> BossPhase {
        BossPhase::from_health_ratio(self.health / self.max_health)
    }

    #[inline]
    pub fn is_defeated(&self) -> bool {
        self.health <= 0.0
    }

    /// Hit box around the boss centre.
    #[inline]
    pub fn rect(center: Vec2) -> ScreenRect {
        ScreenRect::from_center(center, Vec2::new(BOSS_WIDTH, BOSS_HEIGHT))
    }
}

pub fn spawn_boss(commands: &mut Commands, arena: &Arena) -> Entity {
    let center = Vec2::new(arena.width * 0.5, BOSS_CENTER_Y);
    info!("Boss spawned at {center}");
    commands
        .spawn((Boss::default(), Position(center), SessionEntity))
        .id()
}

// ── Patterns ──────────────────────────────────────────────────────────────────

fn hostile(velocity: Vec2) -> Projectile {
    Projectile {
        velocity,
        radius: HOSTILE_BULLET_RADIUS,
        damage: HOSTILE_BULLET_DAMAGE,
        owner: Owner::Hostile,
    }
}

/// Projectiles (with origin) for one volley of `phase` from a boss at `center`.
pub fn fire_pattern(phase: BossPhase, center: Vec2) -> Vec<(Vec2, Projectile)> {
    let muzzle = center + Vec2::new(0.0, BOSS_HEIGHT * 0.5);
    match phase {
        BossPhase::One => [-0.2_f32, 0.0, 0.2]
            .into_iter()
            .map(|a| {
                let v = Vec2::new(a.sin() * BOSS_PHASE1_BULLET_SPEED, BOSS_PHASE1_BULLET_SPEED);
                (muzzle, hostile(v))
            })
            .collect(),
        BossPhase::Two => (-3..=3)
            .map(|i| {
                let a = i as f32 * 0.2;
                let v = Vec2::new(a.sin() * BOSS_FAST_BULLET_SPEED, BOSS_FAST_BULLET_SPEED);
                (muzzle, hostile(v))
            })
            .collect(),
        BossPhase::Three => (0..BOSS_RADIAL_SHOTS)
            .map(|i| {
                let a = TAU / BOSS_RADIAL_SHOTS as f32 * i as f32;
                (center, hostile(heading(a) * BOSS_FAST_BULLET_SPEED))
            })
            .collect(),
    }
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// Move, maybe start the laser, and fire when the phase cooldown allows.
pub fn boss_advance_system(
    mut commands: Commands,
    time: Res<Time>,
    arena: Res<Arena>,
    config: Res<GameConfig>,
    players: Query<&Position, (With<Player>, Without<Boss>)>,
    mut bosses: Query<(&mut Boss, &mut Position)>,
    mut cues: MessageWriter<SoundCue>,
) {
    let mut rng = rand::thread_rng();
    for (mut boss, mut pos) in bosses.iter_mut() {
        let phase = boss.phase();

        // Bounce between the side walls.
        let half_width = BOSS_WIDTH * 0.5;
        pos.x += phase.speed() * boss.direction;
        if pos.x - half_width <= 0.0 {
            pos.x = half_width;
            boss.direction = 1.0;
        }
        if pos.x + half_width >= arena.width {
            pos.x = arena.width - half_width;
            boss.direction = -1.0;
        }

        if !boss.laser.is_active()
            && phase.can_fire_laser()
            && config.laser_start_chance > 0.0
            && rng.gen_bool(config.laser_start_chance)
        {
            if let Ok(target) = players.single() {
                boss.laser = Laser::start(angle_to(pos.0, target.0));
                cues.write(SoundCue::Laser);
                debug!("Boss laser charging");
            }
        }

        boss.since_last_shot = boss.since_last_shot.saturating_add(time.delta());
        if boss.since_last_shot < phase.fire_cooldown() {
            continue;
        }
        boss.since_last_shot = Duration::ZERO;
        for (origin, projectile) in fire_pattern(phase, pos.0) {
            spawn_projectile(&mut commands, origin, projectile);
        }
    }
}

/// Count the laser down and strike the player while the beam is live.
pub fn boss_laser_system(
    mut bosses: Query<(&mut Boss, &Position)>,
    mut players: Query<(&Position, &mut PlayerVitals, &Dash), (With<Player>, Without<Boss>)>,
    mut shake: ResMut<ScreenShake>,
    mut outcome: ResMut<SessionOutcome>,
) {
    for (mut boss, boss_pos) in bosses.iter_mut() {
        let Some(angle) = boss.laser.tick() else {
            continue;
        };
        let Ok((player_pos, mut vitals, dash)) = players.single_mut() else {
            continue;
        };
        if distance_to_line(player_pos.0, boss_pos.0, angle) < LASER_HIT_DISTANCE {
            strike_player(
                &mut vitals,
                dash,
                PLAYER_HIT_DAMAGE,
                &mut shake,
                &mut outcome,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::run_system_once;
    use bevy::ecs::message::Messages;

    fn boss_with_health(health: f32) -> Boss {
        Boss {
            health,
            ..Boss::default()
        }
    }

    #[test]
    fn phase_tracks_health_ratio() {
        assert_eq!(boss_with_health(600.0).phase(), BossPhase::One);
        assert_eq!(boss_with_health(400.0).phase(), BossPhase::One);
        assert_eq!(boss_with_health(395.0).phase(), BossPhase::Two);
        assert_eq!(boss_with_health(199.0).phase(), BossPhase::Three);
    }

    #[test]
    fn phase_is_monotonic_as_health_drops() {
        let mut last = BossPhase::One;
        for hp in (0..=600).rev() {
            let phase = boss_with_health(hp as f32).phase();
            assert!(phase >= last, "phase regressed at {hp}");
            last = phase;
        }
        assert_eq!(last, BossPhase::Three);
    }

    #[test]
    fn patterns_have_expected_sizes() {
        let c = Vec2::new(400.0, 120.0);
        assert_eq!(fire_pattern(BossPhase::One, c).len(), 3);
        assert_eq!(fire_pattern(BossPhase::Two, c).len(), 7);
        let ring = fire_pattern(BossPhase::Three, c);
        assert_eq!(ring.len(), 16);
        assert!(ring.iter().all(|(origin, _)| *origin == c));
    }

    #[test]
    fn phase_one_fires_from_bottom_edge() {
        let c = Vec2::new(400.0, 120.0);
        for (origin, p) in fire_pattern(BossPhase::One, c) {
            assert_eq!(origin, Vec2::new(400.0, 170.0));
            assert_eq!(p.velocity.y, BOSS_PHASE1_BULLET_SPEED);
            assert!(p.is_hostile());
        }
    }

    #[test]
    fn laser_counts_down_through_warning_and_live() {
        let mut laser = Laser::start(0.0);
        let mut live_ticks = 0;
        let mut ticks = 0;
        while laser.is_active() {
            if laser.tick().is_some() {
                live_ticks += 1;
            }
            ticks += 1;
        }
        assert_eq!(ticks, LASER_CHARGE_TICKS);
        // Charge values 20 down to 0 inclusive are live.
        assert_eq!(live_ticks, LASER_LIVE_TICKS + 1);
        assert_eq!(laser.tick(), None);
    }

    fn boss_world() -> World {
        let mut world = World::new();
        world.insert_resource(Arena {
            width: 800.0,
            height: 600.0,
        });
        world.insert_resource(GameConfig {
            laser_start_chance: 0.0,
            ..GameConfig::default()
        });
        world.insert_resource(Time::<()>::default());
        world.init_resource::<Messages<SoundCue>>();
        world.init_resource::<ScreenShake>();
        world.init_resource::<SessionOutcome>();
        world
    }

    #[test]
    fn boss_bounces_off_right_wall() {
        let mut world = boss_world();
        let e = world
            .spawn((Boss::default(), Position(Vec2::new(709.0, 120.0))))
            .id();
        run_system_once(&mut world, boss_advance_system);

        assert_eq!(world.get::<Position>(e).unwrap().x, 710.0);
        assert_eq!(world.get::<Boss>(e).unwrap().direction, -1.0);
    }

    #[test]
    fn fresh_boss_fires_immediately() {
        let mut world = boss_world();
        world.spawn((Boss::default(), Position(Vec2::new(400.0, 120.0))));
        run_system_once(&mut world, boss_advance_system);
        assert_eq!(world.query::<&Projectile>().iter(&world).count(), 3);
    }

    #[test]
    fn live_laser_strikes_player_in_beam() {
        let mut world = boss_world();
        world.spawn((
            Boss {
                laser: Laser::Charging {
                    angle: std::f32::consts::FRAC_PI_2,
                    charge: LASER_LIVE_TICKS + 1,
                },
                ..Boss::default()
            },
            Position(Vec2::new(400.0, 120.0)),
        ));
        let player = world
            .spawn((
                Player,
                Position(Vec2::new(410.0, 500.0)),
                PlayerVitals::new(3),
                Dash::default(),
            ))
            .id();

        run_system_once(&mut world, boss_laser_system);

        assert_eq!(world.get::<PlayerVitals>(player).unwrap().lives, 2);
        assert!(world.resource::<ScreenShake>().is_active());
    }

    #[test]
    fn warning_beam_is_harmless() {
        let mut world = boss_world();
        world.spawn((
            Boss {
                laser: Laser::start(std::f32::consts::FRAC_PI_2),
                ..Boss::default()
            },
            Position(Vec2::new(400.0, 120.0)),
        ));
        let player = world
            .spawn((
                Player,
                Position(Vec2::new(400.0, 500.0)),
                PlayerVitals::new(3),
                Dash::default(),
            ))
            .id();

        run_system_once(&mut world, boss_laser_system);

        assert_eq!(world.get::<PlayerVitals>(player).unwrap().lives, 3);
    }

    fn laser_world(health: f32) -> (World, Entity) {
        let mut world = boss_world();
        world.resource_mut::<GameConfig>().laser_start_chance = 1.0;
        world.spawn((Player, Position(Vec2::new(400.0, 500.0))));
        let boss = world
            .spawn((boss_with_health(health), Position(Vec2::new(400.0, 120.0))))
            .id();
        run_system_once(&mut world, boss_advance_system);
        (world, boss)
    }

    #[test]
    fn laser_never_starts_in_phase_one() {
        let (world, boss) = laser_world(BOSS_MAX_HEALTH);
        assert_eq!(world.get::<Boss>(boss).unwrap().laser, Laser::Idle);
    }

    #[test]
    fn laser_starts_in_phases_two_and_three() {
        for health in [395.0, 100.0] {
            let (world, boss) = laser_world(health);
            let laser = world.get::<Boss>(boss).unwrap().laser;
            assert!(laser.is_active(), "health {health}: {laser:?}");
            assert!(!laser.is_live());
        }
    }

    fn projectile_count(world: &mut World) -> usize {
        world.query::<&Projectile>().iter(world).count()
    }

    /// Fire the opening volley, then check nothing more comes until exactly
    /// `cooldown` has passed.
    fn assert_cooldown(health: f32, cooldown: Duration, volley: usize) {
        let mut world = boss_world();
        world.spawn((boss_with_health(health), Position(Vec2::new(400.0, 120.0))));
        run_system_once(&mut world, boss_advance_system);
        assert_eq!(projectile_count(&mut world), volley);

        world
            .resource_mut::<Time>()
            .advance_by(cooldown - Duration::from_millis(1));
        run_system_once(&mut world, boss_advance_system);
        assert_eq!(projectile_count(&mut world), volley);

        world.resource_mut::<Time>().advance_by(Duration::from_millis(1));
        run_system_once(&mut world, boss_advance_system);
        assert_eq!(projectile_count(&mut world), volley * 2);
    }

    #[test]
    fn phase_two_fires_every_700ms() {
        assert_cooldown(395.0, Duration::from_millis(700), 7);
    }

    #[test]
    fn phase_three_fires_every_400ms() {
        assert_cooldown(100.0, Duration::from_millis(400), 16);
    }

    #[test]
    fn phase_two_fan_spans_point_six_radians() {
        let mut world = boss_world();
        world.spawn((boss_with_health(395.0), Position(Vec2::new(400.0, 120.0))));
        run_system_once(&mut world, boss_advance_system);

        let mut angles: Vec<f32> = world
            .query::<&Projectile>()
            .iter(&world)
            .map(|p| {
                assert_eq!(p.velocity.y, BOSS_FAST_BULLET_SPEED);
                (p.velocity.x / BOSS_FAST_BULLET_SPEED).asin()
            })
            .collect();
        angles.sort_by(f32::total_cmp);

        let expected = [-0.6, -0.4, -0.2, 0.0, 0.2, 0.4, 0.6];
        assert_eq!(angles.len(), expected.len());
        for (got, want) in angles.iter().zip(expected) {
            assert!((got - want).abs() < 1e-4, "got {got}, want {want}");
        }
    }

    #[test]
    fn live_laser_reaches_behind_the_boss() {
        let mut world = boss_world();
        world.spawn((
            Boss {
                laser: Laser::Charging {
                    angle: std::f32::consts::FRAC_PI_4,
                    charge: LASER_LIVE_TICKS,
                },
                ..Boss::default()
            },
            Position(Vec2::new(400.0, 120.0)),
        ));
        let player = world
            .spawn((
                Player,
                Position(Vec2::new(330.0, 50.0)),
                PlayerVitals::new(3),
                Dash::default(),
            ))
            .id();

        run_system_once(&mut world, boss_laser_system);

        assert_eq!(world.get::<PlayerVitals>(player).unwrap().lives, 2);
    }
}
