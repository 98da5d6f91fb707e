//! Headless end-to-end tests for a game session.
//!
//! These tests use [`MinimalPlugins`] + [`StatesPlugin`] and the gameplay
//! plugin only: no window, no rendering, no audio.  Time advances by exactly
//! one fixed step per `app.update()` (the very first update has a zero delta).
//!
//! Covered scenarios:
//! 1. Entering `Playing` spawns the player and resets the session.
//! 2. An enemy left alone descends and is removed below the arena; score stays 0.
//! 3. A damage-15 shot into a 10 HP boss wins the session for +5000.
//! 4. The last life lost ends the session in defeat.
//! 5. A rock on the player is an instant defeat.
//! 6. A decided session is frozen.
//! 7. Start → play → game over → restart via the menu keys.
//! 8. A rapid-fire pickup lasts exactly 600 fixed steps.

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use space_vibes::boss::Boss;
use space_vibes::config::{GameConfig, PlayerConfig};
use space_vibes::enemy::Enemy;
use space_vibes::geometry::Position;
use space_vibes::menu::{GameState, MenuPlugin};
use space_vibes::constants::{PLAYER_FIRE_INTERVAL, PLAYER_RAPID_FIRE_INTERVAL};
use space_vibes::player::{Loadout, Player, PlayerVitals};
use space_vibes::powerup::{PowerUp, PowerUpKind};
use space_vibes::projectile::{Owner, Projectile};
use space_vibes::rock::Rock;
use space_vibes::session::{DefeatCause, Outcome, SessionEntity, SessionOutcome, SessionStats};
use space_vibes::simulation::SimulationPlugin;
use std::time::Duration;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Headless app with a quiet cast: no spawner, no enemy fire, no laser.
fn headless_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / 60.0,
        )))
        .insert_resource(GameConfig {
            enemy_fire_chance: 0.0,
            laser_start_chance: 0.0,
            ..GameConfig::default()
        })
        .insert_resource(PlayerConfig {
            width: 60.0,
            height: 60.0,
            speed: 6.0,
            lives: 3,
        })
        .add_plugins(SimulationPlugin);
    app
}

/// Headless app already in `Playing` with the player spawned.
fn playing_app() -> App {
    let mut app = headless_app();
    app.update();
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::Playing);
    app.update();
    app
}

fn state(app: &App) -> GameState {
    app.world().resource::<State<GameState>>().get().clone()
}

fn outcome(app: &App) -> Option<Outcome> {
    app.world().resource::<SessionOutcome>().get()
}

fn player_entity(app: &mut App) -> Entity {
    app.world_mut()
        .query_filtered::<Entity, With<Player>>()
        .single(app.world())
        .expect("player spawned")
}

fn player_position(app: &mut App) -> Vec2 {
    let player = player_entity(app);
    app.world().get::<Position>(player).unwrap().0
}

fn run(app: &mut App, updates: usize) {
    for _ in 0..updates {
        app.update();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn entering_playing_spawns_player_at_bottom_centre() {
    let mut app = playing_app();
    assert_eq!(state(&app), GameState::Playing);
    assert_eq!(player_position(&mut app), Vec2::new(640.0, 640.0));
    let player = player_entity(&mut app);
    assert_eq!(app.world().get::<PlayerVitals>(player).unwrap().lives, 3);
    assert_eq!(outcome(&app), None);
}

#[test]
fn lone_enemy_descends_and_leaves() {
    let mut app = playing_app();
    let enemy = app
        .world_mut()
        .spawn((Enemy, Position(Vec2::new(100.0, -20.0)), SessionEntity))
        .id();

    // 1000 ticks at 0.6 px/tick: still on screen.
    run(&mut app, 1000);
    let y = app.world().get::<Position>(enemy).unwrap().y;
    assert!(y > 500.0 && y <= 720.0, "enemy at y = {y}");

    // (720 + 20) / 0.6 ≈ 1234 ticks in total before it drops out.
    run(&mut app, 300);
    assert!(app.world().get_entity(enemy).is_err());
    assert_eq!(app.world().resource::<SessionStats>().score(), 0);
    assert_eq!(state(&app), GameState::Playing);
}

#[test]
fn killing_blow_on_boss_wins() {
    let mut app = playing_app();
    let boss = app
        .world_mut()
        .spawn((
            Boss {
                health: 10.0,
                ..Boss::default()
            },
            Position(Vec2::new(640.0, 120.0)),
            SessionEntity,
        ))
        .id();
    app.world_mut().spawn((
        Projectile {
            velocity: Vec2::ZERO,
            radius: 12.0,
            damage: 15.0,
            owner: Owner::Player,
        },
        Position(Vec2::new(640.0, 160.0)),
        SessionEntity,
    ));

    run(&mut app, 2);

    assert!(app.world().get_entity(boss).is_err());
    assert_eq!(outcome(&app), Some(Outcome::Victory));
    let stats = app.world().resource::<SessionStats>();
    assert_eq!(stats.score(), 5000);
    assert_eq!(stats.bosses_defeated, 1);

    app.update();
    assert_eq!(state(&app), GameState::GameOver);
}

#[test]
fn last_life_lost_is_defeat() {
    let mut app = playing_app();
    let player = player_entity(&mut app);
    app.world_mut().get_mut::<PlayerVitals>(player).unwrap().lives = 1;
    let at = player_position(&mut app);
    app.world_mut().spawn((
        Projectile {
            velocity: Vec2::ZERO,
            radius: 5.0,
            damage: 5.0,
            owner: Owner::Hostile,
        },
        Position(at),
        SessionEntity,
    ));

    run(&mut app, 3);

    assert_eq!(
        outcome(&app),
        Some(Outcome::Defeat(DefeatCause::LivesExhausted))
    );
    assert_eq!(app.world().get::<PlayerVitals>(player).unwrap().lives, 0);
    assert_eq!(state(&app), GameState::GameOver);
}

#[test]
fn rock_on_player_is_instant_defeat() {
    let mut app = playing_app();
    let at = player_position(&mut app);
    app.world_mut().spawn((
        Rock { speed: 2.0 },
        Position(at - Vec2::new(0.0, 40.0)),
        SessionEntity,
    ));

    run(&mut app, 3);

    assert_eq!(
        outcome(&app),
        Some(Outcome::Defeat(DefeatCause::CrushedByRock))
    );
    assert_eq!(state(&app), GameState::GameOver);
}

#[test]
fn decided_session_is_frozen() {
    let mut app = playing_app();
    let at = player_position(&mut app);
    app.world_mut().spawn((
        Rock { speed: 2.0 },
        Position(at),
        SessionEntity,
    ));
    let enemy = app
        .world_mut()
        .spawn((Enemy, Position(Vec2::new(100.0, 100.0)), SessionEntity))
        .id();
    run(&mut app, 3);
    assert_eq!(state(&app), GameState::GameOver);

    let frozen_at = app.world().get::<Position>(enemy).unwrap().0;
    let elapsed = app.world().resource::<SessionStats>().elapsed;
    run(&mut app, 30);

    assert_eq!(app.world().get::<Position>(enemy).unwrap().0, frozen_at);
    assert_eq!(app.world().resource::<SessionStats>().elapsed, elapsed);
}

#[test]
fn menu_keys_drive_a_full_round() {
    let mut app = headless_app();
    app.init_resource::<ButtonInput<KeyCode>>()
        .add_plugins(MenuPlugin);
    app.update();
    assert_eq!(state(&app), GameState::StartScreen);

    tap(&mut app, KeyCode::Enter);
    assert_eq!(state(&app), GameState::Playing);
    let player = player_entity(&mut app);

    // End the session by crushing the player.
    let at = player_position(&mut app);
    app.world_mut().spawn((Rock { speed: 2.0 }, Position(at), SessionEntity));
    run(&mut app, 3);
    assert_eq!(state(&app), GameState::GameOver);

    tap(&mut app, KeyCode::KeyR);
    assert_eq!(state(&app), GameState::StartScreen);
    assert!(app.world().get_entity(player).is_err());
    let leftovers = app
        .world_mut()
        .query_filtered::<Entity, With<SessionEntity>>()
        .iter(app.world())
        .count();
    assert_eq!(leftovers, 0);
    assert_eq!(outcome(&app), None);
}

#[test]
fn rapid_fire_lasts_exactly_ten_seconds() {
    let mut app = playing_app();
    let player = player_entity(&mut app);
    let at = Vec2::new(300.0, 300.0);
    app.world_mut().spawn((
        PowerUp {
            kind: PowerUpKind::Rapid,
        },
        Position(at),
        SessionEntity,
    ));
    app.world_mut().spawn((
        Projectile {
            velocity: Vec2::ZERO,
            radius: 5.0,
            damage: 5.0,
            owner: Owner::Player,
        },
        Position(at),
        SessionEntity,
    ));

    let interval = |app: &App| app.world().get::<Loadout>(player).unwrap().fire_interval;

    // Pickup step.
    app.update();
    assert_eq!(interval(&app), PLAYER_RAPID_FIRE_INTERVAL);

    run(&mut app, 599);
    assert_eq!(interval(&app), PLAYER_RAPID_FIRE_INTERVAL);

    app.update();
    assert_eq!(interval(&app), PLAYER_FIRE_INTERVAL);
}

/// Press `key` for one frame, then let the resulting transition apply.
fn tap(app: &mut App, key: KeyCode) {
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(key);
    app.update();
    {
        let mut input = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        input.release(key);
        input.clear();
    }
    app.update();
}
