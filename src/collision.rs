//! Collision detection and resolution.
//!
//! One system per rule, run as a chain in `SimSet::Resolve` after every entity
//! has advanced:
//!
//! | # | System                               | Rule                                                  |
//! |---|--------------------------------------|-------------------------------------------------------|
//! | 1 | `rock_player_collision_system`       | player inside a rock's crush zone → defeat            |
//! | 2 | `projectile_bounds_system`           | projectile outside the arena → removed                |
//! | 3 | `hostile_projectile_player_system`   | hostile shot within 20 px → strike (ignored if dashing)|
//! | 4 | `player_projectile_enemy_system`     | player shot within 40 px → both removed, +100         |
//! | 5 | `player_projectile_boss_system`      | player shot touches boss box → damage; 0 HP → victory |
//! | 6 | `powerup_pickup_system`              | any shot within 20 px of a power-up → apply it        |
//!
//! Removal goes through `Commands`, so it is applied at the sync point after
//! each rule: a later rule never sees an entity an earlier rule removed.
//! Within one rule, a local spent set keeps a projectile from hitting twice.

use crate::audio::SoundCue;
use crate::boss::Boss;
use crate::config::GameConfig;
use crate::constants::*;
use crate::enemy::Enemy;
use crate::geometry::{Arena, Position};
use crate::particles::{boss_explosion_color, enemy_explosion_color, spawn_explosion};
use crate::player::{strike_player, ActiveEffects, Dash, Loadout, Player, PlayerVitals};
use crate::powerup::{apply_power_up, PowerUp};
use crate::projectile::Projectile;
use crate::rock::Rock;
use crate::session::{DefeatCause, Outcome, ScreenShake, SessionOutcome, SessionStats};
use bevy::prelude::*;
use std::collections::HashSet;

/// Rule 1: any rock touching the player ends the session.
pub fn rock_player_collision_system(
    rocks: Query<&Position, With<Rock>>,
    players: Query<&Position, With<Player>>,
    mut outcome: ResMut<SessionOutcome>,
) {
    let Ok(player) = players.single() else {
        return;
    };
    if rocks.iter().any(|rock| Rock::crushes(rock.0, player.0))
        && outcome.conclude(Outcome::Defeat(DefeatCause::CrushedByRock))
    {
        info!("Player crushed by a rock");
    }
}

/// Rule 2: drop projectiles that left the arena.
pub fn projectile_bounds_system(
    mut commands: Commands,
    arena: Res<Arena>,
    projectiles: Query<(Entity, &Position), With<Projectile>>,
) {
    for (entity, pos) in projectiles.iter() {
        if arena.is_outside(pos.0) {
            commands.entity(entity).despawn();
        }
    }
}

/// Rule 3: hostile projectiles striking the player.
///
/// A dashing ship neither takes damage nor consumes the projectile.
pub fn hostile_projectile_player_system(
    mut commands: Commands,
    projectiles: Query<(Entity, &Projectile, &Position)>,
    mut players: Query<(&Position, &mut PlayerVitals, &Dash), With<Player>>,
    mut shake: ResMut<ScreenShake>,
    mut outcome: ResMut<SessionOutcome>,
) {
    let Ok((player_pos, mut vitals, dash)) = players.single_mut() else {
        return;
    };
    if dash.is_active() {
        return;
    }
    for (entity, projectile, pos) in projectiles.iter() {
        if !projectile.is_hostile() || pos.distance(player_pos.0) >= PLAYER_HIT_RADIUS {
            continue;
        }
        commands.entity(entity).despawn();
        strike_player(
            &mut vitals,
            dash,
            PLAYER_HIT_DAMAGE,
            &mut shake,
            &mut outcome,
        );
    }
}

/// Rule 4: player projectiles destroying enemies.
pub fn player_projectile_enemy_system(
    mut commands: Commands,
    projectiles: Query<(Entity, &Projectile, &Position)>,
    enemies: Query<(Entity, &Position), With<Enemy>>,
    mut stats: ResMut<SessionStats>,
    mut cues: MessageWriter<SoundCue>,
) {
    let mut rng = rand::thread_rng();
    let mut spent: HashSet<Entity> = HashSet::new();
    for (enemy, enemy_pos) in enemies.iter() {
        let hit = projectiles.iter().find(|(entity, projectile, pos)| {
            !projectile.is_hostile()
                && !spent.contains(entity)
                && pos.distance(enemy_pos.0) < ENEMY_HIT_RADIUS
        });
        let Some((bullet, _, _)) = hit else {
            continue;
        };
        spent.insert(bullet);
        commands.entity(bullet).despawn();
        commands.entity(enemy).despawn();
        spawn_explosion(
            &mut commands,
            enemy_pos.0,
            ENEMY_EXPLOSION_PARTICLES,
            enemy_explosion_color(),
        );
        cues.write(SoundCue::explosion(&mut rng));
        stats.award(ENEMY_KILL_SCORE);
        stats.enemies_destroyed += 1;
    }
}

/// Rule 5: player projectiles damaging the boss.
///
/// A projectile hits when the closest point of the boss box lies within
/// `radius + 4` of its centre.  The killing blow removes the boss, explodes
/// it at its last centre and concludes the session as a victory.
pub fn player_projectile_boss_system(
    mut commands: Commands,
    projectiles: Query<(Entity, &Projectile, &Position), Without<Boss>>,
    mut bosses: Query<(Entity, &mut Boss, &Position)>,
    mut stats: ResMut<SessionStats>,
    mut outcome: ResMut<SessionOutcome>,
    mut cues: MessageWriter<SoundCue>,
) {
    for (boss_entity, mut boss, boss_pos) in bosses.iter_mut() {
        let rect = Boss::rect(boss_pos.0);
        for (entity, projectile, pos) in projectiles.iter() {
            if projectile.is_hostile() {
                continue;
            }
            let reach = projectile.radius + BOSS_HIT_TOLERANCE;
            if rect.closest_point(pos.0).distance_squared(pos.0) >= reach * reach {
                continue;
            }
            commands.entity(entity).despawn();
            boss.health -= projectile.damage;
            if boss.is_defeated() {
                commands.entity(boss_entity).despawn();
                spawn_explosion(
                    &mut commands,
                    boss_pos.0,
                    BOSS_EXPLOSION_PARTICLES,
                    boss_explosion_color(),
                );
                cues.write(SoundCue::explosion(&mut rand::thread_rng()));
                stats.award(BOSS_KILL_SCORE);
                stats.bosses_defeated += 1;
                if outcome.conclude(Outcome::Victory) {
                    info!("Boss defeated");
                }
                break;
            }
        }
    }
}

/// Rule 6: any projectile collecting a power-up.
pub fn powerup_pickup_system(
    mut commands: Commands,
    config: Res<GameConfig>,
    powerups: Query<(Entity, &PowerUp, &Position)>,
    projectiles: Query<(Entity, &Position), With<Projectile>>,
    mut players: Query<(&mut PlayerVitals, &mut Loadout, &mut ActiveEffects), With<Player>>,
    mut cues: MessageWriter<SoundCue>,
) {
    let Ok((mut vitals, mut loadout, mut effects)) = players.single_mut() else {
        return;
    };
    let mut spent: HashSet<Entity> = HashSet::new();
    for (entity, powerup, pu_pos) in powerups.iter() {
        let hit = projectiles.iter().find(|(bullet, pos)| {
            !spent.contains(bullet) && pos.distance(pu_pos.0) < POWERUP_PICKUP_RADIUS
        });
        let Some((bullet, _)) = hit else {
            continue;
        };
        spent.insert(bullet);
        commands.entity(bullet).despawn();
        commands.entity(entity).despawn();
        apply_power_up(
            powerup.kind,
            &mut vitals,
            &mut loadout,
            &mut effects,
            config.powerup_duration(),
        );
        cues.write(SoundCue::PowerUp);
        debug!("Picked up {:?}", powerup.kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::Particle;
    use crate::powerup::PowerUpKind;
    use crate::projectile::Owner;
    use crate::test_utils::run_system_once;
    use bevy::ecs::message::Messages;

    fn collision_world() -> World {
        let mut world = World::new();
        world.insert_resource(Arena {
            width: 800.0,
            height: 600.0,
        });
        world.insert_resource(GameConfig::default());
        world.init_resource::<Messages<SoundCue>>();
        world.init_resource::<SessionStats>();
        world.init_resource::<SessionOutcome>();
        world.init_resource::<ScreenShake>();
        world
    }

    fn spawn_player(world: &mut World, at: Vec2, vitals: PlayerVitals) -> Entity {
        world
            .spawn((
                Player,
                Position(at),
                vitals,
                Dash::default(),
                Loadout::default(),
                ActiveEffects::default(),
            ))
            .id()
    }

    fn bullet(owner: Owner, damage: f32) -> Projectile {
        Projectile {
            velocity: Vec2::ZERO,
            radius: 5.0,
            damage,
            owner,
        }
    }

    fn particle_count(world: &mut World) -> usize {
        world
            .query_filtered::<Entity, With<Particle>>()
            .iter(world)
            .count()
    }

    #[test]
    fn rock_overlap_is_instant_defeat() {
        let mut world = collision_world();
        spawn_player(&mut world, Vec2::new(100.0, 500.0), PlayerVitals::new(3));
        world.spawn((Rock { speed: 3.0 }, Position(Vec2::new(120.0, 470.0))));

        run_system_once(&mut world, rock_player_collision_system);

        assert_eq!(
            world.resource::<SessionOutcome>().get(),
            Some(Outcome::Defeat(DefeatCause::CrushedByRock))
        );
    }

    #[test]
    fn offscreen_projectiles_are_removed() {
        let mut world = collision_world();
        let inside = world
            .spawn((bullet(Owner::Player, 5.0), Position(Vec2::new(10.0, 10.0))))
            .id();
        let outside = world
            .spawn((bullet(Owner::Player, 5.0), Position(Vec2::new(10.0, -1.0))))
            .id();

        run_system_once(&mut world, projectile_bounds_system);

        assert!(world.get_entity(inside).is_ok());
        assert!(world.get_entity(outside).is_err());
    }

    #[test]
    fn hostile_shot_drains_shield_and_is_consumed() {
        let mut world = collision_world();
        let mut vitals = PlayerVitals::new(3);
        vitals.shield = 50.0;
        let player = spawn_player(&mut world, Vec2::new(300.0, 300.0), vitals);
        let shot = world
            .spawn((bullet(Owner::Hostile, 5.0), Position(Vec2::new(310.0, 300.0))))
            .id();

        run_system_once(&mut world, hostile_projectile_player_system);

        let vitals = world.get::<PlayerVitals>(player).unwrap();
        assert_eq!(vitals.shield, 25.0);
        assert_eq!(vitals.lives, 3);
        assert!(world.get_entity(shot).is_err());
    }

    #[test]
    fn dashing_player_ignores_and_keeps_hostile_shot() {
        let mut world = collision_world();
        let player = spawn_player(&mut world, Vec2::new(300.0, 300.0), PlayerVitals::new(3));
        world.get_mut::<Dash>(player).unwrap().try_start();
        let shot = world
            .spawn((bullet(Owner::Hostile, 5.0), Position(Vec2::new(305.0, 300.0))))
            .id();

        run_system_once(&mut world, hostile_projectile_player_system);

        assert_eq!(world.get::<PlayerVitals>(player).unwrap().lives, 3);
        assert!(world.get_entity(shot).is_ok());
    }

    #[test]
    fn player_shot_is_not_reused_across_enemies() {
        let mut world = collision_world();
        world.spawn((Enemy, Position(Vec2::new(100.0, 100.0))));
        world.spawn((Enemy, Position(Vec2::new(110.0, 100.0))));
        world.spawn((bullet(Owner::Player, 5.0), Position(Vec2::new(105.0, 100.0))));

        run_system_once(&mut world, player_projectile_enemy_system);

        let enemies = world.query::<&Enemy>().iter(&world).count();
        assert_eq!(enemies, 1);
        let stats = world.resource::<SessionStats>();
        assert_eq!(stats.score(), ENEMY_KILL_SCORE);
        assert_eq!(stats.enemies_destroyed, 1);
        assert_eq!(particle_count(&mut world), ENEMY_EXPLOSION_PARTICLES as usize);
    }

    #[test]
    fn hostile_shots_do_not_hurt_enemies() {
        let mut world = collision_world();
        let enemy = world.spawn((Enemy, Position(Vec2::new(100.0, 100.0)))).id();
        world.spawn((bullet(Owner::Hostile, 5.0), Position(Vec2::new(100.0, 100.0))));

        run_system_once(&mut world, player_projectile_enemy_system);

        assert!(world.get_entity(enemy).is_ok());
        assert_eq!(world.resource::<SessionStats>().score(), 0);
    }

    #[test]
    fn boss_edge_hit_uses_closest_point() {
        let mut world = collision_world();
        let boss = world
            .spawn((Boss::default(), Position(Vec2::new(400.0, 120.0))))
            .id();
        // Boss box spans x 310..490; radius 5 + 4 reaches 8 px past the edge.
        let near = world
            .spawn((bullet(Owner::Player, 5.0), Position(Vec2::new(498.0, 120.0))))
            .id();
        let far = world
            .spawn((bullet(Owner::Player, 5.0), Position(Vec2::new(500.0, 120.0))))
            .id();

        run_system_once(&mut world, player_projectile_boss_system);

        assert!(world.get_entity(near).is_err());
        assert!(world.get_entity(far).is_ok());
        assert_eq!(world.get::<Boss>(boss).unwrap().health, BOSS_MAX_HEALTH - 5.0);
        assert!(!world.resource::<SessionOutcome>().is_decided());
    }

    #[test]
    fn killing_blow_removes_boss_and_wins() {
        let mut world = collision_world();
        let boss = world
            .spawn((
                Boss {
                    health: 10.0,
                    ..Boss::default()
                },
                Position(Vec2::new(400.0, 120.0)),
            ))
            .id();
        world.spawn((bullet(Owner::Player, 15.0), Position(Vec2::new(400.0, 160.0))));

        run_system_once(&mut world, player_projectile_boss_system);

        assert!(world.get_entity(boss).is_err());
        assert_eq!(world.resource::<SessionOutcome>().get(), Some(Outcome::Victory));
        let stats = world.resource::<SessionStats>();
        assert_eq!(stats.score(), BOSS_KILL_SCORE);
        assert_eq!(stats.bosses_defeated, 1);
        assert_eq!(particle_count(&mut world), BOSS_EXPLOSION_PARTICLES as usize);
    }

    #[test]
    fn any_projectile_collects_power_up() {
        let mut world = collision_world();
        let player = spawn_player(&mut world, Vec2::new(400.0, 500.0), PlayerVitals::new(2));
        let pu = world
            .spawn((
                PowerUp {
                    kind: PowerUpKind::Life,
                },
                Position(Vec2::new(50.0, 50.0)),
            ))
            .id();
        let shot = world
            .spawn((bullet(Owner::Hostile, 5.0), Position(Vec2::new(55.0, 50.0))))
            .id();

        run_system_once(&mut world, powerup_pickup_system);

        assert!(world.get_entity(pu).is_err());
        assert!(world.get_entity(shot).is_err());
        assert_eq!(world.get::<PlayerVitals>(player).unwrap().lives, 3);
    }
}
