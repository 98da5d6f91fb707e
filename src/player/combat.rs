//! Player firing and damage intake.
//!
//! | System / fn                | Schedule            | Purpose                               |
//! |----------------------------|---------------------|---------------------------------------|
//! | `player_fire_system`       | `FixedUpdate/Intake`| Consume the fire latch, emit bullets  |
//! | [`strike_player`]          | called by hit rules | Shield-first damage, shake, defeat    |

use super::state::{Dash, HitOutcome, Loadout, Player, PlayerIntent, PlayerVitals};
use crate::audio::SoundCue;
use crate::constants::{
    HIT_SHAKE_STRENGTH, HIT_SHAKE_TICKS, PLAYER_BULLET_SPEED, PLAYER_SPREAD_ANGLE,
};
use crate::geometry::{angle_to, heading, Position};
use crate::projectile::{spawn_projectile, Owner, Projectile};
use crate::session::{DefeatCause, Outcome, ScreenShake, SessionOutcome};
use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;

/// Bullets for one trigger pull; `aim` is the screen-space angle toward the
/// pointer.
pub fn volley(loadout: &Loadout, aim: f32) -> Vec<Projectile> {
    let mut angles = vec![aim];
    if loadout.spread {
        angles.extend([aim - PLAYER_SPREAD_ANGLE, aim + PLAYER_SPREAD_ANGLE]);
    }
    angles
        .into_iter()
        .map(|angle| Projectile {
            velocity: heading(angle) * PLAYER_BULLET_SPEED,
            radius: loadout.bullet_radius,
            damage: loadout.bullet_damage(),
            owner: Owner::Player,
        })
        .collect()
}

/// Advance the shot clock and, if the fire latch is set and the interval has
/// elapsed, fire toward the pointer.
///
/// Without a pointer position the ship fires straight up.
pub fn player_fire_system(
    mut commands: Commands,
    time: Res<Time>,
    mut intent: ResMut<PlayerIntent>,
    mut query: Query<(&Position, &mut Loadout), With<Player>>,
    mut cues: MessageWriter<SoundCue>,
) {
    let Ok((pos, mut loadout)) = query.single_mut() else {
        return;
    };
    loadout.since_last_shot = loadout.since_last_shot.saturating_add(time.delta());

    if !intent.fire {
        return;
    }
    intent.fire = false;
    if !loadout.can_fire() {
        return;
    }

    let aim = intent
        .aim
        .map_or(-FRAC_PI_2, |target| angle_to(pos.0, target));
    for projectile in volley(&loadout, aim) {
        spawn_projectile(&mut commands, pos.0, projectile);
    }
    loadout.since_last_shot = std::time::Duration::ZERO;
    cues.write(SoundCue::Shoot);
}

/// Apply one hit of `amount` to the player.
///
/// Losing a life starts the hit shake; losing the last one concludes the
/// session as a defeat.
pub fn strike_player(
    vitals: &mut PlayerVitals,
    dash: &Dash,
    amount: f32,
    shake: &mut ScreenShake,
    outcome: &mut SessionOutcome,
) -> HitOutcome {
    let result = vitals.take_hit(amount, dash.is_active());
    if let HitOutcome::LifeLost { lives_left } = result {
        shake.start(HIT_SHAKE_TICKS, HIT_SHAKE_STRENGTH);
        if lives_left == 0 && outcome.conclude(Outcome::Defeat(DefeatCause::LivesExhausted)) {
            info!("Player out of lives");
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{PLAYER_BIG_BULLET_DAMAGE, PLAYER_HIT_DAMAGE};
    use bevy::ecs::message::Messages;
    use crate::test_utils::run_system_once;
    use std::time::Duration;

    fn fire_world(loadout: Loadout, aim: Option<Vec2>) -> World {
        let mut world = World::new();
        world.insert_resource(Time::<()>::default());
        world.init_resource::<Messages<SoundCue>>();
        world.insert_resource(PlayerIntent {
            fire: true,
            aim,
            ..default()
        });
        world.spawn((Player, Position(Vec2::new(400.0, 500.0)), loadout));
        world
    }

    fn projectiles(world: &mut World) -> Vec<Projectile> {
        world
            .query::<&Projectile>()
            .iter(world)
            .copied()
            .collect()
    }

    #[test]
    fn single_shot_heads_toward_pointer() {
        let mut world = fire_world(Loadout::default(), Some(Vec2::new(400.0, 100.0)));
        run_system_once(&mut world, player_fire_system);

        let shots = projectiles(&mut world);
        assert_eq!(shots.len(), 1);
        assert!((shots[0].velocity - Vec2::new(0.0, -PLAYER_BULLET_SPEED)).length() < 1e-4);
        assert!(!world.resource::<PlayerIntent>().fire, "latch consumed");
    }

    #[test]
    fn spread_fires_three_big_bullets() {
        let loadout = Loadout {
            spread: true,
            bullet_radius: 12.0,
            ..Loadout::default()
        };
        let mut world = fire_world(loadout, None);
        run_system_once(&mut world, player_fire_system);

        let shots = projectiles(&mut world);
        assert_eq!(shots.len(), 3);
        assert!(shots.iter().all(|p| p.damage == PLAYER_BIG_BULLET_DAMAGE));
    }

    #[test]
    fn fire_interval_blocks_second_shot() {
        let loadout = Loadout {
            since_last_shot: Duration::from_millis(100),
            ..Loadout::default()
        };
        let mut world = fire_world(loadout, None);
        run_system_once(&mut world, player_fire_system);
        assert!(projectiles(&mut world).is_empty());
    }

    #[test]
    fn last_life_lost_concludes_defeat() {
        let mut vitals = PlayerVitals::new(1);
        let mut shake = ScreenShake::default();
        let mut outcome = SessionOutcome::default();

        let hit = strike_player(
            &mut vitals,
            &Dash::default(),
            PLAYER_HIT_DAMAGE,
            &mut shake,
            &mut outcome,
        );

        assert_eq!(hit, HitOutcome::LifeLost { lives_left: 0 });
        assert_eq!(shake.ticks_left, HIT_SHAKE_TICKS);
        assert_eq!(
            outcome.get(),
            Some(Outcome::Defeat(DefeatCause::LivesExhausted))
        );
    }

    #[test]
    fn shield_hit_does_not_shake() {
        let mut vitals = PlayerVitals::new(2);
        vitals.shield = 100.0;
        let mut shake = ScreenShake::default();
        let mut outcome = SessionOutcome::default();
        strike_player(
            &mut vitals,
            &Dash::default(),
            PLAYER_HIT_DAMAGE,
            &mut shake,
            &mut outcome,
        );
        assert!(!shake.is_active());
        assert!(!outcome.is_decided());
    }
}
