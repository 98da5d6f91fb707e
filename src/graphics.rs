use crate::constants::{STAR_COUNT, STAR_MAX_SIZE, STAR_MAX_SPEED, STAR_MIN_SIZE, STAR_MIN_SPEED};
use crate::geometry::{Arena, Position};
use crate::session::ScreenShake;
use bevy::prelude::*;
use rand::Rng;

/// Setup camera for 2D rendering
pub fn setup_camera(mut commands: Commands) {
    // One logical pixel per world unit, centred on the arena.
    commands.spawn(Camera2d);
    debug!("Camera spawned");
}

/// Offset the camera by a random vector in `±strength/2` while the shake runs.
pub fn camera_shake_system(
    shake: Res<ScreenShake>,
    mut cameras: Query<&mut Transform, With<Camera2d>>,
) {
    let Ok(mut cam) = cameras.single_mut() else {
        return;
    };
    if shake.is_active() {
        let half = shake.strength * 0.5;
        let mut rng = rand::thread_rng();
        cam.translation.x = rng.gen_range(-half..=half);
        cam.translation.y = rng.gen_range(-half..=half);
    } else {
        cam.translation.x = 0.0;
        cam.translation.y = 0.0;
    }
}

// ── Starfield ─────────────────────────────────────────────────────────────────

/// Background star drifting down the screen.  Purely cosmetic; survives
/// session teardown.
#[derive(Component, Debug, Clone, Copy)]
pub struct Star {
    /// Pixels per frame at 60 fps.
    pub speed: f32,
}

pub fn spawn_starfield(mut commands: Commands, arena: Res<Arena>) {
    let mut rng = rand::thread_rng();
    for _ in 0..STAR_COUNT {
        let size = rng.gen_range(STAR_MIN_SIZE..STAR_MAX_SIZE);
        commands.spawn((
            Star {
                speed: rng.gen_range(STAR_MIN_SPEED..STAR_MAX_SPEED),
            },
            Position(Vec2::new(
                rng.gen::<f32>() * arena.width,
                rng.gen::<f32>() * arena.height,
            )),
            Sprite::from_color(Color::WHITE, Vec2::splat(size * 2.0)),
            Transform::from_xyz(0.0, 0.0, -10.0),
        ));
    }
}

/// Drift stars down and wrap them to the top at a random x.
pub fn star_drift_system(
    time: Res<Time>,
    arena: Res<Arena>,
    mut stars: Query<(&Star, &mut Position)>,
) {
    let frames = time.delta_secs() * 60.0;
    let mut rng = rand::thread_rng();
    for (star, mut pos) in stars.iter_mut() {
        pos.y += star.speed * frames;
        if pos.y > arena.height {
            pos.y = 0.0;
            pos.x = rng.gen::<f32>() * arena.width;
        }
    }
}
