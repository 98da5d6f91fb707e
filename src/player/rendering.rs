//! Player ship sprite and gizmo overlays.
//!
//! | Layer         | Technology | Shown                                   |
//! |---------------|------------|-----------------------------------------|
//! | Ship          | `Sprite`   | once `sprites/player.png` has loaded    |
//! | Ship fallback | Gizmos     | cyan triangle while the image is missing|
//! | Shield ring   | Gizmos     | while shield > 0, radius 30             |
//! | Dash ring     | Gizmos     | while the dash is active, radius 35     |

use super::state::{Dash, Hull, Player, PlayerVitals};
use crate::constants::{DASH_RING_RADIUS, SHIELD_RING_RADIUS};
use crate::geometry::{Arena, Position};
use crate::rendering::SpriteLibrary;
use bevy::prelude::*;

/// Attach the ship sprite, sized to the hull, on spawn.
pub fn attach_player_sprite_system(
    mut commands: Commands,
    library: Res<SpriteLibrary>,
    mut query: Query<(Entity, &Hull, &mut Transform), Added<Player>>,
) {
    for (entity, hull, mut transform) in query.iter_mut() {
        transform.translation.z = 3.0;
        commands.entity(entity).insert(Sprite {
            image: library.player.clone(),
            custom_size: Some(Vec2::new(hull.width, hull.height)),
            ..default()
        });
    }
}

pub fn player_gizmo_system(
    mut gizmos: Gizmos,
    arena: Res<Arena>,
    images: Res<Assets<Image>>,
    library: Res<SpriteLibrary>,
    query: Query<(&Position, &Hull, &PlayerVitals, &Dash), With<Player>>,
) {
    let Ok((pos, hull, vitals, dash)) = query.single() else {
        return;
    };
    let center = arena.to_world(pos.0);

    if images.get(&library.player).is_none() {
        let half = hull.half_extent();
        let nose = arena.to_world(pos.0 + Vec2::new(0.0, -half.y));
        let left = arena.to_world(pos.0 + Vec2::new(-half.x, half.y));
        let right = arena.to_world(pos.0 + Vec2::new(half.x, half.y));
        gizmos.linestrip_2d([nose, left, right, nose], Color::srgb(0.0, 1.0, 1.0));
    }

    if vitals.shield > 0.0 {
        gizmos.circle_2d(
            center,
            SHIELD_RING_RADIUS,
            Color::srgba(0.0, 200.0 / 255.0, 1.0, 0.7),
        );
    }

    if dash.is_active() {
        gizmos.circle_2d(center, DASH_RING_RADIUS, Color::srgba(1.0, 1.0, 1.0, 0.6));
    }
}
