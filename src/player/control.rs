//! Player input and movement systems.
//!
//! ## Pipeline
//!
//! 1. [`keyboard_to_intent_system`] (`Update`): mirrors held WASD keys into
//!    [`PlayerIntent`], latches left-click and Shift presses, records the
//!    pointer position.
//! 2. [`player_dash_system`] (`FixedUpdate`): consumes the dash latch.
//! 3. [`player_move_system`] (`FixedUpdate`): moves and clamps the ship, then
//!    ticks the dash counters.
//!
//! The **input abstraction layer** (`PlayerIntent`) keeps the movement logic
//! testable: tests populate the resource directly and run only the fixed-step
//! systems.

use super::state::{Dash, Hull, Player, PlayerIntent};
use crate::constants::DASH_SPEED;
use crate::geometry::{Arena, Position};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// Translate keyboard and mouse state into [`PlayerIntent`].
///
/// - **W/A/S/D** → held directions (overwritten every frame)
/// - **Left mouse** press → `fire` latch
/// - **Shift** press → `dash` latch
/// - cursor position → `aim` (window coordinates already match screen space)
pub fn keyboard_to_intent_system(
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut intent: ResMut<PlayerIntent>,
) {
    intent.up = keys.pressed(KeyCode::KeyW);
    intent.down = keys.pressed(KeyCode::KeyS);
    intent.left = keys.pressed(KeyCode::KeyA);
    intent.right = keys.pressed(KeyCode::KeyD);

    if mouse.just_pressed(MouseButton::Left) {
        intent.fire = true;
    }
    if keys.any_just_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]) {
        intent.dash = true;
    }
    if let Ok(window) = windows.single() {
        if let Some(cursor) = window.cursor_position() {
            intent.aim = Some(cursor);
        }
    }
}

/// Start a dash when the latch is set and the cooldown allows it.
pub fn player_dash_system(
    mut intent: ResMut<PlayerIntent>,
    mut query: Query<&mut Dash, With<Player>>,
) {
    if !intent.dash {
        return;
    }
    intent.dash = false;
    if let Ok(mut dash) = query.single_mut() {
        if dash.try_start() {
            debug!("Dash started");
        }
    }
}

/// Move the ship by the held directions and clamp it inside the arena.
///
/// Each axis moves independently at full speed (diagonals are faster, as in
/// classic arcade movement).  A running dash overrides the speed.
pub fn player_move_system(
    intent: Res<PlayerIntent>,
    arena: Res<Arena>,
    mut query: Query<(&Hull, &mut Dash, &mut Position), With<Player>>,
) {
    let Ok((hull, mut dash, mut pos)) = query.single_mut() else {
        return;
    };
    let speed = if dash.is_active() {
        DASH_SPEED
    } else {
        hull.speed
    };
    let moved = pos.0 + intent.direction() * speed;
    pos.0 = arena.clamp_inside(moved, hull.half_extent());
    dash.tick();
}
