use super::common::*;
use super::*;

/// Spawn the full-screen title overlay.
///
/// Layout:
/// ```text
/// ┌─────────────────────────────────────────────┐
/// │               SPACE VIBES                   │
/// │                                             │
/// │              WASD  Move                     │
/// │        Left Mouse  Shoot                    │
/// │             Shift  Dash                     │
/// │                 F  Fullscreen               │
/// │                                             │
/// │           Press ENTER to Start              │
/// └─────────────────────────────────────────────┘
/// ```
pub(super) fn setup_start_screen(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                ..default()
            },
            BackgroundColor(Color::BLACK),
            ZIndex(400),
            StartScreenRoot,
        ))
        .with_children(|screen| {
            label(screen, "SPACE VIBES", 72.0, title_color());
            spacer(screen, 28.0);
            for line in [
                "WASD - Move",
                "Left Mouse - Shoot",
                "Shift - Dash",
                "F - Fullscreen",
            ] {
                label(screen, line, 22.0, subtitle_color());
            }
            spacer(screen, 36.0);
            label(screen, "Press ENTER to Start", 26.0, hint_color());
        });
}

pub(super) fn cleanup_start_screen(
    mut commands: Commands,
    query: Query<Entity, With<StartScreenRoot>>,
) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

/// Enter starts a session.  Only scheduled once a [`PlayerConfig`] exists.
pub(super) fn start_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keys.any_just_pressed([KeyCode::Enter, KeyCode::NumpadEnter]) {
        next_state.set(GameState::Playing);
    }
}
