use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;

pub(super) fn title_color() -> Color {
    Color::srgb(0.95, 0.88, 0.45)
}
pub(super) fn victory_color() -> Color {
    Color::srgb(0.45, 1.0, 0.55)
}
pub(super) fn defeat_color() -> Color {
    Color::srgb(1.0, 0.22, 0.22)
}
pub(super) fn body_color() -> Color {
    Color::srgb(0.85, 0.85, 0.92)
}
pub(super) fn subtitle_color() -> Color {
    Color::srgb(0.55, 0.55, 0.65)
}
pub(super) fn hint_color() -> Color {
    Color::srgb(0.75, 1.0, 0.80)
}
pub(super) fn card_bg() -> Color {
    Color::srgb(0.06, 0.02, 0.02)
}
pub(super) fn card_border() -> Color {
    Color::srgb(0.55, 0.10, 0.10)
}

pub(super) fn spacer(parent: &mut ChildSpawnerCommands<'_>, px: f32) {
    parent.spawn(Node {
        height: Val::Px(px),
        ..default()
    });
}

/// One line of overlay text.
pub(super) fn label(
    parent: &mut ChildSpawnerCommands<'_>,
    text: impl Into<String>,
    size: f32,
    color: Color,
) {
    parent.spawn((
        Text::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color),
    ));
}
