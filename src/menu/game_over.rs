use super::common::*;
use super::*;
use crate::session::{SessionOutcome, SessionStats};

/// Spawn the summary card centred over the frozen world.
pub(super) fn setup_game_over(
    mut commands: Commands,
    stats: Res<SessionStats>,
    outcome: Res<SessionOutcome>,
) {
    let victory = outcome.get().is_some_and(|o| o.is_victory());
    let (headline, headline_color) = if victory {
        ("YOU WIN", victory_color())
    } else {
        ("GAME OVER", defeat_color())
    };

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.9)),
            ZIndex(300),
            GameOverRoot,
        ))
        .with_children(|overlay| {
            overlay
                .spawn((
                    Node {
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        padding: UiRect::all(Val::Px(40.0)),
                        row_gap: Val::Px(12.0),
                        border: UiRect::all(Val::Px(2.0)),
                        min_width: Val::Px(360.0),
                        ..default()
                    },
                    BackgroundColor(card_bg()),
                    BorderColor::all(card_border()),
                ))
                .with_children(|card| {
                    label(card, headline, 46.0, headline_color);
                    spacer(card, 4.0);
                    label(card, format!("Score: {}", stats.score()), 26.0, body_color());
                    label(
                        card,
                        format!("Time survived: {}s", stats.survived_secs()),
                        22.0,
                        body_color(),
                    );
                    label(
                        card,
                        format!("Enemies destroyed: {}", stats.enemies_destroyed),
                        22.0,
                        body_color(),
                    );
                    label(
                        card,
                        format!("Bosses defeated: {}", stats.bosses_defeated),
                        22.0,
                        body_color(),
                    );
                    spacer(card, 12.0);
                    label(card, "Press [R] to restart", 20.0, hint_color());
                });
        });
}

pub(super) fn cleanup_game_over(mut commands: Commands, query: Query<Entity, With<GameOverRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

/// R returns to the start screen; the session is torn down on the way out.
pub(super) fn restart_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keys.just_pressed(KeyCode::KeyR) {
        next_state.set(GameState::StartScreen);
    }
}
