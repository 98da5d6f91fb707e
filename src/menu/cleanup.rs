use super::*;
use crate::session::{ScreenShake, SessionEntity, SessionOutcome, SessionStats};

/// Despawn every entity of the finished session and reset per-session
/// resources so the start screen sits on a clean world.
///
/// Runs on `OnExit(GameOver)`, after the summary card has been read.
pub fn cleanup_session_entities(
    mut commands: Commands,
    entities: Query<Entity, With<SessionEntity>>,
    mut stats: ResMut<SessionStats>,
    mut outcome: ResMut<SessionOutcome>,
    mut shake: ResMut<ScreenShake>,
) {
    let mut count = 0usize;
    for entity in entities.iter() {
        commands.entity(entity).despawn();
        count += 1;
    }
    *stats = SessionStats::default();
    *outcome = SessionOutcome::default();
    *shake = ScreenShake::default();
    debug!("Session torn down, {count} entities despawned");
}
