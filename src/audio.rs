//! Fire-and-forget sound cues.
//!
//! Gameplay systems write a [`SoundCue`] message; [`SoundPlugin`] turns each
//! cue into a short-lived `AudioPlayer` entity.  Cues overlap freely.  A cue
//! without a loaded clip is skipped, and the gameplay plugin registers the
//! message itself so headless tests never need this plugin.

use bevy::audio::Volume;
use bevy::prelude::*;
use rand::Rng;
use std::collections::HashMap;

/// A named sound effect request.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Shoot,
    Explode,
    Explode2,
    PowerUp,
    Laser,
}

impl SoundCue {
    /// One of the two explosion cues, picked at random for each explosion.
    pub fn explosion(rng: &mut impl Rng) -> Self {
        if rng.gen_bool(0.5) {
            SoundCue::Explode
        } else {
            SoundCue::Explode2
        }
    }

    /// Asset path and playback volume for each cue.
    fn source(self) -> (&'static str, f32) {
        match self {
            SoundCue::Shoot => ("sounds/shoot.wav", 0.4),
            SoundCue::Explode => ("sounds/explode.mp3", 0.6),
            SoundCue::Explode2 => ("sounds/explode2.mp3", 0.6),
            SoundCue::PowerUp => ("sounds/powerup.mp3", 0.5),
            SoundCue::Laser => ("sounds/laser.wav", 0.7),
        }
    }

    const ALL: [SoundCue; 5] = [
        SoundCue::Shoot,
        SoundCue::Explode,
        SoundCue::Explode2,
        SoundCue::PowerUp,
        SoundCue::Laser,
    ];
}

/// Loaded clip handles keyed by cue.
#[derive(Resource, Default)]
pub struct SoundLibrary {
    clips: HashMap<SoundCue, (Handle<AudioSource>, f32)>,
}

impl SoundLibrary {
    pub fn clip(&self, cue: SoundCue) -> Option<&(Handle<AudioSource>, f32)> {
        self.clips.get(&cue)
    }
}

pub struct SoundPlugin;

impl Plugin for SoundPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<SoundCue>()
            .init_resource::<SoundLibrary>()
            .add_systems(Startup, load_sound_library)
            .add_systems(Update, play_sound_cues_system);
    }
}

fn load_sound_library(asset_server: Res<AssetServer>, mut library: ResMut<SoundLibrary>) {
    for cue in SoundCue::ALL {
        let (path, volume) = cue.source();
        library.clips.insert(cue, (asset_server.load(path), volume));
    }
}

/// Spawn one self-despawning player per queued cue.
pub fn play_sound_cues_system(
    mut commands: Commands,
    mut cues: MessageReader<SoundCue>,
    library: Res<SoundLibrary>,
    sources: Res<Assets<AudioSource>>,
) {
    for cue in cues.read() {
        let Some((handle, volume)) = library.clip(*cue) else {
            continue;
        };
        // Missing or still-loading files stay silent.
        if sources.get(handle).is_none() {
            continue;
        }
        commands.spawn((
            AudioPlayer(handle.clone()),
            PlaybackSettings::DESPAWN.with_volume(Volume::Linear(*volume)),
        ));
    }
}
