use bevy::prelude::*;
use bevy::window::WindowResolution;

use space_vibes::audio::SoundPlugin;
use space_vibes::config::{self, GameConfig};
use space_vibes::constants::{ARENA_HEIGHT, ARENA_WIDTH};
use space_vibes::menu::MenuPlugin;
use space_vibes::particles::ParticlesPlugin;
use space_vibes::rendering::{self, PresentationPlugin};
use space_vibes::simulation::{SimulationPlugin, SpawnerPlugin};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Space Vibes".into(),
                resolution: WindowResolution::new(ARENA_WIDTH as u32, ARENA_HEIGHT as u32),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(GameConfig::default())
        // SimulationPlugin registers GameState; it must precede MenuPlugin.
        .add_plugins((SimulationPlugin, SpawnerPlugin))
        .add_plugins((PresentationPlugin, MenuPlugin, SoundPlugin, ParticlesPlugin))
        .add_systems(
            Startup,
            (config::load_game_config, config::load_player_config)
                .before(rendering::size_window_to_arena),
        )
        .run();
}
