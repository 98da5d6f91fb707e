//! Presentation: sprites with primitive fallbacks, HUD, boss bar, laser beam,
//! window handling.
//!
//! Gameplay never touches `Transform`; [`sync_transforms_system`] derives it
//! from [`Position`] each frame, converting screen space to world space.
//!
//! ## Layer model
//!
//! | Layer              | Technology | z     | Fallback while the image is missing |
//! |--------------------|------------|-------|-------------------------------------|
//! | Stars              | `Sprite`   | -10   | (solid colour, no image)            |
//! | Rocks              | `Sprite`   | 0.5   | grey rectangle gizmo                |
//! | Power-ups          | `Sprite`   | 0.6   | white circle gizmo                  |
//! | Enemies            | `Sprite`   | 1     | orange triangle gizmo               |
//! | Boss               | `Sprite`   | 1     | rectangle gizmo coloured by phase   |
//! | Projectiles        | `Mesh2d`   | 2     | (always a disc)                     |
//! | Player             | `Sprite`   | 3     | cyan triangle gizmo                 |
//! | Particles          | `Mesh2d`   | 4     | (always a disc)                     |
//! | Laser beam         | Gizmos     | -     | yellow warning, red when live       |
//! | Score / lives HUD  | Bevy UI    | -     | -                                   |
//! | Boss health bar    | Bevy UI    | -     | hidden without a boss               |
//!
//! ## System responsibilities
//!
//! | System                          | Schedule           | Purpose                              |
//! |---------------------------------|--------------------|--------------------------------------|
//! | `load_sprite_library`           | Startup            | Queue every sprite image             |
//! | `init_projectile_assets`        | Startup            | Shared disc mesh and two materials   |
//! | `size_window_to_arena`          | Startup            | Apply configured arena to the window |
//! | `setup_hud`                     | `OnEnter(Playing)` | Score, lives and boss bar nodes      |
//! | `attach_sprites_system`         | Update             | Sprites on freshly spawned entities  |
//! | `attach_projectile_mesh_system` | Update             | Disc mesh on fresh projectiles       |
//! | `sync_transforms_system`        | Update             | `Position` → `Transform`             |
//! | `fallback_gizmo_system`         | Update             | Primitives for unloaded images       |
//! | `laser_gizmo_system`            | Update             | Boss laser beam                      |
//! | `hud_text_system`               | Update             | Score / lives text on change         |
//! | `boss_bar_system`               | Update             | Boss bar visibility and fill         |
//! | `fullscreen_toggle_system`      | Update             | F toggles borderless fullscreen      |
//! | `arena_follow_window_system`    | Update             | Arena tracks the window size         |

use crate::boss::{Boss, BossPhase, Laser};
use crate::config::GameConfig;
use crate::constants::*;
use crate::enemy::Enemy;
use crate::geometry::{heading, Arena, Position};
use crate::graphics::{camera_shake_system, setup_camera, spawn_starfield, star_drift_system};
use crate::menu::GameState;
use crate::particles::Particle;
use crate::player::{
    attach_player_sprite_system, keyboard_to_intent_system, player_gizmo_system, PlayerVitals,
};
use crate::powerup::{PowerUp, PowerUpKind};
use crate::projectile::Projectile;
use crate::rock::Rock;
use crate::session::{SessionEntity, SessionStats};
use bevy::prelude::*;
use bevy::window::{MonitorSelection, PrimaryWindow, WindowMode};
use std::collections::HashMap;

// ── Resources ─────────────────────────────────────────────────────────────────

/// Handles for every sprite image.  Loading is fire-and-forget; anything not
/// yet loaded is drawn as a primitive by [`fallback_gizmo_system`].
#[derive(Resource, Default)]
pub struct SpriteLibrary {
    pub player: Handle<Image>,
    pub enemy: Handle<Image>,
    pub boss: Handle<Image>,
    pub rock: Handle<Image>,
    pub powerups: HashMap<PowerUpKind, Handle<Image>>,
}

impl SpriteLibrary {
    pub fn powerup(&self, kind: PowerUpKind) -> Handle<Image> {
        self.powerups.get(&kind).cloned().unwrap_or_default()
    }
}

fn powerup_sprite_path(kind: PowerUpKind) -> &'static str {
    match kind {
        PowerUpKind::Life => "sprites/greenPU.png",
        PowerUpKind::Rapid => "sprites/yellowPU.png",
        PowerUpKind::Big => "sprites/orangePU.png",
        PowerUpKind::Spread => "sprites/purplePU.png",
        PowerUpKind::Shield => "sprites/bluePU.png",
    }
}

/// Shared unit disc and the two projectile colours.
#[derive(Resource)]
pub struct ProjectileAssets {
    pub mesh: Handle<Mesh>,
    pub player: Handle<ColorMaterial>,
    pub hostile: Handle<ColorMaterial>,
}

// ── Component markers ─────────────────────────────────────────────────────────

#[derive(Component)]
pub struct HudScoreText;

#[derive(Component)]
pub struct HudLivesText;

#[derive(Component)]
pub struct BossBarRoot;

#[derive(Component)]
pub struct BossBarFill;

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Everything that needs a window, a renderer or an input device.
pub struct PresentationPlugin;

impl Plugin for PresentationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SpriteLibrary>()
            .add_systems(
                Startup,
                (
                    size_window_to_arena,
                    setup_camera,
                    spawn_starfield,
                    load_sprite_library,
                    init_projectile_assets,
                )
                    .chain(),
            )
            .add_systems(OnEnter(GameState::Playing), setup_hud)
            .add_systems(
                Update,
                keyboard_to_intent_system.run_if(in_state(GameState::Playing)),
            )
            .add_systems(
                Update,
                (
                    arena_follow_window_system,
                    fullscreen_toggle_system,
                    star_drift_system,
                    attach_sprites_system,
                    attach_player_sprite_system,
                    attach_projectile_mesh_system,
                    sync_transforms_system,
                    camera_shake_system,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    fallback_gizmo_system,
                    laser_gizmo_system,
                    player_gizmo_system,
                    hud_text_system,
                    boss_bar_system,
                )
                    .after(sync_transforms_system),
            );
    }
}

// ── Startup ───────────────────────────────────────────────────────────────────

/// Apply the configured arena size to the primary window and the [`Arena`].
pub fn size_window_to_arena(
    config: Res<GameConfig>,
    mut arena: ResMut<Arena>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    *arena = Arena::from_config(&config);
    if let Ok(mut window) = windows.single_mut() {
        window.resolution.set(arena.width, arena.height);
    }
}

pub fn load_sprite_library(asset_server: Res<AssetServer>, mut library: ResMut<SpriteLibrary>) {
    library.player = asset_server.load("sprites/player.png");
    library.enemy = asset_server.load("sprites/enemy.png");
    library.boss = asset_server.load("sprites/boss.png");
    library.rock = asset_server.load("sprites/rock.png");
    for kind in PowerUpKind::ALL {
        library
            .powerups
            .insert(kind, asset_server.load(powerup_sprite_path(kind)));
    }
    debug!("Sprite images queued");
}

pub fn init_projectile_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    commands.insert_resource(ProjectileAssets {
        mesh: meshes.add(Circle::new(1.0)),
        player: materials.add(ColorMaterial::from_color(Color::srgb(1.0, 1.0, 0.0))),
        hostile: materials.add(ColorMaterial::from_color(Color::srgb(1.0, 0.0, 0.0))),
    });
}

// ── OnEnter(Playing): HUD ─────────────────────────────────────────────────────

/// Spawn the score/lives HUD and the hidden boss bar for a new session.
pub fn setup_hud(mut commands: Commands, lives: Query<&PlayerVitals>) {
    let lives = lives.iter().next().map_or(0, |v| v.lives);
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(10.0),
                top: Val::Px(10.0),
                flex_direction: FlexDirection::Column,
                ..default()
            },
            SessionEntity,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Score: 0"),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                HudScoreText,
            ));
            parent.spawn((
                Text::new(format!("Lives: {lives}")),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                HudLivesText,
            ));
        });

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(BOSS_BAR_TOP),
                left: Val::Percent(50.0),
                margin: UiRect::left(Val::Px(-BOSS_BAR_WIDTH * 0.5)),
                width: Val::Px(BOSS_BAR_WIDTH),
                height: Val::Px(BOSS_BAR_HEIGHT),
                ..default()
            },
            BackgroundColor(Color::srgb(1.0, 0.0, 0.0)),
            Visibility::Hidden,
            BossBarRoot,
            SessionEntity,
        ))
        .with_children(|parent| {
            parent.spawn((
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    ..default()
                },
                BackgroundColor(Color::srgb(0.0, 1.0, 0.0)),
                BossBarFill,
            ));
        });
}

// ── Update: attachment ────────────────────────────────────────────────────────

fn sized_sprite(image: Handle<Image>, size: Vec2) -> Sprite {
    Sprite {
        image,
        custom_size: Some(size),
        ..default()
    }
}

/// Give freshly spawned hostiles and pickups their sprite and draw depth.
#[allow(clippy::type_complexity)]
pub fn attach_sprites_system(
    mut commands: Commands,
    library: Res<SpriteLibrary>,
    enemies: Query<Entity, Added<Enemy>>,
    bosses: Query<Entity, Added<Boss>>,
    rocks: Query<Entity, Added<Rock>>,
    powerups: Query<(Entity, &PowerUp), Added<PowerUp>>,
    mut transforms: Query<&mut Transform>,
) {
    let mut attach = |entity: Entity, sprite: Sprite, z: f32| {
        if let Ok(mut transform) = transforms.get_mut(entity) {
            transform.translation.z = z;
        }
        commands.entity(entity).insert(sprite);
    };
    for entity in enemies.iter() {
        attach(
            entity,
            sized_sprite(library.enemy.clone(), Vec2::splat(ENEMY_SPRITE_SIZE)),
            1.0,
        );
    }
    for entity in bosses.iter() {
        attach(
            entity,
            sized_sprite(library.boss.clone(), Vec2::new(BOSS_WIDTH, BOSS_HEIGHT)),
            1.0,
        );
    }
    for entity in rocks.iter() {
        attach(
            entity,
            sized_sprite(library.rock.clone(), Vec2::splat(ROCK_SIZE)),
            0.5,
        );
    }
    for (entity, powerup) in powerups.iter() {
        attach(
            entity,
            sized_sprite(
                library.powerup(powerup.kind),
                Vec2::splat(POWERUP_SPRITE_SIZE),
            ),
            0.6,
        );
    }
}

/// Disc mesh on every newly fired projectile, scaled to its radius.
pub fn attach_projectile_mesh_system(
    mut commands: Commands,
    assets: Res<ProjectileAssets>,
    mut query: Query<(Entity, &Projectile, &mut Transform), Added<Projectile>>,
) {
    for (entity, projectile, mut transform) in query.iter_mut() {
        let material = if projectile.is_hostile() {
            assets.hostile.clone()
        } else {
            assets.player.clone()
        };
        transform.scale = Vec3::splat(projectile.radius);
        transform.translation.z = 2.0;
        commands
            .entity(entity)
            .insert((Mesh2d(assets.mesh.clone()), MeshMaterial2d(material)));
    }
}

/// Copy every [`Position`] into its `Transform`, keeping depth and scale.
pub fn sync_transforms_system(
    arena: Res<Arena>,
    mut query: Query<(&Position, &mut Transform, Has<Particle>)>,
) {
    for (pos, mut transform, is_particle) in query.iter_mut() {
        let world = arena.to_world(pos.0);
        transform.translation.x = world.x;
        transform.translation.y = world.y;
        if is_particle {
            transform.translation.z = 4.0;
        }
    }
}

// ── Update: gizmos ────────────────────────────────────────────────────────────

fn image_ready(images: &Assets<Image>, handle: &Handle<Image>) -> bool {
    images.get(handle).is_some()
}

fn boss_phase_color(phase: BossPhase) -> Color {
    match phase {
        BossPhase::One => Color::srgb(0.545, 0.0, 0.0),
        BossPhase::Two => Color::srgb(1.0, 0.271, 0.0),
        BossPhase::Three => Color::srgb(1.0, 0.0, 1.0),
    }
}

/// Draw primitives for every entity whose sprite image is not available.
#[allow(clippy::too_many_arguments)]
pub fn fallback_gizmo_system(
    mut gizmos: Gizmos,
    arena: Res<Arena>,
    images: Res<Assets<Image>>,
    library: Res<SpriteLibrary>,
    enemies: Query<&Position, With<Enemy>>,
    bosses: Query<(&Boss, &Position)>,
    rocks: Query<&Position, With<Rock>>,
    powerups: Query<(&PowerUp, &Position)>,
) {
    if !image_ready(&images, &library.enemy) {
        let orange = Color::srgb(1.0, 0.65, 0.0);
        for pos in enemies.iter() {
            // Nose points down towards the player.
            let tip = arena.to_world(pos.0 + Vec2::new(0.0, ENEMY_SIZE));
            let left = arena.to_world(pos.0 + Vec2::new(-ENEMY_SIZE, -ENEMY_SIZE));
            let right = arena.to_world(pos.0 + Vec2::new(ENEMY_SIZE, -ENEMY_SIZE));
            gizmos.linestrip_2d([tip, left, right, tip], orange);
        }
    }

    if !image_ready(&images, &library.boss) {
        for (boss, pos) in bosses.iter() {
            gizmos.rect_2d(
                Isometry2d::from_translation(arena.to_world(pos.0)),
                Vec2::new(BOSS_WIDTH, BOSS_HEIGHT),
                boss_phase_color(boss.phase()),
            );
        }
    }

    if !image_ready(&images, &library.rock) {
        for pos in rocks.iter() {
            gizmos.rect_2d(
                Isometry2d::from_translation(arena.to_world(pos.0)),
                Vec2::splat(ROCK_SIZE),
                Color::srgb(0.5, 0.5, 0.5),
            );
        }
    }

    for (powerup, pos) in powerups.iter() {
        if !image_ready(&images, &library.powerup(powerup.kind)) {
            gizmos.circle_2d(arena.to_world(pos.0), POWERUP_SIZE, Color::WHITE);
        }
    }
}

/// Boss laser: yellow while charging, red once live.
pub fn laser_gizmo_system(
    mut gizmos: Gizmos,
    arena: Res<Arena>,
    bosses: Query<(&Boss, &Position)>,
) {
    for (boss, pos) in bosses.iter() {
        let Laser::Charging { angle, .. } = boss.laser else {
            continue;
        };
        let color = if boss.laser.is_live() {
            Color::srgb(1.0, 0.0, 0.0)
        } else {
            Color::srgb(1.0, 1.0, 0.0)
        };
        let end = pos.0 + heading(angle) * LASER_BEAM_LENGTH;
        gizmos.line_2d(arena.to_world(pos.0), arena.to_world(end), color);
    }
}

// ── Update: HUD ───────────────────────────────────────────────────────────────

/// Refresh the score and lives text when their sources change.
#[allow(clippy::type_complexity)]
pub fn hud_text_system(
    stats: Res<SessionStats>,
    vitals: Query<&PlayerVitals, Changed<PlayerVitals>>,
    mut score_text: Query<&mut Text, (With<HudScoreText>, Without<HudLivesText>)>,
    mut lives_text: Query<&mut Text, (With<HudLivesText>, Without<HudScoreText>)>,
) {
    if stats.is_changed() {
        for mut text in score_text.iter_mut() {
            *text = Text::new(format!("Score: {}", stats.score()));
        }
    }
    if let Some(vitals) = vitals.iter().next() {
        for mut text in lives_text.iter_mut() {
            *text = Text::new(format!("Lives: {}", vitals.lives));
        }
    }
}

/// Show the boss bar while a boss lives and size its fill to the health ratio.
pub fn boss_bar_system(
    bosses: Query<&Boss>,
    mut roots: Query<&mut Visibility, With<BossBarRoot>>,
    mut fills: Query<&mut Node, With<BossBarFill>>,
) {
    let boss = bosses.iter().next();
    let visibility = if boss.is_some() {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    for mut v in roots.iter_mut() {
        v.set_if_neq(visibility);
    }
    if let Some(boss) = boss {
        for mut node in fills.iter_mut() {
            node.width = Val::Percent(boss.health_ratio() * 100.0);
        }
    }
}

// ── Update: window ────────────────────────────────────────────────────────────

/// F toggles borderless fullscreen.
pub fn fullscreen_toggle_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    if !keys.just_pressed(KeyCode::KeyF) {
        return;
    }
    let Ok(mut window) = windows.single_mut() else {
        return;
    };
    window.mode = match window.mode {
        WindowMode::Windowed => WindowMode::BorderlessFullscreen(MonitorSelection::Current),
        _ => WindowMode::Windowed,
    };
}

/// Keep the [`Arena`] equal to the primary window's logical size.
pub fn arena_follow_window_system(
    windows: Query<&Window, (With<PrimaryWindow>, Changed<Window>)>,
    mut arena: ResMut<Arena>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let (width, height) = (window.width(), window.height());
    if width <= 0.0 || height <= 0.0 {
        return;
    }
    if arena.set_if_neq(Arena { width, height }) {
        debug!("Arena resized to {width}x{height}");
    }
}
