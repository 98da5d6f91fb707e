//! Explosion particles.
//!
//! ## Design
//!
//! Particles are lightweight ECS entities with a [`Particle`] component that
//! stores motion, remaining life and colour.  The pipeline is split between
//! the fixed-step simulation and presentation:
//!
//! | System                        | Schedule              | Purpose                                      |
//! |-------------------------------|-----------------------|----------------------------------------------|
//! | `particle_advance_system`     | `FixedUpdate/Advance` | Move, age by one tick, despawn at zero life  |
//! | `attach_particle_mesh_system` | `Update`              | Attach `Mesh2d` to freshly spawned particles |
//! | `particle_fade_system`        | `Update`              | Alpha = remaining life / full life           |
//!
//! Particles are spawned by [`spawn_explosion`], which takes only
//! `&mut Commands`; the mesh arrives one frame later, which is imperceptible
//! at 60 Hz.  A single shared unit-circle mesh [`ParticleMesh`] is created at
//! plugin startup and scaled per particle; each particle gets its own
//! [`ColorMaterial`] so its alpha can fade individually.

use crate::constants::{PARTICLE_LIFE, PARTICLE_SIZE, PARTICLE_SPREAD};
use crate::geometry::Position;
use crate::session::SessionEntity;
use bevy::prelude::*;
use rand::Rng;

// ── Resources ────────────────────────────────────────────────────────────────

/// Shared unit circle mesh used by all particle entities.
#[derive(Resource)]
pub struct ParticleMesh(pub Handle<Mesh>);

// ── Component ────────────────────────────────────────────────────────────────

/// Short-lived cosmetic particle.
#[derive(Component, Debug, Clone)]
pub struct Particle {
    /// Screen-space displacement per tick.
    pub velocity: Vec2,
    /// Ticks left; the entity is despawned when this reaches 0.
    pub life: u32,
    /// Disc radius in pixels.
    pub size: f32,
    pub color: Color,
    /// This particle's own material, set by `attach_particle_mesh_system`.
    pub material: Option<Handle<ColorMaterial>>,
}

impl Particle {
    /// Opacity in `[0, 1]`, linear in remaining life.
    #[inline]
    pub fn alpha(&self) -> f32 {
        self.life as f32 / PARTICLE_LIFE as f32
    }
}

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Presentation half of the particle pipeline.
pub struct ParticlesPlugin;

impl Plugin for ParticlesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, init_particle_mesh).add_systems(
            Update,
            (attach_particle_mesh_system, particle_fade_system).chain(),
        );
    }
}

fn init_particle_mesh(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    let handle = meshes.add(Circle::new(1.0));
    commands.insert_resource(ParticleMesh(handle));
}

// ── Spawn helper ──────────────────────────────────────────────────────────────

/// Burst of `count` particles at `at`, each with a random velocity in
/// `±PARTICLE_SPREAD` per axis.
pub fn spawn_explosion(commands: &mut Commands, at: Vec2, count: u32, color: Color) {
    let mut rng = rand::thread_rng();
    for _ in 0..count {
        let velocity = Vec2::new(
            rng.gen_range(-PARTICLE_SPREAD..PARTICLE_SPREAD),
            rng.gen_range(-PARTICLE_SPREAD..PARTICLE_SPREAD),
        );
        commands.spawn((
            Particle {
                velocity,
                life: PARTICLE_LIFE,
                size: PARTICLE_SIZE,
                color,
                material: None,
            },
            Position(at),
            SessionEntity,
        ));
    }
}

/// Orange burst for a destroyed enemy.
pub fn enemy_explosion_color() -> Color {
    Color::srgb(1.0, 0.65, 0.0)
}

/// Red burst for the defeated boss.
pub fn boss_explosion_color() -> Color {
    Color::srgb(1.0, 0.0, 0.0)
}

// ── Fixed-step system ─────────────────────────────────────────────────────────

/// Move every particle, age it by one tick and despawn it once spent.
pub fn particle_advance_system(
    mut commands: Commands,
    mut query: Query<(Entity, &mut Particle, &mut Position)>,
) {
    for (entity, mut particle, mut pos) in query.iter_mut() {
        pos.0 += particle.velocity;
        particle.life = particle.life.saturating_sub(1);
        if particle.life == 0 {
            commands.entity(entity).despawn();
        }
    }
}

// ── Presentation systems ──────────────────────────────────────────────────────

/// Attach `Mesh2d` + `MeshMaterial2d` to every newly spawned [`Particle`].
pub fn attach_particle_mesh_system(
    mut commands: Commands,
    particle_mesh: Res<ParticleMesh>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut query: Query<(Entity, &mut Particle, &mut Transform), Added<Particle>>,
) {
    for (entity, mut particle, mut transform) in query.iter_mut() {
        let mat_handle = materials.add(ColorMaterial::from_color(particle.color));
        particle.material = Some(mat_handle.clone());
        transform.scale = Vec3::splat(particle.size);
        commands
            .entity(entity)
            .insert((Mesh2d(particle_mesh.0.clone()), MeshMaterial2d(mat_handle)));
    }
}

/// Fade each particle's material with its remaining life.
pub fn particle_fade_system(
    mut materials: ResMut<Assets<ColorMaterial>>,
    query: Query<&Particle, Changed<Particle>>,
) {
    for particle in query.iter() {
        if let Some(ref handle) = particle.material {
            if let Some(mat) = materials.get_mut(handle) {
                mat.color = particle.color.with_alpha(particle.alpha());
            }
        }
    }
}
