//! Space Vibes: a 2D arcade shooter.
//!
//! The player holds the bottom of the screen against descending enemies,
//! falling rocks and, after thirty seconds, a three-phase boss.  Gameplay runs
//! headless in [`simulation::SimulationPlugin`]; everything that needs a
//! window lives in [`rendering::PresentationPlugin`], [`menu::MenuPlugin`],
//! [`audio::SoundPlugin`] and [`particles::ParticlesPlugin`].

pub mod audio;
pub mod boss;
pub mod collision;
pub mod config;
pub mod constants;
pub mod enemy;
pub mod error;
pub mod geometry;
pub mod graphics;
pub mod menu;
pub mod particles;
pub mod player;
pub mod powerup;
pub mod projectile;
pub mod rendering;
pub mod rock;
pub mod session;
pub mod simulation;
pub mod spawner;

#[cfg(test)]
mod test_utils;
