//! Screen-space geometry shared by every entity kind.
//!
//! All gameplay coordinates are logical pixels with the origin at the top-left
//! corner of the arena and +y pointing down.  Only the presentation layer
//! converts to Bevy's centred, y-up world space (see [`Arena::to_world`]).

use crate::config::GameConfig;
use bevy::prelude::*;

/// Centre of an entity in screen space.
///
/// The render `Transform` is derived from this every frame; gameplay never
/// reads or writes `Transform`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Deref, DerefMut)]
#[require(Transform, Visibility)]
pub struct Position(pub Vec2);

/// Playable area; the gameplay bounds for clamping and off-screen checks.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

impl Arena {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            width: config.arena_width,
            height: config.arena_height,
        }
    }

    /// `true` when `p` lies strictly outside `[0, width] × [0, height]`.
    #[inline]
    pub fn is_outside(&self, p: Vec2) -> bool {
        p.x < 0.0 || p.x > self.width || p.y < 0.0 || p.y > self.height
    }

    /// Clamp `p` so a box of `half_extent` stays fully inside the arena.
    pub fn clamp_inside(&self, p: Vec2, half_extent: Vec2) -> Vec2 {
        // Arena smaller than the box: pin to the centre on that axis.
        let max = Vec2::new(self.width, self.height) - half_extent;
        Vec2::new(
            p.x.clamp(half_extent.x.min(max.x), max.x.max(half_extent.x)),
            p.y.clamp(half_extent.y.min(max.y), max.y.max(half_extent.y)),
        )
    }

    /// Convert a screen-space point to Bevy world space (centred, y-up).
    #[inline]
    pub fn to_world(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x - self.width * 0.5, self.height * 0.5 - p.y)
    }
}

/// Screen-space axis-aligned rectangle given by its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub min: Vec2,
    pub size: Vec2,
}

impl ScreenRect {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size * 0.5,
            size,
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Grow the rectangle by `margin` on every side.
    pub fn expanded(&self, margin: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(margin),
            size: self.size + Vec2::splat(margin * 2.0),
        }
    }

    /// Strict containment: points on the boundary are outside.
    pub fn contains_strict(&self, p: Vec2) -> bool {
        let max = self.max();
        p.x > self.min.x && p.x < max.x && p.y > self.min.y && p.y < max.y
    }

    /// Closest point of the rectangle (including its interior) to `p`.
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max())
    }
}

/// Angle of the vector from `from` to `to`, in screen space.
#[inline]
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Unit direction vector for `angle` (screen space, +y down).
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Perpendicular distance from `p` to the infinite line through `origin`
/// along `angle`.  Points behind `origin` measure to the line's extension.
pub fn distance_to_line(p: Vec2, origin: Vec2, angle: f32) -> f32 {
    (p - origin).perp_dot(heading(angle)).abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    #[test]
    fn closest_point_inside_is_identity() {
        let rect = ScreenRect::from_center(Vec2::new(100.0, 100.0), Vec2::new(180.0, 100.0));
        let p = Vec2::new(110.0, 90.0);
        assert_eq!(rect.closest_point(p), p);
    }

    #[test]
    fn closest_point_outside_lands_on_edge() {
        let rect = ScreenRect {
            min: Vec2::new(0.0, 0.0),
            size: Vec2::new(10.0, 10.0),
        };
        assert_eq!(rect.closest_point(Vec2::new(15.0, 5.0)), Vec2::new(10.0, 5.0));
        assert_eq!(rect.closest_point(Vec2::new(-3.0, -4.0)), Vec2::ZERO);
    }

    #[test]
    fn strict_containment_excludes_boundary() {
        let rect = ScreenRect {
            min: Vec2::ZERO,
            size: Vec2::splat(64.0),
        }
        .expanded(20.0);
        assert!(rect.contains_strict(Vec2::new(-19.0, 10.0)));
        assert!(!rect.contains_strict(Vec2::new(-20.0, 10.0)));
        assert!(!rect.contains_strict(Vec2::new(84.0, 10.0)));
    }

    #[test]
    fn line_distance_is_perpendicular_in_front() {
        // Line pointing straight down the screen.
        let d = distance_to_line(Vec2::new(15.0, 300.0), Vec2::ZERO, FRAC_PI_2);
        assert!((d - 15.0).abs() < 1e-4, "got {d}");
    }

    #[test]
    fn line_distance_covers_extension_behind_origin() {
        let d = distance_to_line(Vec2::new(0.0, -30.0), Vec2::ZERO, FRAC_PI_2);
        assert!(d.abs() < 1e-4, "got {d}");

        // Diagonal beam from (400, 120); (330, 50) sits on its back-extension.
        let d = distance_to_line(Vec2::new(330.0, 50.0), Vec2::new(400.0, 120.0), FRAC_PI_4);
        assert!(d < 1e-3, "got {d}");
    }

    #[test]
    fn angle_to_points_down_for_lower_target() {
        let a = angle_to(Vec2::new(10.0, 10.0), Vec2::new(10.0, 50.0));
        assert!((a - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn clamp_inside_respects_margins() {
        let arena = Arena {
            width: 800.0,
            height: 600.0,
        };
        let half = Vec2::new(30.0, 25.0);
        assert_eq!(arena.clamp_inside(Vec2::new(-50.0, 900.0), half), Vec2::new(30.0, 575.0));
    }

    #[test]
    fn outside_check_is_strict() {
        let arena = Arena {
            width: 800.0,
            height: 600.0,
        };
        assert!(!arena.is_outside(Vec2::new(800.0, 0.0)));
        assert!(arena.is_outside(Vec2::new(800.1, 0.0)));
        assert!(arena.is_outside(Vec2::new(10.0, -0.1)));
    }

    #[test]
    fn world_conversion_flips_y_about_centre() {
        let arena = Arena {
            width: 800.0,
            height: 600.0,
        };
        assert_eq!(arena.to_world(Vec2::new(0.0, 0.0)), Vec2::new(-400.0, 300.0));
        assert_eq!(arena.to_world(Vec2::new(400.0, 300.0)), Vec2::ZERO);
    }
}
