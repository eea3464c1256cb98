//! Beam Breaker - a falling-brick arcade game with a mirror-reflecting beam
//!
//! Core modules:
//! - `sim`: Simulation core (entities, game state, input mapping, collisions)
//! - `renderer`: Presentation boundary (presenter trait, meshes, camera, digits)
//! - `settings`: Configuration loaded from JSON

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;
pub use sim::{FrameTime, GameState, SimError, Simulation, tick};

use glam::Vec2;

/// Game configuration constants (world units, degrees, seconds)
pub mod consts {
    /// World half extents; the camera never shows anything outside these
    pub const WORLD_HALF_WIDTH: f32 = 400.0;
    pub const WORLD_HALF_HEIGHT: f32 = 300.0;

    /// Falling bricks
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_WIDTH: f32 = 10.0;
    pub const BRICK_SPAWN_Y: f32 = 310.0;
    /// Spawn x is drawn uniformly from `BRICK_SPAWN_X_MIN..=BRICK_SPAWN_X_MAX`
    pub const BRICK_SPAWN_X_MIN: i32 = -210;
    pub const BRICK_SPAWN_X_MAX: i32 = 289;
    /// Bricks below this line are tested against the buckets
    pub const CATCH_LINE_Y: f32 = -240.0;
    /// Bricks below this line are gone for good
    pub const OFFSCREEN_Y: f32 = -350.0;
    /// Base spawn interval; each speed level shortens it by `SPAWN_INTERVAL_STEP`
    pub const SPAWN_INTERVAL_BASE: f64 = 2.0;
    pub const SPAWN_INTERVAL_STEP: f64 = 0.25;

    pub const MIN_BRICK_SPEED: u8 = 1;
    pub const MAX_BRICK_SPEED: u8 = 7;

    /// Buckets
    pub const BUCKET_Y: f32 = -275.0;
    pub const BUCKET_HEIGHT: f32 = 50.0;
    pub const BUCKET_WIDTH: f32 = 100.0;
    pub const BUCKET_LIMIT: f32 = 340.0;
    pub const BUCKET_STEP: f32 = 10.0;

    /// Gun: parts are stored relative to the pivot at `GUN_PIVOT_X`
    pub const GUN_PIVOT_X: f32 = -375.0;
    pub const GUN_ELEVATION_MIN: f32 = -150.0;
    pub const GUN_ELEVATION_MAX: f32 = 200.0;
    pub const GUN_ELEVATION_STEP: f32 = 10.0;
    pub const GUN_TILT_STEP: f32 = 10.0;
    pub const ARM_ANGLE_LIMIT: f32 = 60.0;
    /// The base rotator sits this far ahead of the arm
    pub const ROTATOR_OFFSET: f32 = 45.0;
    /// Distance from the pivot to where a fired beam appears
    pub const MUZZLE_DISTANCE: f32 = 70.0;
    pub const FIRE_COOLDOWN: f64 = 1.0;

    /// Beams
    pub const BEAM_SPEED: f32 = 10.0;
    pub const BEAM_LENGTH: f32 = 30.0;
    pub const BEAM_THICKNESS: f32 = 1.0;

    /// Mirrors: a tip closer than this to the mirror line is touching it
    pub const MIRROR_LINE_TOLERANCE: f32 = 10.0 * std::f32::consts::FRAC_1_SQRT_2;
    /// ...as long as it is also this close to the mirror center
    pub const MIRROR_REACH: f32 = MIRROR_LINE_TOLERANCE + BEAM_LENGTH / 2.0;

    /// Scoring
    pub const CATCH_POINTS: u32 = 10;
    pub const BLACK_HIT_POINTS: u32 = 10;
    pub const WRONG_HIT_PENALTY: u32 = 5;
    pub const STARTING_LIVES: u8 = 3;

    /// Camera
    pub const ZOOM_FACTOR: f32 = 1.1;
    pub const MIN_ZOOM: f32 = 1.0;
    pub const PAN_STEP: f32 = 10.0;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if a >= 360.0 { 0.0 } else { a }
}

/// Unit vector for a heading given in degrees
#[inline]
pub fn heading(angle_deg: f32) -> Vec2 {
    let rad = angle_deg.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_degrees_wraps_both_ways() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert!((normalize_degrees(-90.0) - 270.0).abs() < 1e-4);
        assert!((normalize_degrees(765.0) - 45.0).abs() < 1e-4);
    }

    #[test]
    fn heading_points_along_angle() {
        let right = heading(0.0);
        assert!((right.x - 1.0).abs() < 1e-6 && right.y.abs() < 1e-6);
        let up = heading(90.0);
        assert!(up.x.abs() < 1e-6 && (up.y - 1.0).abs() < 1e-6);
    }
}
