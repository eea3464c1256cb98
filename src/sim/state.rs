//! Game state and the owned simulation context

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::EntityStore;
use super::error::SimError;
use super::layout;
use crate::consts::*;
use crate::renderer::Presenter;
use crate::settings::Settings;

/// What the left pointer button is currently holding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Grab {
    #[default]
    None,
    RedBucket,
    BlueBucket,
    /// Dragging the gun up and down
    GunElevation,
    /// Aiming the arm; releasing fires
    ArmAim,
}

/// The two catchers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bucket {
    Red,
    Blue,
}

impl Bucket {
    pub fn name(self) -> &'static str {
        match self {
            Bucket::Red => layout::RED_BUCKET,
            Bucket::Blue => layout::BLUE_BUCKET,
        }
    }

    pub fn highlight_name(self) -> &'static str {
        match self {
            Bucket::Red => layout::RED_BUCKET_LIGHT,
            Bucket::Blue => layout::BLUE_BUCKET_LIGHT,
        }
    }

    pub fn grab(self) -> Grab {
        match self {
            Bucket::Red => Grab::RedBucket,
            Bucket::Blue => Grab::BlueBucket,
        }
    }
}

/// Direction of a single input step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Plus,
    Minus,
}

impl Sign {
    #[inline]
    pub fn value(self) -> f32 {
        match self {
            Sign::Plus => 1.0,
            Sign::Minus => -1.0,
        }
    }
}

/// Orthographic camera over the 800x600 world
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Magnification, never below 1.0
    pub zoom: f32,
    /// Center of the view in world units
    pub offset: Vec2,
    /// Window size in pixels
    pub viewport: Vec2,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec2::new(2.0 * WORLD_HALF_WIDTH, 2.0 * WORLD_HALF_HEIGHT))
    }
}

impl Camera {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            zoom: 1.0,
            offset: Vec2::ZERO,
            viewport: viewport.max(Vec2::ONE),
        }
    }

    /// Half of the visible world area
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(WORLD_HALF_WIDTH, WORLD_HALF_HEIGHT) / self.zoom
    }

    pub fn zoom_in(&mut self) {
        self.zoom *= ZOOM_FACTOR;
        self.clamp_offset();
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / ZOOM_FACTOR).max(MIN_ZOOM);
        self.clamp_offset();
    }

    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
        self.clamp_offset();
    }

    /// Pull the offset back so the view never shows anything outside the world
    pub fn clamp_offset(&mut self) {
        let half = self.half_extents();
        let world = Vec2::new(WORLD_HALF_WIDTH, WORLD_HALF_HEIGHT);
        if half.x + self.offset.x > world.x {
            self.offset.x = world.x - half.x;
        }
        if -half.x + self.offset.x < -world.x {
            self.offset.x = -world.x + half.x;
        }
        if half.y + self.offset.y > world.y {
            self.offset.y = world.y - half.y;
        }
        if -half.y + self.offset.y < -world.y {
            self.offset.y = -world.y + half.y;
        }
    }

    /// World units per window pixel along each axis (y flipped)
    fn units_per_pixel(&self) -> Vec2 {
        let half = self.half_extents();
        Vec2::new(2.0 * half.x / self.viewport.x, -2.0 * half.y / self.viewport.y)
    }

    /// Window pixel (origin top-left, y down) to world position
    pub fn unproject(&self, pixel: Vec2) -> Vec2 {
        let from_center = pixel - self.viewport / 2.0;
        self.offset + from_center * self.units_per_pixel()
    }

    /// World position to window pixel
    pub fn project(&self, world: Vec2) -> Vec2 {
        (world - self.offset) / self.units_per_pixel() + self.viewport / 2.0
    }

    /// A pixel-space offset in world units at zoom 1 (y flipped)
    pub fn pixels_to_world(&self, delta: Vec2) -> Vec2 {
        delta * self.units_per_pixel() * self.zoom
    }

    /// One frame of a held pan drag. The view moves against the pointer's
    /// offset from the press point, faster the further the pointer has gone.
    pub fn drag_pan(&mut self, anchor: Vec2, pointer: Vec2) {
        self.pan(-self.pixels_to_world(pointer - anchor));
    }
}

/// Scalar game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed the brick spawner was started from
    pub seed: u64,
    /// Fall speed level, units per frame
    pub brick_speed: u8,
    pub score: u32,
    pub lives: u8,
    pub game_over: bool,
    /// Next beam / brick name suffix
    pub beam_index: u32,
    pub brick_index: u32,
    pub last_beam_time: f64,
    /// Cleared on fire, set again once the cooldown has passed
    pub weapon_ready: bool,
    pub last_spawn_time: f64,
    pub camera: Camera,
    /// Last pointer position in window pixels
    pub pointer: Vec2,
    pub grab: Grab,
    /// Pixel position the right button was pressed at, while it is held
    pub pan_anchor: Option<Vec2>,
    pub quit_requested: bool,
    /// Simulated frames so far
    pub frames: u64,
}

impl GameState {
    pub fn new(seed: u64, brick_speed: u8, viewport: Vec2, now: f64) -> Self {
        Self {
            seed,
            brick_speed: brick_speed.clamp(MIN_BRICK_SPEED, MAX_BRICK_SPEED),
            score: 0,
            lives: STARTING_LIVES,
            game_over: false,
            beam_index: 0,
            brick_index: 0,
            last_beam_time: now,
            weapon_ready: true,
            last_spawn_time: now,
            camera: Camera::new(viewport),
            pointer: Vec2::ZERO,
            grab: Grab::None,
            pan_anchor: None,
            quit_requested: false,
            frames: 0,
        }
    }

    /// Seconds between brick spawns at the current speed level
    pub fn spawn_interval(&self) -> f64 {
        SPAWN_INTERVAL_BASE - f64::from(self.brick_speed) * SPAWN_INTERVAL_STEP
    }

    pub fn step_brick_speed(&mut self, sign: Sign) {
        self.brick_speed = match sign {
            Sign::Plus => self.brick_speed.saturating_add(1),
            Sign::Minus => self.brick_speed.saturating_sub(1),
        }
        .clamp(MIN_BRICK_SPEED, MAX_BRICK_SPEED);
    }

    pub fn award(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Shooting a colored brick costs points and a life; running out of lives
    /// ends the game. Returns true if this ended the game.
    pub fn penalize(&mut self) -> bool {
        self.score = self.score.saturating_sub(WRONG_HIT_PENALTY);
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 && !self.game_over {
            self.game_over = true;
            return true;
        }
        false
    }

    /// Pointer position in world units
    pub fn pointer_world(&self) -> Vec2 {
        self.camera.unproject(self.pointer)
    }

    /// Apply this frame's share of a held right-button pan
    pub fn hold_pan(&mut self) {
        if let Some(anchor) = self.pan_anchor {
            self.camera.drag_pan(anchor, self.pointer);
        }
    }
}

/// Everything one game session owns
#[derive(Debug)]
pub struct Simulation {
    pub store: EntityStore,
    pub state: GameState,
    rng: Pcg32,
}

impl Simulation {
    /// Build the playfield fixtures and start a session at time `now`
    pub fn new(gfx: &mut impl Presenter, settings: &Settings, now: f64) -> Result<Self, SimError> {
        let seed = settings.seed.unwrap_or_else(rand::random);
        let viewport = Vec2::new(settings.window_width as f32, settings.window_height as f32);

        let mut store = EntityStore::new();
        layout::populate(&mut store, gfx)?;

        log::info!(
            "Session started (seed {}, speed level {})",
            seed,
            settings.start_speed
        );

        Ok(Self {
            store,
            state: GameState::new(seed, settings.start_speed, viewport, now),
            rng: Pcg32::seed_from_u64(seed),
        })
    }

    pub(crate) fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_interval_shrinks_with_speed() {
        let mut state = GameState::new(1, 1, Vec2::new(800.0, 600.0), 0.0);
        assert!((state.spawn_interval() - 1.75).abs() < 1e-9);
        state.brick_speed = 7;
        assert!((state.spawn_interval() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn brick_speed_is_clamped() {
        let mut state = GameState::new(1, 1, Vec2::new(800.0, 600.0), 0.0);
        state.step_brick_speed(Sign::Minus);
        assert_eq!(state.brick_speed, 1);
        for _ in 0..20 {
            state.step_brick_speed(Sign::Plus);
        }
        assert_eq!(state.brick_speed, 7);
    }

    #[test]
    fn penalty_floors_score_and_ends_game() {
        let mut state = GameState::new(1, 1, Vec2::new(800.0, 600.0), 0.0);
        state.score = 3;
        assert!(!state.penalize());
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 2);
        assert!(!state.penalize());
        assert!(state.penalize());
        assert!(state.game_over);
        assert_eq!(state.lives, 0);
    }

    #[test]
    fn zoom_never_goes_below_one() {
        let mut cam = Camera::default();
        cam.zoom_out();
        assert_eq!(cam.zoom, 1.0);
        cam.zoom_in();
        cam.zoom_in();
        cam.zoom_out();
        cam.zoom_out();
        cam.zoom_out();
        assert_eq!(cam.zoom, 1.0);
    }

    #[test]
    fn pan_is_clamped_to_world() {
        let mut cam = Camera::default();
        // At zoom 1 the whole world is visible; panning cannot move it
        cam.pan(Vec2::new(50.0, -50.0));
        assert_eq!(cam.offset, Vec2::ZERO);

        cam.zoom_in();
        cam.zoom_in();
        for _ in 0..100 {
            cam.pan(Vec2::new(10.0, 10.0));
        }
        let half = cam.half_extents();
        assert!((cam.offset.x + half.x - 400.0).abs() < 1e-3);
        assert!((cam.offset.y + half.y - 300.0).abs() < 1e-3);
    }

    #[test]
    fn unproject_inverts_project() {
        let mut cam = Camera::new(Vec2::new(800.0, 600.0));
        assert_eq!(cam.unproject(Vec2::new(400.0, 300.0)), Vec2::ZERO);
        assert_eq!(cam.unproject(Vec2::new(0.0, 0.0)), Vec2::new(-400.0, 300.0));

        cam.zoom_in();
        cam.pan(Vec2::new(20.0, -10.0));
        let world = Vec2::new(37.0, -81.0);
        let back = cam.unproject(cam.project(world));
        assert!((back - world).length() < 1e-3);
    }
}
