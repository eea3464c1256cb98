//! Session settings
//!
//! Read from the JSON file named by `BEAM_BREAKER_SETTINGS`; anything missing
//! or unreadable falls back to defaults.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_BRICK_SPEED, MIN_BRICK_SPEED};

/// Session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Window size in pixels, used to map pointer positions into the world
    pub window_width: u32,
    pub window_height: u32,

    /// Brick speed level at startup (1-7)
    pub start_speed: u8,

    /// Seed for the brick spawner; a random one is drawn when absent
    pub seed: Option<u64>,

    // === Headless driver ===
    /// Frames to run before stopping
    pub session_frames: u64,
    /// Simulated frames per second
    pub frame_rate: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_width: 800,
            window_height: 600,
            start_speed: MIN_BRICK_SPEED,
            seed: None,
            session_frames: 3600,
            frame_rate: 60.0,
        }
    }
}

impl Settings {
    /// Environment variable naming the settings file
    pub const ENV_VAR: &'static str = "BEAM_BREAKER_SETTINGS";

    /// Parse settings from JSON and clamp them into range
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Pull every value back into its valid range
    pub fn sanitize(&mut self) {
        self.window_width = self.window_width.max(1);
        self.window_height = self.window_height.max(1);
        self.start_speed = self.start_speed.clamp(MIN_BRICK_SPEED, MAX_BRICK_SPEED);
        if !self.frame_rate.is_finite() || self.frame_rate <= 0.0 {
            self.frame_rate = Self::default().frame_rate;
        }
    }

    /// Load settings from the file named by [`Self::ENV_VAR`], or defaults
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_VAR) else {
            log::info!("Using default settings");
            return Self::default();
        };

        let json = match std::fs::read_to_string(&path) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("Could not read settings from {}: {}", path, err);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path);
                settings
            }
            Err(err) => {
                log::warn!("Ignoring invalid settings in {}: {}", path, err);
                Self::default()
            }
        }
    }
}
