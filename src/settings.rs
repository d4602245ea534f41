//! Game settings
//!
//! Physics, layout and pacing for both games. Every field has a default, so a
//! config file only needs the values it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::Result;
use crate::sim::{BulletPhysics, OverlapPolicy, PlatformerPhysics};

/// Environment variable naming a JSON settings file
pub const CONFIG_ENV: &str = "SUPER_MARIO_CONFIG";

/// Platformer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformerSettings {
    // === World ===
    pub width: f32,
    pub height: f32,
    /// Static platforms as (x, y, w, h), ground first
    pub platforms: Vec<(f32, f32, f32, f32)>,
    /// Which overlapping platform wins when several are hit in one pass
    pub overlap_policy: OverlapPolicy,

    // === Player ===
    pub player_spawn: (f32, f32),
    pub player_size: (f32, f32),
    pub gravity: f32,
    pub jump_speed: f32,
    pub move_speed: f32,

    // === Bullets ===
    pub bullet_speed: f32,
    pub bullet_size: f32,
    pub bullet_gravity_scale: f32,
    pub bullet_damping: f32,
    pub bullet_max_bounces: u32,
    pub muzzle_offset: f32,

    // === Pacing ===
    pub tick_hz: u32,
}

impl Default for PlatformerSettings {
    fn default() -> Self {
        Self {
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            platforms: PLATFORM_LAYOUT.to_vec(),
            overlap_policy: OverlapPolicy::IterationOrder,

            player_spawn: PLAYER_SPAWN,
            player_size: (PLAYER_WIDTH, PLAYER_HEIGHT),
            gravity: GRAVITY,
            jump_speed: JUMP_SPEED,
            move_speed: MOVE_SPEED,

            bullet_speed: BULLET_SPEED,
            bullet_size: BULLET_SIZE,
            bullet_gravity_scale: BULLET_GRAVITY_SCALE,
            bullet_damping: BULLET_BOUNCE_DAMPING,
            bullet_max_bounces: BULLET_MAX_BOUNCES,
            muzzle_offset: MUZZLE_OFFSET,

            tick_hz: PLATFORMER_HZ,
        }
    }
}

impl PlatformerSettings {
    /// Physics tunables handed to the simulation
    pub fn physics(&self) -> PlatformerPhysics {
        PlatformerPhysics {
            gravity: self.gravity,
            jump_speed: self.jump_speed,
            move_speed: self.move_speed,
            overlap_policy: self.overlap_policy,
            bullet: BulletPhysics {
                gravity: self.gravity * self.bullet_gravity_scale,
                speed: self.bullet_speed,
                size: self.bullet_size,
                damping: self.bullet_damping,
                max_bounces: self.bullet_max_bounces,
                muzzle_offset: self.muzzle_offset,
                overlap_policy: self.overlap_policy,
            },
        }
    }
}

/// Snake settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeSettings {
    /// Grid size in cells; must leave at least one free cell for food
    pub grid_width: i32,
    pub grid_height: i32,
    /// Pixel size of one cell
    pub cell_size: i32,
    /// Moves per second (also the render rate)
    pub tick_hz: u32,
    /// Fixed RNG seed; random per run when absent
    pub seed: Option<u64>,
}

impl Default for SnakeSettings {
    fn default() -> Self {
        Self {
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            cell_size: CELL_SIZE,
            tick_hz: SNAKE_HZ,
            seed: None,
        }
    }
}

impl SnakeSettings {
    /// The configured seed, or a fresh one from the thread RNG
    pub fn resolve_seed(&self) -> u64 {
        match self.seed {
            Some(seed) => seed,
            None => {
                let seed = rand::random();
                log::info!("snake seed {seed} (set \"seed\" in the config to replay)");
                seed
            }
        }
    }
}

/// All game settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub platformer: PlatformerSettings,
    pub snake: SnakeSettings,
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read settings from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings from the file named by `SUPER_MARIO_CONFIG`, falling
    /// back to defaults when unset or unreadable
    pub fn load() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV) else {
            log::info!("Using default settings");
            return Self::default();
        };

        let path = Path::new(&path);
        match Self::from_file(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring {}: {e}; using defaults", path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_json_overrides_only_named_fields() {
        let json = r#"{
            "platformer": { "gravity": 1.2, "overlap_policy": "min_penetration" },
            "snake": { "grid_width": 10, "seed": 42 }
        }"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.platformer.gravity, 1.2);
        assert_eq!(settings.platformer.overlap_policy, OverlapPolicy::MinPenetration);
        assert_eq!(settings.platformer.jump_speed, JUMP_SPEED);
        assert_eq!(settings.snake.grid_width, 10);
        assert_eq!(settings.snake.grid_height, GRID_HEIGHT);
        assert_eq!(settings.snake.resolve_seed(), 42);
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let err = Settings::from_json("{ \"snake\": ").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::from_file(Path::new("/nonexistent/super-mario.json")).unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }

    #[test]
    fn test_physics_scales_bullet_gravity() {
        let physics = PlatformerSettings::default().physics();
        assert!((physics.bullet.gravity - 0.4).abs() < 1e-6);
        assert_eq!(physics.bullet.max_bounces, 5);
        assert_eq!(physics.jump_speed, -15.0);
    }

    #[test]
    fn test_default_grid_matches_window() {
        let snake = SnakeSettings::default();
        assert_eq!((snake.grid_width, snake.grid_height), (40, 30));
        assert_eq!(snake.tick_hz, 10);
    }
}
