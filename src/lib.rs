//! Super Mario - a gravity platformer and a wrap-around snake
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, collisions, bullets, snake)
//! - `frame_loop`: Fixed-rate loop driving a game against a backend
//! - `platform`: Window/input/pacing collaborator contract and backends
//! - `renderer`: Game state to flat draw command lists
//! - `settings`: Data-driven physics and layout configuration

pub mod error;
pub mod frame_loop;
pub mod games;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use settings::{PlatformerSettings, Settings, SnakeSettings};

/// Game configuration constants
pub mod consts {
    /// Play area in pixels (both games)
    pub const WINDOW_WIDTH: f32 = 800.0;
    pub const WINDOW_HEIGHT: f32 = 600.0;

    /// Platformer tick rate
    pub const PLATFORMER_HZ: u32 = 60;
    /// Downward acceleration (pixels/tick²)
    pub const GRAVITY: f32 = 0.8;
    /// Vertical velocity applied by a jump (negative is up)
    pub const JUMP_SPEED: f32 = -15.0;
    /// Horizontal displacement per tick while a move key is held
    pub const MOVE_SPEED: f32 = 5.0;

    /// Player spawn and size
    pub const PLAYER_SPAWN: (f32, f32) = (100.0, 300.0);
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;

    /// Bullet defaults
    pub const BULLET_SPEED: f32 = 10.0;
    pub const BULLET_SIZE: f32 = 10.0;
    /// Multiplier on reflected velocity after a bounce
    pub const BULLET_BOUNCE_DAMPING: f32 = 0.7;
    /// Bullets feel half the player's gravity
    pub const BULLET_GRAVITY_SCALE: f32 = 0.5;
    pub const BULLET_MAX_BOUNCES: u32 = 5;
    /// Lateral spawn offset from the shooter's center
    pub const MUZZLE_OFFSET: f32 = 20.0;

    /// Ground plus floating platforms as (x, y, w, h)
    pub const PLATFORM_LAYOUT: [(f32, f32, f32, f32); 4] = [
        (0.0, 550.0, 800.0, 50.0),
        (300.0, 400.0, 200.0, 20.0),
        (100.0, 300.0, 200.0, 20.0),
        (500.0, 200.0, 200.0, 20.0),
    ];

    /// Snake tick rate (also its movement speed)
    pub const SNAKE_HZ: u32 = 10;
    /// Pixel size of one grid cell
    pub const CELL_SIZE: i32 = 20;
    pub const GRID_WIDTH: i32 = WINDOW_WIDTH as i32 / CELL_SIZE;
    pub const GRID_HEIGHT: i32 = WINDOW_HEIGHT as i32 / CELL_SIZE;
}
