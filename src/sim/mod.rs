//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (layout order for platforms, spawn order for bullets)
//! - No rendering or platform dependencies

pub mod body;
pub mod bullet;
pub mod collision;
pub mod platformer;
pub mod rect;
pub mod snake;

pub use body::{Body, Player};
pub use bullet::{Bullet, BulletFate, BulletPhysics};
pub use collision::{Contact, OverlapPolicy, Response, resolve_horizontal, resolve_vertical};
pub use platformer::{PlatformerAction, PlatformerPhysics, PlatformerState, TickInput, TickReport};
pub use rect::{PixelRect, Rect};
pub use snake::{
    Direction, Snake, SnakeCommand, SnakeEvent, SnakeInput, SnakePhase, SnakeState, Step,
};
