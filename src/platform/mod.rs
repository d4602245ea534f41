//! Platform abstraction layer
//!
//! The simulation never talks to a window or terminal directly. A `Backend`
//! supplies everything the frame loop needs from the outside world:
//! - Discrete input events (key down/up, quit), drained once per tick
//! - Held-key state, sampled once per tick
//! - A surface that rasterizes a flat list of draw commands
//! - A pacing clock that caps the loop rate

pub mod clock;
pub mod headless;
pub mod terminal;

use crate::error::Result;
use crate::sim::PixelRect;

/// Logical keys the games care about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    R,
    Space,
    Up,
    Down,
    Left,
    Right,
    Escape,
    Other,
}

/// Edge-triggered input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscreteEvent {
    Quit,
    KeyDown(Key),
    KeyUp(Key),
}

/// 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

/// Where a text command's position sits on the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    TopLeft,
    Center,
}

/// One primitive for the rasterizer
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole surface
    Clear(Color),
    FillRect { rect: PixelRect, color: Color },
    Text {
        text: String,
        x: i32,
        y: i32,
        color: Color,
        anchor: TextAnchor,
    },
}

/// The window/input/clock collaborator.
///
/// Constructed once at startup and passed by `&mut` into the frame loop.
pub trait Backend {
    /// All discrete events since the previous call, in arrival order
    fn poll_events(&mut self) -> Result<Vec<DiscreteEvent>>;

    fn is_key_held(&self, key: Key) -> bool;

    /// Rasterize one frame and show it
    fn present(&mut self, commands: &[DrawCommand]) -> Result<()>;

    /// Block until the next tick boundary at `target_hz`
    fn tick_pace(&mut self, target_hz: u32);
}
