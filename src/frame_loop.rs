//! Fixed-rate frame loop
//!
//! One iteration, strictly in order: drain discrete events, sample held
//! keys and advance the game, draw, then wait for the next tick boundary.
//! A quit event lets the current iteration finish before the loop returns.

use crate::error::Result;
use crate::platform::{Backend, DiscreteEvent, DrawCommand, Key};

/// A game the loop can drive
pub trait FrameGame {
    /// Iterations per second
    fn tick_hz(&self) -> u32;

    /// Edge-triggered key press, called once per KeyDown event in order
    fn key_down(&mut self, key: Key);

    /// Advance one tick; `held` reports keys currently down
    fn update(&mut self, held: &dyn Fn(Key) -> bool);

    /// Append this frame's draw commands
    fn draw(&self, out: &mut Vec<DrawCommand>);
}

/// Counters from a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub ticks: u64,
    pub events: u64,
}

/// Run `game` against `backend` until a quit event arrives
pub fn run<G: FrameGame, B: Backend>(game: &mut G, backend: &mut B) -> Result<LoopStats> {
    let mut stats = LoopStats::default();
    let mut commands = Vec::new();

    loop {
        let mut quit = false;
        for event in backend.poll_events()? {
            stats.events += 1;
            match event {
                DiscreteEvent::Quit => quit = true,
                DiscreteEvent::KeyDown(key) => game.key_down(key),
                DiscreteEvent::KeyUp(_) => {}
            }
        }

        game.update(&|key| backend.is_key_held(key));
        stats.ticks += 1;

        commands.clear();
        game.draw(&mut commands);
        backend.present(&commands)?;

        if quit {
            log::info!("quit after {} ticks", stats.ticks);
            return Ok(stats);
        }

        backend.tick_pace(game.tick_hz());
    }
}
