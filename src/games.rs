//! Key bindings and per-game glue between the frame loop and the simulation
//!
//! Platformer: W / Up jump, Space fires, A / D or Left / Right walk.
//! Snake: WASD or arrows steer, R restarts.

use crate::frame_loop::FrameGame;
use crate::platform::{DrawCommand, Key};
use crate::renderer;
use crate::settings::{PlatformerSettings, SnakeSettings};
use crate::sim::{
    Direction, PlatformerAction, PlatformerState, SnakeCommand, SnakeInput, SnakeState, TickInput,
    platformer, snake,
};

pub struct PlatformerGame {
    pub state: PlatformerState,
    tick_hz: u32,
    /// Actions from this tick's key-down events
    pending: Vec<PlatformerAction>,
}

impl PlatformerGame {
    pub fn new(settings: &PlatformerSettings) -> Self {
        Self {
            state: PlatformerState::new(settings),
            tick_hz: settings.tick_hz,
            pending: Vec::new(),
        }
    }
}

impl FrameGame for PlatformerGame {
    fn tick_hz(&self) -> u32 {
        self.tick_hz
    }

    fn key_down(&mut self, key: Key) {
        match key {
            Key::W | Key::Up => self.pending.push(PlatformerAction::Jump),
            Key::Space => self.pending.push(PlatformerAction::Fire),
            _ => {}
        }
    }

    fn update(&mut self, held: &dyn Fn(Key) -> bool) {
        let input = TickInput {
            actions: std::mem::take(&mut self.pending),
            move_left: held(Key::A) || held(Key::Left),
            move_right: held(Key::D) || held(Key::Right),
        };
        platformer::tick(&mut self.state, &input);
    }

    fn draw(&self, out: &mut Vec<DrawCommand>) {
        renderer::platformer_scene(&self.state, out);
    }
}

pub struct SnakeGame {
    pub state: SnakeState,
    cell_size: i32,
    tick_hz: u32,
    pending: Vec<SnakeCommand>,
}

impl SnakeGame {
    pub fn new(settings: &SnakeSettings) -> Self {
        Self::with_seed(settings, settings.resolve_seed())
    }

    pub fn with_seed(settings: &SnakeSettings, seed: u64) -> Self {
        Self {
            state: SnakeState::new(settings, seed),
            cell_size: settings.cell_size,
            tick_hz: settings.tick_hz,
            pending: Vec::new(),
        }
    }
}

impl FrameGame for SnakeGame {
    fn tick_hz(&self) -> u32 {
        self.tick_hz
    }

    fn key_down(&mut self, key: Key) {
        let command = match key {
            Key::W | Key::Up => SnakeCommand::Turn(Direction::Up),
            Key::S | Key::Down => SnakeCommand::Turn(Direction::Down),
            Key::A | Key::Left => SnakeCommand::Turn(Direction::Left),
            Key::D | Key::Right => SnakeCommand::Turn(Direction::Right),
            Key::R => SnakeCommand::Restart,
            _ => return,
        };
        self.pending.push(command);
    }

    fn update(&mut self, _held: &dyn Fn(Key) -> bool) {
        let input = SnakeInput {
            commands: std::mem::take(&mut self.pending),
        };
        snake::tick(&mut self.state, &input);
    }

    fn draw(&self, out: &mut Vec<DrawCommand>) {
        renderer::snake_scene(&self.state, self.cell_size, out);
    }
}
