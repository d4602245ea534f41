//! Scripted backend for running games without a terminal
//!
//! Each call to `poll_events` pops the next pre-recorded frame of events.
//! Once the script runs out the backend reports `Quit`. Held keys follow the
//! KeyDown/KeyUp events it has handed out.

use std::collections::{HashSet, VecDeque};

use super::{Backend, DiscreteEvent, DrawCommand, Key};
use crate::error::Result;

#[derive(Debug, Default)]
pub struct ScriptedBackend {
    frames: VecDeque<Vec<DiscreteEvent>>,
    held: HashSet<Key>,
    /// Every frame presented, oldest first
    pub presented: Vec<Vec<DrawCommand>>,
    /// Rate passed to each `tick_pace` call
    pub paced: Vec<u32>,
}

impl ScriptedBackend {
    pub fn new(frames: impl IntoIterator<Item = Vec<DiscreteEvent>>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Frames still queued
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl Backend for ScriptedBackend {
    fn poll_events(&mut self) -> Result<Vec<DiscreteEvent>> {
        let events = self.frames.pop_front().unwrap_or_else(|| vec![DiscreteEvent::Quit]);
        for event in &events {
            match event {
                DiscreteEvent::KeyDown(key) => {
                    self.held.insert(*key);
                }
                DiscreteEvent::KeyUp(key) => {
                    self.held.remove(key);
                }
                DiscreteEvent::Quit => {}
            }
        }
        Ok(events)
    }

    fn is_key_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    fn present(&mut self, commands: &[DrawCommand]) -> Result<()> {
        self.presented.push(commands.to_vec());
        Ok(())
    }

    fn tick_pace(&mut self, target_hz: u32) {
        self.paced.push(target_hz);
    }
}
