//! Platformer world state and its fixed-step tick
//!
//! The world is three typed collections: one player, an immutable platform
//! set, and the live bullets. Each system walks its own collection.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Player;
use super::bullet::{Bullet, BulletFate, BulletPhysics};
use super::collision::{OverlapPolicy, Response, resolve_vertical};
use super::rect::Rect;
use crate::settings::PlatformerSettings;

/// Player tunables
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformerPhysics {
    pub gravity: f32,
    pub jump_speed: f32,
    pub move_speed: f32,
    pub overlap_policy: OverlapPolicy,
    pub bullet: BulletPhysics,
}

/// Edge-triggered actions, one per key-down event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformerAction {
    Jump,
    Fire,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Discrete actions in the order their key-down events arrived
    pub actions: Vec<PlatformerAction>,
    /// Held-key state sampled this tick
    pub move_left: bool,
    pub move_right: bool,
}

/// What happened during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub jumped: bool,
    pub fired: u32,
    pub expired: u32,
    pub landed: bool,
}

/// Complete platformer world
#[derive(Debug, Clone)]
pub struct PlatformerState {
    pub player: Player,
    /// Fixed at creation; read through [`PlatformerState::platforms`]
    platforms: Box<[Rect]>,
    pub bullets: Vec<Bullet>,
    /// Play area; bullets leaving it expire
    pub bounds: Rect,
    pub physics: PlatformerPhysics,
    /// Simulation tick counter
    pub time_ticks: u64,
    next_id: u32,
}

impl PlatformerState {
    /// Build the world described by `settings`
    pub fn new(settings: &PlatformerSettings) -> Self {
        let player = Player::new(
            Vec2::from(settings.player_spawn),
            Vec2::from(settings.player_size),
        );
        let platforms = settings
            .platforms
            .iter()
            .map(|&(x, y, w, h)| Rect::new(x, y, w, h))
            .collect();
        let bounds = Rect::new(0.0, 0.0, settings.width, settings.height);
        Self::with_world(player, platforms, bounds, settings.physics())
    }

    /// Build a world from explicit parts
    pub fn with_world(
        player: Player,
        platforms: Vec<Rect>,
        bounds: Rect,
        physics: PlatformerPhysics,
    ) -> Self {
        Self {
            player,
            platforms: platforms.into_boxed_slice(),
            bullets: Vec::new(),
            bounds,
            physics,
            time_ticks: 0,
            next_id: 1,
        }
    }

    pub fn platforms(&self) -> &[Rect] {
        &self.platforms
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn a bullet from the player. Returns its id.
    pub fn fire(&mut self) -> u32 {
        let id = self.next_entity_id();
        let bullet = Bullet::fire(id, &self.player, &self.physics.bullet);
        log::debug!(
            "bullet {id} fired at ({:.0}, {:.0}) vx={}",
            bullet.body.pos.x,
            bullet.body.pos.y,
            bullet.body.vel.x
        );
        self.bullets.push(bullet);
        id
    }
}

/// Advance the world by one tick
pub fn tick(state: &mut PlatformerState, input: &TickInput) -> TickReport {
    let mut report = TickReport::default();
    state.time_ticks += 1;

    for action in &input.actions {
        match action {
            PlatformerAction::Jump => {
                report.jumped |= state.player.jump(state.physics.jump_speed);
            }
            PlatformerAction::Fire => {
                state.fire();
                report.fired += 1;
            }
        }
    }

    let speed = state.physics.move_speed;
    if input.move_left {
        state.player.walk(-speed);
    }
    if input.move_right {
        state.player.walk(speed);
    }

    // --- PLAYER: gravity, vertical motion, vertical collision only ---
    let player = &mut state.player;
    player.body.apply_gravity(state.physics.gravity);
    player.body.integrate_y();
    player.on_ground = false;
    let contact = resolve_vertical(
        &mut player.body,
        &state.platforms,
        Response::Stop,
        state.physics.overlap_policy,
    );
    player.on_ground = contact.landed;
    report.landed = contact.landed;

    // --- BULLETS ---
    let platforms = &state.platforms;
    let bounds = state.bounds;
    let bullet_physics = state.physics.bullet;
    let live_before = state.bullets.len();
    state.bullets.retain_mut(|bullet| {
        match bullet.update(platforms, &bounds, &bullet_physics) {
            BulletFate::Alive => true,
            fate => {
                log::debug!(
                    "bullet {} expired ({fate:?}) after {} bounces",
                    bullet.id,
                    bullet.bounces
                );
                false
            }
        }
    });
    report.expired = (live_before - state.bullets.len()) as u32;

    report
}
