//! Grid snake: wrap-around movement, self-collision, food and score
//!
//! Phases: Running -> GameOver (self-collision) -> Running (restart).

use std::collections::VecDeque;

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::settings::SnakeSettings;

/// Random draws tried before falling back to an explicit free-cell scan
const FOOD_REJECTION_ATTEMPTS: u32 = 64;

/// Heading on the grid (y grows down)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step for this heading
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Outcome of a single movement step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Moved(IVec2),
    /// The next head cell is already part of the body; nothing changed
    Collided(IVec2),
}

/// The snake itself
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snake {
    /// Occupied cells, head first. Never contains duplicates.
    body: VecDeque<IVec2>,
    pub direction: Direction,
    pub grow_pending: bool,
}

impl Snake {
    /// Single-cell snake
    pub fn new(head: IVec2, direction: Direction) -> Self {
        Self {
            body: VecDeque::from([head]),
            direction,
            grow_pending: false,
        }
    }

    /// Snake with explicit cells (head first). Returns `None` if the cells
    /// are empty or contain a duplicate.
    pub fn with_body(cells: impl IntoIterator<Item = IVec2>, direction: Direction) -> Option<Self> {
        let body: VecDeque<IVec2> = cells.into_iter().collect();
        if body.is_empty() {
            return None;
        }
        for (i, cell) in body.iter().enumerate() {
            if body.iter().skip(i + 1).any(|other| other == cell) {
                return None;
            }
        }
        Some(Self {
            body,
            direction,
            grow_pending: false,
        })
    }

    pub fn head(&self) -> IVec2 {
        self.body[0]
    }

    pub fn body(&self) -> &VecDeque<IVec2> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn occupies(&self, cell: IVec2) -> bool {
        self.body.contains(&cell)
    }

    /// Turn unless it would reverse straight into the neck.
    /// Returns whether the heading changed.
    pub fn change_direction(&mut self, direction: Direction) -> bool {
        if direction == self.direction.opposite() {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Move one cell, wrapping at the grid edges.
    ///
    /// The collision check runs on the prospective head before it is
    /// inserted, and includes the current tail cell.
    pub fn step(&mut self, grid: IVec2) -> Step {
        let next = (self.head() + self.direction.delta()).rem_euclid(grid);
        if self.occupies(next) {
            return Step::Collided(next);
        }

        self.body.push_front(next);
        if self.grow_pending {
            self.grow_pending = false;
        } else {
            self.body.pop_back();
        }
        Step::Moved(next)
    }
}

/// Current phase of the snake game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnakePhase {
    Running,
    /// Frozen until restart
    GameOver,
}

/// Discrete commands, in key-down order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnakeCommand {
    Turn(Direction),
    Restart,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct SnakeInput {
    pub commands: Vec<SnakeCommand>,
}

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnakeEvent {
    Moved,
    Ate,
    Died,
    Restarted,
    /// Game over; nothing moves
    Idle,
}

/// Complete snake game state
#[derive(Debug, Clone)]
pub struct SnakeState {
    pub snake: Snake,
    /// `None` only once the snake fills the whole grid
    pub food: Option<IVec2>,
    pub score: u32,
    pub phase: SnakePhase,
    /// Grid size in cells
    pub grid: IVec2,
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
}

impl SnakeState {
    /// Create a fresh game on the configured grid
    pub fn new(settings: &SnakeSettings, seed: u64) -> Self {
        Self::with_grid(IVec2::new(settings.grid_width, settings.grid_height), seed)
    }

    /// Create a fresh game on a `grid` of cells
    pub fn with_grid(grid: IVec2, seed: u64) -> Self {
        let snake = Snake::new(grid / 2, Direction::Right);
        let mut state = Self {
            snake,
            food: None,
            score: 0,
            phase: SnakePhase::Running,
            grid,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.food = state.spawn_food();
        state
    }

    /// Replace the snake (and re-place food off it). Used to set up boards.
    pub fn set_snake(&mut self, snake: Snake) {
        self.snake = snake;
        if self.food.is_none_or(|food| self.snake.occupies(food)) {
            self.food = self.spawn_food();
        }
    }

    /// Fresh snake, food and score; the RNG keeps its stream
    pub fn restart(&mut self) {
        self.snake = Snake::new(self.grid / 2, Direction::Right);
        self.score = 0;
        self.phase = SnakePhase::Running;
        self.food = self.spawn_food();
        log::info!("snake restarted");
    }

    /// Pick a uniformly random cell not covered by the snake.
    ///
    /// Rejection sampling first; on a crowded board, enumerate the free cells
    /// and choose among them so the search always terminates.
    pub fn spawn_food(&mut self) -> Option<IVec2> {
        for _ in 0..FOOD_REJECTION_ATTEMPTS {
            let cell = IVec2::new(
                self.rng.random_range(0..self.grid.x),
                self.rng.random_range(0..self.grid.y),
            );
            if !self.snake.occupies(cell) {
                return Some(cell);
            }
        }

        let free: Vec<IVec2> = (0..self.grid.y)
            .flat_map(|y| (0..self.grid.x).map(move |x| IVec2::new(x, y)))
            .filter(|&cell| !self.snake.occupies(cell))
            .collect();
        log::debug!("food fallback scan: {} free cells", free.len());
        if free.is_empty() {
            log::info!("board full, no food to place");
            return None;
        }
        Some(free[self.rng.random_range(0..free.len())])
    }
}

/// Advance the game by one tick
pub fn tick(state: &mut SnakeState, input: &SnakeInput) -> SnakeEvent {
    let mut restarted = false;
    for command in &input.commands {
        match (*command, state.phase) {
            (SnakeCommand::Restart, _) => {
                state.restart();
                restarted = true;
            }
            (SnakeCommand::Turn(direction), SnakePhase::Running) => {
                state.snake.change_direction(direction);
            }
            (SnakeCommand::Turn(_), SnakePhase::GameOver) => {}
        }
    }

    if restarted {
        return SnakeEvent::Restarted;
    }
    if state.phase == SnakePhase::GameOver {
        return SnakeEvent::Idle;
    }

    let head = match state.snake.step(state.grid) {
        Step::Moved(head) => head,
        Step::Collided(cell) => {
            state.phase = SnakePhase::GameOver;
            log::info!(
                "game over: ran into itself at ({}, {}) with score {}",
                cell.x,
                cell.y,
                state.score
            );
            return SnakeEvent::Died;
        }
    };

    if state.food == Some(head) {
        state.snake.grow_pending = true;
        state.score += 1;
        state.food = state.spawn_food();
        log::debug!("ate food, score {} food {:?}", state.score, state.food);
        return SnakeEvent::Ate;
    }

    SnakeEvent::Moved
}
