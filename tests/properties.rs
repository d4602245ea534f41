//! Property tests for simulation invariants

use std::collections::HashSet;

use glam::{IVec2, Vec2};
use proptest::prelude::*;
use super_mario::PlatformerSettings;
use super_mario::sim::platformer::{self, PlatformerState, TickInput};
use super_mario::sim::snake::{self, SnakeCommand, SnakeInput, SnakeState};
use super_mario::sim::{Body, Bullet, Direction, Player, Rect, Snake};

fn command(code: u8) -> Option<SnakeCommand> {
    match code {
        0 => Some(SnakeCommand::Turn(Direction::Up)),
        1 => Some(SnakeCommand::Turn(Direction::Down)),
        2 => Some(SnakeCommand::Turn(Direction::Left)),
        3 => Some(SnakeCommand::Turn(Direction::Right)),
        4 => Some(SnakeCommand::Restart),
        _ => None,
    }
}

fn direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

fn ground_world(player: Player) -> PlatformerState {
    PlatformerState::with_world(
        player,
        vec![Rect::new(0.0, 550.0, 800.0, 50.0)],
        Rect::new(0.0, 0.0, 800.0, 600.0),
        PlatformerSettings::default().physics(),
    )
}

proptest! {
    #[test]
    fn snake_body_never_has_duplicates(
        seed in any::<u64>(),
        codes in prop::collection::vec(0u8..12, 1..400),
    ) {
        // Small board so the snake grows into itself often
        let mut state = SnakeState::with_grid(IVec2::new(6, 5), seed);
        for code in codes {
            let input = SnakeInput { commands: command(code).into_iter().collect() };
            snake::tick(&mut state, &input);

            let body = state.snake.body();
            let unique: HashSet<_> = body.iter().collect();
            prop_assert_eq!(unique.len(), body.len());
            for cell in body {
                prop_assert!(cell.x >= 0 && cell.x < 6 && cell.y >= 0 && cell.y < 5);
            }
            if let Some(food) = state.food {
                prop_assert!(!state.snake.occupies(food));
            }
        }
    }

    #[test]
    fn reverse_turn_never_changes_direction(start in direction(), head in (0i32..40, 0i32..30)) {
        let mut snake = Snake::new(IVec2::new(head.0, head.1), start);
        prop_assert!(!snake.change_direction(start.opposite()));
        prop_assert_eq!(snake.direction, start);
    }

    #[test]
    fn score_never_decreases_without_restart(
        seed in any::<u64>(),
        codes in prop::collection::vec(0u8..4, 1..200),
    ) {
        let mut state = SnakeState::with_grid(IVec2::new(8, 8), seed);
        let mut last = 0;
        for code in codes {
            let input = SnakeInput { commands: command(code).into_iter().collect() };
            snake::tick(&mut state, &input);
            prop_assert!(state.score >= last);
            last = state.score;
        }
    }

    #[test]
    fn player_never_ends_inside_the_ground(
        x in 0f32..770.0,
        bottom in 300f32..549.0,
        vel_y in -20f32..20.0,
    ) {
        let mut player = Player::new(Vec2::new(x, bottom - 50.0), Vec2::new(30.0, 50.0));
        player.body.vel.y = vel_y;
        let mut state = ground_world(player);

        for _ in 0..120 {
            platformer::tick(&mut state, &TickInput::default());
            let rect = state.player.body.rect();
            prop_assert!(!rect.overlaps(&state.platforms()[0]));
        }
        prop_assert!(state.player.on_ground);
        prop_assert_eq!(state.player.body.rect().bottom(), 550.0);
    }

    #[test]
    fn airborne_jump_is_a_no_op(y in 0f32..400.0, vel_y in -20f32..20.0) {
        let mut player = Player::new(Vec2::new(100.0, y), Vec2::new(30.0, 50.0));
        player.body.vel.y = vel_y;
        player.on_ground = false;
        prop_assert!(!player.jump(-15.0));
        prop_assert_eq!(player.body.vel.y, vel_y);
    }

    #[test]
    fn bullet_bounces_at_most_once_per_tick(
        pos in (50f32..750.0, 50f32..500.0),
        vel in (-10f32..10.0, -10f32..10.0),
    ) {
        let settings = PlatformerSettings::default();
        let mut state = PlatformerState::new(&settings);
        let mut body = Body::new(Vec2::new(pos.0, pos.1), Vec2::splat(10.0));
        body.vel = Vec2::new(vel.0, vel.1);
        state.bullets.push(Bullet { id: 1000, body, bounces: 0, max_bounces: 5 });

        for _ in 0..300 {
            let Some(before) = state.bullets.iter().find(|b| b.id == 1000).map(|b| b.bounces) else {
                break;
            };
            platformer::tick(&mut state, &TickInput::default());
            if let Some(bullet) = state.bullets.iter().find(|b| b.id == 1000) {
                prop_assert!(bullet.bounces == before || bullet.bounces == before + 1);
                prop_assert!(bullet.bounces < bullet.max_bounces);
            }
        }
    }
}
