//! Scene building: game state to a flat list of draw commands
//!
//! Reads state only. The backend does the actual rasterizing.

use crate::platform::{Color, DrawCommand, TextAnchor};
use crate::sim::{PixelRect, PlatformerState, SnakePhase, SnakeState};

/// Colors for game elements
pub mod colors {
    use crate::platform::Color;

    pub const SKY: Color = Color(135, 206, 235);
    pub const PLATFORM: Color = Color(139, 69, 19);
    pub const PLAYER: Color = Color(255, 0, 0);
    pub const BULLET: Color = Color(255, 255, 0);

    pub const BOARD: Color = Color(0, 0, 0);
    pub const SNAKE_HEAD: Color = Color(0, 255, 0);
    pub const SNAKE_BODY: Color = Color(0, 200, 0);
    pub const FOOD: Color = Color(255, 0, 0);
    pub const TEXT: Color = Color(255, 255, 255);
}

pub const GAME_OVER_MESSAGE: &str = "Game Over! Press R to restart";

/// Platforms, then the player, then bullets on top
pub fn platformer_scene(state: &PlatformerState, out: &mut Vec<DrawCommand>) {
    out.push(DrawCommand::Clear(colors::SKY));
    for platform in state.platforms() {
        fill(out, platform.to_pixels(), colors::PLATFORM);
    }
    fill(out, state.player.body.rect().to_pixels(), colors::PLAYER);
    for bullet in &state.bullets {
        fill(out, bullet.body.rect().to_pixels(), colors::BULLET);
    }
}

/// Board, snake (head brighter), food, score, and the game-over overlay
pub fn snake_scene(state: &SnakeState, cell_size: i32, out: &mut Vec<DrawCommand>) {
    out.push(DrawCommand::Clear(colors::BOARD));

    for (i, cell) in state.snake.body().iter().enumerate() {
        let color = if i == 0 {
            colors::SNAKE_HEAD
        } else {
            colors::SNAKE_BODY
        };
        fill(out, cell_rect(cell.x, cell.y, cell_size), color);
    }

    if let Some(food) = state.food {
        fill(out, cell_rect(food.x, food.y, cell_size), colors::FOOD);
    }

    out.push(DrawCommand::Text {
        text: format!("Score: {}", state.score),
        x: 10,
        y: 10,
        color: colors::TEXT,
        anchor: TextAnchor::TopLeft,
    });

    if state.phase == SnakePhase::GameOver {
        out.push(DrawCommand::Text {
            text: GAME_OVER_MESSAGE.to_string(),
            x: state.grid.x * cell_size / 2,
            y: state.grid.y * cell_size / 2,
            color: colors::TEXT,
            anchor: TextAnchor::Center,
        });
    }
}

/// One-pixel gap between cells
fn cell_rect(x: i32, y: i32, cell_size: i32) -> PixelRect {
    PixelRect::new(x * cell_size, y * cell_size, cell_size - 1, cell_size - 1)
}

#[inline]
fn fill(out: &mut Vec<DrawCommand>, rect: PixelRect, color: Color) {
    out.push(DrawCommand::FillRect { rect, color });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::PlatformerSettings;
    use glam::IVec2;

    fn texts(commands: &[DrawCommand]) -> Vec<&str> {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_platformer_scene_order() {
        let mut state = PlatformerState::new(&PlatformerSettings::default());
        state.fire();
        let mut out = Vec::new();
        platformer_scene(&state, &mut out);

        // clear + 4 platforms + player + 1 bullet
        assert_eq!(out.len(), 7);
        assert_eq!(out[0], DrawCommand::Clear(colors::SKY));
        assert_eq!(
            out[1],
            DrawCommand::FillRect {
                rect: PixelRect::new(0, 550, 800, 50),
                color: colors::PLATFORM
            }
        );
        assert!(matches!(out[5], DrawCommand::FillRect { color: colors::PLAYER, .. }));
        assert!(matches!(out[6], DrawCommand::FillRect { color: colors::BULLET, .. }));
        assert!(texts(&out).is_empty());
    }

    #[test]
    fn test_snake_scene_score_and_overlay() {
        let mut state = SnakeState::with_grid(IVec2::new(40, 30), 3);
        state.score = 7;
        let mut out = Vec::new();
        snake_scene(&state, 20, &mut out);
        assert_eq!(texts(&out), vec!["Score: 7"]);
        assert_eq!(
            out[1],
            DrawCommand::FillRect {
                rect: PixelRect::new(400, 300, 19, 19),
                color: colors::SNAKE_HEAD
            }
        );

        state.phase = SnakePhase::GameOver;
        out.clear();
        snake_scene(&state, 20, &mut out);
        assert_eq!(texts(&out), vec!["Score: 7", GAME_OVER_MESSAGE]);
    }
}
