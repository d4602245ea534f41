//! Snake entry point
//!
//! WASD or arrows steer, R restarts. Esc or q quits.

use super_mario::frame_loop;
use super_mario::games::SnakeGame;
use super_mario::platform::terminal::TerminalBackend;
use super_mario::{Result, Settings};

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Snake starting...");

    let settings = Settings::load().snake;
    let mut game = SnakeGame::new(&settings);
    let width = (settings.grid_width * settings.cell_size) as f32;
    let height = (settings.grid_height * settings.cell_size) as f32;
    let mut backend = TerminalBackend::new(width, height)?;

    let stats = frame_loop::run(&mut game, &mut backend)?;
    drop(backend);
    log::info!(
        "Snake exiting after {} ticks, final score {}",
        stats.ticks,
        game.state.score
    );
    Ok(())
}
