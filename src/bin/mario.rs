//! Platformer entry point
//!
//! W jumps, Space fires, A/D walk. Esc or q quits.

use super_mario::frame_loop;
use super_mario::games::PlatformerGame;
use super_mario::platform::terminal::TerminalBackend;
use super_mario::{Result, Settings};

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Super Mario starting...");

    let settings = Settings::load().platformer;
    let mut game = PlatformerGame::new(&settings);
    let mut backend = TerminalBackend::new(settings.width, settings.height)?;

    let stats = frame_loop::run(&mut game, &mut backend)?;
    drop(backend);
    log::info!("Super Mario exiting after {} ticks", stats.ticks);
    Ok(())
}
