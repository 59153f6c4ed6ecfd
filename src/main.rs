use std::{fs::File, sync::Mutex};

use anyhow::{Context, Result};
use snake::game::SnakeGame;
use snake::term::TermManager;

fn main() -> Result<()> {
    init_logging()?;

    // The terminal is handed back when `game` drops, on every exit path.
    let term = TermManager::setup()?;
    let mut game = SnakeGame::new(term, rand::thread_rng())?;
    game.run().context("terminal I/O failed mid-game")?;

    Ok(())
}

/// stdout is the game screen, so logs only go to the file named by `SNAKE_LOG`.
fn init_logging() -> Result<()> {
    let Some(path) = std::env::var_os("SNAKE_LOG") else {
        return Ok(());
    };

    let file = File::create(&path)
        .with_context(|| format!("failed to create log file {}", path.to_string_lossy()))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .init();
    Ok(())
}
