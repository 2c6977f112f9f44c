//! Life-like Cellular Automaton Engine
//!
//! This library simulates Conway's Game of Life and related birth/survival
//! rules on a fixed-size board, with a timed stepping loop, seed patterns and
//! a plain-text live-cell format.

pub mod config;
pub mod error;
pub mod game_of_life;
pub mod simulation;
pub mod utils;

pub use config::Settings;
pub use error::{EngineError, EngineResult};
pub use game_of_life::{Cell, CellState, Grid, Pattern, Region, Rule, StepReport, SteppingEngine};
pub use simulation::{Game, RunState, Scheduler};

use anyhow::Result;

/// Build a paused game from a settings file, optionally seeded from a live-cell file
pub fn load_game(settings: &Settings, live_cells: Option<&std::path::Path>) -> Result<Game> {
    settings.validate()?;
    let game = Game::from_settings(settings);
    if let Some(path) = live_cells {
        let applied = game_of_life::load_live_cells(&mut game.grid().lock(), path)?;
        tracing::info!(applied, path = %path.display(), "live cells loaded");
    }
    Ok(game)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_game_with_live_cells() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("cells.txt");
        std::fs::write(&path, "1,1\n2,1\n").unwrap();

        let mut settings = Settings::default();
        settings.grid.width = 10;
        settings.grid.height = 10;
        let game = load_game(&settings, Some(path.as_path())).unwrap();

        assert_eq!(game.live_count(), 2);
        assert!(game.get(2, 1).is_alive());
        assert!(load_game(&settings, Some(temp_dir.path().join("missing.txt").as_path())).is_err());
    }
}
