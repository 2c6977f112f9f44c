//! The engine surface offered to front-ends: editing, seeding, stepping and persistence

use super::scheduler::{RunState, Scheduler, SharedGrid, DEFAULT_SPEED_MS};
use crate::config::Settings;
use crate::error::EngineResult;
use crate::game_of_life::patterns::{DEFAULT_DENSITY, DEFAULT_EXTENT};
use crate::game_of_life::{self as life, Cell, CellState, Grid, Pattern, Region, Rule, StepReport, SteppingEngine};
use parking_lot::Mutex;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

/// A grid together with the scheduler that steps it.
///
/// Operations that rewrite many cells at once (patterns, random fills, manual
/// steps) pause the scheduler first and restart it only when the caller
/// passes [`RunState::Running`].
pub struct Game {
    grid: SharedGrid,
    scheduler: Scheduler,
    rng: ChaCha8Rng,
    density: f64,
    extent: usize,
}

impl Game {
    pub fn new(width: usize, height: usize) -> Self {
        let grid = Arc::new(Mutex::new(Grid::new(width, height)));
        Self {
            scheduler: Scheduler::with_speed(Arc::clone(&grid), DEFAULT_SPEED_MS),
            grid,
            rng: ChaCha8Rng::from_entropy(),
            density: DEFAULT_DENSITY,
            extent: DEFAULT_EXTENT,
        }
    }

    /// Create a game whose listed cells start alive
    pub fn with_live_cells<I>(width: usize, height: usize, cells: I) -> Self
    where
        I: IntoIterator<Item = (i64, i64)>,
    {
        let game = Self::new(width, height);
        {
            let mut grid = game.grid.lock();
            for (x, y) in cells {
                grid.set(x, y, CellState::Alive);
            }
        }
        game
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut game = Self::new(settings.grid.width, settings.grid.height);
        game.grid.lock().set_rule(settings.simulation.rule);
        game.scheduler.change_speed(settings.simulation.speed_ms, RunState::Paused);
        game.density = settings.seeding.density;
        game.extent = settings.seeding.extent;
        if let Some(seed) = settings.seeding.seed {
            game.rng = ChaCha8Rng::seed_from_u64(seed);
        }
        game
    }

    /// Handle to the shared grid, for renderers
    pub fn grid(&self) -> SharedGrid {
        Arc::clone(&self.grid)
    }

    /// Run `f` against the grid under its lock
    pub fn with_grid<R>(&self, f: impl FnOnce(&Grid) -> R) -> R {
        f(&self.grid.lock())
    }

    pub fn width(&self) -> usize {
        self.grid.lock().width()
    }

    pub fn height(&self) -> usize {
        self.grid.lock().height()
    }

    fn center(&self) -> (i64, i64) {
        let grid = self.grid.lock();
        ((grid.width() / 2) as i64, (grid.height() / 2) as i64)
    }

    pub fn get(&self, x: i64, y: i64) -> Cell {
        self.grid.lock().get(x, y)
    }

    pub fn set(&self, x: i64, y: i64, state: CellState) -> bool {
        self.grid.lock().set(x, y, state)
    }

    pub fn toggle(&self, x: i64, y: i64) -> CellState {
        self.grid.lock().toggle(x, y)
    }

    pub fn generation(&self) -> u64 {
        self.grid.lock().generation()
    }

    pub fn live_count(&self) -> usize {
        self.grid.lock().live_count()
    }

    pub fn run_state(&self) -> RunState {
        self.scheduler.run_state()
    }

    pub fn speed(&self) -> u64 {
        self.scheduler.speed()
    }

    pub fn start(&mut self) {
        self.scheduler.start();
    }

    pub fn stop(&mut self) {
        self.scheduler.stop();
    }

    pub fn change_speed(&mut self, speed_ms: u64, run_state: RunState) {
        self.scheduler.change_speed(speed_ms, run_state);
    }

    pub fn reset(&mut self) {
        self.scheduler.reset();
    }

    fn resume(&mut self, run_state: RunState) {
        if run_state == RunState::Running {
            self.scheduler.start();
        }
    }

    pub fn rule(&self) -> Rule {
        self.grid.lock().rule()
    }

    /// Select a rule by index. An unknown index leaves the current rule in place.
    pub fn select_rule(&self, index: usize) -> EngineResult<Rule> {
        let rule = Rule::from_index(index).inspect_err(|e| tracing::warn!(error = %e, "rule selection rejected"))?;
        self.set_rule(rule);
        Ok(rule)
    }

    /// Takes effect from the next step; a step in progress keeps its rule
    pub fn set_rule(&self, rule: Rule) {
        self.grid.lock().set_rule(rule);
        tracing::info!(rule = %rule, "rule selected");
    }

    /// Place `pattern` at `origin`, or relative to the grid centre when no origin is given
    pub fn add_pattern(&mut self, pattern: Pattern, origin: Option<(i64, i64)>, run_state: RunState) {
        self.scheduler.stop();
        let origin = origin.unwrap_or_else(|| self.center());
        pattern.place(&mut self.grid.lock(), origin);
        self.resume(run_state);
    }

    pub fn add_glider(&mut self, origin: Option<(i64, i64)>, run_state: RunState) {
        self.add_pattern(Pattern::Glider, origin, run_state);
    }

    pub fn add_glider_gun(&mut self, origin: Option<(i64, i64)>, run_state: RunState) {
        self.add_pattern(Pattern::GliderGun, origin, run_state);
    }

    pub fn add_pentomino(&mut self, origin: Option<(i64, i64)>, run_state: RunState) {
        self.add_pattern(Pattern::FPentomino, origin, run_state);
    }

    /// Randomise `region`, or the default square around the grid centre.
    ///
    /// Returns how many cells were made alive.
    pub fn random_fill(&mut self, region: Option<Region>, run_state: RunState) -> usize {
        self.scheduler.stop();
        let center = self.center();
        let alive = {
            let mut grid = self.grid.lock();
            let region = region.unwrap_or_else(|| Region::centered(&grid, center, self.extent));
            life::random_fill(&mut grid, region, self.density, &mut self.rng)
        };
        self.resume(run_state);
        alive
    }

    /// Advance exactly one generation, leaving the scheduler paused
    pub fn step_once(&mut self) -> StepReport {
        self.scheduler.stop();
        SteppingEngine::step(&mut self.grid.lock())
    }

    pub fn export_live_cells(&self) -> String {
        life::export_live_cells(&self.grid.lock())
    }

    /// Additively import `x,y` records, returning how many were applied
    pub fn import_live_cells(&self, text: &str) -> EngineResult<usize> {
        life::import_live_cells(&mut self.grid.lock(), text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    #[test]
    fn test_with_live_cells() {
        let game = Game::with_live_cells(10, 10, [(1, 1), (2, 1), (-4, 9)]);
        assert_eq!(game.live_count(), 3);
        assert!(game.get(0, 9).is_alive());
        assert_eq!(game.get(1, 2).neighbors, 2);
    }

    #[test]
    fn test_select_rule() {
        let game = Game::new(5, 5);
        assert_eq!(game.select_rule(3).unwrap(), Rule::S34B3);
        assert_eq!(game.rule(), Rule::S34B3);

        assert_eq!(game.select_rule(7), Err(EngineError::InvalidRule { index: 7 }));
        assert_eq!(game.rule(), Rule::S34B3);
    }

    #[test]
    fn test_add_pattern_respects_run_state() {
        let mut game = Game::new(60, 60);

        game.add_glider(Some((0, 0)), RunState::Paused);
        assert_eq!(game.run_state(), RunState::Paused);
        assert_eq!(game.live_count(), 5);

        game.change_speed(1000, RunState::Paused);
        game.add_glider_gun(Some((10, 10)), RunState::Running);
        assert_eq!(game.run_state(), RunState::Running);
        game.stop();
        assert_eq!(game.live_count(), 41);
    }

    #[test]
    fn test_default_origin_is_grid_center() {
        let mut game = Game::new(100, 100);
        game.add_pentomino(None, RunState::Paused);
        assert!(game.get(50 + 38, 50 + 24).is_alive());
        assert!(game.get(50 + 40, 50 + 23).is_alive());
    }

    #[test]
    fn test_random_fill_uses_settings() {
        let mut settings = Settings::default();
        settings.grid.width = 40;
        settings.grid.height = 40;
        settings.seeding.density = 1.0;
        settings.seeding.extent = 10;
        settings.seeding.seed = Some(5);

        let mut game = Game::from_settings(&settings);
        let alive = game.random_fill(None, RunState::Paused);

        assert_eq!(alive, 100);
        assert!(game.get(15, 15).is_alive());
        assert!(!game.get(14, 15).is_alive());
        assert!(game.with_grid(Grid::neighbor_cache_consistent));
    }

    #[test]
    fn test_step_once_pauses() {
        let mut game = Game::with_live_cells(5, 5, [(1, 2), (2, 2), (3, 2)]);
        game.change_speed(1000, RunState::Paused);
        game.start();

        let report = game.step_once();

        assert_eq!(game.run_state(), RunState::Paused);
        assert_eq!(report.generation, 1);
        assert!(game.get(2, 1).is_alive());
    }

    #[test]
    fn test_reset() {
        let mut game = Game::with_live_cells(8, 8, [(3, 3), (4, 4)]);
        game.start();
        game.reset();

        assert_eq!(game.run_state(), RunState::Paused);
        assert_eq!(game.live_count(), 0);
        assert_eq!(game.generation(), 0);
    }

    #[test]
    fn test_export_import() {
        let mut game = Game::new(30, 30);
        game.add_glider(Some((4, 4)), RunState::Paused);
        let text = game.export_live_cells();

        let fresh = Game::new(30, 30);
        assert_eq!(fresh.import_live_cells(&text).unwrap(), 5);
        assert_eq!(fresh.export_live_cells(), text);
    }

    #[test]
    fn test_from_settings() {
        let mut settings = Settings::default();
        settings.simulation.rule = Rule::S13B3;
        settings.simulation.speed_ms = 120;

        let game = Game::from_settings(&settings);
        assert_eq!(game.rule(), Rule::S13B3);
        assert_eq!(game.speed(), 120);
        assert_eq!(game.width(), 500);
    }
}
