//! Generation stepping with simultaneous-update semantics

use super::{CellState, Grid, Rule};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Outcome of a single generation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    pub generation: u64,
    pub births: usize,
    pub deaths: usize,
    pub population: usize,
}

impl StepReport {
    /// True when the step changed no cell
    pub fn is_stable(&self) -> bool {
        self.births == 0 && self.deaths == 0
    }
}

/// Applies generation transitions to a [`Grid`]
pub struct SteppingEngine;

impl SteppingEngine {
    /// Advance the grid one generation under its selected rule
    pub fn step(grid: &mut Grid) -> StepReport {
        let rule = grid.rule();
        Self::step_with_rule(grid, rule)
    }

    /// Advance the grid one generation under `rule`.
    ///
    /// Every decision is taken from a snapshot made before any cell changes,
    /// so the order in which flips are committed cannot influence the result.
    pub fn step_with_rule(grid: &mut Grid, rule: Rule) -> StepReport {
        let width = grid.width();
        let snapshot = grid.snapshot();

        let flips: Vec<(usize, CellState)> = snapshot
            .par_iter()
            .enumerate()
            .filter_map(|(i, cell)| {
                let next = rule.next_state(cell.state, cell.neighbors);
                (next != cell.state).then_some((i, next))
            })
            .collect();

        let mut report = StepReport::default();
        for (i, next) in flips {
            let (x, y) = ((i % width) as i64, (i / width) as i64);
            grid.set(x, y, next);
            match next {
                CellState::Alive => report.births += 1,
                CellState::Dead => report.deaths += 1,
            }
        }

        grid.advance_generation();
        report.generation = grid.generation();
        report.population = grid.live_count();

        tracing::trace!(
            generation = report.generation,
            births = report.births,
            deaths = report.deaths,
            population = report.population,
            "step applied"
        );
        report
    }

    /// Advance the grid for multiple generations, returning the last report
    pub fn step_n(grid: &mut Grid, generations: usize) -> StepReport {
        let mut report = StepReport {
            generation: grid.generation(),
            population: grid.live_count(),
            ..StepReport::default()
        };
        for _ in 0..generations {
            report = Self::step(grid);
        }
        report
    }
}
