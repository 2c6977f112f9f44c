//! Dense cell grid with cached neighbor counts

use super::Rule;
use itertools::iproduct;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Relative positions of the 8 Moore neighbors
pub const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Upper bound of a Moore neighborhood count
pub const MAX_NEIGHBORS: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellState {
    Alive,
    #[default]
    Dead,
}

impl CellState {
    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }

    /// The opposite state
    pub fn flipped(self) -> Self {
        match self {
            CellState::Alive => CellState::Dead,
            CellState::Dead => CellState::Alive,
        }
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive {
            CellState::Alive
        } else {
            CellState::Dead
        }
    }
}

/// A cell's state together with the cached count of its live neighbors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cell {
    pub state: CellState,
    pub neighbors: u8,
}

impl Cell {
    pub fn is_alive(&self) -> bool {
        self.state.is_alive()
    }
}

/// Fixed-size Game of Life board.
///
/// Every state change goes through [`Grid::set`], which keeps each cell's
/// `neighbors` equal to the number of live cells around it. Positions off the
/// board count as permanently dead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    rule: Rule,
    generation: u64,
}

impl Grid {
    /// Create an all-dead grid.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero. `Settings::validate` rejects such
    /// boards before a grid is built from configuration.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be non-zero, got {}x{}", width, height);
        Self {
            width,
            height,
            cells: vec![Cell::default(); width * height],
            rule: Rule::default(),
            generation: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn rule(&self) -> Rule {
        self.rule
    }

    pub fn set_rule(&mut self, rule: Rule) {
        self.rule = rule;
    }

    /// Number of generations applied since creation or the last [`Grid::clear`]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn advance_generation(&mut self) {
        self.generation += 1;
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Board position of `(x, y)`, or `None` when it lies off the board
    fn position(&self, x: i64, y: i64) -> Option<(usize, usize)> {
        let in_range = x >= 0 && y >= 0 && (x as u64) < self.width as u64 && (y as u64) < self.height as u64;
        in_range.then(|| (x as usize, y as usize))
    }

    /// Nearest on-board position, clamping each axis independently
    pub fn clamp(&self, x: i64, y: i64) -> (usize, usize) {
        let clamp_axis = |v: i64, len: usize| v.clamp(0, len as i64 - 1) as usize;
        (clamp_axis(x, self.width), clamp_axis(y, self.height))
    }

    /// Read a cell. Off-board coordinates yield a dead cell with no neighbors.
    pub fn get(&self, x: i64, y: i64) -> Cell {
        match self.position(x, y) {
            Some((x, y)) => self.cells[self.index(x, y)],
            None => Cell::default(),
        }
    }

    /// Write a cell state, clamping off-board coordinates to the nearest edge cell.
    ///
    /// Returns `true` when the state actually changed, in which case the
    /// neighbor counts around the cell have been adjusted.
    pub fn set(&mut self, x: i64, y: i64, state: CellState) -> bool {
        let (x, y) = self.clamp(x, y);
        let idx = self.index(x, y);
        if self.cells[idx].state == state {
            return false;
        }
        self.cells[idx].state = state;
        self.update_neighbors(x, y, state);
        true
    }

    /// Flip a cell, with the same clamping as [`Grid::set`]
    pub fn toggle(&mut self, x: i64, y: i64) -> CellState {
        let (cx, cy) = self.clamp(x, y);
        let next = self.cells[self.index(cx, cy)].state.flipped();
        self.set(cx as i64, cy as i64, next);
        next
    }

    fn update_neighbors(&mut self, x: usize, y: usize, state: CellState) {
        for (dx, dy) in NEIGHBOR_OFFSETS {
            let Some((nx, ny)) = self.position(x as i64 + dx, y as i64 + dy) else {
                continue;
            };
            let idx = self.index(nx, ny);
            let cell = &mut self.cells[idx];
            cell.neighbors = match state {
                CellState::Alive => (cell.neighbors + 1).min(MAX_NEIGHBORS),
                CellState::Dead => cell.neighbors.saturating_sub(1),
            };
        }
    }

    /// Kill every cell through [`Grid::set`] and restart the generation count
    pub fn clear(&mut self) {
        for (x, y) in iproduct!(0..self.width, 0..self.height) {
            self.set(x as i64, y as i64, CellState::Dead);
        }
        self.generation = 0;
    }

    /// Count living neighbors by inspecting the board, ignoring the cache
    pub fn count_neighbors(&self, x: i64, y: i64) -> u8 {
        NEIGHBOR_OFFSETS
            .iter()
            .filter(|(dx, dy)| self.get(x + dx, y + dy).is_alive())
            .count() as u8
    }

    /// Check that every cached neighbor count matches a fresh count
    pub fn neighbor_cache_consistent(&self) -> bool {
        iproduct!(0..self.width as i64, 0..self.height as i64)
            .all(|(x, y)| self.get(x, y).neighbors == self.count_neighbors(x, y))
    }

    /// Copy of every cell, row-major
    pub fn snapshot(&self) -> Vec<Cell> {
        self.cells.clone()
    }

    /// Coordinates `(x, y)` of all living cells, row-major
    pub fn live_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_alive())
            .map(|(i, _)| (i % self.width, i / self.width))
            .collect()
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_alive())
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                let symbol = if self.cells[self.index(x, y)].is_alive() { "⬛" } else { "⬜" };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
