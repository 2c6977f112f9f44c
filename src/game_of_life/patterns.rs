//! Named seed patterns and random fills

use super::{CellState, Grid};
use itertools::iproduct;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const GLIDER: [(i64, i64); 5] = [(3, 2), (4, 3), (4, 4), (3, 4), (2, 4)];

const F_PENTOMINO: [(i64, i64); 5] = [(38, 24), (39, 25), (39, 24), (39, 23), (40, 23)];

// Gosper glider gun
const GLIDER_GUN: [(i64, i64); 36] = [
    (2, 8), (2, 9), (3, 9), (3, 8),
    (12, 8), (12, 9), (12, 10), (13, 11), (14, 12), (15, 12), (17, 11), (18, 10),
    (18, 9), (18, 8), (19, 9), (16, 9), (17, 7), (15, 6), (14, 6), (13, 7),
    (22, 8), (22, 7), (22, 6), (23, 6), (23, 7), (23, 8), (24, 9), (24, 5),
    (26, 5), (26, 4), (26, 9), (26, 10),
    (36, 6), (36, 7), (37, 7), (37, 6),
];

/// Default live probability of a random fill
pub const DEFAULT_DENSITY: f64 = 0.33;

/// Default side length of a random-fill square
pub const DEFAULT_EXTENT: usize = 200;

/// Fixed seed patterns, each a list of live-cell offsets from a placement origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    Glider,
    GliderGun,
    FPentomino,
}

impl Pattern {
    pub const ALL: [Pattern; 3] = [Pattern::Glider, Pattern::GliderGun, Pattern::FPentomino];

    pub fn offsets(self) -> &'static [(i64, i64)] {
        match self {
            Pattern::Glider => &GLIDER,
            Pattern::GliderGun => &GLIDER_GUN,
            Pattern::FPentomino => &F_PENTOMINO,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Pattern::Glider => "glider",
            Pattern::GliderGun => "glider-gun",
            Pattern::FPentomino => "pentomino",
        }
    }

    /// Write every cell of the pattern alive, translated by `origin`.
    ///
    /// Cells falling off the board are clamped onto its border by [`Grid::set`].
    pub fn place(self, grid: &mut Grid, origin: (i64, i64)) {
        let (ox, oy) = origin;
        for &(dx, dy) in self.offsets() {
            grid.set(ox.saturating_add(dx), oy.saturating_add(dy), CellState::Alive);
        }
        tracing::debug!(pattern = self.name(), x = ox, y = oy, "pattern placed");
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Pattern {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "glider" => Ok(Pattern::Glider),
            "glider-gun" | "gun" => Ok(Pattern::GliderGun),
            "pentomino" | "f-pentomino" | "r-pentomino" => Ok(Pattern::FPentomino),
            other => anyhow::bail!("Unknown pattern '{}'", other),
        }
    }
}

/// Half-open rectangle of board positions, `[x0, x1) x [y0, y1)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl Region {
    /// The whole board
    pub fn full(grid: &Grid) -> Self {
        Self { x0: 0, y0: 0, x1: grid.width(), y1: grid.height() }
    }

    /// A square of side `min(extent, dimension)` per axis centred on `center`, clipped to the board
    pub fn centered(grid: &Grid, center: (i64, i64), extent: usize) -> Self {
        let axis = |c: i64, len: usize| {
            let side = extent.min(len) as i64;
            let lo = c.saturating_sub(side / 2);
            let hi = lo.saturating_add(side);
            (lo.clamp(0, len as i64) as usize, hi.clamp(0, len as i64) as usize)
        };
        let (x0, x1) = axis(center.0, grid.width());
        let (y0, y1) = axis(center.1, grid.height());
        Self { x0, y0, x1, y1 }
    }

    /// This region clipped to the board
    pub fn clip(self, grid: &Grid) -> Self {
        Self {
            x0: self.x0.min(grid.width()),
            y0: self.y0.min(grid.height()),
            x1: self.x1.min(grid.width()),
            y1: self.y1.min(grid.height()),
        }
    }

    pub fn area(&self) -> usize {
        self.x1.saturating_sub(self.x0) * self.y1.saturating_sub(self.y0)
    }

    pub fn positions(&self) -> impl Iterator<Item = (usize, usize)> {
        iproduct!(self.y0..self.y1, self.x0..self.x1).map(|(y, x)| (x, y))
    }
}

/// Set every cell of `region` alive with probability `density`, dead otherwise
pub fn random_fill<R: Rng>(grid: &mut Grid, region: Region, density: f64, rng: &mut R) -> usize {
    let region = region.clip(grid);
    let density = density.clamp(0.0, 1.0);
    let mut alive = 0;
    for (x, y) in region.positions() {
        let state = CellState::from(rng.gen_bool(density));
        if state.is_alive() {
            alive += 1;
        }
        grid.set(x as i64, y as i64, state);
    }
    tracing::debug!(area = region.area(), alive, density, "random fill applied");
    alive
}
