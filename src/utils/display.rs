//! Display and output formatting utilities

use crate::game_of_life::{Grid, Rule, StepReport};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// How run results are reported on the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub width: usize,
    pub height: usize,
    pub rule: Rule,
    pub generation: u64,
    pub population: usize,
    pub elapsed_ms: u64,
}

impl RunSummary {
    pub fn from_grid(grid: &Grid, elapsed: Duration) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            rule: grid.rule(),
            generation: grid.generation(),
            population: grid.live_count(),
            elapsed_ms: elapsed.as_millis() as u64,
        }
    }

    pub fn render(&self, format: OutputFormat) -> Result<String, serde_json::Error> {
        match format {
            OutputFormat::Json => serde_json::to_string_pretty(self),
            OutputFormat::Text => Ok(format!(
                "Board: {}x{}\nRule: {}\nGeneration: {}\nPopulation: {}\nElapsed: {} ms",
                self.width, self.height, self.rule, self.generation, self.population, self.elapsed_ms
            )),
        }
    }
}

/// Terminal rendering of grids
pub struct GridFormatter;

impl GridFormatter {
    /// Format a window of the grid starting at `origin`, clipped to the board
    pub fn format_viewport(grid: &Grid, origin: (usize, usize), size: (usize, usize)) -> String {
        let x_end = (origin.0 + size.0).min(grid.width());
        let y_end = (origin.1 + size.1).min(grid.height());
        let mut output = String::new();
        for y in origin.1..y_end {
            for x in origin.0..x_end {
                output.push(if grid.get(x as i64, y as i64).is_alive() { '█' } else { '·' });
            }
            output.push('\n');
        }
        output
    }

    /// Format a grid in compact form
    pub fn format_grid_compact(grid: &Grid) -> String {
        Self::format_viewport(grid, (0, 0), (grid.width(), grid.height()))
    }

    /// Format a grid with coordinates
    pub fn format_grid_with_coords(grid: &Grid) -> String {
        let mut output = String::new();

        // Header with column numbers
        output.push_str("   ");
        for x in 0..grid.width() {
            output.push_str(&format!("{:2}", x % 10));
        }
        output.push('\n');

        // Rows with row numbers
        for y in 0..grid.height() {
            output.push_str(&format!("{:2} ", y));
            for x in 0..grid.width() {
                output.push_str(if grid.get(x as i64, y as i64).is_alive() { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }
}

/// Console progress for synchronous stepping: generation count and population
pub struct ProgressIndicator {
    target: usize,
    generation: usize,
    population: usize,
    peak_population: usize,
    last_draw: Instant,
    started: Instant,
}

impl ProgressIndicator {
    const REDRAW_INTERVAL: Duration = Duration::from_millis(100);

    pub fn new(target: usize) -> Self {
        let now = Instant::now();
        Self {
            target,
            generation: 0,
            population: 0,
            peak_population: 0,
            last_draw: now,
            started: now,
        }
    }

    /// Record a finished step, redrawing at most every 100 ms
    pub fn record(&mut self, report: &StepReport) {
        self.generation += 1;
        self.population = report.population;
        self.peak_population = self.peak_population.max(report.population);

        let now = Instant::now();
        if now.duration_since(self.last_draw) >= Self::REDRAW_INTERVAL {
            self.draw();
            self.last_draw = now;
        }
    }

    fn line(&self) -> String {
        format!(
            "Generation {}/{} | population {} (peak {})",
            self.generation, self.target, self.population, self.peak_population
        )
    }

    fn draw(&self) {
        print!("\r{}", self.line());
        std::io::Write::flush(&mut std::io::stdout()).ok();
    }

    /// Overwrite the progress line with a final summary
    pub fn finish(&self) {
        let ended = if self.population == 0 && self.generation < self.target {
            " (died out)"
        } else {
            ""
        };
        println!(
            "\rStepped {} of {} generations in {:.2}s, final population {}{}",
            self.generation,
            self.target,
            self.started.elapsed().as_secs_f64(),
            self.population,
            ended
        );
    }
}

/// ANSI-coloured console messages, disabled by `NO_COLOR` or a dumb terminal
pub struct ColorOutput;

impl ColorOutput {
    fn paint(text: &str, code: u8) -> String {
        let enabled = std::env::var_os("NO_COLOR").is_none()
            && std::env::var("TERM").map_or(true, |term| term != "dumb");
        if enabled {
            format!("\x1b[{}m{}\x1b[0m", code, text)
        } else {
            text.to_string()
        }
    }

    pub fn success(text: &str) -> String {
        Self::paint(text, 32)
    }

    pub fn info(text: &str) -> String {
        Self::paint(text, 34)
    }
}
