//! Game of Life core functionality

pub mod grid;
pub mod rules;
pub mod stepper;
pub mod patterns;
pub mod io;

pub use grid::{Cell, CellState, Grid};
pub use rules::Rule;
pub use stepper::{StepReport, SteppingEngine};
pub use patterns::{random_fill, Pattern, Region};
pub use io::{export_live_cells, import_live_cells, load_live_cells, save_live_cells};
