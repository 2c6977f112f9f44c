//! Console helpers shared by the command line front-end

pub mod display;

pub use display::{ColorOutput, GridFormatter, OutputFormat, ProgressIndicator, RunSummary};
