//! Configuration management for the Life simulation

pub mod settings;

pub use settings::{
    Settings, GridConfig, SimulationConfig, SeedingConfig, LoggingConfig, CliOverrides
};
