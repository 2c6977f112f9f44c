//! Running simulations: the timed scheduler and the game facade

pub mod scheduler;
pub mod game;

pub use scheduler::{RunState, Scheduler, SharedGrid};
pub use game::Game;
