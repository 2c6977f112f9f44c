//! Timed stepping loop with a paused/running state machine

use crate::game_of_life::{Grid, SteppingEngine};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Grid shared between the caller and the stepping worker
pub type SharedGrid = Arc<Mutex<Grid>>;

/// Shortest allowed step period
pub const MIN_SPEED_MS: u64 = 10;
/// Longest allowed step period
pub const MAX_SPEED_MS: u64 = 1000;
pub const DEFAULT_SPEED_MS: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    #[default]
    Paused,
    Running,
}

/// Clamp a requested period into the supported range
pub fn clamp_speed(speed_ms: u64) -> u64 {
    speed_ms.clamp(MIN_SPEED_MS, MAX_SPEED_MS)
}

struct Worker {
    stop_tx: mpsc::Sender<()>,
    handle: JoinHandle<()>,
}

/// Drives [`SteppingEngine::step`] on a background thread at a fixed period.
///
/// Only one worker exists at a time. A step holds the grid lock for its whole
/// duration, so it is never interleaved with caller writes, and [`Scheduler::stop`]
/// waits for an in-flight step to finish before returning.
pub struct Scheduler {
    grid: SharedGrid,
    speed_ms: u64,
    worker: Option<Worker>,
}

impl Scheduler {
    pub fn new(grid: SharedGrid) -> Self {
        Self::with_speed(grid, DEFAULT_SPEED_MS)
    }

    pub fn with_speed(grid: SharedGrid, speed_ms: u64) -> Self {
        Self {
            grid,
            speed_ms: clamp_speed(speed_ms),
            worker: None,
        }
    }

    pub fn run_state(&self) -> RunState {
        if self.worker.is_some() {
            RunState::Running
        } else {
            RunState::Paused
        }
    }

    pub fn is_running(&self) -> bool {
        self.run_state() == RunState::Running
    }

    /// Current step period in milliseconds
    pub fn speed(&self) -> u64 {
        self.speed_ms
    }

    pub fn period(&self) -> Duration {
        Duration::from_millis(self.speed_ms)
    }

    /// Begin stepping, replacing any running worker.
    ///
    /// The first step fires one full period after this call.
    pub fn start(&mut self) {
        self.halt_worker();

        let (stop_tx, stop_rx) = mpsc::channel();
        let grid = Arc::clone(&self.grid);
        let period = self.period();
        let handle = thread::spawn(move || run_worker(grid, period, stop_rx));

        self.worker = Some(Worker { stop_tx, handle });
        tracing::info!(speed_ms = self.speed_ms, "scheduler started");
    }

    /// Stop stepping. Idempotent; once this returns no further step runs.
    pub fn stop(&mut self) {
        if self.halt_worker() {
            tracing::info!("scheduler stopped");
        }
    }

    fn halt_worker(&mut self) -> bool {
        let Some(worker) = self.worker.take() else {
            return false;
        };
        // The worker may already be gone if it panicked; joining still reaps it
        let _ = worker.stop_tx.send(());
        if worker.handle.join().is_err() {
            tracing::warn!("scheduler worker panicked");
        }
        true
    }

    /// Store a new period and restart the worker when `run_state` is running
    pub fn change_speed(&mut self, speed_ms: u64, run_state: RunState) {
        self.speed_ms = clamp_speed(speed_ms);
        tracing::debug!(requested = speed_ms, speed_ms = self.speed_ms, "speed changed");
        if run_state == RunState::Running {
            self.stop();
            self.start();
        }
    }

    /// Pause and kill every cell
    pub fn reset(&mut self) {
        self.stop();
        self.grid.lock().clear();
        tracing::info!("grid reset");
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.halt_worker();
    }
}

fn run_worker(grid: SharedGrid, period: Duration, stop_rx: mpsc::Receiver<()>) {
    let mut deadline = Instant::now() + period;
    loop {
        let timeout = deadline.saturating_duration_since(Instant::now());
        match stop_rx.recv_timeout(timeout) {
            Err(RecvTimeoutError::Timeout) => {
                let started = Instant::now();
                SteppingEngine::step(&mut grid.lock());
                // Anchored on the actual start so late wake-ups never bunch steps together
                deadline = started + period;
            }
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}
