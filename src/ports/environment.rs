//! Environment port - contract between the trainer and a control task.
//!
//! The simulated environment itself lives outside this crate; the trainer
//! only depends on this trait. Implementations are expected to be
//! synchronous: each step is a blocking call executed in lockstep with
//! table reads and writes.

use crate::{config::Bounds, error::Result};

/// Outcome of one environment step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    /// State after the action was applied.
    pub state: Vec<f64>,
    /// Whether the episode ended on this step.
    pub terminated: bool,
    /// Raw reward for this step.
    pub reward: f64,
}

/// A continuous-state, discrete-action control task.
pub trait Environment {
    /// Reset to an initial state and return it.
    fn reset(&mut self) -> Result<Vec<f64>>;

    /// Apply `action` and advance one step.
    ///
    /// # Errors
    ///
    /// Failures are propagated to the caller unchanged; the trainer never
    /// intercepts or retries them.
    fn step(&mut self, action: usize) -> Result<StepOutcome>;

    /// Number of discrete actions.
    fn action_count(&self) -> usize;

    /// Number of continuous state dimensions.
    fn state_dimensionality(&self) -> usize;

    /// Per-dimension state bounds, already clamped to finite values.
    ///
    /// Environments with unbounded observation dimensions should substitute
    /// a finite limit via [`Bounds::clamped`] before reporting.
    fn state_bounds(&self) -> Vec<Bounds>;
}
