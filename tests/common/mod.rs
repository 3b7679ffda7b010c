//! Shared mock environments for the integration suite.
#![allow(dead_code)]

use qgrid::{
    Bounds, Error, Result,
    ports::{Environment, StepOutcome},
};

pub const LEFT: usize = 0;
pub const RIGHT: usize = 1;

/// Deterministic 1-D corridor: integer positions 0..=6, start in the
/// middle, reward 1.0 on reaching the right end, which terminates the
/// episode. Everything else pays nothing.
pub struct CorridorEnv {
    position: f64,
}

impl CorridorEnv {
    pub const GOAL: f64 = 6.0;

    pub fn new() -> Self {
        Self { position: 3.0 }
    }
}

impl Environment for CorridorEnv {
    fn reset(&mut self) -> Result<Vec<f64>> {
        self.position = 3.0;
        Ok(vec![self.position])
    }

    fn step(&mut self, action: usize) -> Result<StepOutcome> {
        let delta = if action == RIGHT { 1.0 } else { -1.0 };
        self.position = (self.position + delta).clamp(0.0, Self::GOAL);

        let terminated = self.position == Self::GOAL;
        Ok(StepOutcome {
            state: vec![self.position],
            terminated,
            reward: if terminated { 1.0 } else { 0.0 },
        })
    }

    fn action_count(&self) -> usize {
        2
    }

    fn state_dimensionality(&self) -> usize {
        1
    }

    fn state_bounds(&self) -> Vec<Bounds> {
        vec![Bounds::new(0.0, Self::GOAL).unwrap()]
    }
}

/// Environment that replays a fixed script of step outcomes, for tests
/// that need exact control over termination and rewards.
pub struct ScriptedEnv {
    initial_state: Vec<f64>,
    script: Vec<StepOutcome>,
    cursor: usize,
    pub steps_taken: usize,
}

impl ScriptedEnv {
    pub fn new(initial_state: Vec<f64>, script: Vec<StepOutcome>) -> Self {
        Self {
            initial_state,
            script,
            cursor: 0,
            steps_taken: 0,
        }
    }

    /// A script of `count` outcomes walking through distinct states, none
    /// of them terminal, each worth `reward`.
    pub fn non_terminal(count: usize, reward: f64) -> Self {
        let script = (0..count)
            .map(|i| StepOutcome {
                state: vec![(i % 10) as f64],
                terminated: false,
                reward,
            })
            .collect();
        Self::new(vec![0.0], script)
    }
}

impl Environment for ScriptedEnv {
    fn reset(&mut self) -> Result<Vec<f64>> {
        self.cursor = 0;
        Ok(self.initial_state.clone())
    }

    fn step(&mut self, _action: usize) -> Result<StepOutcome> {
        let outcome = self.script.get(self.cursor).cloned().ok_or_else(|| {
            Error::Environment {
                message: format!("script exhausted after {} steps", self.cursor),
            }
        })?;
        self.cursor += 1;
        self.steps_taken += 1;
        Ok(outcome)
    }

    fn action_count(&self) -> usize {
        2
    }

    fn state_dimensionality(&self) -> usize {
        1
    }

    fn state_bounds(&self) -> Vec<Bounds> {
        vec![Bounds::new(0.0, 9.0).unwrap()]
    }
}
