//! Episodic Q-learning over a sparse quantized table.
//!
//! The trainer runs one episode at a time: it pulls states from the
//! [`Environment`], selects actions epsilon-greedily, and applies the
//! one-step Q-learning update to the table after every transition. The
//! exploration rate is a per-episode argument so callers keep ownership of
//! its schedule; the trainer holds no decay logic of its own.

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    ports::{Environment, StepOutcome},
    table::SparseQTable,
};

/// Hyperparameters for the training loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainerConfig {
    /// Learning rate α applied to the TD error.
    pub alpha: f64,
    /// Discount factor γ weighting bootstrapped next-state values.
    pub discount_factor: f64,
    /// Hard cap on environment steps per episode.
    pub max_steps_per_episode: usize,
}

impl TrainerConfig {
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.discount_factor = discount_factor;
        self
    }

    pub fn with_max_steps(mut self, max_steps_per_episode: usize) -> Self {
        self.max_steps_per_episode = max_steps_per_episode;
        self
    }

    fn validate(&self) -> Result<()> {
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(Error::InvalidConfiguration {
                message: format!("learning rate {} must be in (0, 1]", self.alpha),
            });
        }
        if !(self.discount_factor >= 0.0 && self.discount_factor <= 1.0) {
            return Err(Error::InvalidConfiguration {
                message: format!("discount factor {} must be in [0, 1]", self.discount_factor),
            });
        }
        if self.max_steps_per_episode == 0 {
            return Err(Error::InvalidConfiguration {
                message: "max steps per episode must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            discount_factor: 0.99,
            max_steps_per_episode: 20,
        }
    }
}

/// One observed transition, consumed by the update rule. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: Vec<f64>,
    pub action: usize,
    pub reward: f64,
    pub next_state: Vec<f64>,
    pub terminated: bool,
}

/// Result of one training episode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    /// Accumulated raw (undiscounted) reward.
    pub total_return: f64,
    /// Environment steps issued.
    pub steps: usize,
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Episodic Q-learning trainer (off-policy TD control).
///
/// Owns the environment and the table for the duration of training;
/// [`Trainer::into_parts`] hands them back so the caller can checkpoint or
/// export the table afterwards.
#[derive(Debug)]
pub struct Trainer<E: Environment> {
    env: E,
    table: SparseQTable,
    config: TrainerConfig,
    rng: StdRng,
    rng_seed: Option<u64>,
}

impl<E: Environment> Trainer<E> {
    /// Create a trainer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the hyperparameters are
    /// out of range or the environment's action count or state
    /// dimensionality disagrees with the table's configuration.
    pub fn new(env: E, table: SparseQTable, config: TrainerConfig) -> Result<Self> {
        config.validate()?;
        if env.action_count() != table.config().action_count() {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "environment has {} actions, the table is configured for {}",
                    env.action_count(),
                    table.config().action_count()
                ),
            });
        }
        if env.state_dimensionality() != table.config().grid().dimensions() {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "environment reports {} state dimensions, the grid has {}",
                    env.state_dimensionality(),
                    table.config().grid().dimensions()
                ),
            });
        }

        Ok(Self {
            env,
            table,
            config,
            rng: build_rng(None),
            rng_seed: None,
        })
    }

    /// Seed the exploration RNG for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
        self
    }

    pub fn table(&self) -> &SparseQTable {
        &self.table
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Hand back the environment and the table.
    pub fn into_parts(self) -> (E, SparseQTable) {
        (self.env, self.table)
    }

    /// Run one episode and return its accumulated return and step count.
    ///
    /// The environment is reset, then stepped up to
    /// `max_steps_per_episode` times: select an action epsilon-greedily,
    /// step, apply the update, advance. The episode ends early when the
    /// environment reports termination. Environment errors abort the
    /// episode and propagate unchanged.
    pub fn train_episode(&mut self, epsilon: f64) -> Result<EpisodeSummary> {
        let mut total_return = 0.0;
        let mut steps = 0;
        let mut state = self.env.reset()?;

        for _ in 0..self.config.max_steps_per_episode {
            let action = self.select_action(epsilon, &state)?;
            let StepOutcome {
                state: next_state,
                terminated,
                reward,
            } = self.env.step(action)?;
            steps += 1;
            total_return += reward;

            // Update before the state variable advances.
            self.apply_update(&Transition {
                state: state.clone(),
                action,
                reward,
                next_state: next_state.clone(),
                terminated,
            })?;

            state = next_state;
            if terminated {
                break;
            }
        }

        Ok(EpisodeSummary {
            total_return,
            steps,
        })
    }

    /// One-step Q-learning update:
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') − Q(s,a)]
    ///
    /// with the bootstrap term dropped on terminal transitions. Public so
    /// transitions recorded elsewhere can be replayed into the table.
    pub fn apply_update(&mut self, transition: &Transition) -> Result<()> {
        let current = self.table.value(&transition.state, transition.action)?;
        let target = if transition.terminated {
            transition.reward
        } else {
            let next_values = self.table.values(&transition.next_state)?;
            transition.reward + self.config.discount_factor * max_value(&next_values)
        };
        let td_error = target - current;
        self.table.set_value(
            &transition.state,
            transition.action,
            current + self.config.alpha * td_error,
        )
    }

    /// Greedy policy lookup with no exploration, for use after training.
    pub fn act(&mut self, state: &[f64]) -> Result<usize> {
        let values = self.table.values(state)?;
        Ok(argmax(&values))
    }

    fn select_action(&mut self, epsilon: f64, state: &[f64]) -> Result<usize> {
        if self.rng.random::<f64>() > epsilon {
            // Exploit: best known action for this cell.
            let values = self.table.values(state)?;
            Ok(argmax(&values))
        } else {
            // Explore: uniformly random action.
            Ok(self.rng.random_range(0..self.table.config().action_count()))
        }
    }
}

/// Index of the greatest value; ties break toward the lowest index.
fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (index, &value) in values.iter().enumerate().skip(1) {
        if value > values[best] {
            best = index;
        }
    }
    best
}

fn max_value(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}
