//! Grid-quantized tabular Q-learning.
//!
//! This crate learns a control policy for a continuous-state,
//! discrete-action task by discretizing the state space into a fixed grid
//! and maintaining a persistent, lazily-populated action-value table
//! updated via temporal difference learning. It provides:
//!
//! - [`StateQuantizer`] - pure mapping from continuous states to grid cells
//! - [`SparseQTable`] - lazily-populated action-value table with load/save
//!   through a [`ports::TableStore`] adapter
//! - [`Trainer`] - episodic Q-learning loop with epsilon-greedy exploration
//! - [`adapters::JsonTableStore`] - the persisted JSON table document
//! - [`export::write_csv`] - flat CSV dump of visited cells
//!
//! The environment is a collaborator behind the [`ports::Environment`]
//! trait; this crate never simulates anything itself.
//!
//! # Example
//!
//! ```no_run
//! use qgrid::{
//!     Bounds, GridSpec, Result, SparseQTable, TableConfig, Trainer, TrainerConfig,
//!     adapters::JsonTableStore,
//!     ports::Environment,
//! };
//!
//! fn train<E: Environment>(env: E) -> Result<()> {
//!     let grid = GridSpec::uniform(env.state_bounds(), 16)?;
//!     let config = TableConfig::new(grid, env.action_count());
//!     let store = JsonTableStore::new("qtable.json");
//!
//!     let table = SparseQTable::open(config, &store)?;
//!     let mut trainer = Trainer::new(env, table, TrainerConfig::default())?.with_seed(42);
//!
//!     for episode in 0..500 {
//!         let epsilon = (1.0 - episode as f64 / 500.0).max(0.05);
//!         trainer.train_episode(epsilon)?;
//!     }
//!
//!     trainer.table().save(&store)?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cell;
pub mod config;
pub mod error;
pub mod export;
pub mod ports;
pub mod quantizer;
pub mod table;
pub mod trainer;

pub use cell::{AccessCounters, CellEntry, CellId, CellMap};
pub use config::{Bounds, GridSpec, TableConfig};
pub use error::{Error, Result};
pub use quantizer::{QuantizedState, StateQuantizer};
pub use table::SparseQTable;
pub use trainer::{EpisodeSummary, Trainer, TrainerConfig, Transition};
