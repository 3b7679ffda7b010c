//! Sparse, lazily-populated action-value table over a quantized state grid.

use crate::{
    cell::{CellEntry, CellId, CellMap},
    config::TableConfig,
    error::{Error, Result},
    ports::TableStore,
    quantizer::{QuantizedState, StateQuantizer},
};

/// Action-value table keyed by quantized grid cells.
///
/// The table owns its [`StateQuantizer`] and accepts raw continuous states;
/// every accessor quantizes first. A cell's entry is created the first time
/// it is read or written, default-initialized to zero action values and
/// zero counters, with the snapped state values recorded for export.
///
/// Persistence goes through a [`TableStore`] at explicit checkpoints only:
/// [`SparseQTable::open`] loads once at construction, [`SparseQTable::save`]
/// rewrites the whole document on request. Nothing is persisted per update.
///
/// Single reader/writer assumed; there is no locking.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseQTable {
    config: TableConfig,
    quantizer: StateQuantizer,
    cells: CellMap,
}

impl SparseQTable {
    /// Create an empty table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the configuration fails
    /// [`TableConfig::validate`].
    pub fn new(config: TableConfig) -> Result<Self> {
        config.validate()?;
        let quantizer = StateQuantizer::new(config.grid());
        Ok(Self {
            config,
            quantizer,
            cells: CellMap::new(),
        })
    }

    /// Create a table and populate it from the store's persisted document.
    ///
    /// A store with no document yields an empty table; absence is not an
    /// error.
    pub fn open(config: TableConfig, store: &dyn TableStore) -> Result<Self> {
        let mut table = Self::new(config)?;
        if let Some(cells) = store.load(&table.config)? {
            table.cells = cells;
        }
        Ok(table)
    }

    /// Write the full in-memory table through `store`, replacing any
    /// previously persisted document.
    pub fn save(&self, store: &dyn TableStore) -> Result<()> {
        store.save(&self.config, &self.cells)
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn quantizer(&self) -> &StateQuantizer {
        &self.quantizer
    }

    /// Number of visited cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over visited cells in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&CellId, &CellEntry)> {
        self.cells.iter()
    }

    /// Action values for `state`, in configured action order.
    ///
    /// Creates the cell's entry if this is its first access.
    pub fn values(&mut self, state: &[f64]) -> Result<Vec<f64>> {
        let track = self.config.track_access();
        let entry = self.entry_for(state)?;
        if track {
            entry.counters.reads += 1;
        }
        Ok(entry.action_values.clone())
    }

    /// Value of a single action in `state`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAction`] if `action` is not below the
    /// configured action count.
    pub fn value(&mut self, state: &[f64], action: usize) -> Result<f64> {
        self.check_action(action)?;
        let track = self.config.track_access();
        let entry = self.entry_for(state)?;
        if track {
            entry.counters.reads += 1;
        }
        Ok(entry.action_values[action])
    }

    /// Overwrite the value of a single action in `state`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAction`] if `action` is not below the
    /// configured action count.
    pub fn set_value(&mut self, state: &[f64], action: usize, value: f64) -> Result<()> {
        self.check_action(action)?;
        let track = self.config.track_access();
        let entry = self.entry_for(state)?;
        entry.action_values[action] = value;
        if track {
            entry.counters.writes += 1;
        }
        Ok(())
    }

    fn check_action(&self, action: usize) -> Result<()> {
        if action >= self.config.action_count() {
            return Err(Error::InvalidAction {
                action,
                n_actions: self.config.action_count(),
            });
        }
        Ok(())
    }

    fn entry_for(&mut self, state: &[f64]) -> Result<&mut CellEntry> {
        let QuantizedState { values, indices } = self.quantizer.quantize(state)?;
        let n_actions = self.config.action_count();
        Ok(self
            .cells
            .entry(CellId::new(indices))
            .or_insert_with(|| CellEntry::zeroed(values, n_actions)))
    }
}
