//! Caller-supplied configuration for the quantization grid and table.

use serde::{Deserialize, Serialize};

use crate::{
    cell::{READS_FIELD, WRITES_FIELD},
    error::{Error, Result},
};

/// Inclusive value range of one state dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    /// Create a bounded range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if either bound is not finite
    /// or the range is empty.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(Error::InvalidConfiguration {
                message: format!("bounds [{min}, {max}] must be finite"),
            });
        }
        if min >= max {
            return Err(Error::InvalidConfiguration {
                message: format!("lower bound {min} must be below upper bound {max}"),
            });
        }
        Ok(Self { min, max })
    }

    /// Build bounds from raw environment limits, substituting `±limit` for
    /// infinite values.
    ///
    /// Environments commonly report unbounded observation dimensions; the
    /// grid needs a finite range to span.
    pub fn clamped(min: f64, max: f64, limit: f64) -> Result<Self> {
        let min = if min.is_infinite() { -limit.abs() } else { min };
        let max = if max.is_infinite() { limit.abs() } else { max };
        Self::new(min, max)
    }
}

/// Geometry of the quantization grid: per-dimension bounds and level counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    bounds: Vec<Bounds>,
    levels: Vec<usize>,
}

impl GridSpec {
    /// Create a grid with a per-dimension level count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the grid has no dimensions,
    /// the bounds and level counts disagree in length, or any dimension has
    /// zero levels.
    pub fn new(bounds: Vec<Bounds>, levels: Vec<usize>) -> Result<Self> {
        if bounds.is_empty() {
            return Err(Error::InvalidConfiguration {
                message: "grid needs at least one dimension".to_string(),
            });
        }
        if bounds.len() != levels.len() {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "{} bounded dimensions but {} level counts",
                    bounds.len(),
                    levels.len()
                ),
            });
        }
        if levels.iter().any(|&count| count == 0) {
            return Err(Error::InvalidConfiguration {
                message: "every dimension needs at least one quantization level".to_string(),
            });
        }
        Ok(Self { bounds, levels })
    }

    /// Create a grid with the same level count for every dimension.
    pub fn uniform(bounds: Vec<Bounds>, levels: usize) -> Result<Self> {
        let levels = vec![levels; bounds.len()];
        Self::new(bounds, levels)
    }

    pub fn dimensions(&self) -> usize {
        self.bounds.len()
    }

    pub fn bounds(&self) -> &[Bounds] {
        &self.bounds
    }

    pub fn levels(&self) -> &[usize] {
        &self.levels
    }
}

/// Configuration for a sparse Q-table.
///
/// Display names are used only at the persistence and export boundaries;
/// in-memory lookups address state dimensions and actions by index.
///
/// # Examples
///
/// ```
/// use qgrid::{Bounds, GridSpec, TableConfig};
///
/// let grid = GridSpec::uniform(vec![Bounds::new(-1.0, 1.0)?, Bounds::new(-2.0, 2.0)?], 8)?;
/// let config = TableConfig::new(grid, 3)
///     .with_action_names(vec!["left".into(), "stay".into(), "right".into()])
///     .with_access_counters(true);
/// # config.validate()?;
/// # Ok::<(), qgrid::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    grid: GridSpec,
    n_actions: usize,
    state_names: Vec<String>,
    action_names: Vec<String>,
    track_access: bool,
}

impl TableConfig {
    /// Create a configuration with default display names (`state_{i}`,
    /// `action_{i}`) and access counters disabled.
    pub fn new(grid: GridSpec, n_actions: usize) -> Self {
        let state_names = (0..grid.dimensions()).map(|i| format!("state_{i}")).collect();
        let action_names = (0..n_actions).map(|i| format!("action_{i}")).collect();
        Self {
            grid,
            n_actions,
            state_names,
            action_names,
            track_access: false,
        }
    }

    /// Set the per-dimension display names used in persisted documents and exports.
    pub fn with_state_names(mut self, names: Vec<String>) -> Self {
        self.state_names = names;
        self
    }

    /// Set the per-action display names used in persisted documents and exports.
    pub fn with_action_names(mut self, names: Vec<String>) -> Self {
        self.action_names = names;
        self
    }

    /// Enable or disable read/write counter tracking on cell access.
    pub fn with_access_counters(mut self, enabled: bool) -> Self {
        self.track_access = enabled;
        self
    }

    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    pub fn action_count(&self) -> usize {
        self.n_actions
    }

    pub fn state_names(&self) -> &[String] {
        &self.state_names
    }

    pub fn action_names(&self) -> &[String] {
        &self.action_names
    }

    pub fn track_access(&self) -> bool {
        self.track_access
    }

    /// Cross-field validation, run before a table is built around this
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if there are no actions, a
    /// name list disagrees with the grid or action count, or a display name
    /// collides with another name or a reserved counter field.
    pub fn validate(&self) -> Result<()> {
        if self.n_actions == 0 {
            return Err(Error::InvalidConfiguration {
                message: "at least one action is required".to_string(),
            });
        }
        if self.state_names.len() != self.grid.dimensions() {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "{} state names for {} grid dimensions",
                    self.state_names.len(),
                    self.grid.dimensions()
                ),
            });
        }
        if self.action_names.len() != self.n_actions {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "{} action names for {} actions",
                    self.action_names.len(),
                    self.n_actions
                ),
            });
        }

        // Display names key the persisted document, alongside the counter
        // fields; duplicates would silently merge columns.
        let mut seen = std::collections::HashSet::from([READS_FIELD, WRITES_FIELD]);
        for name in self.state_names.iter().chain(&self.action_names) {
            if !seen.insert(name.as_str()) {
                return Err(Error::InvalidConfiguration {
                    message: format!("display name '{name}' is reserved or used twice"),
                });
            }
        }

        Ok(())
    }
}
