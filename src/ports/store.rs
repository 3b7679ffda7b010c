//! Storage port separating table persistence from table behavior.
//!
//! This trait is the boundary between the in-memory table and whatever
//! holds its persisted document, so the update rule can be exercised with
//! no file I/O at all.

use crate::{cell::CellMap, config::TableConfig, error::Result};

/// Port for persisting and loading the table's single document.
///
/// The configuration is passed through both operations because display
/// names are applied only at this boundary; the in-memory table addresses
/// dimensions and actions by index.
pub trait TableStore {
    /// Load the persisted table document, if one exists.
    ///
    /// Returns `Ok(None)` when no document has been written yet; absence is
    /// not an error.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::CorruptTable`] if a document exists but is
    /// malformed or does not match `config`.
    fn load(&self, config: &TableConfig) -> Result<Option<CellMap>>;

    /// Persist the full cell map, replacing any previous document.
    fn save(&self, config: &TableConfig, cells: &CellMap) -> Result<()>;
}
