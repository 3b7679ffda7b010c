//! In-memory table store for testing.
//!
//! This adapter implements the [`TableStore`] port without any file system
//! I/O, enabling fast, isolated tests of load/save behavior.
//!
//! [`TableStore`]: crate::ports::TableStore

use std::sync::{Arc, Mutex};

use crate::{cell::CellMap, config::TableConfig, error::Result, ports::TableStore};

/// In-memory store holding at most one table document.
///
/// Clones share the same underlying document, so a test can hand the store
/// to a table and still inspect what was saved.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTableStore {
    document: Arc<Mutex<Option<CellMap>>>,
}

impl InMemoryTableStore {
    /// Create a store with no document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a document has been saved.
    pub fn contains_document(&self) -> bool {
        self.document.lock().unwrap().is_some()
    }

    /// Drop the stored document, if any.
    pub fn clear(&self) {
        *self.document.lock().unwrap() = None;
    }
}

impl TableStore for InMemoryTableStore {
    fn load(&self, _config: &TableConfig) -> Result<Option<CellMap>> {
        Ok(self.document.lock().unwrap().clone())
    }

    fn save(&self, _config: &TableConfig, cells: &CellMap) -> Result<()> {
        *self.document.lock().unwrap() = Some(cells.clone());
        Ok(())
    }
}
