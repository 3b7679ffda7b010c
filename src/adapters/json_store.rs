//! JSON file adapter for table persistence.
//!
//! The persisted document is a single JSON object keyed by cell id strings
//! (`"3#7#0"`). Each cell maps the configured display names to values, so
//! the file stays readable by external tooling:
//!
//! ```json
//! {
//!   "3#7": {
//!     "x_pos": -0.5, "y_pos": 0.25,
//!     "fire_left": 0.0, "fire_main": 0.82,
//!     "reads": 14, "writes": 3
//!   }
//! }
//! ```
//!
//! The schema is validated on load; a document that exists but does not
//! match the configuration fails fast before any training proceeds.

use std::{
    fs::File,
    io::{BufReader, BufWriter, ErrorKind},
    path::{Path, PathBuf},
    str::FromStr,
};

use serde_json::{Map, Value};

use crate::{
    cell::{AccessCounters, CellEntry, CellId, CellMap, READS_FIELD, WRITES_FIELD},
    config::TableConfig,
    error::{Error, Result},
    ports::TableStore,
};

/// File-backed [`TableStore`] writing one JSON document.
///
/// The output path is supplied at construction; the adapter holds no other
/// state and never touches the file outside [`TableStore::load`] and
/// [`TableStore::save`].
#[derive(Debug, Clone)]
pub struct JsonTableStore {
    path: PathBuf,
}

impl JsonTableStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn corrupt(&self, message: impl Into<String>) -> Error {
        Error::CorruptTable {
            path: self.path.clone(),
            message: message.into(),
        }
    }
}

impl TableStore for JsonTableStore {
    fn load(&self, config: &TableConfig) -> Result<Option<CellMap>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(source) if source.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(Error::Io {
                    operation: format!("open table document {:?}", self.path),
                    source,
                });
            }
        };

        let document: Value = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| self.corrupt(e.to_string()))?;
        let object = document
            .as_object()
            .ok_or_else(|| self.corrupt("top-level value is not an object"))?;

        let mut cells = CellMap::with_capacity(object.len());
        for (key, value) in object {
            let id = CellId::from_str(key).map_err(|e| self.corrupt(e.to_string()))?;
            validate_indices(&id, config).map_err(|message| self.corrupt(message))?;
            let entry = decode_entry(&id, value, config).map_err(|message| self.corrupt(message))?;
            cells.insert(id, entry);
        }

        Ok(Some(cells))
    }

    fn save(&self, config: &TableConfig, cells: &CellMap) -> Result<()> {
        let mut ids: Vec<&CellId> = cells.keys().collect();
        ids.sort();

        let mut document = Map::new();
        for id in ids {
            document.insert(id.to_string(), encode_entry(&cells[id], config));
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| Error::Io {
                operation: format!("create table directory {parent:?}"),
                source,
            })?;
        }

        let file = File::create(&self.path).map_err(|source| Error::Io {
            operation: format!("create table document {:?}", self.path),
            source,
        })?;
        serde_json::to_writer(BufWriter::new(file), &Value::Object(document))?;

        Ok(())
    }
}

fn validate_indices(id: &CellId, config: &TableConfig) -> std::result::Result<(), String> {
    let levels = config.grid().levels();
    if id.indices().len() != levels.len() {
        return Err(format!(
            "cell '{id}' has {} indices, the grid has {} dimensions",
            id.indices().len(),
            levels.len()
        ));
    }
    for (&index, &level_count) in id.indices().iter().zip(levels) {
        if index >= level_count {
            return Err(format!(
                "cell '{id}' index {index} exceeds the dimension's {level_count} levels"
            ));
        }
    }
    Ok(())
}

fn encode_entry(entry: &CellEntry, config: &TableConfig) -> Value {
    let mut object = Map::new();
    for (name, &value) in config.state_names().iter().zip(&entry.state_values) {
        object.insert(name.clone(), Value::from(value));
    }
    for (name, &value) in config.action_names().iter().zip(&entry.action_values) {
        object.insert(name.clone(), Value::from(value));
    }
    object.insert(READS_FIELD.to_string(), Value::from(entry.counters.reads));
    object.insert(WRITES_FIELD.to_string(), Value::from(entry.counters.writes));
    Value::Object(object)
}

fn decode_entry(
    id: &CellId,
    value: &Value,
    config: &TableConfig,
) -> std::result::Result<CellEntry, String> {
    let object = value
        .as_object()
        .ok_or_else(|| format!("cell '{id}' is not an object"))?;

    Ok(CellEntry {
        state_values: float_fields(id, object, config.state_names())?,
        action_values: float_fields(id, object, config.action_names())?,
        counters: AccessCounters {
            reads: counter_field(id, object, READS_FIELD)?,
            writes: counter_field(id, object, WRITES_FIELD)?,
        },
    })
}

fn float_fields(
    id: &CellId,
    object: &Map<String, Value>,
    names: &[String],
) -> std::result::Result<Vec<f64>, String> {
    names
        .iter()
        .map(|name| {
            object
                .get(name)
                .and_then(Value::as_f64)
                .ok_or_else(|| format!("cell '{id}' is missing numeric field '{name}'"))
        })
        .collect()
}

fn counter_field(
    id: &CellId,
    object: &Map<String, Value>,
    name: &str,
) -> std::result::Result<u64, String> {
    object
        .get(name)
        .and_then(Value::as_u64)
        .ok_or_else(|| format!("cell '{id}' is missing counter field '{name}'"))
}
