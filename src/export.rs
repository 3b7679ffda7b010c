//! Flat CSV export of visited cells for offline inspection.
//!
//! The export is a debugging artifact; nothing in training reads it back.

use std::path::Path;

use crate::{
    cell::{READS_FIELD, WRITES_FIELD},
    error::Result,
    table::SparseQTable,
};

/// Write one row per visited cell: state display names, action display
/// names, then the read and write counters. Rows are emitted in cell id
/// order so repeated exports of the same table are identical.
///
/// Returns the number of rows written.
pub fn write_csv(table: &SparseQTable, path: &Path) -> Result<usize> {
    let config = table.config();
    let mut writer = csv::Writer::from_path(path)?;

    let mut header: Vec<&str> = Vec::new();
    header.extend(config.state_names().iter().map(String::as_str));
    header.extend(config.action_names().iter().map(String::as_str));
    header.push(READS_FIELD);
    header.push(WRITES_FIELD);
    writer.write_record(&header)?;

    let mut rows: Vec<_> = table.iter().collect();
    rows.sort_by(|(a, _), (b, _)| a.cmp(b));

    for (_, entry) in &rows {
        let mut record: Vec<String> = Vec::with_capacity(header.len());
        record.extend(entry.state_values.iter().map(f64::to_string));
        record.extend(entry.action_values.iter().map(f64::to_string));
        record.push(entry.counters.reads.to_string());
        record.push(entry.counters.writes.to_string());
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::config::{Bounds, GridSpec, TableConfig};

    fn trained_table() -> SparseQTable {
        let grid = GridSpec::uniform(vec![Bounds::new(0.0, 1.0).unwrap()], 5).unwrap();
        let config = TableConfig::new(grid, 2)
            .with_state_names(vec!["position".into()])
            .with_action_names(vec!["left".into(), "right".into()])
            .with_access_counters(true);
        let mut table = SparseQTable::new(config).unwrap();
        table.set_value(&[0.8], 1, 2.5).unwrap();
        table.set_value(&[0.1], 0, -0.5).unwrap();
        table
    }

    #[test]
    fn test_one_row_per_visited_cell() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("qtable.csv");
        let table = trained_table();

        let rows = write_csv(&table, &path).expect("Failed to export");
        assert_eq!(rows, table.len());

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), rows + 1);
        assert_eq!(lines[0], "position,left,right,reads,writes");

        // Cell id order: index 0 before index 3.
        assert_eq!(lines[1], "0,-0.5,0,0,1");
        assert_eq!(lines[2], "0.75,0,2.5,0,1");
    }

    #[test]
    fn test_empty_table_exports_header_only() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("qtable.csv");
        let grid = GridSpec::uniform(vec![Bounds::new(0.0, 1.0).unwrap()], 5).unwrap();
        let table = SparseQTable::new(TableConfig::new(grid, 2)).unwrap();

        let rows = write_csv(&table, &path).expect("Failed to export");
        assert_eq!(rows, 0);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 1);
    }
}
