//! Integration tests for table persistence and export.

mod common;

use anyhow::Result;
use common::CorridorEnv;
use qgrid::{
    Bounds, Error, GridSpec, SparseQTable, TableConfig, Trainer, TrainerConfig,
    adapters::{InMemoryTableStore, JsonTableStore},
    export,
};
use tempfile::TempDir;

fn corridor_config() -> Result<TableConfig> {
    let grid = GridSpec::uniform(vec![Bounds::new(0.0, CorridorEnv::GOAL)?], 7)?;
    Ok(TableConfig::new(grid, 2)
        .with_state_names(vec!["position".into()])
        .with_action_names(vec!["left".into(), "right".into()])
        .with_access_counters(true))
}

fn trained_table(episodes: usize) -> Result<SparseQTable> {
    let table = SparseQTable::new(corridor_config()?)?;
    let config = TrainerConfig::default()
        .with_alpha(0.5)
        .with_discount_factor(0.9)
        .with_max_steps(40);
    let mut trainer = Trainer::new(CorridorEnv::new(), table, config)?.with_seed(13);
    for _ in 0..episodes {
        trainer.train_episode(0.6)?;
    }
    let (_, table) = trainer.into_parts();
    Ok(table)
}

#[test]
fn test_save_then_open_reproduces_the_table() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = JsonTableStore::new(temp_dir.path().join("qtable.json"));

    let table = trained_table(50)?;
    assert!(!table.is_empty());
    table.save(&store)?;

    let loaded = SparseQTable::open(corridor_config()?, &store)?;
    assert_eq!(loaded, table);
    Ok(())
}

#[test]
fn test_open_without_a_document_starts_empty() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = JsonTableStore::new(temp_dir.path().join("never_written.json"));

    let table = SparseQTable::open(corridor_config()?, &store)?;
    assert!(table.is_empty());
    Ok(())
}

#[test]
fn test_corrupt_document_fails_before_training() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("qtable.json");
    std::fs::write(&path, "{ definitely not a table")?;

    let result = SparseQTable::open(corridor_config()?, &JsonTableStore::new(&path));
    assert!(matches!(result, Err(Error::CorruptTable { .. })));
    Ok(())
}

#[test]
fn test_training_resumes_from_a_loaded_table() -> Result<()> {
    let store = InMemoryTableStore::new();

    let table = trained_table(20)?;
    table.save(&store)?;

    // Reopen through the store and keep training; the loaded values must
    // carry over rather than restart from zero.
    let reopened = SparseQTable::open(corridor_config()?, &store)?;
    assert_eq!(reopened, table);

    let config = TrainerConfig::default()
        .with_alpha(0.5)
        .with_discount_factor(0.9)
        .with_max_steps(40);
    let mut trainer = Trainer::new(CorridorEnv::new(), reopened, config)?.with_seed(99);
    trainer.train_episode(0.6)?;
    Ok(())
}

#[test]
fn test_csv_export_covers_every_visited_cell() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("qtable.csv");

    let table = trained_table(50)?;
    let rows = export::write_csv(&table, &path)?;
    assert_eq!(rows, table.len());

    let contents = std::fs::read_to_string(&path)?;
    let mut lines = contents.lines();
    assert_eq!(lines.next(), Some("position,left,right,reads,writes"));
    assert_eq!(lines.count(), rows);
    Ok(())
}
