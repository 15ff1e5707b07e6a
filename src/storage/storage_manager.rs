// Copyright 2026 Granite Project Authors. Licensed under Apache-2.0.

use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex, OnceLock, RwLock};

use itertools::Itertools;

use super::{StorageError, StorageResult, Table};

/// Shared handle to a table.
pub type TableRef = Arc<RwLock<Table>>;

/// Process-wide registry mapping table names to table handles.
///
/// The singleton is created on first access and lives until process
/// exit. [`reset`](Self::reset) empties the registry and is meant for
/// test teardown; it is not synchronized with readers.
pub struct StorageManager {
    tables: Mutex<HashMap<String, TableRef>>,
}

static STORAGE_MANAGER: OnceLock<StorageManager> = OnceLock::new();

impl StorageManager {
    /// The process-wide instance.
    pub fn get() -> &'static StorageManager {
        STORAGE_MANAGER.get_or_init(StorageManager::new)
    }

    fn new() -> Self {
        StorageManager {
            tables: Mutex::new(HashMap::new()),
        }
    }

    pub fn add_table(&self, name: &str, table: TableRef) -> StorageResult<()> {
        let mut tables = self.tables.lock().unwrap();
        if tables.contains_key(name) {
            return Err(StorageError::Duplicated("table", name.into()));
        }
        tables.insert(name.into(), table);
        Ok(())
    }

    pub fn drop_table(&self, name: &str) -> StorageResult<()> {
        self.tables
            .lock()
            .unwrap()
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| StorageError::NotFound("table", name.into()))
    }

    pub fn get_table(&self, name: &str) -> StorageResult<TableRef> {
        self.tables
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| StorageError::NotFound("table", name.into()))
    }

    pub fn has_table(&self, name: &str) -> bool {
        self.tables.lock().unwrap().contains_key(name)
    }

    /// Names of all registered tables, in no particular order.
    pub fn table_names(&self) -> Vec<String> {
        self.tables.lock().unwrap().keys().cloned().collect()
    }

    /// Write a human-readable schema summary, one block per table.
    pub fn print(&self, out: &mut impl io::Write) -> io::Result<()> {
        let tables = self.tables.lock().unwrap();
        for (name, table) in tables.iter().sorted_by_key(|&(name, _)| name) {
            let table = table.read().unwrap();
            writeln!(out, "=== {name} ===")?;
            writeln!(out, "#columns: {}", table.column_count())?;
            writeln!(out, "#rows: {}", table.row_count())?;
            writeln!(out, "#chunks: {}", table.chunk_count())?;
            writeln!(out, "columns:")?;
            for column in table.columns() {
                writeln!(out, "  {} ({})", column.name(), column.kind())?;
            }
        }
        Ok(())
    }

    /// Empty the registry.
    pub fn reset(&self) {
        self.tables.lock().unwrap().clear();
    }
}
