//! The set of managed tables and their generators.

use crate::error::WorkloadError;
use loadtest_generator::{
    create_table_ddl, drop_table_ddl, MySQLTableDataGenerator, TableDataGenerator,
};
use std::collections::HashSet;
use sync_core::{Executor, Statement};
use tracing::info;

/// A managed table and the generator that writes to it.
pub struct TableHandle {
    name: String,
    generator: Box<dyn TableDataGenerator>,
}

impl TableHandle {
    pub fn new(generator: Box<dyn TableDataGenerator>) -> Self {
        Self {
            name: generator.table().to_string(),
            generator,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn generator(&self) -> &dyn TableDataGenerator {
        self.generator.as_ref()
    }
}

/// Ordered, immutable set of managed tables.
///
/// Built once during setup and shared read-only (behind an `Arc`) by every
/// seed and transaction worker. A table's position in the registry is its
/// index for lock ordering.
pub struct TableRegistry {
    tables: Vec<TableHandle>,
}

impl TableRegistry {
    /// Create a registry. Table names must be unique and at least one table
    /// is required.
    pub fn new(tables: Vec<TableHandle>) -> Result<Self, WorkloadError> {
        if tables.is_empty() {
            return Err(WorkloadError::Config("no tables to manage".into()));
        }
        let mut seen = HashSet::new();
        for table in &tables {
            if !seen.insert(table.name()) {
                return Err(WorkloadError::Config(format!(
                    "duplicate table name '{}'",
                    table.name()
                )));
            }
        }
        Ok(Self { tables })
    }

    /// Registry of `nr_tables` standard MySQL tables named `test_0..`
    /// whose generators write to `schema`.
    pub fn mysql(schema: &str, nr_tables: usize) -> Result<Self, WorkloadError> {
        let tables = (0..nr_tables)
            .map(|i| {
                let table = table_name(i);
                TableHandle::new(Box::new(MySQLTableDataGenerator::new(schema, &table)))
            })
            .collect();
        Self::new(tables)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Table at `index`. Panics when out of range, like slice indexing.
    pub fn get(&self, index: usize) -> &TableHandle {
        &self.tables[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &TableHandle> {
        self.tables.iter()
    }

    pub fn table_names(&self) -> Vec<String> {
        self.tables.iter().map(|t| t.name().to_string()).collect()
    }

    /// Create every managed table in `schema` with the standard MySQL shape.
    ///
    /// Run once against the source and once against the target schema before
    /// seeding.
    pub async fn create_mysql_tables(
        &self,
        executor: &dyn Executor,
        schema: &str,
    ) -> Result<(), WorkloadError> {
        for table in &self.tables {
            let ddl = Statement::raw(create_table_ddl(schema, table.name()));
            executor
                .execute(&ddl)
                .await
                .map_err(|source| WorkloadError::Setup {
                    schema: schema.to_string(),
                    table: table.name().to_string(),
                    source,
                })?;
        }
        info!("Created {} tables in schema '{}'", self.tables.len(), schema);
        Ok(())
    }

    /// Drop every managed table from `schema`, ignoring tables that do not
    /// exist.
    pub async fn drop_mysql_tables(
        &self,
        executor: &dyn Executor,
        schema: &str,
    ) -> Result<(), WorkloadError> {
        for table in &self.tables {
            let ddl = Statement::raw(drop_table_ddl(schema, table.name()));
            executor
                .execute(&ddl)
                .await
                .map_err(|source| WorkloadError::Setup {
                    schema: schema.to_string(),
                    table: table.name().to_string(),
                    source,
                })?;
        }
        info!("Dropped {} tables in schema '{}'", self.tables.len(), schema);
        Ok(())
    }
}

/// Name of the managed table at `index`.
pub fn table_name(index: usize) -> String {
    format!("test_{index}")
}
