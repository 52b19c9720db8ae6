//! SQLite persistence for extracted catalogs.
//!
//! Writes a catalog into a small relational shape other knowledge-base
//! tools can query directly:
//!
//! - `database_definitions(database_definition_key, type, version)`
//! - `table_definitions(table_definition_key, name)`
//! - `column_definitions(column_definition_key, identifier, name, type,
//!   table_definition_key)`
//!
//! Writing is idempotent: a definition that is already present is not
//! inserted twice, so re-running an extraction against the same database
//! file leaves the store unchanged.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};
use snafu::prelude::*;

use crate::catalog::Catalog;
use crate::schema::{DatabaseDefinition, TableDefinition};

/// File name of the catalog store inside an output directory.
pub const CATALOG_DATABASE_FILE: &str = "esedb-kb.db";

/// Errors raised by the catalog store.
#[derive(Debug, Snafu)]
pub enum CatalogStoreError {
    /// The SQLite database could not be opened.
    #[snafu(display("Unable to open catalog store {path}: {source}"))]
    Open {
        /// The database path.
        path: String,
        /// The underlying SQLite error.
        source: rusqlite::Error,
    },

    /// A statement against the store failed.
    #[snafu(display("Catalog store query failed: {source}"))]
    Query {
        /// The underlying SQLite error.
        source: rusqlite::Error,
    },
}

/// A writable SQLite catalog store.
pub struct CatalogStore {
    connection: Connection,
}

impl CatalogStore {
    /// Opens (creating when necessary) a catalog store at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<CatalogStore, CatalogStoreError> {
        let path = path.as_ref();
        let connection = Connection::open(path).context(OpenSnafu {
            path: path.display().to_string(),
        })?;

        let store = CatalogStore { connection };
        store.create_tables()?;
        Ok(store)
    }

    fn create_tables(&self) -> Result<(), CatalogStoreError> {
        self.connection
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS database_definitions (
                     database_definition_key INTEGER PRIMARY KEY AUTOINCREMENT,
                     type TEXT,
                     version TEXT );
                 CREATE TABLE IF NOT EXISTS table_definitions (
                     table_definition_key INTEGER PRIMARY KEY AUTOINCREMENT,
                     name TEXT );
                 CREATE TABLE IF NOT EXISTS column_definitions (
                     column_definition_key INTEGER PRIMARY KEY AUTOINCREMENT,
                     identifier INTEGER,
                     name TEXT,
                     type TEXT,
                     table_definition_key INTEGER );",
            )
            .context(QuerySnafu)
    }

    /// Writes a database definition unless an identical one exists.
    pub fn write_database_definition(
        &mut self,
        definition: &DatabaseDefinition,
    ) -> Result<(), CatalogStoreError> {
        let existing: Option<i64> = self
            .connection
            .query_row(
                "SELECT database_definition_key FROM database_definitions
                 WHERE type = ?1 AND version = ?2",
                params![definition.database_type, definition.version],
                |row| row.get(0),
            )
            .optional()
            .context(QuerySnafu)?;

        if existing.is_none() {
            self.connection
                .execute(
                    "INSERT INTO database_definitions ( type, version ) VALUES ( ?1, ?2 )",
                    params![definition.database_type, definition.version],
                )
                .context(QuerySnafu)?;
        }

        Ok(())
    }

    /// Writes every table of a catalog, with its columns.
    pub fn write_catalog(&mut self, catalog: &Catalog) -> Result<(), CatalogStoreError> {
        for table in catalog.tables() {
            self.write_table_definition(table)?;
        }

        Ok(())
    }

    /// Writes one table definition and its columns.
    pub fn write_table_definition(
        &mut self,
        table: &TableDefinition,
    ) -> Result<(), CatalogStoreError> {
        let table_key = match self.table_definition_key(table.name())? {
            Some(key) => key,
            None => {
                self.connection
                    .execute(
                        "INSERT INTO table_definitions ( name ) VALUES ( ?1 )",
                        params![table.name()],
                    )
                    .context(QuerySnafu)?;
                self.connection.last_insert_rowid()
            }
        };

        for column in table.columns() {
            let existing: Option<i64> = self
                .connection
                .query_row(
                    "SELECT column_definition_key FROM column_definitions
                     WHERE name = ?1 AND table_definition_key = ?2",
                    params![column.name, table_key],
                    |row| row.get(0),
                )
                .optional()
                .context(QuerySnafu)?;

            if existing.is_none() {
                self.connection
                    .execute(
                        "INSERT INTO column_definitions
                         ( identifier, name, type, table_definition_key )
                         VALUES ( ?1, ?2, ?3, ?4 )",
                        params![
                            column.identifier,
                            column.name,
                            column.value_type.description(),
                            table_key
                        ],
                    )
                    .context(QuerySnafu)?;
            }
        }

        Ok(())
    }

    fn table_definition_key(&self, name: &str) -> Result<Option<i64>, CatalogStoreError> {
        self.connection
            .query_row(
                "SELECT table_definition_key FROM table_definitions WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()
            .context(QuerySnafu)
    }
}
