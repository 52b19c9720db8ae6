//! The shipped knowledge base: resource directory loading and lookup.
//!
//! A knowledge-base directory holds one `known_databases.yaml` file plus
//! one schema resource file per database identifier:
//!
//! ```text
//! data/
//!   known_databases.yaml     # identifier -> artifact definition records
//!   srum.yaml                # schema resource for the srum identifier
//!   windows_update.yaml
//!   ...
//! ```
//!
//! Loading materializes a [`Catalog`] per identifier. Mismatches between
//! the two sides (a record without a resource file, a resource file without
//! a record) are logged as warnings rather than errors, since the knowledge
//! base grows one side at a time.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use snafu::prelude::*;

use crate::catalog::Catalog;
use crate::definitions_file::{
    DefinitionsFileError, KnownDatabase, read_known_databases, read_table_definitions,
};
use crate::schema::ColumnDefinition;

/// File name of the known-databases resource.
pub const KNOWN_DATABASES_FILE: &str = "known_databases.yaml";

/// Errors raised while loading a knowledge-base directory.
#[derive(Debug, Snafu)]
pub enum KnowledgeBaseError {
    /// The resource directory could not be enumerated.
    #[snafu(display("Unable to read knowledge base directory {path}: {source}"))]
    ReadDirectory {
        /// The directory path.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The directory has no known-databases file.
    #[snafu(display("Knowledge base directory {path} has no {KNOWN_DATABASES_FILE}"))]
    MissingKnownDatabases {
        /// The directory path.
        path: String,
    },

    /// A resource file failed to load.
    #[snafu(transparent)]
    Definitions {
        /// The underlying definitions-file error.
        source: DefinitionsFileError,
    },
}

/// The loaded knowledge base: known databases plus a catalog per identifier.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    known_databases: Vec<KnownDatabase>,
    catalogs: BTreeMap<String, Catalog>,
}

impl KnowledgeBase {
    /// Loads a knowledge-base directory.
    pub fn open(dir: impl AsRef<Path>) -> Result<KnowledgeBase, KnowledgeBaseError> {
        let dir = dir.as_ref();
        let dir_str = dir.display().to_string();

        let known_path = dir.join(KNOWN_DATABASES_FILE);
        ensure!(
            known_path.is_file(),
            MissingKnownDatabasesSnafu {
                path: dir_str.as_str(),
            }
        );
        let known_databases = read_known_databases(&known_path)?;

        let mut catalogs = BTreeMap::new();
        for path in schema_resource_paths(dir, &dir_str)? {
            let Some(identifier) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };

            let tables = read_table_definitions(&path)?;
            catalogs.insert(identifier.to_string(), Catalog::from_tables(tables));
        }

        for record in &known_databases {
            if !catalogs.contains_key(&record.database_identifier) {
                log::warn!(
                    "No schema resource for known database: {}",
                    record.database_identifier
                );
            }
        }
        for identifier in catalogs.keys() {
            if !known_databases
                .iter()
                .any(|record| &record.database_identifier == identifier)
            {
                log::warn!("No known database record for schema resource: {identifier}");
            }
        }

        Ok(KnowledgeBase {
            known_databases,
            catalogs,
        })
    }

    /// Returns the known-database records.
    pub fn known_databases(&self) -> &[KnownDatabase] {
        &self.known_databases
    }

    /// Returns the loaded database identifiers, in sorted order.
    pub fn databases(&self) -> impl Iterator<Item = &str> {
        self.catalogs.keys().map(String::as_str)
    }

    /// Returns the catalog for a database identifier.
    pub fn catalog(&self, identifier: &str) -> Option<&Catalog> {
        self.catalogs.get(identifier)
    }

    /// The knowledge-base lookup: database, table name, column identifier.
    pub fn lookup(
        &self,
        identifier: &str,
        table_name: &str,
        column_identifier: u32,
    ) -> Option<&ColumnDefinition> {
        self.catalog(identifier)?
            .lookup_column(table_name, column_identifier)
    }
}

/// Enumerates the schema resource files of a knowledge-base directory.
fn schema_resource_paths(
    dir: &Path,
    dir_str: &str,
) -> Result<Vec<PathBuf>, KnowledgeBaseError> {
    let entries = fs::read_dir(dir).context(ReadDirectorySnafu { path: dir_str })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.context(ReadDirectorySnafu { path: dir_str })?;
        let path = entry.path();

        let is_yaml = path
            .extension()
            .and_then(|extension| extension.to_str())
            .is_some_and(|extension| extension == "yaml" || extension == "yml");
        let is_known_databases = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name == KNOWN_DATABASES_FILE);

        if is_yaml && !is_known_databases {
            paths.push(path);
        }
    }

    paths.sort();
    Ok(paths)
}
