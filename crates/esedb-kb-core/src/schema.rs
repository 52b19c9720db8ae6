//! Schema descriptors: columns, tables, and extracted database instances.
//!
//! These are the flat records the knowledge base is made of. A
//! [`TableDefinition`] carries an ordered set of [`ColumnDefinition`]s plus
//! the aliases collected when several tables in one database share an
//! identical column layout (for example, the numbered WebCache container
//! tables). Validation enforces the resource-file invariants: column
//! identifiers and column names are unique within a table.

use serde::{Deserialize, Serialize};
use snafu::prelude::*;

use crate::value_type::ValueType;

/// A single column of an ESE table.
///
/// The identifier is the numeric key the database catalog uses for the
/// column; it is stable across records while the display name is what the
/// documentation refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    /// Numeric column identifier, unique within one table.
    pub identifier: u32,

    /// Column display name.
    pub name: String,

    /// Declared column value type.
    #[serde(rename = "type")]
    pub value_type: ValueType,
}

/// Errors raised when a table definition violates a resource invariant.
#[derive(Debug, Snafu, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Two columns in one table share a numeric identifier.
    #[snafu(display("Table {table} declares column identifier {identifier} more than once"))]
    DuplicateColumnIdentifier {
        /// The table name.
        table: String,
        /// The duplicated column identifier.
        identifier: u32,
    },

    /// Two columns in one table share a display name.
    #[snafu(display("Table {table} declares column name {column} more than once"))]
    DuplicateColumnName {
        /// The table name.
        table: String,
        /// The duplicated column name.
        column: String,
    },
}

/// An ESE table layout: name, optional template table, aliases, columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDefinition {
    name: String,
    template_table: Option<String>,
    aliases: Vec<String>,
    columns: Vec<ColumnDefinition>,
}

impl TableDefinition {
    /// Creates an empty table definition.
    pub fn new(name: impl Into<String>, template_table: Option<String>) -> Self {
        TableDefinition {
            name: name.into(),
            template_table,
            aliases: Vec::new(),
            columns: Vec::new(),
        }
    }

    /// Returns the table name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the template table name, when the table derives from one.
    pub fn template_table(&self) -> Option<&str> {
        self.template_table.as_deref()
    }

    /// Returns the names of tables folded into this one because they share
    /// its exact column layout.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Returns the columns in declared order.
    pub fn columns(&self) -> &[ColumnDefinition] {
        &self.columns
    }

    /// Appends a column.
    pub fn push_column(&mut self, identifier: u32, name: impl Into<String>, value_type: ValueType) {
        self.columns.push(ColumnDefinition {
            identifier,
            name: name.into(),
            value_type,
        });
    }

    /// Records another table name that shares this table's layout.
    pub fn push_alias(&mut self, name: impl Into<String>) {
        self.aliases.push(name.into());
    }

    /// Replaces the column list wholesale.
    pub fn set_columns(&mut self, columns: Vec<ColumnDefinition>) {
        self.columns = columns;
    }

    /// Looks up a column by its numeric identifier.
    pub fn column(&self, identifier: u32) -> Option<&ColumnDefinition> {
        self.columns
            .iter()
            .find(|column| column.identifier == identifier)
    }

    /// Looks up a column by its display name.
    pub fn column_by_name(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|column| column.name == name)
    }

    /// Checks the per-table resource invariants.
    ///
    /// - Column identifiers are unique within the table.
    /// - Column names are unique within the table.
    pub fn validate(&self) -> Result<(), SchemaError> {
        for (index, column) in self.columns.iter().enumerate() {
            for earlier in &self.columns[..index] {
                ensure!(
                    earlier.identifier != column.identifier,
                    DuplicateColumnIdentifierSnafu {
                        table: self.name.clone(),
                        identifier: column.identifier,
                    }
                );
                ensure!(
                    earlier.name != column.name,
                    DuplicateColumnNameSnafu {
                        table: self.name.clone(),
                        column: column.name.clone(),
                    }
                );
            }
        }

        Ok(())
    }

    /// Returns true when the other table has a byte-identical column layout.
    ///
    /// Layout identity drives catalog deduplication: tables with the same
    /// identifiers, names, and types in the same order are documented once,
    /// with the extra names kept as aliases.
    pub fn same_layout(&self, other: &TableDefinition) -> bool {
        self.columns == other.columns
    }

    /// Determines the common name of this table and its aliases.
    ///
    /// The common name is the longest substring shared by the table name and
    /// every alias. When the shared part is a prefix of the table name and
    /// the name only adds a digit suffix, the suffix is abbreviated with `#`
    /// (so `Containers_1` and `Containers_2` document as `Containers_#`).
    /// Returns None when the names share no substring at all.
    pub fn common_name(&self) -> Option<String> {
        let mut common: Vec<char> = self.name.chars().collect();

        for alias in &self.aliases {
            let alias: Vec<char> = alias.chars().collect();
            common = longest_common_substring(&common, &alias);
            if common.is_empty() {
                return None;
            }
        }

        let mut common_name: String = common.iter().collect();

        if let Some(suffix) = self.name.strip_prefix(common_name.as_str()) {
            if !suffix.is_empty() && suffix.chars().all(|c| c.is_ascii_digit()) {
                common_name.push('#');
            }
        }

        Some(common_name)
    }
}

/// One extracted database instance: its detected type and version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseDefinition {
    /// The database type string (for example, `srum`), or `unknown`.
    pub database_type: String,

    /// The database version string, or `unknown`.
    pub version: String,
}

impl DatabaseDefinition {
    /// Creates a database definition.
    pub fn new(database_type: impl Into<String>, version: impl Into<String>) -> Self {
        DatabaseDefinition {
            database_type: database_type.into(),
            version: version.into(),
        }
    }
}

/// Longest common substring of two char sequences.
///
/// Classic dynamic program over match lengths; `best_end`/`best_len` track
/// the rightmost longest run in `a`.
fn longest_common_substring(a: &[char], b: &[char]) -> Vec<char> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }

    let mut lengths = vec![0usize; b.len()];
    let mut best_len = 0usize;
    let mut best_end = 0usize;

    for (i, ca) in a.iter().enumerate() {
        // Walk right-to-left so lengths[j - 1] still holds the previous row.
        for j in (0..b.len()).rev() {
            if *ca == b[j] {
                lengths[j] = if j == 0 { 1 } else { lengths[j - 1] + 1 };
                if lengths[j] > best_len {
                    best_len = lengths[j];
                    best_end = i + 1;
                }
            } else {
                lengths[j] = 0;
            }
        }
    }

    a[best_end - best_len..best_end].to_vec()
}
