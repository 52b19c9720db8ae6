//! Catalog construction and lookup.
//!
//! A [`Catalog`] is the deduplicated view over the table definitions
//! extracted from one database: tables with byte-identical column layouts
//! are documented once, with the later names kept as aliases (ESE databases
//! such as WebCache create dozens of numbered container tables that share
//! one layout). On top of that view the catalog offers the knowledge-base
//! lookup operation — table name to definition, column identifier to
//! column — and database-type detection from the set of table names.

use std::fmt;
use std::str::FromStr;

use snafu::Snafu;

use crate::schema::{ColumnDefinition, TableDefinition};

/// Known ESE database types, keyed by their characteristic table sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatabaseType {
    /// Microsoft Exchange mailbox database.
    Exchange,
    /// Windows Search index (Windows.edb).
    Search,
    /// Windows security database (secedit.sdb style).
    Security,
    /// System Resource Usage Monitor (SRUDB.dat).
    Srum,
    /// Internet Explorer / WebCache (WebCacheV01.dat).
    WebCache,
    /// WebCache with extended partition table.
    WebCacheEx,
}

/// Error raised when a database type string is not recognized.
#[derive(Debug, Snafu, Clone, PartialEq, Eq)]
#[snafu(display("Unknown database type '{value}'"))]
pub struct ParseDatabaseTypeError {
    /// The unrecognized type string.
    pub value: String,
}

impl DatabaseType {
    /// All known database types, in detection order.
    ///
    /// `WebCache` precedes `WebCacheEx`; detection tries each type's
    /// required set and the two differ in the partition table name, so the
    /// order between them does not matter.
    pub const ALL: [DatabaseType; 6] = [
        DatabaseType::Exchange,
        DatabaseType::Search,
        DatabaseType::Security,
        DatabaseType::Srum,
        DatabaseType::WebCache,
        DatabaseType::WebCacheEx,
    ];

    /// Returns the identifier string used in resources and CLI arguments.
    pub fn as_str(self) -> &'static str {
        match self {
            DatabaseType::Exchange => "exchange",
            DatabaseType::Search => "search",
            DatabaseType::Security => "security",
            DatabaseType::Srum => "srum",
            DatabaseType::WebCache => "webcache",
            DatabaseType::WebCacheEx => "webcache_ex",
        }
    }

    /// Returns the table names that must all be present for this type.
    pub fn required_tables(self) -> &'static [&'static str] {
        match self {
            DatabaseType::Exchange => {
                &["Folders", "Global", "Mailbox", "Msg", "PerUserRead"]
            }
            DatabaseType::Search => &["SystemIndex_0A", "SystemIndex_Gthr"],
            DatabaseType::Security => &["SmTblSection", "SmTblVersion"],
            DatabaseType::Srum => &[
                "SruDbIdMapTable",
                "{D10CA2FE-6FCF-4F6D-848E-B2E99266FA86}",
                "{D10CA2FE-6FCF-4F6D-848E-B2E99266FA89}",
                "{FEE4E14F-02A9-4550-B5CE-5FA2DA202E37}",
                "{973F5D5C-1D90-4944-BE8E-24B94231A174}",
                "{FEE4E14F-02A9-4550-B5CE-5FA2DA202E37}LT",
                "{DD6636C4-8929-4683-974E-22C046A43763}",
            ],
            DatabaseType::WebCache => &["Containers", "LeakFiles", "Partitions"],
            DatabaseType::WebCacheEx => &["Containers", "LeakFiles", "PartitionsEx"],
        }
    }
}

impl FromStr for DatabaseType {
    type Err = ParseDatabaseTypeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        DatabaseType::ALL
            .into_iter()
            .find(|database_type| database_type.as_str() == value)
            .ok_or_else(|| ParseDatabaseTypeError {
                value: value.to_string(),
            })
    }
}

impl fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The deduplicated catalog of one database's table definitions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    tables: Vec<TableDefinition>,
}

impl Catalog {
    /// Builds a catalog from raw table definitions.
    ///
    /// Tables are kept in first-seen order. A table whose column layout is
    /// identical to an earlier one is folded into it as an alias instead of
    /// appearing twice.
    pub fn from_tables(tables: Vec<TableDefinition>) -> Catalog {
        let mut unique: Vec<TableDefinition> = Vec::new();

        for table in tables {
            match unique.iter().position(|seen| seen.same_layout(&table)) {
                Some(index) => unique[index].push_alias(table.name()),
                None => unique.push(table),
            }
        }

        Catalog { tables: unique }
    }

    /// Returns the unique table definitions in first-seen order.
    pub fn tables(&self) -> &[TableDefinition] {
        &self.tables
    }

    /// Determines the database type from the catalog's table names.
    ///
    /// A type matches when every one of its required tables appears among
    /// the catalog's names — table names, aliases, and common names all
    /// count, so a required table folded into another as an alias (the
    /// SRUM long-term tables share their base tables' layouts) is still
    /// seen. Returns None when no type matches.
    pub fn database_type(&self) -> Option<DatabaseType> {
        let mut names: Vec<String> = Vec::new();
        for table in &self.tables {
            names.push(table.name().to_string());
            names.extend(table.aliases().iter().cloned());
            if let Some(common_name) = table.common_name() {
                names.push(common_name);
            }
        }

        DatabaseType::ALL.into_iter().find(|database_type| {
            database_type
                .required_tables()
                .iter()
                .all(|required| names.iter().any(|name| name == required))
        })
    }

    /// Looks up a table by name.
    ///
    /// Resolution order: exact table name, alias, then the `#`-abbreviated
    /// common name — a query for `Container_12` matches a table documented
    /// as `Container_#`.
    pub fn table(&self, name: &str) -> Option<&TableDefinition> {
        if let Some(table) = self
            .tables
            .iter()
            .find(|table| table.name() == name || table.aliases().iter().any(|alias| alias == name))
        {
            return Some(table);
        }

        self.tables.iter().find(|table| {
            matches_numbered_name(table.common_name().as_deref(), name)
        })
    }

    /// Looks up a column by table name and column identifier.
    ///
    /// "Not found" is a None, not an error; deciding what a missing column
    /// means is the consumer's concern.
    pub fn lookup_column(&self, table_name: &str, identifier: u32) -> Option<&ColumnDefinition> {
        self.table(table_name)?.column(identifier)
    }
}

/// Returns true when `name` instantiates a `#`-abbreviated common name.
fn matches_numbered_name(common_name: Option<&str>, name: &str) -> bool {
    let Some(common_name) = common_name else {
        return false;
    };

    let Some(prefix) = common_name.strip_suffix('#') else {
        return false;
    };

    match name.strip_prefix(prefix) {
        Some(suffix) => !suffix.is_empty() && suffix.chars().all(|c| c.is_ascii_digit()),
        None => false,
    }
}
