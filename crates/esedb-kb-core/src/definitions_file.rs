//! YAML-based definitions files.
//!
//! Two resource-file shapes live here:
//!
//! - Schema resource files: multi-document YAML, one document per table.
//!   Each document carries `table`, an optional `template_table`, and a
//!   `columns` list of `{identifier, name, type}` entries with the type
//!   spelled as its description string:
//!
//!   ```yaml
//!   # esedb-kb database schema.
//!   ---
//!   table: SruDbIdMapTable
//!   columns:
//!   - identifier: 1
//!     name: IdType
//!     type: Integer 8-bit unsigned
//!   ```
//!
//! - The known-databases file: multi-document YAML of
//!   `{artifact_definition, database_identifier}` records linking a
//!   database identifier to its Digital Forensics Artifact definition.
//!
//! Reading is strict: unknown keys, missing keys, unknown value types, and
//! duplicate column identifiers or names are errors. Documents that are
//! empty (for example, the leading comment block) are skipped. Writing
//! emits documents sorted by table name so resource diffs stay stable, and
//! reading back a written file preserves every table and column fact.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use snafu::prelude::*;

use crate::schema::{ColumnDefinition, SchemaError, TableDefinition};

/// The comment line opening every schema resource file.
pub const SCHEMA_FILE_HEADER: &str = "# esedb-kb database schema.";

/// Errors raised while reading or writing a definitions file.
#[derive(Debug, Snafu)]
pub enum DefinitionsFileError {
    /// The file could not be read.
    #[snafu(display("Unable to read definitions file {path}: {source}"))]
    Read {
        /// The file path.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The file could not be written.
    #[snafu(display("Unable to write definitions file {path}: {source}"))]
    Write {
        /// The file path.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A YAML document did not match the expected shape.
    #[snafu(display("Malformed YAML document in {path}: {source}"))]
    Parse {
        /// The file path.
        path: String,
        /// The underlying YAML error.
        source: serde_yaml::Error,
    },

    /// A table document parsed but violates a schema invariant.
    #[snafu(display("Invalid table definition in {path}: {source}"))]
    InvalidTable {
        /// The file path.
        path: String,
        /// The schema violation.
        source: SchemaError,
    },

    /// A table or column definition failed to serialize.
    #[snafu(display("Unable to format definitions as YAML: {source}"))]
    Emit {
        /// The underlying YAML error.
        source: serde_yaml::Error,
    },

    /// A known-database record has an empty artifact definition.
    #[snafu(display("Known database record in {path} is missing the artifact definition"))]
    MissingArtifactDefinition {
        /// The file path.
        path: String,
    },

    /// A known-database record has an empty database identifier.
    #[snafu(display("Known database record in {path} is missing the database identifier"))]
    MissingDatabaseIdentifier {
        /// The file path.
        path: String,
    },
}

/// One document of a schema resource file.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct SchemaDocument {
    table: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    template_table: Option<String>,

    columns: Vec<ColumnDefinition>,
}

/// A known-database record: database identifier plus the name of the
/// corresponding Digital Forensics Artifact definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct KnownDatabase {
    /// Name of the corresponding Digital Forensics Artifact definition.
    pub artifact_definition: String,

    /// Identifier of the database type (for example, `srum`).
    pub database_identifier: String,
}

/// Parses the documents of a schema resource file.
pub fn parse_table_definitions(
    text: &str,
    path: &str,
) -> Result<Vec<TableDefinition>, DefinitionsFileError> {
    let mut tables = Vec::new();

    for document in serde_yaml::Deserializer::from_str(text) {
        let value = serde_yaml::Value::deserialize(document).context(ParseSnafu { path })?;
        if value.is_null() {
            continue;
        }

        let document: SchemaDocument =
            serde_yaml::from_value(value).context(ParseSnafu { path })?;

        let mut table = TableDefinition::new(document.table, document.template_table);
        table.set_columns(document.columns);
        table.validate().context(InvalidTableSnafu { path })?;

        tables.push(table);
    }

    Ok(tables)
}

/// Reads the table definitions from a schema resource file.
pub fn read_table_definitions(
    path: impl AsRef<Path>,
) -> Result<Vec<TableDefinition>, DefinitionsFileError> {
    let path = path.as_ref();
    let path_str = path.display().to_string();

    let text = fs::read_to_string(path).context(ReadSnafu {
        path: path_str.as_str(),
    })?;
    parse_table_definitions(&text, &path_str)
}

/// Formats table definitions as a schema resource file.
///
/// Documents are sorted by table name; columns keep their declared order.
pub fn format_table_definitions(
    tables: &[TableDefinition],
) -> Result<String, DefinitionsFileError> {
    let mut sorted: Vec<&TableDefinition> = tables.iter().collect();
    sorted.sort_by(|a, b| a.name().cmp(b.name()));

    let mut text = String::from(SCHEMA_FILE_HEADER);
    text.push('\n');

    for table in sorted {
        let document = SchemaDocument {
            table: table.name().to_string(),
            template_table: table.template_table().map(str::to_string),
            columns: table.columns().to_vec(),
        };

        text.push_str("---\n");
        text.push_str(&serde_yaml::to_string(&document).context(EmitSnafu)?);
    }

    Ok(text)
}

/// Writes table definitions to a schema resource file.
pub fn write_table_definitions(
    path: impl AsRef<Path>,
    tables: &[TableDefinition],
) -> Result<(), DefinitionsFileError> {
    let path = path.as_ref();
    let text = format_table_definitions(tables)?;

    fs::write(path, text).context(WriteSnafu {
        path: path.display().to_string(),
    })
}

/// Parses the documents of a known-databases file.
pub fn parse_known_databases(
    text: &str,
    path: &str,
) -> Result<Vec<KnownDatabase>, DefinitionsFileError> {
    let mut records = Vec::new();

    for document in serde_yaml::Deserializer::from_str(text) {
        let value = serde_yaml::Value::deserialize(document).context(ParseSnafu { path })?;
        if value.is_null() {
            continue;
        }

        let record: KnownDatabase = serde_yaml::from_value(value).context(ParseSnafu { path })?;

        ensure!(
            !record.artifact_definition.is_empty(),
            MissingArtifactDefinitionSnafu { path }
        );
        ensure!(
            !record.database_identifier.is_empty(),
            MissingDatabaseIdentifierSnafu { path }
        );

        records.push(record);
    }

    Ok(records)
}

/// Reads the records of a known-databases file.
pub fn read_known_databases(
    path: impl AsRef<Path>,
) -> Result<Vec<KnownDatabase>, DefinitionsFileError> {
    let path = path.as_ref();
    let path_str = path.display().to_string();

    let text = fs::read_to_string(path).context(ReadSnafu {
        path: path_str.as_str(),
    })?;
    parse_known_databases(&text, &path_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_type::ValueType;

    const SAMPLE_SCHEMA: &str = "\
# esedb-kb database schema.
---
table: SruDbIdMapTable
columns:
- identifier: 1
  name: IdType
  type: Integer 8-bit unsigned
- identifier: 2
  name: IdIndex
  type: Integer 32-bit signed
- identifier: 3
  name: IdBlob
  type: Large binary data
---
table: tbHistory
columns:
- identifier: 1
  name: Id
  type: Integer 32-bit signed
- identifier: 256
  name: BundledMatchingUpdates
  type: Large binary data
";

    #[test]
    fn parses_multi_document_schema() {
        let tables = parse_table_definitions(SAMPLE_SCHEMA, "test.yaml").unwrap();

        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].name(), "SruDbIdMapTable");
        assert_eq!(tables[0].columns().len(), 3);
        assert_eq!(
            tables[0].column(1).unwrap().value_type,
            ValueType::Integer8bitUnsigned
        );

        // Exactly two column records, in declared order.
        let history = &tables[1];
        assert_eq!(history.columns().len(), 2);
        assert_eq!(history.columns()[0].identifier, 1);
        assert_eq!(history.columns()[0].name, "Id");
        assert_eq!(
            history.columns()[0].value_type,
            ValueType::Integer32bitSigned
        );
        assert_eq!(history.columns()[1].identifier, 256);
        assert_eq!(history.columns()[1].name, "BundledMatchingUpdates");
        assert_eq!(history.columns()[1].value_type, ValueType::LargeBinaryData);
    }

    #[test]
    fn roundtrip_preserves_all_facts() {
        let tables = parse_table_definitions(SAMPLE_SCHEMA, "test.yaml").unwrap();
        let formatted = format_table_definitions(&tables).unwrap();
        let reparsed = parse_table_definitions(&formatted, "test.yaml").unwrap();

        assert_eq!(tables, reparsed);
        assert!(formatted.starts_with(SCHEMA_FILE_HEADER));
    }

    #[test]
    fn formatting_sorts_documents_by_table_name() {
        let mut zebra = TableDefinition::new("Zebra", None);
        zebra.push_column(1, "Id", ValueType::Integer32bitSigned);
        let mut apple = TableDefinition::new("Apple", None);
        apple.push_column(1, "Id", ValueType::Integer32bitSigned);

        let formatted = format_table_definitions(&[zebra, apple]).unwrap();

        let apple_at = formatted.find("table: Apple").unwrap();
        let zebra_at = formatted.find("table: Zebra").unwrap();
        assert!(apple_at < zebra_at);
    }

    #[test]
    fn template_table_survives_roundtrip() {
        let mut table = TableDefinition::new("Msg", Some("MsgTemplate".to_string()));
        table.push_column(1, "Id", ValueType::Integer32bitSigned);

        let formatted = format_table_definitions(std::slice::from_ref(&table)).unwrap();
        assert!(formatted.contains("template_table: MsgTemplate"));

        let reparsed = parse_table_definitions(&formatted, "test.yaml").unwrap();
        assert_eq!(reparsed[0].template_table(), Some("MsgTemplate"));
    }

    #[test]
    fn rejects_unknown_keys() {
        let text = "\
---
table: Broken
bogus: value
columns: []
";
        let err = parse_table_definitions(text, "test.yaml").unwrap_err();
        assert!(matches!(err, DefinitionsFileError::Parse { .. }));
    }

    #[test]
    fn rejects_unknown_value_type() {
        let text = "\
---
table: Broken
columns:
- identifier: 1
  name: Id
  type: Integer 128-bit signed
";
        let err = parse_table_definitions(text, "test.yaml").unwrap_err();
        assert!(matches!(err, DefinitionsFileError::Parse { .. }));
    }

    #[test]
    fn rejects_duplicate_column_identifiers() {
        let text = "\
---
table: Broken
columns:
- identifier: 1
  name: First
  type: Text
- identifier: 1
  name: Second
  type: Text
";
        let err = parse_table_definitions(text, "test.yaml").unwrap_err();
        assert!(matches!(err, DefinitionsFileError::InvalidTable { .. }));
    }

    #[test]
    fn parses_known_databases() {
        let text = "\
# esedb-kb known databases.
---
artifact_definition: WindowsSystemResourceUsageMonitorDatabaseFile
database_identifier: srum
---
artifact_definition: WindowsUpdateDataStoreDatabaseFile
database_identifier: windows_update
";
        let records = parse_known_databases(text, "known_databases.yaml").unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].artifact_definition,
            "WindowsSystemResourceUsageMonitorDatabaseFile"
        );
        assert_eq!(records[0].database_identifier, "srum");
    }

    #[test]
    fn known_databases_require_both_keys() {
        let missing_identifier = "\
---
artifact_definition: WindowsSystemResourceUsageMonitorDatabaseFile
";
        let err = parse_known_databases(missing_identifier, "test.yaml").unwrap_err();
        assert!(matches!(err, DefinitionsFileError::Parse { .. }));

        let empty_identifier = "\
---
artifact_definition: WindowsSystemResourceUsageMonitorDatabaseFile
database_identifier: ''
";
        let err = parse_known_databases(empty_identifier, "test.yaml").unwrap_err();
        assert!(matches!(
            err,
            DefinitionsFileError::MissingDatabaseIdentifier { .. }
        ));
    }

    #[test]
    fn known_databases_reject_unknown_keys() {
        let text = "\
---
artifact_definition: WindowsSystemResourceUsageMonitorDatabaseFile
database_identifier: srum
bogus: test
";
        let err = parse_known_databases(text, "test.yaml").unwrap_err();
        assert!(matches!(err, DefinitionsFileError::Parse { .. }));
    }

    #[test]
    fn read_and_write_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("windows_update.yaml");

        let tables = parse_table_definitions(SAMPLE_SCHEMA, "test.yaml").unwrap();
        write_table_definitions(&path, &tables).unwrap();

        let reread = read_table_definitions(&path).unwrap();
        assert_eq!(reread, tables);
    }
}
