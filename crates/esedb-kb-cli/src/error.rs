use esedb_kb_core::catalog::ParseDatabaseTypeError;
use esedb_kb_core::definitions_file::DefinitionsFileError;
use esedb_kb_core::knowledge_base::KnowledgeBaseError;
use esedb_kb_core::sqlite::CatalogStoreError;

use snafu::Snafu;

pub type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum CliError {
    #[snafu(display("Failed to load knowledge base from {data}: {source}"))]
    LoadKnowledgeBase {
        data: String,
        source: KnowledgeBaseError,
    },

    #[snafu(display("Unable to list resource directory {data}: {source}"))]
    ListResources {
        data: String,
        source: std::io::Error,
    },

    #[snafu(transparent)]
    Definitions { source: DefinitionsFileError },

    #[snafu(display("Unknown database identifier '{identifier}'. Known: {known}"))]
    UnknownDatabase { identifier: String, known: String },

    #[snafu(display("Unknown table '{table}' in database '{identifier}'"))]
    UnknownTable { identifier: String, table: String },

    #[snafu(display("Table '{table}' has no column with identifier {column}"))]
    UnknownColumn { table: String, column: u32 },

    #[snafu(display("Invalid --database-type: {source}"))]
    InvalidDatabaseType { source: ParseDatabaseTypeError },

    #[snafu(display("Resource roundtrip changed {path}; the file is not in canonical form"))]
    NotCanonical { path: String },

    #[snafu(display("Unable to create output directory {path}: {source}"))]
    CreateOutputDir {
        path: String,
        source: std::io::Error,
    },

    #[snafu(display("Output path {path} is not a directory"))]
    OutputNotDirectory { path: String },

    #[snafu(display("Unable to write output {path}: {source}"))]
    WriteOutput {
        path: String,
        source: std::io::Error,
    },

    #[snafu(display("Unable to write to stdout: {source}"))]
    WriteStdout { source: std::io::Error },

    #[snafu(display("Unable to render asciidoc: {source}"))]
    Render { source: std::io::Error },

    #[snafu(display("Failed to write catalog store: {source}"))]
    Store { source: CatalogStoreError },
}
