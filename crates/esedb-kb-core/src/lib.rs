//! Core models for the ESE database knowledge base.
//!
//! This crate provides the foundational pieces for `esedb-kb`:
//!
//! - The closed ESE column value-type table (`value_type` module).
//! - Schema descriptors for columns, tables, and extracted databases,
//!   with the resource-file invariants enforced (`schema` module).
//! - Multi-document YAML reading and writing for schema resources and
//!   the known-databases file (`definitions_file` module).
//! - Catalog construction: layout deduplication into aliases, common-name
//!   abbreviation, database-type detection, and the table/column lookup
//!   operation (`catalog` module).
//! - The declarative EDB file-header layout and signature check
//!   (`file_header` module).
//! - Loading of the shipped resource directory (`knowledge_base` module).
//! - Output writers: asciidoc sections (`asciidoc` module) and a SQLite
//!   catalog store (`sqlite` module).
//!
//! Decoding ESE database files themselves is out of scope; that stays in
//! external decoder libraries. This crate only describes what those
//! decoders will find.
#![deny(missing_docs)]
pub mod asciidoc;
pub mod catalog;
pub mod definitions_file;
pub mod file_header;
pub mod knowledge_base;
pub mod schema;
pub mod sqlite;
pub mod value_type;

pub use catalog::{Catalog, DatabaseType, ParseDatabaseTypeError};
pub use definitions_file::{DefinitionsFileError, KnownDatabase};
pub use knowledge_base::{KnowledgeBase, KnowledgeBaseError};
pub use schema::{ColumnDefinition, DatabaseDefinition, SchemaError, TableDefinition};
pub use value_type::{ParseValueTypeError, UnknownValueTypeError, ValueType};
