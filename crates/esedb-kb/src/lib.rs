//! # esedb-kb
//!
//! Knowledge base of reverse-engineered ESE database schemas.
//!
//! This crate is the supported public entry point and provides a small, stable surface.
//!
//! ## Example
//!
//! ```rust,ignore
//! use esedb_kb::prelude::*;
//!
//! let kb = KnowledgeBase::open("data")?;
//! let column = kb.lookup("windows_update", "tbHistory", 256);
//! ```

/// Convenience prelude with the stable, supported surface.
pub mod prelude;

/// File-header namespace (wrapper-only).
pub mod file_header {
    pub use esedb_kb_core::file_header::{
        FieldKind, HEADER_SIZE, HeaderField, LAYOUT, SIGNATURE, field, field_offset, header_size,
        starts_with_signature,
    };
}

pub use esedb_kb_core::catalog::{Catalog, DatabaseType, ParseDatabaseTypeError};
pub use esedb_kb_core::definitions_file::{DefinitionsFileError, KnownDatabase};
pub use esedb_kb_core::knowledge_base::{KnowledgeBase, KnowledgeBaseError};
pub use esedb_kb_core::schema::{
    ColumnDefinition, DatabaseDefinition, SchemaError, TableDefinition,
};
pub use esedb_kb_core::value_type::{ParseValueTypeError, UnknownValueTypeError, ValueType};
