//! Wrapper prelude.
//!
//! The `esedb-kb` crate is the supported public entry point. Downstream
//! code should prefer importing from this prelude instead of depending on
//! internal core module paths.

pub use crate::file_header;
pub use crate::{
    Catalog, ColumnDefinition, DatabaseDefinition, DatabaseType, KnowledgeBase, KnownDatabase,
    SchemaError, TableDefinition, ValueType,
};
