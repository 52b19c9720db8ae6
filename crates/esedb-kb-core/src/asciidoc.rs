//! Asciidoc rendering of table definitions.
//!
//! Renders the same facts the YAML resources carry in the shape used by the
//! narrative documentation under `docs/`: one section per table with a
//! three-column asciidoc table of identifier, name, and type.

use std::io::{self, Write};

use crate::catalog::Catalog;
use crate::schema::TableDefinition;

/// Writes one table definition as an asciidoc section.
///
/// ```text
/// == Containers
///
/// [cols="1,3,5",options="header"]
/// |===
/// | Column identifier | Column name | Column type
/// | 1 | ContainerId | Integer 64-bit signed
/// |===
/// ```
pub fn write_table_definition<W: Write>(
    writer: &mut W,
    table: &TableDefinition,
) -> io::Result<()> {
    writeln!(writer, "== {}", table.name())?;

    if let Some(template_table) = table.template_table() {
        writeln!(writer, "Template table: {template_table}")?;
    }

    if !table.aliases().is_empty() {
        writeln!(writer, "Aliases: {}", table.aliases().join(", "))?;
    }

    writeln!(writer)?;
    writeln!(writer, "[cols=\"1,3,5\",options=\"header\"]")?;
    writeln!(writer, "|===")?;
    writeln!(writer, "| Column identifier | Column name | Column type")?;

    for column in table.columns() {
        writeln!(
            writer,
            "| {} | {} | {}",
            column.identifier, column.name, column.value_type
        )?;
    }

    writeln!(writer, "|===")?;
    writeln!(writer)
}

/// Writes every table of a catalog as asciidoc sections.
pub fn write_catalog<W: Write>(writer: &mut W, catalog: &Catalog) -> io::Result<()> {
    for table in catalog.tables() {
        write_table_definition(writer, table)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::TableDefinition;
    use crate::value_type::ValueType;

    #[test]
    fn renders_section_and_table() {
        let mut table = TableDefinition::new("tbHistory", None);
        table.push_column(1, "Id", ValueType::Integer32bitSigned);
        table.push_column(256, "BundledMatchingUpdates", ValueType::LargeBinaryData);

        let mut rendered = Vec::new();
        write_table_definition(&mut rendered, &table).unwrap();

        let expected = "\
== tbHistory

[cols=\"1,3,5\",options=\"header\"]
|===
| Column identifier | Column name | Column type
| 1 | Id | Integer 32-bit signed
| 256 | BundledMatchingUpdates | Large binary data
|===

";
        assert_eq!(String::from_utf8(rendered).unwrap(), expected);
    }

    #[test]
    fn renders_template_table_and_aliases() {
        let mut table = TableDefinition::new("Container_1", Some("Container".to_string()));
        table.push_alias("Container_2");
        table.push_column(1, "EntryId", ValueType::Integer64bitSigned);

        let mut rendered = Vec::new();
        write_table_definition(&mut rendered, &table).unwrap();
        let text = String::from_utf8(rendered).unwrap();

        assert!(text.contains("Template table: Container\n"));
        assert!(text.contains("Aliases: Container_2\n"));
    }

    #[test]
    fn catalog_renders_every_unique_table() {
        let mut first = TableDefinition::new("First", None);
        first.push_column(1, "Id", ValueType::Integer32bitSigned);
        let mut second = TableDefinition::new("Second", None);
        second.push_column(1, "Name", ValueType::LargeText);

        let catalog = Catalog::from_tables(vec![first, second]);

        let mut rendered = Vec::new();
        write_catalog(&mut rendered, &catalog).unwrap();
        let text = String::from_utf8(rendered).unwrap();

        assert!(text.contains("== First\n"));
        assert!(text.contains("== Second\n"));
    }
}
