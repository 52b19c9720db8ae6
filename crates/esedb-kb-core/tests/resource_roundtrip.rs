//! End-to-end resource handling: write, re-read, catalog, lookup.

use esedb_kb_core::catalog::{Catalog, DatabaseType};
use esedb_kb_core::definitions_file::{read_table_definitions, write_table_definitions};
use esedb_kb_core::schema::TableDefinition;
use esedb_kb_core::value_type::ValueType;

fn windows_update_history() -> TableDefinition {
    let mut table = TableDefinition::new("tbHistory", None);
    table.push_column(1, "Id", ValueType::Integer32bitSigned);
    table.push_column(256, "BundledMatchingUpdates", ValueType::LargeBinaryData);
    table
}

#[test]
fn written_resources_read_back_identically() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("windows_update.yaml");

    let mut files = TableDefinition::new("tbFiles", None);
    files.push_column(1, "FileId", ValueType::Integer32bitSigned);
    files.push_column(2, "Digest", ValueType::BinaryData);
    files.push_column(3, "FileName", ValueType::LargeText);

    let tables = vec![windows_update_history(), files];
    write_table_definitions(&path, &tables).unwrap();

    let reread = read_table_definitions(&path).unwrap();
    // Writing sorts by table name: tbFiles precedes tbHistory.
    assert_eq!(reread.len(), 2);
    assert_eq!(reread[0].name(), "tbFiles");
    assert_eq!(reread[1].name(), "tbHistory");
    assert_eq!(reread[1], windows_update_history());
}

#[test]
fn example_scenario_two_columns_in_order() {
    let table = windows_update_history();

    assert_eq!(table.columns().len(), 2);

    let first = &table.columns()[0];
    assert_eq!(
        (first.identifier, first.name.as_str(), first.value_type),
        (1, "Id", ValueType::Integer32bitSigned)
    );

    let second = &table.columns()[1];
    assert_eq!(
        (
            second.identifier,
            second.name.as_str(),
            second.value_type
        ),
        (256, "BundledMatchingUpdates", ValueType::LargeBinaryData)
    );
}

#[test]
fn extraction_pipeline_dedups_and_detects_type() {
    // Shape of a raw WebCache extraction: numbered container tables with one
    // shared layout plus the directory tables.
    let container = |name: &str| {
        let mut table = TableDefinition::new(name, Some("Container".to_string()));
        table.push_column(1, "EntryId", ValueType::Integer64bitSigned);
        table.push_column(17, "Url", ValueType::LargeText);
        table
    };

    let mut containers = TableDefinition::new("Containers", None);
    containers.push_column(1, "ContainerId", ValueType::Integer64bitSigned);
    containers.push_column(2, "Name", ValueType::LargeText);

    let mut leak_files = TableDefinition::new("LeakFiles", None);
    leak_files.push_column(1, "LeakId", ValueType::Integer64bitSigned);

    let mut partitions = TableDefinition::new("Partitions", None);
    partitions.push_column(1, "PartitionId", ValueType::Guid);

    let catalog = Catalog::from_tables(vec![
        containers,
        leak_files,
        partitions,
        container("Container_1"),
        container("Container_2"),
        container("Container_3"),
    ]);

    assert_eq!(catalog.tables().len(), 4);
    assert_eq!(catalog.database_type(), Some(DatabaseType::WebCache));

    let documented = catalog.table("Container_1").unwrap();
    assert_eq!(documented.common_name().as_deref(), Some("Container_#"));
    assert_eq!(
        catalog.lookup_column("Container_42", 17).unwrap().name,
        "Url"
    );
}
