//! CLI tool for the ESE database knowledge base.

mod error;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use snafu::prelude::*;

use esedb_kb_core::asciidoc;
use esedb_kb_core::catalog::{Catalog, DatabaseType};
use esedb_kb_core::definitions_file::{
    format_table_definitions, parse_table_definitions, read_table_definitions,
};
use esedb_kb_core::knowledge_base::{KNOWN_DATABASES_FILE, KnowledgeBase};
use esedb_kb_core::schema::DatabaseDefinition;
use esedb_kb_core::sqlite::{CATALOG_DATABASE_FILE, CatalogStore};

use crate::error::{
    CliResult, CreateOutputDirSnafu, InvalidDatabaseTypeSnafu, ListResourcesSnafu,
    LoadKnowledgeBaseSnafu, NotCanonicalSnafu, OutputNotDirectorySnafu, RenderSnafu, StoreSnafu,
    UnknownColumnSnafu, UnknownDatabaseSnafu, UnknownTableSnafu, WriteOutputSnafu,
    WriteStdoutSnafu,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ExportFormatArg {
    Asciidoc,
    Yaml,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check every resource file against the knowledge-base invariants
    Validate {
        /// Resource directory
        #[arg(long, default_value = "data")]
        data: PathBuf,
    },

    /// Look up a documented table or column
    Lookup {
        /// Resource directory
        #[arg(long, default_value = "data")]
        data: PathBuf,

        /// Database identifier (e.g. srum)
        #[arg(long)]
        database: String,

        /// Table name; aliases and numbered instances resolve too
        #[arg(long)]
        table: String,

        /// Column identifier; omit to print the whole table
        #[arg(long)]
        column: Option<u32>,
    },

    /// Render a schema resource file as asciidoc or normalized YAML
    Export {
        /// Schema resource file
        #[arg(long)]
        schema: PathBuf,

        /// Output file (default: stdout)
        #[arg(long)]
        output: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = ExportFormatArg::Asciidoc)]
        format: ExportFormatArg,
    },

    /// Build a deduplicated catalog from an extracted schema resource
    Catalog {
        /// Schema resource file (as extracted from one database)
        #[arg(long)]
        schema: PathBuf,

        /// Directory to write the SQLite catalog store to (default: stdout)
        #[arg(long)]
        db: Option<PathBuf>,

        /// Database type; detected from the table names when omitted
        #[arg(long = "database-type")]
        database_type: Option<String>,

        /// Database version string
        #[arg(long = "database-version")]
        database_version: Option<String>,
    },
}

#[derive(Debug, Parser)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

fn schema_resource_paths(data: &Path) -> CliResult<Vec<PathBuf>> {
    let entries = fs::read_dir(data).context(ListResourcesSnafu {
        data: data.display().to_string(),
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.context(ListResourcesSnafu {
            data: data.display().to_string(),
        })?;
        let path = entry.path();

        let is_yaml = path
            .extension()
            .and_then(|extension| extension.to_str())
            .is_some_and(|extension| extension == "yaml" || extension == "yml");
        let is_known = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name == KNOWN_DATABASES_FILE);

        if is_yaml && !is_known {
            paths.push(path);
        }
    }

    paths.sort();
    Ok(paths)
}

fn cmd_validate(data: &Path) -> CliResult<()> {
    // Loading runs the per-file invariants and the cross-reference warnings.
    let kb = KnowledgeBase::open(data).context(LoadKnowledgeBaseSnafu {
        data: data.display().to_string(),
    })?;

    let paths = schema_resource_paths(data)?;
    for path in &paths {
        let tables = read_table_definitions(path)?;

        // The formatted form must carry exactly the same facts.
        let formatted = format_table_definitions(&tables)?;
        let mut reparsed = parse_table_definitions(&formatted, &path.display().to_string())?;
        reparsed.sort_by(|a, b| a.name().cmp(b.name()));
        let mut sorted = tables.clone();
        sorted.sort_by(|a, b| a.name().cmp(b.name()));
        ensure!(
            sorted == reparsed,
            NotCanonicalSnafu {
                path: path.display().to_string(),
            }
        );

        println!("{}: {} tables OK", path.display(), tables.len());
    }

    println!(
        "Validated {} schema resources for {} known databases",
        paths.len(),
        kb.known_databases().len()
    );
    Ok(())
}

fn cmd_lookup(data: &Path, identifier: &str, table_name: &str, column: Option<u32>) -> CliResult<()> {
    let kb = KnowledgeBase::open(data).context(LoadKnowledgeBaseSnafu {
        data: data.display().to_string(),
    })?;

    let catalog = kb.catalog(identifier).context(UnknownDatabaseSnafu {
        identifier,
        known: kb.databases().collect::<Vec<_>>().join(", "),
    })?;

    let table = catalog.table(table_name).context(UnknownTableSnafu {
        identifier,
        table: table_name,
    })?;

    match column {
        Some(column_identifier) => {
            let column = table.column(column_identifier).context(UnknownColumnSnafu {
                table: table.name(),
                column: column_identifier,
            })?;

            println!(
                "{}: {} ({})",
                column.identifier, column.name, column.value_type
            );
        }
        None => {
            let stdout = io::stdout();
            asciidoc::write_table_definition(&mut stdout.lock(), table)
                .context(WriteStdoutSnafu)?;
        }
    }

    Ok(())
}

fn cmd_export(schema: &Path, output: Option<&Path>, format: ExportFormatArg) -> CliResult<()> {
    let tables = read_table_definitions(schema)?;

    let rendered: Vec<u8> = match format {
        ExportFormatArg::Asciidoc => {
            let mut rendered = Vec::new();
            for table in &tables {
                asciidoc::write_table_definition(&mut rendered, table).context(RenderSnafu)?;
            }
            rendered
        }
        ExportFormatArg::Yaml => format_table_definitions(&tables)?.into_bytes(),
    };

    match output {
        Some(path) => fs::write(path, rendered).context(WriteOutputSnafu {
            path: path.display().to_string(),
        })?,
        None => {
            let stdout = io::stdout();
            stdout
                .lock()
                .write_all(&rendered)
                .context(WriteStdoutSnafu)?;
        }
    }

    Ok(())
}

fn cmd_catalog(
    schema: &Path,
    db: Option<&Path>,
    database_type: Option<&str>,
    database_version: Option<&str>,
) -> CliResult<()> {
    let tables = read_table_definitions(schema)?;
    let catalog = Catalog::from_tables(tables);

    let database_type = match database_type {
        Some(value) => Some(
            value
                .parse::<DatabaseType>()
                .context(InvalidDatabaseTypeSnafu)?,
        ),
        None => catalog.database_type(),
    };

    let type_str = database_type
        .map(|database_type| database_type.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    if database_type.is_none() {
        log::warn!(
            "Unable to determine database type of {}",
            schema.display()
        );
    }

    let definition = DatabaseDefinition::new(type_str, database_version.unwrap_or("unknown"));

    match db {
        Some(directory) => {
            if !directory.exists() {
                fs::create_dir(directory).context(CreateOutputDirSnafu {
                    path: directory.display().to_string(),
                })?;
            }
            ensure!(
                directory.is_dir(),
                OutputNotDirectorySnafu {
                    path: directory.display().to_string(),
                }
            );

            let store_path = directory.join(CATALOG_DATABASE_FILE);
            let mut store = CatalogStore::open(&store_path).context(StoreSnafu)?;
            store.write_database_definition(&definition).context(StoreSnafu)?;
            store.write_catalog(&catalog).context(StoreSnafu)?;

            println!(
                "Wrote {} tables to {}",
                catalog.tables().len(),
                store_path.display()
            );
        }
        None => {
            println!("Database type: {}", definition.database_type);
            println!("Database version: {}", definition.version);
            println!();

            let stdout = io::stdout();
            asciidoc::write_catalog(&mut stdout.lock(), &catalog).context(WriteStdoutSnafu)?;
        }
    }

    Ok(())
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Command::Validate { data } => cmd_validate(&data),

        Command::Lookup {
            data,
            database,
            table,
            column,
        } => cmd_lookup(&data, &database, &table, column),

        Command::Export {
            schema,
            output,
            format,
        } => cmd_export(&schema, output.as_deref(), format),

        Command::Catalog {
            schema,
            db,
            database_type,
            database_version,
        } => cmd_catalog(
            &schema,
            db.as_deref(),
            database_type.as_deref(),
            database_version.as_deref(),
        ),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
