//! Sort command - emit CREATE TABLE statements in dependency order.

use crate::graph::{DependencyGraph, GraphError};
use crate::render::render_schema;
use crate::schema::{parse_json_text, parse_sql_text};
use anyhow::{bail, Context, Result};
use std::fs;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Input format for the sort command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Sql,
}

impl InputFormat {
    fn from_extension(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => InputFormat::Json,
            _ => InputFormat::Sql,
        }
    }
}

/// Run the sort command
pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    format: Option<String>,
    check: bool,
    dry_run: bool,
) -> Result<()> {
    if !file.exists() {
        bail!("input file does not exist: {}", file.display());
    }

    let input_format = resolve_format(&file, format)?;
    let text = fs::read_to_string(&file)
        .with_context(|| format!("failed to read {}", file.display()))?;

    let schema = match input_format {
        InputFormat::Json => parse_json_text(&text)
            .with_context(|| format!("failed to parse {}", file.display()))?,
        InputFormat::Sql => parse_sql_text(&text),
    };

    if schema.is_empty() {
        eprintln!("No tables found in the file.");
        return Ok(());
    }

    let graph = DependencyGraph::from_schema(&schema);

    for (table, reference) in graph.unknown_refs() {
        eprintln!(
            "Warning: table '{}' references undefined table '{}' (treated as pre-existing)",
            table, reference
        );
    }

    // Cycles abort before anything is written; no partial output
    let order = match graph.topo_sort() {
        Ok(order) => order,
        Err(err) => {
            let GraphError::CycleDetected { ref tables, .. } = err;
            eprintln!("Error: circular dependencies detected!");
            eprintln!("The following tables are part of cycles:");
            for table in tables {
                eprintln!("  - {}", table);
            }
            if check {
                eprintln!("\nCheck FAILED: cannot determine a valid ordering.");
            }
            return Err(err.into());
        }
    };

    let ordered_tables: Vec<&str> = order
        .iter()
        .filter_map(|&id| graph.table_name(id))
        .collect();

    if check {
        eprintln!("Check PASSED: tables can be ordered topologically.");
        eprintln!("\nSuggested order ({} tables):", ordered_tables.len());
        for (i, table) in ordered_tables.iter().enumerate() {
            eprintln!("  {}. {}", i + 1, table);
        }
        return Ok(());
    }

    if dry_run {
        eprintln!("\nTopological order ({} tables):", ordered_tables.len());
        for (i, table) in ordered_tables.iter().enumerate() {
            eprintln!("  {}. {}", i + 1, table);
        }
        return Ok(());
    }

    let sql = render_schema(&schema, &order);
    write_output(&sql, output.as_deref())?;

    eprintln!(
        "Processed {} tables in topological order.",
        ordered_tables.len()
    );

    Ok(())
}

/// Write the rendered SQL to the output path, or stdout if none
fn write_output(sql: &str, output: Option<&Path>) -> Result<()> {
    let mut writer: Box<dyn Write> = if let Some(out_path) = output {
        Box::new(BufWriter::new(File::create(out_path).with_context(
            || format!("failed to create {}", out_path.display()),
        )?))
    } else {
        Box::new(BufWriter::new(std::io::stdout()))
    };

    writeln!(writer, "{}", sql)?;
    writer.flush()?;

    if let Some(out_path) = output {
        eprintln!("Ordered SQL written to: {}", out_path.display());
    }

    Ok(())
}

/// Resolve the input format from an explicit flag or the file extension
fn resolve_format(file: &Path, format: Option<String>) -> Result<InputFormat> {
    match format.as_deref() {
        Some("json") => Ok(InputFormat::Json),
        Some("sql") => Ok(InputFormat::Sql),
        Some(other) => bail!("unknown input format: {} (expected json or sql)", other),
        None => Ok(InputFormat::from_extension(file)),
    }
}
