//! CREATE TABLE statement rendering in a given order.

use crate::schema::{Schema, TableDef, TableId};

/// Render CREATE TABLE statements for the given table order.
///
/// Statements are separated by a blank line and each ends with a
/// semicolon. SQL-sourced tables re-emit their original body; JSON-sourced
/// tables are rebuilt from their column/key lists.
pub fn render_schema(schema: &Schema, order: &[TableId]) -> String {
    let statements: Vec<String> = order
        .iter()
        .filter_map(|&id| schema.table(id))
        .map(render_table)
        .collect();

    statements.join("\n\n")
}

/// Render a single CREATE TABLE statement
pub fn render_table(table: &TableDef) -> String {
    if let Some(body) = &table.body {
        return format!("CREATE TABLE {} ({});", table.name, body);
    }

    let mut lines: Vec<String> = table.columns.clone();

    if !table.primary_keys.is_empty() {
        lines.push(format!("PRIMARY KEY ({})", table.primary_keys.join(", ")));
    }

    for fk in &table.foreign_keys {
        lines.push(format!(
            "FOREIGN KEY ({}) REFERENCES {}({})",
            fk.column, fk.referenced_table, fk.referenced_column
        ));
    }

    format!(
        "CREATE TABLE {} (\n    {}\n);",
        table.name,
        lines.join(",\n    ")
    )
}
