//! JSON table-list parsing.
//!
//! Accepts an array of table records:
//! `{table_name, columns[], primary_keys[]?, foreign_keys[]?}` where each
//! foreign key is `{column, reference, reference_column}`.

use super::{ForeignKey, Schema, TableDef, TableId};
use anyhow::{Context, Result};
use serde::Deserialize;

/// One table record as it appears in the JSON input
#[derive(Debug, Deserialize)]
pub struct TableRecord {
    pub table_name: String,
    pub columns: Vec<String>,
    #[serde(default)]
    pub primary_keys: Vec<String>,
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKey>,
}

/// Parse a JSON table list into a schema of table definitions.
///
/// A duplicate table name keeps its first record.
pub fn parse_json_text(json: &str) -> Result<Schema> {
    let records: Vec<TableRecord> =
        serde_json::from_str(json).context("malformed JSON table list")?;

    let mut schema = Schema::new();
    for record in records {
        let mut table = TableDef::new(record.table_name, TableId(0));
        table.columns = record.columns;
        table.primary_keys = record.primary_keys;
        table.foreign_keys = record.foreign_keys;
        schema.add_table(table);
    }

    Ok(schema)
}
