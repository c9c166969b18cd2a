//! CREATE TABLE extraction from raw SQL text.
//!
//! Pattern-based, not a SQL parser: pulls out `CREATE TABLE name (...);`
//! blocks and the `FOREIGN KEY ... REFERENCES` constraints inside each
//! body. The body text is kept verbatim as the table's payload.

use super::{ForeignKey, Schema, TableDef, TableId};
use once_cell::sync::Lazy;
use regex::Regex;

/// Regex for a full CREATE TABLE block.
/// Supports: `table` (MySQL), "table" (PostgreSQL), table (unquoted), IF NOT EXISTS.
/// The body match is non-greedy up to the first `);` at statement end.
static CREATE_TABLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)CREATE\s+TABLE\s+(?:IF\s+NOT\s+EXISTS\s+)?[`"]?(\w+)[`"]?\s*\((.*?)\)\s*;"#)
        .unwrap()
});

/// Regex for FOREIGN KEY constraints inside a table body
static FOREIGN_KEY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?is)FOREIGN\s+KEY\s*\(([^)]+)\)\s*REFERENCES\s+[`"]?(\w+)[`"]?\s*(?:\(([^)]+)\))?"#,
    )
    .unwrap()
});

/// Parse raw SQL text into a schema of table definitions.
///
/// Text outside CREATE TABLE statements (INSERTs, comments, SET lines) is
/// ignored. A duplicate table name keeps its first definition.
pub fn parse_sql_text(sql: &str) -> Schema {
    let mut schema = Schema::new();

    for caps in CREATE_TABLE_RE.captures_iter(sql) {
        let name = match caps.get(1) {
            Some(m) => m.as_str().to_string(),
            None => continue,
        };
        let body = match caps.get(2) {
            Some(m) => m.as_str().trim().to_string(),
            None => continue,
        };

        let mut table = TableDef::new(name, TableId(0));
        table.foreign_keys = parse_foreign_keys(&body);
        table.body = Some(body);
        schema.add_table(table);
    }

    schema
}

/// Parse FOREIGN KEY constraints from a table body
pub fn parse_foreign_keys(body: &str) -> Vec<ForeignKey> {
    let mut fks = Vec::new();

    for caps in FOREIGN_KEY_RE.captures_iter(body) {
        let column = caps
            .get(1)
            .map(|m| strip_quotes(m.as_str()))
            .unwrap_or_default();
        let referenced_table = caps
            .get(2)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        let referenced_column = caps
            .get(3)
            .map(|m| strip_quotes(m.as_str()))
            .unwrap_or_default();

        if !referenced_table.is_empty() {
            fks.push(ForeignKey {
                column,
                referenced_table,
                referenced_column,
            });
        }
    }

    fks
}

/// Strip surrounding whitespace and quote characters from a column name
fn strip_quotes(s: &str) -> String {
    s.trim().trim_matches('`').trim_matches('"').to_string()
}
