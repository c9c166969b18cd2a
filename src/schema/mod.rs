//! Table definitions and the schema container.
//!
//! This module provides:
//! - Data models for table definitions and foreign keys
//! - SQL DDL extraction (`ddl`) and JSON table-list parsing (`json`)
//!
//! The graph module consumes only table names and FK targets; the rest of
//! each `TableDef` is payload for the renderer.

mod ddl;
mod json;

pub use ddl::*;
pub use json::*;

use ahash::AHashMap;
use serde::Deserialize;
use std::fmt;

/// Unique identifier for a table within a schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(pub u32);

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TableId({})", self.0)
    }
}

/// Foreign key constraint definition
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ForeignKey {
    /// Column in this table
    pub column: String,
    /// Referenced table name
    #[serde(rename = "reference")]
    pub referenced_table: String,
    /// Referenced column name
    #[serde(rename = "reference_column")]
    pub referenced_column: String,
}

/// A single table definition.
///
/// Tables extracted from SQL text keep their raw body and re-emit it
/// verbatim; tables from a JSON list carry structured columns/keys and the
/// renderer rebuilds the statement.
#[derive(Debug, Clone)]
pub struct TableDef {
    /// Table name
    pub name: String,
    /// Table ID within the schema
    pub id: TableId,
    /// Column definitions, as written (e.g. "id INT NOT NULL")
    pub columns: Vec<String>,
    /// Primary key column names (composite PKs keep their order)
    pub primary_keys: Vec<String>,
    /// Foreign key constraints
    pub foreign_keys: Vec<ForeignKey>,
    /// Raw CREATE TABLE body for SQL-sourced tables
    pub body: Option<String>,
}

impl TableDef {
    /// Create a new empty table definition
    pub fn new(name: String, id: TableId) -> Self {
        Self {
            name,
            id,
            columns: Vec::new(),
            primary_keys: Vec::new(),
            foreign_keys: Vec::new(),
            body: None,
        }
    }
}

/// Complete set of table definitions from one input
#[derive(Debug, Default)]
pub struct Schema {
    /// Map from table name to table ID
    tables: AHashMap<String, TableId>,
    /// Table definitions indexed by TableId, in input order
    defs: Vec<TableDef>,
}

impl Schema {
    /// Create a new empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Get table ID by name (case-insensitive fallback)
    pub fn get_table_id(&self, name: &str) -> Option<TableId> {
        if let Some(&id) = self.tables.get(name) {
            return Some(id);
        }
        let name_lower = name.to_lowercase();
        self.tables
            .iter()
            .find(|(k, _)| k.to_lowercase() == name_lower)
            .map(|(_, &id)| id)
    }

    /// Get table definition by ID
    pub fn table(&self, id: TableId) -> Option<&TableDef> {
        self.defs.get(id.0 as usize)
    }

    /// Get table definition by name
    pub fn get_table(&self, name: &str) -> Option<&TableDef> {
        self.get_table_id(name).and_then(|id| self.table(id))
    }

    /// Add a new table definition, returning its ID.
    ///
    /// A duplicate name keeps the first definition and returns its ID.
    pub fn add_table(&mut self, mut def: TableDef) -> TableId {
        if let Some(&existing) = self.tables.get(&def.name) {
            return existing;
        }
        let id = TableId(self.defs.len() as u32);
        def.id = id;
        self.tables.insert(def.name.clone(), id);
        self.defs.push(def);
        id
    }

    /// Get the number of tables
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Check if the schema is empty
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Iterate over all table definitions in input order
    pub fn iter(&self) -> impl Iterator<Item = &TableDef> {
        self.defs.iter()
    }
}
