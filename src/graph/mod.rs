//! Table dependency graph and topological ordering.
//!
//! Provides:
//! - Dependency graph construction from FK relationships (or a plain
//!   name -> dependencies mapping)
//! - Kahn's algorithm producing a dependency-first table order
//! - Standalone cycle detection via iterative three-color DFS

use crate::schema::{Schema, TableId};
use ahash::AHashMap;
use std::collections::VecDeque;
use thiserror::Error;

/// Error produced when the graph cannot be linearized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// No valid total order exists. `tables` holds every table left
    /// unordered (in order of first appearance); `path` is one concrete
    /// cycle, rendered as `a -> b -> a`.
    #[error("circular foreign-key dependency: {path}")]
    CycleDetected { tables: Vec<String>, path: String },
}

/// Directed dependency graph over tables.
///
/// An edge t -> d means "t references d via a foreign key", so d must be
/// created before t. References to tables not defined in the input are
/// dropped at construction (treated as pre-existing) and recorded in
/// `unknown_refs` for diagnostics.
#[derive(Debug)]
pub struct DependencyGraph {
    /// Table names in order of first appearance
    names: Vec<String>,
    ids: AHashMap<String, TableId>,
    /// For each table, the tables it references (deduped; self-loops kept)
    deps: Vec<Vec<TableId>>,
    /// For each table, the tables that reference it
    dependents: Vec<Vec<TableId>>,
    /// (table, referenced name) pairs with no matching definition
    unknown_refs: Vec<(String, String)>,
}

impl DependencyGraph {
    /// Build a dependency graph from a parsed schema.
    pub fn from_schema(schema: &Schema) -> Self {
        Self::build(schema.iter().map(|t| {
            (
                t.name.as_str(),
                t.foreign_keys
                    .iter()
                    .map(|fk| fk.referenced_table.as_str())
                    .collect::<Vec<_>>(),
            )
        }))
    }

    /// Build a dependency graph from a plain name -> dependencies mapping.
    ///
    /// Entries are taken in iteration order; a name listed twice collapses
    /// into one node whose dependency lists are merged.
    pub fn from_deps<'a, I, D>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, D)>,
        D: IntoIterator<Item = &'a str>,
    {
        Self::build(
            entries
                .into_iter()
                .map(|(name, deps)| (name, deps.into_iter().collect::<Vec<_>>())),
        )
    }

    fn build<'a>(entries: impl Iterator<Item = (&'a str, Vec<&'a str>)>) -> Self {
        let mut names: Vec<String> = Vec::new();
        let mut ids: AHashMap<String, TableId> = AHashMap::new();
        let mut raw_deps: Vec<Vec<String>> = Vec::new();

        for (name, deps) in entries {
            let id = *ids.entry(name.to_string()).or_insert_with(|| {
                names.push(name.to_string());
                raw_deps.push(Vec::new());
                TableId(names.len() as u32 - 1)
            });
            raw_deps[id.0 as usize].extend(deps.iter().map(|d| d.to_string()));
        }

        let n = names.len();
        let mut resolved: Vec<Vec<TableId>> = vec![Vec::new(); n];
        let mut dependents: Vec<Vec<TableId>> = vec![Vec::new(); n];
        let mut unknown_refs: Vec<(String, String)> = Vec::new();

        for (i, deps) in raw_deps.iter().enumerate() {
            let table = TableId(i as u32);
            for dep in deps {
                match ids.get(dep) {
                    Some(&target) => {
                        if !resolved[i].contains(&target) {
                            resolved[i].push(target);
                            dependents[target.0 as usize].push(table);
                        }
                    }
                    None => unknown_refs.push((names[i].clone(), dep.clone())),
                }
            }
        }

        Self {
            names,
            ids,
            deps: resolved,
            dependents,
            unknown_refs,
        }
    }

    /// Get the number of tables in the graph
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Get the table name for a table ID
    pub fn table_name(&self, id: TableId) -> Option<&str> {
        self.names.get(id.0 as usize).map(|s| s.as_str())
    }

    /// Get the table ID for a name (exact match)
    pub fn table_id(&self, name: &str) -> Option<TableId> {
        self.ids.get(name).copied()
    }

    /// References whose target table is not defined in the input.
    /// These are treated as satisfied by a pre-existing table.
    pub fn unknown_refs(&self) -> &[(String, String)] {
        &self.unknown_refs
    }

    /// Produce a dependency-first topological order using Kahn's algorithm.
    ///
    /// Every table appears after all tables it references. Ties between
    /// simultaneously ready tables resolve in order of first appearance,
    /// so identical input always yields identical output.
    pub fn topo_sort(&self) -> Result<Vec<TableId>, GraphError> {
        let n = self.len();

        // in_degree[t] = unsatisfied dependencies of t
        let mut in_degree: Vec<usize> = self.deps.iter().map(|d| d.len()).collect();

        let mut queue: VecDeque<TableId> = VecDeque::new();
        for (i, &deg) in in_degree.iter().enumerate() {
            if deg == 0 {
                queue.push_back(TableId(i as u32));
            }
        }

        let mut order = Vec::with_capacity(n);

        while let Some(table) = queue.pop_front() {
            order.push(table);

            for &dependent in &self.dependents[table.0 as usize] {
                in_degree[dependent.0 as usize] -= 1;
                if in_degree[dependent.0 as usize] == 0 {
                    queue.push_back(dependent);
                }
            }
        }

        if order.len() < n {
            return Err(self.cycle_error(&in_degree));
        }

        Ok(order)
    }

    /// Check whether any directed cycle exists.
    ///
    /// Three-color DFS with an explicit stack so deep reference chains
    /// cannot exhaust the call stack. Agrees with `topo_sort`: this
    /// returns true exactly when `topo_sort` fails.
    pub fn has_cycle(&self) -> bool {
        #[derive(Clone, Copy, PartialEq)]
        enum Color {
            White,
            Gray,
            Black,
        }

        let n = self.len();
        let mut color = vec![Color::White; n];

        for root in 0..n {
            if color[root] != Color::White {
                continue;
            }

            // (node, index of the next outgoing edge to visit)
            let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
            color[root] = Color::Gray;

            while let Some(&mut (node, ref mut cursor)) = stack.last_mut() {
                if let Some(&next) = self.deps[node].get(*cursor) {
                    *cursor += 1;
                    match color[next.0 as usize] {
                        Color::Gray => return true,
                        Color::White => {
                            color[next.0 as usize] = Color::Gray;
                            stack.push((next.0 as usize, 0));
                        }
                        Color::Black => {}
                    }
                } else {
                    color[node] = Color::Black;
                    stack.pop();
                }
            }
        }

        false
    }

    /// Build the cycle error from the residual in-degrees left by a failed
    /// Kahn pass. Every table with remaining in-degree has at least one
    /// unordered dependency, so walking dependency edges inside the
    /// residual set must revisit a table.
    fn cycle_error(&self, in_degree: &[usize]) -> GraphError {
        let residual: Vec<bool> = in_degree.iter().map(|&d| d > 0).collect();

        let tables: Vec<String> = residual
            .iter()
            .enumerate()
            .filter(|&(_, &r)| r)
            .map(|(i, _)| self.names[i].clone())
            .collect();

        let mut path: Vec<usize> = Vec::new();
        let mut position: AHashMap<usize, usize> = AHashMap::new();
        let mut current = residual.iter().position(|&r| r);

        let cycle = loop {
            let Some(node) = current else {
                break Vec::new();
            };
            if let Some(&start) = position.get(&node) {
                break path[start..].to_vec();
            }
            position.insert(node, path.len());
            path.push(node);
            current = self.deps[node]
                .iter()
                .map(|d| d.0 as usize)
                .find(|&d| residual[d]);
        };

        let mut rendered: Vec<&str> = cycle.iter().map(|&i| self.names[i].as_str()).collect();
        if let Some(&first) = rendered.first() {
            rendered.push(first);
        }

        GraphError::CycleDetected {
            tables,
            path: rendered.join(" -> "),
        }
    }
}
