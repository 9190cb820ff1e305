//! Foreign-key commit graph.
//!
//! Changing one table can require touching every table related to it by a
//! foreign key: children must be deleted before their parents and parents
//! inserted before their children. [`CommitGraph`] computes both the set of
//! affected tables and a safe statement order.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use tracing::debug;

use crate::core::schema::TableDef;
use crate::error::{Result, XlateError};

/// Tables linked by their foreign keys.
///
/// Names are qualified (`schema.table`) and matched case-insensitively.
/// Ties in the computed orders follow the order tables were supplied in.
#[derive(Debug, Clone, Default)]
pub struct CommitGraph {
    /// Display names, in declaration order.
    names: Vec<String>,
    /// Lower-cased name → position in `names`.
    index: BTreeMap<String, usize>,
    /// Child → tables it references.
    parents: Vec<BTreeSet<usize>>,
    /// Parent → tables referencing it.
    children: Vec<BTreeSet<usize>>,
}

impl CommitGraph {
    /// Build the graph from table definitions.
    ///
    /// Foreign keys to tables outside `tables` are ignored, as are
    /// self-references, which impose no order between tables.
    pub fn from_tables(tables: &[TableDef]) -> Self {
        let mut graph = Self::default();
        for table in tables {
            let name = table.full_name();
            let key = name.to_lowercase();
            if graph.index.contains_key(&key) {
                continue;
            }
            graph.index.insert(key, graph.names.len());
            graph.names.push(name);
            graph.parents.push(BTreeSet::new());
            graph.children.push(BTreeSet::new());
        }

        for table in tables {
            let Some(child) = graph.position(&table.full_name()) else {
                continue;
            };
            for fk in &table.foreign_keys {
                let target = table.referenced_name(fk);
                match graph.position(&target) {
                    Some(parent) if parent != child => {
                        graph.parents[child].insert(parent);
                        graph.children[parent].insert(child);
                    }
                    Some(_) => {}
                    None => debug!(
                        "{}: foreign key {} references {} outside the graph",
                        table.full_name(),
                        fk.name,
                        target
                    ),
                }
            }
        }
        graph
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.index.get(&name.to_lowercase()).copied()
    }

    fn require(&self, name: &str) -> Result<usize> {
        self.position(name)
            .ok_or_else(|| XlateError::Diff(format!("table {} is not in the commit graph", name)))
    }

    /// All table names, in declaration order.
    pub fn tables(&self) -> &[String] {
        &self.names
    }

    /// Tables `name` references.
    pub fn parents_of(&self, name: &str) -> Result<Vec<&str>> {
        let i = self.require(name)?;
        Ok(self.parents[i].iter().map(|&p| self.names[p].as_str()).collect())
    }

    /// Every table reachable from `dirty` through foreign keys in either
    /// direction, `dirty` included, in declaration order.
    pub fn closure<S: AsRef<str>>(&self, dirty: &[S]) -> Result<Vec<String>> {
        let mut seen = vec![false; self.names.len()];
        let mut queue = VecDeque::new();
        for name in dirty {
            let i = self.require(name.as_ref())?;
            if !seen[i] {
                seen[i] = true;
                queue.push_back(i);
            }
        }

        while let Some(i) = queue.pop_front() {
            for &next in self.parents[i].iter().chain(self.children[i].iter()) {
                if !seen[next] {
                    seen[next] = true;
                    queue.push_back(next);
                }
            }
        }

        Ok(self
            .names
            .iter()
            .zip(seen)
            .filter_map(|(name, keep)| keep.then(|| name.clone()))
            .collect())
    }

    /// Order `set` so every table follows the tables it references.
    ///
    /// # Errors
    ///
    /// [`XlateError::Diff`] for names not in the graph, and when the foreign
    /// keys among `set` form a cycle.
    pub fn insert_order<S: AsRef<str>>(&self, set: &[S]) -> Result<Vec<String>> {
        let mut members = BTreeSet::new();
        for name in set {
            members.insert(self.require(name.as_ref())?);
        }

        let mut pending: BTreeMap<usize, usize> = members
            .iter()
            .map(|&i| (i, self.parents[i].intersection(&members).count()))
            .collect();
        // Declaration order doubles as the tie-breaker.
        let mut ready: BTreeSet<usize> = pending
            .iter()
            .filter_map(|(&i, &n)| (n == 0).then_some(i))
            .collect();
        let mut order = Vec::with_capacity(members.len());

        while let Some(i) = ready.pop_first() {
            pending.remove(&i);
            order.push(self.names[i].clone());
            for child in self.children[i].intersection(&members) {
                if let Some(n) = pending.get_mut(child) {
                    *n -= 1;
                    if *n == 0 {
                        ready.insert(*child);
                    }
                }
            }
        }

        if !pending.is_empty() {
            let cycle: Vec<&str> = pending.keys().map(|&i| self.names[i].as_str()).collect();
            return Err(XlateError::Diff(format!(
                "foreign key cycle among: {}",
                cycle.join(", ")
            )));
        }
        Ok(order)
    }

    /// Order `set` so every table precedes the tables it references.
    pub fn delete_order<S: AsRef<str>>(&self, set: &[S]) -> Result<Vec<String>> {
        let mut order = self.insert_order(set)?;
        order.reverse();
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::{ColumnDef, ForeignKey};
    use crate::core::typespec::TypeSpec;

    fn table(name: &str, refs: &[&str]) -> TableDef {
        TableDef {
            schema: Some("app".to_string()),
            name: name.to_string(),
            columns: vec![ColumnDef {
                name: "id".to_string(),
                spec: TypeSpec::integer_bits(32),
                is_nullable: false,
            }],
            primary_key: vec!["id".to_string()],
            foreign_keys: refs
                .iter()
                .map(|r| ForeignKey {
                    name: format!("fk_{}_{}", name, r),
                    columns: vec![format!("{}_id", r)],
                    ref_table: r.to_string(),
                    ref_schema: None,
                    ref_columns: vec!["id".to_string()],
                })
                .collect(),
        }
    }

    fn shop() -> CommitGraph {
        CommitGraph::from_tables(&[
            table("order_line", &["orders", "product"]),
            table("orders", &["customer"]),
            table("customer", &[]),
            table("product", &[]),
            table("audit", &["audit", "external"]),
        ])
    }

    #[test]
    fn test_insert_order_parents_first() {
        let graph = shop();
        let order = graph
            .insert_order(&["app.order_line", "app.orders", "app.customer", "app.product"])
            .unwrap();
        assert_eq!(
            order,
            vec!["app.customer", "app.orders", "app.product", "app.order_line"]
        );
        let delete = graph
            .delete_order(&["app.order_line", "app.orders", "app.customer", "app.product"])
            .unwrap();
        assert_eq!(
            delete,
            vec!["app.order_line", "app.product", "app.orders", "app.customer"]
        );
    }

    #[test]
    fn test_closure_follows_both_directions() {
        let graph = shop();
        assert_eq!(
            graph.closure(&["APP.CUSTOMER"]).unwrap(),
            vec!["app.order_line", "app.orders", "app.customer", "app.product"]
        );
        assert_eq!(graph.closure(&["app.audit"]).unwrap(), vec!["app.audit"]);
        assert!(graph.closure(&["app.missing"]).is_err());
    }

    #[test]
    fn test_self_and_external_references_ignored() {
        let graph = shop();
        assert!(graph.parents_of("app.audit").unwrap().is_empty());
        assert_eq!(graph.insert_order(&["app.audit"]).unwrap(), vec!["app.audit"]);
    }

    #[test]
    fn test_cycle_is_reported() {
        let graph = CommitGraph::from_tables(&[
            table("a", &["b"]),
            table("b", &["a"]),
            table("c", &[]),
        ]);
        let err = graph.insert_order(&["app.a", "app.b", "app.c"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Diff error: foreign key cycle among: app.a, app.b"
        );
    }
}
