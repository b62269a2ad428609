// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Dependency analysis over a `WITH` clause: which CTE references which, in
//! what order they can be evaluated, and which ones no other CTE depends on
//! (the formatter's one-liner candidates).

use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};

use crate::ast::*;

/// A directed graph over the aliases of one `WITH` clause: an edge `a -> b`
/// means `a`'s body references `b` as an unqualified table source.
///
/// Leaf-ness is computed on the full graph: a CTE is a leaf iff no *other*
/// CTE's body references it, independent of whether the outer query (the
/// `SELECT` the `WITH` is attached to) references it. Self-references, which
/// a `RECURSIVE` CTE legitimately makes, don't disqualify a CTE from being a
/// leaf, but they do make the graph non-acyclic, so [`CteGraph::topo_order`]
/// reports them via [`CycleDetected`].
#[derive(Debug, Clone)]
pub struct CteGraph {
    names: IndexSet<String>,
    edges: IndexMap<String, IndexSet<String>>,
}

/// The graph contains a cycle; no topological order exists. `remaining` lists
/// the names still unordered when the cycle was hit, in visitation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleDetected {
    pub remaining: Vec<String>,
}

impl CteGraph {
    /// Builds the dependency graph for every CTE directly named in `with`.
    pub fn build(with: &With) -> CteGraph {
        let names: IndexSet<String> = with
            .cte_tables
            .iter()
            .map(|cte| cte.alias.name.value.clone())
            .collect();

        let mut edges = IndexMap::new();
        for cte in &with.cte_tables {
            let mut refs = IndexSet::new();
            let shadow = HashSet::new();
            collect_query_refs(&cte.query, &names, &shadow, &mut refs);
            log::trace!(
                "cte `{}` references {:?}",
                cte.alias.name.value,
                refs.iter().collect::<Vec<_>>()
            );
            edges.insert(cte.alias.name.value.clone(), refs);
        }
        CteGraph { names, edges }
    }

    /// All CTE names known to this graph, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// The set of CTE names `name`'s body references, or `None` if `name`
    /// isn't a member of this graph.
    pub fn references(&self, name: &str) -> Option<&IndexSet<String>> {
        self.edges.get(name)
    }

    /// CTEs that no *other* CTE in this `WITH` clause references. A
    /// self-reference (from a `RECURSIVE` CTE) does not disqualify a name.
    pub fn leaf_names(&self) -> Vec<String> {
        self.names
            .iter()
            .filter(|name| {
                !self
                    .edges
                    .iter()
                    .any(|(from, refs)| from != *name && refs.contains(*name))
            })
            .cloned()
            .collect()
    }

    /// A dependency order in which every CTE appears after every other CTE
    /// its body references. Fails if the graph has a cycle longer than a
    /// single self-reference.
    pub fn topo_order(&self) -> Result<Vec<String>, CycleDetected> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Unvisited,
            InProgress,
            Done,
        }

        let mut marks: IndexMap<&str, Mark> =
            self.names.iter().map(|n| (n.as_str(), Mark::Unvisited)).collect();
        let mut order = Vec::with_capacity(self.names.len());

        fn visit<'a>(
            name: &'a str,
            graph: &'a CteGraph,
            marks: &mut IndexMap<&'a str, Mark>,
            order: &mut Vec<String>,
        ) -> Result<(), CycleDetected> {
            match marks.get(name) {
                Some(Mark::Done) | None => return Ok(()),
                Some(Mark::InProgress) => {
                    return Err(CycleDetected {
                        remaining: marks
                            .iter()
                            .filter(|(_, m)| **m != Mark::Done)
                            .map(|(n, _)| n.to_string())
                            .collect(),
                    })
                }
                Some(Mark::Unvisited) => {}
            }
            marks.insert(name, Mark::InProgress);
            if let Some(refs) = graph.edges.get(name) {
                for dep in refs {
                    visit(dep.as_str(), graph, marks, order)?;
                }
            }
            marks.insert(name, Mark::Done);
            order.push(name.to_string());
            Ok(())
        }

        for name in &self.names {
            visit(name, self, &mut marks, &mut order)?;
        }
        Ok(order)
    }
}

/// Walks `query` looking for unqualified table-source references to any name
/// in `known`, excluding names currently `shadow`ed by a closer-scoped `WITH`.
fn collect_query_refs(
    query: &Query,
    known: &IndexSet<String>,
    shadow: &HashSet<String>,
    refs: &mut IndexSet<String>,
) {
    let mut shadow = shadow.clone();
    if let Some(inner) = &query.with {
        for cte in &inner.cte_tables {
            shadow.insert(cte.alias.name.value.clone());
        }
        for cte in &inner.cte_tables {
            collect_query_refs(&cte.query, known, &shadow, refs);
        }
    }
    collect_set_expr_refs(&query.body, known, &shadow, refs);
    for ob in &query.order_by {
        collect_expr_refs(&ob.expr, known, &shadow, refs);
    }
}

fn collect_set_expr_refs(
    expr: &SetExpr,
    known: &IndexSet<String>,
    shadow: &HashSet<String>,
    refs: &mut IndexSet<String>,
) {
    match expr {
        SetExpr::Select(select) => collect_select_refs(select, known, shadow, refs),
        SetExpr::Query(query) => collect_query_refs(query, known, shadow, refs),
        SetExpr::SetOperation { left, right, .. } => {
            collect_set_expr_refs(left, known, shadow, refs);
            collect_set_expr_refs(right, known, shadow, refs);
        }
        SetExpr::Values(values) => {
            for row in &values.0 {
                for e in row {
                    collect_expr_refs(e, known, shadow, refs);
                }
            }
        }
    }
}

fn collect_select_refs(
    select: &Select,
    known: &IndexSet<String>,
    shadow: &HashSet<String>,
    refs: &mut IndexSet<String>,
) {
    for twj in &select.from {
        collect_table_with_joins_refs(twj, known, shadow, refs);
    }
    for lv in &select.lateral_views {
        collect_expr_refs(&lv.lateral_view, known, shadow, refs);
    }
    for item in &select.projection {
        match item {
            SelectItem::UnnamedExpr(e) | SelectItem::ExprWithAlias { expr: e, .. } => {
                collect_expr_refs(e, known, shadow, refs)
            }
            SelectItem::QualifiedWildcard(_) | SelectItem::Wildcard => {}
        }
    }
    if let Some(e) = &select.selection {
        collect_expr_refs(e, known, shadow, refs);
    }
    for e in &select.group_by {
        collect_expr_refs(e, known, shadow, refs);
    }
    if let Some(e) = &select.having {
        collect_expr_refs(e, known, shadow, refs);
    }
    for win in &select.named_window {
        collect_window_spec_refs(&win.1, known, shadow, refs);
    }
}

fn collect_table_with_joins_refs(
    twj: &TableWithJoins,
    known: &IndexSet<String>,
    shadow: &HashSet<String>,
    refs: &mut IndexSet<String>,
) {
    collect_table_factor_refs(&twj.relation, known, shadow, refs);
    for join in &twj.joins {
        collect_table_factor_refs(&join.relation, known, shadow, refs);
        if let JoinOperator::Inner(c)
        | JoinOperator::LeftOuter(c)
        | JoinOperator::RightOuter(c)
        | JoinOperator::FullOuter(c) = &join.join_operator
        {
            if let JoinConstraint::On(e) = c {
                collect_expr_refs(e, known, shadow, refs);
            }
        }
    }
}

fn collect_table_factor_refs(
    table: &TableFactor,
    known: &IndexSet<String>,
    shadow: &HashSet<String>,
    refs: &mut IndexSet<String>,
) {
    match table {
        TableFactor::Table { name, args, .. } => {
            if name.0.len() == 1 {
                let candidate = &name.0[0].value;
                if known.contains(candidate) && !shadow.contains(candidate) {
                    refs.insert(candidate.clone());
                }
            }
            for arg in args.iter().flatten() {
                let e = match arg {
                    FunctionArg::Unnamed(e) => e,
                    FunctionArg::Named { arg, .. } => arg,
                };
                collect_expr_refs(e, known, shadow, refs);
            }
        }
        TableFactor::Derived { subquery, .. } => {
            collect_query_refs(subquery, known, shadow, refs);
        }
        TableFactor::TableFunction { expr, .. } => {
            collect_expr_refs(expr, known, shadow, refs);
        }
        TableFactor::UNNEST { array_expr, .. } => {
            collect_expr_refs(array_expr, known, shadow, refs);
        }
        TableFactor::NestedJoin(twj) => {
            collect_table_with_joins_refs(twj, known, shadow, refs);
        }
    }
}

fn collect_window_spec_refs(
    spec: &WindowSpec,
    known: &IndexSet<String>,
    shadow: &HashSet<String>,
    refs: &mut IndexSet<String>,
) {
    for e in &spec.partition_by {
        collect_expr_refs(e, known, shadow, refs);
    }
    for ob in &spec.order_by {
        collect_expr_refs(&ob.expr, known, shadow, refs);
    }
}

fn collect_expr_refs(
    expr: &Expr,
    known: &IndexSet<String>,
    shadow: &HashSet<String>,
    refs: &mut IndexSet<String>,
) {
    match expr {
        Expr::Identifier(_)
        | Expr::CompoundIdentifier(_)
        | Expr::Wildcard
        | Expr::QualifiedWildcard(_)
        | Expr::Value(_) => {}
        Expr::Nested(e)
        | Expr::UnaryOp { expr: e, .. }
        | Expr::IsNull(e)
        | Expr::IsNotNull(e)
        | Expr::IsTrue(e)
        | Expr::IsNotTrue(e)
        | Expr::IsFalse(e)
        | Expr::IsNotFalse(e)
        | Expr::Cast { expr: e, .. }
        | Expr::TryCast { expr: e, .. }
        | Expr::Collate { expr: e, .. }
        | Expr::Extract { expr: e, .. }
        | Expr::ArrayIndex { obj: e, .. } => collect_expr_refs(e, known, shadow, refs),
        Expr::BinaryOp { left, right, .. } => {
            collect_expr_refs(left, known, shadow, refs);
            collect_expr_refs(right, known, shadow, refs);
        }
        Expr::Between {
            expr, low, high, ..
        } => {
            collect_expr_refs(expr, known, shadow, refs);
            collect_expr_refs(low, known, shadow, refs);
            collect_expr_refs(high, known, shadow, refs);
        }
        Expr::InList { expr, list, .. } => {
            collect_expr_refs(expr, known, shadow, refs);
            for e in list {
                collect_expr_refs(e, known, shadow, refs);
            }
        }
        Expr::InSubquery {
            expr, subquery, ..
        } => {
            collect_expr_refs(expr, known, shadow, refs);
            collect_query_refs(subquery, known, shadow, refs);
        }
        Expr::IsDistinctFrom(l, r) | Expr::IsNotDistinctFrom(l, r) => {
            collect_expr_refs(l, known, shadow, refs);
            collect_expr_refs(r, known, shadow, refs);
        }
        Expr::Like { expr, pattern, .. }
        | Expr::ILike { expr, pattern, .. }
        | Expr::SimilarTo { expr, pattern, .. } => {
            collect_expr_refs(expr, known, shadow, refs);
            collect_expr_refs(pattern, known, shadow, refs);
        }
        Expr::Position { expr, r#in } => {
            collect_expr_refs(expr, known, shadow, refs);
            collect_expr_refs(r#in, known, shadow, refs);
        }
        Expr::Substring {
            expr,
            substring_from,
            substring_for,
        } => {
            collect_expr_refs(expr, known, shadow, refs);
            if let Some(e) = substring_from {
                collect_expr_refs(e, known, shadow, refs);
            }
            if let Some(e) = substring_for {
                collect_expr_refs(e, known, shadow, refs);
            }
        }
        Expr::Trim {
            expr, trim_what, ..
        } => {
            collect_expr_refs(expr, known, shadow, refs);
            if let Some(e) = trim_what {
                collect_expr_refs(e, known, shadow, refs);
            }
        }
        Expr::Overlay {
            expr,
            overlay_what,
            overlay_from,
            overlay_for,
        } => {
            collect_expr_refs(expr, known, shadow, refs);
            collect_expr_refs(overlay_what, known, shadow, refs);
            collect_expr_refs(overlay_from, known, shadow, refs);
            if let Some(e) = overlay_for {
                collect_expr_refs(e, known, shadow, refs);
            }
        }
        Expr::AtTimeZone { timestamp, .. } => collect_expr_refs(timestamp, known, shadow, refs),
        Expr::Case {
            operand,
            conditions,
            results,
            else_result,
        } => {
            if let Some(e) = operand {
                collect_expr_refs(e, known, shadow, refs);
            }
            for e in conditions.iter().chain(results.iter()) {
                collect_expr_refs(e, known, shadow, refs);
            }
            if let Some(e) = else_result {
                collect_expr_refs(e, known, shadow, refs);
            }
        }
        Expr::Exists { subquery, .. } | Expr::Subquery(subquery) => {
            collect_query_refs(subquery, known, shadow, refs);
        }
        Expr::Array(items) | Expr::Tuple(items) => {
            for e in items {
                collect_expr_refs(e, known, shadow, refs);
            }
        }
        Expr::Function(func) => {
            for arg in &func.args {
                let e = match arg {
                    FunctionArg::Unnamed(e) => e,
                    FunctionArg::Named { arg, .. } => arg,
                };
                collect_expr_refs(e, known, shadow, refs);
            }
            for ob in &func.order_by {
                collect_expr_refs(&ob.expr, known, shadow, refs);
            }
            if let Some(e) = &func.filter {
                collect_expr_refs(e, known, shadow, refs);
            }
            if let Some(within_group) = &func.within_group {
                for ob in within_group {
                    collect_expr_refs(&ob.expr, known, shadow, refs);
                }
            }
            if let Some(WindowType::Spec(spec)) = &func.over {
                collect_window_spec_refs(spec, known, shadow, refs);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_query;

    fn with_of(sql: &str) -> With {
        parse_query(sql).unwrap().with.unwrap()
    }

    #[test]
    fn direct_reference_is_an_edge() {
        let with = with_of(
            "with base as (select id from users), enriched as (select id from base) \
             select * from enriched",
        );
        let graph = CteGraph::build(&with);
        assert_eq!(
            graph.references("enriched").unwrap().iter().collect::<Vec<_>>(),
            vec!["base"]
        );
        assert!(graph.references("base").unwrap().is_empty());
    }

    #[test]
    fn leaf_names_ignores_outer_query_usage() {
        let with = with_of(
            "with base as (select id from users), enriched as (select id from base) \
             select * from enriched",
        );
        let graph = CteGraph::build(&with);
        // `base` is referenced by `enriched`, so it is not a leaf even though
        // nothing in the outer query touches it directly.
        assert_eq!(graph.leaf_names(), vec!["enriched".to_string()]);
    }

    #[test]
    fn topo_order_puts_dependencies_first() {
        let with = with_of(
            "with base as (select id from users), enriched as (select id from base) \
             select * from enriched",
        );
        let graph = CteGraph::build(&with);
        assert_eq!(
            graph.topo_order().unwrap(),
            vec!["base".to_string(), "enriched".to_string()]
        );
    }

    #[test]
    fn shadowed_name_from_inner_with_is_not_an_edge() {
        let with = with_of(
            "with base as (select id from users), \
             outer_ref as (select * from (with base as (select 1 as id) select * from base) t) \
             select * from outer_ref",
        );
        let graph = CteGraph::build(&with);
        assert!(graph.references("outer_ref").unwrap().is_empty());
    }

    #[test]
    fn recursive_self_reference_is_detected_as_a_cycle() {
        let with = with_of(
            "with recursive counter as (select 1 as n union all select n + 1 from counter) \
             select * from counter",
        );
        let graph = CteGraph::build(&with);
        assert!(graph.references("counter").unwrap().contains("counter"));
        assert!(graph.topo_order().is_err());
        // A self-reference alone still counts as a leaf: nothing *else*
        // depends on it.
        assert_eq!(graph.leaf_names(), vec!["counter".to_string()]);
    }
}
