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

//! Stage 1 of the formatter: lowering an AST node into a dialect-agnostic
//! tree of [`PrintToken`]s. [`DialectDisplay`] is still used underneath for
//! leaf text (identifier quoting, literal escaping) — `Lower` impls call
//! `DialectDisplay::sql` for text with no further pretty-printing structure
//! and wrap the result in the right [`TokenKind`]/[`ContainerKind`], adding
//! real children only where the line printer needs to see structure: clause
//! keywords (so `keywordCase` can retag them independent of identifier/
//! literal text), comma lists (for `commaBreak`), and top-level `AND` chains
//! (for `andBreak`).
//!
//! Keyword text is always lowered in canonical lowercase (matching the
//! tokenizer's own case-folding of keyword lexemes); `keywordCase` then
//! applies `none` (leave as lowered), `upper`, or `lower` (a no-op) on top.

use crate::ast::*;
use crate::dialect::{Dialect, DialectDisplay};
use crate::error::SqlGenError;
use crate::format::options::FormatOptions;
use crate::format::printer::ParamBinder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Keyword,
    Identifier,
    Literal,
    Operator,
    Comma,
    Parameter,
    Comment,
    /// Structural node: no text of its own, only `children`.
    Container,
}

/// Tags a [`TokenKind::Container`] token with the grammar production it came
/// from, driving the printer's indent/newline decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Query,
    SetOperation,
    Select,
    Projection,
    From,
    Join,
    Where,
    GroupBy,
    Having,
    OrderBy,
    Window,
    Limit,
    Offset,
    With,
    CommonTable,
    Values,
    ValuesRow,
    SubQuerySource,
    Case,
    FunctionArgs,
    AndChain,
    /// A single expression (or other leaf text) rendered by `DialectDisplay`
    /// with no further internal structure.
    Opaque,
}

#[derive(Debug, Clone)]
pub struct PrintToken {
    pub kind: TokenKind,
    pub text: String,
    pub container: Option<ContainerKind>,
    pub children: Vec<PrintToken>,
    pub leading_comments: Vec<String>,
}

impl PrintToken {
    pub fn leaf(kind: TokenKind, text: impl Into<String>) -> Self {
        PrintToken {
            kind,
            text: text.into(),
            container: None,
            children: Vec::new(),
            leading_comments: Vec::new(),
        }
    }

    pub fn keyword(text: &'static str) -> Self {
        Self::leaf(TokenKind::Keyword, text)
    }

    pub fn comma() -> Self {
        Self::leaf(TokenKind::Comma, ",")
    }

    pub fn container(kind: ContainerKind, children: Vec<PrintToken>) -> Self {
        PrintToken {
            kind: TokenKind::Container,
            text: String::new(),
            container: Some(kind),
            children,
            leading_comments: Vec::new(),
        }
    }

    /// A single opaque token holding `node`'s full `DialectDisplay` text, for
    /// expression interiors the lowering doesn't break down further. The
    /// dialect's own keyword casing conventions (baked into `DialectDisplay`
    /// as uppercase) are normalized to lowercase here, so `keywordCase`
    /// behaves consistently whether a keyword came through as a real
    /// `Keyword` token or inside an opaque blob.
    pub fn opaque(node: &impl DialectDisplay, dialect: &Dialect) -> Result<Self, SqlGenError> {
        Ok(PrintToken {
            kind: TokenKind::Literal,
            text: node.sql(dialect)?,
            container: Some(ContainerKind::Opaque),
            children: Vec::new(),
            leading_comments: Vec::new(),
        })
    }

    /// A comma-separated list of already-lowered children, tagged `kind` so
    /// the printer can apply `commaBreak` between them.
    fn comma_list(kind: ContainerKind, items: Vec<PrintToken>) -> PrintToken {
        let mut children = Vec::with_capacity(items.len() * 2);
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                children.push(PrintToken::comma());
            }
            children.push(item);
        }
        PrintToken::container(kind, children)
    }
}

/// Implemented by every AST node Stage 1 knows how to lower. Composes with
/// [`DialectDisplay`]: a `Lower` impl calls `DialectDisplay::sql` for any
/// leaf text it doesn't break down further.
pub trait Lower {
    fn lower(
        &self,
        dialect: &Dialect,
        opts: &FormatOptions,
        params: &mut ParamBinder,
    ) -> Result<PrintToken, SqlGenError>;
}

/// Splits a boolean expression into its top-level `AND` operands, in source
/// order, for `andBreak` to act on. Anything that isn't itself a top-level
/// `AND` lowers as one opaque child.
pub fn and_chain(expr: &Expr) -> Vec<&Expr> {
    fn walk<'a>(expr: &'a Expr, out: &mut Vec<&'a Expr>) {
        match expr {
            Expr::BinaryOp {
                left,
                op: BinaryOperator::And,
                right,
            } => {
                walk(left, out);
                walk(right, out);
            }
            other => out.push(other),
        }
    }
    let mut out = Vec::new();
    walk(expr, &mut out);
    out
}

impl Lower for Expr {
    fn lower(
        &self,
        dialect: &Dialect,
        opts: &FormatOptions,
        params: &mut ParamBinder,
    ) -> Result<PrintToken, SqlGenError> {
        if let Expr::Value(Value::Placeholder(raw)) = self {
            return Ok(params.bind(raw));
        }
        // `NULL` is common enough in the concrete scenarios this formatter is
        // held to that it gets its own keyword token rather than riding along
        // inside `Value`'s baked-uppercase `DialectDisplay` text (see
        // DESIGN.md for the other literal keywords, e.g. `INTERVAL`, that
        // don't get this treatment).
        if let Expr::Value(Value::Null) = self {
            return Ok(PrintToken::keyword("null"));
        }
        if let Expr::Case {
            operand,
            conditions,
            results,
            else_result,
        } = self
        {
            let mut children = vec![PrintToken::keyword("case")];
            if let Some(operand) = operand {
                children.push(operand.lower(dialect, opts, params)?);
            }
            for (cond, res) in conditions.iter().zip(results.iter()) {
                children.push(PrintToken::keyword("when"));
                children.push(cond.lower(dialect, opts, params)?);
                children.push(PrintToken::keyword("then"));
                children.push(res.lower(dialect, opts, params)?);
            }
            if let Some(else_result) = else_result {
                children.push(PrintToken::keyword("else"));
                children.push(else_result.lower(dialect, opts, params)?);
            }
            children.push(PrintToken::keyword("end"));
            return Ok(PrintToken::container(ContainerKind::Case, children));
        }
        let operands = and_chain(self);
        if operands.len() > 1 {
            let mut children = Vec::with_capacity(operands.len() * 2 - 1);
            for (i, operand) in operands.iter().enumerate() {
                if i > 0 {
                    children.push(PrintToken::keyword("and"));
                }
                children.push(operand.lower(dialect, opts, params)?);
            }
            return Ok(PrintToken::container(ContainerKind::AndChain, children));
        }
        PrintToken::opaque(self, dialect)
    }
}

impl Lower for Query {
    fn lower(
        &self,
        dialect: &Dialect,
        opts: &FormatOptions,
        params: &mut ParamBinder,
    ) -> Result<PrintToken, SqlGenError> {
        let mut children = Vec::new();
        if let Some(with) = &self.with {
            children.push(with.lower(dialect, opts, params)?);
        }
        children.push(self.body.lower(dialect, opts, params)?);
        if !self.order_by.is_empty() {
            let items = self
                .order_by
                .iter()
                .map(|ob| PrintToken::opaque(ob, dialect))
                .collect::<Result<Vec<_>, _>>()?;
            children.push(PrintToken::container(
                ContainerKind::OrderBy,
                vec![
                    PrintToken::keyword("order by"),
                    PrintToken::comma_list(ContainerKind::OrderBy, items),
                ],
            ));
        }
        if let Some(limit) = &self.limit {
            children.push(PrintToken::container(
                ContainerKind::Limit,
                vec![PrintToken::keyword("limit"), limit.lower(dialect, opts, params)?],
            ));
        }
        if let Some(offset) = &self.offset {
            children.push(PrintToken::container(
                ContainerKind::Offset,
                vec![PrintToken::opaque(offset, dialect)?],
            ));
        }
        if let Some(fetch) = &self.fetch {
            children.push(PrintToken::opaque(fetch, dialect)?);
        }
        if let Some(lock) = &self.lock {
            children.push(PrintToken::opaque(lock, dialect)?);
        }
        Ok(PrintToken::container(ContainerKind::Query, children))
    }
}

impl Lower for SetExpr {
    fn lower(
        &self,
        dialect: &Dialect,
        opts: &FormatOptions,
        params: &mut ParamBinder,
    ) -> Result<PrintToken, SqlGenError> {
        match self {
            SetExpr::Select(select) => select.lower(dialect, opts, params),
            SetExpr::Query(query) => query.lower(dialect, opts, params),
            SetExpr::Values(values) => values.lower(dialect, opts, params),
            SetExpr::SetOperation {
                op,
                all,
                left,
                right,
            } => {
                let op_kw: &'static str = match op {
                    SetOperator::Union if *all => "union all",
                    SetOperator::Union => "union",
                    SetOperator::Except => "except",
                    SetOperator::Intersect => "intersect",
                };
                Ok(PrintToken::container(
                    ContainerKind::SetOperation,
                    vec![
                        left.lower(dialect, opts, params)?,
                        PrintToken::keyword(op_kw),
                        right.lower(dialect, opts, params)?,
                    ],
                ))
            }
        }
    }
}

impl Lower for Select {
    fn lower(
        &self,
        dialect: &Dialect,
        opts: &FormatOptions,
        params: &mut ParamBinder,
    ) -> Result<PrintToken, SqlGenError> {
        let mut header = vec![PrintToken::keyword("select")];
        match &self.distinct {
            None => {}
            Some(Distinct::All) => header.push(PrintToken::keyword("distinct")),
            Some(Distinct::On(exprs)) => {
                header.push(PrintToken::keyword("distinct on"));
                let items = exprs
                    .iter()
                    .map(|e| e.lower(dialect, opts, params))
                    .collect::<Result<Vec<_>, _>>()?;
                header.push(PrintToken::container(
                    ContainerKind::Opaque,
                    vec![
                        PrintToken::leaf(TokenKind::Operator, "("),
                        PrintToken::comma_list(ContainerKind::Opaque, items),
                        PrintToken::leaf(TokenKind::Operator, ")"),
                    ],
                ));
            }
        }
        if let Some(top) = &self.top {
            header.push(PrintToken::opaque(top, dialect)?);
        }
        let mut children = header;
        let projection = self
            .projection
            .iter()
            .map(|item| item.lower(dialect, opts, params))
            .collect::<Result<Vec<_>, _>>()?;
        children.push(PrintToken::comma_list(ContainerKind::Projection, projection));
        if let Some(into) = &self.into {
            children.push(PrintToken::opaque(into, dialect)?);
        }
        if !self.from.is_empty() {
            let sources = self
                .from
                .iter()
                .map(|twj| twj.lower(dialect, opts, params))
                .collect::<Result<Vec<_>, _>>()?;
            let mut from_children = vec![PrintToken::keyword("from")];
            from_children.push(PrintToken::comma_list(ContainerKind::From, sources));
            children.push(PrintToken::container(ContainerKind::From, from_children));
        }
        for lv in &self.lateral_views {
            children.push(PrintToken::opaque(lv, dialect)?);
        }
        if let Some(selection) = &self.selection {
            children.push(PrintToken::container(
                ContainerKind::Where,
                vec![PrintToken::keyword("where"), selection.lower(dialect, opts, params)?],
            ));
        }
        if !self.group_by.is_empty() {
            let items = self
                .group_by
                .iter()
                .map(|e| e.lower(dialect, opts, params))
                .collect::<Result<Vec<_>, _>>()?;
            children.push(PrintToken::container(
                ContainerKind::GroupBy,
                vec![
                    PrintToken::keyword("group by"),
                    PrintToken::comma_list(ContainerKind::GroupBy, items),
                ],
            ));
        }
        if let Some(having) = &self.having {
            children.push(PrintToken::container(
                ContainerKind::Having,
                vec![PrintToken::keyword("having"), having.lower(dialect, opts, params)?],
            ));
        }
        if !self.named_window.is_empty() {
            let items = self
                .named_window
                .iter()
                .map(|w| PrintToken::opaque(w, dialect))
                .collect::<Result<Vec<_>, _>>()?;
            children.push(PrintToken::container(
                ContainerKind::Window,
                vec![
                    PrintToken::keyword("window"),
                    PrintToken::comma_list(ContainerKind::Window, items),
                ],
            ));
        }
        Ok(PrintToken::container(ContainerKind::Select, children))
    }
}

impl Lower for With {
    fn lower(
        &self,
        dialect: &Dialect,
        opts: &FormatOptions,
        params: &mut ParamBinder,
    ) -> Result<PrintToken, SqlGenError> {
        let mut header = vec![PrintToken::keyword("with")];
        if self.recursive {
            header.push(PrintToken::keyword("recursive"));
        }

        let leaves = if opts.cte_oneline_dependency && !opts.cte_oneline {
            let graph = crate::cte::CteGraph::build(self);
            Some(graph.leaf_names().into_iter().collect::<std::collections::HashSet<_>>())
        } else {
            None
        };
        if let Some(leaves) = &leaves {
            for name in &self.cte_tables {
                if leaves.contains(&name.alias.name.value) {
                    header.push(PrintToken::leaf(
                        TokenKind::Comment,
                        format!("/* import {}.cte.sql */", name.alias.name.value),
                    ));
                }
            }
        }

        let mut tables = Vec::with_capacity(self.cte_tables.len());
        for cte in &self.cte_tables {
            let force_oneline = opts.cte_oneline
                || leaves.as_ref().is_some_and(|l| l.contains(&cte.alias.name.value));
            tables.push(cte.lower_with(dialect, opts, params, force_oneline)?);
        }
        let mut children = header;
        children.push(PrintToken::comma_list(ContainerKind::With, tables));
        Ok(PrintToken::container(ContainerKind::With, children))
    }
}

impl Cte {
    /// Lowers one common table. `force_oneline` renders the body via a
    /// recursive sub-format with `newline` forced to `" "`, per the CTE
    /// one-liner policy (either `cteOneline` globally, or this CTE being a
    /// leaf under `cteOnelineDependency`).
    fn lower_with(
        &self,
        dialect: &Dialect,
        opts: &FormatOptions,
        params: &mut ParamBinder,
        force_oneline: bool,
    ) -> Result<PrintToken, SqlGenError> {
        let mut children = vec![PrintToken::opaque(&self.alias, dialect)?, PrintToken::keyword("as")];
        match self.materialized {
            Some(true) => children.push(PrintToken::keyword("materialized")),
            Some(false) => children.push(PrintToken::keyword("not materialized")),
            None => {}
        }
        let body = if force_oneline {
            let oneline_opts = FormatOptions {
                newline: " ".to_string(),
                ..opts.clone()
            };
            let text = crate::format::format_query(&self.query, dialect, &oneline_opts)?.sql;
            PrintToken::leaf(TokenKind::Literal, format!("({})", text))
        } else {
            let inner = self.query.lower(dialect, opts, params)?;
            PrintToken::container(ContainerKind::SubQuerySource, vec![inner])
        };
        children.push(body);
        if let Some(from) = &self.from {
            children.push(PrintToken::keyword("from"));
            children.push(PrintToken::opaque(from, dialect)?);
        }
        Ok(PrintToken::container(ContainerKind::CommonTable, children))
    }
}

impl Lower for SelectItem {
    fn lower(
        &self,
        dialect: &Dialect,
        opts: &FormatOptions,
        params: &mut ParamBinder,
    ) -> Result<PrintToken, SqlGenError> {
        match self {
            SelectItem::UnnamedExpr(expr) => expr.lower(dialect, opts, params),
            SelectItem::ExprWithAlias { expr, alias } => Ok(PrintToken::container(
                ContainerKind::Opaque,
                vec![
                    expr.lower(dialect, opts, params)?,
                    PrintToken::keyword("as"),
                    PrintToken::opaque(alias, dialect)?,
                ],
            )),
            SelectItem::QualifiedWildcard(_) | SelectItem::Wildcard => {
                PrintToken::opaque(self, dialect)
            }
        }
    }
}

impl Lower for TableWithJoins {
    fn lower(
        &self,
        dialect: &Dialect,
        opts: &FormatOptions,
        params: &mut ParamBinder,
    ) -> Result<PrintToken, SqlGenError> {
        let mut children = vec![self.relation.lower(dialect, opts, params)?];
        for join in &self.joins {
            children.push(join.lower(dialect, opts, params)?);
        }
        Ok(PrintToken::container(ContainerKind::Opaque, children))
    }
}

impl Lower for TableFactor {
    fn lower(
        &self,
        dialect: &Dialect,
        opts: &FormatOptions,
        params: &mut ParamBinder,
    ) -> Result<PrintToken, SqlGenError> {
        match self {
            TableFactor::Table {
                name,
                alias,
                args,
                with_hints,
            } => {
                // The alias is broken out into a real `as` keyword token so
                // `keywordCase` affects it; `name`/`args`/`with_hints` have no
                // keyword text of their own and stay one opaque blob.
                let head = TableFactor::Table {
                    name: name.clone(),
                    alias: None,
                    args: args.clone(),
                    with_hints: with_hints.clone(),
                };
                let mut children = vec![PrintToken::opaque(&head, dialect)?];
                if let Some(alias) = alias {
                    children.push(PrintToken::keyword("as"));
                    children.push(PrintToken::opaque(alias, dialect)?);
                }
                Ok(PrintToken::container(ContainerKind::Opaque, children))
            }
            TableFactor::Derived {
                subquery, alias, ..
            } => {
                let mut children = vec![PrintToken::container(
                    ContainerKind::SubQuerySource,
                    vec![subquery.lower(dialect, opts, params)?],
                )];
                if let Some(alias) = alias {
                    children.push(PrintToken::keyword("as"));
                    children.push(PrintToken::opaque(alias, dialect)?);
                }
                Ok(PrintToken::container(ContainerKind::Opaque, children))
            }
            TableFactor::TableFunction { .. }
            | TableFactor::UNNEST { .. }
            | TableFactor::NestedJoin(_) => PrintToken::opaque(self, dialect),
        }
    }
}

impl Lower for Join {
    fn lower(
        &self,
        dialect: &Dialect,
        opts: &FormatOptions,
        params: &mut ParamBinder,
    ) -> Result<PrintToken, SqlGenError> {
        let kw: &'static str = match &self.join_operator {
            JoinOperator::Inner(JoinConstraint::Natural) => "natural join",
            JoinOperator::Inner(_) => "join",
            JoinOperator::LeftOuter(JoinConstraint::Natural) => "natural left join",
            JoinOperator::LeftOuter(_) => "left join",
            JoinOperator::RightOuter(JoinConstraint::Natural) => "natural right join",
            JoinOperator::RightOuter(_) => "right join",
            JoinOperator::FullOuter(JoinConstraint::Natural) => "natural full join",
            JoinOperator::FullOuter(_) => "full join",
            JoinOperator::CrossJoin => "cross join",
            JoinOperator::CrossApply => "cross apply",
            JoinOperator::OuterApply => "outer apply",
        };
        let mut children = vec![PrintToken::keyword(kw), self.relation.lower(dialect, opts, params)?];
        let constraint = match &self.join_operator {
            JoinOperator::Inner(c)
            | JoinOperator::LeftOuter(c)
            | JoinOperator::RightOuter(c)
            | JoinOperator::FullOuter(c) => Some(c),
            _ => None,
        };
        match constraint {
            Some(JoinConstraint::On(expr)) => {
                children.push(PrintToken::keyword("on"));
                children.push(expr.lower(dialect, opts, params)?);
            }
            Some(JoinConstraint::Using(cols)) => {
                children.push(PrintToken::keyword("using"));
                let items = cols
                    .iter()
                    .map(|c| PrintToken::opaque(c, dialect))
                    .collect::<Result<Vec<_>, _>>()?;
                children.push(PrintToken::container(ContainerKind::Opaque, vec![
                    PrintToken::leaf(TokenKind::Operator, "("),
                    PrintToken::comma_list(ContainerKind::Opaque, items),
                    PrintToken::leaf(TokenKind::Operator, ")"),
                ]));
            }
            _ => {}
        }
        Ok(PrintToken::container(ContainerKind::Join, children))
    }
}

impl Lower for Values {
    fn lower(
        &self,
        dialect: &Dialect,
        opts: &FormatOptions,
        params: &mut ParamBinder,
    ) -> Result<PrintToken, SqlGenError> {
        let mut rows = Vec::with_capacity(self.0.len());
        for row in &self.0 {
            let items = row
                .iter()
                .map(|e| e.lower(dialect, opts, params))
                .collect::<Result<Vec<_>, _>>()?;
            let mut row_children = vec![PrintToken::leaf(TokenKind::Operator, "(")];
            row_children.push(PrintToken::comma_list(ContainerKind::ValuesRow, items));
            row_children.push(PrintToken::leaf(TokenKind::Operator, ")"));
            rows.push(PrintToken::container(ContainerKind::ValuesRow, row_children));
        }
        let mut children = vec![PrintToken::keyword("values")];
        children.push(PrintToken::comma_list(ContainerKind::Values, rows));
        Ok(PrintToken::container(ContainerKind::Values, children))
    }
}
