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

#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, string::String, vec::Vec};
use std::fmt;

use crate::ast::query::{OrderByExpr, Query};
use crate::ast::value::{DateTimeField, TrimWhereField, Value};
use crate::ast::{display_comma_separated, Ident, ObjectName};
use crate::dialect::{Dialect, DialectDisplay};
use crate::error::{FormatError, SqlGenError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::DataType;

/// The expression family: operators, function calls, `CASE`, `CAST`, window
/// functions, subqueries used as a value, and every other non-clause AST node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A single, unqualified identifier: `id`.
    Identifier(Ident),
    /// A dotted chain of identifiers: `t.id`, `db.schema.t.id`.
    CompoundIdentifier(Vec<Ident>),
    /// A bare `*` in select-item position.
    Wildcard,
    /// `alias.*` or `schema.table.*` in select-item position.
    QualifiedWildcard(ObjectName),
    /// A literal value, parameter placeholder, or interval.
    Value(Value),
    /// `(expr)` — preserved rather than unwrapped, so round-tripping is exact.
    Nested(Box<Expr>),
    UnaryOp {
        op: UnaryOperator,
        expr: Box<Expr>,
    },
    BinaryOp {
        left: Box<Expr>,
        op: BinaryOperator,
        right: Box<Expr>,
    },
    /// `expr [NOT] BETWEEN low AND high`
    Between {
        expr: Box<Expr>,
        negated: bool,
        low: Box<Expr>,
        high: Box<Expr>,
    },
    /// `expr [NOT] IN (list, of, exprs)`
    InList {
        expr: Box<Expr>,
        list: Vec<Expr>,
        negated: bool,
    },
    /// `expr [NOT] IN (subquery)`
    InSubquery {
        expr: Box<Expr>,
        subquery: Box<Query>,
        negated: bool,
    },
    IsNull(Box<Expr>),
    IsNotNull(Box<Expr>),
    IsTrue(Box<Expr>),
    IsNotTrue(Box<Expr>),
    IsFalse(Box<Expr>),
    IsNotFalse(Box<Expr>),
    IsDistinctFrom(Box<Expr>, Box<Expr>),
    IsNotDistinctFrom(Box<Expr>, Box<Expr>),
    /// `expr [NOT] LIKE pattern [ESCAPE esc]`
    Like {
        negated: bool,
        expr: Box<Expr>,
        pattern: Box<Expr>,
        escape_char: Option<char>,
    },
    ILike {
        negated: bool,
        expr: Box<Expr>,
        pattern: Box<Expr>,
        escape_char: Option<char>,
    },
    /// `expr [NOT] SIMILAR TO pattern [ESCAPE esc]`
    SimilarTo {
        negated: bool,
        expr: Box<Expr>,
        pattern: Box<Expr>,
        escape_char: Option<char>,
    },
    /// `CAST(expr AS type)` or `expr::type`.
    Cast {
        expr: Box<Expr>,
        data_type: DataType,
        double_colon: bool,
    },
    TryCast {
        expr: Box<Expr>,
        data_type: DataType,
    },
    Collate {
        expr: Box<Expr>,
        collation: ObjectName,
    },
    Extract {
        field: DateTimeField,
        expr: Box<Expr>,
    },
    Position {
        expr: Box<Expr>,
        r#in: Box<Expr>,
    },
    Substring {
        expr: Box<Expr>,
        substring_from: Option<Box<Expr>>,
        substring_for: Option<Box<Expr>>,
    },
    Trim {
        expr: Box<Expr>,
        trim_where: Option<TrimWhereField>,
        trim_what: Option<Box<Expr>>,
    },
    Overlay {
        expr: Box<Expr>,
        overlay_what: Box<Expr>,
        overlay_from: Box<Expr>,
        overlay_for: Option<Box<Expr>>,
    },
    AtTimeZone {
        timestamp: Box<Expr>,
        time_zone: String,
    },
    Case {
        operand: Option<Box<Expr>>,
        conditions: Vec<Expr>,
        results: Vec<Expr>,
        else_result: Option<Box<Expr>>,
    },
    Exists {
        subquery: Box<Query>,
        negated: bool,
    },
    Subquery(Box<Query>),
    Array(Vec<Expr>),
    ArrayIndex {
        obj: Box<Expr>,
        indexes: Vec<Expr>,
    },
    /// `(a, b, c)` as a value (row constructor), distinct from a parenthesized
    /// single expression ([`Expr::Nested`]).
    Tuple(Vec<Expr>),
    Function(Function),
}

impl DialectDisplay for Expr {
    fn fmt(&self, f: &mut (dyn fmt::Write), dialect: &Dialect) -> Result<(), SqlGenError> {
        match self {
            Expr::Identifier(ident) => Ok(write!(f, "{}", ident.sql(dialect)?)?),
            Expr::CompoundIdentifier(parts) => {
                Ok(write!(f, "{}", display_separated_dot(parts).sql(dialect)?)?)
            }
            Expr::Wildcard => Ok(write!(f, "*")?),
            Expr::QualifiedWildcard(prefix) => Ok(write!(f, "{}.*", prefix.sql(dialect)?)?),
            Expr::Value(v) => Ok(write!(f, "{}", v.sql(dialect)?)?),
            Expr::Nested(e) => Ok(write!(f, "({})", e.sql(dialect)?)?),
            Expr::UnaryOp { op, expr } => Ok(write!(f, "{} {}", op.sql(dialect)?, expr.sql(dialect)?)?),
            Expr::BinaryOp { left, op, right } => Ok(write!(
                f,
                "{} {} {}",
                left.sql(dialect)?,
                op.sql(dialect)?,
                right.sql(dialect)?
            )?),
            Expr::Between {
                expr,
                negated,
                low,
                high,
            } => Ok(write!(
                f,
                "{} {}BETWEEN {} AND {}",
                expr.sql(dialect)?,
                if *negated { "NOT " } else { "" },
                low.sql(dialect)?,
                high.sql(dialect)?
            )?),
            Expr::InList {
                expr,
                list,
                negated,
            } => Ok(write!(
                f,
                "{} {}IN ({})",
                expr.sql(dialect)?,
                if *negated { "NOT " } else { "" },
                display_comma_separated(list).sql(dialect)?
            )?),
            Expr::InSubquery {
                expr,
                subquery,
                negated,
            } => Ok(write!(
                f,
                "{} {}IN ({})",
                expr.sql(dialect)?,
                if *negated { "NOT " } else { "" },
                subquery.sql(dialect)?
            )?),
            Expr::IsNull(e) => Ok(write!(f, "{} IS NULL", e.sql(dialect)?)?),
            Expr::IsNotNull(e) => Ok(write!(f, "{} IS NOT NULL", e.sql(dialect)?)?),
            Expr::IsTrue(e) => Ok(write!(f, "{} IS TRUE", e.sql(dialect)?)?),
            Expr::IsNotTrue(e) => Ok(write!(f, "{} IS NOT TRUE", e.sql(dialect)?)?),
            Expr::IsFalse(e) => Ok(write!(f, "{} IS FALSE", e.sql(dialect)?)?),
            Expr::IsNotFalse(e) => Ok(write!(f, "{} IS NOT FALSE", e.sql(dialect)?)?),
            Expr::IsDistinctFrom(l, r) => Ok(write!(
                f,
                "{} IS DISTINCT FROM {}",
                l.sql(dialect)?,
                r.sql(dialect)?
            )?),
            Expr::IsNotDistinctFrom(l, r) => Ok(write!(
                f,
                "{} IS NOT DISTINCT FROM {}",
                l.sql(dialect)?,
                r.sql(dialect)?
            )?),
            Expr::Like {
                negated,
                expr,
                pattern,
                escape_char,
            } => fmt_like(f, dialect, "LIKE", *negated, expr, pattern, *escape_char),
            Expr::ILike {
                negated,
                expr,
                pattern,
                escape_char,
            } => fmt_like(f, dialect, "ILIKE", *negated, expr, pattern, *escape_char),
            Expr::SimilarTo {
                negated,
                expr,
                pattern,
                escape_char,
            } => fmt_like(
                f,
                dialect,
                "SIMILAR TO",
                *negated,
                expr,
                pattern,
                *escape_char,
            ),
            Expr::Cast {
                expr,
                data_type,
                double_colon,
            } => {
                if *double_colon {
                    Ok(write!(f, "{}::{}", expr.sql(dialect)?, data_type.sql(dialect)?)?)
                } else {
                    Ok(write!(
                        f,
                        "CAST({} AS {})",
                        expr.sql(dialect)?,
                        data_type.sql(dialect)?
                    )?)
                }
            }
            Expr::TryCast { expr, data_type } => Ok(write!(
                f,
                "TRY_CAST({} AS {})",
                expr.sql(dialect)?,
                data_type.sql(dialect)?
            )?),
            Expr::Collate { expr, collation } => Ok(write!(
                f,
                "{} COLLATE {}",
                expr.sql(dialect)?,
                collation.sql(dialect)?
            )?),
            Expr::Extract { field, expr } => Ok(write!(
                f,
                "EXTRACT({} FROM {})",
                field.sql(dialect)?,
                expr.sql(dialect)?
            )?),
            Expr::Position { expr, r#in } => Ok(write!(
                f,
                "POSITION({} IN {})",
                expr.sql(dialect)?,
                r#in.sql(dialect)?
            )?),
            Expr::Substring {
                expr,
                substring_from,
                substring_for,
            } => {
                write!(f, "SUBSTRING({}", expr.sql(dialect)?)?;
                if let Some(from) = substring_from {
                    write!(f, " FROM {}", from.sql(dialect)?)?;
                }
                if let Some(for_) = substring_for {
                    write!(f, " FOR {}", for_.sql(dialect)?)?;
                }
                Ok(write!(f, ")")?)
            }
            Expr::Trim {
                expr,
                trim_where,
                trim_what,
            } => {
                write!(f, "TRIM(")?;
                if let Some(side) = trim_where {
                    write!(f, "{} ", side.sql(dialect)?)?;
                }
                if let Some(what) = trim_what {
                    write!(f, "{} ", what.sql(dialect)?)?;
                    write!(f, "FROM ")?;
                }
                write!(f, "{}", expr.sql(dialect)?)?;
                Ok(write!(f, ")")?)
            }
            Expr::Overlay {
                expr,
                overlay_what,
                overlay_from,
                overlay_for,
            } => {
                write!(
                    f,
                    "OVERLAY({} PLACING {} FROM {}",
                    expr.sql(dialect)?,
                    overlay_what.sql(dialect)?,
                    overlay_from.sql(dialect)?
                )?;
                if let Some(for_) = overlay_for {
                    write!(f, " FOR {}", for_.sql(dialect)?)?;
                }
                Ok(write!(f, ")")?)
            }
            Expr::AtTimeZone {
                timestamp,
                time_zone,
            } => Ok(write!(f, "{} AT TIME ZONE '{}'", timestamp.sql(dialect)?, time_zone)?),
            Expr::Case {
                operand,
                conditions,
                results,
                else_result,
            } => {
                write!(f, "CASE")?;
                if let Some(operand) = operand {
                    write!(f, " {}", operand.sql(dialect)?)?;
                }
                for (cond, res) in conditions.iter().zip(results.iter()) {
                    write!(f, " WHEN {} THEN {}", cond.sql(dialect)?, res.sql(dialect)?)?;
                }
                if let Some(else_result) = else_result {
                    write!(f, " ELSE {}", else_result.sql(dialect)?)?;
                }
                Ok(write!(f, " END")?)
            }
            Expr::Exists { subquery, negated } => Ok(write!(
                f,
                "{}EXISTS ({})",
                if *negated { "NOT " } else { "" },
                subquery.sql(dialect)?
            )?),
            Expr::Subquery(q) => Ok(write!(f, "({})", q.sql(dialect)?)?),
            Expr::Array(items) => Ok(write!(
                f,
                "ARRAY[{}]",
                display_comma_separated(items).sql(dialect)?
            )?),
            Expr::ArrayIndex { obj, indexes } => {
                write!(f, "{}", obj.sql(dialect)?)?;
                for idx in indexes {
                    write!(f, "[{}]", idx.sql(dialect)?)?;
                }
                Ok(())
            }
            Expr::Tuple(items) => Ok(write!(
                f,
                "({})",
                display_comma_separated(items).sql(dialect)?
            )?),
            Expr::Function(func) => Ok(write!(f, "{}", func.sql(dialect)?)?),
        }
    }
}

fn fmt_like(
    f: &mut (dyn fmt::Write),
    dialect: &Dialect,
    keyword: &str,
    negated: bool,
    expr: &Expr,
    pattern: &Expr,
    escape_char: Option<char>,
) -> Result<(), SqlGenError> {
    write!(
        f,
        "{} {}{} {}",
        expr.sql(dialect)?,
        if negated { "NOT " } else { "" },
        keyword,
        pattern.sql(dialect)?
    )?;
    if let Some(c) = escape_char {
        write!(f, " ESCAPE '{}'", c)?;
    }
    Ok(())
}

fn display_separated_dot(parts: &[Ident]) -> crate::ast::DisplaySeparated<'_, Ident> {
    crate::ast::display_separated(parts, ".")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnaryOperator {
    Plus,
    Minus,
    Not,
}

impl DialectDisplay for UnaryOperator {
    fn fmt(&self, f: &mut (dyn fmt::Write), _dialect: &Dialect) -> Result<(), SqlGenError> {
        Ok(f.write_str(match self {
            UnaryOperator::Plus => "+",
            UnaryOperator::Minus => "-",
            UnaryOperator::Not => "NOT",
        })?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BinaryOperator {
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
    StringConcat,
    Gt,
    Lt,
    GtEq,
    LtEq,
    Eq,
    NotEq,
    And,
    Or,
    BitwiseOr,
    BitwiseAnd,
    BitwiseXor,
}

impl DialectDisplay for BinaryOperator {
    fn fmt(&self, f: &mut (dyn fmt::Write), _dialect: &Dialect) -> Result<(), SqlGenError> {
        Ok(f.write_str(match self {
            BinaryOperator::Plus => "+",
            BinaryOperator::Minus => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::StringConcat => "||",
            BinaryOperator::Gt => ">",
            BinaryOperator::Lt => "<",
            BinaryOperator::GtEq => ">=",
            BinaryOperator::LtEq => "<=",
            BinaryOperator::Eq => "=",
            BinaryOperator::NotEq => "<>",
            BinaryOperator::And => "AND",
            BinaryOperator::Or => "OR",
            BinaryOperator::BitwiseOr => "|",
            BinaryOperator::BitwiseAnd => "&",
            BinaryOperator::BitwiseXor => "#",
        })?)
    }
}

/// `name(args) [FILTER (WHERE ...)] [OVER (...) | WITHIN GROUP (ORDER BY ...)]`.
///
/// `over` and `within_group` are mutually exclusive (enforced by the parser;
/// [`crate::format::Lower`] raises [`FormatError::ConflictingWindowClause`] if
/// a hand-built tree violates it). `filter` may combine with either.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Function {
    pub name: ObjectName,
    pub args: Vec<FunctionArg>,
    pub distinct: bool,
    pub order_by: Vec<OrderByExpr>,
    pub filter: Option<Box<Expr>>,
    pub over: Option<WindowType>,
    pub within_group: Option<Vec<OrderByExpr>>,
}

impl Function {
    /// Validates the mutual-exclusion invariant. Called by the formatter
    /// before lowering; never called implicitly by the parser (which simply
    /// can't produce a conflicting tree).
    pub fn check_invariants(&self) -> Result<(), FormatError> {
        if self.over.is_some() && self.within_group.is_some() {
            return Err(FormatError::ConflictingWindowClause);
        }
        Ok(())
    }
}

impl DialectDisplay for Function {
    fn fmt(&self, f: &mut (dyn fmt::Write), dialect: &Dialect) -> Result<(), SqlGenError> {
        self.check_invariants()?;
        write!(
            f,
            "{}({}{})",
            self.name.sql(dialect)?,
            if self.distinct { "DISTINCT " } else { "" },
            display_comma_separated(&self.args).sql(dialect)?
        )?;
        if !self.order_by.is_empty() {
            write!(
                f,
                " ORDER BY {}",
                display_comma_separated(&self.order_by).sql(dialect)?
            )?;
        }
        if let Some(filter) = &self.filter {
            write!(f, " FILTER (WHERE {})", filter.sql(dialect)?)?;
        }
        if let Some(within_group) = &self.within_group {
            write!(
                f,
                " WITHIN GROUP (ORDER BY {})",
                display_comma_separated(within_group).sql(dialect)?
            )?;
        }
        if let Some(over) = &self.over {
            write!(f, " OVER {}", over.sql(dialect)?)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FunctionArg {
    Unnamed(Expr),
    Named { name: Ident, arg: Expr },
}

impl DialectDisplay for FunctionArg {
    fn fmt(&self, f: &mut (dyn fmt::Write), dialect: &Dialect) -> Result<(), SqlGenError> {
        match self {
            FunctionArg::Unnamed(e) => Ok(write!(f, "{}", e.sql(dialect)?)?),
            FunctionArg::Named { name, arg } => {
                Ok(write!(f, "{} => {}", name.sql(dialect)?, arg.sql(dialect)?)?)
            }
        }
    }
}

/// `OVER (window-spec)` or `OVER named_window`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WindowType {
    Spec(WindowSpec),
    NamedWindow(Ident),
}

impl DialectDisplay for WindowType {
    fn fmt(&self, f: &mut (dyn fmt::Write), dialect: &Dialect) -> Result<(), SqlGenError> {
        match self {
            WindowType::Spec(spec) => Ok(write!(f, "({})", spec.sql(dialect)?)?),
            WindowType::NamedWindow(name) => Ok(write!(f, "{}", name.sql(dialect)?)?),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WindowSpec {
    /// `OVER (base_window PARTITION BY ...)` — references a `WINDOW` clause
    /// definition this spec extends.
    pub window_name: Option<Ident>,
    pub partition_by: Vec<Expr>,
    pub order_by: Vec<OrderByExpr>,
    pub window_frame: Option<WindowFrame>,
}

impl DialectDisplay for WindowSpec {
    fn fmt(&self, f: &mut (dyn fmt::Write), dialect: &Dialect) -> Result<(), SqlGenError> {
        let mut delim = "";
        if let Some(name) = &self.window_name {
            write!(f, "{}", name.sql(dialect)?)?;
            delim = " ";
        }
        if !self.partition_by.is_empty() {
            write!(f, "{}", delim)?;
            delim = " ";
            write!(
                f,
                "PARTITION BY {}",
                display_comma_separated(&self.partition_by).sql(dialect)?
            )?;
        }
        if !self.order_by.is_empty() {
            write!(f, "{}", delim)?;
            delim = " ";
            write!(
                f,
                "ORDER BY {}",
                display_comma_separated(&self.order_by).sql(dialect)?
            )?;
        }
        if let Some(frame) = &self.window_frame {
            write!(f, "{}", delim)?;
            write!(f, "{}", frame.sql(dialect)?)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WindowFrameUnits {
    Rows,
    Range,
    Groups,
}

impl DialectDisplay for WindowFrameUnits {
    fn fmt(&self, f: &mut (dyn fmt::Write), _dialect: &Dialect) -> Result<(), SqlGenError> {
        Ok(f.write_str(match self {
            WindowFrameUnits::Rows => "ROWS",
            WindowFrameUnits::Range => "RANGE",
            WindowFrameUnits::Groups => "GROUPS",
        })?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WindowFrame {
    pub units: WindowFrameUnits,
    pub start_bound: WindowFrameBound,
    pub end_bound: Option<WindowFrameBound>,
}

impl DialectDisplay for WindowFrame {
    fn fmt(&self, f: &mut (dyn fmt::Write), dialect: &Dialect) -> Result<(), SqlGenError> {
        write!(f, "{} ", self.units.sql(dialect)?)?;
        if let Some(end) = &self.end_bound {
            write!(
                f,
                "BETWEEN {} AND {}",
                self.start_bound.sql(dialect)?,
                end.sql(dialect)?
            )?;
        } else {
            write!(f, "{}", self.start_bound.sql(dialect)?)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WindowFrameBound {
    CurrentRow,
    Preceding(Option<Box<Expr>>),
    Following(Option<Box<Expr>>),
}

impl DialectDisplay for WindowFrameBound {
    fn fmt(&self, f: &mut (dyn fmt::Write), dialect: &Dialect) -> Result<(), SqlGenError> {
        match self {
            WindowFrameBound::CurrentRow => Ok(write!(f, "CURRENT ROW")?),
            WindowFrameBound::Preceding(None) => Ok(write!(f, "UNBOUNDED PRECEDING")?),
            WindowFrameBound::Preceding(Some(e)) => {
                Ok(write!(f, "{} PRECEDING", e.sql(dialect)?)?)
            }
            WindowFrameBound::Following(None) => Ok(write!(f, "UNBOUNDED FOLLOWING")?),
            WindowFrameBound::Following(Some(e)) => {
                Ok(write!(f, "{} FOLLOWING", e.sql(dialect)?)?)
            }
        }
    }
}

/// One entry of a `WINDOW name AS (spec), ...` clause.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NamedWindowDefinition(pub Ident, pub WindowSpec);

impl DialectDisplay for NamedWindowDefinition {
    fn fmt(&self, f: &mut (dyn fmt::Write), dialect: &Dialect) -> Result<(), SqlGenError> {
        Ok(write!(f, "{} AS ({})", self.0.sql(dialect)?, self.1.sql(dialect)?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Ident;
    use crate::dialect::Dialect;

    #[test]
    fn function_rejects_over_and_within_group_together() {
        let f = Function {
            name: ObjectName(vec![Ident::new("percentile_cont")]),
            args: vec![],
            distinct: false,
            order_by: vec![],
            filter: None,
            over: Some(WindowType::NamedWindow(Ident::new("w"))),
            within_group: Some(vec![]),
        };
        assert!(f.check_invariants().is_err());
    }

    #[test]
    fn between_renders_with_and() {
        let e = Expr::Between {
            expr: Box::new(Expr::Identifier(Ident::new("age"))),
            negated: false,
            low: Box::new(Expr::Value(Value::Number("1".to_string(), false))),
            high: Box::new(Expr::Value(Value::Number("10".to_string(), false))),
        };
        assert_eq!(e.sql(&Dialect::default()).unwrap(), "age BETWEEN 1 AND 10");
    }
}
