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

//! Recursive-descent parser from a [`Lexeme`] stream to the [`crate::ast`]
//! tree. Expressions use precedence climbing (see [`Parser::parse_subexpr`]);
//! every other production is a straight top-down match on the next keyword.

#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, string::String, string::ToString, vec, vec::Vec};

use crate::ast::*;
use crate::error::ParseError;
use crate::tokenizer::{tokenize, LiteralValue, Location, Token};

/// Parses a full `SELECT`/`WITH`/set-operation query from SQL source text.
pub fn parse_query(sql: &str) -> Result<Query, ParseError> {
    let lexemes = tokenize(sql).map_err(|e| {
        ParseError::new(
            e.offset,
            vec!["valid token"],
            e.message,
            Vec::<String>::new(),
        )
    })?;
    let mut parser = Parser::new(lexemes);
    let query = parser.parse_query()?;
    parser.expect_eof()?;
    Ok(query)
}

/// Precedence tiers, lowest first. Ties within a tier associate left-to-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Zero = 0,
    Or,
    And,
    Not,
    Is,
    ComparisonLike,
    Between,
    Plus,
    Multiply,
    DoubleColon,
}

pub struct Parser {
    lexemes: Vec<Lexeme>,
    index: usize,
    context: Vec<&'static str>,
}

use crate::tokenizer::Lexeme;

impl Parser {
    pub fn new(lexemes: Vec<Lexeme>) -> Self {
        Self {
            lexemes,
            index: 0,
            context: Vec::new(),
        }
    }

    fn push_ctx(&mut self, name: &'static str) {
        self.context.push(name);
    }

    fn pop_ctx(&mut self) {
        self.context.pop();
    }

    fn ctx_vec(&self) -> Vec<String> {
        self.context.iter().map(|s| s.to_string()).collect()
    }

    fn cur(&self) -> &Token {
        self.lexemes
            .get(self.index)
            .map(|l| &l.token)
            .unwrap_or(&Token::Eof)
    }

    fn location(&self) -> Location {
        self.lexemes
            .get(self.index)
            .map(|l| l.location)
            .unwrap_or_default()
    }

    fn peek_nth(&self, n: usize) -> &Token {
        self.lexemes
            .get(self.index + n)
            .map(|l| &l.token)
            .unwrap_or(&Token::Eof)
    }

    fn advance(&mut self) -> Token {
        let tok = self.cur().clone();
        if !matches!(tok, Token::Eof) {
            self.index += 1;
        }
        tok
    }

    fn err(&self, expected: Vec<impl Into<String>>) -> ParseError {
        let found = format!("{:?}", self.cur());
        ParseError::new(self.location().offset, expected, found, self.ctx_vec())
    }

    fn is_keyword(&self, kw: &str) -> bool {
        matches!(self.cur(), Token::Keyword(k) if k == kw)
    }

    fn is_keyword_at(&self, n: usize, kw: &str) -> bool {
        matches!(self.peek_nth(n), Token::Keyword(k) if k == kw)
    }

    fn eat_keyword(&mut self, kw: &str) -> bool {
        if self.is_keyword(kw) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_keyword(&mut self, kw: &'static str) -> Result<(), ParseError> {
        if self.eat_keyword(kw) {
            Ok(())
        } else {
            Err(self.err(vec![kw]))
        }
    }

    /// Consumes a run of single-word keyword tokens matching `words` in
    /// order, only if all of them match (lookahead first, no partial
    /// consumption). Used for phrases the tokenizer never fuses, such as
    /// `CURRENT ROW` or `UNBOUNDED PRECEDING`.
    fn eat_keyword_seq(&mut self, words: &[&'static str]) -> bool {
        for (i, w) in words.iter().enumerate() {
            if !self.is_keyword_at(i, w) {
                return false;
            }
        }
        for _ in words {
            self.advance();
        }
        true
    }

    /// Matches a bare (non-keyword) name such as `unnest`, whether the
    /// tokenizer tagged it `Function` (name immediately followed by `(`)
    /// or plain `Identifier`.
    fn eat_name(&mut self, name: &str) -> bool {
        let matches = match self.cur() {
            Token::Function(v) => v.eq_ignore_ascii_case(name),
            Token::Identifier {
                value,
                quote_style: None,
            } => value.eq_ignore_ascii_case(name),
            _ => false,
        };
        if matches {
            self.advance();
        }
        matches
    }

    fn eat_operator(&mut self, op: &str) -> bool {
        if matches!(self.cur(), Token::Operator(o) if o == op) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_operator(&mut self, op: &'static str) -> Result<(), ParseError> {
        if self.eat_operator(op) {
            Ok(())
        } else {
            Err(self.err(vec![op]))
        }
    }

    fn eat_lparen(&mut self) -> bool {
        if matches!(self.cur(), Token::LParen) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_lparen(&mut self) -> Result<(), ParseError> {
        if self.eat_lparen() {
            Ok(())
        } else {
            Err(self.err(vec!["("]))
        }
    }

    fn expect_rparen(&mut self) -> Result<(), ParseError> {
        if matches!(self.cur(), Token::RParen) {
            self.advance();
            Ok(())
        } else {
            Err(self.err(vec![")"]))
        }
    }

    fn eat_comma(&mut self) -> bool {
        if matches!(self.cur(), Token::Comma) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_eof(&self) -> Result<(), ParseError> {
        if matches!(self.cur(), Token::Eof) {
            Ok(())
        } else {
            Err(self.err(vec!["end of input"]))
        }
    }

    fn parse_comma_separated<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        let mut out = vec![item(self)?];
        while self.eat_comma() {
            out.push(item(self)?);
        }
        Ok(out)
    }

    // ---- identifiers / names ----------------------------------------

    fn parse_identifier(&mut self) -> Result<Ident, ParseError> {
        match self.advance() {
            Token::Identifier { value, quote_style } => Ok(Ident { value, quote_style }),
            Token::Function(value) => {
                // A bare name immediately followed by `(` still reads as an
                // identifier wherever one is expected (e.g. an alias).
                Ok(Ident::new(value))
            }
            Token::Keyword(k) if !keywords::RESERVED_FOR_COLUMN_ALIAS.contains(&k.as_str()) => {
                Ok(Ident::new(k))
            }
            other => Err(ParseError::new(
                self.location().offset,
                vec!["identifier"],
                format!("{:?}", other),
                self.ctx_vec(),
            )),
        }
    }

    fn parse_object_name(&mut self) -> Result<ObjectName, ParseError> {
        let mut idents = vec![self.parse_identifier()?];
        while matches!(self.cur(), Token::Dot) {
            self.advance();
            idents.push(self.parse_identifier()?);
        }
        Ok(ObjectName(idents))
    }

    // ---- top-level query ----------------------------------------------

    pub fn parse_query(&mut self) -> Result<Query, ParseError> {
        self.push_ctx("query");
        let with = if self.eat_keyword("with") {
            let recursive = self.eat_keyword("recursive");
            let cte_tables = self.parse_comma_separated(Self::parse_cte)?;
            Some(With {
                recursive,
                cte_tables,
            })
        } else {
            None
        };

        let body = Box::new(self.parse_set_expr(0)?);

        let order_by = if self.eat_keyword("order by") {
            self.parse_comma_separated(Self::parse_order_by_expr)?
        } else {
            Vec::new()
        };

        let limit = if self.eat_keyword("limit") {
            if self.eat_keyword("all") {
                None
            } else {
                Some(self.parse_expr()?)
            }
        } else {
            None
        };

        let offset = if self.eat_keyword("offset") {
            let value = self.parse_expr()?;
            let rows = if self.eat_keyword("row") {
                OffsetRows::Row
            } else if self.eat_keyword("rows") {
                OffsetRows::Rows
            } else {
                OffsetRows::None
            };
            Some(Offset { value, rows })
        } else {
            None
        };

        let fetch = if self.is_keyword("fetch") {
            self.advance();
            Some(self.parse_fetch()?)
        } else {
            None
        };

        let lock = if self.is_keyword("for update") || self.is_keyword("for share") {
            Some(self.parse_lock_clause()?)
        } else {
            None
        };

        self.pop_ctx();
        Ok(Query {
            with,
            body,
            order_by,
            limit,
            offset,
            fetch,
            lock,
        })
    }

    fn parse_cte(&mut self) -> Result<Cte, ParseError> {
        let name = self.parse_identifier()?;
        let columns = if self.eat_lparen() {
            let cols = self.parse_comma_separated(Self::parse_identifier)?;
            self.expect_rparen()?;
            cols
        } else {
            Vec::new()
        };
        let alias = TableAlias { name, columns };
        self.expect_keyword("as")?;
        let materialized = if self.eat_keyword("materialized") {
            Some(true)
        } else if self.is_keyword("not materialized") {
            self.advance();
            Some(false)
        } else {
            None
        };
        self.expect_lparen()?;
        let query = self.parse_query()?;
        self.expect_rparen()?;
        Ok(Cte {
            alias,
            query,
            from: None,
            materialized,
        })
    }

    fn parse_fetch(&mut self) -> Result<Fetch, ParseError> {
        if !(self.eat_keyword("first") || self.eat_keyword("next")) {
            return Err(self.err(vec!["FIRST", "NEXT"]));
        }
        let quantity = if matches!(self.cur(), Token::Literal(_)) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        let percent = self.eat_keyword("percent");
        if !(self.eat_keyword("row") || self.eat_keyword("rows")) {
            return Err(self.err(vec!["ROW", "ROWS"]));
        }
        let with_ties = if self.eat_keyword("only") {
            false
        } else if self.eat_keyword("with ties") {
            true
        } else {
            return Err(self.err(vec!["ONLY", "WITH TIES"]));
        };
        Ok(Fetch {
            with_ties,
            percent,
            quantity,
        })
    }

    fn parse_lock_clause(&mut self) -> Result<LockClause, ParseError> {
        let lock_type = if self.eat_keyword("for update") {
            LockType::Update
        } else {
            self.expect_keyword("for share")?;
            LockType::Share
        };
        let of = if self.eat_keyword("of") {
            self.parse_comma_separated(Self::parse_object_name)?
        } else {
            Vec::new()
        };
        let nonblocking = if self.eat_keyword("nowait") {
            Some(NonBlock::Nowait)
        } else if self.eat_keyword("skip locked") {
            Some(NonBlock::SkipLocked)
        } else {
            None
        };
        Ok(LockClause {
            lock_type,
            of,
            nonblocking,
        })
    }

    // ---- set expressions (UNION / EXCEPT / INTERSECT) ------------------

    fn parse_set_expr(&mut self, min_prec: u8) -> Result<SetExpr, ParseError> {
        let mut left = self.parse_set_expr_primary()?;
        loop {
            let (op, prec) = match self.cur() {
                Token::Keyword(k) if k == "union" => (SetOperator::Union, 10u8),
                Token::Keyword(k) if k == "except" => (SetOperator::Except, 10u8),
                Token::Keyword(k) if k == "intersect" => (SetOperator::Intersect, 20u8),
                _ => break,
            };
            if prec < min_prec {
                break;
            }
            self.advance();
            let all = self.eat_keyword("all");
            let _ = self.eat_keyword("distinct");
            let right = self.parse_set_expr_primary()?;
            left = SetExpr::SetOperation {
                op,
                all,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_set_expr_primary(&mut self) -> Result<SetExpr, ParseError> {
        if self.is_keyword("select") {
            Ok(SetExpr::Select(Box::new(self.parse_select()?)))
        } else if self.is_keyword("values") {
            Ok(SetExpr::Values(self.parse_values()?))
        } else if matches!(self.cur(), Token::LParen) {
            self.advance();
            let query = self.parse_query()?;
            self.expect_rparen()?;
            Ok(SetExpr::Query(Box::new(query)))
        } else {
            Err(self.err(vec!["SELECT", "VALUES", "("]))
        }
    }

    fn parse_values(&mut self) -> Result<Values, ParseError> {
        self.expect_keyword("values")?;
        let rows = self.parse_comma_separated(|p| {
            p.expect_lparen()?;
            let row = if matches!(p.cur(), Token::RParen) {
                Vec::new()
            } else {
                p.parse_comma_separated(Self::parse_expr)?
            };
            p.expect_rparen()?;
            Ok(row)
        })?;
        Ok(Values(rows))
    }

    // ---- SELECT ---------------------------------------------------------

    fn parse_select(&mut self) -> Result<Select, ParseError> {
        self.push_ctx("select");
        self.expect_keyword("select")?;
        let distinct = if self.eat_keyword("distinct on") {
            self.expect_lparen()?;
            let exprs = self.parse_comma_separated(Self::parse_expr)?;
            self.expect_rparen()?;
            Some(Distinct::On(exprs))
        } else if self.eat_keyword("distinct") {
            Some(Distinct::All)
        } else {
            None
        };
        let _ = self.eat_keyword("all");

        let top = if self.eat_keyword("top") {
            Some(self.parse_top()?)
        } else {
            None
        };

        let projection = self.parse_comma_separated(Self::parse_select_item)?;

        let into = if self.eat_keyword("into") {
            Some(self.parse_select_into()?)
        } else {
            None
        };

        let from = if self.eat_keyword("from") {
            self.parse_comma_separated(Self::parse_table_with_joins)?
        } else {
            Vec::new()
        };

        let mut lateral_views = Vec::new();
        while self.is_keyword("lateral view") {
            lateral_views.push(self.parse_lateral_view()?);
        }

        let selection = if self.eat_keyword("where") {
            Some(self.parse_expr()?)
        } else {
            None
        };

        let group_by = if self.eat_keyword("group by") {
            self.parse_comma_separated(Self::parse_expr)?
        } else {
            Vec::new()
        };

        let having = if self.eat_keyword("having") {
            Some(self.parse_expr()?)
        } else {
            None
        };

        let named_window = if self.eat_keyword("window") {
            self.parse_comma_separated(Self::parse_named_window)?
        } else {
            Vec::new()
        };

        self.pop_ctx();
        Ok(Select {
            distinct,
            top,
            projection,
            into,
            from,
            lateral_views,
            selection,
            group_by,
            having,
            named_window,
        })
    }

    fn parse_lateral_view(&mut self) -> Result<LateralView, ParseError> {
        self.expect_keyword("lateral view")?;
        let outer = self.eat_keyword("outer");
        let lateral_view = self.parse_expr()?;
        let lateral_view_name = self.parse_object_name()?;
        let lateral_col_alias = if self.eat_keyword("as") {
            self.parse_comma_separated(Self::parse_identifier)?
        } else {
            Vec::new()
        };
        Ok(LateralView {
            lateral_view,
            lateral_view_name,
            lateral_col_alias,
            outer,
        })
    }

    fn parse_top(&mut self) -> Result<Top, ParseError> {
        let paren = self.eat_lparen();
        let quantity = Some(self.parse_expr()?);
        if paren {
            self.expect_rparen()?;
        }
        let percent = self.eat_keyword("percent");
        let with_ties = self.eat_keyword("with ties");
        Ok(Top {
            with_ties,
            percent,
            quantity,
        })
    }

    fn parse_select_into(&mut self) -> Result<SelectInto, ParseError> {
        let temporary = self.eat_keyword("temporary") || self.eat_keyword("temp");
        let unlogged = self.eat_keyword("unlogged");
        let table = self.eat_keyword("table");
        let name = self.parse_object_name()?;
        Ok(SelectInto {
            temporary,
            unlogged,
            table,
            name,
        })
    }

    fn parse_select_item(&mut self) -> Result<SelectItem, ParseError> {
        if matches!(self.cur(), Token::Operator(op) if op == "*") {
            self.advance();
            return Ok(SelectItem::Wildcard);
        }

        let expr = self.parse_expr()?;
        match expr {
            Expr::QualifiedWildcard(prefix) => Ok(SelectItem::QualifiedWildcard(prefix)),
            expr if self.eat_keyword("as") => {
                let alias = self.parse_identifier()?;
                Ok(SelectItem::ExprWithAlias { expr, alias })
            }
            expr if matches!(self.cur(), Token::Identifier { .. }) => {
                let alias = self.parse_identifier()?;
                Ok(SelectItem::ExprWithAlias { expr, alias })
            }
            expr => Ok(SelectItem::UnnamedExpr(expr)),
        }
    }

    fn parse_named_window(&mut self) -> Result<NamedWindowDefinition, ParseError> {
        let name = self.parse_identifier()?;
        self.expect_keyword("as")?;
        self.expect_lparen()?;
        let spec = self.parse_window_spec()?;
        self.expect_rparen()?;
        Ok(NamedWindowDefinition(name, spec))
    }

    // ---- FROM / JOIN ------------------------------------------------------

    fn parse_table_with_joins(&mut self) -> Result<TableWithJoins, ParseError> {
        let relation = self.parse_table_factor()?;
        let mut joins = Vec::new();
        loop {
            let join_operator = if self.eat_keyword("cross join") {
                JoinOperator::CrossJoin
            } else if self.eat_keyword("cross apply") {
                JoinOperator::CrossApply
            } else if self.eat_keyword("outer apply") {
                JoinOperator::OuterApply
            } else if self.is_join_start() {
                self.parse_join_operator()?
            } else {
                break;
            };
            let relation = self.parse_table_factor()?;
            joins.push(Join {
                relation,
                join_operator,
            });
        }
        Ok(TableWithJoins { relation, joins })
    }

    fn is_join_start(&self) -> bool {
        self.is_keyword("join")
            || self.is_keyword("inner join")
            || self.is_keyword("left join")
            || self.is_keyword("left outer join")
            || self.is_keyword("right join")
            || self.is_keyword("right outer join")
            || self.is_keyword("full join")
            || self.is_keyword("full outer join")
            || self.is_keyword("natural join")
            || self.is_keyword("natural left join")
            || self.is_keyword("natural right join")
            || self.is_keyword("natural full join")
    }

    fn parse_join_operator(&mut self) -> Result<JoinOperator, ParseError> {
        let natural = self.eat_keyword("natural join")
            || self.eat_keyword("natural left join")
            || self.eat_keyword("natural right join")
            || self.eat_keyword("natural full join");
        if natural {
            // The specific side was folded into a single fused keyword; treat
            // all natural joins uniformly as an inner join with a NATURAL
            // constraint, matching common dialect behavior.
            return Ok(JoinOperator::Inner(JoinConstraint::Natural));
        }
        if self.eat_keyword("join") || self.eat_keyword("inner join") {
            let constraint = self.parse_join_constraint()?;
            return Ok(JoinOperator::Inner(constraint));
        }
        if self.eat_keyword("left join") || self.eat_keyword("left outer join") {
            let constraint = self.parse_join_constraint()?;
            return Ok(JoinOperator::LeftOuter(constraint));
        }
        if self.eat_keyword("right join") || self.eat_keyword("right outer join") {
            let constraint = self.parse_join_constraint()?;
            return Ok(JoinOperator::RightOuter(constraint));
        }
        if self.eat_keyword("full join") || self.eat_keyword("full outer join") {
            let constraint = self.parse_join_constraint()?;
            return Ok(JoinOperator::FullOuter(constraint));
        }
        Err(self.err(vec!["JOIN"]))
    }

    fn parse_join_constraint(&mut self) -> Result<JoinConstraint, ParseError> {
        if self.eat_keyword("on") {
            Ok(JoinConstraint::On(self.parse_expr()?))
        } else if self.eat_keyword("using") {
            self.expect_lparen()?;
            let cols = self.parse_comma_separated(Self::parse_identifier)?;
            self.expect_rparen()?;
            Ok(JoinConstraint::Using(cols))
        } else {
            Ok(JoinConstraint::None)
        }
    }

    fn parse_table_factor(&mut self) -> Result<TableFactor, ParseError> {
        if self.eat_keyword("lateral") {
            self.expect_lparen()?;
            let subquery = Box::new(self.parse_query()?);
            self.expect_rparen()?;
            let alias = self.parse_optional_table_alias()?;
            return Ok(TableFactor::Derived {
                lateral: true,
                subquery,
                alias,
            });
        }
        if self.eat_name("unnest") {
            self.expect_lparen()?;
            let array_expr = Box::new(self.parse_expr()?);
            self.expect_rparen()?;
            let alias = self.parse_optional_table_alias()?;
            let with_offset = self.eat_keyword_seq(&["with", "offset"]);
            let with_offset_alias = if with_offset && self.eat_keyword("as") {
                Some(self.parse_identifier()?)
            } else {
                None
            };
            return Ok(TableFactor::UNNEST {
                alias,
                array_expr,
                with_offset,
                with_offset_alias,
            });
        }
        if matches!(self.cur(), Token::LParen) {
            self.advance();
            if self.is_keyword("select") || self.is_keyword("values") || self.is_keyword("with") {
                let subquery = Box::new(self.parse_query()?);
                self.expect_rparen()?;
                let alias = self.parse_optional_table_alias()?;
                return Ok(TableFactor::Derived {
                    lateral: false,
                    subquery,
                    alias,
                });
            }
            let inner = self.parse_table_with_joins()?;
            self.expect_rparen()?;
            return Ok(TableFactor::NestedJoin(Box::new(inner)));
        }
        if self.is_keyword("table") {
            self.advance();
            self.expect_lparen()?;
            let expr = self.parse_expr()?;
            self.expect_rparen()?;
            let alias = self.parse_optional_table_alias()?;
            return Ok(TableFactor::TableFunction { expr, alias });
        }
        let name = self.parse_object_name()?;
        if matches!(self.cur(), Token::LParen) {
            self.advance();
            let args = if matches!(self.cur(), Token::RParen) {
                Vec::new()
            } else {
                self.parse_comma_separated(Self::parse_function_arg)?
            };
            self.expect_rparen()?;
            let alias = self.parse_optional_table_alias()?;
            let with_hints = self.parse_with_hints()?;
            return Ok(TableFactor::Table {
                name,
                alias,
                args: Some(args),
                with_hints,
            });
        }
        let alias = self.parse_optional_table_alias()?;
        let with_hints = self.parse_with_hints()?;
        Ok(TableFactor::Table {
            name,
            alias,
            args: None,
            with_hints,
        })
    }

    fn parse_with_hints(&mut self) -> Result<Vec<Expr>, ParseError> {
        if self.eat_keyword("with") {
            self.expect_lparen()?;
            let hints = self.parse_comma_separated(Self::parse_expr)?;
            self.expect_rparen()?;
            Ok(hints)
        } else {
            Ok(Vec::new())
        }
    }

    fn parse_optional_table_alias(&mut self) -> Result<Option<TableAlias>, ParseError> {
        let has_as = self.eat_keyword("as");
        let name = match self.cur() {
            Token::Identifier { .. } => self.parse_identifier()?,
            Token::Keyword(k)
                if has_as && !keywords::RESERVED_FOR_TABLE_ALIAS.contains(&k.as_str()) =>
            {
                self.parse_identifier()?
            }
            _ => {
                return if has_as {
                    Err(self.err(vec!["alias"]))
                } else {
                    Ok(None)
                }
            }
        };
        let columns = if self.eat_lparen() {
            let cols = self.parse_comma_separated(Self::parse_identifier)?;
            self.expect_rparen()?;
            cols
        } else {
            Vec::new()
        };
        Ok(Some(TableAlias { name, columns }))
    }

    // ---- expressions: precedence climbing --------------------------------

    pub fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_subexpr(Precedence::Zero)
    }

    fn parse_subexpr(&mut self, min_prec: Precedence) -> Result<Expr, ParseError> {
        let mut expr = self.parse_prefix()?;
        loop {
            let next_prec = self.next_precedence();
            if next_prec <= min_prec {
                break;
            }
            expr = self.parse_infix(expr, next_prec)?;
        }
        Ok(expr)
    }

    fn next_precedence(&self) -> Precedence {
        match self.cur() {
            Token::Keyword(k) if k == "or" => Precedence::Or,
            Token::Keyword(k) if k == "and" => Precedence::And,
            Token::Keyword(k)
                if k == "not in" || k == "not between" || k == "not like" || k == "not ilike"
                    || k == "not similar to" =>
            {
                Precedence::Between
            }
            Token::Keyword(k) if k == "is" || k == "is not" || k == "is not distinct from" => {
                Precedence::Is
            }
            Token::Keyword(k) if k == "in" || k == "between" || k == "like" || k == "ilike" => {
                Precedence::Between
            }
            Token::Keyword(k) if k == "similar" && self.is_keyword_at(1, "to") => {
                Precedence::Between
            }
            Token::Operator(op)
                if matches!(op.as_str(), "=" | "<" | ">" | "<=" | ">=" | "<>" | "!=") =>
            {
                Precedence::ComparisonLike
            }
            Token::Operator(op) if matches!(op.as_str(), "+" | "-" | "||" | "|" | "&" | "#") => {
                Precedence::Plus
            }
            Token::Operator(op) if matches!(op.as_str(), "*" | "/" | "%") => Precedence::Multiply,
            Token::Operator(op) if op == "::" => Precedence::DoubleColon,
            Token::Keyword(k) if k == "at time zone" => Precedence::Between,
            Token::Keyword(k) if k == "collate" => Precedence::Between,
            Token::LBracket => Precedence::DoubleColon,
            _ => Precedence::Zero,
        }
    }

    fn parse_infix(&mut self, expr: Expr, prec: Precedence) -> Result<Expr, ParseError> {
        if let Token::Operator(op) = self.cur().clone() {
            if op == "::" {
                self.advance();
                let data_type = self.parse_data_type()?;
                return Ok(Expr::Cast {
                    expr: Box::new(expr),
                    data_type,
                    double_colon: true,
                });
            }
            if let Some(bin_op) = binary_operator_for(&op) {
                self.advance();
                let right = self.parse_subexpr(prec)?;
                return Ok(Expr::BinaryOp {
                    left: Box::new(expr),
                    op: bin_op,
                    right: Box::new(right),
                });
            }
        }
        if matches!(self.cur(), Token::LBracket) {
            self.advance();
            let mut indexes = vec![self.parse_expr()?];
            while matches!(self.cur(), Token::LBracket) {
                self.advance();
                indexes.push(self.parse_expr()?);
                if !matches!(self.cur(), Token::RBracket) {
                    return Err(self.err(vec!["]"]));
                }
                self.advance();
            }
            if matches!(self.cur(), Token::RBracket) {
                self.advance();
            } else {
                return Err(self.err(vec!["]"]));
            }
            return Ok(Expr::ArrayIndex {
                obj: Box::new(expr),
                indexes,
            });
        }
        if self.eat_keyword("and") {
            let right = self.parse_subexpr(prec)?;
            return Ok(Expr::BinaryOp {
                left: Box::new(expr),
                op: BinaryOperator::And,
                right: Box::new(right),
            });
        }
        if self.eat_keyword("or") {
            let right = self.parse_subexpr(prec)?;
            return Ok(Expr::BinaryOp {
                left: Box::new(expr),
                op: BinaryOperator::Or,
                right: Box::new(right),
            });
        }
        if self.eat_keyword("collate") {
            let collation = self.parse_object_name()?;
            return Ok(Expr::Collate {
                expr: Box::new(expr),
                collation,
            });
        }
        if self.eat_keyword("at time zone") {
            let tz = self.parse_subexpr(prec)?;
            let time_zone = match tz {
                Expr::Value(Value::SingleQuotedString(s)) => s,
                other => return Ok(Expr::AtTimeZone {
                    timestamp: Box::new(expr),
                    time_zone: expr_as_text(&other),
                }),
            };
            return Ok(Expr::AtTimeZone {
                timestamp: Box::new(expr),
                time_zone,
            });
        }
        if self.eat_keyword("is not distinct from") {
            let right = self.parse_subexpr(prec)?;
            return Ok(Expr::IsNotDistinctFrom(Box::new(expr), Box::new(right)));
        }
        if self.is_keyword("is not") {
            self.advance();
            return self.parse_is_tail(expr, true);
        }
        if self.eat_keyword("is") {
            if self.eat_keyword("distinct") {
                self.expect_keyword("from")?;
                let right = self.parse_subexpr(prec)?;
                return Ok(Expr::IsDistinctFrom(Box::new(expr), Box::new(right)));
            }
            return self.parse_is_tail(expr, false);
        }
        if self.eat_keyword("not in") {
            return self.parse_in_tail(expr, true);
        }
        if self.eat_keyword("in") {
            return self.parse_in_tail(expr, false);
        }
        if self.eat_keyword("not between") {
            return self.parse_between_tail(expr, true);
        }
        if self.eat_keyword("between") {
            return self.parse_between_tail(expr, false);
        }
        if self.eat_keyword("not like") {
            return self.parse_like_tail(expr, true, "like");
        }
        if self.eat_keyword("like") {
            return self.parse_like_tail(expr, false, "like");
        }
        if self.eat_keyword("not ilike") {
            return self.parse_like_tail(expr, true, "ilike");
        }
        if self.eat_keyword("ilike") {
            return self.parse_like_tail(expr, false, "ilike");
        }
        if self.eat_keyword("not similar to") {
            return self.parse_like_tail(expr, true, "similar to");
        }
        if self.is_keyword("similar") && self.is_keyword_at(1, "to") {
            self.advance();
            self.advance();
            return self.parse_like_tail(expr, false, "similar to");
        }
        Err(self.err(vec!["infix operator"]))
    }

    fn parse_is_tail(&mut self, expr: Expr, negated: bool) -> Result<Expr, ParseError> {
        if self.eat_keyword("null") {
            return Ok(if negated {
                Expr::IsNotNull(Box::new(expr))
            } else {
                Expr::IsNull(Box::new(expr))
            });
        }
        if self.eat_keyword("true") {
            return Ok(if negated {
                Expr::IsNotTrue(Box::new(expr))
            } else {
                Expr::IsTrue(Box::new(expr))
            });
        }
        if self.eat_keyword("false") {
            return Ok(if negated {
                Expr::IsNotFalse(Box::new(expr))
            } else {
                Expr::IsFalse(Box::new(expr))
            });
        }
        Err(self.err(vec!["NULL", "TRUE", "FALSE"]))
    }

    fn parse_between_tail(&mut self, expr: Expr, negated: bool) -> Result<Expr, ParseError> {
        let low = self.parse_subexpr(Precedence::Between)?;
        self.expect_keyword("and")?;
        let high = self.parse_subexpr(Precedence::Between)?;
        Ok(Expr::Between {
            expr: Box::new(expr),
            negated,
            low: Box::new(low),
            high: Box::new(high),
        })
    }

    fn parse_in_tail(&mut self, expr: Expr, negated: bool) -> Result<Expr, ParseError> {
        self.expect_lparen()?;
        if self.is_keyword("select") || self.is_keyword("with") {
            let subquery = Box::new(self.parse_query()?);
            self.expect_rparen()?;
            return Ok(Expr::InSubquery {
                expr: Box::new(expr),
                subquery,
                negated,
            });
        }
        let list = if matches!(self.cur(), Token::RParen) {
            Vec::new()
        } else {
            self.parse_comma_separated(Self::parse_expr)?
        };
        self.expect_rparen()?;
        Ok(Expr::InList {
            expr: Box::new(expr),
            list,
            negated,
        })
    }

    fn parse_like_tail(
        &mut self,
        expr: Expr,
        negated: bool,
        which: &str,
    ) -> Result<Expr, ParseError> {
        let pattern = Box::new(self.parse_subexpr(Precedence::Between)?);
        let escape_char = if self.eat_keyword("escape") {
            match self.parse_subexpr(Precedence::Between)? {
                Expr::Value(Value::SingleQuotedString(s)) => s.chars().next(),
                _ => None,
            }
        } else {
            None
        };
        let expr = Box::new(expr);
        Ok(match which {
            "like" => Expr::Like {
                negated,
                expr,
                pattern,
                escape_char,
            },
            "ilike" => Expr::ILike {
                negated,
                expr,
                pattern,
                escape_char,
            },
            _ => Expr::SimilarTo {
                negated,
                expr,
                pattern,
                escape_char,
            },
        })
    }

    fn parse_prefix(&mut self) -> Result<Expr, ParseError> {
        self.push_ctx("expr");
        let result = self.parse_prefix_inner();
        self.pop_ctx();
        result
    }

    fn parse_prefix_inner(&mut self) -> Result<Expr, ParseError> {
        if self.is_keyword("not") && self.is_keyword_at(1, "exists") {
            self.advance();
            self.advance();
            self.expect_lparen()?;
            let subquery = Box::new(self.parse_query()?);
            self.expect_rparen()?;
            return Ok(Expr::Exists {
                subquery,
                negated: true,
            });
        }
        if self.eat_keyword("not") {
            let expr = self.parse_subexpr(Precedence::Not)?;
            return Ok(Expr::UnaryOp {
                op: UnaryOperator::Not,
                expr: Box::new(expr),
            });
        }
        if self.eat_operator("+") {
            let expr = self.parse_subexpr(Precedence::Plus)?;
            return Ok(Expr::UnaryOp {
                op: UnaryOperator::Plus,
                expr: Box::new(expr),
            });
        }
        if self.eat_operator("-") {
            let expr = self.parse_subexpr(Precedence::Plus)?;
            return Ok(Expr::UnaryOp {
                op: UnaryOperator::Minus,
                expr: Box::new(expr),
            });
        }
        if self.eat_keyword("exists") {
            self.expect_lparen()?;
            let subquery = Box::new(self.parse_query()?);
            self.expect_rparen()?;
            return Ok(Expr::Exists {
                subquery,
                negated: false,
            });
        }
        if self.eat_keyword("case") {
            return self.parse_case();
        }
        if self.eat_keyword("cast") {
            return self.parse_cast(false);
        }
        if self.eat_keyword("try_cast") {
            return self.parse_cast(true);
        }
        if self.eat_keyword("extract") {
            return self.parse_extract();
        }
        if self.eat_keyword("position") {
            return self.parse_position();
        }
        if self.eat_keyword("substring") {
            return self.parse_substring();
        }
        if self.eat_keyword("trim") {
            return self.parse_trim();
        }
        if self.eat_keyword("overlay") {
            return self.parse_overlay();
        }
        if self.eat_keyword("array") {
            self.expect_lparen()?;
            if self.is_keyword("select") || self.is_keyword("with") {
                let subquery = Box::new(self.parse_query()?);
                self.expect_rparen()?;
                return Ok(Expr::Subquery(subquery));
            }
            let items = if matches!(self.cur(), Token::RParen) {
                Vec::new()
            } else {
                self.parse_comma_separated(Self::parse_expr)?
            };
            self.expect_rparen()?;
            return Ok(Expr::Array(items));
        }
        if matches!(self.cur(), Token::Operator(op) if op == "*")
        {
            self.advance();
            return Ok(Expr::Wildcard);
        }

        match self.cur().clone() {
            Token::Literal(_) => self.parse_literal(),
            Token::Parameter(p) => {
                self.advance();
                Ok(Expr::Value(Value::Placeholder(p)))
            }
            Token::Function(name) => {
                self.advance();
                self.parse_function_tail(ObjectName(vec![Ident::new(name)]))
            }
            Token::Identifier { .. } => {
                let first = self.parse_identifier()?;
                if matches!(self.cur(), Token::Dot) {
                    let mut idents = vec![first];
                    while matches!(self.cur(), Token::Dot) {
                        self.advance();
                        if matches!(self.cur(), Token::Operator(op) if op == "*") {
                            self.advance();
                            return Ok(Expr::QualifiedWildcard(ObjectName(idents)));
                        }
                        idents.push(self.parse_identifier()?);
                    }
                    Ok(Expr::CompoundIdentifier(idents))
                } else {
                    Ok(Expr::Identifier(first))
                }
            }
            Token::LParen => {
                self.advance();
                if self.is_keyword("select") || self.is_keyword("with") || self.is_keyword("values")
                {
                    let query = self.parse_query()?;
                    self.expect_rparen()?;
                    return Ok(Expr::Subquery(Box::new(query)));
                }
                let first = self.parse_expr()?;
                if matches!(self.cur(), Token::Comma) {
                    let mut items = vec![first];
                    while self.eat_comma() {
                        items.push(self.parse_expr()?);
                    }
                    self.expect_rparen()?;
                    return Ok(Expr::Tuple(items));
                }
                self.expect_rparen()?;
                Ok(Expr::Nested(Box::new(first)))
            }
            Token::Keyword(k) => {
                // Keywords that are legal as bare identifiers in expression
                // position (e.g. dialect-reserved function names used as
                // column names) fall through to identifier parsing.
                self.advance();
                Ok(Expr::Identifier(Ident::new(k)))
            }
            other => Err(ParseError::new(
                self.location().offset,
                vec!["expression"],
                format!("{:?}", other),
                self.ctx_vec(),
            )),
        }
    }

    fn parse_literal(&mut self) -> Result<Expr, ParseError> {
        let lit = match self.advance() {
            Token::Literal(l) => l,
            _ => unreachable!("checked by caller"),
        };
        Ok(Expr::Value(match lit {
            LiteralValue::Number(n) => Value::Number(n, false),
            LiteralValue::SingleQuotedString(s) => Value::SingleQuotedString(s),
            LiteralValue::EscapedString(s) => Value::EscapedStringLiteral(s),
            LiteralValue::UnicodeString(s) => Value::SingleQuotedString(s),
            LiteralValue::NationalString(s) => Value::NationalStringLiteral(s),
            LiteralValue::HexString(s) => Value::HexStringLiteral(s),
            LiteralValue::Boolean(b) => Value::Boolean(b),
            LiteralValue::Null => Value::Null,
        }))
    }

    fn parse_case(&mut self) -> Result<Expr, ParseError> {
        let operand = if !self.is_keyword("when") {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };
        let mut conditions = Vec::new();
        let mut results = Vec::new();
        while self.eat_keyword("when") {
            conditions.push(self.parse_expr()?);
            self.expect_keyword("then")?;
            results.push(self.parse_expr()?);
        }
        let else_result = if self.eat_keyword("else") {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };
        self.expect_keyword("end")?;
        Ok(Expr::Case {
            operand,
            conditions,
            results,
            else_result,
        })
    }

    fn parse_cast(&mut self, try_cast: bool) -> Result<Expr, ParseError> {
        self.expect_lparen()?;
        let expr = Box::new(self.parse_expr()?);
        self.expect_keyword("as")?;
        let data_type = self.parse_data_type()?;
        self.expect_rparen()?;
        Ok(if try_cast {
            Expr::TryCast { expr, data_type }
        } else {
            Expr::Cast {
                expr,
                data_type,
                double_colon: false,
            }
        })
    }

    fn parse_extract(&mut self) -> Result<Expr, ParseError> {
        self.expect_lparen()?;
        let field = self.parse_date_time_field()?;
        self.expect_keyword("from")?;
        let expr = Box::new(self.parse_expr()?);
        self.expect_rparen()?;
        Ok(Expr::Extract { field, expr })
    }

    fn parse_date_time_field(&mut self) -> Result<DateTimeField, ParseError> {
        let ident = self.parse_identifier()?;
        date_time_field_from_name(&ident.value)
            .ok_or_else(|| self.err(vec!["date/time field"]))
    }

    fn parse_position(&mut self) -> Result<Expr, ParseError> {
        self.expect_lparen()?;
        let expr = Box::new(self.parse_subexpr(Precedence::Between)?);
        self.expect_keyword("in")?;
        let in_ = Box::new(self.parse_expr()?);
        self.expect_rparen()?;
        Ok(Expr::Position { expr, r#in: in_ })
    }

    fn parse_substring(&mut self) -> Result<Expr, ParseError> {
        self.expect_lparen()?;
        let expr = Box::new(self.parse_expr()?);
        let substring_from = if self.eat_keyword("from") {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };
        let substring_for = if self.eat_keyword("for") {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };
        self.expect_rparen()?;
        Ok(Expr::Substring {
            expr,
            substring_from,
            substring_for,
        })
    }

    fn parse_trim(&mut self) -> Result<Expr, ParseError> {
        self.expect_lparen()?;
        let trim_where = if self.eat_keyword("both") {
            Some(TrimWhereField::Both)
        } else if self.eat_keyword("leading") {
            Some(TrimWhereField::Leading)
        } else if self.eat_keyword("trailing") {
            Some(TrimWhereField::Trailing)
        } else {
            None
        };
        // Either `TRIM(expr)`, `TRIM(what FROM expr)`, or `TRIM(BOTH what FROM expr)`.
        let first = self.parse_expr()?;
        let (trim_what, expr) = if self.eat_keyword("from") {
            (Some(Box::new(first)), self.parse_expr()?)
        } else {
            (None, first)
        };
        self.expect_rparen()?;
        Ok(Expr::Trim {
            expr: Box::new(expr),
            trim_where,
            trim_what,
        })
    }

    fn parse_overlay(&mut self) -> Result<Expr, ParseError> {
        self.expect_lparen()?;
        let expr = Box::new(self.parse_expr()?);
        self.expect_keyword("placing")?;
        let overlay_what = Box::new(self.parse_expr()?);
        self.expect_keyword("from")?;
        let overlay_from = Box::new(self.parse_expr()?);
        let overlay_for = if self.eat_keyword("for") {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };
        self.expect_rparen()?;
        Ok(Expr::Overlay {
            expr,
            overlay_what,
            overlay_from,
            overlay_for,
        })
    }

    fn parse_function_arg(&mut self) -> Result<FunctionArg, ParseError> {
        if matches!(self.cur(), Token::Identifier { .. }) && self.is_fat_arrow_at(1) {
            let name = self.parse_identifier()?;
            self.expect_operator("=>")?;
            let arg = self.parse_expr()?;
            return Ok(FunctionArg::Named { name, arg });
        }
        Ok(FunctionArg::Unnamed(self.parse_expr()?))
    }

    fn is_fat_arrow_at(&self, n: usize) -> bool {
        matches!(self.peek_nth(n), Token::Operator(op) if op == "=>")
    }

    fn parse_function_tail(&mut self, name: ObjectName) -> Result<Expr, ParseError> {
        self.expect_lparen()?;
        let distinct = self.eat_keyword("distinct");
        let _ = self.eat_keyword("all");
        let args = if matches!(self.cur(), Token::RParen)
            || (matches!(self.cur(), Token::Operator(op) if op == "*"))
        {
            if matches!(self.cur(), Token::Operator(op) if op == "*") {
                self.advance();
                Vec::new()
            } else {
                Vec::new()
            }
        } else {
            self.parse_comma_separated(Self::parse_function_arg)?
        };
        let order_by = if self.eat_keyword("order by") {
            self.parse_comma_separated(Self::parse_order_by_expr)?
        } else {
            Vec::new()
        };
        self.expect_rparen()?;

        let within_group = if self.eat_keyword("within group") {
            self.expect_lparen()?;
            self.expect_keyword("order by")?;
            let ob = self.parse_comma_separated(Self::parse_order_by_expr)?;
            self.expect_rparen()?;
            Some(ob)
        } else {
            None
        };

        let filter = if self.eat_keyword("filter") {
            self.expect_lparen()?;
            self.expect_keyword("where")?;
            let f = self.parse_expr()?;
            self.expect_rparen()?;
            Some(Box::new(f))
        } else {
            None
        };

        let over = if self.eat_keyword("over") {
            if self.eat_lparen() {
                let spec = self.parse_window_spec()?;
                self.expect_rparen()?;
                Some(WindowType::Spec(spec))
            } else {
                Some(WindowType::NamedWindow(self.parse_identifier()?))
            }
        } else {
            None
        };

        Ok(Expr::Function(Function {
            name,
            args,
            distinct,
            order_by,
            filter,
            over,
            within_group,
        }))
    }

    fn parse_window_spec(&mut self) -> Result<WindowSpec, ParseError> {
        let window_name = if matches!(self.cur(), Token::Identifier { .. })
            && !self.is_keyword("partition by")
            && !self.is_keyword("order by")
        {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        let partition_by = if self.eat_keyword("partition by") {
            self.parse_comma_separated(Self::parse_expr)?
        } else {
            Vec::new()
        };
        let order_by = if self.eat_keyword("order by") {
            self.parse_comma_separated(Self::parse_order_by_expr)?
        } else {
            Vec::new()
        };
        let window_frame = if self.is_keyword("rows") || self.is_keyword("range") || self.is_keyword("groups")
        {
            Some(self.parse_window_frame()?)
        } else {
            None
        };
        Ok(WindowSpec {
            window_name,
            partition_by,
            order_by,
            window_frame,
        })
    }

    fn parse_window_frame(&mut self) -> Result<WindowFrame, ParseError> {
        let units = if self.eat_keyword("rows") {
            WindowFrameUnits::Rows
        } else if self.eat_keyword("range") {
            WindowFrameUnits::Range
        } else {
            self.expect_keyword("groups")?;
            WindowFrameUnits::Groups
        };
        let (start_bound, end_bound) = if self.eat_keyword("between") {
            let start = self.parse_window_frame_bound()?;
            self.expect_keyword("and")?;
            let end = self.parse_window_frame_bound()?;
            (start, Some(end))
        } else {
            (self.parse_window_frame_bound()?, None)
        };
        Ok(WindowFrame {
            units,
            start_bound,
            end_bound,
        })
    }

    fn parse_window_frame_bound(&mut self) -> Result<WindowFrameBound, ParseError> {
        if self.eat_keyword_seq(&["current", "row"]) {
            return Ok(WindowFrameBound::CurrentRow);
        }
        if self.eat_keyword_seq(&["unbounded", "preceding"]) {
            return Ok(WindowFrameBound::Preceding(None));
        }
        if self.eat_keyword_seq(&["unbounded", "following"]) {
            return Ok(WindowFrameBound::Following(None));
        }
        let value = Box::new(self.parse_subexpr(Precedence::Between)?);
        if self.eat_keyword("preceding") {
            Ok(WindowFrameBound::Preceding(Some(value)))
        } else if self.eat_keyword("following") {
            Ok(WindowFrameBound::Following(Some(value)))
        } else {
            Err(self.err(vec!["PRECEDING", "FOLLOWING"]))
        }
    }

    fn parse_order_by_expr(&mut self) -> Result<OrderByExpr, ParseError> {
        let expr = self.parse_expr()?;
        let asc = if self.eat_keyword("asc") {
            Some(true)
        } else if self.eat_keyword("desc") {
            Some(false)
        } else {
            None
        };
        let nulls_first = if self.eat_keyword("nulls first") {
            Some(true)
        } else if self.eat_keyword("nulls last") {
            Some(false)
        } else {
            None
        };
        Ok(OrderByExpr {
            expr,
            asc,
            nulls_first,
        })
    }

    // ---- data types -------------------------------------------------------

    fn parse_data_type(&mut self) -> Result<DataType, ParseError> {
        let base = if self.eat_keyword("boolean") || self.eat_keyword("bool") {
            DataType::Boolean
        } else if self.eat_keyword("smallint") {
            DataType::SmallInt
        } else if self.eat_keyword("int") || self.eat_keyword("integer") {
            DataType::Int
        } else if self.eat_keyword("bigint") {
            DataType::BigInt
        } else if self.eat_keyword("real") {
            DataType::Real
        } else if self.eat_keyword("double precision") || self.eat_keyword("double") {
            DataType::DoublePrecision
        } else if self.eat_keyword("numeric") || self.eat_keyword("decimal") {
            let (precision, scale) = self.parse_optional_precision_scale()?;
            DataType::Numeric { precision, scale }
        } else if self.eat_keyword("char") || self.eat_keyword("character") {
            let (precision, _) = self.parse_optional_precision_scale()?;
            DataType::Char(precision)
        } else if self.eat_keyword("character varying") || self.eat_keyword("varchar") {
            let (precision, _) = self.parse_optional_precision_scale()?;
            DataType::Varchar(precision)
        } else if self.eat_keyword("text") {
            DataType::Text
        } else if self.eat_keyword("date") {
            DataType::Date
        } else if self.eat_keyword("time without time zone") {
            let (precision, _) = self.parse_optional_precision_scale()?;
            DataType::Time {
                precision,
                with_timezone: Some(false),
            }
        } else if self.eat_keyword("time with time zone") {
            let (precision, _) = self.parse_optional_precision_scale()?;
            DataType::Time {
                precision,
                with_timezone: Some(true),
            }
        } else if self.eat_keyword("time") {
            let (precision, _) = self.parse_optional_precision_scale()?;
            DataType::Time {
                precision,
                with_timezone: None,
            }
        } else if self.eat_keyword("timestamp without time zone") {
            let (precision, _) = self.parse_optional_precision_scale()?;
            DataType::Timestamp {
                precision,
                with_timezone: Some(false),
            }
        } else if self.eat_keyword("timestamp with time zone") {
            let (precision, _) = self.parse_optional_precision_scale()?;
            DataType::Timestamp {
                precision,
                with_timezone: Some(true),
            }
        } else if self.eat_keyword("timestamp") {
            let (precision, _) = self.parse_optional_precision_scale()?;
            DataType::Timestamp {
                precision,
                with_timezone: None,
            }
        } else {
            let name = self.parse_object_name()?;
            let args = if self.eat_lparen() {
                let args = self.parse_comma_separated(Self::parse_u64)?;
                self.expect_rparen()?;
                args
            } else {
                Vec::new()
            };
            DataType::Custom { name, args }
        };

        if self.eat_lbracket_rbracket() {
            return Ok(DataType::Array(Box::new(base)));
        }
        Ok(base)
    }

    fn eat_lbracket_rbracket(&mut self) -> bool {
        if matches!(self.cur(), Token::LBracket) && matches!(self.peek_nth(1), Token::RBracket) {
            self.advance();
            self.advance();
            true
        } else {
            false
        }
    }

    fn parse_u64(&mut self) -> Result<u64, ParseError> {
        match self.advance() {
            Token::Literal(LiteralValue::Number(n)) => {
                n.parse::<u64>().map_err(|_| self.err(vec!["integer"]))
            }
            other => Err(ParseError::new(
                self.location().offset,
                vec!["integer"],
                format!("{:?}", other),
                self.ctx_vec(),
            )),
        }
    }

    fn parse_optional_precision_scale(&mut self) -> Result<(Option<u64>, Option<u64>), ParseError> {
        if !self.eat_lparen() {
            return Ok((None, None));
        }
        let precision = self.parse_u64()?;
        let scale = if self.eat_comma() {
            Some(self.parse_u64()?)
        } else {
            None
        };
        self.expect_rparen()?;
        Ok((Some(precision), scale))
    }
}

fn binary_operator_for(op: &str) -> Option<BinaryOperator> {
    Some(match op {
        "+" => BinaryOperator::Plus,
        "-" => BinaryOperator::Minus,
        "*" => BinaryOperator::Multiply,
        "/" => BinaryOperator::Divide,
        "%" => BinaryOperator::Modulo,
        "||" => BinaryOperator::StringConcat,
        ">" => BinaryOperator::Gt,
        "<" => BinaryOperator::Lt,
        ">=" => BinaryOperator::GtEq,
        "<=" => BinaryOperator::LtEq,
        "=" => BinaryOperator::Eq,
        "<>" | "!=" => BinaryOperator::NotEq,
        "|" => BinaryOperator::BitwiseOr,
        "&" => BinaryOperator::BitwiseAnd,
        "#" => BinaryOperator::BitwiseXor,
        _ => return None,
    })
}

fn expr_as_text(expr: &Expr) -> String {
    match expr {
        Expr::Identifier(ident) => ident.value.clone(),
        _ => String::new(),
    }
}

fn date_time_field_from_name(name: &str) -> Option<DateTimeField> {
    Some(match name.to_lowercase().as_str() {
        "year" => DateTimeField::Year,
        "month" => DateTimeField::Month,
        "week" => DateTimeField::Week,
        "day" => DateTimeField::Day,
        "hour" => DateTimeField::Hour,
        "minute" => DateTimeField::Minute,
        "second" => DateTimeField::Second,
        "century" => DateTimeField::Century,
        "decade" => DateTimeField::Decade,
        "dow" => DateTimeField::Dow,
        "doy" => DateTimeField::Doy,
        "epoch" => DateTimeField::Epoch,
        "isodow" => DateTimeField::Isodow,
        "isoyear" => DateTimeField::Isoyear,
        "julian" => DateTimeField::Julian,
        "microseconds" => DateTimeField::Microseconds,
        "millenium" => DateTimeField::Millenium,
        "milliseconds" => DateTimeField::Milliseconds,
        "quarter" => DateTimeField::Quarter,
        "timezone" => DateTimeField::Timezone,
        "timezone_hour" => DateTimeField::TimezoneHour,
        "timezone_minute" => DateTimeField::TimezoneMinute,
        _ => return None,
    })
}

use crate::keywords;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Dialect;

    fn roundtrip(sql: &str) -> String {
        let query = parse_query(sql).unwrap();
        query.sql(&Dialect::default()).unwrap()
    }

    #[test]
    fn simple_select_star() {
        assert_eq!(roundtrip("select * from users"), "SELECT * FROM users");
    }

    #[test]
    fn where_and_order_by() {
        assert_eq!(
            roundtrip("select id from t where a = 1 and b > 2 order by id desc"),
            "SELECT id FROM t WHERE a = 1 AND b > 2 ORDER BY id DESC"
        );
    }

    #[test]
    fn joins_and_aliases() {
        let sql = "select a.x from a join b on a.id = b.id";
        assert_eq!(
            roundtrip(sql),
            "SELECT a.x FROM a JOIN b ON a.id = b.id"
        );
    }

    #[test]
    fn group_by_having() {
        assert_eq!(
            roundtrip("select a, count(*) from t group by a having count(*) > 1"),
            "SELECT a, count(*) FROM t GROUP BY a HAVING count(*) > 1"
        );
    }

    #[test]
    fn function_with_distinct_and_filter() {
        assert_eq!(
            roundtrip("select count(distinct x) filter (where x > 0) from t"),
            "SELECT count(DISTINCT x) FILTER (WHERE x > 0) FROM t"
        );
    }

    #[test]
    fn distinct_on_parses_and_round_trips() {
        assert_eq!(
            roundtrip("select distinct on (a, b) a, b, c from t"),
            "SELECT DISTINCT ON (a, b) a, b, c FROM t"
        );
    }

    #[test]
    fn plain_distinct_still_parses() {
        assert_eq!(
            roundtrip("select distinct a from t"),
            "SELECT DISTINCT a FROM t"
        );
    }

    #[test]
    fn window_function_over() {
        let sql = "select row_number() over (partition by a order by b) from t";
        assert_eq!(
            roundtrip(sql),
            "SELECT row_number() OVER (PARTITION BY a ORDER BY b) FROM t"
        );
    }

    #[test]
    fn percentile_cont_within_group() {
        let sql = "select percentile_cont(0.5) within group (order by x) from t";
        assert_eq!(
            roundtrip(sql),
            "SELECT percentile_cont(0.5) WITHIN GROUP (ORDER BY x) FROM t"
        );
    }

    #[test]
    fn cte_with_recursive() {
        let sql = "with recursive t as (select 1) select * from t";
        assert_eq!(
            roundtrip(sql),
            "WITH RECURSIVE t AS (SELECT 1) SELECT * FROM t"
        );
    }

    #[test]
    fn values_roundtrip() {
        assert_eq!(roundtrip("values (1, 2), (3, 4)"), "VALUES (1, 2), (3, 4)");
    }

    #[test]
    fn case_expression() {
        let sql = "select case when a > 0 then 1 else 0 end from t";
        assert_eq!(
            roundtrip(sql),
            "SELECT CASE WHEN a > 0 THEN 1 ELSE 0 END FROM t"
        );
    }

    #[test]
    fn cast_and_double_colon() {
        assert_eq!(roundtrip("select x::int from t"), "SELECT x::INT FROM t");
        assert_eq!(
            roundtrip("select cast(x as int) from t"),
            "SELECT CAST(x AS INT) FROM t"
        );
    }

    #[test]
    fn between_and_in_and_like() {
        assert_eq!(
            roundtrip("select 1 from t where a between 1 and 10"),
            "SELECT 1 FROM t WHERE a BETWEEN 1 AND 10"
        );
        assert_eq!(
            roundtrip("select 1 from t where a not in (1, 2)"),
            "SELECT 1 FROM t WHERE a NOT IN (1, 2)"
        );
        assert_eq!(
            roundtrip("select 1 from t where a like 'x%'"),
            "SELECT 1 FROM t WHERE a LIKE 'x%'"
        );
    }

    #[test]
    fn indexed_parameter() {
        assert_eq!(
            roundtrip("select * from t where id = $1"),
            "SELECT * FROM t WHERE id = $1"
        );
    }

    #[test]
    fn limit_offset_and_for_update() {
        assert_eq!(
            roundtrip("select * from t limit 10 offset 5 for update"),
            "SELECT * FROM t LIMIT 10 OFFSET 5 FOR UPDATE"
        );
    }

    #[test]
    fn subquery_in_from() {
        assert_eq!(
            roundtrip("select a from (select a from t) as s"),
            "SELECT a FROM (SELECT a FROM t) AS s"
        );
    }

    #[test]
    fn union_of_selects() {
        assert_eq!(
            roundtrip("select 1 union all select 2"),
            "SELECT 1 UNION ALL SELECT 2"
        );
    }
}
