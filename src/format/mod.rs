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

//! The SQL formatter: lowers a parsed [`Query`] into a [`PrintToken`] tree
//! (`print_token`), then prints that tree to text while collecting bound
//! parameters (`printer`). [`FormatOptions`] (`options`) is the public
//! configuration surface.

mod options;
mod print_token;
mod printer;

pub use options::{BreakMode, FormatOptions, KeywordCase, ParamStyle};
pub use print_token::{ContainerKind, Lower, PrintToken, TokenKind};
pub use printer::ParamBag;

use crate::ast::Query;
use crate::dialect::Dialect;
use crate::error::SqlGenError;
use printer::ParamBinder;

/// The formatted SQL text plus the parameter bag collected while lowering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatResult {
    pub sql: String,
    pub params: ParamBag,
}

/// Formats `query` against an already-resolved `dialect`, bypassing preset
/// lookup. Used internally for the CTE one-liner policy's recursive
/// sub-formatting, where the dialect is already in hand.
pub fn format_query(
    query: &Query,
    dialect: &Dialect,
    opts: &FormatOptions,
) -> Result<FormatResult, SqlGenError> {
    let (style, symbol) = opts.resolve_parameter_style(dialect);
    let mut binder = ParamBinder::new(style, symbol);
    let root = Lower::lower(query, dialect, opts, &mut binder)?;
    let sql = printer::print(&root, opts);
    Ok(FormatResult {
        sql,
        params: binder.into_bag(),
    })
}

/// Resolves `opts.preset`/`identifier_escape` to a `Dialect`, then formats
/// `query` against it. This is the crate's public entry point.
pub fn format(query: &Query, opts: &FormatOptions) -> Result<FormatResult, SqlGenError> {
    let dialect = opts.resolve_dialect()?;
    format_query(query, &dialect, opts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(sql: &str) -> Query {
        crate::parser::parse_query(sql).expect("query should parse")
    }

    #[test]
    fn default_options_lowercase_and_quote() {
        let query = parse("SELECT * FROM users");
        let result = format(&query, &FormatOptions::default()).unwrap();
        assert_eq!(result.sql, "select * from \"users\"");
        assert_eq!(result.params, ParamBag::Array(Vec::new()));
    }

    #[test]
    fn indexed_override_renders_dollar_placeholder() {
        let query = parse("SELECT u.id, u.name FROM users u WHERE u.id = :userId");
        let opts = FormatOptions {
            parameter_style: Some(ParamStyle::Indexed),
            parameter_symbol: Some("$".to_string()),
            ..FormatOptions::default()
        };
        let result = format(&query, &opts).unwrap();
        assert_eq!(
            result.sql,
            "select \"u\".\"id\", \"u\".\"name\" from \"users\" as \"u\" where \"u\".\"id\" = $1"
        );
        assert_eq!(result.params, ParamBag::Array(vec!["userId".to_string()]));
    }

    #[test]
    fn values_round_trip_is_stable() {
        let query = parse("values (1, 'a', true), (2, 'b', null)");
        let result = format(&query, &FormatOptions::default()).unwrap();
        assert_eq!(result.sql, "values (1, 'a', true), (2, 'b', null)");
    }

    #[test]
    fn case_lowers_keywords_by_default() {
        let query =
            parse("SELECT CASE WHEN age > 18 THEN 'adult' ELSE 'minor' END FROM people");
        let result = format(&query, &FormatOptions::default()).unwrap();
        assert_eq!(
            result.sql,
            "select case when \"age\" > 18 then 'adult' else 'minor' end from \"people\""
        );
    }

    #[test]
    fn distinct_on_lowers_with_parenthesized_expr_list() {
        let query = parse("SELECT DISTINCT ON (a, b) a, b, c FROM t");
        let result = format(&query, &FormatOptions::default()).unwrap();
        assert_eq!(
            result.sql,
            "select distinct on (\"a\", \"b\") \"a\", \"b\", \"c\" from \"t\""
        );
    }

    #[test]
    fn formatting_is_deterministic() {
        let query = parse("SELECT a, b FROM t WHERE a = 1 AND b = 2 ORDER BY a LIMIT 10");
        let opts = FormatOptions::default();
        let first = format(&query, &opts).unwrap();
        let second = format(&query, &opts).unwrap();
        assert_eq!(first, second);
    }
}
