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

//! A SQL tokenizer, recursive-descent parser, and dialect-aware formatter.
//!
//! ```text
//! tokenize  -> Vec<Lexeme>        (tokenizer)
//! parse_*   -> ast::*             (parser, built on the tokenizer)
//! cte       -> CteGraph           (dependency analysis over ast::With)
//! format    -> FormatResult       (print_token lowering + printer, over ast::Query)
//! ```
//!
//! [`format::format`] is the most common entry point: parse with
//! [`parser::parse_query`], then format with a [`format::FormatOptions`].

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod ast;
pub mod cte;
pub mod dialect;
pub mod error;
pub mod format;
pub mod keywords;
pub mod parser;
pub mod tokenizer;

pub use dialect::{Dialect, DialectDisplay};
pub use error::{FormatError, ParseError, PresetError, SqlGenError, TokenizeError};
pub use format::{format, format_query, FormatOptions, FormatResult};
pub use parser::{parse_query, Parser};
pub use tokenizer::{tokenize, Lexeme, Token};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_parse_format_round_trip() {
        let query = parse_query("select id from accounts where active = true").unwrap();
        let result = format(&query, &FormatOptions::default()).unwrap();
        assert_eq!(
            result.sql,
            "select \"id\" from \"accounts\" where \"active\" = true"
        );
    }
}
