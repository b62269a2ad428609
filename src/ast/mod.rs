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

//! The tagged-variant AST model: query/clause nodes in [`query`], primitive
//! values in [`value`], the expression family in [`expr`], and data types in
//! [`data_type`]. Every node owns its children exclusively; the tree is
//! acyclic by construction (see `SPEC_FULL.md` §3).

pub mod data_type;
pub mod expr;
pub mod query;
pub mod value;

#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, string::String, vec::Vec};
use std::fmt;

use crate::dialect::{Dialect, DialectDisplay};
pub use crate::error::SqlGenError;

pub use data_type::DataType;
pub use expr::*;
pub use query::*;
pub use value::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An identifier, quoted or not. `quote_style` is `Some(c)` when the source
/// lexeme was delimited (`"x"`, `` `x` ``, `[x]`); such identifiers always
/// retain their original case and are emitted re-quoted with the dialect's
/// escape pair regardless of how they were originally spelled.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ident {
    pub value: String,
    pub quote_style: Option<char>,
}

impl Ident {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quote_style: None,
        }
    }

    pub fn quoted(value: impl Into<String>, quote: char) -> Self {
        Self {
            value: value.into(),
            quote_style: Some(quote),
        }
    }
}

impl From<&str> for Ident {
    fn from(value: &str) -> Self {
        Ident::new(value)
    }
}

impl DialectDisplay for Ident {
    fn fmt(&self, f: &mut (dyn fmt::Write), dialect: &Dialect) -> Result<(), SqlGenError> {
        if let Some(style) = dialect.quote_style {
            Ok(write!(
                f,
                "{}{}{}",
                style,
                self.value,
                crate::dialect::closing_quote(style)
            )?)
        } else {
            Ok(write!(f, "{}", self.value)?)
        }
    }
}

/// A possibly-qualified name: `schema.table`, `db.schema.table`, or a bare name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObjectName(pub Vec<Ident>);

impl DialectDisplay for ObjectName {
    fn fmt(&self, f: &mut (dyn fmt::Write), dialect: &Dialect) -> Result<(), SqlGenError> {
        Ok(write!(f, "{}", display_separated(&self.0, ".").sql(dialect)?)?)
    }
}

impl ObjectName {
    /// The last identifier in the path, used to derive an alias-less select
    /// item's display name.
    pub fn last_ident(&self) -> Option<&Ident> {
        self.0.last()
    }
}

/// A comma-separated list of `T`, rendered via each item's [`DialectDisplay`].
pub struct DisplaySeparated<'a, T: DialectDisplay> {
    slice: &'a [T],
    sep: &'static str,
}

impl<'a, T: DialectDisplay> DialectDisplay for DisplaySeparated<'a, T> {
    fn fmt(&self, f: &mut (dyn fmt::Write), dialect: &Dialect) -> Result<(), SqlGenError> {
        let mut delim = "";
        for t in self.slice {
            write!(f, "{}", delim)?;
            delim = self.sep;
            write!(f, "{}", t.sql(dialect)?)?;
        }
        Ok(())
    }
}

pub fn display_separated<'a, T: DialectDisplay>(
    slice: &'a [T],
    sep: &'static str,
) -> DisplaySeparated<'a, T> {
    DisplaySeparated { slice, sep }
}

pub fn display_comma_separated<T: DialectDisplay>(slice: &[T]) -> DisplaySeparated<'_, T> {
    display_separated(slice, ", ")
}

/// Derives the display name used for an alias-less [`SelectItem`], per the
/// documented rule: the last identifier of a bare/compound column reference;
/// otherwise the item has no stable output name.
pub fn display_name_of(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Identifier(ident) => Some(ident.value.clone()),
        Expr::CompoundIdentifier(parts) => parts.last().map(|i| i.value.clone()),
        _ => None,
    }
}
