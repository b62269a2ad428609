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
use alloc::{string::String, vec::Vec};
use std::fmt;

use crate::dialect::{Dialect, DialectDisplay};
use crate::error::SqlGenError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The target type of a `CAST`/`::` expression. The parser fuses the
/// multi-word spellings (`DOUBLE PRECISION`, `CHARACTER VARYING`, `TIMESTAMP
/// WITHOUT TIME ZONE`, ...) into a single [`Token::Keyword`](crate::tokenizer::Token::Keyword)
/// before this type is ever built, so every variant here corresponds to
/// exactly one canonical spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DataType {
    Boolean,
    SmallInt,
    Int,
    BigInt,
    Real,
    /// `DOUBLE PRECISION`
    DoublePrecision,
    Numeric {
        precision: Option<u64>,
        scale: Option<u64>,
    },
    /// `CHAR(n)` / `CHARACTER(n)`
    Char(Option<u64>),
    /// `VARCHAR(n)` / `CHARACTER VARYING(n)`
    Varchar(Option<u64>),
    Text,
    Date,
    Time {
        precision: Option<u64>,
        with_timezone: Option<bool>,
    },
    Timestamp {
        precision: Option<u64>,
        with_timezone: Option<bool>,
    },
    Array(Box<DataType>),
    /// Any type name the grammar doesn't special-case, with optional
    /// parenthesized precision/scale args (e.g. a dialect-specific type).
    Custom {
        name: crate::ast::ObjectName,
        args: Vec<u64>,
    },
}

impl DialectDisplay for DataType {
    fn fmt(&self, f: &mut (dyn fmt::Write), dialect: &Dialect) -> Result<(), SqlGenError> {
        match self {
            DataType::Boolean => Ok(write!(f, "BOOLEAN")?),
            DataType::SmallInt => Ok(write!(f, "SMALLINT")?),
            DataType::Int => Ok(write!(f, "INT")?),
            DataType::BigInt => Ok(write!(f, "BIGINT")?),
            DataType::Real => Ok(write!(f, "REAL")?),
            DataType::DoublePrecision => Ok(write!(f, "DOUBLE PRECISION")?),
            DataType::Numeric { precision, scale } => {
                write!(f, "NUMERIC")?;
                fmt_precision_scale(f, *precision, *scale)
            }
            DataType::Char(n) => {
                write!(f, "CHAR")?;
                fmt_precision_scale(f, *n, None)
            }
            DataType::Varchar(n) => {
                write!(f, "VARCHAR")?;
                fmt_precision_scale(f, *n, None)
            }
            DataType::Text => Ok(write!(f, "TEXT")?),
            DataType::Date => Ok(write!(f, "DATE")?),
            DataType::Time {
                precision,
                with_timezone,
            } => {
                write!(f, "TIME")?;
                fmt_precision_scale(f, *precision, None)?;
                fmt_timezone(f, *with_timezone)
            }
            DataType::Timestamp {
                precision,
                with_timezone,
            } => {
                write!(f, "TIMESTAMP")?;
                fmt_precision_scale(f, *precision, None)?;
                fmt_timezone(f, *with_timezone)
            }
            DataType::Array(inner) => Ok(write!(f, "{}[]", inner.sql(dialect)?)?),
            DataType::Custom { name, args } => {
                write!(f, "{}", name.sql(dialect)?)?;
                if !args.is_empty() {
                    let joined = args
                        .iter()
                        .map(|a| a.to_string())
                        .collect::<Vec<_>>()
                        .join(", ");
                    write!(f, "({})", joined)?;
                }
                Ok(())
            }
        }
    }
}

fn fmt_precision_scale(
    f: &mut (dyn fmt::Write),
    precision: Option<u64>,
    scale: Option<u64>,
) -> Result<(), SqlGenError> {
    match (precision, scale) {
        (Some(p), Some(s)) => Ok(write!(f, "({}, {})", p, s)?),
        (Some(p), None) => Ok(write!(f, "({})", p)?),
        (None, _) => Ok(()),
    }
}

fn fmt_timezone(f: &mut (dyn fmt::Write), with_timezone: Option<bool>) -> Result<(), SqlGenError> {
    match with_timezone {
        Some(true) => Ok(write!(f, " WITH TIME ZONE")?),
        Some(false) => Ok(write!(f, " WITHOUT TIME ZONE")?),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Dialect;

    #[test]
    fn numeric_with_precision_and_scale() {
        let ty = DataType::Numeric {
            precision: Some(10),
            scale: Some(2),
        };
        assert_eq!(ty.sql(&Dialect::default()).unwrap(), "NUMERIC(10, 2)");
    }

    #[test]
    fn timestamp_without_time_zone() {
        let ty = DataType::Timestamp {
            precision: None,
            with_timezone: Some(false),
        };
        assert_eq!(
            ty.sql(&Dialect::default()).unwrap(),
            "TIMESTAMP WITHOUT TIME ZONE"
        );
    }
}
