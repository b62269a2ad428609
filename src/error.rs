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

use core::fmt;
use std::string::String;
use std::vec::Vec;

/// Every public entry point in this crate fails with one of these, never a panic.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SqlGenError {
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Preset(#[from] PresetError),
}

/// Raised by the tokenizer on unterminated strings/comments, unknown characters,
/// or malformed literals.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("tokenize error at offset {offset}: {message}")]
pub struct TokenizeError {
    pub offset: usize,
    pub message: String,
}

impl TokenizeError {
    pub fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }
}

/// Raised by any parser routine on a grammar violation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("parse error at offset {offset}: expected one of {expected:?}, found {found} (while parsing {context:?})")]
pub struct ParseError {
    pub offset: usize,
    pub expected: Vec<String>,
    pub found: String,
    /// Breadcrumb of the productions being parsed, innermost last.
    pub context: Vec<String>,
}

impl ParseError {
    pub fn new(
        offset: usize,
        expected: Vec<impl Into<String>>,
        found: impl Into<String>,
        context: Vec<impl Into<String>>,
    ) -> Self {
        Self {
            offset,
            expected: expected.into_iter().map(Into::into).collect(),
            found: found.into(),
            context: context.into_iter().map(Into::into).collect(),
        }
    }

    pub fn end_of_input(offset: usize, expected: Vec<impl Into<String>>) -> Self {
        Self::new(offset, expected, "end of input", Vec::<String>::new())
    }
}

/// Invariant violation in the tree handed to the formatter. Always a programmer
/// error: the formatter never attempts to "fix" an invalid tree.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormatError {
    #[error("a function call cannot have both OVER and WITHIN GROUP set")]
    ConflictingWindowClause,
    #[error("write error: {0}")]
    Write(String),
}

impl From<fmt::Error> for SqlGenError {
    fn from(e: fmt::Error) -> Self {
        SqlGenError::Format(FormatError::Write(e.to_string()))
    }
}

impl From<fmt::Error> for FormatError {
    fn from(e: fmt::Error) -> Self {
        FormatError::Write(e.to_string())
    }
}

/// An unrecognized dialect preset name was requested.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown preset {name:?}")]
pub struct PresetError {
    pub name: String,
}
