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

///! This module defines
/// 1) a list of constants for every keyword the tokenizer can fold a word into:
///    pub const KEYWORD: &str = "keyword"
/// 2) an `ALL_KEYWORDS` array with every keyword in it, used by the tokenizer to
///    decide whether a bare `Word` should be tagged `Keyword` or `Identifier`.
///
/// This is not a list of *reserved* keywords: most of these can still be parsed
/// as identifiers when no grammar production demands a keyword at that position.

// `stringify!` can't lowercase, so keywords are declared with an explicit literal.
macro_rules! define_keywords {
    ($($ident:ident = $lit:expr),* $(,)?) => {
        $(pub const $ident: &str = $lit;)*

        pub const ALL_KEYWORDS: &[&str] = &[$($lit),*];
    };
}

define_keywords!(
    ALL = "all",
    AND = "and",
    APPLY = "apply",
    ARRAY = "array",
    AS = "as",
    ASC = "asc",
    AT = "at",
    BETWEEN = "between",
    BOTH = "both",
    BY = "by",
    CASE = "case",
    CAST = "cast",
    CHARACTER = "character",
    COLLATE = "collate",
    CROSS = "cross",
    CURRENT = "current",
    DATE = "date",
    DAY = "day",
    DEC = "dec",
    DECIMAL = "decimal",
    DESC = "desc",
    DISTINCT = "distinct",
    DOUBLE = "double",
    ELSE = "else",
    END = "end",
    ESCAPE = "escape",
    EXCEPT = "except",
    EXISTS = "exists",
    EXTRACT = "extract",
    FALSE = "false",
    FETCH = "fetch",
    FILTER = "filter",
    FIRST = "first",
    FLOAT = "float",
    FOLLOWING = "following",
    FOR = "for",
    FROM = "from",
    FULL = "full",
    GROUP = "group",
    GROUPS = "groups",
    HAVING = "having",
    HOUR = "hour",
    ILIKE = "ilike",
    IN = "in",
    INNER = "inner",
    INT = "int",
    INTEGER = "integer",
    INTERSECT = "intersect",
    INTERVAL = "interval",
    INTO = "into",
    IS = "is",
    JOIN = "join",
    LAST = "last",
    LATERAL = "lateral",
    LEADING = "leading",
    LEFT = "left",
    LIKE = "like",
    LIMIT = "limit",
    LOCKED = "locked",
    MATERIALIZED = "materialized",
    MINUTE = "minute",
    MONTH = "month",
    NATURAL = "natural",
    NCHAR = "nchar",
    NOT = "not",
    NOWAIT = "nowait",
    NULL = "null",
    NULLS = "nulls",
    NUMERIC = "numeric",
    OF = "of",
    OFFSET = "offset",
    ON = "on",
    ONLY = "only",
    OR = "or",
    ORDER = "order",
    OUTER = "outer",
    OVER = "over",
    OVERLAY = "overlay",
    PARTITION = "partition",
    PERCENT = "percent",
    PLACING = "placing",
    POSITION = "position",
    PRECEDING = "preceding",
    PRECISION = "precision",
    RANGE = "range",
    RECURSIVE = "recursive",
    RIGHT = "right",
    ROW = "row",
    ROWS = "rows",
    SECOND = "second",
    SELECT = "select",
    SHARE = "share",
    SIMILAR = "similar",
    SKIP = "skip",
    SMALLINT = "smallint",
    SOME = "some",
    SUBSTRING = "substring",
    TABLE = "table",
    THEN = "then",
    TIES = "ties",
    TIME = "time",
    TIMESTAMP = "timestamp",
    TO = "to",
    TOP = "top",
    TRAILING = "trailing",
    TRIM = "trim",
    TRUE = "true",
    UNBOUNDED = "unbounded",
    UNION = "union",
    UNKNOWN = "unknown",
    UPDATE = "update",
    UESCAPE = "uescape",
    USING = "using",
    VALUE = "value",
    VALUES = "values",
    VARCHAR = "varchar",
    VARYING = "varying",
    VIEW = "view",
    WHEN = "when",
    WHERE = "where",
    WINDOW = "window",
    WITH = "with",
    WITHIN = "within",
    WITHOUT = "without",
    YEAR = "year",
    ZONE = "zone",
);

/// Reserved multi-word phrases, longest-first within each starting word so the
/// tokenizer's lookahead always finds the longest match. Joined with a single
/// space to form the canonical lowercase value of the fused `Keyword` lexeme.
pub const MULTI_WORD_KEYWORDS: &[&[&str]] = &[
    &["timestamp", "without", "time", "zone"],
    &["timestamp", "with", "time", "zone"],
    &["time", "without", "time", "zone"],
    &["time", "with", "time", "zone"],
    &["is", "not", "distinct", "from"],
    &["distinct", "on"],
    &["character", "varying"],
    &["char", "varying"],
    &["double", "precision"],
    &["group", "by"],
    &["order", "by"],
    &["partition", "by"],
    &["within", "group"],
    &["lateral", "view"],
    &["cross", "apply"],
    &["outer", "apply"],
    &["nulls", "first"],
    &["nulls", "last"],
    &["is", "not"],
    &["not", "in"],
    &["not", "between"],
    &["not", "like"],
    &["not", "ilike"],
    &["not", "similar", "to"],
    &["not", "materialized"],
    &["union", "all"],
    &["left", "outer", "join"],
    &["right", "outer", "join"],
    &["full", "outer", "join"],
    &["left", "join"],
    &["right", "join"],
    &["full", "join"],
    &["inner", "join"],
    &["cross", "join"],
    &["natural", "left", "join"],
    &["natural", "right", "join"],
    &["natural", "full", "join"],
    &["natural", "inner", "join"],
    &["natural", "join"],
    &["at", "time", "zone"],
    &["for", "update"],
    &["for", "share"],
    &["skip", "locked"],
    &["with", "ties"],
];

/// Keywords that can't be used as a bare table alias, so that `FROM table alias`
/// can be parsed unambiguously without further lookahead.
pub const RESERVED_FOR_TABLE_ALIAS: &[&str] = &[
    WITH, SELECT, WHERE, GROUP, HAVING, ORDER, LIMIT, OFFSET, FETCH, UNION, EXCEPT,
    INTERSECT, ON, JOIN, INNER, CROSS, FULL, LEFT, RIGHT, NATURAL, USING, OUTER,
];

/// Keywords that can't be used as a bare column alias, so that
/// `SELECT <expr> alias` can be parsed unambiguously.
pub const RESERVED_FOR_COLUMN_ALIAS: &[&str] = &[
    WITH, SELECT, WHERE, GROUP, HAVING, ORDER, LIMIT, OFFSET, FETCH, UNION, EXCEPT,
    INTERSECT, FROM,
];

/// Returns `true` when `word` (already lowercased) is a known keyword.
pub fn is_keyword(word: &str) -> bool {
    ALL_KEYWORDS.contains(&word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_is_a_keyword() {
        assert!(is_keyword("select"));
        assert!(!is_keyword("users"));
    }

    #[test]
    fn multi_word_phrases_are_lowercase() {
        for phrase in MULTI_WORD_KEYWORDS {
            for word in *phrase {
                assert_eq!(*word, word.to_lowercase());
            }
        }
    }
}
