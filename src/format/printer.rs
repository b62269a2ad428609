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

//! Stage 2 of the formatter: the line printer. Walks a [`PrintToken`] tree
//! with an explicit stack (not native recursion, per `spec.md` §5/§9) into a
//! flat instruction list, then renders that list into `(sql, params)`.

use indexmap::IndexSet;

use crate::format::options::{BreakMode, FormatOptions, KeywordCase, ParamStyle};
use crate::format::print_token::{ContainerKind, PrintToken, TokenKind};

/// Assigns stable first-use indices to parameter identities and renders the
/// placeholder text for each style. The identity of a named or indexed
/// placeholder lexeme (`$1`, `:name`, `@p`) is its text with the leading
/// `$`/`:`/`@` symbol stripped; two occurrences sharing an identity share a
/// binding. A bare `?` carries no name at all, so it has no identity to
/// share — each occurrence gets its own synthetic, never-repeating identity,
/// one bag entry per textual appearance (`spec.md` §8's parameter-stability
/// property: order must reflect every appearance, not just unique ones).
pub struct ParamBinder {
    style: ParamStyle,
    symbol: String,
    order: IndexSet<String>,
    anon_seq: usize,
}

impl ParamBinder {
    pub fn new(style: ParamStyle, symbol: String) -> Self {
        ParamBinder {
            style,
            symbol,
            order: IndexSet::new(),
            anon_seq: 0,
        }
    }

    fn identity_of(raw: &str) -> String {
        let mut chars = raw.chars();
        match chars.next() {
            Some('$') | Some(':') | Some('@') => chars.as_str().to_string(),
            _ => raw.to_string(),
        }
    }

    pub fn bind(&mut self, raw: &str) -> PrintToken {
        let identity = if raw == "?" {
            let seq = self.anon_seq;
            self.anon_seq += 1;
            format!("?{seq}")
        } else {
            Self::identity_of(raw)
        };
        let (index, _) = self.order.insert_full(identity.clone());
        let text = match self.style {
            ParamStyle::Anonymous => self.symbol.clone(),
            ParamStyle::Indexed => format!("{}{}", self.symbol, index + 1),
            ParamStyle::Named => format!("{}{}", self.symbol, identity),
        };
        PrintToken::leaf(TokenKind::Parameter, text)
    }

    pub fn into_bag(self) -> ParamBag {
        match self.style {
            ParamStyle::Named => {
                let mut map = indexmap::IndexMap::new();
                for identity in self.order {
                    map.insert(identity.clone(), identity);
                }
                ParamBag::Named(map)
            }
            ParamStyle::Anonymous | ParamStyle::Indexed => {
                ParamBag::Array(self.order.into_iter().collect())
            }
        }
    }
}

/// The emitted parameter bag: an array preserving first-use order (indexed
/// and anonymous styles), or a name-keyed map (named style).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamBag {
    Array(Vec<String>),
    Named(indexmap::IndexMap<String, String>),
}

/// Container kinds that open an indented block in pretty-printing mode
/// (`newline != " "`), per `spec.md` §4.4.
fn opens_indent(kind: ContainerKind) -> bool {
    matches!(
        kind,
        ContainerKind::Select
            | ContainerKind::From
            | ContainerKind::Where
            | ContainerKind::GroupBy
            | ContainerKind::Having
            | ContainerKind::OrderBy
            | ContainerKind::Window
            | ContainerKind::Limit
            | ContainerKind::Offset
            | ContainerKind::With
            | ContainerKind::SetOperation
            | ContainerKind::Values
            | ContainerKind::SubQuerySource
            | ContainerKind::Case
    )
}

enum Piece {
    Text(String),
    Comma,
    AndKeyword(String),
    Comment(String),
    IndentIn,
    IndentOut,
    JoinBreak,
}

enum StackItem<'a> {
    Enter(&'a PrintToken),
    Exit { had_indent: bool },
}

/// Flattens the tree with an explicit stack: no native recursion, so
/// pathologically deep trees can't blow the call stack.
fn flatten(root: &PrintToken, opts: &FormatOptions) -> Vec<Piece> {
    let mut out = Vec::new();
    let mut stack = vec![StackItem::Enter(root)];
    while let Some(item) = stack.pop() {
        match item {
            StackItem::Exit { had_indent } => {
                if had_indent {
                    out.push(Piece::IndentOut);
                }
            }
            StackItem::Enter(tok) => {
                emit_leading_comments(tok, opts, &mut out);
                match tok.kind {
                    TokenKind::Container => {
                        let kind = tok.container.expect("container token without kind");
                        let had_indent = opens_indent(kind);
                        if had_indent {
                            out.push(Piece::IndentIn);
                        } else if kind == ContainerKind::Join {
                            out.push(Piece::JoinBreak);
                        }
                        stack.push(StackItem::Exit { had_indent });
                        for child in tok.children.iter().rev() {
                            stack.push(StackItem::Enter(child));
                        }
                    }
                    TokenKind::Comma => out.push(Piece::Comma),
                    TokenKind::Comment => out.push(Piece::Comment(tok.text.clone())),
                    TokenKind::Keyword if tok.text == "and" => {
                        out.push(Piece::AndKeyword(tok.text.clone()))
                    }
                    TokenKind::Keyword => out.push(Piece::Text(apply_case(&tok.text, opts))),
                    TokenKind::Identifier
                    | TokenKind::Literal
                    | TokenKind::Operator
                    | TokenKind::Parameter => out.push(Piece::Text(tok.text.clone())),
                }
            }
        }
    }
    out
}

fn emit_leading_comments(tok: &PrintToken, opts: &FormatOptions, out: &mut Vec<Piece>) {
    if !opts.export_comment || tok.leading_comments.is_empty() {
        return;
    }
    if opts.strict_comment_placement && tok.kind != TokenKind::Keyword {
        return;
    }
    for comment in &tok.leading_comments {
        out.push(Piece::Comment(comment.clone()));
    }
}

fn apply_case(text: &str, opts: &FormatOptions) -> String {
    match opts.keyword_case {
        KeywordCase::None => text.to_string(),
        KeywordCase::Upper => text.to_uppercase(),
        KeywordCase::Lower => text.to_lowercase(),
    }
}

/// Renders a flattened piece list into `sql`. Pretty mode (`newline != " "`)
/// honors indent level and comma/AND break placement; compact mode (the
/// default) joins every piece with plain single spaces.
fn render(pieces: &[Piece], opts: &FormatOptions) -> String {
    let pretty = opts.newline != " ";
    let mut out = String::new();
    let mut level: usize = 0;
    let mut at_line_start = true;
    let mut prev_opened_paren = false;

    let indent_of = |level: usize| opts.indent_char.to_string().repeat(opts.indent_size * level);

    let newline_at = |out: &mut String, level: usize| {
        out.push_str(&opts.newline);
        if pretty {
            out.push_str(&indent_of(level));
        }
    };

    let mut push_text = |out: &mut String, text: &str, at_line_start: &mut bool, prev_opened_paren: &mut bool| {
        if text.is_empty() {
            return;
        }
        let needs_space = !*at_line_start && !*prev_opened_paren && !text.starts_with(')');
        if needs_space {
            out.push(' ');
        }
        out.push_str(text);
        *prev_opened_paren = text.ends_with('(');
        *at_line_start = false;
    };

    for piece in pieces {
        match piece {
            Piece::Text(text) => push_text(&mut out, text, &mut at_line_start, &mut prev_opened_paren),
            Piece::Comment(text) => {
                push_text(&mut out, text, &mut at_line_start, &mut prev_opened_paren);
                // Comment safety: never let the next token abut a comment.
                out.push(' ');
                at_line_start = true;
                prev_opened_paren = false;
            }
            Piece::Comma => {
                if pretty && opts.comma_break == BreakMode::Before {
                    newline_at(&mut out, level);
                    at_line_start = true;
                    prev_opened_paren = false;
                    push_text(&mut out, ",", &mut at_line_start, &mut prev_opened_paren);
                } else {
                    out.push(',');
                    prev_opened_paren = false;
                    at_line_start = false;
                }
                if pretty && opts.comma_break == BreakMode::After {
                    newline_at(&mut out, level);
                    at_line_start = true;
                    prev_opened_paren = false;
                }
            }
            Piece::AndKeyword(text) => {
                let text = apply_case(text, opts);
                if pretty && opts.and_break == BreakMode::Before {
                    newline_at(&mut out, level);
                    at_line_start = true;
                    prev_opened_paren = false;
                }
                push_text(&mut out, &text, &mut at_line_start, &mut prev_opened_paren);
                if pretty && opts.and_break == BreakMode::After {
                    newline_at(&mut out, level);
                    at_line_start = true;
                    prev_opened_paren = false;
                }
            }
            Piece::IndentIn => {
                level += 1;
                if pretty {
                    newline_at(&mut out, level);
                    at_line_start = true;
                    prev_opened_paren = false;
                }
            }
            Piece::IndentOut => {
                level -= 1;
                if pretty {
                    newline_at(&mut out, level);
                    at_line_start = true;
                    prev_opened_paren = false;
                }
            }
            Piece::JoinBreak => {
                if pretty {
                    newline_at(&mut out, level);
                    at_line_start = true;
                    prev_opened_paren = false;
                }
            }
        }
    }
    out
}

pub fn print(root: &PrintToken, opts: &FormatOptions) -> String {
    let pieces = flatten(root, opts);
    render(&pieces, opts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_params_render_with_configured_symbol() {
        let mut binder = ParamBinder::new(ParamStyle::Named, "@".to_string());
        let a = binder.bind(":foo");
        let b = binder.bind(":foo");
        assert_eq!(a.text, "@foo");
        assert_eq!(b.text, "@foo");
        assert_eq!(
            binder.into_bag(),
            ParamBag::Named(
                [("foo".to_string(), "foo".to_string())]
                    .into_iter()
                    .collect()
            )
        );
    }

    #[test]
    fn indexed_params_assign_stable_first_use_order() {
        let mut binder = ParamBinder::new(ParamStyle::Indexed, "$".to_string());
        assert_eq!(binder.bind("$2").text, "$1");
        assert_eq!(binder.bind("$1").text, "$2");
        assert_eq!(binder.bind("$2").text, "$1");
        assert_eq!(
            binder.into_bag(),
            ParamBag::Array(vec!["2".to_string(), "1".to_string()])
        );
    }

    #[test]
    fn bare_anonymous_placeholders_each_get_their_own_slot() {
        let mut binder = ParamBinder::new(ParamStyle::Anonymous, "?".to_string());
        assert_eq!(binder.bind("?").text, "?");
        assert_eq!(binder.bind("?").text, "?");
        assert_eq!(binder.bind("?").text, "?");
        match binder.into_bag() {
            ParamBag::Array(entries) => assert_eq!(entries.len(), 3),
            other => panic!("expected ParamBag::Array, got {other:?}"),
        }
    }
}
