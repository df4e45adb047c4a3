//! Moving trivia from a removed guard onto its replacement statement.
//!
//! The replacement statement starts where the `if` keyword started and ends
//! where the guard ended. Its leading trivia is the guard's leading trivia,
//! then the comments and blank lines on the removed header tokens (`if`,
//! `(`, the condition, `)`, `{`), then the accessor's own leading trivia. Its
//! trailing trivia is the body statement's trailing trivia and, for a
//! braced body, the trivia around `}`. Trivia after the accessor stays
//! where it is, as more of the chain may follow it.
//!
//! Afterwards the merged lists are tidied the way a formatter would tidy
//! them: moved lines are indented like the guard, and whitespace that ends
//! up dangling before a line break is dropped. Whitespace that ended the
//! guard itself is kept, as it separates the statement from whatever
//! follows on the same line. Comments and blank lines are never dropped.

use crate::shape::Guard;
use nullfold_common::trivia::{Trivia, TriviaKind, TriviaList, indentation};
use nullfold_syntax::{Node, NodeIndex, SyntaxArena, Token};

/// Splice `converted` into `body` in place of `accessor` and give the
/// result the merged trivia of `guard`.
pub fn merge_trivia(
    arena: &mut SyntaxArena,
    guard: &Guard,
    body: NodeIndex,
    accessor: NodeIndex,
    converted: NodeIndex,
) -> Option<NodeIndex> {
    let guard_leading = arena.leading_trivia(guard.if_statement).to_vec();
    let indent = indentation(&guard_leading).to_string();

    let mut tail = header_comments(arena, guard);
    tail.extend(arena.leading_trivia(accessor).iter().cloned());
    let leading = format_leading(&guard_leading, &tail);

    let mut trailing: Vec<Trivia> = arena.trailing_trivia(body).to_vec();
    if let Some(Node::Block { close, .. }) = guard.block.and_then(|block| arena.get(block)) {
        trailing.extend(close.leading.iter().cloned());
        trailing.extend(close.trailing.iter().cloned());
    }
    let mut trailing = format_trailing(&trailing, &indent);
    // Whitespace that ended the guard separates it from the next token on
    // the same line
    if let Some(separator) = arena
        .trailing_trivia(guard.if_statement)
        .last()
        .filter(|piece| piece.is_whitespace())
        && !trailing.last().is_some_and(Trivia::is_whitespace)
    {
        trailing.push(separator.clone());
    }

    let spliced = arena.with_leading_trivia(converted, TriviaList::new());
    let statement = arena.replace_node(body, accessor, spliced)?;
    let statement = arena.with_leading_trivia(statement, leading);
    Some(arena.with_trailing_trivia(statement, trailing))
}

/// Comments and blank lines on the tokens that disappear with the guard
/// header, in source order. Each comment is followed by the separator it
/// needs: a line break after `//` comments, a space after block comments.
/// Other whitespace and line breaks are dropped with the header.
fn header_comments(arena: &SyntaxArena, guard: &Guard) -> Vec<Trivia> {
    let Some(Node::If {
        if_keyword,
        open_paren,
        condition,
        close_paren,
        ..
    }) = arena.get(guard.if_statement)
    else {
        return Vec::new();
    };

    let mut tokens: Vec<&Token> = vec![open_paren];
    tokens.extend(arena.tokens(*condition));
    tokens.push(close_paren);
    if let Some(Node::Block { open, .. }) = guard.block.and_then(|block| arena.get(block)) {
        tokens.push(open);
    }

    // The `if` keyword's leading trivia is the guard's own leading trivia.
    // `None` marks a removed token.
    let mut pieces: Vec<Option<&Trivia>> = if_keyword.trailing.iter().map(Some).collect();
    for token in tokens {
        pieces.extend(token.leading.iter().map(Some));
        pieces.push(None);
        pieces.extend(token.trailing.iter().map(Some));
    }

    let mut out = Vec::new();
    let mut line_is_empty = false;
    for (i, piece) in pieces.iter().enumerate() {
        let Some(piece) = piece else {
            line_is_empty = false;
            continue;
        };
        match piece.kind {
            TriviaKind::SingleLineComment => {
                // Keep the comment's own line break so CRLF files stay CRLF
                let end_of_line = pieces
                    .get(i + 1)
                    .copied()
                    .flatten()
                    .filter(|next| next.is_end_of_line())
                    .map_or_else(Trivia::end_of_line, |next| next.clone());
                out.push((*piece).clone());
                out.push(end_of_line);
                line_is_empty = false;
            }
            TriviaKind::MultiLineComment => {
                out.push((*piece).clone());
                out.push(Trivia::whitespace(" "));
                line_is_empty = false;
            }
            TriviaKind::EndOfLine => {
                if line_is_empty {
                    out.push((*piece).clone());
                }
                line_is_empty = true;
            }
            TriviaKind::Whitespace => {}
        }
    }
    out
}

/// Append `tail` to the guard's leading trivia.
///
/// Whitespace at the start of `tail` or at the start of a line is replaced
/// by the guard's indentation; whitespace inside a line collapses to one
/// space.
pub fn format_leading(guard: &[Trivia], tail: &[Trivia]) -> TriviaList {
    let indent = indentation(guard);
    let mut out: TriviaList = guard.iter().cloned().collect();
    let mut at_line_start = true;

    for (i, piece) in tail.iter().enumerate() {
        let rest = &tail[i + 1..];
        match piece.kind {
            TriviaKind::Whitespace => {
                let dangling = rest
                    .first()
                    .is_some_and(|next| next.is_whitespace() || next.is_end_of_line());
                if !at_line_start && !dangling {
                    out.push(Trivia::whitespace(" "));
                }
            }
            TriviaKind::EndOfLine => {
                if out.last().is_some_and(Trivia::is_whitespace) {
                    out.pop();
                }
                out.push(piece.clone());
                at_line_start = true;
                let next_line_is_blank = rest
                    .iter()
                    .find(|next| !next.is_whitespace())
                    .is_some_and(Trivia::is_end_of_line);
                if !next_line_is_blank && !indent.is_empty() {
                    out.push(Trivia::whitespace(indent));
                }
            }
            TriviaKind::SingleLineComment | TriviaKind::MultiLineComment => {
                out.push(piece.clone());
                at_line_start = false;
            }
        }
    }
    out
}

/// Tidy the merged trailing trivia.
///
/// Whitespace before a line break, before other whitespace or at the very
/// end is dropped; a comment that starts a line is indented like the guard.
pub fn format_trailing(trailing: &[Trivia], indent: &str) -> TriviaList {
    let mut out = TriviaList::new();
    let mut at_line_start = false;

    for (i, piece) in trailing.iter().enumerate() {
        match piece.kind {
            TriviaKind::Whitespace => {
                let dangling = trailing
                    .get(i + 1)
                    .is_none_or(|next| next.is_whitespace() || next.is_end_of_line());
                if dangling {
                    continue;
                }
                if at_line_start {
                    if !indent.is_empty() {
                        out.push(Trivia::whitespace(indent));
                    }
                } else {
                    out.push(piece.clone());
                }
            }
            TriviaKind::EndOfLine => {
                out.push(piece.clone());
                at_line_start = true;
            }
            TriviaKind::SingleLineComment | TriviaKind::MultiLineComment => {
                if at_line_start
                    && out.last().is_some_and(Trivia::is_end_of_line)
                    && !indent.is_empty()
                {
                    out.push(Trivia::whitespace(indent));
                }
                out.push(piece.clone());
                at_line_start = false;
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "tests/trivia_merge_tests.rs"]
mod tests;
