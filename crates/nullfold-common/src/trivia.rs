//! Trivia Preservation
//!
//! Comments and whitespace are not part of the syntax tree proper. The
//! scanner attaches them to tokens as *trivia* so that printing a tree
//! reproduces the source byte for byte, and so that rewrites can move
//! comments around instead of losing them.
//!
//! Attachment rule:
//! - trailing trivia of a token runs to the end of its line, including the
//!   first line break;
//! - leading trivia of a token is everything after the previous token's
//!   trailing trivia.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// The kind of a single trivia piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriviaKind {
    /// Spaces and tabs.
    Whitespace,
    /// `\n`, `\r\n` or a lone `\r`.
    EndOfLine,
    /// `// ...` up to (not including) the line break.
    SingleLineComment,
    /// `/* ... */`, possibly spanning lines.
    MultiLineComment,
}

/// One piece of trivia and its exact source text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Trivia {
    pub kind: TriviaKind,
    pub text: String,
}

/// Ordered trivia attached to one side of a token.
pub type TriviaList = SmallVec<[Trivia; 2]>;

impl Trivia {
    pub fn new(kind: TriviaKind, text: impl Into<String>) -> Self {
        Trivia {
            kind,
            text: text.into(),
        }
    }

    pub fn whitespace(text: impl Into<String>) -> Self {
        Self::new(TriviaKind::Whitespace, text)
    }

    pub fn end_of_line() -> Self {
        Self::new(TriviaKind::EndOfLine, "\n")
    }

    #[inline]
    pub fn is_comment(&self) -> bool {
        matches!(
            self.kind,
            TriviaKind::SingleLineComment | TriviaKind::MultiLineComment
        )
    }

    #[inline]
    pub fn is_whitespace(&self) -> bool {
        self.kind == TriviaKind::Whitespace
    }

    #[inline]
    pub fn is_end_of_line(&self) -> bool {
        self.kind == TriviaKind::EndOfLine
    }
}

/// Concatenate the source text of a trivia list.
pub fn trivia_text(list: &[Trivia]) -> String {
    list.iter().map(|t| t.text.as_str()).collect()
}

/// Total byte length of a trivia list.
pub fn trivia_len(list: &[Trivia]) -> usize {
    list.iter().map(|t| t.text.len()).sum()
}

/// The indentation a token starts with, given its leading trivia.
///
/// This is the final whitespace piece when it begins a line; a token
/// that does not start a line has no indentation of its own.
pub fn indentation(leading: &[Trivia]) -> &str {
    match leading {
        [] => "",
        [only] if only.is_whitespace() => &only.text,
        [.., prev, last] if last.is_whitespace() && prev.is_end_of_line() => &last.text,
        _ => "",
    }
}

/// Scan leading trivia starting at `pos`.
///
/// Consumes whitespace, line breaks and comments until the first byte
/// that is not trivia. Returns the pieces and the position after them.
pub fn scan_leading_trivia(source: &str, pos: usize) -> (TriviaList, usize) {
    scan_trivia(source, pos, false)
}

/// Scan trailing trivia starting at `pos`.
///
/// Stops after the first line break, or before the first byte that is
/// not trivia.
pub fn scan_trailing_trivia(source: &str, pos: usize) -> (TriviaList, usize) {
    scan_trivia(source, pos, true)
}

fn scan_trivia(source: &str, start: usize, stop_after_new_line: bool) -> (TriviaList, usize) {
    let mut pieces = TriviaList::new();
    let bytes = source.as_bytes();
    let len = bytes.len();
    let mut pos = start;

    while pos < len {
        let ch = bytes[pos];

        if ch == b' ' || ch == b'\t' {
            let begin = pos;
            while pos < len && (bytes[pos] == b' ' || bytes[pos] == b'\t') {
                pos += 1;
            }
            pieces.push(Trivia::whitespace(&source[begin..pos]));
            continue;
        }

        if ch == b'\r' || ch == b'\n' {
            let begin = pos;
            pos += 1;
            if ch == b'\r' && pos < len && bytes[pos] == b'\n' {
                pos += 1;
            }
            pieces.push(Trivia::new(TriviaKind::EndOfLine, &source[begin..pos]));
            if stop_after_new_line {
                break;
            }
            continue;
        }

        if ch == b'/' && pos + 1 < len {
            let next = bytes[pos + 1];

            if next == b'/' {
                let begin = pos;
                pos += 2;
                // Scan to end of line; the line break becomes its own piece
                match memchr::memchr2(b'\n', b'\r', &bytes[pos..]) {
                    Some(offset) => pos += offset,
                    None => pos = len,
                }
                pieces.push(Trivia::new(
                    TriviaKind::SingleLineComment,
                    &source[begin..pos],
                ));
                continue;
            } else if next == b'*' {
                let begin = pos;
                pos += 2;

                let mut closed = false;
                while pos + 1 < len {
                    if bytes[pos] == b'*' && bytes[pos + 1] == b'/' {
                        pos += 2;
                        closed = true;
                        break;
                    }
                    pos += 1;
                }

                if !closed {
                    pos = len; // Unclosed comment - runs to end of file
                }

                pieces.push(Trivia::new(
                    TriviaKind::MultiLineComment,
                    &source[begin..pos],
                ));
                continue;
            }
        }

        break;
    }

    (pieces, pos)
}

#[cfg(test)]
#[path = "tests/trivia_tests.rs"]
mod tests;
