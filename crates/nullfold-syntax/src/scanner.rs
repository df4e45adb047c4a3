//! Scanner for the C# script subset.
//!
//! The scanner is lossless: every byte of the input ends up either in a
//! token's text or in one of its trivia lists, so concatenating all tokens
//! with their trivia reproduces the source exactly.

use nullfold_common::diagnostics::{Diagnostic, diagnostic_messages};
use nullfold_common::trivia::{TriviaList, scan_leading_trivia, scan_trailing_trivia};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum SyntaxKind {
    Unknown,
    EndOfFileToken,

    // Literals and names
    Identifier,
    NumericLiteral,
    StringLiteral,
    CharacterLiteral,

    // Keywords
    IfKeyword,
    ElseKeyword,
    ReturnKeyword,
    NullKeyword,
    TrueKeyword,
    FalseKeyword,
    ThisKeyword,

    // Punctuation
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    OpenBraceToken,
    CloseBraceToken,
    DotToken,
    CommaToken,
    SemicolonToken,
    QuestionToken,
    QuestionQuestionToken,
    QuestionQuestionEqualsToken,

    // Operators
    EqualsToken,
    EqualsEqualsToken,
    ExclamationToken,
    ExclamationEqualsToken,
    LessThanToken,
    LessThanEqualsToken,
    GreaterThanToken,
    GreaterThanEqualsToken,
    PlusToken,
    PlusEqualsToken,
    MinusToken,
    MinusEqualsToken,
    AsteriskToken,
    SlashToken,
    PercentToken,
    AmpersandAmpersandToken,
    BarBarToken,
}

impl SyntaxKind {
    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        Some(match text {
            "if" => SyntaxKind::IfKeyword,
            "else" => SyntaxKind::ElseKeyword,
            "return" => SyntaxKind::ReturnKeyword,
            "null" => SyntaxKind::NullKeyword,
            "true" => SyntaxKind::TrueKeyword,
            "false" => SyntaxKind::FalseKeyword,
            "this" => SyntaxKind::ThisKeyword,
            _ => return None,
        })
    }

    /// Fixed text of punctuation and keyword tokens.
    pub fn text(self) -> &'static str {
        match self {
            SyntaxKind::IfKeyword => "if",
            SyntaxKind::ElseKeyword => "else",
            SyntaxKind::ReturnKeyword => "return",
            SyntaxKind::NullKeyword => "null",
            SyntaxKind::TrueKeyword => "true",
            SyntaxKind::FalseKeyword => "false",
            SyntaxKind::ThisKeyword => "this",
            SyntaxKind::OpenParenToken => "(",
            SyntaxKind::CloseParenToken => ")",
            SyntaxKind::OpenBracketToken => "[",
            SyntaxKind::CloseBracketToken => "]",
            SyntaxKind::OpenBraceToken => "{",
            SyntaxKind::CloseBraceToken => "}",
            SyntaxKind::DotToken => ".",
            SyntaxKind::CommaToken => ",",
            SyntaxKind::SemicolonToken => ";",
            SyntaxKind::QuestionToken => "?",
            SyntaxKind::QuestionQuestionToken => "??",
            SyntaxKind::QuestionQuestionEqualsToken => "??=",
            SyntaxKind::EqualsToken => "=",
            SyntaxKind::EqualsEqualsToken => "==",
            SyntaxKind::ExclamationToken => "!",
            SyntaxKind::ExclamationEqualsToken => "!=",
            SyntaxKind::LessThanToken => "<",
            SyntaxKind::LessThanEqualsToken => "<=",
            SyntaxKind::GreaterThanToken => ">",
            SyntaxKind::GreaterThanEqualsToken => ">=",
            SyntaxKind::PlusToken => "+",
            SyntaxKind::PlusEqualsToken => "+=",
            SyntaxKind::MinusToken => "-",
            SyntaxKind::MinusEqualsToken => "-=",
            SyntaxKind::AsteriskToken => "*",
            SyntaxKind::SlashToken => "/",
            SyntaxKind::PercentToken => "%",
            SyntaxKind::AmpersandAmpersandToken => "&&",
            SyntaxKind::BarBarToken => "||",
            SyntaxKind::Unknown
            | SyntaxKind::EndOfFileToken
            | SyntaxKind::Identifier
            | SyntaxKind::NumericLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::CharacterLiteral => "",
        }
    }

    pub fn is_literal(self) -> bool {
        matches!(
            self,
            SyntaxKind::NumericLiteral
                | SyntaxKind::StringLiteral
                | SyntaxKind::CharacterLiteral
                | SyntaxKind::TrueKeyword
                | SyntaxKind::FalseKeyword
                | SyntaxKind::ThisKeyword
        )
    }
}

/// A token together with the trivia on both sides of it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: SyntaxKind,
    pub text: String,
    /// Byte offset of `text` in the source, or [`Token::NO_POS`].
    pub pos: u32,
    pub leading: TriviaList,
    pub trailing: TriviaList,
}

impl Token {
    /// Position of tokens that were synthesized by a rewrite.
    pub const NO_POS: u32 = u32::MAX;

    /// Create a token that does not come from source text.
    pub fn synthetic(kind: SyntaxKind, text: impl Into<String>) -> Token {
        Token {
            kind,
            text: text.into(),
            pos: Token::NO_POS,
            leading: TriviaList::new(),
            trailing: TriviaList::new(),
        }
    }

    /// Create a synthesized punctuation or keyword token.
    pub fn punct(kind: SyntaxKind) -> Token {
        Token::synthetic(kind, kind.text())
    }

    #[inline]
    pub fn is_synthetic(&self) -> bool {
        self.pos == Token::NO_POS
    }

    /// A zero-width token inserted by error recovery.
    #[inline]
    pub fn is_missing(&self) -> bool {
        self.text.is_empty() && self.kind != SyntaxKind::EndOfFileToken
    }

    #[inline]
    pub fn end(&self) -> u32 {
        self.pos + self.text.len() as u32
    }

    pub fn without_trivia(&self) -> Token {
        Token {
            leading: TriviaList::new(),
            trailing: TriviaList::new(),
            ..self.clone()
        }
    }
}

/// Scanner state over one source text.
pub struct ScannerState<'a> {
    file_name: &'a str,
    source: &'a str,
    pos: usize,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> ScannerState<'a> {
    pub fn new(file_name: &'a str, source: &'a str) -> Self {
        ScannerState {
            file_name,
            source,
            pos: 0,
            diagnostics: Vec::new(),
        }
    }

    /// Scan the whole source. The last token is always `EndOfFileToken`,
    /// whose leading trivia holds whatever trivia ends the file.
    pub fn scan_all(mut self) -> (Vec<Token>, Vec<Diagnostic>) {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = token.kind == SyntaxKind::EndOfFileToken;
            tokens.push(token);
            if done {
                break;
            }
        }
        (tokens, self.diagnostics)
    }

    pub fn next_token(&mut self) -> Token {
        let (leading, start) = scan_leading_trivia(self.source, self.pos);
        self.pos = start;

        if start >= self.source.len() {
            return Token {
                kind: SyntaxKind::EndOfFileToken,
                text: String::new(),
                pos: start as u32,
                leading,
                trailing: TriviaList::new(),
            };
        }

        let kind = self.scan_token_kind();
        let text = self.source[start..self.pos].to_string();
        let (trailing, end) = scan_trailing_trivia(self.source, self.pos);
        self.pos = end;

        Token {
            kind,
            text,
            pos: start as u32,
            leading,
            trailing,
        }
    }

    fn peek_at(&self, offset: usize) -> u8 {
        self.source
            .as_bytes()
            .get(self.pos + offset)
            .copied()
            .unwrap_or(0)
    }

    fn scan_token_kind(&mut self) -> SyntaxKind {
        let ch = self.peek_at(0);

        let starts_identifier = ch == b'_'
            || ch == b'@'
            || ch.is_ascii_alphabetic()
            || (ch >= 0x80
                && self.source[self.pos..]
                    .chars()
                    .next()
                    .is_some_and(char::is_alphabetic));
        if starts_identifier {
            return self.scan_identifier();
        }
        if ch.is_ascii_digit() {
            return self.scan_number();
        }

        let (kind, width) = match (ch, self.peek_at(1), self.peek_at(2)) {
            (b'"', _, _) => return self.scan_quoted(b'"', SyntaxKind::StringLiteral),
            (b'\'', _, _) => return self.scan_quoted(b'\'', SyntaxKind::CharacterLiteral),
            (b'?', b'?', b'=') => (SyntaxKind::QuestionQuestionEqualsToken, 3),
            (b'?', b'?', _) => (SyntaxKind::QuestionQuestionToken, 2),
            (b'?', _, _) => (SyntaxKind::QuestionToken, 1),
            (b'=', b'=', _) => (SyntaxKind::EqualsEqualsToken, 2),
            (b'=', _, _) => (SyntaxKind::EqualsToken, 1),
            (b'!', b'=', _) => (SyntaxKind::ExclamationEqualsToken, 2),
            (b'!', _, _) => (SyntaxKind::ExclamationToken, 1),
            (b'<', b'=', _) => (SyntaxKind::LessThanEqualsToken, 2),
            (b'<', _, _) => (SyntaxKind::LessThanToken, 1),
            (b'>', b'=', _) => (SyntaxKind::GreaterThanEqualsToken, 2),
            (b'>', _, _) => (SyntaxKind::GreaterThanToken, 1),
            (b'+', b'=', _) => (SyntaxKind::PlusEqualsToken, 2),
            (b'+', _, _) => (SyntaxKind::PlusToken, 1),
            (b'-', b'=', _) => (SyntaxKind::MinusEqualsToken, 2),
            (b'-', _, _) => (SyntaxKind::MinusToken, 1),
            (b'&', b'&', _) => (SyntaxKind::AmpersandAmpersandToken, 2),
            (b'|', b'|', _) => (SyntaxKind::BarBarToken, 2),
            (b'*', _, _) => (SyntaxKind::AsteriskToken, 1),
            (b'/', _, _) => (SyntaxKind::SlashToken, 1),
            (b'%', _, _) => (SyntaxKind::PercentToken, 1),
            (b'(', _, _) => (SyntaxKind::OpenParenToken, 1),
            (b')', _, _) => (SyntaxKind::CloseParenToken, 1),
            (b'[', _, _) => (SyntaxKind::OpenBracketToken, 1),
            (b']', _, _) => (SyntaxKind::CloseBracketToken, 1),
            (b'{', _, _) => (SyntaxKind::OpenBraceToken, 1),
            (b'}', _, _) => (SyntaxKind::CloseBraceToken, 1),
            (b'.', _, _) => (SyntaxKind::DotToken, 1),
            (b',', _, _) => (SyntaxKind::CommaToken, 1),
            (b';', _, _) => (SyntaxKind::SemicolonToken, 1),
            _ => {
                let width = self.source[self.pos..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
                let text = &self.source[self.pos..self.pos + width];
                self.diagnostics.push(Diagnostic::from_message(
                    self.file_name,
                    self.pos as u32,
                    width as u32,
                    &diagnostic_messages::UNEXPECTED_CHARACTER,
                    &[text],
                ));
                (SyntaxKind::Unknown, width)
            }
        };
        self.pos += width;
        kind
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        let start = self.pos;
        // Verbatim identifiers (@class) are never keywords
        let verbatim = self.peek_at(0) == b'@';
        if verbatim {
            self.pos += 1;
        }
        for ch in self.source[self.pos..].chars() {
            if ch == '_' || ch.is_alphanumeric() {
                self.pos += ch.len_utf8();
            } else {
                break;
            }
        }
        if verbatim {
            return SyntaxKind::Identifier;
        }
        SyntaxKind::from_keyword(&self.source[start..self.pos]).unwrap_or(SyntaxKind::Identifier)
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let bytes = self.source.as_bytes();
        while self.pos < bytes.len() {
            let ch = bytes[self.pos];
            let continues_fraction = ch == b'.'
                && bytes
                    .get(self.pos + 1)
                    .is_some_and(|next| next.is_ascii_digit());
            if ch.is_ascii_alphanumeric() || ch == b'_' || continues_fraction {
                self.pos += 1;
            } else {
                break;
            }
        }
        SyntaxKind::NumericLiteral
    }

    fn scan_quoted(&mut self, quote: u8, kind: SyntaxKind) -> SyntaxKind {
        let start = self.pos;
        let bytes = self.source.as_bytes();
        self.pos += 1;
        while self.pos < bytes.len() {
            match bytes[self.pos] {
                b'\\' => self.pos += 2,
                b'\n' | b'\r' => break,
                ch if ch == quote => {
                    self.pos += 1;
                    return kind;
                }
                _ => self.pos += 1,
            }
        }
        self.pos = self.pos.min(bytes.len());
        self.diagnostics.push(Diagnostic::from_message(
            self.file_name,
            start as u32,
            (self.pos - start) as u32,
            &diagnostic_messages::UNTERMINATED_LITERAL,
            &[],
        ));
        kind
    }
}

#[cfg(test)]
#[path = "tests/scanner_tests.rs"]
mod tests;
