//! Recursive-descent parser for C# script statements.
//!
//! The parser works over the full token list produced by the scanner, so
//! trivia is already attached to tokens and ends up in the tree unchanged.
//! Errors become diagnostics; missing tokens are synthesized with empty
//! text at the current position so the tree always has the expected shape.

use crate::arena::SyntaxArena;
use crate::node::{ArgumentList, ElseClause, Initializer, Node, NodeIndex};
use crate::scanner::{ScannerState, SyntaxKind, Token};
use nullfold_common::diagnostics::{Diagnostic, DiagnosticMessage, diagnostic_messages};
use nullfold_common::trivia::TriviaList;
use tracing::debug;

/// Nesting deeper than this is reported instead of recursing further.
const MAX_RECURSION_DEPTH: u32 = 100;

/// The result of parsing one source file.
#[derive(Debug)]
pub struct ParseResult {
    pub arena: SyntaxArena,
    pub root: NodeIndex,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseResult {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Parse `source` into a `SourceFile` tree.
pub fn parse_source_file(file_name: &str, source: &str) -> ParseResult {
    let (tokens, diagnostics) = ScannerState::new(file_name, source).scan_all();
    let mut parser = ParserState::new(file_name, tokens, diagnostics);
    let root = parser.parse_source_file();
    debug!(
        file = file_name,
        nodes = parser.arena.len(),
        errors = parser.diagnostics.len(),
        "parsed"
    );
    ParseResult {
        arena: parser.arena,
        root,
        diagnostics: parser.diagnostics,
    }
}

pub struct ParserState<'a> {
    file_name: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    depth: u32,
    pub arena: SyntaxArena,
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> ParserState<'a> {
    pub fn new(file_name: &'a str, tokens: Vec<Token>, diagnostics: Vec<Diagnostic>) -> Self {
        let capacity = tokens.len();
        ParserState {
            file_name,
            tokens,
            pos: 0,
            depth: 0,
            arena: SyntaxArena::with_capacity(capacity),
            diagnostics,
        }
    }

    // =========================================================================
    // Token access
    // =========================================================================

    #[inline]
    fn token(&self) -> SyntaxKind {
        self.peek(0)
    }

    #[inline]
    fn peek(&self, offset: usize) -> SyntaxKind {
        self.tokens
            .get(self.pos + offset)
            .map_or(SyntaxKind::EndOfFileToken, |t| t.kind)
    }

    #[inline]
    fn is_token(&self, kind: SyntaxKind) -> bool {
        self.token() == kind
    }

    fn token_pos(&self) -> u32 {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map_or(0, |t| t.pos)
    }

    fn token_text(&self) -> &str {
        self.tokens.get(self.pos).map_or("", |t| t.text.as_str())
    }

    /// Take the current token. The end-of-file token is never consumed.
    fn next_token(&mut self) -> Token {
        if self.is_token(SyntaxKind::EndOfFileToken) {
            return self.missing_token(SyntaxKind::Unknown);
        }
        let placeholder = Token::synthetic(SyntaxKind::Unknown, "");
        let token = std::mem::replace(&mut self.tokens[self.pos], placeholder);
        self.pos += 1;
        token
    }

    fn missing_token(&self, kind: SyntaxKind) -> Token {
        Token {
            kind,
            text: String::new(),
            pos: self.token_pos(),
            leading: TriviaList::new(),
            trailing: TriviaList::new(),
        }
    }

    fn parse_expected(&mut self, kind: SyntaxKind) -> Token {
        if self.is_token(kind) {
            return self.next_token();
        }
        self.error_at_current_token(&diagnostic_messages::TOKEN_EXPECTED, &[kind.text()]);
        self.missing_token(kind)
    }

    fn parse_optional(&mut self, kind: SyntaxKind) -> Option<Token> {
        self.is_token(kind).then(|| self.next_token())
    }

    fn error_at_current_token(&mut self, message: &DiagnosticMessage, args: &[&str]) {
        let start = self.token_pos();
        let length = self.token_text().len() as u32;
        // One error per position keeps recovery from cascading
        if self.diagnostics.last().is_some_and(|d| d.start == start) {
            return;
        }
        self.diagnostics.push(Diagnostic::from_message(
            self.file_name,
            start,
            length,
            message,
            args,
        ));
    }

    fn enter_recursion(&mut self) -> bool {
        if self.depth >= MAX_RECURSION_DEPTH {
            self.error_at_current_token(&diagnostic_messages::EXPRESSION_EXPECTED, &[]);
            return false;
        }
        self.depth += 1;
        true
    }

    fn exit_recursion(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    // =========================================================================
    // Statements
    // =========================================================================

    pub fn parse_source_file(&mut self) -> NodeIndex {
        let mut statements = Vec::new();
        while !self.is_token(SyntaxKind::EndOfFileToken) {
            statements.push(self.parse_statement());
        }
        let end_of_file = self
            .tokens
            .pop()
            .unwrap_or_else(|| Token::synthetic(SyntaxKind::EndOfFileToken, ""));
        self.arena.add(Node::SourceFile {
            statements,
            end_of_file,
        })
    }

    pub fn parse_statement(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::OpenBraceToken => self.parse_block(),
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::ReturnKeyword => self.parse_return_statement(),
            SyntaxKind::SemicolonToken => {
                let semicolon = self.next_token();
                self.arena.add(Node::Empty { semicolon })
            }
            SyntaxKind::Identifier if self.is_start_of_local_declaration() => {
                self.parse_local_declaration()
            }
            kind if self.is_start_of_expression(kind) => self.parse_expression_statement(),
            _ => self.parse_skipped_tokens(),
        }
    }

    /// `T x`, `T x = ...` or `T? x`.
    fn is_start_of_local_declaration(&self) -> bool {
        match self.peek(1) {
            SyntaxKind::Identifier => true,
            SyntaxKind::QuestionToken => self.peek(2) == SyntaxKind::Identifier,
            _ => false,
        }
    }

    fn is_start_of_expression(&self, kind: SyntaxKind) -> bool {
        kind == SyntaxKind::Identifier
            || kind == SyntaxKind::NullKeyword
            || kind == SyntaxKind::OpenParenToken
            || kind == SyntaxKind::ExclamationToken
            || kind == SyntaxKind::MinusToken
            || kind == SyntaxKind::PlusToken
            || kind.is_literal()
    }

    fn parse_skipped_tokens(&mut self) -> NodeIndex {
        self.error_at_current_token(&diagnostic_messages::STATEMENT_EXPECTED, &[]);
        let mut tokens = vec![self.next_token()];
        // Skip to the end of the broken statement
        while !matches!(
            self.token(),
            SyntaxKind::EndOfFileToken
                | SyntaxKind::IfKeyword
                | SyntaxKind::ReturnKeyword
                | SyntaxKind::OpenBraceToken
                | SyntaxKind::CloseBraceToken
        ) {
            let done = self.is_token(SyntaxKind::SemicolonToken);
            tokens.push(self.next_token());
            if done {
                break;
            }
        }
        self.arena.add(Node::Skipped { tokens })
    }

    fn parse_block(&mut self) -> NodeIndex {
        let open = self.parse_expected(SyntaxKind::OpenBraceToken);
        let mut statements = Vec::new();
        if self.enter_recursion() {
            while !matches!(
                self.token(),
                SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
            ) {
                statements.push(self.parse_statement());
            }
            self.exit_recursion();
        }
        let close = self.parse_expected(SyntaxKind::CloseBraceToken);
        self.arena.add(Node::Block {
            open,
            statements,
            close,
        })
    }

    fn parse_embedded_statement(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            let semicolon = self.missing_token(SyntaxKind::SemicolonToken);
            return self.arena.add(Node::Empty { semicolon });
        }
        let statement = self.parse_statement();
        self.exit_recursion();
        statement
    }

    fn parse_if_statement(&mut self) -> NodeIndex {
        let if_keyword = self.parse_expected(SyntaxKind::IfKeyword);
        let open_paren = self.parse_expected(SyntaxKind::OpenParenToken);
        let condition = self.parse_expression();
        let close_paren = self.parse_expected(SyntaxKind::CloseParenToken);
        let then_branch = self.parse_embedded_statement();
        let else_clause = self
            .parse_optional(SyntaxKind::ElseKeyword)
            .map(|else_keyword| ElseClause {
                else_keyword,
                statement: self.parse_embedded_statement(),
            });
        self.arena.add(Node::If {
            if_keyword,
            open_paren,
            condition,
            close_paren,
            then_branch,
            else_clause,
        })
    }

    fn parse_return_statement(&mut self) -> NodeIndex {
        let keyword = self.parse_expected(SyntaxKind::ReturnKeyword);
        let expression = if self.is_start_of_expression(self.token()) {
            Some(self.parse_expression())
        } else {
            None
        };
        let semicolon = self.parse_expected(SyntaxKind::SemicolonToken);
        self.arena.add(Node::Return {
            keyword,
            expression,
            semicolon,
        })
    }

    fn parse_local_declaration(&mut self) -> NodeIndex {
        let type_name = self.parse_expected(SyntaxKind::Identifier);
        let nullable_marker = self.parse_optional(SyntaxKind::QuestionToken);
        let name = self.parse_identifier_token();
        let initializer = self
            .parse_optional(SyntaxKind::EqualsToken)
            .map(|equals| Initializer {
                equals,
                value: self.parse_expression(),
            });
        let semicolon = self.parse_expected(SyntaxKind::SemicolonToken);
        self.arena.add(Node::LocalDeclaration {
            type_name,
            nullable_marker,
            name,
            initializer,
            semicolon,
        })
    }

    fn parse_expression_statement(&mut self) -> NodeIndex {
        let expression = self.parse_expression();
        let semicolon = self.parse_expected(SyntaxKind::SemicolonToken);
        self.arena.add(Node::ExpressionStatement {
            expression,
            semicolon,
        })
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    /// Parse an expression, including assignments.
    pub fn parse_expression(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            let token = self.missing_token(SyntaxKind::Identifier);
            return self.arena.add(Node::Identifier(token));
        }
        let left = self.parse_binary_expression(0);
        let result = if is_assignment_operator(self.token()) {
            let operator = self.next_token();
            // Assignment is right-associative
            let right = self.parse_expression();
            self.arena.add(Node::Binary {
                left,
                operator,
                right,
            })
        } else {
            left
        };
        self.exit_recursion();
        result
    }

    fn parse_binary_expression(&mut self, min_precedence: u8) -> NodeIndex {
        let mut left = self.parse_unary_expression();
        loop {
            let op = self.token();
            let precedence = binary_operator_precedence(op);
            if precedence == 0 || precedence <= min_precedence {
                break;
            }
            let operator = self.next_token();
            // `??` is right-associative
            let right = if op == SyntaxKind::QuestionQuestionToken {
                self.parse_binary_expression(precedence - 1)
            } else {
                self.parse_binary_expression(precedence)
            };
            left = self.arena.add(Node::Binary {
                left,
                operator,
                right,
            });
        }
        left
    }

    fn parse_unary_expression(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::ExclamationToken | SyntaxKind::MinusToken | SyntaxKind::PlusToken => {
                let operator = self.next_token();
                if !self.enter_recursion() {
                    let token = self.missing_token(SyntaxKind::Identifier);
                    let operand = self.arena.add(Node::Identifier(token));
                    return self.arena.add(Node::Prefix { operator, operand });
                }
                let operand = self.parse_unary_expression();
                self.exit_recursion();
                self.arena.add(Node::Prefix { operator, operand })
            }
            _ => self.parse_postfix_expression(),
        }
    }

    /// Member accesses, element accesses, invocations and `?.`/`?[` chains.
    fn parse_postfix_expression(&mut self) -> NodeIndex {
        let mut expression = self.parse_primary_expression();
        loop {
            match self.token() {
                SyntaxKind::DotToken => {
                    let dot = self.next_token();
                    let name = self.parse_identifier_token();
                    expression = self.arena.add(Node::MemberAccess {
                        target: expression,
                        dot,
                        name,
                    });
                }
                SyntaxKind::OpenBracketToken => {
                    let arguments = self.parse_argument_list(
                        SyntaxKind::OpenBracketToken,
                        SyntaxKind::CloseBracketToken,
                    );
                    expression = self.arena.add(Node::ElementAccess {
                        target: expression,
                        arguments,
                    });
                }
                SyntaxKind::OpenParenToken => {
                    let arguments = self
                        .parse_argument_list(SyntaxKind::OpenParenToken, SyntaxKind::CloseParenToken);
                    expression = self.invoke(expression, arguments);
                }
                SyntaxKind::QuestionToken
                    if matches!(
                        self.peek(1),
                        SyntaxKind::DotToken | SyntaxKind::OpenBracketToken
                    ) =>
                {
                    let question = self.next_token();
                    let binding = self.parse_binding();
                    expression = self.arena.add(Node::ConditionalAccess {
                        target: expression,
                        question,
                        binding,
                    });
                }
                _ => break,
            }
        }
        expression
    }

    /// `.name` or `[args]` after `?`.
    fn parse_binding(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::DotToken) {
            let dot = self.next_token();
            let name = self.parse_identifier_token();
            self.arena.add(Node::MemberBinding { dot, name })
        } else {
            let arguments =
                self.parse_argument_list(SyntaxKind::OpenBracketToken, SyntaxKind::CloseBracketToken);
            self.arena.add(Node::ElementBinding { arguments })
        }
    }

    /// Build an invocation. A call directly on `x?.m` invokes the binding,
    /// giving `x?.m(...)` the same shape as a converted member call.
    fn invoke(&mut self, target: NodeIndex, arguments: ArgumentList) -> NodeIndex {
        if let Some(Node::ConditionalAccess {
            target: receiver,
            question,
            binding,
        }) = self.arena.get(target)
            && matches!(self.arena.get(*binding), Some(Node::MemberBinding { .. }))
        {
            let (receiver, question, binding) = (*receiver, question.clone(), *binding);
            let call = self.arena.add(Node::Invocation {
                target: binding,
                arguments,
            });
            return self.arena.add(Node::ConditionalAccess {
                target: receiver,
                question,
                binding: call,
            });
        }
        self.arena.add(Node::Invocation { target, arguments })
    }

    fn parse_primary_expression(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::Identifier => {
                let token = self.next_token();
                self.arena.add(Node::Identifier(token))
            }
            SyntaxKind::NullKeyword => {
                let token = self.next_token();
                self.arena.add(Node::NullLiteral(token))
            }
            SyntaxKind::OpenParenToken => {
                let open = self.next_token();
                let expression = self.parse_expression();
                let close = self.parse_expected(SyntaxKind::CloseParenToken);
                self.arena.add(Node::Parenthesized {
                    open,
                    expression,
                    close,
                })
            }
            kind if kind.is_literal() => {
                let token = self.next_token();
                self.arena.add(Node::Literal(token))
            }
            _ => {
                self.error_at_current_token(&diagnostic_messages::EXPRESSION_EXPECTED, &[]);
                let token = self.missing_token(SyntaxKind::Identifier);
                self.arena.add(Node::Identifier(token))
            }
        }
    }

    fn parse_identifier_token(&mut self) -> Token {
        if self.is_token(SyntaxKind::Identifier) {
            return self.next_token();
        }
        self.error_at_current_token(&diagnostic_messages::IDENTIFIER_EXPECTED, &[]);
        self.missing_token(SyntaxKind::Identifier)
    }

    fn parse_argument_list(&mut self, open: SyntaxKind, close: SyntaxKind) -> ArgumentList {
        let open = self.parse_expected(open);
        let mut arguments = Vec::new();
        let mut separators = Vec::new();
        if !self.is_token(close) {
            loop {
                arguments.push(self.parse_expression());
                match self.parse_optional(SyntaxKind::CommaToken) {
                    Some(comma) => separators.push(comma),
                    None => break,
                }
                if self.is_token(close) {
                    break;
                }
            }
        }
        let close = self.parse_expected(close);
        ArgumentList {
            open,
            arguments,
            separators,
            close,
        }
    }
}

fn is_assignment_operator(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::EqualsToken
            | SyntaxKind::PlusEqualsToken
            | SyntaxKind::MinusEqualsToken
            | SyntaxKind::QuestionQuestionEqualsToken
    )
}

fn binary_operator_precedence(kind: SyntaxKind) -> u8 {
    match kind {
        SyntaxKind::QuestionQuestionToken => 1,
        SyntaxKind::BarBarToken => 2,
        SyntaxKind::AmpersandAmpersandToken => 3,
        SyntaxKind::EqualsEqualsToken | SyntaxKind::ExclamationEqualsToken => 4,
        SyntaxKind::LessThanToken
        | SyntaxKind::LessThanEqualsToken
        | SyntaxKind::GreaterThanToken
        | SyntaxKind::GreaterThanEqualsToken => 5,
        SyntaxKind::PlusToken | SyntaxKind::MinusToken => 6,
        SyntaxKind::AsteriskToken | SyntaxKind::SlashToken | SyntaxKind::PercentToken => 7,
        _ => 0,
    }
}

#[cfg(test)]
#[path = "tests/parser_state_tests.rs"]
mod tests;
