//! Lossless printer.
//!
//! Every token is written as its leading trivia, its text and its trailing
//! trivia, so printing an unmodified parse reproduces the source exactly.

use crate::arena::SyntaxArena;
use crate::node::{Element, NodeIndex};
use crate::scanner::Token;
use nullfold_common::Trivia;

pub struct Printer<'a> {
    arena: &'a SyntaxArena,
    out: String,
}

impl<'a> Printer<'a> {
    pub fn new(arena: &'a SyntaxArena) -> Self {
        Printer {
            arena,
            out: String::new(),
        }
    }

    /// Print `node` including all of its trivia.
    pub fn print(arena: &SyntaxArena, node: NodeIndex) -> String {
        let mut printer = Printer::new(arena);
        printer.emit_node(node);
        printer.finish()
    }

    /// Print `node` without the leading trivia of its first token and the
    /// trailing trivia of its last token.
    pub fn print_trimmed(arena: &SyntaxArena, node: NodeIndex) -> String {
        let tokens = arena.tokens(node);
        let last = tokens.len().saturating_sub(1);
        let mut printer = Printer::new(arena);
        for (i, token) in tokens.into_iter().enumerate() {
            if i != 0 {
                printer.emit_trivia_text(&token.leading);
            }
            printer.out.push_str(&token.text);
            if i != last {
                printer.emit_trivia_text(&token.trailing);
            }
        }
        printer.finish()
    }

    pub fn finish(self) -> String {
        self.out
    }

    pub fn emit_node(&mut self, node: NodeIndex) {
        let arena = self.arena;
        let mut stack = vec![Element::Node(node)];
        while let Some(element) = stack.pop() {
            match element {
                Element::Token(token) => self.emit_token(token),
                Element::Node(child) => {
                    if let Some(n) = arena.get(child) {
                        stack.extend(n.elements().into_iter().rev());
                    }
                }
            }
        }
    }

    fn emit_token(&mut self, token: &Token) {
        self.emit_trivia_text(&token.leading);
        self.out.push_str(&token.text);
        self.emit_trivia_text(&token.trailing);
    }

    fn emit_trivia_text(&mut self, trivia: &[Trivia]) {
        for piece in trivia {
            self.out.push_str(&piece.text);
        }
    }
}
