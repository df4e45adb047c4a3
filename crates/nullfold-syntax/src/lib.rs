//! Syntax tree for C# scripts.
//!
//! - [`scanner`]: lossless tokenizer; tokens own their trivia
//! - [`node`] / [`arena`]: immutable nodes addressed by [`NodeIndex`]
//! - [`parser`]: recursive-descent statement and expression parser
//! - [`printer`]: prints a tree back to text

pub mod arena;
pub mod node;
pub mod parser;
pub mod printer;
pub mod scanner;

pub use arena::SyntaxArena;
pub use node::{ArgumentList, ElseClause, Initializer, Node, NodeIndex, NodeKind};
pub use parser::{ParseResult, ParserState, parse_source_file};
pub use printer::Printer;
pub use scanner::{ScannerState, SyntaxKind, Token};
