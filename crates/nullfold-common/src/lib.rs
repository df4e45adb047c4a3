//! Common types and utilities for the nullfold workspace.
//!
//! This crate provides foundational types used across all nullfold crates:
//! - Trivia (`Trivia`, `TriviaKind`, `TriviaList`) and trivia scanning
//! - Diagnostics (`Diagnostic`, `DiagnosticCategory`, message codes)
//! - Position/Range types for line/column source locations

// Comment and whitespace pieces attached to tokens
pub mod trivia;
pub use trivia::{Trivia, TriviaKind, TriviaList};

// Diagnostics shared by the parser, the analyzer and the CLI
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticMessage};

// Position/Range types for line/column source locations
pub mod position;
pub use position::{LineMap, Position, Range};
