//! Null-check suggestions for a whole file.
//!
//! Every `if` statement in the file is offered to the rewriter. Guards it
//! accepts are reported as a suggestion spanning the statement, preceded by
//! "unnecessary code" diagnostics for the tokens the fix removes so editors
//! can render them faded.

use nullfold_common::diagnostics::diagnostic_messages;
use nullfold_common::{Diagnostic, Trivia};
use nullfold_rewrite::{CancellationToken, Cancelled, NullCheckRewriter, Rewrite, RewriteError, TypeFacts};
use nullfold_syntax::{Node, NodeIndex, NodeKind, ParseResult, Printer, SyntaxArena, parse_source_file};
use tracing::debug;

/// File name suffixes of generated sources.
const GENERATED_SUFFIXES: &[&str] = &[".g.cs", ".g.csx", ".designer.cs", ".generated.cs"];

/// Markers that flag a file as generated when found in its leading comment.
const GENERATED_MARKERS: &[&str] = &["<auto-generated", "@generated"];

/// An accepted guard and its replacement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EligibleGuard {
    pub if_statement: NodeIndex,
    pub rewrite: Rewrite,
}

/// Reports null checks that can become null-conditional accesses.
pub struct NullCheckAnalyzer<'a, F: TypeFacts + ?Sized> {
    facts: &'a F,
    skip_generated: bool,
}

impl<'a, F: TypeFacts + ?Sized> NullCheckAnalyzer<'a, F> {
    pub fn new(facts: &'a F) -> Self {
        NullCheckAnalyzer {
            facts,
            skip_generated: true,
        }
    }

    /// Also analyze files that look generated.
    #[must_use]
    pub fn include_generated(mut self, include: bool) -> Self {
        self.skip_generated = !include;
        self
    }

    pub fn analyze(&self, file_name: &str, source: &str, cancel: &CancellationToken) -> Vec<Diagnostic> {
        let mut result = parse_source_file(file_name, source);
        self.analyze_parsed(file_name, &mut result, cancel)
    }

    /// Analyze an already parsed file. Replacement nodes built while
    /// checking guards are added to `result.arena`; `result.root` is left
    /// as it was.
    pub fn analyze_parsed(
        &self,
        file_name: &str,
        result: &mut ParseResult,
        cancel: &CancellationToken,
    ) -> Vec<Diagnostic> {
        if result.has_errors() {
            return result.diagnostics.clone();
        }
        if self.skip_generated && is_generated(file_name, &result.arena, result.root) {
            debug!(file = file_name, "skipping generated file");
            return Vec::new();
        }

        let Ok(guards) = self.eligible_guards(&mut result.arena, result.root, cancel) else {
            debug!(file = file_name, "analysis cancelled");
            return Vec::new();
        };

        let mut diagnostics = Vec::new();
        for guard in &guards {
            report_guard(&result.arena, file_name, guard, &mut diagnostics);
        }
        debug!(
            file = file_name,
            guards = guards.len(),
            diagnostics = diagnostics.len(),
            "analyzed"
        );
        diagnostics
    }

    /// Every `if` statement under `root` that the rewriter accepts, in
    /// source order.
    pub fn eligible_guards(
        &self,
        arena: &mut SyntaxArena,
        root: NodeIndex,
        cancel: &CancellationToken,
    ) -> Result<Vec<EligibleGuard>, Cancelled> {
        let if_statements: Vec<NodeIndex> = arena
            .descendants(root)
            .into_iter()
            .filter(|&idx| arena.kind(idx) == Some(NodeKind::If))
            .collect();

        let mut guards = Vec::new();
        let mut rewriter = NullCheckRewriter::new(arena);
        for if_statement in if_statements {
            cancel.check()?;
            match rewriter.rewrite(if_statement, self.facts, cancel) {
                Ok(rewrite) => guards.push(EligibleGuard {
                    if_statement,
                    rewrite,
                }),
                Err(RewriteError::Cancelled) => return Err(Cancelled),
                Err(RewriteError::Ineligible(_)) => {}
            }
        }
        Ok(guards)
    }
}

fn report_guard(
    arena: &SyntaxArena,
    file_name: &str,
    guard: &EligibleGuard,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let Some(Node::If {
        if_keyword,
        then_branch,
        ..
    }) = arena.get(guard.if_statement)
    else {
        return;
    };
    let Some((start, end)) = arena.span(guard.if_statement) else {
        return;
    };

    let faded = |start: u32, end: u32| {
        Diagnostic::from_message(
            file_name,
            start,
            end - start,
            &diagnostic_messages::USE_NULL_CONDITIONAL_FADED_TOKEN,
            &[],
        )
        .unnecessary()
    };

    if let Some((body_start, _)) = arena.span(*then_branch) {
        diagnostics.push(faded(if_keyword.pos, body_start));
    }
    if let Some(Node::Block { open, close, .. }) = arena.get(*then_branch) {
        diagnostics.push(faded(open.pos, open.end()));
        diagnostics.push(faded(close.pos, close.end()));
    }

    let checked = Printer::print_trimmed(arena, guard.rewrite.checked);
    diagnostics.push(Diagnostic::from_message(
        file_name,
        start,
        end - start,
        &diagnostic_messages::USE_NULL_CONDITIONAL,
        &[&checked],
    ));
}

/// Generated files are recognized by name or by a marker in the comment
/// that opens the file.
pub fn is_generated(file_name: &str, arena: &SyntaxArena, root: NodeIndex) -> bool {
    let lower = file_name.to_ascii_lowercase();
    if GENERATED_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix)) {
        return true;
    }
    arena
        .first_token(root)
        .is_some_and(|token| token.leading.iter().any(has_generated_marker))
}

fn has_generated_marker(trivia: &Trivia) -> bool {
    trivia.is_comment() && GENERATED_MARKERS.iter().any(|marker| trivia.text.contains(marker))
}

#[cfg(test)]
#[path = "tests/analyzer_tests.rs"]
mod tests;
