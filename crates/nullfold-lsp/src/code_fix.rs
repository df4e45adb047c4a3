//! Code fix for null-check guards.

use crate::analyzer::{EligibleGuard, NullCheckAnalyzer};
use nullfold_common::diagnostics::diagnostic_codes;
use nullfold_common::{Diagnostic, LineMap};
use nullfold_rewrite::{CancellationToken, TypeFacts};
use nullfold_syntax::{Printer, SyntaxArena, parse_source_file};
use serde::Serialize;
use tracing::debug;

pub const FIX_NAME: &str = "useNullConditional";
pub const FIX_ID: &str = "fixUseNullConditional";
pub const FIX_DESCRIPTION: &str = "Replace null-check 'if' with null-conditional member access";
pub const FIX_ALL_DESCRIPTION: &str = "Replace all null-check 'if' statements";

/// Diagnostic codes this fix resolves.
pub const FIXABLE_CODES: &[u32] = &[
    diagnostic_codes::USE_NULL_CONDITIONAL,
    diagnostic_codes::USE_NULL_CONDITIONAL_FADED_TOKEN,
];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeFixInfo {
    pub fix_name: String,
    pub description: String,
    pub changes: Vec<CodeFixFileChange>,
    /// Commands to run after applying the fix. Always empty.
    pub commands: Vec<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix_all_description: Option<String>,
}

/// A file change in a code fix.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeFixFileChange {
    pub file_name: String,
    pub text_changes: Vec<CodeFixTextChange>,
}

/// A text change within a file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeFixTextChange {
    pub start: CodeFixPosition,
    pub end: CodeFixPosition,
    pub new_text: String,
}

/// A 1-based line/offset position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CodeFixPosition {
    pub line: u32,
    pub offset: u32,
}

impl CodeFixPosition {
    fn at(line_map: &LineMap, offset: u32, source: &str) -> Self {
        let position = line_map.offset_to_position(offset, source);
        CodeFixPosition {
            line: position.line + 1,
            offset: position.character + 1,
        }
    }
}

/// The outcome of fixing every guard in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixAllResult {
    pub text: String,
    pub applied: usize,
}

pub struct NullCheckCodeFix<'a, F: TypeFacts + ?Sized> {
    analyzer: NullCheckAnalyzer<'a, F>,
}

impl<'a, F: TypeFacts + ?Sized> NullCheckCodeFix<'a, F> {
    pub fn new(facts: &'a F) -> Self {
        NullCheckCodeFix {
            analyzer: NullCheckAnalyzer::new(facts).include_generated(true),
        }
    }

    /// One fix per eligible guard, in source order.
    pub fn fixes(&self, file_name: &str, source: &str, cancel: &CancellationToken) -> Vec<CodeFixInfo> {
        let mut result = parse_source_file(file_name, source);
        if result.has_errors() {
            return Vec::new();
        }
        let Ok(guards) = self
            .analyzer
            .eligible_guards(&mut result.arena, result.root, cancel)
        else {
            return Vec::new();
        };

        let line_map = LineMap::build(source);
        guards
            .iter()
            .filter_map(|guard| fix_for_guard(&result.arena, file_name, source, &line_map, guard))
            .collect()
    }

    /// The fix for the guard a diagnostic was reported on.
    pub fn fixes_for_diagnostic(
        &self,
        source: &str,
        diagnostic: &Diagnostic,
        cancel: &CancellationToken,
    ) -> Vec<CodeFixInfo> {
        if !FIXABLE_CODES.contains(&diagnostic.code) {
            return Vec::new();
        }
        let line_map = LineMap::build(source);
        let start = CodeFixPosition::at(&line_map, diagnostic.start, source);
        let end = CodeFixPosition::at(&line_map, diagnostic.start + diagnostic.length, source);
        self.fixes(&diagnostic.file, source, cancel)
            .into_iter()
            .filter(|fix| {
                fix.changes.iter().flat_map(|change| &change.text_changes).any(|change| {
                    covers(change.start, change.end, start) && covers(change.start, change.end, end)
                })
            })
            .collect()
    }

    /// Rewrite every eligible guard in `source`. The text comes back
    /// unchanged when the file has parse errors, nothing applies or the
    /// operation is cancelled.
    pub fn apply_all(&self, file_name: &str, source: &str, cancel: &CancellationToken) -> FixAllResult {
        let unchanged = || FixAllResult {
            text: source.to_string(),
            applied: 0,
        };

        let mut result = parse_source_file(file_name, source);
        if result.has_errors() {
            return unchanged();
        }
        let Ok(guards) = self
            .analyzer
            .eligible_guards(&mut result.arena, result.root, cancel)
        else {
            return unchanged();
        };
        if guards.is_empty() {
            return unchanged();
        }

        let mut root = result.root;
        let mut applied = 0;
        for guard in &guards {
            // Guards never nest, so each one is still reachable from the new root
            if let Some(new_root) =
                result
                    .arena
                    .replace_node(root, guard.if_statement, guard.rewrite.statement)
            {
                root = new_root;
                applied += 1;
            }
        }
        debug!(file = file_name, applied, "applied all fixes");
        FixAllResult {
            text: Printer::print(&result.arena, root),
            applied,
        }
    }
}

fn covers(start: CodeFixPosition, end: CodeFixPosition, at: CodeFixPosition) -> bool {
    let key = |p: CodeFixPosition| (p.line, p.offset);
    key(start) <= key(at) && key(at) <= key(end)
}

fn fix_for_guard(
    arena: &SyntaxArena,
    file_name: &str,
    source: &str,
    line_map: &LineMap,
    guard: &EligibleGuard,
) -> Option<CodeFixInfo> {
    let (start, end) = arena.full_span(guard.if_statement)?;
    let change = CodeFixTextChange {
        start: CodeFixPosition::at(line_map, start, source),
        end: CodeFixPosition::at(line_map, end, source),
        new_text: Printer::print(arena, guard.rewrite.statement),
    };
    Some(CodeFixInfo {
        fix_name: FIX_NAME.to_string(),
        description: FIX_DESCRIPTION.to_string(),
        changes: vec![CodeFixFileChange {
            file_name: file_name.to_string(),
            text_changes: vec![change],
        }],
        commands: Vec::new(),
        fix_id: Some(FIX_ID.to_string()),
        fix_all_description: Some(FIX_ALL_DESCRIPTION.to_string()),
    })
}

#[cfg(test)]
#[path = "tests/code_fix_tests.rs"]
mod tests;
