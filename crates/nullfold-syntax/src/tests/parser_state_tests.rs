use super::*;
use crate::node::NodeKind;
use crate::printer::Printer;
use nullfold_common::diagnostics::diagnostic_codes;

fn top_level(result: &ParseResult) -> Vec<NodeKind> {
    match result.arena.get(result.root) {
        Some(Node::SourceFile { statements, .. }) => statements
            .iter()
            .filter_map(|&s| result.arena.kind(s))
            .collect(),
        _ => Vec::new(),
    }
}

#[test]
fn missing_semicolon_is_synthesized() {
    let result = parse_source_file("test.csx", "a.b()\nc();\n");
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].code, diagnostic_codes::TOKEN_EXPECTED);
    assert_eq!(result.diagnostics[0].message_text, "';' expected.");
    assert_eq!(
        top_level(&result),
        vec![NodeKind::ExpressionStatement, NodeKind::ExpressionStatement]
    );
    // Missing tokens print as nothing
    assert_eq!(Printer::print(&result.arena, result.root), "a.b()\nc();\n");
}

#[test]
fn stray_tokens_are_skipped_up_to_the_semicolon() {
    let result = parse_source_file("test.csx", "} ] x;\ny();\n");
    assert!(result.has_errors());
    assert_eq!(
        result.diagnostics[0].code,
        diagnostic_codes::STATEMENT_EXPECTED
    );
    assert_eq!(
        top_level(&result),
        vec![NodeKind::Skipped, NodeKind::ExpressionStatement]
    );
    assert_eq!(
        Printer::print(&result.arena, result.root),
        "} ] x;\ny();\n"
    );
}

#[test]
fn unterminated_if_does_not_loop() {
    let result = parse_source_file("test.csx", "if (a != null)");
    assert!(result.has_errors());
    assert_eq!(top_level(&result), vec![NodeKind::If]);
}

#[test]
fn missing_expression_reports_once() {
    let result = parse_source_file("test.csx", "if () a();");
    let expression_errors = result
        .diagnostics
        .iter()
        .filter(|d| d.code == diagnostic_codes::EXPRESSION_EXPECTED)
        .count();
    assert_eq!(expression_errors, 1);
}

#[test]
fn deep_nesting_is_reported_instead_of_overflowing() {
    let depth = (MAX_RECURSION_DEPTH as usize) * 2;
    let source = format!("{}a{};", "(".repeat(depth), ")".repeat(depth));
    let result = parse_source_file("test.csx", &source);
    assert!(result.has_errors());
}

#[test]
fn operator_precedence_and_associativity() {
    let result = parse_source_file("test.csx", "x = a ?? b ?? c || d && e != f + g * h;");
    assert!(result.diagnostics.is_empty());
    let arena = &result.arena;
    let Some(Node::SourceFile { statements, .. }) = arena.get(result.root) else {
        panic!("no source file");
    };
    let Some(Node::ExpressionStatement { expression, .. }) = arena.get(statements[0]) else {
        panic!("not an expression statement");
    };
    let Some(Node::Binary {
        operator, right, ..
    }) = arena.get(*expression)
    else {
        panic!("not an assignment");
    };
    assert_eq!(operator.kind, SyntaxKind::EqualsToken);
    // `??` groups to the right: a ?? (b ?? (...))
    let Some(Node::Binary { left, right, .. }) = arena.get(*right) else {
        panic!("not a coalesce");
    };
    assert_eq!(Printer::print_trimmed(arena, *left), "a");
    assert_eq!(
        Printer::print_trimmed(arena, *right),
        "b ?? c || d && e != f + g * h"
    );
}
