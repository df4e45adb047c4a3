use super::*;
use nullfold_syntax::{NodeKind, ParseResult, Printer, parse_source_file};

fn parse_expression(source: &str) -> (ParseResult, NodeIndex) {
    let result = parse_source_file("test.csx", source);
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    let Some(Node::SourceFile { statements, .. }) = result.arena.get(result.root) else {
        panic!("expected source file");
    };
    let Some(Node::ExpressionStatement { expression, .. }) = result.arena.get(statements[0]) else {
        panic!("expected expression statement");
    };
    let expression = *expression;
    (result, expression)
}

fn convert(source: &str) -> Option<String> {
    let (mut result, expression) = parse_expression(source);
    let converted = to_conditional(&mut result.arena, expression)?;
    Some(Printer::print_trimmed(&result.arena, converted))
}

#[test]
fn member_access_becomes_member_binding() {
    assert_eq!(convert("b.c;").as_deref(), Some("b?.c"));
}

#[test]
fn element_access_becomes_element_binding() {
    assert_eq!(convert("b.c[0];").as_deref(), Some("b.c?[0]"));
}

#[test]
fn member_call_becomes_bound_invocation() {
    let (mut result, expression) = parse_expression("d.m(x, y);");
    let converted = to_conditional(&mut result.arena, expression).unwrap();
    let arena = &result.arena;
    assert_eq!(Printer::print_trimmed(arena, converted), "d?.m(x, y)");

    let Some(Node::ConditionalAccess {
        target, binding, ..
    }) = arena.get(converted)
    else {
        panic!("expected conditional access");
    };
    assert_eq!(Printer::print_trimmed(arena, *target), "d");
    let Some(Node::Invocation { target: callee, .. }) = arena.get(*binding) else {
        panic!("expected invocation binding");
    };
    assert_eq!(arena.kind(*callee), Some(NodeKind::MemberBinding));
}

#[test]
fn bare_call_is_not_convertible() {
    assert_eq!(convert("f(1);"), None);
    assert_eq!(convert("(g)(1);"), None);
}

#[test]
fn other_expressions_are_not_convertible() {
    assert_eq!(convert("a;"), None);
    assert_eq!(convert("a + b;"), None);
}

#[test]
fn conversion_is_idempotent() {
    let (mut result, expression) = parse_expression("a?.b;");
    assert_eq!(to_conditional(&mut result.arena, expression), Some(expression));

    let (mut result, expression) = parse_expression("b.c;");
    let once = to_conditional(&mut result.arena, expression).unwrap();
    let twice = to_conditional(&mut result.arena, once).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn question_mark_stays_next_to_the_binding() {
    assert_eq!(convert("a\n    .b();").as_deref(), Some("a\n    ?.b()"));
    assert_eq!(convert("a /* x */ [1];").as_deref(), Some("a /* x */ ?[1]"));
}
