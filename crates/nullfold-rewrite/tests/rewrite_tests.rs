//! End-to-end rewrites of whole guard statements.

use nullfold_rewrite::{
    CancellationToken, DeclaredTypeFacts, Ineligibility, NullCheckRewriter, RewriteError,
    TypeClass,
};
use nullfold_syntax::{NodeIndex, NodeKind, ParseResult, Printer, parse_source_file};

fn parse(source: &str) -> ParseResult {
    let result = parse_source_file("test.csx", source);
    assert!(
        result.diagnostics.is_empty(),
        "unexpected diagnostics: {:?}",
        result.diagnostics
    );
    result
}

fn first_if(result: &ParseResult) -> NodeIndex {
    result
        .arena
        .descendants(result.root)
        .into_iter()
        .find(|&idx| result.arena.kind(idx) == Some(NodeKind::If))
        .expect("source has an if statement")
}

fn rewrite_with(source: &str, facts: &DeclaredTypeFacts) -> Result<String, RewriteError> {
    let mut result = parse(source);
    let statement = first_if(&result);
    let rewrite = NullCheckRewriter::new(&mut result.arena).rewrite(
        statement,
        facts,
        &CancellationToken::new(),
    )?;
    Ok(Printer::print(&result.arena, rewrite.statement))
}

fn rewrite(source: &str) -> Result<String, RewriteError> {
    rewrite_with(source, &DeclaredTypeFacts::references())
}

fn ineligible(reason: Ineligibility) -> Result<String, RewriteError> {
    Err(RewriteError::Ineligible(reason))
}

#[test]
fn null_on_the_left_with_call_on_the_next_line() {
    assert_eq!(
        rewrite("if (null != d )\n    d.m(blah, blah);").unwrap(),
        "d?.m(blah, blah);"
    );
}

#[test]
fn member_access_before_a_call() {
    assert_eq!(
        rewrite("if (b != null)  b.c.ToString();").unwrap(),
        "b?.c.ToString();"
    );
}

#[test]
fn element_access_after_a_checked_member() {
    assert_eq!(
        rewrite("if (b.c != null)  b.c[0].ToString();").unwrap(),
        "b.c?[0].ToString();"
    );
}

#[test]
fn nullable_value_unwrap_is_removed() {
    let facts = DeclaredTypeFacts::references().with("d.myStruct", TypeClass::NullableValueType);
    assert_eq!(
        rewrite_with(
            "if (d.myStruct != null)  d.myStruct.Value[0].CompareTo(42).ToString();",
            &facts
        )
        .unwrap(),
        "d.myStruct?[0].CompareTo(42).ToString();"
    );
}

#[test]
fn nullable_value_without_unwrap_converts_directly() {
    let facts = DeclaredTypeFacts::references().with("n", TypeClass::NullableValueType);
    assert_eq!(
        rewrite_with("if (n != null) n.ToString();", &facts).unwrap(),
        "n?.ToString();"
    );
    assert_eq!(
        rewrite_with("if (n != null) n.Value.ToString();", &facts).unwrap(),
        "n?.ToString();"
    );
}

#[test]
fn long_member_chain() {
    assert_eq!(
        rewrite("if (dyn.x.y.z != null) dyn.x.y.z.m();").unwrap(),
        "dyn.x.y.z?.m();"
    );
}

#[test]
fn braced_body_with_a_checked_call() {
    assert_eq!(
        rewrite("if (a.b() != null) { a.b().c[0].ToString(); }").unwrap(),
        "a.b()?.c[0].ToString();"
    );
}

#[test]
fn comments_inside_the_block_move_before_the_statement() {
    assert_eq!(
        rewrite("//comment1\nif (o != null) {\n    //comment2\n    o.ToString();\n}\n").unwrap(),
        "//comment1\n//comment2\no?.ToString();\n\n"
    );
}

#[test]
fn moved_comments_take_the_guard_indentation() {
    let source =
        "        //comment1\n        if (o != null) {\n            //comment2\n            o.ToString();\n        }\n";
    assert_eq!(
        rewrite(source).unwrap(),
        "        //comment1\n        //comment2\n        o?.ToString();\n\n"
    );
}

#[test]
fn header_comments_are_kept_in_order() {
    let source = "if /* a */ ( /* b */ x != null /* c */ ) // d\n{ x.y(); } // e\n";
    assert_eq!(
        rewrite(source).unwrap(),
        "/* a */ /* b */ /* c */ // d\nx?.y(); // e\n"
    );
}

#[test]
fn blank_lines_in_the_header_are_kept() {
    assert_eq!(
        rewrite("if (a != null)\n\n{ a.m(); }\n").unwrap(),
        "\na?.m();\n"
    );
    assert_eq!(
        rewrite("    if (a != null) // d\n\n    {\n        a.m();\n    }\n").unwrap(),
        "    // d\n\n    a?.m();\n\n"
    );
}

#[test]
fn separator_after_the_guard_is_kept() {
    assert_eq!(rewrite("if (g != null) g.h(); ").unwrap(), "g?.h(); ");
    assert_eq!(rewrite("if (g != null) { g.h(); } ").unwrap(), "g?.h(); ");
}

#[test]
fn crlf_line_breaks_are_preserved() {
    assert_eq!(
        rewrite("// c\r\nif (o != null) // d\r\n    o.M();\r\n").unwrap(),
        "// c\r\n// d\r\no?.M();\r\n"
    );
}

#[test]
fn question_mark_follows_a_wrapped_receiver() {
    assert_eq!(
        rewrite("if (a != null)\n    a\n        .b();\n").unwrap(),
        "a\n        ?.b();\n"
    );
}

#[test]
fn replacement_splices_into_the_file() {
    let source = "var x = 1;\nif (x != null) x.M();\nx.N();\n";
    let mut result = parse(source);
    let statement = first_if(&result);
    let rewrite = NullCheckRewriter::new(&mut result.arena)
        .rewrite(
            statement,
            &DeclaredTypeFacts::references(),
            &CancellationToken::new(),
        )
        .unwrap();
    let root = result
        .arena
        .replace_node(result.root, statement, rewrite.statement)
        .unwrap();
    assert_eq!(
        Printer::print(&result.arena, root),
        "var x = 1;\nx?.M();\nx.N();\n"
    );
}

#[test]
fn ineligible_shapes() {
    let cases = [
        ("if (o != null) return o;", Ineligibility::BodyNotSingleExpressionStatement),
        ("if (o != null) { o.M(); o.N(); }", Ineligibility::BodyNotSingleExpressionStatement),
        ("if (o != null) { }", Ineligibility::BodyNotSingleExpressionStatement),
        ("if (o != null) o.x = 1;", Ineligibility::BodyNotInvocation),
        ("if (a != null) z.m();", Ineligibility::NoChainPrefix),
        ("if (a != null) a.m(); else b.m();", Ineligibility::HasElse),
        ("if (a == null) a.m();", Ineligibility::NotNotEquals),
        ("if (a) a.m();", Ineligibility::NotNotEquals),
        ("if (a != b) a.m();", Ineligibility::NoNullOperand),
        ("if (null != null) a.m();", Ineligibility::NoNullOperand),
        ("if (f != null) f();", Ineligibility::NoAccessor),
    ];
    for (source, reason) in cases {
        assert_eq!(rewrite(source), ineligible(reason), "{source}");
    }
}

#[test]
fn checked_expression_used_as_an_argument_is_not_a_prefix() {
    assert_eq!(
        rewrite("if (a != null) Log.Write(a);"),
        ineligible(Ineligibility::NoChainPrefix)
    );
    assert_eq!(
        rewrite("if (a.b != null) a.b();"),
        ineligible(Ineligibility::NoChainPrefix)
    );
}

#[test]
fn type_classes_gate_the_rewrite() {
    let unknown = DeclaredTypeFacts::new(None);
    assert_eq!(
        rewrite_with("if (a != null) a.m();", &unknown),
        ineligible(Ineligibility::UnknownType)
    );

    let value = DeclaredTypeFacts::new(None).with("i", TypeClass::NonNullableValueType);
    assert_eq!(
        rewrite_with("if (i != null) i.ToString();", &value),
        ineligible(Ineligibility::NonNullableValueType)
    );
}

#[test]
fn cancelled_token_stops_the_rewrite() {
    let mut result = parse("if (a != null) a.m();");
    let statement = first_if(&result);
    let cancel = CancellationToken::new();
    cancel.cancel();
    let outcome = NullCheckRewriter::new(&mut result.arena).rewrite(
        statement,
        &DeclaredTypeFacts::references(),
        &cancel,
    );
    assert_eq!(outcome, Err(RewriteError::Cancelled));
}
