//! Whole-document fixtures for the analyzer and the code fix.

use nullfold_common::diagnostics::diagnostic_codes;
use nullfold_rewrite::{CancellationToken, DeclaredTypeFacts, TypeClass};
use nullfold_lsp::{NullCheckAnalyzer, NullCheckCodeFix};

fn facts() -> DeclaredTypeFacts {
    DeclaredTypeFacts::references().with("d.myStruct", TypeClass::NullableValueType)
}

fn insert_code(code: &str) -> String {
    format!("var blah = M();\n{{\n    {code}\n}}\n")
}

fn assert_fixed(code: &str, expected: &str) {
    let facts = facts();
    let result =
        NullCheckCodeFix::new(&facts).apply_all("fixture.csx", &insert_code(code), &CancellationToken::new());
    assert_eq!(result.applied, 1, "{code}");
    assert_eq!(result.text, insert_code(expected));
}

fn suggestions(source: &str) -> usize {
    let facts = facts();
    NullCheckAnalyzer::new(&facts)
        .analyze("fixture.csx", source, &CancellationToken::new())
        .iter()
        .filter(|d| d.code == diagnostic_codes::USE_NULL_CONDITIONAL)
        .count()
}

#[test]
fn simple_call() {
    assert_fixed("if (null != d )\r\n        d.m(blah, blah);", "d?.m(blah, blah);");
}

#[test]
fn property_accessor() {
    assert_fixed("if (b != null)  b.c.ToString();", "b?.c.ToString();");
}

#[test]
fn indexer() {
    assert_fixed("if (b.c != null)  b.c[0].ToString();", "b.c?[0].ToString();");
}

#[test]
fn nullable_value_type() {
    assert_fixed(
        "if (d.myStruct != null)  d.myStruct.Value[0].CompareTo(42).ToString();",
        "d.myStruct?[0].CompareTo(42).ToString();",
    );
}

#[test]
fn dynamic_expression() {
    assert_fixed("if (dyn.x.y.z != null) dyn.x.y.z.m();", "dyn.x.y.z?.m();");
}

#[test]
fn block_statement() {
    assert_fixed(
        "if (a.b() != null) { a.b().c[0].ToString(); }",
        "a.b()?.c[0].ToString();",
    );
}

#[test]
fn invocation_starts_with_the_receiver() {
    assert_fixed(
        "if (a != null)  a.b().c[1].d.m(blah, blah);",
        "a?.b().c[1].d.m(blah, blah);",
    );
}

#[test]
fn trivia_is_preserved() {
    let source = "if (ready) {\n    //comment1\n    if (o != null) {\n        //comment2\n        o.ToString();\n    }\n}\n";
    let expected = "if (ready) {\n    //comment1\n    //comment2\n    o?.ToString();\n\n}\n";
    let facts = facts();
    let result = NullCheckCodeFix::new(&facts).apply_all("fixture.csx", source, &CancellationToken::new());
    assert_eq!(result.text, expected);
}

#[test]
fn no_suggestion_on_compile_error() {
    let source = insert_code("if(o.GetType != null){\n        o.GetType.ToString()\n    }");
    assert_eq!(suggestions(&source), 0);
}

#[test]
fn no_suggestion_on_non_invocation_body() {
    let source = insert_code("if(o != null){\n        return o;\n    }");
    assert_eq!(suggestions(&source), 0);
}

#[test]
fn every_fixture_is_suggested() {
    for code in [
        "if (b != null)  b.c.ToString();",
        "if (dyn.x.y.z != null) dyn.x.y.z.m();",
        "if (a.b() != null) { a.b().c[0].ToString(); }",
    ] {
        assert_eq!(suggestions(&insert_code(code)), 1, "{code}");
    }
}
