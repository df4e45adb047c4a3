use super::*;
use nullfold_syntax::{ParseResult, Printer, parse_source_file};

/// The first statement and the node printed as `checked` inside it.
fn setup(source: &str, checked: &str) -> (ParseResult, NodeIndex, NodeIndex) {
    let result = parse_source_file("test.csx", source);
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    let Some(Node::SourceFile { statements, .. }) = result.arena.get(result.root) else {
        panic!("expected source file");
    };
    let statement = statements[0];
    let matched = result
        .arena
        .descendants(statement)
        .into_iter()
        .find(|&idx| Printer::print_trimmed(&result.arena, idx) == checked)
        .unwrap_or_else(|| panic!("{checked} not found"));
    (result, statement, matched)
}

#[test]
fn value_after_the_match_is_removed() {
    let (mut result, statement, matched) =
        setup("d.myStruct.Value[0].CompareTo(42);", "d.myStruct");
    let unwrapped = strip_value_unwrap(&mut result.arena, statement, matched).unwrap();
    assert_eq!(
        Printer::print(&result.arena, unwrapped),
        "d.myStruct[0].CompareTo(42);"
    );
    // The input tree is untouched
    assert_eq!(
        Printer::print(&result.arena, statement),
        "d.myStruct.Value[0].CompareTo(42);"
    );
}

#[test]
fn verbatim_value_name_is_recognized() {
    let (mut result, statement, matched) = setup("x.@Value.ToString();", "x");
    let unwrapped = strip_value_unwrap(&mut result.arena, statement, matched).unwrap();
    assert_eq!(Printer::print(&result.arena, unwrapped), "x.ToString();");
}

#[test]
fn trivia_of_the_removed_accessor_is_kept() {
    let (mut result, statement, matched) = setup("x /* a */ . /* b */ Value.M();", "x");
    let unwrapped = strip_value_unwrap(&mut result.arena, statement, matched).unwrap();
    assert_eq!(
        Printer::print(&result.arena, unwrapped),
        "x /* a */  /* b */ .M();"
    );
}

#[test]
fn other_members_are_left_alone() {
    let (mut result, statement, matched) = setup("x.HasValue.ToString();", "x");
    assert_eq!(strip_value_unwrap(&mut result.arena, statement, matched), None);

    let (mut result, statement, matched) = setup("x[0].Value.ToString();", "x");
    assert_eq!(strip_value_unwrap(&mut result.arena, statement, matched), None);
}
