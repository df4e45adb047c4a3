use super::*;
use nullfold_syntax::{Node, parse_source_file};

#[test]
fn type_class_names_round_trip_through_from_str() {
    for class in [
        TypeClass::ReferenceType,
        TypeClass::NonNullableValueType,
        TypeClass::NullableValueType,
    ] {
        assert_eq!(class.as_str().parse::<TypeClass>(), Ok(class));
    }
    assert!("struct".parse::<TypeClass>().is_err());
}

#[test]
fn type_class_deserializes_from_config_names() {
    let class: TypeClass = serde_json::from_str("\"nullable\"").unwrap();
    assert_eq!(class, TypeClass::NullableValueType);
}

#[test]
fn declared_facts_ignore_whitespace_in_keys() {
    let facts = DeclaredTypeFacts::new(None).with("d . myStruct", TypeClass::NullableValueType);
    assert_eq!(facts.lookup("d.myStruct"), Some(TypeClass::NullableValueType));
    assert_eq!(facts.lookup("d.other"), None);
    assert_eq!(facts.len(), 1);
}

#[test]
fn declared_facts_fall_back_to_the_default() {
    let facts = DeclaredTypeFacts::references().with("i", TypeClass::NonNullableValueType);
    assert_eq!(facts.lookup("anything"), Some(TypeClass::ReferenceType));
    assert_eq!(facts.lookup("i"), Some(TypeClass::NonNullableValueType));
}

#[test]
fn classify_uses_the_expression_text_without_trivia() {
    let result = parse_source_file("test.csx", "d /* c */ .myStruct;");
    let Some(Node::SourceFile { statements, .. }) = result.arena.get(result.root) else {
        panic!("expected source file");
    };
    let Some(Node::ExpressionStatement { expression, .. }) = result.arena.get(statements[0]) else {
        panic!("expected expression statement");
    };
    let facts = DeclaredTypeFacts::new(None).with("d.myStruct", TypeClass::NullableValueType);
    let cancel = CancellationToken::new();
    assert_eq!(
        facts.classify(&result.arena, *expression, &cancel),
        Ok(Some(TypeClass::NullableValueType))
    );

    cancel.cancel();
    assert_eq!(facts.classify(&result.arena, *expression, &cancel), Err(Cancelled));
}

#[test]
fn cancellation_is_shared_between_clones() {
    let token = CancellationToken::new();
    let clone = token.clone();
    assert!(!clone.is_cancelled());
    token.cancel();
    assert!(clone.is_cancelled());
    assert_eq!(clone.check(), Err(Cancelled));
}
