//! Guard shape validation.

use crate::error::Ineligibility;
use nullfold_syntax::{Node, NodeIndex, NodeKind, SyntaxArena, SyntaxKind};

/// The parts of an eligible `if (x != null) x.m();` guard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Guard {
    pub if_statement: NodeIndex,
    /// The operand compared against `null`.
    pub checked: NodeIndex,
    /// The single guarded expression statement.
    pub body: NodeIndex,
    pub body_expression: NodeIndex,
    /// The block around `body`, when the guard uses braces.
    pub block: Option<NodeIndex>,
}

/// Check that `statement` is `if (<expr> != null) <call>;` (either operand
/// order, optionally braced) and pick out its parts.
pub fn validate_shape(arena: &SyntaxArena, statement: NodeIndex) -> Result<Guard, Ineligibility> {
    let Some(Node::If {
        condition,
        then_branch,
        else_clause,
        ..
    }) = arena.get(statement)
    else {
        return Err(Ineligibility::NotAnIf);
    };
    if else_clause.is_some() {
        return Err(Ineligibility::HasElse);
    }

    let checked = checked_operand(arena, *condition)?;

    let (body, block) = match arena.get(*then_branch) {
        Some(Node::Block { statements, .. }) => match statements.as_slice() {
            [only] => (*only, Some(*then_branch)),
            _ => return Err(Ineligibility::BodyNotSingleExpressionStatement),
        },
        _ => (*then_branch, None),
    };
    let Some(Node::ExpressionStatement { expression, .. }) = arena.get(body) else {
        return Err(Ineligibility::BodyNotSingleExpressionStatement);
    };
    if arena.kind(*expression) != Some(NodeKind::Invocation) {
        return Err(Ineligibility::BodyNotInvocation);
    }

    Ok(Guard {
        if_statement: statement,
        checked,
        body,
        body_expression: *expression,
        block,
    })
}

fn checked_operand(arena: &SyntaxArena, condition: NodeIndex) -> Result<NodeIndex, Ineligibility> {
    let Some(Node::Binary {
        left,
        operator,
        right,
    }) = arena.get(condition)
    else {
        return Err(Ineligibility::NotNotEquals);
    };
    if operator.kind != SyntaxKind::ExclamationEqualsToken {
        return Err(Ineligibility::NotNotEquals);
    }
    let is_null = |idx: NodeIndex| arena.kind(idx) == Some(NodeKind::NullLiteral);
    match (is_null(*left), is_null(*right)) {
        (true, false) => Ok(*right),
        (false, true) => Ok(*left),
        _ => Err(Ineligibility::NoNullOperand),
    }
}
