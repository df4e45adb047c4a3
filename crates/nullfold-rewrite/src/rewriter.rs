//! The rewrite pipeline.

use crate::chain::{chain_starts_with, wrapping_accessor};
use crate::convert::to_conditional;
use crate::error::{Ineligibility, RewriteError};
use crate::shape::validate_shape;
use crate::trivia_merge::merge_trivia;
use crate::type_facts::{CancellationToken, TypeClass, TypeFacts};
use crate::unwrap::strip_value_unwrap;
use nullfold_syntax::{Node, NodeIndex, SyntaxArena};
use tracing::{debug, trace};

/// A successful rewrite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rewrite {
    /// The replacement expression statement.
    pub statement: NodeIndex,
    /// The expression the guard compared against `null`.
    pub checked: NodeIndex,
    /// The accessor that became null-conditional. After a `.Value` unwrap
    /// this node belongs to the intermediate tree, not the original one.
    pub accessor: NodeIndex,
}

/// Rewrites `if (x != null) x.a.b();` into `x?.a.b();`.
///
/// The rewriter only adds nodes to the arena; the tree the `if` statement
/// belongs to is left as it was. Callers splice `Rewrite::statement` in
/// with [`SyntaxArena::replace_node`].
pub struct NullCheckRewriter<'a> {
    arena: &'a mut SyntaxArena,
}

impl<'a> NullCheckRewriter<'a> {
    pub fn new(arena: &'a mut SyntaxArena) -> Self {
        NullCheckRewriter { arena }
    }

    pub fn arena(&self) -> &SyntaxArena {
        &*self.arena
    }

    pub fn rewrite<F: TypeFacts + ?Sized>(
        &mut self,
        if_statement: NodeIndex,
        facts: &F,
        cancel: &CancellationToken,
    ) -> Result<Rewrite, RewriteError> {
        let result = self.run(if_statement, facts, cancel);
        match &result {
            Ok(rewrite) => debug!(
                statement = if_statement.0,
                replacement = rewrite.statement.0,
                "null check rewritten"
            ),
            Err(RewriteError::Ineligible(reason)) => trace!(
                statement = if_statement.0,
                reason = reason.as_str(),
                "not eligible"
            ),
            Err(RewriteError::Cancelled) => trace!(statement = if_statement.0, "cancelled"),
        }
        result
    }

    fn run<F: TypeFacts + ?Sized>(
        &mut self,
        if_statement: NodeIndex,
        facts: &F,
        cancel: &CancellationToken,
    ) -> Result<Rewrite, RewriteError> {
        cancel.check()?;

        let guard = validate_shape(self.arena, if_statement)?;
        let matched = chain_starts_with(self.arena, guard.body_expression, guard.checked)
            .ok_or(Ineligibility::NoChainPrefix)?;

        // The type query only runs for guards that match structurally
        let class = facts.classify(self.arena, guard.checked, cancel)?;
        cancel.check()?;

        let (body, matched) = match class.ok_or(Ineligibility::UnknownType)? {
            TypeClass::ReferenceType => (guard.body, matched),
            TypeClass::NonNullableValueType => {
                return Err(Ineligibility::NonNullableValueType.into());
            }
            TypeClass::NullableValueType => {
                match strip_value_unwrap(self.arena, guard.body, matched) {
                    Some(unwrapped) => {
                        let expression = expression_of(self.arena, unwrapped)
                            .ok_or(Ineligibility::UnwrapLost)?;
                        let rematched = chain_starts_with(self.arena, expression, guard.checked)
                            .ok_or(Ineligibility::UnwrapLost)?;
                        (unwrapped, rematched)
                    }
                    None => (guard.body, matched),
                }
            }
        };

        let accessor =
            wrapping_accessor(self.arena, body, matched).ok_or(Ineligibility::NoAccessor)?;
        let converted = to_conditional(self.arena, accessor).ok_or(Ineligibility::NotConvertible)?;
        let statement = merge_trivia(self.arena, &guard, body, accessor, converted)
            .ok_or(Ineligibility::NoAccessor)?;

        Ok(Rewrite {
            statement,
            checked: guard.checked,
            accessor,
        })
    }
}

fn expression_of(arena: &SyntaxArena, statement: NodeIndex) -> Option<NodeIndex> {
    match arena.get(statement)? {
        Node::ExpressionStatement { expression, .. } => Some(*expression),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/rewriter_tests.rs"]
mod tests;
