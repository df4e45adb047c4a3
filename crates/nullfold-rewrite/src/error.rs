//! Outcomes of a rewrite that did not produce a replacement.

use crate::type_facts::Cancelled;

/// Why a statement is not a candidate for the rewrite.
///
/// Each variant names the pipeline stage that rejected the statement.
/// These are normal results: most `if` statements in real code end here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Ineligibility {
    /// The statement is not an `if`.
    NotAnIf,
    /// The `if` has an `else` branch.
    HasElse,
    /// The condition is not an `!=` comparison.
    NotNotEquals,
    /// Neither side of the comparison, or both, is `null`.
    NoNullOperand,
    /// The guarded statement is not a single expression statement.
    BodyNotSingleExpressionStatement,
    /// The guarded expression is not a call.
    BodyNotInvocation,
    /// The guarded chain does not start with the checked expression.
    NoChainPrefix,
    /// The type of the checked expression is unknown.
    UnknownType,
    /// The checked expression is a non-nullable value type.
    NonNullableValueType,
    /// The chain no longer starts with the checked expression after
    /// removing `.Value`.
    UnwrapLost,
    /// Nothing accesses a member or element of the checked expression.
    NoAccessor,
    /// The accessor has no null-conditional form (a call not through a member).
    NotConvertible,
}

impl Ineligibility {
    pub fn as_str(self) -> &'static str {
        match self {
            Ineligibility::NotAnIf => "not-an-if",
            Ineligibility::HasElse => "has-else",
            Ineligibility::NotNotEquals => "not-not-equals",
            Ineligibility::NoNullOperand => "no-null-operand",
            Ineligibility::BodyNotSingleExpressionStatement => "body-not-single-expression-statement",
            Ineligibility::BodyNotInvocation => "body-not-invocation",
            Ineligibility::NoChainPrefix => "no-chain-prefix",
            Ineligibility::UnknownType => "unknown-type",
            Ineligibility::NonNullableValueType => "non-nullable-value-type",
            Ineligibility::UnwrapLost => "unwrap-lost",
            Ineligibility::NoAccessor => "no-accessor",
            Ineligibility::NotConvertible => "not-convertible",
        }
    }
}

impl std::fmt::Display for Ineligibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RewriteError {
    Ineligible(Ineligibility),
    Cancelled,
}

impl RewriteError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RewriteError::Cancelled)
    }
}

impl From<Ineligibility> for RewriteError {
    fn from(reason: Ineligibility) -> Self {
        RewriteError::Ineligible(reason)
    }
}

impl From<Cancelled> for RewriteError {
    fn from(_: Cancelled) -> Self {
        RewriteError::Cancelled
    }
}

impl std::fmt::Display for RewriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RewriteError::Ineligible(reason) => write!(f, "statement is not eligible: {reason}"),
            RewriteError::Cancelled => write!(f, "rewrite was cancelled"),
        }
    }
}

impl std::error::Error for RewriteError {}
