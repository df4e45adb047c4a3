//! The type-system query used by the rewriter, and cooperative cancellation.

use nullfold_syntax::{NodeIndex, SyntaxArena};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Static type class of an expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeClass {
    #[serde(rename = "reference")]
    ReferenceType,
    #[serde(rename = "value")]
    NonNullableValueType,
    #[serde(rename = "nullable")]
    NullableValueType,
}

impl TypeClass {
    pub fn as_str(self) -> &'static str {
        match self {
            TypeClass::ReferenceType => "reference",
            TypeClass::NonNullableValueType => "value",
            TypeClass::NullableValueType => "nullable",
        }
    }
}

impl std::str::FromStr for TypeClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reference" => Ok(TypeClass::ReferenceType),
            "value" => Ok(TypeClass::NonNullableValueType),
            "nullable" => Ok(TypeClass::NullableValueType),
            other => Err(format!(
                "unknown type class '{other}' (expected reference, value or nullable)"
            )),
        }
    }
}

/// The host cancelled the operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cancelled;

impl std::fmt::Display for Cancelled {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("operation was cancelled")
    }
}

impl std::error::Error for Cancelled {}

/// A cloneable cancellation flag shared between a host and its workers.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        CancellationToken::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    #[inline]
    pub fn check(&self) -> Result<(), Cancelled> {
        if self.is_cancelled() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Answers "what kind of type does this expression have?".
///
/// `Ok(None)` means the expression could not be classified. The query may
/// block; implementations should watch `cancel` and return `Err(Cancelled)`
/// once it fires.
pub trait TypeFacts {
    fn classify(
        &self,
        arena: &SyntaxArena,
        expr: NodeIndex,
        cancel: &CancellationToken,
    ) -> Result<Option<TypeClass>, Cancelled>;
}

/// Type facts declared up front, keyed by expression text.
///
/// Keys ignore whitespace and comments, so `a . b` and `a.b` name the same
/// expression. Expressions without an entry get the default class, if any.
#[derive(Clone, Debug, Default)]
pub struct DeclaredTypeFacts {
    types: FxHashMap<String, TypeClass>,
    default: Option<TypeClass>,
}

impl DeclaredTypeFacts {
    pub fn new(default: Option<TypeClass>) -> Self {
        DeclaredTypeFacts {
            types: FxHashMap::default(),
            default,
        }
    }

    /// Every expression is a reference type unless declared otherwise.
    pub fn references() -> Self {
        DeclaredTypeFacts::new(Some(TypeClass::ReferenceType))
    }

    pub fn declare(&mut self, expression: &str, class: TypeClass) -> &mut Self {
        self.types.insert(normalize_key(expression), class);
        self
    }

    pub fn with(mut self, expression: &str, class: TypeClass) -> Self {
        self.declare(expression, class);
        self
    }

    pub fn default_class(&self) -> Option<TypeClass> {
        self.default
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn lookup(&self, expression: &str) -> Option<TypeClass> {
        self.types
            .get(&normalize_key(expression))
            .copied()
            .or(self.default)
    }
}

impl TypeFacts for DeclaredTypeFacts {
    fn classify(
        &self,
        arena: &SyntaxArena,
        expr: NodeIndex,
        cancel: &CancellationToken,
    ) -> Result<Option<TypeClass>, Cancelled> {
        cancel.check()?;
        let key: String = arena
            .tokens(expr)
            .iter()
            .map(|token| token.text.as_str())
            .collect();
        Ok(self.types.get(&key).copied().or(self.default))
    }
}

fn normalize_key(expression: &str) -> String {
    expression.split_whitespace().collect()
}

#[cfg(test)]
#[path = "tests/type_facts_tests.rs"]
mod tests;
