//! Null-check to null-conditional rewriting.
//!
//! Given an `if` statement of the form
//!
//! ```text
//! if (x != null) x.a.b();
//! ```
//!
//! the rewriter produces the equivalent `x?.a.b();`. The pipeline runs in
//! this order and stops at the first stage that rejects the input:
//!
//! 1. [`validate_shape`]: `if (<expr> != null) <call>;`, no `else`
//! 2. [`chain_starts_with`]: the call chain starts with `<expr>`
//! 3. [`TypeFacts::classify`]: reference or nullable value type
//! 4. [`strip_value_unwrap`]: drop `.Value` after a nullable value
//! 5. [`wrapping_accessor`]: the member, element or call reading `<expr>`
//! 6. [`to_conditional`]: `?.` / `?[` form of that accessor
//! 7. [`merge_trivia`]: keep every comment of the removed guard

pub mod chain;
pub mod convert;
pub mod error;
pub mod rewriter;
pub mod shape;
pub mod trivia_merge;
pub mod type_facts;
pub mod unwrap;

pub use chain::{chain_starts_with, wrapping_accessor};
pub use convert::to_conditional;
pub use error::{Ineligibility, RewriteError};
pub use rewriter::{NullCheckRewriter, Rewrite};
pub use shape::{Guard, validate_shape};
pub use trivia_merge::merge_trivia;
pub use type_facts::{CancellationToken, Cancelled, DeclaredTypeFacts, TypeClass, TypeFacts};
pub use unwrap::{VALUE_ACCESSOR, strip_value_unwrap};
