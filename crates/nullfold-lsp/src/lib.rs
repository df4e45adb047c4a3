//! Editor integration for the null-check rewriter.
//!
//! - [`NullCheckAnalyzer`] reports guards that can become null-conditional
//!   accesses, with fade-out diagnostics for the code a fix would remove.
//! - [`NullCheckCodeFix`] turns those guards into text edits, one at a time
//!   or all at once.

pub mod analyzer;
pub mod code_fix;

pub use analyzer::{EligibleGuard, NullCheckAnalyzer, is_generated};
pub use code_fix::{
    CodeFixFileChange, CodeFixInfo, CodeFixPosition, CodeFixTextChange, FixAllResult,
    NullCheckCodeFix,
};
