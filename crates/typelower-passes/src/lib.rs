//! Rewrite rules and file-level passes for typelower.
//!
//! This crate contains the standard rule catalog run by the tree walker,
//! and the three passes that need to see a whole file at once: import
//! reorganization, declaration merging, and sentinel substitution.
//!
//! ## Pipeline
//!
//! The passes run in this order after the rule walk. The driver lives in
//! the `typelower` crate.

// === Rule catalog ===
pub mod rules;

// === File-level passes ===
pub mod imports;
pub mod merge;
pub mod sentinel;
pub mod signature;

// Re-exports
pub use imports::{AliasEntry, AliasTable, reorganize_imports};
pub use merge::merge_declarations;
pub use rules::standard_catalog;
pub use sentinel::substitute_sentinels;
pub use signature::{MemberCategory, signature_equal};
